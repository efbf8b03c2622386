// =============================================================================
// Application Identity
// =============================================================================

/// Application name (for display, paths and the binary)
pub const APP_NAME: &str = "post-stats";

/// Unix-style dotfile folder name
pub const APP_DOT_FOLDER: &str = ".post-stats";

// =============================================================================
// Configuration Files
// =============================================================================

/// Config file name
pub const CONFIG_FILE_NAME: &str = "post-stats.json";

/// Environment variable for config file path
pub const ENV_CONFIG: &str = "POST_STATS_CONFIG";

// =============================================================================
// Environment Variables - Logging
// =============================================================================

/// Environment variable for the log filter (falls back to RUST_LOG)
pub const ENV_LOG: &str = "POST_STATS_LOG";

/// Filter used when neither POST_STATS_LOG nor RUST_LOG is set
pub const DEFAULT_LOG_FILTER: &str = "info,post_stats=info,post_stats_cli=info";

// =============================================================================
// Environment Variables - Calculation
// =============================================================================

/// Environment variable for the JSON Lines input file
pub const ENV_INPUT: &str = "POST_STATS_INPUT";

/// Environment variable for the stat name label
pub const ENV_STAT_NAME: &str = "POST_STATS_STAT_NAME";

/// Environment variable for the inclusive range start
pub const ENV_START: &str = "POST_STATS_START";

/// Environment variable for the inclusive range end
pub const ENV_END: &str = "POST_STATS_END";

/// Environment variable for compact JSON output
pub const ENV_COMPACT: &str = "POST_STATS_COMPACT";

// =============================================================================
// Defaults
// =============================================================================

/// Stat name used when none is configured
pub const DEFAULT_STAT_NAME: &str = "average-posts-per-user";

/// Input path meaning "read from stdin"
pub const STDIN_PATH: &str = "-";
