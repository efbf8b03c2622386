use std::fmt;
use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use chrono::{DateTime, Utc};
use post_stats::CalculationParameters;
use post_stats::utils::time::parse_timestamp;
use serde::Deserialize;

use crate::utils::file::expand_path;

use super::cli::CliConfig;
use super::constants::{APP_DOT_FOLDER, CONFIG_FILE_NAME, DEFAULT_STAT_NAME, STDIN_PATH};

// =============================================================================
// File Config Structs (raw JSON, every field optional)
// =============================================================================

/// Date range section. Bounds are kept as strings until the final merge.
#[derive(Debug, Default, Clone, Deserialize)]
pub struct RangeFileConfig {
    pub start: Option<String>,
    pub end: Option<String>,
}

/// Output section
#[derive(Debug, Default, Clone, Deserialize)]
pub struct OutputFileConfig {
    pub pretty: Option<bool>,
}

#[derive(Debug, Default, Deserialize)]
pub struct FileConfig {
    pub stat_name: Option<String>,
    pub input: Option<String>,
    pub range: Option<RangeFileConfig>,
    pub output: Option<OutputFileConfig>,
    #[serde(flatten)]
    pub extra: serde_json::Value,
}

impl FileConfig {
    /// Load configuration from a JSON file
    fn load_from_file(path: &Path) -> Result<Self> {
        tracing::debug!(path = %path.display(), "Loading config file");
        let content = fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {}", path.display()))?;
        let config: Self = serde_json::from_str(&content)
            .with_context(|| format!("Failed to parse config file: {}", path.display()))?;
        tracing::trace!(config = ?config, "Parsed config file");
        Ok(config)
    }

    /// Warn about unknown fields in the config
    fn warn_unknown_fields(&self) {
        if let serde_json::Value::Object(map) = &self.extra
            && !map.is_empty()
        {
            let keys_str: String = map
                .keys()
                .map(|k| k.as_str())
                .collect::<Vec<_>>()
                .join(", ");
            tracing::warn!(
                fields = %keys_str,
                "Unknown fields in config file (possible typos)"
            );
        }
    }

    /// Merge another FileConfig into this one (other takes precedence)
    fn merge(&mut self, other: FileConfig) {
        if other.stat_name.is_some() {
            tracing::trace!(stat_name = ?other.stat_name, "Merging stat_name");
            self.stat_name = other.stat_name;
        }
        if other.input.is_some() {
            tracing::trace!(input = ?other.input, "Merging input");
            self.input = other.input;
        }

        if let Some(range) = other.range {
            let current = self.range.get_or_insert_with(RangeFileConfig::default);
            if range.start.is_some() {
                tracing::trace!(start = ?range.start, "Merging range.start");
                current.start = range.start;
            }
            if range.end.is_some() {
                tracing::trace!(end = ?range.end, "Merging range.end");
                current.end = range.end;
            }
        }

        if let Some(output) = other.output {
            let current = self.output.get_or_insert_with(OutputFileConfig::default);
            if output.pretty.is_some() {
                tracing::trace!(pretty = ?output.pretty, "Merging output.pretty");
                current.pretty = output.pretty;
            }
        }
    }
}

// =============================================================================
// Runtime Config Structs (final merged configuration)
// =============================================================================

/// Where post records are read from
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum InputSource {
    Stdin,
    File(PathBuf),
}

impl InputSource {
    fn from_path(path: &Path) -> Self {
        if path.as_os_str() == STDIN_PATH {
            Self::Stdin
        } else {
            Self::File(expand_path(path))
        }
    }
}

impl fmt::Display for InputSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            InputSource::Stdin => write!(f, "stdin"),
            InputSource::File(path) => write!(f, "{}", path.display()),
        }
    }
}

/// Output configuration
#[derive(Debug, Clone)]
pub struct OutputConfig {
    pub pretty: bool,
}

#[derive(Debug, Clone)]
pub struct AppConfig {
    pub stat_name: String,
    pub start: Option<DateTime<Utc>>,
    pub end: Option<DateTime<Utc>>,
    pub input: InputSource,
    pub output: OutputConfig,
}

impl AppConfig {
    /// Load configuration from all sources
    ///
    /// Priority (lowest to highest):
    /// 1. Defaults
    /// 2. Profile directory config (~/.post-stats/post-stats.json)
    /// 3. Local directory config OR CLI-specified config path
    /// 4. CLI arguments (which include env var fallbacks via clap)
    pub fn load(cli: &CliConfig) -> Result<Self> {
        Self::load_with_profile(cli, get_profile_config_path())
    }

    /// Same as `load`, with an explicit profile config location
    pub fn load_with_profile(cli: &CliConfig, profile_path: Option<PathBuf>) -> Result<Self> {
        tracing::debug!("Loading application configuration");
        tracing::trace!(cli = ?cli, "CLI config");

        let mut file_config = FileConfig::default();
        let mut found_configs: Vec<String> = Vec::new();

        // 1. Load from profile dir - skip if not exists
        if let Some(profile_path) = profile_path
            && profile_path.exists()
        {
            let profile_config = FileConfig::load_from_file(&profile_path)?;
            profile_config.warn_unknown_fields();
            file_config.merge(profile_config);
            found_configs.push(profile_path.display().to_string());
        }

        // 2. Load from CLI-specified path OR local directory
        let overlay_path = if let Some(ref path) = cli.config {
            let expanded = expand_path(path);
            if !expanded.exists() {
                anyhow::bail!("Config file not found: {}", expanded.display());
            }
            Some(expanded)
        } else {
            let local = PathBuf::from(CONFIG_FILE_NAME);
            if local.exists() { Some(local) } else { None }
        };

        if let Some(path) = overlay_path {
            let overlay_config = FileConfig::load_from_file(&path)?;
            overlay_config.warn_unknown_fields();
            file_config.merge(overlay_config);
            found_configs.push(path.display().to_string());
        }

        tracing::debug!(configs = ?found_configs, "Config files loaded");

        // 3. Extract file config values with defaults
        let file_range = file_config.range.unwrap_or_default();
        let file_output = file_config.output.unwrap_or_default();

        // 4. Layer configs: defaults -> file config -> CLI/env overrides
        let stat_name = cli
            .stat_name
            .clone()
            .or(file_config.stat_name)
            .unwrap_or_else(|| DEFAULT_STAT_NAME.to_string());

        let start = match cli.start {
            Some(start) => Some(start),
            None => parse_file_bound(file_range.start.as_deref(), "range.start")?,
        };
        let end = match cli.end {
            Some(end) => Some(end),
            None => parse_file_bound(file_range.end.as_deref(), "range.end")?,
        };

        let input = cli
            .input
            .clone()
            .or(file_config.input.map(PathBuf::from))
            .map(|path| InputSource::from_path(&path))
            .unwrap_or(InputSource::Stdin);

        let pretty = if cli.compact {
            false
        } else {
            file_output.pretty.unwrap_or(true)
        };

        let config = Self {
            stat_name,
            start,
            end,
            input,
            output: OutputConfig { pretty },
        };

        tracing::debug!(
            stat_name = %config.stat_name,
            start = ?config.start,
            end = ?config.end,
            input = %config.input,
            pretty = config.output.pretty,
            "Configuration loaded"
        );

        Ok(config)
    }

    /// Parameters for one calculation run
    pub fn parameters(&self) -> CalculationParameters {
        CalculationParameters {
            stat_name: self.stat_name.clone(),
            start_date: self.start,
            end_date: self.end,
        }
    }
}

/// Parse an optional date bound taken from a config file
fn parse_file_bound(raw: Option<&str>, field: &str) -> Result<Option<DateTime<Utc>>> {
    raw.map(|s| parse_timestamp(s).with_context(|| format!("Invalid {} in config file", field)))
        .transpose()
}

/// Get the profile config path (~/.post-stats/post-stats.json)
fn get_profile_config_path() -> Option<PathBuf> {
    dirs::home_dir().map(|h| h.join(APP_DOT_FOLDER).join(CONFIG_FILE_NAME))
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;
    use std::io::Write;

    fn write_config(dir: &tempfile::TempDir, name: &str, json: &str) -> PathBuf {
        let path = dir.path().join(name);
        let mut file = fs::File::create(&path).unwrap();
        file.write_all(json.as_bytes()).unwrap();
        path
    }

    fn cli_with_config(path: PathBuf) -> CliConfig {
        CliConfig {
            config: Some(path),
            ..Default::default()
        }
    }

    #[test]
    fn test_file_config_parse_full() {
        let json = r#"{
            "stat_name": "posts-per-user",
            "input": "posts.jsonl",
            "range": { "start": "2022-06-01", "end": "2022-06-30" },
            "output": { "pretty": false }
        }"#;
        let config: FileConfig = serde_json::from_str(json).unwrap();

        assert_eq!(config.stat_name.as_deref(), Some("posts-per-user"));
        assert_eq!(config.input.as_deref(), Some("posts.jsonl"));
        let range = config.range.as_ref().unwrap();
        assert_eq!(range.start.as_deref(), Some("2022-06-01"));
        assert_eq!(range.end.as_deref(), Some("2022-06-30"));
        assert_eq!(config.output.as_ref().unwrap().pretty, Some(false));
    }

    #[test]
    fn test_file_config_parse_empty() {
        let config: FileConfig = serde_json::from_str("{}").unwrap();
        assert!(config.stat_name.is_none());
        assert!(config.range.is_none());
        assert!(config.output.is_none());
    }

    #[test]
    fn test_file_config_parse_extra_fields() {
        let json = r#"{ "stat_name": "x", "stats_name": "typo" }"#;
        let config: FileConfig = serde_json::from_str(json).unwrap();
        assert_eq!(config.stat_name.as_deref(), Some("x"));
        assert_eq!(config.extra["stats_name"], "typo");
    }

    #[test]
    fn test_file_config_merge() {
        let mut base = FileConfig {
            stat_name: Some("base".to_string()),
            range: Some(RangeFileConfig {
                start: Some("2022-01-01".to_string()),
                end: Some("2022-12-31".to_string()),
            }),
            ..Default::default()
        };
        let overlay = FileConfig {
            range: Some(RangeFileConfig {
                start: None,
                end: Some("2022-06-30".to_string()),
            }),
            output: Some(OutputFileConfig {
                pretty: Some(false),
            }),
            ..Default::default()
        };

        base.merge(overlay);

        assert_eq!(base.stat_name.as_deref(), Some("base"));
        let range = base.range.as_ref().unwrap();
        assert_eq!(range.start.as_deref(), Some("2022-01-01"));
        assert_eq!(range.end.as_deref(), Some("2022-06-30"));
        assert_eq!(base.output.as_ref().unwrap().pretty, Some(false));
    }

    #[test]
    fn test_load_defaults_without_files() {
        let dir = tempfile::tempdir().unwrap();
        let path = write_config(&dir, "empty.json", "{}");

        let config = AppConfig::load_with_profile(&cli_with_config(path), None).unwrap();
        assert_eq!(config.stat_name, DEFAULT_STAT_NAME);
        assert!(config.start.is_none());
        assert!(config.end.is_none());
        assert_eq!(config.input, InputSource::Stdin);
        assert!(config.output.pretty);
    }

    #[test]
    fn test_load_from_config_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = write_config(
            &dir,
            "post-stats.json",
            r#"{
                "stat_name": "june",
                "range": { "start": "2022-06-01", "end": "2022-06-30" },
                "output": { "pretty": false }
            }"#,
        );

        let config = AppConfig::load_with_profile(&cli_with_config(path), None).unwrap();
        let params = config.parameters();
        assert_eq!(params.stat_name, "june");
        assert_eq!(
            params.start_date,
            Some(Utc.with_ymd_and_hms(2022, 6, 1, 0, 0, 0).unwrap())
        );
        assert_eq!(
            params.end_date,
            Some(Utc.with_ymd_and_hms(2022, 6, 30, 0, 0, 0).unwrap())
        );
        assert!(!config.output.pretty);
    }

    #[test]
    fn test_overlay_beats_profile_and_cli_beats_both() {
        let dir = tempfile::tempdir().unwrap();
        let profile = write_config(
            &dir,
            "profile.json",
            r#"{ "stat_name": "profile", "range": { "start": "2021-01-01", "end": "2021-12-31" } }"#,
        );
        let overlay = write_config(
            &dir,
            "overlay.json",
            r#"{ "range": { "end": "2022-12-31" } }"#,
        );

        let mut cli = cli_with_config(overlay);
        cli.stat_name = Some("cli".to_string());
        cli.start = Some(Utc.with_ymd_and_hms(2022, 3, 1, 0, 0, 0).unwrap());
        cli.compact = true;

        let config = AppConfig::load_with_profile(&cli, Some(profile)).unwrap();
        assert_eq!(config.stat_name, "cli");
        assert_eq!(
            config.start,
            Some(Utc.with_ymd_and_hms(2022, 3, 1, 0, 0, 0).unwrap())
        );
        assert_eq!(
            config.end,
            Some(Utc.with_ymd_and_hms(2022, 12, 31, 0, 0, 0).unwrap())
        );
        assert!(!config.output.pretty);
    }

    #[test]
    fn test_missing_profile_is_skipped() {
        let dir = tempfile::tempdir().unwrap();
        let overlay = write_config(&dir, "overlay.json", "{}");
        let missing = dir.path().join("does-not-exist.json");

        let config = AppConfig::load_with_profile(&cli_with_config(overlay), Some(missing));
        assert!(config.is_ok());
    }

    #[test]
    fn test_missing_cli_config_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        let missing = dir.path().join("nope.json");

        let err = AppConfig::load_with_profile(&cli_with_config(missing), None).unwrap_err();
        assert!(err.to_string().contains("Config file not found"));
    }

    #[test]
    fn test_invalid_range_in_file_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = write_config(&dir, "bad.json", r#"{ "range": { "start": "soon" } }"#);

        let err = AppConfig::load_with_profile(&cli_with_config(path), None).unwrap_err();
        assert!(err.to_string().contains("Invalid range.start in config file"));
    }

    #[test]
    fn test_malformed_config_file_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = write_config(&dir, "broken.json", "{ not json");

        let err = AppConfig::load_with_profile(&cli_with_config(path), None).unwrap_err();
        assert!(err.to_string().contains("Failed to parse config file"));
    }

    #[test]
    fn test_input_source_resolution() {
        assert_eq!(InputSource::from_path(Path::new("-")), InputSource::Stdin);
        match InputSource::from_path(Path::new("posts.jsonl")) {
            InputSource::File(path) => {
                assert!(path.is_absolute());
                assert!(path.ends_with("posts.jsonl"));
            }
            InputSource::Stdin => panic!("expected a file input"),
        }
    }

    #[test]
    fn test_input_source_display() {
        assert_eq!(InputSource::Stdin.to_string(), "stdin");
        assert_eq!(
            InputSource::File(PathBuf::from("/tmp/posts.jsonl")).to_string(),
            "/tmp/posts.jsonl"
        );
    }
}
