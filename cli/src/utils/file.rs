//! File utility functions

use std::path::{Path, PathBuf};

/// Resolve a user-supplied path: a leading `~` component becomes the home
/// directory and relative paths are anchored at the current directory.
///
/// The path is taken as given. Surrounding whitespace is part of the name.
pub fn expand_path(path: &Path) -> PathBuf {
    let expanded = match (path.strip_prefix("~"), dirs::home_dir()) {
        (Ok(rest), Some(home)) => home.join(rest),
        _ => path.to_path_buf(),
    };

    if expanded.is_absolute() {
        return expanded;
    }
    std::env::current_dir()
        .map(|cwd| cwd.join(&expanded))
        .unwrap_or(expanded)
}
