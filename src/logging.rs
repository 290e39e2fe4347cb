//! Tracing subscriber setup.
//!
//! The terminal belongs to the UI, so logs go to a file in the data
//! directory. The filter is taken from `BERICHTFORM_LOG`, then `RUST_LOG`,
//! then the `--verbose` flag.

use std::fs::{self, OpenOptions};
use std::io;
use std::path::{Path, PathBuf};
use std::sync::Mutex;

use tracing_subscriber::EnvFilter;

use crate::storage::StorageError;

/// Environment variable with per-target filter directives.
pub const LOG_ENV: &str = "BERICHTFORM_LOG";

/// Returns `~/.local/share/berichtform/berichtform.log`.
pub fn log_path() -> Result<PathBuf, StorageError> {
    let data_dir = dirs::data_dir().ok_or(StorageError::NoDataDir)?;
    Ok(data_dir.join("berichtform").join("berichtform.log"))
}

/// Filter used when neither environment variable is set.
pub fn default_directive(verbose: bool) -> &'static str {
    if verbose { "debug" } else { "info" }
}

fn build_env_filter(verbose: bool) -> EnvFilter {
    std::env::var(LOG_ENV)
        .ok()
        .and_then(|directives| EnvFilter::try_new(directives).ok())
        .or_else(|| EnvFilter::try_from_default_env().ok())
        .unwrap_or_else(|| EnvFilter::new(default_directive(verbose)))
}

/// Installs the global subscriber, appending to the log file at `path`.
///
/// Must be called once, before the configuration is loaded.
pub fn init_subscriber(path: &Path, verbose: bool) -> io::Result<()> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)?;
    }
    let file = OpenOptions::new().create(true).append(true).open(path)?;

    tracing_subscriber::fmt()
        .with_env_filter(build_env_filter(verbose))
        .with_writer(Mutex::new(file))
        .with_ansi(false)
        .with_target(true)
        .try_init()
        .map_err(io::Error::other)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn verbose_flag_selects_debug() {
        assert_eq!(default_directive(true), "debug");
        assert_eq!(default_directive(false), "info");
    }

    #[test]
    fn log_file_lives_in_app_data_dir() {
        let path = log_path().unwrap();
        assert!(path.ends_with("berichtform/berichtform.log"));
    }

    #[test]
    fn init_creates_log_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("logs").join("berichtform.log");
        // Another test may already own the global subscriber; the file is
        // created either way.
        let _ = init_subscriber(&path, false);
        assert!(path.exists());
    }
}
