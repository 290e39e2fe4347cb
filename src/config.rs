//! Configuration file: availability window, backend contract and layout.
//!
//! Read from `~/.config/berichtform/config.json` unless a path is given.
//! Every key is optional; missing keys take the built-in defaults.

use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::controller::ControllerSettings;
use crate::model::{FormLayout, LayoutError, TimeWindow};
use crate::transport::ResponseContract;

/// Errors that can occur while loading the configuration.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// The configuration file could not be read.
    #[error("I/O error reading {path}: {source}")]
    Io {
        /// File that failed.
        path: PathBuf,
        /// Underlying error.
        source: std::io::Error,
    },

    /// The file is not valid configuration JSON.
    #[error("invalid configuration: {0}")]
    Json(#[from] serde_json::Error),

    /// The platform does not provide a config directory.
    #[error("could not determine XDG config directory")]
    NoConfigDir,

    /// The availability window ends before it starts.
    #[error("availability window ends before it starts")]
    InvalidWindow,

    /// The form layout is inconsistent.
    #[error("invalid form layout: {0}")]
    Layout(#[from] LayoutError),
}

/// Full application configuration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// When the form is open.
    pub window: TimeWindow,
    /// Submission target (absolute URL).
    pub action: String,
    /// Submission method.
    pub method: String,
    /// How the backend reports the submission result.
    pub contract: ResponseContract,
    /// Whether to query per-category submission status.
    pub track_status: bool,
    /// Storage key of the saved draft.
    pub draft_key: String,
    /// The form itself.
    pub layout: FormLayout,
}

impl Default for Config {
    fn default() -> Self {
        let at = |y, m, d, h, min| {
            NaiveDate::from_ymd_opt(y, m, d)
                .and_then(|date| date.and_hms_opt(h, min, 0))
                .expect("valid hardcoded date")
        };
        Self {
            window: TimeWindow::new(at(2025, 10, 1, 8, 0), at(2025, 11, 30, 23, 59)),
            action: "http://localhost:8080/bericht".into(),
            method: "POST".into(),
            contract: ResponseContract::PlainText,
            track_status: true,
            draft_key: "berichtData".into(),
            layout: FormLayout::default(),
        }
    }
}

impl Config {
    /// Loads the configuration.
    ///
    /// With an explicit `path` the file must exist. Without one, the default
    /// location is tried and a missing file yields [`Config::default`].
    pub fn load(path: Option<&Path>) -> Result<Self, ConfigError> {
        let (path, required) = match path {
            Some(path) => (path.to_path_buf(), true),
            None => (default_config_path()?, false),
        };
        match fs::read_to_string(&path) {
            Ok(text) => {
                tracing::info!(path = %path.display(), "loaded configuration");
                Self::from_json(&text)
            }
            Err(e) if e.kind() == ErrorKind::NotFound && !required => {
                tracing::info!("no configuration file, using defaults");
                Ok(Self::default())
            }
            Err(source) => Err(ConfigError::Io { path, source }),
        }
    }

    /// Parses and validates configuration JSON.
    pub fn from_json(text: &str) -> Result<Self, ConfigError> {
        let config: Self = serde_json::from_str(text)?;
        config.validate()?;
        Ok(config)
    }

    /// Checks the window and the layout.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if !self.window.is_well_formed() {
            return Err(ConfigError::InvalidWindow);
        }
        self.layout.validate()?;
        Ok(())
    }

    /// The part of the configuration the controller needs.
    pub fn settings(&self) -> ControllerSettings {
        ControllerSettings {
            window: self.window,
            action: self.action.clone(),
            method: self.method.clone(),
            contract: self.contract,
            track_status: self.track_status,
            draft_key: self.draft_key.clone(),
        }
    }
}

/// Returns `~/.config/berichtform/config.json`.
pub fn default_config_path() -> Result<PathBuf, ConfigError> {
    let config_dir = dirs::config_dir().ok_or(ConfigError::NoConfigDir)?;
    Ok(config_dir.join("berichtform").join("config.json"))
}
