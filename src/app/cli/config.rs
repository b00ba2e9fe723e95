//! TOML configuration
//!
//! Settings are read from `<config_dir>/Appcmd/appcmd.toml` unless another
//! file is given with `--config-file`. A missing default file is not an
//! error; a missing explicit file is.
//!
//! ```toml
//! [server]
//! url = "https://chat.example.com"
//! token = "..."
//!
//! [parser]
//! max_concurrent_expansions = 4
//! catalog = "/usr/share/appcmd/fr.json"
//!
//! [logging]
//! level = "debug"
//! format = "ext"
//!
//! [workspace]
//! fixture = "workspace.json"
//! channel_id = "town-square"
//! team_id = "t1"
//! ```

use crate::app::cli::args::Args;
use crate::commands::api::DEFAULT_MAX_CONCURRENT_EXPANSIONS;
use crate::core::error_handling::ContextualError;
use crate::core::logging::LoggingOptions;
use crate::core::strings::title_case;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

pub const APP_NAME: &str = "appcmd";

const LOG_LEVELS: [&str; 6] = ["trace", "debug", "info", "warn", "error", "off"];
const LOG_FORMATS: [&str; 3] = ["text", "ext", "json"];

#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum ConfigError {
    #[error("The specified configuration file does not exist: {path}")]
    NotFound { path: String },

    #[error("Error reading configuration file {path}: {cause}")]
    Read { path: String, cause: String },

    #[error("Error parsing configuration file {path}: {cause}")]
    Parse { path: String, cause: String },

    #[error("Invalid value for '{key}': {message}")]
    InvalidValue { key: String, message: String },
}

impl ContextualError for ConfigError {
    fn is_user_actionable(&self) -> bool {
        matches!(self, ConfigError::InvalidValue { .. })
    }

    fn user_message(&self) -> Option<&str> {
        match self {
            ConfigError::InvalidValue { message, .. } => Some(message),
            _ => None,
        }
    }
}

pub type ConfigResult<T> = std::result::Result<T, ConfigError>;

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ServerSettings {
    pub url: Option<String>,
    pub token: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ParserSettings {
    pub max_concurrent_expansions: usize,
    pub catalog: Option<PathBuf>,
}

impl Default for ParserSettings {
    fn default() -> Self {
        Self {
            max_concurrent_expansions: DEFAULT_MAX_CONCURRENT_EXPANSIONS,
            catalog: None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggingSettings {
    pub level: Option<String>,
    pub format: Option<String>,
    pub file: Option<String>,
    pub color: bool,
}

impl Default for LoggingSettings {
    fn default() -> Self {
        Self {
            level: None,
            format: None,
            file: None,
            color: true,
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct WorkspaceSettings {
    pub fixture: Option<PathBuf>,
    pub channel_id: String,
    pub team_id: String,
    pub root_id: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    pub server: ServerSettings,
    pub parser: ParserSettings,
    pub logging: LoggingSettings,
    pub workspace: WorkspaceSettings,
}

impl Settings {
    pub fn default_path() -> Option<PathBuf> {
        dirs::config_dir().map(|dir| {
            dir.join(title_case(APP_NAME))
                .join(format!("{}.toml", APP_NAME))
        })
    }

    /// Load from `config_file`, else from the default location if present
    pub async fn load(config_file: Option<&Path>) -> ConfigResult<Self> {
        let path = match config_file {
            Some(path) if !path.exists() => {
                return Err(ConfigError::NotFound {
                    path: path.display().to_string(),
                })
            }
            Some(path) => path.to_path_buf(),
            None => match Self::default_path() {
                Some(path) if path.exists() => path,
                _ => {
                    log::trace!("No configuration file found, using defaults");
                    return Ok(Self::default());
                }
            },
        };

        let contents = tokio::fs::read_to_string(&path)
            .await
            .map_err(|e| ConfigError::Read {
                path: path.display().to_string(),
                cause: e.to_string(),
            })?;
        Self::from_toml(&contents, &path)
    }

    pub fn from_toml(contents: &str, path: &Path) -> ConfigResult<Self> {
        toml::from_str(contents).map_err(|e| ConfigError::Parse {
            path: path.display().to_string(),
            cause: e.to_string(),
        })
    }

    /// Command line values override file values
    pub fn apply_args(&mut self, args: &Args) {
        if let Some(url) = &args.server {
            self.server.url = Some(url.clone());
        }
        if let Some(token) = &args.token {
            self.server.token = Some(token.clone());
        }
        if let Some(max) = args.max_concurrent_expansions {
            self.parser.max_concurrent_expansions = max;
        }
        if let Some(catalog) = &args.catalog {
            self.parser.catalog = Some(catalog.clone());
        }
        if let Some(fixture) = &args.workspace {
            self.workspace.fixture = Some(fixture.clone());
        }
        if let Some(channel_id) = &args.channel_id {
            self.workspace.channel_id = channel_id.clone();
        }
        if let Some(team_id) = &args.team_id {
            self.workspace.team_id = team_id.clone();
        }
        if let Some(root_id) = &args.root_id {
            self.workspace.root_id = Some(root_id.clone());
        }
        if let Some(level) = &args.log_level {
            self.logging.level = Some(level.clone());
        }
        if let Some(format) = &args.log_format {
            self.logging.format = Some(format.clone());
        }
        if let Some(file) = &args.log_file {
            self.logging.file = Some(file.clone());
        }
        if args.no_color {
            self.logging.color = false;
        }
    }

    pub fn validate(&self) -> ConfigResult<()> {
        if self.parser.max_concurrent_expansions == 0 {
            return Err(invalid(
                "parser.max_concurrent_expansions",
                "max_concurrent_expansions must be greater than 0",
            ));
        }
        if let Some(level) = self.logging.level.as_deref() {
            if !LOG_LEVELS.contains(&level.to_ascii_lowercase().as_str()) {
                return Err(invalid(
                    "logging.level",
                    &format!("Unknown log level '{}' (expected one of {})", level, LOG_LEVELS.join(", ")),
                ));
            }
        }
        if let Some(format) = self.logging.format.as_deref() {
            if !LOG_FORMATS.contains(&format) {
                return Err(invalid(
                    "logging.format",
                    &format!("Unknown log format '{}' (expected one of {})", format, LOG_FORMATS.join(", ")),
                ));
            }
        }
        if let Some(url) = self.server.url.as_deref() {
            if !url.starts_with("http://") && !url.starts_with("https://") {
                return Err(invalid(
                    "server.url",
                    &format!("Server URL must start with http:// or https://: {}", url),
                ));
            }
        }
        Ok(())
    }

    pub fn logging_options(&self) -> LoggingOptions {
        // "none" and "-" disable file logging
        let file = self
            .logging
            .file
            .clone()
            .filter(|file| !file.eq_ignore_ascii_case("none") && file != "-");
        LoggingOptions {
            level: self.logging.level.clone(),
            format: self.logging.format.clone(),
            file,
            color: self.logging.color,
        }
    }
}

fn invalid(key: &str, message: &str) -> ConfigError {
    ConfigError::InvalidValue {
        key: key.to_string(),
        message: message.to_string(),
    }
}
