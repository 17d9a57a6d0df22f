//! User configuration for the `hmm` CLI.
//!
//! # Responsibility
//! - Locate and parse `config.toml`.
//! - Supply defaults so a missing file is never an error.
//!
//! # Invariants
//! - `width` and `padding` are positive after a successful load.
//! - Workspace paths are `~`-expanded after a successful load.

use crate::logging::default_log_level;
use serde::{Deserialize, Serialize};
use std::error::Error;
use std::fmt::{Display, Formatter};
use std::fs;
use std::io::{self, ErrorKind};
use std::path::{Path, PathBuf};

/// Overrides the config file location.
pub const CONFIG_ENV: &str = "HAMMOCK_CONFIG";
/// Overrides the configured log level.
pub const LOG_LEVEL_ENV: &str = "HAMMOCK_LOG";

const CONFIG_DIR_NAME: &str = "hammock";
const CONFIG_FILE_NAME: &str = "config.toml";
const DEFAULT_WIDTH: i64 = 32;
const DEFAULT_PADDING: i64 = 4;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct HammockConfig {
    /// Workspace roots shown by `summary`; empty means the current one.
    pub workspaces: Vec<PathBuf>,
    /// Maximum display width of one summary column.
    pub width: i64,
    /// Minimum spaces between summary columns.
    pub padding: i64,
    pub log_level: Option<String>,
    pub log_dir: Option<PathBuf>,
}

impl Default for HammockConfig {
    fn default() -> Self {
        Self {
            workspaces: Vec::new(),
            width: DEFAULT_WIDTH,
            padding: DEFAULT_PADDING,
            log_level: None,
            log_dir: None,
        }
    }
}

#[derive(Debug)]
pub enum ConfigError {
    Io { path: PathBuf, source: io::Error },
    Parse { path: PathBuf, message: String },
    Invalid { key: &'static str, message: String },
}

impl Display for ConfigError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Io { path, source } => {
                write!(f, "failed to read config `{}`: {source}", path.display())
            }
            Self::Parse { path, message } => {
                write!(f, "invalid config `{}`: {message}", path.display())
            }
            Self::Invalid { key, message } => write!(f, "invalid config `{key}`: {message}"),
        }
    }
}

impl Error for ConfigError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Io { source, .. } => Some(source),
            _ => None,
        }
    }
}

impl HammockConfig {
    /// Loads from `$HAMMOCK_CONFIG` or the platform config directory.
    pub fn load() -> Result<Self, ConfigError> {
        match config_path() {
            Some(path) => Self::load_from(&path),
            None => Ok(Self::default()),
        }
    }

    /// Loads from `path`; a missing file yields defaults.
    pub fn load_from(path: &Path) -> Result<Self, ConfigError> {
        let contents = match fs::read_to_string(path) {
            Ok(contents) => contents,
            Err(err) if err.kind() == ErrorKind::NotFound => return Ok(Self::default()),
            Err(source) => {
                return Err(ConfigError::Io {
                    path: path.to_path_buf(),
                    source,
                })
            }
        };
        let mut config: Self = toml::from_str(&contents).map_err(|err| ConfigError::Parse {
            path: path.to_path_buf(),
            message: err.message().to_string(),
        })?;
        config.validate()?;
        config.workspaces = config
            .workspaces
            .iter()
            .map(|workspace| expand_home(workspace))
            .collect();
        config.log_dir = config.log_dir.as_deref().map(expand_home);
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.width <= 0 {
            return Err(ConfigError::Invalid {
                key: "width",
                message: format!("must be positive, got {}", self.width),
            });
        }
        if self.padding <= 0 {
            return Err(ConfigError::Invalid {
                key: "padding",
                message: format!("must be positive, got {}", self.padding),
            });
        }
        Ok(())
    }

    /// Effective log level: `$HAMMOCK_LOG`, then config, then build default.
    pub fn effective_log_level(&self) -> String {
        std::env::var(LOG_LEVEL_ENV)
            .ok()
            .filter(|level| !level.trim().is_empty())
            .or_else(|| self.log_level.clone())
            .unwrap_or_else(|| default_log_level().to_string())
    }

    /// Effective log directory: config, then the platform state directory.
    pub fn effective_log_dir(&self) -> Option<PathBuf> {
        self.log_dir.clone().or_else(|| {
            dirs::state_dir()
                .or_else(dirs::data_local_dir)
                .map(|dir| dir.join(CONFIG_DIR_NAME).join("logs"))
        })
    }
}

/// Config file location, if one can be determined.
pub fn config_path() -> Option<PathBuf> {
    if let Some(path) = std::env::var_os(CONFIG_ENV).filter(|path| !path.is_empty()) {
        return Some(PathBuf::from(path));
    }
    dirs::config_dir().map(|dir| dir.join(CONFIG_DIR_NAME).join(CONFIG_FILE_NAME))
}

fn expand_home(path: &Path) -> PathBuf {
    let Ok(rest) = path.strip_prefix("~") else {
        return path.to_path_buf();
    };
    match dirs::home_dir() {
        Some(home) => home.join(rest),
        None => path.to_path_buf(),
    }
}

#[cfg(test)]
mod tests {
    use super::{expand_home, ConfigError, HammockConfig};
    use std::fs;
    use std::path::{Path, PathBuf};

    #[test]
    fn missing_file_yields_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let config = HammockConfig::load_from(&dir.path().join("absent.toml")).unwrap();
        assert_eq!(config, HammockConfig::default());
        assert_eq!(config.width, 32);
        assert_eq!(config.padding, 4);
    }

    #[test]
    fn file_values_override_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        fs::write(
            &path,
            "workspaces = [\"/work/home\", \"/work/job\"]\nwidth = 60\nlog_level = \"warn\"\n",
        )
        .unwrap();

        let config = HammockConfig::load_from(&path).unwrap();
        assert_eq!(
            config.workspaces,
            vec![PathBuf::from("/work/home"), PathBuf::from("/work/job")]
        );
        assert_eq!(config.width, 60);
        assert_eq!(config.padding, 4);
        assert_eq!(config.log_level.as_deref(), Some("warn"));
    }

    #[test]
    fn non_positive_width_is_rejected() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        fs::write(&path, "width = 0\n").unwrap();
        let err = HammockConfig::load_from(&path).unwrap_err();
        assert!(matches!(err, ConfigError::Invalid { key: "width", .. }));
    }

    #[test]
    fn malformed_file_reports_parse_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        fs::write(&path, "width = \"wide\"\n").unwrap();
        let err = HammockConfig::load_from(&path).unwrap_err();
        assert!(matches!(err, ConfigError::Parse { .. }));
    }

    #[test]
    fn home_prefix_is_expanded() {
        assert_eq!(expand_home(Path::new("/abs/ws")), PathBuf::from("/abs/ws"));
        if let Some(home) = dirs::home_dir() {
            assert_eq!(expand_home(Path::new("~/work")), home.join("work"));
        }
    }
}
