//! CLI error type and reporting.

use hammock_core::{ConfigError, LayoutError, ModelError, RepoError, ServiceError};
use std::error::Error;
use std::fmt::{Display, Formatter};
use std::io;

/// Set to `true` to print the full error source chain.
pub const DEBUG_ENV: &str = "HAMMOCK_DEBUG";

#[derive(Debug)]
pub enum CliError {
    Config(ConfigError),
    Repo(RepoError),
    Service(ServiceError),
    Layout(LayoutError),
    Model(ModelError),
    /// A `--start`/`--deadline` value that is not a date or datetime.
    InvalidTimestamp { flag: &'static str, value: String },
    /// Neither `$VISUAL` nor `$EDITOR` is set.
    NoEditor,
    /// The editor exited unsuccessfully.
    EditorFailed { editor: String, status: String },
    Io(io::Error),
}

impl Display for CliError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Config(err) => write!(f, "config: {err}"),
            Self::Repo(err) => write!(f, "{err}"),
            Self::Service(err) => write!(f, "{err}"),
            Self::Layout(err) => write!(f, "{err}"),
            Self::Model(err) => write!(f, "{err}"),
            Self::InvalidTimestamp { flag, value } => {
                write!(f, "--{flag} expects a date or datetime, got `{value}`")
            }
            Self::NoEditor => write!(f, "set $VISUAL or $EDITOR, or pass --text"),
            Self::EditorFailed { editor, status } => {
                write!(f, "editor `{editor}` failed: {status}")
            }
            Self::Io(err) => write!(f, "{err}"),
        }
    }
}

impl Error for CliError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Config(err) => Some(err),
            Self::Repo(err) => Some(err),
            Self::Service(err) => Some(err),
            Self::Layout(err) => Some(err),
            Self::Model(err) => Some(err),
            Self::Io(err) => Some(err),
            _ => None,
        }
    }
}

impl From<ConfigError> for CliError {
    fn from(value: ConfigError) -> Self {
        Self::Config(value)
    }
}

impl From<RepoError> for CliError {
    fn from(value: RepoError) -> Self {
        Self::Repo(value)
    }
}

impl From<ServiceError> for CliError {
    fn from(value: ServiceError) -> Self {
        Self::Service(value)
    }
}

impl From<LayoutError> for CliError {
    fn from(value: LayoutError) -> Self {
        Self::Layout(value)
    }
}

impl From<ModelError> for CliError {
    fn from(value: ModelError) -> Self {
        Self::Model(value)
    }
}

impl From<io::Error> for CliError {
    fn from(value: io::Error) -> Self {
        Self::Io(value)
    }
}

/// Writes `hmm: <error>` to stderr, plus its causes when debugging.
pub fn report(err: &CliError) {
    eprintln!("hmm: {err}");
    if !debug_enabled() {
        return;
    }
    // Wrapper variants display their inner error, so start one level down.
    let mut source = err.source().and_then(|inner| inner.source());
    while let Some(cause) = source {
        eprintln!("  caused by: {cause}");
        source = cause.source();
    }
}

fn debug_enabled() -> bool {
    std::env::var(DEBUG_ENV)
        .map(|value| value.trim().eq_ignore_ascii_case("true"))
        .unwrap_or(false)
}
