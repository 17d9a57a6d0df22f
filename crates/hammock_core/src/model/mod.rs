//! Domain model for cards, projects and workspaces.
//!
//! # Responsibility
//! - Define the in-memory shapes read from and written to disk.
//! - Parse and serialize the on-disk text/TOML formats.
//!
//! # Invariants
//! - A card always has a non-empty headline.
//! - Timestamps are held as UTC; a zero time on disk reads as "unset".
//!
//! Filesystem access lives in `crate::repo`; this module only works on
//! strings and paths.

use std::error::Error;
use std::fmt::{Display, Formatter};

pub mod card;
pub mod project;
pub mod time;
pub mod workspace;

/// Parse and validation errors for on-disk documents.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ModelError {
    /// First document line is blank after stripping `#` markers.
    EmptyHeadline,
    /// Card file does not split into exactly one document and one footer.
    FooterSeparator { separators: usize },
    /// Card text itself contains the footer separator line.
    SeparatorInText,
    /// Footer parsed but declares another `hammock_type`.
    NotACard(String),
    /// TOML could not be parsed or produced.
    InvalidToml(String),
    /// A datetime field holds a value that is not a date or datetime.
    InvalidDatetime { field: &'static str, value: String },
    /// `show_done_for` is not a duration like `72h` or `1h30m`.
    InvalidDuration(String),
}

impl Display for ModelError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::EmptyHeadline => write!(f, "card headline is empty"),
            Self::FooterSeparator { separators } => write!(
                f,
                "expected exactly one `+++` footer separator, found {separators}"
            ),
            Self::SeparatorInText => {
                write!(f, "card text must not contain a `+++` separator line")
            }
            Self::NotACard(kind) => write!(f, "not a card (hammock_type = `{kind}`)"),
            Self::InvalidToml(message) => write!(f, "invalid toml: {message}"),
            Self::InvalidDatetime { field, value } => {
                write!(f, "invalid datetime `{value}` in `{field}`")
            }
            Self::InvalidDuration(value) => write!(
                f,
                "invalid duration `{value}`; expected e.g. `72h`, `1h30m`, `45m`"
            ),
        }
    }
}

impl Error for ModelError {}

impl From<toml::de::Error> for ModelError {
    fn from(value: toml::de::Error) -> Self {
        Self::InvalidToml(value.message().to_string())
    }
}

impl From<toml::ser::Error> for ModelError {
    fn from(value: toml::ser::Error) -> Self {
        Self::InvalidToml(value.to_string())
    }
}
