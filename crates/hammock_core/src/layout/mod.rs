//! Column/table text layout for the summary view.
//!
//! # Responsibility
//! - Normalize free text to a maximum display width (`wrap`).
//! - Align variable-length, multi-line columns into a rectangular grid (`grid`).
//! - Join grid rows into tab-separated lines and align them (`render`).
//! - Expose one entry point for callers: `summary::summarize`.
//!
//! # Invariants
//! - Every function here is pure over in-memory text; no layout state
//!   survives between calls.
//! - Grids returned by `grid` are never ragged.
//! - Non-positive widths are rejected before any formatting happens.

use std::error::Error;
use std::fmt::{Display, Formatter};

pub mod grid;
pub mod render;
pub mod summary;
pub mod wrap;

pub type LayoutResult<T> = Result<T, LayoutError>;

/// One rendered grid: rows of single-line cells.
pub type Grid = Vec<Vec<String>>;

/// Placeholder used wherever a column has no cell for a row.
pub const BLANK_CELL: &str = " ";

#[derive(Debug)]
pub enum LayoutError {
    /// A width or padding argument outside its accepted range.
    InvalidArgument { name: &'static str, value: i64 },
    /// Tab-stop writer failed to flush aligned output.
    Io(std::io::Error),
}

impl Display for LayoutError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::InvalidArgument { name, value } => {
                write!(f, "invalid argument: `{name}` must be positive, got {value}")
            }
            Self::Io(err) => write!(f, "failed to align columns: {err}"),
        }
    }
}

impl Error for LayoutError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::InvalidArgument { .. } => None,
            Self::Io(err) => Some(err),
        }
    }
}

impl From<std::io::Error> for LayoutError {
    fn from(value: std::io::Error) -> Self {
        Self::Io(value)
    }
}

/// Converts a caller-supplied width into a usable column count.
pub(crate) fn positive_width(name: &'static str, value: i64) -> LayoutResult<usize> {
    if value <= 0 {
        return Err(LayoutError::InvalidArgument { name, value });
    }
    usize::try_from(value).map_err(|_| LayoutError::InvalidArgument { name, value })
}
