//! Core use-case services.
//!
//! # Responsibility
//! - Orchestrate repository calls into the commands the CLI exposes.
//! - Own rank arithmetic (1-based ranks, clamping, renumbering).
//!
//! # Invariants
//! - After any reorder, create or remove, the backlog priorities are
//!   `1..=n` in backlog order.
//! - Services never print; they return data for the caller to render.

use crate::layout::LayoutError;
use crate::model::ModelError;
use crate::repo::RepoError;
use std::error::Error;
use std::fmt::{Display, Formatter};

pub mod backlog_service;
pub mod summary_service;

#[derive(Debug)]
pub enum ServiceError {
    /// No project has started and is still open.
    NoActiveProject,
    /// The command needs one project but several are active.
    MultipleActiveProjects(Vec<String>),
    /// No project matches an explicit `--project` name.
    ProjectNotFound(String),
    /// Project name has no character usable in a directory name.
    InvalidProjectName,
    /// The selected project has no cards.
    EmptyBacklog(String),
    /// A rank that must address an existing card does not.
    RankOutOfRange { rank: i64, len: usize },
    /// New card text has no headline on its first line.
    MissingHeadline,
    /// Removal confirmation did not match the card at that rank.
    HeadlineMismatch {
        rank: i64,
        actual: String,
        given: String,
    },
    Model(ModelError),
    Repo(RepoError),
    Layout(LayoutError),
}

impl Display for ServiceError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::NoActiveProject => write!(f, "no active projects"),
            Self::MultipleActiveProjects(names) => write!(
                f,
                "{} active projects ({}); pick one with --project",
                names.len(),
                names.join(", ")
            ),
            Self::ProjectNotFound(name) => write!(f, "project not found: `{name}`"),
            Self::InvalidProjectName => write!(
                f,
                "project name needs an ASCII letter, digit or underscore"
            ),
            Self::EmptyBacklog(project) => write!(f, "project `{project}` has no cards"),
            Self::RankOutOfRange { rank, len } => {
                write!(f, "no card at rank {rank}; ranks run 1 - {len}")
            }
            Self::MissingHeadline => write!(f, "missing headline on first line"),
            Self::HeadlineMismatch {
                rank,
                actual,
                given,
            } => write!(
                f,
                "headline mismatch: card rank {rank} has headline `{actual}`, you entered `{given}`"
            ),
            Self::Model(err) => write!(f, "{err}"),
            Self::Repo(err) => write!(f, "{err}"),
            Self::Layout(err) => write!(f, "{err}"),
        }
    }
}

impl Error for ServiceError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Model(err) => Some(err),
            Self::Repo(err) => Some(err),
            Self::Layout(err) => Some(err),
            _ => None,
        }
    }
}

impl From<ModelError> for ServiceError {
    fn from(value: ModelError) -> Self {
        match value {
            ModelError::EmptyHeadline => Self::MissingHeadline,
            other => Self::Model(other),
        }
    }
}

impl From<RepoError> for ServiceError {
    fn from(value: RepoError) -> Self {
        Self::Repo(value)
    }
}

impl From<LayoutError> for ServiceError {
    fn from(value: LayoutError) -> Self {
        Self::Layout(value)
    }
}
