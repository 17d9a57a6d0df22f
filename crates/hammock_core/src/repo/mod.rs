//! Filesystem-backed repositories for workspaces, projects and cards.
//!
//! # Responsibility
//! - Locate workspaces and enumerate their projects and cards on disk.
//! - Keep path and file-format details out of the service layer.
//!
//! # Invariants
//! - Every error carries the path it happened on.
//! - Unreadable project manifests fail the whole listing; unreadable card
//!   files are skipped (a project directory may hold other files).

use crate::model::ModelError;
use std::error::Error;
use std::fmt::{Display, Formatter};
use std::io;
use std::path::{Path, PathBuf};

pub mod card_repo;
pub mod project_repo;
pub mod workspace_repo;

pub type RepoResult<T> = Result<T, RepoError>;

#[derive(Debug)]
pub enum RepoError {
    Io { path: PathBuf, source: io::Error },
    Model { path: PathBuf, source: ModelError },
    NotInWorkspace(PathBuf),
    NotADirectory(PathBuf),
    CardExists(PathBuf),
    ProjectExists(PathBuf),
    WorkspaceExists(PathBuf),
}

impl Display for RepoError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Io { path, source } => write!(f, "{}: {source}", path.display()),
            Self::Model { path, source } => write!(f, "{}: {source}", path.display()),
            Self::NotInWorkspace(dir) => write!(
                f,
                "working directory ({}) is not in any workspace",
                dir.display()
            ),
            Self::NotADirectory(path) => write!(f, "expected a directory: {}", path.display()),
            Self::CardExists(path) => write!(f, "card already exists: {}", path.display()),
            Self::ProjectExists(path) => write!(f, "project already exists: {}", path.display()),
            Self::WorkspaceExists(path) => {
                write!(f, "workspace already exists: {}", path.display())
            }
        }
    }
}

impl Error for RepoError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Io { source, .. } => Some(source),
            Self::Model { source, .. } => Some(source),
            _ => None,
        }
    }
}

pub(crate) fn io_error(path: &Path) -> impl FnOnce(io::Error) -> RepoError + '_ {
    move |source| RepoError::Io {
        path: path.to_path_buf(),
        source,
    }
}

pub(crate) fn model_error(path: &Path) -> impl FnOnce(ModelError) -> RepoError + '_ {
    move |source| RepoError::Model {
        path: path.to_path_buf(),
        source,
    }
}
