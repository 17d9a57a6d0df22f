//! Core domain logic for the `hmm` task manager.
//!
//! Cards (task files) live in projects (directories with a `Project.toml`),
//! which live in workspaces (directories with a `Workspace.toml`).

pub mod config;
pub mod layout;
pub mod logging;
pub mod model;
pub mod repo;
pub mod service;

pub use config::{ConfigError, HammockConfig};
pub use layout::render::{align, render};
pub use layout::summary::{summarize, ProjectColumn};
pub use layout::wrap::{truncate_to_width, wrap_to_width};
pub use layout::{Grid, LayoutError, LayoutResult};
pub use logging::{default_log_level, init_logging, logging_status};
pub use model::card::Card;
pub use model::project::{Project, ProjectManifest};
pub use model::workspace::Workspace;
pub use model::ModelError;
pub use repo::card_repo::{CardRepository, FsCardRepository};
pub use repo::project_repo::{FsProjectRepository, ProjectRepository};
pub use repo::workspace_repo::{find_workspace, init_workspace, read_workspace};
pub use repo::{RepoError, RepoResult};
pub use service::backlog_service::{BacklogService, CardView, ProjectListing, Selection};
pub use service::summary_service::summarize_projects;
pub use service::ServiceError;

/// Returns the core crate version.
pub fn core_version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}
