//! Workspace discovery and initialization.
//!
//! A workspace is the closest directory, starting from the working
//! directory and walking up, that holds a `Workspace.toml`.

use super::{io_error, model_error, RepoError, RepoResult};
use crate::model::workspace::{
    Workspace, WorkspaceManifest, DEFAULT_PROJECTS_DIR, WORKSPACE_FILE_NAME,
};
use log::info;
use std::fs;
use std::path::Path;

/// Finds the workspace containing `start`, checking `start` itself first.
///
/// # Errors
/// - `RepoError::NotInWorkspace` when no ancestor has a `Workspace.toml`.
pub fn find_workspace(start: &Path) -> RepoResult<Workspace> {
    for dir in start.ancestors() {
        if dir.join(WORKSPACE_FILE_NAME).is_file() {
            return read_workspace(dir);
        }
    }
    Err(RepoError::NotInWorkspace(start.to_path_buf()))
}

/// Reads `<dir>/Workspace.toml`.
pub fn read_workspace(dir: &Path) -> RepoResult<Workspace> {
    let manifest_path = dir.join(WORKSPACE_FILE_NAME);
    let contents = fs::read_to_string(&manifest_path).map_err(io_error(&manifest_path))?;
    let manifest = WorkspaceManifest::parse(&contents).map_err(model_error(&manifest_path))?;
    Ok(Workspace::from_manifest(dir, &manifest))
}

/// Creates a workspace manifest and projects directory under `dir`.
///
/// # Errors
/// - `RepoError::WorkspaceExists` when `dir` already has a manifest.
pub fn init_workspace(dir: &Path, name: Option<&str>) -> RepoResult<Workspace> {
    let manifest_path = dir.join(WORKSPACE_FILE_NAME);
    if manifest_path.exists() {
        return Err(RepoError::WorkspaceExists(dir.to_path_buf()));
    }

    let manifest = WorkspaceManifest {
        name: name.unwrap_or_default().to_string(),
        projects_dir: DEFAULT_PROJECTS_DIR.to_string(),
    };
    let workspace = Workspace::from_manifest(dir, &manifest);
    let projects_path = workspace.projects_path();
    fs::create_dir_all(&projects_path).map_err(io_error(&projects_path))?;

    let contents = workspace
        .to_manifest()
        .to_toml()
        .map_err(model_error(&manifest_path))?;
    fs::write(&manifest_path, contents).map_err(io_error(&manifest_path))?;

    info!(
        "event=workspace_init module=repo status=ok name={} path={}",
        workspace.name,
        dir.display()
    );
    Ok(workspace)
}
