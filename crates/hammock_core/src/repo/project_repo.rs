//! Project repository contracts and filesystem implementation.
//!
//! # Invariants
//! - Only direct subdirectories of the workspace projects directory that
//!   hold a `Project.toml` are projects.
//! - Listings are sorted by project name, then path.

use super::{io_error, model_error, RepoError, RepoResult};
use crate::model::card::slug;
use crate::model::project::{Project, ProjectManifest, PROJECT_FILE_NAME};
use crate::model::workspace::Workspace;
use chrono::{DateTime, Utc};
use log::{debug, info};
use std::fs;
use std::path::Path;

/// Repository interface for the projects of one workspace.
pub trait ProjectRepository {
    fn workspace(&self) -> &Workspace;
    fn list_projects(&self) -> RepoResult<Vec<Project>>;
    fn create_project(&self, manifest: &ProjectManifest) -> RepoResult<Project>;

    /// Projects that have started and are not complete at `now`.
    fn active_projects(&self, now: DateTime<Utc>) -> RepoResult<Vec<Project>> {
        Ok(self
            .list_projects()?
            .into_iter()
            .filter(|project| project.is_active(now))
            .collect())
    }
}

/// Reads projects from `<workspace>/<projects_dir>/*/Project.toml`.
pub struct FsProjectRepository {
    workspace: Workspace,
}

impl FsProjectRepository {
    pub fn new(workspace: Workspace) -> Self {
        Self { workspace }
    }
}

impl ProjectRepository for FsProjectRepository {
    fn workspace(&self) -> &Workspace {
        &self.workspace
    }

    fn list_projects(&self) -> RepoResult<Vec<Project>> {
        let projects_path = self.workspace.projects_path();
        if !projects_path.is_dir() {
            return Err(RepoError::NotADirectory(projects_path));
        }

        let mut projects = Vec::new();
        for entry in fs::read_dir(&projects_path).map_err(io_error(&projects_path))? {
            let entry = entry.map_err(io_error(&projects_path))?;
            let path = entry.path();
            if !path.join(PROJECT_FILE_NAME).is_file() {
                continue;
            }
            projects.push(read_project(&path, &self.workspace.name)?);
        }
        projects.sort_by(|a, b| a.name.cmp(&b.name).then_with(|| a.path.cmp(&b.path)));

        debug!(
            "event=projects_list module=repo status=ok workspace={} count={}",
            self.workspace.name,
            projects.len()
        );
        Ok(projects)
    }

    fn create_project(&self, manifest: &ProjectManifest) -> RepoResult<Project> {
        let project_dir = self.workspace.projects_path().join(slug(&manifest.name));
        let manifest_path = project_dir.join(PROJECT_FILE_NAME);
        if manifest_path.exists() {
            return Err(RepoError::ProjectExists(project_dir));
        }

        let project = Project::from_manifest(&project_dir, &self.workspace.name, manifest)
            .map_err(model_error(&manifest_path))?;
        fs::create_dir_all(&project_dir).map_err(io_error(&project_dir))?;
        let contents = manifest.to_toml().map_err(model_error(&manifest_path))?;
        fs::write(&manifest_path, contents).map_err(io_error(&manifest_path))?;

        info!(
            "event=project_create module=repo status=ok workspace={} project={}",
            self.workspace.name, project.name
        );
        Ok(project)
    }
}

/// Reads `<dir>/Project.toml` as a project of `workspace_name`.
pub fn read_project(dir: &Path, workspace_name: &str) -> RepoResult<Project> {
    let manifest_path = dir.join(PROJECT_FILE_NAME);
    let contents = fs::read_to_string(&manifest_path).map_err(io_error(&manifest_path))?;
    let manifest = ProjectManifest::parse(&contents).map_err(model_error(&manifest_path))?;
    Project::from_manifest(dir, workspace_name, &manifest).map_err(model_error(&manifest_path))
}
