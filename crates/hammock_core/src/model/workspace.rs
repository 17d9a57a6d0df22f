//! Workspace domain model: a named directory of projects.

use super::ModelError;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Manifest file that marks a directory as a workspace root.
pub const WORKSPACE_FILE_NAME: &str = "Workspace.toml";
/// Projects directory written by `init` for new workspaces.
pub const DEFAULT_PROJECTS_DIR: &str = "projects";

/// On-disk shape of `Workspace.toml`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct WorkspaceManifest {
    #[serde(default)]
    pub name: String,
    /// Relative to the workspace root; empty means the root itself.
    #[serde(default)]
    pub projects_dir: String,
}

impl WorkspaceManifest {
    pub fn parse(contents: &str) -> Result<Self, ModelError> {
        Ok(toml::from_str(contents)?)
    }

    pub fn to_toml(&self) -> Result<String, ModelError> {
        Ok(toml::to_string(self)?)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Workspace {
    /// Directory holding `Workspace.toml`.
    pub path: PathBuf,
    pub name: String,
    pub projects_dir: String,
}

impl Workspace {
    /// Builds a workspace rooted at `path`; a blank name falls back to the
    /// directory name.
    pub fn from_manifest(path: impl Into<PathBuf>, manifest: &WorkspaceManifest) -> Self {
        let path = path.into();
        let name = if manifest.name.trim().is_empty() {
            path.file_name()
                .map(|name| name.to_string_lossy().into_owned())
                .unwrap_or_default()
        } else {
            manifest.name.trim().to_string()
        };
        Self {
            path,
            name,
            projects_dir: manifest.projects_dir.trim().to_string(),
        }
    }

    pub fn to_manifest(&self) -> WorkspaceManifest {
        WorkspaceManifest {
            name: self.name.clone(),
            projects_dir: self.projects_dir.clone(),
        }
    }

    /// Directory scanned for project subdirectories.
    pub fn projects_path(&self) -> PathBuf {
        if self.projects_dir.is_empty() {
            return self.path.clone();
        }
        self.path.join(Path::new(&self.projects_dir))
    }

    pub fn manifest_path(&self) -> PathBuf {
        self.path.join(WORKSPACE_FILE_NAME)
    }
}

#[cfg(test)]
mod tests {
    use super::{Workspace, WorkspaceManifest};
    use std::path::Path;

    #[test]
    fn projects_path_joins_relative_dir() {
        let manifest = WorkspaceManifest::parse("name = \"Home\"\nprojects_dir = \"projects\"\n")
            .unwrap();
        let workspace = Workspace::from_manifest("/ws", &manifest);
        assert_eq!(workspace.name, "Home");
        assert_eq!(workspace.projects_path(), Path::new("/ws/projects"));
    }

    #[test]
    fn missing_fields_fall_back_to_root_and_dir_name() {
        let workspace = Workspace::from_manifest("/data/home", &WorkspaceManifest::default());
        assert_eq!(workspace.name, "home");
        assert_eq!(workspace.projects_path(), Path::new("/data/home"));
    }
}
