//! Project domain model.
//!
//! A project is a directory of cards with a `Project.toml` manifest holding
//! its goal and schedule.
//!
//! # Invariants
//! - A project is active only once its start has passed and until its
//!   completion time passes.
//! - Deadline notices count whole days, truncated toward zero.

use super::card::Card;
use super::time::{decode_datetime, encode_datetime, format_duration, parse_duration};
use super::ModelError;
use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use toml::value::Datetime;

/// Manifest file that marks a directory as a project.
pub const PROJECT_FILE_NAME: &str = "Project.toml";

/// On-disk shape of `Project.toml`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ProjectManifest {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub goal: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub start: Option<Datetime>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub deadline: Option<Datetime>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub complete: Option<Datetime>,
    /// How long completed cards stay visible, e.g. `72h`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub show_done_for: Option<String>,
}

impl ProjectManifest {
    pub fn parse(contents: &str) -> Result<Self, ModelError> {
        Ok(toml::from_str(contents)?)
    }

    pub fn to_toml(&self) -> Result<String, ModelError> {
        Ok(toml::to_string(self)?)
    }
}

/// A directory of cards with a goal and schedule.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Project {
    /// Project directory; cards live directly inside it.
    pub path: PathBuf,
    /// Name of the workspace the project was read from.
    pub workspace_name: String,
    pub name: String,
    pub goal: String,
    pub start: Option<DateTime<Utc>>,
    pub deadline: Option<DateTime<Utc>>,
    pub complete: Option<DateTime<Utc>>,
    /// Completed cards older than this are left out of headlines.
    pub show_done_for: Option<Duration>,
}

impl Project {
    /// Builds a project from its manifest.
    ///
    /// An empty manifest `name` falls back to the directory name.
    pub fn from_manifest(
        path: impl Into<PathBuf>,
        workspace_name: impl Into<String>,
        manifest: &ProjectManifest,
    ) -> Result<Self, ModelError> {
        let path = path.into();
        let name = if manifest.name.trim().is_empty() {
            path.file_name()
                .map(|name| name.to_string_lossy().into_owned())
                .unwrap_or_default()
        } else {
            manifest.name.trim().to_string()
        };
        let show_done_for = match manifest.show_done_for.as_deref() {
            Some(raw) if !raw.trim().is_empty() => Some(
                parse_duration(raw).ok_or_else(|| ModelError::InvalidDuration(raw.to_string()))?,
            ),
            _ => None,
        };

        Ok(Self {
            path,
            workspace_name: workspace_name.into(),
            name,
            goal: manifest.goal.clone(),
            start: decode_datetime("start", manifest.start.as_ref())?,
            deadline: decode_datetime("deadline", manifest.deadline.as_ref())?,
            complete: decode_datetime("complete", manifest.complete.as_ref())?,
            show_done_for,
        })
    }

    pub fn to_manifest(&self) -> Result<ProjectManifest, ModelError> {
        Ok(ProjectManifest {
            name: self.name.clone(),
            goal: self.goal.clone(),
            start: encode_datetime("start", self.start)?,
            deadline: encode_datetime("deadline", self.deadline)?,
            complete: encode_datetime("complete", self.complete)?,
            show_done_for: self.show_done_for.map(format_duration),
        })
    }

    /// Started in the past and not yet complete.
    pub fn is_active(&self, now: DateTime<Utc>) -> bool {
        has_passed(self.start, now) && !has_passed(self.complete, now)
    }

    /// Human-readable deadline status relative to `now`.
    pub fn deadline_notice(&self, now: DateTime<Utc>) -> String {
        let Some(deadline) = self.deadline else {
            return "No deadline".to_string();
        };
        let days = (deadline - now).num_days();
        match days {
            0 => "Due today".to_string(),
            days if days > 0 => format!("Due in {days} days"),
            days => format!("Overdue by {} days", days.unsigned_abs()),
        }
    }

    /// Whether `card` belongs in the visible backlog at `now`.
    pub fn shows_card(&self, card: &Card, now: DateTime<Utc>) -> bool {
        match self.show_done_for {
            Some(window) => !card.completed_longer_ago_than(now, window),
            None => true,
        }
    }
}

fn has_passed(moment: Option<DateTime<Utc>>, now: DateTime<Utc>) -> bool {
    moment.is_some_and(|moment| moment < now)
}
