//! Cross-workspace summary use-case.
//!
//! Collects one `ProjectColumn` per active project, then hands the complete
//! set to the layout engine. Any repository error aborts before layout.

use super::backlog_service::visible_headlines;
use super::ServiceError;
use crate::layout::summary::{summarize, ProjectColumn};
use crate::model::project::Project;
use crate::repo::card_repo::CardRepository;
use crate::repo::project_repo::ProjectRepository;
use chrono::{DateTime, Utc};
use log::info;

/// Summary fields for one project at `now`.
pub fn project_column<C: CardRepository>(
    cards: &C,
    project: &Project,
    now: DateTime<Utc>,
) -> Result<ProjectColumn, ServiceError> {
    let backlog = cards.backlog(project)?;
    Ok(ProjectColumn {
        workspace_name: project.workspace_name.clone(),
        project_name: project.name.clone(),
        goal_text: project.goal.trim().to_string(),
        deadline_notice_text: project.deadline_notice(now),
        card_headlines: visible_headlines(project, &backlog, now),
    })
}

/// Renders active projects of every workspace side by side.
///
/// Returns tab-separated display lines, one per grid row.
pub fn summarize_projects<P: ProjectRepository, C: CardRepository>(
    workspaces: &[P],
    cards: &C,
    width: i64,
    now: DateTime<Utc>,
) -> Result<Vec<String>, ServiceError> {
    let mut columns = Vec::new();
    for workspace in workspaces {
        for project in workspace.active_projects(now)? {
            columns.push(project_column(cards, &project, now)?);
        }
    }

    let lines = summarize(&columns, width)?;
    info!(
        "event=summary_render module=service status=ok workspaces={} projects={} lines={}",
        workspaces.len(),
        columns.len(),
        lines.len()
    );
    Ok(lines)
}
