//! Side-by-side project summary.
//!
//! Each project becomes one column; each summary field becomes one logical
//! row (workspace, name, goal, deadline, then one row per card headline).

use super::grid::{expand_multiline_rows, pad_columns};
use super::render::render;
use super::wrap::{truncate_to_width, wrap_to_width};
use super::{positive_width, LayoutResult};

/// Summary fields for one project, treated as opaque text.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ProjectColumn {
    pub workspace_name: String,
    pub project_name: String,
    pub goal_text: String,
    pub deadline_notice_text: String,
    pub card_headlines: Vec<String>,
}

impl ProjectColumn {
    /// Width-normalized cells, top to bottom.
    ///
    /// The goal is word-wrapped; every other field is a single line and
    /// gets truncated instead.
    fn cells(&self, width: i64) -> LayoutResult<Vec<String>> {
        let mut cells = vec![
            truncate_to_width(&self.workspace_name, width)?,
            truncate_to_width(&self.project_name, width)?,
            wrap_to_width(self.goal_text.trim(), width)?,
            truncate_to_width(&self.deadline_notice_text, width)?,
        ];
        for headline in &self.card_headlines {
            cells.push(truncate_to_width(headline, width)?);
        }
        Ok(cells)
    }
}

/// Lays projects out side by side and returns tab-separated display lines.
///
/// # Errors
/// - `LayoutError::InvalidArgument` when `width <= 0`, checked before any
///   field is formatted.
pub fn summarize(projects: &[ProjectColumn], width: i64) -> LayoutResult<Vec<String>> {
    positive_width("width", width)?;

    let columns = projects
        .iter()
        .map(|project| project.cells(width))
        .collect::<LayoutResult<Vec<_>>>()?;
    let rows = pad_columns(&columns);
    Ok(render(&expand_multiline_rows(&rows)))
}
