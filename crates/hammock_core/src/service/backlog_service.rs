//! Backlog use-case service.
//!
//! # Responsibility
//! - Pick the project a command applies to.
//! - List, show, reorder, create, remove and complete cards by 1-based rank.
//!
//! # Invariants
//! - `show` clamps any rank into the backlog; a too-low rank selects the
//!   first card and a too-high rank selects the last.
//! - `rank` requires an existing source rank; the target rank clamps.
//! - Every mutation that changes backlog membership or order rewrites
//!   priorities as `1..=n`.

use super::ServiceError;
use crate::model::card::{slug, Card};
use crate::model::project::{Project, ProjectManifest};
use crate::model::workspace::Workspace;
use crate::repo::card_repo::CardRepository;
use crate::repo::project_repo::ProjectRepository;
use chrono::{DateTime, Utc};
use log::{info, warn};

/// How to resolve a command's project when none is named.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Selection {
    /// Require exactly one active project.
    SingleActive,
    /// Use the first active project (by name) when several are active.
    FirstActive,
}

/// One active project prepared for the list view.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProjectListing {
    pub project: Project,
    pub deadline_notice: String,
    /// Numbered visible headlines, e.g. `2. • Buy paint`.
    pub headlines: Vec<String>,
}

/// A backlog with one card picked out for full display.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CardView {
    pub project: Project,
    pub backlog: Vec<Card>,
    /// Index into `backlog` of the selected card.
    pub selected: usize,
}

impl CardView {
    pub fn selected_card(&self) -> &Card {
        &self.backlog[self.selected]
    }
}

/// Backlog service facade over project and card repositories.
pub struct BacklogService<P: ProjectRepository, C: CardRepository> {
    projects: P,
    cards: C,
}

impl<P: ProjectRepository, C: CardRepository> BacklogService<P, C> {
    pub fn new(projects: P, cards: C) -> Self {
        Self { projects, cards }
    }

    pub fn workspace(&self) -> &Workspace {
        self.projects.workspace()
    }

    /// Resolves the project a command applies to.
    ///
    /// An explicit `name` matches any project (active or not) by name or
    /// directory name, case-insensitively.
    ///
    /// # Errors
    /// - `ProjectNotFound` when `name` matches nothing.
    /// - `NoActiveProject` when no name is given and nothing is active.
    /// - `MultipleActiveProjects` under `Selection::SingleActive` when more
    ///   than one project is active.
    pub fn select_project(
        &self,
        name: Option<&str>,
        selection: Selection,
        now: DateTime<Utc>,
    ) -> Result<Project, ServiceError> {
        if let Some(name) = name {
            let wanted = name.trim().to_lowercase();
            return self
                .projects
                .list_projects()?
                .into_iter()
                .find(|project| {
                    project.name.to_lowercase() == wanted
                        || project
                            .path
                            .file_name()
                            .is_some_and(|dir| dir.to_string_lossy().to_lowercase() == wanted)
                })
                .ok_or_else(|| ServiceError::ProjectNotFound(name.to_string()));
        }

        let mut active = self.projects.active_projects(now)?;
        match (active.len(), selection) {
            (0, _) => Err(ServiceError::NoActiveProject),
            (1, _) => Ok(active.remove(0)),
            (_, Selection::FirstActive) => {
                warn!(
                    "event=project_select module=service status=ambiguous count={} chosen={}",
                    active.len(),
                    active[0].name
                );
                Ok(active.remove(0))
            }
            (_, Selection::SingleActive) => Err(ServiceError::MultipleActiveProjects(
                active.into_iter().map(|project| project.name).collect(),
            )),
        }
    }

    /// Cards of `project` in backlog order.
    pub fn backlog(&self, project: &Project) -> Result<Vec<Card>, ServiceError> {
        Ok(self.cards.backlog(project)?)
    }

    /// Active projects with their numbered visible headlines.
    pub fn list(&self, now: DateTime<Utc>) -> Result<Vec<ProjectListing>, ServiceError> {
        self.projects
            .active_projects(now)?
            .into_iter()
            .map(|project| self.listing(project, now))
            .collect()
    }

    /// List view of one project, active or not.
    pub fn listing(
        &self,
        project: Project,
        now: DateTime<Utc>,
    ) -> Result<ProjectListing, ServiceError> {
        let backlog = self.cards.backlog(&project)?;
        Ok(ProjectListing {
            deadline_notice: project.deadline_notice(now),
            headlines: visible_headlines(&project, &backlog, now),
            project,
        })
    }

    /// Picks one card for display; `rank` defaults to 1 and is clamped.
    pub fn show(&self, project: &Project, rank: Option<i64>) -> Result<CardView, ServiceError> {
        let backlog = self.non_empty_backlog(project)?;
        let selected = clamp_index(rank.unwrap_or(1), backlog.len());
        Ok(CardView {
            project: project.clone(),
            backlog,
            selected,
        })
    }

    /// Moves the card at rank `from` to rank `to` and renumbers the backlog.
    ///
    /// # Errors
    /// - `RankOutOfRange` when `from` addresses no card.
    pub fn rank(&self, project: &Project, from: i64, to: i64) -> Result<Vec<Card>, ServiceError> {
        let mut backlog = self.non_empty_backlog(project)?;
        let from_index = existing_index(from, backlog.len())?;
        let to_index = clamp_index(to, backlog.len());

        let card = backlog.remove(from_index);
        backlog.insert(to_index, card);
        self.cards.write_consecutive_priorities(&mut backlog)?;

        info!(
            "event=card_rank module=service status=ok project={} from={} to={}",
            project.name,
            from_index + 1,
            to_index + 1
        );
        Ok(backlog)
    }

    /// Creates a card from `text` at `rank` (default 1, clamped).
    ///
    /// # Errors
    /// - `MissingHeadline` when the first line of `text` is blank.
    /// - `Repo(RepoError::CardExists)` when a card with the same file name
    ///   exists.
    pub fn create(
        &self,
        project: &Project,
        text: &str,
        rank: Option<i64>,
    ) -> Result<Card, ServiceError> {
        let mut card = Card::in_project(&project.path, text)?;
        let mut backlog = self.cards.backlog(project)?;
        let index = clamp_index(rank.unwrap_or(1), backlog.len() + 1);
        card.priority = index as i64 + 1;
        self.cards.create_card(&card)?;

        backlog.insert(index, card);
        self.cards.write_consecutive_priorities(&mut backlog)?;
        Ok(backlog.swap_remove(index))
    }

    /// Deletes the card at `rank` once `headline` confirms it.
    ///
    /// Either the plain headline or the marked display headline confirms.
    pub fn remove(
        &self,
        project: &Project,
        rank: i64,
        headline: &str,
    ) -> Result<Card, ServiceError> {
        let mut backlog = self.non_empty_backlog(project)?;
        let index = existing_index(rank, backlog.len())?;
        let given = headline.trim();
        let card = &backlog[index];
        if given != card.headline && given != card.display_headline() {
            return Err(ServiceError::HeadlineMismatch {
                rank,
                actual: card.headline.clone(),
                given: given.to_string(),
            });
        }

        let removed = backlog.remove(index);
        self.cards.remove_card(&removed)?;
        self.cards.write_consecutive_priorities(&mut backlog)?;
        Ok(removed)
    }

    /// Flips completion of the card at `rank`.
    pub fn toggle_complete(
        &self,
        project: &Project,
        rank: i64,
        now: DateTime<Utc>,
    ) -> Result<Card, ServiceError> {
        let mut backlog = self.non_empty_backlog(project)?;
        let index = existing_index(rank, backlog.len())?;
        let mut card = backlog.swap_remove(index);
        card.toggle_complete(now);
        self.cards.write_card(&card)?;
        Ok(card)
    }

    /// Rewrites priorities as `1..=n` in current backlog order.
    pub fn normalize(&self, project: &Project) -> Result<Vec<Card>, ServiceError> {
        let mut backlog = self.cards.backlog(project)?;
        self.cards.write_consecutive_priorities(&mut backlog)?;
        Ok(backlog)
    }

    /// Creates a project directory with its manifest.
    ///
    /// # Errors
    /// - `InvalidProjectName` when the name yields no directory name, i.e.
    ///   it has no ASCII letter, digit or underscore.
    pub fn create_project(&self, manifest: &ProjectManifest) -> Result<Project, ServiceError> {
        if slug(&manifest.name).is_empty() {
            return Err(ServiceError::InvalidProjectName);
        }
        Ok(self.projects.create_project(manifest)?)
    }

    fn non_empty_backlog(&self, project: &Project) -> Result<Vec<Card>, ServiceError> {
        let backlog = self.cards.backlog(project)?;
        if backlog.is_empty() {
            return Err(ServiceError::EmptyBacklog(project.name.clone()));
        }
        Ok(backlog)
    }
}

/// Numbered display headlines of cards still visible at `now`.
///
/// Numbers are backlog ranks, so hidden cards leave gaps.
pub fn visible_headlines(project: &Project, backlog: &[Card], now: DateTime<Utc>) -> Vec<String> {
    backlog
        .iter()
        .enumerate()
        .filter(|(_, card)| project.shows_card(card, now))
        .map(|(index, card)| format!("{}. {}", index + 1, card.display_headline()))
        .collect()
}

/// Converts a 1-based rank into an index within `0..len`, clamping.
fn clamp_index(rank: i64, len: usize) -> usize {
    let last = len.saturating_sub(1) as i64;
    (rank.saturating_sub(1)).clamp(0, last) as usize
}

fn existing_index(rank: i64, len: usize) -> Result<usize, ServiceError> {
    if rank < 1 || rank > len as i64 {
        return Err(ServiceError::RankOutOfRange { rank, len });
    }
    Ok((rank - 1) as usize)
}
