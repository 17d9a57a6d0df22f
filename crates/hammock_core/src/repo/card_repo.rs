//! Card repository contracts and filesystem implementation.
//!
//! # Invariants
//! - A backlog is ordered by ascending priority, ties broken by path.
//! - `create_card` never overwrites an existing file.
//! - Files in a project directory that do not parse as cards are skipped.

use super::{io_error, model_error, RepoError, RepoResult};
use crate::model::card::Card;
use crate::model::project::{Project, PROJECT_FILE_NAME};
use log::{debug, info};
use std::fs::{self, OpenOptions};
use std::io::{ErrorKind, Write};
use std::path::Path;

/// Repository interface for card persistence.
pub trait CardRepository {
    /// Readable cards of `project`, in backlog order.
    fn backlog(&self, project: &Project) -> RepoResult<Vec<Card>>;
    /// Overwrites the card file with the current card state.
    fn write_card(&self, card: &Card) -> RepoResult<()>;
    /// Writes a new card file; fails when one already exists at its path.
    fn create_card(&self, card: &Card) -> RepoResult<()>;
    fn remove_card(&self, card: &Card) -> RepoResult<()>;

    /// Renumbers `cards` to priorities `1..=n` in slice order and saves them.
    fn write_consecutive_priorities(&self, cards: &mut [Card]) -> RepoResult<()> {
        for (index, card) in cards.iter_mut().enumerate() {
            card.priority = index as i64 + 1;
            self.write_card(card)?;
        }
        Ok(())
    }
}

/// Stores each card as one file inside its project directory.
#[derive(Debug, Clone, Copy, Default)]
pub struct FsCardRepository;

impl FsCardRepository {
    pub fn new() -> Self {
        Self
    }
}

impl CardRepository for FsCardRepository {
    fn backlog(&self, project: &Project) -> RepoResult<Vec<Card>> {
        if !project.path.is_dir() {
            return Err(RepoError::NotADirectory(project.path.clone()));
        }

        let mut cards = Vec::new();
        for entry in fs::read_dir(&project.path).map_err(io_error(&project.path))? {
            let entry = entry.map_err(io_error(&project.path))?;
            let path = entry.path();
            if !path.is_file() || entry.file_name() == PROJECT_FILE_NAME {
                continue;
            }
            match read_card(&path) {
                Ok(card) => cards.push(card),
                Err(err) => debug!(
                    "event=card_skip module=repo status=skipped path={} reason={}",
                    path.display(),
                    err
                ),
            }
        }
        cards.sort_by(|a, b| {
            a.priority
                .cmp(&b.priority)
                .then_with(|| a.path.cmp(&b.path))
        });
        Ok(cards)
    }

    fn write_card(&self, card: &Card) -> RepoResult<()> {
        let contents = card.to_file_contents().map_err(model_error(&card.path))?;
        fs::write(&card.path, contents).map_err(io_error(&card.path))?;
        debug!(
            "event=card_write module=repo status=ok path={} priority={}",
            card.path.display(),
            card.priority
        );
        Ok(())
    }

    fn create_card(&self, card: &Card) -> RepoResult<()> {
        let contents = card.to_file_contents().map_err(model_error(&card.path))?;
        let mut file = match OpenOptions::new()
            .write(true)
            .create_new(true)
            .open(&card.path)
        {
            Ok(file) => file,
            Err(err) if err.kind() == ErrorKind::AlreadyExists => {
                return Err(RepoError::CardExists(card.path.clone()));
            }
            Err(err) => return Err(io_error(&card.path)(err)),
        };
        file.write_all(contents.as_bytes())
            .map_err(io_error(&card.path))?;
        info!(
            "event=card_create module=repo status=ok path={}",
            card.path.display()
        );
        Ok(())
    }

    fn remove_card(&self, card: &Card) -> RepoResult<()> {
        fs::remove_file(&card.path).map_err(io_error(&card.path))?;
        info!(
            "event=card_remove module=repo status=ok path={}",
            card.path.display()
        );
        Ok(())
    }
}

/// Reads and parses one card file.
pub fn read_card(path: &Path) -> RepoResult<Card> {
    let contents = fs::read_to_string(path).map_err(io_error(path))?;
    Card::parse(path, &contents).map_err(model_error(path))
}
