//! Card domain model and its text-with-footer file format.
//!
//! A card file is markdown text, a `+++` line, then a TOML footer:
//!
//! ```text
//! # Buy paint
//! Two litres, matte.
//! +++
//! hammock_type = "Card"
//! priority = 2
//! completed = 2024-05-01T10:00:00Z
//! ```
//!
//! # Invariants
//! - `headline` is derived from the first text line and is never empty.
//! - `completed = None` means the card is open.

use super::time::{decode_datetime, encode_datetime};
use super::ModelError;
use chrono::{DateTime, Duration, Utc};
use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use toml::value::Datetime;

/// Footer `hammock_type` value that marks a file as a card.
pub const CARD_TYPE: &str = "Card";
/// Line that separates card text from its footer.
pub const FOOTER_SEPARATOR: &str = "\n+++\n";
/// Extension used for newly created card files.
pub const CARD_EXTENSION: &str = "md";

const FALLBACK_FILE_STEM: &str = "card";
const COMPLETE_MARK: &str = "✔";
const OPEN_MARK: &str = "•";

static FILE_NAME_UNSAFE_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"[^A-Za-z0-9_]+").expect("valid file name regex"));

/// A single task.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Card {
    /// File this card is read from and written to.
    pub path: PathBuf,
    /// First text line without markdown heading markers.
    pub headline: String,
    /// Full markdown text, headline line included.
    pub text: String,
    /// Backlog order within the project; lower ranks first.
    pub priority: i64,
    /// Completion time; `None` while the card is open.
    pub completed: Option<DateTime<Utc>>,
}

#[derive(Debug, Serialize, Deserialize)]
struct CardFooter {
    #[serde(default)]
    hammock_type: String,
    #[serde(default)]
    priority: i64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    completed: Option<Datetime>,
}

impl Card {
    /// Creates an open card from raw text, placing it at `path`.
    ///
    /// # Errors
    /// - `ModelError::EmptyHeadline` when the first line has no text.
    /// - `ModelError::SeparatorInText` when the text would corrupt the footer.
    pub fn new(path: impl Into<PathBuf>, text: impl Into<String>) -> Result<Self, ModelError> {
        let text = text.into().trim_end().to_string();
        if format!("\n{text}\n").contains(FOOTER_SEPARATOR) {
            return Err(ModelError::SeparatorInText);
        }
        let headline = headline_from_text(&text).ok_or(ModelError::EmptyHeadline)?;
        Ok(Self {
            path: path.into(),
            headline,
            text,
            priority: 0,
            completed: None,
        })
    }

    /// Creates an open card in `project_dir`, named after its headline.
    pub fn in_project(project_dir: &Path, text: impl Into<String>) -> Result<Self, ModelError> {
        let mut card = Self::new(PathBuf::new(), text)?;
        card.path = project_dir.join(file_name_from_headline(&card.headline));
        Ok(card)
    }

    /// Parses card file contents.
    ///
    /// # Errors
    /// - `ModelError::FooterSeparator` when the separator count is not one.
    /// - `ModelError::NotACard` when the footer declares another type.
    /// - `ModelError::EmptyHeadline`, `InvalidToml`, `InvalidDatetime`.
    pub fn parse(path: impl Into<PathBuf>, contents: &str) -> Result<Self, ModelError> {
        let parts = contents.split(FOOTER_SEPARATOR).collect::<Vec<_>>();
        let [document, footer] = parts.as_slice() else {
            return Err(ModelError::FooterSeparator {
                separators: parts.len() - 1,
            });
        };

        let footer: CardFooter = toml::from_str(footer)?;
        if footer.hammock_type != CARD_TYPE {
            return Err(ModelError::NotACard(footer.hammock_type));
        }
        let headline = headline_from_text(document).ok_or(ModelError::EmptyHeadline)?;

        Ok(Self {
            path: path.into(),
            headline,
            text: (*document).to_string(),
            priority: footer.priority,
            completed: decode_datetime("completed", footer.completed.as_ref())?,
        })
    }

    /// Serializes the card into its file contents.
    pub fn to_file_contents(&self) -> Result<String, ModelError> {
        let footer = CardFooter {
            hammock_type: CARD_TYPE.to_string(),
            priority: self.priority,
            completed: encode_datetime("completed", self.completed)?,
        };
        let footer = toml::to_string(&footer)?;
        Ok(format!(
            "{}{FOOTER_SEPARATOR}{footer}",
            self.text.trim_end()
        ))
    }

    /// Headline prefixed with a completion mark, as shown in lists.
    pub fn display_headline(&self) -> String {
        let mark = if self.is_complete() {
            COMPLETE_MARK
        } else {
            OPEN_MARK
        };
        format!("{mark} {}", self.headline)
    }

    pub fn is_complete(&self) -> bool {
        self.completed.is_some()
    }

    pub fn mark_complete(&mut self, now: DateTime<Utc>) {
        self.completed = Some(now);
    }

    pub fn mark_not_complete(&mut self) {
        self.completed = None;
    }

    /// Flips completion state; returns whether the card is now complete.
    pub fn toggle_complete(&mut self, now: DateTime<Utc>) -> bool {
        if self.is_complete() {
            self.mark_not_complete();
        } else {
            self.mark_complete(now);
        }
        self.is_complete()
    }

    /// Whether the card was completed more than `window` before `now`.
    pub fn completed_longer_ago_than(&self, now: DateTime<Utc>, window: Duration) -> bool {
        match self.completed {
            Some(completed) => now - completed > window,
            None => false,
        }
    }
}

/// Extracts a headline from the first line of `text`.
///
/// Leading `#` markers and surrounding whitespace are stripped; `None` when
/// nothing remains.
pub fn headline_from_text(text: &str) -> Option<String> {
    let first_line = text.lines().next()?;
    let headline = first_line
        .trim_start_matches(|c: char| c == '#' || c.is_whitespace())
        .trim_end();
    if headline.is_empty() {
        return None;
    }
    Some(headline.to_string())
}

/// Derives a card file name such as `Buy-paint.md` from a headline.
///
/// Headlines without any `[A-Za-z0-9_]` character get the stem `card`.
pub fn file_name_from_headline(headline: &str) -> String {
    let stem = slug(headline);
    let stem = if stem.is_empty() {
        FALLBACK_FILE_STEM
    } else {
        stem.as_str()
    };
    format!("{stem}.{CARD_EXTENSION}")
}

/// Replaces every run of characters outside `[A-Za-z0-9_]` with `-`.
pub fn slug(text: &str) -> String {
    FILE_NAME_UNSAFE_RE
        .replace_all(text, "-")
        .trim_matches('-')
        .to_string()
}

#[cfg(test)]
mod tests {
    use super::{file_name_from_headline, headline_from_text, Card};
    use crate::model::ModelError;
    use chrono::{Duration, TimeZone, Utc};
    use std::path::Path;

    const CARD_FILE: &str = "# Buy paint\nTwo litres, matte.\n+++\nhammock_type = \"Card\"\npriority = 2\ncompleted = 2024-05-01T10:00:00Z\n";

    #[test]
    fn parse_reads_text_and_footer() {
        let card = Card::parse("p/Buy-paint.md", CARD_FILE).unwrap();
        assert_eq!(card.headline, "Buy paint");
        assert_eq!(card.text, "# Buy paint\nTwo litres, matte.");
        assert_eq!(card.priority, 2);
        assert_eq!(
            card.completed,
            Some(Utc.with_ymd_and_hms(2024, 5, 1, 10, 0, 0).unwrap())
        );
        assert_eq!(card.display_headline(), "✔ Buy paint");
    }

    #[test]
    fn parse_rejects_missing_or_repeated_separator() {
        assert_eq!(
            Card::parse("x.md", "# no footer").unwrap_err(),
            ModelError::FooterSeparator { separators: 0 }
        );
        assert_eq!(
            Card::parse("x.md", "# a\n+++\nb\n+++\nc").unwrap_err(),
            ModelError::FooterSeparator { separators: 2 }
        );
    }

    #[test]
    fn parse_rejects_other_document_types() {
        let err = Card::parse("x.md", "# a\n+++\nhammock_type = \"Note\"\n").unwrap_err();
        assert_eq!(err, ModelError::NotACard("Note".to_string()));
    }

    #[test]
    fn parse_rejects_blank_headline() {
        let err = Card::parse("x.md", "#   \nbody\n+++\nhammock_type = \"Card\"\n").unwrap_err();
        assert_eq!(err, ModelError::EmptyHeadline);
    }

    #[test]
    fn file_contents_parse_back_to_same_card() {
        let mut card = Card::new("p/Call-mum.md", "# Call mum\n\nAsk about Sunday.\n").unwrap();
        card.priority = 3;
        card.mark_complete(Utc.with_ymd_and_hms(2024, 1, 2, 3, 4, 5).unwrap());

        let contents = card.to_file_contents().unwrap();
        assert_eq!(Card::parse("p/Call-mum.md", &contents).unwrap(), card);
    }

    #[test]
    fn open_card_footer_omits_completed() {
        let card = Card::new("a.md", "# Open").unwrap();
        let contents = card.to_file_contents().unwrap();
        assert!(!contents.contains("completed"));
        assert_eq!(card.display_headline(), "• Open");
    }

    #[test]
    fn new_rejects_separator_inside_text() {
        assert_eq!(
            Card::new("a.md", "# A\n+++\nmore").unwrap_err(),
            ModelError::SeparatorInText
        );
    }

    #[test]
    fn headline_strips_heading_markers() {
        assert_eq!(headline_from_text("## Plan trip \nbody").as_deref(), Some("Plan trip"));
        assert_eq!(headline_from_text("# Learn C#").as_deref(), Some("Learn C#"));
        assert_eq!(headline_from_text("   ").as_deref(), None);
        assert_eq!(headline_from_text("").as_deref(), None);
    }

    #[test]
    fn file_name_replaces_unsafe_runs() {
        assert_eq!(file_name_from_headline("Buy paint!"), "Buy-paint.md");
        assert_eq!(file_name_from_headline("  fix: the/thing  "), "fix-the-thing.md");
        assert_eq!(file_name_from_headline("snake_case ok"), "snake_case-ok.md");
    }

    #[test]
    fn file_name_without_safe_characters_uses_fallback_stem() {
        assert_eq!(file_name_from_headline("???"), "card.md");
        assert_eq!(file_name_from_headline("日本"), "card.md");
        let card = Card::in_project(Path::new("/p"), "# ???").unwrap();
        assert_eq!(card.path, Path::new("/p/card.md"));
    }

    #[test]
    fn trailing_hash_survives_parsing() {
        let card = Card::parse(
            "x.md",
            "# Learn C#\n+++\nhammock_type = \"Card\"\npriority = 1\n",
        )
        .unwrap();
        assert_eq!(card.headline, "Learn C#");
        assert_eq!(card.display_headline(), "• Learn C#");
    }

    #[test]
    fn in_project_places_file_under_directory() {
        let card = Card::in_project(Path::new("/ws/garden"), "# Weed beds").unwrap();
        assert_eq!(card.path, Path::new("/ws/garden/Weed-beds.md"));
    }

    #[test]
    fn toggle_and_completion_window() {
        let now = Utc.with_ymd_and_hms(2024, 6, 10, 12, 0, 0).unwrap();
        let mut card = Card::new("a.md", "# A").unwrap();
        assert!(card.toggle_complete(now - Duration::hours(48)));
        assert!(card.completed_longer_ago_than(now, Duration::hours(24)));
        assert!(!card.completed_longer_ago_than(now, Duration::hours(72)));
        assert!(!card.toggle_complete(now));
        assert!(!card.completed_longer_ago_than(now, Duration::zero()));
    }
}
