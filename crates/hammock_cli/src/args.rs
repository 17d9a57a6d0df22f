//! Command-line arguments for `hmm`.

use clap::{Parser, Subcommand};

/// Personal task manager: cards in projects in workspaces.
#[derive(Debug, Parser)]
#[command(name = "hmm", version)]
pub struct Args {
    /// Project to act on; defaults to the single active project (ignored by summary and init)
    #[arg(long, short = 'p', global = true, value_name = "NAME")]
    pub project: Option<String>,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// List the visible cards of every active project, or only of --project
    #[command(visible_alias = "ls")]
    List,

    /// Show the full text of one card, headlines of the rest
    Show {
        /// 1-based card rank; out-of-range ranks clamp to the first or last card
        #[arg(allow_negative_numbers = true)]
        rank: Option<i64>,
    },

    /// Move the card at FROM to rank TO
    Rank {
        #[arg(allow_negative_numbers = true)]
        from: i64,
        /// Clamps to the top or bottom of the backlog
        #[arg(allow_negative_numbers = true)]
        to: i64,
    },

    /// Create a card, opening $VISUAL or $EDITOR unless --text is given
    New {
        /// Rank to insert the card at
        #[arg(long, allow_negative_numbers = true)]
        rank: Option<i64>,
        /// Card text; the first line is the headline
        #[arg(long)]
        text: Option<String>,
    },

    /// Delete the card at RANK after confirming its headline
    #[command(visible_alias = "rm")]
    Remove {
        rank: i64,
        /// Headline of the card, quoted
        headline: String,
    },

    /// Toggle completion of the card at RANK
    Done { rank: i64 },

    /// Rewrite card priorities as 1..n in backlog order
    Normalize,

    /// Print active projects of all configured workspaces side by side
    Summary {
        /// Column width; overrides the configured width
        #[arg(long, short = 'w', allow_negative_numbers = true)]
        width: Option<i64>,
    },

    /// Create a workspace in the current directory
    Init { name: Option<String> },

    /// Create a project in the current workspace
    Project {
        name: String,
        #[arg(long, default_value = "")]
        goal: String,
        /// Start date or datetime; defaults to now
        #[arg(long)]
        start: Option<String>,
        /// Deadline date or datetime
        #[arg(long)]
        deadline: Option<String>,
    },
}

#[cfg(test)]
mod tests {
    use super::{Args, Command};
    use clap::{CommandFactory, Parser};

    #[test]
    fn definition_is_consistent() {
        Args::command().debug_assert();
    }

    #[test]
    fn project_flag_is_global() {
        let args = Args::parse_from(["hmm", "show", "2", "-p", "garden"]);
        assert_eq!(args.project.as_deref(), Some("garden"));
        assert!(matches!(args.command, Command::Show { rank: Some(2) }));
    }

    #[test]
    fn negative_ranks_parse() {
        let args = Args::parse_from(["hmm", "rank", "2", "-1"]);
        assert!(matches!(args.command, Command::Rank { from: 2, to: -1 }));
    }

    #[test]
    fn remove_takes_quoted_headline() {
        let args = Args::parse_from(["hmm", "remove", "1", "Buy paint"]);
        assert!(
            matches!(args.command, Command::Remove { rank: 1, ref headline } if headline == "Buy paint")
        );
    }
}
