//! Command dispatch and plain-text rendering of results.
//!
//! # Invariants
//! - Rendered output goes to the given writer only; diagnostics go to
//!   stderr or the log.

use crate::args::{Args, Command};
use crate::editor::{is_unchanged, text_from_editor, PRESET_TEXT};
use crate::error::CliError;
use chrono::{DateTime, Utc};
use hammock_core::model::time::{encode_datetime, parse_timestamp};
use hammock_core::{
    align, find_workspace, init_workspace, read_workspace, summarize_projects, BacklogService,
    Card, CardView, FsCardRepository, FsProjectRepository, HammockConfig, ProjectListing,
    ProjectManifest, Selection,
};
use log::info;
use std::io::Write;
use std::path::Path;

type Service = BacklogService<FsProjectRepository, FsCardRepository>;

/// Runs one parsed command relative to `cwd`.
pub fn dispatch(
    args: Args,
    config: &HammockConfig,
    cwd: &Path,
    out: &mut impl Write,
) -> Result<(), CliError> {
    let now = Utc::now();
    let project_name = args.project.as_deref();

    match args.command {
        Command::Init { name } => {
            let workspace = init_workspace(cwd, name.as_deref())?;
            writeln!(
                out,
                "initialized workspace `{}` in {}",
                workspace.name,
                workspace.path.display()
            )?;
        }
        Command::Summary { width } => {
            let width = width.unwrap_or(config.width);
            let workspaces = summary_workspaces(config, cwd)?;
            let lines = summarize_projects(&workspaces, &FsCardRepository::new(), width, now)?;
            write!(out, "{}", align(&lines, config.padding)?)?;
        }
        Command::List => {
            let service = open_service(cwd)?;
            write_listings(out, &list_view(&service, project_name, now)?)?;
        }
        Command::Show { rank } => {
            let service = open_service(cwd)?;
            let project = service.select_project(project_name, Selection::FirstActive, now)?;
            write_card_view(out, &service.show(&project, rank)?)?;
        }
        Command::Rank { from, to } => {
            let service = open_service(cwd)?;
            let project = service.select_project(project_name, Selection::SingleActive, now)?;
            service.rank(&project, from, to)?;
            write_listings(out, &list_view(&service, project_name, now)?)?;
        }
        Command::New { rank, text } => {
            let service = open_service(cwd)?;
            let project = service.select_project(project_name, Selection::SingleActive, now)?;
            let text = match text {
                Some(text) => text,
                None => text_from_editor(PRESET_TEXT)?,
            };
            if is_unchanged(&text, PRESET_TEXT) {
                writeln!(out, "Aborting new card due to empty card text")?;
                return Ok(());
            }
            let card = service.create(&project, &text, rank)?;
            writeln!(out, "created {}", numbered(&card))?;
        }
        Command::Remove { rank, headline } => {
            let service = open_service(cwd)?;
            let project = service.select_project(project_name, Selection::SingleActive, now)?;
            let card = service.remove(&project, rank, &headline)?;
            writeln!(out, "removed {}", card.headline)?;
        }
        Command::Done { rank } => {
            let service = open_service(cwd)?;
            let project = service.select_project(project_name, Selection::SingleActive, now)?;
            let card = service.toggle_complete(&project, rank, now)?;
            writeln!(out, "{rank}. {}", card.display_headline())?;
        }
        Command::Normalize => {
            let service = open_service(cwd)?;
            let project = service.select_project(project_name, Selection::SingleActive, now)?;
            let backlog = service.normalize(&project)?;
            writeln!(
                out,
                "renumbered {} cards in `{}`",
                backlog.len(),
                project.name
            )?;
        }
        Command::Project {
            name,
            goal,
            start,
            deadline,
        } => {
            let service = open_service(cwd)?;
            let start = timestamp_flag("start", start.as_deref())?.unwrap_or(now);
            let manifest = ProjectManifest {
                name,
                goal,
                start: encode_datetime("start", Some(start))?,
                deadline: encode_datetime(
                    "deadline",
                    timestamp_flag("deadline", deadline.as_deref())?,
                )?,
                ..ProjectManifest::default()
            };
            let project = service.create_project(&manifest)?;
            writeln!(
                out,
                "created project `{}` in {}",
                project.name,
                project.path.display()
            )?;
        }
    }
    Ok(())
}

fn open_service(cwd: &Path) -> Result<Service, CliError> {
    let workspace = find_workspace(cwd)?;
    info!(
        "event=workspace_open module=cli status=ok name={} path={}",
        workspace.name,
        workspace.path.display()
    );
    Ok(BacklogService::new(
        FsProjectRepository::new(workspace),
        FsCardRepository::new(),
    ))
}

/// Every active project, or only the one named by `--project`.
fn list_view(
    service: &Service,
    project_name: Option<&str>,
    now: DateTime<Utc>,
) -> Result<Vec<ProjectListing>, CliError> {
    match project_name {
        Some(name) => {
            let project = service.select_project(Some(name), Selection::SingleActive, now)?;
            Ok(vec![service.listing(project, now)?])
        }
        None => Ok(service.list(now)?),
    }
}

/// Configured workspaces, or the one containing `cwd` when none are.
fn summary_workspaces(
    config: &HammockConfig,
    cwd: &Path,
) -> Result<Vec<FsProjectRepository>, CliError> {
    if config.workspaces.is_empty() {
        return Ok(vec![FsProjectRepository::new(find_workspace(cwd)?)]);
    }
    config
        .workspaces
        .iter()
        .map(|dir| Ok(FsProjectRepository::new(read_workspace(dir)?)))
        .collect()
}

fn timestamp_flag(
    flag: &'static str,
    value: Option<&str>,
) -> Result<Option<DateTime<Utc>>, CliError> {
    value
        .map(|raw| {
            parse_timestamp(raw).ok_or_else(|| CliError::InvalidTimestamp {
                flag,
                value: raw.to_string(),
            })
        })
        .transpose()
}

fn numbered(card: &Card) -> String {
    format!("{}. {}", card.priority, card.display_headline())
}

/// Writes each active project as a block: workspace, name, goal, deadline
/// notice, then its numbered headlines.
pub fn write_listings(out: &mut impl Write, listings: &[ProjectListing]) -> Result<(), CliError> {
    if listings.is_empty() {
        writeln!(out, "No active projects")?;
        return Ok(());
    }
    for listing in listings {
        let project = &listing.project;
        writeln!(out)?;
        for field in [
            project.workspace_name.as_str(),
            project.name.as_str(),
            project.goal.trim(),
            listing.deadline_notice.as_str(),
        ] {
            writeln!(out, "{field}")?;
            writeln!(out)?;
        }
        for headline in &listing.headlines {
            writeln!(out, "{headline}")?;
        }
    }
    Ok(())
}

/// Writes the project name, then every card: the selected one in full,
/// the rest as headlines.
pub fn write_card_view(out: &mut impl Write, view: &CardView) -> Result<(), CliError> {
    writeln!(out, "{}", view.project.name)?;
    for (index, card) in view.backlog.iter().enumerate() {
        if index == view.selected {
            writeln!(out, "{}) {}\n", index + 1, card.text)?;
        } else {
            writeln!(out, "{}) {}", index + 1, card.display_headline())?;
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::{dispatch, write_card_view, write_listings};
    use crate::args::{Args, Command};
    use crate::error::CliError;
    use hammock_core::{Card, CardView, HammockConfig, Project, ProjectListing, ProjectManifest};
    use std::path::Path;

    fn project() -> Project {
        let manifest =
            ProjectManifest::parse("name = \"garden\"\ngoal = \"Grow beans\\n\"\n").unwrap();
        Project::from_manifest("/ws/projects/garden", "home", &manifest).unwrap()
    }

    fn run(cwd: &Path, project: Option<&str>, command: Command) -> Result<String, CliError> {
        let args = Args {
            project: project.map(str::to_string),
            command,
        };
        let mut out = Vec::new();
        dispatch(args, &HammockConfig::default(), cwd, &mut out)?;
        Ok(String::from_utf8(out).unwrap())
    }

    #[test]
    fn listing_block_layout() {
        let listing = ProjectListing {
            project: project(),
            deadline_notice: "No deadline".to_string(),
            headlines: vec!["1. • Water".to_string(), "3. ✔ Sow".to_string()],
        };
        let mut out = Vec::new();
        write_listings(&mut out, &[listing]).unwrap();
        assert_eq!(
            String::from_utf8(out).unwrap(),
            "\nhome\n\ngarden\n\nGrow beans\n\nNo deadline\n\n1. • Water\n3. ✔ Sow\n"
        );
    }

    #[test]
    fn empty_listing_says_so() {
        let mut out = Vec::new();
        write_listings(&mut out, &[]).unwrap();
        assert_eq!(String::from_utf8(out).unwrap(), "No active projects\n");
    }

    #[test]
    fn card_view_expands_selected_card() {
        let view = CardView {
            project: project(),
            backlog: vec![
                Card::new("a.md", "# Water\nTwice a day").unwrap(),
                Card::new("b.md", "# Weed").unwrap(),
            ],
            selected: 0,
        };
        let mut out = Vec::new();
        write_card_view(&mut out, &view).unwrap();
        assert_eq!(
            String::from_utf8(out).unwrap(),
            "garden\n1) # Water\nTwice a day\n\n2) • Weed\n"
        );
    }

    #[test]
    fn commands_round_trip_through_workspace() {
        let root = tempfile::tempdir().unwrap();
        run(root.path(), None, Command::Init { name: Some("home".to_string()) }).unwrap();
        run(
            root.path(),
            None,
            Command::Project {
                name: "garden".to_string(),
                goal: "Grow beans".to_string(),
                start: Some("2024-01-01".to_string()),
                deadline: None,
            },
        )
        .unwrap();

        let created = run(
            root.path(),
            None,
            Command::New {
                rank: None,
                text: Some("# Water".to_string()),
            },
        )
        .unwrap();
        assert_eq!(created, "created 1. • Water\n");
        run(
            root.path(),
            None,
            Command::New {
                rank: Some(9),
                text: Some("# Weed".to_string()),
            },
        )
        .unwrap();

        let listed = run(root.path(), Some("garden"), Command::Rank { from: 2, to: 1 }).unwrap();
        assert!(listed.ends_with("1. • Weed\n2. • Water\n"));

        let done = run(root.path(), None, Command::Done { rank: 2 }).unwrap();
        assert_eq!(done, "2. ✔ Water\n");

        let shown = run(root.path(), None, Command::Show { rank: Some(5) }).unwrap();
        assert_eq!(shown, "garden\n1) • Weed\n2) # Water\n\n");

        let removed = run(
            root.path(),
            None,
            Command::Remove {
                rank: 1,
                headline: "Weed".to_string(),
            },
        )
        .unwrap();
        assert_eq!(removed, "removed Weed\n");

        let summary = run(root.path(), None, Command::Summary { width: None }).unwrap();
        assert!(summary.starts_with("home"));
        assert!(summary.contains("1. ✔ Water"));
    }

    #[test]
    fn list_is_limited_to_named_project() {
        let root = tempfile::tempdir().unwrap();
        run(
            root.path(),
            None,
            Command::Init {
                name: Some("home".to_string()),
            },
        )
        .unwrap();
        for name in ["garden", "attic"] {
            run(
                root.path(),
                None,
                Command::Project {
                    name: name.to_string(),
                    goal: String::new(),
                    start: Some("2024-01-01".to_string()),
                    deadline: None,
                },
            )
            .unwrap();
        }

        let all = run(root.path(), None, Command::List).unwrap();
        assert!(all.contains("\ngarden\n") && all.contains("\nattic\n"));

        let one = run(root.path(), Some("garden"), Command::List).unwrap();
        assert!(one.contains("\ngarden\n"));
        assert!(!one.contains("attic"));
    }

    #[test]
    fn unchanged_text_aborts_new_card() {
        let root = tempfile::tempdir().unwrap();
        run(root.path(), None, Command::Init { name: None }).unwrap();
        run(
            root.path(),
            None,
            Command::Project {
                name: "garden".to_string(),
                goal: String::new(),
                start: None,
                deadline: None,
            },
        )
        .unwrap();

        let out = run(
            root.path(),
            None,
            Command::New {
                rank: None,
                text: Some("# \n".to_string()),
            },
        )
        .unwrap();
        assert_eq!(out, "Aborting new card due to empty card text\n");
    }

    #[test]
    fn bad_start_flag_is_reported() {
        let root = tempfile::tempdir().unwrap();
        run(root.path(), None, Command::Init { name: None }).unwrap();
        let err = run(
            root.path(),
            None,
            Command::Project {
                name: "garden".to_string(),
                goal: String::new(),
                start: Some("soon".to_string()),
                deadline: None,
            },
        )
        .unwrap_err();
        assert!(matches!(err, CliError::InvalidTimestamp { flag: "start", .. }));
    }
}
