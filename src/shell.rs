use chrono::{Datelike, NaiveDate};
use std::io::Write as _;
use tokio::io::{AsyncBufReadExt, BufReader};

use dayplanner::core::date_key::{display_date, weekday_label};
use dayplanner::core::week::WEEK_DAYS;
use dayplanner::format::writer::PlannerWriter;
use dayplanner::planner::Planner;
use dayplanner::session::SessionState;
use dayplanner::storage::{FolderPicker, FsStore};

const HELP: &str = "\
n / p             next / previous week
1-5               pick a weekday
g YYYY-MM-DD      go to a date
today             go to today
c                 create a planner file for this day
e TIME TEXT       add event (e 9:00am Team Sync)
t TEXT            add task
x N               toggle task N
de N / dt N       delete event N / task N
ee N TIME TEXT    edit event N
et N TEXT         edit task N
f [PATH]          change folder (empty answer cancels)
r                 reload from disk
q                 quit";

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    NextWeek,
    PrevWeek,
    PickDay(usize),
    GoTo(NaiveDate),
    Today,
    Create,
    AddEvent { time: String, description: String },
    AddTask(String),
    ToggleTask(usize),
    DeleteEvent(usize),
    DeleteTask(usize),
    EditEvent { index: usize, time: String, description: String },
    EditTask { index: usize, text: String },
    ChangeFolder(Option<String>),
    Reload,
    Help,
    Quit,
}

impl Command {
    pub fn parse(line: &str) -> Result<Self, String> {
        let line = line.trim();
        let (word, rest) = line.split_once(char::is_whitespace).unwrap_or((line, ""));
        let rest = rest.trim();

        let cmd = match word {
            "n" => Self::NextWeek,
            "p" => Self::PrevWeek,
            "1" | "2" | "3" | "4" | "5" => Self::PickDay(parse_index(word)?),
            "g" => Self::GoTo(
                NaiveDate::parse_from_str(rest, "%Y-%m-%d")
                    .ok()
                    .filter(|d| (1000..=9999).contains(&d.year()))
                    .ok_or_else(|| format!("Not a date: {rest:?} (expected YYYY-MM-DD)"))?,
            ),
            "today" => Self::Today,
            "c" => Self::Create,
            "e" => {
                let (time, description) = split_pair(rest, "e TIME TEXT")?;
                Self::AddEvent { time, description }
            }
            "t" => Self::AddTask(rest.to_string()),
            "x" => Self::ToggleTask(parse_index(rest)?),
            "de" => Self::DeleteEvent(parse_index(rest)?),
            "dt" => Self::DeleteTask(parse_index(rest)?),
            "ee" => {
                let (index, rest) = split_pair(rest, "ee N TIME TEXT")?;
                let (time, description) = split_pair(&rest, "ee N TIME TEXT")?;
                Self::EditEvent {
                    index: parse_index(&index)?,
                    time,
                    description,
                }
            }
            "et" => {
                let (index, text) = split_pair(rest, "et N TEXT")?;
                Self::EditTask {
                    index: parse_index(&index)?,
                    text,
                }
            }
            "f" => Self::ChangeFolder((!rest.is_empty()).then(|| rest.to_string())),
            "r" => Self::Reload,
            "h" | "?" | "help" => Self::Help,
            "q" | "quit" => Self::Quit,
            other => return Err(format!("Unknown command {other:?}, type h for help")),
        };
        Ok(cmd)
    }
}

/// 1-based index as typed by the user.
fn parse_index(s: &str) -> Result<usize, String> {
    match s.trim().parse::<usize>() {
        Ok(n) if n > 0 => Ok(n),
        _ => Err(format!("Not an item number: {s:?}")),
    }
}

fn split_pair(s: &str, usage: &str) -> Result<(String, String), String> {
    s.split_once(char::is_whitespace)
        .map(|(a, b)| (a.to_string(), b.trim().to_string()))
        .ok_or_else(|| format!("Usage: {usage}"))
}

/// A folder typed at the prompt. Anything that is not an existing directory
/// counts as a cancel.
struct TypedFolder(Option<String>);

impl FolderPicker for TypedFolder {
    async fn select_folder(&self) -> Option<String> {
        let path = self.0.as_deref().map(str::trim).filter(|p| !p.is_empty())?;
        match tokio::fs::metadata(path).await {
            Ok(meta) if meta.is_dir() => Some(path.to_string()),
            _ => {
                log::warn!("Not a directory: {}", path);
                None
            }
        }
    }
}

pub struct Shell {
    planner: Planner<FsStore>,
    status: Option<String>,
}

impl Shell {
    pub fn new(planner: Planner<FsStore>) -> Self {
        Self {
            planner,
            status: None,
        }
    }

    /// Apply a command. Returns false when the shell should exit.
    pub async fn update(&mut self, command: Command) -> bool {
        // Err carries the status line shown under the day.
        let result = match command {
            Command::NextWeek => {
                self.planner.next_week().await;
                Ok(())
            }
            Command::PrevWeek => {
                self.planner.prev_week().await;
                Ok(())
            }
            Command::PickDay(n) => match self.planner.week().days().get(n - 1) {
                Some(&date) => {
                    self.planner.select_date(date).await;
                    Ok(())
                }
                None => Err(format!("No weekday {n}")),
            },
            Command::GoTo(date) => {
                self.planner.select_date(date).await;
                Ok(())
            }
            Command::Today => {
                self.planner.select_date(chrono::Local::now().date_naive()).await;
                Ok(())
            }
            Command::Create => self.planner.create_day().await.map_err(|e| e.to_string()),
            Command::AddEvent { time, description } => self
                .planner
                .add_event(&time, &description)
                .await
                .map(|_| ())
                .map_err(|e| e.to_string()),
            Command::AddTask(text) => self
                .planner
                .add_task(&text)
                .await
                .map(|_| ())
                .map_err(|e| e.to_string()),
            Command::ToggleTask(n) => match self.task_id(n) {
                Ok(id) => self
                    .planner
                    .toggle_task(id)
                    .await
                    .map(|_| ())
                    .map_err(|e| e.to_string()),
                Err(e) => Err(e),
            },
            Command::DeleteEvent(n) => match self.event_id(n) {
                Ok(id) => self.planner.delete_event(id).await.map_err(|e| e.to_string()),
                Err(e) => Err(e),
            },
            Command::DeleteTask(n) => match self.task_id(n) {
                Ok(id) => self.planner.delete_task(id).await.map_err(|e| e.to_string()),
                Err(e) => Err(e),
            },
            Command::EditEvent {
                index,
                time,
                description,
            } => match self.event_id(index) {
                Ok(id) => self
                    .planner
                    .update_event(id, &time, &description)
                    .await
                    .map_err(|e| e.to_string()),
                Err(e) => Err(e),
            },
            Command::EditTask { index, text } => match self.task_id(index) {
                Ok(id) => self
                    .planner
                    .update_task(id, &text)
                    .await
                    .map_err(|e| e.to_string()),
                Err(e) => Err(e),
            },
            Command::ChangeFolder(answer) => {
                match self
                    .planner
                    .choose_working_directory(&TypedFolder(answer))
                    .await
                {
                    Ok(true) => Ok(()),
                    Ok(false) => Err("Folder unchanged".to_string()),
                    Err(e) => Err(e.to_string()),
                }
            }
            Command::Reload => {
                self.planner.reload().await;
                Ok(())
            }
            Command::Help => Err(HELP.to_string()),
            Command::Quit => return false,
        };

        self.status = result.err();
        true
    }

    fn event_id(&self, n: usize) -> Result<uuid::Uuid, String> {
        self.planner
            .session()
            .events()
            .get(n - 1)
            .map(|e| e.id)
            .ok_or_else(|| format!("No event {n}"))
    }

    fn task_id(&self, n: usize) -> Result<uuid::Uuid, String> {
        self.planner
            .session()
            .tasks()
            .get(n - 1)
            .map(|t| t.id)
            .ok_or_else(|| format!("No task {n}"))
    }

    pub fn view(&self) -> String {
        let planner = &self.planner;
        let selected = planner.selected_date();
        let week = planner.week();
        let cache = planner.week_cache();
        let mut lines = vec![
            "Daily Todo".to_string(),
            format!("Folder: {}", planner.working_directory()),
            String::new(),
        ];

        let planned = if cache.is_empty() {
            "nothing planned".to_string()
        } else {
            format!("{} of {} days planned", cache.len(), WEEK_DAYS)
        };
        lines.push(format!("{} ({})", week.label(), planned));

        let strip: Vec<String> = week
            .days()
            .iter()
            .enumerate()
            .map(|(i, day)| {
                let marker = if *day == selected { '>' } else { ' ' };
                let file = if cache.has_file(*day) { '*' } else { ' ' };
                format!("{marker}{} {} {:>2}{file}", i + 1, weekday_label(*day), day.day())
            })
            .collect();
        lines.push(strip.join("  ").trim_end().to_string());
        lines.push(String::new());
        lines.push(display_date(selected));

        let session = planner.session();
        match session.state() {
            SessionState::Unloaded => {}
            SessionState::NotFound => {
                lines.push("No planner file for this day. Type c to create one.".to_string());
            }
            SessionState::LoadError(message) => {
                lines.push(format!("Could not load this day: {message}"));
            }
            SessionState::Loaded => {
                lines.push("Schedule".to_string());
                for (i, item) in session.events().iter().enumerate() {
                    lines.push(format!("{:>2}.{}", i + 1, PlannerWriter::write_event(&item.event)));
                }
                let day = session.to_planner_day();
                lines.push(format!(
                    "Checklist ({}/{} done)",
                    day.completed_count(),
                    day.tasks.len()
                ));
                for (i, item) in session.tasks().iter().enumerate() {
                    lines.push(format!("{:>2}.{}", i + 1, PlannerWriter::write_task(&item.task)));
                }
            }
        }

        if let Some(e) = session.save_error() {
            lines.push(format!("Not saved: {e}"));
        }
        if let Some(status) = &self.status {
            lines.push(status.clone());
        }
        lines.join("\n")
    }
}

pub async fn run(planner: Planner<FsStore>) -> std::io::Result<()> {
    let mut shell = Shell::new(planner);
    let mut lines = BufReader::new(tokio::io::stdin()).lines();

    loop {
        print!("{}\n\n> ", shell.view());
        std::io::stdout().flush()?;

        let Some(line) = lines.next_line().await? else {
            break;
        };
        let command = match Command::parse(&line) {
            Ok(Command::ChangeFolder(None)) => {
                print!("Folder (empty to cancel): ");
                std::io::stdout().flush()?;
                Command::ChangeFolder(lines.next_line().await?)
            }
            Ok(command) => command,
            Err(message) => {
                shell.status = Some(message);
                continue;
            }
        };
        if !shell.update(command).await {
            break;
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_navigation() {
        assert_eq!(Command::parse("n"), Ok(Command::NextWeek));
        assert_eq!(Command::parse(" 3 "), Ok(Command::PickDay(3)));
        assert_eq!(
            Command::parse("g 2025-11-10"),
            Ok(Command::GoTo(NaiveDate::from_ymd_opt(2025, 11, 10).unwrap()))
        );
        assert!(Command::parse("g 11/10/2025").is_err());
        assert!(Command::parse("g +262143-12-31").is_err());
        assert!(Command::parse("g 0999-01-01").is_err());
    }

    #[test]
    fn parse_edits() {
        assert_eq!(
            Command::parse("e 9:00am Team   Sync"),
            Ok(Command::AddEvent {
                time: "9:00am".into(),
                description: "Team   Sync".into()
            })
        );
        assert_eq!(
            Command::parse("ee 2 10:00am Moved"),
            Ok(Command::EditEvent {
                index: 2,
                time: "10:00am".into(),
                description: "Moved".into()
            })
        );
        assert_eq!(
            Command::parse("et 1 Renamed task"),
            Ok(Command::EditTask {
                index: 1,
                text: "Renamed task".into()
            })
        );
        assert_eq!(Command::parse("x 0").ok(), None);
        assert_eq!(Command::parse("e 9:00am").ok(), None);
    }

    #[test]
    fn parse_folder() {
        assert_eq!(Command::parse("f"), Ok(Command::ChangeFolder(None)));
        assert_eq!(
            Command::parse("f /tmp/todos"),
            Ok(Command::ChangeFolder(Some("/tmp/todos".into())))
        );
    }

    #[tokio::test]
    async fn view_shows_week_markers_and_checklist() {
        let dir = tempfile::TempDir::new().unwrap();
        let working_dir = dir.path().to_string_lossy().into_owned();
        std::fs::write(
            dir.path().join("2025-11-11.txt"),
            "11/11/2025\n   9:00am Team Sync\n   - [x] Review PRs\n   - [ ] Ship it",
        )
        .unwrap();
        let settings = dayplanner::config::SettingsStore::new(dir.path().join("settings.json"));
        let date = NaiveDate::from_ymd_opt(2025, 11, 11).unwrap();
        let mut planner = Planner::new(FsStore, settings, working_dir, date);
        planner.select_date(date).await;

        let mut shell = Shell::new(planner);
        let view = shell.view();
        assert!(view.contains("Week of Nov 10 (1 of 5 days planned)"));
        assert!(view.contains(">2 Tue 11*"));
        assert!(view.contains(" 1.   9:00am Team Sync"));
        assert!(view.contains("Checklist (1/2 done)"));
        assert!(view.contains(" 2.   - [ ] Ship it"));

        assert!(shell.update(Command::NextWeek).await);
        let view = shell.view();
        assert!(view.contains("Week of Nov 17 (nothing planned)"));
        assert!(view.contains("No planner file for this day."));
        assert!(!shell.update(Command::Quit).await);
    }

    #[tokio::test]
    async fn typed_folder_rejects_missing_directory() {
        let dir = tempfile::TempDir::new().unwrap();
        let existing = dir.path().to_string_lossy().into_owned();
        assert_eq!(
            TypedFolder(Some(existing.clone())).select_folder().await,
            Some(existing)
        );
        let missing = dir.path().join("missing").to_string_lossy().into_owned();
        assert_eq!(TypedFolder(Some(missing)).select_folder().await, None);
        assert_eq!(TypedFolder(Some("  ".into())).select_folder().await, None);
        assert_eq!(TypedFolder(None).select_folder().await, None);
    }
}
