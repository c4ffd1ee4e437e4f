//! In-memory state of the selected day.
//!
//! Transitions here are pure. The [`crate::planner::Planner`] performs the
//! file I/O and feeds the outcome in through the constructors below.

use chrono::NaiveDate;
use uuid::Uuid;

use crate::core::event::PlannerEvent;
use crate::core::planner_day::PlannerDay;
use crate::core::task::PlannerTask;
use crate::error::{PlannerError, Result};
use crate::format::parser::PlannerParser;

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum SessionState {
    #[default]
    Unloaded,
    NotFound,
    Loaded,
    LoadError(String),
}

/// An event tagged with an identifier that lives only as long as the session.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SessionEvent {
    pub id: Uuid,
    pub event: PlannerEvent,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SessionTask {
    pub id: Uuid,
    pub task: PlannerTask,
}

#[derive(Debug, Clone, Default)]
pub struct DaySession {
    date: Option<NaiveDate>,
    state: SessionState,
    /// Date line of the loaded file, written back unchanged on every save.
    file_date: String,
    events: Vec<SessionEvent>,
    tasks: Vec<SessionTask>,
    save_error: Option<String>,
}

impl DaySession {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn not_found(date: NaiveDate) -> Self {
        Self {
            date: Some(date),
            state: SessionState::NotFound,
            ..Self::default()
        }
    }

    pub fn loaded(date: NaiveDate, day: PlannerDay) -> Self {
        Self {
            date: Some(date),
            state: SessionState::Loaded,
            file_date: day.date,
            events: day
                .events
                .into_iter()
                .map(|event| SessionEvent { id: Uuid::new_v4(), event })
                .collect(),
            tasks: day
                .tasks
                .into_iter()
                .map(|task| SessionTask { id: Uuid::new_v4(), task })
                .collect(),
            save_error: None,
        }
    }

    pub fn load_failed(date: NaiveDate, message: impl Into<String>) -> Self {
        Self {
            date: Some(date),
            state: SessionState::LoadError(message.into()),
            ..Self::default()
        }
    }

    pub fn date(&self) -> Option<NaiveDate> {
        self.date
    }

    pub fn state(&self) -> &SessionState {
        &self.state
    }

    pub fn is_loaded(&self) -> bool {
        self.state == SessionState::Loaded
    }

    pub fn load_error(&self) -> Option<&str> {
        match &self.state {
            SessionState::LoadError(message) => Some(message.as_str()),
            _ => None,
        }
    }

    pub fn events(&self) -> &[SessionEvent] {
        &self.events
    }

    pub fn tasks(&self) -> &[SessionTask] {
        &self.tasks
    }

    pub fn save_error(&self) -> Option<&str> {
        self.save_error.as_deref()
    }

    pub fn record_save_result(&mut self, result: &Result<()>) {
        self.save_error = result.as_ref().err().map(|e| e.to_string());
    }

    /// The persisted form of the session, without identifiers.
    pub fn to_planner_day(&self) -> PlannerDay {
        PlannerDay {
            date: self.file_date.clone(),
            events: self.events.iter().map(|e| e.event.clone()).collect(),
            tasks: self.tasks.iter().map(|t| t.task.clone()).collect(),
        }
    }

    fn ensure_loaded(&self) -> Result<()> {
        if self.is_loaded() {
            Ok(())
        } else {
            Err(PlannerError::NotLoaded)
        }
    }

    pub fn add_event(&mut self, time: &str, description: &str) -> Result<Uuid> {
        self.ensure_loaded()?;
        let event = validate_event(time, description)?;
        let id = Uuid::new_v4();
        self.events.push(SessionEvent { id, event });
        Ok(id)
    }

    pub fn update_event(&mut self, id: Uuid, time: &str, description: &str) -> Result<()> {
        self.ensure_loaded()?;
        let event = validate_event(time, description)?;
        let slot = self
            .events
            .iter_mut()
            .find(|e| e.id == id)
            .ok_or(PlannerError::EventNotFound(id))?;
        slot.event = event;
        Ok(())
    }

    pub fn delete_event(&mut self, id: Uuid) -> Result<PlannerEvent> {
        self.ensure_loaded()?;
        let pos = self
            .events
            .iter()
            .position(|e| e.id == id)
            .ok_or(PlannerError::EventNotFound(id))?;
        Ok(self.events.remove(pos).event)
    }

    pub fn add_task(&mut self, text: &str) -> Result<Uuid> {
        self.ensure_loaded()?;
        let text = validate_text(text)?;
        let id = Uuid::new_v4();
        self.tasks.push(SessionTask {
            id,
            task: PlannerTask::new(text),
        });
        Ok(id)
    }

    pub fn update_task(&mut self, id: Uuid, text: &str) -> Result<()> {
        self.ensure_loaded()?;
        let text = validate_text(text)?;
        self.task_mut(id)?.text = text.to_string();
        Ok(())
    }

    /// Flip a task's checkbox and return its new state.
    pub fn toggle_task(&mut self, id: Uuid) -> Result<bool> {
        self.ensure_loaded()?;
        let task = self.task_mut(id)?;
        task.toggle();
        Ok(task.completed)
    }

    pub fn delete_task(&mut self, id: Uuid) -> Result<PlannerTask> {
        self.ensure_loaded()?;
        let pos = self
            .tasks
            .iter()
            .position(|t| t.id == id)
            .ok_or(PlannerError::TaskNotFound(id))?;
        Ok(self.tasks.remove(pos).task)
    }

    fn task_mut(&mut self, id: Uuid) -> Result<&mut PlannerTask> {
        self.tasks
            .iter_mut()
            .find(|t| t.id == id)
            .map(|t| &mut t.task)
            .ok_or(PlannerError::TaskNotFound(id))
    }
}

/// Trimmed single-line text, or an error. Anything with a newline would
/// split into separate records on the next load.
fn validate_text(text: &str) -> Result<&str> {
    let text = text.trim();
    if text.is_empty() {
        return Err(PlannerError::EmptyText);
    }
    if text.contains(['\n', '\r']) {
        return Err(PlannerError::MultilineText);
    }
    Ok(text)
}

fn validate_event(time: &str, description: &str) -> Result<PlannerEvent> {
    let time = validate_text(time)?;
    let description = validate_text(description)?;
    if !PlannerParser::is_event_time(time) {
        return Err(PlannerError::InvalidEventTime(time.to_string()));
    }
    Ok(PlannerEvent::new(time, description))
}
