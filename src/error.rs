use std::path::PathBuf;

use thiserror::Error;
use uuid::Uuid;

#[derive(Debug, Error)]
pub enum PlannerError {
    #[error("Failed to read {}: {source}", path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to write {}: {source}", path.display())]
    Write {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Settings error: {0}")]
    Settings(#[from] serde_json::Error),

    #[error("No planner file is loaded for this day")]
    NotLoaded,

    #[error("A planner file already exists for {0}")]
    AlreadyExists(String),

    #[error("Text must not be empty")]
    EmptyText,

    #[error("Text must fit on a single line")]
    MultilineText,

    #[error("Invalid event time {0:?}, expected something like 9:00am")]
    InvalidEventTime(String),

    #[error("Event not found: {0}")]
    EventNotFound(Uuid),

    #[error("Task not found: {0}")]
    TaskNotFound(Uuid),
}

impl PlannerError {
    pub fn read(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Read {
            path: path.into(),
            source,
        }
    }

    pub fn write(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Write {
            path: path.into(),
            source,
        }
    }
}

pub type Result<T, E = PlannerError> = std::result::Result<T, E>;
