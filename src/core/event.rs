use serde::{Deserialize, Serialize};

/// A timestamped schedule entry. `time` is an opaque display string such as `9:00am`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlannerEvent {
    pub time: String,
    pub description: String,
}

impl PlannerEvent {
    pub fn new(time: impl Into<String>, description: impl Into<String>) -> Self {
        Self {
            time: time.into(),
            description: description.into(),
        }
    }
}
