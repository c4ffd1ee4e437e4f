use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use super::date_key::display_date;
use super::event::PlannerEvent;
use super::task::PlannerTask;

/// Everything stored in one planner file.
///
/// `date` is the display form written when the file was created (`M/D/YYYY`).
/// It is never recomputed from the file name.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlannerDay {
    pub date: String,
    pub events: Vec<PlannerEvent>,
    pub tasks: Vec<PlannerTask>,
}

impl PlannerDay {
    pub fn new(date: impl Into<String>) -> Self {
        Self {
            date: date.into(),
            events: Vec::new(),
            tasks: Vec::new(),
        }
    }

    /// An empty day stamped with the display form of `date`.
    pub fn for_date(date: NaiveDate) -> Self {
        Self::new(display_date(date))
    }

    pub fn is_empty(&self) -> bool {
        self.events.is_empty() && self.tasks.is_empty()
    }

    pub fn completed_count(&self) -> usize {
        self.tasks.iter().filter(|t| t.completed).count()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn for_date_uses_unpadded_display_form() {
        let day = PlannerDay::for_date(NaiveDate::from_ymd_opt(2025, 3, 7).unwrap());
        assert_eq!(day.date, "3/7/2025");
        assert!(day.is_empty());
    }

    #[test]
    fn completed_count_ignores_open_tasks() {
        let mut day = PlannerDay::new("11/10/2025");
        day.tasks.push(PlannerTask::new("Review PRs"));
        let mut done = PlannerTask::new("Update documentation");
        done.toggle();
        day.tasks.push(done);
        assert_eq!(day.completed_count(), 1);
    }
}
