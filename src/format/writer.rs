use crate::core::event::PlannerEvent;
use crate::core::planner_day::PlannerDay;
use crate::core::task::PlannerTask;

const INDENT: &str = "   ";

/// Writes planner days to the plain-text planner format.
pub struct PlannerWriter;

impl PlannerWriter {
    /// Render a whole day: date line (if any), then events, then tasks.
    /// Lines are joined with `\n` and no trailing newline is added.
    pub fn write_day(day: &PlannerDay) -> String {
        let mut lines = Vec::with_capacity(1 + day.events.len() + day.tasks.len());

        if !day.date.is_empty() {
            lines.push(day.date.clone());
        }
        lines.extend(day.events.iter().map(Self::write_event));
        lines.extend(day.tasks.iter().map(Self::write_task));

        lines.join("\n")
    }

    /// `   9:00am Team Sync`
    pub fn write_event(event: &PlannerEvent) -> String {
        format!("{INDENT}{} {}", event.time, event.description)
    }

    /// `   - [x] Review PRs`
    pub fn write_task(task: &PlannerTask) -> String {
        let check = if task.completed { "[x]" } else { "[ ]" };
        format!("{INDENT}- {} {}", check, task.text)
    }
}
