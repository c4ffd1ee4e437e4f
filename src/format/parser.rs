use regex::Regex;
use std::sync::LazyLock;

use crate::core::event::PlannerEvent;
use crate::core::planner_day::PlannerDay;
use crate::core::task::PlannerTask;

static DATE_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[0-9]{1,2}/[0-9]{1,2}/[0-9]{4}$").unwrap());

static EVENT_TIME_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[0-9]{1,2}:[0-9]{2}(?i:am|pm)$").unwrap());

static EVENT_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^(?P<time>[0-9]{1,2}:[0-9]{2}(?i:am|pm))\s+(?P<description>.+)$").unwrap()
});

static TASK_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^- \[(?P<check>[ xX])\]\s+(?P<text>.+)$").unwrap());

/// One classified line of a planner file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PlannerLine {
    Date(String),
    Event(PlannerEvent),
    Task(PlannerTask),
}

pub struct PlannerParser;

impl PlannerParser {
    /// Parse a planner file. Never fails: lines that match no rule are dropped.
    pub fn parse(input: &str) -> PlannerDay {
        let mut day = PlannerDay::default();
        let mut dropped = 0usize;

        for raw in input.split('\n') {
            let line = raw.trim();
            if line.is_empty() {
                continue;
            }
            match Self::classify(line, day.date.is_empty()) {
                Some(PlannerLine::Date(date)) => day.date = date,
                Some(PlannerLine::Event(event)) => day.events.push(event),
                Some(PlannerLine::Task(task)) => day.tasks.push(task),
                None => dropped += 1,
            }
        }

        if dropped > 0 {
            log::debug!("Dropped {} unrecognized planner line(s)", dropped);
        }

        day
    }

    /// Classify a single trimmed line. The date rule is only tried while
    /// `date_unset`, so a second date-shaped line matches nothing.
    pub fn classify(line: &str, date_unset: bool) -> Option<PlannerLine> {
        if date_unset && DATE_RE.is_match(line) {
            return Some(PlannerLine::Date(line.to_string()));
        }

        if let Some(caps) = EVENT_RE.captures(line) {
            return Some(PlannerLine::Event(PlannerEvent {
                time: caps["time"].to_string(),
                description: caps["description"].trim().to_string(),
            }));
        }

        TASK_RE.captures(line).map(|caps| {
            PlannerLine::Task(PlannerTask {
                text: caps["text"].to_string(),
                completed: &caps["check"] != " ",
            })
        })
    }

    /// Whether `time` is a valid event time token (`H:MMam`, `HH:MMpm`, ...).
    pub fn is_event_time(time: &str) -> bool {
        EVENT_TIME_RE.is_match(time)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_full_day() {
        let input = "\
11/10/2025
   09:00am Team Sync
   11:00am Chelsea/Skyler 1:1
   - [ ] Review PRs
   - [x] Update documentation";
        let day = PlannerParser::parse(input);
        assert_eq!(day.date, "11/10/2025");
        assert_eq!(
            day.events,
            vec![
                PlannerEvent::new("09:00am", "Team Sync"),
                PlannerEvent::new("11:00am", "Chelsea/Skyler 1:1"),
            ]
        );
        assert_eq!(day.tasks.len(), 2);
        assert_eq!(day.tasks[0], PlannerTask::new("Review PRs"));
        assert!(day.tasks[1].completed);
    }

    #[test]
    fn blank_lines_do_not_matter() {
        let dense = "1/2/2025\n9:00am Standup\n- [ ] Ship it\n";
        let sparse = "\n1/2/2025\n\n   \n9:00am Standup\n\n\n- [ ] Ship it\n\n";
        assert_eq!(PlannerParser::parse(dense), PlannerParser::parse(sparse));
    }

    #[test]
    fn second_date_line_is_dropped() {
        let day = PlannerParser::parse("1/1/2025\n1/2/2025\n");
        assert_eq!(day.date, "1/1/2025");
        assert!(day.events.is_empty());
        assert!(day.tasks.is_empty());
    }

    #[test]
    fn event_needs_two_digit_minutes() {
        assert!(PlannerParser::parse("9:5am x").events.is_empty());

        let day = PlannerParser::parse("09:05am hi");
        assert_eq!(day.events, vec![PlannerEvent::new("09:05am", "hi")]);
    }

    #[test]
    fn event_keeps_time_case_and_trims_description() {
        let day = PlannerParser::parse("  3:30PM \t  Dentist   ");
        assert_eq!(day.events, vec![PlannerEvent::new("3:30PM", "Dentist")]);
    }

    #[test]
    fn event_without_description_is_dropped() {
        assert!(PlannerParser::parse("10:00am").events.is_empty());
        assert!(PlannerParser::parse("10:00am    ").events.is_empty());
        assert!(PlannerParser::parse("10:00 Meeting").events.is_empty());
    }

    #[test]
    fn task_checkbox_variants() {
        let day = PlannerParser::parse("- [X] Done\n- [x] Done\n- [ ] Todo\n- [y] Bad");
        assert_eq!(
            day.tasks,
            vec![
                PlannerTask { text: "Done".into(), completed: true },
                PlannerTask { text: "Done".into(), completed: true },
                PlannerTask { text: "Todo".into(), completed: false },
            ]
        );
    }

    #[test]
    fn task_text_keeps_inner_spacing() {
        let day = PlannerParser::parse("- [ ]   Call  mom");
        assert_eq!(day.tasks[0].text, "Call  mom");
    }

    #[test]
    fn interleaved_lines_keep_file_order() {
        let input = "- [ ] First\n8:00am Early\n12/31/2025\n- [x] Second\n1:00pm Late";
        let day = PlannerParser::parse(input);
        assert_eq!(day.date, "12/31/2025");
        assert_eq!(day.tasks[0].text, "First");
        assert_eq!(day.tasks[1].text, "Second");
        assert_eq!(day.events[0].time, "8:00am");
        assert_eq!(day.events[1].time, "1:00pm");
    }

    #[test]
    fn garbage_is_ignored() {
        let day = PlannerParser::parse("hello\n* TODO org heading\n2025-11-10\n-[ ] no space");
        assert_eq!(day, PlannerDay::default());
    }

    #[test]
    fn date_rule_precedes_event_rule_only_once() {
        assert_eq!(
            PlannerParser::classify("1/1/2025", true),
            Some(PlannerLine::Date("1/1/2025".into()))
        );
        assert_eq!(PlannerParser::classify("1/1/2025", false), None);
    }

    #[test]
    fn only_ascii_digits_count() {
        let day = PlannerParser::parse("١/١/٢٠٢٥\n١٠:٣٠am Meeting\n１０:３０am Standup\n");
        assert!(day.date.is_empty());
        assert!(day.events.is_empty());
        assert!(!PlannerParser::is_event_time("١٠:٣٠am"));
    }

    #[test]
    fn event_time_token() {
        assert!(PlannerParser::is_event_time("9:00am"));
        assert!(PlannerParser::is_event_time("12:45Pm"));
        assert!(!PlannerParser::is_event_time("9:00"));
        assert!(!PlannerParser::is_event_time("9:0am"));
        assert!(!PlannerParser::is_event_time("9:00am extra"));
    }
}
