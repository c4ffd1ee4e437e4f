use chrono::{Datelike, Duration, NaiveDate};

use super::date_key::short_label;

/// Number of weekdays shown in the week strip (Monday through Friday).
pub const WEEK_DAYS: usize = 5;

/// `date` moved by `days`, pinned to chrono's supported range at either end.
fn shift(date: NaiveDate, days: i64) -> NaiveDate {
    date.checked_add_signed(Duration::days(days))
        .unwrap_or(if days < 0 { NaiveDate::MIN } else { NaiveDate::MAX })
}

/// The visible Monday–Friday window.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Week {
    monday: NaiveDate,
}

impl Week {
    /// The window for `date`. Days are counted from Sunday, so a Sunday
    /// belongs to the week that starts the following day.
    pub fn containing(date: NaiveDate) -> Self {
        let from_sunday = date.weekday().num_days_from_sunday() as i64;
        Self {
            monday: shift(date, 1 - from_sunday),
        }
    }

    pub fn monday(&self) -> NaiveDate {
        self.monday
    }

    pub fn days(&self) -> [NaiveDate; WEEK_DAYS] {
        std::array::from_fn(|i| shift(self.monday, i as i64))
    }

    pub fn contains(&self, date: NaiveDate) -> bool {
        self.slot(date).is_some()
    }

    /// Position of `date` within the window, Monday being 0.
    pub fn slot(&self, date: NaiveDate) -> Option<usize> {
        let offset = (date - self.monday).num_days();
        (0..WEEK_DAYS as i64).contains(&offset).then_some(offset as usize)
    }

    pub fn prev(&self) -> Self {
        Self {
            monday: shift(self.monday, -7),
        }
    }

    pub fn next(&self) -> Self {
        Self {
            monday: shift(self.monday, 7),
        }
    }

    /// `Week of Nov 10`
    pub fn label(&self) -> String {
        format!("Week of {}", short_label(self.monday))
    }
}
