use chrono::{Datelike, NaiveDate};
use std::fmt;
use std::path::PathBuf;

/// Normalized `YYYY-MM-DD` identifier for a calendar day.
///
/// Used both as the planner file stem and as the week cache key, so both
/// are always derived through [`DateKey::from_date`].
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct DateKey(String);

impl DateKey {
    pub fn from_date(date: NaiveDate) -> Self {
        Self(format!(
            "{:04}-{:02}-{:02}",
            date.year(),
            date.month(),
            date.day()
        ))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for DateKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Path of the planner file for `date`: `<working_dir>/YYYY-MM-DD.txt`.
pub fn planner_path(working_dir: &str, date: NaiveDate) -> PathBuf {
    PathBuf::from(format!("{}/{}.txt", working_dir, DateKey::from_date(date)))
}

/// `M/D/YYYY`, the form stored on a planner file's date line.
pub fn display_date(date: NaiveDate) -> String {
    date.format("%-m/%-d/%Y").to_string()
}

/// `Nov 10`
pub fn short_label(date: NaiveDate) -> String {
    date.format("%b %-d").to_string()
}

/// `Mon`
pub fn weekday_label(date: NaiveDate) -> String {
    date.format("%a").to_string()
}
