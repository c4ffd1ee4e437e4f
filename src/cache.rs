use chrono::NaiveDate;
use futures::future::join_all;
use std::collections::HashSet;

use crate::core::date_key::{DateKey, planner_path};
use crate::core::week::Week;
use crate::storage::PlannerStore;

/// Which days of the visible week already have a planner file.
///
/// Only sound as of the last [`WeekCache::refresh`]; files created behind
/// the planner's back are not noticed until the next refresh.
#[derive(Debug, Clone, Default)]
pub struct WeekCache {
    window: Option<(Week, String)>,
    existing: HashSet<DateKey>,
}

impl WeekCache {
    pub fn new() -> Self {
        Self::default()
    }

    /// True when the cache was last built for this week and directory.
    pub fn is_current(&self, week: Week, working_dir: &str) -> bool {
        self.window
            .as_ref()
            .is_some_and(|(w, dir)| *w == week && dir == working_dir)
    }

    pub fn contains(&self, key: &DateKey) -> bool {
        self.existing.contains(key)
    }

    pub fn has_file(&self, date: NaiveDate) -> bool {
        self.contains(&DateKey::from_date(date))
    }

    pub fn len(&self) -> usize {
        self.existing.len()
    }

    pub fn is_empty(&self) -> bool {
        self.existing.is_empty()
    }

    /// Replace the cached set with the result of checking every weekday.
    ///
    /// Checks run concurrently. A failed check counts as "no file" for that
    /// day only.
    pub async fn refresh<S: PlannerStore>(&mut self, store: &S, working_dir: &str, week: Week) {
        let days = week.days();
        let paths: Vec<_> = days.iter().map(|d| planner_path(working_dir, *d)).collect();
        let results = join_all(paths.iter().map(|p| store.check_file_exists(p))).await;

        let mut existing = HashSet::new();
        for ((day, path), result) in days.iter().zip(&paths).zip(results) {
            match result {
                Ok(true) => {
                    existing.insert(DateKey::from_date(*day));
                }
                Ok(false) => {}
                Err(e) => log::warn!("Existence check failed for {}: {}", path.display(), e),
            }
        }

        log::debug!(
            "{}: {} of {} days have planner files",
            week.label(),
            existing.len(),
            days.len()
        );
        self.existing = existing;
        self.window = Some((week, working_dir.to_string()));
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::planner_day::PlannerDay;
    use crate::error::{PlannerError, Result};
    use std::path::{Path, PathBuf};

    /// Existence answers from fixed sets; paths in `failing` error out.
    struct FixedStore {
        present: HashSet<PathBuf>,
        failing: HashSet<PathBuf>,
    }

    impl PlannerStore for FixedStore {
        async fn check_file_exists(&self, path: &Path) -> Result<bool> {
            if self.failing.contains(path) {
                return Err(PlannerError::read(
                    path,
                    std::io::Error::new(std::io::ErrorKind::PermissionDenied, "denied"),
                ));
            }
            Ok(self.present.contains(path))
        }

        async fn read_planner_file(&self, _path: &Path) -> Result<PlannerDay> {
            Ok(PlannerDay::default())
        }

        async fn write_planner_file(&self, _path: &Path, _day: &PlannerDay) -> Result<()> {
            Ok(())
        }
    }

    fn nov(day: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(2025, 11, day).unwrap()
    }

    #[tokio::test]
    async fn refresh_collects_existing_days() {
        let store = FixedStore {
            present: [planner_path("todos", nov(10)), planner_path("todos", nov(13))].into(),
            failing: HashSet::new(),
        };
        let week = Week::containing(nov(12));
        let mut cache = WeekCache::new();
        assert!(!cache.is_current(week, "todos"));

        cache.refresh(&store, "todos", week).await;

        assert!(cache.is_current(week, "todos"));
        assert!(!cache.is_current(week, "other"));
        assert!(!cache.is_current(week.next(), "todos"));
        assert_eq!(cache.len(), 2);
        assert!(cache.has_file(nov(10)));
        assert!(cache.has_file(nov(13)));
        assert!(!cache.has_file(nov(11)));
    }

    #[tokio::test]
    async fn one_failed_check_does_not_spoil_the_rest() {
        let days = Week::containing(nov(10)).days();
        let store = FixedStore {
            present: days.iter().map(|d| planner_path("todos", *d)).collect(),
            failing: [planner_path("todos", nov(12))].into(),
        };
        let mut cache = WeekCache::new();
        cache.refresh(&store, "todos", Week::containing(nov(10))).await;

        assert_eq!(cache.len(), 4);
        assert!(!cache.has_file(nov(12)));
        for day in [10, 11, 13, 14] {
            assert!(cache.has_file(nov(day)), "day {day} should be cached");
        }
    }

    #[tokio::test]
    async fn refresh_replaces_previous_contents() {
        let store = FixedStore {
            present: [planner_path("todos", nov(10))].into(),
            failing: HashSet::new(),
        };
        let mut cache = WeekCache::new();
        cache.refresh(&store, "todos", Week::containing(nov(10))).await;
        assert!(cache.has_file(nov(10)));

        cache.refresh(&store, "todos", Week::containing(nov(17))).await;
        assert!(cache.is_empty());
    }
}
