use chrono::NaiveDate;
use std::path::PathBuf;
use uuid::Uuid;

use crate::cache::WeekCache;
use crate::config::{PlannerConfig, SettingsStore, WORKING_DIRECTORY_KEY};
use crate::core::date_key::{DateKey, planner_path};
use crate::core::planner_day::PlannerDay;
use crate::core::week::Week;
use crate::error::{PlannerError, Result};
use crate::session::{DaySession, SessionState};
use crate::storage::{FolderPicker, PlannerStore};

/// Drives navigation, the week cache and the day session against a store.
///
/// Every mutation of a loaded day rewrites its whole file. Write failures are
/// logged and kept on the session; the edit itself is never rolled back.
pub struct Planner<S: PlannerStore> {
    store: S,
    settings: SettingsStore,
    working_directory: String,
    selected: NaiveDate,
    week_cache: WeekCache,
    session: DaySession,
}

impl<S: PlannerStore> Planner<S> {
    pub fn new(
        store: S,
        settings: SettingsStore,
        working_directory: impl Into<String>,
        selected: NaiveDate,
    ) -> Self {
        Self {
            store,
            settings,
            working_directory: working_directory.into(),
            selected,
            week_cache: WeekCache::new(),
            session: DaySession::new(),
        }
    }

    /// Restore the working directory from settings and load `date`.
    pub async fn open(store: S, settings: SettingsStore, date: NaiveDate) -> Self {
        let config = PlannerConfig::load(&settings).await;
        log::info!("Working directory: {}", config.working_directory);
        let mut planner = Self::new(store, settings, config.working_directory, date);
        planner.select_date(date).await;
        planner
    }

    pub fn working_directory(&self) -> &str {
        &self.working_directory
    }

    pub fn selected_date(&self) -> NaiveDate {
        self.selected
    }

    pub fn week(&self) -> Week {
        Week::containing(self.selected)
    }

    pub fn session(&self) -> &DaySession {
        &self.session
    }

    pub fn week_cache(&self) -> &WeekCache {
        &self.week_cache
    }

    pub fn has_file(&self, date: NaiveDate) -> bool {
        self.week_cache.has_file(date)
    }

    pub fn day_path(&self, date: NaiveDate) -> PathBuf {
        planner_path(&self.working_directory, date)
    }

    /// Select a day. The week cache is rebuilt when the visible week changed,
    /// and the day is always re-read from disk.
    pub async fn select_date(&mut self, date: NaiveDate) {
        self.selected = date;
        if !self.week_cache.is_current(self.week(), &self.working_directory) {
            self.refresh_week_cache().await;
        }
        self.load_selected().await;
    }

    /// Same weekday in the following week.
    pub async fn next_week(&mut self) {
        let week = self.week();
        let slot = week.slot(self.selected).unwrap_or(0);
        self.select_date(week.next().days()[slot]).await;
    }

    /// Same weekday in the previous week.
    pub async fn prev_week(&mut self) {
        let week = self.week();
        let slot = week.slot(self.selected).unwrap_or(0);
        self.select_date(week.prev().days()[slot]).await;
    }

    pub async fn reload(&mut self) {
        self.load_selected().await;
    }

    pub async fn refresh_week_cache(&mut self) {
        let week = self.week();
        self.week_cache
            .refresh(&self.store, &self.working_directory, week)
            .await;
    }

    /// Switch to another folder, remember it, and reload from there.
    ///
    /// The switch happens even if the setting cannot be saved; the save
    /// error is returned so the caller can report it.
    pub async fn set_working_directory(&mut self, dir: impl Into<String>) -> Result<()> {
        let dir = dir.into();
        let persisted = self.settings.set(WORKING_DIRECTORY_KEY, dir.clone()).await;
        if let Err(e) = &persisted {
            log::error!("Failed to save working directory: {}", e);
        }
        log::info!("Working directory changed to {}", dir);
        self.working_directory = dir;
        self.refresh_week_cache().await;
        self.load_selected().await;
        persisted
    }

    /// Ask `picker` for a folder. Returns `Ok(false)` if the user cancelled.
    pub async fn choose_working_directory<P: FolderPicker>(&mut self, picker: &P) -> Result<bool> {
        match picker.select_folder().await {
            Some(dir) => self.set_working_directory(dir).await.map(|_| true),
            None => {
                log::debug!("Folder selection cancelled");
                Ok(false)
            }
        }
    }

    /// Create an empty planner file for the selected day.
    pub async fn create_day(&mut self) -> Result<()> {
        let date = self.selected;
        match self.session.state() {
            SessionState::NotFound => {}
            SessionState::Loaded | SessionState::LoadError(_) => {
                return Err(PlannerError::AlreadyExists(DateKey::from_date(date).to_string()));
            }
            SessionState::Unloaded => return Err(PlannerError::NotLoaded),
        }

        let path = self.day_path(date);
        let day = PlannerDay::for_date(date);
        self.store.write_planner_file(&path, &day).await?;
        log::info!("Created {}", path.display());

        self.session = DaySession::loaded(date, day);
        self.refresh_week_cache().await;
        Ok(())
    }

    pub async fn add_event(&mut self, time: &str, description: &str) -> Result<Uuid> {
        let id = self.session.add_event(time, description)?;
        self.save().await;
        Ok(id)
    }

    pub async fn update_event(&mut self, id: Uuid, time: &str, description: &str) -> Result<()> {
        self.session.update_event(id, time, description)?;
        self.save().await;
        Ok(())
    }

    pub async fn delete_event(&mut self, id: Uuid) -> Result<()> {
        self.session.delete_event(id)?;
        self.save().await;
        Ok(())
    }

    pub async fn add_task(&mut self, text: &str) -> Result<Uuid> {
        let id = self.session.add_task(text)?;
        self.save().await;
        Ok(id)
    }

    pub async fn update_task(&mut self, id: Uuid, text: &str) -> Result<()> {
        self.session.update_task(id, text)?;
        self.save().await;
        Ok(())
    }

    pub async fn toggle_task(&mut self, id: Uuid) -> Result<bool> {
        let completed = self.session.toggle_task(id)?;
        self.save().await;
        Ok(completed)
    }

    pub async fn delete_task(&mut self, id: Uuid) -> Result<()> {
        self.session.delete_task(id)?;
        self.save().await;
        Ok(())
    }

    async fn load_selected(&mut self) {
        let date = self.selected;
        let path = self.day_path(date);

        self.session = match self.store.check_file_exists(&path).await {
            Ok(false) => {
                log::debug!("No planner file at {}", path.display());
                DaySession::not_found(date)
            }
            Ok(true) => match self.store.read_planner_file(&path).await {
                Ok(day) => {
                    log::debug!(
                        "Loaded {} ({} events, {} tasks)",
                        path.display(),
                        day.events.len(),
                        day.tasks.len()
                    );
                    DaySession::loaded(date, day)
                }
                Err(e) => {
                    log::error!("{}", e);
                    DaySession::load_failed(date, e.to_string())
                }
            },
            Err(e) => {
                log::error!("{}", e);
                DaySession::load_failed(date, e.to_string())
            }
        };
    }

    async fn save(&mut self) {
        let Some(date) = self.session.date() else {
            return;
        };
        let path = self.day_path(date);
        let day = self.session.to_planner_day();
        let result = self.store.write_planner_file(&path, &day).await;
        if let Err(e) = &result {
            log::error!("Failed to save day plan: {}", e);
        }
        self.session.record_save_result(&result);
    }
}
