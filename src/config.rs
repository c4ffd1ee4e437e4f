use serde_json::{Map, Value};
use std::path::{Path, PathBuf};

use crate::error::{PlannerError, Result};

pub const WORKING_DIRECTORY_KEY: &str = "workingDirectory";
pub const DEBUG_LOGGING_KEY: &str = "debugLogging";

fn default_settings_path() -> PathBuf {
    dirs::config_dir()
        .unwrap_or_else(|| PathBuf::from("~/.config"))
        .join("dayplanner")
        .join("settings.json")
}

fn default_working_dir() -> String {
    dirs::document_dir()
        .map(|dir| dir.join("work-todos").to_string_lossy().into_owned())
        .unwrap_or_else(|| "~/Documents/work-todos".to_string())
}

/// A single JSON object on disk, read and written wholesale on every access.
///
/// There is no locking: concurrent read-modify-write cycles are last writer
/// wins. A missing or unparseable file reads as an empty mapping.
#[derive(Debug, Clone)]
pub struct SettingsStore {
    path: PathBuf,
}

impl Default for SettingsStore {
    fn default() -> Self {
        Self::new(default_settings_path())
    }
}

impl SettingsStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub async fn load(&self) -> Map<String, Value> {
        let content = match tokio::fs::read_to_string(&self.path).await {
            Ok(content) => content,
            Err(_) => return Map::new(),
        };
        match serde_json::from_str::<Value>(&content) {
            Ok(Value::Object(map)) => map,
            Ok(_) | Err(_) => {
                log::warn!("Ignoring malformed settings file {}", self.path.display());
                Map::new()
            }
        }
    }

    async fn save(&self, settings: &Map<String, Value>) -> Result<()> {
        let json = serde_json::to_string_pretty(settings)?;
        if let Some(parent) = self.path.parent() {
            tokio::fs::create_dir_all(parent)
                .await
                .map_err(|e| PlannerError::write(parent, e))?;
        }
        tokio::fs::write(&self.path, json)
            .await
            .map_err(|e| PlannerError::write(&self.path, e))
    }

    pub async fn get(&self, key: &str) -> Option<Value> {
        self.load().await.remove(key)
    }

    pub async fn set(&self, key: &str, value: impl Into<Value>) -> Result<()> {
        let mut settings = self.load().await;
        settings.insert(key.to_string(), value.into());
        self.save(&settings).await
    }
}

/// Typed view over the settings the planner cares about.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct PlannerConfig {
    pub working_directory: String,
    pub debug_logging: bool,
}

impl Default for PlannerConfig {
    fn default() -> Self {
        Self {
            working_directory: default_working_dir(),
            debug_logging: false,
        }
    }
}

impl PlannerConfig {
    /// Read the config, falling back to defaults for missing or mistyped keys.
    pub async fn load(settings: &SettingsStore) -> Self {
        let map = settings.load().await;
        let defaults = Self::default();
        Self {
            working_directory: map
                .get(WORKING_DIRECTORY_KEY)
                .and_then(Value::as_str)
                .filter(|s| !s.is_empty())
                .map(str::to_string)
                .unwrap_or(defaults.working_directory),
            debug_logging: map
                .get(DEBUG_LOGGING_KEY)
                .and_then(Value::as_bool)
                .unwrap_or(defaults.debug_logging),
        }
    }
}
