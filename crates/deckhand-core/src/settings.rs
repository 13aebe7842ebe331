// SPDX-License-Identifier: AGPL-3.0
// Deckhand Core - Settings persistence
//
// Settings are stored in a local JSON file. Checklist data itself is
// never written to disk.

use crate::types::AppError;
use chrono::format::{Item, StrftimeItems};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::PathBuf;
use std::sync::{PoisonError, RwLock};
use std::time::Duration;

/// Longest allowed confirmation delay
const MAX_DELAY_MS: u64 = 60_000;

/// Session settings (GUI-agnostic)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ChecklistSettings {
    /// chrono format string for checklist creation dates
    #[serde(default = "default_date_format")]
    pub date_format: String,
    /// Delay between confirming a submission and committing the status
    #[serde(default = "default_transition_ms")]
    pub submission_transition_ms: u64,
    /// Delay between the commit and dismissing the confirmation
    #[serde(default = "default_transition_ms")]
    pub submission_dismiss_ms: u64,
    /// Start the session with the standard documents and sample checklists
    #[serde(default = "default_load_sample_data")]
    pub load_sample_data: bool,
}

fn default_date_format() -> String {
    "%d.%m.%y".to_string()
}

fn default_transition_ms() -> u64 {
    500
}

fn default_load_sample_data() -> bool {
    true
}

impl Default for ChecklistSettings {
    fn default() -> Self {
        Self {
            date_format: default_date_format(),
            submission_transition_ms: default_transition_ms(),
            submission_dismiss_ms: default_transition_ms(),
            load_sample_data: default_load_sample_data(),
        }
    }
}

impl ChecklistSettings {
    pub fn submission_transition(&self) -> Duration {
        Duration::from_millis(self.submission_transition_ms)
    }

    pub fn submission_dismiss(&self) -> Duration {
        Duration::from_millis(self.submission_dismiss_ms)
    }

    /// Reject values the session cannot work with
    pub fn validate(&self) -> Result<(), AppError> {
        if self.date_format.trim().is_empty() {
            return Err(AppError::InvalidConfig(
                "date format must not be empty".to_string(),
            ));
        }
        if StrftimeItems::new(&self.date_format).any(|item| matches!(item, Item::Error)) {
            return Err(AppError::InvalidConfig(format!(
                "invalid date format: {}",
                self.date_format
            )));
        }
        for (name, value) in [
            ("submissionTransitionMs", self.submission_transition_ms),
            ("submissionDismissMs", self.submission_dismiss_ms),
        ] {
            if value > MAX_DELAY_MS {
                return Err(AppError::InvalidConfig(format!(
                    "{} must be at most {} ms, got {}",
                    name, MAX_DELAY_MS, value
                )));
            }
        }
        Ok(())
    }
}

/// In-memory cache of settings, persisted to disk on changes
pub struct SettingsStore {
    settings: RwLock<ChecklistSettings>,
    file_path: PathBuf,
}

impl SettingsStore {
    /// Open the settings file in the user's config directory
    pub fn new() -> Result<Self, AppError> {
        let file_path = Self::get_settings_path()?;
        Self::at_path(file_path)
    }

    /// Open (or create) a settings file at an explicit location
    pub fn at_path(file_path: impl Into<PathBuf>) -> Result<Self, AppError> {
        let file_path = file_path.into();
        tracing::info!("Settings file path: {:?}", file_path);

        let settings = if file_path.exists() {
            tracing::info!("Loading settings from disk");
            let content = fs::read_to_string(&file_path)
                .map_err(|e| AppError::FileIo(format!("Failed to read settings: {}", e)))?;

            match serde_json::from_str::<ChecklistSettings>(&content) {
                Ok(settings) => match settings.validate() {
                    Ok(()) => settings,
                    Err(e) => {
                        tracing::warn!("Invalid settings, using defaults: {}", e);
                        ChecklistSettings::default()
                    }
                },
                Err(e) => {
                    tracing::warn!("Failed to parse settings, using defaults: {}", e);
                    ChecklistSettings::default()
                }
            }
        } else {
            tracing::info!("No settings file found, using defaults");
            ChecklistSettings::default()
        };

        let store = Self {
            settings: RwLock::new(settings),
            file_path,
        };

        if !store.file_path.exists() {
            tracing::info!("Creating initial settings file");
            store.persist()?;
        }

        Ok(store)
    }

    fn get_settings_path() -> Result<PathBuf, AppError> {
        let config_dir = directories::ProjectDirs::from("com", "deckhand", "checklist")
            .ok_or_else(|| AppError::FileIo("Could not determine config directory".to_string()))?
            .config_dir()
            .to_path_buf();

        Ok(config_dir.join("settings.json"))
    }

    fn persist(&self) -> Result<(), AppError> {
        if let Some(dir) = self.file_path.parent() {
            fs::create_dir_all(dir)
                .map_err(|e| AppError::FileIo(format!("Failed to create config dir: {}", e)))?;
        }

        let settings = self.get();
        let content = serde_json::to_string_pretty(&settings)
            .map_err(|e| AppError::Serialization(format!("Failed to serialize settings: {}", e)))?;

        fs::write(&self.file_path, content)
            .map_err(|e| AppError::FileIo(format!("Failed to write settings: {}", e)))?;

        Ok(())
    }

    /// Get current settings
    pub fn get(&self) -> ChecklistSettings {
        self.settings
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    /// Validate, replace and persist settings
    pub fn update(&self, new_settings: ChecklistSettings) -> Result<(), AppError> {
        new_settings.validate()?;
        tracing::info!("Updating settings");
        {
            let mut settings = self.settings.write().unwrap_or_else(PoisonError::into_inner);
            *settings = new_settings;
        }

        let result = self.persist();
        if let Err(e) = &result {
            tracing::error!("Failed to persist settings: {}", e);
        }
        result
    }
}
