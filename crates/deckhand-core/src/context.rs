// SPDX-License-Identifier: AGPL-3.0
// Deckhand Core - Application context
//
// Built once per session and passed to every screen.

use crate::editor::ChecklistEditor;
use crate::overview::ChecklistOverview;
use crate::pre_departure::{ConfirmationTiming, PreDepartureScreen};
use crate::settings::ChecklistSettings;
use crate::store::ChecklistStore;
use crate::types::AppError;
use std::sync::Arc;
use tokio::runtime::Handle;

pub struct AppContext {
    store: Arc<ChecklistStore>,
    settings: ChecklistSettings,
    runtime: Handle,
}

impl AppContext {
    /// Create the session store according to `settings`
    pub fn new(settings: ChecklistSettings, runtime: Handle) -> Self {
        let store = if settings.load_sample_data {
            ChecklistStore::with_sample_data()
        } else {
            ChecklistStore::default()
        };
        tracing::info!(
            "Session started with {} documents and {} checklists",
            store.documents().len(),
            store.checklists().len()
        );

        Self {
            store: Arc::new(store),
            settings,
            runtime,
        }
    }

    /// Same as [`AppContext::new`] on the runtime of the calling task
    pub fn on_current_runtime(settings: ChecklistSettings) -> Result<Self, AppError> {
        let runtime = Handle::try_current().map_err(|_| AppError::NoRuntime)?;
        Ok(Self::new(settings, runtime))
    }

    pub fn store(&self) -> &Arc<ChecklistStore> {
        &self.store
    }

    pub fn settings(&self) -> &ChecklistSettings {
        &self.settings
    }

    pub fn pre_departure_screen(&self) -> PreDepartureScreen {
        PreDepartureScreen::new(
            self.store.clone(),
            self.runtime.clone(),
            ConfirmationTiming::from(&self.settings),
        )
    }

    pub fn overview(&self) -> ChecklistOverview {
        ChecklistOverview::new(self.store.clone())
    }

    pub fn editor(&self, title: impl Into<String>) -> ChecklistEditor {
        ChecklistEditor::new(self.store.clone(), title)
            .with_date_format(self.settings.date_format.clone())
    }
}
