// SPDX-License-Identifier: AGPL-3.0
// Deckhand Core - Personal checklist overview screen logic

use crate::progress;
use crate::store::ChecklistStore;
use crate::types::{ChecklistStatus, PersonalChecklist};
use std::sync::Arc;

/// One row of the "My Checklists" list
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChecklistRow {
    pub id: String,
    pub title: String,
    pub date_label: String,
    pub last_item_label: String,
    pub status: ChecklistStatus,
}

impl From<&PersonalChecklist> for ChecklistRow {
    fn from(checklist: &PersonalChecklist) -> Self {
        Self {
            id: checklist.id.clone(),
            title: checklist.title.clone(),
            date_label: format!("Date created: {}", checklist.date),
            last_item_label: format!("Last item added: {}", checklist.last_item),
            status: checklist.status,
        }
    }
}

#[derive(Debug, Clone)]
pub enum OverviewMessage {
    OpenPrompt,
    NameChanged(String),
    Proceed,
    CancelPrompt,
    Delete(String),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum OverviewOutcome {
    Stay,
    /// Navigate to the item editor with this title
    OpenEditor { title: String },
}

pub struct ChecklistOverview {
    store: Arc<ChecklistStore>,
    /// Name typed into the new-checklist prompt, `None` while closed
    prompt: Option<String>,
}

impl ChecklistOverview {
    pub fn new(store: Arc<ChecklistStore>) -> Self {
        Self {
            store,
            prompt: None,
        }
    }

    pub fn rows(&self) -> Vec<ChecklistRow> {
        self.store.checklists().iter().map(ChecklistRow::from).collect()
    }

    pub fn progress(&self) -> f64 {
        self.store.progress()
    }

    pub fn progress_label(&self) -> String {
        format!("{}%", progress::percent(self.progress()))
    }

    pub fn prompt(&self) -> Option<&str> {
        self.prompt.as_deref()
    }

    pub fn update(&mut self, message: OverviewMessage) -> OverviewOutcome {
        match message {
            OverviewMessage::OpenPrompt => self.open_prompt(),
            OverviewMessage::NameChanged(name) => self.set_name(name),
            OverviewMessage::Proceed => {
                if let Some(title) = self.proceed() {
                    return OverviewOutcome::OpenEditor { title };
                }
            }
            OverviewMessage::CancelPrompt => self.cancel_prompt(),
            OverviewMessage::Delete(id) => self.delete(&id),
        }
        OverviewOutcome::Stay
    }

    pub fn open_prompt(&mut self) {
        self.prompt.get_or_insert_with(String::new);
    }

    pub fn set_name(&mut self, name: impl Into<String>) {
        if let Some(prompt) = self.prompt.as_mut() {
            *prompt = name.into();
        }
    }

    /// The Done button is shown only for a non-blank name
    pub fn can_proceed(&self) -> bool {
        self.prompt
            .as_deref()
            .is_some_and(|name| !name.trim().is_empty())
    }

    /// Close the prompt and return the trimmed title for the editor
    pub fn proceed(&mut self) -> Option<String> {
        if !self.can_proceed() {
            return None;
        }
        self.prompt.take().map(|name| name.trim().to_string())
    }

    pub fn cancel_prompt(&mut self) {
        self.prompt = None;
    }

    /// Delete without confirmation
    pub fn delete(&self, id: &str) {
        self.store.delete_checklist(id);
    }
}
