// SPDX-License-Identifier: AGPL-3.0
// Deckhand Core - Personal checklist item editor
//
// Holds a draft item list until it is saved into the store. After the
// save the draft stays local: edits made while revising are not written
// back.

use crate::ids::TokenGenerator;
use crate::sections::{self, ItemSection, Section};
use crate::settings::ChecklistSettings;
use crate::store::ChecklistStore;
use crate::types::{ChecklistItem, PersonalChecklist};
use std::fmt::Write;
use std::sync::Arc;

pub const EMPTY_MESSAGE: &str = "Start by adding items to your checklist.";

/// Where the editor is in its save/edit cycle
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EditorPhase {
    /// Never saved; items can be added
    Drafting,
    /// Saved, read-only
    Saved,
    /// Saved and editable again (local changes only)
    Revising,
}

impl EditorPhase {
    pub fn is_editing(&self) -> bool {
        matches!(self, Self::Drafting | Self::Revising)
    }

    pub fn is_saved(&self) -> bool {
        matches!(self, Self::Saved | Self::Revising)
    }
}

/// What the hosting view should do after a message
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EditorOutcome {
    Stay,
    /// Navigate back to the checklist overview
    Close,
}

/// Action revealed by swiping an item row
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ItemAction {
    Delete,
    MarkDone,
    Uncheck,
}

impl ItemAction {
    pub fn label(&self) -> &'static str {
        match self {
            Self::Delete => "Delete",
            Self::MarkDone => "Done",
            Self::Uncheck => "Uncheck",
        }
    }
}

pub fn item_actions(item: &ChecklistItem) -> &'static [ItemAction] {
    if item.completed {
        &[ItemAction::Uncheck]
    } else {
        &[ItemAction::Delete, ItemAction::MarkDone]
    }
}

#[derive(Debug, Clone)]
pub enum EditorMessage {
    InputChanged(String),
    SubmitInput,
    Item { id: String, action: ItemAction },
    PressPrimary,
}

pub struct ChecklistEditor {
    store: Arc<ChecklistStore>,
    title: String,
    date_format: String,
    items: Vec<ChecklistItem>,
    input: String,
    phase: EditorPhase,
    saved_id: Option<String>,
    item_ids: TokenGenerator,
}

impl ChecklistEditor {
    /// Start a draft. `title` comes from the overview, already trimmed.
    pub fn new(store: Arc<ChecklistStore>, title: impl Into<String>) -> Self {
        Self {
            store,
            title: title.into(),
            date_format: ChecklistSettings::default().date_format,
            items: Vec::new(),
            input: String::new(),
            phase: EditorPhase::Drafting,
            saved_id: None,
            item_ids: TokenGenerator::new(),
        }
    }

    pub fn with_date_format(mut self, date_format: impl Into<String>) -> Self {
        self.date_format = date_format.into();
        self
    }

    pub fn title(&self) -> &str {
        &self.title
    }

    pub fn phase(&self) -> EditorPhase {
        self.phase
    }

    pub fn items(&self) -> &[ChecklistItem] {
        &self.items
    }

    pub fn input(&self) -> &str {
        &self.input
    }

    /// Id of the checklist handed to the store, once saved
    pub fn saved_id(&self) -> Option<&str> {
        self.saved_id.as_deref()
    }

    pub fn update(&mut self, message: EditorMessage) -> EditorOutcome {
        match message {
            EditorMessage::InputChanged(text) => self.set_input(text),
            EditorMessage::SubmitInput => self.submit_input(),
            EditorMessage::Item { id, action } => self.apply_item_action(&id, action),
            EditorMessage::PressPrimary => return self.press_primary(),
        }
        EditorOutcome::Stay
    }

    pub fn set_input(&mut self, text: impl Into<String>) {
        self.input = text.into();
    }

    /// Add the current input as an item and clear it
    pub fn submit_input(&mut self) {
        let text = std::mem::take(&mut self.input);
        if self.add_item(&text).is_none() {
            self.input = text;
        }
    }

    /// Prepend an item. Rejected when the text is blank or the draft
    /// has already been saved.
    pub fn add_item(&mut self, text: &str) -> Option<&ChecklistItem> {
        if self.phase != EditorPhase::Drafting || text.trim().is_empty() {
            return None;
        }

        self.items
            .insert(0, ChecklistItem::new(self.item_ids.next_token(), text));
        self.items.first()
    }

    pub fn delete_item(&mut self, id: &str) {
        if !self.phase.is_editing() {
            return;
        }
        self.items.retain(|item| item.id != id);
    }

    pub fn toggle_completion(&mut self, id: &str) {
        if !self.phase.is_editing() {
            return;
        }
        if let Some(item) = self.items.iter_mut().find(|item| item.id == id) {
            item.completed = !item.completed;
        }
    }

    /// Run a swipe action on an item. Actions not offered for the item's
    /// current state are ignored.
    pub fn apply_item_action(&mut self, id: &str, action: ItemAction) {
        if !self.phase.is_editing() {
            return;
        }
        let Some(item) = self.items.iter_mut().find(|item| item.id == id) else {
            tracing::debug!("Ignoring {:?} for unknown item {}", action, id);
            return;
        };
        if !item_actions(item).contains(&action) {
            tracing::debug!("Item action {:?} not offered for item {}", action, id);
            return;
        }

        match action {
            ItemAction::Delete => self.items.retain(|item| item.id != id),
            ItemAction::MarkDone => item.completed = true,
            ItemAction::Uncheck => item.completed = false,
        }
    }

    /// Hand the draft to the store. Returns false when nothing was saved.
    pub fn save(&mut self) -> bool {
        if self.phase != EditorPhase::Drafting || self.items.is_empty() {
            return false;
        }

        let checklist = PersonalChecklist::from_items(
            self.store.issue_id(),
            self.title.clone(),
            self.creation_date(),
            self.items.clone(),
        );
        tracing::info!(
            "Saving checklist \"{}\" with {} items",
            checklist.title,
            checklist.items.len()
        );

        self.saved_id = Some(checklist.id.clone());
        self.store.add_checklist(checklist);
        self.phase = EditorPhase::Saved;
        true
    }

    /// The Save / Edit List / Done button
    pub fn press_primary(&mut self) -> EditorOutcome {
        match self.phase {
            EditorPhase::Drafting => {
                self.save();
                EditorOutcome::Stay
            }
            EditorPhase::Saved => {
                self.phase = EditorPhase::Revising;
                EditorOutcome::Stay
            }
            EditorPhase::Revising => {
                self.phase = EditorPhase::Saved;
                EditorOutcome::Close
            }
        }
    }

    pub fn primary_label(&self) -> &'static str {
        match self.phase {
            EditorPhase::Drafting => "Save",
            EditorPhase::Saved => "Edit List",
            EditorPhase::Revising => "Done",
        }
    }

    /// Save is only worth offering with at least one item
    pub fn can_save(&self) -> bool {
        self.phase == EditorPhase::Drafting && !self.items.is_empty()
    }

    /// To-Do then Completed Tasks, in draft order
    pub fn sections(&self) -> [Section<ItemSection, &ChecklistItem>; 2] {
        sections::item_sections(&self.items)
    }

    /// Headers appear only while revising a saved list; an empty
    /// Completed Tasks section never gets one.
    pub fn shows_section_header(&self, section: ItemSection) -> bool {
        if self.phase != EditorPhase::Revising {
            return false;
        }
        match section {
            ItemSection::ToDo => true,
            ItemSection::CompletedTasks => self.items.iter().any(|item| item.completed),
        }
    }

    pub fn shows_input(&self) -> bool {
        !self.phase.is_saved()
    }

    pub fn shows_empty_message(&self) -> bool {
        self.items.is_empty()
    }

    pub fn swipe_enabled(&self) -> bool {
        self.phase.is_editing()
    }

    fn creation_date(&self) -> String {
        let now = chrono::Local::now();
        let mut date = String::new();
        if write!(date, "{}", now.format(&self.date_format)).is_err() {
            tracing::warn!("Bad date format {:?}, using default", self.date_format);
            date = now.format(&ChecklistSettings::default().date_format).to_string();
        }
        date
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::ChecklistStatus;

    fn names(section: &Section<ItemSection, &ChecklistItem>) -> Vec<String> {
        section.entries.iter().map(|i| i.name.clone()).collect()
    }

    fn trip_prep(store: &Arc<ChecklistStore>) -> ChecklistEditor {
        let mut editor = ChecklistEditor::new(store.clone(), "Trip Prep");
        editor.update(EditorMessage::InputChanged("Buy groceries".to_string()));
        editor.update(EditorMessage::SubmitInput);
        editor.update(EditorMessage::InputChanged("Book flight".to_string()));
        editor.update(EditorMessage::SubmitInput);
        editor
    }

    fn item_id(editor: &ChecklistEditor, name: &str) -> String {
        editor
            .items()
            .iter()
            .find(|i| i.name == name)
            .map(|i| i.id.clone())
            .unwrap()
    }

    #[test]
    fn test_save_trip_prep() {
        let store = Arc::new(ChecklistStore::default());
        let mut editor = trip_prep(&store);
        assert_eq!(editor.input(), "");
        assert_eq!(editor.primary_label(), "Save");

        assert_eq!(editor.update(EditorMessage::PressPrimary), EditorOutcome::Stay);
        assert_eq!(editor.phase(), EditorPhase::Saved);

        let checklists = store.checklists();
        assert_eq!(checklists.len(), 1);
        let saved = &checklists[0];
        assert_eq!(saved.title, "Trip Prep");
        let items: Vec<(&str, bool)> = saved
            .items
            .iter()
            .map(|i| (i.name.as_str(), i.completed))
            .collect();
        assert_eq!(items, vec![("Book flight", false), ("Buy groceries", false)]);
        assert_eq!(saved.last_item, "Book flight");
        assert_eq!(saved.status, ChecklistStatus::Pending);
        assert!(!saved.date.is_empty());
        assert_eq!(editor.saved_id(), Some(saved.id.as_str()));
        assert_ne!(saved.items[0].id, saved.items[1].id);
    }

    #[test]
    fn test_toggle_moves_item_between_sections() {
        let store = Arc::new(ChecklistStore::default());
        let mut editor = trip_prep(&store);
        let groceries = item_id(&editor, "Buy groceries");

        editor.update(EditorMessage::Item {
            id: groceries.clone(),
            action: ItemAction::MarkDone,
        });

        let [todo, done] = editor.sections();
        assert_eq!(names(&todo), vec!["Book flight"]);
        assert_eq!(names(&done), vec!["Buy groceries"]);

        editor.toggle_completion(&groceries);
        let [todo, done] = editor.sections();
        assert_eq!(names(&todo), vec!["Book flight", "Buy groceries"]);
        assert!(done.is_empty());
    }

    #[test]
    fn test_empty_draft_is_not_saved() {
        let store = Arc::new(ChecklistStore::with_sample_data());
        let mut editor = ChecklistEditor::new(store.clone(), "Nothing");

        assert!(!editor.can_save());
        assert!(!editor.save());
        editor.press_primary();

        assert_eq!(store.checklists().len(), 2);
        assert_eq!(editor.phase(), EditorPhase::Drafting);
        assert!(editor.shows_empty_message());
    }

    #[test]
    fn test_blank_input_is_rejected() {
        let store = Arc::new(ChecklistStore::default());
        let mut editor = ChecklistEditor::new(store, "Blank");

        editor.set_input("   ");
        editor.submit_input();
        assert!(editor.items().is_empty());
        assert_eq!(editor.input(), "   ");

        assert!(editor.add_item("").is_none());
        let added = editor.add_item("  Passport copy ").unwrap();
        assert_eq!(added.name, "  Passport copy ");
        assert!(!added.completed);
    }

    #[test]
    fn test_items_can_be_deleted_while_drafting() {
        let store = Arc::new(ChecklistStore::default());
        let mut editor = trip_prep(&store);
        let flight = item_id(&editor, "Book flight");

        editor.update(EditorMessage::Item {
            id: flight,
            action: ItemAction::Delete,
        });
        editor.delete_item("missing");
        editor.toggle_completion("missing");

        assert_eq!(editor.items().len(), 1);
        assert_eq!(editor.items()[0].name, "Buy groceries");
    }

    #[test]
    fn test_primary_button_cycle() {
        let store = Arc::new(ChecklistStore::default());
        let mut editor = trip_prep(&store);

        assert!(editor.shows_input());
        assert!(editor.swipe_enabled());
        editor.press_primary();
        assert_eq!(editor.primary_label(), "Edit List");
        assert!(!editor.shows_input());
        assert!(!editor.swipe_enabled());

        assert_eq!(editor.press_primary(), EditorOutcome::Stay);
        assert_eq!(editor.phase(), EditorPhase::Revising);
        assert_eq!(editor.primary_label(), "Done");
        assert!(editor.swipe_enabled());

        assert_eq!(editor.press_primary(), EditorOutcome::Close);
        assert_eq!(editor.phase(), EditorPhase::Saved);
        assert_eq!(store.checklists().len(), 1);
    }

    #[test]
    fn test_saved_list_is_read_only_until_revising() {
        let store = Arc::new(ChecklistStore::default());
        let mut editor = trip_prep(&store);
        editor.save();
        let groceries = item_id(&editor, "Buy groceries");

        editor.toggle_completion(&groceries);
        editor.delete_item(&groceries);
        assert!(editor.add_item("Late addition").is_none());
        assert_eq!(editor.items().len(), 2);
        assert!(editor.items().iter().all(|i| !i.completed));
        assert!(!editor.save());
    }

    #[test]
    fn test_revising_changes_stay_local() {
        let store = Arc::new(ChecklistStore::default());
        let mut editor = trip_prep(&store);
        editor.save();
        editor.press_primary();
        let groceries = item_id(&editor, "Buy groceries");
        let flight = item_id(&editor, "Book flight");

        editor.toggle_completion(&groceries);
        editor.delete_item(&flight);
        assert_eq!(editor.items().len(), 1);
        assert!(editor.items()[0].completed);

        let stored = &store.checklists()[0];
        assert_eq!(stored.items.len(), 2);
        assert!(stored.items.iter().all(|i| !i.completed));
    }

    #[test]
    fn test_section_headers_only_while_revising() {
        let store = Arc::new(ChecklistStore::default());
        let mut editor = trip_prep(&store);
        assert!(!editor.shows_section_header(ItemSection::ToDo));

        editor.save();
        assert!(!editor.shows_section_header(ItemSection::ToDo));

        editor.press_primary();
        assert!(editor.shows_section_header(ItemSection::ToDo));
        assert!(!editor.shows_section_header(ItemSection::CompletedTasks));

        let groceries = item_id(&editor, "Buy groceries");
        editor.toggle_completion(&groceries);
        assert!(editor.shows_section_header(ItemSection::CompletedTasks));
    }

    #[test]
    fn test_item_actions_follow_completion() {
        let mut item = ChecklistItem::new("1", "Buy groceries");
        assert_eq!(item_actions(&item), &[ItemAction::Delete, ItemAction::MarkDone]);
        item.completed = true;
        assert_eq!(item_actions(&item), &[ItemAction::Uncheck]);
        assert_eq!(ItemAction::Uncheck.label(), "Uncheck");
    }

    #[test]
    fn test_item_actions_not_offered_are_ignored() {
        let store = Arc::new(ChecklistStore::default());
        let mut editor = trip_prep(&store);
        let groceries = item_id(&editor, "Buy groceries");
        let mark_done = || EditorMessage::Item {
            id: groceries.clone(),
            action: ItemAction::MarkDone,
        };

        editor.update(mark_done());
        editor.update(mark_done());
        assert!(editor.items().iter().any(|i| i.id == groceries && i.completed));

        // A completed item only offers Uncheck
        editor.update(EditorMessage::Item {
            id: groceries.clone(),
            action: ItemAction::Delete,
        });
        assert_eq!(editor.items().len(), 2);

        editor.update(EditorMessage::Item {
            id: groceries.clone(),
            action: ItemAction::Uncheck,
        });
        editor.update(EditorMessage::Item {
            id: groceries.clone(),
            action: ItemAction::Uncheck,
        });
        assert!(editor.items().iter().all(|i| !i.completed));

        editor.update(EditorMessage::Item {
            id: groceries.clone(),
            action: ItemAction::Delete,
        });
        assert_eq!(editor.items().len(), 1);
        assert_eq!(editor.items()[0].name, "Book flight");
    }

    #[test]
    fn test_item_actions_need_an_editing_phase() {
        let store = Arc::new(ChecklistStore::default());
        let mut editor = trip_prep(&store);
        editor.save();
        let flight = item_id(&editor, "Book flight");

        editor.apply_item_action(&flight, ItemAction::MarkDone);
        editor.apply_item_action(&flight, ItemAction::Delete);
        assert_eq!(editor.items().len(), 2);
        assert!(editor.items().iter().all(|i| !i.completed));
    }

    #[test]
    fn test_invalid_date_format_falls_back_to_default() {
        let store = Arc::new(ChecklistStore::default());
        let mut editor =
            ChecklistEditor::new(store.clone(), "Dated").with_date_format("%d.%m.%");
        editor.add_item("One");
        assert!(editor.save());

        let expected = chrono::Local::now().format("%d.%m.%y").to_string();
        assert_eq!(store.checklists()[0].date, expected);
    }

    #[test]
    fn test_date_uses_configured_format() {
        let store = Arc::new(ChecklistStore::default());
        let mut editor = ChecklistEditor::new(store.clone(), "Dated").with_date_format("%Y");
        editor.add_item("One");
        editor.save();

        let year = chrono::Local::now().format("%Y").to_string();
        assert_eq!(store.checklists()[0].date, year);
    }
}
