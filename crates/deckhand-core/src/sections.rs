// SPDX-License-Identifier: AGPL-3.0
// Deckhand Core - Section partitioning
//
// Splits collections into display sections. Order within each section
// follows the source collection.

use crate::types::{ChecklistItem, DocumentStatus, PreDepartureDocument};

/// A titled, ordered subset of a collection
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Section<K, T> {
    pub kind: K,
    pub entries: Vec<T>,
}

impl<K: Copy, T> Section<K, T> {
    fn new(kind: K) -> Self {
        Self {
            kind,
            entries: Vec::new(),
        }
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

/// Sections of the pre-departure document list
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DocumentSection {
    Pending,
    Completed,
}

impl DocumentSection {
    pub fn of(status: DocumentStatus) -> Self {
        if status.is_outstanding() {
            Self::Pending
        } else {
            Self::Completed
        }
    }

    pub fn title(&self) -> &'static str {
        match self {
            Self::Pending => "Pending",
            Self::Completed => "Completed",
        }
    }
}

/// Sections of a personal checklist's items
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ItemSection {
    ToDo,
    CompletedTasks,
}

impl ItemSection {
    pub fn of(item: &ChecklistItem) -> Self {
        if item.completed {
            Self::CompletedTasks
        } else {
            Self::ToDo
        }
    }

    pub fn title(&self) -> &'static str {
        match self {
            Self::ToDo => "To-Do",
            Self::CompletedTasks => "Completed Tasks",
        }
    }
}

pub type DocumentSections<'a> = [Section<DocumentSection, &'a PreDepartureDocument>; 2];
pub type ItemSections<'a> = [Section<ItemSection, &'a ChecklistItem>; 2];

/// Pending (Pending, InProgress) then Completed (Done, Skipped)
pub fn document_sections(documents: &[PreDepartureDocument]) -> DocumentSections<'_> {
    let mut pending = Section::new(DocumentSection::Pending);
    let mut completed = Section::new(DocumentSection::Completed);

    for doc in documents {
        match DocumentSection::of(doc.status) {
            DocumentSection::Pending => pending.entries.push(doc),
            DocumentSection::Completed => completed.entries.push(doc),
        }
    }

    [pending, completed]
}

/// To-Do (not completed) then Completed Tasks
pub fn item_sections(items: &[ChecklistItem]) -> ItemSections<'_> {
    let mut todo = Section::new(ItemSection::ToDo);
    let mut done = Section::new(ItemSection::CompletedTasks);

    for item in items {
        match ItemSection::of(item) {
            ItemSection::ToDo => todo.entries.push(item),
            ItemSection::CompletedTasks => done.entries.push(item),
        }
    }

    [todo, done]
}
