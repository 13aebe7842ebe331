// SPDX-License-Identifier: AGPL-3.0
// Deckhand Core - Shared logic for all frontends
//
// This crate provides:
// - ChecklistStore, the in-memory state for documents and checklists
// - Progress and section derivations
// - Screen logic for the pre-departure list, the checklist overview
//   and the item editor
// - ChecklistSettings and SettingsStore for local configuration
//
// Rendering lives in frontend crates.

pub mod context;
pub mod editor;
pub mod ids;
pub mod overview;
pub mod pre_departure;
pub mod progress;
pub mod sections;
pub mod seed;
pub mod settings;
pub mod store;
pub mod types;

// Re-export commonly used items
pub use context::AppContext;
pub use editor::{ChecklistEditor, EditorMessage, EditorOutcome, EditorPhase, ItemAction};
pub use overview::{ChecklistOverview, ChecklistRow, OverviewMessage, OverviewOutcome};
pub use pre_departure::{
    ConfirmationState, ConfirmationTiming, PreDepartureMessage, PreDepartureScreen, SwipeAction,
};
pub use sections::{DocumentSection, ItemSection, Section};
pub use settings::{ChecklistSettings, SettingsStore};
pub use store::{ChecklistStore, ListenerId, StoreChange, StoreSnapshot};
pub use types::{
    AppError, ChecklistItem, ChecklistStatus, DocumentStatus, PersonalChecklist,
    PreDepartureDocument, StatusIcon,
};
