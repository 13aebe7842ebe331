// SPDX-License-Identifier: AGPL-3.0
// Deckhand Core - Pre-departure documents screen logic
//
// Swipe affordances, progress and the two-step submission confirmation
// for mandatory documents.

use crate::progress;
use crate::sections::{self, DocumentSection, Section};
use crate::settings::ChecklistSettings;
use crate::store::ChecklistStore;
use crate::types::{DocumentStatus, PreDepartureDocument};
use std::sync::{Arc, Weak};
use std::time::Duration;
use tokio::runtime::Handle;
use tokio::sync::watch;
use tokio::task::JoinHandle;

pub const SUBMISSION_PROMPT: &str =
    "Have you informed the manning agency that this document is ready?";

/// Action revealed by swiping a document row
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SwipeAction {
    RevertToPending,
    ConfirmSubmission,
    MarkDone,
    Skip,
}

impl SwipeAction {
    pub fn label(&self) -> &'static str {
        match self {
            Self::RevertToPending => "Uncheck",
            Self::ConfirmSubmission => "Submitted",
            Self::MarkDone => "Done",
            Self::Skip => "Skip",
        }
    }

    /// Status committed straight away, `None` when confirmation is needed first
    pub fn direct_status(&self) -> Option<DocumentStatus> {
        match self {
            Self::RevertToPending => Some(DocumentStatus::Pending),
            Self::MarkDone => Some(DocumentStatus::Done),
            Self::Skip => Some(DocumentStatus::Skipped),
            Self::ConfirmSubmission => None,
        }
    }
}

/// Actions offered for a row in `section`
pub fn swipe_actions(section: DocumentSection, is_mandatory: bool) -> &'static [SwipeAction] {
    match (section, is_mandatory) {
        (DocumentSection::Completed, _) => &[SwipeAction::RevertToPending],
        (DocumentSection::Pending, true) => &[SwipeAction::ConfirmSubmission],
        (DocumentSection::Pending, false) => &[SwipeAction::MarkDone, SwipeAction::Skip],
    }
}

/// State of the submission confirmation surface
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum ConfirmationState {
    #[default]
    Hidden,
    /// Asking whether the manning agency was informed
    Prompting { document_id: String },
    /// Confirmed; the status commit is scheduled
    Submitted { document_id: String },
}

impl ConfirmationState {
    pub fn is_visible(&self) -> bool {
        !matches!(self, Self::Hidden)
    }
}

#[derive(Debug, Clone)]
pub enum PreDepartureMessage {
    Swipe { id: String, action: SwipeAction },
    ConfirmSubmission,
    DeclineSubmission,
}

/// Delays of the submission confirmation
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ConfirmationTiming {
    /// From confirming to committing `InProgress`
    pub transition: Duration,
    /// From the commit to hiding the confirmation
    pub dismiss: Duration,
}

impl Default for ConfirmationTiming {
    fn default() -> Self {
        Self {
            transition: Duration::from_millis(500),
            dismiss: Duration::from_millis(500),
        }
    }
}

impl From<&ChecklistSettings> for ConfirmationTiming {
    fn from(settings: &ChecklistSettings) -> Self {
        Self {
            transition: settings.submission_transition(),
            dismiss: settings.submission_dismiss(),
        }
    }
}

pub struct PreDepartureScreen {
    store: Arc<ChecklistStore>,
    runtime: Handle,
    timing: ConfirmationTiming,
    confirmation: Arc<watch::Sender<ConfirmationState>>,
    pending: Option<JoinHandle<()>>,
}

impl PreDepartureScreen {
    pub fn new(store: Arc<ChecklistStore>, runtime: Handle, timing: ConfirmationTiming) -> Self {
        let (confirmation, _) = watch::channel(ConfirmationState::Hidden);
        Self {
            store,
            runtime,
            timing,
            confirmation: Arc::new(confirmation),
            pending: None,
        }
    }

    /// Pending and Completed sections of the current documents
    pub fn sections(&self) -> [Section<DocumentSection, PreDepartureDocument>; 2] {
        let documents = self.store.documents();
        sections::document_sections(&documents).map(|section| Section {
            kind: section.kind,
            entries: section.entries.into_iter().cloned().collect(),
        })
    }

    pub fn progress(&self) -> f64 {
        progress::document_progress(&self.store.documents())
    }

    pub fn progress_label(&self) -> String {
        format!("{}% Completed", progress::percent(self.progress()))
    }

    /// Actions offered for a document; empty for unknown ids
    pub fn actions_for(&self, id: &str) -> &'static [SwipeAction] {
        match self.store.document(id) {
            Some(doc) => swipe_actions(DocumentSection::of(doc.status), doc.is_mandatory),
            None => &[],
        }
    }

    pub fn confirmation(&self) -> ConfirmationState {
        self.confirmation.borrow().clone()
    }

    /// Watch the confirmation surface (prompt, submitted, dismissed)
    pub fn subscribe_confirmation(&self) -> watch::Receiver<ConfirmationState> {
        self.confirmation.subscribe()
    }

    /// A confirmed submission is still waiting to commit or dismiss
    pub fn is_submitting(&self) -> bool {
        self.pending.as_ref().is_some_and(|task| !task.is_finished())
    }

    pub fn update(&mut self, message: PreDepartureMessage) {
        match message {
            PreDepartureMessage::Swipe { id, action } => self.swipe(&id, action),
            PreDepartureMessage::DeclineSubmission => {
                if matches!(self.confirmation(), ConfirmationState::Prompting { .. }) {
                    self.confirmation.send_replace(ConfirmationState::Hidden);
                }
            }
            PreDepartureMessage::ConfirmSubmission => self.confirm(),
        }
    }

    fn swipe(&mut self, id: &str, action: SwipeAction) {
        if !self.actions_for(id).contains(&action) {
            tracing::debug!("Swipe action {:?} not offered for document {}", action, id);
            return;
        }

        match action.direct_status() {
            Some(status) => self.store.update_document_status(id, status),
            None => {
                if self.confirmation().is_visible() || self.is_submitting() {
                    tracing::debug!("Confirmation already open, ignoring {}", id);
                    return;
                }
                self.confirmation.send_replace(ConfirmationState::Prompting {
                    document_id: id.to_string(),
                });
            }
        }
    }

    fn confirm(&mut self) {
        let ConfirmationState::Prompting { document_id } = self.confirmation() else {
            return;
        };
        if self.is_submitting() {
            return;
        }

        self.confirmation.send_replace(ConfirmationState::Submitted {
            document_id: document_id.clone(),
        });

        let store = Arc::downgrade(&self.store);
        let confirmation = Arc::downgrade(&self.confirmation);
        let timing = self.timing;

        self.pending = Some(self.runtime.spawn(async move {
            tokio::time::sleep(timing.transition).await;
            if !commit_submission(&store, &confirmation, &document_id) {
                return;
            }

            tokio::time::sleep(timing.dismiss).await;
            if let Some(confirmation) = confirmation.upgrade() {
                confirmation.send_replace(ConfirmationState::Hidden);
            }
        }));
    }
}

/// Commit `InProgress` if both the screen and the store are still alive
fn commit_submission(
    store: &Weak<ChecklistStore>,
    confirmation: &Weak<watch::Sender<ConfirmationState>>,
    document_id: &str,
) -> bool {
    let (Some(store), Some(_screen)) = (store.upgrade(), confirmation.upgrade()) else {
        tracing::debug!("Submission for {} dropped, screen is gone", document_id);
        return false;
    };
    store.update_document_status(document_id, DocumentStatus::InProgress);
    true
}

impl Drop for PreDepartureScreen {
    fn drop(&mut self) {
        if let Some(task) = self.pending.take() {
            task.abort();
        }
    }
}
