// SPDX-License-Identifier: AGPL-3.0
// Deckhand Core - Checklist state store
//
// Single in-memory source of truth for pre-departure documents and
// personal checklists. Collections are replaced on every write so a
// snapshot handed to a view never changes underneath it.

use crate::ids::TokenGenerator;
use crate::progress;
use crate::seed;
use crate::types::{ChecklistStatus, DocumentStatus, PersonalChecklist, PreDepartureDocument};
use std::fmt;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, PoisonError, RwLock, RwLockReadGuard, RwLockWriteGuard};

/// Handle returned by [`ChecklistStore::subscribe`]
pub type ListenerId = u64;

type Listener = Arc<dyn Fn(&StoreChange) + Send + Sync>;

/// A committed mutation, delivered to every listener
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StoreChange {
    DocumentStatusChanged { id: String, status: DocumentStatus },
    ChecklistAdded { id: String },
    ChecklistDeleted { id: String },
    ChecklistStatusChanged { id: String, status: ChecklistStatus },
}

/// Everything a view needs to render, taken at one point in time
#[derive(Debug, Clone)]
pub struct StoreSnapshot {
    pub documents: Arc<Vec<PreDepartureDocument>>,
    pub checklists: Arc<Vec<PersonalChecklist>>,
    pub completed_count: usize,
    pub progress: f64,
}

pub struct ChecklistStore {
    documents: RwLock<Arc<Vec<PreDepartureDocument>>>,
    checklists: RwLock<Arc<Vec<PersonalChecklist>>>,
    listeners: RwLock<Vec<(ListenerId, Listener)>>,
    next_listener: AtomicU64,
    ids: TokenGenerator,
}

fn read<T>(lock: &RwLock<T>) -> RwLockReadGuard<'_, T> {
    lock.read().unwrap_or_else(PoisonError::into_inner)
}

fn write<T>(lock: &RwLock<T>) -> RwLockWriteGuard<'_, T> {
    lock.write().unwrap_or_else(PoisonError::into_inner)
}

/// Swap in a new collection with the first matching row updated.
/// Leaves the current `Arc` in place when nothing matches.
fn replace_where<T: Clone>(
    lock: &RwLock<Arc<Vec<T>>>,
    matches: impl Fn(&T) -> bool,
    apply: impl FnOnce(&mut T),
) -> bool {
    let mut current = write(lock);
    let Some(index) = current.iter().position(matches) else {
        return false;
    };
    let mut next = (**current).clone();
    apply(&mut next[index]);
    *current = Arc::new(next);
    true
}

impl ChecklistStore {
    pub fn new(documents: Vec<PreDepartureDocument>, checklists: Vec<PersonalChecklist>) -> Self {
        Self {
            documents: RwLock::new(Arc::new(documents)),
            checklists: RwLock::new(Arc::new(checklists)),
            listeners: RwLock::new(Vec::new()),
            next_listener: AtomicU64::new(1),
            ids: TokenGenerator::new(),
        }
    }

    /// Store preloaded with the standard document set and two sample checklists
    pub fn with_sample_data() -> Self {
        Self::new(seed::documents(), seed::checklists())
    }

    /// Current pre-departure documents
    pub fn documents(&self) -> Arc<Vec<PreDepartureDocument>> {
        read(&self.documents).clone()
    }

    /// Current personal checklists
    pub fn checklists(&self) -> Arc<Vec<PersonalChecklist>> {
        read(&self.checklists).clone()
    }

    pub fn document(&self, id: &str) -> Option<PreDepartureDocument> {
        read(&self.documents).iter().find(|d| d.id == id).cloned()
    }

    pub fn checklist(&self, id: &str) -> Option<PersonalChecklist> {
        read(&self.checklists).iter().find(|c| c.id == id).cloned()
    }

    /// Number of checklists not in the pending state
    pub fn completed_count(&self) -> usize {
        progress::completed_checklists(&self.checklists())
    }

    /// Share of completed checklists, 0.0 when there are none
    pub fn progress(&self) -> f64 {
        progress::checklist_progress(&self.checklists())
    }

    pub fn snapshot(&self) -> StoreSnapshot {
        let documents = self.documents();
        let checklists = self.checklists();
        StoreSnapshot {
            completed_count: progress::completed_checklists(&checklists),
            progress: progress::checklist_progress(&checklists),
            documents,
            checklists,
        }
    }

    /// Fresh id for a new checklist; never repeats within this store
    pub fn issue_id(&self) -> String {
        self.ids.next_token()
    }

    /// Set the status of a document. Any transition is allowed.
    pub fn update_document_status(&self, id: &str, status: DocumentStatus) {
        let changed = replace_where(&self.documents, |d| d.id == id, |d| d.status = status);

        if changed {
            tracing::info!("Document {} status set to {}", id, status);
            self.notify(StoreChange::DocumentStatusChanged {
                id: id.to_string(),
                status,
            });
        } else {
            tracing::debug!("Ignoring status update for unknown document {}", id);
        }
    }

    /// Append a checklist. Callers validate title and items beforehand.
    pub fn add_checklist(&self, checklist: PersonalChecklist) {
        let id = checklist.id.clone();
        {
            let mut checklists = write(&self.checklists);
            let mut next = (**checklists).clone();
            next.push(checklist);
            *checklists = Arc::new(next);
        }

        tracing::info!("Added checklist {}", id);
        self.notify(StoreChange::ChecklistAdded { id });
    }

    /// Remove a checklist
    pub fn delete_checklist(&self, id: &str) {
        let removed = {
            let mut checklists = write(&self.checklists);
            if checklists.iter().any(|c| c.id == id) {
                let next: Vec<PersonalChecklist> =
                    checklists.iter().filter(|c| c.id != id).cloned().collect();
                *checklists = Arc::new(next);
                true
            } else {
                false
            }
        };

        if removed {
            tracing::info!("Deleted checklist {}", id);
            self.notify(StoreChange::ChecklistDeleted { id: id.to_string() });
        } else {
            tracing::debug!("Ignoring delete for unknown checklist {}", id);
        }
    }

    pub fn update_checklist_status(&self, id: &str, status: ChecklistStatus) {
        let changed = replace_where(&self.checklists, |c| c.id == id, |c| c.status = status);

        if changed {
            tracing::info!("Checklist {} status set to {}", id, status);
            self.notify(StoreChange::ChecklistStatusChanged {
                id: id.to_string(),
                status,
            });
        } else {
            tracing::debug!("Ignoring status update for unknown checklist {}", id);
        }
    }

    /// Register a listener called after every committed mutation.
    ///
    /// Listeners run on the mutating thread once all locks are released,
    /// so they may read the store or (un)subscribe.
    pub fn subscribe<F>(&self, listener: F) -> ListenerId
    where
        F: Fn(&StoreChange) + Send + Sync + 'static,
    {
        let id = self.next_listener.fetch_add(1, Ordering::Relaxed);
        write(&self.listeners).push((id, Arc::new(listener)));
        id
    }

    /// Remove a listener. Returns false if it was not registered.
    pub fn unsubscribe(&self, id: ListenerId) -> bool {
        let mut listeners = write(&self.listeners);
        let before = listeners.len();
        listeners.retain(|(existing, _)| *existing != id);
        listeners.len() != before
    }

    fn notify(&self, change: StoreChange) {
        let listeners: Vec<Listener> = read(&self.listeners)
            .iter()
            .map(|(_, listener)| listener.clone())
            .collect();

        for listener in listeners {
            listener(&change);
        }
    }
}

impl Default for ChecklistStore {
    fn default() -> Self {
        Self::new(Vec::new(), Vec::new())
    }
}

impl fmt::Debug for ChecklistStore {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ChecklistStore")
            .field("documents", &read(&self.documents).len())
            .field("checklists", &read(&self.checklists).len())
            .field("listeners", &read(&self.listeners).len())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::ChecklistItem;
    use std::sync::Mutex;

    fn checklist(id: &str, status: ChecklistStatus) -> PersonalChecklist {
        PersonalChecklist::from_items(
            id,
            format!("List {}", id),
            "01.01.25",
            vec![ChecklistItem::new("i1", "Item")],
        )
        .with_status(status)
    }

    fn recorder(store: &ChecklistStore) -> Arc<Mutex<Vec<StoreChange>>> {
        let seen = Arc::new(Mutex::new(Vec::new()));
        let sink = seen.clone();
        store.subscribe(move |change| sink.lock().unwrap().push(change.clone()));
        seen
    }

    #[test]
    fn test_update_document_status_touches_only_target() {
        let store = ChecklistStore::with_sample_data();
        let before = store.documents();

        store.update_document_status("2", DocumentStatus::Done);

        let after = store.documents();
        assert_eq!(store.document("2").unwrap().status, DocumentStatus::Done);
        for (old, new) in before.iter().zip(after.iter()) {
            if old.id != "2" {
                assert_eq!(old, new);
            }
        }
    }

    #[test]
    fn test_any_status_transition_is_allowed() {
        let store = ChecklistStore::with_sample_data();
        for from in DocumentStatus::ALL {
            for to in DocumentStatus::ALL {
                store.update_document_status("1", from);
                store.update_document_status("1", to);
                assert_eq!(store.document("1").unwrap().status, to);
            }
        }
    }

    #[test]
    fn test_unknown_document_is_a_silent_noop() {
        let store = ChecklistStore::with_sample_data();
        let seen = recorder(&store);
        let before = store.documents();

        store.update_document_status("missing", DocumentStatus::Done);

        let after = store.documents();
        assert_eq!(*before, *after);
        assert!(Arc::ptr_eq(&before, &after));
        assert!(seen.lock().unwrap().is_empty());
    }

    #[test]
    fn test_progress_counts_non_pending_checklists() {
        let store = ChecklistStore::default();
        assert_eq!(store.progress(), 0.0);
        assert_eq!(store.completed_count(), 0);

        store.add_checklist(checklist("a", ChecklistStatus::Completed));
        store.add_checklist(checklist("b", ChecklistStatus::Pending));
        store.add_checklist(checklist("c", ChecklistStatus::Pending));
        store.add_checklist(checklist("d", ChecklistStatus::Completed));

        assert_eq!(store.completed_count(), 2);
        assert_eq!(store.progress(), 0.5);

        store.update_checklist_status("b", ChecklistStatus::Completed);
        assert_eq!(store.completed_count(), 3);
        assert_eq!(store.progress(), 0.75);
    }

    #[test]
    fn test_add_then_delete_restores_collection() {
        let store = ChecklistStore::with_sample_data();
        let before = store.checklists();

        let id = store.issue_id();
        store.add_checklist(checklist(&id, ChecklistStatus::Pending));
        assert_eq!(store.checklists().len(), before.len() + 1);
        assert_eq!(store.checklists().last().unwrap().id, id);

        store.delete_checklist(&id);
        assert_eq!(*store.checklists(), *before);
    }

    #[test]
    fn test_add_does_not_dedupe_titles() {
        let store = ChecklistStore::default();
        let mut first = checklist("a", ChecklistStatus::Pending);
        let mut second = checklist("b", ChecklistStatus::Pending);
        first.title = "Same".to_string();
        second.title = "Same".to_string();
        store.add_checklist(first);
        store.add_checklist(second);
        assert_eq!(store.checklists().len(), 2);
    }

    #[test]
    fn test_unknown_checklist_operations_are_noops() {
        let store = ChecklistStore::with_sample_data();
        let before = store.checklists();

        store.delete_checklist("missing");
        store.update_checklist_status("missing", ChecklistStatus::Completed);

        assert!(Arc::ptr_eq(&before, &store.checklists()));
    }

    #[test]
    fn test_listeners_receive_committed_changes() {
        let store = ChecklistStore::with_sample_data();
        let seen = recorder(&store);

        store.update_document_status("3", DocumentStatus::Skipped);
        store.add_checklist(checklist("x", ChecklistStatus::Pending));
        store.update_checklist_status("x", ChecklistStatus::Completed);
        store.delete_checklist("x");

        let seen = seen.lock().unwrap();
        assert_eq!(
            *seen,
            vec![
                StoreChange::DocumentStatusChanged {
                    id: "3".to_string(),
                    status: DocumentStatus::Skipped
                },
                StoreChange::ChecklistAdded {
                    id: "x".to_string()
                },
                StoreChange::ChecklistStatusChanged {
                    id: "x".to_string(),
                    status: ChecklistStatus::Completed
                },
                StoreChange::ChecklistDeleted {
                    id: "x".to_string()
                },
            ]
        );
    }

    #[test]
    fn test_listener_reads_fresh_state() {
        let store = Arc::new(ChecklistStore::with_sample_data());
        let observed = Arc::new(Mutex::new(None));

        let weak = Arc::downgrade(&store);
        let sink = observed.clone();
        store.subscribe(move |_| {
            if let Some(store) = weak.upgrade() {
                *sink.lock().unwrap() = store.document("4").map(|d| d.status);
            }
        });

        store.update_document_status("4", DocumentStatus::Done);
        assert_eq!(*observed.lock().unwrap(), Some(DocumentStatus::Done));
    }

    #[test]
    fn test_unsubscribe_stops_notifications() {
        let store = ChecklistStore::default();
        let seen = Arc::new(Mutex::new(0));
        let sink = seen.clone();
        let id = store.subscribe(move |_| *sink.lock().unwrap() += 1);

        store.add_checklist(checklist("a", ChecklistStatus::Pending));
        assert!(store.unsubscribe(id));
        assert!(!store.unsubscribe(id));
        store.add_checklist(checklist("b", ChecklistStatus::Pending));

        assert_eq!(*seen.lock().unwrap(), 1);
    }

    #[test]
    fn test_snapshot_is_consistent() {
        let store = ChecklistStore::with_sample_data();
        let snapshot = store.snapshot();
        assert_eq!(snapshot.documents.len(), 4);
        assert_eq!(snapshot.checklists.len(), 2);
        assert_eq!(snapshot.completed_count, 1);
        assert_eq!(snapshot.progress, 0.5);
    }

    #[test]
    fn test_issued_ids_never_repeat() {
        let store = ChecklistStore::default();
        let a = store.issue_id();
        store.add_checklist(checklist(&a, ChecklistStatus::Pending));
        store.delete_checklist(&a);
        let b = store.issue_id();
        assert_ne!(a, b);
    }
}
