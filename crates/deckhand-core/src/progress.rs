// SPDX-License-Identifier: AGPL-3.0
// Deckhand Core - Progress derivations
//
// Recomputed from the current collections on every read.

use crate::types::{ChecklistStatus, DocumentStatus, PersonalChecklist, PreDepartureDocument};

/// `done / total`, or 0.0 for an empty collection
pub fn ratio(done: usize, total: usize) -> f64 {
    if total == 0 {
        0.0
    } else {
        done as f64 / total as f64
    }
}

/// Whole percentage for display, rounded half away from zero
pub fn percent(progress: f64) -> u32 {
    if progress.is_nan() || progress <= 0.0 {
        0
    } else {
        (progress * 100.0).round() as u32
    }
}

/// Documents that have left the `Pending` state (`InProgress` counts)
pub fn acted_on_documents(documents: &[PreDepartureDocument]) -> usize {
    documents
        .iter()
        .filter(|d| d.status != DocumentStatus::Pending)
        .count()
}

/// Progress over the pre-departure documents
pub fn document_progress(documents: &[PreDepartureDocument]) -> f64 {
    ratio(acted_on_documents(documents), documents.len())
}

pub fn completed_checklists(checklists: &[PersonalChecklist]) -> usize {
    checklists
        .iter()
        .filter(|c| c.status != ChecklistStatus::Pending)
        .count()
}

/// Progress over the personal checklists
pub fn checklist_progress(checklists: &[PersonalChecklist]) -> f64 {
    ratio(completed_checklists(checklists), checklists.len())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::seed;

    #[test]
    fn test_ratio_handles_empty() {
        assert_eq!(ratio(0, 0), 0.0);
        assert_eq!(ratio(1, 4), 0.25);
    }

    #[test]
    fn test_percent_rounds() {
        assert_eq!(percent(0.0), 0);
        assert_eq!(percent(1.0 / 3.0), 33);
        assert_eq!(percent(2.0 / 3.0), 67);
        assert_eq!(percent(0.125), 13);
        assert_eq!(percent(1.0), 100);
        assert_eq!(percent(f64::NAN), 0);
    }

    #[test]
    fn test_in_progress_counts_towards_document_progress() {
        let mut docs = seed::documents();
        assert_eq!(document_progress(&docs), 0.0);

        docs[0].status = DocumentStatus::InProgress;
        docs[1].status = DocumentStatus::Skipped;
        assert_eq!(acted_on_documents(&docs), 2);
        assert_eq!(document_progress(&docs), 0.5);
    }

    #[test]
    fn test_checklist_progress_is_independent_of_documents() {
        let checklists = seed::checklists();
        let mut docs = seed::documents();
        for doc in docs.iter_mut() {
            doc.status = DocumentStatus::Done;
        }
        assert_eq!(document_progress(&docs), 1.0);
        assert_eq!(checklist_progress(&checklists), 0.5);
        assert_eq!(checklist_progress(&[]), 0.0);
    }
}
