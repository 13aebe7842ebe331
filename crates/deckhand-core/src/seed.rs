// SPDX-License-Identifier: AGPL-3.0
// Deckhand Core - Initial session data

use crate::types::{ChecklistStatus, PersonalChecklist, PreDepartureDocument};

/// The standard pre-departure document set, all pending
pub fn documents() -> Vec<PreDepartureDocument> {
    vec![
        PreDepartureDocument::new("1", "Autom. Radar Plotting Aids (ARPA) CERT")
            .with_certificate("", "2024-02-20", "2025-02-20")
            .mandatory(),
        PreDepartureDocument::new("2", "Passport").with_certificate(
            "A1234567",
            "2023-01-15",
            "2033-01-15",
        ),
        PreDepartureDocument::new("3", "Visa")
            .with_certificate("VISA9876", "2023-06-20", "2025-06-20")
            .optional(),
        PreDepartureDocument::new("4", "Medical Certificate").with_certificate(
            "MC56789",
            "2024-02-10",
            "2025-02-10",
        ),
    ]
}

/// Sample checklists shown on first launch
pub fn checklists() -> Vec<PersonalChecklist> {
    vec![
        PersonalChecklist {
            id: "1".to_string(),
            title: "Restaurants to visit in France".to_string(),
            date: "12.04.22".to_string(),
            last_item: "La Parfait".to_string(),
            items: Vec::new(),
            status: ChecklistStatus::Pending,
        },
        PersonalChecklist {
            id: "2".to_string(),
            title: "Things to do in Germany".to_string(),
            date: "06.09.21".to_string(),
            last_item: "Visit the park".to_string(),
            items: Vec::new(),
            status: ChecklistStatus::Completed,
        },
    ]
}
