// SPDX-License-Identifier: AGPL-3.0
// Deckhand Console - Text rendering of the core screens

use deckhand_core::editor::{item_actions, EMPTY_MESSAGE};
use deckhand_core::pre_departure::SUBMISSION_PROMPT;
use deckhand_core::{
    ChecklistEditor, ChecklistOverview, ConfirmationState, PreDepartureScreen, StoreChange,
};
use std::fmt::Write;

pub fn overview(screen: &ChecklistOverview) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "== Pre-Departure Documents List ==");
    let _ = writeln!(out, "[{}] Review List  (docs)", screen.progress_label());
    let _ = writeln!(out);
    let _ = writeln!(out, "My Checklists");

    let rows = screen.rows();
    if rows.is_empty() {
        let _ = writeln!(out, "  (none yet, try: new <title>)");
    }
    for (n, row) in rows.iter().enumerate() {
        let _ = writeln!(out, "  {}. {} [{}]", n + 1, row.title, row.status);
        let _ = writeln!(out, "     {}", row.date_label);
        let _ = writeln!(out, "     {}", row.last_item_label);
    }
    out
}

pub fn documents(screen: &PreDepartureScreen) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "== Pre-Departure Documents List ==");
    let _ = writeln!(out, "{}", screen.progress_label());

    for section in screen.sections() {
        let _ = writeln!(out);
        let _ = writeln!(out, "{}", section.kind.title());
        for doc in &section.entries {
            let optional = if doc.is_optional { " (Optional)" } else { "" };
            let actions: Vec<&str> = screen
                .actions_for(&doc.id)
                .iter()
                .map(|a| a.label())
                .collect();
            let _ = writeln!(
                out,
                "  [{}] {}: {}{}",
                doc.status_icon().name(),
                doc.id,
                doc.name,
                optional
            );
            if !doc.cert_number.is_empty() {
                let _ = writeln!(out, "      {}", doc.cert_number);
            }
            let _ = writeln!(
                out,
                "      Issue: {}  Expiry: {}",
                doc.issue_date, doc.expiry_date
            );
            let _ = writeln!(out, "      swipe: {}", actions.join(" | "));
        }
    }

    match screen.confirmation() {
        ConfirmationState::Hidden => {}
        ConfirmationState::Prompting { .. } => {
            let _ = writeln!(out);
            let _ = writeln!(out, "{}  (yes/no)", SUBMISSION_PROMPT);
        }
        ConfirmationState::Submitted { document_id } => {
            let _ = writeln!(out);
            let _ = writeln!(out, "Submitting document {}...", document_id);
        }
    }
    out
}

pub fn editor(screen: &ChecklistEditor) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "== {} ==  [{}]", screen.title(), screen.primary_label());

    // Numbers follow draft order so `check <n>` is stable across sections
    let items = screen.items();
    for section in screen.sections() {
        if screen.shows_section_header(section.kind) {
            let _ = writeln!(out, "{}", section.kind.title());
        }
        for item in &section.entries {
            let n = items.iter().position(|i| i.id == item.id).map_or(0, |p| p + 1);
            let mark = if item.completed { "x" } else { " " };
            let _ = write!(out, "  {}. [{}] {}", n, mark, item.name);
            if screen.swipe_enabled() {
                let actions: Vec<&str> = item_actions(item).iter().map(|a| a.label()).collect();
                let _ = write!(out, "  ({})", actions.join(" | "));
            }
            let _ = writeln!(out);
        }
    }

    if screen.shows_input() {
        let _ = writeln!(out, "  + add item");
    }
    if screen.shows_empty_message() {
        let _ = writeln!(out, "{}", EMPTY_MESSAGE);
    }
    out
}

/// One-line notice for a store notification
pub fn change(change: &StoreChange) -> String {
    match change {
        StoreChange::DocumentStatusChanged { id, status } => {
            format!("* document {} is now {}", id, status)
        }
        StoreChange::ChecklistAdded { id } => format!("* checklist {} added", id),
        StoreChange::ChecklistDeleted { id } => format!("* checklist {} deleted", id),
        StoreChange::ChecklistStatusChanged { id, status } => {
            format!("* checklist {} is now {}", id, status)
        }
    }
}
