// SPDX-License-Identifier: AGPL-3.0
// Deckhand Core - Type definitions

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Lifecycle of a pre-departure document
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum DocumentStatus {
    #[default]
    Pending,
    #[serde(rename = "inProgress")]
    InProgress,
    Done,
    Skipped,
}

impl DocumentStatus {
    pub const ALL: [DocumentStatus; 4] = [
        DocumentStatus::Pending,
        DocumentStatus::InProgress,
        DocumentStatus::Done,
        DocumentStatus::Skipped,
    ];

    /// Still awaiting action (Pending or InProgress)
    pub fn is_outstanding(&self) -> bool {
        matches!(self, Self::Pending | Self::InProgress)
    }

    /// Label used by the view layer and the serialized form
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Pending => "Pending",
            Self::InProgress => "inProgress",
            Self::Done => "Done",
            Self::Skipped => "Skipped",
        }
    }
}

impl fmt::Display for DocumentStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Caller-assigned status of a personal checklist.
///
/// Never derived from the completion state of its items.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ChecklistStatus {
    #[default]
    Pending,
    Completed,
}

impl ChecklistStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Pending => "pending",
            Self::Completed => "completed",
        }
    }
}

impl fmt::Display for ChecklistStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ChecklistStatus {
    type Err = AppError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "pending" => Ok(Self::Pending),
            "completed" | "complete" | "done" => Ok(Self::Completed),
            other => Err(AppError::InvalidInput(format!(
                "unknown checklist status: {}",
                other
            ))),
        }
    }
}

/// A required document for an upcoming assignment
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PreDepartureDocument {
    pub id: String,
    pub name: String,
    /// Opaque certificate number, never validated
    #[serde(default)]
    pub cert_number: String,
    #[serde(default)]
    pub issue_date: String,
    #[serde(default)]
    pub expiry_date: String,
    /// Mandatory documents need a two-step submission confirmation
    #[serde(default)]
    pub is_mandatory: bool,
    /// Display annotation only
    #[serde(default)]
    pub is_optional: bool,
    #[serde(default)]
    pub status: DocumentStatus,
}

impl PreDepartureDocument {
    pub fn new(id: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            cert_number: String::new(),
            issue_date: String::new(),
            expiry_date: String::new(),
            is_mandatory: false,
            is_optional: false,
            status: DocumentStatus::Pending,
        }
    }

    pub fn with_certificate(
        mut self,
        cert_number: impl Into<String>,
        issue_date: impl Into<String>,
        expiry_date: impl Into<String>,
    ) -> Self {
        self.cert_number = cert_number.into();
        self.issue_date = issue_date.into();
        self.expiry_date = expiry_date.into();
        self
    }

    pub fn mandatory(mut self) -> Self {
        self.is_mandatory = true;
        self
    }

    pub fn optional(mut self) -> Self {
        self.is_optional = true;
        self
    }

    /// Icon for the current status
    pub fn status_icon(&self) -> StatusIcon {
        status_icon(self.status, self.is_mandatory)
    }
}

/// Icon shown next to a pre-departure document
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum StatusIcon {
    Check,
    Remove,
    Clock,
    Alert,
    Document,
}

impl StatusIcon {
    /// Short semantic name
    pub fn name(&self) -> &'static str {
        match self {
            Self::Check => "check",
            Self::Remove => "remove",
            Self::Clock => "clock",
            Self::Alert => "alert",
            Self::Document => "document",
        }
    }

    /// Icon-font glyph name
    pub fn icon_name(&self) -> &'static str {
        match self {
            Self::Check => "checkmark-outline",
            Self::Remove => "remove-outline",
            Self::Clock => "time-outline",
            Self::Alert => "alert-circle-outline",
            Self::Document => "document-text-outline",
        }
    }
}

/// Map a document status and mandatory flag to its icon
pub fn status_icon(status: DocumentStatus, is_mandatory: bool) -> StatusIcon {
    match status {
        DocumentStatus::Done => StatusIcon::Check,
        DocumentStatus::Skipped => StatusIcon::Remove,
        DocumentStatus::InProgress => StatusIcon::Clock,
        DocumentStatus::Pending if is_mandatory => StatusIcon::Alert,
        DocumentStatus::Pending => StatusIcon::Document,
    }
}

/// A single entry of a personal checklist
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChecklistItem {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub completed: bool,
}

impl ChecklistItem {
    pub fn new(id: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            completed: false,
        }
    }
}

/// A user-created checklist
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PersonalChecklist {
    pub id: String,
    pub title: String,
    /// Creation date, already formatted for display
    pub date: String,
    /// Name of the first item when the checklist was saved
    #[serde(default)]
    pub last_item: String,
    #[serde(default)]
    pub items: Vec<ChecklistItem>,
    #[serde(default)]
    pub status: ChecklistStatus,
}

impl PersonalChecklist {
    /// Build a checklist from saved draft items.
    ///
    /// `last_item` is taken from the first item and never updated afterwards.
    pub fn from_items(
        id: impl Into<String>,
        title: impl Into<String>,
        date: impl Into<String>,
        items: Vec<ChecklistItem>,
    ) -> Self {
        let last_item = items.first().map(|i| i.name.clone()).unwrap_or_default();
        Self {
            id: id.into(),
            title: title.into(),
            date: date.into(),
            last_item,
            items,
            status: ChecklistStatus::Pending,
        }
    }

    pub fn with_status(mut self, status: ChecklistStatus) -> Self {
        self.status = status;
        self
    }
}

/// Error types for the application
#[derive(Debug, thiserror::Error)]
pub enum AppError {
    #[error("File I/O error: {0}")]
    FileIo(String),

    #[error("Serialization error: {0}")]
    Serialization(String),

    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    #[error("Invalid input: {0}")]
    InvalidInput(String),

    #[error("No async runtime available for scheduled work")]
    NoRuntime,
}

impl From<std::io::Error> for AppError {
    fn from(err: std::io::Error) -> Self {
        AppError::FileIo(err.to_string())
    }
}

impl From<serde_json::Error> for AppError {
    fn from(err: serde_json::Error) -> Self {
        AppError::Serialization(err.to_string())
    }
}
