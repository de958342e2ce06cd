//! crates/page_forge_core/src/domain.rs
//!
//! Defines the pure, core data structures for the application.
//! These structs are independent of any database or serialization format.

use chrono::{DateTime, Utc};

/// A single contact-form entry received from a generated page.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ContactSubmission {
    pub id: i64,
    pub name: String,
    pub email: String,
    pub message: String,
    pub submitted_at: DateTime<Utc>,
}

// Represents a registered account. The stored password never leaves the store.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UserAccount {
    pub id: i64,
    pub username: String,
    pub email: String,
    pub created_at: DateTime<Utc>,
}

/// Which session slot a document came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DocumentKind {
    Generated,
    Edited,
}

impl DocumentKind {
    /// The file name offered when the document is downloaded.
    pub fn file_name(self) -> &'static str {
        match self {
            DocumentKind::Generated => "generated_webpage.html",
            DocumentKind::Edited => "edited_webpage.html",
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            DocumentKind::Generated => "generated",
            DocumentKind::Edited => "edited",
        }
    }
}

/// An HTML document returned by the text-generation service, held only in memory.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GeneratedDocument {
    pub kind: DocumentKind,
    pub html: String,
    pub produced_at: DateTime<Utc>,
}

impl GeneratedDocument {
    pub fn new(kind: DocumentKind, html: String) -> Self {
        Self {
            kind,
            html,
            produced_at: Utc::now(),
        }
    }
}
