//! crates/page_forge_core/src/ports.rs
//!
//! Defines the service contracts (traits) for the application's core logic.
//! These traits form the boundary of the hexagonal architecture, allowing the core
//! to be independent of specific external implementations like databases or APIs.

use async_trait::async_trait;

use crate::domain::{ContactSubmission, UserAccount};

//=========================================================================================
// Generic Port Error and Result Types
//=========================================================================================

/// A generic error type for all port operations.
/// Each variant is one kind of failure a caller is expected to show to the user.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum PortError {
    /// Missing or unusable input. The message is shown as-is.
    #[error("{0}")]
    Validation(String),
    #[error("Username already exists: {0}")]
    DuplicateUsername(String),
    #[error("Storage error: {0}")]
    Storage(String),
    #[error("Generation error: {0}")]
    Generation(String),
}

/// A convenience type alias for `Result<T, PortError>`.
pub type PortResult<T> = Result<T, PortError>;

//=========================================================================================
// Service Ports (Traits)
//=========================================================================================

#[async_trait]
pub trait CredentialStore: Send + Sync {
    /// Inserts a new account. Fails with `DuplicateUsername` if the name is taken.
    async fn register(&self, username: &str, email: &str, password: &str)
        -> PortResult<UserAccount>;

    /// Returns whether an account matches both fields exactly.
    /// Storage failures count as a failed login.
    async fn login(&self, username: &str, password: &str) -> bool;
}

#[async_trait]
pub trait SubmissionStore: Send + Sync {
    /// Appends a submission; the timestamp is assigned by the store.
    async fn insert_submission(
        &self,
        name: &str,
        email: &str,
        message: &str,
    ) -> PortResult<ContactSubmission>;

    /// Every stored submission in ascending id order.
    async fn list_submissions(&self) -> PortResult<Vec<ContactSubmission>>;
}

#[async_trait]
pub trait TextGenerationService: Send + Sync {
    /// Sends one instruction to the text-generation capability and returns its raw reply.
    async fn generate_text(&self, instruction: &str) -> PortResult<String>;
}
