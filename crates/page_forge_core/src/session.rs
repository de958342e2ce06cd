//! crates/page_forge_core/src/session.rs
//!
//! The transient, process-local session: who is logged in, and the last
//! generated and last edited documents.
//!
//! A `SessionContext` starts logged out with both document slots empty and is
//! changed only by [`SessionContext::generate`], [`SessionContext::edit`],
//! [`SessionContext::login`] and [`SessionContext::logout`]. Nothing here is
//! persisted or shared between processes.

use tracing::{info, warn};

use crate::domain::{DocumentKind, GeneratedDocument};
use crate::generator::DocumentGenerator;
use crate::ports::{CredentialStore, PortError, PortResult};

/// Login status for the current process.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum AuthState {
    #[default]
    LoggedOut,
    LoggedIn { username: String },
}

impl AuthState {
    pub fn is_logged_in(&self) -> bool {
        matches!(self, AuthState::LoggedIn { .. })
    }

    pub fn username(&self) -> Option<&str> {
        match self {
            AuthState::LoggedIn { username } => Some(username),
            AuthState::LoggedOut => None,
        }
    }
}

#[derive(Debug, Default)]
pub struct SessionContext {
    auth: AuthState,
    generated: Option<GeneratedDocument>,
    edited: Option<GeneratedDocument>,
}

impl SessionContext {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn auth(&self) -> &AuthState {
        &self.auth
    }

    pub fn generated(&self) -> Option<&GeneratedDocument> {
        self.generated.as_ref()
    }

    pub fn edited(&self) -> Option<&GeneratedDocument> {
        self.edited.as_ref()
    }

    /// The edited document when there is one, otherwise the generated one.
    pub fn latest(&self) -> Option<&GeneratedDocument> {
        self.edited.as_ref().or(self.generated.as_ref())
    }

    pub fn document(&self, kind: DocumentKind) -> Option<&GeneratedDocument> {
        match kind {
            DocumentKind::Generated => self.generated(),
            DocumentKind::Edited => self.edited(),
        }
    }

    /// Generates a new page. On success the generated slot is replaced and the
    /// edited slot cleared; on failure both slots are left as they were.
    pub async fn generate(
        &mut self,
        generator: &DocumentGenerator,
        description: &str,
    ) -> PortResult<&GeneratedDocument> {
        if description.trim().is_empty() {
            return Err(PortError::Validation("Please enter a prompt.".to_string()));
        }

        let html = generator.generate(description).await.inspect_err(|e| {
            warn!("Generation failed: {}", e);
        })?;

        self.edited = None;
        Ok(&*self
            .generated
            .insert(GeneratedDocument::new(DocumentKind::Generated, html)))
    }

    /// Revises the generated page. Always starts from the generated slot, so
    /// successive edits do not build on each other.
    pub async fn edit(
        &mut self,
        generator: &DocumentGenerator,
        instructions: &str,
    ) -> PortResult<&GeneratedDocument> {
        let source = match &self.generated {
            Some(doc) if !instructions.trim().is_empty() => doc.html.clone(),
            _ => {
                return Err(PortError::Validation(
                    "Please generate a webpage first or enter an edit prompt.".to_string(),
                ))
            }
        };

        let html = generator
            .edit(&source, instructions)
            .await
            .inspect_err(|e| {
                warn!("Edit failed: {}", e);
            })?;

        Ok(&*self
            .edited
            .insert(GeneratedDocument::new(DocumentKind::Edited, html)))
    }

    /// Checks the credentials and marks the session logged in on a match.
    pub async fn login(
        &mut self,
        store: &dyn CredentialStore,
        username: &str,
        password: &str,
    ) -> bool {
        if !store.login(username, password).await {
            info!(username, "Login rejected.");
            return false;
        }
        info!(username, "User logged in.");
        self.auth = AuthState::LoggedIn {
            username: username.to_string(),
        };
        true
    }

    pub fn logout(&mut self) {
        if let AuthState::LoggedIn { username } = &self.auth {
            info!(username = username.as_str(), "User logged out.");
        }
        self.auth = AuthState::LoggedOut;
    }
}
