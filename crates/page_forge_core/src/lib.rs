pub mod domain;
pub mod generator;
pub mod ports;
pub mod session;

#[cfg(test)]
mod testing;

pub use domain::{ContactSubmission, DocumentKind, GeneratedDocument, UserAccount};
pub use generator::DocumentGenerator;
pub use ports::{
    CredentialStore, PortError, PortResult, SubmissionStore, TextGenerationService,
};
pub use session::{AuthState, SessionContext};
