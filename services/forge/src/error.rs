//! services/forge/src/error.rs
//!
//! Defines the primary error type for the forge service.
//!
//! Only start-up failures reach this type; everything that happens inside the
//! shell is reported to the user as a `PortError` and the loop carries on.

use crate::config::ConfigError;

/// The primary error type for the `forge` service.
#[derive(Debug, thiserror::Error)]
pub enum AppError {
    /// Represents an error that occurred during configuration loading.
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    /// The terminal line editor could not be started.
    #[error("Readline error: {0}")]
    Readline(#[from] rustyline::error::ReadlineError),
}
