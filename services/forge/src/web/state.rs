//! services/forge/src/web/state.rs
//!
//! Defines the state handed to the two HTTP listeners.

use page_forge_core::ports::SubmissionStore;
use std::sync::Arc;
use tokio::sync::watch;

//=========================================================================================
// AppState (Contact Listener)
//=========================================================================================

/// The shared state of the contact listener, created once at startup.
#[derive(Clone)]
pub struct AppState {
    pub submissions: Arc<dyn SubmissionStore>,
}

//=========================================================================================
// PreviewState (Preview Listener)
//=========================================================================================

/// Read side of the channel the shell publishes its latest document on.
#[derive(Clone)]
pub struct PreviewState {
    pub latest: watch::Receiver<Option<String>>,
}

impl PreviewState {
    /// Creates the channel. The sender stays with the shell.
    pub fn channel() -> (watch::Sender<Option<String>>, Self) {
        let (tx, rx) = watch::channel(None);
        (tx, Self { latest: rx })
    }
}
