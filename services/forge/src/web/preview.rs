//! services/forge/src/web/preview.rs
//!
//! The preview listener: serves the session's latest document at `/` so it can
//! be opened in a browser, where its contact form posts to the contact listener
//! from a different origin.

use crate::web::{contact::not_found, state::PreviewState};
use axum::{
    extract::State,
    http::StatusCode,
    response::{Html, IntoResponse, Response},
    routing::get,
    Router,
};
use tower_http::trace::TraceLayer;

pub const NOTHING_YET: &str = "Nothing generated yet. Use `generate` in the forge shell.";

pub fn preview_router(state: PreviewState) -> Router {
    Router::new()
        .route("/", get(preview_handler))
        .fallback(not_found)
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

/// GET / - The latest generated or edited document
pub async fn preview_handler(State(state): State<PreviewState>) -> Response {
    let latest = state.latest.borrow().clone();
    match latest {
        Some(html) => Html(html).into_response(),
        None => (StatusCode::NOT_FOUND, NOTHING_YET).into_response(),
    }
}
