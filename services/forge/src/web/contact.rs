//! services/forge/src/web/contact.rs
//!
//! The contact listener: a single `POST /api/contact` route that stores form
//! submissions posted by generated pages. Every other path or method is a 404.

use crate::web::state::AppState;
use axum::{
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Json, Response},
    routing::post,
    Router,
};
use bytes::Bytes;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use std::sync::Arc;
use tower_http::{cors::CorsLayer, trace::TraceLayer};
use tracing::{error, info, warn};
use utoipa::ToSchema;

pub const CONTACT_PATH: &str = "/api/contact";
pub const MISSING_FIELDS: &str = "All fields required";
pub const SUBMITTED: &str = "Form submitted successfully!";

//=========================================================================================
// Request/Response Types
//=========================================================================================

/// The JSON body a generated page posts. All fields are required and non-empty.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct ContactRequest {
    pub name: String,
    pub email: String,
    pub message: String,
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct ContactAccepted {
    pub message: String,
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct ContactError {
    pub error: String,
}

//=========================================================================================
// Router
//=========================================================================================

/// Builds the contact listener's router.
///
/// Generated pages are served from another origin (another port, or a local
/// file), so the contact route carries a permissive CORS layer. Only that
/// route answers preflights; every other path stays a 404.
pub fn contact_router(state: Arc<AppState>) -> Router {
    Router::new()
        .route(
            CONTACT_PATH,
            post(contact_handler)
                .fallback(not_found)
                .layer(CorsLayer::permissive()),
        )
        .fallback(not_found)
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

//=========================================================================================
// Handlers
//=========================================================================================

/// POST /api/contact - Store a contact-form submission
#[utoipa::path(
    post,
    path = "/api/contact",
    request_body = ContactRequest,
    responses(
        (status = 200, description = "Submission stored", body = ContactAccepted),
        (status = 400, description = "A required field is missing or empty", body = ContactError),
        (status = 404, description = "Unknown path or method"),
        (status = 500, description = "Unreadable body or storage failure", body = ContactError)
    )
)]
pub async fn contact_handler(State(state): State<Arc<AppState>>, body: Bytes) -> Response {
    // 1. Parse the body
    let fields = match parse_fields(&body) {
        Ok(Some(fields)) => fields,
        Ok(None) => {
            warn!("Form submission rejected: missing fields.");
            return error_response(StatusCode::BAD_REQUEST, MISSING_FIELDS.to_string());
        }
        Err(e) => {
            error!("Unreadable contact payload: {}", e);
            return error_response(StatusCode::INTERNAL_SERVER_ERROR, e.to_string());
        }
    };

    // 2. Store it
    match state
        .submissions
        .insert_submission(&fields.name, &fields.email, &fields.message)
        .await
    {
        Ok(submission) => {
            info!(id = submission.id, name = %submission.name, "Stored contact submission.");
            (
                StatusCode::OK,
                Json(ContactAccepted {
                    message: SUBMITTED.to_string(),
                }),
            )
                .into_response()
        }
        Err(e) => {
            error!("Failed to store contact submission: {}", e);
            error_response(StatusCode::INTERNAL_SERVER_ERROR, e.to_string())
        }
    }
}

pub async fn not_found() -> StatusCode {
    StatusCode::NOT_FOUND
}

//=========================================================================================
// Helpers
//=========================================================================================

/// Returns `Ok(None)` when the body is a JSON object but a field is missing,
/// not a string, or empty. A body that is not a JSON object is an error.
fn parse_fields(body: &[u8]) -> Result<Option<ContactRequest>, serde_json::Error> {
    let object: Map<String, Value> = serde_json::from_slice(body)?;
    let field = |key: &str| {
        object
            .get(key)
            .and_then(Value::as_str)
            .filter(|value| !value.is_empty())
            .map(str::to_owned)
    };

    Ok(match (field("name"), field("email"), field("message")) {
        (Some(name), Some(email), Some(message)) => Some(ContactRequest {
            name,
            email,
            message,
        }),
        _ => None,
    })
}

fn error_response(status: StatusCode, error: String) -> Response {
    (status, Json(ContactError { error })).into_response()
}
