//! services/forge/src/web/rest.rs
//!
//! The master definition for the OpenAPI document of the contact listener.

use crate::web::contact::{ContactAccepted, ContactError, ContactRequest};
use utoipa::OpenApi;

//=========================================================================================
// OpenAPI Master Definition
//=========================================================================================

#[derive(OpenApi)]
#[openapi(
    paths(
        crate::web::contact::contact_handler,
    ),
    components(
        schemas(ContactRequest, ContactAccepted, ContactError)
    ),
    tags(
        (name = "Page Forge Contact API", description = "Receives contact-form submissions from generated pages.")
    )
)]
pub struct ApiDoc;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn document_lists_the_contact_route() {
        let doc = ApiDoc::openapi();
        assert!(doc.paths.paths.contains_key("/api/contact"));
    }
}
