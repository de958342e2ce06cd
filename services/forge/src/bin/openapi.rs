//! services/forge/src/bin/openapi.rs
//!
//! Exports the contract of the contact listener (`POST /api/contact`) so the
//! pages forge generates can be checked against it. Writes `openapi.json`, or
//! the path given as the first argument.

use forge_lib::web::rest::ApiDoc;
use utoipa::OpenApi;

const DEFAULT_OUTPUT: &str = "openapi.json";

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let output = std::env::args()
        .nth(1)
        .unwrap_or_else(|| DEFAULT_OUTPUT.to_string());

    let document = ApiDoc::openapi().to_pretty_json()?;
    std::fs::write(&output, document)?;
    println!("Contact listener contract written to {output}");
    Ok(())
}
