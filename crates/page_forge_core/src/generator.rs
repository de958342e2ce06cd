//! crates/page_forge_core/src/generator.rs
//!
//! The Document Generator: turns a page description (or an existing page plus
//! edit instructions) into a single instruction for the text-generation port.

use std::sync::Arc;

use tracing::{debug, info};

use crate::ports::{PortResult, TextGenerationService};

/// Wraps the text-generation port with the page-building directives.
#[derive(Clone)]
pub struct DocumentGenerator {
    service: Arc<dyn TextGenerationService>,
    contact_endpoint: String,
}

impl DocumentGenerator {
    /// Creates a generator whose pages post their contact form to `contact_endpoint`.
    pub fn new(service: Arc<dyn TextGenerationService>, contact_endpoint: impl Into<String>) -> Self {
        Self {
            service,
            contact_endpoint: contact_endpoint.into(),
        }
    }

    pub fn contact_endpoint(&self) -> &str {
        &self.contact_endpoint
    }

    /// The full instruction sent for a brand new page.
    pub fn generation_instruction(&self, description: &str) -> String {
        format!(
            "Generate HTML code for a webpage based on the following description: '{description}'.\n\
             The output must be a complete, valid HTML5 document with:\n\
             - Proper HTML5 structure (<!DOCTYPE html>, <html>, <head>, <body>)\n\
             - Inline CSS in a <style> tag for a clean, modern, responsive design\n\
             - Inline JavaScript in a <script> tag for form submission and navigation\n\
             - Any contact form sending its name, email and message fields as a JSON POST request to '{endpoint}'\n\
             - No external dependencies or images\n\
             - Return only the HTML code, no explanations or comments",
            endpoint = self.contact_endpoint,
        )
    }

    /// The full instruction sent to revise `current_html`.
    pub fn edit_instruction(&self, current_html: &str, instructions: &str) -> String {
        format!(
            "You are provided with the following HTML code:\n\
             ```\n{current_html}\n```\n\
             Modify the HTML code based on the following instructions: '{instructions}'.\n\
             Ensure the output is a complete, valid HTML5 document with:\n\
             - Proper HTML5 structure\n\
             - Inline CSS in a <style> tag\n\
             - Inline JavaScript in a <script> tag, with form submission pointing to '{endpoint}'\n\
             - No external dependencies or images\n\
             - Return only the modified HTML code",
            endpoint = self.contact_endpoint,
        )
    }

    /// Asks for a new page. The reply is returned verbatim.
    pub async fn generate(&self, description: &str) -> PortResult<String> {
        let instruction = self.generation_instruction(description);
        debug!(chars = instruction.len(), "Sending generation instruction.");
        let html = self.service.generate_text(&instruction).await?;
        info!(chars = html.len(), "Received generated document.");
        Ok(html)
    }

    /// Asks for a revised page. The reply is returned verbatim.
    pub async fn edit(&self, current_html: &str, instructions: &str) -> PortResult<String> {
        let instruction = self.edit_instruction(current_html, instructions);
        debug!(chars = instruction.len(), "Sending edit instruction.");
        let html = self.service.generate_text(&instruction).await?;
        info!(chars = html.len(), "Received edited document.");
        Ok(html)
    }
}
