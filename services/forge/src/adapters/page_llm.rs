//! services/forge/src/adapters/page_llm.rs
//!
//! This module contains the adapter for the page-writing LLM.
//! It implements the `TextGenerationService` port from the `core` crate against
//! any OpenAI-compatible chat completion endpoint (OpenAI itself, or Gemini's
//! OpenAI-compatible API).

use async_openai::{
    config::OpenAIConfig,
    error::OpenAIError,
    types::chat::{
        ChatCompletionRequestMessage, ChatCompletionRequestUserMessageArgs,
        CreateChatCompletionRequestArgs,
    },
    Client,
};
use async_trait::async_trait;
use page_forge_core::ports::{PortError, PortResult, TextGenerationService};

//=========================================================================================
// The Main Adapter Struct
//=========================================================================================

/// An adapter that implements `TextGenerationService` using an OpenAI-compatible LLM.
#[derive(Clone)]
pub struct OpenAiPageAdapter {
    client: Client<OpenAIConfig>,
    model: String,
}

impl OpenAiPageAdapter {
    /// Creates a new `OpenAiPageAdapter`.
    pub fn new(client: Client<OpenAIConfig>, model: String) -> Self {
        Self { client, model }
    }

    /// Builds the client from an optional key and an optional base URL.
    /// Without a key every call fails with the provider's authentication error.
    pub fn from_settings(api_key: Option<&str>, api_base: Option<&str>, model: String) -> Self {
        let mut config = OpenAIConfig::new();
        if let Some(key) = api_key {
            config = config.with_api_key(key);
        }
        if let Some(base) = api_base {
            config = config.with_api_base(base);
        }
        Self::new(Client::with_config(config), model)
    }

    pub fn model(&self) -> &str {
        &self.model
    }
}

//=========================================================================================
// `TextGenerationService` Trait Implementation
//=========================================================================================

#[async_trait]
impl TextGenerationService for OpenAiPageAdapter {
    /// Sends the instruction as a single user message and returns the first choice's text.
    async fn generate_text(&self, instruction: &str) -> PortResult<String> {
        let messages: Vec<ChatCompletionRequestMessage> = vec![ChatCompletionRequestUserMessageArgs::default()
            .content(instruction)
            .build()
            .map_err(|e| PortError::Generation(e.to_string()))?
            .into()];

        let request = CreateChatCompletionRequestArgs::default()
            .model(&self.model)
            .messages(messages)
            .n(1)
            .build()
            .map_err(|e| PortError::Generation(e.to_string()))?;

        // Call the API and manually map the error if it occurs, which respects the orphan rule.
        let response = self
            .client
            .chat()
            .create(request)
            .await
            .map_err(|e: OpenAIError| PortError::Generation(e.to_string()))?;

        // Extract the text content from the first choice in the response.
        response
            .choices
            .into_iter()
            .next()
            .and_then(|choice| choice.message.content)
            .ok_or_else(|| {
                PortError::Generation("Page generation LLM returned no text content.".to_string())
            })
    }
}
