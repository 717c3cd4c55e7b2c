//! Shared LLM client and interaction utilities
//!
//! Provides a common interface for OpenAI API interactions used across services.

use async_trait::async_trait;
use rig::client::CompletionClient;
use rig::completion::Prompt;
use rig::providers::openai;

/// Errors raised by the LLM provider
#[derive(Debug, thiserror::Error)]
#[non_exhaustive]
pub enum LlmError {
    #[error("Completion request failed: {0}")]
    Completion(String),
}

/// Single request/response text generation.
///
/// One system instruction, one user instruction, one plain-text completion.
#[async_trait]
pub trait TextGenerator: Send + Sync {
    async fn generate(&self, model: &str, system: &str, user: &str) -> Result<String, LlmError>;
}

/// Shared LLM client wrapper
#[derive(Clone)]
pub struct LlmClient {
    client: openai::Client,
}

impl LlmClient {
    /// Create a new LLM client with the provided API key
    pub fn new(api_key: &str) -> Self {
        Self {
            client: openai::Client::new(api_key),
        }
    }
}

#[async_trait]
impl TextGenerator for LlmClient {
    async fn generate(&self, model: &str, system: &str, user: &str) -> Result<String, LlmError> {
        let agent = self.client.agent(model).preamble(system).build();

        agent
            .prompt(user)
            .await
            .map_err(|e| LlmError::Completion(e.to_string()))
    }
}
