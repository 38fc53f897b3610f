//! LLM provider trait for answer generation

use async_trait::async_trait;

use crate::error::Result;

/// Trait for the text-generation collaborator
///
/// The prompt arrives fully assembled; implementations only run the model.
/// Calls may fail (connection or model unavailable) and are never retried
/// here.
#[async_trait]
pub trait LlmProvider: Send + Sync {
    /// Generate a completion for the given prompt
    async fn generate(&self, prompt: &str) -> Result<String>;

    /// Check if the provider is healthy and available
    async fn health_check(&self) -> Result<bool>;

    /// Provider name for logging
    fn name(&self) -> &str;

    /// The model being used
    fn model(&self) -> &str;
}
