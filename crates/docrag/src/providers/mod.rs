//! Collaborator abstractions for embeddings and answer generation
//!
//! Trait-based seams so the agent core never depends on a concrete backend;
//! the Ollama implementations are the defaults.

pub mod embedding;
pub mod llm;
pub mod ollama;

pub use embedding::EmbeddingProvider;
pub use llm::LlmProvider;
pub use ollama::{OllamaClient, OllamaEmbedder, OllamaGenerator, OllamaProvider};
