//! docrag: retrieval-augmented question answering over a single document
//!
//! The crate indexes one document (one chunk per page), serves exact
//! nearest-neighbor retrieval over the chunk embeddings, and answers
//! questions by conditioning an LLM on the retrieved context. Embedding and
//! generation run through collaborator traits; the Ollama implementations
//! are the defaults.

pub mod agent;
pub mod config;
pub mod error;
pub mod generation;
pub mod ingestion;
pub mod providers;
pub mod retrieval;

pub use agent::{Agent, AgentState, IndexReport};
pub use config::AgentConfig;
pub use error::{Error, Result};
pub use generation::{AnswerSynthesizer, PromptBuilder};
pub use providers::{EmbeddingProvider, LlmProvider};
pub use retrieval::{Chunk, ChunkStore, RetrievalPipeline, SearchHit, VectorIndex};
