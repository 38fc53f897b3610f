//! Agent session owning one document's retrieval state and query lifecycle

use chrono::{DateTime, Utc};
use parking_lot::RwLock;
use serde::Serialize;
use sha2::{Digest, Sha256};
use std::sync::Arc;
use std::time::Instant;

use crate::config::AgentConfig;
use crate::error::{CollaboratorKind, Error, Result};
use crate::generation::{AnswerSynthesizer, PromptBuilder};
use crate::providers::{EmbeddingProvider, LlmProvider, OllamaProvider};
use crate::retrieval::{ChunkStore, RetrievalPipeline, VectorIndex};

/// Canonical answer when retrieval finds nothing usable
pub const NO_RESULTS_MESSAGE: &str = "Could not find relevant information in the document.";

/// Fixed degraded-mode answer when the generator fails at query time
pub const DEGRADED_MESSAGE: &str =
    "Error getting response from the language model. Make sure Ollama is running and accessible.";

/// Observable lifecycle states
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum AgentState {
    /// No document indexed yet
    Uninitialized,
    /// An initialize call is building the index
    Indexing,
    /// Index built and generator bound; queries are legal
    Ready,
    /// The last initialize failed; the error is recorded
    Failed,
}

impl std::fmt::Display for AgentState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Uninitialized => write!(f, "Uninitialized"),
            Self::Indexing => write!(f, "Indexing"),
            Self::Ready => write!(f, "Ready"),
            Self::Failed => write!(f, "Failed"),
        }
    }
}

/// Summary of one successful initialization
#[derive(Debug, Clone, Serialize)]
pub struct IndexReport {
    /// Number of chunks ingested
    pub chunks: usize,
    /// Embedding dimension of the index
    pub dimensions: usize,
    /// SHA-256 over the ingested chunk texts
    pub fingerprint: String,
    /// Wall time spent indexing
    pub elapsed_ms: u64,
    /// When the index was built
    pub indexed_at: DateTime<Utc>,
}

/// Everything one query needs, built by one initialize call.
///
/// Immutable once constructed; queries clone the `Arc` and run against this
/// snapshot even if a re-initialize replaces it mid-flight.
struct ReadyGeneration {
    pipeline: RetrievalPipeline,
    synthesizer: AnswerSynthesizer,
}

enum Lifecycle {
    Uninitialized,
    Indexing,
    Ready(Arc<ReadyGeneration>),
    Failed(String),
}

impl Lifecycle {
    fn state(&self) -> AgentState {
        match self {
            Self::Uninitialized => AgentState::Uninitialized,
            Self::Indexing => AgentState::Indexing,
            Self::Ready(_) => AgentState::Ready,
            Self::Failed(_) => AgentState::Failed,
        }
    }
}

/// Session object for question answering over a single document.
///
/// Owns one ChunkStore, one VectorIndex, and one bound generator handle per
/// generation; each `initialize` replaces the whole generation, never parts
/// of it. The lifecycle lock is sync and never held across an await.
pub struct Agent {
    /// Embedding collaborator, shared across generations
    embedder: Arc<dyn EmbeddingProvider>,
    /// Generation collaborator, rebound on each initialize
    generator: Arc<dyn LlmProvider>,
    /// Retrieval width for queries
    top_k: usize,
    lifecycle: RwLock<Lifecycle>,
}

impl Agent {
    /// Create an uninitialized agent over the given collaborators
    pub fn new(
        embedder: Arc<dyn EmbeddingProvider>,
        generator: Arc<dyn LlmProvider>,
        config: &AgentConfig,
    ) -> Self {
        Self {
            embedder,
            generator,
            top_k: config.retrieval.top_k,
            lifecycle: RwLock::new(Lifecycle::Uninitialized),
        }
    }

    /// Create an agent with the default Ollama collaborators
    pub fn from_config(config: &AgentConfig) -> Self {
        let (embedder, generator) =
            OllamaProvider::new(&config.llm, config.embedding.dimensions).split();
        Self::new(Arc::new(embedder), Arc::new(generator), config)
    }

    /// Current lifecycle state
    pub fn state(&self) -> AgentState {
        self.lifecycle.read().state()
    }

    /// The recorded error message while in `Failed`
    pub fn last_error(&self) -> Option<String> {
        match &*self.lifecycle.read() {
            Lifecycle::Failed(message) => Some(message.clone()),
            _ => None,
        }
    }

    /// Index a document given as an ordered sequence of text chunks.
    ///
    /// Single-flight: a call arriving while another is indexing is rejected
    /// with `InitializeInProgress`. Any prior generation is discarded up
    /// front and is not restored on failure; a failed call leaves the agent
    /// `Failed` with the error recorded, a successful one leaves it `Ready`.
    pub async fn initialize(&self, chunks: Vec<String>) -> Result<IndexReport> {
        {
            let mut lifecycle = self.lifecycle.write();
            if matches!(*lifecycle, Lifecycle::Indexing) {
                return Err(Error::InitializeInProgress);
            }
            // Claiming the Indexing slot drops the previous generation
            *lifecycle = Lifecycle::Indexing;
        }

        match self.build_generation(chunks).await {
            Ok((generation, report)) => {
                tracing::info!(
                    "Indexed {} chunks ({} dims) in {}ms",
                    report.chunks,
                    report.dimensions,
                    report.elapsed_ms
                );
                *self.lifecycle.write() = Lifecycle::Ready(Arc::new(generation));
                Ok(report)
            }
            Err(e) => {
                tracing::error!("Initialization failed: {}", e);
                *self.lifecycle.write() = Lifecycle::Failed(e.to_string());
                Err(e)
            }
        }
    }

    /// Answer a question about the indexed document.
    ///
    /// Legal only in `Ready`; other states fail with `NotReady`. Retrieval
    /// finding nothing yields the canonical not-found answer, and a generator
    /// failure yields the fixed degraded-mode answer; neither disturbs the
    /// `Ready` state. Embedding failures are real errors and also leave the
    /// state untouched.
    pub async fn query(&self, question: &str) -> Result<String> {
        // Snapshot the generation so a concurrent re-initialize cannot pull
        // the store and index out from under this query
        let generation = {
            let lifecycle = self.lifecycle.read();
            match &*lifecycle {
                Lifecycle::Ready(generation) => Arc::clone(generation),
                other => return Err(Error::not_ready(other.state().to_string())),
            }
        };

        tracing::info!("Query: \"{}\"", question);

        let context = match generation.pipeline.retrieve(question).await {
            Ok(context) => context,
            Err(Error::NoResults) => {
                tracing::info!("No relevant chunks found for query");
                return Ok(NO_RESULTS_MESSAGE.to_string());
            }
            Err(e) => return Err(e),
        };

        let prompt = PromptBuilder::build_prompt(&context, question);

        match generation.synthesizer.synthesize(&prompt).await {
            Ok(answer) => Ok(answer),
            Err(e) => {
                tracing::warn!("Generation failed, answering in degraded mode: {}", e);
                Ok(DEGRADED_MESSAGE.to_string())
            }
        }
    }

    /// Run the full indexing sequence: ingest, embed, build, bind generator
    async fn build_generation(
        &self,
        chunks: Vec<String>,
    ) -> Result<(ReadyGeneration, IndexReport)> {
        let start = Instant::now();

        let store = ChunkStore::ingest(chunks)?;
        tracing::debug!("Ingested {} chunks", store.len());

        let fingerprint = fingerprint(&store);

        match self.embedder.health_check().await {
            Ok(true) => {}
            Ok(false) => {
                return Err(Error::unavailable(
                    CollaboratorKind::Embedding,
                    format!("{} did not respond to the health probe", self.embedder.name()),
                ))
            }
            Err(e) => {
                return Err(Error::unavailable(
                    CollaboratorKind::Embedding,
                    e.to_string(),
                ))
            }
        }

        let texts = store.texts();
        let embeddings = self.embedder.embed_batch(&texts).await?;
        if embeddings.len() != store.len() {
            return Err(Error::embedding(format!(
                "Embedder returned {} vectors for {} chunks",
                embeddings.len(),
                store.len()
            )));
        }

        let index = VectorIndex::build(embeddings)?;
        let expected = self.embedder.dimensions();
        if index.dimensions() != expected {
            return Err(Error::dimension_mismatch(expected, index.dimensions()));
        }

        // Bind the generator: probe it once so a dead backend fails the
        // initialization instead of every query
        match self.generator.health_check().await {
            Ok(true) => {}
            Ok(false) => {
                return Err(Error::unavailable(
                    CollaboratorKind::Generation,
                    format!("{} did not respond to the health probe", self.generator.name()),
                ))
            }
            Err(e) => {
                return Err(Error::unavailable(
                    CollaboratorKind::Generation,
                    e.to_string(),
                ))
            }
        }

        let report = IndexReport {
            chunks: store.len(),
            dimensions: index.dimensions(),
            fingerprint,
            elapsed_ms: start.elapsed().as_millis() as u64,
            indexed_at: Utc::now(),
        };

        let pipeline =
            RetrievalPipeline::new(Arc::clone(&self.embedder), store, index, self.top_k);
        let synthesizer = AnswerSynthesizer::new(Arc::clone(&self.generator));

        Ok((
            ReadyGeneration {
                pipeline,
                synthesizer,
            },
            report,
        ))
    }
}

/// SHA-256 over the chunk texts, with a separator so boundaries matter
fn fingerprint(store: &ChunkStore) -> String {
    let mut hasher = Sha256::new();
    for chunk in store.iter() {
        hasher.update(chunk.text.as_bytes());
        hasher.update([0u8]);
    }
    format!("{:x}", hasher.finalize())
}
