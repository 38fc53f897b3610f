//! Question-to-context retrieval

use std::sync::Arc;
use std::time::Instant;

use crate::error::{Error, Result};
use crate::providers::EmbeddingProvider;

use super::index::VectorIndex;
use super::store::ChunkStore;

/// Turns a question into a ranked context string.
///
/// Owns the immutable chunk store and vector index of one agent generation
/// plus the embedding collaborator used for query vectors. Read-only after
/// construction, so concurrent retrievals need no synchronization.
pub struct RetrievalPipeline {
    embedder: Arc<dyn EmbeddingProvider>,
    store: ChunkStore,
    index: VectorIndex,
    top_k: usize,
}

impl RetrievalPipeline {
    /// Create a pipeline over a built store/index pair
    pub fn new(
        embedder: Arc<dyn EmbeddingProvider>,
        store: ChunkStore,
        index: VectorIndex,
        top_k: usize,
    ) -> Self {
        Self {
            embedder,
            store,
            index,
            top_k,
        }
    }

    /// Retrieve context for a question using the configured retrieval width
    pub async fn retrieve(&self, question: &str) -> Result<String> {
        self.retrieve_k(question, self.top_k).await
    }

    /// Retrieve context for a question using an explicit retrieval width.
    ///
    /// Embeds the question, searches the index, and joins the matched chunk
    /// texts in rank order with one blank line between them. Fails with
    /// `NoResults` when the search comes back empty; deciding the user-facing
    /// fallback text is the agent's job, not the pipeline's.
    pub async fn retrieve_k(&self, question: &str, k: usize) -> Result<String> {
        let start = Instant::now();

        let query_embedding = self.embedder.embed(question).await?;
        let hits = self.index.search(&query_embedding, k)?;

        if hits.is_empty() {
            return Err(Error::NoResults);
        }

        let mut texts = Vec::with_capacity(hits.len());
        for hit in &hits {
            texts.push(self.store.get(hit.chunk_id)?.text.clone());
        }
        let context = texts.join("\n\n");

        tracing::debug!(
            "Retrieved {} chunks in {}ms (best distance {:.4})",
            hits.len(),
            start.elapsed().as_millis(),
            hits[0].distance
        );

        Ok(context)
    }
}
