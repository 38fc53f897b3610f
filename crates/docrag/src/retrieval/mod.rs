//! Chunk storage, exact vector search, and context retrieval

pub mod index;
pub mod pipeline;
pub mod store;

pub use index::{SearchHit, VectorIndex};
pub use pipeline::RetrievalPipeline;
pub use store::{Chunk, ChunkStore};
