//! Chunk storage with stable integer ids

use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};

/// One addressable unit of document text
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Chunk {
    /// Dense id, assigned in document order
    pub id: usize,
    /// Chunk text (may be empty for pages that extracted to nothing)
    pub text: String,
    /// Document position; equals `id` today, kept separate for future reordering
    pub order: usize,
}

/// Immutable store of a document's chunks, addressed by dense ids `0..n-1`
#[derive(Debug, Clone)]
pub struct ChunkStore {
    chunks: Vec<Chunk>,
}

impl ChunkStore {
    /// Ingest an ordered sequence of text chunks, assigning ids in input order.
    ///
    /// Individual empty chunks are retained so chunk ids stay aligned with
    /// page numbers. The whole sequence being empty, or every chunk being
    /// blank, fails with `EmptyDocument`.
    pub fn ingest(texts: Vec<String>) -> Result<Self> {
        if texts.iter().all(|t| t.trim().is_empty()) {
            return Err(Error::EmptyDocument);
        }

        let chunks = texts
            .into_iter()
            .enumerate()
            .map(|(id, text)| Chunk { id, text, order: id })
            .collect();

        Ok(Self { chunks })
    }

    /// Look up a chunk by id
    pub fn get(&self, id: usize) -> Result<&Chunk> {
        self.chunks
            .get(id)
            .ok_or_else(|| Error::out_of_range(id, self.chunks.len()))
    }

    /// Number of stored chunks
    pub fn len(&self) -> usize {
        self.chunks.len()
    }

    /// Whether the store holds no chunks
    pub fn is_empty(&self) -> bool {
        self.chunks.is_empty()
    }

    /// Chunk texts in id order, for the embedding step
    pub fn texts(&self) -> Vec<String> {
        self.chunks.iter().map(|c| c.text.clone()).collect()
    }

    /// Iterate chunks in id order
    pub fn iter(&self) -> impl Iterator<Item = &Chunk> {
        self.chunks.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn pages(texts: &[&str]) -> Vec<String> {
        texts.iter().map(|t| t.to_string()).collect()
    }

    #[test]
    fn ingest_assigns_dense_ids_in_input_order() {
        let store = ChunkStore::ingest(pages(&["alpha", "beta", "gamma"])).unwrap();

        assert_eq!(store.len(), 3);
        for (i, expected) in ["alpha", "beta", "gamma"].iter().enumerate() {
            let chunk = store.get(i).unwrap();
            assert_eq!(chunk.id, i);
            assert_eq!(chunk.order, i);
            assert_eq!(chunk.text, *expected);
        }
    }

    #[test]
    fn empty_sequence_is_rejected() {
        let err = ChunkStore::ingest(Vec::new()).unwrap_err();
        assert!(matches!(err, Error::EmptyDocument));
    }

    #[test]
    fn all_blank_chunks_are_rejected() {
        let err = ChunkStore::ingest(pages(&["", "   ", "\n\t"])).unwrap_err();
        assert!(matches!(err, Error::EmptyDocument));
    }

    #[test]
    fn individual_empty_chunks_are_retained_for_page_alignment() {
        let store = ChunkStore::ingest(pages(&["page one", "", "page three"])).unwrap();

        assert_eq!(store.len(), 3);
        assert_eq!(store.get(1).unwrap().text, "");
        assert_eq!(store.get(2).unwrap().text, "page three");
    }

    #[test]
    fn out_of_range_id_reports_the_bound() {
        let store = ChunkStore::ingest(pages(&["only"])).unwrap();

        let err = store.get(1).unwrap_err();
        assert!(matches!(err, Error::IndexOutOfRange { id: 1, len: 1 }));
    }
}
