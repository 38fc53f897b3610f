//! Error types for the document QA agent

use thiserror::Error;

/// Result type alias for agent operations
pub type Result<T> = std::result::Result<T, Error>;

/// Which external collaborator failed
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CollaboratorKind {
    /// Text-to-vector embedding model
    Embedding,
    /// Text generation model
    Generation,
}

impl std::fmt::Display for CollaboratorKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Embedding => write!(f, "embedding"),
            Self::Generation => write!(f, "generation"),
        }
    }
}

/// Agent errors
#[derive(Debug, Error)]
pub enum Error {
    /// Document yielded no usable text
    #[error("Document is empty: no non-blank chunks to index")]
    EmptyDocument,

    /// Vector length differs from the index dimension
    #[error("Dimension mismatch: expected {expected}, got {actual}")]
    DimensionMismatch { expected: usize, actual: usize },

    /// Index build received no vectors
    #[error("Cannot build an index from an empty vector set")]
    EmptyIndex,

    /// Chunk id outside the stored range
    #[error("Chunk id {id} is out of range (store holds {len} chunks)")]
    IndexOutOfRange { id: usize, len: usize },

    /// Query issued before the agent reached Ready
    #[error("Agent is not ready (current state: {0})")]
    NotReady(String),

    /// A second initialize arrived while one was in flight
    #[error("Initialization already in progress")]
    InitializeInProgress,

    /// Retrieval found nothing to build a context from
    #[error("No relevant chunks found")]
    NoResults,

    /// Collaborator unreachable
    #[error("{kind} collaborator unavailable: {reason}")]
    CollaboratorUnavailable {
        kind: CollaboratorKind,
        reason: String,
    },

    /// Embedding error
    #[error("Embedding generation failed: {0}")]
    Embedding(String),

    /// Answer generation error
    #[error("Answer generation failed: {0}")]
    Generation(String),

    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(String),

    /// File parsing error
    #[error("Failed to parse file '{filename}': {message}")]
    FileParse { filename: String, message: String },

    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl Error {
    /// Create a dimension mismatch error
    pub fn dimension_mismatch(expected: usize, actual: usize) -> Self {
        Self::DimensionMismatch { expected, actual }
    }

    /// Create an out-of-range error
    pub fn out_of_range(id: usize, len: usize) -> Self {
        Self::IndexOutOfRange { id, len }
    }

    /// Create a not-ready error naming the current state
    pub fn not_ready(state: impl Into<String>) -> Self {
        Self::NotReady(state.into())
    }

    /// Create a collaborator-unavailable error
    pub fn unavailable(kind: CollaboratorKind, reason: impl Into<String>) -> Self {
        Self::CollaboratorUnavailable {
            kind,
            reason: reason.into(),
        }
    }

    /// Create an embedding error
    pub fn embedding(message: impl Into<String>) -> Self {
        Self::Embedding(message.into())
    }

    /// Create a generation error
    pub fn generation(message: impl Into<String>) -> Self {
        Self::Generation(message.into())
    }

    /// Create a configuration error
    pub fn config(message: impl Into<String>) -> Self {
        Self::Config(message.into())
    }

    /// Create a file parse error
    pub fn file_parse(filename: impl Into<String>, message: impl Into<String>) -> Self {
        Self::FileParse {
            filename: filename.into(),
            message: message.into(),
        }
    }
}
