//! Document text extraction

mod extract;

pub use extract::extract_chunks;
