//! Exact nearest-neighbor index over fixed-dimension vectors

use std::cmp::Ordering;

use crate::error::{Error, Result};

/// One search match: a chunk id and its squared Euclidean distance
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SearchHit {
    /// Positional chunk id, equal to the vector's build-time position
    pub chunk_id: usize,
    /// Squared L2 distance to the query (lower is closer)
    pub distance: f32,
}

/// In-memory exact vector index.
///
/// Vectors are stored row-major in one flat buffer; the row position is the
/// chunk id. Built once, never mutated afterward, so concurrent searches
/// need no locking.
#[derive(Debug, Clone)]
pub struct VectorIndex {
    /// Row-major vector data, `count * dimensions` floats
    data: Vec<f32>,
    dimensions: usize,
    count: usize,
}

/// Squared Euclidean distance between two equal-length vectors
fn squared_l2(a: &[f32], b: &[f32]) -> f32 {
    a.iter().zip(b).map(|(x, y)| (x - y) * (x - y)).sum()
}

impl VectorIndex {
    /// Build an index from one vector per chunk, in chunk-id order.
    ///
    /// The dimension is taken from the first vector; every other vector must
    /// match it exactly.
    pub fn build(vectors: Vec<Vec<f32>>) -> Result<Self> {
        let first = vectors.first().ok_or(Error::EmptyIndex)?;
        let dimensions = first.len();
        if dimensions == 0 {
            return Err(Error::dimension_mismatch(1, 0));
        }

        let count = vectors.len();
        let mut data = Vec::with_capacity(count * dimensions);
        for vector in &vectors {
            if vector.len() != dimensions {
                return Err(Error::dimension_mismatch(dimensions, vector.len()));
            }
            data.extend_from_slice(vector);
        }

        Ok(Self {
            data,
            dimensions,
            count,
        })
    }

    /// Exact brute-force search for the `k` nearest stored vectors.
    ///
    /// Results ascend by distance; equal distances resolve by ascending chunk
    /// id so repeated searches are reproducible. `k` is clamped to the stored
    /// count and `k == 0` yields an empty result.
    pub fn search(&self, query: &[f32], k: usize) -> Result<Vec<SearchHit>> {
        if query.len() != self.dimensions {
            return Err(Error::dimension_mismatch(self.dimensions, query.len()));
        }

        let k = k.min(self.count);
        if k == 0 {
            return Ok(Vec::new());
        }

        let mut hits: Vec<SearchHit> = (0..self.count)
            .map(|chunk_id| {
                let row = &self.data[chunk_id * self.dimensions..(chunk_id + 1) * self.dimensions];
                SearchHit {
                    chunk_id,
                    distance: squared_l2(query, row),
                }
            })
            .collect();

        hits.sort_by(|a, b| {
            a.distance
                .partial_cmp(&b.distance)
                .unwrap_or(Ordering::Equal)
                .then_with(|| a.chunk_id.cmp(&b.chunk_id))
        });
        hits.truncate(k);

        Ok(hits)
    }

    /// Number of stored vectors
    pub fn len(&self) -> usize {
        self.count
    }

    /// Whether the index holds no vectors
    pub fn is_empty(&self) -> bool {
        self.count == 0
    }

    /// Dimension every stored and query vector must have
    pub fn dimensions(&self) -> usize {
        self.dimensions
    }
}
