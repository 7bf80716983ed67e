use crate::distance::squared_l2;
use crate::error::{CoreError, CoreResult};
use crate::vector::{DishId, Embedding};
use serde::{Deserialize, Serialize};
use tracing::debug;

/// Persisted form of the index: the opaque snapshot file is a bincode
/// encoding of this struct. Everything outside the loader treats the file
/// as a blob.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct IndexSnapshot {
    pub dimension: usize,
    pub entries: Vec<(DishId, Vec<f32>)>,
}

/// Exact nearest-neighbor index over a flat list of embeddings.
///
/// Built once at load time and read-only afterwards, so it can be shared
/// behind an `Arc` across concurrent search requests with no locking.
/// A rebuild is a fresh `FlatIndex` swapped in under a single write of the
/// shared pointer; readers never observe a partially-built index.
#[derive(Debug)]
pub struct FlatIndex {
    dimension: usize,
    // Insertion order is preserved: it is the tie-break for equal distances.
    entries: Vec<(DishId, Embedding)>,
}

impl FlatIndex {
    /// Builds an index from (id, embedding) pairs. The dimension is fixed by
    /// the first entry; any entry of a different length fails the build.
    pub fn build(entries: Vec<(DishId, Embedding)>) -> CoreResult<Self> {
        let dimension = match entries.first() {
            Some((_, embedding)) => embedding.len(),
            None => {
                return Err(CoreError::Configuration(
                    "cannot infer dimension from an empty entry list".to_string(),
                ))
            }
        };
        Self::build_with_dimension(dimension, entries)
    }

    /// Builds an index with an explicit dimension. Allows an empty index.
    pub fn build_with_dimension(
        dimension: usize,
        entries: Vec<(DishId, Embedding)>,
    ) -> CoreResult<Self> {
        if dimension == 0 {
            return Err(CoreError::Configuration(
                "dimension must be greater than 0".to_string(),
            ));
        }
        for (id, embedding) in &entries {
            if embedding.len() != dimension {
                debug!(id, expected = dimension, actual = embedding.len(), "Rejecting entry");
                return Err(CoreError::DimensionMismatch {
                    expected: dimension,
                    actual: embedding.len(),
                });
            }
        }
        Ok(FlatIndex { dimension, entries })
    }

    /// Builds an index from a persisted snapshot.
    pub fn from_snapshot(snapshot: IndexSnapshot) -> CoreResult<Self> {
        let entries = snapshot
            .entries
            .into_iter()
            .map(|(id, vec)| (id, Embedding::from(vec)))
            .collect();
        Self::build_with_dimension(snapshot.dimension, entries)
    }

    /// Returns the `k` nearest neighbors of `query` as (id, squared L2
    /// distance) pairs, ascending by distance.
    ///
    /// Ties are broken by insertion order (the scan order combined with a
    /// stable sort). `k` larger than the index returns every entry; `k == 0`
    /// returns an empty list. A query whose length differs from the index
    /// dimension fails with `DimensionMismatch`, never reshapes.
    pub fn query(&self, query: &Embedding, k: usize) -> CoreResult<Vec<(DishId, f32)>> {
        if query.len() != self.dimension {
            return Err(CoreError::DimensionMismatch {
                expected: self.dimension,
                actual: query.len(),
            });
        }

        let mut scored: Vec<(DishId, f32)> = Vec::with_capacity(self.entries.len());
        for (id, embedding) in &self.entries {
            let dist = squared_l2(query.view(), embedding.view())?;
            scored.push((*id, dist));
        }

        // sort_by is stable, so equal distances keep insertion order.
        scored.sort_by(|a, b| a.1.total_cmp(&b.1));
        scored.truncate(k);
        Ok(scored)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn dimensions(&self) -> usize {
        self.dimension
    }
}
