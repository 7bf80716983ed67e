//! Squared Euclidean distance between embeddings.

use crate::error::{CoreError, CoreResult};
use ndarray::ArrayView1;

/// Calculates the squared L2 distance between two vectors.
///
/// Lower values mean more similar. The square root is never taken: the
/// ordering of neighbors is identical and the sqrt only costs cycles.
///
/// Returns `CoreError::DimensionMismatch` if vectors have different lengths.
pub fn squared_l2(v1: ArrayView1<f32>, v2: ArrayView1<f32>) -> CoreResult<f32> {
    if v1.len() != v2.len() {
        return Err(CoreError::DimensionMismatch {
            expected: v1.len(),
            actual: v2.len(),
        });
    }

    let diff = &v1 - &v2;
    Ok(diff.dot(&diff))
}
