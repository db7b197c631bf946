//! Reclassification traits.

use crate::error::Result;
use ndarray::Array2;

/// Trait for algorithms that repair an initial labelling.
pub trait Reclassification {
    /// Reclassify items given their initial labels and pairwise similarities.
    ///
    /// Returns one class id per item, in `0..n_classes()`.
    fn reclassify(&self, labels: &[usize], similarity: &Array2<f64>) -> Result<Vec<usize>>;

    /// Get the number of classes.
    fn n_classes(&self) -> usize;
}
