//! Similarity input: validation, total mass, and conversions.
//!
//! The engine consumes a dense N×N matrix `S` where `S[i][j]` is the
//! similarity between documents `i` and `j`. Entries must be finite,
//! non-negative and symmetric; they need not be normalized.
//!
//! The **total mass** `T = Σᵢ Σⱼ S[i][j]` (diagonal included) normalizes
//! every affinity and membership value, so `T == 0` is rejected up front
//! rather than letting NaN leak into the modularity arithmetic. So is a
//! mass that overflows to infinity, which would zero out every affinity.

use crate::error::{Error, Result};
use ndarray::Array2;

/// Relative tolerance for the symmetry check.
const SYMMETRY_TOL: f64 = 1e-9;

/// Validate `similarity` as an `n × n` input and return its total mass.
pub(crate) fn validate(similarity: &Array2<f64>, n: usize) -> Result<f64> {
    if n == 0 {
        return Err(Error::EmptyInput);
    }
    let (rows, cols) = similarity.dim();
    if rows != n {
        return Err(Error::DimensionMismatch {
            expected: n,
            found: rows,
        });
    }
    if cols != n {
        return Err(Error::DimensionMismatch {
            expected: n,
            found: cols,
        });
    }

    for ((row, col), &value) in similarity.indexed_iter() {
        if !value.is_finite() || value < 0.0 {
            return Err(Error::InvalidSimilarity { row, col, value });
        }
        if col > row {
            let mirror = similarity[[col, row]];
            if (value - mirror).abs() > SYMMETRY_TOL * value.abs().max(1.0) {
                return Err(Error::AsymmetricSimilarity { row, col });
            }
        }
    }

    let total = total_mass(similarity);
    if !total.is_finite() || total <= 0.0 {
        return Err(Error::DegenerateInput);
    }
    Ok(total)
}

/// Sum of all entries, diagonal included.
pub fn total_mass(similarity: &Array2<f64>) -> f64 {
    similarity.sum()
}

/// Build a dense similarity matrix from nested rows.
///
/// Every row must have as many entries as there are rows.
///
/// ```rust
/// use nnra::similarity_from_rows;
///
/// let s = similarity_from_rows(&[vec![1.0, 0.5], vec![0.5, 1.0]]).unwrap();
/// assert_eq!(s.dim(), (2, 2));
/// ```
pub fn similarity_from_rows(rows: &[Vec<f64>]) -> Result<Array2<f64>> {
    let n = rows.len();
    if n == 0 {
        return Err(Error::EmptyInput);
    }
    let mut out = Array2::zeros((n, n));
    for (i, row) in rows.iter().enumerate() {
        if row.len() != n {
            return Err(Error::ShapeMismatch {
                expected: format!("{n}x{n}"),
                actual: format!("row {i} has {} entries", row.len()),
            });
        }
        for (j, &v) in row.iter().enumerate() {
            out[[i, j]] = v;
        }
    }
    Ok(out)
}

/// Build a dense similarity matrix from a weighted undirected graph.
///
/// Parallel edges accumulate; self-loops land on the diagonal once.
#[cfg(feature = "graph")]
pub fn similarity_from_graph<N>(graph: &petgraph::graph::UnGraph<N, f64>) -> Result<Array2<f64>> {
    use petgraph::visit::EdgeRef;

    let n = graph.node_count();
    if n == 0 {
        return Err(Error::EmptyInput);
    }
    let mut out = Array2::zeros((n, n));
    for edge in graph.edge_references() {
        let i = edge.source().index();
        let j = edge.target().index();
        let w = *edge.weight();
        out[[i, j]] += w;
        if i != j {
            out[[j, i]] += w;
        }
    }
    Ok(out)
}
