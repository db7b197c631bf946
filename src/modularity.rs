//! Modularity of a class partition and the single-move gain estimate.
//!
//! ## Modularity
//!
//! ```text
//! Q = Σ_a ( E[a][a] − (Σ_b E[a][b])² )
//! ```
//!
//! The diagonal term is the share of similarity mass kept inside class `a`;
//! the squared row sum is what a random assignment with the same class
//! totals would keep there. Higher is better.
//!
//! ## Gain of a single move
//!
//! Moving item `i` from `old` to `new`, all other items fixed:
//!
//! ```text
//! ΔQ ≈ (A[i][new] − A[i][old]) − ( d·(a_new − a_old) + d²/2 )
//!
//! d     = Σ_b A[i][b]
//! a_c   = Σ_b E[c][b]
//! ```
//!
//! This is O(K) instead of the O(K²) needed to recompute `Q`, and is a
//! first-order estimate: it ignores interactions between several items moved
//! in the same round.

use crate::affinity::{AffinityMatrix, MembershipMatrix};

/// Modularity `Q` of the partition summarized by `affinity`.
pub fn modularity(affinity: &AffinityMatrix) -> f64 {
    (0..affinity.n_classes())
        .map(|a| {
            let row = affinity.row_sum(a);
            affinity.get(a, a) - row * row
        })
        .sum()
}

/// Estimated change in modularity if `item` moves from `old` to `new`.
pub fn delta_modularity(
    membership: &MembershipMatrix,
    affinity: &AffinityMatrix,
    item: usize,
    old: usize,
    new: usize,
) -> f64 {
    let d_new = membership.get(item, new);
    let d_old = membership.get(item, old);
    let d_all = membership.row_sum(item);
    let a_old = affinity.row_sum(old);
    let a_new = affinity.row_sum(new);

    (d_new - d_old) - (d_all * (a_new - a_old) + d_all * d_all / 2.0)
}
