//! Affinity (class × class) and membership (item × class) matrices.
//!
//! Both are derived from the similarity matrix `S`, the current
//! [`Grouping`], and the total mass `T`:
//!
//! ```text
//! E[a][b] = Σ_{i∈G_a, j∈G_b} S[i][j] / T      (affinity)
//! A[i][b] = Σ_{j∈G_b}        S[i][j] / T      (membership)
//! ```
//!
//! `E` is symmetric and sums to 1. Each row of `A` sums to `rowSum(S[i]) / T`
//! whatever the partition, since the classes cover every item.
//!
//! After a move, `A` changes only in the two affected columns and `E` is
//! patched in place by [`AffinityMatrix::apply_move`] instead of being
//! rebuilt.

use crate::partition::Grouping;
use ndarray::{Array2, ArrayView1};

/// Normalized inter-class similarity mass (`E`, K×K).
#[derive(Debug, Clone, PartialEq)]
pub struct AffinityMatrix {
    values: Array2<f64>,
}

impl AffinityMatrix {
    /// Build `E` from scratch.
    ///
    /// Only the upper triangle is summed; the lower triangle is mirrored so
    /// `E[a][b] == E[b][a]` holds bit for bit.
    pub fn build(similarity: &Array2<f64>, grouping: &Grouping, total: f64) -> Self {
        let k = grouping.n_classes();
        let mut values = Array2::zeros((k, k));
        for a in 0..k {
            for b in a..k {
                let mut mass = 0.0;
                for &i in grouping.members(a) {
                    for &j in grouping.members(b) {
                        mass += similarity[[i, j]];
                    }
                }
                let v = mass / total;
                values[[a, b]] = v;
                values[[b, a]] = v;
            }
        }
        Self { values }
    }

    /// Number of classes.
    pub fn n_classes(&self) -> usize {
        self.values.nrows()
    }

    /// `E[a][b]`.
    pub fn get(&self, a: usize, b: usize) -> f64 {
        self.values[[a, b]]
    }

    /// `Σ_b E[class][b]`: the share of total mass touching `class`.
    pub fn row_sum(&self, class: usize) -> f64 {
        self.values.row(class).sum()
    }

    /// Sum of every entry (1 up to rounding).
    pub fn total(&self) -> f64 {
        self.values.sum()
    }

    /// Underlying matrix.
    pub fn as_array(&self) -> &Array2<f64> {
        &self.values
    }

    /// Patch `E` after moving one item from `old` to `new`.
    ///
    /// `row` is the item's membership row *before* the membership matrix is
    /// refreshed for this move. Every write sets both mirror entries to the
    /// same value, so symmetry is exact. The total is preserved: the diagonal
    /// change `A[new] - A[old]` is cancelled by the two cross entries, and the
    /// remaining classes gain on `new` what they lose on `old`.
    pub fn apply_move(&mut self, row: ArrayView1<'_, f64>, old: usize, new: usize) {
        debug_assert_ne!(old, new);
        let e = &mut self.values;

        e[[old, old]] -= row[old];
        e[[new, new]] += row[new];

        let cross = e[[old, new]] + (row[old] - row[new]) / 2.0;
        e[[old, new]] = cross;
        e[[new, old]] = cross;

        for c in 0..e.nrows() {
            if c == old || c == new {
                continue;
            }
            let half = row[c] / 2.0;

            let from_old = e[[old, c]] - half;
            e[[old, c]] = from_old;
            e[[c, old]] = from_old;

            let to_new = e[[new, c]] + half;
            e[[new, c]] = to_new;
            e[[c, new]] = to_new;
        }
    }
}

/// Normalized item-to-class similarity mass (`A`, N×K).
#[derive(Debug, Clone, PartialEq)]
pub struct MembershipMatrix {
    values: Array2<f64>,
}

impl MembershipMatrix {
    /// Build `A` from scratch.
    pub fn build(similarity: &Array2<f64>, grouping: &Grouping, total: f64) -> Self {
        let n = similarity.nrows();
        let mut values = Array2::zeros((n, grouping.n_classes()));
        for (class, _) in grouping.iter() {
            fill_column(&mut values, similarity, grouping, total, class);
        }
        Self { values }
    }

    /// Number of items.
    pub fn n_items(&self) -> usize {
        self.values.nrows()
    }

    /// Number of classes.
    pub fn n_classes(&self) -> usize {
        self.values.ncols()
    }

    /// `A[item][class]`.
    pub fn get(&self, item: usize, class: usize) -> f64 {
        self.values[[item, class]]
    }

    /// Row of `item`.
    pub fn row(&self, item: usize) -> ArrayView1<'_, f64> {
        self.values.row(item)
    }

    /// `Σ_b A[item][b]`, independent of the partition.
    pub fn row_sum(&self, item: usize) -> f64 {
        self.values.row(item).sum()
    }

    /// Class with the largest membership for `item`.
    ///
    /// Ties go to the lowest class index.
    pub fn best_class(&self, item: usize) -> usize {
        let mut best = 0;
        let mut best_value = f64::NEG_INFINITY;
        for (class, &v) in self.values.row(item).iter().enumerate() {
            if v > best_value {
                best = class;
                best_value = v;
            }
        }
        best
    }

    /// Underlying matrix.
    pub fn as_array(&self) -> &Array2<f64> {
        &self.values
    }

    /// Recompute the columns of `classes` from the current grouping.
    ///
    /// A move only changes the source and target columns; every other column
    /// already equals what a full rebuild would produce.
    pub(crate) fn refresh_classes(
        &mut self,
        similarity: &Array2<f64>,
        grouping: &Grouping,
        total: f64,
        classes: &[usize],
    ) {
        for &class in classes {
            fill_column(&mut self.values, similarity, grouping, total, class);
        }
    }
}

fn fill_column(
    values: &mut Array2<f64>,
    similarity: &Array2<f64>,
    grouping: &Grouping,
    total: f64,
    class: usize,
) {
    let members = grouping.members(class);
    for i in 0..similarity.nrows() {
        let mass: f64 = members.iter().map(|&j| similarity[[i, j]]).sum();
        values[[i, class]] = mass / total;
    }
}
