//! Candidate moves.

use crate::affinity::{AffinityMatrix, MembershipMatrix};
use crate::modularity::delta_modularity;

/// A proposed reclassification of one item with positive estimated gain.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Candidate {
    /// Item index.
    pub item: usize,
    /// Class the item is in now.
    pub from: usize,
    /// Class the item is most attracted to.
    pub to: usize,
    /// Estimated modularity gain (always `> 0`).
    pub delta: f64,
}

/// Scan every item against one snapshot of `membership`/`affinity`.
///
/// An item is proposed when its best class (largest membership, lowest index
/// on ties) differs from its label and the estimated gain is strictly
/// positive. Candidates come back in item order.
pub fn propose(
    labels: &[usize],
    membership: &MembershipMatrix,
    affinity: &AffinityMatrix,
) -> Vec<Candidate> {
    let mut candidates = Vec::new();
    for (item, &from) in labels.iter().enumerate() {
        let to = membership.best_class(item);
        if to == from {
            continue;
        }
        let delta = delta_modularity(membership, affinity, item, from, to);
        if delta > 0.0 {
            candidates.push(Candidate {
                item,
                from,
                to,
                delta,
            });
        }
    }
    candidates
}

/// Candidate with the largest gain; ties go to the earliest item.
pub(crate) fn best(candidates: &[Candidate]) -> Option<Candidate> {
    let mut out: Option<Candidate> = None;
    for &c in candidates {
        match out {
            Some(b) if c.delta <= b.delta => {}
            _ => out = Some(c),
        }
    }
    out
}
