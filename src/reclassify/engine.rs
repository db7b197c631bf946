//! The reclassification engine.
//!
//! ## State machine
//!
//! ```text
//!            ┌──────────── apply round ◀────────────┐
//!            ▼                                      │
//!        SCANNING ── candidates ≠ ∅ ─▶ HAS_CANDIDATES
//!            │
//!            └── candidates = ∅ ─▶ CONVERGED
//! ```
//!
//! Each scan reads one snapshot of the membership and affinity matrices.
//! The resulting moves are then applied one after another: each sets the
//! label, updates the grouping, patches `E` with the item's membership row
//! as it stands before the move, and refreshes `A`. A later move in the same
//! round therefore patches against state already changed by earlier ones,
//! even though it was chosen from the snapshot.
//!
//! Oscillation is possible because the gain is a per-item estimate, so runs
//! are capped at [`Nnra::max_rounds`] applied rounds.

use super::nnra::{AffinityRefresh, MoveSchedule, Nnra};
use super::proposer::{self, Candidate};
use crate::affinity::{AffinityMatrix, MembershipMatrix};
use crate::error::{Error, Result};
use crate::modularity::modularity;
use crate::partition::Grouping;
use ndarray::Array2;
use tracing::{debug, info, trace, warn};

/// Summary of one [`Engine::run`] call.
#[derive(Debug, Clone, PartialEq)]
pub struct RunReport {
    /// Rounds in which at least one move was applied.
    pub rounds: usize,
    /// Moves applied in each round.
    pub moves_per_round: Vec<usize>,
    /// Modularity before the first round.
    pub modularity_before: f64,
    /// Modularity at convergence.
    pub modularity_after: f64,
}

impl RunReport {
    /// Total moves applied.
    pub fn total_moves(&self) -> usize {
        self.moves_per_round.iter().sum()
    }
}

/// Owns the similarity input and all state derived from the labelling.
#[derive(Debug, Clone)]
pub struct Engine<I> {
    ids: Vec<I>,
    labels: Vec<usize>,
    similarity: Array2<f64>,
    total: f64,
    grouping: Grouping,
    affinity: AffinityMatrix,
    membership: MembershipMatrix,
    config: Nnra,
    converged: bool,
}

impl<I> Engine<I> {
    /// Create an engine over `n_classes` classes with default settings.
    pub fn new(
        ids: Vec<I>,
        labels: &[usize],
        similarity: Array2<f64>,
        n_classes: usize,
    ) -> Result<Self> {
        Self::with_config(ids, labels, similarity, &Nnra::new(n_classes))
    }

    /// Create an engine with an explicit configuration.
    ///
    /// Fails if `similarity` is not a valid `N × N` matrix with positive total
    /// mass, if `ids` and `labels` differ in length, or if any label is
    /// outside `0..n_classes`.
    pub fn with_config(
        ids: Vec<I>,
        labels: &[usize],
        similarity: Array2<f64>,
        config: &Nnra,
    ) -> Result<Self> {
        let n = labels.len();
        let k = config.n_classes();
        if k == 0 {
            return Err(Error::InvalidClusterCount {
                requested: k,
                n_items: n,
            });
        }
        if config.max_rounds() == 0 {
            return Err(Error::InvalidParameter {
                name: "max_rounds",
                message: "must be at least 1",
            });
        }
        if ids.len() != n {
            return Err(Error::DimensionMismatch {
                expected: n,
                found: ids.len(),
            });
        }

        let total = crate::similarity::validate(&similarity, n)?;
        let grouping = Grouping::from_labels(labels, k)?;
        let affinity = AffinityMatrix::build(&similarity, &grouping, total);
        let membership = MembershipMatrix::build(&similarity, &grouping, total);

        Ok(Self {
            ids,
            labels: labels.to_vec(),
            similarity,
            total,
            grouping,
            affinity,
            membership,
            config: config.clone(),
            converged: false,
        })
    }

    /// Reclassify until no improving move remains.
    ///
    /// Calling `run` again after convergence scans once, finds nothing and
    /// returns a report with zero rounds.
    pub fn run(&mut self) -> Result<RunReport> {
        let modularity_before = self.modularity();
        let mut moves_per_round = Vec::new();

        loop {
            let candidates = self.propose();
            debug!(
                round = moves_per_round.len() + 1,
                candidates = candidates.len(),
                "scanned"
            );

            if candidates.is_empty() {
                self.converged = true;
                let report = RunReport {
                    rounds: moves_per_round.len(),
                    moves_per_round,
                    modularity_before,
                    modularity_after: self.modularity(),
                };
                info!(
                    rounds = report.rounds,
                    moves = report.total_moves(),
                    modularity = report.modularity_after,
                    "converged"
                );
                return Ok(report);
            }

            if moves_per_round.len() >= self.config.max_rounds() {
                warn!(
                    rounds = moves_per_round.len(),
                    pending = candidates.len(),
                    "round limit reached"
                );
                return Err(Error::ConvergenceFailure {
                    iterations: moves_per_round.len(),
                });
            }

            let applied = match self.config.schedule() {
                MoveSchedule::Batch => candidates,
                MoveSchedule::Greedy => proposer::best(&candidates).into_iter().collect(),
            };
            for &candidate in &applied {
                self.apply(candidate);
            }
            if self.config.refresh() == AffinityRefresh::Rebuild {
                self.affinity = AffinityMatrix::build(&self.similarity, &self.grouping, self.total);
            }
            moves_per_round.push(applied.len());
        }
    }

    /// Candidate moves against the current state.
    pub fn propose(&self) -> Vec<Candidate> {
        proposer::propose(&self.labels, &self.membership, &self.affinity)
    }

    pub(crate) fn apply(&mut self, candidate: Candidate) {
        let Candidate { item, from, to, delta } = candidate;
        trace!(item, from, to, delta, "move");

        self.labels[item] = to;
        self.grouping.move_item(item, from, to);
        self.affinity.apply_move(self.membership.row(item), from, to);
        self.membership
            .refresh_classes(&self.similarity, &self.grouping, self.total, &[from, to]);
        self.converged = false;
    }

    /// Current label per item.
    pub fn labels(&self) -> &[usize] {
        &self.labels
    }

    /// Consume the engine, returning the labels.
    pub fn into_labels(self) -> Vec<usize> {
        self.labels
    }

    /// Item identifiers, in input order.
    pub fn ids(&self) -> &[I] {
        &self.ids
    }

    /// `(id, label)` pairs in input order.
    pub fn assignments(&self) -> impl Iterator<Item = (&I, usize)> + '_ {
        self.ids.iter().zip(self.labels.iter().copied())
    }

    /// Number of classes.
    pub fn n_classes(&self) -> usize {
        self.grouping.n_classes()
    }

    /// Items grouped by class.
    pub fn grouping(&self) -> &Grouping {
        &self.grouping
    }

    /// Current affinity matrix `E`.
    pub fn affinity(&self) -> &AffinityMatrix {
        &self.affinity
    }

    /// Current membership matrix `A`.
    pub fn membership(&self) -> &MembershipMatrix {
        &self.membership
    }

    /// Modularity of the current affinity matrix.
    pub fn modularity(&self) -> f64 {
        modularity(&self.affinity)
    }

    /// Total similarity mass `T`.
    pub fn total_mass(&self) -> f64 {
        self.total
    }

    /// Whether the last scan found no candidates.
    pub fn is_converged(&self) -> bool {
        self.converged
    }
}
