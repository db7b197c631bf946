//! Reclassifier configuration.

use super::engine::Engine;
use super::traits::Reclassification;
use crate::error::Result;
use ndarray::Array2;

/// How the candidates found in one scan are applied.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum MoveSchedule {
    /// Apply every candidate of the scan, in item order, then rescan.
    ///
    /// Decisions come from the snapshot taken at the start of the round,
    /// while each move is applied against the state left by the previous one.
    #[default]
    Batch,
    /// Apply only the candidate with the largest gain (earliest item on
    /// ties), then rescan.
    Greedy,
}

/// How the affinity matrix is kept current after moves.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum AffinityRefresh {
    /// Patch `E` in place after every move.
    #[default]
    Incremental,
    /// Patch during the round, then rebuild `E` from scratch once the round
    /// is applied.
    Rebuild,
}

/// Modularity-driven reclassification.
///
/// ```rust
/// use ndarray::array;
/// use nnra::{Nnra, Reclassification};
///
/// let s = array![
///     [1.0, 0.9, 0.9, 0.1, 0.1, 0.1],
///     [0.9, 1.0, 0.9, 0.1, 0.1, 0.1],
///     [0.9, 0.9, 1.0, 0.1, 0.1, 0.1],
///     [0.1, 0.1, 0.1, 1.0, 0.9, 0.9],
///     [0.1, 0.1, 0.1, 0.9, 1.0, 0.9],
///     [0.1, 0.1, 0.1, 0.9, 0.9, 1.0],
/// ];
/// let labels = Nnra::new(2).reclassify(&[0, 0, 1, 1, 1, 0], &s).unwrap();
/// assert_eq!(labels, vec![0, 0, 0, 1, 1, 1]);
/// ```
#[derive(Debug, Clone)]
pub struct Nnra {
    /// Number of classes.
    n_classes: usize,
    /// Maximum applied rounds per run.
    max_rounds: usize,
    /// Move application schedule.
    schedule: MoveSchedule,
    /// Affinity maintenance.
    refresh: AffinityRefresh,
}

impl Nnra {
    /// Create a reclassifier over `n_classes` classes with default settings.
    pub fn new(n_classes: usize) -> Self {
        Self {
            n_classes,
            max_rounds: 100,
            schedule: MoveSchedule::Batch,
            refresh: AffinityRefresh::Incremental,
        }
    }

    /// Set the maximum number of applied rounds before giving up.
    pub fn with_max_rounds(mut self, max_rounds: usize) -> Self {
        self.max_rounds = max_rounds;
        self
    }

    /// Set the move schedule.
    pub fn with_schedule(mut self, schedule: MoveSchedule) -> Self {
        self.schedule = schedule;
        self
    }

    /// Set the affinity refresh policy.
    pub fn with_refresh(mut self, refresh: AffinityRefresh) -> Self {
        self.refresh = refresh;
        self
    }

    /// Number of classes.
    pub fn n_classes(&self) -> usize {
        self.n_classes
    }

    /// Maximum applied rounds per run.
    pub fn max_rounds(&self) -> usize {
        self.max_rounds
    }

    /// Move schedule.
    pub fn schedule(&self) -> MoveSchedule {
        self.schedule
    }

    /// Affinity refresh policy.
    pub fn refresh(&self) -> AffinityRefresh {
        self.refresh
    }

    /// Build an engine over `ids` with this configuration.
    pub fn engine<I>(
        &self,
        ids: Vec<I>,
        labels: &[usize],
        similarity: Array2<f64>,
    ) -> Result<Engine<I>> {
        Engine::with_config(ids, labels, similarity, self)
    }
}

impl Reclassification for Nnra {
    fn reclassify(&self, labels: &[usize], similarity: &Array2<f64>) -> Result<Vec<usize>> {
        let ids: Vec<usize> = (0..labels.len()).collect();
        let mut engine = self.engine(ids, labels, similarity.clone())?;
        let _ = engine.run()?;
        Ok(engine.into_labels())
    }

    fn n_classes(&self) -> usize {
        self.n_classes
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::Error;
    use ndarray::array;

    #[test]
    fn test_builder() {
        let nnra = Nnra::new(3)
            .with_max_rounds(7)
            .with_schedule(MoveSchedule::Greedy)
            .with_refresh(AffinityRefresh::Rebuild);
        assert_eq!(nnra.n_classes(), 3);
        assert_eq!(nnra.max_rounds(), 7);
        assert_eq!(nnra.schedule(), MoveSchedule::Greedy);
        assert_eq!(nnra.refresh(), AffinityRefresh::Rebuild);
    }

    #[test]
    fn test_reclassify_rejects_bad_input() {
        let s = array![[1.0, 0.5], [0.5, 1.0]];
        assert_eq!(
            Nnra::new(2).reclassify(&[0, 2], &s),
            Err(Error::LabelOutOfRange {
                index: 1,
                label: 2,
                n_classes: 2
            })
        );
        assert!(matches!(
            Nnra::new(0).reclassify(&[0, 0], &s),
            Err(Error::InvalidClusterCount { requested: 0, .. })
        ));
        assert!(matches!(
            Nnra::new(2).with_max_rounds(0).reclassify(&[0, 1], &s),
            Err(Error::InvalidParameter { name: "max_rounds", .. })
        ));
    }
}
