//! Modularity-driven reclassification of labelled items.
//!
//! Given documents with (possibly noisy) class labels and a pairwise
//! similarity matrix, move each document to the class it is most attracted
//! to whenever the move raises modularity, until no such move remains.
//!
//! ## One round
//!
//! 1. **Scan**: for every item, find the class with the largest membership
//!    `A[i][·]`. If it differs from the item's label, estimate the modularity
//!    gain of moving there; keep the move if the gain is positive.
//! 2. **Apply**: apply the kept moves in item order, updating labels,
//!    grouping, `E` and `A` after each one.
//! 3. Repeat until a scan keeps nothing.
//!
//! [`MoveSchedule::Greedy`] applies only the best move of each scan instead,
//! which trades more rounds for a strictly greedy trajectory.
//!
//! ## Usage
//!
//! ```rust
//! use ndarray::array;
//! use nnra::Engine;
//!
//! let s = array![
//!     [1.0, 0.8, 0.1],
//!     [0.8, 1.0, 0.1],
//!     [0.1, 0.1, 1.0],
//! ];
//! let mut engine = Engine::new(vec!["a", "b", "c"], &[0, 0, 1], s, 2).unwrap();
//! let report = engine.run().unwrap();
//! assert_eq!(report.rounds, 0);
//! assert_eq!(engine.labels(), &[0, 0, 1]);
//! ```

mod engine;
mod nnra;
mod proposer;
mod traits;

pub use engine::{Engine, RunReport};
pub use nnra::{AffinityRefresh, MoveSchedule, Nnra};
pub use proposer::{propose, Candidate};
pub use traits::Reclassification;
