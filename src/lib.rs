//! # nnra
//!
//! Label repair by modularity: given documents with initial class labels and
//! a pairwise similarity matrix, reassign documents to the classes they are
//! most attracted to, accepting only moves that raise modularity, until no
//! improving move remains.
//!
//! The similarity matrix is an input; building it (embeddings, kernels,
//! graphs) is left to the caller. With the `graph` feature, a weighted
//! `petgraph` graph can be turned into one.

/// Error types used across `nnra`.
pub mod error;

pub mod affinity;
pub mod modularity;
pub mod partition;
pub mod reclassify;
pub mod similarity;
pub mod tags;

#[cfg(test)]
mod engine_tests;

pub use affinity::{AffinityMatrix, MembershipMatrix};
pub use error::{Error, Result};
pub use modularity::{delta_modularity, modularity};
pub use partition::Grouping;
pub use reclassify::{
    propose, AffinityRefresh, Candidate, Engine, MoveSchedule, Nnra, Reclassification, RunReport,
};
pub use similarity::{similarity_from_rows, total_mass};
pub use tags::{fix_tags, TagSet};

#[cfg(feature = "graph")]
pub use similarity::similarity_from_graph;
