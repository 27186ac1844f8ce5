use thiserror::Error;

pub mod edge_catalog;
pub mod expander;
pub mod forest;
pub mod multi_start;
pub mod reactive_controller;
mod greedy_partitioner;
mod grasp_partitioner;
mod reactive_grasp_partitioner;

pub use edge_catalog::EdgeCatalog;
pub use forest::{Component, Forest};
pub use multi_start::{solve, ReactiveSettings, Solution, Variant};
pub use reactive_controller::{AlphaRecord, ReactiveController};
pub use greedy_partitioner::Greedy;
pub use grasp_partitioner::Grasp;
pub use reactive_grasp_partitioner::ReactiveGrasp;


/// Common errors thrown by algorithms.
#[derive(Clone, Copy, Debug, PartialEq, Error)]
#[non_exhaustive]
pub enum Error {
    /// Zero parts were requested, or more parts than the graph has vertices.
    #[error("cannot split {vertices} vertices into {requested} parts")]
    InvalidPartitionCount { requested: usize, vertices: usize },

    /// The graph ran out of mutually non-adjacent edges before every part got a seed.
    #[error("only {seeded} of {requested} parts could be seeded with non-adjacent edges")]
    NotEnoughSeeds { requested: usize, seeded: usize },

    /// The graph has more connected components than requested parts, so no
    /// forest of that many trees can span it.
    #[error("the graph has {components} connected components, more than the {requested} requested parts")]
    TooManyComponents { components: usize, requested: usize },

    /// Unvisited vertices remain but no candidate edge reaches them.
    #[error("construction stalled with {visited} of {total} vertices placed")]
    ConstructionStalled { visited: usize, total: usize },

    /// The randomization strength must lie in (0, 1].
    #[error("alpha must lie in (0, 1], got {alpha}")]
    InvalidAlpha { alpha: f64 },

    /// The reactive variant needs at least one alpha to choose from.
    #[error("no alpha values to choose from")]
    EmptyAlphaSet,

    /// Restart counts and re-weighting periods must be positive.
    #[error("iteration counts must be positive")]
    InvalidIterations,

    /// The alpha probabilities cannot be sampled from.
    #[error("alpha probabilities do not form a distribution")]
    DegenerateAlphaWeights,

    /// Input sets don't have matching lengths.
    #[error("input sets don't have the same length (expected {expected} items, got {actual})")]
    InputLenMismatch { expected: usize, actual: usize },
}

impl Error {
    /// Whether the error stems from the requested configuration rather than
    /// from a construction run.
    pub fn is_configuration(&self) -> bool {
        !matches!(self, Error::ConstructionStalled { .. })
    }
}

/// Rejects alpha values outside (0, 1].
pub(crate) fn check_alpha(alpha: f64) -> Result<(), Error> {
    if alpha > 0.0 && alpha <= 1.0 {
        Ok(())
    } else {
        Err(Error::InvalidAlpha { alpha })
    }
}
