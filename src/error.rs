//!
//! Error type shared by every solver in the crate
//!
use crate::network::{Capacity, Cost, Vertex};

/// Errors raised while building or solving a flow network
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum FlowError {
    /// an edge or a terminal refers to a vertex outside `[0, n)`
    #[error("vertex {vertex} is out of range (vertex count is {vertex_count})")]
    VertexOutOfRange { vertex: Vertex, vertex_count: usize },

    /// edges must be added with a non-negative capacity
    #[error("capacity must be non-negative, got {capacity}")]
    NegativeCapacity { capacity: Capacity },

    #[error("source and sink are the same vertex {0}")]
    SourceIsSink(Vertex),

    /// A negative cycle is reachable from the source.
    ///
    /// `sent` and `cost` are what earlier rounds of the same call already
    /// pushed into the residual network.
    #[error("negative cycle reachable from the source (committed flow {sent}, cost {cost})")]
    NegativeCycle { sent: Capacity, cost: Cost },

    /// The sink became unreachable before an exact demand was met.
    #[error("sink unreachable with remaining demand (committed flow {sent}, cost {cost})")]
    Infeasible { sent: Capacity, cost: Cost },

    /// a flow or cost total left the 64-bit range
    #[error("flow or cost arithmetic overflowed a 64-bit integer")]
    Overflow,

    #[error("unknown algorithm name {0:?}")]
    ParseAlgorithm(String),
}

pub type Result<T> = std::result::Result<T, FlowError>;
