//!
//! FlowEdge and constant cost function `ConstCost` definition
//!
use super::{Capacity, Cost};

/// Edge of a petgraph flow graph
///
/// * `capacity()`: capacity `u(e)`
///
/// `[0, u], c`
pub trait FlowEdge {
    /// Capacity of the edge, Upper limit of the flow
    fn capacity(&self) -> Capacity;
}

/// Edge of a petgraph flow graph with constant cost
///
/// * `cost()`: cost per unit flow `c(e)`
pub trait ConstCost {
    /// constant Cost-per-unit-flow of the edge
    fn cost(&self) -> Cost;
}

/// `(capacity, cost)` tuples can be used as edge weights directly
impl FlowEdge for (Capacity, Cost) {
    fn capacity(&self) -> Capacity {
        self.0
    }
}

impl ConstCost for (Capacity, Cost) {
    fn cost(&self) -> Cost {
        self.1
    }
}
