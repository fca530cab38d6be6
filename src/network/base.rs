//! # `FlowGraph`
//!
//! petgraph representation of a flow network with constant cost,
//! convertible into a `FlowNetwork` by `FlowNetwork::from_graph`.
//!
//! Any `DiGraph` whose edge is `FlowEdgeRaw` converts the same way.
//!
//! `FlowEdgeRaw` has
//! * `capacity`
//! * `cost` Cost per unit flow
//! and additional information about an edge in `info`
//!
use super::flow_edge::{ConstCost, FlowEdge};
use super::{Capacity, Cost};
use petgraph::graph::DiGraph;

/// FlowGraph definition
pub type FlowGraph = DiGraph<(), FlowEdgeBase>;

/// Edge attributes used in FlowGraph.
///
/// It has
/// * Capacity u(e)
/// * Cost per unit flow c(e)
///
/// It can contain additional information in T.
#[derive(Debug, Copy, Clone)]
pub struct FlowEdgeRaw<T> {
    /// capacity (upper limit of flow) of the edge u(e)
    pub capacity: Capacity,
    /// cost per unit flow
    pub cost: Cost,
    /// auxiliary informations
    pub info: T,
}

pub type FlowEdgeBase = FlowEdgeRaw<()>;

impl FlowEdgeBase {
    pub fn new(capacity: Capacity, cost: Cost) -> FlowEdgeBase {
        FlowEdgeBase {
            capacity,
            cost,
            info: (),
        }
    }
}

impl<T> FlowEdgeRaw<T> {
    pub fn with_info(capacity: Capacity, cost: Cost, info: T) -> FlowEdgeRaw<T> {
        FlowEdgeRaw {
            capacity,
            cost,
            info,
        }
    }
}

impl<T> std::fmt::Display for FlowEdgeRaw<T> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "[0,{}] {}", self.capacity, self.cost)
    }
}

impl<T> FlowEdge for FlowEdgeRaw<T> {
    fn capacity(&self) -> Capacity {
        self.capacity
    }
}

impl<T> ConstCost for FlowEdgeRaw<T> {
    fn cost(&self) -> Cost {
        self.cost
    }
}
