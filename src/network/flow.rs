//! Flow reporting
//! - RealizedEdge, `FlowNetwork::realized_edges`
//! - `FlowNetwork::from_graph` (petgraph DiGraph into FlowNetwork)
//! - Flow and its validity checks
use super::flow_edge::{ConstCost, FlowEdge};
use super::residue::{EdgeHandle, FlowNetwork, NetworkBuilder};
use super::{Capacity, Cost, Vertex};
use crate::error::{FlowError, Result};
use petgraph::graph::{DiGraph, EdgeIndex, NodeIndex};
use petgraph::visit::EdgeRef; // for EdgeReference.id()
use petgraph::Direction;
use std::collections::HashMap;

/// Flow carried by one user-added edge
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub struct RealizedEdge {
    pub from: Vertex,
    pub to: Vertex,
    /// original capacity
    pub capacity: Capacity,
    /// flow currently pushed through the edge
    pub flow: Capacity,
}

impl RealizedEdge {
    /// capacity left for more flow
    pub fn residual(&self) -> Capacity {
        self.capacity - self.flow
    }
}

impl std::fmt::Display for RealizedEdge {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}->{} {}/{}", self.from, self.to, self.flow, self.capacity)
    }
}

impl FlowNetwork {
    /// Flow on a single user edge
    pub fn realized_edge(&self, handle: EdgeHandle) -> RealizedEdge {
        let (forward, backward) = self.pair(handle);
        RealizedEdge {
            from: handle.from(),
            to: forward.to,
            capacity: forward.capacity + backward.capacity,
            flow: backward.capacity,
        }
    }

    ///
    /// Flow on every user edge, in insertion order.
    ///
    /// Reports zero flow before any solve. Reading it never changes the network.
    ///
    pub fn realized_edges(&self) -> Vec<RealizedEdge> {
        self.handles()
            .iter()
            .map(|&handle| self.realized_edge(handle))
            .collect()
    }

    ///
    /// Convert a petgraph DiGraph into a FlowNetwork.
    ///
    /// Node `NodeIndex(i)` becomes vertex `i`, and the `i`-th user edge is
    /// `EdgeIndex(i)`, so `Flow::from_network` maps results back onto `graph`.
    ///
    pub fn from_graph<N, E: FlowEdge + ConstCost>(graph: &DiGraph<N, E>) -> Result<FlowNetwork> {
        let mut builder = NetworkBuilder::new(graph.node_count());
        for er in graph.edge_references() {
            let ew = er.weight();
            builder.add_edge(
                er.source().index(),
                er.target().index(),
                ew.capacity(),
                ew.cost(),
            )?;
        }
        Ok(builder.build())
    }
}

/// Flow definitions
///
/// Flow f is a mapping of f(e) to each edge e of a petgraph graph
#[derive(PartialEq, Eq, Debug, Clone, Default)]
pub struct Flow(HashMap<EdgeIndex, Capacity>);

impl Flow {
    pub fn zero<N, E>(graph: &DiGraph<N, E>) -> Flow {
        Flow(graph.edge_indices().map(|e| (e, 0)).collect())
    }
    pub fn from_vec(vec: &[(EdgeIndex, Capacity)]) -> Flow {
        Flow(vec.iter().copied().collect())
    }
    /// Flow of a network built by `FlowNetwork::from_graph`
    pub fn from_network(network: &FlowNetwork) -> Flow {
        Flow(
            network
                .realized_edges()
                .iter()
                .enumerate()
                .map(|(i, re)| (EdgeIndex::new(i), re.flow))
                .collect(),
        )
    }
    pub fn get(&self, e: EdgeIndex) -> Option<Capacity> {
        self.0.get(&e).copied()
    }
    pub fn has(&self, e: EdgeIndex) -> bool {
        self.0.contains_key(&e)
    }
    ///
    /// sum of `cost(e) * f(e)`; edges without a flow value count as zero
    ///
    /// `FlowError::Overflow` if the sum leaves the 64-bit range.
    ///
    pub fn total_cost<N, E: ConstCost>(&self, graph: &DiGraph<N, E>) -> Result<Cost> {
        graph.edge_references().try_fold(0 as Cost, |total, er| {
            er.weight()
                .cost()
                .checked_mul(self.get(er.id()).unwrap_or(0))
                .and_then(|c| total.checked_add(c))
                .ok_or(FlowError::Overflow)
        })
    }
}

///
/// Check if the flow is valid, i.e. it satisfies
/// - flows of all edges are defined
/// - capacity constraint
/// - flow constraint on every vertex except `source` and `sink`
///
pub fn is_valid_flow<N, E: FlowEdge>(
    flow: &Flow,
    graph: &DiGraph<N, E>,
    source: NodeIndex,
    sink: NodeIndex,
) -> bool {
    is_defined_for_all_edges(flow, graph)
        && is_in_capacity(flow, graph)
        && is_satisfying_flow_constraint(flow, graph, source, sink)
}

///
/// Check if the flow contains all edges
///
pub fn is_defined_for_all_edges<N, E>(flow: &Flow, graph: &DiGraph<N, E>) -> bool {
    graph.edge_indices().all(|e| flow.has(e))
}

///
/// For each edge, the flow must satisfy `0 <= flow <= capacity`.
/// This function checks it
///
pub fn is_in_capacity<N, E: FlowEdge>(flow: &Flow, graph: &DiGraph<N, E>) -> bool {
    graph.edge_references().all(|er| match flow.get(er.id()) {
        Some(f) => (0 <= f) && (f <= er.weight().capacity()),
        None => false,
    })
}

///
/// For each node other than `source` and `sink`,
/// (the sum of out-going flows) should be equal to (the sum of in-coming flows).
///
pub fn is_satisfying_flow_constraint<N, E>(
    flow: &Flow,
    graph: &DiGraph<N, E>,
    source: NodeIndex,
    sink: NodeIndex,
) -> bool {
    graph
        .node_indices()
        .filter(|&v| v != source && v != sink)
        .all(|v| {
            let in_flow: Capacity = graph
                .edges_directed(v, Direction::Incoming)
                .map(|er| flow.get(er.id()).unwrap_or(0))
                .sum();
            let out_flow: Capacity = graph
                .edges_directed(v, Direction::Outgoing)
                .map(|er| flow.get(er.id()).unwrap_or(0))
                .sum();
            in_flow == out_flow
        })
}

//
// tests
//
#[cfg(test)]
mod tests {
    use super::super::mocks::{mock_diamond, mock_parallel_and_loops};
    use super::*;

    #[test]
    fn flow_valid_tests() {
        let g = mock_diamond();
        let (s, t) = (NodeIndex::new(0), NodeIndex::new(3));

        // one unit along 0-1-3 and one along 0-2-3
        let f1 = Flow::from_vec(&[
            (EdgeIndex::new(0), 1),
            (EdgeIndex::new(1), 1),
            (EdgeIndex::new(2), 1),
            (EdgeIndex::new(3), 1),
        ]);
        assert!(is_valid_flow(&f1, &g, s, t));
        assert_eq!(f1.total_cost(&g), Ok(5));

        // this flow overs the capacity
        let f2 = Flow::from_vec(&[
            (EdgeIndex::new(0), 2),
            (EdgeIndex::new(1), 2),
            (EdgeIndex::new(2), 2),
            (EdgeIndex::new(3), 2),
        ]);
        assert!(is_defined_for_all_edges(&f2, &g));
        assert!(!is_in_capacity(&f2, &g));
        assert!(is_satisfying_flow_constraint(&f2, &g, s, t));
        assert!(!is_valid_flow(&f2, &g, s, t));

        // this is a flow which not satisfies the flow constraint
        let f3 = Flow::from_vec(&[
            (EdgeIndex::new(0), 2),
            (EdgeIndex::new(1), 0),
            (EdgeIndex::new(2), 1),
            (EdgeIndex::new(3), 0),
        ]);
        assert!(is_in_capacity(&f3, &g));
        assert!(!is_satisfying_flow_constraint(&f3, &g, s, t));

        // this is a partial flow
        let f4 = Flow::from_vec(&[(EdgeIndex::new(0), 1)]);
        assert!(!is_defined_for_all_edges(&f4, &g));
        assert!(!is_valid_flow(&f4, &g, s, t));
    }

    #[test]
    fn realized_edges_before_solve() {
        let g = mock_parallel_and_loops();
        let net = FlowNetwork::from_graph(&g).unwrap();
        let edges = net.realized_edges();
        assert_eq!(edges.len(), g.edge_count());
        for (er, re) in g.edge_references().zip(edges.iter()) {
            assert_eq!(re.from, er.source().index());
            assert_eq!(re.to, er.target().index());
            assert_eq!(re.capacity, er.weight().capacity);
            assert_eq!(re.flow, 0);
            assert_eq!(re.residual(), re.capacity);
        }
        assert_eq!(Flow::from_network(&net), Flow::zero(&g));
        // reading twice gives the same answer
        assert_eq!(net.realized_edges(), edges);
    }

    #[test]
    fn tuple_weights_convert() {
        let g: DiGraph<(), (Capacity, Cost)> =
            DiGraph::from_edges(&[(0, 1, (3, 1)), (1, 2, (2, -1))]);
        let net = FlowNetwork::from_graph(&g).unwrap();
        assert_eq!(net.vertex_count(), 3);
        let e = net.realized_edges()[1];
        assert_eq!(e.to_string(), "1->2 0/2");
    }

    #[test]
    fn total_cost_overflow() {
        let g: DiGraph<(), (Capacity, Cost)> =
            DiGraph::from_edges(&[(0, 1, (3, Cost::MAX)), (1, 2, (3, 1))]);
        let one = Flow::from_vec(&[(EdgeIndex::new(0), 1), (EdgeIndex::new(1), 1)]);
        assert_eq!(one.total_cost(&g), Err(FlowError::Overflow));
        let two = Flow::from_vec(&[(EdgeIndex::new(0), 2)]);
        assert_eq!(two.total_cost(&g), Err(FlowError::Overflow));
        // missing edges count as zero flow
        let only_first = Flow::from_vec(&[(EdgeIndex::new(0), 1)]);
        assert_eq!(only_first.total_cost(&g), Ok(Cost::MAX));
    }
}
