use super::base::{FlowEdgeBase, FlowGraph};
use super::Cost;
use petgraph::graph::{Graph, NodeIndex};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

/// install env_logger once per test binary; RUST_LOG controls the level
pub fn init_logger() {
    let _ = env_logger::builder().is_test(true).try_init();
}

/// mock graph generation functions
///
/// ```text
///     1
///   /   \
/// 0       3
///   \   /
///     2
/// ```
///
/// 0->1 [0,2] 1, 0->2 [0,1] 2, 1->3 [0,1] 1, 2->3 [0,2] 1
///
/// max flow is 2, and its min cost is 5 (0-1-3 costs 2, 0-2-3 costs 3)
pub fn mock_diamond() -> FlowGraph {
    let mut graph: FlowGraph = Graph::new();
    let a = graph.add_node(());
    let b = graph.add_node(());
    let c = graph.add_node(());
    let d = graph.add_node(());
    graph.add_edge(a, b, FlowEdgeBase::new(2, 1));
    graph.add_edge(a, c, FlowEdgeBase::new(1, 2));
    graph.add_edge(b, d, FlowEdgeBase::new(1, 1));
    graph.add_edge(c, d, FlowEdgeBase::new(2, 1));
    graph
}

/// parallel edges between 0->1 and 2->3, self loops on 0 and 2.
/// max flow from 0 to 3 is 6
pub fn mock_parallel_and_loops() -> FlowGraph {
    let mut graph: FlowGraph = Graph::new();
    let s = graph.add_node(());
    let a = graph.add_node(());
    let b = graph.add_node(());
    let t = graph.add_node(());
    graph.add_edge(s, a, FlowEdgeBase::new(3, 1));
    graph.add_edge(s, a, FlowEdgeBase::new(2, 5));
    graph.add_edge(s, s, FlowEdgeBase::new(4, 0));
    graph.add_edge(a, t, FlowEdgeBase::new(3, 1));
    graph.add_edge(s, b, FlowEdgeBase::new(2, 2));
    graph.add_edge(b, b, FlowEdgeBase::new(1, 1));
    graph.add_edge(b, t, FlowEdgeBase::new(1, 1));
    graph.add_edge(b, t, FlowEdgeBase::new(5, 3));
    graph.add_edge(a, b, FlowEdgeBase::new(1, 0));
    graph
}

/// negative costs, no cycle. min cost max flow from 0 to 3 is (3, 4)
pub fn mock_negative_cost_network() -> FlowGraph {
    let mut graph: FlowGraph = Graph::new();
    let s = graph.add_node(());
    let a = graph.add_node(());
    let b = graph.add_node(());
    let t = graph.add_node(());
    graph.add_edge(s, a, FlowEdgeBase::new(2, 2));
    graph.add_edge(s, b, FlowEdgeBase::new(2, 4));
    graph.add_edge(a, b, FlowEdgeBase::new(1, -3));
    graph.add_edge(a, t, FlowEdgeBase::new(1, 1));
    graph.add_edge(b, t, FlowEdgeBase::new(2, -1));
    graph
}

/// cycle 1->2->1 of cost -2 with spare capacity, reachable from 0
pub fn mock_negative_cycle_network() -> FlowGraph {
    let mut graph: FlowGraph = Graph::new();
    let s = graph.add_node(());
    let a = graph.add_node(());
    let b = graph.add_node(());
    let t = graph.add_node(());
    graph.add_edge(s, a, FlowEdgeBase::new(1, 1));
    graph.add_edge(a, b, FlowEdgeBase::new(2, -3));
    graph.add_edge(b, a, FlowEdgeBase::new(2, 1));
    graph.add_edge(b, t, FlowEdgeBase::new(1, 1));
    graph
}

///
/// random network of `n` nodes and `m` edges with capacity in `[0, 5]`
/// and cost in `[min_cost, min_cost + 9]`.
/// Parallel edges and self loops appear as they come.
///
pub fn mock_random_network(seed: u64, n: usize, m: usize, min_cost: Cost) -> FlowGraph {
    let mut rng = StdRng::seed_from_u64(seed);
    let mut graph: FlowGraph = Graph::new();
    for _ in 0..n {
        graph.add_node(());
    }
    for _ in 0..m {
        let v = NodeIndex::new(rng.gen_range(0..n));
        let w = NodeIndex::new(rng.gen_range(0..n));
        let capacity = rng.gen_range(0..=5);
        let cost = rng.gen_range(min_cost..=min_cost + 9);
        graph.add_edge(v, w, FlowEdgeBase::new(capacity, cost));
    }
    graph
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn random_network_is_reproducible() {
        let a = mock_random_network(7, 5, 10, -2);
        let b = mock_random_network(7, 5, 10, -2);
        assert_eq!(a.edge_count(), 10);
        let edges = |g: &FlowGraph| -> Vec<_> {
            g.raw_edges()
                .iter()
                .map(|e| (e.source(), e.target(), e.weight.capacity, e.weight.cost))
                .collect()
        };
        let (ea, eb) = (edges(&a), edges(&b));
        assert_eq!(ea, eb);
        assert!(ea.iter().all(|&(_, _, c, w)| (0..=5).contains(&c) && (-2..=7).contains(&w)));
    }
}
