//!
//! utils: Graphviz rendering and path formatting for log output
//!
use super::flow::{Flow, RealizedEdge};
use super::residue::FlowNetwork;
use super::Vertex;
use itertools::Itertools;
use petgraph::dot::Dot;
use petgraph::graph::{DiGraph, Graph, NodeIndex};
use petgraph::EdgeType;
use std::fmt::Display;

///
/// Render a residue path as `s -> v1 -> ... -> t`.
///
pub(crate) fn format_path(
    network: &FlowNetwork,
    source: Vertex,
    path: &[(Vertex, usize)],
) -> String {
    std::iter::once(source)
        .chain(path.iter().map(|&(v, slot)| network.edge(v, slot).to))
        .join(" -> ")
}

/// Current flow of a network as a petgraph DiGraph, node weights are vertex ids
pub fn to_graph(network: &FlowNetwork) -> DiGraph<Vertex, RealizedEdge> {
    let mut graph = DiGraph::with_capacity(network.vertex_count(), network.edge_count());
    for v in 0..network.vertex_count() {
        graph.add_node(v);
    }
    for re in network.realized_edges() {
        graph.add_edge(NodeIndex::new(re.from), NodeIndex::new(re.to), re);
    }
    graph
}

///
/// DOT source of a graph with Display weights
///
pub fn dot<N, E, Ty>(graph: &Graph<N, E, Ty>) -> String
where
    N: Display,
    E: Display,
    Ty: EdgeType,
{
    format!("{}", Dot::with_config(graph, &[]))
}

/// Log the DOT source of a graph at trace level
pub fn draw<N, E, Ty>(graph: &Graph<N, E, Ty>)
where
    N: Display,
    E: Display,
    Ty: EdgeType,
{
    log::trace!("{}", dot(graph));
}

/// Log the current flow of a network as DOT at trace level
pub fn draw_network(network: &FlowNetwork) {
    if log::log_enabled!(log::Level::Trace) {
        draw(&to_graph(network));
    }
}

///
/// Log a petgraph graph with a flow on it, each edge labelled `weight f=flow`
///
pub fn draw_with_flow<N, E: Display>(graph: &DiGraph<N, E>, flow: &Flow) {
    if log::log_enabled!(log::Level::Trace) {
        let labelled = graph.map(
            |v, _| v.index(),
            |e, ew| match flow.get(e) {
                Some(f) => format!("{} f={}", ew, f),
                None => format!("{} f=?", ew),
            },
        );
        draw(&labelled);
    }
}
