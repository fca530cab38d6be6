//!
//! Maximum flow solvers
//! - Ford-Fulkerson (DFS augmenting paths)
//! - Dinic (BFS level graph and blocking flow)
//!
//! Both traverse with an explicit stack, so the search depth does not grow
//! the call stack.
//!
use super::residue::FlowNetwork;
use super::utils::format_path;
use super::{check_terminals, Capacity, Vertex};
use crate::error::{FlowError, Result};
use log::{debug, trace};
use std::collections::VecDeque;

/// Maximum flow algorithm variants
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, Default)]
pub enum MaxFlowAlgorithm {
    /// DFS augmenting paths. For small graphs, pseudo-polynomial.
    FordFulkerson,
    /// Blocking flows on BFS level graphs. `O(V^2 E)`.
    #[default]
    Dinic,
}

impl std::fmt::Display for MaxFlowAlgorithm {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        match self {
            MaxFlowAlgorithm::FordFulkerson => write!(f, "ford-fulkerson"),
            MaxFlowAlgorithm::Dinic => write!(f, "dinic"),
        }
    }
}

impl std::str::FromStr for MaxFlowAlgorithm {
    type Err = FlowError;
    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s {
            "ford-fulkerson" => Ok(MaxFlowAlgorithm::FordFulkerson),
            "dinic" => Ok(MaxFlowAlgorithm::Dinic),
            _ => Err(FlowError::ParseAlgorithm(s.to_string())),
        }
    }
}

impl FlowNetwork {
    ///
    /// Push a maximum flow from `source` to `sink` into this network.
    ///
    /// Flow already present (from an earlier solve) is kept and extended,
    /// and the returned value counts only the newly pushed units.
    ///
    pub fn max_flow(
        &mut self,
        algorithm: MaxFlowAlgorithm,
        source: Vertex,
        sink: Vertex,
    ) -> Result<Capacity> {
        check_terminals(self, source, sink)?;
        debug!("max flow {} from {} to {}", algorithm, source, sink);
        let flow = match algorithm {
            MaxFlowAlgorithm::FordFulkerson => ford_fulkerson(self, source, sink),
            MaxFlowAlgorithm::Dinic => dinic(self, source, sink),
        }?;
        debug!("max flow {} finished with flow={}", algorithm, flow);
        Ok(flow)
    }
}

fn add_flow(total: Capacity, amount: Capacity) -> Result<Capacity> {
    total.checked_add(amount).ok_or(FlowError::Overflow)
}

//
// Ford-Fulkerson
//

///
/// Find any path from `source` to `sink` through edges with spare capacity.
///
/// Each stack frame is `(vertex, next slot to try)`; the edge used to leave a
/// frame is the one just before its cursor.
///
fn find_augmenting_path(
    network: &FlowNetwork,
    source: Vertex,
    sink: Vertex,
    visited: &mut [bool],
) -> Option<Vec<(Vertex, usize)>> {
    visited.fill(false);
    visited[source] = true;
    let mut stack: Vec<(Vertex, usize)> = vec![(source, 0)];

    while let Some(top) = stack.last_mut() {
        let (u, cursor) = *top;
        if u == sink {
            let path = stack[..stack.len() - 1]
                .iter()
                .map(|&(v, next)| (v, next - 1))
                .collect();
            return Some(path);
        }
        let edges = network.edges(u);
        match edges[cursor..]
            .iter()
            .position(|e| e.capacity > 0 && !visited[e.to])
        {
            Some(offset) => {
                let slot = cursor + offset;
                top.1 = slot + 1;
                let v = edges[slot].to;
                visited[v] = true;
                stack.push((v, 0));
            }
            None => {
                stack.pop();
            }
        }
    }
    None
}

pub(crate) fn ford_fulkerson(
    network: &mut FlowNetwork,
    source: Vertex,
    sink: Vertex,
) -> Result<Capacity> {
    let mut visited = vec![false; network.vertex_count()];
    let mut total = 0;
    while let Some(path) = find_augmenting_path(network, source, sink, &mut visited) {
        let amount = network.bottleneck(&path);
        trace!("augment {} along {}", amount, format_path(network, source, &path));
        network.augment(&path, amount);
        total = add_flow(total, amount)?;
    }
    Ok(total)
}

//
// Dinic
//

/// BFS distance from `source` over edges with spare capacity
fn levels(network: &FlowNetwork, source: Vertex) -> Vec<Option<usize>> {
    let mut level = vec![None; network.vertex_count()];
    let mut queue = VecDeque::new();
    level[source] = Some(0);
    queue.push_back(source);
    while let Some(v) = queue.pop_front() {
        let next = level[v].map(|l| l + 1);
        for e in network.edges(v) {
            if e.capacity > 0 && level[e.to].is_none() {
                level[e.to] = next;
                queue.push_back(e.to);
            }
        }
    }
    level
}

///
/// Saturate every shortest path of the level graph.
///
/// `cursor[v]` is the current arc of `v`. It only moves forward once the edge
/// it points at is saturated or leads to a dead end, so each edge is rejected
/// at most once per phase. Dead ends lose their level.
///
fn blocking_flow(
    network: &mut FlowNetwork,
    source: Vertex,
    sink: Vertex,
    level: &mut [Option<usize>],
) -> Result<Capacity> {
    let mut cursor = vec![0usize; network.vertex_count()];
    let mut path: Vec<(Vertex, usize)> = Vec::new();
    let mut total = 0;
    let mut u = source;

    loop {
        if u == sink {
            let amount = network.bottleneck(&path);
            trace!("augment {} along {}", amount, format_path(network, source, &path));
            network.augment(&path, amount);
            total = add_flow(total, amount)?;
            // retreat to the tail of the first saturated edge
            let cut = path
                .iter()
                .position(|&(v, slot)| network.edge(v, slot).capacity == 0)
                .unwrap_or(0);
            u = path[cut].0;
            path.truncate(cut);
            continue;
        }

        let next_level = level[u].map(|l| l + 1);
        let edges = network.edges(u);
        while cursor[u] < edges.len() {
            let e = &edges[cursor[u]];
            if e.capacity > 0 && level[e.to].is_some() && level[e.to] == next_level {
                break;
            }
            cursor[u] += 1;
        }

        if cursor[u] < edges.len() {
            let slot = cursor[u];
            path.push((u, slot));
            u = edges[slot].to;
        } else {
            level[u] = None;
            match path.pop() {
                Some((v, _)) => {
                    cursor[v] += 1;
                    u = v;
                }
                None => break,
            }
        }
    }
    Ok(total)
}

pub(crate) fn dinic(network: &mut FlowNetwork, source: Vertex, sink: Vertex) -> Result<Capacity> {
    let mut total = 0;
    loop {
        let mut level = levels(network, source);
        if level[sink].is_none() {
            break;
        }
        let pushed = blocking_flow(network, source, sink, &mut level)?;
        trace!("dinic phase pushed {}", pushed);
        total = add_flow(total, pushed)?;
    }
    Ok(total)
}
