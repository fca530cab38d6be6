//!
//! Single-source shortest paths on the residue graph.
//!
//! Only edges with spare capacity are traversed. Each search returns the
//! distances and the predecessor edge `(tail, slot)` of every reached vertex.
//!
use super::residue::FlowNetwork;
use super::{Cost, Vertex};
use std::cmp::Reverse;
use std::collections::{BinaryHeap, VecDeque};

/// Why a search gave up
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub(crate) enum SearchError {
    /// a negative cycle is reachable from the source
    NegativeCycle,
    /// a distance left the 64-bit range
    Overflow,
}

/// `du + cost` of an edge
fn extend(du: Cost, cost: Cost) -> Result<Cost, SearchError> {
    du.checked_add(cost).ok_or(SearchError::Overflow)
}

/// Shortest path tree from `source`
#[derive(Debug, Clone)]
pub(crate) struct ShortestPaths {
    source: Vertex,
    /// distance from the source, `None` if unreached
    pub dist: Vec<Option<Cost>>,
    /// residue edge `(tail, slot)` entering each reached vertex
    pub prev: Vec<Option<(Vertex, usize)>>,
}

impl ShortestPaths {
    fn new(vertex_count: usize, source: Vertex) -> ShortestPaths {
        let mut dist = vec![None; vertex_count];
        dist[source] = Some(0);
        ShortestPaths {
            source,
            dist,
            prev: vec![None; vertex_count],
        }
    }

    /// Relax `u -> v` through slot `slot` with tentative distance `d`
    fn relax(&mut self, u: Vertex, slot: usize, v: Vertex, d: Cost) -> bool {
        if self.dist[v].map_or(true, |dv| d < dv) {
            self.dist[v] = Some(d);
            self.prev[v] = Some((u, slot));
            true
        } else {
            false
        }
    }

    ///
    /// Edges of the tree path from the source to `sink`, in source-to-sink order.
    ///
    /// `None` if `sink` was not reached.
    ///
    pub fn path_to(&self, sink: Vertex) -> Option<Vec<(Vertex, usize)>> {
        self.dist[sink]?;
        let mut path = Vec::new();
        let mut v = sink;
        // a tree path has fewer edges than vertices
        for _ in 0..self.dist.len() {
            if v == self.source {
                path.reverse();
                return Some(path);
            }
            let (u, slot) = self.prev[v]?;
            path.push((u, slot));
            v = u;
        }
        None
    }
}

///
/// Bellman-Ford: up to V rounds relaxing every edge.
///
/// If the V-th round still improves a distance, a negative cycle is reachable.
///
pub(crate) fn bellman_ford(
    network: &FlowNetwork,
    source: Vertex,
) -> Result<ShortestPaths, SearchError> {
    let n = network.vertex_count();
    let mut sp = ShortestPaths::new(n, source);
    for round in 0..n {
        let mut updated = false;
        for u in 0..n {
            let du = match sp.dist[u] {
                Some(du) => du,
                None => continue,
            };
            for (slot, e) in network.edges(u).iter().enumerate() {
                if e.capacity > 0 && sp.relax(u, slot, e.to, extend(du, e.cost)?) {
                    updated = true;
                }
            }
        }
        if !updated {
            return Ok(sp);
        }
        if round + 1 == n {
            return Err(SearchError::NegativeCycle);
        }
    }
    Ok(sp)
}

///
/// Queue-based Bellman-Ford (SPFA).
///
/// A vertex is enqueued only when its distance improves and it is not already
/// pending. Without a negative cycle no vertex is enqueued V times.
///
pub(crate) fn spfa(network: &FlowNetwork, source: Vertex) -> Result<ShortestPaths, SearchError> {
    let n = network.vertex_count();
    let mut sp = ShortestPaths::new(n, source);
    let mut pending = vec![false; n];
    let mut enqueued = vec![0usize; n];
    let mut queue = VecDeque::new();
    pending[source] = true;
    queue.push_back(source);

    while let Some(u) = queue.pop_front() {
        pending[u] = false;
        let du = match sp.dist[u] {
            Some(du) => du,
            None => continue,
        };
        for (slot, e) in network.edges(u).iter().enumerate() {
            if e.capacity <= 0 {
                continue;
            }
            if sp.relax(u, slot, e.to, extend(du, e.cost)?) && !pending[e.to] {
                enqueued[e.to] += 1;
                if enqueued[e.to] >= n {
                    return Err(SearchError::NegativeCycle);
                }
                pending[e.to] = true;
                queue.push_back(e.to);
            }
        }
    }
    Ok(sp)
}

///
/// Dijkstra on reduced costs `cost(u,v) + potential[u] - potential[v]`.
///
/// Reduced costs of edges with spare capacity must be non-negative.
/// Distances in the result are reduced distances.
/// A reduced distance outside the 64-bit range is `SearchError::Overflow`.
///
pub(crate) fn dijkstra(
    network: &FlowNetwork,
    source: Vertex,
    potential: &[Cost],
) -> Result<ShortestPaths, SearchError> {
    let mut sp = ShortestPaths::new(network.vertex_count(), source);
    let mut heap = BinaryHeap::new();
    heap.push(Reverse((0, source)));

    while let Some(Reverse((du, u))) = heap.pop() {
        // stale entry
        if sp.dist[u].map_or(true, |d| du > d) {
            continue;
        }
        for (slot, e) in network.edges(u).iter().enumerate() {
            if e.capacity <= 0 {
                continue;
            }
            // widened so that only the final sum has to fit
            let dv = i128::from(du) + i128::from(e.cost) + i128::from(potential[u])
                - i128::from(potential[e.to]);
            let dv = Cost::try_from(dv).map_err(|_| SearchError::Overflow)?;
            if sp.relax(u, slot, e.to, dv) {
                heap.push(Reverse((dv, e.to)));
            }
        }
    }
    Ok(sp)
}
