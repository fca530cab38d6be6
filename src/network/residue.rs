//! Residue graph store
//! - ResidueEdge
//! - NetworkBuilder (growable adjacency lists, before `build`)
//! - FlowNetwork (frozen adjacency lists)
//! - EdgeHandle
//!
//! Every user edge `v -> w` with capacity `u` and cost `c` is stored as a pair
//!
//! ```text
//! v -> w  (u, +c)   forward
//! w -> v  (0, -c)   backward
//! ```
//!
//! where each side records the slot of the other in `rev`.
//! Pushing `d` units of flow moves `d` of capacity from forward to backward,
//! so `forward.capacity + backward.capacity` never changes.
//!
use super::{Capacity, Cost, Vertex};
use crate::error::{FlowError, Result};
use std::collections::VecDeque;

/// Edge attributes used in the residue graph
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub(crate) struct ResidueEdge {
    /// head vertex
    pub to: Vertex,
    /// remaining movable amount of flow
    pub capacity: Capacity,
    /// cost per unit flow
    pub cost: Cost,
    /// slot of the paired edge in `to`'s adjacency list
    pub rev: usize,
}

/// Position of a user-added edge in the residue graph.
///
/// The forward edge lives at `slot` of `from`'s adjacency list.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
pub struct EdgeHandle {
    id: usize,
    from: Vertex,
    slot: usize,
}

impl EdgeHandle {
    /// Insertion ordinal of the edge
    pub fn id(&self) -> usize {
        self.id
    }
    /// Tail vertex of the edge
    pub fn from(&self) -> Vertex {
        self.from
    }
    /// Slot of the forward edge in the adjacency list of `from()`
    pub fn slot(&self) -> usize {
        self.slot
    }
}

fn check_vertex(vertex: Vertex, vertex_count: usize) -> Result<()> {
    if vertex < vertex_count {
        Ok(())
    } else {
        Err(FlowError::VertexOutOfRange {
            vertex,
            vertex_count,
        })
    }
}

///
/// Append-only construction of a flow network.
///
/// `build` consumes the builder, so no edge can be added once a network is
/// frozen and no solver can run on an unfinished one.
///
#[derive(Debug, Clone)]
pub struct NetworkBuilder {
    adj: Vec<Vec<ResidueEdge>>,
    handles: Vec<EdgeHandle>,
    capacities: Vec<Capacity>,
}

impl NetworkBuilder {
    /// network of `vertex_count` vertices and no edges
    pub fn new(vertex_count: usize) -> NetworkBuilder {
        NetworkBuilder {
            adj: vec![Vec::new(); vertex_count],
            handles: Vec::new(),
            capacities: Vec::new(),
        }
    }

    pub fn vertex_count(&self) -> usize {
        self.adj.len()
    }

    pub fn edge_count(&self) -> usize {
        self.handles.len()
    }

    ///
    /// Add an edge `from -> to` with `capacity` and `cost` per unit flow.
    ///
    /// Parallel edges and self-loops are allowed.
    ///
    pub fn add_edge(
        &mut self,
        from: Vertex,
        to: Vertex,
        capacity: Capacity,
        cost: Cost,
    ) -> Result<EdgeHandle> {
        check_vertex(from, self.vertex_count())?;
        check_vertex(to, self.vertex_count())?;
        if capacity < 0 {
            return Err(FlowError::NegativeCapacity { capacity });
        }
        let neg_cost = cost.checked_neg().ok_or(FlowError::Overflow)?;

        let slot = self.adj[from].len();
        // a self-loop stores its backward edge right after the forward one
        let rev_slot = if from == to {
            slot + 1
        } else {
            self.adj[to].len()
        };
        self.adj[from].push(ResidueEdge {
            to,
            capacity,
            cost,
            rev: rev_slot,
        });
        self.adj[to].push(ResidueEdge {
            to: from,
            capacity: 0,
            cost: neg_cost,
            rev: slot,
        });

        let handle = EdgeHandle {
            id: self.handles.len(),
            from,
            slot,
        };
        self.handles.push(handle);
        self.capacities.push(capacity);
        Ok(handle)
    }

    /// Add an edge of cost 0, for networks only used by max-flow solvers
    pub fn add_edge_uncosted(
        &mut self,
        from: Vertex,
        to: Vertex,
        capacity: Capacity,
    ) -> Result<EdgeHandle> {
        self.add_edge(from, to, capacity, 0)
    }

    /// Freeze the adjacency lists
    pub fn build(self) -> FlowNetwork {
        FlowNetwork {
            adj: self
                .adj
                .into_iter()
                .map(Vec::into_boxed_slice)
                .collect(),
            handles: self.handles.into_boxed_slice(),
            capacities: self.capacities.into_boxed_slice(),
        }
    }
}

///
/// Frozen residue graph.
///
/// Solvers running in place mutate the residual capacities, so a second solve
/// on the same network starts from the flow left by the first one.
/// `clone()` gives an independent deep copy.
///
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FlowNetwork {
    adj: Box<[Box<[ResidueEdge]>]>,
    handles: Box<[EdgeHandle]>,
    /// original capacity of each user edge, in insertion order
    capacities: Box<[Capacity]>,
}

impl FlowNetwork {
    pub fn vertex_count(&self) -> usize {
        self.adj.len()
    }

    /// number of user-added edges
    pub fn edge_count(&self) -> usize {
        self.handles.len()
    }

    /// user-added edges in insertion order
    pub fn handles(&self) -> &[EdgeHandle] {
        &self.handles
    }

    pub(crate) fn check_vertex(&self, vertex: Vertex) -> Result<()> {
        check_vertex(vertex, self.vertex_count())
    }

    pub(crate) fn edges(&self, v: Vertex) -> &[ResidueEdge] {
        &self.adj[v]
    }

    pub(crate) fn edge(&self, v: Vertex, slot: usize) -> &ResidueEdge {
        &self.adj[v][slot]
    }

    /// forward and backward edge of a user edge
    pub(crate) fn pair(&self, handle: EdgeHandle) -> (&ResidueEdge, &ResidueEdge) {
        let forward = self.edge(handle.from, handle.slot);
        let backward = self.edge(forward.to, forward.rev);
        (forward, backward)
    }

    ///
    /// Move `amount` of flow along the residue edge `(v, slot)`
    /// and give it back to the paired edge.
    ///
    pub(crate) fn push(&mut self, v: Vertex, slot: usize, amount: Capacity) {
        let edge = &mut self.adj[v][slot];
        edge.capacity -= amount;
        let (to, rev) = (edge.to, edge.rev);
        self.adj[to][rev].capacity += amount;
    }

    /// Push `amount` along every edge of `path`
    pub(crate) fn augment(&mut self, path: &[(Vertex, usize)], amount: Capacity) {
        for &(v, slot) in path {
            self.push(v, slot, amount);
        }
    }

    /// Minimum residual capacity along `path`
    pub(crate) fn bottleneck(&self, path: &[(Vertex, usize)]) -> Capacity {
        path.iter()
            .map(|&(v, slot)| self.edge(v, slot).capacity)
            .fold(Capacity::MAX, Capacity::min)
    }

    /// Is there an edge with spare capacity and negative cost?
    pub(crate) fn has_negative_residual_cost(&self) -> bool {
        self.adj
            .iter()
            .flat_map(|edges| edges.iter())
            .any(|e| e.capacity > 0 && e.cost < 0)
    }

    ///
    /// Vertices reachable from `source` by edges with spare capacity.
    ///
    /// After a maximum flow from `source` was pushed, the reachable set is
    /// the source side of a minimum cut.
    ///
    pub fn min_cut(&self, source: Vertex) -> Result<Vec<bool>> {
        self.check_vertex(source)?;
        let mut reachable = vec![false; self.vertex_count()];
        let mut queue = VecDeque::new();
        reachable[source] = true;
        queue.push_back(source);
        while let Some(v) = queue.pop_front() {
            for e in self.edges(v) {
                if e.capacity > 0 && !reachable[e.to] {
                    reachable[e.to] = true;
                    queue.push_back(e.to);
                }
            }
        }
        Ok(reachable)
    }

    /// Cancel all flow, restoring the original capacities
    pub fn reset(&mut self) {
        for i in 0..self.handles.len() {
            let handle = self.handles[i];
            let (to, rev) = {
                let forward = self.edge(handle.from, handle.slot);
                (forward.to, forward.rev)
            };
            let flow = self.adj[to][rev].capacity;
            self.push(to, rev, flow);
        }
    }

    ///
    /// Check the pairing invariants:
    /// * both sides of a pair point at each other
    /// * costs are negations of each other
    /// * forward + backward capacity equals the original capacity
    /// * no residual capacity is negative
    ///
    pub fn is_consistent(&self) -> bool {
        let paired = self.adj.iter().enumerate().all(|(v, edges)| {
            edges.iter().enumerate().all(|(slot, e)| {
                let twin = match self.adj.get(e.to).and_then(|es| es.get(e.rev)) {
                    Some(twin) => twin,
                    None => return false,
                };
                twin.to == v && twin.rev == slot && twin.cost == -e.cost && e.capacity >= 0
            })
        });
        paired
            && self
                .handles
                .iter()
                .zip(self.capacities.iter())
                .all(|(&handle, &capacity)| {
                    let (forward, backward) = self.pair(handle);
                    forward.capacity + backward.capacity == capacity
                })
    }
}
