//!
//! Minimum cost flow by successive shortest paths.
//!
//! Each round finds one cheapest path from the source to the sink in the
//! residue graph and pushes as much flow along it as the path and the
//! remaining demand allow. The path search is one of
//! - Bellman-Ford
//! - SPFA (queue-based Bellman-Ford)
//! - Dijkstra on reduced costs with vertex potentials (Johnson)
//!
use super::residue::FlowNetwork;
use super::shortest_path::{bellman_ford, dijkstra, spfa, SearchError, ShortestPaths};
use super::utils::format_path;
use super::{check_terminals, Capacity, Cost, Vertex};
use crate::error::{FlowError, Result};
use log::{debug, trace, warn};

/// Min-cost-flow path search variants
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, Default)]
pub enum MinCostFlowAlgorithm {
    /// `O(VE)` full relaxation per round
    BellmanFord,
    /// queue relaxation, usually faster than full Bellman-Ford on sparse graphs
    Spfa,
    /// Dijkstra on reduced costs
    #[default]
    DijkstraPotential,
}

impl std::fmt::Display for MinCostFlowAlgorithm {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        match self {
            MinCostFlowAlgorithm::BellmanFord => write!(f, "bellman-ford"),
            MinCostFlowAlgorithm::Spfa => write!(f, "spfa"),
            MinCostFlowAlgorithm::DijkstraPotential => write!(f, "dijkstra"),
        }
    }
}

impl std::str::FromStr for MinCostFlowAlgorithm {
    type Err = FlowError;
    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s {
            "bellman-ford" => Ok(MinCostFlowAlgorithm::BellmanFord),
            "spfa" => Ok(MinCostFlowAlgorithm::Spfa),
            "dijkstra" => Ok(MinCostFlowAlgorithm::DijkstraPotential),
            _ => Err(FlowError::ParseAlgorithm(s.to_string())),
        }
    }
}

/// How much flow a min-cost-flow call should send
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
pub enum FlowLimit {
    /// Send up to `k` units; fewer if the sink becomes unreachable.
    AtMost(Capacity),
    /// Send exactly `k` units; running out of paths is `FlowError::Infeasible`.
    Exactly(Capacity),
    /// Send as much as possible (min-cost max-flow).
    Unbounded,
}

impl FlowLimit {
    fn amount(&self) -> Capacity {
        match *self {
            FlowLimit::AtMost(k) | FlowLimit::Exactly(k) => k.max(0),
            FlowLimit::Unbounded => Capacity::MAX,
        }
    }
}

/// Whether the residue network may contain negative-cost edges
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, Default)]
pub enum CostSign {
    #[default]
    NonNegative,
    MayBeNegative,
}

/// Result of a successful min-cost-flow call
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, Default)]
pub struct MinCostFlow {
    /// total amount of flow sent
    pub flow: Capacity,
    /// total cost of the sent flow
    pub cost: Cost,
}

impl MinCostFlow {
    /// `(-1, 0)`, the pair reported by callers that fold every failure into one value
    pub const SENTINEL: (Capacity, Cost) = (-1, 0);

    pub fn new(flow: Capacity, cost: Cost) -> MinCostFlow {
        MinCostFlow { flow, cost }
    }

    /// `(flow, cost)` on success, `SENTINEL` on any failure
    pub fn from_result(result: &Result<MinCostFlow>) -> (Capacity, Cost) {
        match result {
            Ok(mcf) => (mcf.flow, mcf.cost),
            Err(_) => MinCostFlow::SENTINEL,
        }
    }
}

impl std::fmt::Display for MinCostFlow {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        write!(f, "flow={} cost={}", self.flow, self.cost)
    }
}

/// One cheapest augmenting path
#[derive(Debug, Clone)]
pub(crate) struct Round {
    pub path: Vec<(Vertex, usize)>,
    /// cost of one unit along `path`
    pub distance: Cost,
}

///
/// Search of one cheapest source-to-sink path per round.
///
/// `Ok(None)` means the sink is unreachable.
///
pub(crate) trait ShortestPathSearch {
    fn next_round(
        &mut self,
        network: &FlowNetwork,
        source: Vertex,
        sink: Vertex,
    ) -> std::result::Result<Option<Round>, SearchError>;
}

fn round_from(sp: &ShortestPaths, sink: Vertex) -> Option<Round> {
    let distance = sp.dist[sink]?;
    let path = sp.path_to(sink)?;
    Some(Round { path, distance })
}

pub(crate) struct BellmanFordSearch;

impl ShortestPathSearch for BellmanFordSearch {
    fn next_round(
        &mut self,
        network: &FlowNetwork,
        source: Vertex,
        sink: Vertex,
    ) -> std::result::Result<Option<Round>, SearchError> {
        Ok(round_from(&bellman_ford(network, source)?, sink))
    }
}

pub(crate) struct SpfaSearch;

impl ShortestPathSearch for SpfaSearch {
    fn next_round(
        &mut self,
        network: &FlowNetwork,
        source: Vertex,
        sink: Vertex,
    ) -> std::result::Result<Option<Round>, SearchError> {
        Ok(round_from(&spfa(network, source)?, sink))
    }
}

///
/// Dijkstra with potentials.
///
/// The first round runs Bellman-Ford when negative costs are possible.
/// After every round `potential[v] += dist[v]` for reached `v`, which keeps
/// every reduced cost on an edge with spare capacity non-negative.
///
pub(crate) struct DijkstraSearch {
    potential: Vec<Cost>,
    bootstrap: bool,
}

impl DijkstraSearch {
    pub fn new(vertex_count: usize, bootstrap: bool) -> DijkstraSearch {
        DijkstraSearch {
            potential: vec![0; vertex_count],
            bootstrap,
        }
    }
}

impl ShortestPathSearch for DijkstraSearch {
    fn next_round(
        &mut self,
        network: &FlowNetwork,
        source: Vertex,
        sink: Vertex,
    ) -> std::result::Result<Option<Round>, SearchError> {
        let sp = if self.bootstrap {
            self.bootstrap = false;
            bellman_ford(network, source)?
        } else {
            dijkstra(network, source, &self.potential)?
        };

        // true distance of the sink, before potentials move
        let distance = match sp.dist[sink] {
            Some(d) => {
                let d = i128::from(d) + i128::from(self.potential[sink])
                    - i128::from(self.potential[source]);
                Some(Cost::try_from(d).map_err(|_| SearchError::Overflow)?)
            }
            None => None,
        };
        let potential = self
            .potential
            .iter()
            .zip(sp.dist.iter())
            .map(|(&p, d)| match d {
                Some(d) => p.checked_add(*d).ok_or(SearchError::Overflow),
                None => Ok(p),
            })
            .collect::<std::result::Result<Vec<Cost>, SearchError>>()?;
        self.potential = potential;

        match (distance, sp.path_to(sink)) {
            (Some(distance), Some(path)) => Ok(Some(Round { path, distance })),
            _ => Ok(None),
        }
    }
}

///
/// Successive shortest paths.
///
/// Flow pushed in earlier rounds stays in the network when a later round
/// fails; the error carries that committed flow and cost.
///
pub(crate) fn successive_shortest_paths<S: ShortestPathSearch>(
    network: &mut FlowNetwork,
    search: &mut S,
    source: Vertex,
    sink: Vertex,
    limit: FlowLimit,
) -> Result<MinCostFlow> {
    let target = limit.amount();
    let mut sent: Capacity = 0;
    let mut cost: Cost = 0;

    while sent < target {
        let round = match search.next_round(network, source, sink) {
            Ok(Some(round)) => round,
            Ok(None) => {
                if let FlowLimit::Exactly(k) = limit {
                    warn!("sink unreachable after sending {} of {}", sent, k);
                    return Err(FlowError::Infeasible { sent, cost });
                }
                break;
            }
            Err(SearchError::NegativeCycle) => {
                warn!("negative cycle reachable from {} after sending {}", source, sent);
                return Err(FlowError::NegativeCycle { sent, cost });
            }
            Err(SearchError::Overflow) => {
                warn!("path distance overflowed after sending {}", sent);
                return Err(FlowError::Overflow);
            }
        };

        let amount = network.bottleneck(&round.path).min(target - sent);
        trace!(
            "augment {} at distance {} along {}",
            amount,
            round.distance,
            format_path(network, source, &round.path)
        );
        network.augment(&round.path, amount);
        sent += amount;
        cost = amount
            .checked_mul(round.distance)
            .and_then(|c| cost.checked_add(c))
            .ok_or(FlowError::Overflow)?;
    }

    Ok(MinCostFlow::new(sent, cost))
}

impl FlowNetwork {
    ///
    /// Push a minimum cost flow of at most/exactly `limit` from `source` to `sink`
    /// into this network.
    ///
    /// `costs` declares whether negative-cost edges may be present. It only
    /// matters for `DijkstraPotential`, and a network already holding flow
    /// from an earlier in-place solve is treated as `MayBeNegative`.
    ///
    pub fn min_cost_flow(
        &mut self,
        algorithm: MinCostFlowAlgorithm,
        source: Vertex,
        sink: Vertex,
        limit: FlowLimit,
        costs: CostSign,
    ) -> Result<MinCostFlow> {
        check_terminals(self, source, sink)?;
        debug!(
            "min cost flow {} from {} to {} limit={:?} costs={:?}",
            algorithm, source, sink, limit, costs
        );
        let result = match algorithm {
            MinCostFlowAlgorithm::BellmanFord => {
                successive_shortest_paths(self, &mut BellmanFordSearch, source, sink, limit)
            }
            MinCostFlowAlgorithm::Spfa => {
                successive_shortest_paths(self, &mut SpfaSearch, source, sink, limit)
            }
            MinCostFlowAlgorithm::DijkstraPotential => {
                let bootstrap =
                    costs == CostSign::MayBeNegative || self.has_negative_residual_cost();
                if bootstrap && costs == CostSign::NonNegative {
                    debug!("negative residual cost found, starting with bellman-ford");
                }
                let mut search = DijkstraSearch::new(self.vertex_count(), bootstrap);
                successive_shortest_paths(self, &mut search, source, sink, limit)
            }
        }?;
        debug!("min cost flow {} finished with {}", algorithm, result);
        Ok(result)
    }
}
