pub mod base;
pub mod flow;
pub mod flow_edge;
pub mod max_flow;
pub mod min_cost_flow;
#[cfg(test)]
pub mod mocks;
pub mod residue;
mod shortest_path;
pub mod utils;

use crate::error::{FlowError, Result};
use log::debug;

pub use flow::RealizedEdge;
pub use max_flow::MaxFlowAlgorithm;
pub use min_cost_flow::{CostSign, FlowLimit, MinCostFlow, MinCostFlowAlgorithm};
pub use residue::{EdgeHandle, FlowNetwork, NetworkBuilder};

/// Vertex id in `[0, n)`
pub type Vertex = usize;
/// Capacity and flow amount
pub type Capacity = i64;
/// Cost per unit flow
pub type Cost = i64;

/// Cost of an edge when the caller has no better figure
pub const DEFAULT_EDGE_COST: Cost = 1;

//
// public functions
//

/// A flow problem together with the algorithm to solve it with
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum FlowProblem {
    MaxFlow {
        algorithm: MaxFlowAlgorithm,
        source: Vertex,
        sink: Vertex,
    },
    MinCostFlow {
        algorithm: MinCostFlowAlgorithm,
        source: Vertex,
        sink: Vertex,
        limit: FlowLimit,
        costs: CostSign,
    },
}

/// Which network a solve mutates
#[derive(Debug)]
pub enum Placement<'a> {
    /// Mutate the given network, keeping flow from earlier solves.
    InPlace(&'a mut FlowNetwork),
    /// Solve a private copy, returned in `Solution::network`.
    OnClone(&'a FlowNetwork),
}

/// Value of a solved problem
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum Outcome {
    MaxFlow(Capacity),
    MinCostFlow(MinCostFlow),
}

impl Outcome {
    pub fn max_flow(&self) -> Option<Capacity> {
        match *self {
            Outcome::MaxFlow(flow) => Some(flow),
            Outcome::MinCostFlow(_) => None,
        }
    }
    pub fn min_cost_flow(&self) -> Option<MinCostFlow> {
        match *self {
            Outcome::MaxFlow(_) => None,
            Outcome::MinCostFlow(mcf) => Some(mcf),
        }
    }
    /// amount of flow sent, for either kind of problem
    pub fn flow(&self) -> Capacity {
        match *self {
            Outcome::MaxFlow(flow) => flow,
            Outcome::MinCostFlow(mcf) => mcf.flow,
        }
    }
}

#[derive(Debug, Clone)]
pub struct Solution {
    pub outcome: Outcome,
    /// the solved copy for `Placement::OnClone`, `None` for `Placement::InPlace`
    pub network: Option<FlowNetwork>,
}

///
/// Solve `problem` on the network chosen by `placement`.
///
/// With `Placement::OnClone` the given network is never touched, so a failed
/// min-cost-flow leaves nothing behind.
///
pub fn solve(placement: Placement<'_>, problem: &FlowProblem) -> Result<Solution> {
    match placement {
        Placement::InPlace(network) => Ok(Solution {
            outcome: run(network, problem)?,
            network: None,
        }),
        Placement::OnClone(network) => {
            debug!("solving on a clone of {} edges", network.edge_count());
            let mut clone = network.clone();
            let outcome = run(&mut clone, problem)?;
            Ok(Solution {
                outcome,
                network: Some(clone),
            })
        }
    }
}

//
// internal functions
//

fn run(network: &mut FlowNetwork, problem: &FlowProblem) -> Result<Outcome> {
    let outcome = match *problem {
        FlowProblem::MaxFlow {
            algorithm,
            source,
            sink,
        } => Outcome::MaxFlow(network.max_flow(algorithm, source, sink)?),
        FlowProblem::MinCostFlow {
            algorithm,
            source,
            sink,
            limit,
            costs,
        } => Outcome::MinCostFlow(network.min_cost_flow(algorithm, source, sink, limit, costs)?),
    };
    utils::draw_network(network);
    Ok(outcome)
}

fn check_terminals(network: &FlowNetwork, source: Vertex, sink: Vertex) -> Result<()> {
    network.check_vertex(source)?;
    network.check_vertex(sink)?;
    if source == sink {
        return Err(FlowError::SourceIsSink(source));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::mocks::{init_logger, mock_diamond, mock_negative_cycle_network};
    use super::*;

    fn diamond() -> FlowNetwork {
        let mut b = NetworkBuilder::new(4);
        b.add_edge(0, 1, 2, 1).unwrap();
        b.add_edge(0, 2, 1, 2).unwrap();
        b.add_edge(1, 3, 1, 1).unwrap();
        b.add_edge(2, 3, 2, 1).unwrap();
        b.build()
    }

    #[test]
    fn builder_matches_petgraph_conversion() {
        assert_eq!(diamond(), FlowNetwork::from_graph(&mock_diamond()).unwrap());
    }

    #[test]
    fn concrete_scenario() {
        init_logger();
        let net = diamond();
        let max = solve(
            Placement::OnClone(&net),
            &FlowProblem::MaxFlow {
                algorithm: MaxFlowAlgorithm::Dinic,
                source: 0,
                sink: 3,
            },
        )
        .unwrap();
        assert_eq!(max.outcome.max_flow(), Some(2));

        let mcf = solve(
            Placement::OnClone(&net),
            &FlowProblem::MinCostFlow {
                algorithm: MinCostFlowAlgorithm::BellmanFord,
                source: 0,
                sink: 3,
                limit: FlowLimit::AtMost(2),
                costs: CostSign::NonNegative,
            },
        )
        .unwrap();
        assert_eq!(mcf.outcome.min_cost_flow(), Some(MinCostFlow::new(2, 5)));
        assert_eq!(mcf.outcome.flow(), 2);

        // the canonical network still has zero flow, the clones carry the results
        assert!(net.realized_edges().iter().all(|e| e.flow == 0));
        let solved = mcf.network.unwrap();
        assert!(solved.realized_edges().iter().all(|e| e.flow == 1));
        assert!(solved.is_consistent());
    }

    #[test]
    fn in_place_solves_see_each_other() {
        let mut net = diamond();
        let problem = FlowProblem::MaxFlow {
            algorithm: MaxFlowAlgorithm::FordFulkerson,
            source: 0,
            sink: 3,
        };
        let first = solve(Placement::InPlace(&mut net), &problem).unwrap();
        assert_eq!(first.outcome, Outcome::MaxFlow(2));
        assert!(first.network.is_none());
        let second = solve(Placement::InPlace(&mut net), &problem).unwrap();
        assert_eq!(second.outcome, Outcome::MaxFlow(0));
        assert_eq!(
            net.realized_edges().iter().map(|e| e.flow).sum::<Capacity>(),
            4
        );
    }

    #[test]
    fn clone_failure_is_atomic() {
        let net = FlowNetwork::from_graph(&mock_negative_cycle_network()).unwrap();
        let problem = FlowProblem::MinCostFlow {
            algorithm: MinCostFlowAlgorithm::Spfa,
            source: 0,
            sink: 3,
            limit: FlowLimit::Unbounded,
            costs: CostSign::MayBeNegative,
        };
        let r = solve(Placement::OnClone(&net), &problem);
        assert!(matches!(r, Err(FlowError::NegativeCycle { .. })));
        assert!(net.realized_edges().iter().all(|e| e.flow == 0));
    }

    #[test]
    fn realized_edges_are_idempotent() {
        let mut net = diamond();
        net.min_cost_flow(
            MinCostFlowAlgorithm::DijkstraPotential,
            0,
            3,
            FlowLimit::AtMost(1),
            CostSign::default(),
        )
        .unwrap();
        let a = net.realized_edges();
        let b = net.realized_edges();
        assert_eq!(a, b);
        assert_eq!(a[0].flow, 1);
        assert_eq!(a[2].flow, 1);
    }

    #[test]
    fn bad_terminals_fail_fast() {
        let net = diamond();
        let problem = FlowProblem::MaxFlow {
            algorithm: MaxFlowAlgorithm::Dinic,
            source: 0,
            sink: 9,
        };
        assert_eq!(
            solve(Placement::OnClone(&net), &problem).unwrap_err(),
            FlowError::VertexOutOfRange {
                vertex: 9,
                vertex_count: 4
            }
        );
        let problem = FlowProblem::MinCostFlow {
            algorithm: MinCostFlowAlgorithm::Spfa,
            source: 2,
            sink: 2,
            limit: FlowLimit::Unbounded,
            costs: CostSign::NonNegative,
        };
        assert_eq!(
            solve(Placement::OnClone(&net), &problem).unwrap_err(),
            FlowError::SourceIsSink(2)
        );
    }

    #[test]
    fn default_cost_is_one() {
        let mut b = NetworkBuilder::new(2);
        b.add_edge(0, 1, 3, DEFAULT_EDGE_COST).unwrap();
        let mut net = b.build();
        let r = net
            .min_cost_flow(
                MinCostFlowAlgorithm::default(),
                0,
                1,
                FlowLimit::Unbounded,
                CostSign::default(),
            )
            .unwrap();
        assert_eq!(r, MinCostFlow::new(3, 3));
    }
}
