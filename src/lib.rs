//!
//! flowkit solves [maximum flow](https://en.wikipedia.org/wiki/Maximum_flow_problem) and
//! [minimum cost flow](https://en.wikipedia.org/wiki/Minimum-cost_flow_problem)
//! problems of integer capacity and integer cost on a residue graph.
//!
//! ```
//! use flowkit::network::{
//!     solve, CostSign, FlowLimit, FlowProblem, MinCostFlowAlgorithm, NetworkBuilder, Placement,
//! };
//!
//! let mut builder = NetworkBuilder::new(4);
//! builder.add_edge(0, 1, 2, 1).unwrap();
//! builder.add_edge(0, 2, 1, 2).unwrap();
//! builder.add_edge(1, 3, 1, 1).unwrap();
//! builder.add_edge(2, 3, 2, 1).unwrap();
//! let network = builder.build();
//!
//! let problem = FlowProblem::MinCostFlow {
//!     algorithm: MinCostFlowAlgorithm::DijkstraPotential,
//!     source: 0,
//!     sink: 3,
//!     limit: FlowLimit::AtMost(2),
//!     costs: CostSign::NonNegative,
//! };
//! let solution = solve(Placement::OnClone(&network), &problem).unwrap();
//! let mcf = solution.outcome.min_cost_flow().unwrap();
//! assert_eq!((mcf.flow, mcf.cost), (2, 5));
//! ```
//!
pub mod error;
pub mod network;

pub use error::{FlowError, Result};
