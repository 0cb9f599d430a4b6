//! Single-source shortest paths for ride dispatch.
//!
//! Callers submit a request-scoped graph (`V` nodes, directed weighted
//! edges) and a source node and get back the cost of the cheapest path to
//! every node. The graph is built once per request and never mutated.

pub mod cost;
pub mod dijkstra;
pub mod error;
pub mod graph;
pub mod pipe;
pub mod protocol;
pub mod route;

pub use cost::{Cost, NodeId, UNREACHABLE};
pub use dijkstra::{shortest_distances, shortest_distances_with, shortest_path_tree, Frontier};
pub use error::{Result, RouteError};
pub use graph::{Edge, Graph};
pub use protocol::{Limits, Request, Response, ServiceConfig};
pub use route::{Route, Segment, ShortestPathTree};
