use tracing::debug;

use crate::cost::{Cost, NodeId, UNREACHABLE};
use crate::error::{Result, RouteError};

/// A directed weighted edge as submitted by a caller.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Edge {
    pub from: NodeId,
    pub to: NodeId,
    pub weight: Cost,
}

impl Edge {
    pub fn new(from: NodeId, to: NodeId, weight: Cost) -> Self {
        Self { from, to, weight }
    }
}

impl From<(NodeId, NodeId, Cost)> for Edge {
    fn from((from, to, weight): (NodeId, NodeId, Cost)) -> Self {
        Edge::new(from, to, weight)
    }
}

/// Immutable adjacency over nodes `0..node_count`, stored as compressed rows.
///
/// Outgoing edges of node `u` live in `targets[offsets[u]..offsets[u + 1]]`,
/// in the order they were supplied. Nothing is mutated after construction,
/// so a built graph can be shared read-only across threads.
#[derive(Debug, Clone)]
pub struct Graph {
    offsets: Vec<usize>,
    targets: Vec<(NodeId, Cost)>,
}

impl Graph {
    /// Validates `edges` against `node_count` and builds the adjacency.
    ///
    /// Rejects the first edge (in input order) with an endpoint outside
    /// `[0, node_count)` or a weight that is negative, NaN or infinite, and
    /// rejects edge sets whose total weight is not below [`UNREACHABLE`].
    pub fn from_edges(node_count: usize, edges: &[Edge]) -> Result<Self> {
        let mut total_weight: Cost = 0.0;
        for (index, edge) in edges.iter().enumerate() {
            for node in [edge.from, edge.to] {
                if node >= node_count {
                    return Err(RouteError::EdgeOutOfRange {
                        index,
                        node: i64::try_from(node).unwrap_or(i64::MAX),
                        node_count,
                    });
                }
            }
            if !(edge.weight >= 0.0 && edge.weight.is_finite()) {
                return Err(RouteError::NegativeWeight {
                    index,
                    weight: edge.weight,
                });
            }
            total_weight += edge.weight;
        }
        // Any shortest path is simple, so its cost is at most the total weight.
        if !(total_weight < UNREACHABLE) {
            return Err(RouteError::CostOverflow);
        }

        let mut offsets = vec![0usize; node_count + 1];
        for edge in edges {
            offsets[edge.from + 1] += 1;
        }
        for i in 1..offsets.len() {
            offsets[i] += offsets[i - 1];
        }

        // Stable fill keeps each node's edges in submission order.
        let mut cursor = offsets.clone();
        let mut targets = vec![(0, 0.0); edges.len()];
        for edge in edges {
            targets[cursor[edge.from]] = (edge.to, edge.weight);
            cursor[edge.from] += 1;
        }

        debug!(nodes = node_count, edges = edges.len(), "built graph");
        Ok(Self { offsets, targets })
    }

    pub fn node_count(&self) -> usize {
        self.offsets.len() - 1
    }

    pub fn edge_count(&self) -> usize {
        self.targets.len()
    }

    /// Outgoing `(to, weight)` pairs of `node`. Panics if `node` is out of range.
    pub fn neighbors(&self, node: NodeId) -> &[(NodeId, Cost)] {
        &self.targets[self.offsets[node]..self.offsets[node + 1]]
    }

    pub fn out_degree(&self, node: NodeId) -> usize {
        self.offsets[node + 1] - self.offsets[node]
    }

    pub fn contains(&self, node: NodeId) -> bool {
        node < self.node_count()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn edges(raw: &[(NodeId, NodeId, Cost)]) -> Vec<Edge> {
        raw.iter().copied().map(Edge::from).collect()
    }

    #[test]
    fn adjacency_keeps_submission_order() {
        let graph = Graph::from_edges(
            4,
            &edges(&[(2, 3, 1.0), (0, 2, 4.0), (2, 1, 0.5), (0, 1, 2.0), (2, 0, 9.0)]),
        )
        .unwrap();

        assert_eq!(graph.node_count(), 4);
        assert_eq!(graph.edge_count(), 5);
        assert_eq!(graph.neighbors(0), &[(2, 4.0), (1, 2.0)]);
        assert!(graph.neighbors(1).is_empty());
        assert_eq!(graph.neighbors(2), &[(3, 1.0), (1, 0.5), (0, 9.0)]);
        assert_eq!(graph.out_degree(3), 0);
    }

    #[test]
    fn empty_graph() {
        let graph = Graph::from_edges(0, &[]).unwrap();
        assert_eq!(graph.node_count(), 0);
        assert_eq!(graph.edge_count(), 0);
        assert!(!graph.contains(0));
    }

    #[test]
    fn parallel_edges_and_self_loops_are_kept() {
        let graph = Graph::from_edges(2, &edges(&[(0, 1, 3.0), (0, 1, 1.0), (1, 1, 0.0)])).unwrap();
        assert_eq!(graph.neighbors(0), &[(1, 3.0), (1, 1.0)]);
        assert_eq!(graph.neighbors(1), &[(1, 0.0)]);
    }

    #[test]
    fn rejects_out_of_range_endpoint() {
        let err = Graph::from_edges(3, &edges(&[(0, 1, 1.0), (1, 3, 1.0)])).unwrap_err();
        assert_eq!(
            err,
            RouteError::EdgeOutOfRange {
                index: 1,
                node: 3,
                node_count: 3
            }
        );

        let err = Graph::from_edges(0, &edges(&[(0, 0, 1.0)])).unwrap_err();
        assert_eq!(err.code(), "edge_out_of_range");
    }

    #[test]
    fn rejects_negative_and_non_finite_weights() {
        let err = Graph::from_edges(2, &edges(&[(0, 1, -0.5)])).unwrap_err();
        assert_eq!(err, RouteError::NegativeWeight { index: 0, weight: -0.5 });

        for weight in [f64::NAN, f64::INFINITY, f64::NEG_INFINITY] {
            let err = Graph::from_edges(2, &edges(&[(0, 1, 1.0), (1, 0, weight)])).unwrap_err();
            assert_eq!(err.code(), "negative_weight");
        }
    }

    #[test]
    fn rejects_total_weight_reaching_sentinel() {
        let err = Graph::from_edges(2, &edges(&[(0, 1, f64::MAX), (1, 0, f64::MAX)])).unwrap_err();
        assert_eq!(err, RouteError::CostOverflow);
    }
}
