use serde::Serialize;

use crate::cost::{is_reachable, Cost, NodeId, WireCost};
use crate::error::{Result, RouteError};

/// Result of one search: final distances plus the predecessor of every
/// reached node on the path that produced its distance.
#[derive(Debug, Clone)]
pub struct ShortestPathTree {
    source: NodeId,
    distances: Vec<Cost>,
    predecessors: Vec<Option<(NodeId, Cost)>>,
}

/// A concrete cheapest node sequence between two nodes.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Route {
    #[serde(skip)]
    pub source: NodeId,
    #[serde(skip)]
    pub target: NodeId,
    pub cost: WireCost,
    pub nodes: Vec<NodeId>,
    pub segments: Vec<Segment>,
}

/// One hop of a [`Route`] and the weight of the edge it used.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Segment {
    pub from: NodeId,
    pub to: NodeId,
    pub weight: WireCost,
}

impl ShortestPathTree {
    pub(crate) fn new(source: NodeId, distances: Vec<Cost>, predecessors: Vec<Option<(NodeId, Cost)>>) -> Self {
        Self {
            source,
            distances,
            predecessors,
        }
    }

    pub fn source(&self) -> NodeId {
        self.source
    }

    pub fn distances(&self) -> &[Cost] {
        &self.distances
    }

    pub fn into_distances(self) -> Vec<Cost> {
        self.distances
    }

    /// Final distance of `node`, `None` if out of range or unreachable.
    pub fn distance(&self, node: NodeId) -> Option<Cost> {
        self.distances.get(node).copied().filter(|&d| is_reachable(d))
    }

    pub fn is_reachable(&self, node: NodeId) -> bool {
        self.distance(node).is_some()
    }

    pub fn predecessor(&self, node: NodeId) -> Option<NodeId> {
        self.predecessors.get(node).copied().flatten().map(|(prev, _)| prev)
    }

    /// Walks predecessor links back from `target`. `Ok(None)` when no path exists.
    pub fn route_to(&self, target: NodeId) -> Result<Option<Route>> {
        if target >= self.distances.len() {
            return Err(RouteError::TargetOutOfRange {
                target: i64::try_from(target).unwrap_or(i64::MAX),
                node_count: self.distances.len(),
            });
        }
        let Some(cost) = self.distance(target) else {
            return Ok(None);
        };

        let mut nodes = vec![target];
        let mut segments = Vec::new();
        let mut current = target;
        while current != self.source {
            // Reached nodes other than the source always have a predecessor.
            match self.predecessors[current] {
                Some((prev, weight)) => {
                    segments.push(Segment {
                        from: prev,
                        to: current,
                        weight: WireCost(weight),
                    });
                    nodes.push(prev);
                    current = prev;
                }
                None => return Ok(None),
            }
        }
        nodes.reverse();
        segments.reverse();

        Ok(Some(Route {
            source: self.source,
            target,
            cost: WireCost(cost),
            nodes,
            segments,
        }))
    }
}
