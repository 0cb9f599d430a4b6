use std::cmp::Ordering;
use std::collections::BinaryHeap;

use ordered_float::OrderedFloat;
use orx_priority_queue::*;
use tracing::trace;

use crate::cost::{Cost, NodeId, UNREACHABLE};
use crate::error::{Result, RouteError};
use crate::graph::Graph;
use crate::route::ShortestPathTree;

/// How the search keeps its frontier of tentatively labelled nodes.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, clap::ValueEnum)]
pub enum Frontier {
    /// Plain binary heap; improved labels are pushed again and stale entries skipped on pop.
    #[default]
    Lazy,
    /// Binary heap with a position map; improved labels are decreased in place.
    DecreaseKey,
}

impl Frontier {
    pub fn name(&self) -> &'static str {
        match self {
            Frontier::Lazy => "lazy",
            Frontier::DecreaseKey => "decrease-key",
        }
    }
}

#[derive(Copy, Clone, PartialEq, Eq)]
struct State {
    cost: OrderedFloat<Cost>,
    node_id: NodeId,
}

// Min-heap by cost, then by node id.
impl Ord for State {
    fn cmp(&self, other: &Self) -> Ordering {
        // reverse ordering for min-heap
        other
            .cost
            .cmp(&self.cost)
            .then_with(|| other.node_id.cmp(&self.node_id))
    }
}

impl PartialOrd for State {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

#[derive(Debug, Default)]
struct SearchStats {
    settled: usize,
    stale: usize,
    relaxed: usize,
}

/// Distances from `source` to every node, [`UNREACHABLE`] where there is no path.
pub fn shortest_distances(graph: &Graph, source: NodeId) -> Result<Vec<Cost>> {
    shortest_distances_with(graph, source, Frontier::default())
}

pub fn shortest_distances_with(graph: &Graph, source: NodeId, frontier: Frontier) -> Result<Vec<Cost>> {
    shortest_path_tree(graph, source, frontier).map(ShortestPathTree::into_distances)
}

/// Runs the search and keeps, for every reached node, its predecessor on a
/// shortest path together with the weight of the edge taken from it.
pub fn shortest_path_tree(graph: &Graph, source: NodeId, frontier: Frontier) -> Result<ShortestPathTree> {
    // No nodes means nothing to measure from; the distance vector is empty.
    if graph.node_count() == 0 {
        return Ok(ShortestPathTree::new(source, Vec::new(), Vec::new()));
    }
    if !graph.contains(source) {
        return Err(RouteError::source_out_of_range(source, graph.node_count()));
    }

    let n = graph.node_count();
    let mut dist = vec![UNREACHABLE; n];
    let mut pred = vec![None; n];
    dist[source] = 0.0;

    let stats = match frontier {
        Frontier::Lazy => run_lazy(graph, source, &mut dist, &mut pred),
        Frontier::DecreaseKey => run_decrease_key(graph, source, &mut dist, &mut pred),
    };
    trace!(
        source,
        frontier = frontier.name(),
        settled = stats.settled,
        stale = stats.stale,
        relaxed = stats.relaxed,
        "search finished"
    );

    Ok(ShortestPathTree::new(source, dist, pred))
}

fn run_lazy(graph: &Graph, source: NodeId, dist: &mut [Cost], pred: &mut [Option<(NodeId, Cost)>]) -> SearchStats {
    let mut stats = SearchStats::default();
    let mut heap = BinaryHeap::new();
    heap.push(State {
        cost: OrderedFloat(0.0),
        node_id: source,
    });

    while let Some(State { cost, node_id }) = heap.pop() {
        let cost = cost.into_inner();
        if cost > dist[node_id] {
            stats.stale += 1;
            continue;
        }
        stats.settled += 1;
        for &(next, w) in graph.neighbors(node_id) {
            let next_cost = cost + w;
            if next_cost < dist[next] {
                dist[next] = next_cost;
                pred[next] = Some((node_id, w));
                stats.relaxed += 1;
                heap.push(State {
                    cost: OrderedFloat(next_cost),
                    node_id: next,
                });
            }
        }
    }
    stats
}

fn run_decrease_key(
    graph: &Graph,
    source: NodeId,
    dist: &mut [Cost],
    pred: &mut [Option<(NodeId, Cost)>],
) -> SearchStats {
    let mut stats = SearchStats::default();
    let mut pq: BinaryHeapWithMap<NodeId, Cost> = BinaryHeapWithMap::new();
    pq.push(source, 0.0);

    // Each node is in the queue at most once, so every pop settles it.
    while let Some((node_id, cost)) = pq.pop() {
        stats.settled += 1;
        for &(next, w) in graph.neighbors(node_id) {
            let next_cost = cost + w;
            if next_cost < dist[next] {
                dist[next] = next_cost;
                pred[next] = Some((node_id, w));
                stats.relaxed += 1;
                pq.decrease_key_or_push(&next, next_cost);
            }
        }
    }
    stats
}
