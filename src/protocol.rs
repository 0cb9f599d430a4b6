//! JSON request/response contract.
//!
//! A request is `{"V": n, "source": s, "edges": [[from, to, weight], ...]}`,
//! optionally with `"target": t`. A successful response is
//! `{"distances": [...]}` (plus `"route"` when a target was given); a
//! rejected one is `{"error": {"code": ..., "message": ...}}` and never
//! carries distances.

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::cost::{serialize_costs, Cost, NodeId};
use crate::dijkstra::{shortest_path_tree, Frontier};
use crate::error::{Result, RouteError};
use crate::graph::{Edge, Graph};
use crate::route::Route;

/// Upper bounds on what a single request may ask for.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Limits {
    pub max_nodes: usize,
    pub max_edges: usize,
}

impl Default for Limits {
    fn default() -> Self {
        Self {
            max_nodes: 1_000_000,
            max_edges: 10_000_000,
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ServiceConfig {
    pub limits: Limits,
    pub frontier: Frontier,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct Request {
    #[serde(rename = "V")]
    pub node_count: usize,
    pub source: i64,
    pub edges: Vec<(i64, i64, Cost)>,
    #[serde(default)]
    pub target: Option<i64>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Response {
    #[serde(serialize_with = "serialize_costs")]
    pub distances: Vec<Cost>,
    /// Present only when the request named a target; `null` if it is unreachable.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub route: Option<Option<Route>>,
}

#[derive(Debug, Serialize)]
struct ErrorResponse<'a> {
    error: ErrorBody<'a>,
}

#[derive(Debug, Serialize)]
struct ErrorBody<'a> {
    code: &'a str,
    message: String,
}

pub fn decode(line: &str) -> Result<Request> {
    serde_json::from_str(line).map_err(|e| RouteError::Malformed(e.to_string()))
}

fn node_in_range(id: i64, node_count: usize) -> Option<NodeId> {
    usize::try_from(id).ok().filter(|&n| n < node_count)
}

/// Validates `request`, builds its graph and runs the search.
pub fn handle(request: &Request, config: &ServiceConfig) -> Result<Response> {
    let node_count = request.node_count;
    if node_count > config.limits.max_nodes {
        return Err(RouteError::LimitExceeded {
            what: "node count",
            requested: node_count,
            limit: config.limits.max_nodes,
        });
    }
    if request.edges.len() > config.limits.max_edges {
        return Err(RouteError::LimitExceeded {
            what: "edge count",
            requested: request.edges.len(),
            limit: config.limits.max_edges,
        });
    }

    let source = match node_in_range(request.source, node_count) {
        Some(source) => source,
        None if node_count == 0 => 0,
        None => {
            return Err(RouteError::SourceOutOfRange {
                node: request.source,
                node_count,
            })
        }
    };

    let mut edges = Vec::with_capacity(request.edges.len());
    for (index, &(from, to, weight)) in request.edges.iter().enumerate() {
        let endpoint = |id: i64| {
            node_in_range(id, node_count).ok_or(RouteError::EdgeOutOfRange {
                index,
                node: id,
                node_count,
            })
        };
        edges.push(Edge::new(endpoint(from)?, endpoint(to)?, weight));
    }
    let graph = Graph::from_edges(node_count, &edges)?;

    let target = request
        .target
        .map(|t| {
            node_in_range(t, node_count).ok_or(RouteError::TargetOutOfRange {
                target: t,
                node_count,
            })
        })
        .transpose()?;

    let tree = shortest_path_tree(&graph, source, config.frontier)?;
    let route = target.map(|t| tree.route_to(t)).transpose()?;
    debug!(
        nodes = node_count,
        edges = graph.edge_count(),
        source,
        "request answered"
    );

    Ok(Response {
        distances: tree.into_distances(),
        route,
    })
}

/// Writes either outcome as a single JSON line (without the newline).
pub fn encode(outcome: &Result<Response>) -> serde_json::Result<String> {
    match outcome {
        Ok(response) => serde_json::to_string(response),
        Err(err) => serde_json::to_string(&ErrorResponse {
            error: ErrorBody {
                code: err.code(),
                message: err.to_string(),
            },
        }),
    }
}

/// Decode, handle and encode one request line.
pub fn respond(line: &str, config: &ServiceConfig) -> (String, Option<RouteError>) {
    finish(decode(line).and_then(|request| handle(&request, config)))
}

/// Like [`respond`], for a line read as raw bytes; non-UTF-8 input is malformed.
pub fn respond_bytes(line: &[u8], config: &ServiceConfig) -> (String, Option<RouteError>) {
    match std::str::from_utf8(line) {
        Ok(line) => respond(line, config),
        Err(e) => finish(Err(RouteError::Malformed(e.to_string()))),
    }
}

fn finish(outcome: Result<Response>) -> (String, Option<RouteError>) {
    let body = match encode(&outcome) {
        Ok(body) => body,
        Err(e) => {
            let fallback = Err(RouteError::Malformed(format!("response could not be encoded: {e}")));
            encode(&fallback).unwrap_or_default()
        }
    };
    (body, outcome.err())
}
