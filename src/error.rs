use crate::cost::{Cost, NodeId};

/// Everything that can reject a shortest-path request.
///
/// All kinds are detected before the search starts, so a request either gets
/// a complete distance vector or one of these. None of them is transient.
#[derive(thiserror::Error, Debug, Clone, PartialEq)]
pub enum RouteError {
    #[error("malformed request: {0}")]
    Malformed(String),

    #[error("edge {index} references node {node}, outside [0, {node_count})")]
    EdgeOutOfRange {
        index: usize,
        node: i64,
        node_count: usize,
    },

    #[error("source node {node} is outside [0, {node_count})")]
    SourceOutOfRange { node: i64, node_count: usize },

    #[error("edge {index} has weight {weight}, expected a non-negative finite number")]
    NegativeWeight { index: usize, weight: Cost },

    #[error("target node {target} is outside [0, {node_count})")]
    TargetOutOfRange { target: i64, node_count: usize },

    #[error("sum of edge weights is not representable as a finite cost")]
    CostOverflow,

    #[error("{what} {requested} exceeds the configured limit of {limit}")]
    LimitExceeded {
        what: &'static str,
        requested: usize,
        limit: usize,
    },
}

impl RouteError {
    /// Stable code written to the wire. Callers match on this, never on the message.
    pub fn code(&self) -> &'static str {
        match self {
            RouteError::Malformed(_) => "malformed_request",
            RouteError::EdgeOutOfRange { .. } => "edge_out_of_range",
            RouteError::SourceOutOfRange { .. } => "source_out_of_range",
            RouteError::NegativeWeight { .. } => "negative_weight",
            RouteError::TargetOutOfRange { .. } => "target_out_of_range",
            RouteError::CostOverflow => "cost_overflow",
            RouteError::LimitExceeded { .. } => "limit_exceeded",
        }
    }

    /// Every current kind is bad input; resubmitting the same request cannot succeed.
    pub fn is_retryable(&self) -> bool {
        false
    }

    pub(crate) fn source_out_of_range(source: NodeId, node_count: usize) -> Self {
        RouteError::SourceOutOfRange {
            node: i64::try_from(source).unwrap_or(i64::MAX),
            node_count,
        }
    }
}

pub type Result<T> = std::result::Result<T, RouteError>;
