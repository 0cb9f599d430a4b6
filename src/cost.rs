use serde::{Serialize, Serializer};

pub type NodeId = usize;
pub type Cost = f64;

/// Distance reported for nodes with no path from the source.
///
/// Graph construction rejects any edge set whose total weight reaches this
/// value, so no finite path cost can collide with it. On the wire it is
/// written as `1.7976931348623157e308`.
pub const UNREACHABLE: Cost = f64::MAX;

// Largest integer an f64 (and a JavaScript number) holds exactly.
const MAX_EXACT_INTEGER: Cost = 9_007_199_254_740_992.0;

pub fn is_reachable(cost: Cost) -> bool {
    cost < UNREACHABLE
}

/// A cost as written to the wire: integral values without a fractional
/// part, everything else as a float.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct WireCost(pub Cost);

impl Serialize for WireCost {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let cost = self.0;
        if cost >= 0.0 && cost <= MAX_EXACT_INTEGER && cost.fract() == 0.0 {
            serializer.serialize_u64(cost as u64)
        } else {
            serializer.serialize_f64(cost)
        }
    }
}

pub(crate) fn serialize_costs<S: Serializer>(costs: &[Cost], serializer: S) -> Result<S::Ok, S::Error> {
    serializer.collect_seq(costs.iter().map(|&c| WireCost(c)))
}
