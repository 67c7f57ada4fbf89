//! Mapping of consumer-group state names to the numeric codes exported as
//! the health gauge.

pub const STATE_UNKNOWN: f64 = 0.0;
pub const STATE_PREPARING_REBALANCE: f64 = 1.0;
pub const STATE_COMPLETING_REBALANCE: f64 = 2.0;
pub const STATE_STABLE: f64 = 3.0;
pub const STATE_DEAD: f64 = 4.0;
pub const STATE_EMPTY: f64 = 5.0;

/// Map a consumer-group state name to its numeric code.
///
/// Case-sensitive exact match, no normalization. Any unrecognized name
/// (including the empty string) reports 0, which is the same code as an
/// explicit `UNKNOWN` state.
pub fn map_state(name: &str) -> f64 {
    match name {
        "UNKNOWN" => STATE_UNKNOWN,
        "PREPARING_REBALANCE" => STATE_PREPARING_REBALANCE,
        "COMPLETING_REBALANCE" => STATE_COMPLETING_REBALANCE,
        "STABLE" => STATE_STABLE,
        "DEAD" => STATE_DEAD,
        "EMPTY" => STATE_EMPTY,
        _ => STATE_UNKNOWN,
    }
}
