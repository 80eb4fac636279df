//! # Round-Off
//!
//! The single rounding implementation in the engine.
//!
//! ## Tie-Break Rule
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  ROUND HALF AWAY FROM ZERO                                              │
//! │                                                                         │
//! │    218.4 → 218        218.5 → 219        218.6 → 219                   │
//! │     -0.4 →   0         -0.5 →  -1         -1.5 →  -2                   │
//! │                                                                         │
//! │  Positive totals round half UP, which is what every document screen    │
//! │  shows. Negative totals (returns, oversized fixed discounts) mirror     │
//! │  that, so |round_off(-x)| == |round_off(x)|.                            │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Lines are never rounded. Only the final document total is.

use serde::{Deserialize, Serialize};
use ts_rs::TS;

/// Rounds to the nearest whole currency unit, ties away from zero.
///
/// ## Example
/// ```rust
/// use ledgerly_core::rounding::round_off;
///
/// assert_eq!(round_off(218.5), 219.0);
/// assert_eq!(round_off(218.49), 218.0);
/// assert_eq!(round_off(-0.5), -1.0);
/// ```
///
/// A result of negative zero is returned as `0.0` so it never renders as "-0".
#[inline]
pub fn round_off(x: f64) -> f64 {
    x.round() + 0.0
}

/// Whether a document's total is rounded before submission.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "snake_case")]
pub enum RoundingPolicy {
    /// Keep the total exactly as computed.
    #[default]
    None,
    /// Round the total to a whole currency unit with [`round_off`].
    NearestUnit,
}

impl RoundingPolicy {
    /// Maps the document's `autoRoundOff` switch to a policy.
    #[inline]
    pub const fn from_auto_round_off(enabled: bool) -> Self {
        if enabled {
            RoundingPolicy::NearestUnit
        } else {
            RoundingPolicy::None
        }
    }

    pub fn apply(&self, x: f64) -> f64 {
        match self {
            RoundingPolicy::None => x,
            RoundingPolicy::NearestUnit => round_off(x),
        }
    }
}
