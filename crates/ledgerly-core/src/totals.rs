//! # Document Totals
//!
//! Aggregates priced lines and document-level adjustments into the payable total.
//!
//! ## Aggregation Flow
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  Σ line.amount()                          = subtotal                    │
//! │  subtotal + additional_charges            = taxable_amount              │
//! │                                                                         │
//! │  Percentage: taxable_amount × disc / 100  ┐                            │
//! │  Fixed:      disc                         ┴ = discount_value            │
//! │                                                                         │
//! │  taxable_amount − discount_value          = total_before_round          │
//! │  RoundingPolicy::apply(total_before_round) = rounded_total              │
//! │  rounded_total − total_before_round       = round_off_delta             │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Nothing is cached: every call derives the totals from scratch, so callers
//! may run it on every keystroke and from any thread.

use serde::{Deserialize, Serialize};
use tracing::debug;
use ts_rs::TS;

use crate::error::CoreError;
use crate::line::LineItem;
use crate::rounding::RoundingPolicy;

// =============================================================================
// Adjustments
// =============================================================================

/// How the overall discount is interpreted.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "lowercase")]
pub enum DiscountType {
    /// Percent of the taxable amount.
    #[default]
    Percentage,
    /// A flat currency amount, applied as-is even if it exceeds the total.
    Fixed,
}

impl std::fmt::Display for DiscountType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            DiscountType::Percentage => write!(f, "percentage"),
            DiscountType::Fixed => write!(f, "fixed"),
        }
    }
}

impl std::str::FromStr for DiscountType {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "percentage" | "percent" | "%" => Ok(DiscountType::Percentage),
            "fixed" | "flat" | "amount" => Ok(DiscountType::Fixed),
            _ => Err(CoreError::UnknownDiscountType(s.to_string())),
        }
    }
}

/// Document-level inputs applied after the lines are summed.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct DocumentAdjustments {
    /// Added to the subtotal before the discount. May be negative.
    pub additional_charges: f64,
    pub overall_discount: f64,
    pub overall_discount_type: DiscountType,
    pub auto_round_off: bool,
}

impl DocumentAdjustments {
    #[inline]
    pub fn rounding_policy(&self) -> RoundingPolicy {
        RoundingPolicy::from_auto_round_off(self.auto_round_off)
    }

    /// The discount in currency units for a given taxable amount.
    pub fn discount_value(&self, taxable_amount: f64) -> f64 {
        match self.overall_discount_type {
            DiscountType::Percentage => taxable_amount * (self.overall_discount / 100.0),
            DiscountType::Fixed => self.overall_discount,
        }
    }
}

// =============================================================================
// Totals
// =============================================================================

/// Everything derived from a document's lines and adjustments.
///
/// ## Invariants
/// - `taxable_amount - discount_value == total_before_round`
/// - round-off off: `rounded_total == total_before_round`, `round_off_delta == 0`
/// - round-off on: `rounded_total` is whole and `|round_off_delta| < 1`
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct DocumentTotals {
    pub subtotal: f64,
    pub taxable_amount: f64,
    pub discount_value: f64,
    pub total_before_round: f64,
    pub rounded_total: f64,
    pub round_off_delta: f64,
    /// Sum of line tax amounts. Display only, already inside `subtotal`.
    pub tax_total: f64,
}

/// Computes the totals of a document.
///
/// ## Example
/// ```rust
/// use ledgerly_core::{compute_totals, DiscountType, DocumentAdjustments, LineItem};
///
/// let items = vec![LineItem::new(2.0, 100.0).with_discount(10.0)];
/// let adj = DocumentAdjustments {
///     additional_charges: 50.0,
///     overall_discount: 5.0,
///     overall_discount_type: DiscountType::Percentage,
///     auto_round_off: true,
/// };
///
/// let totals = compute_totals(&items, &adj);
/// assert_eq!(totals.subtotal, 180.0);
/// assert_eq!(totals.taxable_amount, 230.0);
/// assert_eq!(totals.discount_value, 11.5);
/// assert_eq!(totals.total_before_round, 218.5);
/// assert_eq!(totals.rounded_total, 219.0);
/// assert_eq!(totals.round_off_delta, 0.5);
/// ```
pub fn compute_totals(items: &[LineItem], adj: &DocumentAdjustments) -> DocumentTotals {
    let mut subtotal = 0.0;
    let mut tax_total = 0.0;
    for item in items {
        let line = item.breakdown();
        subtotal += line.amount;
        tax_total += line.tax_amount;
    }

    let taxable_amount = subtotal + adj.additional_charges;
    let discount_value = adj.discount_value(taxable_amount);
    let total_before_round = taxable_amount - discount_value;

    let (rounded_total, round_off_delta) = match adj.rounding_policy() {
        RoundingPolicy::None => (total_before_round, 0.0),
        policy @ RoundingPolicy::NearestUnit => {
            let rounded = policy.apply(total_before_round);
            (rounded, rounded - total_before_round)
        }
    };

    debug!(
        lines = items.len(),
        subtotal,
        total_before_round,
        rounded_total,
        "Recomputed document totals"
    );

    DocumentTotals {
        subtotal,
        taxable_amount,
        discount_value,
        total_before_round,
        rounded_total,
        round_off_delta,
        tax_total,
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
