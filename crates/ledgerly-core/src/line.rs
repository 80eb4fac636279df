//! # Line Items
//!
//! One row of a document and the arithmetic that prices it.
//!
//! ## Line Amount Pipeline
//! ```text
//! quantity × unit_rate ──► gross
//!                            │
//!                            ▼  × (1 − discount% / 100)
//!                           net
//!                            │
//!                            ▼  × (1 + tax% / 100)      tax% = parse_tax_percent(tax)
//!                          amount
//! ```
//!
//! No rounding happens here. Negative quantities or rates are priced as-is,
//! which is how return and corrective documents express reversals.

use serde::{Deserialize, Serialize};
use ts_rs::TS;

use crate::tax::{parse_tax_percent, TaxDescriptor};

// =============================================================================
// Line Item
// =============================================================================

/// The editable inputs of one document row.
///
/// The line amount is not a field: it is always derived from these four
/// inputs through [`LineItem::amount`], so it can never go stale.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct LineItem {
    pub quantity: f64,

    /// Price per unit.
    pub unit_rate: f64,

    /// Line discount in percent. Not clamped to 0..=100.
    pub discount_percent: f64,

    /// Tax label, normally one of [`TaxDescriptor::ALL`] but any text is accepted.
    pub tax: String,
}

impl LineItem {
    /// Creates an undiscounted, untaxed line.
    pub fn new(quantity: f64, unit_rate: f64) -> Self {
        LineItem {
            quantity,
            unit_rate,
            discount_percent: 0.0,
            tax: TaxDescriptor::None.as_str().to_string(),
        }
    }

    pub fn with_discount(mut self, discount_percent: f64) -> Self {
        self.discount_percent = discount_percent;
        self
    }

    pub fn with_tax(mut self, tax: impl Into<String>) -> Self {
        self.tax = tax.into();
        self
    }

    /// Tax percentage parsed from the label.
    #[inline]
    pub fn tax_percent(&self) -> f64 {
        parse_tax_percent(&self.tax)
    }

    /// The line amount: `qty × rate × (1 − disc/100) × (1 + tax/100)`.
    ///
    /// ## Example
    /// ```rust
    /// use ledgerly_core::LineItem;
    ///
    /// let line = LineItem::new(2.0, 100.0).with_discount(10.0);
    /// assert_eq!(line.amount(), 180.0);
    ///
    /// let taxed = LineItem::new(1.0, 1000.0).with_tax("GST @ 18%");
    /// assert_eq!(taxed.amount(), 1180.0);
    /// ```
    pub fn amount(&self) -> f64 {
        let gross = self.quantity * self.unit_rate;
        let net = gross * (1.0 - self.discount_percent / 100.0);
        net * (1.0 + self.tax_percent() / 100.0)
    }

    /// Step-by-step pricing of this line for display.
    pub fn breakdown(&self) -> LineBreakdown {
        let gross = self.quantity * self.unit_rate;
        let net = gross * (1.0 - self.discount_percent / 100.0);
        let tax_percent = self.tax_percent();
        let amount = net * (1.0 + tax_percent / 100.0);

        LineBreakdown {
            gross,
            discount_amount: gross - net,
            net,
            tax_percent,
            tax_amount: amount - net,
            amount,
        }
    }

    /// Returns a copy with the inputs a document kind ignores reset to neutral values.
    ///
    /// ```rust
    /// use ledgerly_core::{LineFields, LineItem};
    ///
    /// let line = LineItem::new(1.0, 100.0).with_discount(50.0).with_tax("GST @ 5%");
    /// let narrowed = line.with_fields(LineFields { discount: false, tax: true });
    /// assert_eq!(narrowed.discount_percent, 0.0);
    /// assert_eq!(narrowed.amount(), 105.0);
    /// assert_eq!(line.discount_percent, 50.0);
    /// ```
    pub fn with_fields(&self, fields: LineFields) -> LineItem {
        let mut item = self.clone();
        if !fields.discount {
            item.discount_percent = 0.0;
        }
        if !fields.tax {
            item.tax = TaxDescriptor::None.as_str().to_string();
        }
        item
    }
}

impl Default for LineItem {
    fn default() -> Self {
        LineItem::new(0.0, 0.0)
    }
}

/// Computes a line amount. Same as [`LineItem::amount`].
#[inline]
pub fn compute_line_amount(item: &LineItem) -> f64 {
    item.amount()
}

// =============================================================================
// Line Breakdown
// =============================================================================

/// Intermediate values of a priced line.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct LineBreakdown {
    /// `quantity × unit_rate`
    pub gross: f64,
    pub discount_amount: f64,
    /// Gross after the line discount.
    pub net: f64,
    pub tax_percent: f64,
    pub tax_amount: f64,
    /// Identical to [`LineItem::amount`].
    pub amount: f64,
}

// =============================================================================
// Line Fields
// =============================================================================

/// Which line inputs are meaningful for a document kind.
///
/// The formula never branches on document type. A kind without line
/// discounts simply feeds `0`, and a kind without line tax feeds `"None"`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(default)]
pub struct LineFields {
    pub discount: bool,
    pub tax: bool,
}

impl LineFields {
    pub const ALL: LineFields = LineFields {
        discount: true,
        tax: true,
    };
}

impl Default for LineFields {
    fn default() -> Self {
        LineFields::ALL
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_discounted_untaxed_line() {
        let line = LineItem::new(2.0, 100.0).with_discount(10.0);
        assert_eq!(compute_line_amount(&line), 180.0);
    }

    #[test]
    fn test_taxed_line() {
        let line = LineItem::new(1.0, 1000.0).with_tax("GST @ 18%");
        assert_eq!(line.amount(), 1180.0);
    }

    #[test]
    fn test_compound_tax_line() {
        let line = LineItem::new(1.0, 100.0).with_tax("GST @ 14% + cess @ 12%");
        assert!((line.amount() - 126.0).abs() < 1e-9);
    }

    #[test]
    fn test_negative_quantity_reverses_amount() {
        let line = LineItem::new(-3.0, 50.0).with_tax("GST @ 5%");
        assert!((line.amount() + 157.5).abs() < 1e-9);
    }

    #[test]
    fn test_discount_over_hundred_is_not_clamped() {
        let line = LineItem::new(1.0, 100.0).with_discount(150.0);
        assert!((line.amount() + 50.0).abs() < 1e-9);
    }

    #[test]
    fn test_unknown_tax_text_is_untaxed() {
        let line = LineItem::new(4.0, 25.0).with_tax("see notes");
        assert_eq!(line.amount(), 100.0);
    }

    #[test]
    fn test_no_rounding_at_line_level() {
        let line = LineItem::new(3.0, 33.333).with_tax("GST @ 12%");
        assert!(line.amount().fract() != 0.0);
    }

    #[test]
    fn test_breakdown_matches_amount_exactly() {
        let line = LineItem::new(7.0, 13.37)
            .with_discount(3.5)
            .with_tax("GST @ 28% + Cess @ 36%");
        let b = line.breakdown();

        assert_eq!(b.amount, line.amount());
        assert_eq!(b.tax_percent, 64.0);
        assert!((b.net + b.tax_amount - b.amount).abs() < 1e-9);
        assert!((b.gross - b.discount_amount - b.net).abs() < 1e-9);
    }

    #[test]
    fn test_with_fields_drops_tax() {
        let line = LineItem::new(1.0, 100.0).with_tax("GST @ 18%");
        let narrowed = line.with_fields(LineFields {
            discount: true,
            tax: false,
        });
        assert_eq!(narrowed.tax, "None");
        assert_eq!(narrowed.amount(), 100.0);
    }

    #[test]
    fn test_serde_field_names() {
        let line = LineItem::new(2.0, 10.0).with_discount(5.0);
        let json = serde_json::to_value(&line).unwrap();
        assert_eq!(json["unitRate"], 10.0);
        assert_eq!(json["discountPercent"], 5.0);
        assert_eq!(json["tax"], "None");
    }
}
