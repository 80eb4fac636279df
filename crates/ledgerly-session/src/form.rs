//! # Form Coercion
//!
//! Document screens hand over raw field text. The engine only takes numbers,
//! so this module converts, using the screens' convention that anything
//! unreadable counts as `0`.
//!
//! ```text
//! "1,250.50" ──► 1250.5        ""      ──► 0
//! "  12 "    ──► 12            "abc"   ──► 0
//! "-3"       ──► -3            "NaN"   ──► 0
//! ```

use ledgerly_core::{DiscountType, DocumentAdjustments, LineItem, TaxDescriptor};
use serde::{Deserialize, Serialize};

/// Converts form text to a number, mapping unreadable input to `0`.
///
/// ## Example
/// ```rust
/// use ledgerly_session::form::coerce_number;
///
/// assert_eq!(coerce_number("1,250.50"), 1250.5);
/// assert_eq!(coerce_number("twelve"), 0.0);
/// ```
pub fn coerce_number(raw: &str) -> f64 {
    let cleaned: String = raw.trim().chars().filter(|c| *c != ',').collect();

    match cleaned.parse::<f64>() {
        Ok(value) if value.is_finite() => value,
        _ => 0.0,
    }
}

/// Raw text of one line row.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct LineItemForm {
    pub quantity: String,
    pub rate: String,
    pub discount: String,
    pub tax: String,
}

impl LineItemForm {
    pub fn to_line_item(&self) -> LineItem {
        let tax = self.tax.trim();
        let tax = if tax.is_empty() {
            TaxDescriptor::None.as_str()
        } else {
            tax
        };

        LineItem::new(coerce_number(&self.quantity), coerce_number(&self.rate))
            .with_discount(coerce_number(&self.discount))
            .with_tax(tax)
    }
}

/// Raw text of the document-level fields.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct AdjustmentsForm {
    pub additional_charges: String,
    pub overall_discount: String,
    pub discount_type: DiscountType,
    pub auto_round_off: bool,
}

impl AdjustmentsForm {
    pub fn to_adjustments(&self) -> DocumentAdjustments {
        DocumentAdjustments {
            additional_charges: coerce_number(&self.additional_charges),
            overall_discount: coerce_number(&self.overall_discount),
            overall_discount_type: self.discount_type,
            auto_round_off: self.auto_round_off,
        }
    }
}
