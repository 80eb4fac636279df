//! # Documents
//!
//! A transaction document and the record sent to the backend on submit.
//!
//! ## Document Lifecycle
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                      One Edit Session                                   │
//! │                                                                         │
//! │  Document { kind, items: Vec<LineItem>, adjustments }                   │
//! │       │                                                                 │
//! │       ├── push_item / replace_item / remove_item / set_adjustments      │
//! │       │        (inputs change)                                          │
//! │       │                                                                 │
//! │       ├── totals()  ◄── recomputed from scratch on every call           │
//! │       │                                                                 │
//! │       └── to_submission() ──► DocumentSubmission (wire record)          │
//! │                                 items[].amount, subtotal,               │
//! │                                 discountAmount, roundOffDiff,           │
//! │                                 totalAmount                             │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use serde::{Deserialize, Serialize};
use ts_rs::TS;

use crate::error::{CoreError, CoreResult};
use crate::line::LineItem;
use crate::totals::{compute_totals, DiscountType, DocumentAdjustments, DocumentTotals};

// =============================================================================
// Document Kind
// =============================================================================

/// The transaction screens that share the totals engine.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "snake_case")]
pub enum DocumentKind {
    Invoice,
    Quotation,
    DebitNote,
    SalesReturn,
}

impl DocumentKind {
    pub const ALL: [DocumentKind; 4] = [
        DocumentKind::Invoice,
        DocumentKind::Quotation,
        DocumentKind::DebitNote,
        DocumentKind::SalesReturn,
    ];

    pub const fn as_str(&self) -> &'static str {
        match self {
            DocumentKind::Invoice => "invoice",
            DocumentKind::Quotation => "quotation",
            DocumentKind::DebitNote => "debit_note",
            DocumentKind::SalesReturn => "sales_return",
        }
    }
}

impl std::fmt::Display for DocumentKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

// =============================================================================
// Document
// =============================================================================

/// A document being edited: exactly one item list and one set of adjustments.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct Document {
    pub kind: DocumentKind,
    pub items: Vec<LineItem>,
    pub adjustments: DocumentAdjustments,
}

impl Document {
    /// Creates an empty document with default adjustments.
    pub fn new(kind: DocumentKind) -> Self {
        Document {
            kind,
            items: Vec::new(),
            adjustments: DocumentAdjustments::default(),
        }
    }

    pub fn with_adjustments(mut self, adjustments: DocumentAdjustments) -> Self {
        self.adjustments = adjustments;
        self
    }

    pub fn push_item(&mut self, item: LineItem) {
        self.items.push(item);
    }

    /// Replaces the line at `index`, returning the previous one.
    pub fn replace_item(&mut self, index: usize, item: LineItem) -> CoreResult<LineItem> {
        let len = self.items.len();
        let slot = self
            .items
            .get_mut(index)
            .ok_or(CoreError::LineNotFound { index, len })?;
        Ok(std::mem::replace(slot, item))
    }

    pub fn remove_item(&mut self, index: usize) -> CoreResult<LineItem> {
        if index >= self.items.len() {
            return Err(CoreError::LineNotFound {
                index,
                len: self.items.len(),
            });
        }
        Ok(self.items.remove(index))
    }

    pub fn set_adjustments(&mut self, adjustments: DocumentAdjustments) {
        self.adjustments = adjustments;
    }

    /// Removes every line and resets the adjustments.
    pub fn clear(&mut self) {
        self.items.clear();
        self.adjustments = DocumentAdjustments::default();
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Fresh totals for the current inputs.
    pub fn totals(&self) -> DocumentTotals {
        compute_totals(&self.items, &self.adjustments)
    }

    /// Builds the record persisted by the backend.
    ///
    /// ## Example
    /// ```rust
    /// use ledgerly_core::{Document, DocumentKind, LineItem};
    ///
    /// let mut doc = Document::new(DocumentKind::Invoice);
    /// doc.push_item(LineItem::new(1.0, 1000.0).with_tax("GST @ 18%"));
    ///
    /// let record = doc.to_submission();
    /// assert_eq!(record.items[0].amount, 1180.0);
    /// assert_eq!(record.total_amount, 1180.0);
    /// ```
    pub fn to_submission(&self) -> DocumentSubmission {
        let totals = self.totals();
        let items = self
            .items
            .iter()
            .map(|item| SubmittedLine {
                quantity: item.quantity,
                rate: item.unit_rate,
                discount: item.discount_percent,
                tax: item.tax.clone(),
                amount: item.amount(),
            })
            .collect();

        DocumentSubmission {
            kind: self.kind,
            items,
            additional_charges: self.adjustments.additional_charges,
            discount_type: self.adjustments.overall_discount_type,
            subtotal: totals.subtotal,
            discount_amount: totals.discount_value,
            round_off_diff: totals.round_off_delta,
            total_amount: totals.rounded_total,
        }
    }
}

// =============================================================================
// Submission Record
// =============================================================================

/// One line as it appears in the submitted record.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct SubmittedLine {
    pub quantity: f64,
    pub rate: f64,
    /// Line discount percent.
    pub discount: f64,
    pub tax: String,
    pub amount: f64,
}

/// The flat record the backend stores as the authoritative totals.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct DocumentSubmission {
    pub kind: DocumentKind,
    pub items: Vec<SubmittedLine>,
    pub additional_charges: f64,
    pub discount_type: DiscountType,
    pub subtotal: f64,
    pub discount_amount: f64,
    pub round_off_diff: f64,
    pub total_amount: f64,
}

impl DocumentSubmission {
    /// Serializes the record as the JSON request body.
    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string(self)
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    fn invoice() -> Document {
        let mut doc = Document::new(DocumentKind::Invoice).with_adjustments(DocumentAdjustments {
            additional_charges: 50.0,
            overall_discount: 5.0,
            overall_discount_type: DiscountType::Percentage,
            auto_round_off: true,
        });
        doc.push_item(LineItem::new(2.0, 100.0).with_discount(10.0));
        doc
    }

    #[test]
    fn test_totals_follow_edits() {
        let mut doc = invoice();
        assert_eq!(doc.totals().rounded_total, 219.0);

        doc.replace_item(0, LineItem::new(1.0, 100.0)).unwrap();
        // (100 + 50) × 0.95 = 142.5 → 143
        assert_eq!(doc.totals().rounded_total, 143.0);

        doc.remove_item(0).unwrap();
        assert_eq!(doc.totals().subtotal, 0.0);
    }

    #[test]
    fn test_stale_index_is_rejected() {
        let mut doc = invoice();

        assert_eq!(
            doc.remove_item(3),
            Err(CoreError::LineNotFound { index: 3, len: 1 })
        );
        assert!(doc.replace_item(1, LineItem::default()).is_err());
        assert_eq!(doc.items.len(), 1);
    }

    #[test]
    fn test_replace_returns_previous_line() {
        let mut doc = invoice();
        let old = doc.replace_item(0, LineItem::new(5.0, 1.0)).unwrap();
        assert_eq!(old.quantity, 2.0);
    }

    #[test]
    fn test_clear() {
        let mut doc = invoice();
        doc.clear();
        assert!(doc.is_empty());
        assert_eq!(doc.adjustments, DocumentAdjustments::default());
    }

    #[test]
    fn test_submission_record() {
        let record = invoice().to_submission();

        assert_eq!(record.items.len(), 1);
        assert_eq!(record.items[0].amount, 180.0);
        assert_eq!(record.subtotal, 180.0);
        assert_eq!(record.discount_amount, 11.5);
        assert_eq!(record.round_off_diff, 0.5);
        assert_eq!(record.total_amount, 219.0);
    }

    #[test]
    fn test_submission_json_field_names() {
        let json: serde_json::Value =
            serde_json::from_str(&invoice().to_submission().to_json().unwrap()).unwrap();

        assert_eq!(json["kind"], "invoice");
        assert_eq!(json["discountAmount"], 11.5);
        assert_eq!(json["roundOffDiff"], 0.5);
        assert_eq!(json["totalAmount"], 219.0);
        assert_eq!(json["discountType"], "percentage");
        assert_eq!(json["items"][0]["amount"], 180.0);
        assert_eq!(json["items"][0]["rate"], 100.0);
    }

    #[test]
    fn test_sales_return_with_negative_lines() {
        let mut doc = Document::new(DocumentKind::SalesReturn);
        doc.push_item(LineItem::new(-2.0, 250.0).with_tax("GST @ 12%"));

        let record = doc.to_submission();
        assert!((record.total_amount + 560.0).abs() < 1e-9);
    }
}
