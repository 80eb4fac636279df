//! # Validation Module
//!
//! Business rules applied by callers before a document leaves the screen.
//!
//! ## Validation Strategy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                      Validation Layers                                  │
//! │                                                                         │
//! │  Layer 1: Form fields                                                  │
//! │  └── Non-numeric text coerced to 0 (ledgerly-session::form)            │
//! │           │                                                             │
//! │           ▼                                                             │
//! │  Layer 2: Totals engine                                                │
//! │  └── NO validation. Negative lines, discounts above 100%, and          │
//! │      fixed discounts larger than the total are all computed as-is.     │
//! │           │                                                             │
//! │           ▼                                                             │
//! │  Layer 3: Submit (THIS MODULE)                                         │
//! │  └── Caller decides what is a business error                           │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use crate::document::Document;
use crate::error::ValidationError;

/// Result type for validation operations.
pub type ValidationResult<T> = Result<T, ValidationError>;

/// Checks that a document can be submitted.
///
/// ## Rules
/// - At least one line must have a nonzero, finite quantity
///
/// Returns and corrective documents record reversals as negative
/// quantities, so those lines count as valid.
///
/// ## Example
/// ```rust
/// use ledgerly_core::{Document, DocumentKind, LineItem};
/// use ledgerly_core::validation::validate_submission;
///
/// let mut doc = Document::new(DocumentKind::Quotation);
/// assert!(validate_submission(&doc).is_err());
///
/// doc.push_item(LineItem::new(1.0, 99.0));
/// assert!(validate_submission(&doc).is_ok());
/// ```
pub fn validate_submission(document: &Document) -> ValidationResult<()> {
    let has_valid_line = document
        .items
        .iter()
        .any(|item| item.quantity.is_finite() && item.quantity != 0.0);

    if !has_valid_line {
        return Err(ValidationError::NoValidLineItems);
    }

    Ok(())
}

/// Validates a percentage discount.
///
/// The engine accepts any value; screens that want to warn about
/// discounts outside 0..=100 call this.
pub fn validate_discount_percent(percent: f64) -> ValidationResult<()> {
    validate_finite("discount", percent)?;

    if !(0.0..=100.0).contains(&percent) {
        return Err(ValidationError::OutOfRange {
            field: "discount".to_string(),
            min: 0.0,
            max: 100.0,
        });
    }

    Ok(())
}

/// Rejects NaN and infinities.
pub fn validate_finite(field: &str, value: f64) -> ValidationResult<()> {
    if !value.is_finite() {
        return Err(ValidationError::NotFinite {
            field: field.to_string(),
        });
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::document::DocumentKind;
    use crate::line::LineItem;

    #[test]
    fn test_validate_submission() {
        let mut doc = Document::new(DocumentKind::Invoice);
        assert_eq!(
            validate_submission(&doc),
            Err(ValidationError::NoValidLineItems)
        );

        doc.push_item(LineItem::new(0.0, 100.0));
        assert!(validate_submission(&doc).is_err());

        doc.push_item(LineItem::new(f64::NAN, 100.0));
        assert!(validate_submission(&doc).is_err());

        doc.push_item(LineItem::new(3.0, 0.0));
        assert!(validate_submission(&doc).is_ok());
    }

    #[test]
    fn test_negative_quantity_is_a_valid_line() {
        let mut doc = Document::new(DocumentKind::SalesReturn);
        doc.push_item(LineItem::new(-2.0, 250.0).with_tax("GST @ 12%"));

        assert_eq!(validate_submission(&doc), Ok(()));
    }

    #[test]
    fn test_validate_discount_percent() {
        assert!(validate_discount_percent(0.0).is_ok());
        assert!(validate_discount_percent(12.5).is_ok());
        assert!(validate_discount_percent(100.0).is_ok());

        assert!(validate_discount_percent(-1.0).is_err());
        assert!(validate_discount_percent(100.01).is_err());
        assert!(validate_discount_percent(f64::NAN).is_err());
    }

    #[test]
    fn test_validate_finite() {
        assert!(validate_finite("rate", 1.0).is_ok());
        assert_eq!(
            validate_finite("rate", f64::INFINITY),
            Err(ValidationError::NotFinite {
                field: "rate".to_string()
            })
        );
    }
}
