//! # Error Types
//!
//! Domain-specific error types for ledgerly-core.
//!
//! ## Error Hierarchy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         Error Types                                     │
//! │                                                                         │
//! │  ledgerly-core errors (this file)                                      │
//! │  ├── CoreError        - Document editing / vocabulary lookups          │
//! │  └── ValidationError  - Caller-side business policies                  │
//! │                                                                         │
//! │  ledgerly-session errors (separate crate)                              │
//! │  └── SessionError     - Config loading, wraps CoreError                │
//! │                                                                         │
//! │  NOT HERE: the arithmetic itself. compute_line_amount, compute_totals  │
//! │  and parse_tax_percent never fail; bad input degrades to a number.     │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use thiserror::Error;

// =============================================================================
// Core Error
// =============================================================================

/// Errors raised while editing a document or looking up vocabulary.
#[derive(Debug, Error, PartialEq)]
pub enum CoreError {
    /// A line index does not exist in the document.
    ///
    /// ## When This Occurs
    /// - The UI removed a row and then sent an edit for a stale index
    /// - Two edits raced in the form and the second targets a shifted row
    #[error("Line {index} not found (document has {len} lines)")]
    LineNotFound { index: usize, len: usize },

    /// A tax label is not part of the controlled vocabulary.
    ///
    /// Only raised by the strict `TaxDescriptor::from_str`; the lenient
    /// parser used by the engine maps unknown text to 0% instead.
    #[error("Unknown tax descriptor: {0:?}")]
    UnknownTaxDescriptor(String),

    /// Discount type text is neither percentage nor fixed.
    #[error("Unknown discount type: '{0}'. Valid options: percentage, fixed")]
    UnknownDiscountType(String),

    /// Validation error (wraps ValidationError).
    #[error("Validation error: {0}")]
    Validation(#[from] ValidationError),
}

// =============================================================================
// Validation Error
// =============================================================================

/// Business-rule failures detected before a document is submitted.
#[derive(Debug, Error, PartialEq)]
pub enum ValidationError {
    /// The document has no line item with a nonzero quantity.
    #[error("Select at least one valid line item")]
    NoValidLineItems,

    /// Numeric value is out of range.
    #[error("{field} must be between {min} and {max}")]
    OutOfRange { field: String, min: f64, max: f64 },

    /// Value is NaN or infinite.
    #[error("{field} must be a finite number")]
    NotFinite { field: String },
}

// =============================================================================
// Result Type Alias
// =============================================================================

/// Convenience type alias for Results with CoreError.
pub type CoreResult<T> = Result<T, CoreError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_messages() {
        let err = CoreError::LineNotFound { index: 4, len: 2 };
        assert_eq!(err.to_string(), "Line 4 not found (document has 2 lines)");

        let err = CoreError::UnknownTaxDescriptor("VAT 7".to_string());
        assert_eq!(err.to_string(), "Unknown tax descriptor: \"VAT 7\"");
    }

    #[test]
    fn test_validation_error_messages() {
        assert_eq!(
            ValidationError::NoValidLineItems.to_string(),
            "Select at least one valid line item"
        );

        let err = ValidationError::OutOfRange {
            field: "discount".to_string(),
            min: 0.0,
            max: 100.0,
        };
        assert_eq!(err.to_string(), "discount must be between 0 and 100");
    }

    #[test]
    fn test_validation_converts_to_core_error() {
        let core_err: CoreError = ValidationError::NoValidLineItems.into();
        assert!(matches!(core_err, CoreError::Validation(_)));
    }
}
