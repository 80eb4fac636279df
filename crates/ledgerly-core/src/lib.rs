//! # ledgerly-core: Document Total & Tax Engine
//!
//! Every transaction screen (invoice, quotation, debit note, sales return)
//! turns its line items and document-level adjustments into a payable total.
//! This crate is that arithmetic, written once, with zero I/O.
//!
//! ## Architecture Position
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                        Ledgerly Architecture                            │
//! │                                                                         │
//! │  ┌─────────────────────────────────────────────────────────────────┐   │
//! │  │                Document screens (TypeScript)                    │   │
//! │  │   Invoice ─ Quotation ─ Debit Note ─ Sales Return               │   │
//! │  └─────────────────────────────┬───────────────────────────────────┘   │
//! │                                │ raw form strings                       │
//! │  ┌─────────────────────────────▼───────────────────────────────────┐   │
//! │  │          ledgerly-session (edit session, config, logging)       │   │
//! │  └─────────────────────────────┬───────────────────────────────────┘   │
//! │                                │ LineItem[], DocumentAdjustments        │
//! │  ┌─────────────────────────────▼───────────────────────────────────┐   │
//! │  │               ★ ledgerly-core (THIS CRATE) ★                    │   │
//! │  │                                                                 │   │
//! │  │   ┌───────────┐  ┌───────────┐  ┌───────────┐  ┌───────────┐  │   │
//! │  │   │    tax    │─►│   line    │─►│  totals   │◄─│ rounding  │  │   │
//! │  │   │  parser   │  │ LineItem  │  │ aggregate │  │ round_off │  │   │
//! │  │   └───────────┘  └───────────┘  └─────┬─────┘  └───────────┘  │   │
//! │  │                                       │                        │   │
//! │  │                  document ────────────┘ (Document, submission) │   │
//! │  │                                                                 │   │
//! │  │   NO I/O • NO SHARED STATE • NOTHING CACHED                    │   │
//! │  └─────────────────────────────────────────────────────────────────┘   │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Modules
//!
//! - [`tax`] - Tax descriptor parsing and the descriptor vocabulary
//! - [`line`] - Line items and line amounts
//! - [`totals`] - Document aggregation
//! - [`rounding`] - The round-off rule
//! - [`document`] - Documents and the submission record
//! - [`validation`] - Submit-time business rules (caller policy)
//! - [`error`] - Domain error types
//!
//! ## Design Principles
//!
//! 1. **Pure Functions**: same inputs, same totals, every time
//! 2. **Never Fails On Numbers**: bad tax text is 0%, negative totals are allowed
//! 3. **Full Precision Lines**: only the final document total is rounded
//! 4. **Derived, Not Stored**: line amounts and totals are recomputed on use
//!
//! ## Example Usage
//!
//! ```rust
//! use ledgerly_core::{compute_totals, DocumentAdjustments, LineItem};
//!
//! let items = vec![LineItem::new(1.0, 1000.0).with_tax("GST @ 18%")];
//! let totals = compute_totals(&items, &DocumentAdjustments::default());
//!
//! assert_eq!(totals.subtotal, 1180.0);
//! assert_eq!(totals.round_off_delta, 0.0);
//! ```

// =============================================================================
// Module Declarations
// =============================================================================

pub mod document;
pub mod error;
pub mod line;
pub mod rounding;
pub mod tax;
pub mod totals;
pub mod validation;

// =============================================================================
// Re-exports for Convenience
// =============================================================================

pub use document::{Document, DocumentKind, DocumentSubmission, SubmittedLine};
pub use error::{CoreError, CoreResult, ValidationError};
pub use line::{compute_line_amount, LineBreakdown, LineFields, LineItem};
pub use rounding::{round_off, RoundingPolicy};
pub use tax::{parse_tax_percent, tax_components, TaxComponent, TaxDescriptor};
pub use totals::{compute_totals, DiscountType, DocumentAdjustments, DocumentTotals};
