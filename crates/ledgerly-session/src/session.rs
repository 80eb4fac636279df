//! # Edit Session
//!
//! One open document screen.
//!
//! ## Edit Flow
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  Field edit ──► EditSession::update_line(i, item)                       │
//! │                     │                                                   │
//! │                     ├── narrow to the kind's LineFields                 │
//! │                     ├── replace the row in the Document                 │
//! │                     └── compute_totals(items, adjustments) ──► UI       │
//! │                                                                         │
//! │  Submit ──────► EditSession::submit()                                  │
//! │                     ├── validate_submission (≥ 1 line with qty ≠ 0)     │
//! │                     └── Document::to_submission() ──► backend          │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! The session never keeps totals between edits. Each edit returns a
//! fresh `DocumentTotals`, and `totals()` recomputes on every call.

use ledgerly_core::validation::validate_submission;
use ledgerly_core::{
    CoreError, Document, DocumentAdjustments, DocumentKind, DocumentSubmission, DocumentTotals,
    LineBreakdown, LineFields, LineItem,
};
use tracing::{debug, info};

use crate::config::{CurrencySettings, SessionConfig};
use crate::error::SessionResult;
use crate::form::{AdjustmentsForm, LineItemForm};

#[derive(Debug, Clone)]
pub struct EditSession {
    document: Document,
    fields: LineFields,
    default_tax: String,
    currency: CurrencySettings,
}

impl EditSession {
    /// Opens a blank document seeded with the configured defaults.
    pub fn new(kind: DocumentKind, config: &SessionConfig) -> Self {
        let adjustments = DocumentAdjustments {
            overall_discount_type: config.defaults.discount_type,
            auto_round_off: config.defaults.auto_round_off,
            ..DocumentAdjustments::default()
        };

        debug!(kind = %kind, "Opening edit session");

        EditSession {
            document: Document::new(kind).with_adjustments(adjustments),
            fields: config.line_fields(kind),
            default_tax: config.defaults.tax.clone(),
            currency: config.currency.clone(),
        }
    }

    /// Reopens a saved document for editing.
    pub fn resume(document: Document, config: &SessionConfig) -> Self {
        let fields = config.line_fields(document.kind);
        let items = document
            .items
            .iter()
            .map(|item| item.with_fields(fields))
            .collect();

        debug!(kind = %document.kind, lines = document.items.len(), "Resuming edit session");

        EditSession {
            document: Document { items, ..document },
            fields,
            default_tax: config.defaults.tax.clone(),
            currency: config.currency.clone(),
        }
    }

    pub fn document(&self) -> &Document {
        &self.document
    }

    pub fn kind(&self) -> DocumentKind {
        self.document.kind
    }

    pub fn fields(&self) -> LineFields {
        self.fields
    }

    /// A new empty row carrying the default tax.
    pub fn blank_line(&self) -> LineItem {
        LineItem::new(0.0, 0.0)
            .with_tax(self.default_tax.as_str())
            .with_fields(self.fields)
    }

    // =========================================================================
    // Edits
    // =========================================================================

    pub fn add_line(&mut self, item: LineItem) -> DocumentTotals {
        self.document.push_item(item.with_fields(self.fields));
        debug!(lines = self.document.items.len(), "Line added");
        self.totals()
    }

    pub fn update_line(&mut self, index: usize, item: LineItem) -> SessionResult<DocumentTotals> {
        self.document
            .replace_item(index, item.with_fields(self.fields))?;
        debug!(index, "Line updated");
        Ok(self.totals())
    }

    pub fn remove_line(&mut self, index: usize) -> SessionResult<DocumentTotals> {
        self.document.remove_item(index)?;
        debug!(index, lines = self.document.items.len(), "Line removed");
        Ok(self.totals())
    }

    pub fn set_adjustments(&mut self, adjustments: DocumentAdjustments) -> DocumentTotals {
        self.document.set_adjustments(adjustments);
        debug!(
            discount_type = %adjustments.overall_discount_type,
            auto_round_off = adjustments.auto_round_off,
            "Adjustments updated"
        );
        self.totals()
    }

    pub fn add_line_form(&mut self, form: &LineItemForm) -> DocumentTotals {
        self.add_line(form.to_line_item())
    }

    pub fn update_line_form(
        &mut self,
        index: usize,
        form: &LineItemForm,
    ) -> SessionResult<DocumentTotals> {
        self.update_line(index, form.to_line_item())
    }

    pub fn set_adjustments_form(&mut self, form: &AdjustmentsForm) -> DocumentTotals {
        self.set_adjustments(form.to_adjustments())
    }

    // =========================================================================
    // Derived Values
    // =========================================================================

    pub fn totals(&self) -> DocumentTotals {
        self.document.totals()
    }

    pub fn line_breakdowns(&self) -> Vec<LineBreakdown> {
        self.document.items.iter().map(LineItem::breakdown).collect()
    }

    /// The payable total formatted for display.
    pub fn format_total(&self) -> String {
        self.currency.format(self.totals().rounded_total)
    }

    /// Validates the document and builds the record for the backend.
    pub fn submit(&self) -> SessionResult<DocumentSubmission> {
        validate_submission(&self.document).map_err(CoreError::from)?;

        let record = self.document.to_submission();
        info!(
            kind = %record.kind,
            lines = record.items.len(),
            total = record.total_amount,
            "Document ready for submission"
        );
        Ok(record)
    }
}
