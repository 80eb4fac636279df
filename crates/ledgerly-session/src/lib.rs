//! # ledgerly-session: Document Edit Sessions
//!
//! The layer between document screens and `ledgerly-core`.
//!
//! ## Module Organization
//! ```text
//! ledgerly_session/
//! ├── lib.rs          ◄─── You are here
//! ├── config.rs       ◄─── SessionConfig (TOML + LEDGERLY_* env)
//! ├── form.rs         ◄─── Raw form text → LineItem / DocumentAdjustments
//! ├── session.rs      ◄─── EditSession: edits, fresh totals, submit
//! ├── logging.rs      ◄─── tracing-subscriber setup
//! └── error.rs        ◄─── SessionError
//! ```
//!
//! ## Usage
//!
//! ```rust
//! use ledgerly_core::{DocumentKind, LineItem};
//! use ledgerly_session::{EditSession, SessionConfig};
//!
//! let config = SessionConfig::default();
//! let mut session = EditSession::new(DocumentKind::Invoice, &config);
//!
//! let totals = session.add_line(LineItem::new(3.0, 99.9).with_tax("GST @ 5%"));
//! assert_eq!(totals.rounded_total, 315.0);
//!
//! let record = session.submit().unwrap();
//! assert_eq!(record.total_amount, 315.0);
//! ```

pub mod config;
pub mod error;
pub mod form;
pub mod logging;
pub mod session;

pub use config::SessionConfig;
pub use error::{SessionError, SessionResult};
pub use form::{coerce_number, AdjustmentsForm, LineItemForm};
pub use logging::init_tracing;
pub use session::EditSession;
