//! Core library surface for the library loan tracker.
//!
//! The record and table types carry all of the logic: validation, the
//! multi-key stable sort, and the overdue rule. The `ui` module is a thin
//! terminal view over them.
pub mod config;
pub mod error;
pub mod models;
pub mod observers;
pub mod seed;
pub mod table;
pub mod ui;

pub use config::Config;
pub use error::BookError;

/// The domain types other layers manipulate.
pub use models::{BookRecord, LoanStatus, DEFAULT_LOAN_PERIOD_DAYS};
pub use observers::{LayoutLogger, LayoutObserver};
pub use table::{overdue_alert, BookTable, Column};

/// The interactive application entry point and state container.
pub use ui::{run_app, App};
