//! Error taxonomy for the record/table core. Every variant describes caller
//! misuse; nothing here is transient, so there is no retry story.

use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum BookError {
    /// A record failed construction-time validation. The table is never
    /// touched when this is returned.
    #[error("invalid record {title:?}: {reason}")]
    InvalidRecord { title: String, reason: String },

    /// A cell or record lookup fell outside the table bounds.
    #[error("cell ({row}, {column}) is outside a {rows}x{columns} table")]
    IndexOutOfRange {
        row: usize,
        column: usize,
        rows: usize,
        columns: usize,
    },

    /// An environment override could not be parsed.
    #[error("invalid value {value:?} for {key}")]
    InvalidConfig { key: String, value: String },
}
