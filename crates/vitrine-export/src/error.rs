//! Error types for export jobs.

use thiserror::Error;

/// Errors that can occur while running an export job.
///
/// Every variant is fatal to the whole job: exports are batch,
/// all-or-nothing runs with no retry or partial-output recovery.
#[derive(Debug, Error)]
pub enum ExportError {
    /// An error propagated from the schema access layer.
    #[error("database error: {0}")]
    Database(#[from] vitrine_core::Error),

    /// The CSV writer rejected a record.
    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    /// The output file could not be created or written.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Convenience alias for export results.
pub type ExportResult<T> = std::result::Result<T, ExportError>;
