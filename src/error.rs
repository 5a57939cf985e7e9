//! Error types for ledger operations.
//!
//! The ledger core reports failures through [`LedgerError`] so that callers can tell a bad amount
//! from a bad position from a storage problem and recover accordingly. Everything above the core
//! (configuration, command handlers, `main`) works with [`Result`], which is `anyhow` based.

use std::path::PathBuf;
use thiserror::Error;

pub type Error = anyhow::Error;
pub type Result<T> = std::result::Result<T, Error>;

/// Result type alias for ledger core operations.
pub type LedgerResult<T> = std::result::Result<T, LedgerError>;

/// Errors raised by the ledger core.
#[derive(Debug, Error)]
pub enum LedgerError {
    /// The caller supplied something that is not a finite, non-negative number.
    #[error("Invalid amount '{0}': expected a non-negative number no larger than 1000000000000000, such as 12.50")]
    InvalidAmount(String),

    /// A delete position outside of `[1, len]`.
    #[error("There is no transaction at position {position}, valid positions are 1 to {len}")]
    IndexOutOfRange { position: usize, len: usize },

    /// The balance or a category total would no longer fit in an amount. Nothing is changed.
    #[error("The result is too large for the ledger to hold")]
    AmountOutOfRange,

    /// A category breakdown was requested but no expenses have been recorded.
    #[error("No expenses have been recorded")]
    NoExpenses,

    /// Persisted state exists but does not have the expected shape.
    #[error("The ledger stored at {location} is corrupt: {source}")]
    CorruptState {
        location: String,
        #[source]
        source: serde_json::Error,
    },

    /// The store could not be read or written. When raised by a save, the in-memory ledger holds
    /// changes that are not on disk.
    #[error("Unable to access the ledger at {}: {source}", path.display())]
    StorageUnavailable {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

impl LedgerError {
    /// Returns true for errors that the interactive menu can report and move past.
    pub fn is_recoverable(&self) -> bool {
        !matches!(
            self,
            LedgerError::StorageUnavailable { .. } | LedgerError::CorruptState { .. }
        )
    }
}
