//! Persistence for the ledger.
//!
//! The `Store` trait is the boundary between an in-memory `Ledger` and wherever it is kept. Both
//! implementations encode the ledger as the same JSON document:
//!
//! ```json
//! {
//!   "transactions": [
//!     { "amount": -200.50, "description": "Groceries", "category": "food", "date": "2026-10-16" }
//!   ],
//!   "balance": -200.50
//! }
//! ```
//!
//! Unknown fields are ignored when loading. A missing `transactions`, `balance`, `amount`,
//! `description` or `date` is a `CorruptState` error.

use crate::error::{LedgerError, LedgerResult};
use crate::fs;
use crate::model::Ledger;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use tracing::{debug, warn};

/// Loads and saves a whole `Ledger` at once.
///
/// A store is owned by exactly one session. There is no locking, so two processes saving to the
/// same location will overwrite each other.
pub trait Store {
    /// Reads the persisted ledger.
    ///
    /// Returns an empty ledger if nothing has been persisted yet.
    ///
    /// # Errors
    ///
    /// - `CorruptState` if persisted state exists but cannot be parsed into a ledger.
    /// - `StorageUnavailable` if persisted state exists but cannot be read.
    fn load(&self) -> LedgerResult<Ledger>;

    /// Overwrites the persisted ledger with `ledger`.
    ///
    /// # Errors
    ///
    /// - `StorageUnavailable` if the destination cannot be written.
    fn save(&mut self, ledger: &Ledger) -> LedgerResult<()>;

    /// A human readable description of where the ledger lives.
    fn location(&self) -> String;
}

/// Parses the persisted document.
pub(crate) fn decode(bytes: &[u8], location: &str) -> LedgerResult<Ledger> {
    let ledger: Ledger =
        serde_json::from_slice(bytes).map_err(|source| LedgerError::CorruptState {
            location: location.to_string(),
            source,
        })?;
    if !ledger.is_balanced() {
        let computed = ledger
            .computed_balance()
            .map_or_else(|| "(too large to hold)".to_string(), |b| b.to_string());
        warn!(
            "The stored balance {} at {location} does not match the sum of its transactions {}",
            ledger.balance(),
            computed
        );
    }
    Ok(ledger)
}

/// Writes the persisted document.
pub(crate) fn encode(ledger: &Ledger) -> std::io::Result<Vec<u8>> {
    Ok(serde_json::to_vec_pretty(ledger)?)
}

/// Keeps the ledger in a JSON file.
///
/// Saves go to a temporary file next to the destination which is then renamed over it, so a
/// failed write leaves the previous file in place. The parent directory is never created.
#[derive(Debug, Clone)]
pub struct JsonFileStore {
    path: PathBuf,
}

impl JsonFileStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn unavailable(&self, source: std::io::Error) -> LedgerError {
        LedgerError::StorageUnavailable {
            path: self.path.clone(),
            source,
        }
    }
}

impl Store for JsonFileStore {
    fn load(&self) -> LedgerResult<Ledger> {
        match fs::read_if_exists(&self.path).map_err(|e| self.unavailable(e))? {
            Some(bytes) => {
                let ledger = decode(&bytes, &self.location())?;
                debug!(
                    "Loaded {} transactions from {}",
                    ledger.len(),
                    self.path.display()
                );
                Ok(ledger)
            }
            None => {
                debug!(
                    "No ledger found at {}, starting with an empty one",
                    self.path.display()
                );
                Ok(Ledger::default())
            }
        }
    }

    fn save(&mut self, ledger: &Ledger) -> LedgerResult<()> {
        encode(ledger)
            .and_then(|bytes| fs::write_replace(&self.path, &bytes))
            .map_err(|e| self.unavailable(e))?;
        debug!(
            "Saved {} transactions to {}",
            ledger.len(),
            self.path.display()
        );
        Ok(())
    }

    fn location(&self) -> String {
        self.path.display().to_string()
    }
}

/// Keeps the encoded ledger in memory. Useful for tests and for callers that do not want a file.
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    bytes: Option<Vec<u8>>,
    read_only: bool,
}

const MEMORY: &str = "memory";

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// A store that already holds `bytes`, which may or may not be a valid document.
    pub fn with_bytes(bytes: impl Into<Vec<u8>>) -> Self {
        Self {
            bytes: Some(bytes.into()),
            read_only: false,
        }
    }

    /// When set, every save fails with `StorageUnavailable`.
    pub fn set_read_only(&mut self, read_only: bool) {
        self.read_only = read_only;
    }

    pub fn bytes(&self) -> Option<&[u8]> {
        self.bytes.as_deref()
    }
}

impl Store for MemoryStore {
    fn load(&self) -> LedgerResult<Ledger> {
        match &self.bytes {
            Some(bytes) => decode(bytes, MEMORY),
            None => Ok(Ledger::default()),
        }
    }

    fn save(&mut self, ledger: &Ledger) -> LedgerResult<()> {
        if self.read_only {
            return Err(LedgerError::StorageUnavailable {
                path: PathBuf::from(MEMORY),
                source: std::io::Error::new(ErrorKind::PermissionDenied, "the store is read-only"),
            });
        }
        let bytes = encode(ledger).map_err(|source| LedgerError::StorageUnavailable {
            path: PathBuf::from(MEMORY),
            source,
        })?;
        self.bytes = Some(bytes);
        Ok(())
    }

    fn location(&self) -> String {
        MEMORY.to_string()
    }
}
