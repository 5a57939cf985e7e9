//! A loaded ledger bound to the store it came from.
//!
//! Every mutating operation changes the in-memory `Ledger` and then saves it. If the save fails
//! the change stays in memory, the session is marked dirty, and the `StorageUnavailable` error is
//! returned so the caller knows that memory and storage have diverged. The next successful save
//! (from another mutation or from [`Session::save`]) brings them back in line.

use crate::error::LedgerResult;
use crate::model::{
    Amount, Category, CategoryBreakdown, Deletion, Ledger, Magnitude, Summary, TransactionKind,
};
use crate::store::Store;
use chrono::{Local, NaiveDate};
use tracing::{debug, info, warn};

#[derive(Debug)]
pub struct Session<S: Store> {
    store: S,
    ledger: Ledger,
    dirty: bool,
}

impl<S: Store> Session<S> {
    /// Loads the ledger from `store`.
    ///
    /// # Errors
    /// - `CorruptState` or `StorageUnavailable` from [`Store::load`].
    pub fn open(store: S) -> LedgerResult<Self> {
        let ledger = store.load()?;
        debug!(
            "Opened ledger at {} with {} transactions",
            store.location(),
            ledger.len()
        );
        Ok(Self {
            store,
            ledger,
            dirty: false,
        })
    }

    pub fn ledger(&self) -> &Ledger {
        &self.ledger
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    /// True when the in-memory ledger holds changes that failed to save.
    pub fn is_dirty(&self) -> bool {
        self.dirty
    }

    /// Records a transaction dated today and saves. Returns the new balance.
    ///
    /// A blank or missing `category` becomes `Uncategorized`.
    pub fn add(
        &mut self,
        kind: TransactionKind,
        magnitude: Magnitude,
        description: &str,
        category: Option<&str>,
    ) -> LedgerResult<Amount> {
        self.add_dated(kind, magnitude, description, category, today())
    }

    /// Records a transaction with an explicit date and saves. Returns the new balance.
    pub fn add_dated(
        &mut self,
        kind: TransactionKind,
        magnitude: Magnitude,
        description: &str,
        category: Option<&str>,
        date: NaiveDate,
    ) -> LedgerResult<Amount> {
        let category = Category::from_input(category);
        let balance = self
            .ledger
            .add(kind, magnitude, description, category, date)?;
        info!("Added {kind} of {magnitude}, balance is now {balance}");
        self.save()?;
        Ok(balance)
    }

    /// Removes the transaction at 1-based `position` and saves.
    ///
    /// Positions refer to the current state of the ledger, so after a removal every later
    /// transaction moves up by one.
    ///
    /// # Errors
    /// - `IndexOutOfRange` if there is no such position; nothing is changed or saved.
    /// - `StorageUnavailable` if the removal could not be saved.
    pub fn delete(&mut self, position: usize) -> LedgerResult<Deletion> {
        let deletion = self.ledger.remove(position)?;
        match &deletion {
            Deletion::Empty => debug!("Nothing to delete"),
            Deletion::Removed(t) => {
                info!(
                    "Removed transaction {position} '{}', balance is now {}",
                    t.description(),
                    self.ledger.balance()
                );
                self.save()?;
            }
        }
        Ok(deletion)
    }

    pub fn summary(&self) -> Summary {
        self.ledger.summary()
    }

    /// # Errors
    /// - `NoExpenses` if no expenses have been recorded.
    pub fn category_breakdown(&self) -> LedgerResult<CategoryBreakdown> {
        self.ledger.category_breakdown()
    }

    /// Writes the in-memory ledger to the store.
    pub fn save(&mut self) -> LedgerResult<()> {
        match self.store.save(&self.ledger) {
            Ok(()) => {
                self.dirty = false;
                Ok(())
            }
            Err(e) => {
                self.dirty = true;
                warn!(
                    "The ledger in memory has changes that are not saved to {}",
                    self.store.location()
                );
                Err(e)
            }
        }
    }
}

/// Today's date in the local time zone.
pub fn today() -> NaiveDate {
    Local::now().date_naive()
}
