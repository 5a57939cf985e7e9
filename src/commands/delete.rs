//! Delete command handler.

use crate::commands::Out;
use crate::model::{AmountFormat, Deletion, Transaction};
use crate::store::Store;
use crate::{Result, Session};
use anyhow::Context;

/// Deletes the transaction at the 1-based `position`, as numbered by the summary, and saves.
///
/// An empty ledger is not an error: the message says so and nothing changes.
///
/// # Errors
///
/// - `IndexOutOfRange` if there is no transaction at `position`. Nothing changes.
/// - `StorageUnavailable` if the deletion could not be saved.
pub fn delete_transaction<S: Store>(
    session: &mut Session<S>,
    position: usize,
    format: &AmountFormat,
) -> Result<Out<Transaction>> {
    let deletion = match session.delete(position) {
        Ok(deletion) => deletion,
        Err(e) if e.is_recoverable() => return Err(e.into()),
        Err(e) => {
            return Err(e).context("The transaction was removed but the change could not be saved")
        }
    };
    match deletion {
        Deletion::Empty => Ok("There are no transactions to delete.".into()),
        Deletion::Removed(t) => Ok(Out::new(
            format!(
                "Deleted transaction {position}: {}\nNew balance: {}",
                t.display_line(format),
                session.ledger().balance().format(format)
            ),
            t,
        )),
    }
}
