use crate::commands::Out;
use crate::model::{Amount, AmountFormat, Magnitude, TransactionKind};
use crate::store::Store;
use crate::{Result, Session};
use anyhow::Context;
use std::str::FromStr;

/// Records an income or an expense and saves the ledger.
///
/// `amount` is the raw text typed by the user, e.g. `200.50` or `€1,000`. It is always a
/// positive magnitude; `kind` decides the sign.
///
/// # Returns
///
/// On success, returns an `Out` containing the new balance.
///
/// # Errors
///
/// - `InvalidAmount` if `amount` is not a non-negative number. Nothing is recorded.
/// - `StorageUnavailable` if the ledger could not be saved. The transaction is held in memory.
pub fn add_transaction<S: Store>(
    session: &mut Session<S>,
    kind: TransactionKind,
    amount: &str,
    description: &str,
    category: Option<&str>,
    format: &AmountFormat,
) -> Result<Out<Amount>> {
    let magnitude = Magnitude::from_str(amount)?;
    let balance = session
        .add(kind, magnitude, description, category)
        .with_context(|| format!("The {kind} was recorded but could not be saved"))?;
    Ok(Out::new(
        format!("Transaction added. New balance: {}", balance.format(format)),
        balance,
    ))
}
