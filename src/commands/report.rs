//! Read-only views of the ledger.

use crate::commands::Out;
use crate::error::LedgerError;
use crate::model::{AmountFormat, CategoryBreakdown, Summary};
use crate::store::Store;
use crate::{chart as bar_chart, Result, Session};

/// Lists every transaction, numbered for use with delete, followed by the balance.
pub fn summary<S: Store>(session: &Session<S>, format: &AmountFormat) -> Result<Out<Summary>> {
    let summary = session.summary();
    Ok(Out::new(summary.render(format), summary))
}

/// Draws a bar chart of expenses per category.
///
/// With no expenses recorded there is nothing to draw, which is reported in the message rather
/// than as an error.
pub fn chart<S: Store>(
    session: &Session<S>,
    format: &AmountFormat,
    width: usize,
) -> Result<Out<CategoryBreakdown>> {
    match session.category_breakdown() {
        Ok(breakdown) => Ok(Out::new(
            bar_chart::render(&breakdown, format, width),
            breakdown,
        )),
        Err(LedgerError::NoExpenses) => Ok("No expenses to chart yet.".into()),
        Err(e) => Err(e.into()),
    }
}
