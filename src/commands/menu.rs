//! Interactive menu command handler.

use crate::commands::Out;
use crate::menu::{self, MenuOptions};
use crate::model::AmountFormat;
use crate::store::Store;
use crate::{Result, Session};

/// Runs the numbered menu on the terminal until the user chooses to exit.
///
/// # Errors
/// - Returns an error if the ledger cannot be saved. The menu does not keep going with changes
///   that only exist in memory.
pub fn menu<S: Store>(
    session: &mut Session<S>,
    format: &AmountFormat,
    chart_width: usize,
) -> Result<Out<()>> {
    let options = MenuOptions {
        format: format.clone(),
        chart_width,
    };
    menu::run(
        session,
        &options,
        std::io::stdin().lock(),
        std::io::stdout().lock(),
    )?;
    // The menu has already said goodbye.
    Ok(Out::new_message(""))
}
