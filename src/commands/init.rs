use crate::commands::Out;
use crate::{Config, Result};
use anyhow::Context;
use std::path::Path;

/// Creates the home directory and an initial `config.json`.
///
/// # Arguments
/// - `budget_home` - The directory that will hold the config and, by default, the ledger file
/// - `currency_symbol` - Printed in front of amounts
/// - `thousands_separator` - Whether to group digits with commas
///
/// # Errors
/// - Returns an error if the config already exists or any file operations fail.
pub fn init(
    budget_home: &Path,
    currency_symbol: &str,
    thousands_separator: bool,
) -> Result<Out<()>> {
    let config = Config::create(budget_home, currency_symbol, thousands_separator)
        .context("Unable to create the budget directory and config")?;
    Ok(format!(
        "Created {}. Transactions will be saved to {}",
        config.config_path().display(),
        config.data_file().display()
    )
    .into())
}
