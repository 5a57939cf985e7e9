//! These structs provide the CLI interface for the budget CLI.

use clap::{Parser, Subcommand};
use std::convert::Infallible;
use std::fmt::{Display, Formatter};
use std::ops::Deref;
use std::path::{Path, PathBuf};
use std::str::FromStr;
use tracing::error;
use tracing_subscriber::filter::LevelFilter;

/// budget: A small personal finance ledger.
///
/// Record income and expenses, delete mistakes, list what you have recorded along with the
/// running balance, and draw a bar chart of where the money went. Every change is saved to a
/// JSON file right away.
///
/// Run without a subcommand to get the interactive numbered menu.
#[derive(Debug, Parser, Clone)]
pub struct Args {
    #[clap(flatten)]
    common: Common,

    #[command(subcommand)]
    command: Option<Command>,
}

impl Args {
    pub fn new(common: Common, command: Option<Command>) -> Self {
        Self { common, command }
    }

    pub fn common(&self) -> &Common {
        &self.common
    }

    /// The subcommand to run. `Menu` when none was given.
    pub fn command(&self) -> Command {
        self.command.clone().unwrap_or(Command::Menu(MenuArgs::default()))
    }
}

#[derive(Subcommand, Debug, Clone)]
pub enum Command {
    /// Create the budget home directory and write a config.json into it.
    ///
    /// This is optional. Without a config file the defaults are used: amounts in euros and the
    /// ledger saved to budget_data.json in the budget home directory.
    Init(InitArgs),
    /// Record money coming in.
    Income(AddArgs),
    /// Record money going out.
    Expense(AddArgs),
    /// Delete a transaction by its number in the summary.
    Delete(DeleteArgs),
    /// List every transaction and the current balance.
    Summary,
    /// Draw a bar chart of expenses by category.
    Chart(ChartArgs),
    /// Run the interactive numbered menu. This is the default.
    Menu(MenuArgs),
}

/// Arguments common to all subcommands.
#[derive(Debug, Parser, Clone)]
pub struct Common {
    /// The logging verbosity. One of, from least to most verbose:
    /// off, error, warn, info, debug, trace
    ///
    /// This can be overridden by RUST_LOG. See the tracing-subscriber crate for instructions.
    #[arg(long, default_value_t = LevelFilter::WARN)]
    log_level: LevelFilter,

    /// The directory where the config and, by default, the ledger are held. Defaults to ~/budget
    #[arg(long, env = "BUDGET_HOME", default_value_t = default_budget_home())]
    budget_home: DisplayPath,

    /// Read and write the ledger at this path instead of the one named in config.json.
    #[arg(long, env = "BUDGET_DATA_FILE")]
    data_file: Option<PathBuf>,
}

impl Common {
    pub fn new(log_level: LevelFilter, budget_home: PathBuf, data_file: Option<PathBuf>) -> Self {
        Self {
            log_level,
            budget_home: budget_home.into(),
            data_file,
        }
    }

    pub fn log_level(&self) -> LevelFilter {
        self.log_level
    }

    pub fn budget_home(&self) -> &DisplayPath {
        &self.budget_home
    }

    pub fn data_file(&self) -> Option<&PathBuf> {
        self.data_file.as_ref()
    }
}

/// (Not shown): Args for the `budget init` command.
#[derive(Debug, Parser, Clone)]
pub struct InitArgs {
    /// The symbol printed in front of amounts.
    #[arg(long, default_value = "€")]
    currency_symbol: String,

    /// Group digits with commas, e.g. €1,000.00
    #[arg(long)]
    thousands_separator: bool,
}

impl InitArgs {
    pub fn new(currency_symbol: impl Into<String>, thousands_separator: bool) -> Self {
        Self {
            currency_symbol: currency_symbol.into(),
            thousands_separator,
        }
    }

    pub fn currency_symbol(&self) -> &str {
        &self.currency_symbol
    }

    pub fn thousands_separator(&self) -> bool {
        self.thousands_separator
    }
}

/// (Not shown): Args for the `budget income` and `budget expense` commands.
#[derive(Debug, Parser, Clone)]
pub struct AddArgs {
    /// The amount as a positive number, e.g. 200.50
    amount: String,

    /// What the money was for.
    #[arg(short, long, default_value = "")]
    description: String,

    /// The category used by the chart. Defaults to Uncategorized.
    #[arg(short, long)]
    category: Option<String>,
}

impl AddArgs {
    pub fn new(
        amount: impl Into<String>,
        description: impl Into<String>,
        category: Option<String>,
    ) -> Self {
        Self {
            amount: amount.into(),
            description: description.into(),
            category,
        }
    }

    pub fn amount(&self) -> &str {
        &self.amount
    }

    pub fn description(&self) -> &str {
        &self.description
    }

    pub fn category(&self) -> Option<&str> {
        self.category.as_deref()
    }
}

/// (Not shown): Args for the `budget delete` command.
#[derive(Debug, Parser, Clone)]
pub struct DeleteArgs {
    /// The number shown next to the transaction in `budget summary`, starting at 1.
    position: usize,
}

impl DeleteArgs {
    pub fn new(position: usize) -> Self {
        Self { position }
    }

    pub fn position(&self) -> usize {
        self.position
    }
}

/// (Not shown): Args for the `budget chart` command.
#[derive(Debug, Parser, Clone)]
pub struct ChartArgs {
    /// The length of the longest bar, in characters.
    #[arg(long, default_value_t = crate::chart::DEFAULT_WIDTH)]
    width: usize,
}

impl Default for ChartArgs {
    fn default() -> Self {
        Self {
            width: crate::chart::DEFAULT_WIDTH,
        }
    }
}

impl ChartArgs {
    pub fn width(&self) -> usize {
        self.width
    }
}

/// (Not shown): Args for the `budget menu` command.
#[derive(Debug, Parser, Clone, Default)]
pub struct MenuArgs {
    #[clap(flatten)]
    chart: ChartArgs,
}

impl MenuArgs {
    pub fn chart_width(&self) -> usize {
        self.chart.width()
    }
}

fn default_budget_home() -> DisplayPath {
    DisplayPath(match dirs::home_dir() {
        Some(home) => home.join("budget"),
        None => {
            error!(
                "There was an error when trying to get your home directory. You can get around \
                this by providing --budget-home or BUDGET_HOME instead of relying on the default \
                budget home directory.",
            );
            PathBuf::from("budget")
        }
    })
}

#[derive(Debug, Default, Clone, Eq, PartialEq, Ord, PartialOrd, Hash)]
pub struct DisplayPath(PathBuf);

impl From<PathBuf> for DisplayPath {
    fn from(value: PathBuf) -> Self {
        DisplayPath(value)
    }
}

impl Deref for DisplayPath {
    type Target = Path;

    fn deref(&self) -> &Self::Target {
        &self.0
    }
}

impl AsRef<Path> for DisplayPath {
    fn as_ref(&self) -> &Path {
        &self.0
    }
}

impl Display for DisplayPath {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0.to_string_lossy())
    }
}

impl FromStr for DisplayPath {
    type Err = Infallible;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(Self(PathBuf::from(s)))
    }
}

impl DisplayPath {
    pub fn path(&self) -> &Path {
        &self.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_no_subcommand_is_menu() {
        let args = Args::try_parse_from(["budget", "--budget-home", "/tmp/b"]).unwrap();
        assert!(matches!(args.command(), Command::Menu(m) if m.chart_width() == 30));
        assert_eq!(args.common().budget_home().path(), Path::new("/tmp/b"));
        assert_eq!(args.common().log_level(), LevelFilter::WARN);
    }

    #[test]
    fn test_expense_args() {
        let args = Args::try_parse_from([
            "budget",
            "expense",
            "200.50",
            "-d",
            "Groceries",
            "--category",
            "food",
        ])
        .unwrap();
        match args.command() {
            Command::Expense(add) => {
                assert_eq!(add.amount(), "200.50");
                assert_eq!(add.description(), "Groceries");
                assert_eq!(add.category(), Some("food"));
            }
            other => panic!("unexpected command {other:?}"),
        }
    }

    #[test]
    fn test_delete_requires_a_number() {
        assert!(Args::try_parse_from(["budget", "delete", "first"]).is_err());
        let args = Args::try_parse_from(["budget", "delete", "2"]).unwrap();
        assert!(matches!(args.command(), Command::Delete(d) if d.position() == 2));
    }
}
