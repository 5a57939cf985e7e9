//! Types that represent the core data model, such as `Ledger` and `Transaction`.
mod amount;
mod breakdown;
mod category;
mod ledger;
mod transaction;

pub use amount::{Amount, AmountFormat, Magnitude, DEFAULT_CURRENCY_SYMBOL};
pub use breakdown::CategoryBreakdown;
pub use category::{Category, UNCATEGORIZED};
pub use ledger::{Deletion, Ledger, Summary, SummaryLine};
pub use transaction::{Transaction, TransactionKind};
