use crate::model::{Amount, AmountFormat, Category, Magnitude};
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// Whether money is coming in or going out.
#[derive(Debug, Default, Clone, Copy, Eq, PartialEq, Ord, PartialOrd, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TransactionKind {
    #[default]
    Income,
    Expense,
}

serde_plain::derive_display_from_serialize!(TransactionKind);
serde_plain::derive_fromstr_from_deserialize!(TransactionKind);

impl TransactionKind {
    /// Gives `magnitude` the sign that this kind of transaction carries.
    pub fn signed(&self, magnitude: Magnitude) -> Amount {
        match self {
            TransactionKind::Income => magnitude.as_income(),
            TransactionKind::Expense => magnitude.as_expense(),
        }
    }
}

/// One entry in the ledger.
///
/// `category` may be missing from a persisted record, in which case it is `Uncategorized`. The
/// other fields are required.
#[derive(Debug, Clone, Eq, PartialEq, Serialize, Deserialize)]
pub struct Transaction {
    amount: Amount,
    description: String,
    #[serde(default)]
    category: Category,
    date: NaiveDate,
}

impl Transaction {
    pub fn new(
        amount: Amount,
        description: impl Into<String>,
        category: Category,
        date: NaiveDate,
    ) -> Self {
        Self {
            amount,
            description: description.into(),
            category,
            date,
        }
    }

    pub fn amount(&self) -> Amount {
        self.amount
    }

    pub fn description(&self) -> &str {
        &self.description
    }

    pub fn category(&self) -> &Category {
        &self.category
    }

    pub fn date(&self) -> NaiveDate {
        self.date
    }

    pub fn is_expense(&self) -> bool {
        self.amount.is_negative()
    }

    /// A one-line rendering: `2026-10-16 | -€200.50 | Groceries | food`.
    pub fn display_line(&self, format: &AmountFormat) -> String {
        format!(
            "{} | {} | {} | {}",
            self.date.format("%Y-%m-%d"),
            self.amount.format_signed(format),
            self.description,
            self.category
        )
    }
}
