use crate::error::{LedgerError, LedgerResult};
use crate::model::{Amount, Category, Transaction};
use rust_decimal::prelude::ToPrimitive;
use serde::Serialize;
use std::collections::BTreeMap;

/// Total expense magnitude per category. This is what the chart renders.
///
/// Every value is positive: an expense of `-200.50` contributes `200.50` to its category.
#[derive(Debug, Clone, Default, Eq, PartialEq, Serialize)]
pub struct CategoryBreakdown {
    totals: BTreeMap<Category, Amount>,
    total: Amount,
}

impl CategoryBreakdown {
    /// Groups the expenses in `transactions` by category. Income is ignored.
    ///
    /// # Errors
    /// - `NoExpenses` if there is nothing to group.
    /// - `AmountOutOfRange` if a total overflows.
    pub fn from_transactions<'a>(
        transactions: impl IntoIterator<Item = &'a Transaction>,
    ) -> LedgerResult<Self> {
        let mut totals: BTreeMap<Category, Amount> = BTreeMap::new();
        let mut total = Amount::ZERO;
        for t in transactions.into_iter().filter(|t| t.is_expense()) {
            let expense = t.amount().abs();
            let entry = totals.entry(t.category().clone()).or_default();
            *entry = entry
                .checked_add(expense)
                .ok_or(LedgerError::AmountOutOfRange)?;
            total = total
                .checked_add(expense)
                .ok_or(LedgerError::AmountOutOfRange)?;
        }
        if totals.is_empty() {
            return Err(LedgerError::NoExpenses);
        }
        Ok(Self { totals, total })
    }

    pub fn get(&self, category: &str) -> Option<Amount> {
        self.totals.get(&Category::new(category)).copied()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&Category, Amount)> {
        self.totals.iter().map(|(c, a)| (c, *a))
    }

    pub fn len(&self) -> usize {
        self.totals.len()
    }

    pub fn is_empty(&self) -> bool {
        self.totals.is_empty()
    }

    /// The sum of all expenses.
    pub fn total(&self) -> Amount {
        self.total
    }

    /// The largest single category total.
    pub fn max(&self) -> Amount {
        self.totals.values().copied().max().unwrap_or_default()
    }

    /// The fraction, from 0.0 to 1.0, of total expenses that `amount` represents.
    pub fn share(&self, amount: Amount) -> f64 {
        let total = self.total();
        if total.is_zero() {
            return 0.0;
        }
        (amount.value() / total.value()).to_f64().unwrap_or_default()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{Magnitude, TransactionKind};
    use chrono::NaiveDate;
    use rust_decimal::Decimal;
    use std::str::FromStr;

    fn tx(kind: TransactionKind, amount: &str, cat: &str) -> Transaction {
        Transaction::new(
            kind.signed(Magnitude::from_str(amount).unwrap()),
            "x",
            Category::new(cat),
            NaiveDate::from_ymd_opt(2026, 10, 16).unwrap(),
        )
    }

    #[test]
    fn test_groups_expenses_only() {
        let transactions = vec![
            tx(TransactionKind::Income, "1000", "salary"),
            tx(TransactionKind::Expense, "30", "food"),
            tx(TransactionKind::Expense, "10", "food"),
            tx(TransactionKind::Expense, "60", ""),
            tx(TransactionKind::Expense, "0", "free"),
        ];
        let breakdown = CategoryBreakdown::from_transactions(&transactions).unwrap();
        assert_eq!(breakdown.len(), 2);
        assert!(breakdown.get("salary").is_none());
        assert!(breakdown.get("free").is_none());
        assert_eq!(breakdown.get("food").unwrap().value(), Decimal::from(40));
        assert_eq!(breakdown.total().value(), Decimal::from(100));
        assert_eq!(breakdown.max().value(), Decimal::from(60));
        assert!((breakdown.share(breakdown.get("food").unwrap()) - 0.4).abs() < 1e-9);
    }

    #[test]
    fn test_no_expenses() {
        let transactions = vec![tx(TransactionKind::Income, "5", "gift")];
        assert!(matches!(
            CategoryBreakdown::from_transactions(&transactions),
            Err(LedgerError::NoExpenses)
        ));
        assert!(matches!(
            CategoryBreakdown::from_transactions(&[]),
            Err(LedgerError::NoExpenses)
        ));
    }
}
