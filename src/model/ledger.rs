use crate::error::{LedgerError, LedgerResult};
use crate::model::{
    Amount, AmountFormat, Category, CategoryBreakdown, Magnitude, Transaction, TransactionKind,
};
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// All transactions plus the running balance.
///
/// `balance` is kept equal to the sum of every transaction amount. It is updated incrementally by
/// [`Ledger::push`] and [`Ledger::remove`] rather than recomputed, so those are the only ways the
/// transaction list changes.
///
/// Transactions are kept in insertion order, which is also the order they are displayed and the
/// order that delete positions refer to.
#[derive(Default, Debug, Clone, Eq, PartialEq, Serialize, Deserialize)]
pub struct Ledger {
    transactions: Vec<Transaction>,
    balance: Amount,
}

impl Ledger {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn transactions(&self) -> &[Transaction] {
        &self.transactions
    }

    pub fn balance(&self) -> Amount {
        self.balance
    }

    pub fn len(&self) -> usize {
        self.transactions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.transactions.is_empty()
    }

    /// Builds a transaction from caller input and appends it. Returns the new balance.
    ///
    /// # Errors
    /// - `AmountOutOfRange` if the balance would overflow. Nothing is changed.
    pub fn add(
        &mut self,
        kind: TransactionKind,
        magnitude: Magnitude,
        description: impl Into<String>,
        category: Category,
        date: NaiveDate,
    ) -> LedgerResult<Amount> {
        let amount = kind.signed(magnitude);
        self.push(Transaction::new(amount, description, category, date))
    }

    /// Appends `transaction` and adds its amount to the balance. Returns the new balance.
    ///
    /// # Errors
    /// - `AmountOutOfRange` if the balance would overflow. Nothing is changed.
    pub fn push(&mut self, transaction: Transaction) -> LedgerResult<Amount> {
        self.balance = self
            .balance
            .checked_add(transaction.amount())
            .ok_or(LedgerError::AmountOutOfRange)?;
        self.transactions.push(transaction);
        Ok(self.balance)
    }

    /// Removes the transaction at the 1-based `position` and subtracts its amount from the
    /// balance.
    ///
    /// # Errors
    /// - `IndexOutOfRange` if `position` is not in `[1, len]`. Nothing is changed.
    /// - `AmountOutOfRange` if the balance would overflow. Nothing is changed.
    pub fn remove(&mut self, position: usize) -> LedgerResult<Deletion> {
        if self.is_empty() {
            return Ok(Deletion::Empty);
        }
        let len = self.len();
        if position == 0 || position > len {
            return Err(LedgerError::IndexOutOfRange { position, len });
        }
        let balance = self
            .balance
            .checked_sub(self.transactions[position - 1].amount())
            .ok_or(LedgerError::AmountOutOfRange)?;
        let removed = self.transactions.remove(position - 1);
        self.balance = balance;
        Ok(Deletion::Removed(removed))
    }

    /// Every transaction in display order along with the balance.
    pub fn summary(&self) -> Summary {
        let lines = self
            .transactions
            .iter()
            .enumerate()
            .map(|(ix, t)| SummaryLine {
                position: ix + 1,
                transaction: t.clone(),
            })
            .collect();
        Summary {
            lines,
            balance: self.balance,
        }
    }

    /// Expense totals per category.
    ///
    /// # Errors
    /// - `NoExpenses` if the ledger has no expense transactions.
    pub fn category_breakdown(&self) -> LedgerResult<CategoryBreakdown> {
        CategoryBreakdown::from_transactions(&self.transactions)
    }

    /// The sum of all transaction amounts, computed from scratch. `None` if the sum overflows.
    pub fn computed_balance(&self) -> Option<Amount> {
        self.transactions
            .iter()
            .try_fold(Amount::ZERO, |sum, t| sum.checked_add(t.amount()))
    }

    /// True when the stored balance agrees with the transactions.
    pub fn is_balanced(&self) -> bool {
        self.computed_balance() == Some(self.balance)
    }
}

/// The outcome of a delete request.
#[derive(Debug, Clone, Eq, PartialEq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Deletion {
    /// The ledger had no transactions so nothing was removed.
    Empty,
    Removed(Transaction),
}

/// A numbered transaction as shown to the user.
#[derive(Debug, Clone, Eq, PartialEq, Serialize)]
pub struct SummaryLine {
    /// 1-based, suitable for passing to a delete.
    pub position: usize,
    #[serde(flatten)]
    pub transaction: Transaction,
}

/// The transaction history and the current balance.
#[derive(Debug, Clone, Eq, PartialEq, Serialize)]
pub struct Summary {
    pub lines: Vec<SummaryLine>,
    pub balance: Amount,
}

impl Summary {
    pub fn render(&self, format: &AmountFormat) -> String {
        let mut out = String::from("--- Transaction History ---\n");
        if self.lines.is_empty() {
            out.push_str("No transactions yet.\n");
        }
        for line in &self.lines {
            out.push_str(&format!(
                "{:>3}. {}\n",
                line.position,
                line.transaction.display_line(format)
            ));
        }
        out.push_str(&format!(
            "\nCurrent balance: {}",
            self.balance.format(format)
        ));
        out
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal::Decimal;
    use std::str::FromStr;

    fn date() -> NaiveDate {
        NaiveDate::from_ymd_opt(2026, 10, 16).unwrap()
    }

    fn dec(s: &str) -> Decimal {
        Decimal::from_str(s).unwrap()
    }

    fn add(ledger: &mut Ledger, kind: TransactionKind, amount: &str, desc: &str, cat: &str) {
        ledger
            .add(
                kind,
                Magnitude::from_str(amount).unwrap(),
                desc,
                Category::new(cat),
                date(),
            )
            .unwrap();
        assert!(ledger.is_balanced());
    }

    /// Salary income, then a groceries expense.
    fn scenario_b() -> Ledger {
        let mut ledger = Ledger::new();
        add(&mut ledger, TransactionKind::Income, "1000.00", "Salary", "salary");
        add(&mut ledger, TransactionKind::Expense, "200.50", "Groceries", "food");
        ledger
    }

    #[test]
    fn test_add_income() {
        let mut ledger = Ledger::new();
        let balance = ledger
            .add(
                TransactionKind::Income,
                Magnitude::from_str("1000.00").unwrap(),
                "Salary",
                Category::new("salary"),
                date(),
            )
            .unwrap();
        assert_eq!(balance.value(), dec("1000.00"));
        assert_eq!(ledger.len(), 1);
    }

    #[test]
    fn test_add_expense() {
        let ledger = scenario_b();
        assert_eq!(ledger.balance().value(), dec("799.50"));
        assert_eq!(ledger.len(), 2);
        assert_eq!(ledger.transactions()[1].amount().value(), dec("-200.50"));
    }

    #[test]
    fn test_add_defaults_category() {
        let mut ledger = Ledger::new();
        add(&mut ledger, TransactionKind::Expense, "3", "Gum", "  ");
        assert_eq!(ledger.transactions()[0].category().as_str(), "Uncategorized");
    }

    #[test]
    fn test_remove_first() {
        let mut ledger = scenario_b();
        let deletion = ledger.remove(1).unwrap();
        match deletion {
            Deletion::Removed(t) => assert_eq!(t.description(), "Salary"),
            Deletion::Empty => panic!("expected a removal"),
        }
        assert_eq!(ledger.balance().value(), dec("-200.50"));
        assert_eq!(ledger.len(), 1);
        assert_eq!(ledger.transactions()[0].description(), "Groceries");
        assert!(ledger.is_balanced());
    }

    #[test]
    fn test_remove_out_of_range() {
        let mut ledger = scenario_b();
        let before = ledger.clone();
        for position in [0, 3, 100] {
            let err = ledger.remove(position).unwrap_err();
            assert!(matches!(
                err,
                LedgerError::IndexOutOfRange { len: 2, .. }
            ));
            assert_eq!(ledger, before);
        }
    }

    #[test]
    fn test_remove_from_empty() {
        let mut ledger = Ledger::new();
        assert_eq!(ledger.remove(1).unwrap(), Deletion::Empty);
        assert_eq!(ledger.remove(0).unwrap(), Deletion::Empty);
        assert_eq!(ledger, Ledger::new());
    }

    #[test]
    fn test_repeated_removes_use_current_positions() {
        let mut ledger = Ledger::new();
        add(&mut ledger, TransactionKind::Income, "10", "a", "x");
        add(&mut ledger, TransactionKind::Expense, "1", "b", "x");
        add(&mut ledger, TransactionKind::Expense, "2", "c", "y");
        ledger.remove(1).unwrap();
        // "c" is now at position 2
        match ledger.remove(2).unwrap() {
            Deletion::Removed(t) => assert_eq!(t.description(), "c"),
            Deletion::Empty => panic!("expected a removal"),
        }
        assert_eq!(ledger.balance().value(), dec("-1"));
        assert!(ledger.is_balanced());
    }

    #[test]
    fn test_balance_invariant_over_mixed_operations() {
        let mut ledger = Ledger::new();
        let amounts = ["0.10", "0.20", "99.99", "1234.56", "0.01", "7"];
        for (ix, amount) in amounts.iter().enumerate() {
            let kind = if ix % 2 == 0 {
                TransactionKind::Income
            } else {
                TransactionKind::Expense
            };
            add(&mut ledger, kind, amount, "item", "misc");
        }
        while !ledger.is_empty() {
            let middle = ledger.len() / 2 + 1;
            ledger.remove(middle).unwrap();
            assert!(ledger.is_balanced());
        }
        assert!(ledger.balance().is_zero());
    }

    #[test]
    fn test_breakdown_excludes_income() {
        let mut ledger = Ledger::new();
        add(&mut ledger, TransactionKind::Income, "1000", "Salary", "salary");
        add(&mut ledger, TransactionKind::Expense, "200.50", "Groceries", "food");
        add(&mut ledger, TransactionKind::Expense, "50.00", "Power", "bills");
        let breakdown = ledger.category_breakdown().unwrap();
        assert_eq!(breakdown.len(), 2);
        assert_eq!(breakdown.get("food").unwrap().value(), dec("200.50"));
        assert_eq!(breakdown.get("bills").unwrap().value(), dec("50.00"));
        assert!(breakdown.get("salary").is_none());
        assert_eq!(breakdown.total().value(), dec("250.50"));
    }

    #[test]
    fn test_breakdown_sums_within_category() {
        let mut ledger = Ledger::new();
        add(&mut ledger, TransactionKind::Expense, "10", "Lunch", "food");
        add(&mut ledger, TransactionKind::Expense, "5.25", "Snack", "food");
        add(&mut ledger, TransactionKind::Expense, "1", "Thing", "");
        let breakdown = ledger.category_breakdown().unwrap();
        assert_eq!(breakdown.get("food").unwrap().value(), dec("15.25"));
        assert_eq!(breakdown.get("Uncategorized").unwrap().value(), dec("1"));
        assert_eq!(breakdown.max().value(), dec("15.25"));
    }

    #[test]
    fn test_breakdown_income_only() {
        let mut ledger = Ledger::new();
        add(&mut ledger, TransactionKind::Income, "1000", "Salary", "salary");
        assert!(matches!(
            ledger.category_breakdown(),
            Err(LedgerError::NoExpenses)
        ));
        assert!(matches!(
            Ledger::new().category_breakdown(),
            Err(LedgerError::NoExpenses)
        ));
    }

    #[test]
    fn test_summary() {
        let summary = scenario_b().summary();
        assert_eq!(summary.lines.len(), 2);
        assert_eq!(summary.lines[0].position, 1);
        assert_eq!(summary.lines[1].position, 2);
        let rendered = summary.render(&AmountFormat::default());
        assert!(rendered.contains("1. 2026-10-16 | +€1000.00 | Salary | salary"));
        assert!(rendered.contains("2. 2026-10-16 | -€200.50 | Groceries | food"));
        assert!(rendered.ends_with("Current balance: €799.50"));
    }

    #[test]
    fn test_summary_empty() {
        let rendered = Ledger::new().summary().render(&AmountFormat::default());
        assert!(rendered.contains("No transactions yet."));
        assert!(rendered.ends_with("Current balance: €0.00"));
    }

    #[test]
    fn test_missing_balance_is_an_error() {
        let json = r#"{"transactions": []}"#;
        let result: Result<Ledger, _> = serde_json::from_str(json);
        assert!(result.is_err());
    }

    #[test]
    fn test_overflow_is_an_error() {
        let mut ledger = Ledger::new();
        let huge = Transaction::new(
            Amount::new(Decimal::MAX),
            "Too much",
            Category::uncategorized(),
            date(),
        );
        ledger.push(huge.clone()).unwrap();
        let before = ledger.clone();
        assert!(matches!(
            ledger.push(huge),
            Err(LedgerError::AmountOutOfRange)
        ));
        assert_eq!(ledger, before);

        let mut ledger = Ledger::new();
        for value in [Decimal::MAX, Decimal::NEGATIVE_ONE, Decimal::ONE] {
            ledger
                .push(Transaction::new(
                    Amount::new(value),
                    "Edge",
                    Category::uncategorized(),
                    date(),
                ))
                .unwrap();
        }
        let before = ledger.clone();
        assert!(matches!(
            ledger.remove(2),
            Err(LedgerError::AmountOutOfRange)
        ));
        assert_eq!(ledger, before);
    }
}
