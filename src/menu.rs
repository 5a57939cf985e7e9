//! The interactive numbered menu.
//!
//! The menu reads from any `BufRead` and writes to any `Write` so that it can be driven by a test
//! as easily as by a terminal. Mistakes the user can fix (a bad amount, a bad position, a chart
//! with nothing in it) are reported and the menu carries on. A ledger that cannot be saved ends
//! the loop with an error.

use crate::commands::{self, Out};
use crate::error::LedgerError;
use crate::model::{AmountFormat, Magnitude, TransactionKind, UNCATEGORIZED};
use crate::store::Store;
use crate::{Result, Session};
use anyhow::Context;
use serde::Serialize;
use std::fmt::Debug;
use std::io::{BufRead, Write};
use std::str::FromStr;
use tracing::{debug, trace};

const MENU: &str = "\
1. Add income
2. Add expense
3. Delete transaction
4. Show summary
5. Show chart
6. Exit";

/// One choice from the menu.
#[derive(Debug, Clone, Copy, Eq, PartialEq)]
enum Choice {
    AddIncome,
    AddExpense,
    Delete,
    Summary,
    Chart,
    Exit,
}

impl FromStr for Choice {
    type Err = ();

    fn from_str(s: &str) -> std::result::Result<Self, ()> {
        match s.trim() {
            "1" => Ok(Choice::AddIncome),
            "2" => Ok(Choice::AddExpense),
            "3" => Ok(Choice::Delete),
            "4" => Ok(Choice::Summary),
            "5" => Ok(Choice::Chart),
            "6" => Ok(Choice::Exit),
            _ => Err(()),
        }
    }
}

/// Settings for a menu session.
#[derive(Debug, Clone)]
pub(crate) struct MenuOptions {
    pub(crate) format: AmountFormat,
    pub(crate) chart_width: usize,
}

/// Runs the menu until the user exits, input ends, or the ledger cannot be saved.
pub(crate) fn run<S, R, W>(
    session: &mut Session<S>,
    options: &MenuOptions,
    input: R,
    output: W,
) -> Result<()>
where
    S: Store,
    R: BufRead,
    W: Write,
{
    let mut menu = Menu {
        session,
        options,
        input,
        output,
    };
    menu.run()
}

struct Menu<'a, S: Store, R, W> {
    session: &'a mut Session<S>,
    options: &'a MenuOptions,
    input: R,
    output: W,
}

impl<S, R, W> Menu<'_, S, R, W>
where
    S: Store,
    R: BufRead,
    W: Write,
{
    fn run(&mut self) -> Result<()> {
        loop {
            self.say(&format!("\n{MENU}"))?;
            let Some(line) = self.ask("Choose an option: ")? else {
                debug!("Input closed, leaving the menu");
                return Ok(());
            };
            let choice = match Choice::from_str(&line) {
                Ok(choice) => choice,
                Err(()) => {
                    self.say("Invalid choice. Try again.")?;
                    continue;
                }
            };
            trace!("Menu choice {choice:?}");
            let input_open = match choice {
                Choice::AddIncome => self.add(TransactionKind::Income)?,
                Choice::AddExpense => self.add(TransactionKind::Expense)?,
                Choice::Delete => self.delete()?,
                Choice::Summary => {
                    let out = commands::summary(self.session, &self.options.format)?;
                    self.show(out)?;
                    true
                }
                Choice::Chart => {
                    let out = commands::chart(
                        self.session,
                        &self.options.format,
                        self.options.chart_width,
                    )?;
                    self.show(out)?;
                    true
                }
                Choice::Exit => {
                    self.say("Goodbye!")?;
                    return Ok(());
                }
            };
            if !input_open {
                debug!("Input closed part way through {choice:?}, leaving the menu");
                return Ok(());
            }
        }
    }

    /// Returns false if input ended part way through.
    fn add(&mut self, kind: TransactionKind) -> Result<bool> {
        let amount = loop {
            let Some(text) = self.ask(&format!("Enter {kind} amount: "))? else {
                return Ok(false);
            };
            match Magnitude::from_str(&text) {
                Ok(_) => break text,
                Err(e) => self.say(&e.to_string())?,
            }
        };
        let Some(description) = self.ask("Description: ")? else {
            return Ok(false);
        };
        let Some(category) = self.ask(&format!("Category (blank for {UNCATEGORIZED}): "))? else {
            return Ok(false);
        };
        let result = commands::add_transaction(
            self.session,
            kind,
            &amount,
            &description,
            Some(category.as_str()),
            &self.options.format,
        );
        self.handle(result)?;
        Ok(true)
    }

    /// Returns false if input ended part way through.
    fn delete(&mut self) -> Result<bool> {
        if self.session.ledger().is_empty() {
            let out = commands::delete_transaction(self.session, 1, &self.options.format)?;
            self.show(out)?;
            return Ok(true);
        }
        let out = commands::summary(self.session, &self.options.format)?;
        self.show(out)?;
        let Some(text) = self.ask("Enter the number of the transaction to delete: ")? else {
            return Ok(false);
        };
        let position = match text.trim().parse::<usize>() {
            Ok(position) => position,
            Err(_) => {
                self.say(&format!("'{}' is not a transaction number.", text.trim()))?;
                return Ok(true);
            }
        };
        let result = commands::delete_transaction(self.session, position, &self.options.format);
        self.handle(result)?;
        Ok(true)
    }

    /// Shows the output of a command, or reports its error if the user can recover from it.
    fn handle<T>(&mut self, result: Result<Out<T>>) -> Result<()>
    where
        T: Serialize + Clone + Debug,
    {
        match result {
            Ok(out) => self.show(out),
            Err(e) => {
                let recoverable = e
                    .downcast_ref::<LedgerError>()
                    .filter(|ledger_error| ledger_error.is_recoverable())
                    .map(LedgerError::to_string);
                match recoverable {
                    Some(message) => self.say(&message),
                    None => Err(e),
                }
            }
        }
    }

    fn show<T>(&mut self, out: Out<T>) -> Result<()>
    where
        T: Serialize + Clone + Debug,
    {
        out.write_to(&mut self.output)
            .context("Unable to write to the terminal")
    }

    fn say(&mut self, message: &str) -> Result<()> {
        writeln!(self.output, "{message}").context("Unable to write to the terminal")
    }

    /// Prompts and reads one line. Returns `None` when input has ended.
    fn ask(&mut self, prompt: &str) -> Result<Option<String>> {
        write!(self.output, "{prompt}").context("Unable to write to the terminal")?;
        self.output
            .flush()
            .context("Unable to write to the terminal")?;
        let mut line = String::new();
        let read = self
            .input
            .read_line(&mut line)
            .context("Unable to read from the terminal")?;
        if read == 0 {
            return Ok(None);
        }
        Ok(Some(line.trim_end_matches(['\r', '\n']).to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::MemoryStore;
    use rust_decimal::Decimal;
    use std::io::Cursor;

    fn options() -> MenuOptions {
        MenuOptions {
            format: AmountFormat::default(),
            chart_width: 10,
        }
    }

    fn drive(session: &mut Session<MemoryStore>, script: &str) -> (Result<()>, String) {
        let mut output = Vec::new();
        let result = run(session, &options(), Cursor::new(script.as_bytes()), &mut output);
        (result, String::from_utf8(output).unwrap())
    }

    #[test]
    fn test_add_delete_and_exit() {
        let mut session = Session::open(MemoryStore::new()).unwrap();
        let script = "1\n1000\nSalary\nsalary\n2\n200.50\nGroceries\nfood\n3\n1\n6\n";
        let (result, output) = drive(&mut session, script);
        result.unwrap();
        assert!(output.contains("New balance: €1000.00"));
        assert!(output.contains("New balance: €799.50"));
        assert!(output.contains("Deleted transaction 1:"));
        assert!(output.ends_with("Goodbye!\n"));
        assert_eq!(session.ledger().len(), 1);
        assert_eq!(
            session.ledger().balance().value(),
            Decimal::from_str("-200.50").unwrap()
        );
    }

    #[test]
    fn test_invalid_amount_reprompts() {
        let mut session = Session::open(MemoryStore::new()).unwrap();
        let (result, output) = drive(&mut session, "2\nlots\n-3\n12\nLunch\n\n6\n");
        result.unwrap();
        assert_eq!(output.matches("Enter expense amount: ").count(), 3);
        assert!(output.contains("Invalid amount 'lots'"));
        assert_eq!(session.ledger().len(), 1);
        assert_eq!(
            session.ledger().transactions()[0].category().as_str(),
            UNCATEGORIZED
        );
    }

    #[test]
    fn test_bad_positions_return_to_menu() {
        let mut session = Session::open(MemoryStore::new()).unwrap();
        let (result, output) = drive(&mut session, "3\n9\n6\n");
        result.unwrap();
        assert!(output.contains("There are no transactions to delete."));
        assert!(output.contains("Invalid choice. Try again."));

        let (result, output) = drive(&mut session, "1\n10\nGift\n\n3\n4\n3\nx\n6\n");
        result.unwrap();
        assert!(output.contains("There is no transaction at position 4"));
        assert!(output.contains("'x' is not a transaction number."));
        assert_eq!(session.ledger().len(), 1);
    }

    #[test]
    fn test_chart_and_summary() {
        let mut session = Session::open(MemoryStore::new()).unwrap();
        let script = "5\n1\n50\nPay\njob\n5\n2\n5\nBus\ntravel\n5\n4\n6\n";
        let (result, output) = drive(&mut session, script);
        result.unwrap();
        assert_eq!(output.matches("No expenses to chart yet.").count(), 2);
        assert!(output.contains("Expenses by category"));
        assert!(output.contains("--- Transaction History ---"));
        assert!(output.contains("Current balance: €45.00"));
    }

    #[test]
    fn test_end_of_input_leaves_quietly() {
        let mut session = Session::open(MemoryStore::new()).unwrap();
        let (result, output) = drive(&mut session, "1\n10\n");
        result.unwrap();
        assert!(!output.contains("Goodbye!"));
        assert!(session.ledger().is_empty());
    }

    #[test]
    fn test_storage_failure_ends_the_menu() {
        let mut store = MemoryStore::new();
        store.set_read_only(true);
        let mut session = Session::open(store).unwrap();
        let (result, _) = drive(&mut session, "1\n10\nGift\n\n6\n");
        let err = result.unwrap_err();
        assert!(matches!(
            err.downcast_ref::<LedgerError>(),
            Some(LedgerError::StorageUnavailable { .. })
        ));
        assert!(session.is_dirty());
    }
}
