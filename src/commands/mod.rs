//! Command handlers for the budget CLI.
//!
//! These are shared by the subcommands and by the interactive menu.

mod add;
mod delete;
mod init;
mod menu;
mod report;

use serde::Serialize;
use std::fmt::Debug;
use std::io::Write;
use tracing::debug;

pub use add::add_transaction;
pub use delete::delete_transaction;
pub use init::init;
pub use menu::menu;
pub use report::{chart, summary};

/// The output type for a command. This allows the command to return a consistent message and,
/// optionally, structured data to both the subcommands and the interactive menu.
#[derive(Debug, Clone, Serialize)]
pub struct Out<T>
where
    T: Serialize + Clone + Debug,
{
    /// A message that can be printed to the user regarding the outcome of the command execution.
    message: String,

    /// Any structured data that needs to be output from the call.
    structure: Option<T>,
}

impl<T, S> From<S> for Out<T>
where
    T: Debug + Clone + Serialize,
    S: Into<String>,
{
    fn from(value: S) -> Self {
        Out::new_message(value)
    }
}

impl<T> Out<T>
where
    T: Serialize + Clone + Debug,
{
    /// Create a new `Out` object that has `Some(structure)`.
    pub fn new<S>(message: S, structure: T) -> Self
    where
        S: Into<String>,
    {
        Self {
            message: message.into(),
            structure: Some(structure),
        }
    }

    /// Create a new `Out` object that has `None` for `structure`.
    pub fn new_message<S>(message: S) -> Self
    where
        S: Into<String>,
    {
        Self {
            message: message.into(),
            structure: None,
        }
    }

    /// Get the `message`.
    pub fn message(&self) -> &str {
        &self.message
    }

    /// Get the structured data stored in `structure`.
    pub fn structure(&self) -> Option<&T> {
        self.structure.as_ref()
    }

    /// Print the message to stdout and the structured data (if it exists) as JSON to `debug!`.
    pub fn print(&self) {
        // A closed stdout is not worth failing the command over.
        let _ = self.write_to(&mut std::io::stdout().lock());
    }

    /// Write the message to `w` and the structured data (if it exists) as JSON to `debug!`. An
    /// empty message writes nothing.
    pub fn write_to(&self, w: &mut impl Write) -> std::io::Result<()> {
        if !self.message.is_empty() {
            writeln!(w, "{}", self.message)?;
        }
        if let Some(structure) = self.structure() {
            if let Ok(json) = serde_json::to_string_pretty(structure) {
                debug!("Command output:\n\n{json}\n\n");
            }
        }
        Ok(())
    }
}
