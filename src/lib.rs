pub mod args;
mod chart;
pub mod commands;
mod config;
mod error;
mod fs;
mod menu;
pub mod model;
mod session;
mod store;

#[cfg(test)]
mod test;

pub use config::Config;
pub use error::{Error, LedgerError, LedgerResult, Result};
pub use session::Session;
pub use store::{JsonFileStore, MemoryStore, Store};
