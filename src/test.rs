//! Shared test utilities for creating test environments.
//!
//! This module is only compiled when running tests (`#[cfg(test)]`).

use crate::store::JsonFileStore;
use crate::{Config, Session};
use tempfile::TempDir;

/// Test environment that sets up a budget home directory with a Config.
/// Holds TempDir to keep the directory alive for the duration of the test.
pub struct TestEnv {
    _temp_dir: TempDir,
    config: Config,
}

impl TestEnv {
    /// Creates a test environment with a default config and no ledger file yet.
    pub fn new() -> Self {
        let temp_dir = TempDir::new().unwrap();
        let root = temp_dir.path().join("budget");
        let config = Config::create(&root, "€", false).unwrap();
        Self {
            _temp_dir: temp_dir,
            config,
        }
    }

    /// Returns a clone of the Config.
    pub fn config(&self) -> Config {
        self.config.clone()
    }

    /// Opens a session on the ledger file named by the config, as the binary does.
    pub fn session(&self) -> Session<JsonFileStore> {
        Session::open(self.config.store()).unwrap()
    }
}
