//! Configuration file handling.
//!
//! The configuration file is stored at `$BUDGET_HOME/config.json` and holds the location of the
//! ledger file and how amounts are displayed. It is optional: without one the defaults are used.

use crate::model::{AmountFormat, DEFAULT_CURRENCY_SYMBOL};
use crate::store::JsonFileStore;
use crate::{fs, Result};
use anyhow::{bail, Context};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use tracing::debug;

const APP_NAME: &str = "budget";
const CONFIG_VERSION: u8 = 1;
const CONFIG_JSON: &str = "config.json";
const BUDGET_DATA_JSON: &str = "budget_data.json";

/// The `Config` object represents the configuration of the app. You instantiate it by providing
/// the path to `$BUDGET_HOME` and from there it loads `$BUDGET_HOME/config.json`.
#[derive(Debug, Clone)]
pub struct Config {
    root: PathBuf,
    config_path: PathBuf,
    config_file: ConfigFile,
    data_file_override: Option<PathBuf>,
}

impl Config {
    /// Creates the home directory and writes an initial `config.json`.
    ///
    /// # Arguments
    /// - `dir` - The directory that will be the root of the data directory, e.g. `$HOME/budget`
    /// - `currency_symbol` - Printed in front of amounts, e.g. `€`
    /// - `thousands_separator` - Whether to print amounts like `1,000.00`
    ///
    /// # Errors
    /// - Returns an error if a config file already exists or if any file operations fail.
    pub fn create(
        dir: impl Into<PathBuf>,
        currency_symbol: &str,
        thousands_separator: bool,
    ) -> Result<Self> {
        let root = make_root(dir.into())?;
        let config_path = root.join(CONFIG_JSON);
        if config_path.exists() {
            bail!("A config file already exists at '{}'", config_path.display())
        }

        let config_file = ConfigFile {
            currency_symbol: currency_symbol.to_string(),
            thousands_separator,
            ..ConfigFile::default()
        };
        config_file.save(&config_path)?;

        Ok(Self {
            root,
            config_path,
            config_file,
            data_file_override: None,
        })
    }

    /// Loads `config.json` from `budget_home`, creating `budget_home` if it is missing. When there
    /// is no `config.json` the defaults are used and nothing is written.
    pub fn load(budget_home: impl Into<PathBuf>) -> Result<Self> {
        let root = make_root(budget_home.into())?;
        let config_path = root.join(CONFIG_JSON);
        let config_file = if config_path.is_file() {
            ConfigFile::load(&config_path)?
        } else {
            debug!(
                "No config file at {}, using defaults",
                config_path.display()
            );
            ConfigFile::default()
        };
        Ok(Self {
            root,
            config_path,
            config_file,
            data_file_override: None,
        })
    }

    /// Uses `data_file` instead of the configured ledger file.
    pub fn with_data_file(mut self, data_file: Option<PathBuf>) -> Self {
        self.data_file_override = data_file;
        self
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    pub fn config_path(&self) -> &Path {
        &self.config_path
    }

    /// The ledger file. A relative path in `config.json` is resolved against the home directory.
    pub fn data_file(&self) -> PathBuf {
        match &self.data_file_override {
            Some(p) => p.clone(),
            None if self.config_file.data_file.is_absolute() => self.config_file.data_file.clone(),
            None => self.root.join(&self.config_file.data_file),
        }
    }

    /// A store for the configured ledger file.
    pub fn store(&self) -> JsonFileStore {
        JsonFileStore::new(self.data_file())
    }

    pub fn amount_format(&self) -> AmountFormat {
        AmountFormat::new(
            self.config_file.currency_symbol.clone(),
            self.config_file.thousands_separator,
        )
    }
}

fn make_root(maybe_relative: PathBuf) -> Result<PathBuf> {
    fs::create_dir_all(&maybe_relative).context("Unable to create the budget home directory")?;
    std::fs::canonicalize(&maybe_relative).with_context(|| {
        format!(
            "Unable to canonicalize the path {}",
            maybe_relative.display()
        )
    })
}

/// Represents the serialization and deserialization format of the configuration file.
///
/// Example configuration:
/// ```json
/// {
///   "app_name": "budget",
///   "config_version": 1,
///   "data_file": "budget_data.json",
///   "currency_symbol": "€",
///   "thousands_separator": false
/// }
/// ```
#[derive(Debug, Clone, Serialize, Deserialize, Eq, PartialEq)]
struct ConfigFile {
    /// Application name, should always be "budget"
    app_name: String,

    /// Configuration file version
    config_version: u8,

    /// Path to the ledger file, relative to the home directory or absolute
    #[serde(default = "default_data_file")]
    data_file: PathBuf,

    #[serde(default = "default_currency_symbol")]
    currency_symbol: String,

    #[serde(default)]
    thousands_separator: bool,
}

fn default_data_file() -> PathBuf {
    PathBuf::from(BUDGET_DATA_JSON)
}

fn default_currency_symbol() -> String {
    DEFAULT_CURRENCY_SYMBOL.to_string()
}

impl Default for ConfigFile {
    fn default() -> Self {
        Self {
            app_name: APP_NAME.to_string(),
            config_version: CONFIG_VERSION,
            data_file: default_data_file(),
            currency_symbol: default_currency_symbol(),
            thousands_separator: false,
        }
    }
}

impl ConfigFile {
    /// Loads a ConfigFile from the specified path.
    ///
    /// # Errors
    /// Returns an error if the file cannot be read or parsed
    fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let config: ConfigFile = fs::deserialize(path)
            .with_context(|| format!("Failed to load config file at {}", path.display()))?;

        anyhow::ensure!(
            config.app_name == APP_NAME,
            "Invalid app_name in config file: expected '{}', got '{}'",
            APP_NAME,
            config.app_name
        );

        Ok(config)
    }

    /// Saves the ConfigFile to the specified path.
    fn save(&self, path: impl AsRef<Path>) -> Result<()> {
        let p = path.as_ref();
        let data = serde_json::to_string_pretty(self).context("Unable to serialize config")?;
        fs::write_all(p, data).context("Unable to write config file")
    }
}
