//! Configuration system for assertgen.
//!
//! This module provides the persisted defaults for the `assertgen` binary,
//! serialized with serde and stored as TOML. Command-line flags override
//! whatever the file says.
//!
//! # Example
//!
//! ```
//! use assertgen::config::Config;
//!
//! // Use default configuration
//! let config = Config::default();
//! assert_eq!(config.expr, "result");
//! assert_eq!(config.precision, 2);
//!
//! // Create custom configuration
//! let custom = Config {
//!     expr: "@response".to_string(),
//!     symbolize_keys: true,
//!     ..Config::default()
//! };
//! ```

use crate::file::loader::LoadOptions;
use crate::generator::options::{Options, RelativeDates, DEFAULT_MAX_DEPTH, DEFAULT_PRECISION};
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// Configuration for the assertgen binary.
///
/// The test-context guard for deferred lookups is deliberately absent: it
/// can only be switched on in code.
///
/// # Fields
///
/// * `expr` - Root expression used in generated assertions (default: "result")
/// * `precision` - Decimal places for float assertions (default: 2)
/// * `exact_numbers` - Assert exact float equality instead (default: false)
/// * `relative_dates` - Anchor expression for relative dates (default: none)
/// * `symbolize_keys` - Render string keys as symbols (default: false)
/// * `detect_dates` - Read ISO date strings as dates (default: false)
/// * `max_depth` - Maximum container nesting (default: 64)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Config {
    /// Root expression used in generated assertions
    #[serde(default = "default_expr")]
    pub expr: String,

    /// Decimal places for approximate float assertions
    #[serde(default = "default_precision")]
    pub precision: u32,

    /// Assert exact equality for floats and decimals
    #[serde(default)]
    pub exact_numbers: bool,

    /// Anchor expression for relative dates, e.g. "Date.today"
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub relative_dates: Option<String>,

    /// Render string mapping keys as symbols
    #[serde(default)]
    pub symbolize_keys: bool,

    /// Read ISO date and timestamp strings as dates
    #[serde(default)]
    pub detect_dates: bool,

    /// Maximum container nesting below the root
    #[serde(default = "default_max_depth")]
    pub max_depth: usize,
}

/// Returns the default root expression.
fn default_expr() -> String {
    "result".to_string()
}

fn default_precision() -> u32 {
    DEFAULT_PRECISION
}

fn default_max_depth() -> usize {
    DEFAULT_MAX_DEPTH
}

impl Default for Config {
    fn default() -> Self {
        Self {
            expr: default_expr(),
            precision: default_precision(),
            exact_numbers: false,
            relative_dates: None,
            symbolize_keys: false,
            detect_dates: false,
            max_depth: default_max_depth(),
        }
    }
}

impl Config {
    /// Returns the path to the config file.
    ///
    /// Uses `~/.config/assertgen/config.toml` on all platforms.
    pub fn config_path() -> Option<std::path::PathBuf> {
        dirs::home_dir().map(|mut path| {
            path.push(".config");
            path.push("assertgen");
            path.push("config.toml");
            path
        })
    }

    /// Loads configuration from the default config file.
    ///
    /// Returns the default configuration if the file doesn't exist or can't be read.
    pub fn load() -> Self {
        let config_path = match Self::config_path() {
            Some(path) => path,
            None => return Self::default(),
        };

        if !config_path.exists() {
            return Self::default();
        }

        match std::fs::read_to_string(&config_path) {
            Ok(contents) => toml::from_str(&contents).unwrap_or_else(|err| {
                tracing::warn!(path = %config_path.display(), %err, "ignoring invalid config");
                Self::default()
            }),
            Err(_) => Self::default(),
        }
    }

    /// Saves configuration to the default config file.
    ///
    /// Creates the config directory if it doesn't exist.
    pub fn save(&self) -> anyhow::Result<()> {
        let config_path = Self::config_path()
            .ok_or_else(|| anyhow::anyhow!("Could not determine config directory"))?;

        if let Some(parent) = config_path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        let toml_string = toml::to_string_pretty(self)?;
        std::fs::write(&config_path, toml_string)?;

        Ok(())
    }

    /// Generator options, anchoring relative dates at `today`.
    pub fn generator_options(&self, today: NaiveDate) -> Options {
        Options {
            relative_dates: self
                .relative_dates
                .as_ref()
                .map(|expr| RelativeDates::new(expr.clone(), today)),
            precision: if self.exact_numbers {
                None
            } else {
                Some(self.precision)
            },
            test_context: false,
            max_depth: self.max_depth,
        }
    }

    pub fn load_options(&self) -> LoadOptions {
        LoadOptions {
            symbolize_keys: self.symbolize_keys,
            detect_dates: self.detect_dates,
        }
    }
}
