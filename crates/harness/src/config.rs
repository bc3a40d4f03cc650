//! Harness configuration

use std::collections::HashMap;
use std::path::Path;

use crate::error::HarnessResult;

/// External runner binary.
pub const KEY_COMMAND: &str = "command";
/// Path to the runner's own configuration file.
pub const KEY_CONFIG: &str = "config";
/// Directory that receives staged feature files.
pub const KEY_WORKSPACE: &str = "workspace";
/// Directory scanned by the feature catalog.
pub const KEY_FEATURES: &str = "features";

/// Flat string key/value lookup, immutable once built.
#[derive(Debug, Clone, Default)]
pub struct Config {
    values: HashMap<String, String>,
}

impl Config {
    pub fn new(values: HashMap<String, String>) -> Self {
        Self { values }
    }

    /// Load configuration from a TOML file of string values.
    ///
    /// A missing file yields an empty configuration.
    pub fn load(path: &Path) -> HarnessResult<Self> {
        if path.exists() {
            let content = std::fs::read_to_string(path)?;
            let values: HashMap<String, String> = toml::from_str(&content)?;
            Ok(Self { values })
        } else {
            Ok(Self::default())
        }
    }

    pub fn get(&self, key: &str) -> Option<&str> {
        self.values.get(key).map(String::as_str)
    }

    pub fn get_or<'a>(&'a self, key: &str, default: &'a str) -> &'a str {
        self.get(key).unwrap_or(default)
    }

    /// Return a copy with one value replaced. Used for CLI overrides.
    pub fn with(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.values.insert(key.into(), value.into());
        self
    }
}
