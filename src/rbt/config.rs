use serde::Deserialize;

use std::path;

use crate::{util, Result};

/// Default name for index instances.
pub const DEFAULT_NAME: &str = "rbidx";

/// Configuration for [Index] type.
///
/// Configuration can be composed in code, starting from `Config::default()`,
/// or loaded from a toml file, missing fields take their default value:
///
/// ```toml
/// name = "users-by-id"
/// validate = false
/// ```
///
/// [Index]: crate::rbt::Index
#[derive(Clone, Debug, Deserialize, PartialEq)]
#[serde(default)]
pub struct Config {
    /// name of the index.
    ///
    /// Default: [DEFAULT_NAME]
    pub name: String,
    /// Validate the tree after every mutation. Applicable only for
    /// debug builds, release builds never validate implicitly.
    ///
    /// Default: true
    pub validate: bool,
}

impl Default for Config {
    fn default() -> Config {
        Config {
            name: DEFAULT_NAME.to_string(),
            validate: true,
        }
    }
}

impl Config {
    pub fn new(name: &str) -> Config {
        Config {
            name: name.to_string(),
            ..Config::default()
        }
    }

    /// Enable or disable post-mutation validation.
    pub fn set_validate(&mut self, validate: bool) -> &mut Self {
        self.validate = validate;
        self
    }

    /// Parse configuration from toml text.
    pub fn from_toml(text: &str) -> Result<Config> {
        util::files::parse_toml(text)
    }

    /// Load configuration from toml file.
    pub fn load<P>(loc: P) -> Result<Config>
    where
        P: AsRef<path::Path>,
    {
        util::load_toml(loc)
    }
}

#[cfg(test)]
#[path = "config_test.rs"]
mod config_test;
