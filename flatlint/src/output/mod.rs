//! Output formatting module for resolved rule sets.
//!
//! This module renders a [`RuleSet`] as JSON, YAML, an `eslint.config.js`
//! style JavaScript module, or a human-readable summary.

mod formatters;

use std::fmt;
use std::str::FromStr;

use crate::fragment::RuleSet;
use crate::{Error, Result};

pub use formatters::{HumanFormatter, JsonFormatter, ModuleFormatter, YamlFormatter};

/// Trait for formatting rule sets into different output formats.
pub trait OutputFormatter {
    /// Format the given rule set into a string.
    ///
    /// # Errors
    ///
    /// Returns an error if serialization fails.
    fn format(&self, rules: &RuleSet) -> Result<String>;
}

/// Available output formats for rule sets.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum OutputFormat {
    /// Pretty-printed JSON array of fragments.
    #[default]
    Json,
    /// YAML sequence of fragments.
    Yaml,
    /// A JavaScript module exporting the fragment array.
    Module,
    /// Human-readable summary.
    Human,
}

impl OutputFormat {
    /// Every accepted spelling, in declaration order.
    pub const VALUES: &'static [&'static str] = &["json", "yaml", "module", "human"];

    /// Create a formatter for this output format.
    #[must_use]
    pub fn create_formatter(&self) -> Box<dyn OutputFormatter> {
        match self {
            Self::Json => Box::new(JsonFormatter),
            Self::Yaml => Box::new(YamlFormatter),
            Self::Module => Box::new(ModuleFormatter),
            Self::Human => Box::new(HumanFormatter),
        }
    }
}

impl fmt::Display for OutputFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Json => "json",
            Self::Yaml => "yaml",
            Self::Module => "module",
            Self::Human => "human",
        };
        f.write_str(name)
    }
}

impl FromStr for OutputFormat {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.to_lowercase().as_str() {
            "json" => Ok(Self::Json),
            "yaml" | "yml" => Ok(Self::Yaml),
            "module" | "js" => Ok(Self::Module),
            "human" => Ok(Self::Human),
            _ => Err(Error::validation(
                "format",
                format!("unknown output format '{s}' (expected one of: {})", Self::VALUES.join(", ")),
            )),
        }
    }
}
