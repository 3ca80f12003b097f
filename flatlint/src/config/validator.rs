//! Checks on a merged [`Config`].
//!
//! These are the constraints that the type system alone cannot
//! express: non-empty path lists, identifier syntax, version ranges and the
//! shape of override fragments.

use crate::config::schema::{Config, EcmaVersion, EnvironmentOptions, TsconfigSetting};
use crate::error::{Error, Result};
use crate::fragment::RuleSetFragment;
use crate::overrides::Overrides;
use glob::Pattern;
use serde_json::Value;
use std::path::Path;

/// Highest ECMAScript edition number accepted.
pub const MAX_ECMA_EDITION: u16 = 17;
/// First ECMAScript year accepted.
pub const MIN_ECMA_YEAR: u16 = 2015;
/// Last ECMAScript year accepted.
pub const MAX_ECMA_YEAR: u16 = MIN_ECMA_YEAR + MAX_ECMA_EDITION - 6;

/// Rule severities accepted as strings.
const SEVERITY_NAMES: [&str; 3] = ["off", "warn", "error"];

/// Validates configuration values.
///
/// # Examples
///
/// ```
/// use flatlint::config::{Config, ConfigValidator, TsconfigSetting};
///
/// ConfigValidator::validate(&Config::default()).unwrap();
///
/// let empty = Config {
///     tsconfig: Some(TsconfigSetting::Paths(vec![])),
///     ..Default::default()
/// };
/// assert!(ConfigValidator::validate(&empty).is_err());
/// ```
pub struct ConfigValidator;

impl ConfigValidator {
    /// Check every section of `config`, stopping at the first problem.
    ///
    /// # Errors
    ///
    /// Returns the first validation error found.
    pub fn validate(config: &Config) -> Result<()> {
        if let Some(ref tsconfig) = config.tsconfig {
            Self::validate_tsconfig(tsconfig)?;
        }

        if let Some(ref root_dir) = config.root_dir {
            Self::validate_path("rootDir", root_dir)?;
        }

        if let Some(ref environment) = config.environment {
            Self::validate_environment(environment)?;
        }

        if let Some(Overrides::Fragments(ref fragments)) = config.overrides {
            for (i, fragment) in fragments.iter().enumerate() {
                Self::validate_fragment(&format!("overrides[{i}]"), fragment)?;
            }
        }

        Ok(())
    }

    /// Validate the tsconfig setting.
    fn validate_tsconfig(tsconfig: &TsconfigSetting) -> Result<()> {
        match tsconfig {
            TsconfigSetting::Enabled(_) => Ok(()),
            TsconfigSetting::Path(path) => Self::validate_path("tsconfig", path),
            TsconfigSetting::Paths(paths) => {
                if paths.is_empty() {
                    return Err(Error::Validation {
                        field: "tsconfig".into(),
                        message: "Must not be an empty list".into(),
                    });
                }
                for (i, path) in paths.iter().enumerate() {
                    Self::validate_path(&format!("tsconfig[{i}]"), path)?;
                }
                Ok(())
            }
        }
    }

    /// Validate that a configured path is non-empty.
    fn validate_path(field: &str, path: &Path) -> Result<()> {
        if path.as_os_str().is_empty() {
            return Err(Error::Validation {
                field: field.into(),
                message: "Path cannot be empty".into(),
            });
        }
        Ok(())
    }

    /// Validate environment options.
    fn validate_environment(environment: &EnvironmentOptions) -> Result<()> {
        if let Some(version) = environment.ecma_version {
            Self::validate_ecma_version(version)?;
        }

        if let Some(ref globals) = environment.custom_globals {
            for name in globals.keys() {
                Self::validate_identifier(&format!("environment.customGlobals.{name}"), name)?;
            }
        }

        Ok(())
    }

    /// Validate an ECMAScript version: an edition number or a year.
    fn validate_ecma_version(version: EcmaVersion) -> Result<()> {
        match version {
            EcmaVersion::Latest => Ok(()),
            EcmaVersion::Version(v)
                if v == 3
                    || v == 5
                    || (6..=MAX_ECMA_EDITION).contains(&v)
                    || (MIN_ECMA_YEAR..=MAX_ECMA_YEAR).contains(&v) =>
            {
                Ok(())
            }
            EcmaVersion::Version(v) => Err(Error::Validation {
                field: "environment.ecmaVersion".into(),
                message: format!(
                    "Unsupported version {v} (expected 3, 5, 6-{MAX_ECMA_EDITION}, \
                     {MIN_ECMA_YEAR}-{MAX_ECMA_YEAR} or latest)"
                ),
            }),
        }
    }

    /// Validate a JavaScript identifier used as a global name.
    ///
    /// The first character must be a letter, `_` or `$`; the rest may also
    /// contain digits.
    pub fn validate_identifier(field: &str, value: &str) -> Result<()> {
        let mut chars = value.chars();
        let valid = match chars.next() {
            Some(first) if first.is_alphabetic() || first == '_' || first == '$' => {
                chars.all(|c| c.is_alphanumeric() || c == '_' || c == '$')
            }
            _ => false,
        };

        if !valid {
            return Err(Error::Validation {
                field: field.into(),
                message: format!("'{value}' is not a valid identifier"),
            });
        }
        Ok(())
    }

    /// Validate a user-written fragment: glob syntax and rule severities.
    ///
    /// # Errors
    ///
    /// Returns a validation error naming the offending pattern or rule.
    pub fn validate_fragment(prefix: &str, fragment: &RuleSetFragment) -> Result<()> {
        for (key, patterns) in [("files", &fragment.files), ("ignores", &fragment.ignores)] {
            for (i, pattern) in patterns.iter().enumerate() {
                Pattern::new(pattern).map_err(|e| Error::Validation {
                    field: format!("{prefix}.{key}[{i}]"),
                    message: format!("Invalid glob '{pattern}': {e}"),
                })?;
            }
        }

        for (rule, value) in &fragment.rules {
            if !Self::is_rule_setting(value) {
                return Err(Error::Validation {
                    field: format!("{prefix}.rules.{rule}"),
                    message: format!(
                        "Expected a severity ({}, 0, 1, 2) or [severity, ...options], got {value}",
                        SEVERITY_NAMES.join(", ")
                    ),
                });
            }
        }

        Ok(())
    }

    fn is_rule_setting(value: &Value) -> bool {
        match value {
            Value::String(s) => SEVERITY_NAMES.contains(&s.as_str()),
            Value::Number(n) => matches!(n.as_u64(), Some(0..=2)),
            Value::Array(items) => items
                .first()
                .is_some_and(|first| !first.is_array() && Self::is_rule_setting(first)),
            _ => false,
        }
    }
}
