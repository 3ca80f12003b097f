//! `FLATLINT_*` variables, layered above every configuration file.

use crate::config::schema::{
    Config, EcmaVersion, IndentStyle, InferrableTypes, QuoteStyle, SemicolonStyle,
    TsconfigSetting,
};
use crate::error::{Error, Result};
use std::collections::BTreeMap;
use std::env;
use std::path::PathBuf;
use std::str::FromStr;

/// `FLATLINT_STRICT`
pub const STRICT: &str = "FLATLINT_STRICT";
/// `FLATLINT_ROOT_DIR`
pub const ROOT_DIR: &str = "FLATLINT_ROOT_DIR";
/// `FLATLINT_TSCONFIG`
pub const TSCONFIG: &str = "FLATLINT_TSCONFIG";
/// `FLATLINT_NODE`
pub const NODE: &str = "FLATLINT_NODE";
/// `FLATLINT_DENO`
pub const DENO: &str = "FLATLINT_DENO";
/// `FLATLINT_BROWSER`
pub const BROWSER: &str = "FLATLINT_BROWSER";
/// `FLATLINT_ECMA_VERSION`
pub const ECMA_VERSION: &str = "FLATLINT_ECMA_VERSION";
/// `FLATLINT_CUSTOM_GLOBALS`
pub const CUSTOM_GLOBALS: &str = "FLATLINT_CUSTOM_GLOBALS";
/// `FLATLINT_INDENT`
pub const INDENT: &str = "FLATLINT_INDENT";
/// `FLATLINT_QUOTES`
pub const QUOTES: &str = "FLATLINT_QUOTES";
/// `FLATLINT_SEMI`
pub const SEMI: &str = "FLATLINT_SEMI";
/// `FLATLINT_INFERRABLE_TYPES`
pub const INFERRABLE_TYPES: &str = "FLATLINT_INFERRABLE_TYPES";

/// Every variable read by [`EnvVarOverrides::apply_overrides`].
pub const ALL: [&str; 12] = [
    STRICT,
    ROOT_DIR,
    TSCONFIG,
    NODE,
    DENO,
    BROWSER,
    ECMA_VERSION,
    CUSTOM_GLOBALS,
    INDENT,
    QUOTES,
    SEMI,
    INFERRABLE_TYPES,
];

/// Reads `FLATLINT_*` variables into a [`Config`].
///
/// # Examples
///
/// ```no_run
/// use flatlint::config::{Config, EnvVarOverrides};
///
/// let mut config = Config::default();
/// EnvVarOverrides::apply_overrides(&mut config).unwrap();
/// ```
pub struct EnvVarOverrides;

impl EnvVarOverrides {
    /// Overlay every set `FLATLINT_*` variable onto `config`.
    ///
    /// Reads all `FLATLINT_*` environment variables and applies them with
    /// higher precedence than file-based configs. `FLATLINT_CUSTOM_GLOBALS`
    /// adds to the configured globals instead of replacing them.
    ///
    /// # Errors
    ///
    /// Returns an error if any environment variable value is invalid.
    pub fn apply_overrides(config: &mut Config) -> Result<()> {
        if let Ok(val) = env::var(STRICT) {
            config.strict = Some(Self::parse_bool(STRICT, &val)?);
        }

        if let Ok(val) = env::var(ROOT_DIR) {
            config.root_dir = Some(PathBuf::from(val));
        }

        if let Ok(val) = env::var(TSCONFIG) {
            config.tsconfig = Some(Self::parse_tsconfig(&val));
        }

        Self::apply_environment_overrides(config)?;
        Self::apply_style_overrides(config)?;

        Ok(())
    }

    /// Apply runtime environment variable overrides.
    fn apply_environment_overrides(config: &mut Config) -> Result<()> {
        let mut environment = config.environment.clone().unwrap_or_default();
        let mut modified = false;

        for (var, flag) in [
            (NODE, &mut environment.node),
            (DENO, &mut environment.deno),
            (BROWSER, &mut environment.browser),
        ] {
            if let Ok(val) = env::var(var) {
                *flag = Some(Self::parse_bool(var, &val)?);
                modified = true;
            }
        }

        if let Ok(val) = env::var(ECMA_VERSION) {
            environment.ecma_version = Some(Self::parse_value::<EcmaVersion>(ECMA_VERSION, &val)?);
            modified = true;
        }

        if let Ok(val) = env::var(CUSTOM_GLOBALS) {
            let globals = Self::parse_custom_globals(&val)?;
            environment
                .custom_globals
                .get_or_insert_with(BTreeMap::new)
                .extend(globals);
            modified = true;
        }

        if modified {
            config.environment = Some(environment);
        }

        Ok(())
    }

    /// Apply style environment variable overrides.
    fn apply_style_overrides(config: &mut Config) -> Result<()> {
        let mut options = config.options.clone().unwrap_or_default();
        let mut modified = false;

        if let Ok(val) = env::var(INDENT) {
            options.indent = Some(Self::parse_value::<IndentStyle>(INDENT, &val)?);
            modified = true;
        }

        if let Ok(val) = env::var(QUOTES) {
            options.quotes = Some(Self::parse_value::<QuoteStyle>(QUOTES, &val)?);
            modified = true;
        }

        if let Ok(val) = env::var(SEMI) {
            options.semi = Some(Self::parse_value::<SemicolonStyle>(SEMI, &val)?);
            modified = true;
        }

        if let Ok(val) = env::var(INFERRABLE_TYPES) {
            options.inferrable_types =
                Some(Self::parse_value::<InferrableTypes>(INFERRABLE_TYPES, &val)?);
            modified = true;
        }

        if modified {
            config.options = Some(options);
        }

        Ok(())
    }

    /// `true`/`1`/`yes`/`on` or `false`/`0`/`no`/`off`, any case.
    pub(crate) fn parse_bool(field: &str, s: &str) -> Result<bool> {
        match s.trim().to_lowercase().as_str() {
            "true" | "1" | "yes" | "on" => Ok(true),
            "false" | "0" | "no" | "off" => Ok(false),
            _ => Err(Error::Validation {
                field: field.into(),
                message: format!(
                    "Invalid boolean value: '{s}' (expected true/false/1/0/yes/no/on/off)"
                ),
            }),
        }
    }

    /// Parse a `FromStr` value, reporting failures against the variable name.
    fn parse_value<T>(field: &str, s: &str) -> Result<T>
    where
        T: FromStr,
        T::Err: std::fmt::Display,
    {
        s.parse().map_err(|e: T::Err| Error::Validation {
            field: field.into(),
            message: e.to_string(),
        })
    }

    /// Parse a tsconfig setting: a boolean, or comma-separated paths.
    pub(crate) fn parse_tsconfig(s: &str) -> TsconfigSetting {
        if let Ok(enabled) = Self::parse_bool(TSCONFIG, s) {
            return TsconfigSetting::Enabled(enabled);
        }

        let mut paths: Vec<PathBuf> = s
            .split(',')
            .map(str::trim)
            .filter(|part| !part.is_empty())
            .map(PathBuf::from)
            .collect();

        if paths.len() == 1 {
            TsconfigSetting::Path(paths.remove(0))
        } else {
            TsconfigSetting::Paths(paths)
        }
    }

    /// Parse custom globals from a comma-separated string.
    ///
    /// Each entry is `name`, `name:readonly` or `name:writable`.
    pub(crate) fn parse_custom_globals(s: &str) -> Result<BTreeMap<String, bool>> {
        let mut globals = BTreeMap::new();

        for part in s.split(',') {
            let part = part.trim();
            if part.is_empty() {
                continue;
            }

            let (name, writable) = match part.split_once(':') {
                Some((name, access)) => {
                    let writable = match access.trim().to_lowercase().as_str() {
                        "writable" | "writeable" => true,
                        "readonly" | "readable" => false,
                        other => {
                            return Err(Error::Validation {
                                field: CUSTOM_GLOBALS.into(),
                                message: format!(
                                    "Invalid access '{other}' for '{}' (expected readonly or writable)",
                                    name.trim()
                                ),
                            })
                        }
                    };
                    (name.trim(), writable)
                }
                None => (part, false),
            };

            globals.insert(name.to_string(), writable);
        }

        Ok(globals)
    }
}
