//! Conversion from the legacy (eslintrc-style) config shape to flat fragments.
//!
//! A [`CompatShim`] is handed to overrides hooks so they can reuse presets
//! that only exist in the legacy shape.

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::environment::globals;
use crate::error::{Error, Result};
use crate::fragment::{GlobalAccess, Globals, LanguageOptions, RuleSetFragment};

/// Legacy global declaration: a boolean or a writability keyword.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum LegacyGlobal {
    /// `true` for writable, `false` for readonly.
    Writable(bool),
    /// `readonly`, `readable`, `writable`, `writeable` or `off`.
    Keyword(String),
}

impl LegacyGlobal {
    /// Access level, or `None` for `off`.
    fn access(&self, name: &str) -> Result<Option<GlobalAccess>> {
        match self {
            Self::Writable(writable) => Ok(Some(GlobalAccess::from_writable(*writable))),
            Self::Keyword(keyword) => match keyword.as_str() {
                "readonly" | "readable" => Ok(Some(GlobalAccess::Readonly)),
                "writable" | "writeable" => Ok(Some(GlobalAccess::Writable)),
                "off" => Ok(None),
                other => Err(Error::validation(
                    format!("globals.{name}"),
                    format!("unknown global setting '{other}'"),
                )),
            },
        }
    }
}

/// A file-scoped block inside a legacy config.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LegacyOverride {
    /// Glob patterns the block applies to.
    pub files: Vec<String>,
    /// Glob patterns the block never applies to.
    #[serde(default)]
    pub excluded_files: Vec<String>,
    /// Rule settings.
    #[serde(default)]
    pub rules: BTreeMap<String, Value>,
}

/// A legacy config object.
///
/// # Examples
///
/// ```
/// use flatlint::compat::LegacyConfig;
///
/// let legacy: LegacyConfig = serde_yaml::from_str(r#"
/// env:
///   node: true
/// rules:
///   eqeqeq: error
/// "#).unwrap();
/// assert_eq!(legacy.env.get("node"), Some(&true));
/// ```
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LegacyConfig {
    /// Environment names to enable or disable.
    #[serde(default)]
    pub env: BTreeMap<String, bool>,
    /// Extra globals.
    #[serde(default)]
    pub globals: BTreeMap<String, LegacyGlobal>,
    /// Parser options, passed through.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub parser_options: Option<Value>,
    /// Rule settings.
    #[serde(default)]
    pub rules: BTreeMap<String, Value>,
    /// File-scoped blocks.
    #[serde(default)]
    pub overrides: Vec<LegacyOverride>,
}

/// Builds flat fragments from legacy configuration shapes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CompatShim {
    base_directory: PathBuf,
}

impl CompatShim {
    /// Create a shim resolving relative paths against `base_directory`.
    pub fn new(base_directory: impl Into<PathBuf>) -> Self {
        Self {
            base_directory: base_directory.into(),
        }
    }

    /// The directory legacy relative paths are anchored to.
    #[must_use]
    pub fn base_directory(&self) -> &Path {
        &self.base_directory
    }

    /// Convert a whole legacy config.
    ///
    /// The first fragment carries `env`, `globals`, `parserOptions` and
    /// `rules`; each legacy `overrides` block becomes one more fragment, in
    /// order.
    ///
    /// # Errors
    ///
    /// Returns a validation error for unknown env names or global keywords.
    pub fn config(&self, legacy: LegacyConfig) -> Result<Vec<RuleSetFragment>> {
        let mut globals = env_globals(&legacy.env)?;
        for (name, setting) in &legacy.globals {
            match setting.access(name)? {
                Some(access) => {
                    globals.insert(name.clone(), access);
                }
                None => {
                    globals.remove(name);
                }
            }
        }

        let mut base = RuleSetFragment::named("compat/config");
        if !globals.is_empty() || legacy.parser_options.is_some() {
            base.language_options = Some(LanguageOptions {
                globals,
                parser_options: legacy.parser_options,
                ..Default::default()
            });
        }
        base.rules = legacy.rules;

        let mut fragments = vec![base];
        for (index, block) in legacy.overrides.into_iter().enumerate() {
            if block.files.is_empty() {
                return Err(Error::validation(
                    format!("overrides[{index}].files"),
                    "must list at least one pattern",
                ));
            }
            fragments.push(RuleSetFragment {
                name: Some(format!("compat/overrides[{index}]")),
                files: block.files,
                ignores: block.excluded_files,
                language_options: None,
                rules: block.rules,
            });
        }
        Ok(fragments)
    }

    /// Convert a legacy `env` map.
    ///
    /// # Errors
    ///
    /// Returns a validation error for an unknown env name.
    pub fn env<I, S>(&self, env: I) -> Result<RuleSetFragment>
    where
        I: IntoIterator<Item = (S, bool)>,
        S: Into<String>,
    {
        let env: BTreeMap<String, bool> = env.into_iter().map(|(k, v)| (k.into(), v)).collect();
        Ok(RuleSetFragment::named("compat/env").with_language_options(LanguageOptions {
            globals: env_globals(&env)?,
            ..Default::default()
        }))
    }

    /// Wrap legacy rule settings in a fragment.
    pub fn rules<I, S>(&self, rules: I) -> RuleSetFragment
    where
        I: IntoIterator<Item = (S, Value)>,
        S: Into<String>,
    {
        RuleSetFragment {
            name: Some("compat/rules".to_string()),
            rules: rules.into_iter().map(|(k, v)| (k.into(), v)).collect(),
            ..Default::default()
        }
    }
}

/// Globals for the enabled legacy env names.
fn env_globals(env: &BTreeMap<String, bool>) -> Result<Globals> {
    let mut result = Globals::new();
    for (name, enabled) in env {
        let table = legacy_env_table(name).ok_or_else(|| {
            Error::validation(format!("env.{name}"), format!("unknown environment '{name}'"))
        })?;
        if *enabled {
            result.extend(table);
        }
    }
    Ok(result)
}

fn legacy_env_table(name: &str) -> Option<Globals> {
    let table = match name {
        "browser" => globals::browser(),
        "node" => {
            let mut node = globals::node();
            node.extend(globals::commonjs());
            node
        }
        "commonjs" => globals::commonjs(),
        "shared-node-browser" => globals::shared(),
        "worker" | "serviceworker" => {
            let mut worker = globals::shared();
            globals::extend_readonly(&mut worker, &["self", "importScripts", "postMessage"]);
            worker
        }
        "es6" | "es2015" | "es2016" | "es2017" | "es2018" | "es2019" | "es2020" | "es2021"
        | "es2022" | "es2023" | "es2024" => Globals::new(),
        _ => return None,
    };
    Some(table)
}
