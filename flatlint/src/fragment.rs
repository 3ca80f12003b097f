//! Rule-set fragments and ordered rule sets.
//!
//! A [`RuleSetFragment`] is one flat-config object: optional file globs, optional
//! language options and a map from rule identifier to its configured state.
//! A [`RuleSet`] is an ordered list of fragments in which later fragments take
//! precedence over earlier ones, per top-level rule key.

use std::collections::BTreeMap;

use glob::{MatchOptions, Pattern};
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Writability of a global binding.
///
/// Serialized the way flat configs spell it (`"readonly"` / `"writable"`).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum GlobalAccess {
    /// The global may be read but not reassigned.
    Readonly,
    /// The global may be reassigned.
    Writable,
}

impl GlobalAccess {
    /// Convert the boolean "writable" flag used by `customGlobals`.
    #[must_use]
    pub const fn from_writable(writable: bool) -> Self {
        if writable {
            Self::Writable
        } else {
            Self::Readonly
        }
    }

    /// Whether reassignment is allowed.
    #[must_use]
    pub const fn is_writable(self) -> bool {
        matches!(self, Self::Writable)
    }
}

/// Map from global identifier to its writability.
pub type Globals = BTreeMap<String, GlobalAccess>;

/// Language options of a flat-config fragment.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct LanguageOptions {
    /// ECMAScript version (`"latest"` or a number).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub ecma_version: Option<Value>,

    /// `"module"`, `"script"` or `"commonjs"`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub source_type: Option<String>,

    /// Global bindings made available to linted files.
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub globals: Globals,

    /// Options forwarded to the parser.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub parser_options: Option<Value>,
}

/// One flat-config object.
///
/// # Examples
///
/// ```
/// use flatlint::fragment::RuleSetFragment;
/// use serde_json::json;
///
/// let fragment = RuleSetFragment::named("local")
///     .with_files(["**/*.ts"])
///     .with_rule("semi", json!(["error", "always"]));
///
/// assert_eq!(fragment.rules["semi"], json!(["error", "always"]));
/// ```
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct RuleSetFragment {
    /// Human-readable fragment name.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,

    /// Glob patterns this fragment applies to. Empty means every file.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub files: Vec<String>,

    /// Glob patterns this fragment never applies to.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub ignores: Vec<String>,

    /// Language options.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub language_options: Option<LanguageOptions>,

    /// Rule identifier to rule configuration (`"off"`, `"error"`, `["error", {..}]`, ...).
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub rules: BTreeMap<String, Value>,
}

impl RuleSetFragment {
    /// Create an empty fragment with a name.
    pub fn named(name: impl Into<String>) -> Self {
        Self {
            name: Some(name.into()),
            ..Default::default()
        }
    }

    /// Restrict the fragment to the given globs.
    #[must_use]
    pub fn with_files<I, S>(mut self, files: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.files = files.into_iter().map(Into::into).collect();
        self
    }

    /// Set a rule.
    #[must_use]
    pub fn with_rule(mut self, rule: impl Into<String>, value: Value) -> Self {
        self.rules.insert(rule.into(), value);
        self
    }

    /// Set the language options.
    #[must_use]
    pub fn with_language_options(mut self, options: LanguageOptions) -> Self {
        self.language_options = Some(options);
        self
    }

    /// Whether this fragment applies to `path`.
    ///
    /// Invalid glob patterns never match.
    #[must_use]
    pub fn applies_to(&self, path: &str) -> bool {
        let matches_any = |patterns: &[String]| {
            patterns.iter().any(|p| {
                Pattern::new(p)
                    .map(|pattern| pattern.matches_with(path, glob_options()))
                    .unwrap_or(false)
            })
        };

        (self.files.is_empty() || matches_any(&self.files)) && !matches_any(&self.ignores)
    }
}

/// Options for matching flat-config globs, where `**` crosses directories
/// and `*` does not.
fn glob_options() -> MatchOptions {
    MatchOptions {
        case_sensitive: true,
        require_literal_separator: true,
        require_literal_leading_dot: false,
    }
}

/// An ordered list of fragments.
///
/// # Examples
///
/// ```
/// use flatlint::fragment::{RuleSet, RuleSetFragment};
/// use serde_json::json;
///
/// let mut rules = RuleSet::new();
/// rules.push(RuleSetFragment::named("base").with_rule("quotes", json!("off")));
/// rules.push(RuleSetFragment::named("local").with_rule("quotes", json!("error")));
///
/// assert_eq!(rules.effective_rules()["quotes"], json!("error"));
/// ```
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct RuleSet {
    fragments: Vec<RuleSetFragment>,
}

impl RuleSet {
    /// Create an empty rule set.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a fragment with the highest precedence so far.
    pub fn push(&mut self, fragment: RuleSetFragment) {
        self.fragments.push(fragment);
    }

    /// The fragments in precedence order (lowest first).
    #[must_use]
    pub fn fragments(&self) -> &[RuleSetFragment] {
        &self.fragments
    }

    /// Consume the set, returning its fragments.
    #[must_use]
    pub fn into_fragments(self) -> Vec<RuleSetFragment> {
        self.fragments
    }

    /// Number of fragments.
    #[must_use]
    pub fn len(&self) -> usize {
        self.fragments.len()
    }

    /// Whether the set holds no fragments.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.fragments.is_empty()
    }

    /// Find a fragment by name.
    #[must_use]
    pub fn fragment(&self, name: &str) -> Option<&RuleSetFragment> {
        self.fragments
            .iter()
            .find(|f| f.name.as_deref() == Some(name))
    }

    /// Fold every fragment's rules, ignoring file scoping.
    ///
    /// Later fragments replace earlier entries for the same rule key; rule
    /// options are never deep-merged.
    #[must_use]
    pub fn effective_rules(&self) -> BTreeMap<String, Value> {
        fold_rules(self.fragments.iter())
    }

    /// Fold the rules of the fragments that apply to `path`.
    #[must_use]
    pub fn rules_for(&self, path: &str) -> BTreeMap<String, Value> {
        fold_rules(self.fragments.iter().filter(|f| f.applies_to(path)))
    }
}

impl Extend<RuleSetFragment> for RuleSet {
    fn extend<T: IntoIterator<Item = RuleSetFragment>>(&mut self, iter: T) {
        self.fragments.extend(iter);
    }
}

impl FromIterator<RuleSetFragment> for RuleSet {
    fn from_iter<T: IntoIterator<Item = RuleSetFragment>>(iter: T) -> Self {
        Self {
            fragments: iter.into_iter().collect(),
        }
    }
}

impl IntoIterator for RuleSet {
    type Item = RuleSetFragment;
    type IntoIter = std::vec::IntoIter<RuleSetFragment>;

    fn into_iter(self) -> Self::IntoIter {
        self.fragments.into_iter()
    }
}

fn fold_rules<'a>(fragments: impl Iterator<Item = &'a RuleSetFragment>) -> BTreeMap<String, Value> {
    let mut rules = BTreeMap::new();
    for fragment in fragments {
        for (rule, value) in &fragment.rules {
            rules.insert(rule.clone(), value.clone());
        }
    }
    rules
}
