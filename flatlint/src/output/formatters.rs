//! Output formatter implementations.

use std::fmt::Write as _;

use serde_json::Value;

use crate::fragment::RuleSet;
use crate::Result;

use super::OutputFormatter;

/// JSON formatter.
pub struct JsonFormatter;

impl OutputFormatter for JsonFormatter {
    fn format(&self, rules: &RuleSet) -> Result<String> {
        Ok(serde_json::to_string_pretty(rules)?)
    }
}

/// YAML formatter.
pub struct YamlFormatter;

impl OutputFormatter for YamlFormatter {
    fn format(&self, rules: &RuleSet) -> Result<String> {
        Ok(serde_yaml::to_string(rules)?)
    }
}

/// JavaScript module formatter, suitable for `eslint.config.js`.
pub struct ModuleFormatter;

impl OutputFormatter for ModuleFormatter {
    fn format(&self, rules: &RuleSet) -> Result<String> {
        let body = serde_json::to_string_pretty(rules)?;
        Ok(format!(
            "// Generated by flatlint. Do not edit by hand.\nexport default {body};\n"
        ))
    }
}

/// Human-readable formatter.
pub struct HumanFormatter;

impl HumanFormatter {
    fn describe(value: &Value) -> String {
        match value {
            Value::String(s) => s.clone(),
            other => other.to_string(),
        }
    }
}

impl OutputFormatter for HumanFormatter {
    fn format(&self, rules: &RuleSet) -> Result<String> {
        if rules.is_empty() {
            return Ok("No fragments.".to_string());
        }

        let mut out = String::new();
        for (index, fragment) in rules.fragments().iter().enumerate() {
            let name = fragment.name.as_deref().unwrap_or("(unnamed)");
            let _ = writeln!(out, "[{index}] {name}");
            if !fragment.files.is_empty() {
                let _ = writeln!(out, "  files: {}", fragment.files.join(", "));
            }
            if !fragment.ignores.is_empty() {
                let _ = writeln!(out, "  ignores: {}", fragment.ignores.join(", "));
            }
            if let Some(options) = &fragment.language_options {
                if !options.globals.is_empty() {
                    let _ = writeln!(out, "  globals: {}", options.globals.len());
                }
            }
            for (rule, value) in &fragment.rules {
                let _ = writeln!(out, "  {rule}: {}", Self::describe(value));
            }
        }

        let effective = rules.effective_rules();
        let _ = write!(out, "{} fragment(s), {} rule(s)", rules.len(), effective.len());
        Ok(out)
    }
}
