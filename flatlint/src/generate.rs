//! Base rule-set generation from a resolved configuration.
//!
//! The output is deterministic: the same [`ResolvedConfig`] always yields the
//! same fragments in the same order.

use serde_json::{json, Value};

use crate::config::{EcmaVersion, IndentStyle};
use crate::environment::globals;
use crate::fragment::{LanguageOptions, RuleSetFragment};
use crate::resolver::{ResolvedConfig, TsconfigResolved};
use crate::style::PositionPolicy;

/// Globs matching TypeScript sources.
pub const TYPESCRIPT_FILES: &[&str] = &["**/*.ts", "**/*.tsx", "**/*.mts", "**/*.cts"];
/// Globs matching JavaScript sources.
pub const JAVASCRIPT_FILES: &[&str] = &["**/*.js", "**/*.jsx", "**/*.mjs", "**/*.cjs"];
/// Globs matching CommonJS sources.
pub const COMMONJS_FILES: &[&str] = &["**/*.cjs", "**/*.cts"];

/// Fragment name prefix for generated fragments.
pub const NAME_PREFIX: &str = "flatlint/";

/// Build every base fragment, in order.
#[must_use]
pub fn base_fragments(config: &ResolvedConfig) -> Vec<RuleSetFragment> {
    let mut fragments = vec![language(config)];
    if config.environment.node {
        fragments.push(commonjs());
    }
    if let Some(fragment) = typescript(config) {
        fragments.push(fragment);
    }
    fragments.push(style(config));
    fragments.push(typescript_types(config.style.inferrable.typescript));
    fragments.push(javascript_types(config.style.inferrable.javascript));
    if config.strict {
        fragments.push(strict());
    }
    fragments
}

fn named(suffix: &str) -> RuleSetFragment {
    RuleSetFragment::named(format!("{NAME_PREFIX}{suffix}"))
}

fn ecma_version_value(version: EcmaVersion) -> Value {
    match version {
        EcmaVersion::Latest => json!("latest"),
        EcmaVersion::Version(v) => json!(v),
    }
}

fn language(config: &ResolvedConfig) -> RuleSetFragment {
    named("language").with_language_options(LanguageOptions {
        ecma_version: Some(ecma_version_value(config.environment.ecma_version)),
        source_type: Some("module".to_string()),
        globals: config.environment.globals(),
        parser_options: None,
    })
}

fn commonjs() -> RuleSetFragment {
    named("commonjs")
        .with_files(COMMONJS_FILES.iter().copied())
        .with_language_options(LanguageOptions {
            source_type: Some("commonjs".to_string()),
            globals: globals::commonjs(),
            ..Default::default()
        })
}

fn typescript(config: &ResolvedConfig) -> Option<RuleSetFragment> {
    let project = match &config.tsconfig {
        TsconfigResolved::Disabled => return None,
        TsconfigResolved::Auto => json!(true),
        TsconfigResolved::Paths(paths) => Value::Array(
            paths
                .iter()
                .map(|path| Value::String(path.to_string_lossy().into_owned()))
                .collect(),
        ),
    };

    Some(
        named("typescript")
            .with_files(TYPESCRIPT_FILES.iter().copied())
            .with_language_options(LanguageOptions {
                parser_options: Some(json!({
                    "project": project,
                    "tsconfigRootDir": config.root_dir.to_string_lossy()
                })),
                ..Default::default()
            }),
    )
}

fn style(config: &ResolvedConfig) -> RuleSetFragment {
    let indent = match config.style.indent {
        IndentStyle::Tab => json!(["error", "tab"]),
        IndentStyle::Space => json!(["error", 2]),
    };
    named("style")
        .with_rule("indent", indent)
        .with_rule("quotes", json!(["error", config.style.quotes.as_str()]))
        .with_rule("semi", json!(["error", config.style.semi.as_str()]))
}

fn severity(mandated: bool) -> Value {
    json!(if mandated { "error" } else { "off" })
}

// `no-inferrable-types` always reports annotated variables, so it stays off
// whenever `typedef` mandates them.
fn typescript_types(policy: PositionPolicy) -> RuleSetFragment {
    let no_inferrable = if !policy.variables || (!policy.parameters && !policy.properties) {
        json!("off")
    } else {
        json!(["error", {
            "ignoreParameters": !policy.parameters,
            "ignoreProperties": !policy.properties
        }])
    };

    named("types/typescript")
        .with_files(TYPESCRIPT_FILES.iter().copied())
        .with_rule("@typescript-eslint/no-inferrable-types", no_inferrable)
        .with_rule(
            "@typescript-eslint/typedef",
            json!(["error", {
                "variableDeclaration": !policy.variables,
                "parameter": !policy.parameters,
                "memberVariableDeclaration": !policy.properties
            }]),
        )
        .with_rule(
            "@typescript-eslint/explicit-function-return-type",
            severity(!policy.return_values),
        )
}

// JSDoc has no rule requiring `@type` on variables, so `policy.variables` is
// not enforced for JavaScript.
fn javascript_types(policy: PositionPolicy) -> RuleSetFragment {
    named("types/javascript")
        .with_files(JAVASCRIPT_FILES.iter().copied())
        .with_rule("jsdoc/require-param-type", severity(!policy.parameters))
        .with_rule("jsdoc/require-property-type", severity(!policy.properties))
        .with_rule("jsdoc/require-returns-type", severity(!policy.return_values))
        .with_rule("jsdoc/check-types", json!("error"))
}

fn strict() -> RuleSetFragment {
    named("strict")
        .with_rule("@typescript-eslint/no-explicit-any", json!("error"))
        .with_rule("@typescript-eslint/explicit-module-boundary-types", json!("error"))
        .with_rule("no-implicit-coercion", json!("error"))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::{InferrableTypes, InferrableTypesFlags, InferrableTypesTag, QuoteStyle};
    use crate::environment::{ResolvedEnvironment, RuntimeEnvironment};
    use crate::fragment::RuleSet;
    use crate::style::ResolvedStyle;
    use std::path::PathBuf;

    fn resolved(strict: bool) -> ResolvedConfig {
        ResolvedConfig {
            tsconfig: TsconfigResolved::Disabled,
            strict,
            root_dir: PathBuf::from("/repo"),
            environment: ResolvedEnvironment::for_runtime(RuntimeEnvironment::Bare),
            style: ResolvedStyle::resolve(None, strict),
            rule_set: RuleSet::new(),
        }
    }

    fn names(fragments: &[RuleSetFragment]) -> Vec<&str> {
        fragments.iter().filter_map(|f| f.name.as_deref()).collect()
    }

    #[test]
    fn test_default_fragment_order() {
        let fragments = base_fragments(&resolved(false));
        assert_eq!(
            names(&fragments),
            vec![
                "flatlint/language",
                "flatlint/style",
                "flatlint/types/typescript",
                "flatlint/types/javascript",
            ]
        );
    }

    #[test]
    fn test_strict_and_node_fragments() {
        let mut config = resolved(true);
        config.environment = ResolvedEnvironment::for_runtime(RuntimeEnvironment::Node);
        let fragments = base_fragments(&config);
        let names = names(&fragments);
        assert_eq!(names[1], "flatlint/commonjs");
        assert_eq!(names.last(), Some(&"flatlint/strict"));
    }

    #[test]
    fn test_typescript_project_paths() {
        let mut config = resolved(false);
        config.tsconfig = TsconfigResolved::Paths(vec![PathBuf::from("/repo/tsconfig.json")]);
        let fragments = base_fragments(&config);
        let ts = fragments
            .iter()
            .find(|f| f.name.as_deref() == Some("flatlint/typescript"))
            .unwrap();
        let parser = ts.language_options.as_ref().unwrap().parser_options.as_ref().unwrap();
        assert_eq!(parser["project"], json!(["/repo/tsconfig.json"]));
        assert_eq!(parser["tsconfigRootDir"], json!("/repo"));
    }

    #[test]
    fn test_typescript_auto_project() {
        let mut config = resolved(false);
        config.tsconfig = TsconfigResolved::Auto;
        let fragment = typescript(&config).unwrap();
        let parser = fragment.language_options.unwrap().parser_options.unwrap();
        assert_eq!(parser["project"], json!(true));
    }

    #[test]
    fn test_style_rules() {
        let mut config = resolved(false);
        config.style.indent = IndentStyle::Space;
        config.style.quotes = QuoteStyle::Double;
        let fragment = style(&config);
        assert_eq!(fragment.rules["indent"], json!(["error", 2]));
        assert_eq!(fragment.rules["quotes"], json!(["error", "double"]));
        assert_eq!(fragment.rules["semi"], json!(["error", "never"]));
    }

    #[test]
    fn test_never_mandates_every_annotation() {
        let policy = InferrableTypes::Bare(InferrableTypesTag::Never).policy();
        let ts = typescript_types(policy.typescript);
        assert_eq!(ts.rules["@typescript-eslint/no-inferrable-types"], json!("off"));
        assert_eq!(
            ts.rules["@typescript-eslint/explicit-function-return-type"],
            json!("error")
        );
        let js = javascript_types(policy.javascript);
        assert!(js.rules.values().all(|v| *v == json!("error")));
    }

    #[test]
    fn test_always_relaxes_every_annotation() {
        let policy = InferrableTypes::Bare(InferrableTypesTag::Always).policy();
        let ts = typescript_types(policy.typescript);
        assert_eq!(
            ts.rules["@typescript-eslint/no-inferrable-types"],
            json!(["error", {"ignoreParameters": false, "ignoreProperties": false}])
        );
        assert_eq!(
            ts.rules["@typescript-eslint/typedef"],
            json!(["error", {
                "variableDeclaration": false,
                "parameter": false,
                "memberVariableDeclaration": false
            }])
        );
        let js = javascript_types(policy.javascript);
        for rule in [
            "jsdoc/require-param-type",
            "jsdoc/require-property-type",
            "jsdoc/require-returns-type",
        ] {
            assert_eq!(js.rules[rule], json!("off"), "{rule}");
        }
        assert_eq!(js.rules["jsdoc/check-types"], json!("error"));
    }

    #[test]
    fn test_mandated_variables_turn_off_no_inferrable_types() {
        let policy = InferrableTypes::Detailed(
            InferrableTypesTag::Never,
            InferrableTypesFlags {
                parameters: Some(true),
                properties: Some(true),
                ..Default::default()
            },
        )
        .policy();
        let ts = typescript_types(policy.typescript);
        assert_eq!(
            ts.rules["@typescript-eslint/typedef"],
            json!(["error", {
                "variableDeclaration": true,
                "parameter": false,
                "memberVariableDeclaration": false
            }])
        );
        assert_eq!(ts.rules["@typescript-eslint/no-inferrable-types"], json!("off"));
    }

    #[test]
    fn test_inferred_variables_keep_no_inferrable_types_options() {
        let policy = InferrableTypes::Detailed(
            InferrableTypesTag::Always,
            InferrableTypesFlags {
                parameters: Some(false),
                ..Default::default()
            },
        )
        .policy();
        let ts = typescript_types(policy.typescript);
        assert_eq!(
            ts.rules["@typescript-eslint/no-inferrable-types"],
            json!(["error", {"ignoreParameters": true, "ignoreProperties": false}])
        );
    }

    #[test]
    fn test_resolved_rules_never_conflict_on_variables() {
        use crate::config::StyleOptions;
        use crate::resolver::Resolver;

        let config = crate::config::Config {
            options: Some(StyleOptions {
                inferrable_types: Some(InferrableTypes::Detailed(
                    InferrableTypesTag::Never,
                    InferrableTypesFlags {
                        parameters: Some(true),
                        properties: Some(true),
                        ..Default::default()
                    },
                )),
                ..Default::default()
            }),
            ..Default::default()
        };
        let rules = Resolver::default()
            .resolve_blocking(config)
            .unwrap()
            .rule_set
            .rules_for("src/a.ts");
        let typedef = &rules["@typescript-eslint/typedef"];
        assert_eq!(typedef[1]["variableDeclaration"], json!(true));
        assert_eq!(rules["@typescript-eslint/no-inferrable-types"], json!("off"));
    }

    #[test]
    fn test_ecma_version_values() {
        assert_eq!(ecma_version_value(EcmaVersion::Latest), json!("latest"));
        assert_eq!(ecma_version_value(EcmaVersion::Version(2020)), json!(2020));
    }
}
