//! Property-based tests for configuration system.

use super::merger::ConfigMerger;
use super::schema::{
    Config, EcmaVersion, EnvironmentOptions, IndentStyle, InferrableTypes, InferrableTypesFlags,
    InferrableTypesTag, QuoteStyle, SemicolonStyle, StyleOptions, TsconfigSetting,
};
use super::validator::ConfigValidator;
use proptest::prelude::*;
use std::collections::BTreeMap;
use std::path::PathBuf;

fn tag_strategy() -> impl Strategy<Value = InferrableTypesTag> {
    prop_oneof![
        Just(InferrableTypesTag::Never),
        Just(InferrableTypesTag::Always),
        Just(InferrableTypesTag::TsNever),
        Just(InferrableTypesTag::JsNever),
    ]
}

fn inferrable_strategy() -> impl Strategy<Value = InferrableTypes> {
    prop_oneof![
        tag_strategy().prop_map(InferrableTypes::Bare),
        (
            tag_strategy(),
            prop::option::of(any::<bool>()),
            prop::option::of(any::<bool>()),
            prop::option::of(any::<bool>()),
        )
            .prop_map(|(tag, parameters, properties, return_values)| {
                InferrableTypes::Detailed(
                    tag,
                    InferrableTypesFlags {
                        parameters,
                        properties,
                        return_values,
                    },
                )
            }),
    ]
}

fn style_strategy() -> impl Strategy<Value = StyleOptions> {
    (
        prop::option::of(prop_oneof![Just(IndentStyle::Tab), Just(IndentStyle::Space)]),
        prop::option::of(prop_oneof![Just(QuoteStyle::Single), Just(QuoteStyle::Double)]),
        prop::option::of(prop_oneof![
            Just(SemicolonStyle::Never),
            Just(SemicolonStyle::Always)
        ]),
        prop::option::of(inferrable_strategy()),
    )
        .prop_map(|(indent, quotes, semi, inferrable_types)| StyleOptions {
            indent,
            quotes,
            semi,
            inferrable_types,
        })
}

fn environment_strategy() -> impl Strategy<Value = EnvironmentOptions> {
    (
        prop::option::of(any::<bool>()),
        prop::option::of(any::<bool>()),
        prop::option::of(any::<bool>()),
        prop::option::of(prop_oneof![
            Just(EcmaVersion::Latest),
            (2015u16..=2026).prop_map(EcmaVersion::Version),
        ]),
        prop::option::of(prop::collection::btree_map(
            "[A-Za-z_$][A-Za-z0-9_$]{0,8}",
            any::<bool>(),
            0..4,
        )),
    )
        .prop_map(|(node, deno, browser, ecma_version, custom_globals)| {
            EnvironmentOptions {
                node,
                deno,
                browser,
                ecma_version,
                custom_globals,
            }
        })
}

fn tsconfig_strategy() -> impl Strategy<Value = TsconfigSetting> {
    prop_oneof![
        any::<bool>().prop_map(TsconfigSetting::Enabled),
        "[a-z]{1,8}\\.json".prop_map(|p| TsconfigSetting::Path(PathBuf::from(p))),
        prop::collection::vec("[a-z]{1,8}\\.json", 1..3)
            .prop_map(|p| TsconfigSetting::Paths(p.into_iter().map(PathBuf::from).collect())),
    ]
}

// Configs without overrides
fn config_strategy() -> impl Strategy<Value = Config> {
    (
        prop::option::of(tsconfig_strategy()),
        prop::option::of(any::<bool>()),
        prop::option::of("/[a-z]{1,8}".prop_map(PathBuf::from)),
        prop::option::of(environment_strategy()),
        prop::option::of(style_strategy()),
    )
        .prop_map(|(tsconfig, strict, root_dir, environment, options)| Config {
            tsconfig,
            strict,
            root_dir,
            environment,
            options,
            overrides: None,
        })
}

fn merged(low: &Config, high: &Config) -> Config {
    let mut result = low.clone();
    ConfigMerger::merge_into(&mut result, high);
    result
}

proptest! {
    #![proptest_config(ProptestConfig {
        cases: 2000,
        .. ProptestConfig::default()
    })]

    // Higher precedence scalars win when set, otherwise lower ones persist
    #[test]
    fn config_merge_higher_precedence_wins(low in config_strategy(), high in config_strategy()) {
        let result = merged(&low, &high);

        prop_assert_eq!(&result.strict, if high.strict.is_some() { &high.strict } else { &low.strict });
        prop_assert_eq!(&result.root_dir, if high.root_dir.is_some() { &high.root_dir } else { &low.root_dir });
        prop_assert_eq!(&result.tsconfig, if high.tsconfig.is_some() { &high.tsconfig } else { &low.tsconfig });
    }

    // Empty config is identity element for merge, on either side
    #[test]
    fn config_merge_identity(config in config_strategy()) {
        prop_assert_eq!(&merged(&config, &Config::default()), &config);
        prop_assert_eq!(&merged(&Config::default(), &config), &config);
    }

    // Merging is associative
    #[test]
    fn config_merge_associative(
        a in config_strategy(),
        b in config_strategy(),
        c in config_strategy()
    ) {
        let left = merged(&merged(&a, &b), &c);
        let right = merged(&a, &merged(&b, &c));
        prop_assert_eq!(left, right);
    }

    // Custom globals only ever accumulate
    #[test]
    fn custom_globals_accumulate(low in environment_strategy(), high in environment_strategy()) {
        let low_config = Config { environment: Some(low.clone()), ..Default::default() };
        let high_config = Config { environment: Some(high.clone()), ..Default::default() };
        let result = merged(&low_config, &high_config);
        let globals = result
            .environment
            .and_then(|env| env.custom_globals)
            .unwrap_or_default();

        let empty = BTreeMap::new();
        for name in low.custom_globals.as_ref().unwrap_or(&empty).keys() {
            prop_assert!(globals.contains_key(name));
        }
        for (name, writable) in high.custom_globals.as_ref().unwrap_or(&empty) {
            prop_assert_eq!(globals.get(name), Some(writable));
        }
    }

    // Generated configs are valid and survive a YAML round trip
    #[test]
    fn generated_configs_validate_and_reparse(config in config_strategy()) {
        prop_assert!(ConfigValidator::validate(&config).is_ok());

        let yaml = serde_yaml::to_string(&config).unwrap();
        let reparsed: Config = serde_yaml::from_str(&yaml).unwrap();
        prop_assert_eq!(reparsed, config);
    }
}
