//! Folding configuration layers together.

use crate::config::loader::ConfigSource;
use crate::config::schema::{Config, EnvironmentOptions, StyleOptions};
use crate::overrides::Overrides;

/// Stacks [`Config`] layers.
///
/// ```
/// use flatlint::config::{Config, ConfigMerger};
///
/// let low = Config { strict: Some(false), ..Default::default() };
/// let high = Config { strict: Some(true), ..Default::default() };
///
/// let mut result = low;
/// ConfigMerger::merge_into(&mut result, &high);
/// assert_eq!(result.strict, Some(true));
/// ```
pub struct ConfigMerger;

impl ConfigMerger {
    /// Fold `sources`, given weakest first, onto an empty config.
    #[must_use]
    pub fn merge(sources: Vec<ConfigSource>) -> Config {
        let mut result = Config::default();

        for source in sources {
            Self::merge_into(&mut result, &source.config);
        }

        result
    }

    /// Lay `source` over `target`.
    ///
    /// Set scalars replace. Environment and style options merge per field.
    /// `customGlobals` is a union where `source` wins per name. Fragment
    /// lists append; a hook on either side replaces the whole value.
    pub fn merge_into(target: &mut Config, source: &Config) {
        if source.tsconfig.is_some() {
            target.tsconfig.clone_from(&source.tsconfig);
        }

        if source.strict.is_some() {
            target.strict = source.strict;
        }

        if source.root_dir.is_some() {
            target.root_dir.clone_from(&source.root_dir);
        }

        if let Some(ref source_env) = source.environment {
            target.environment = Some(match target.environment.take() {
                Some(target_env) => Self::merge_environment(target_env, source_env),
                None => source_env.clone(),
            });
        }

        if let Some(ref source_options) = source.options {
            target.options = Some(match &target.options {
                Some(target_options) => Self::merge_style(target_options, source_options),
                None => source_options.clone(),
            });
        }

        if let Some(ref source_overrides) = source.overrides {
            target.overrides = Some(match (target.overrides.take(), source_overrides) {
                (Some(Overrides::Fragments(mut existing)), Overrides::Fragments(added)) => {
                    existing.extend(added.iter().cloned());
                    Overrides::Fragments(existing)
                }
                _ => source_overrides.clone(),
            });
        }
    }

    fn merge_environment(
        mut target: EnvironmentOptions,
        source: &EnvironmentOptions,
    ) -> EnvironmentOptions {
        let custom_globals = match (target.custom_globals.take(), &source.custom_globals) {
            (Some(mut existing), Some(added)) => {
                existing.extend(added.iter().map(|(k, v)| (k.clone(), *v)));
                Some(existing)
            }
            (existing, added) => added.clone().or(existing),
        };

        EnvironmentOptions {
            node: source.node.or(target.node),
            deno: source.deno.or(target.deno),
            browser: source.browser.or(target.browser),
            ecma_version: source.ecma_version.or(target.ecma_version),
            custom_globals,
        }
    }

    // `inferrableTypes` is replaced whole, never merged flag by flag.
    fn merge_style(target: &StyleOptions, source: &StyleOptions) -> StyleOptions {
        StyleOptions {
            indent: source.indent.or(target.indent),
            quotes: source.quotes.or(target.quotes),
            semi: source.semi.or(target.semi),
            inferrable_types: source.inferrable_types.or(target.inferrable_types),
        }
    }
}
