//! Configuration resolution.
//!
//! [`Resolver::resolve`] turns a partial [`Config`] into a [`ResolvedConfig`]:
//! validation, defaulting, environment inference, base fragment generation
//! and override application, in that order. Resolution either fully succeeds
//! or fails with a single error.

use std::path::{Path, PathBuf};

use serde::Serialize;

use crate::compat::CompatShim;
use crate::config::{Config, ConfigValidator, TsconfigSetting};
use crate::environment::ResolvedEnvironment;
use crate::error::Result;
use crate::fragment::RuleSet;
use crate::generate;
use crate::path::resolve_against;
use crate::probe::{BareProbe, GlobalProbe};
use crate::style::ResolvedStyle;

/// Where the TypeScript project configuration comes from.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub enum TsconfigResolved {
    /// No type information.
    Disabled,
    /// Let the parser find the nearest tsconfig.
    Auto,
    /// Explicit tsconfig files, anchored to the root directory.
    Paths(Vec<PathBuf>),
}

impl TsconfigResolved {
    /// Whether type information is enabled at all.
    #[must_use]
    pub fn is_enabled(&self) -> bool {
        !matches!(self, Self::Disabled)
    }
}

/// A fully defaulted configuration and the rule set it produces.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ResolvedConfig {
    /// Type-config location.
    pub tsconfig: TsconfigResolved,
    /// Strict mode.
    pub strict: bool,
    /// Base directory.
    pub root_dir: PathBuf,
    /// Environment after inference.
    pub environment: ResolvedEnvironment,
    /// Style after defaulting.
    pub style: ResolvedStyle,
    /// Generated fragments followed by override fragments.
    pub rule_set: RuleSet,
}

/// Resolves configurations against a fixed global probe.
///
/// # Examples
///
/// ```
/// use flatlint::{Config, Resolver};
/// use flatlint::probe::StaticProbe;
///
/// let resolver = Resolver::new(StaticProbe::node());
/// let resolved = resolver.resolve_blocking(Config::default()).unwrap();
/// assert!(resolved.environment.node);
/// assert!(!resolved.strict);
/// ```
#[derive(Debug, Clone)]
pub struct Resolver<P = BareProbe> {
    probe: P,
    default_root: PathBuf,
}

impl Default for Resolver<BareProbe> {
    fn default() -> Self {
        Self::new(BareProbe)
    }
}

impl<P: GlobalProbe> Resolver<P> {
    /// Create a resolver consulting `probe` for environment inference.
    pub fn new(probe: P) -> Self {
        Self {
            probe,
            default_root: PathBuf::from("."),
        }
    }

    /// Set the root directory used when a config has no `rootDir`.
    #[must_use]
    pub fn with_default_root(mut self, root: impl Into<PathBuf>) -> Self {
        self.default_root = root.into();
        self
    }

    /// The root directory used when a config has no `rootDir`.
    pub fn default_root(&self) -> &Path {
        &self.default_root
    }

    /// Resolve `config`.
    ///
    /// The returned future completes after the overrides hook, if any, has
    /// settled. The hook is never invoked for a config that fails
    /// validation.
    ///
    /// # Errors
    ///
    /// Returns [`crate::Error::Validation`] for malformed values,
    /// [`crate::Error::InvalidPath`] for unresolvable paths, and
    /// [`crate::Error::Overrides`] when the hook fails.
    pub async fn resolve(&self, config: Config) -> Result<ResolvedConfig> {
        ConfigValidator::validate(&config)?;

        let Config {
            tsconfig,
            strict,
            root_dir,
            environment,
            options,
            overrides,
        } = config;

        let strict = strict.unwrap_or(false);
        let root_dir = match root_dir {
            Some(dir) => resolve_against(&self.default_root, &dir)?,
            None => self.default_root.clone(),
        };
        let tsconfig = resolve_tsconfig(tsconfig, &root_dir)?;
        let environment = ResolvedEnvironment::resolve(environment, &self.probe);
        let style = ResolvedStyle::resolve(options, strict);

        let mut resolved = ResolvedConfig {
            tsconfig,
            strict,
            root_dir,
            environment,
            style,
            rule_set: RuleSet::new(),
        };
        let base = generate::base_fragments(&resolved);
        log::debug!("Generated {} base fragments", base.len());
        resolved.rule_set.extend(base);

        if let Some(overrides) = overrides {
            let compat = CompatShim::new(&resolved.root_dir);
            let produced = overrides.produce(compat).await?;
            log::debug!("Appending {} override fragments", produced.len());
            resolved.rule_set.extend(produced);
        }

        Ok(resolved)
    }

    /// Resolve `config`, blocking the current thread until done.
    ///
    /// # Errors
    ///
    /// Same as [`Resolver::resolve`].
    pub fn resolve_blocking(&self, config: Config) -> Result<ResolvedConfig> {
        futures::executor::block_on(self.resolve(config))
    }
}

fn resolve_tsconfig(setting: Option<TsconfigSetting>, root_dir: &Path) -> Result<TsconfigResolved> {
    let paths = match setting {
        None | Some(TsconfigSetting::Enabled(false)) => return Ok(TsconfigResolved::Disabled),
        Some(TsconfigSetting::Enabled(true)) => return Ok(TsconfigResolved::Auto),
        Some(TsconfigSetting::Path(path)) => vec![path],
        Some(TsconfigSetting::Paths(paths)) => paths,
    };
    paths
        .iter()
        .map(|path| resolve_against(root_dir, path))
        .collect::<Result<Vec<_>>>()
        .map(TsconfigResolved::Paths)
}
