#![deny(missing_docs, unsafe_code, rustdoc::broken_intra_doc_links)]
#![warn(clippy::all, clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]

//! # flatlint
//!
//! A resolver for opinionated JavaScript/TypeScript linter presets.
//!
//! A partial [`Config`] (type-config location, strictness, root directory,
//! runtime environment, style preferences and overrides) is resolved into a
//! [`ResolvedConfig`]: every default applied, the runtime inferred when left
//! unspecified, and an ordered flat-config [`RuleSet`] in which user
//! overrides come last and win per rule key.
//!
//! ## Core Types
//!
//! - [`Config`] and [`ConfigBuilder`]: user configuration and its layered loading
//! - [`Resolver`] and [`ResolvedConfig`]: resolution and its result
//! - [`RuleSet`] and [`RuleSetFragment`]: flat-config output
//! - [`GlobalProbe`]: runtime detection input
//! - [`Overrides`] and [`CompatShim`]: final-stage customization
//! - [`Error`] and [`Result`]: the single failure type
//! - [`Logger`] and [`LogLevel`]: stderr diagnostics for the binary
//!
//! ## Examples
//!
//! ```
//! use flatlint::{Config, Overrides, Resolver, RuleSetFragment};
//! use flatlint::probe::StaticProbe;
//! use serde_json::json;
//!
//! let config = Config {
//!     strict: Some(true),
//!     overrides: Some(Overrides::fragments(vec![
//!         RuleSetFragment::named("local").with_rule("semi", json!(["error", "always"])),
//!     ])),
//!     ..Default::default()
//! };
//!
//! let resolved = Resolver::new(StaticProbe::browser())
//!     .resolve_blocking(config)
//!     .unwrap();
//!
//! assert!(resolved.environment.browser);
//! assert_eq!(resolved.rule_set.effective_rules()["semi"], json!(["error", "always"]));
//! ```

pub mod compat;
pub mod config;
pub mod environment;
pub mod error;
pub mod fragment;
pub mod generate;
pub mod logging;
pub mod output;
pub mod overrides;
pub mod path;
pub mod probe;
pub mod resolver;
pub mod style;

pub use compat::{CompatShim, LegacyConfig};
pub use config::{Config, ConfigBuilder};
pub use environment::{ResolvedEnvironment, RuntimeEnvironment};
pub use error::{Error, Result};
pub use fragment::{RuleSet, RuleSetFragment};
pub use logging::{init_logger, LogLevel, Logger};
pub use output::{OutputFormat, OutputFormatter};
pub use overrides::{HookError, Overrides, OverridesHook};
pub use probe::{BareProbe, GlobalProbe, StaticProbe};
pub use resolver::{ResolvedConfig, Resolver, TsconfigResolved};
pub use style::{InferrablePolicy, PositionPolicy, ResolvedStyle};
