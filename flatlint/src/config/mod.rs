//! Layered `flatlint` settings.
//!
//! A [`Config`] is the partial input to [`crate::Resolver`]: every field is
//! optional so layers can be stacked. Layers apply weakest first, each one
//! overwriting what it sets:
//!
//! | layer | source |
//! |-------|--------|
//! | user | `~/.flatlint/config.yaml` |
//! | project | nearest `flatlint.yaml` |
//! | local | `flatlint.local.yaml` next to it |
//! | environment | `FLATLINT_*` variables |
//! | programmatic | [`ConfigBuilder::with_config`] |
//!
//! `customGlobals` maps and override fragment lists accumulate across
//! layers instead of being replaced. Defaults are left to the
//! [`crate::Resolver`].
//!
//! # Examples
//!
//! Settings for a checkout:
//!
//! ```no_run
//! use flatlint::config::ConfigBuilder;
//! use std::path::Path;
//!
//! let config = ConfigBuilder::new()
//!     .with_working_dir(Path::new("/path/to/project"))
//!     .build()
//!     .unwrap();
//! ```
//!
//! Only in-memory settings:
//!
//! ```
//! use flatlint::config::{Config, ConfigBuilder, StyleOptions, SemicolonStyle};
//!
//! let custom = Config {
//!     options: Some(StyleOptions {
//!         semi: Some(SemicolonStyle::Always),
//!         ..Default::default()
//!     }),
//!     ..Default::default()
//! };
//!
//! let config = ConfigBuilder::new()
//!     .skip_files()
//!     .skip_env()
//!     .with_working_dir("/repo")
//!     .with_config(custom)
//!     .build()
//!     .unwrap();
//!
//! assert_eq!(config.options.unwrap().semi, Some(SemicolonStyle::Always));
//! ```

pub mod builder;
pub mod env_vars;
pub mod loader;
pub mod merger;
pub mod schema;
pub mod validator;

#[cfg(test)]
mod proptests;

pub use builder::ConfigBuilder;
pub use env_vars::EnvVarOverrides;
pub use loader::{default_data_dir, ConfigLoader, ConfigSource, SourceKind};
pub use merger::ConfigMerger;
pub use schema::{
    Config, EcmaVersion, EnvironmentOptions, IndentStyle, InferrableTypes, InferrableTypesFlags,
    InferrableTypesTag, QuoteStyle, SemicolonStyle, StyleOptions, TsconfigSetting,
};
pub use validator::ConfigValidator;
