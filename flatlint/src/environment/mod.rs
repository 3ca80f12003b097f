//! Runtime environment detection and global-binding resolution.
//!
//! When a configuration says nothing about its environment, the target
//! runtime is inferred once from a [`GlobalProbe`]. Flags then select global
//! tables, and `customGlobals` are layered on top without ever replacing a
//! flag-derived entry.

pub mod globals;

use std::collections::BTreeMap;
use std::fmt;

use serde::{Deserialize, Serialize};

use crate::config::{EcmaVersion, EnvironmentOptions};
use crate::fragment::{GlobalAccess, Globals};
use crate::probe::{GlobalProbe, DENO, PROCESS, REQUIRE, WINDOW};

/// A runtime the resolver can infer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RuntimeEnvironment {
    /// Node.js: `process` and `require` exist, `window` does not.
    Node,
    /// Deno: `Deno` exists, `window` does not.
    Deno,
    /// A browser: `window` exists.
    Browser,
    /// Bare ECMAScript: none of the above.
    Bare,
}

impl fmt::Display for RuntimeEnvironment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Node => "node",
            Self::Deno => "deno",
            Self::Browser => "browser",
            Self::Bare => "bare",
        };
        write!(f, "{name}")
    }
}

/// Infer the runtime from global bindings. The first matching rule wins.
///
/// # Examples
///
/// ```
/// use flatlint::environment::{detect, RuntimeEnvironment};
/// use flatlint::probe::StaticProbe;
///
/// assert_eq!(detect(&StaticProbe::node()), RuntimeEnvironment::Node);
/// assert_eq!(detect(&StaticProbe::new(["window", "Deno"])), RuntimeEnvironment::Browser);
/// ```
pub fn detect<P: GlobalProbe + ?Sized>(probe: &P) -> RuntimeEnvironment {
    let window = probe.has_global(WINDOW);

    if !window && probe.has_global(PROCESS) && probe.has_global(REQUIRE) {
        RuntimeEnvironment::Node
    } else if !window && probe.has_global(DENO) {
        RuntimeEnvironment::Deno
    } else if window {
        RuntimeEnvironment::Browser
    } else {
        RuntimeEnvironment::Bare
    }
}

/// Environment settings after defaulting and inference.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ResolvedEnvironment {
    /// Node.js globals enabled.
    pub node: bool,
    /// Deno globals enabled.
    pub deno: bool,
    /// Browser globals enabled.
    pub browser: bool,
    /// ECMAScript version to parse.
    pub ecma_version: EcmaVersion,
    /// User globals, name to writable.
    pub custom_globals: BTreeMap<String, bool>,
    /// The inferred runtime, when inference ran.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub detected: Option<RuntimeEnvironment>,
}

impl ResolvedEnvironment {
    /// Resolve explicit options, or infer from `probe` when they are absent.
    ///
    /// The probe is consulted only when `options` is `None` or entirely unset.
    pub fn resolve<P: GlobalProbe + ?Sized>(options: Option<EnvironmentOptions>, probe: &P) -> Self {
        match options.filter(|options| !options.is_unset()) {
            Some(options) => Self {
                node: options.node.unwrap_or(false),
                deno: options.deno.unwrap_or(false),
                browser: options.browser.unwrap_or(false),
                ecma_version: options.ecma_version.unwrap_or_default(),
                custom_globals: options.custom_globals.unwrap_or_default(),
                detected: None,
            },
            None => {
                let runtime = detect(probe);
                log::debug!("Inferred runtime environment: {runtime}");
                Self::for_runtime(runtime)
            }
        }
    }

    /// Flags for a known runtime, with defaults everywhere else.
    #[must_use]
    pub fn for_runtime(runtime: RuntimeEnvironment) -> Self {
        Self {
            node: runtime == RuntimeEnvironment::Node,
            deno: runtime == RuntimeEnvironment::Deno,
            browser: runtime == RuntimeEnvironment::Browser,
            ecma_version: EcmaVersion::Latest,
            custom_globals: BTreeMap::new(),
            detected: Some(runtime),
        }
    }

    /// Globals selected by the `node`, `deno` and `browser` flags.
    #[must_use]
    pub fn flag_globals(&self) -> Globals {
        let mut result = Globals::new();
        if self.node {
            result.extend(globals::node());
        }
        if self.deno {
            result.extend(globals::deno());
        }
        if self.browser {
            result.extend(globals::browser());
        }
        result
    }

    /// Flag globals plus custom globals.
    #[must_use]
    pub fn globals(&self) -> Globals {
        merge_globals(self.flag_globals(), &self.custom_globals)
    }
}

impl Default for ResolvedEnvironment {
    fn default() -> Self {
        Self::for_runtime(RuntimeEnvironment::Bare)
    }
}

/// Layer custom globals over flag globals.
///
/// A custom entry is only inserted when the name is not already present, so
/// it can neither remove a flag global nor change its writability.
///
/// # Examples
///
/// ```
/// use std::collections::BTreeMap;
/// use flatlint::environment::{globals, merge_globals};
/// use flatlint::fragment::GlobalAccess;
///
/// let custom = BTreeMap::from([("process".to_string(), true), ("APP".to_string(), true)]);
/// let merged = merge_globals(globals::node(), &custom);
/// assert_eq!(merged["process"], GlobalAccess::Readonly);
/// assert_eq!(merged["APP"], GlobalAccess::Writable);
/// ```
#[must_use]
pub fn merge_globals(mut flags: Globals, custom: &BTreeMap<String, bool>) -> Globals {
    for (name, writable) in custom {
        flags
            .entry(name.clone())
            .or_insert_with(|| GlobalAccess::from_writable(*writable));
    }
    flags
}
