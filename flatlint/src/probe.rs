//! Global-binding probes used for runtime environment detection.
//!
//! The resolver never inspects its host directly. Instead it is handed a
//! [`GlobalProbe`] that answers "does identifier X exist as a global binding"
//! for the platform the generated configuration targets.

use std::collections::BTreeSet;

/// Name of the browser window global.
pub const WINDOW: &str = "window";
/// Name of the Node.js process global.
pub const PROCESS: &str = "process";
/// Name of the CommonJS `require` function.
pub const REQUIRE: &str = "require";
/// Name of the Deno namespace global.
pub const DENO: &str = "Deno";

/// Answers whether a global binding exists on the target platform.
///
/// # Examples
///
/// ```
/// use flatlint::probe::{GlobalProbe, StaticProbe};
///
/// let probe = StaticProbe::new(["window"]);
/// assert!(probe.has_global("window"));
/// assert!(!probe.has_global("process"));
///
/// // Closures work too
/// let probe = |name: &str| name == "Deno";
/// assert!(probe.has_global("Deno"));
/// ```
#[cfg_attr(test, mockall::automock)]
pub trait GlobalProbe {
    /// Returns true if `name` is a global binding.
    fn has_global(&self, name: &str) -> bool;
}

impl<F> GlobalProbe for F
where
    F: Fn(&str) -> bool,
{
    fn has_global(&self, name: &str) -> bool {
        self(name)
    }
}

/// A probe backed by a fixed set of global names.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct StaticProbe {
    globals: BTreeSet<String>,
}

impl StaticProbe {
    /// Create a probe reporting exactly the given globals.
    pub fn new<I, S>(globals: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            globals: globals.into_iter().map(Into::into).collect(),
        }
    }

    /// Probe for a typical Node.js host.
    #[must_use]
    pub fn node() -> Self {
        Self::new([PROCESS, REQUIRE])
    }

    /// Probe for a typical Deno host.
    #[must_use]
    pub fn deno() -> Self {
        Self::new([DENO])
    }

    /// Probe for a typical browser host.
    #[must_use]
    pub fn browser() -> Self {
        Self::new([WINDOW])
    }

    /// Add a global name.
    #[must_use]
    pub fn with_global(mut self, name: impl Into<String>) -> Self {
        self.globals.insert(name.into());
        self
    }

    /// Iterate the names this probe reports.
    pub fn globals(&self) -> impl Iterator<Item = &str> {
        self.globals.iter().map(String::as_str)
    }
}

impl GlobalProbe for StaticProbe {
    fn has_global(&self, name: &str) -> bool {
        self.globals.contains(name)
    }
}

/// A probe for a bare ECMAScript host where no platform globals exist.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct BareProbe;

impl GlobalProbe for BareProbe {
    fn has_global(&self, _name: &str) -> bool {
        false
    }
}
