//! Final-stage rule customization.
//!
//! Overrides are either a fixed list of fragments or a hook that produces
//! fragments, synchronously or asynchronously, from a [`CompatShim`]. Either
//! way the produced fragments are appended after the generated base rule
//! set, so they win on every rule key they touch.

use std::fmt;
use std::future::Future;
use std::sync::Arc;

use futures::future::{self, BoxFuture, FutureExt};
use serde::ser::Error as _;
use serde::{Deserialize, Deserializer, Serialize, Serializer};

use crate::compat::CompatShim;
use crate::error::{Error, Result};
use crate::fragment::RuleSetFragment;

/// Error type returned by an overrides hook.
///
/// Any error type that is `Send + Sync` converts into it with `?` or `.into()`.
pub type HookError = Box<dyn std::error::Error + Send + Sync>;

/// Future returned by [`OverridesHook::produce`].
pub type HookFuture = BoxFuture<'static, std::result::Result<Vec<RuleSetFragment>, HookError>>;

/// Produces override fragments.
///
/// Implement this directly for hooks that carry state, or use
/// [`Overrides::from_fn`] and [`Overrides::from_async`] for closures.
pub trait OverridesHook: Send + Sync {
    /// Produce the fragments to append after the base rule set.
    fn produce(&self, compat: CompatShim) -> HookFuture;
}

struct SyncHook<F>(F);

impl<F> OverridesHook for SyncHook<F>
where
    F: Fn(&CompatShim) -> std::result::Result<Vec<RuleSetFragment>, HookError> + Send + Sync,
{
    fn produce(&self, compat: CompatShim) -> HookFuture {
        future::ready((self.0)(&compat)).boxed()
    }
}

struct AsyncHook<F>(F);

impl<F, Fut> OverridesHook for AsyncHook<F>
where
    F: Fn(CompatShim) -> Fut + Send + Sync,
    Fut: Future<Output = std::result::Result<Vec<RuleSetFragment>, HookError>> + Send + 'static,
{
    fn produce(&self, compat: CompatShim) -> HookFuture {
        (self.0)(compat).boxed()
    }
}

/// Override fragments, or a hook that produces them.
///
/// # Examples
///
/// ```
/// use flatlint::overrides::Overrides;
/// use flatlint::fragment::RuleSetFragment;
/// use serde_json::json;
///
/// let fixed = Overrides::fragments(vec![
///     RuleSetFragment::named("local").with_rule("no-console", json!("off")),
/// ]);
/// assert!(!fixed.is_hook());
///
/// let hook = Overrides::from_fn(|compat| {
///     Ok(vec![compat.rules([("semi", json!(["error", "always"]))])])
/// });
/// assert!(hook.is_hook());
/// ```
#[derive(Clone)]
pub enum Overrides {
    /// Fragments appended as-is.
    Fragments(Vec<RuleSetFragment>),
    /// A hook invoked once per resolution.
    Hook(Arc<dyn OverridesHook>),
}

impl Overrides {
    /// Fixed override fragments.
    #[must_use]
    pub fn fragments(fragments: Vec<RuleSetFragment>) -> Self {
        Self::Fragments(fragments)
    }

    /// Wrap a synchronous closure.
    pub fn from_fn<F>(hook: F) -> Self
    where
        F: Fn(&CompatShim) -> std::result::Result<Vec<RuleSetFragment>, HookError>
            + Send
            + Sync
            + 'static,
    {
        Self::Hook(Arc::new(SyncHook(hook)))
    }

    /// Wrap a closure returning a future. Resolution completes only once the
    /// future settles.
    pub fn from_async<F, Fut>(hook: F) -> Self
    where
        F: Fn(CompatShim) -> Fut + Send + Sync + 'static,
        Fut: Future<Output = std::result::Result<Vec<RuleSetFragment>, HookError>>
            + Send
            + 'static,
    {
        Self::Hook(Arc::new(AsyncHook(hook)))
    }

    /// Wrap a hook implementation.
    pub fn hook(hook: impl OverridesHook + 'static) -> Self {
        Self::Hook(Arc::new(hook))
    }

    /// Whether this is the hook form.
    #[must_use]
    pub fn is_hook(&self) -> bool {
        matches!(self, Self::Hook(_))
    }

    /// Produce the override fragments.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Overrides`] carrying the hook's own error.
    pub async fn produce(&self, compat: CompatShim) -> Result<Vec<RuleSetFragment>> {
        match self {
            Self::Fragments(fragments) => Ok(fragments.clone()),
            Self::Hook(hook) => hook.produce(compat).await.map_err(Error::Overrides),
        }
    }
}

impl fmt::Debug for Overrides {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Fragments(fragments) => f.debug_tuple("Fragments").field(fragments).finish(),
            Self::Hook(_) => f.write_str("Hook(..)"),
        }
    }
}

impl PartialEq for Overrides {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (Self::Fragments(a), Self::Fragments(b)) => a == b,
            (Self::Hook(a), Self::Hook(b)) => Arc::ptr_eq(a, b),
            _ => false,
        }
    }
}

impl From<Vec<RuleSetFragment>> for Overrides {
    fn from(fragments: Vec<RuleSetFragment>) -> Self {
        Self::Fragments(fragments)
    }
}

impl Serialize for Overrides {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        match self {
            Self::Fragments(fragments) => fragments.serialize(serializer),
            Self::Hook(_) => Err(S::Error::custom("an overrides hook cannot be serialized")),
        }
    }
}

impl<'de> Deserialize<'de> for Overrides {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> std::result::Result<Self, D::Error> {
        Vec::<RuleSetFragment>::deserialize(deserializer).map(Self::Fragments)
    }
}
