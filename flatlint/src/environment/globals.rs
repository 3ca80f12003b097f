//! Global binding tables per runtime.
//!
//! ECMAScript builtins are implied by `ecmaVersion` and are not listed here.

use crate::fragment::{GlobalAccess, Globals};

/// Globals shared by Node.js, Deno and browsers.
pub const SHARED: &[&str] = &[
    "AbortController",
    "AbortSignal",
    "Blob",
    "BroadcastChannel",
    "Event",
    "EventTarget",
    "FormData",
    "Headers",
    "MessageChannel",
    "MessageEvent",
    "MessagePort",
    "Request",
    "Response",
    "TextDecoder",
    "TextEncoder",
    "URL",
    "URLSearchParams",
    "WebAssembly",
    "clearInterval",
    "clearTimeout",
    "console",
    "crypto",
    "fetch",
    "performance",
    "queueMicrotask",
    "setInterval",
    "setTimeout",
    "structuredClone",
];

/// Node.js-only globals. CommonJS module globals are in [`COMMONJS`].
pub const NODE: &[&str] = &["Buffer", "clearImmediate", "global", "process", "setImmediate"];

/// Web-platform globals available in browsers and Deno.
pub const WEB_PLATFORM: &[&str] = &[
    "CustomEvent",
    "File",
    "FileReader",
    "WebSocket",
    "Worker",
    "alert",
    "atob",
    "btoa",
    "caches",
    "confirm",
    "localStorage",
    "location",
    "navigator",
    "prompt",
    "self",
    "sessionStorage",
];

/// DOM globals available only in browsers.
pub const DOM: &[&str] = &[
    "Element",
    "HTMLElement",
    "IntersectionObserver",
    "MutationObserver",
    "Node",
    "ResizeObserver",
    "XMLHttpRequest",
    "cancelAnimationFrame",
    "customElements",
    "document",
    "getComputedStyle",
    "history",
    "indexedDB",
    "matchMedia",
    "requestAnimationFrame",
    "window",
];

/// The Deno namespace.
pub const DENO: &[&str] = &["Deno"];

/// CommonJS module-scope bindings, writable where Node.js allows reassignment.
pub const COMMONJS: &[(&str, GlobalAccess)] = &[
    ("__dirname", GlobalAccess::Readonly),
    ("__filename", GlobalAccess::Readonly),
    ("exports", GlobalAccess::Writable),
    ("module", GlobalAccess::Readonly),
    ("require", GlobalAccess::Readonly),
];

/// Insert every name as a readonly global.
pub fn extend_readonly(globals: &mut Globals, names: &[&str]) {
    for name in names {
        globals.insert((*name).to_string(), GlobalAccess::Readonly);
    }
}

/// Node.js globals.
#[must_use]
pub fn node() -> Globals {
    let mut globals = Globals::new();
    extend_readonly(&mut globals, SHARED);
    extend_readonly(&mut globals, NODE);
    globals
}

/// Browser globals.
#[must_use]
pub fn browser() -> Globals {
    let mut globals = Globals::new();
    extend_readonly(&mut globals, SHARED);
    extend_readonly(&mut globals, WEB_PLATFORM);
    extend_readonly(&mut globals, DOM);
    globals
}

/// Deno globals.
#[must_use]
pub fn deno() -> Globals {
    let mut globals = Globals::new();
    extend_readonly(&mut globals, SHARED);
    extend_readonly(&mut globals, WEB_PLATFORM);
    extend_readonly(&mut globals, DENO);
    globals
}

/// CommonJS module globals.
#[must_use]
pub fn commonjs() -> Globals {
    COMMONJS
        .iter()
        .map(|(name, access)| ((*name).to_string(), *access))
        .collect()
}

/// Globals shared by Node.js and browsers.
#[must_use]
pub fn shared() -> Globals {
    let mut globals = Globals::new();
    extend_readonly(&mut globals, SHARED);
    globals
}
