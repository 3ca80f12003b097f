//! Lexical path resolution for `rootDir` and tsconfig entries.
//!
//! Nothing here touches the filesystem. Configured paths may not exist yet,
//! and symlinks are left alone so the generated `tsconfigRootDir` reads the
//! way the user wrote it.

use std::ffi::OsStr;
use std::path::{Component, Path, PathBuf};

use crate::error::{Error, Result};

fn invalid(path: &Path, reason: &str) -> Error {
    Error::InvalidPath {
        path: path.to_path_buf(),
        reason: reason.to_string(),
    }
}

/// Replace a leading `~` component with the home directory.
///
/// `~name` forms are rejected rather than looked up.
///
/// # Errors
///
/// Returns [`Error::InvalidPath`] for `~name` or when the home directory is
/// unknown.
///
/// ```
/// use flatlint::path::expand_tilde;
/// use std::path::Path;
///
/// let tsconfig = expand_tilde(Path::new("~/work/tsconfig.json")).unwrap();
/// assert!(tsconfig.is_absolute());
/// assert!(expand_tilde(Path::new("~alice/tsconfig.json")).is_err());
/// assert_eq!(expand_tilde(Path::new("tsconfig.json")).unwrap(), Path::new("tsconfig.json"));
/// ```
pub fn expand_tilde(path: &Path) -> Result<PathBuf> {
    let mut components = path.components();
    match components.next() {
        Some(Component::Normal(first)) if first == "~" => {
            let home = home::home_dir().ok_or_else(|| invalid(path, "home directory is unknown"))?;
            let rest = components.as_path();
            Ok(if rest.as_os_str().is_empty() {
                home
            } else {
                home.join(rest)
            })
        }
        Some(Component::Normal(first)) if first.to_string_lossy().starts_with('~') => {
            Err(invalid(path, "only `~` and `~/...` are expanded"))
        }
        _ => Ok(path.to_path_buf()),
    }
}

/// Fold `.` and `..` out of `path` without consulting the filesystem.
///
/// A relative path keeps the `..` components that cannot be folded; an
/// absolute path may not climb above its root. An empty relative result is
/// `.`.
///
/// # Errors
///
/// Returns [`Error::InvalidPath`] when an absolute path escapes its root.
///
/// ```
/// use flatlint::path::resolve_components;
/// use std::path::Path;
///
/// assert_eq!(resolve_components(Path::new("/repo/./app/../lib")).unwrap(), Path::new("/repo/lib"));
/// assert_eq!(resolve_components(Path::new("../base/./tsconfig.json")).unwrap(), Path::new("../base/tsconfig.json"));
/// assert!(resolve_components(Path::new("/repo/../..")).is_err());
/// ```
pub fn resolve_components(path: &Path) -> Result<PathBuf> {
    let mut anchor = PathBuf::new();
    let mut names: Vec<&OsStr> = Vec::new();
    let mut climbs = 0usize;

    for component in path.components() {
        match component {
            Component::Prefix(_) | Component::RootDir => anchor.push(component),
            Component::CurDir => {}
            Component::Normal(name) => names.push(name),
            Component::ParentDir => {
                if names.pop().is_some() {
                    continue;
                }
                if !anchor.as_os_str().is_empty() {
                    return Err(invalid(path, "'..' climbs above the filesystem root"));
                }
                climbs += 1;
            }
        }
    }

    let mut resolved = anchor;
    resolved.extend(std::iter::repeat(OsStr::new("..")).take(climbs));
    resolved.extend(names);
    if resolved.as_os_str().is_empty() {
        resolved.push(".");
    }
    Ok(resolved)
}

/// Anchor `path` at `base` after expanding `~`, then fold `.`/`..`.
///
/// Absolute and `~` paths ignore `base`.
///
/// # Errors
///
/// Propagates [`expand_tilde`] and [`resolve_components`] failures.
///
/// ```
/// use flatlint::path::resolve_against;
/// use std::path::Path;
///
/// let base = Path::new("/repo/packages/web");
/// assert_eq!(
///     resolve_against(base, Path::new("../../tsconfig.base.json")).unwrap(),
///     Path::new("/repo/tsconfig.base.json")
/// );
/// assert_eq!(resolve_against(base, Path::new("/etc/tsconfig.json")).unwrap(), Path::new("/etc/tsconfig.json"));
/// ```
pub fn resolve_against(base: &Path, path: &Path) -> Result<PathBuf> {
    let expanded = expand_tilde(path)?;
    if expanded.is_absolute() {
        resolve_components(&expanded)
    } else {
        resolve_components(&base.join(expanded))
    }
}
