//! Finding and reading `flatlint.yaml` files.
//!
//! Three kinds of file can contribute: the per-user file in the data
//! directory, the project file, and its git-ignored local sibling. Project
//! files are found by walking up from the working directory; the walk stops
//! at the first directory holding either one.

use std::fs;
use std::path::{Path, PathBuf};

use crate::config::schema::Config;
use crate::error::{Error, Result};
use crate::path::resolve_against;

/// Project configuration file name.
pub const PROJECT_CONFIG_FILE: &str = "flatlint.yaml";
/// Private project configuration file name, usually git-ignored.
pub const LOCAL_CONFIG_FILE: &str = "flatlint.local.yaml";
/// User configuration file name inside the data directory.
pub const USER_CONFIG_FILE: &str = "config.yaml";
/// Data directory name under the home directory.
pub const DATA_DIR_NAME: &str = ".flatlint";

/// Where a configuration file came from.
///
/// Variants are ordered weakest first, so sorting sources by kind puts them
/// in merge order.
///
/// ```
/// use flatlint::config::SourceKind;
///
/// assert!(SourceKind::User < SourceKind::Project);
/// assert!(SourceKind::Project < SourceKind::Local);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum SourceKind {
    /// `~/.flatlint/config.yaml`, or `config.yaml` under `--data-dir`.
    User,
    /// `flatlint.yaml`.
    Project,
    /// `flatlint.local.yaml`.
    Local,
}

impl SourceKind {
    /// The file name this kind is read from.
    #[must_use]
    pub const fn file_name(self) -> &'static str {
        match self {
            Self::User => USER_CONFIG_FILE,
            Self::Project => PROJECT_CONFIG_FILE,
            Self::Local => LOCAL_CONFIG_FILE,
        }
    }
}

/// A parsed configuration file.
#[derive(Debug, Clone)]
pub struct ConfigSource {
    /// Which slot the file fills.
    pub kind: SourceKind,
    /// The file that was read.
    pub path: PathBuf,
    /// Its contents, with `rootDir` already anchored to the file's directory.
    pub config: Config,
}

/// Reads configuration files from disk.
///
/// ```no_run
/// use flatlint::config::ConfigLoader;
/// use std::path::Path;
///
/// for source in ConfigLoader::load_all(Path::new("."), None).unwrap() {
///     println!("{:?}: {}", source.kind, source.path.display());
/// }
/// ```
pub struct ConfigLoader;

impl ConfigLoader {
    /// Every configuration file that applies to `working_dir`, weakest first.
    ///
    /// `data_dir` replaces `~/.flatlint` as the home of the user file.
    ///
    /// # Errors
    ///
    /// Fails when a file is present but unreadable or malformed.
    pub fn load_all(working_dir: &Path, data_dir: Option<&Path>) -> Result<Vec<ConfigSource>> {
        let user_dir = match data_dir {
            Some(dir) => dir.to_path_buf(),
            None => default_data_dir()?,
        };

        let mut sources: Vec<ConfigSource> = Self::read_kind(&user_dir, SourceKind::User)?
            .into_iter()
            .collect();
        sources.extend(Self::discover_project_configs(working_dir)?);
        sources.sort_by_key(|s| s.kind);
        Ok(sources)
    }

    /// Project and local files from the nearest directory at or above
    /// `start_dir` that has at least one of them.
    ///
    /// # Errors
    ///
    /// Fails when a found file is unreadable or malformed.
    pub fn discover_project_configs(start_dir: &Path) -> Result<Vec<ConfigSource>> {
        for dir in start_dir.ancestors() {
            let found: Vec<ConfigSource> = [SourceKind::Project, SourceKind::Local]
                .into_iter()
                .filter_map(|kind| Self::read_kind(dir, kind).transpose())
                .collect::<Result<_>>()?;
            if !found.is_empty() {
                return Ok(found);
            }
        }
        Ok(Vec::new())
    }

    /// Parse one YAML file. Blank files are an empty [`Config`].
    ///
    /// # Errors
    ///
    /// [`Error::InvalidPath`] when the file cannot be read,
    /// [`Error::Validation`] naming the file when the YAML is bad.
    pub fn load_file(path: &Path) -> Result<Config> {
        let text = fs::read_to_string(path).map_err(|e| Error::InvalidPath {
            path: path.to_path_buf(),
            reason: format!("cannot read configuration file: {e}"),
        })?;

        if text.trim().is_empty() {
            return Ok(Config::default());
        }

        serde_yaml::from_str(&text)
            .map_err(|e| Error::validation(path.display().to_string(), format!("invalid YAML: {e}")))
    }

    fn read_kind(dir: &Path, kind: SourceKind) -> Result<Option<ConfigSource>> {
        let path = dir.join(kind.file_name());
        if !path.is_file() {
            return Ok(None);
        }
        log::debug!("reading {kind:?} configuration {}", path.display());

        let mut config = Self::load_file(&path)?;
        if let Some(root_dir) = config.root_dir.as_mut() {
            *root_dir = resolve_against(dir, root_dir)?;
        }
        Ok(Some(ConfigSource { kind, path, config }))
    }
}

/// `~/.flatlint`.
///
/// # Errors
///
/// Fails when the home directory is unknown.
pub fn default_data_dir() -> Result<PathBuf> {
    home::home_dir()
        .map(|home| home.join(DATA_DIR_NAME))
        .ok_or_else(|| Error::InvalidPath {
            path: PathBuf::from("~"),
            reason: "home directory is unknown".to_string(),
        })
}
