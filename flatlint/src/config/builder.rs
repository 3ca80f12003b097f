//! Layered configuration assembly.

use crate::config::env_vars::EnvVarOverrides;
use crate::config::loader::ConfigLoader;
use crate::config::merger::ConfigMerger;
use crate::config::schema::Config;
use crate::config::validator::ConfigValidator;
use crate::error::Result;
use std::env;
use std::path::{Path, PathBuf};

/// Builds a [`Config`] from files, environment variables and programmatic
/// overrides, lowest precedence first.
///
/// # Examples
///
/// ```
/// use flatlint::config::{Config, ConfigBuilder};
///
/// let config = ConfigBuilder::new()
///     .skip_files()
///     .skip_env()
///     .with_working_dir("/repo")
///     .with_config(Config { strict: Some(true), ..Default::default() })
///     .build()
///     .unwrap();
///
/// assert_eq!(config.strict, Some(true));
/// assert_eq!(config.root_dir.as_deref(), Some(std::path::Path::new("/repo")));
/// ```
#[derive(Debug, Default)]
pub struct ConfigBuilder {
    working_dir: Option<PathBuf>,
    data_dir: Option<PathBuf>,
    skip_files: bool,
    skip_env: bool,
    overrides: Vec<Config>,
}

impl ConfigBuilder {
    /// Create a builder that reads files and environment variables.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Directory to start project file discovery from. Defaults to the
    /// current directory.
    #[must_use]
    pub fn with_working_dir(mut self, dir: impl AsRef<Path>) -> Self {
        self.working_dir = Some(dir.as_ref().to_path_buf());
        self
    }

    /// Directory holding the user `config.yaml`. Defaults to `~/.flatlint`.
    #[must_use]
    pub fn with_data_dir(mut self, dir: impl AsRef<Path>) -> Self {
        self.data_dir = Some(dir.as_ref().to_path_buf());
        self
    }

    /// Do not read configuration files.
    #[must_use]
    pub fn skip_files(mut self) -> Self {
        self.skip_files = true;
        self
    }

    /// Do not read `FLATLINT_*` environment variables.
    #[must_use]
    pub fn skip_env(mut self) -> Self {
        self.skip_env = true;
        self
    }

    /// Merge a programmatic configuration with the highest precedence.
    ///
    /// May be called several times; later calls win.
    #[must_use]
    pub fn with_config(mut self, config: Config) -> Self {
        self.overrides.push(config);
        self
    }

    /// Load, merge and validate.
    ///
    /// `rootDir` defaults to the working directory.
    ///
    /// # Errors
    ///
    /// Returns an error if a file cannot be read or parsed, an environment
    /// variable is malformed, or the merged configuration is invalid.
    pub fn build(self) -> Result<Config> {
        let working_dir = match self.working_dir {
            Some(dir) => dir,
            None => env::current_dir()?,
        };

        let mut config = if self.skip_files {
            Config::default()
        } else {
            let sources = ConfigLoader::load_all(&working_dir, self.data_dir.as_deref())?;
            log::debug!("Loaded {} configuration file(s)", sources.len());
            ConfigMerger::merge(sources)
        };

        if !self.skip_env {
            EnvVarOverrides::apply_overrides(&mut config)?;
        }

        for overrides in &self.overrides {
            ConfigMerger::merge_into(&mut config, overrides);
        }

        if config.root_dir.is_none() {
            config.root_dir = Some(working_dir);
        }

        ConfigValidator::validate(&config)?;
        Ok(config)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::loader::PROJECT_CONFIG_FILE;
    use crate::config::schema::TsconfigSetting;
    use std::fs;
    use tempfile::TempDir;

    #[test]
    fn test_build_defaults_root_dir_to_working_dir() {
        let temp_dir = TempDir::new().unwrap();
        let config = ConfigBuilder::new()
            .skip_files()
            .skip_env()
            .with_working_dir(temp_dir.path())
            .build()
            .unwrap();
        assert_eq!(config.root_dir.as_deref(), Some(temp_dir.path()));
    }

    #[test]
    fn test_programmatic_config_wins_over_files() {
        let work = TempDir::new().unwrap();
        let data = TempDir::new().unwrap();
        fs::write(work.path().join(PROJECT_CONFIG_FILE), "strict: false\ntsconfig: true\n").unwrap();

        let config = ConfigBuilder::new()
            .skip_env()
            .with_working_dir(work.path())
            .with_data_dir(data.path())
            .with_config(Config {
                strict: Some(true),
                ..Default::default()
            })
            .build()
            .unwrap();

        assert_eq!(config.strict, Some(true));
        assert_eq!(config.tsconfig, Some(TsconfigSetting::Enabled(true)));
    }

    #[test]
    fn test_later_programmatic_config_wins() {
        let config = ConfigBuilder::new()
            .skip_files()
            .skip_env()
            .with_working_dir("/repo")
            .with_config(Config {
                strict: Some(true),
                ..Default::default()
            })
            .with_config(Config {
                strict: Some(false),
                ..Default::default()
            })
            .build()
            .unwrap();
        assert_eq!(config.strict, Some(false));
    }

    #[test]
    fn test_invalid_merged_config_rejected() {
        let result = ConfigBuilder::new()
            .skip_files()
            .skip_env()
            .with_working_dir("/repo")
            .with_config(Config {
                tsconfig: Some(TsconfigSetting::Paths(Vec::new())),
                ..Default::default()
            })
            .build();
        assert!(result.unwrap_err().is_validation());
    }
}
