//! Utility functions for CLI operations.
//!
//! This module provides helpers shared across commands: working directory
//! resolution, configuration loading, probe construction, and output.

use crate::error::CliError;
use flatlint::config::ConfigBuilder;
use flatlint::path::resolve_against;
use flatlint::probe::StaticProbe;
use flatlint::Config;
use std::env;
use std::fs;
use std::path::{Path, PathBuf};

/// Global CLI options shared across all commands.
#[derive(Debug, Clone, Default)]
#[allow(dead_code)] // verbose is consumed by the logger in main.rs
pub struct GlobalOptions {
    /// Enable verbose output.
    pub verbose: bool,

    /// Suppress non-essential output.
    pub quiet: bool,

    /// Override the user configuration directory.
    pub data_dir: Option<PathBuf>,
}

/// Resolve a directory argument, using CWD if not specified.
///
/// Relative paths are anchored at the current directory and `~` is
/// expanded. Symlinks are not followed.
pub fn resolve_path(path: Option<PathBuf>) -> Result<PathBuf, CliError> {
    let cwd = env::current_dir()?;
    match path {
        Some(p) => resolve_against(&cwd, &p).map_err(|e| CliError::InvalidArguments(e.to_string())),
        None => Ok(cwd),
    }
}

/// Load hierarchical configuration for `working_dir`.
///
/// Configuration is merged from multiple sources with precedence:
/// 1. `extra` (flags given on the command line)
/// 2. Environment variables
/// 3. Project configuration files
/// 4. The user configuration file
pub fn load_configuration(
    global: &GlobalOptions,
    working_dir: &Path,
    extra: Option<Config>,
) -> Result<Config, CliError> {
    let mut builder = ConfigBuilder::new().with_working_dir(working_dir);

    if let Some(ref data_dir) = global.data_dir {
        builder = builder.with_data_dir(data_dir);
    }
    if let Some(config) = extra {
        builder = builder.with_config(config);
    }

    builder.build().map_err(|e| CliError::Config(e.to_string()))
}

/// Build a probe from `--global` arguments.
///
/// With no names given, the probe reports nothing and inference yields a
/// bare ECMAScript environment.
pub fn build_probe(globals: &[String]) -> StaticProbe {
    StaticProbe::new(globals.iter().cloned())
}

/// Write `content` to `output`, or stdout when absent.
pub fn write_output(content: &str, output: Option<&Path>) -> Result<(), CliError> {
    match output {
        Some(path) => {
            fs::write(path, content)?;
            log::info!("Wrote {}", path.display());
        }
        None => {
            print!("{content}");
            if !content.ends_with('\n') {
                println!();
            }
        }
    }
    Ok(())
}
