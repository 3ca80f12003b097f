//! Command to print the merged configuration.

use crate::error::CliError;
use crate::utils::{load_configuration, resolve_path, GlobalOptions};
use clap::Args;
use std::path::PathBuf;

/// Print the configuration merged from files and environment variables.
#[derive(Args)]
pub struct ShowConfigCommand {
    /// Project directory (defaults to the current directory)
    #[arg(long, value_name = "DIR")]
    pub path: Option<PathBuf>,
}

impl ShowConfigCommand {
    pub fn execute(self, global: &GlobalOptions) -> Result<(), CliError> {
        let working_dir = resolve_path(self.path)?;
        let config = load_configuration(global, &working_dir, None)?;

        let yaml = serde_yaml::to_string(&config).map_err(flatlint::Error::from)?;
        print!("{yaml}");
        Ok(())
    }
}
