//! Command to validate a flatlint configuration file.

use crate::error::CliError;
use crate::utils::GlobalOptions;
use clap::Args;
use flatlint::config::{ConfigLoader, ConfigValidator};
use std::path::PathBuf;

/// Validate a flatlint configuration file.
#[derive(Args)]
pub struct ValidateCommand {
    /// Configuration file to validate
    #[arg(value_name = "CONFIG_PATH")]
    pub config_path: PathBuf,
}

impl ValidateCommand {
    pub fn execute(self, global: &GlobalOptions) -> Result<(), CliError> {
        if !self.config_path.exists() {
            return Err(CliError::InvalidArguments(format!(
                "File not found: {}",
                self.config_path.display()
            )));
        }

        let result = ConfigLoader::load_file(&self.config_path)
            .and_then(|config| ConfigValidator::validate(&config));

        match result {
            Ok(()) => {
                if !global.quiet {
                    println!("Configuration is valid");
                }
                Ok(())
            }
            Err(e) if e.is_validation() => {
                eprintln!("Validation error: {e}");
                Err(CliError::SemanticFailure(
                    "Configuration validation failed".to_string(),
                ))
            }
            Err(e) => Err(e.into()),
        }
    }
}
