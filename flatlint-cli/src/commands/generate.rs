//! Command to resolve the configuration and print the generated rule set.

use crate::error::CliError;
use crate::utils::{build_probe, load_configuration, resolve_path, write_output, GlobalOptions};
use clap::Args;
use flatlint::{Config, OutputFormat, Resolver};
use std::path::PathBuf;

/// Resolve the configuration and print the generated rule set.
#[derive(Args)]
pub struct GenerateCommand {
    /// Project directory (defaults to the current directory)
    #[arg(long, value_name = "DIR")]
    pub path: Option<PathBuf>,

    /// Output format (json, yaml, module, human)
    #[arg(long, default_value = "json", env = "FLATLINT_OUTPUT_FORMAT")]
    pub format: OutputFormat,

    /// Global binding present on the target platform (repeatable)
    #[arg(long = "global", value_name = "NAME")]
    pub globals: Vec<String>,

    /// Force strict mode
    #[arg(long)]
    pub strict: bool,

    /// Write to a file instead of stdout
    #[arg(long, short, value_name = "FILE")]
    pub output: Option<PathBuf>,
}

impl GenerateCommand {
    pub fn execute(self, global: &GlobalOptions) -> Result<(), CliError> {
        let working_dir = resolve_path(self.path)?;

        let extra = self.strict.then(|| Config {
            strict: Some(true),
            ..Default::default()
        });
        let config = load_configuration(global, &working_dir, extra)?;

        let resolver = Resolver::new(build_probe(&self.globals)).with_default_root(&working_dir);
        let resolved = resolver.resolve_blocking(config)?;

        log::info!(
            "Resolved {} fragments for {} ({})",
            resolved.rule_set.len(),
            resolved.root_dir.display(),
            resolved
                .environment
                .detected
                .map_or_else(|| "explicit environment".to_string(), |env| env.to_string())
        );

        let formatted = self.format.create_formatter().format(&resolved.rule_set)?;
        write_output(&formatted, self.output.as_deref())
    }
}
