//! CLI structure and command definitions.
//!
//! This module defines the main CLI structure using clap's derive macros,
//! including global options and subcommands.

use crate::commands::{
    CompletionsCommand, DetectCommand, GenerateCommand, ShowConfigCommand, ValidateCommand,
};
use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// Command-line tool for generating flat linter configurations.
#[derive(Parser)]
#[command(name = "flatlint")]
#[command(version, about = "Generate flat linter configurations", long_about = None)]
pub struct Cli {
    /// Enable verbose output
    #[arg(long, global = true)]
    pub verbose: bool,

    /// Suppress non-essential output
    #[arg(long, global = true)]
    pub quiet: bool,

    /// Override the user configuration directory
    #[arg(long, value_name = "PATH", global = true, env = "FLATLINT_DATA_DIR")]
    pub data_dir: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Command,
}

/// Available CLI commands.
#[derive(Subcommand)]
pub enum Command {
    /// Resolve the configuration and print the generated rule set
    Generate(GenerateCommand),

    /// Validate a configuration file
    Validate(ValidateCommand),

    /// Print the merged configuration
    ShowConfig(ShowConfigCommand),

    /// Report the inferred runtime environment
    Detect(DetectCommand),

    /// Generate shell completion scripts
    Completions(CompletionsCommand),
}
