//! Shell completion generation command.
//!
//! This module provides the `completions` command which generates shell completion
//! scripts for bash, zsh, fish, and PowerShell.

use crate::cli::Cli;
use crate::error::CliError;
use crate::utils::GlobalOptions;
use clap::{Args, CommandFactory};
use clap_complete::{generate, Shell};
use std::io;

const BIN_NAME: &str = "flatlint";

/// Generate shell completion scripts
#[derive(Args)]
pub struct CompletionsCommand {
    /// Shell to generate completions for
    #[arg(value_enum)]
    pub shell: Shell,
}

impl CompletionsCommand {
    /// Execute the completions command.
    pub fn execute(&self, global: &GlobalOptions) -> Result<(), CliError> {
        let mut cmd = Cli::command();

        if !global.quiet {
            print_install_hint(self.shell);
        }

        generate(self.shell, &mut cmd, BIN_NAME, &mut io::stdout());
        Ok(())
    }
}

fn print_install_hint(shell: Shell) {
    let hint = match shell {
        Shell::Bash => "flatlint completions bash > ~/.local/share/bash-completion/completions/flatlint",
        Shell::Zsh => "flatlint completions zsh > ~/.zsh/completions/_flatlint",
        Shell::Fish => "flatlint completions fish > ~/.config/fish/completions/flatlint.fish",
        Shell::PowerShell => "flatlint completions powershell | Out-String | Invoke-Expression",
        _ => return,
    };
    eprintln!("# Generating {shell} completion script");
    eprintln!("# To enable completions, run:");
    eprintln!("#   {hint}");
    eprintln!();
}
