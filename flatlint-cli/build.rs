//! Build script for flatlint-cli.
//!
//! Generates the man page at build time using clap_mangen and places it in
//! OUT_DIR. Build scripts cannot depend on the crate being built, so the
//! command structure is restated here.

use clap::{Arg, ArgAction, Command};
use clap_mangen::Man;
use std::fs;
use std::path::PathBuf;

/// Keep in sync with src/cli.rs.
fn build_cli() -> Command {
    Command::new("flatlint")
        .version(env!("CARGO_PKG_VERSION"))
        .about("Generate flat linter configurations")
        .long_about(
            "Resolve tsconfig, strictness, runtime environment and style settings into an ordered flat-config rule set",
        )
        .arg(
            Arg::new("verbose")
                .long("verbose")
                .help("Enable verbose output")
                .global(true)
                .action(ArgAction::SetTrue),
        )
        .arg(
            Arg::new("quiet")
                .long("quiet")
                .help("Suppress non-essential output")
                .global(true)
                .action(ArgAction::SetTrue),
        )
        .arg(
            Arg::new("data-dir")
                .long("data-dir")
                .help("Override the user configuration directory")
                .value_name("PATH")
                .global(true)
                .env("FLATLINT_DATA_DIR"),
        )
        .subcommands(vec![
            Command::new("generate")
                .about("Resolve the configuration and print the generated rule set")
                .long_about("Merge configuration files, environment variables and flags, resolve them, and print the flat-config fragments as json, yaml, module or human output"),
            Command::new("validate")
                .about("Validate a configuration file")
                .long_about("Parse and validate a flatlint configuration file, exiting with status 1 when it is invalid"),
            Command::new("show-config")
                .about("Print the merged configuration")
                .long_about("Print the configuration merged from the user file, project files and environment variables as YAML"),
            Command::new("detect")
                .about("Report the inferred runtime environment")
                .long_about("Infer node, deno, browser or bare from the global bindings given with --global"),
            Command::new("completions")
                .about("Generate shell completion scripts")
                .long_about("Generate shell completion scripts for bash, zsh, fish, or PowerShell"),
        ])
}

fn main() -> std::io::Result<()> {
    let out_dir = PathBuf::from(std::env::var_os("OUT_DIR").ok_or_else(|| {
        std::io::Error::new(std::io::ErrorKind::NotFound, "OUT_DIR is not set")
    })?);
    let man_dir = out_dir.join("man");
    fs::create_dir_all(&man_dir)?;

    let mut buffer = Vec::new();
    Man::new(build_cli()).render(&mut buffer)?;
    fs::write(man_dir.join("flatlint.1"), buffer)?;

    println!("cargo:rerun-if-changed=src/cli.rs");
    println!("cargo:rerun-if-changed=src/commands/");
    Ok(())
}
