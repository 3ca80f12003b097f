//! Command to report the runtime environment inferred from a set of globals.

use crate::error::CliError;
use crate::utils::{build_probe, GlobalOptions};
use clap::Args;
use flatlint::environment::{detect, ResolvedEnvironment};

/// Report the runtime environment inferred from global bindings.
#[derive(Args)]
pub struct DetectCommand {
    /// Global binding present on the target platform (repeatable)
    #[arg(long = "global", value_name = "NAME")]
    pub globals: Vec<String>,

    /// Also list the globals the inferred environment enables
    #[arg(long)]
    pub list_globals: bool,
}

impl DetectCommand {
    pub fn execute(self, _global: &GlobalOptions) -> Result<(), CliError> {
        let runtime = detect(&build_probe(&self.globals));
        println!("{runtime}");

        if self.list_globals {
            for (name, access) in ResolvedEnvironment::for_runtime(runtime).globals() {
                let access = if access.is_writable() { "writable" } else { "readonly" };
                println!("{name}\t{access}");
            }
        }
        Ok(())
    }
}
