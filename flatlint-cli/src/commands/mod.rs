//! CLI command implementations.
//!
//! - `generate`: Resolve the configuration and print the rule set
//! - `validate`: Validate a configuration file
//! - `show_config`: Print the merged configuration
//! - `detect`: Report the inferred runtime environment
//! - `completions`: Generate shell completion scripts

pub mod completions;
pub mod detect;
pub mod generate;
pub mod show_config;
pub mod validate;

pub use completions::CompletionsCommand;
pub use detect::DetectCommand;
pub use generate::GenerateCommand;
pub use show_config::ShowConfigCommand;
pub use validate::ValidateCommand;
