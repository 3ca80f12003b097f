//! Failures of a `flatlint` invocation and the exit status each maps to.

use flatlint::Error as LibError;
use std::fmt;

/// Why a command did not succeed.
#[derive(Debug)]
pub enum CliError {
    /// Raised by the library.
    Library(LibError),

    /// Arguments clap accepted but that make no sense together or on disk.
    InvalidArguments(String),

    /// Reading or writing outside the library failed.
    Io(std::io::Error),

    /// Configuration could not be loaded or merged.
    Config(String),

    /// The command ran but the answer is "no", as when `validate` rejects a file.
    SemanticFailure(String),
}

impl CliError {
    /// Process exit status.
    ///
    /// | status | meaning |
    /// |--------|---------|
    /// | 1 | rejected configuration |
    /// | 4 | bad arguments |
    /// | 5 | I/O |
    /// | 6 | any other library failure |
    /// | 7 | configuration could not be assembled |
    pub fn exit_code(&self) -> i32 {
        match self {
            Self::SemanticFailure(_) => 1,
            Self::Library(lib_err) => match lib_err {
                LibError::Validation { .. } => 1,
                LibError::Io(_) => 5,
                _ => 6,
            },
            Self::InvalidArguments(_) => 4,
            Self::Io(_) => 5,
            Self::Config(_) => 7,
        }
    }
}

impl fmt::Display for CliError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Library(e) => write!(f, "{e}"),
            Self::InvalidArguments(msg) => write!(f, "Invalid arguments: {msg}"),
            Self::Io(e) => write!(f, "I/O error: {e}"),
            Self::Config(msg) => write!(f, "Configuration error: {msg}"),
            Self::SemanticFailure(msg) => write!(f, "{msg}"),
        }
    }
}

impl std::error::Error for CliError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Library(e) => Some(e),
            Self::Io(e) => Some(e),
            _ => None,
        }
    }
}

impl From<LibError> for CliError {
    fn from(e: LibError) -> Self {
        Self::Library(e)
    }
}

impl From<std::io::Error> for CliError {
    fn from(e: std::io::Error) -> Self {
        Self::Io(e)
    }
}
