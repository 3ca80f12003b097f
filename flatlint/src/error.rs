//! The library's single error type.

use std::path::PathBuf;

use thiserror::Error;

use crate::overrides::HookError;

/// `Result` with [`Error`] as the failure.
pub type Result<T> = std::result::Result<T, Error>;

/// Everything that can go wrong between reading a file and producing a
/// flat config.
///
/// Resolution either fully succeeds or fails with exactly one of these.
#[derive(Debug, Error)]
pub enum Error {
    /// A configuration value violates its shape or enumeration constraint.
    #[error("validation error for '{field}': {message}")]
    Validation {
        /// The field that failed validation.
        field: String,
        /// A description of the validation failure.
        message: String,
    },

    /// The user-supplied overrides hook failed.
    ///
    /// The hook's error is propagated unchanged.
    #[error("{0}")]
    Overrides(HookError),

    /// An invalid filesystem path was provided.
    #[error("invalid path {}: {reason}", path.display())]
    InvalidPath {
        /// The invalid path.
        path: PathBuf,
        /// The reason the path is invalid.
        reason: String,
    },

    /// A YAML configuration document could not be processed.
    #[error("configuration error: {0}")]
    Configuration(#[from] serde_yaml::Error),

    /// A rule set could not be serialized.
    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// An I/O error occurred.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

impl Error {
    /// Build an [`Error::Validation`].
    ///
    /// ```
    /// use flatlint::Error;
    ///
    /// let err = Error::validation("tsconfig", "must not be an empty list");
    /// assert!(err.is_validation());
    /// ```
    pub fn validation(field: impl Into<String>, message: impl Into<String>) -> Self {
        Self::Validation {
            field: field.into(),
            message: message.into(),
        }
    }

    /// `true` for [`Error::Validation`].
    #[must_use]
    pub fn is_validation(&self) -> bool {
        matches!(self, Self::Validation { .. })
    }

    /// `true` when the overrides hook failed.
    #[must_use]
    pub fn is_overrides(&self) -> bool {
        matches!(self, Self::Overrides(_))
    }
}
