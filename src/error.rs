//! # Error Handling
//!
//! This module defines the centralized error type for `schema-vendor`. It uses
//! the `thiserror` library to describe every failure the library can report,
//! with enough context for the operator to act on it.
//!
//! ## Key Components
//!
//! - **`Error`**: The main enum covering configuration problems, per-entry
//!   materialization failures and wrapped lower-level errors. Filesystem
//!   errors never travel as bare `io::Error`: the materializer folds them
//!   into `Materialize` together with the file and step.
//!
//! - **`Result<T>`**: A type alias for `std::result::Result<T, Error>`.
//!
//! Unresolved imports are not errors: the resolver records them in the
//! closure and logs a warning, so they never surface through this type.
//! Usage errors (wrong argument count) are owned by the CLI parser.

use thiserror::Error;

/// Main error type for schema-vendor operations
#[derive(Error, Debug)]
pub enum Error {
    /// Required configuration is missing or invalid.
    ///
    /// Raised before any traversal starts. The hint names the flag or
    /// environment variable that fixes it.
    #[error("Configuration error: {message}{}", hint.as_ref().map(|h| format!("\n  hint: {}", h)).unwrap_or_default())]
    Config {
        message: String,
        /// Optional hint for how to fix the configuration issue
        hint: Option<String>,
    },

    /// A single vendored entry could not be materialized.
    ///
    /// `step` names the failing action (`mkdir`, `cp` or `append`).
    #[error("Failed to vendor {file} ({step}): {message}")]
    Materialize {
        file: String,
        step: String,
        message: String,
    },

    /// A regular expression error, wrapped from `regex::Error`.
    #[error("Regex error: {0}")]
    Regex(#[from] regex::Error),

    /// An error occurred during serialization of a report.
    #[error("Serialization error: {message}")]
    Serialization { message: String },
}

/// A convenient type alias for `Result<T, Error>`.
pub type Result<T> = std::result::Result<T, Error>;

impl Error {
    /// Shorthand for a configuration error carrying a hint.
    pub fn config(message: impl Into<String>, hint: impl Into<String>) -> Self {
        Error::Config {
            message: message.into(),
            hint: Some(hint.into()),
        }
    }
}
