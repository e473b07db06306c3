//! Client input errors.

use thiserror::Error;

/// A result type using `InputError`.
pub type Result<T> = std::result::Result<T, InputError>;

/// Errors raised while interpreting a client request body.
#[derive(Debug, Error)]
pub enum InputError {
    /// A required field was absent or `null`.
    #[error("missing required field: {0}")]
    MissingField(&'static str),

    /// A field was present but had the wrong shape.
    #[error("invalid field {field}: {reason}")]
    InvalidField {
        /// The offending field name.
        field: &'static str,
        /// What was wrong with it.
        reason: String,
    },
}
