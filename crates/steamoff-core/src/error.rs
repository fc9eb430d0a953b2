//! Error types for the registration core.

use thiserror::Error;

use crate::registration::MissingFields;
use crate::upload::UploadError;

/// Result type alias using the crate's error type.
pub type Result<T> = std::result::Result<T, Error>;

/// Errors raised by the registration core.
#[derive(Error, Debug)]
pub enum Error {
    /// The payment proof failed the upload rules.
    #[error(transparent)]
    Upload(#[from] UploadError),

    /// One or more required form fields are empty.
    #[error(transparent)]
    Missing(#[from] MissingFields),

    /// A form field name that the registration form does not have.
    #[error("unknown form field '{0}'")]
    UnknownField(String),

    /// A cohort label outside the fixed set.
    #[error("unknown cohort '{0}'")]
    UnknownCohort(String),

    /// A timestamp that could not be parsed.
    #[error("invalid timestamp '{value}': {reason}")]
    InvalidTimestamp {
        /// The raw value that was supplied.
        value: String,
        /// What the parser complained about.
        reason: String,
    },
}
