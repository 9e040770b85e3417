//! Shared error types for the services crate.

use thiserror::Error;

use api::ApiError;
use vocab_core::question::FillMissingError;

/// Errors emitted by the practice runner.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum PracticeError {
    #[error("This question has already been answered.")]
    AlreadyAnswered,
    #[error("Enter or choose an answer first.")]
    EmptyAnswer,
    #[error("Fill in every missing character.")]
    IncompleteFill(#[from] FillMissingError),
    #[error("This session has no questions.")]
    NoItems,
    #[error("question {0} is not part of this session")]
    UnknownItem(String),
    #[error("An answer is already being submitted.")]
    InFlight,
    #[error("This session is no longer active.")]
    NotActive,
    #[error("the API did not return a session")]
    MissingSession,
    #[error(transparent)]
    Api(#[from] ApiError),
}

impl PracticeError {
    /// Whether the browser should be sent to the login page.
    #[must_use]
    pub fn is_auth_failure(&self) -> bool {
        matches!(self, PracticeError::Api(err) if err.is_auth_failure())
    }
}

/// Errors emitted while reading an import CSV.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum ImportError {
    #[error("Please choose a .csv file.")]
    NotCsv,
    #[error("The CSV file is empty.")]
    Empty,
    #[error("The CSV file is not valid UTF-8.")]
    Encoding,
    #[error("Missing required columns: {}", .0.join(", "))]
    MissingColumns(Vec<String>),
}

/// Errors emitted while normalising submitted forms.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum FormError {
    #[error("{0} is required.")]
    Required(&'static str),
    #[error("{field} must be a number.")]
    NotANumber { field: &'static str },
    #[error("Unknown value for {field}: {value}")]
    Invalid { field: &'static str, value: String },
}
