// models/src/errors.rs

pub use thiserror::Error;

/// A validation error raised before a payload is sent to the backend.
///
/// The display strings are shown to the patient verbatim, so they read as
/// form messages rather than diagnostics.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ValidationError {
    /// A required text field was blank.
    #[error("{0} is required")]
    Required(&'static str),
    /// Age missing or outside 1..=120.
    #[error("Valid age is required")]
    InvalidAge,
    /// Email present but without an `@`.
    #[error("Valid email is required")]
    InvalidEmail,
    /// Password shorter than the minimum length.
    #[error("Password must be at least {0} characters")]
    PasswordTooShort(usize),
    /// Password and confirmation differ.
    #[error("Passwords do not match")]
    PasswordMismatch,
    /// A voice draft was saved without a diagnosis.
    #[error("Diagnosis is required. Please fill in the diagnosis field.")]
    MissingDiagnosis,
    /// A voice doctor draft lacks a name or specialization.
    #[error("Doctor name and specialization are required")]
    IncompleteDoctor,
    /// An invalid date format was provided.
    #[error("invalid date format: {0}")]
    InvalidDateFormat(String),
}

/// A type alias for a `Result` that returns a `ValidationError` on failure.
pub type ValidationResult<T> = Result<T, ValidationError>;
