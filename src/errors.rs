use thiserror::Error;

use crate::converters::html::RenderError;
use crate::editor::InFlight;
use crate::models::draft::UnknownFieldError;

/// Represents errors that can occur while driving a deck or talking to the backend.
#[derive(Error, Debug)]
pub enum DeckError {
    /// Error originating from the underlying HTTP client (`reqwest`).
    #[error("Network request failed: {0}")]
    Network(#[from] reqwest::Error),

    /// Error occurred while (de)serializing JSON exchanged with the backend or the browser.
    #[error("JSON (de)serialization failed: {0}")]
    Json(#[from] serde_json::Error),

    /// An error reported by the backend itself (4xx or 5xx status code).
    #[error("API returned an error: Status {status}, Message: {message}")]
    ApiError {
        status: reqwest::StatusCode,
        message: String,
    },

    /// Input rejected before any external call was made.
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    /// A slide could not be rendered (unknown layout or template).
    #[error("Render failed: {0}")]
    Render(#[from] RenderError),

    #[error("Invalid edit: {0}")]
    UnknownField(#[from] UnknownFieldError),

    #[error("The deck has no slides")]
    NoSlides,

    #[error("No slide is being edited")]
    NotEditing,

    #[error("Slide index {index} is out of range for {len} slides")]
    IndexOutOfRange { index: usize, len: usize },

    /// A mutating action was attempted while an external call is still outstanding.
    #[error("Action rejected: {0} request still in flight")]
    Busy(InFlight),

    /// A completion arrived for a request that was never started.
    #[error("No {0} request is in flight")]
    NotInFlight(&'static str),

    #[error("Environment variable error: {0}")]
    EnvVar(#[from] std::env::VarError),

    #[error("Configuration error: {0}")]
    Config(String),
}

/// Coarse classification used to decide how a failure is surfaced.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCategory {
    /// Bad user input; shown as a message, nothing changed.
    Validation,
    /// The backend call failed; prior state is intact and actions are re-enabled.
    ExternalCall,
    /// An unknown layout or template; the affected slide is not rendered.
    Lookup,
    /// The operation is not legal in the deck's current state.
    State,
    Configuration,
}

impl DeckError {
    pub fn category(&self) -> ErrorCategory {
        match self {
            DeckError::InvalidInput(_) | DeckError::UnknownField(_) => ErrorCategory::Validation,
            DeckError::Network(_) | DeckError::Json(_) | DeckError::ApiError { .. } => {
                ErrorCategory::ExternalCall
            }
            DeckError::Render(_) => ErrorCategory::Lookup,
            DeckError::NoSlides
            | DeckError::NotEditing
            | DeckError::IndexOutOfRange { .. }
            | DeckError::Busy(_)
            | DeckError::NotInFlight(_) => ErrorCategory::State,
            DeckError::EnvVar(_) | DeckError::Config(_) => ErrorCategory::Configuration,
        }
    }
}

/// A type alias for `Result<T, DeckError>` for convenience within the crate.
pub type Result<T> = std::result::Result<T, DeckError>;
