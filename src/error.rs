//! Error types for the LMS console client

use thiserror::Error;

/// Main application error type.
///
/// Every transport-level failure is normalized into one of these kinds at
/// the HTTP client boundary, so downstream layers match on the variant
/// instead of probing error shapes.
#[derive(Error, Debug)]
pub enum AppError {
    /// An action requiring authentication was attempted without a session.
    /// Raised before any network call is made.
    #[error("Unauthorized - Please login first")]
    Unauthorized,

    /// The backend responded with a non-2xx status.
    #[error("Request failed with status {status}: {message}")]
    Status { status: u16, message: String },

    /// The request was sent but no response was received (connectivity
    /// loss or timeout).
    #[error("No response received from the server")]
    Network(#[source] reqwest::Error),

    /// The request could not be constructed or sent at all.
    #[error("Request setup error: {0}")]
    RequestSetup(String),

    /// A failure outside the transport taxonomy, e.g. a response body that
    /// does not match the expected shape.
    #[error("An unexpected error occurred: {0}")]
    Unexpected(String),
}

impl AppError {
    /// Status code of the backend response, when there was one.
    pub fn status(&self) -> Option<u16> {
        match self {
            AppError::Status { status, .. } => Some(*status),
            _ => None,
        }
    }

    /// True for a 404-class failure from `get_by_id` and friends.
    pub fn is_not_found(&self) -> bool {
        self.status() == Some(404)
    }
}

/// Result type alias for application operations
pub type AppResult<T> = Result<T, AppError>;
