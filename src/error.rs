//! Error taxonomy shared by the remote source, booking and the poll loop.

/// The API could not be used: transport failure, non-success status, or a body
/// that does not decode.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
#[error("API unreachable: {reason}")]
pub struct Unreachable {
    pub reason: String,
}

impl Unreachable {
    pub fn new(reason: impl Into<String>) -> Self {
        Self {
            reason: reason.into(),
        }
    }
}

impl From<reqwest::Error> for Unreachable {
    fn from(err: reqwest::Error) -> Self {
        Self::new(format!("{:#}", anyhow::Error::from(err)))
    }
}

/// Local pre-flight check failed; no request was made.
#[derive(Clone, Copy, Debug, PartialEq, Eq, thiserror::Error)]
pub enum ValidationError {
    #[error("missing name")]
    MissingName,
    #[error("missing wing")]
    MissingWing,
    #[error("missing duration")]
    MissingDuration,
    #[error("duration must be a positive number of seconds")]
    InvalidDuration,
}

impl ValidationError {
    pub fn user_message(&self) -> &'static str {
        "Please fill all fields."
    }
}

#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum BookingError {
    #[error(transparent)]
    Invalid(#[from] ValidationError),

    /// The server refused the booking; the reason is its response body.
    #[error("booking rejected: {0}")]
    Rejected(String),

    #[error(transparent)]
    Unreachable(#[from] Unreachable),
}

impl BookingError {
    /// Status line shown next to the booking form.
    pub fn user_message(&self) -> String {
        match self {
            BookingError::Invalid(err) => err.user_message().to_string(),
            BookingError::Rejected(reason) => format!("❌ {}", reason),
            BookingError::Unreachable(_) => "❌ Failed to reach API.".to_string(),
        }
    }
}
