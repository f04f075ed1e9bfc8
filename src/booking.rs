use tracing::info;

use crate::error::{BookingError, ValidationError};
use crate::remote::RemoteStatusSource;

/// Booking form fields exactly as typed.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct BookingForm {
    pub name: String,
    pub wing: String,
    pub duration: String,
}

/// A booking that passed local validation.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct BookingRequest {
    pub name: String,
    pub wing: String,
    pub duration_secs: u64,
}

impl BookingForm {
    pub fn new(
        name: impl Into<String>,
        wing: impl Into<String>,
        duration: impl Into<String>,
    ) -> Self {
        Self {
            name: name.into(),
            wing: wing.into(),
            duration: duration.into(),
        }
    }

    pub fn validate(&self) -> Result<BookingRequest, ValidationError> {
        let name = self.name.trim();
        if name.is_empty() {
            return Err(ValidationError::MissingName);
        }
        let wing = self.wing.trim();
        if wing.is_empty() {
            return Err(ValidationError::MissingWing);
        }
        let duration = self.duration.trim();
        if duration.is_empty() {
            return Err(ValidationError::MissingDuration);
        }
        let duration_secs = match duration.parse::<u64>() {
            Ok(0) | Err(_) => return Err(ValidationError::InvalidDuration),
            Ok(n) => n,
        };

        Ok(BookingRequest {
            name: name.to_string(),
            wing: wing.to_string(),
            duration_secs,
        })
    }
}

/// Validate, then submit. A form that fails validation never reaches the network.
pub fn submit(
    source: &dyn RemoteStatusSource,
    form: &BookingForm,
) -> Result<BookingRequest, BookingError> {
    let req = form.validate()?;
    source.submit_booking(&req)?;
    info!(name = %req.name, wing = %req.wing, duration = req.duration_secs, "booking accepted");
    Ok(req)
}

pub const ACCEPTED_MESSAGE: &str = "✅ Booking accepted.";

#[cfg(test)]
#[path = "tests/booking_tests.rs"]
mod tests;
