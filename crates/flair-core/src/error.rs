//! Error types for effect construction.

/// Result type alias for effect construction.
pub type Result<T> = std::result::Result<T, Error>;

/// Errors raised when an effect or its parameters are built from invalid input.
///
/// Resolvers and drivers never fail; everything is checked once, up front.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum Error {
    /// A duration was given as a negative number of seconds.
    #[error("{field} must not be negative (got {seconds}s)")]
    NegativeDuration { field: &'static str, seconds: f64 },

    /// A numeric parameter was NaN or infinite.
    #[error("{field} must be a finite number")]
    NonFinite { field: &'static str },

    /// A numeric parameter is outside the range the effect supports.
    #[error("invalid value for '{field}': {message}")]
    InvalidParameter {
        field: &'static str,
        message: String,
    },
}

impl Error {
    pub fn invalid(field: &'static str, message: impl Into<String>) -> Self {
        Self::InvalidParameter {
            field,
            message: message.into(),
        }
    }
}

pub(crate) fn finite(field: &'static str, v: f64) -> Result<f64> {
    if v.is_finite() {
        Ok(v)
    } else {
        Err(Error::NonFinite { field })
    }
}

/// Converts float seconds into a `Duration`, rejecting negative, non-finite
/// and out-of-range input.
pub fn duration_from_secs(field: &'static str, seconds: f64) -> Result<web_time::Duration> {
    let seconds = finite(field, seconds)?;
    if seconds < 0.0 {
        return Err(Error::NegativeDuration { field, seconds });
    }
    web_time::Duration::try_from_secs_f64(seconds)
        .map_err(|_| Error::invalid(field, "out of range for a duration"))
}
