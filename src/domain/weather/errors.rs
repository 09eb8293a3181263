use thiserror::Error;

/// Classified failures of one weather provider call.
#[derive(Debug, Clone, Error)]
pub enum WeatherError {
    /// Caller input malformed (e.g. forecast horizon out of range).
    /// Rejected before any network call is issued.
    #[error("Invalid parameters: {0}")]
    InvalidParameters(String),

    /// The provider understood the request but the location does not
    /// resolve. Not retryable.
    #[error("Location '{0}' not found")]
    LocationNotFound(String),

    /// Network fault, timeout, or provider-side outage. Eligible for a
    /// caller-level retry.
    #[error("Weather provider unavailable: {0}")]
    ProviderUnavailable(String),

    /// Bad or missing credential. A configuration problem, not an outage.
    #[error("Weather credential rejected or missing: {0}")]
    Auth(String),
}

impl WeatherError {
    /// Stable identifier used in branch error payloads.
    pub fn kind(&self) -> &'static str {
        match self {
            Self::InvalidParameters(_) => "invalid_parameters",
            Self::LocationNotFound(_) => "location_not_found",
            Self::ProviderUnavailable(_) => "provider_unavailable",
            Self::Auth(_) => "auth_error",
        }
    }

    pub fn is_retryable(&self) -> bool {
        matches!(self, Self::ProviderUnavailable(_))
    }
}
