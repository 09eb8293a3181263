use thiserror::Error;

/// Classified failures of one cloud-detection call.
///
/// The client performs no retries itself; it surfaces one classified failure
/// per call and lets the caller decide disposition.
#[derive(Debug, Clone, Error)]
pub enum DetectionError {
    /// Network fault, timeout, or provider-side outage. Eligible for a
    /// caller-level retry.
    #[error("Cloud detection provider unavailable: {0}")]
    ProviderUnavailable(String),

    /// The provider rejected the uploaded content. Not retryable.
    #[error("Provider rejected image: {0}")]
    InvalidImage(String),

    /// Bad or missing credential. A configuration problem, not an outage.
    #[error("Cloud detection credential rejected or missing: {0}")]
    Auth(String),
}

impl DetectionError {
    /// Stable identifier used in branch error payloads.
    pub fn kind(&self) -> &'static str {
        match self {
            Self::ProviderUnavailable(_) => "provider_unavailable",
            Self::InvalidImage(_) => "invalid_image",
            Self::Auth(_) => "auth_error",
        }
    }

    pub fn is_retryable(&self) -> bool {
        matches!(self, Self::ProviderUnavailable(_))
    }
}
