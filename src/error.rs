//! Heimdall error types

use std::time::Duration;

/// Heimdall error types
///
/// Only the configuration variants ever reach callers of the assistant;
/// everything raised by a provider is absorbed by
/// [`GuardedCallGate`](crate::gate::GuardedCallGate) and replaced with a
/// fallback.
#[derive(Debug, thiserror::Error)]
pub enum HeimdallError {
    // Provider/network errors
    #[error("HTTP error: {0}")]
    Http(String),

    #[error("request timed out")]
    Timeout,

    #[error("API error ({status}): {message}")]
    Api { status: u16, message: String },

    #[error("rate limited, retry after {retry_after:?}")]
    RateLimited { retry_after: Option<Duration> },

    #[error("quota exhausted: {0}")]
    QuotaExhausted(String),

    #[error("authentication failed")]
    AuthenticationFailed,

    #[error("model not found: {0}")]
    ModelNotFound(String),

    // Data errors
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("empty response from model")]
    EmptyResponse,

    #[error("malformed response: {0}")]
    MalformedResponse(String),

    // Configuration errors
    #[error("no provider configured")]
    NoProvider,

    #[error("configuration error: {0}")]
    Configuration(String),
}

impl HeimdallError {
    /// Whether the provider refused the call for quota or rate reasons.
    ///
    /// Providers are inconsistent about how they report exhaustion, so API
    /// and transport messages are also scanned for the usual markers.
    pub fn is_quota(&self) -> bool {
        match self {
            Self::RateLimited { .. } | Self::QuotaExhausted(_) => true,
            Self::Api { status, message } => *status == 429 || mentions_quota(message),
            Self::Http(message) => mentions_quota(message),
            _ => false,
        }
    }

    /// Whether the provider answered but the body was unusable.
    pub fn is_malformed(&self) -> bool {
        matches!(
            self,
            Self::Json(_) | Self::EmptyResponse | Self::MalformedResponse(_)
        )
    }

    /// Whether this error means the system was never wired up correctly.
    pub fn is_configuration(&self) -> bool {
        matches!(self, Self::NoProvider | Self::Configuration(_))
    }

    /// Provider-suggested wait before the next attempt, if any.
    pub fn retry_after(&self) -> Option<Duration> {
        match self {
            Self::RateLimited { retry_after } => *retry_after,
            _ => None,
        }
    }
}

const QUOTA_MARKERS: &[&str] = &["429", "quota", "resource_exhausted", "rate limit"];

fn mentions_quota(message: &str) -> bool {
    let message = message.to_lowercase();
    QUOTA_MARKERS.iter().any(|marker| message.contains(marker))
}

impl From<reqwest::Error> for HeimdallError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_timeout() {
            HeimdallError::Timeout
        } else {
            HeimdallError::Http(err.to_string())
        }
    }
}

/// Result type alias for Heimdall operations
pub type Result<T> = std::result::Result<T, HeimdallError>;
