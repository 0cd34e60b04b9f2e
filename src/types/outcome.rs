//! Result of a guarded call: real model output or a degraded substitute.

use serde::{Deserialize, Serialize};

use crate::HeimdallError;

/// Why a fallback was served instead of remote output.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FallbackReason {
    /// Answered locally without consulting the provider (greetings,
    /// off-topic redirects, scripted interview closings).
    Canned,
    /// Provider refused the call for quota or rate-limit reasons.
    QuotaExhausted,
    /// Network, timeout, authentication or other provider failure.
    RemoteError,
    /// Provider answered but the body was empty, too short or undecodable.
    Malformed,
}

impl FallbackReason {
    /// Label used in logs and metrics.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Canned => "canned",
            Self::QuotaExhausted => "quota_exhausted",
            Self::RemoteError => "remote_error",
            Self::Malformed => "malformed",
        }
    }

    /// Classify a provider or interpretation error.
    pub fn classify(err: &HeimdallError) -> Self {
        if err.is_quota() {
            Self::QuotaExhausted
        } else if err.is_malformed() {
            Self::Malformed
        } else {
            Self::RemoteError
        }
    }
}

impl std::fmt::Display for FallbackReason {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Outcome of a guarded call.
///
/// Both variants carry a usable value; the variant tells callers whether
/// the provider actually produced it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "source", rename_all = "snake_case")]
pub enum Outcome<T> {
    /// Output produced by the remote model.
    Remote { value: T },
    /// Locally generated substitute.
    Fallback { value: T, reason: FallbackReason },
}

impl<T> Outcome<T> {
    /// Wrap remote output.
    pub fn remote(value: T) -> Self {
        Self::Remote { value }
    }

    /// Wrap a fallback value.
    pub fn fallback(value: T, reason: FallbackReason) -> Self {
        Self::Fallback { value, reason }
    }

    /// Borrow the carried value regardless of source.
    pub fn value(&self) -> &T {
        match self {
            Self::Remote { value } | Self::Fallback { value, .. } => value,
        }
    }

    /// Take the carried value regardless of source.
    pub fn into_value(self) -> T {
        match self {
            Self::Remote { value } | Self::Fallback { value, .. } => value,
        }
    }

    pub fn is_remote(&self) -> bool {
        matches!(self, Self::Remote { .. })
    }

    pub fn is_fallback(&self) -> bool {
        matches!(self, Self::Fallback { .. })
    }

    /// Fallback reason, or `None` for remote output.
    pub fn fallback_reason(&self) -> Option<FallbackReason> {
        match self {
            Self::Remote { .. } => None,
            Self::Fallback { reason, .. } => Some(*reason),
        }
    }

    /// Transform the carried value, keeping the source.
    pub fn map<U>(self, f: impl FnOnce(T) -> U) -> Outcome<U> {
        match self {
            Self::Remote { value } => Outcome::Remote { value: f(value) },
            Self::Fallback { value, reason } => Outcome::Fallback {
                value: f(value),
                reason,
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn classify_quota_errors() {
        let err = HeimdallError::RateLimited { retry_after: None };
        assert_eq!(FallbackReason::classify(&err), FallbackReason::QuotaExhausted);

        let err = HeimdallError::Api {
            status: 400,
            message: "RESOURCE_EXHAUSTED: daily quota".into(),
        };
        assert_eq!(FallbackReason::classify(&err), FallbackReason::QuotaExhausted);
    }

    #[test]
    fn classify_malformed_and_generic() {
        assert_eq!(
            FallbackReason::classify(&HeimdallError::EmptyResponse),
            FallbackReason::Malformed
        );
        assert_eq!(
            FallbackReason::classify(&HeimdallError::Timeout),
            FallbackReason::RemoteError
        );
        assert_eq!(
            FallbackReason::classify(&HeimdallError::AuthenticationFailed),
            FallbackReason::RemoteError
        );
    }

    #[test]
    fn map_keeps_source() {
        let outcome = Outcome::fallback(2, FallbackReason::Malformed).map(|n| n * 10);
        assert_eq!(outcome.value(), &20);
        assert_eq!(outcome.fallback_reason(), Some(FallbackReason::Malformed));

        let outcome = Outcome::remote("abc").map(str::len);
        assert!(outcome.is_remote());
        assert_eq!(outcome.into_value(), 3);
    }

    #[test]
    fn serializes_with_source_tag() {
        let json = serde_json::to_value(Outcome::fallback("hi", FallbackReason::Canned)).unwrap();
        assert_eq!(json["source"], "fallback");
        assert_eq!(json["reason"], "canned");
        assert_eq!(json["value"], "hi");
    }
}
