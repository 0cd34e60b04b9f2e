//! Cache + rate gate + fallback around a remote completion.
//!
//! # Call flow
//!
//! ```text
//! invoke(request)
//!     │
//!     ├── cache hit? ─────────────────────────────► cached Outcome
//!     │
//!     ├── local reply? ── store ──────────────────► Fallback(Canned)
//!     │
//!     ├── RateGate::admit()  (may sleep)
//!     │
//!     ├── provider.complete(prompt)
//!     │       ├── Ok(raw) ── interpret ── Ok ─────► Remote
//!     │       │                      └── Err ────► Fallback(Malformed)
//!     │       └── Err(e) ─── classify ────────────► Fallback(QuotaExhausted | RemoteError | Malformed)
//!     │
//!     └── store outcome in cache, return it
//! ```
//!
//! Nothing is retried here; the gate's own wait is the only backoff. Errors
//! never leave [`GuardedCallGate::invoke`].

use std::sync::Arc;
use std::time::Instant;

use tracing::{debug, instrument, warn};

use super::rate::{GateConfig, RateGate};
use crate::Result;
use crate::cache::{CacheConfig, CacheKey, CacheStore};
use crate::providers::CompletionProvider;
use crate::telemetry;
use crate::types::{FallbackReason, Outcome};

/// A request that can be sent through a [`GuardedCallGate`].
///
/// Implementors decide what is relevant for caching, how the prompt reads,
/// how raw completions are validated, and what to answer when the provider
/// is unavailable.
pub trait GuardedRequest: Send + Sync {
    type Output: Clone + Send + Sync + 'static;

    /// Operation name for logs.
    fn operation(&self) -> &'static str;

    /// Key derived from the semantically relevant fields.
    fn cache_key(&self) -> CacheKey;

    /// Answer that needs no provider at all. Default: none.
    fn local_reply(&self) -> Option<Self::Output> {
        None
    }

    /// Prompt sent to the provider.
    fn prompt(&self) -> String;

    /// Validate and decode a raw completion. Errors trigger the fallback.
    fn interpret(&self, raw: &str) -> Result<Self::Output>;

    /// Deterministic substitute for unusable or missing remote output.
    fn fallback(&self) -> Self::Output;
}

/// Guarded access to one logical remote capability.
///
/// Owns its cache; the [`RateGate`] may be shared with other guarded gates
/// that draw on the same provider quota.
pub struct GuardedCallGate<T> {
    name: String,
    provider: Arc<dyn CompletionProvider>,
    gate: Arc<RateGate>,
    cache: CacheStore<Outcome<T>>,
}

impl<T: Clone + Send + Sync + 'static> GuardedCallGate<T> {
    /// Create a guarded gate with its own rate gate.
    pub fn new(
        name: impl Into<String>,
        provider: Arc<dyn CompletionProvider>,
        gate_config: GateConfig,
        cache_config: &CacheConfig,
    ) -> Self {
        let name = name.into();
        let gate = Arc::new(RateGate::new(name.clone(), gate_config));
        Self::with_shared_gate(name, provider, gate, cache_config)
    }

    /// Create a guarded gate that shares an existing rate gate.
    pub fn with_shared_gate(
        name: impl Into<String>,
        provider: Arc<dyn CompletionProvider>,
        gate: Arc<RateGate>,
        cache_config: &CacheConfig,
    ) -> Self {
        Self {
            name: name.into(),
            provider,
            gate,
            cache: CacheStore::new(cache_config),
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn rate_gate(&self) -> &Arc<RateGate> {
        &self.gate
    }

    pub fn cache(&self) -> &CacheStore<Outcome<T>> {
        &self.cache
    }

    /// Run a request, always producing a usable outcome.
    #[instrument(skip_all, fields(gate = %self.name, operation = request.operation()))]
    pub async fn invoke<R>(&self, request: &R) -> Outcome<T>
    where
        R: GuardedRequest<Output = T> + ?Sized,
    {
        let key = request.cache_key();
        if let Some(hit) = self.cache.get(&key) {
            metrics::counter!(telemetry::CACHE_HITS_TOTAL, "gate" => self.name.clone())
                .increment(1);
            debug!("using cached result");
            return hit;
        }
        metrics::counter!(telemetry::CACHE_MISSES_TOTAL, "gate" => self.name.clone())
            .increment(1);

        if let Some(value) = request.local_reply() {
            debug!("answered locally");
            return self.finish(key, Outcome::fallback(value, FallbackReason::Canned));
        }

        self.gate.admit().await;

        let prompt = request.prompt();
        let start = Instant::now();
        let result = self.provider.complete(&prompt).await;
        self.record_remote(start, result.is_ok());

        let outcome = match result.and_then(|raw| request.interpret(&raw)) {
            Ok(value) => Outcome::remote(value),
            Err(e) => {
                let reason = FallbackReason::classify(&e);
                match reason {
                    FallbackReason::QuotaExhausted => {
                        warn!(provider = self.provider.name(), error = %e, "provider quota exhausted, using fallback")
                    }
                    FallbackReason::Malformed => {
                        warn!(provider = self.provider.name(), error = %e, "unusable completion, using fallback")
                    }
                    _ => {
                        warn!(provider = self.provider.name(), error = %e, "remote call failed, using fallback")
                    }
                }
                Outcome::fallback(request.fallback(), reason)
            }
        };

        self.finish(key, outcome)
    }

    fn finish(&self, key: CacheKey, outcome: Outcome<T>) -> Outcome<T> {
        if let Some(reason) = outcome.fallback_reason() {
            metrics::counter!(telemetry::FALLBACKS_TOTAL,
                "gate" => self.name.clone(),
                "reason" => reason.as_str(),
            )
            .increment(1);
        }
        if let Some(evicted) = self.cache.put(key, outcome.clone()) {
            metrics::counter!(telemetry::CACHE_EVICTIONS_TOTAL, "gate" => self.name.clone())
                .increment(1);
            debug!(evicted = evicted.as_u64(), "cache full, evicted oldest entry");
        }
        outcome
    }

    fn record_remote(&self, start: Instant, ok: bool) {
        let status = if ok { "ok" } else { "error" };
        metrics::counter!(telemetry::REMOTE_CALLS_TOTAL,
            "gate" => self.name.clone(),
            "status" => status,
        )
        .increment(1);
        metrics::histogram!(telemetry::REMOTE_DURATION_SECONDS, "gate" => self.name.clone())
            .record(start.elapsed().as_secs_f64());
    }
}
