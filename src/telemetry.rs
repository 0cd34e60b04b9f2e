//! Telemetry metric name constants.
//!
//! Centralised metric names for heimdall operations. Consumers install
//! their own `metrics` recorder (e.g. prometheus, statsd); without a
//! recorder installed, all metric calls are no-ops.
//!
//! # Metric naming conventions
//!
//! All metrics are prefixed with `heimdall_`. Counters end in `_total`,
//! histograms use meaningful units (e.g. `_seconds`).
//!
//! # Common labels
//!
//! - `gate`: guarded gate name (e.g. "chat", "resume_review")
//! - `status`: remote call outcome: "ok" or "error"
//! - `reason`: fallback reason: "canned", "quota_exhausted", "remote_error", "malformed"

/// Total admissions granted by a rate gate.
///
/// Labels: `gate`.
pub const GATE_ADMISSIONS_TOTAL: &str = "heimdall_gate_admissions_total";

/// Time spent waiting for admission, in seconds.
///
/// Labels: `gate`.
pub const GATE_WAIT_SECONDS: &str = "heimdall_gate_wait_seconds";

/// Total cache hits.
///
/// Labels: `gate`.
pub const CACHE_HITS_TOTAL: &str = "heimdall_cache_hits_total";

/// Total cache misses.
///
/// Labels: `gate`.
pub const CACHE_MISSES_TOTAL: &str = "heimdall_cache_misses_total";

/// Total entries evicted from a full cache.
///
/// Labels: `gate`.
pub const CACHE_EVICTIONS_TOTAL: &str = "heimdall_cache_evictions_total";

/// Total calls made to the remote completion provider.
///
/// Labels: `gate`, `status` ("ok" | "error").
pub const REMOTE_CALLS_TOTAL: &str = "heimdall_remote_calls_total";

/// Remote call duration in seconds.
///
/// Labels: `gate`.
pub const REMOTE_DURATION_SECONDS: &str = "heimdall_remote_duration_seconds";

/// Total fallback responses served instead of remote output.
///
/// Labels: `gate`, `reason`.
pub const FALLBACKS_TOTAL: &str = "heimdall_fallbacks_total";
