//! Tests for metrics emitted by guarded calls.
//!
//! Uses `metrics_util::debugging::DebuggingRecorder` to capture and assert
//! on emitted metrics without needing a real exporter.

use std::sync::Arc;

use async_trait::async_trait;
use metrics_util::MetricKind;
use metrics_util::debugging::{DebugValue, DebuggingRecorder};

use heimdall::providers::CompletionProvider;
use heimdall::telemetry;
use heimdall::{CareerQuestion, GateConfig, Heimdall, HeimdallError, Result};

// ============================================================================
// Mock providers
// ============================================================================

struct HelpfulProvider;

#[async_trait]
impl CompletionProvider for HelpfulProvider {
    fn name(&self) -> &str {
        "helpful"
    }

    async fn complete(&self, _prompt: &str) -> Result<String> {
        Ok("Build two portfolio projects and share them publicly.".to_string())
    }
}

struct FailingProvider;

#[async_trait]
impl CompletionProvider for FailingProvider {
    fn name(&self) -> &str {
        "failing"
    }

    async fn complete(&self, _prompt: &str) -> Result<String> {
        Err(HeimdallError::AuthenticationFailed)
    }
}

// ============================================================================
// Snapshot type alias for readability
// ============================================================================

type SnapshotVec = Vec<(
    metrics_util::CompositeKey,
    Option<metrics::Unit>,
    Option<metrics::SharedString>,
    DebugValue,
)>;

// ============================================================================
// Helpers
// ============================================================================

/// Sum all counter values matching a given metric name.
fn counter_total(snapshot: &SnapshotVec, name: &str) -> u64 {
    snapshot
        .iter()
        .filter(|(key, _, _, _)| key.kind() == MetricKind::Counter && key.key().name() == name)
        .map(|(_, _, _, value)| match value {
            DebugValue::Counter(v) => *v,
            _ => 0,
        })
        .sum()
}

/// Check if any histogram entries exist for a given metric name.
fn has_histogram(snapshot: &SnapshotVec, name: &str) -> bool {
    snapshot
        .iter()
        .any(|(key, _, _, _)| key.kind() == MetricKind::Histogram && key.key().name() == name)
}

/// Whether a counter with the given name carries `label = value`.
fn counter_has_label(snapshot: &SnapshotVec, name: &str, label: &str, value: &str) -> bool {
    snapshot.iter().any(|(key, _, _, _)| {
        key.kind() == MetricKind::Counter
            && key.key().name() == name
            && key
                .key()
                .labels()
                .any(|l| l.key() == label && l.value() == value)
    })
}

/// Run two identical questions through a fresh assistant under a local recorder.
fn run_twice(provider: Arc<dyn CompletionProvider>) -> SnapshotVec {
    let recorder = DebuggingRecorder::new();
    let snapshotter = recorder.snapshotter();

    metrics::with_local_recorder(&recorder, || {
        tokio::task::block_in_place(|| {
            tokio::runtime::Handle::current().block_on(async {
                let assistant = Heimdall::builder()
                    .provider(provider)
                    .chat_gate(GateConfig::unthrottled())
                    .build()
                    .unwrap();
                let question = CareerQuestion::new("How do I build a portfolio?");
                assistant.ask(&question).await;
                assistant.ask(&question).await;
            })
        })
    });

    snapshotter.snapshot().into_vec()
}

// ============================================================================
// Tests
// ============================================================================

/// Runs async code within a local recorder scope on the multi-thread runtime.
///
/// `block_in_place` ensures the sync `with_local_recorder` closure stays
/// on the current thread while `block_on` drives the inner async work.
#[tokio::test(flavor = "multi_thread", worker_threads = 1)]
async fn successful_call_records_metrics() {
    let snapshot = run_twice(Arc::new(HelpfulProvider));

    assert_eq!(counter_total(&snapshot, telemetry::CACHE_MISSES_TOTAL), 1);
    assert_eq!(counter_total(&snapshot, telemetry::CACHE_HITS_TOTAL), 1);
    assert_eq!(counter_total(&snapshot, telemetry::GATE_ADMISSIONS_TOTAL), 1);
    assert_eq!(counter_total(&snapshot, telemetry::REMOTE_CALLS_TOTAL), 1);
    assert_eq!(counter_total(&snapshot, telemetry::FALLBACKS_TOTAL), 0);
    assert!(counter_has_label(
        &snapshot,
        telemetry::REMOTE_CALLS_TOTAL,
        "status",
        "ok"
    ));
    assert!(has_histogram(&snapshot, telemetry::REMOTE_DURATION_SECONDS));
    assert!(has_histogram(&snapshot, telemetry::GATE_WAIT_SECONDS));
}

#[tokio::test(flavor = "multi_thread", worker_threads = 1)]
async fn failed_call_records_fallback() {
    let snapshot = run_twice(Arc::new(FailingProvider));

    assert_eq!(counter_total(&snapshot, telemetry::FALLBACKS_TOTAL), 1);
    assert!(counter_has_label(
        &snapshot,
        telemetry::FALLBACKS_TOTAL,
        "reason",
        "remote_error"
    ));
    assert!(counter_has_label(
        &snapshot,
        telemetry::REMOTE_CALLS_TOTAL,
        "status",
        "error"
    ));
    assert!(counter_has_label(
        &snapshot,
        telemetry::FALLBACKS_TOTAL,
        "gate",
        "chat"
    ));
}
