//! Admission control for outbound provider calls.
//!
//! A [`RateGate`] combines two limits:
//!
//! - a sliding-window quota: at most `max_per_window` admissions in any
//!   trailing `window` (60 s by default);
//! - a minimum interval between consecutive admissions.
//!
//! [`RateGate::admit`] suspends the calling task until both limits allow
//! another call, then records the admission. The entire check → sleep →
//! record sequence runs under an async mutex, so concurrent callers are
//! admitted strictly one after another and can never both slip through the
//! interval check.

use std::collections::VecDeque;
use std::time::Duration;

use tokio::sync::Mutex;
use tokio::time::Instant;
use tracing::info;

/// Limits enforced by a [`RateGate`].
///
/// ```rust
/// # use heimdall::GateConfig;
/// # use std::time::Duration;
/// let config = GateConfig::new()
///     .min_interval(Duration::from_secs(3))
///     .max_per_window(10);
/// assert_eq!(config.window, Duration::from_secs(60));
/// ```
#[derive(Debug, Clone)]
pub struct GateConfig {
    /// Minimum time between consecutive admissions. Default: 10s.
    pub min_interval: Duration,
    /// Maximum admissions per window. Default: 5. Clamped to at least 1.
    pub max_per_window: usize,
    /// Length of the sliding window. Default: 60s.
    pub window: Duration,
    /// Extra wait added once the window is full. Default: 1s.
    pub slack: Duration,
}

impl Default for GateConfig {
    fn default() -> Self {
        Self {
            min_interval: Duration::from_secs(10),
            max_per_window: 5,
            window: Duration::from_secs(60),
            slack: Duration::from_secs(1),
        }
    }
}

impl GateConfig {
    /// Create a new config with the default limits.
    pub fn new() -> Self {
        Self::default()
    }

    /// Looser limits for conversational traffic: 5s interval, 10 per minute.
    pub fn chat() -> Self {
        Self {
            min_interval: Duration::from_secs(5),
            max_per_window: 10,
            ..Self::default()
        }
    }

    /// Pacing for mock-interview turns and feedback: 5s interval.
    pub fn interview() -> Self {
        Self {
            min_interval: Duration::from_secs(5),
            max_per_window: 10,
            ..Self::default()
        }
    }

    /// No waiting at all. Useful for tests and local providers.
    pub fn unthrottled() -> Self {
        Self {
            min_interval: Duration::ZERO,
            max_per_window: usize::MAX,
            window: Duration::from_secs(60),
            slack: Duration::ZERO,
        }
    }

    /// Set the minimum interval between admissions.
    pub fn min_interval(mut self, interval: Duration) -> Self {
        self.min_interval = interval;
        self
    }

    /// Set the per-window quota.
    pub fn max_per_window(mut self, n: usize) -> Self {
        self.max_per_window = n;
        self
    }

    /// Set the sliding window length.
    pub fn window(mut self, window: Duration) -> Self {
        self.window = window;
        self
    }

    /// Set the extra wait applied after a full window.
    pub fn slack(mut self, slack: Duration) -> Self {
        self.slack = slack;
        self
    }
}

#[derive(Default)]
struct GateState {
    last_admission: Option<Instant>,
    recent: VecDeque<Instant>,
}

impl GateState {
    fn prune(&mut self, now: Instant, window: Duration) {
        while let Some(&oldest) = self.recent.front() {
            if now.saturating_duration_since(oldest) < window {
                break;
            }
            self.recent.pop_front();
        }
    }
}

/// Sliding-window + minimum-interval admission gate.
pub struct RateGate {
    name: String,
    config: GateConfig,
    state: Mutex<GateState>,
}

impl RateGate {
    /// Create a gate. `name` labels logs and metrics.
    pub fn new(name: impl Into<String>, mut config: GateConfig) -> Self {
        config.max_per_window = config.max_per_window.max(1);
        Self {
            name: name.into(),
            config,
            state: Mutex::new(GateState::default()),
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn config(&self) -> &GateConfig {
        &self.config
    }

    /// Wait until a call may proceed, then record the admission.
    ///
    /// Returns the total time spent waiting.
    pub async fn admit(&self) -> Duration {
        let mut state = self.state.lock().await;
        let mut waited = Duration::ZERO;

        let now = Instant::now();
        state.prune(now, self.config.window);
        if state.recent.len() >= self.config.max_per_window {
            if let Some(&oldest) = state.recent.front() {
                let wait = (oldest + self.config.window + self.config.slack)
                    .saturating_duration_since(now);
                if !wait.is_zero() {
                    info!(
                        gate = %self.name,
                        limit = self.config.max_per_window,
                        wait_ms = wait.as_millis() as u64,
                        "window quota reached, waiting"
                    );
                    tokio::time::sleep(wait).await;
                    waited += wait;
                }
            }
            state.recent.clear();
        }

        if let Some(last) = state.last_admission {
            let since = Instant::now().saturating_duration_since(last);
            if since < self.config.min_interval {
                let wait = self.config.min_interval - since;
                info!(
                    gate = %self.name,
                    wait_ms = wait.as_millis() as u64,
                    "minimum interval not elapsed, waiting"
                );
                tokio::time::sleep(wait).await;
                waited += wait;
            }
        }

        let admitted = Instant::now();
        state.last_admission = Some(admitted);
        state.recent.push_back(admitted);
        self.record(waited);
        waited
    }

    /// Number of admissions inside the current window.
    pub async fn window_len(&self) -> usize {
        let mut state = self.state.lock().await;
        state.prune(Instant::now(), self.config.window);
        state.recent.len()
    }

    /// Forget all recorded admissions.
    pub async fn reset(&self) {
        let mut state = self.state.lock().await;
        *state = GateState::default();
    }

    fn record(&self, waited: Duration) {
        metrics::counter!(crate::telemetry::GATE_ADMISSIONS_TOTAL, "gate" => self.name.clone())
            .increment(1);
        metrics::histogram!(crate::telemetry::GATE_WAIT_SECONDS, "gate" => self.name.clone())
            .record(waited.as_secs_f64());
    }
}
