//! Heimdall - Rate-gated, cached LLM calls for career tooling
//!
//! Every remote completion goes through a [`GuardedCallGate`]: a bounded
//! cache, a [`RateGate`] that paces calls to stay inside a free-tier quota,
//! and a deterministic fallback for when the provider is throttled, down or
//! returns garbage. Callers always get an [`Outcome`], never a provider
//! error.
//!
//! # Assistant Example
//!
//! ```rust,no_run
//! use heimdall::{CareerQuestion, Heimdall};
//!
//! #[tokio::main]
//! async fn main() -> heimdall::Result<()> {
//!     let assistant = Heimdall::builder()
//!         .gemini("your-api-key")
//!         .build()?;
//!
//!     let answer = assistant
//!         .ask(&CareerQuestion::new("How do I prepare for a system design interview?"))
//!         .await;
//!
//!     if let Some(reason) = answer.fallback_reason() {
//!         eprintln!("offline answer ({reason})");
//!     }
//!     println!("{}", answer.value());
//!     Ok(())
//! }
//! ```
//!
//! # Custom Requests
//!
//! Anything implementing [`GuardedRequest`] can be sent through a gate:
//!
//! ```rust,ignore
//! let gate: GuardedCallGate<String> =
//!     GuardedCallGate::new("summaries", provider, GateConfig::default(), &CacheConfig::default());
//! let outcome = gate.invoke(&MySummaryRequest { text }).await;
//! ```

pub mod assistant;
pub mod cache;
#[cfg(feature = "cli")]
pub mod config;
pub mod error;
pub mod fallback;
pub mod gate;
pub mod providers;
pub mod skills;
pub mod telemetry;
pub mod types;
pub mod version;

// Re-export main types at crate root
pub use assistant::{
    Assistant, CareerQuestion, CoverLetterRequest, FeedbackRequest, Heimdall, HeimdallBuilder,
    InterviewSession, JobFitRequest, ResumeReview, ResumeRewrite, RewriteSummary,
};
pub use cache::{CacheConfig, CacheKey, CacheKeyBuilder, CacheStore};
pub use error::{HeimdallError, Result};
pub use gate::{GateConfig, GuardedCallGate, GuardedRequest, RateGate};
pub use providers::{CompletionProvider, GeminiClient, GeminiConfig};
pub use version::{PKG_VERSION, version_string};

// Re-export all types
pub use types::{
    BasicInfo, CategoryScores, Course, FallbackReason, InterviewFeedback, JobFit, MatchLabel,
    Outcome, ResumeAnalysis, Speaker, Tiered, Utterance,
};
