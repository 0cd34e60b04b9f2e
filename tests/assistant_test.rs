//! End-to-end tests for assistant features over a mock provider.

use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::time::Duration;

use async_trait::async_trait;

use heimdall::assistant::MAX_QUESTIONS;
use heimdall::assistant::interview::CLOSING_STATEMENT;
use heimdall::providers::CompletionProvider;
use heimdall::{
    Assistant, CacheConfig, CoverLetterRequest, FallbackReason, GateConfig, Heimdall,
    HeimdallError, InterviewSession, JobFitRequest, MatchLabel, ResumeReview, ResumeRewrite,
    Result, RewriteSummary, Speaker,
};

// ============================================================================
// Mock providers
// ============================================================================

/// Returns a fixed completion and counts calls.
struct FixedProvider {
    reply: String,
    calls: AtomicUsize,
}

impl FixedProvider {
    fn new(reply: impl Into<String>) -> Arc<Self> {
        Arc::new(Self {
            reply: reply.into(),
            calls: AtomicUsize::new(0),
        })
    }

    fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl CompletionProvider for FixedProvider {
    fn name(&self) -> &str {
        "fixed"
    }

    async fn complete(&self, _prompt: &str) -> Result<String> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        Ok(self.reply.clone())
    }
}

struct ExhaustedProvider;

#[async_trait]
impl CompletionProvider for ExhaustedProvider {
    fn name(&self) -> &str {
        "exhausted"
    }

    async fn complete(&self, _prompt: &str) -> Result<String> {
        Err(HeimdallError::QuotaExhausted("free tier".to_string()))
    }
}

fn assistant(provider: Arc<dyn CompletionProvider>) -> Assistant {
    Heimdall::builder()
        .provider(provider)
        .chat_gate(GateConfig::unthrottled())
        .tools_gate(GateConfig::unthrottled())
        .interview_gate(GateConfig::unthrottled())
        .build()
        .unwrap()
}

const RESUME: &str = "Skills: Kotlin, Java\n\nBuilt two Android apps.";

// ============================================================================
// Builder
// ============================================================================

#[test]
fn build_without_provider_fails() {
    let err = Heimdall::builder().build().err().unwrap();
    assert!(matches!(err, HeimdallError::NoProvider));
    assert!(err.is_configuration());
}

#[test]
fn build_with_empty_gemini_key_fails() {
    let err = Heimdall::builder().gemini("").build().err().unwrap();
    assert!(err.is_configuration());
}

#[test]
fn tools_share_one_rate_gate() {
    let assistant = Heimdall::builder()
        .provider(FixedProvider::new("unused"))
        .tools_cache(CacheConfig::new().max_entries(10))
        .build()
        .unwrap();
    assert_eq!(assistant.tools_gate().name(), "tools");
    assert_eq!(assistant.tools_gate().config().max_per_window, 5);
    assert_eq!(assistant.chat_gate().rate_gate().config().max_per_window, 10);
}

#[test]
fn interviews_use_their_own_gate() {
    let assistant = Heimdall::builder()
        .provider(FixedProvider::new("unused"))
        .build()
        .unwrap();
    let interview = assistant.interview_gate();
    assert_eq!(interview.name(), "interview");
    assert_eq!(interview.config().min_interval, Duration::from_secs(5));
    assert!(!Arc::ptr_eq(interview, assistant.tools_gate()));
}

// ============================================================================
// Remote results
// ============================================================================

#[tokio::test]
async fn job_fit_decodes_fenced_json() {
    let provider = FixedProvider::new(
        "```json\n{\"match_score\": 8.5, \"match_label\": \"Strong Match\", \"actionable_tip\": \"Lead with your Kotlin work\"}\n```",
    );
    let assistant = assistant(provider.clone());

    let fit = assistant
        .job_fit(&JobFitRequest::new(RESUME, "Android developer, Kotlin"))
        .await;
    assert!(fit.is_remote());
    assert_eq!(fit.value().match_label, MatchLabel::Strong);
    assert_eq!(provider.calls(), 1);
}

#[tokio::test]
async fn job_fit_rejects_score_outside_scale() {
    let provider = FixedProvider::new(
        r#"{"match_score": 85, "match_label": "Strong Match", "actionable_tip": "Apply now"}"#,
    );
    let assistant = assistant(provider);

    let fit = assistant
        .job_fit(&JobFitRequest::new(RESUME, "Android developer, Kotlin"))
        .await;
    assert_eq!(fit.fallback_reason(), Some(FallbackReason::Malformed));
    assert!(fit.value().match_score <= 10.0);
}

#[tokio::test]
async fn resume_review_accepts_fractional_scores() {
    let provider = FixedProvider::new(
        r#"{"Overall_Score": 72.5, "Category_Scores": {
            "Presentation & Format": 80, "Skills": 70, "Projects": 65.5,
            "Education": 75, "Experience": 60, "Certifications": 50,
            "Achievements": 55}, "Strengths": ["Clear layout"]}"#,
    );
    let assistant = assistant(provider);

    let review = assistant
        .review_resume(&ResumeReview::new(RESUME, "Android Developer"))
        .await;
    assert!(review.is_remote());
    assert_eq!(review.value().overall_score, 72.5);
    assert_eq!(review.value().basic_info.pages, 1);
}

#[tokio::test]
async fn resume_review_rejects_partial_json() {
    let provider = FixedProvider::new("{\"Overall_Score\": 80}");
    let assistant = assistant(provider);

    let review = assistant
        .review_resume(&ResumeReview::new(RESUME, "Android Developer"))
        .await;
    assert_eq!(review.fallback_reason(), Some(FallbackReason::Malformed));
    assert_eq!(review.value().overall_score, 65.0);
}

// ============================================================================
// Fallbacks
// ============================================================================

#[tokio::test]
async fn every_feature_answers_when_quota_is_gone() {
    let assistant = assistant(Arc::new(ExhaustedProvider));

    let review = assistant
        .review_resume(
            &ResumeReview::new(RESUME, "Android Developer")
                .job_description("Android, Kotlin, Java, Flutter"),
        )
        .await;
    assert_eq!(review.fallback_reason(), Some(FallbackReason::QuotaExhausted));
    // Android is mentioned in the body, so only Flutter is missing.
    assert_eq!(review.value().skills_to_improve, vec!["flutter"]);

    let fit = assistant
        .job_fit(&JobFitRequest::new(RESUME, "Android, Kotlin, Java, Flutter"))
        .await;
    assert_eq!(fit.value().match_label, MatchLabel::Moderate);
    assert!(fit.value().actionable_tip.ends_with("flutter"));

    let letter = assistant
        .cover_letter(&CoverLetterRequest::new(RESUME, "Android Developer").company("Acme"))
        .await;
    assert!(letter.is_fallback());
    assert!(letter.value().contains("Android Developer position at Acme"));

    let rewrite = ResumeRewrite::new(RESUME, "Android Developer")
        .job_description("Android, Kotlin, Java, Flutter");
    let rewritten = assistant.rewrite_resume(&rewrite).await;
    assert_eq!(rewritten.fallback_reason(), Some(FallbackReason::QuotaExhausted));
    assert!(rewritten.value().contains("• Add evidence of: flutter"));

    let summary = assistant
        .summarize_rewrite(&RewriteSummary::new(RESUME, rewritten.value()))
        .await;
    assert!(summary.is_fallback());
    assert_eq!(summary.value().lines().filter(|l| l.starts_with("• ")).count(), 5);
}

#[tokio::test]
async fn rewrite_returns_remote_text() {
    let provider = FixedProvider::new("PROFESSIONAL SUMMARY\nAndroid developer shipping Kotlin apps.");
    let assistant = assistant(provider.clone());

    let rewrite = ResumeRewrite::new(RESUME, "Android Developer");
    let first = assistant.rewrite_resume(&rewrite).await;
    let second = assistant.rewrite_resume(&rewrite).await;
    assert!(first.is_remote());
    assert_eq!(first, second);
    assert_eq!(provider.calls(), 1);
}

#[tokio::test]
async fn interview_runs_to_closing_offline() {
    let assistant = assistant(Arc::new(ExhaustedProvider));
    let mut session = InterviewSession::new("Android Developer", RESUME);

    let opening = assistant.open_interview(&mut session).await;
    assert_eq!(opening.fallback_reason(), Some(FallbackReason::QuotaExhausted));
    assert!(opening.value().contains("Android Developer position"));

    let mut last = opening;
    for n in 2..=MAX_QUESTIONS {
        last = assistant
            .continue_interview(&mut session, &format!("Answer number {n} with some detail."))
            .await;
    }
    assert_eq!(last.fallback_reason(), Some(FallbackReason::Canned));
    assert_eq!(last.value(), CLOSING_STATEMENT);
    assert!(session.is_finished());

    let transcript = session.transcript();
    assert_eq!(transcript.len(), 2 * MAX_QUESTIONS - 1);
    assert_eq!(transcript[0].speaker, Speaker::Interviewer);
    assert_eq!(transcript[1].speaker, Speaker::Candidate);

    let feedback = assistant.interview_feedback(&session).await;
    assert!(feedback.is_fallback());
    assert_eq!(feedback.value().technical_score, "7/10");
    assert!(feedback.value().overall_comment.contains("Android Developer"));
}

#[tokio::test]
async fn closing_turn_skips_provider() {
    let provider = FixedProvider::new("Great. Tell me about a recent project you led.");
    let assistant = assistant(provider.clone());
    let mut session = InterviewSession::new("Engineer", RESUME);

    assistant.open_interview(&mut session).await;
    for n in 2..=MAX_QUESTIONS {
        assistant
            .continue_interview(&mut session, &format!("answer {n}"))
            .await;
    }
    // Opening plus four follow-ups reach the provider; the closing does not.
    assert_eq!(provider.calls(), MAX_QUESTIONS - 1);
}

#[tokio::test(start_paused = true)]
async fn interview_pacing_ignores_tool_traffic() {
    let provider = FixedProvider::new("Tell me about a project you are proud of.");
    let assistant = Heimdall::builder().provider(provider).build().unwrap();
    let start = tokio::time::Instant::now();

    assistant
        .job_fit(&JobFitRequest::new(RESUME, "Android developer"))
        .await;
    let mut session = InterviewSession::new("Engineer", RESUME);
    assistant.open_interview(&mut session).await;
    assert_eq!(start.elapsed(), Duration::ZERO);

    assistant.continue_interview(&mut session, "first answer").await;
    let waited = start.elapsed();
    assert!(waited >= Duration::from_secs(5));
    assert!(waited < Duration::from_secs(10));
}

#[tokio::test]
async fn reopening_resets_session() {
    let assistant = assistant(Arc::new(ExhaustedProvider));
    let mut session = InterviewSession::new("Engineer", RESUME);

    assistant.open_interview(&mut session).await;
    assistant.continue_interview(&mut session, "first answer").await;
    assistant.open_interview(&mut session).await;

    assert_eq!(session.questions_asked(), 1);
    assert_eq!(session.transcript().len(), 1);
}
