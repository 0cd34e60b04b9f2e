//! Career assistant features built on guarded calls.
//!
//! [`Assistant`] owns one guarded gate per feature. Career chat has its own
//! rate gate. Résumé review, job fit, cover letters and résumé rewrites draw
//! on one shared "tools" rate gate, since they spend the same provider
//! quota. Interview turns and feedback are paced by a separate, faster gate
//! so a conversation keeps moving.

mod builder;
pub mod chat;
pub mod cover_letter;
pub mod interview;
pub mod job_fit;
pub mod parse;
pub mod resume;
pub mod rewrite;

pub use builder::{Heimdall, HeimdallBuilder};
pub use chat::CareerQuestion;
pub use cover_letter::CoverLetterRequest;
pub use interview::{FeedbackRequest, InterviewSession, MAX_QUESTIONS};
pub use job_fit::JobFitRequest;
pub use resume::ResumeReview;
pub use rewrite::{ResumeRewrite, RewriteSummary};

use std::sync::Arc;

use crate::gate::{GuardedCallGate, RateGate};
use crate::types::{InterviewFeedback, JobFit, Outcome, ResumeAnalysis};

/// Entry point for all assistant features.
///
/// Every method returns an [`Outcome`]; provider failures never surface as
/// errors.
pub struct Assistant {
    pub(crate) chat: GuardedCallGate<String>,
    pub(crate) resume: GuardedCallGate<ResumeAnalysis>,
    pub(crate) job_fit: GuardedCallGate<JobFit>,
    pub(crate) cover_letter: GuardedCallGate<String>,
    pub(crate) rewrite: GuardedCallGate<String>,
    pub(crate) rewrite_summary: GuardedCallGate<String>,
    pub(crate) interview: GuardedCallGate<String>,
    pub(crate) feedback: GuardedCallGate<InterviewFeedback>,
    pub(crate) tools: Arc<RateGate>,
    pub(crate) interview_pacing: Arc<RateGate>,
}

impl Assistant {
    /// Answer a career question.
    pub async fn ask(&self, question: &CareerQuestion) -> Outcome<String> {
        self.chat.invoke(question).await
    }

    pub async fn review_resume(&self, review: &ResumeReview) -> Outcome<ResumeAnalysis> {
        self.resume.invoke(review).await
    }

    pub async fn job_fit(&self, request: &JobFitRequest) -> Outcome<JobFit> {
        self.job_fit.invoke(request).await
    }

    pub async fn cover_letter(&self, request: &CoverLetterRequest) -> Outcome<String> {
        self.cover_letter.invoke(request).await
    }

    /// Rewrite a résumé as plain-text sections.
    pub async fn rewrite_resume(&self, request: &ResumeRewrite) -> Outcome<String> {
        self.rewrite.invoke(request).await
    }

    /// List the main improvements between an original and a rewritten résumé.
    pub async fn summarize_rewrite(&self, request: &RewriteSummary) -> Outcome<String> {
        self.rewrite_summary.invoke(request).await
    }

    /// Start (or restart) a mock interview and return the first question.
    pub async fn open_interview(&self, session: &mut InterviewSession) -> Outcome<String> {
        session.restart();
        self.interview_turn(session).await
    }

    /// Record the candidate's answer and return the interviewer's next line.
    ///
    /// Once [`MAX_QUESTIONS`] is reached the reply is a fixed closing
    /// statement and no remote call is made.
    pub async fn continue_interview(
        &self,
        session: &mut InterviewSession,
        answer: &str,
    ) -> Outcome<String> {
        session.record_answer(answer);
        self.interview_turn(session).await
    }

    pub async fn interview_feedback(&self, session: &InterviewSession) -> Outcome<InterviewFeedback> {
        self.feedback.invoke(&FeedbackRequest::new(session)).await
    }

    async fn interview_turn(&self, session: &mut InterviewSession) -> Outcome<String> {
        let outcome = {
            let turn = session.next_turn();
            self.interview.invoke(&turn).await
        };
        session.record_question(outcome.value());
        outcome
    }

    pub fn chat_gate(&self) -> &GuardedCallGate<String> {
        &self.chat
    }

    /// Rate gate shared by the structured tools.
    pub fn tools_gate(&self) -> &Arc<RateGate> {
        &self.tools
    }

    /// Rate gate pacing interview turns and feedback.
    pub fn interview_gate(&self) -> &Arc<RateGate> {
        &self.interview_pacing
    }
}
