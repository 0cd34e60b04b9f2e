//! Core types for guarded calls and assistant results

pub mod analysis;
pub mod interview;
pub mod outcome;

pub use analysis::{BasicInfo, CategoryScores, Course, JobFit, MatchLabel, ResumeAnalysis, Tiered};
pub use interview::{InterviewFeedback, Speaker, Utterance};
pub use outcome::{FallbackReason, Outcome};
