//! Free-form career questions.

use super::parse::{clip, require_text};
use crate::Result;
use crate::cache::{CacheKey, CacheKeyBuilder};
use crate::fallback;
use crate::gate::GuardedRequest;

/// Role context sent with a question.
const ROLE_CONTEXT_CHARS: usize = 100;

/// A career question, with whatever context the user has provided.
#[derive(Debug, Clone, Default)]
pub struct CareerQuestion {
    pub question: String,
    /// Whether the user has uploaded a résumé.
    pub has_resume: bool,
    pub job_role: Option<String>,
    pub job_description: Option<String>,
}

impl CareerQuestion {
    pub fn new(question: impl Into<String>) -> Self {
        Self {
            question: question.into(),
            ..Self::default()
        }
    }

    pub fn with_resume(mut self, has_resume: bool) -> Self {
        self.has_resume = has_resume;
        self
    }

    pub fn job_role(mut self, role: impl Into<String>) -> Self {
        self.job_role = Some(role.into());
        self
    }

    pub fn job_description(mut self, description: impl Into<String>) -> Self {
        self.job_description = Some(description.into());
        self
    }
}

impl GuardedRequest for CareerQuestion {
    type Output = String;

    fn operation(&self) -> &'static str {
        "career_chat"
    }

    fn cache_key(&self) -> CacheKey {
        CacheKeyBuilder::new(self.operation())
            .text(&self.question)
            .flag(self.has_resume)
            .optional_text(self.job_role.as_deref())
            .optional_text(self.job_description.as_deref())
            .finish()
    }

    fn local_reply(&self) -> Option<String> {
        fallback::quick_reply(&self.question).map(str::to_string)
    }

    fn prompt(&self) -> String {
        let role = self
            .job_role
            .as_deref()
            .map(str::trim)
            .filter(|r| !r.is_empty())
            .map_or("Not specified", |r| clip(r, ROLE_CONTEXT_CHARS));
        format!(
            "You are a friendly Career Assistant helping job seekers.\n\n\
             Target Role: {role}\n\n\
             User Question: \"{question}\"\n\n\
             Instructions:\n\
             1. Provide helpful, specific career advice\n\
             2. Keep response 3-5 sentences\n\
             3. Be encouraging and practical\n\
             4. Give actionable tips\n\n\
             Your response:",
            question = self.question.trim(),
        )
    }

    fn interpret(&self, raw: &str) -> Result<String> {
        require_text(raw)
    }

    fn fallback(&self) -> String {
        fallback::generate(&self.question).to_string()
    }
}
