//! Cover letter drafting.

use super::parse::{clip, require_text};
use crate::Result;
use crate::cache::{CacheKey, CacheKeyBuilder};
use crate::gate::GuardedRequest;

const RESUME_CHARS: usize = 8000;

#[derive(Debug, Clone)]
pub struct CoverLetterRequest {
    pub resume: String,
    pub job_role: String,
    pub company: Option<String>,
}

impl CoverLetterRequest {
    pub fn new(resume: impl Into<String>, job_role: impl Into<String>) -> Self {
        Self {
            resume: resume.into(),
            job_role: job_role.into(),
            company: None,
        }
    }

    pub fn company(mut self, company: impl Into<String>) -> Self {
        self.company = Some(company.into());
        self
    }

    fn company_name(&self) -> Option<&str> {
        self.company.as_deref().map(str::trim).filter(|c| !c.is_empty())
    }
}

impl GuardedRequest for CoverLetterRequest {
    type Output = String;

    fn operation(&self) -> &'static str {
        "cover_letter"
    }

    fn cache_key(&self) -> CacheKey {
        CacheKeyBuilder::new(self.operation())
            .payload(&self.resume)
            .text(&self.job_role)
            .optional_text(self.company_name())
            .finish()
    }

    fn prompt(&self) -> String {
        let company = self
            .company_name()
            .map(|c| format!(" at {c}"))
            .unwrap_or_default();
        format!(
            "Write a professional cover letter for the following candidate applying for {role}{company}.\n\n\
             CANDIDATE RESUME:\n{resume}\n\n\
             REQUIREMENTS:\n\
             - Length: 250-350 words (3 paragraphs)\n\
             - Structure:\n\
             \x20 1. Opening: Express interest in the role\n\
             \x20 2. Body: Highlight 2-3 key achievements/skills from resume\n\
             \x20 3. Closing: Express enthusiasm and next steps\n\
             - Professional and concise tone\n\
             - Start with \"Dear Hiring Manager,\"\n\
             - End with \"Sincerely,\" (no name needed)\n\
             - DO NOT include address or date\n\n\
             Write ONLY the cover letter content.",
            role = self.job_role.trim(),
            resume = clip(&self.resume, RESUME_CHARS),
        )
    }

    fn interpret(&self, raw: &str) -> Result<String> {
        require_text(raw)
    }

    fn fallback(&self) -> String {
        let role = self.job_role.trim();
        let (at_company, company) = match self.company_name() {
            Some(c) => (format!(" at {c}"), c.to_string()),
            None => (String::new(), "your team".to_string()),
        };
        format!(
            "Dear Hiring Manager,\n\n\
             I am writing to express my interest in the {role} position{at_company}. \
             The role matches both my experience and the direction I want my career to take, \
             and I would welcome the chance to contribute from day one.\n\n\
             Throughout my work I have focused on delivering measurable results, learning new \
             tools quickly and collaborating closely with colleagues. The projects and skills \
             described in my resume reflect the responsibilities of this role, and I am confident \
             I can bring the same commitment to {company}.\n\n\
             Thank you for considering my application. I would be glad to discuss how my \
             background fits your needs and look forward to hearing from you.\n\n\
             Sincerely,"
        )
    }
}
