//! Résumé rewriting and a summary of what the rewrite changed.

use super::parse::{clip, require_text};
use crate::Result;
use crate::cache::{CacheKey, CacheKeyBuilder};
use crate::gate::GuardedRequest;
use crate::skills;

const RESUME_CHARS: usize = 8000;
const DESCRIPTION_CHARS: usize = 2000;
const COMPARE_CHARS: usize = 3000;
const SUMMARY_SKILLS: usize = 6;
const MISSING_SKILLS_IN_TIPS: usize = 4;

const REWRITE_TIPS: [&str; 3] = [
    "• Start every bullet with an action verb (Led, Developed, Achieved)",
    "• Add a measurable result to each achievement",
    "• Mirror keywords from the job description",
];

const IMPROVEMENTS: &str = "\
• Reorganized content into clear, ATS-friendly sections
• Strengthened bullet points with action verbs
• Highlighted achievements over responsibilities
• Added a professional summary aligned with the target role
• Cleaned up formatting for consistent structure";

/// Rewrite a résumé for a target role.
#[derive(Debug, Clone)]
pub struct ResumeRewrite {
    pub resume: String,
    pub job_role: String,
    pub job_description: Option<String>,
}

impl ResumeRewrite {
    pub fn new(resume: impl Into<String>, job_role: impl Into<String>) -> Self {
        Self {
            resume: resume.into(),
            job_role: job_role.into(),
            job_description: None,
        }
    }

    pub fn job_description(mut self, description: impl Into<String>) -> Self {
        self.job_description = Some(description.into());
        self
    }

    fn description(&self) -> Option<&str> {
        self.job_description
            .as_deref()
            .map(str::trim)
            .filter(|d| !d.is_empty())
    }
}

impl GuardedRequest for ResumeRewrite {
    type Output = String;

    fn operation(&self) -> &'static str {
        "resume_rewrite"
    }

    fn cache_key(&self) -> CacheKey {
        CacheKeyBuilder::new(self.operation())
            .payload(&self.resume)
            .text(&self.job_role)
            .optional_text(self.description())
            .finish()
    }

    fn prompt(&self) -> String {
        format!(
            "You are an expert resume writer. Rewrite this resume to be professional, ATS-friendly, and impactful.\n\n\
             Current Resume: {resume}\n\
             Target Role: {role}\n\
             Job Description: {description}\n\n\
             Instructions:\n\
             1. Improve formatting with clear sections\n\
             2. Use strong action verbs (Led, Developed, Achieved)\n\
             3. Add quantifiable metrics where possible\n\
             4. Optimize for ATS with relevant keywords\n\
             5. Highlight achievements over responsibilities\n\
             6. Keep information accurate but present it better\n\
             7. Make bullet points concise and impactful\n\n\
             Return the improved resume as plain text with clear sections.",
            resume = clip(&self.resume, RESUME_CHARS),
            role = self.job_role.trim(),
            description = self
                .description()
                .map_or("Not provided", |d| clip(d, DESCRIPTION_CHARS)),
        )
    }

    fn interpret(&self, raw: &str) -> Result<String> {
        require_text(raw)
    }

    /// The candidate's own text, tidied, between a generated summary and a
    /// short list of edits still worth making.
    fn fallback(&self) -> String {
        let role = self.job_role.trim();
        let present = skills::extract_skills(&self.resume);

        let mut summary = format!("Motivated candidate targeting a {role} role.");
        if !present.is_empty() {
            let listed: Vec<&str> = present
                .iter()
                .take(SUMMARY_SKILLS)
                .map(String::as_str)
                .collect();
            summary.push_str(&format!(" Skilled in {}.", listed.join(", ")));
        }

        let mut tips: Vec<String> = REWRITE_TIPS.iter().map(|t| t.to_string()).collect();
        if let Some(description) = self.description() {
            let required = skills::required_skills(role, clip(description, DESCRIPTION_CHARS));
            let missing: Vec<&str> = required
                .difference(&present)
                .take(MISSING_SKILLS_IN_TIPS)
                .map(String::as_str)
                .collect();
            if !missing.is_empty() {
                tips.push(format!("• Add evidence of: {}", missing.join(", ")));
            }
        }

        format!(
            "PROFESSIONAL SUMMARY\n{summary}\n\n{body}\n\nNEXT STEPS\n{tips}",
            body = tidy(clip(&self.resume, RESUME_CHARS)),
            tips = tips.join("\n"),
        )
    }
}

/// Compare an original résumé with its rewrite.
#[derive(Debug, Clone)]
pub struct RewriteSummary {
    pub original: String,
    pub improved: String,
}

impl RewriteSummary {
    pub fn new(original: impl Into<String>, improved: impl Into<String>) -> Self {
        Self {
            original: original.into(),
            improved: improved.into(),
        }
    }
}

impl GuardedRequest for RewriteSummary {
    type Output = String;

    fn operation(&self) -> &'static str {
        "rewrite_summary"
    }

    fn cache_key(&self) -> CacheKey {
        CacheKeyBuilder::new(self.operation())
            .payload(&self.original)
            .payload(&self.improved)
            .finish()
    }

    fn prompt(&self) -> String {
        format!(
            "Compare these resumes and list TOP 5 improvements made.\n\n\
             Original: {original}\n\
             Improved: {improved}\n\n\
             Return 5 bullet points starting with \"• \"",
            original = clip(&self.original, COMPARE_CHARS),
            improved = clip(&self.improved, COMPARE_CHARS),
        )
    }

    fn interpret(&self, raw: &str) -> Result<String> {
        require_text(raw)
    }

    fn fallback(&self) -> String {
        IMPROVEMENTS.to_string()
    }
}

/// Trim lines, unify bullet markers and collapse runs of blank lines.
fn tidy(text: &str) -> String {
    let mut lines: Vec<String> = Vec::new();
    for line in text.lines().map(str::trim) {
        if line.is_empty() {
            if lines.last().is_some_and(|l| !l.is_empty()) {
                lines.push(String::new());
            }
            continue;
        }
        let bullet = ["• ", "- ", "* "]
            .iter()
            .find_map(|marker| line.strip_prefix(marker));
        match bullet {
            Some(item) => lines.push(format!("• {}", item.trim_start())),
            None => lines.push(line.to_string()),
        }
    }
    while lines.last().is_some_and(String::is_empty) {
        lines.pop();
    }
    lines.join("\n")
}
