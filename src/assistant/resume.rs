//! Structured résumé review.

use std::collections::BTreeSet;

use super::parse::{clip, parse_json};
use crate::{HeimdallError, Result};
use crate::cache::{CacheKey, CacheKeyBuilder};
use crate::gate::GuardedRequest;
use crate::skills;
use crate::types::{CategoryScores, ResumeAnalysis, Tiered};

const RESUME_CHARS: usize = 5000;
const DESCRIPTION_CHARS: usize = 2000;
const MAX_SKILLS_TO_IMPROVE: usize = 5;
const MAX_SCORE: f32 = 100.0;

/// Review a résumé against a target role.
#[derive(Debug, Clone)]
pub struct ResumeReview {
    pub resume: String,
    pub job_role: String,
    pub job_description: Option<String>,
}

impl ResumeReview {
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

    fn description(&self) -> &str {
        self.job_description.as_deref().unwrap_or_default()
    }

    fn required_skills(&self) -> BTreeSet<String> {
        skills::required_skills(&self.job_role, self.description())
    }
}

impl GuardedRequest for ResumeReview {
    type Output = ResumeAnalysis;

    fn operation(&self) -> &'static str {
        "resume_review"
    }

    fn cache_key(&self) -> CacheKey {
        CacheKeyBuilder::new(self.operation())
            .payload(&self.resume)
            .text(&self.job_role)
            .optional_text(self.job_description.as_deref())
            .finish()
    }

    fn prompt(&self) -> String {
        format!(
            r#"You are an expert resume reviewer. Provide analysis in valid JSON format.
Focus on: Overall_Score, Category_Scores, Strengths, Weaknesses, Suggestions, Skills.

Resume: {resume}
Target Role: {role}
Job Description: {description}

REQUIRED JSON OUTPUT:
{{
  "Overall_Score": int (0-100),
  "Category_Scores": {{
    "Presentation & Format": int,
    "Skills": int,
    "Projects": int,
    "Education": int,
    "Experience": int,
    "Certifications": int,
    "Achievements": int
  }},
  "Strengths": ["strength1", "strength2", "strength3"],
  "Weaknesses": {{
    "Critical": ["issue1", "issue2"],
    "Medium": ["issue1", "issue2"],
    "Low": ["issue1"]
  }},
  "Suggestions": {{
    "Critical": ["suggestion1", "suggestion2"],
    "Medium": ["suggestion1", "suggestion2"],
    "Low": ["suggestion1"]
  }},
  "resume_skills": ["skill1", "skill2", "skill3"],
  "job_required_skills": ["skill1", "skill2", "skill3"],
  "skills_to_improve": ["skill1", "skill2", "skill3"]
}}

Return ONLY valid JSON."#,
            resume = clip(&self.resume, RESUME_CHARS),
            role = self.job_role,
            description = clip(self.description(), DESCRIPTION_CHARS),
        )
    }

    fn interpret(&self, raw: &str) -> Result<ResumeAnalysis> {
        let mut analysis: ResumeAnalysis = parse_json(raw)?;
        let scores = std::iter::once(("Overall_Score", analysis.overall_score))
            .chain(analysis.category_scores.entries());
        for (name, score) in scores {
            if !(0.0..=MAX_SCORE).contains(&score) {
                return Err(HeimdallError::MalformedResponse(format!(
                    "{name} out of range: {score}"
                )));
            }
        }

        let mut required = self.required_skills();
        required.extend(
            analysis
                .job_required_skills
                .iter()
                .map(|skill| skill.trim().to_lowercase()),
        );
        analysis.basic_info = skills::extract_basic_info(&self.resume);
        analysis.recommended_courses = skills::recommend_courses(&required);
        Ok(analysis)
    }

    fn fallback(&self) -> ResumeAnalysis {
        let present = skills::extract_skills(&self.resume);
        let required = self.required_skills();
        let recommended_courses = skills::recommend_courses(&required);
        let skills_to_improve = required
            .difference(&present)
            .take(MAX_SKILLS_TO_IMPROVE)
            .cloned()
            .collect();

        ResumeAnalysis {
            overall_score: 65.0,
            category_scores: CategoryScores {
                presentation: 70.0,
                skills: 65.0,
                projects: 60.0,
                education: 70.0,
                experience: 65.0,
                certifications: 60.0,
                achievements: 65.0,
            },
            strengths: strings(&[
                "Resume structure is clear and organized",
                "Relevant experience highlighted",
                "Educational background is strong",
            ]),
            weaknesses: Tiered {
                critical: strings(&[
                    "Add more quantifiable achievements with metrics",
                    "Include more technical skills relevant to the role",
                ]),
                medium: strings(&[
                    "Expand project descriptions with outcomes",
                    "Add more action verbs in experience section",
                ]),
                low: strings(&["Consider adding certifications"]),
            },
            suggestions: Tiered {
                critical: strings(&[
                    "Quantify achievements: 'Increased sales by 30%' not just 'Increased sales'",
                    "Add relevant keywords from the job description",
                ]),
                medium: strings(&[
                    "Use stronger action verbs: Led, Developed, Achieved, Implemented",
                    "Add links to projects and portfolio",
                ]),
                low: strings(&[
                    "Consider adding a professional summary at the top",
                    "Ensure consistent formatting throughout",
                ]),
            },
            resume_skills: present.into_iter().collect(),
            job_required_skills: required.into_iter().collect(),
            skills_to_improve,
            basic_info: skills::extract_basic_info(&self.resume),
            recommended_courses,
        }
    }
}

fn strings(items: &[&str]) -> Vec<String> {
    items.iter().map(|s| s.to_string()).collect()
}
