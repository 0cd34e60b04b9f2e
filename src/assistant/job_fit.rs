//! Résumé-to-job match scoring.

use super::parse::{clip, parse_json};
use crate::{HeimdallError, Result};
use crate::cache::{CacheKey, CacheKeyBuilder};
use crate::gate::GuardedRequest;
use crate::skills;
use crate::types::{JobFit, MatchLabel};

const RESUME_CHARS: usize = 3000;
const DESCRIPTION_CHARS: usize = 2000;
/// Score used when the job description names no known skills.
const UNKNOWN_REQUIREMENTS_SCORE: f32 = 6.0;
const MISSING_SKILLS_IN_TIP: usize = 3;
const MAX_SCORE: f32 = 10.0;

#[derive(Debug, Clone)]
pub struct JobFitRequest {
    pub resume: String,
    pub job_description: String,
}

impl JobFitRequest {
    pub fn new(resume: impl Into<String>, job_description: impl Into<String>) -> Self {
        Self {
            resume: resume.into(),
            job_description: job_description.into(),
        }
    }
}

impl GuardedRequest for JobFitRequest {
    type Output = JobFit;

    fn operation(&self) -> &'static str {
        "job_fit"
    }

    fn cache_key(&self) -> CacheKey {
        CacheKeyBuilder::new(self.operation())
            .payload(&self.resume)
            .payload(&self.job_description)
            .finish()
    }

    fn prompt(&self) -> String {
        format!(
            r#"Evaluate job match between resume and job description.

Resume: {resume}
Job Description: {description}

Provide match score (0-10) and one specific tip.
Labels: Strong Match (8.0-10), Moderate Match (5.0-7.9), Weak Match (0-4.9).

JSON format:
{{
    "match_score": float,
    "match_label": "Strong Match / Moderate Match / Weak Match",
    "actionable_tip": "specific tip"
}}"#,
            resume = clip(&self.resume, RESUME_CHARS),
            description = clip(&self.job_description, DESCRIPTION_CHARS),
        )
    }

    fn interpret(&self, raw: &str) -> Result<JobFit> {
        let fit: JobFit = parse_json(raw)?;
        if !(0.0..=MAX_SCORE).contains(&fit.match_score) {
            return Err(HeimdallError::MalformedResponse(format!(
                "match_score out of range: {}",
                fit.match_score
            )));
        }
        let expected = MatchLabel::from_score(fit.match_score);
        if fit.match_label != expected {
            return Err(HeimdallError::MalformedResponse(format!(
                "match_label {:?} disagrees with score {}",
                fit.match_label, fit.match_score
            )));
        }
        Ok(fit)
    }

    fn fallback(&self) -> JobFit {
        let present = skills::extract_skills(clip(&self.resume, RESUME_CHARS));
        let required =
            skills::required_skills("", clip(&self.job_description, DESCRIPTION_CHARS));

        let match_score = if required.is_empty() {
            UNKNOWN_REQUIREMENTS_SCORE
        } else {
            let overlap = required.intersection(&present).count();
            (overlap as f32 / required.len() as f32 * 10.0).min(10.0)
        };

        let match_label = MatchLabel::from_score(match_score);
        let actionable_tip = match match_label {
            MatchLabel::Strong => {
                "Your skills align well! Highlight these specific skills in your application."
                    .to_string()
            }
            MatchLabel::Moderate => {
                let missing: Vec<&str> = required
                    .difference(&present)
                    .take(MISSING_SKILLS_IN_TIP)
                    .map(String::as_str)
                    .collect();
                if missing.is_empty() {
                    "Tailor your resume to mirror the wording of the job description.".to_string()
                } else {
                    format!("Focus on learning the missing skills: {}", missing.join(", "))
                }
            }
            MatchLabel::Weak => {
                "Consider gaining more relevant experience or skills before applying.".to_string()
            }
        };

        JobFit {
            match_score,
            match_label,
            actionable_tip,
        }
    }
}
