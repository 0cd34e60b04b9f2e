//! Structured résumé review and job-fit results.
//!
//! Field names mirror the JSON the model is asked to produce, so the same
//! types decode provider output and serialize fallbacks.

use serde::{Deserialize, Serialize};

/// Scores per résumé category, each 0–100.
///
/// Decoded as floats since models sometimes answer `72.5` for an integer field.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CategoryScores {
    #[serde(rename = "Presentation & Format")]
    pub presentation: f32,
    #[serde(rename = "Skills")]
    pub skills: f32,
    #[serde(rename = "Projects")]
    pub projects: f32,
    #[serde(rename = "Education")]
    pub education: f32,
    #[serde(rename = "Experience")]
    pub experience: f32,
    #[serde(rename = "Certifications")]
    pub certifications: f32,
    #[serde(rename = "Achievements")]
    pub achievements: f32,
}

impl CategoryScores {
    /// All seven scores, labelled with their JSON names.
    pub fn entries(&self) -> [(&'static str, f32); 7] {
        [
            ("Presentation & Format", self.presentation),
            ("Skills", self.skills),
            ("Projects", self.projects),
            ("Education", self.education),
            ("Experience", self.experience),
            ("Certifications", self.certifications),
            ("Achievements", self.achievements),
        ]
    }
}

/// Items grouped by severity.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Tiered {
    #[serde(rename = "Critical", default)]
    pub critical: Vec<String>,
    #[serde(rename = "Medium", default)]
    pub medium: Vec<String>,
    #[serde(rename = "Low", default)]
    pub low: Vec<String>,
}

/// Full résumé review.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ResumeAnalysis {
    #[serde(rename = "Overall_Score")]
    pub overall_score: f32,
    #[serde(rename = "Category_Scores")]
    pub category_scores: CategoryScores,
    #[serde(rename = "Strengths", default)]
    pub strengths: Vec<String>,
    #[serde(rename = "Weaknesses", default)]
    pub weaknesses: Tiered,
    #[serde(rename = "Suggestions", default)]
    pub suggestions: Tiered,
    #[serde(default)]
    pub resume_skills: Vec<String>,
    #[serde(default)]
    pub job_required_skills: Vec<String>,
    #[serde(default)]
    pub skills_to_improve: Vec<String>,
    /// Read from the résumé text locally, never from the model.
    #[serde(default)]
    pub basic_info: BasicInfo,
    /// Chosen locally from the required skills.
    #[serde(default)]
    pub recommended_courses: Vec<Course>,
}

/// Contact details and length read from résumé text.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct BasicInfo {
    pub name: Option<String>,
    pub email: Option<String>,
    pub mobile_number: Option<String>,
    /// Pages separated by form feeds; 0 for empty text.
    pub pages: usize,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Course {
    pub title: String,
    pub url: String,
}

/// Coarse job-fit classification.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum MatchLabel {
    #[serde(rename = "Strong Match")]
    Strong,
    #[serde(rename = "Moderate Match")]
    Moderate,
    #[serde(rename = "Weak Match")]
    Weak,
}

impl MatchLabel {
    /// Label for a 0–10 match score.
    pub fn from_score(score: f32) -> Self {
        if score >= 8.0 {
            Self::Strong
        } else if score >= 5.0 {
            Self::Moderate
        } else {
            Self::Weak
        }
    }
}

/// Job-fit evaluation of a résumé against a job description.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct JobFit {
    /// 0–10.
    pub match_score: f32,
    pub match_label: MatchLabel,
    pub actionable_tip: String,
}
