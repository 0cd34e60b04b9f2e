//! Offline résumé text analysis over a small static vocabulary.
//!
//! Used by résumé-review and job-fit fallbacks when the model is
//! unavailable: skills listed under a "Skills" header are taken verbatim,
//! and every vocabulary term found anywhere in the text is added. Contact
//! details and course recommendations are always computed here.

use std::collections::BTreeSet;
use std::sync::LazyLock;

use regex::Regex;

use crate::types::{BasicInfo, Course};

/// Recommendations when no field stands out.
const DEFAULT_COURSES: &[(&str, &str)] = &[
    (
        "Intro to Machine Learning (Coursera)",
        "https://www.coursera.org/learn/machine-learning",
    ),
    (
        "The Web Developer Bootcamp (Udemy)",
        "https://www.udemy.com/course/the-web-developer-bootcamp",
    ),
];

const MAX_COURSES: usize = 6;
const MAX_NAME_WORDS: usize = 6;

/// Broad area a vocabulary skill belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum SkillField {
    DataScience,
    Web,
    Android,
    Ios,
    UiUx,
}

impl SkillField {
    pub const ALL: [SkillField; 5] = [
        SkillField::DataScience,
        SkillField::Web,
        SkillField::Android,
        SkillField::Ios,
        SkillField::UiUx,
    ];

    /// Vocabulary terms for this field (lower-case).
    pub fn vocabulary(&self) -> &'static [&'static str] {
        match self {
            Self::DataScience => &[
                "tensorflow",
                "keras",
                "pytorch",
                "machine learning",
                "deep learning",
                "scikit-learn",
                "pandas",
                "numpy",
                "matplotlib",
                "seaborn",
                "sql",
            ],
            Self::Web => &[
                "react",
                "reactjs",
                "django",
                "node",
                "nodejs",
                "javascript",
                "html",
                "css",
                "flask",
                "express",
                "angular",
                "vue",
            ],
            Self::Android => &["android", "flutter", "kotlin", "java"],
            Self::Ios => &["ios", "swift", "objective-c", "xcode"],
            Self::UiUx => &[
                "figma",
                "adobe xd",
                "photoshop",
                "illustrator",
                "ux",
                "ui",
                "prototyping",
            ],
        }
    }

    /// Courses for this field as `(title, url)`.
    pub fn courses(&self) -> &'static [(&'static str, &'static str)] {
        match self {
            Self::DataScience => &[
                (
                    "Machine Learning Specialization (Coursera)",
                    "https://www.coursera.org/specializations/machine-learning-introduction",
                ),
                (
                    "Deep Learning Specialization (Coursera)",
                    "https://www.coursera.org/specializations/deep-learning",
                ),
                (
                    "Practical Deep Learning for Coders (fast.ai)",
                    "https://course.fast.ai/",
                ),
            ],
            Self::Web => &[
                (
                    "The Web Developer Bootcamp (Udemy)",
                    "https://www.udemy.com/course/the-web-developer-bootcamp",
                ),
                (
                    "Full Stack Open (University of Helsinki)",
                    "https://fullstackopen.com/en/",
                ),
            ],
            Self::Android => &[
                (
                    "Android Basics with Compose (Google)",
                    "https://developer.android.com/courses/android-basics-compose/course",
                ),
                (
                    "Kotlin for Java Developers (Coursera)",
                    "https://www.coursera.org/learn/kotlin-for-java-developers",
                ),
            ],
            Self::Ios => &[
                (
                    "CS193p: Developing Apps for iOS (Stanford)",
                    "https://cs193p.sites.stanford.edu/",
                ),
                (
                    "Develop in Swift Tutorials (Apple)",
                    "https://developer.apple.com/tutorials/develop-in-swift",
                ),
            ],
            Self::UiUx => &[
                (
                    "Google UX Design Certificate (Coursera)",
                    "https://www.coursera.org/professional-certificates/google-ux-design",
                ),
                (
                    "Introduction to User Experience Design (Coursera)",
                    "https://www.coursera.org/learn/user-experience-design",
                ),
            ],
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::DataScience => "data_science",
            Self::Web => "web",
            Self::Android => "android",
            Self::Ios => "ios",
            Self::UiUx => "uiux",
        }
    }
}

enum Matcher {
    Phrase(&'static str),
    Word(Regex),
}

struct VocabEntry {
    skill: &'static str,
    matcher: Matcher,
}

impl VocabEntry {
    fn found_in(&self, lowered: &str) -> bool {
        match &self.matcher {
            Matcher::Phrase(phrase) => lowered.contains(phrase),
            Matcher::Word(re) => re.is_match(lowered),
        }
    }
}

static VOCABULARY: LazyLock<Vec<VocabEntry>> = LazyLock::new(|| {
    let mut entries: Vec<VocabEntry> = Vec::new();
    for field in SkillField::ALL {
        for &skill in field.vocabulary() {
            if entries.iter().any(|e| e.skill == skill) {
                continue;
            }
            let matcher = if skill.contains(' ') {
                Matcher::Phrase(skill)
            } else {
                let pattern = format!(r"\b{}\b", regex::escape(skill));
                Matcher::Word(Regex::new(&pattern).expect("escaped vocabulary term is a valid regex"))
            };
            entries.push(VocabEntry { skill, matcher });
        }
    }
    entries
});

static SKILLS_SECTION: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r"(?s)(?:skills|technical skills|core skills|key skills)\s*[:\-\n]\s*(.+?)(?:\n\n|\r\r|\n\s*\w+?:|\z)",
    )
    .expect("skills section pattern is valid")
});

static EMAIL: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"[A-Za-z0-9._%+-]+@[A-Za-z0-9.-]+\.[A-Za-z]{2,}").expect("email pattern is valid")
});

static PHONE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\+?\d[\d\s\-]{8,15}").expect("phone pattern is valid"));

static TITLE_LINE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)^(resume|curriculum vitae|cv)$").expect("title pattern is valid")
});

static ITEM_SEPARATOR: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"[,;\n•]").expect("separator pattern is valid"));

fn vocabulary_hits(lowered: &str) -> impl Iterator<Item = &'static str> + '_ {
    VOCABULARY
        .iter()
        .filter(move |entry| entry.found_in(lowered))
        .map(|entry| entry.skill)
}

/// Skills mentioned in free text (résumé body), lower-cased and sorted.
pub fn extract_skills(text: &str) -> BTreeSet<String> {
    let lowered = text.to_lowercase();
    let mut found = BTreeSet::new();
    if lowered.trim().is_empty() {
        return found;
    }

    if let Some(section) = SKILLS_SECTION
        .captures(&lowered)
        .and_then(|caps| caps.get(1))
    {
        found.extend(
            ITEM_SEPARATOR
                .split(section.as_str())
                .map(str::trim)
                .filter(|item| !item.is_empty())
                .map(str::to_string),
        );
    }

    found.extend(vocabulary_hits(&lowered).map(str::to_string));
    found
}

/// Vocabulary skills a role requires.
///
/// Looks in the job description first and only falls back to the role
/// title when the description yields nothing.
pub fn required_skills(job_role: &str, job_description: &str) -> BTreeSet<String> {
    let from_description: BTreeSet<String> = vocabulary_hits(&job_description.to_lowercase())
        .map(str::to_string)
        .collect();
    if !from_description.is_empty() {
        return from_description;
    }
    vocabulary_hits(&job_role.to_lowercase())
        .map(str::to_string)
        .collect()
}

/// Field with the largest vocabulary overlap, or `None` when nothing overlaps.
///
/// Ties go to the field listed first in [`SkillField::ALL`].
pub fn dominant_field(skills: &BTreeSet<String>) -> Option<SkillField> {
    let mut best: Option<(SkillField, usize)> = None;
    for field in SkillField::ALL {
        let overlap = field
            .vocabulary()
            .iter()
            .filter(|term| skills.contains(**term))
            .count();
        if overlap > 0 && best.is_none_or(|(_, n)| overlap > n) {
            best = Some((field, overlap));
        }
    }
    best.map(|(field, _)| field)
}

/// Courses for the field the skills point to.
///
/// Falls back to two general courses when no field overlaps.
pub fn recommend_courses(required: &BTreeSet<String>) -> Vec<Course> {
    let catalog = dominant_field(required).map_or(DEFAULT_COURSES, |field| field.courses());
    catalog
        .iter()
        .take(MAX_COURSES)
        .map(|&(title, url)| Course {
            title: title.to_string(),
            url: url.to_string(),
        })
        .collect()
}

/// Name, email, phone number and page count from résumé text.
///
/// The name is the first short line that is not a document title.
pub fn extract_basic_info(text: &str) -> BasicInfo {
    if text.trim().is_empty() {
        return BasicInfo::default();
    }

    let name = text
        .lines()
        .map(str::trim)
        .find(|line| {
            !line.is_empty()
                && !TITLE_LINE.is_match(line)
                && line.split_whitespace().count() <= MAX_NAME_WORDS
        })
        .map(str::to_string);

    BasicInfo {
        name,
        email: EMAIL.find(text).map(|m| m.as_str().to_string()),
        mobile_number: PHONE.find(text).map(|m| m.as_str().trim().to_string()),
        pages: text.matches('\u{c}').count() + 1,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn word_terms_need_boundaries() {
        let skills = extract_skills("Built a nodejs service; plain javascript elsewhere.");
        assert!(skills.contains("nodejs"));
        assert!(skills.contains("javascript"));
        assert!(!skills.contains("node"));
        assert!(!skills.contains("java"));
    }

    #[test]
    fn phrase_terms_match_substrings() {
        let skills = extract_skills("Experience with Machine Learning pipelines");
        assert!(skills.contains("machine learning"));
    }

    #[test]
    fn empty_text_has_no_skills() {
        assert!(extract_skills("   ").is_empty());
    }

    #[test]
    fn role_used_only_without_description_hits() {
        let from_role = required_skills("React Developer", "");
        assert!(from_role.contains("react"));

        let from_description = required_skills("React Developer", "We use Django and SQL.");
        assert!(from_description.contains("django"));
        assert!(!from_description.contains("react"));
    }

    #[test]
    fn basic_info_skips_title_line() {
        let info = extract_basic_info(
            "CV\nJane Q. Doe\nEmail: jane.doe@example.com | +1 555-123-4567\n\u{c}Page two",
        );
        assert_eq!(info.name.as_deref(), Some("Jane Q. Doe"));
        assert_eq!(info.email.as_deref(), Some("jane.doe@example.com"));
        assert_eq!(info.mobile_number.as_deref(), Some("+1 555-123-4567"));
        assert_eq!(info.pages, 2);
    }

    #[test]
    fn long_lines_are_not_names() {
        let info = extract_basic_info("Seasoned engineer with ten years of backend experience\nSam Lee");
        assert_eq!(info.name.as_deref(), Some("Sam Lee"));
        assert_eq!(info.email, None);
        assert_eq!(info.pages, 1);
    }

    #[test]
    fn empty_text_has_no_basic_info() {
        assert_eq!(extract_basic_info("  \n "), BasicInfo::default());
    }

    #[test]
    fn courses_follow_dominant_field() {
        let skills: BTreeSet<String> = ["swift", "xcode"].map(String::from).into();
        let courses = recommend_courses(&skills);
        assert_eq!(courses.len(), SkillField::Ios.courses().len());
        assert!(courses[0].title.contains("iOS"));

        let fallback = recommend_courses(&BTreeSet::new());
        assert_eq!(fallback.len(), 2);
        assert_eq!(fallback[1].title, "The Web Developer Bootcamp (Udemy)");
    }

    #[test]
    fn dominant_field_picks_largest_overlap() {
        let skills: BTreeSet<String> = ["swift", "xcode", "react"].map(String::from).into();
        assert_eq!(dominant_field(&skills), Some(SkillField::Ios));
        assert_eq!(dominant_field(&BTreeSet::new()), None);
    }
}
