//! Deterministic, offline substitutes for model output.
//!
//! [`generate`] maps a free-text topic to a fixed template by scanning an
//! ordered list of [`TopicBucket`]s; the first bucket that matches wins.
//! [`quick_reply`] short-circuits small talk before any provider call.
//!
//! Both are pure functions: the same input always yields the same text,
//! which keeps fallback outcomes safe to cache.

pub mod templates;

/// A named topic with its keyword rule and template.
///
/// The rule is a conjunction of groups: every group must contribute at
/// least one keyword found (as a case-insensitive substring) in the topic.
#[derive(Debug)]
pub struct TopicBucket {
    pub name: &'static str,
    groups: &'static [&'static [&'static str]],
    pub template: &'static str,
}

impl TopicBucket {
    /// Whether an already lower-cased topic matches this bucket.
    fn matches(&self, lowered: &str) -> bool {
        self.groups
            .iter()
            .all(|group| group.iter().any(|keyword| lowered.contains(keyword)))
    }
}

/// Buckets in priority order.
pub static BUCKETS: &[TopicBucket] = &[
    TopicBucket {
        name: "interview",
        groups: &[&["interview"]],
        template: templates::INTERVIEW,
    },
    TopicBucket {
        name: "resume",
        groups: &[&["resume", "cv"]],
        template: templates::RESUME,
    },
    TopicBucket {
        name: "skills",
        groups: &[&["skill", "learn"]],
        template: templates::SKILLS,
    },
    TopicBucket {
        name: "job_search",
        groups: &[&["job"], &["find", "search"]],
        template: templates::JOB_SEARCH,
    },
    TopicBucket {
        name: "salary",
        groups: &[&["salary", "negotiate"]],
        template: templates::SALARY,
    },
    TopicBucket {
        name: "career_change",
        groups: &[&["career change", "switch", "transition"]],
        template: templates::CAREER_CHANGE,
    },
];

/// First bucket matching the topic, if any.
pub fn classify(topic: &str) -> Option<&'static TopicBucket> {
    let lowered = topic.to_lowercase();
    BUCKETS.iter().find(|bucket| bucket.matches(&lowered))
}

/// Template for the topic, or the general default.
pub fn generate(topic: &str) -> &'static str {
    classify(topic).map_or(templates::DEFAULT, |bucket| bucket.template)
}

const GREETINGS: &[&str] = &[
    "good morning",
    "good evening",
    "greetings",
    "hello",
    "hey",
    "hi",
];

const THANKS: &[&str] = &["thank", "thanks", "appreciate"];

const CAREER_KEYWORDS: &[&str] = &[
    "job",
    "career",
    "resume",
    "cv",
    "interview",
    "skill",
    "experience",
    "work",
    "professional",
    "employment",
    "application",
    "salary",
    "qualification",
    "training",
    "education",
    "portfolio",
    "project",
    "technical",
    "programming",
    "developer",
    "engineer",
    "prepare",
    "improve",
    "learn",
    "switch",
    "transition",
    "advance",
    "grow",
];

const BLOCKED_TOPICS: &[&str] = &[
    "love",
    "dating",
    "relationship",
    "movie",
    "politics",
    "religion",
    "game",
    "recipe",
    "weather",
    "horoscope",
];

/// Canned reply for small talk, or `None` when the question needs a model.
///
/// Checked in order: greeting (question starts with a greeting word),
/// thanks, then off-topic (a blocked topic with no career keyword).
pub fn quick_reply(question: &str) -> Option<&'static str> {
    let lowered = question.trim().to_lowercase();

    if GREETINGS
        .iter()
        .any(|greeting| starts_with_word(&lowered, greeting))
    {
        return Some(templates::GREETING);
    }

    if THANKS.iter().any(|word| lowered.contains(word)) {
        return Some(templates::THANKS);
    }

    let career = CAREER_KEYWORDS.iter().any(|k| lowered.contains(k));
    if !career && BLOCKED_TOPICS.iter().any(|t| lowered.contains(t)) {
        return Some(templates::OFF_TOPIC);
    }

    None
}

/// `text` starts with `word` followed by a non-alphanumeric character or the end.
fn starts_with_word(text: &str, word: &str) -> bool {
    text.strip_prefix(word)
        .is_some_and(|rest| rest.chars().next().is_none_or(|c| !c.is_alphanumeric()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn bucket_order_is_significant() {
        // Mentions both resume and interview; interview comes first.
        assert_eq!(
            classify("Should my resume change before the interview?").map(|b| b.name),
            Some("interview")
        );
    }

    #[test]
    fn job_search_needs_both_groups() {
        assert_eq!(classify("How do I find a job?").map(|b| b.name), Some("job_search"));
        assert!(classify("I have a job").is_none());
    }

    #[test]
    fn matching_is_case_insensitive() {
        assert_eq!(classify("SALARY talks").map(|b| b.name), Some("salary"));
    }

    #[test]
    fn greeting_requires_word_boundary() {
        assert_eq!(quick_reply("Hi there"), Some(templates::GREETING));
        assert_eq!(quick_reply("hello"), Some(templates::GREETING));
        assert_eq!(quick_reply("hey, quick question"), Some(templates::GREETING));
        assert_eq!(quick_reply("hiring managers want what?"), None);
    }

    #[test]
    fn thanks_and_off_topic() {
        assert_eq!(quick_reply("Thanks a lot!"), Some(templates::THANKS));
        assert_eq!(quick_reply("Any good movie tonight?"), Some(templates::OFF_TOPIC));
        // Career keyword wins over blocked topic.
        assert_eq!(quick_reply("Is game developer a good career?"), None);
    }
}
