//! Determinism and routing tests for offline answers.

use heimdall::fallback::{self, templates};

#[test]
fn interview_question_gets_interview_guide() {
    let answer = fallback::generate("How do I prepare for an interview?");
    assert_eq!(answer, templates::INTERVIEW);
    assert!(answer.contains("STAR method"));
}

#[test]
fn unrelated_query_gets_default() {
    assert_eq!(fallback::generate("xyz unrelated query"), templates::DEFAULT);
}

#[test]
fn same_topic_same_answer() {
    let topic = "Should I negotiate my salary?";
    assert_eq!(fallback::generate(topic), fallback::generate(topic));
    assert_eq!(fallback::generate(topic), templates::SALARY);
}

#[test]
fn topics_route_to_buckets() {
    let cases = [
        ("Can you review my CV?", templates::RESUME),
        ("Which skills matter for backend roles?", templates::SKILLS),
        ("Where should I search for a job?", templates::JOB_SEARCH),
        ("Thinking about a career change into design", templates::CAREER_CHANGE),
    ];
    for (topic, expected) in cases {
        assert_eq!(fallback::generate(topic), expected, "topic: {topic}");
    }
}

#[test]
fn every_template_is_non_empty() {
    for bucket in fallback::BUCKETS {
        assert!(!bucket.template.trim().is_empty(), "bucket {}", bucket.name);
    }
    assert!(!templates::DEFAULT.trim().is_empty());
}

#[test]
fn quick_replies() {
    assert_eq!(fallback::quick_reply("Good morning!"), Some(templates::GREETING));
    assert_eq!(fallback::quick_reply("thank you so much"), Some(templates::THANKS));
    assert_eq!(
        fallback::quick_reply("what's the weather like?"),
        Some(templates::OFF_TOPIC)
    );
    assert_eq!(fallback::quick_reply("How do I improve my resume?"), None);
}
