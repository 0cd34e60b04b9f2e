//! Mock interview turns and post-interview feedback.
//!
//! The provider keeps no conversation state, so every turn resends the
//! role, a résumé excerpt and the transcript so far. After
//! [`MAX_QUESTIONS`] questions the session closes with a fixed statement.

use super::parse::{clip, parse_json, require_text};
use crate::Result;
use crate::cache::{CacheKey, CacheKeyBuilder};
use crate::gate::GuardedRequest;
use crate::types::{InterviewFeedback, Speaker, Utterance};

/// Questions asked before the interviewer wraps up.
pub const MAX_QUESTIONS: usize = 6;

const RESUME_CHARS: usize = 5000;
const FEEDBACK_LINES: usize = 8;
const FEEDBACK_LINE_CHARS: usize = 150;

const INTRO_QUESTIONS: [&str; 3] = [
    "Tell me about yourself and your experience with {role}.",
    "Walk me through your resume and highlight your most relevant experience.",
    "What interests you about this {role} position?",
];

const TECHNICAL_QUESTIONS: [&str; 3] = [
    "Describe a challenging technical problem you solved recently.",
    "What programming languages and technologies are you most comfortable with?",
    "Tell me about a project you're particularly proud of.",
];

const BEHAVIORAL_QUESTIONS: [&str; 3] = [
    "Tell me about a time you worked on a team project. What was your role?",
    "Describe a situation where you had to learn something new quickly.",
    "How do you handle tight deadlines and pressure?",
];

const CLOSING_QUESTIONS: [&str; 3] = [
    "Do you have any questions for me about the role or company?",
    "Why should we hire you for this position?",
    "What are your salary expectations?",
];

pub const CLOSING_STATEMENT: &str = "Thank you for your detailed responses throughout this interview. \
We've covered your technical background, experience, and problem-solving approach. \
We will review your application along with today's conversation and get back to you \
within the next week. Do you have any final questions for me?";

/// State of one mock interview.
#[derive(Debug, Clone)]
pub struct InterviewSession {
    job_role: String,
    resume: String,
    transcript: Vec<Utterance>,
    questions_asked: usize,
}

impl InterviewSession {
    pub fn new(job_role: impl Into<String>, resume: impl Into<String>) -> Self {
        let resume: String = resume.into();
        Self {
            job_role: job_role.into(),
            resume: clip(&resume, RESUME_CHARS).to_string(),
            transcript: Vec::new(),
            questions_asked: 0,
        }
    }

    pub fn job_role(&self) -> &str {
        &self.job_role
    }

    pub fn transcript(&self) -> &[Utterance] {
        &self.transcript
    }

    pub fn questions_asked(&self) -> usize {
        self.questions_asked
    }

    /// Whether the closing statement has been given.
    pub fn is_finished(&self) -> bool {
        self.questions_asked >= MAX_QUESTIONS
    }

    pub(crate) fn restart(&mut self) {
        self.transcript.clear();
        self.questions_asked = 0;
    }

    pub(crate) fn record_answer(&mut self, answer: &str) {
        self.transcript.push(Utterance::candidate(answer.trim()));
    }

    /// The next interviewer turn, numbered from one.
    pub(crate) fn next_turn(&mut self) -> InterviewTurn<'_> {
        self.questions_asked += 1;
        let number = self.questions_asked;
        InterviewTurn {
            session: self,
            number,
        }
    }

    pub(crate) fn record_question(&mut self, question: &str) {
        self.transcript.push(Utterance::interviewer(question));
    }

    fn transcript_text(&self) -> String {
        self.transcript
            .iter()
            .map(|u| format!("{}: {}", u.speaker, u.text))
            .collect::<Vec<_>>()
            .join("\n")
    }

    fn average_answer_words(&self) -> f64 {
        let answers: Vec<&Utterance> = self
            .transcript
            .iter()
            .filter(|u| u.speaker == Speaker::Candidate)
            .collect();
        let words: usize = answers.iter().map(|u| u.text.split_whitespace().count()).sum();
        words as f64 / answers.len().max(1) as f64
    }
}

/// One interviewer turn of a session.
pub struct InterviewTurn<'a> {
    session: &'a InterviewSession,
    number: usize,
}

impl InterviewTurn<'_> {
    fn role(&self) -> &str {
        &self.session.job_role
    }
}

impl GuardedRequest for InterviewTurn<'_> {
    type Output = String;

    fn operation(&self) -> &'static str {
        "interview_turn"
    }

    fn cache_key(&self) -> CacheKey {
        CacheKeyBuilder::new(self.operation())
            .text(self.role())
            .payload(&self.session.resume)
            .payload(&self.session.transcript_text())
            .number(self.number as u64)
            .finish()
    }

    fn local_reply(&self) -> Option<String> {
        (self.number >= MAX_QUESTIONS).then(|| CLOSING_STATEMENT.to_string())
    }

    fn prompt(&self) -> String {
        let task = if self.number == 1 {
            "Start the interview by introducing yourself with a professional name and asking \
             the first question about the candidate's experience."
                .to_string()
        } else {
            format!(
                "Acknowledge the candidate's last answer briefly and ask question {} of {}.",
                self.number, MAX_QUESTIONS
            )
        };
        format!(
            "You are a professional interviewer for a tech company.\n\n\
             Rules:\n\
             - Ask questions about the candidate's resume, experience, and skills\n\
             - Ask behavioral questions about teamwork and problem-solving\n\
             - Ask one question at a time\n\
             - Be professional but friendly\n\n\
             Candidate Information:\n\
             Job Role: {role}\n\
             Resume: {resume}\n\n\
             Conversation so far:\n{transcript}\n\n\
             {task}",
            role = self.role(),
            resume = self.session.resume,
            transcript = self.session.transcript_text(),
        )
    }

    fn interpret(&self, raw: &str) -> Result<String> {
        require_text(raw)
    }

    fn fallback(&self) -> String {
        if self.number <= 1 {
            let role = self.role();
            return format!(
                "Hello! I'm Sarah, and I'll be conducting your interview today for the {role} position. \
                 Let's start with an introduction. {}",
                INTRO_QUESTIONS[0].replace("{role}", role)
            );
        }
        let bank = if self.number <= 2 {
            &TECHNICAL_QUESTIONS
        } else if self.number <= 4 {
            &BEHAVIORAL_QUESTIONS
        } else {
            &CLOSING_QUESTIONS
        };
        let question = bank[(self.number - 1) % bank.len()];
        format!("That's interesting. {question}")
    }
}

/// Feedback on the session transcript.
pub struct FeedbackRequest<'a> {
    session: &'a InterviewSession,
}

impl<'a> FeedbackRequest<'a> {
    pub fn new(session: &'a InterviewSession) -> Self {
        Self { session }
    }

    fn recent_conversation(&self) -> String {
        let transcript = &self.session.transcript;
        let start = transcript.len().saturating_sub(FEEDBACK_LINES);
        transcript[start..]
            .iter()
            .map(|u| format!("{}: {}", u.speaker, clip(&u.text, FEEDBACK_LINE_CHARS)))
            .collect::<Vec<_>>()
            .join("\n")
    }
}

impl GuardedRequest for FeedbackRequest<'_> {
    type Output = InterviewFeedback;

    fn operation(&self) -> &'static str {
        "interview_feedback"
    }

    fn cache_key(&self) -> CacheKey {
        CacheKeyBuilder::new(self.operation())
            .text(&self.session.job_role)
            .payload(&self.session.transcript_text())
            .finish()
    }

    fn prompt(&self) -> String {
        format!(
            r#"Analyze this mock interview and provide feedback.

Job Role: {role}

Recent Interview Conversation:
{conversation}

Return JSON:
{{
    "communication_score": "X/10",
    "technical_score": "X/10",
    "confidence_score": "X/10",
    "strengths": ["strength1", "strength2", "strength3"],
    "improvements": ["area1", "area2", "area3"],
    "suggestions": ["tip1", "tip2", "tip3"],
    "overall_comment": "2-3 sentence assessment"
}}

Return ONLY valid JSON."#,
            role = self.session.job_role,
            conversation = self.recent_conversation(),
        )
    }

    fn interpret(&self, raw: &str) -> Result<InterviewFeedback> {
        parse_json(raw)
    }

    fn fallback(&self) -> InterviewFeedback {
        let average = self.session.average_answer_words();
        let (communication, confidence) = if average > 50.0 {
            ("8/10", "7/10")
        } else if average > 30.0 {
            ("7/10", "6/10")
        } else {
            ("6/10", "5/10")
        };
        let role = &self.session.job_role;

        InterviewFeedback {
            communication_score: communication.to_string(),
            technical_score: "7/10".to_string(),
            confidence_score: confidence.to_string(),
            strengths: vec![
                "Provided clear responses".to_string(),
                "Demonstrated relevant experience".to_string(),
                "Professional communication style".to_string(),
            ],
            improvements: vec![
                "Provide more specific examples with metrics".to_string(),
                "Demonstrate deeper technical knowledge".to_string(),
                "Show more enthusiasm and energy".to_string(),
            ],
            suggestions: vec![
                "Practice using the STAR method (Situation, Task, Action, Result)".to_string(),
                "Research common interview questions for your role".to_string(),
                "Prepare 5-7 detailed project examples".to_string(),
                "Practice speaking about technical concepts clearly".to_string(),
                "Record yourself to improve delivery".to_string(),
            ],
            overall_comment: format!(
                "Good effort in the {role} interview! You communicated your experience well. \
                 Focus on providing more detailed examples with quantifiable results. \
                 With more practice, you'll feel even more confident. Keep preparing!"
            ),
            note: Some(
                "Basic feedback provided - detailed analysis temporarily unavailable".to_string(),
            ),
        }
    }
}
