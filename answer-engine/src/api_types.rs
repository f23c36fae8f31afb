//! Public API types re-used by external crates (e.g., the HTTP API layer).

use crate::{
    limit::{LimitRules, extract_limit_with},
    subject::{Subject, classify_subject},
};

pub const UNAVAILABLE_MESSAGE: &str = "Model or data failed to load.";
pub const NO_MATCH_MESSAGE: &str = "I don't have any questions related to this query.";

/// Count and subject parsed from one query.
///
/// ```
/// use answer_engine::{LimitRules, QueryIntent, Subject};
/// let rules = LimitRules::default().with_max_limit(100);
/// let intent = QueryIntent::parse("give me 3 history questions", &rules);
/// assert_eq!(intent.limit, 3);
/// assert_eq!(intent.subject, Some(Subject::History));
/// ```
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct QueryIntent {
    pub limit: usize,
    pub subject: Option<Subject>,
}

impl QueryIntent {
    pub fn parse(query: &str, rules: &LimitRules) -> Self {
        Self {
            limit: extract_limit_with(query, rules),
            subject: classify_subject(query),
        }
    }
}

/// Terminal result of one `answer` call. Every variant renders to a message.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum AnswerOutcome {
    /// Startup loading failed; nothing was retrieved.
    Unavailable,
    /// No question survived retrieval and subject filtering.
    NoMatch,
    /// Trimmed model output.
    Success(String),
    /// The model call failed or timed out.
    GenerationFailure(String),
    /// The query could not be embedded or ranked.
    RetrievalFailure(String),
}

impl AnswerOutcome {
    pub fn message(&self) -> String {
        match self {
            AnswerOutcome::Unavailable => UNAVAILABLE_MESSAGE.to_string(),
            AnswerOutcome::NoMatch => NO_MATCH_MESSAGE.to_string(),
            AnswerOutcome::Success(text) => text.clone(),
            AnswerOutcome::GenerationFailure(detail) => {
                format!("Error generating response: {detail}")
            }
            AnswerOutcome::RetrievalFailure(detail) => {
                format!("Error retrieving questions: {detail}")
            }
        }
    }

    /// Short label for logs.
    pub fn kind(&self) -> &'static str {
        match self {
            AnswerOutcome::Unavailable => "unavailable",
            AnswerOutcome::NoMatch => "no_match",
            AnswerOutcome::Success(_) => "success",
            AnswerOutcome::GenerationFailure(_) => "generation_failure",
            AnswerOutcome::RetrievalFailure(_) => "retrieval_failure",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn messages() {
        assert_eq!(AnswerOutcome::Unavailable.message(), "Model or data failed to load.");
        assert_eq!(
            AnswerOutcome::NoMatch.message(),
            "I don't have any questions related to this query."
        );
        assert_eq!(
            AnswerOutcome::GenerationFailure("quota exceeded".into()).message(),
            "Error generating response: quota exceeded"
        );
        assert_eq!(
            AnswerOutcome::RetrievalFailure("connection refused".into()).message(),
            "Error retrieving questions: connection refused"
        );
        assert_eq!(AnswerOutcome::Success("A) Abay".into()).message(), "A) Abay");
    }

    #[test]
    fn intent_parts_are_independent() {
        let rules = LimitRules::default().with_max_limit(100);
        let i = QueryIntent::parse("tell me about rivers", &rules);
        assert_eq!(i, QueryIntent { limit: 10, subject: None });

        let i = QueryIntent::parse("physics", &rules);
        assert_eq!(i.limit, 10);
        assert_eq!(i.subject, Some(Subject::Physics));
    }
}
