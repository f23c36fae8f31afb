//! Subject detection by case-insensitive substring match.

use std::fmt;

/// Exam subjects recognised in queries, in match order.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Subject {
    History,
    Geography,
    Maths,
    Mathematics,
    Civics,
    Biology,
    Chemistry,
    Physics,
    English,
    Aptitude,
}

impl Subject {
    pub const ALL: [Subject; 10] = [
        Subject::History,
        Subject::Geography,
        Subject::Maths,
        Subject::Mathematics,
        Subject::Civics,
        Subject::Biology,
        Subject::Chemistry,
        Subject::Physics,
        Subject::English,
        Subject::Aptitude,
    ];

    /// Lowercase keyword matched against queries and record sources.
    pub fn as_str(self) -> &'static str {
        match self {
            Subject::History => "history",
            Subject::Geography => "geography",
            Subject::Maths => "maths",
            Subject::Mathematics => "mathematics",
            Subject::Civics => "civics",
            Subject::Biology => "biology",
            Subject::Chemistry => "chemistry",
            Subject::Physics => "physics",
            Subject::English => "english",
            Subject::Aptitude => "aptitude",
        }
    }

    /// True if `source` names this subject (case-insensitive).
    pub fn matches_source(self, source: Option<&str>) -> bool {
        source.is_some_and(|s| s.to_lowercase().contains(self.as_str()))
    }
}

impl fmt::Display for Subject {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// First subject of [`Subject::ALL`] contained in `query`.
///
/// ```
/// use answer_engine::{Subject, classify_subject};
/// assert_eq!(classify_subject("Give me 3 HISTORY questions"), Some(Subject::History));
/// assert_eq!(classify_subject("tell me about rivers"), None);
/// ```
pub fn classify_subject(query: &str) -> Option<Subject> {
    let q = query.to_lowercase();
    Subject::ALL.into_iter().find(|s| q.contains(s.as_str()))
}

/// Same rule over an arbitrary keyword list.
pub fn classify_subject_in<'s>(query: &str, subjects: &[&'s str]) -> Option<&'s str> {
    let q = query.to_lowercase();
    subjects
        .iter()
        .copied()
        .find(|s| q.contains(&s.to_lowercase()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn first_subject_in_list_order_wins() {
        // both present; history comes first in the list
        assert_eq!(
            classify_subject("geography and history"),
            Some(Subject::History)
        );
    }

    #[test]
    fn substring_match_is_enough() {
        assert_eq!(classify_subject("prehistory of Aksum"), Some(Subject::History));
        assert_eq!(classify_subject("biophysics"), Some(Subject::Physics));
    }

    #[test]
    fn mathematics_is_not_maths() {
        assert_eq!(classify_subject("mathematics exam"), Some(Subject::Mathematics));
        assert_eq!(classify_subject("maths exam"), Some(Subject::Maths));
    }

    #[test]
    fn custom_list() {
        let subjects = ["Amharic", "english"];
        assert_eq!(classify_subject_in("amharic poems", &subjects), Some("Amharic"));
        assert_eq!(classify_subject_in("french", &subjects), None);
    }

    #[test]
    fn absent_source_never_matches() {
        assert!(!Subject::History.matches_source(None));
        assert!(!Subject::History.matches_source(Some("")));
        assert!(Subject::History.matches_source(Some("Grade 12 History 2015")));
    }
}
