//! Result-count extraction from free-text queries.
//!
//! Order of precedence:
//! 1. first standalone numeral (`"give me 3 questions"`)
//! 2. first spelled-out number word `one`..`twenty`, by table order
//! 3. the configured default

use std::sync::LazyLock;

use regex::Regex;

/// Spelled-out counts in lookup order.
pub const NUMBER_WORDS: [(&str, usize); 20] = [
    ("one", 1),
    ("two", 2),
    ("three", 3),
    ("four", 4),
    ("five", 5),
    ("six", 6),
    ("seven", 7),
    ("eight", 8),
    ("nine", 9),
    ("ten", 10),
    ("eleven", 11),
    ("twelve", 12),
    ("thirteen", 13),
    ("fourteen", 14),
    ("fifteen", 15),
    ("sixteen", 16),
    ("seventeen", 17),
    ("eighteen", 18),
    ("nineteen", 19),
    ("twenty", 20),
];

static NUMERAL: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\b([0-9]+)\b").expect("numeral pattern is valid"));

static WORD_PATTERNS: LazyLock<Vec<(Regex, usize)>> = LazyLock::new(|| {
    NUMBER_WORDS
        .iter()
        .map(|&(word, n)| {
            let re = Regex::new(&format!(r"(?i)\b{word}\b")).expect("number word pattern is valid");
            (re, n)
        })
        .collect()
});

/// What happens to an extracted count below one.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum LowerBound {
    /// `"0 questions"` yields 0.
    #[default]
    PassThrough,
    /// Counts below one become one.
    One,
}

/// Parameters for [`extract_limit_with`].
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct LimitRules {
    pub default: usize,
    /// Upper clamp for explicit counts; `None` or `Some(0)` disables it.
    pub max_limit: Option<usize>,
    pub lower_bound: LowerBound,
}

impl Default for LimitRules {
    fn default() -> Self {
        Self {
            default: 10,
            max_limit: None,
            lower_bound: LowerBound::PassThrough,
        }
    }
}

impl LimitRules {
    pub fn with_max_limit(self, max_limit: usize) -> Self {
        Self {
            max_limit: Some(max_limit),
            ..self
        }
    }
}

/// Extracts the requested result count from `query`.
///
/// The default is returned as-is; only explicit counts are clamped to
/// `max_limit`. Numerals too large for `usize` saturate.
///
/// ```
/// use answer_engine::extract_limit;
/// assert_eq!(extract_limit("give me 3 history questions", 10, Some(100)), 3);
/// assert_eq!(extract_limit("Five questions please", 10, Some(100)), 5);
/// assert_eq!(extract_limit("tell me about rivers", 10, Some(100)), 10);
/// assert_eq!(extract_limit("50 questions", 10, Some(12)), 12);
/// ```
pub fn extract_limit(query: &str, default: usize, max_limit: Option<usize>) -> usize {
    match explicit_count(query) {
        Some(n) => match max_limit {
            Some(m) if m > 0 => n.min(m),
            _ => n,
        },
        None => default,
    }
}

/// [`extract_limit`] followed by the configured lower bound.
pub fn extract_limit_with(query: &str, rules: &LimitRules) -> usize {
    let n = extract_limit(query, rules.default, rules.max_limit);
    match rules.lower_bound {
        LowerBound::PassThrough => n,
        LowerBound::One => n.max(1),
    }
}

fn explicit_count(query: &str) -> Option<usize> {
    if let Some(caps) = NUMERAL.captures(query) {
        let digits = caps.get(1).map(|m| m.as_str()).unwrap_or_default();
        return Some(digits.parse::<usize>().unwrap_or(usize::MAX));
    }
    WORD_PATTERNS
        .iter()
        .find(|(re, _)| re.is_match(query))
        .map(|&(_, n)| n)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn numeral_wins_over_words() {
        assert_eq!(extract_limit("two sets of 7 questions", 10, Some(50)), 7);
    }

    #[test]
    fn numeral_is_clamped_to_max() {
        assert_eq!(extract_limit("give me 300", 10, Some(42)), 42);
    }

    #[test]
    fn zero_max_disables_clamp() {
        assert_eq!(extract_limit("give me 300", 10, Some(0)), 300);
        assert_eq!(extract_limit("give me 300", 10, None), 300);
    }

    #[test]
    fn numeral_needs_word_boundaries() {
        assert_eq!(extract_limit("grade12 questions", 10, None), 10);
        assert_eq!(extract_limit("grade 12 questions", 10, None), 12);
    }

    #[test]
    fn words_match_case_insensitively() {
        assert_eq!(extract_limit("Show me FOUR questions", 10, None), 4);
    }

    #[test]
    fn word_table_order_beats_text_position() {
        // "five" appears first in the text, "two" first in the table.
        assert_eq!(extract_limit("five questions about two rivers", 10, None), 2);
    }

    #[test]
    fn words_inside_other_words_do_not_match() {
        assert_eq!(extract_limit("someone told me", 10, None), 10);
        // "seventeen" only matches itself, not "seven".
        assert_eq!(extract_limit("seventeen please", 10, None), 17);
    }

    #[test]
    fn word_value_is_clamped() {
        assert_eq!(extract_limit("twenty questions", 10, Some(3)), 3);
    }

    #[test]
    fn default_is_not_clamped() {
        assert_eq!(extract_limit("rivers", 10, Some(4)), 10);
    }

    #[test]
    fn huge_numeral_saturates_then_clamps() {
        assert_eq!(
            extract_limit("99999999999999999999999999 questions", 10, Some(5)),
            5
        );
    }

    #[test]
    fn zero_passes_through_by_default() {
        let rules = LimitRules::default().with_max_limit(100);
        assert_eq!(extract_limit_with("0 questions", &rules), 0);
    }

    #[test]
    fn lower_bound_one_lifts_zero() {
        let rules = LimitRules {
            lower_bound: LowerBound::One,
            ..LimitRules::default().with_max_limit(100)
        };
        assert_eq!(extract_limit_with("0 questions", &rules), 1);
        assert_eq!(extract_limit_with("3 questions", &rules), 3);
    }
}
