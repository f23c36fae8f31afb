//! Prompt builder: fixed instructions followed by numbered questions.

use std::fmt::Write;

use question_store::RankedResult;

/// Instruction block sent ahead of the retrieved questions.
pub const PROMPT_PREAMBLE: &str = "You are a smart educational assistant. Given the following context of multiple-choice questions, do the following for each question:

- **Never skip any question**. For every question in the context, always return a result.
- If the question text, options, correct answer, or explanation is missing or incomplete, deduce and fill it in based on the available information.
- For each question, return:
    - The full, improved question text
    - Make it to return I don't have any questions related to this query if no relevant questions matching to the query are found.
    - A list of clearly labeled multiple-choice options (A, B, C, D)
    - The correct answer clearly stated (with the corresponding letter)
    - A clear explanation of at least 3 lines justifying the correct answer
    - The source (as provided in the context)

Questions:
";

pub const MISSING_OPTION: &str = "[Missing Option]";
pub const MISSING_SOURCE: &str = "[Source not available]";

const OPTION_LABELS: [char; 4] = ['A', 'B', 'C', 'D'];

/// Renders ranked questions into the generation prompt.
///
/// Each question gets exactly four options; short lists are padded with
/// [`MISSING_OPTION`] and extra options are dropped.
///
/// ```
/// use answer_engine::prompt::{build_prompt, PROMPT_PREAMBLE};
/// assert_eq!(build_prompt(&[]), format!("{PROMPT_PREAMBLE}\n"));
/// ```
pub fn build_prompt(results: &[RankedResult<'_>]) -> String {
    let mut out = String::with_capacity(PROMPT_PREAMBLE.len() + results.len() * 256);
    out.push_str(PROMPT_PREAMBLE);

    for (i, r) in results.iter().enumerate() {
        let rec = r.record;
        let _ = writeln!(out, "Question {}: {}", i + 1, rec.text);
        for (slot, label) in OPTION_LABELS.iter().enumerate() {
            let opt = rec.options.get(slot).map(String::as_str).unwrap_or(MISSING_OPTION);
            let _ = writeln!(out, "{label}) {opt}");
        }
        let source = rec.source.as_deref().unwrap_or(MISSING_SOURCE);
        let _ = write!(out, "Source: {source}\n\n");
    }

    out.push('\n');
    out
}
