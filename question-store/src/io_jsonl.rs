//! JSONL reader for the question bank.
//!
//! Strict per line: one malformed row fails the whole load.

use std::{
    fs::File,
    io::{BufRead, BufReader, Read},
    path::Path,
};

use tracing::{debug, info};

use crate::{
    errors::StoreError,
    record::{PendingQuestion, QuestionRow},
};

/// Reads question rows from a JSONL file.
///
/// - Ignores blank lines.
/// - Line numbers in errors are 1-based.
///
/// # Errors
/// - [`StoreError::Io`] if the file cannot be read.
/// - [`StoreError::Parse`] on the first line that is not a question object.
pub fn read_question_rows(jsonl_path: impl AsRef<Path>) -> Result<Vec<PendingQuestion>, StoreError> {
    info!("Reading question bank JSONL: {:?}", jsonl_path.as_ref());
    let file = File::open(jsonl_path.as_ref())?;
    let rows = parse_question_rows(BufReader::new(file))?;
    debug!("Loaded {} question rows", rows.len());
    Ok(rows)
}

/// Same as [`read_question_rows`] over any reader.
pub fn parse_question_rows<R: Read>(reader: BufReader<R>) -> Result<Vec<PendingQuestion>, StoreError> {
    let mut out = Vec::new();
    for (i, line) in reader.lines().enumerate() {
        let line = line?;
        if line.trim().is_empty() {
            continue;
        }
        let row: QuestionRow = serde_json::from_str(&line)
            .map_err(|source| StoreError::Parse { line: i + 1, source })?;
        out.push(PendingQuestion::from_row(i + 1, row));
    }
    Ok(out)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(s: &str) -> Result<Vec<PendingQuestion>, StoreError> {
        parse_question_rows(BufReader::new(s.as_bytes()))
    }

    #[test]
    fn skips_blank_lines_and_keeps_line_numbers() {
        let rows = parse(
            "{\"text\":\"Q1\",\"embedding\":[1.0]}\n\n   \n{\"text\":\"Q2\",\"source\":\"Civics 2014\"}\n",
        )
        .unwrap();
        assert_eq!(rows.len(), 2);
        assert_eq!(rows[0].line, 1);
        assert_eq!(rows[1].line, 4);
        assert_eq!(rows[1].source.as_deref(), Some("Civics 2014"));
        assert!(rows[1].embedding.is_none());
    }

    #[test]
    fn malformed_line_fails_whole_load() {
        let err = parse("{\"text\":\"ok\"}\n{not json}\n").unwrap_err();
        match err {
            StoreError::Parse { line, .. } => assert_eq!(line, 2),
            other => panic!("unexpected: {other:?}"),
        }
    }

    #[test]
    fn odd_field_types_do_not_fail_the_load() {
        let rows = parse(
            "{\"text\":\"Q\",\"source\":2015,\"embedding\":[1.0]}\n{\"text\":12,\"options\":{\"a\":1},\"embedding\":[1.0]}\n",
        )
        .unwrap();
        assert_eq!(rows.len(), 2);
        assert_eq!(rows[0].source.as_deref(), Some("2015"));
        assert_eq!(rows[1].text, "12");
        assert!(rows[1].options.is_empty());
    }

    #[test]
    fn non_object_line_is_rejected() {
        assert!(matches!(parse("[1, 2]\n"), Err(StoreError::Parse { line: 1, .. })));
    }
}
