//! Core data models: corpus rows, question records and ranked results.

use serde::Deserialize;
use serde_json::Value;

use crate::errors::StoreError;

/// One immutable corpus entry.
///
/// Only `embedding` is guaranteed; the other fields come from source data
/// as-is and may be empty or incomplete.
#[derive(Clone, Debug, PartialEq)]
pub struct QuestionRecord {
    pub text: String,
    /// Answer options in source order (usually four, sometimes fewer).
    pub options: Vec<String>,
    /// Subject/provenance label, e.g. `"Grade 12 History 2015"`.
    pub source: Option<String>,
    pub embedding: Vec<f32>,
}

/// A corpus record paired with its similarity to the query.
///
/// Borrowed from the shared corpus for the duration of one request.
#[derive(Clone, Copy, Debug)]
pub struct RankedResult<'a> {
    pub record: &'a QuestionRecord,
    /// Cosine similarity, higher is more similar.
    pub score: f32,
    /// Index of the record in corpus order.
    pub position: usize,
}

/// Wire shape of one JSONL line.
///
/// Every field is optional so that damaged rows still load. Only
/// `embedding` is typed; the rest is kept raw and normalized below.
#[derive(Debug, Deserialize)]
pub(crate) struct QuestionRow {
    #[serde(default)]
    pub text: Value,
    #[serde(default)]
    pub options: Value,
    #[serde(default)]
    pub source: Value,
    #[serde(default)]
    pub embedding: Option<Vec<f32>>,
}

/// A parsed row that may still be waiting for its embedding.
#[derive(Clone, Debug)]
pub struct PendingQuestion {
    /// 1-based line number in the source file.
    pub line: usize,
    pub text: String,
    pub options: Vec<String>,
    pub source: Option<String>,
    pub embedding: Option<Vec<f32>>,
}

impl PendingQuestion {
    pub(crate) fn from_row(line: usize, row: QuestionRow) -> Self {
        Self {
            line,
            text: json_text(row.text).unwrap_or_default(),
            options: normalize_options(row.options),
            source: json_text(row.source),
            embedding: row.embedding.filter(|v| !v.is_empty()),
        }
    }
}

impl TryFrom<PendingQuestion> for QuestionRecord {
    type Error = StoreError;

    fn try_from(p: PendingQuestion) -> Result<Self, Self::Error> {
        let embedding = p
            .embedding
            .ok_or(StoreError::MissingEmbedding { line: p.line })?;
        Ok(QuestionRecord {
            text: p.text,
            options: p.options,
            source: p.source,
            embedding,
        })
    }
}

/// Strings as-is, other non-null values as their JSON text.
fn json_text(raw: Value) -> Option<String> {
    match raw {
        Value::Null => None,
        Value::String(s) => Some(s),
        other => Some(other.to_string()),
    }
}

/// Arrays keep their items (non-strings rendered as JSON); anything else is empty.
fn normalize_options(raw: Value) -> Vec<String> {
    match raw {
        Value::Array(items) => items
            .into_iter()
            .map(|v| match v {
                Value::String(s) => s,
                other => other.to_string(),
            })
            .collect(),
        _ => Vec::new(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn row(json: &str) -> PendingQuestion {
        PendingQuestion::from_row(7, serde_json::from_str(json).unwrap())
    }

    #[test]
    fn options_that_are_not_a_list_become_empty() {
        let p = row(r#"{"text": "Q", "options": "A or B"}"#);
        assert!(p.options.is_empty());
    }

    #[test]
    fn non_string_options_keep_their_json_text() {
        let p = row(r#"{"options": ["1848", 1850, null]}"#);
        assert_eq!(p.options, vec!["1848", "1850", "null"]);
        assert_eq!(p.text, "");
    }

    #[test]
    fn missing_embedding_reports_line() {
        let p = row(r#"{"text": "Q", "embedding": []}"#);
        match QuestionRecord::try_from(p) {
            Err(StoreError::MissingEmbedding { line }) => assert_eq!(line, 7),
            other => panic!("unexpected: {other:?}"),
        }
    }

    #[test]
    fn non_string_text_and_source_keep_their_json_text() {
        let p = row(r#"{"text": 12, "source": 2015, "embedding": [1.0]}"#);
        assert_eq!(p.text, "12");
        assert_eq!(p.source.as_deref(), Some("2015"));

        let p = row(r#"{"text": null, "source": null}"#);
        assert_eq!(p.text, "");
        assert!(p.source.is_none());
    }
}
