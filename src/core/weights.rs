//! Weights file reader.
//!
//! Rows are whitespace separated. Each column is typed as a whole: integer if
//! every value parses as `i64`, otherwise float if every value parses as
//! `f64`, otherwise text. Numeric values are re-rendered canonically, so the
//! joined row of `STA1 28.00 007` is `STA1 28.0 7`.

use crate::domain::model::{Field, WeightRecord, WeightsTable};
use crate::utils::error::{Result, SeisError};

const COMMENT: char = '#';

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum ColumnKind {
    Int,
    Float,
    Text,
}

fn column_kind<'a>(values: impl Iterator<Item = &'a str>) -> ColumnKind {
    let mut kind = ColumnKind::Int;
    for value in values {
        if kind == ColumnKind::Int && value.parse::<i64>().is_err() {
            kind = ColumnKind::Float;
        }
        if kind == ColumnKind::Float && value.parse::<f64>().is_err() {
            return ColumnKind::Text;
        }
    }
    kind
}

/// Splits the text into (line number, tokens) pairs, skipping blanks and comments.
fn tokenize(text: &str) -> Vec<(usize, Vec<&str>)> {
    text.lines()
        .enumerate()
        .filter_map(|(idx, raw)| {
            let content = match raw.find(COMMENT) {
                Some(pos) => &raw[..pos],
                None => raw,
            };
            let tokens: Vec<&str> = content.split_whitespace().collect();
            if tokens.is_empty() {
                None
            } else {
                Some((idx + 1, tokens))
            }
        })
        .collect()
}

pub fn parse_weights(text: &str) -> Result<WeightsTable> {
    let rows = tokenize(text);

    let Some((_, first)) = rows.first() else {
        return Ok(WeightsTable::default());
    };
    let width = first.len();

    if let Some((line, tokens)) = rows.iter().find(|(_, tokens)| tokens.len() != width) {
        return Err(SeisError::ParseError {
            line: *line,
            message: format!("expected {} columns, found {}", width, tokens.len()),
        });
    }

    let kinds: Vec<ColumnKind> = (0..width)
        .map(|col| column_kind(rows.iter().map(|(_, tokens)| tokens[col])))
        .collect();
    tracing::debug!("Column kinds: {:?}", kinds);

    let mut records = Vec::with_capacity(rows.len());
    for (line, tokens) in rows {
        let fields = tokens
            .iter()
            .zip(&kinds)
            .map(|(token, kind)| to_field(token, *kind, line))
            .collect::<Result<Vec<_>>>()?;
        records.push(WeightRecord { line, fields });
    }

    Ok(WeightsTable { records })
}

fn to_field(token: &str, kind: ColumnKind, line: usize) -> Result<Field> {
    let parse_failed = |reason: String| SeisError::ParseError {
        line,
        message: format!("'{}': {}", token, reason),
    };

    match kind {
        ColumnKind::Int => token
            .parse::<i64>()
            .map(Field::Int)
            .map_err(|e| parse_failed(e.to_string())),
        ColumnKind::Float => token
            .parse::<f64>()
            .map(Field::Float)
            .map_err(|e| parse_failed(e.to_string())),
        ColumnKind::Text => Ok(Field::Text(token.to_string())),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_infers_column_types() {
        let table = parse_weights("STA1 28.00 007\nSTA2 14 3\n").unwrap();

        assert_eq!(table.len(), 2);
        assert_eq!(table.records[0].fields[0], Field::Text("STA1".to_string()));
        // 28.00 與 14 同欄, 整欄為 float
        assert_eq!(table.records[0].fields[1], Field::Float(28.0));
        assert_eq!(table.records[1].fields[1], Field::Float(14.0));
        assert_eq!(table.records[0].fields[2], Field::Int(7));
        assert_eq!(table.records[0].joined(), "STA1 28.0 7");
        assert_eq!(table.records[1].joined(), "STA2 14.0 3");
    }

    #[test]
    fn test_parse_skips_comments_and_blank_lines() {
        let text = "# header\n\nSTA1 28.0 1 # trailing\n   \nSTA2 56.0 1\n";
        let table = parse_weights(text).unwrap();

        assert_eq!(table.len(), 2);
        assert_eq!(table.records[0].line, 3);
        assert_eq!(table.records[1].line, 5);
        assert_eq!(table.records[0].joined(), "STA1 28.0 1");
    }

    #[test]
    fn test_parse_rejects_ragged_rows() {
        let err = parse_weights("STA1 28.0 1\nSTA2 56.0\n").unwrap_err();
        match err {
            SeisError::ParseError { line, .. } => assert_eq!(line, 2),
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn test_parse_text_column_keeps_tokens() {
        let table = parse_weights("STA1 28.0\nSTA2 far\n").unwrap();
        assert_eq!(table.records[0].fields[1], Field::Text("28.0".to_string()));
        assert_eq!(table.records[1].fields[1], Field::Text("far".to_string()));
    }

    #[test]
    fn test_parse_empty_input() {
        assert!(parse_weights("").unwrap().is_empty());
        assert!(parse_weights("# only comments\n\n").unwrap().is_empty());
    }
}
