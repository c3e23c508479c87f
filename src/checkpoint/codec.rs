//! Delimited-text row set codec
//!
//! Format:
//! - field delimiter `;`, one row per line, header line first
//! - a field is quote-wrapped when its rendered text contains `;` or `"`;
//!   embedded quotes are doubled inside the wrapping
//! - a data row shorter than the header is padded with null
//! - all decoded values are text; numeric semantics are recovered at
//!   comparison time
//!
//! The reader is line-based: embedded newlines inside a field are not
//! supported.

use crate::table::{Row, RowSet, Value};

const DELIMITER: char = ';';

/// Renders a row set to delimited text. An empty row set renders to an
/// empty string: no rows, not even a header.
///
/// The header lists the first row's columns in insertion order; every
/// data row is projected onto those columns, rendering absent cells as
/// empty.
pub fn encode(rows: &RowSet) -> String {
    let Some(first) = rows.first() else {
        return String::new();
    };

    let columns: Vec<&str> = first.column_names().collect();

    let mut out = String::new();
    out.push_str(&columns.join(&DELIMITER.to_string()));
    out.push('\n');

    for row in rows {
        let fields: Vec<String> = columns
            .iter()
            .map(|col| {
                let rendered = row.get(col).map(Value::render).unwrap_or_default();
                escape_field(&rendered)
            })
            .collect();
        out.push_str(&fields.join(&DELIMITER.to_string()));
        out.push('\n');
    }

    out
}

/// Parses delimited text back into a row set. Missing trailing fields
/// decode to null; everything else decodes to text.
pub fn decode(content: &str) -> RowSet {
    let mut lines = content.lines();

    let Some(header_line) = lines.next() else {
        return RowSet::new();
    };
    let headers = parse_line(header_line);

    let mut rows = RowSet::new();
    for line in lines {
        let fields = parse_line(line);
        let mut row = Row::new();
        for (index, header) in headers.iter().enumerate() {
            let value = match fields.get(index) {
                Some(field) => Value::Text(field.clone()),
                None => Value::Null,
            };
            row.set(header.clone(), value);
        }
        rows.push(row);
    }

    rows
}

/// Quote-wraps a field when needed, doubling embedded quotes.
fn escape_field(text: &str) -> String {
    if text.contains(DELIMITER) || text.contains('"') {
        format!("\"{}\"", text.replace('"', "\"\""))
    } else {
        text.to_string()
    }
}

/// Splits one line into fields. Quote state toggles on `"`; a doubled
/// `""` inside quotes decodes to one literal quote; delimiters inside an
/// open quote are ordinary characters.
fn parse_line(line: &str) -> Vec<String> {
    if line.is_empty() {
        return Vec::new();
    }

    let mut fields = Vec::new();
    let mut current = String::new();
    let mut in_quotes = false;
    let mut chars = line.chars().peekable();

    while let Some(c) = chars.next() {
        if c == '"' {
            if !in_quotes {
                in_quotes = true;
            } else if chars.peek() == Some(&'"') {
                current.push('"');
                chars.next();
            } else {
                in_quotes = false;
            }
        } else if c == DELIMITER && !in_quotes {
            fields.push(std::mem::take(&mut current));
        } else {
            current.push(c);
        }
    }

    fields.push(current);
    fields
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_encode_empty_set_is_empty() {
        assert_eq!(encode(&RowSet::new()), "");
    }

    #[test]
    fn test_decode_empty_content() {
        assert!(decode("").is_empty());
    }

    #[test]
    fn test_header_follows_first_row_column_order() {
        let rows = vec![Row::from_pairs([
            ("id", Value::Integer(1)),
            ("name", Value::from("Alice")),
        ])];
        let text = encode(&rows);
        assert!(text.starts_with("id;name\n"));
    }

    #[test]
    fn test_round_trip_plain_values() {
        let rows = vec![
            Row::from_pairs([("id", Value::Integer(1)), ("name", Value::from("Alice"))]),
            Row::from_pairs([("id", Value::Integer(2)), ("name", Value::from("Bob"))]),
        ];

        let decoded = decode(&encode(&rows));
        assert_eq!(decoded.len(), 2);
        // Values come back as text
        assert_eq!(decoded[0].get("id"), Some(&Value::from("1")));
        assert_eq!(decoded[1].get("name"), Some(&Value::from("Bob")));
    }

    #[test]
    fn test_round_trip_delimiter_and_quotes() {
        let rows = vec![Row::from_pairs([
            ("note", Value::from("a;b")),
            ("quote", Value::from(r#"say "hi""#)),
        ])];

        let text = encode(&rows);
        assert!(text.contains(r#""a;b""#));
        assert!(text.contains(r#""say ""hi""""#));

        let decoded = decode(&text);
        assert_eq!(decoded[0].get("note"), Some(&Value::from("a;b")));
        assert_eq!(decoded[0].get("quote"), Some(&Value::from(r#"say "hi""#)));
    }

    #[test]
    fn test_short_row_padded_with_null() {
        let decoded = decode("a;b;c\n1;2\n");
        assert_eq!(decoded.len(), 1);
        assert_eq!(decoded[0].get("a"), Some(&Value::from("1")));
        assert_eq!(decoded[0].get("b"), Some(&Value::from("2")));
        assert_eq!(decoded[0].get("c"), Some(&Value::Null));
    }

    #[test]
    fn test_extra_fields_beyond_header_ignored() {
        let decoded = decode("a;b\n1;2;3\n");
        assert_eq!(decoded[0].len(), 2);
    }

    #[test]
    fn test_null_renders_as_empty_field() {
        let rows = vec![Row::from_pairs([
            ("a", Value::Null),
            ("b", Value::Integer(2)),
        ])];
        let text = encode(&rows);
        assert!(text.contains("\n;2\n"));
    }

    #[test]
    fn test_absent_column_in_later_row_renders_empty() {
        let rows = vec![
            Row::from_pairs([("a", Value::Integer(1)), ("b", Value::Integer(2))]),
            Row::from_pairs([("a", Value::Integer(3))]),
        ];
        let decoded = decode(&encode(&rows));
        assert_eq!(decoded[1].get("b"), Some(&Value::from("")));
    }
}
