//! Delimited-text table decoding.
//!
//! Exports are header-first, one record per line, tab-separated by default.
//! Decoding is positional against the header and never fails: short rows
//! simply lack their trailing fields, extra values are dropped, and empty
//! input decodes to an empty table. Validation is left to the mappers.

use std::collections::HashMap;

/// Default field delimiter of the exported tables.
pub const TAB: char = '\t';

/// One decoded row: column name to raw value.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RawRow {
    /// 1-based line number in the source text (header is line 1)
    line: usize,
    fields: HashMap<String, String>,
}

impl RawRow {
    pub fn new(line: usize) -> Self {
        Self {
            line,
            fields: HashMap::new(),
        }
    }

    /// Builder method to add a field.
    pub fn with_field(mut self, name: &str, value: &str) -> Self {
        self.fields.insert(name.to_string(), value.to_string());
        self
    }

    pub fn line(&self) -> usize {
        self.line
    }

    /// Raw value of a column, or `None` when the row was too short to reach it.
    pub fn get(&self, column: &str) -> Option<&str> {
        self.fields.get(column).map(String::as_str)
    }

    /// Number of fields present.
    pub fn len(&self) -> usize {
        self.fields.len()
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }
}

/// A decoded table.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Table {
    pub headers: Vec<String>,
    pub rows: Vec<RawRow>,
}

impl Table {
    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    pub fn has_column(&self, column: &str) -> bool {
        self.headers.iter().any(|h| h == column)
    }
}

/// Decode `text` into a table using `delimiter`.
pub fn decode(text: &str, delimiter: char) -> Table {
    let mut lines = text.split('\n').map(|l| l.strip_suffix('\r').unwrap_or(l));

    let headers: Vec<String> = match lines.next() {
        Some(header) if !header.is_empty() => {
            header.split(delimiter).map(str::to_string).collect()
        }
        _ => return Table::default(),
    };

    let rows = lines
        .enumerate()
        .filter(|(_, line)| !line.is_empty())
        .map(|(i, line)| {
            // +2: enumerate is 0-based and the header occupied line 1
            let mut row = RawRow::new(i + 2);
            for (name, value) in headers.iter().zip(line.split(delimiter)) {
                row.fields.insert(name.clone(), value.to_string());
            }
            row
        })
        .collect();

    Table { headers, rows }
}

/// Decode a tab-separated table.
pub fn decode_tsv(text: &str) -> Table {
    decode(text, TAB)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_decode_rows_and_headers() {
        let table = decode_tsv("PlayerId\tRating\tWinCnt\n1\t1600\t5\n2\t1550\t3\n");

        assert_eq!(table.headers, vec!["PlayerId", "Rating", "WinCnt"]);
        assert_eq!(table.len(), 2);
        assert_eq!(table.rows[0].get("PlayerId"), Some("1"));
        assert_eq!(table.rows[1].get("Rating"), Some("1550"));
        assert_eq!(table.rows[1].get("WinCnt"), Some("3"));
    }

    #[test]
    fn test_decode_row_count_matches_data_lines() {
        let mut text = String::from("a\tb\tc\td");
        for i in 0..25 {
            text.push_str(&format!("\n{}\t{}\t{}\t{}", i, i, i, i));
        }
        let table = decode_tsv(&text);
        assert_eq!(table.len(), 25);
        assert!(table.rows.iter().all(|r| r.len() <= 4));
    }

    #[test]
    fn test_decode_skips_empty_lines() {
        let table = decode_tsv("a\tb\n1\t2\n\n3\t4\n\n");
        assert_eq!(table.len(), 2);
        assert_eq!(table.rows[1].get("a"), Some("3"));
        assert_eq!(table.rows[1].line(), 4);
    }

    #[test]
    fn test_decode_short_row_lacks_trailing_fields() {
        let table = decode_tsv("a\tb\tc\n1\t2\n");
        let row = &table.rows[0];
        assert_eq!(row.len(), 2);
        assert_eq!(row.get("b"), Some("2"));
        assert_eq!(row.get("c"), None);
    }

    #[test]
    fn test_decode_long_row_drops_extra_values() {
        let table = decode_tsv("a\tb\n1\t2\t3\t4\n");
        assert_eq!(table.rows[0].len(), 2);
    }

    #[test]
    fn test_decode_keeps_empty_values() {
        let table = decode_tsv("a\tb\tc\n1\t\t3\n");
        assert_eq!(table.rows[0].get("b"), Some(""));
    }

    #[test]
    fn test_decode_empty_input() {
        let table = decode_tsv("");
        assert!(table.headers.is_empty());
        assert!(table.is_empty());
    }

    #[test]
    fn test_decode_header_only() {
        let table = decode_tsv("PlayerId\tGamerTag\n");
        assert_eq!(table.headers.len(), 2);
        assert!(table.is_empty());
        assert!(table.has_column("GamerTag"));
    }

    #[test]
    fn test_decode_crlf_line_endings() {
        let table = decode_tsv("a\tb\r\n1\t2\r\n");
        assert_eq!(table.headers, vec!["a", "b"]);
        assert_eq!(table.rows[0].get("b"), Some("2"));
    }

    #[test]
    fn test_decode_custom_delimiter() {
        let table = decode("a,b\n1,2\n", ',');
        assert_eq!(table.rows[0].get("a"), Some("1"));
    }
}
