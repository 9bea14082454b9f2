// Comma-separated text parsing for the analysis artifacts. The rules match
// the report front end exactly: no doubled-quote escaping, blank lines
// discarded, short rows padded with empty fields.

use std::collections::HashMap;

/// One parsed record: header name → field text.
#[derive(Debug, Clone, Default)]
pub struct Row {
    fields: HashMap<String, String>,
}

impl Row {
    pub fn get(&self, name: &str) -> Option<&str> {
        self.fields.get(name).map(String::as_str)
    }

    /// Field text, or "" when the column is absent.
    pub fn field(&self, name: &str) -> &str {
        self.get(name).unwrap_or("")
    }
}

/// Parse raw comma-separated text into records. The first non-blank line is
/// the header; each following non-blank line is zipped positionally against
/// the header names. Missing trailing fields become ""; fields beyond the
/// header count are ignored.
pub fn parse(text: &str) -> Vec<Row> {
    let mut lines = text.split('\n').filter(|l| !l.trim().is_empty());

    let headers = match lines.next() {
        Some(line) => split_fields(line),
        None => return Vec::new(),
    };

    lines
        .map(|line| {
            let values = split_fields(line);
            let mut fields = HashMap::with_capacity(headers.len());
            for (i, name) in headers.iter().enumerate() {
                let value = values.get(i).cloned().unwrap_or_default();
                fields.insert(name.clone(), value);
            }
            Row { fields }
        })
        .collect()
}

/// Quote-aware comma split: a double quote toggles in-quotes mode without
/// being copied, and a comma separates only outside quotes. Doubled quotes
/// are NOT an escape sequence.
fn split_fields(line: &str) -> Vec<String> {
    let mut out = Vec::new();
    let mut current = String::new();
    let mut in_quotes = false;

    for ch in line.chars() {
        match ch {
            '"' => in_quotes = !in_quotes,
            ',' if !in_quotes => {
                out.push(clean_field(&current));
                current.clear();
            }
            _ => current.push(ch),
        }
    }
    out.push(clean_field(&current));
    out
}

/// Trim, then strip one leading and one trailing double quote. The scan in
/// `split_fields` already drops quote characters, so the strip is usually a
/// no-op; it is kept to match the front end's behavior exactly.
fn clean_field(raw: &str) -> String {
    let mut s = raw.trim();
    if let Some(rest) = s.strip_prefix('"') {
        s = rest;
    }
    if let Some(rest) = s.strip_suffix('"') {
        s = rest;
    }
    s.to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Re-serialize with the documented rules: fields containing a comma are
    /// wrapped in double quotes, everything else is written bare.
    fn serialize(headers: &[&str], rows: &[Vec<&str>]) -> String {
        let quote = |f: &str| {
            if f.contains(',') {
                format!("\"{}\"", f)
            } else {
                f.to_string()
            }
        };
        let mut out = headers.iter().map(|h| quote(h)).collect::<Vec<_>>().join(",");
        for row in rows {
            out.push('\n');
            out.push_str(&row.iter().map(|f| quote(f)).collect::<Vec<_>>().join(","));
        }
        out
    }

    #[test]
    fn test_parse_basic() {
        let rows = parse("a,b,c\n1,2,3\n4,5,6");
        assert_eq!(rows.len(), 2);
        assert_eq!(rows[0].field("a"), "1");
        assert_eq!(rows[1].field("c"), "6");
    }

    #[test]
    fn test_quoted_comma() {
        let rows = parse("title,authors,year\nA Study,\"Smith, J.\",2020");
        assert_eq!(rows[0].field("authors"), "Smith, J.");
        assert_eq!(rows[0].field("year"), "2020");
    }

    #[test]
    fn test_blank_lines_discarded() {
        let rows = parse("a,b\n\n1,2\n   \n3,4\n");
        assert_eq!(rows.len(), 2);
        assert_eq!(rows[0].field("a"), "1");
        assert_eq!(rows[1].field("b"), "4");
    }

    #[test]
    fn test_short_row_pads_empty() {
        let rows = parse("a,b,c\n1,2");
        assert_eq!(rows[0].field("b"), "2");
        assert_eq!(rows[0].field("c"), "");
    }

    #[test]
    fn test_long_row_ignores_extra() {
        let rows = parse("a,b\n1,2,3,4");
        assert_eq!(rows[0].field("a"), "1");
        assert_eq!(rows[0].field("b"), "2");
    }

    #[test]
    fn test_fields_trimmed_and_unquoted() {
        let rows = parse("a,b\n  \"x\"  , y ");
        assert_eq!(rows[0].field("a"), "x");
        assert_eq!(rows[0].field("b"), "y");
    }

    #[test]
    fn test_quoted_header() {
        let rows = parse("\"collection path\",title\np,t");
        assert_eq!(rows[0].field("collection path"), "p");
    }

    #[test]
    fn test_doubled_quotes_are_not_an_escape() {
        // A field written as "He said ""hi""" loses all quote characters;
        // this matches the front end and is deliberately not "fixed".
        let rows = parse("a\n\"He said \"\"hi\"\"\"");
        assert_eq!(rows[0].field("a"), "He said hi");
    }

    #[test]
    fn test_crlf_line_endings() {
        let rows = parse("a,b\r\n1,2\r\n");
        assert_eq!(rows[0].field("a"), "1");
        assert_eq!(rows[0].field("b"), "2");
    }

    #[test]
    fn test_round_trip() {
        let headers = ["title", "authors", "year"];
        let data = vec![
            vec!["Sediment transport", "Smith, J.; Doe, A.", "2020"],
            vec!["Sturgeon recruitment", "McAdam, S.", "2011"],
        ];
        let text = serialize(&headers, &data);
        let rows = parse(&text);
        assert_eq!(rows.len(), data.len());
        for (row, expected) in rows.iter().zip(&data) {
            for (name, value) in headers.iter().zip(expected) {
                assert_eq!(row.field(name), *value);
            }
        }
    }

    #[test]
    fn test_empty_input() {
        assert!(parse("").is_empty());
        assert!(parse("\n\n").is_empty());
        // header only, no data rows
        assert!(parse("a,b,c\n").is_empty());
    }
}
