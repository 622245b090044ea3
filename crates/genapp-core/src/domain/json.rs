//! Schema text → [`Database`].

use crate::domain::{DomainError, entities::Database};

/// Remove `//` line comments and `/* */` block comments that appear outside
/// string literals. Newlines are kept so parser positions stay meaningful.
pub fn strip_comments(input: &str) -> String {
    let mut out = String::with_capacity(input.len());
    let mut chars = input.chars().peekable();
    let mut in_string = false;
    let mut escaped = false;

    while let Some(c) = chars.next() {
        if in_string {
            out.push(c);
            if escaped {
                escaped = false;
            } else if c == '\\' {
                escaped = true;
            } else if c == '"' {
                in_string = false;
            }
            continue;
        }

        match (c, chars.peek()) {
            ('"', _) => {
                in_string = true;
                out.push(c);
            }
            ('/', Some('/')) => {
                for skipped in chars.by_ref() {
                    if skipped == '\n' {
                        out.push('\n');
                        break;
                    }
                }
            }
            ('/', Some('*')) => {
                chars.next();
                let mut prev = '\0';
                for skipped in chars.by_ref() {
                    if skipped == '\n' {
                        out.push('\n');
                    }
                    if prev == '*' && skipped == '/' {
                        break;
                    }
                    prev = skipped;
                }
            }
            _ => out.push(c),
        }
    }

    out
}

/// Decode a schema document, zero-filling omitted optional keys, and link
/// the back-references. No validation happens here.
pub fn parse_schema(text: &str) -> Result<Database, DomainError> {
    let cleaned = strip_comments(text);
    let mut db: Database =
        serde_json::from_str(&cleaned).map_err(|e| DomainError::MalformedSchema {
            reason: e.to_string(),
        })?;
    db.link();
    Ok(db)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn strips_line_and_block_comments() {
        let text = "{ // line\n \"a\": 1, /* block\n over lines */ \"b\": 2 }";
        let cleaned = strip_comments(text);
        assert!(!cleaned.contains("line"));
        assert!(!cleaned.contains("block"));
        assert_eq!(cleaned.matches('\n').count(), 2);
    }

    #[test]
    fn keeps_comment_markers_inside_strings() {
        let text = r#"{"url": "http://example.com/*x*/", "q": "say \"//hi\""}"#;
        assert_eq!(strip_comments(text), text);
    }

    #[test]
    fn parses_with_defaults_and_links() {
        let db = parse_schema(
            r#"
            // movie catalogue
            {
                "Name": "movies",
                "SqlType": "postgres",
                "Tables": [
                    { "Name": "movie",
                      "Fields": [
                        {"Name": "Id", "TypeDef": "integer", "PrimaryKey": true, "Incr": true},
                        {"Name": "Title", "TypeDef": "text", "Len": 40, "List": true},
                        {"Name": "Rating", "TypeDef": "dec", "Len": 3, "Dec": 1, "Null": true}
                      ],
                      "SQLParms": ["UNIQUE (Title)"]
                    }
                ]
            }"#,
        )
        .unwrap();

        assert_eq!(db.name, "movies");
        assert_eq!(db.sql_type, "postgres");
        let t = &db.tables[0];
        assert_eq!(t.sql_parms, vec!["UNIQUE (Title)"]);
        assert!(t.fields[0].incr);
        assert_eq!(t.fields[1].len, 40);
        assert!(t.fields[2].nullable);
        assert!(!t.fields[1].hidden);
        assert!(t.fields[2].owner().is_some());
        assert!(!db.is_resolved());
    }

    #[test]
    fn malformed_json() {
        let err = parse_schema("{ \"Name\": \"x\", ").unwrap_err();
        assert!(matches!(err, DomainError::MalformedSchema { .. }));
    }

    #[test]
    fn wrong_shape_is_malformed() {
        let err = parse_schema(r#"{"Name": "x", "Tables": {"Name": "t"}}"#).unwrap_err();
        assert!(matches!(err, DomainError::MalformedSchema { .. }));
    }
}
