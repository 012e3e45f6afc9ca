//! Reduce a script-style object literal to plain JSON.
//!
//! The docs site authored its table as `var RESOURCE_COLLECTIONS = { ... };`
//! with `//` and `/* */` comments (sometimes around whole retired entries)
//! and the odd trailing comma. Comments, the assignment prefix, trailing
//! commas and the final `;` are blanked out. Newlines are kept so JSON error
//! positions still match the original file.

/// Returns the JSON text, or a message describing where the input is malformed.
pub fn strip_script(text: &str) -> Result<String, String> {
    let without_comments = strip_comments(text)?;
    let literal = strip_assignment(&without_comments)?;
    Ok(strip_trailing_commas(&literal))
}

fn strip_comments(text: &str) -> Result<String, String> {
    let chars: Vec<char> = text.chars().collect();
    let mut out = String::with_capacity(text.len());
    let mut line = 1;
    let mut i = 0;

    while i < chars.len() {
        let c = chars[i];
        match c {
            '"' | '\'' => {
                let end = string_end(&chars, i).ok_or_else(|| format!("unterminated string starting on line {line}"))?;
                out.extend(&chars[i..=end]);
                i = end + 1;
            }
            '/' if chars.get(i + 1) == Some(&'/') => {
                while i < chars.len() && chars[i] != '\n' {
                    i += 1;
                }
            }
            '/' if chars.get(i + 1) == Some(&'*') => {
                let start_line = line;
                i += 2;
                loop {
                    match chars.get(i) {
                        None => return Err(format!("unterminated block comment starting on line {start_line}")),
                        Some('*') if chars.get(i + 1) == Some(&'/') => {
                            i += 2;
                            break;
                        }
                        Some('\n') => {
                            out.push('\n');
                            line += 1;
                            i += 1;
                        }
                        Some(_) => i += 1,
                    }
                }
            }
            '\n' => {
                out.push(c);
                line += 1;
                i += 1;
            }
            _ => {
                out.push(c);
                i += 1;
            }
        }
    }

    Ok(out)
}

/// Index of the quote closing the string literal that opens at `start`
fn string_end(chars: &[char], start: usize) -> Option<usize> {
    let quote = chars[start];
    let mut i = start + 1;
    while i < chars.len() {
        match chars[i] {
            '\\' => i += 2,
            '\n' => return None,
            c if c == quote => return Some(i),
            _ => i += 1,
        }
    }
    None
}

/// Blank out `var NAME =` before the literal and `;` after it
fn strip_assignment(text: &str) -> Result<String, String> {
    let Some(open) = text.find('{') else {
        return Err("no object literal found".to_string());
    };

    let prefix = &text[..open];
    if !prefix.trim().is_empty() && !prefix.trim_end().ends_with('=') {
        return Err(format!(
            "unexpected content before the object literal: '{}'",
            prefix.trim()
        ));
    }

    let close = text.rfind('}').unwrap_or(open);
    let suffix = &text[close + 1..];
    if suffix.chars().any(|c| !c.is_whitespace() && c != ';') {
        return Err(format!(
            "unexpected content after the object literal: '{}'",
            suffix.trim()
        ));
    }

    let mut out = blank(prefix);
    out.push_str(&text[open..=close]);
    out.push_str(&blank(suffix));
    Ok(out)
}

fn blank(text: &str) -> String {
    text.chars()
        .map(|c| if c == '\n' { '\n' } else { ' ' })
        .collect()
}

fn strip_trailing_commas(text: &str) -> String {
    let chars: Vec<char> = text.chars().collect();
    let mut out = String::with_capacity(text.len());
    let mut i = 0;

    while i < chars.len() {
        match chars[i] {
            '"' | '\'' => {
                // Strings were checked for termination while stripping comments
                let end = string_end(&chars, i).unwrap_or(chars.len() - 1);
                out.extend(&chars[i..=end]);
                i = end + 1;
            }
            ',' => {
                let next = chars[i + 1..].iter().find(|c| !c.is_whitespace());
                if matches!(next, Some(']') | Some('}')) {
                    out.push(' ');
                } else {
                    out.push(',');
                }
                i += 1;
            }
            c => {
                out.push(c);
                i += 1;
            }
        }
    }

    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use serde_json::{json, Value};

    fn to_json(text: &str) -> Value {
        serde_json::from_str(&strip_script(text).unwrap()).unwrap()
    }

    #[test]
    fn test_assignment_and_semicolon_removed() {
        let value = to_json(r#"var RESOURCE_COLLECTIONS = { "a": { "resources": [] } };"#);
        assert_eq!(value, json!({ "a": { "resources": [] } }));
    }

    #[test]
    fn test_comments_removed_but_urls_kept() {
        let text = r#"{
  "index/secondary/carousel": {
    "title": "",
    "resources": [
      // "guide/practices/screens_support.html#ConfigurationExamples",
      "http://www.youtube.com/watch?v=0r36OJaeMo4"
    ]
  }
/*  "launch/static": {
    "title": "",
    "resources": [ "sdk/index.html" ]
  }, */
}"#;
        let value = to_json(text);
        assert_eq!(
            value,
            json!({
                "index/secondary/carousel": {
                    "title": "",
                    "resources": ["http://www.youtube.com/watch?v=0r36OJaeMo4"]
                }
            })
        );
    }

    #[test]
    fn test_trailing_commas_removed() {
        let value = to_json(r#"{ "a": { "resources": ["x.html", "y.html",
        ], }, }"#);
        assert_eq!(value, json!({ "a": { "resources": ["x.html", "y.html"] } }));
    }

    #[test]
    fn test_commas_inside_strings_untouched() {
        let value = to_json(r#"{ "a": { "title": "one, }", "resources": [] } }"#);
        assert_eq!(value["a"]["title"], "one, }");
    }

    #[test]
    fn test_line_numbers_preserved() {
        let text = "var X = {\n/* one\ntwo */\n\"a\": {}\n};";
        let stripped = strip_script(text).unwrap();
        assert_eq!(stripped.lines().count(), text.lines().count());
        assert!(stripped.lines().nth(3).unwrap().contains("\"a\""));
    }

    #[test]
    fn test_malformed_input_reported() {
        let err = strip_script("{ /* never closed").unwrap_err();
        assert!(err.contains("unterminated block comment"), "{err}");

        let err = strip_script("{\n\"a\": {\"title\": \"open}\n}").unwrap_err();
        assert!(err.contains("unterminated string starting on line 2"), "{err}");

        let err = strip_script("console.log({})").unwrap_err();
        assert!(err.contains("before the object literal"), "{err}");

        let err = strip_script("var X = {} + 1").unwrap_err();
        assert!(err.contains("after the object literal"), "{err}");

        assert!(strip_script("// nothing here").is_err());
    }
}
