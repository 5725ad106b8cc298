//! Shared helpers for the renderers

use chrono::NaiveDateTime;

/// Prefix for the children of a tree line.
pub fn continuation_prefix(prefix: &str, is_last: bool) -> String {
    if is_last {
        format!("{}    ", prefix)
    } else {
        format!("{}│   ", prefix)
    }
}

/// Connector drawn in front of a tree line.
pub fn connector(is_last: bool) -> &'static str {
    if is_last { "└── " } else { "├── " }
}

/// Extract the first line from a string.
pub fn first_line(s: &str) -> &str {
    s.lines().next().unwrap_or(s)
}

/// Escape text for XML/HTML element content and attribute values.
pub fn escape_xml(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&apos;"),
            _ => out.push(c),
        }
    }
    out
}

/// TaskPaper-style completion tag, e.g. ` @2013-02-10-Sun`.
pub fn completion_tag(completed: Option<NaiveDateTime>) -> String {
    completed
        .map(|when| when.format(" @%Y-%m-%d-%a").to_string())
        .unwrap_or_default()
}

#[cfg(test)]
mod tests {
    use chrono::NaiveDate;

    use super::*;

    #[test]
    fn test_continuation_prefix_last_item() {
        assert_eq!(continuation_prefix("", true), "    ");
        assert_eq!(continuation_prefix("│   ", true), "│       ");
    }

    #[test]
    fn test_continuation_prefix_not_last_item() {
        assert_eq!(continuation_prefix("", false), "│   ");
    }

    #[test]
    fn test_first_line_extracts_first() {
        assert_eq!(first_line("one\ntwo"), "one");
        assert_eq!(first_line(""), "");
    }

    #[test]
    fn test_escape_xml() {
        assert_eq!(
            escape_xml(r#"Fish & "chips" <today>"#),
            "Fish &amp; &quot;chips&quot; &lt;today&gt;"
        );
        assert_eq!(escape_xml("it's"), "it&apos;s");
    }

    #[test]
    fn test_completion_tag() {
        let when = NaiveDate::from_ymd_opt(2013, 2, 10)
            .unwrap()
            .and_hms_opt(9, 30, 0)
            .unwrap();
        assert_eq!(completion_tag(Some(when)), " @2013-02-10-Sun");
        assert_eq!(completion_tag(None), "");
    }
}
