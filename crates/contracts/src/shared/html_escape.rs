//! Escaping of text interpolated into card markup.

/// Replace `&`, `<`, `>`, `"` and `'` with their entity equivalents.
pub fn escape_html(input: &str) -> String {
    let mut out = String::with_capacity(input.len());
    for ch in input.chars() {
        match ch {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            _ => out.push(ch),
        }
    }
    out
}

/// Same as [`escape_html`]; an absent value becomes an empty string.
pub fn escape_html_opt(input: Option<&str>) -> String {
    input.map(escape_html).unwrap_or_default()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_escapes_all_special_chars() {
        assert_eq!(
            escape_html(r#"<a href="x">Tom & Jerry's</a>"#),
            "&lt;a href=&quot;x&quot;&gt;Tom &amp; Jerry&#39;s&lt;/a&gt;"
        );
    }

    #[test]
    fn test_plain_text_unchanged() {
        assert_eq!(escape_html("Red Mug 250ml"), "Red Mug 250ml");
        assert_eq!(escape_html("Kaos Merah (ukuran L)"), "Kaos Merah (ukuran L)");
    }

    #[test]
    fn test_empty_and_absent() {
        assert_eq!(escape_html(""), "");
        assert_eq!(escape_html_opt(None), "");
        assert_eq!(escape_html_opt(Some("a<b")), "a&lt;b");
    }

    #[test]
    fn test_ampersand_not_double_escaped_in_one_pass() {
        assert_eq!(escape_html("&amp;"), "&amp;amp;");
    }
}
