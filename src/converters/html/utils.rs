//! Escaping and truncation helpers shared by the slide and form renderers.

use super::constants::ELLIPSIS;

/// Escapes the five HTML-sensitive characters (`&`, `<`, `>`, `"`, `'`).
/// Safe for both element content and quoted attribute values.
pub fn escape_html(text: &str) -> String {
    let mut escaped = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&quot;"),
            '\'' => escaped.push_str("&#039;"),
            _ => escaped.push(c),
        }
    }
    escaped
}

/// Shortens `text` to at most `limit` characters, replacing the tail with an ellipsis.
/// Counts Unicode scalar values, so multi-byte text is never split mid-character.
pub fn truncate(text: &str, limit: usize) -> String {
    if text.chars().count() <= limit {
        return text.to_string();
    }
    let keep = limit.saturating_sub(ELLIPSIS.len());
    let mut shortened: String = text.chars().take(keep).collect();
    shortened.push_str(ELLIPSIS);
    shortened
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn escapes_all_five_characters() {
        assert_eq!(
            escape_html(r#"<a href="x">Tom & Jerry's</a>"#),
            "&lt;a href=&quot;x&quot;&gt;Tom &amp; Jerry&#039;s&lt;/a&gt;"
        );
        assert_eq!(escape_html("plain"), "plain");
    }

    #[test]
    fn truncates_long_bullet_to_limit() {
        let bullet = "b".repeat(150);
        let shown = truncate(&bullet, 100);
        assert_eq!(shown.chars().count(), 100);
        assert_eq!(&shown[..97], "b".repeat(97));
        assert!(shown.ends_with("..."));
    }

    #[test]
    fn keeps_text_at_or_below_limit() {
        let exact = "x".repeat(100);
        assert_eq!(truncate(&exact, 100), exact);
        assert_eq!(truncate("short", 100), "short");
        assert_eq!(truncate("", 100), "");
    }

    #[test]
    fn counts_characters_not_bytes() {
        let text = "é".repeat(60);
        assert_eq!(truncate(&text, 60), text);
        let shown = truncate(&"é".repeat(61), 60);
        assert_eq!(shown.chars().count(), 60);
    }
}
