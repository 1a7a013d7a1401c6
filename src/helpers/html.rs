//! HTML helper functions

/// Escape `&`, `<`, `>` and `"` as HTML entities.
///
/// `&` is replaced first so the entities introduced for the other
/// characters are not escaped a second time.
pub fn escape_entities(text: &str) -> String {
    text.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_escapes_all_four_entities() {
        assert_eq!(
            escape_entities(r#"<a href="/x">&</a>"#),
            "&lt;a href=&quot;/x&quot;&gt;&amp;&lt;/a&gt;"
        );
    }

    #[test]
    fn test_ampersand_escaped_before_others() {
        assert_eq!(escape_entities("<p>A & B</p>"), "&lt;p&gt;A &amp; B&lt;/p&gt;");
        assert!(!escape_entities("<").contains("&amp;lt;"));
    }

    #[test]
    fn test_plain_text_unchanged() {
        assert_eq!(escape_entities("hello world"), "hello world");
    }
}
