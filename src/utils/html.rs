//! Utility functions for handling Telegram HTML formatting
//!
//! Telegram's HTML parse mode only understands a handful of tags, and any
//! bare `<`, `>` or `&` in user or upstream text breaks the whole message.

/// Escapes text for Telegram's HTML parse mode
///
/// # Arguments
/// * `text` - The text to escape
///
/// # Returns
/// A string safe to interpolate between HTML tags
///
/// # Example
/// ```
/// use anime_schedule_bot::utils::html::escape_html;
///
/// let escaped = escape_html("Tom & Jerry <3");
/// assert_eq!(escaped, "Tom &amp; Jerry &lt;3");
/// ```
pub fn escape_html(text: &str) -> String {
    text.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_escape_tags() {
        assert_eq!(escape_html("<b>bold</b>"), "&lt;b&gt;bold&lt;/b&gt;");
    }

    #[test]
    fn test_ampersand_escaped_first() {
        assert_eq!(escape_html("&lt;"), "&amp;lt;");
    }

    #[test]
    fn test_escape_quotes() {
        assert_eq!(escape_html("\"Oshi no Ko\""), "&quot;Oshi no Ko&quot;");
    }

    #[test]
    fn test_escape_empty_and_plain_text() {
        assert_eq!(escape_html(""), "");
        assert_eq!(escape_html("Sousou no Frieren"), "Sousou no Frieren");
    }
}
