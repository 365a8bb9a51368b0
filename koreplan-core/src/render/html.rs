//! HTML helpers shared by the renderers

use std::sync::LazyLock;

use regex::Regex;

/// Opening paragraph tag directly followed by a block element
static P_BEFORE_BLOCK: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r#"<p(?: class="[^"]*")?>\s*(<(?:h\d|ul|ol|div|hr)[^>]*>)"#)
        .expect("paragraph/block open pattern is valid")
});

/// Block element close directly followed by a closing paragraph tag
static BLOCK_BEFORE_P_CLOSE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(</(?:h\d|ul|ol|div)>)\s*</p>").expect("block/paragraph close pattern is valid")
});

/// Escape text for use in element content and attribute values
pub fn escape_html(s: &str) -> String {
    s.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
        .replace('\'', "&#39;")
}

/// Remove paragraph tags that ended up wrapped around block elements.
///
/// The block renderer never emits such markup; this stays as the final
/// normalization over the assembled fragment.
pub(crate) fn unwrap_blocks_in_paragraphs(html: &str) -> String {
    let opened = P_BEFORE_BLOCK.replace_all(html, "$1");
    BLOCK_BEFORE_P_CLOSE.replace_all(&opened, "$1").into_owned()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_escape_html() {
        assert_eq!(
            escape_html(r#"<b>"Tom" & 'Jerry'</b>"#),
            "&lt;b&gt;&quot;Tom&quot; &amp; &#39;Jerry&#39;&lt;/b&gt;"
        );
    }

    #[test]
    fn test_escape_keeps_non_ascii() {
        assert_eq!(escape_html("Gün 1: 서울 $50"), "Gün 1: 서울 $50");
    }

    #[test]
    fn test_unwrap_paragraph_around_heading() {
        let html = r#"<p class="mb-3"><h4 class="x">Gün 1</h4></p>"#;
        assert_eq!(unwrap_blocks_in_paragraphs(html), r#"<h4 class="x">Gün 1</h4>"#);
    }

    #[test]
    fn test_unwrap_bare_paragraph_around_list() {
        let html = "<p>\n<ul><li>a</li></ul>\n</p>";
        assert_eq!(unwrap_blocks_in_paragraphs(html), "<ul><li>a</li></ul>");
    }

    #[test]
    fn test_unwrap_leaves_plain_paragraphs() {
        let html = r#"<p class="mb-3">Seul <strong>güzel</strong></p>"#;
        assert_eq!(unwrap_blocks_in_paragraphs(html), html);
    }
}
