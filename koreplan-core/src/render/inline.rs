//! Inline markup: bold spans and labels, day markers, Korean phrase badges
//! and dollar amounts.
//!
//! Works on raw text and escapes everything it does not turn into markup.

use std::fmt::{self, Write};
use std::sync::LazyLock;

use regex::Regex;

use super::html::escape_html;
use super::labels;

static BOLD: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\*\*[^*\n]+\*\*").expect("bold pattern is valid"));

/// Hangul run, separator, translation up to the end of the segment
static KOREAN_PHRASE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"([가-힣][가-힣 \t]*?)[ \t]*[-–—:][ \t]*([^\r\n]+)")
        .expect("korean phrase pattern is valid")
});

static MARKS: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?P<day>\d+\. Gün:|Gün \d+:)|(?P<money>\$\d+(?:,\d+)*(?:\.\d+)?)")
        .expect("day/amount pattern is valid")
});

/// Inline renderer settings
#[derive(Debug, Clone, Copy)]
pub(crate) struct Inline {
    /// Turn `한국어 - çeviri` runs into badges
    pub korean_badges: bool,
}

impl Inline {
    pub const PLAN: Inline = Inline {
        korean_badges: true,
    };

    /// Table cells hold Korean text side by side with Turkish; no badges there.
    pub const TABLE: Inline = Inline {
        korean_badges: false,
    };

    /// Render one line of text into `out`
    pub fn render(self, text: &str, out: &mut String) -> fmt::Result {
        let mut last = 0;

        for bold in BOLD.find_iter(text) {
            self.render_segment(&text[last..bold.start()], out)?;

            let marked = bold.as_str();
            let inner = &marked[2..marked.len() - 2];
            match labels::classify(inner) {
                Some(kind) => write!(out, r#"<strong class="{}">"#, kind.css_class())?,
                None => out.push_str("<strong>"),
            }
            render_marks(inner, out)?;
            out.push_str("</strong>");

            last = bold.end();
        }

        self.render_segment(&text[last..], out)
    }

    /// Render text that contains no bold spans
    fn render_segment(self, text: &str, out: &mut String) -> fmt::Result {
        if !self.korean_badges {
            return render_marks(text, out);
        }

        let mut last = 0;
        for caps in KOREAN_PHRASE.captures_iter(text) {
            let (Some(whole), Some(phrase), Some(translation)) =
                (caps.get(0), caps.get(1), caps.get(2))
            else {
                continue;
            };

            render_marks(&text[last..whole.start()], out)?;
            write!(
                out,
                r#"<span class="badge bg-light text-dark me-1 korean-phrase">{}</span> "#,
                escape_html(phrase.as_str().trim_end())
            )?;
            render_marks(translation.as_str(), out)?;

            last = whole.end();
        }

        render_marks(&text[last..], out)
    }
}

/// Day markers and dollar amounts; everything else is escaped
fn render_marks(text: &str, out: &mut String) -> fmt::Result {
    let mut last = 0;

    for caps in MARKS.captures_iter(text) {
        let Some(whole) = caps.get(0) else {
            continue;
        };

        out.push_str(&escape_html(&text[last..whole.start()]));
        if caps.name("day").is_some() {
            write!(
                out,
                r#"<strong class="text-primary heading-day">{}</strong>"#,
                escape_html(whole.as_str())
            )?;
        } else {
            write!(
                out,
                r#"<span class="text-success">{}</span>"#,
                escape_html(whole.as_str())
            )?;
        }

        last = whole.end();
    }

    out.push_str(&escape_html(&text[last..]));
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn plan(text: &str) -> String {
        let mut out = String::new();
        Inline::PLAN.render(text, &mut out).unwrap();
        out
    }

    fn table(text: &str) -> String {
        let mut out = String::new();
        Inline::TABLE.render(text, &mut out).unwrap();
        out
    }

    #[test]
    fn test_plain_text_is_escaped() {
        assert_eq!(plan("a < b & c"), "a &lt; b &amp; c");
    }

    #[test]
    fn test_bold() {
        assert_eq!(plan("çok **güzel** bir gün"), "çok <strong>güzel</strong> bir gün");
    }

    #[test]
    fn test_category_label() {
        assert_eq!(
            plan("**Konaklama:** Lotte Hotel"),
            r#"<strong class="category-heading">Konaklama:</strong> Lotte Hotel"#
        );
    }

    #[test]
    fn test_cost_label_with_amount() {
        assert_eq!(
            plan("**Günlük Maliyet:** $120"),
            r#"<strong class="text-success category-heading">Günlük Maliyet:</strong> <span class="text-success">$120</span>"#
        );
    }

    #[test]
    fn test_day_markers() {
        assert_eq!(
            plan("Gün 3: Jeju"),
            r#"<strong class="text-primary heading-day">Gün 3:</strong> Jeju"#
        );
        assert_eq!(
            plan("**2. Gün:** Busan"),
            r#"<strong><strong class="text-primary heading-day">2. Gün:</strong></strong> Busan"#
        );
    }

    #[test]
    fn test_dollar_amounts_preserved() {
        let out = plan("Toplam $1,200.50 ve $120");
        assert!(out.contains(r#"<span class="text-success">$1,200.50</span>"#));
        assert!(out.contains(r#"<span class="text-success">$120</span>"#));
    }

    #[test]
    fn test_korean_phrase_badge() {
        assert_eq!(
            plan("안녕하세요 - Merhaba"),
            r#"<span class="badge bg-light text-dark me-1 korean-phrase">안녕하세요</span> Merhaba"#
        );
    }

    #[test]
    fn test_korean_phrase_after_latin_text() {
        assert_eq!(
            plan("Teşekkür: 감사합니다 — Teşekkürler"),
            r#"Teşekkür: <span class="badge bg-light text-dark me-1 korean-phrase">감사합니다</span> Teşekkürler"#
        );
    }

    #[test]
    fn test_separator_without_hangul_is_not_a_badge() {
        assert_eq!(plan("Seul - Busan"), "Seul - Busan");
    }

    #[test]
    fn test_table_cells_skip_badges() {
        assert_eq!(table("서울 - Seul"), "서울 - Seul");
        assert_eq!(table("**Otel:** $80"), r#"<strong>Otel:</strong> <span class="text-success">$80</span>"#);
    }
}
