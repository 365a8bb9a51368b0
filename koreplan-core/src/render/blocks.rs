//! Line classification and block grouping for plan text

use super::labels::{self, LabelKind};

/// Heading flavours, from the bold plan title down to `###` day headings
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HeadingKind {
    /// A line that is entirely `**bold**`
    PlanTitle,
    /// `# text`
    Section,
    /// `## text`
    Subsection,
    /// `### text` or `### **text**`
    Day,
}

impl HeadingKind {
    pub fn tag(self) -> &'static str {
        match self {
            HeadingKind::PlanTitle | HeadingKind::Section => "h2",
            HeadingKind::Subsection => "h3",
            HeadingKind::Day => "h4",
        }
    }

    pub fn css_class(self) -> &'static str {
        match self {
            HeadingKind::PlanTitle => "plan-title mt-4 mb-3",
            HeadingKind::Section => "mt-4 mb-3",
            HeadingKind::Subsection => "mt-4 mb-2",
            HeadingKind::Day => "mt-4 mb-2 travel-day-heading",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ListKind {
    Unordered,
    Ordered,
}

impl ListKind {
    pub fn tag(self) -> &'static str {
        match self {
            ListKind::Unordered => "ul",
            ListKind::Ordered => "ol",
        }
    }
}

/// A classified source line
#[derive(Debug, Clone, PartialEq, Eq)]
enum Line<'a> {
    Blank,
    Rule,
    Heading(HeadingKind, &'a str),
    Item(ListKind, &'a str),
    Tip { label: &'a str, body: &'a str },
    Text(&'a str),
}

/// A block of rendered output
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Block<'a> {
    Rule,
    Heading(HeadingKind, &'a str),
    List(ListKind, Vec<&'a str>),
    Tip { label: &'a str, body: &'a str },
    Paragraph(Vec<&'a str>),
}

/// Group plan text into blocks.
///
/// Items of the same list kind stay in one list across blank lines; any
/// other non-blank line closes the list. Paragraphs end at blank lines and
/// at every block-level line.
pub fn parse_blocks(text: &str) -> Vec<Block<'_>> {
    let mut blocks = Vec::new();
    let mut paragraph: Vec<&str> = Vec::new();
    let mut list: Option<(ListKind, Vec<&str>)> = None;

    for raw in text.lines() {
        match classify_line(raw) {
            Line::Blank => flush_paragraph(&mut paragraph, &mut blocks),
            Line::Item(kind, item) => {
                flush_paragraph(&mut paragraph, &mut blocks);
                match list.as_mut() {
                    Some((open, items)) if *open == kind => items.push(item),
                    _ => {
                        flush_list(&mut list, &mut blocks);
                        list = Some((kind, vec![item]));
                    }
                }
            }
            Line::Text(text) => {
                flush_list(&mut list, &mut blocks);
                paragraph.push(text);
            }
            Line::Rule => {
                flush_all(&mut paragraph, &mut list, &mut blocks);
                blocks.push(Block::Rule);
            }
            Line::Heading(kind, text) => {
                flush_all(&mut paragraph, &mut list, &mut blocks);
                blocks.push(Block::Heading(kind, text));
            }
            Line::Tip { label, body } => {
                flush_all(&mut paragraph, &mut list, &mut blocks);
                blocks.push(Block::Tip { label, body });
            }
        }
    }

    flush_all(&mut paragraph, &mut list, &mut blocks);
    blocks
}

fn flush_paragraph<'a>(paragraph: &mut Vec<&'a str>, blocks: &mut Vec<Block<'a>>) {
    if !paragraph.is_empty() {
        blocks.push(Block::Paragraph(std::mem::take(paragraph)));
    }
}

fn flush_list<'a>(list: &mut Option<(ListKind, Vec<&'a str>)>, blocks: &mut Vec<Block<'a>>) {
    if let Some((kind, items)) = list.take() {
        blocks.push(Block::List(kind, items));
    }
}

fn flush_all<'a>(
    paragraph: &mut Vec<&'a str>,
    list: &mut Option<(ListKind, Vec<&'a str>)>,
    blocks: &mut Vec<Block<'a>>,
) {
    flush_paragraph(paragraph, blocks);
    flush_list(list, blocks);
}

fn classify_line(raw: &str) -> Line<'_> {
    let line = raw.trim();

    if line.is_empty() {
        return Line::Blank;
    }

    if line == "---" {
        return Line::Rule;
    }

    // Longest prefix first so `###` is never read as `#`
    if let Some(rest) = non_empty(line.strip_prefix("### ")) {
        let text = bold_only(rest).unwrap_or(rest);
        return Line::Heading(HeadingKind::Day, text);
    }
    if let Some(rest) = non_empty(line.strip_prefix("## ")) {
        return Line::Heading(HeadingKind::Subsection, rest);
    }
    if let Some(rest) = non_empty(line.strip_prefix("# ")) {
        return Line::Heading(HeadingKind::Section, rest);
    }

    if let Some(tip) = tip_line(line) {
        return tip;
    }

    // A bold-only label line (`**Sabah:**`) stays a label, not a title
    if let Some(title) = bold_only(line) {
        if labels::classify(title).is_none() {
            return Line::Heading(HeadingKind::PlanTitle, title);
        }
    }

    if let Some(item) = non_empty(line.strip_prefix("- ").or_else(|| line.strip_prefix("* "))) {
        return Line::Item(ListKind::Unordered, item);
    }

    if let Some(item) = numbered_item(line) {
        return Line::Item(ListKind::Ordered, item);
    }

    Line::Text(line)
}

fn non_empty(s: Option<&str>) -> Option<&str> {
    s.map(str::trim).filter(|s| !s.is_empty())
}

/// Inner text of a line that is exactly `**text**` with no other asterisks
fn bold_only(line: &str) -> Option<&str> {
    let inner = line.strip_prefix("**")?.strip_suffix("**")?;
    if inner.is_empty() || inner.contains('*') {
        None
    } else {
        Some(inner)
    }
}

/// A line opening with a bold tip label: `**İpucu:** metro kartı alın`
fn tip_line(line: &str) -> Option<Line<'_>> {
    let rest = line.strip_prefix("**")?;
    let end = rest.find("**")?;
    let label = &rest[..end];

    if labels::classify(label) != Some(LabelKind::Tip) {
        return None;
    }

    Some(Line::Tip {
        label: label.trim(),
        body: rest[end + 2..].trim(),
    })
}

/// `12. text` -> `text`
fn numbered_item(line: &str) -> Option<&str> {
    let digits = line.len() - line.trim_start_matches(|c: char| c.is_ascii_digit()).len();
    if digits == 0 {
        return None;
    }
    non_empty(line[digits..].strip_prefix(". "))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_headings_by_prefix() {
        let blocks = parse_blocks("# Kore\n## Seul\n### Gün 1\n### **Gün 2**");
        assert_eq!(
            blocks,
            vec![
                Block::Heading(HeadingKind::Section, "Kore"),
                Block::Heading(HeadingKind::Subsection, "Seul"),
                Block::Heading(HeadingKind::Day, "Gün 1"),
                Block::Heading(HeadingKind::Day, "Gün 2"),
            ]
        );
    }

    #[test]
    fn test_bold_title_line() {
        let blocks = parse_blocks("**Kore Seyahat Planı**");
        assert_eq!(
            blocks,
            vec![Block::Heading(HeadingKind::PlanTitle, "Kore Seyahat Planı")]
        );
    }

    #[test]
    fn test_bold_label_line_is_not_a_title() {
        let blocks = parse_blocks("**Sabah:**");
        assert_eq!(blocks, vec![Block::Paragraph(vec!["**Sabah:**"])]);
    }

    #[test]
    fn test_bullets_group_into_one_list() {
        let blocks = parse_blocks("- a\n- b\n\n- c");
        assert_eq!(
            blocks,
            vec![Block::List(ListKind::Unordered, vec!["a", "b", "c"])]
        );
    }

    #[test]
    fn test_bullets_then_numbers_are_separate_lists() {
        let blocks = parse_blocks("- a\n- b\n1. c\n2. d");
        assert_eq!(
            blocks,
            vec![
                Block::List(ListKind::Unordered, vec!["a", "b"]),
                Block::List(ListKind::Ordered, vec!["c", "d"]),
            ]
        );
    }

    #[test]
    fn test_text_closes_list() {
        let blocks = parse_blocks("- a\nSonra\n- b");
        assert_eq!(
            blocks,
            vec![
                Block::List(ListKind::Unordered, vec!["a"]),
                Block::Paragraph(vec!["Sonra"]),
                Block::List(ListKind::Unordered, vec!["b"]),
            ]
        );
    }

    #[test]
    fn test_paragraphs_split_on_blank_lines() {
        let blocks = parse_blocks("bir\niki\n\n  \nüç");
        assert_eq!(
            blocks,
            vec![
                Block::Paragraph(vec!["bir", "iki"]),
                Block::Paragraph(vec!["üç"]),
            ]
        );
    }

    #[test]
    fn test_heading_ends_paragraph() {
        let blocks = parse_blocks("giriş\n### Gün 1\ndevam");
        assert_eq!(
            blocks,
            vec![
                Block::Paragraph(vec!["giriş"]),
                Block::Heading(HeadingKind::Day, "Gün 1"),
                Block::Paragraph(vec!["devam"]),
            ]
        );
    }

    #[test]
    fn test_rule_and_tip() {
        let blocks = parse_blocks("---\n**İpucu:** T-money kartı alın");
        assert_eq!(
            blocks,
            vec![
                Block::Rule,
                Block::Tip {
                    label: "İpucu:",
                    body: "T-money kartı alın"
                },
            ]
        );
    }

    #[test]
    fn test_numbered_requires_dot_space() {
        assert_eq!(
            parse_blocks("2025 yılı"),
            vec![Block::Paragraph(vec!["2025 yılı"])]
        );
        assert_eq!(
            parse_blocks("10. Namsan"),
            vec![Block::List(ListKind::Ordered, vec!["Namsan"])]
        );
    }

    #[test]
    fn test_crlf_lines() {
        let blocks = parse_blocks("- a\r\n- b\r\n");
        assert_eq!(blocks, vec![Block::List(ListKind::Unordered, vec!["a", "b"])]);
    }
}
