//! Markdown table rendering for the bilingual (Turkish/Korean) plan
//!
//! The immigration-office variant of a plan is usually a pipe table with a
//! Turkish and a Korean column, surrounded by a few lines of free text.

use std::fmt::{self, Write};

use super::inline::Inline;

/// Tokens that mark a row as the table header
const HEADER_TOKENS: &[&str] = &["Türkçe", "Korece", "Turkish", "Korean", "한국어"];

const TABLE_OPEN: &str = r#"<div class="table-responsive"><table class="korean-plan-table">"#;
const TABLE_CLOSE: &str = "</table></div>";

/// Opening of the closing statement every immigration plan ends with
const DISCLAIMER_START: &str = "Bu seyahat planı turistik amaçlıdır";

/// Whether the text uses pipe-table syntax at all
pub(crate) fn has_table_syntax(text: &str) -> bool {
    text.contains('|')
}

/// Render a plan that contains pipe tables.
///
/// Table rows become `<tr>`s; other non-empty lines become paragraphs. The
/// closing statement is moved into an alert at the end of the document.
pub(crate) fn render_table_plan(text: &str) -> Result<String, fmt::Error> {
    let mut out = String::from(r#"<div class="immigration-document">"#);
    let mut in_table = false;
    let disclaimer = find_disclaimer(text);

    for row in text.lines().map(str::trim).filter(|row| !row.is_empty()) {
        if row.contains('|') {
            if is_separator_row(row) {
                continue;
            }

            let cells = split_cells(row);
            if cells.iter().all(|cell| cell.is_empty()) {
                continue;
            }

            if !in_table {
                out.push_str(TABLE_OPEN);
                in_table = true;
            }

            let cell_tag = if is_header_row(row) { "th" } else { "td" };
            out.push_str("<tr>");
            for cell in cells {
                write!(out, "<{}>", cell_tag)?;
                Inline::TABLE.render(cell, &mut out)?;
                write!(out, "</{}>", cell_tag)?;
            }
            out.push_str("</tr>");
        } else {
            if in_table {
                out.push_str(TABLE_CLOSE);
                in_table = false;
            }

            // Text ahead of the statement stays a paragraph
            let row = match row.find(DISCLAIMER_START) {
                Some(start) => row[..start].trim_end(),
                None => row,
            };
            if row.is_empty() {
                continue;
            }

            out.push_str(r#"<p class="mb-3">"#);
            Inline::TABLE.render(row, &mut out)?;
            out.push_str("</p>");
        }
    }

    if in_table {
        out.push_str(TABLE_CLOSE);
    }

    if let Some(disclaimer) = disclaimer {
        out.push_str(r#"<div class="alert alert-secondary mt-4">"#);
        Inline::TABLE.render(disclaimer, &mut out)?;
        out.push_str("</div>");
    }

    out.push_str("</div>");
    Ok(out)
}

/// Closing statement up to the end of its line
fn find_disclaimer(text: &str) -> Option<&str> {
    let start = text.find(DISCLAIMER_START)?;
    let rest = &text[start..];
    let end = rest.find(['\r', '\n']).unwrap_or(rest.len());
    Some(rest[..end].trim_end())
}

/// `|---|:---:|` style rows
fn is_separator_row(row: &str) -> bool {
    row.contains('-') && row.chars().all(|c| matches!(c, '|' | '-' | ':' | ' ' | '\t'))
}

fn is_header_row(row: &str) -> bool {
    HEADER_TOKENS.iter().any(|token| row.contains(token))
}

/// Cells between the pipes; an empty cell in the middle keeps its column
fn split_cells(row: &str) -> Vec<&str> {
    let row = row.strip_prefix('|').unwrap_or(row);
    let row = row.strip_suffix('|').unwrap_or(row);
    row.split('|').map(str::trim).collect()
}
