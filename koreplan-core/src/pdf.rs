//! PDF source document
//!
//! The rendered plan is handed to an HTML-to-PDF exporter together with a
//! header carrying the trip summary. This module only builds that HTML.

use std::fmt::Write;

use crate::render::escape_html;
use crate::response::PlanKind;
use crate::summary::{creation_date_label, PlanSummary};
use crate::Result;

/// Title printed at the top of every exported plan
const PDF_TITLE: &str = "Kore Seyahat Planı";

const CELL_STYLE: &str =
    "flex: 1; min-width: 120px; background: #f8f9fa; padding: 8px; border-radius: 5px;";

/// File name offered for the exported PDF
pub fn file_name(kind: PlanKind) -> &'static str {
    match kind {
        PlanKind::Regular => "kore-seyahat-plani.pdf",
        PlanKind::Korean => "kore-gocmenlik-plani.pdf",
    }
}

/// HTML of the PDF header: title, creation date and summary cells
pub fn header_html(summary: Option<&PlanSummary>, date: Option<&str>) -> Result<String> {
    let mut out = String::from(
        r#"<div class="pdf-header" style="margin-bottom: 20px; border-bottom: 1px solid #dee2e6; padding-bottom: 15px;">"#,
    );
    write!(
        out,
        r#"<h1 style="font-size: 24px; margin-bottom: 10px; color: #5f27cd;">{}</h1>"#,
        PDF_TITLE
    )?;

    if let Some(date) = date {
        write!(
            out,
            r#"<p style="margin-bottom: 5px; font-size: 12px;">{}</p>"#,
            escape_html(&creation_date_label(date))
        )?;
    }

    if let Some(summary) = summary {
        out.push_str(
            r#"<div style="display: flex; flex-wrap: wrap; gap: 10px; margin-top: 15px;">"#,
        );
        let cells = [
            ("Bütçe", summary.budget_label()),
            ("Süre", summary.duration_label()),
            ("Tarz", summary.style_label().to_string()),
            ("Mevsim", summary.season_label().to_string()),
        ];
        for (caption, value) in cells {
            write!(
                out,
                r#"<div style="{}"><div style="font-weight: bold; font-size: 12px;">{}</div><div style="font-size: 14px;">{}</div></div>"#,
                CELL_STYLE,
                caption,
                escape_html(&value)
            )?;
        }
        out.push_str("</div>");
    }

    out.push_str("</div>");
    Ok(out)
}

/// Complete PDF source: header followed by the rendered plan
pub fn document_html(
    plan_html: &str,
    summary: Option<&PlanSummary>,
    date: Option<&str>,
) -> Result<String> {
    let header = header_html(summary, date)?;
    Ok(format!(
        r#"<div class="pdf-content">{}{}</div>"#,
        header, plan_html
    ))
}
