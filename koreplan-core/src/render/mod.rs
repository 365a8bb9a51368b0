//! Plan text renderer
//!
//! Turns the markdown-ish plan text returned by the backend into HTML
//! fragments for display and PDF export. Rendering never fails: invalid
//! input yields an inline error fragment and any internal failure yields an
//! escaped, preformatted copy of the input.
//!
//! The text is first classified line by line into blocks (see
//! [`blocks`]) and then rendered in a single pass, with inline markup
//! (bold spans, labels, day markers, Korean phrases, amounts) handled per
//! line.

mod blocks;
mod html;
mod inline;
pub mod labels;
mod table;

use std::fmt::Write;
use std::panic::{self, AssertUnwindSafe};

use chrono::Datelike;
use regex::{NoExpand, Regex};
use tracing::{debug, warn};

use crate::config::RenderConfig;
use crate::response::PlanKind;
use crate::{Error, Result};

pub use blocks::{parse_blocks, Block, HeadingKind, ListKind};
pub use html::escape_html;
use inline::Inline;

/// Fragment shown when there is no plan text to render
pub const INVALID_PLAN_HTML: &str =
    r#"<div class="alert alert-danger">Geçersiz plan verisi alındı. Lütfen tekrar deneyin.</div>"#;

/// Renderer settings
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RenderOptions {
    /// Year token to rewrite
    pub stale_year: i32,
    /// Replacement year
    pub current_year: i32,
    /// Larger inputs are shown preformatted
    pub max_input_bytes: usize,
}

impl Default for RenderOptions {
    fn default() -> Self {
        Self::from_config(&RenderConfig::default())
    }
}

impl RenderOptions {
    /// Build options from the `[render]` config section
    pub fn from_config(config: &RenderConfig) -> Self {
        Self {
            stale_year: config.stale_year,
            current_year: config
                .current_year
                .unwrap_or_else(|| chrono::Local::now().year()),
            max_input_bytes: config.max_input_bytes,
        }
    }
}

/// Renders plan text into HTML fragments
#[derive(Debug, Clone)]
pub struct PlanRenderer {
    options: RenderOptions,
    stale_year: Regex,
}

impl PlanRenderer {
    /// Create a renderer with the given options
    pub fn new(options: RenderOptions) -> Result<Self> {
        // ASCII boundaries: `2023년` must still match
        let stale_year = Regex::new(&format!(r"(?-u:\b){}(?-u:\b)", options.stale_year))?;
        Ok(Self {
            options,
            stale_year,
        })
    }

    /// Renderer options
    pub fn options(&self) -> &RenderOptions {
        &self.options
    }

    /// Render a general travel plan
    pub fn render(&self, plan: &str) -> String {
        if plan.trim().is_empty() {
            warn!("Empty plan text received");
            return INVALID_PLAN_HTML.to_string();
        }

        contain(plan, || self.render_travel_plan(plan))
    }

    /// Render the bilingual plan; falls back to [`render`](Self::render)
    /// when the text has no table syntax
    pub fn render_korean(&self, plan: &str) -> String {
        if !table::has_table_syntax(plan) {
            return self.render(plan);
        }

        contain(plan, || {
            self.check_size(plan)?;
            let text = self.normalize_year(plan);
            let html = table::render_table_plan(&text)?;
            debug!(bytes = html.len(), "Rendered table plan");
            Ok(html)
        })
    }

    /// Render with the entry point matching `kind`
    pub fn render_kind(&self, plan: &str, kind: PlanKind) -> String {
        match kind {
            PlanKind::Regular => self.render(plan),
            PlanKind::Korean => self.render_korean(plan),
        }
    }

    fn render_travel_plan(&self, plan: &str) -> Result<String> {
        self.check_size(plan)?;

        let text = self.normalize_year(plan);
        let blocks = parse_blocks(&text);
        debug!(blocks = blocks.len(), "Classified plan text");

        let mut body = String::with_capacity(text.len() * 2);
        for (i, block) in blocks.iter().enumerate() {
            if i > 0 {
                body.push_str("\n\n");
            }
            render_block(block, &mut body)?;
        }

        let body = html::unwrap_blocks_in_paragraphs(&body);
        Ok(format!(r#"<div class="travel-plan">{}</div>"#, body))
    }

    fn check_size(&self, plan: &str) -> Result<()> {
        if plan.len() > self.options.max_input_bytes {
            return Err(Error::Render(format!(
                "plan text is {} bytes, limit is {}",
                plan.len(),
                self.options.max_input_bytes
            )));
        }
        Ok(())
    }

    fn normalize_year(&self, plan: &str) -> String {
        let year = self.options.current_year.to_string();
        self.stale_year
            .replace_all(plan, NoExpand(year.as_str()))
            .into_owned()
    }
}

fn render_block(block: &Block<'_>, out: &mut String) -> Result<()> {
    match block {
        Block::Rule => out.push_str(r#"<hr class="my-4">"#),
        Block::Heading(kind, text) => {
            write!(out, r#"<{} class="{}">"#, kind.tag(), kind.css_class())?;
            Inline::PLAN.render(text, out)?;
            write!(out, "</{}>", kind.tag())?;
        }
        Block::List(kind, items) => {
            write!(out, r#"<{} class="mb-3">"#, kind.tag())?;
            for item in items {
                out.push_str("\n<li>");
                Inline::PLAN.render(item, out)?;
                out.push_str("</li>");
            }
            write!(out, "\n</{}>", kind.tag())?;
        }
        Block::Tip { label, body } => {
            write!(
                out,
                r#"<div class="alert alert-info tip-box"><strong class="tip-heading">{}</strong>"#,
                escape_html(label)
            )?;
            if !body.is_empty() {
                out.push(' ');
                Inline::PLAN.render(body, out)?;
            }
            out.push_str("</div>");
        }
        Block::Paragraph(lines) => {
            out.push_str(r#"<p class="mb-3">"#);
            for (i, line) in lines.iter().enumerate() {
                if i > 0 {
                    out.push('\n');
                }
                Inline::PLAN.render(line, out)?;
            }
            out.push_str("</p>");
        }
    }
    Ok(())
}

/// Run a render step, turning errors and panics into the preformatted fallback
fn contain<F>(plan: &str, render: F) -> String
where
    F: FnOnce() -> Result<String>,
{
    let outcome = panic::catch_unwind(AssertUnwindSafe(render))
        .unwrap_or_else(|_| Err(Error::Render("renderer panicked".to_string())));

    match outcome {
        Ok(html) => html,
        Err(e) => {
            warn!(error = %e, "Plan formatting failed, showing raw text");
            fallback_html(plan)
        }
    }
}

/// Escaped, preformatted rendering of the raw plan text
pub fn fallback_html(plan: &str) -> String {
    format!(
        r#"<div class="travel-plan"><pre class="p-3 bg-light">{}</pre></div>"#,
        escape_html(plan)
    )
}

/// Render with default options, or fall back if the renderer cannot be built
fn with_default_renderer(plan: &str, render: impl FnOnce(&PlanRenderer) -> String) -> String {
    match PlanRenderer::new(RenderOptions::default()) {
        Ok(renderer) => render(&renderer),
        Err(e) => {
            warn!(error = %e, "Could not build plan renderer");
            fallback_html(plan)
        }
    }
}

/// Format a general travel plan with default options
pub fn format_travel_plan(plan: &str) -> String {
    with_default_renderer(plan, |r| r.render(plan))
}

/// Format the bilingual plan with default options
pub fn format_korean_plan(plan: &str) -> String {
    with_default_renderer(plan, |r| r.render_korean(plan))
}

/// Format the `plan` field of a backend response, which may not be a string
pub fn format_plan_value(value: &serde_json::Value, kind: PlanKind) -> String {
    match value.as_str() {
        Some(plan) => with_default_renderer(plan, |r| r.render_kind(plan, kind)),
        None => {
            warn!(value = %value, "Plan value is not a string");
            INVALID_PLAN_HTML.to_string()
        }
    }
}
