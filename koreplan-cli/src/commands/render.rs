//! Render command - turn plan text into HTML

use std::path::PathBuf;

use clap::Args;
use koreplan_core::{pdf, Config, PlanRenderer, PlanResponse, PlanSession, RenderOptions};

use super::{plan_kind, read_input, write_output};

/// Arguments for the render command
#[derive(Args, Debug)]
pub struct RenderArgs {
    /// Plan text file (`-` for standard input)
    #[arg(default_value = "-")]
    pub input: PathBuf,

    /// Render as the bilingual immigration plan
    #[arg(long)]
    pub korean: bool,

    /// Input is a plan response JSON document instead of plan text
    #[arg(long)]
    pub json: bool,

    /// Emit the PDF source document (header plus plan)
    #[arg(long)]
    pub pdf: bool,

    /// Output file (defaults to standard output)
    #[arg(short, long)]
    pub output: Option<PathBuf>,
}

impl RenderArgs {
    /// Execute the render command
    pub fn execute(&self, verbose: bool, config: &Config) -> anyhow::Result<()> {
        let text = read_input(&self.input)?;
        let kind = plan_kind(self.korean);
        let renderer = PlanRenderer::new(RenderOptions::from_config(&config.render))?;

        if verbose {
            tracing::info!(
                input = %self.input.display(),
                kind = %kind,
                json = self.json,
                bytes = text.len(),
                "Rendering plan"
            );
        }

        let html = if self.json {
            let response = PlanResponse::from_json(&text)?;
            let mut session = PlanSession::new(renderer);
            session.receive(kind, &response)?;

            if self.pdf {
                let export = session.pdf_document()?;
                tracing::info!(file_name = export.file_name, "PDF source document ready");
                export.html
            } else {
                session
                    .current()
                    .map(|plan| plan.html.clone())
                    .unwrap_or_default()
            }
        } else {
            let html = renderer.render_kind(&text, kind);
            if self.pdf {
                pdf::document_html(&html, None, None)?
            } else {
                html
            }
        };

        write_output(self.output.as_ref(), &html)
    }
}
