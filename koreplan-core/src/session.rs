//! View state of a planning session
//!
//! Holds what the page shows: the selected plan variant and the rendered
//! content received for each variant.

use tracing::{debug, info};

use crate::pdf;
use crate::render::{PlanRenderer, INVALID_PLAN_HTML};
use crate::response::{PlanKind, PlanResponse};
use crate::summary::PlanSummary;
use crate::{Error, Result};

/// Message used when the backend fails without saying why
const UNKNOWN_FAILURE: &str = "Beklenmeyen bir hata oluştu.";

/// A plan rendered for display
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RenderedPlan {
    pub kind: PlanKind,
    pub html: String,
    pub date: Option<String>,
    pub summary: Option<PlanSummary>,
}

/// Source document for a PDF export
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PdfExport {
    pub file_name: &'static str,
    pub html: String,
}

/// Session state for one visitor
#[derive(Debug)]
pub struct PlanSession {
    renderer: PlanRenderer,
    selected: PlanKind,
    regular: Option<RenderedPlan>,
    korean: Option<RenderedPlan>,
}

impl PlanSession {
    pub fn new(renderer: PlanRenderer) -> Self {
        Self {
            renderer,
            selected: PlanKind::Regular,
            regular: None,
            korean: None,
        }
    }

    /// Handle a backend response for `kind`.
    ///
    /// A successful response is rendered, cached and selected; a failed one
    /// leaves the session untouched and returns the backend's message.
    pub fn receive(&mut self, kind: PlanKind, response: &PlanResponse) -> Result<&RenderedPlan> {
        if !response.success {
            let message = response.error.as_deref().unwrap_or(UNKNOWN_FAILURE);
            return Err(Error::Plan(message.to_string()));
        }

        let html = match response.plan.as_deref() {
            Some(plan) => self.renderer.render_kind(plan, kind),
            None => INVALID_PLAN_HTML.to_string(),
        };
        info!(kind = %kind, bytes = html.len(), "Plan received");

        let rendered = RenderedPlan {
            kind,
            html,
            date: response.date.clone(),
            summary: response.summary.clone(),
        };

        self.selected = kind;
        Ok(self.slot(kind).insert(rendered))
    }

    /// Switch the visible plan variant
    pub fn select(&mut self, kind: PlanKind) {
        debug!(kind = %kind, "Plan variant selected");
        self.selected = kind;
    }

    pub fn selected(&self) -> PlanKind {
        self.selected
    }

    /// Rendered plan of the selected variant, if one was received
    pub fn current(&self) -> Option<&RenderedPlan> {
        self.get(self.selected)
    }

    pub fn get(&self, kind: PlanKind) -> Option<&RenderedPlan> {
        match kind {
            PlanKind::Regular => self.regular.as_ref(),
            PlanKind::Korean => self.korean.as_ref(),
        }
    }

    /// PDF source document for the selected variant
    pub fn pdf_document(&self) -> Result<PdfExport> {
        let plan = self.current().ok_or_else(|| {
            Error::Plan(format!("No {} plan content for PDF generation", self.selected))
        })?;

        let html = pdf::document_html(&plan.html, plan.summary.as_ref(), plan.date.as_deref())?;
        Ok(PdfExport {
            file_name: pdf::file_name(plan.kind),
            html,
        })
    }

    /// Forget all received plans and go back to the regular variant
    pub fn reset(&mut self) {
        self.selected = PlanKind::Regular;
        self.regular = None;
        self.korean = None;
    }

    fn slot(&mut self, kind: PlanKind) -> &mut Option<RenderedPlan> {
        match kind {
            PlanKind::Regular => &mut self.regular,
            PlanKind::Korean => &mut self.korean,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::render::RenderOptions;

    fn session() -> PlanSession {
        let renderer = PlanRenderer::new(RenderOptions {
            stale_year: 2023,
            current_year: 2025,
            max_input_bytes: 1024,
        })
        .unwrap();
        PlanSession::new(renderer)
    }

    fn summary() -> PlanSummary {
        PlanSummary {
            budget: "1500".to_string(),
            duration: "5".to_string(),
            style: "Budget".to_string(),
            season: "Summer".to_string(),
        }
    }

    #[test]
    fn test_receive_renders_and_selects() {
        let mut session = session();
        let response = PlanResponse::success("### Gün 1", "19.10.2026", summary());

        let plan = session.receive(PlanKind::Korean, &response).unwrap();
        assert_eq!(plan.kind, PlanKind::Korean);
        assert!(plan.html.contains("travel-day-heading"));

        assert_eq!(session.selected(), PlanKind::Korean);
        assert!(session.get(PlanKind::Regular).is_none());
        assert_eq!(session.current().unwrap().date.as_deref(), Some("19.10.2026"));
    }

    #[test]
    fn test_failed_response_keeps_state() {
        let mut session = session();
        session
            .receive(PlanKind::Regular, &PlanResponse::success("Seul", "01.01.2026", summary()))
            .unwrap();

        let err = session
            .receive(PlanKind::Korean, &PlanResponse::failure("Rate limit exceeded"))
            .unwrap_err();
        assert!(err.to_string().contains("Rate limit exceeded"));
        assert_eq!(session.selected(), PlanKind::Regular);
        assert!(session.get(PlanKind::Korean).is_none());
    }

    #[test]
    fn test_failure_without_message() {
        let mut session = session();
        let response = PlanResponse {
            success: false,
            ..PlanResponse::default()
        };
        let err = session.receive(PlanKind::Regular, &response).unwrap_err();
        assert!(err.to_string().contains(UNKNOWN_FAILURE));
    }

    #[test]
    fn test_missing_plan_text_shows_error_fragment() {
        let mut session = session();
        let response = PlanResponse {
            success: true,
            ..PlanResponse::default()
        };
        let plan = session.receive(PlanKind::Regular, &response).unwrap();
        assert_eq!(plan.html, INVALID_PLAN_HTML);
    }

    #[test]
    fn test_pdf_document_for_selected_plan() {
        let mut session = session();
        assert!(session.pdf_document().is_err());

        session
            .receive(PlanKind::Regular, &PlanResponse::success("Seul", "01.01.2026", summary()))
            .unwrap();
        let export = session.pdf_document().unwrap();
        assert_eq!(export.file_name, "kore-seyahat-plani.pdf");
        assert!(export.html.contains("Ekonomik"));
        assert!(export.html.contains(r#"<p class="mb-3">Seul</p>"#));

        session.select(PlanKind::Korean);
        assert!(session.pdf_document().is_err());
    }

    #[test]
    fn test_reset() {
        let mut session = session();
        session
            .receive(PlanKind::Korean, &PlanResponse::success("Seul", "01.01.2026", summary()))
            .unwrap();
        session.reset();
        assert_eq!(session.selected(), PlanKind::Regular);
        assert!(session.get(PlanKind::Korean).is_none());
    }
}
