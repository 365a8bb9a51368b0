//! koreplan Core - plan rendering and shared models for the Korea travel planner
//!
//! This crate turns the markdown-ish travel plans produced by the backend
//! into HTML for display and PDF export, and holds the configuration and
//! data types shared by the API client and the CLI.

pub mod config;
pub mod error;
pub mod pdf;
pub mod render;
pub mod response;
pub mod secrets;
pub mod session;
pub mod summary;

pub use config::Config;
pub use error::{Error, Result};
pub use render::{
    format_korean_plan, format_plan_value, format_travel_plan, PlanRenderer, RenderOptions,
};
pub use response::{PlanKind, PlanResponse};
pub use secrets::Secrets;
pub use session::{PdfExport, PlanSession, RenderedPlan};
pub use summary::PlanSummary;
