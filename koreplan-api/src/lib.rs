//! koreplan API - travel plan generation for the Korea travel planner
//!
//! This crate turns trip preferences into a prompt, asks an
//! OpenAI-compatible chat backend for the plan, and wraps the answer in a
//! [`koreplan_core::PlanResponse`]. Retries, rate limiting and a response
//! cache live here too.

pub mod client;
mod error;
pub mod limiter;
pub mod preferences;
pub mod prompts;
pub mod retry;
pub mod service;

pub use client::{ChatBackend, ChatClient, ChatMessage, Role};
pub use error::{Error, Result};
pub use limiter::RateLimiter;
pub use preferences::TripPreferences;
pub use retry::RetryPolicy;
pub use service::PlanService;
