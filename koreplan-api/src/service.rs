//! Plan generation service
//!
//! Ties the pieces together for one request: rate limit, response cache,
//! prompt rendering, and the retried backend call.

use std::collections::HashMap;
use std::sync::{Mutex, PoisonError};

use chrono::Local;
use koreplan_core::{Config, PlanKind, PlanResponse};
use tracing::{debug, info, warn};

use crate::client::{ChatBackend, ChatMessage};
use crate::limiter::RateLimiter;
use crate::preferences::TripPreferences;
use crate::prompts;
use crate::retry::RetryPolicy;
use crate::{Error, Result};

/// Date format of [`PlanResponse::date`]
const DATE_FORMAT: &str = "%d.%m.%Y";

/// Generates travel plans through a chat backend
pub struct PlanService<B> {
    backend: B,
    retry: RetryPolicy,
    limiter: RateLimiter,
    cache: Mutex<HashMap<String, PlanResponse>>,
}

impl<B: ChatBackend> PlanService<B> {
    pub fn new(backend: B, retry: RetryPolicy, limiter: RateLimiter) -> Self {
        Self {
            backend,
            retry,
            limiter,
            cache: Mutex::new(HashMap::new()),
        }
    }

    /// Service with retry and rate limits taken from `config`
    pub fn from_config(backend: B, config: &Config) -> Self {
        Self::new(
            backend,
            RetryPolicy::from(&config.retry),
            RateLimiter::new(config.limits.requests_per_minute),
        )
    }

    pub fn backend(&self) -> &B {
        &self.backend
    }

    /// Generate (or fetch from cache) the plan for `prefs`
    pub async fn generate(&self, kind: PlanKind, prefs: &TripPreferences) -> Result<PlanResponse> {
        if !self.limiter.try_acquire() {
            warn!(kind = %kind, "Plan request rate limited");
            return Err(Error::RateLimited);
        }

        let key = prefs.cache_key(kind);
        if let Some(cached) = self.cached(&key) {
            debug!(key = %key, "Returning cached plan");
            return Ok(cached);
        }

        let messages = [
            ChatMessage::system(prompts::system_prompt(kind)),
            ChatMessage::user(prompts::plan_prompt(kind, prefs)),
        ];

        info!(kind = %kind, backend = self.backend.name(), "Requesting plan");
        let backend = &self.backend;
        let messages = &messages[..];
        let plan = self.retry.run(move || backend.complete(messages)).await?;
        info!(kind = %kind, chars = plan.chars().count(), "Plan generated");

        let date = Local::now().format(DATE_FORMAT).to_string();
        let response = PlanResponse::success(plan, date, prefs.summary(kind));

        self.cache
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .insert(key, response.clone());

        Ok(response)
    }

    /// Like [`generate`](Self::generate), with errors reported in the
    /// response body instead
    pub async fn generate_response(&self, kind: PlanKind, prefs: &TripPreferences) -> PlanResponse {
        match self.generate(kind, prefs).await {
            Ok(response) => response,
            Err(e) => {
                warn!(kind = %kind, error = %e, "Plan generation failed");
                PlanResponse::failure(e.to_string())
            }
        }
    }

    /// Number of cached plans
    pub fn cached_plans(&self) -> usize {
        self.cache
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .len()
    }

    pub fn clear_cache(&self) {
        self.cache
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clear();
    }

    fn cached(&self, key: &str) -> Option<PlanResponse> {
        self.cache
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .get(key)
            .cloned()
    }
}
