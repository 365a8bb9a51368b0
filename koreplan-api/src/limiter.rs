//! Sliding-window request limiter

use std::collections::VecDeque;
use std::sync::{Mutex, PoisonError};
use std::time::{Duration, Instant};

use tracing::debug;

const WINDOW: Duration = Duration::from_secs(60);

/// Admits at most `per_minute` requests in any 60 second window
#[derive(Debug)]
pub struct RateLimiter {
    per_minute: usize,
    admitted: Mutex<VecDeque<Instant>>,
}

impl RateLimiter {
    pub fn new(per_minute: usize) -> Self {
        Self {
            per_minute,
            admitted: Mutex::new(VecDeque::with_capacity(per_minute)),
        }
    }

    pub fn per_minute(&self) -> usize {
        self.per_minute
    }

    /// Record a request now if the window has room
    pub fn try_acquire(&self) -> bool {
        self.check_at(Instant::now())
    }

    /// Record a request at `now` if the window has room
    pub fn check_at(&self, now: Instant) -> bool {
        let mut admitted = self
            .admitted
            .lock()
            .unwrap_or_else(PoisonError::into_inner);

        while let Some(&oldest) = admitted.front() {
            if now.saturating_duration_since(oldest) >= WINDOW {
                admitted.pop_front();
            } else {
                break;
            }
        }

        if admitted.len() >= self.per_minute {
            debug!(in_window = admitted.len(), limit = self.per_minute, "Request rejected");
            return false;
        }

        admitted.push_back(now);
        true
    }
}
