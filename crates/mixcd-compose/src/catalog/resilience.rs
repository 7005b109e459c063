//! Client-side request pacing.

use std::sync::Arc;

use tokio::sync::Mutex;
use tokio::time::{sleep_until, Duration, Instant};

/// Spaces outbound catalog requests evenly in time.
///
/// Each caller books the next free slot and sleeps until it arrives, so
/// the first request goes out at once and callers are served in booking
/// order. Clones share one schedule.
#[derive(Debug, Clone)]
pub struct RateLimiter {
    next_slot: Arc<Mutex<Instant>>,
    spacing: Duration,
}

impl RateLimiter {
    /// At most `requests_per_second` requests per second; 0 counts as 1.
    pub fn new(requests_per_second: u32) -> Self {
        let per_second = u64::from(requests_per_second.max(1));
        Self {
            next_slot: Arc::new(Mutex::new(Instant::now())),
            spacing: Duration::from_millis(1000 / per_second),
        }
    }

    /// Gap between consecutive slots.
    pub fn spacing(&self) -> Duration {
        self.spacing
    }

    /// Book a slot and wait for it.
    pub async fn acquire(&self) {
        let slot = {
            let mut next = self.next_slot.lock().await;
            let slot = (*next).max(Instant::now());
            *next = slot + self.spacing;
            slot
        };
        sleep_until(slot).await;
    }
}
