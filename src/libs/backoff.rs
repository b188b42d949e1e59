//! Injectable sleep strategy for rate-limit pacing.
//!
//! The submission and export paths deliberately serialize their API calls
//! with multi-second waits to stay under the provider's shared rate
//! limiter. Routing every wait through [`Sleeper`] keeps those delays out
//! of the test suite: production uses [`TokioSleeper`], tests use
//! [`RecordingSleeper`] which captures the requested durations and returns
//! immediately.

use std::sync::{Arc, Mutex};
use std::time::Duration;

/// Fixed delay between successive per-entry creation calls.
pub const INTER_CALL_DELAY_SECS: u64 = 2;

/// Fixed delay between successive task-name lookups during export.
pub const TASK_FETCH_DELAY_SECS: u64 = 2;

/// Wait before the single task-lookup retry after a 429 during export.
pub const TASK_FETCH_RETRY_SECS: u64 = 6;

#[allow(async_fn_in_trait)]
pub trait Sleeper {
    async fn sleep(&self, duration: Duration);

    async fn sleep_secs(&self, secs: u64) {
        self.sleep(Duration::from_secs(secs)).await;
    }
}

/// Production sleeper backed by the tokio timer.
pub struct TokioSleeper;

impl Sleeper for TokioSleeper {
    async fn sleep(&self, duration: Duration) {
        tokio::time::sleep(duration).await;
    }
}

/// Test sleeper that records every requested wait without sleeping.
#[derive(Default, Clone)]
pub struct RecordingSleeper {
    slept: Arc<Mutex<Vec<Duration>>>,
}

impl RecordingSleeper {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn recorded(&self) -> Vec<Duration> {
        self.slept.lock().unwrap().clone()
    }
}

impl Sleeper for RecordingSleeper {
    async fn sleep(&self, duration: Duration) {
        self.slept.lock().unwrap().push(duration);
    }
}
