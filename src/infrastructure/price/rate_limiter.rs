//! Request spacing for rate-limited upstream APIs

use std::future::Future;
use std::time::Duration;

use tokio::sync::Mutex;
use tokio::time::Instant;
use tracing::debug;

/// CoinGecko free tier budget
pub const DEFAULT_MIN_REQUEST_INTERVAL: Duration = Duration::from_millis(1100);

/// Single shared cursor enforcing a minimum gap between the completion of one
/// request and the start of the next. The lock is held for the duration of
/// the request, so concurrent callers queue behind it.
#[derive(Debug)]
pub struct RequestSpacer {
    min_interval: Duration,
    last_completed: Mutex<Option<Instant>>,
}

impl RequestSpacer {
    pub fn new(min_interval: Duration) -> Self {
        Self {
            min_interval,
            last_completed: Mutex::new(None),
        }
    }

    /// Wait for the next slot, then run `request`
    pub async fn run<F, T>(&self, request: F) -> T
    where
        F: Future<Output = T>,
    {
        let mut last_completed = self.last_completed.lock().await;

        if let Some(previous) = *last_completed {
            let elapsed = previous.elapsed();
            if elapsed < self.min_interval {
                let wait = self.min_interval - elapsed;
                debug!("Rate limiting: waiting {:?} before next request", wait);
                tokio::time::sleep(wait).await;
            }
        }

        let output = request.await;
        *last_completed = Some(Instant::now());
        output
    }
}

impl Default for RequestSpacer {
    fn default() -> Self {
        Self::new(DEFAULT_MIN_REQUEST_INTERVAL)
    }
}
