//! Minimum-interval gate for rate-limited services.

use std::time::Duration;

use tokio::sync::Mutex;
use tokio::time::Instant;

/// Serializes requests to one service so they never exceed a fixed rate.
///
/// The lock is held across the sleep. Callers queue up behind it and leave
/// at most one per interval, no matter how the batch is structured.
#[derive(Debug)]
pub struct RateGate {
    interval: Duration,
    last: Mutex<Option<Instant>>,
}

impl RateGate {
    pub fn new(interval: Duration) -> Self {
        Self {
            interval,
            last: Mutex::new(None),
        }
    }

    /// Waits until at least the configured interval has passed since the
    /// previous call. The first call goes through immediately.
    pub async fn wait(&self) {
        let mut last = self.last.lock().await;
        if let Some(prev) = *last {
            let ready = prev + self.interval;
            let now = Instant::now();
            if now < ready {
                tokio::time::sleep(ready - now).await;
            }
        }
        *last = Some(Instant::now());
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test(start_paused = true)]
    async fn first_call_is_immediate() {
        let gate = RateGate::new(Duration::from_secs(2));
        let start = Instant::now();
        gate.wait().await;
        assert_eq!(start.elapsed(), Duration::ZERO);
    }

    #[tokio::test(start_paused = true)]
    async fn spaces_out_subsequent_calls() {
        let gate = RateGate::new(Duration::from_secs(2));
        let start = Instant::now();
        gate.wait().await;
        gate.wait().await;
        gate.wait().await;
        assert!(start.elapsed() >= Duration::from_secs(4));
    }
}
