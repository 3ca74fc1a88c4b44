use std::time::Duration;

use chrono::{DateTime, Utc};
use tokio::task::JoinHandle;

/// A fixed-delay callback. It fires unless cancelled first; dropping the
/// handle does not cancel it.
#[derive(Debug)]
pub struct DeferredTask {
    label: &'static str,
    fires_at: DateTime<Utc>,
    handle: JoinHandle<()>,
}

impl DeferredTask {
    pub fn schedule<F>(label: &'static str, delay: Duration, callback: F) -> Self
    where
        F: FnOnce() + Send + 'static,
    {
        let fires_at = Utc::now()
            + chrono::Duration::from_std(delay).unwrap_or_else(|_| chrono::Duration::zero());
        tracing::debug!(task = label, delay_ms = delay.as_millis() as u64, "deferred task scheduled");
        let handle = tokio::spawn(async move {
            tokio::time::sleep(delay).await;
            tracing::info!(task = label, "deferred task fired");
            callback();
        });
        Self {
            label,
            fires_at,
            handle,
        }
    }

    pub fn fires_at(&self) -> DateTime<Utc> {
        self.fires_at
    }

    pub fn cancel(self) {
        if !self.handle.is_finished() {
            tracing::info!(task = self.label, "deferred task cancelled");
        }
        self.handle.abort();
    }
}
