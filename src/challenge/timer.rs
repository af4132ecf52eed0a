//! Elapsed-time ticker for challenge sessions.

use std::time::Duration;
use tokio::sync::{oneshot, watch};
use tokio::task::JoinHandle;
use tokio::time::{interval, Instant};
use tracing::{debug, warn};

/// Periodic task publishing whole elapsed seconds through a `watch` channel.
///
/// Must be started inside a tokio runtime. Dropping the timer aborts the
/// task; [`ElapsedTimer::stop`] shuts it down cleanly and returns the last
/// published value.
#[derive(Debug)]
pub struct ElapsedTimer {
    elapsed: watch::Receiver<u64>,
    stop: Option<oneshot::Sender<()>>,
    handle: Option<JoinHandle<()>>,
}

impl ElapsedTimer {
    pub fn start(period: Duration) -> Self {
        let (tx, rx) = watch::channel(0u64);
        let (stop_tx, mut stop_rx) = oneshot::channel::<()>();

        let handle = tokio::spawn(async move {
            let started = Instant::now();
            let mut ticker = interval(period);
            // The first tick completes immediately.
            ticker.tick().await;
            loop {
                tokio::select! {
                    biased;
                    _ = &mut stop_rx => break,
                    _ = ticker.tick() => {
                        let secs = started.elapsed().as_secs();
                        if tx.send(secs).is_err() {
                            break;
                        }
                    }
                }
            }
            debug!("elapsed timer stopped");
        });

        Self {
            elapsed: rx,
            stop: Some(stop_tx),
            handle: Some(handle),
        }
    }

    /// Last published elapsed seconds.
    pub fn elapsed_secs(&self) -> u64 {
        *self.elapsed.borrow()
    }

    /// A receiver that observes every published update.
    pub fn subscribe(&self) -> watch::Receiver<u64> {
        self.elapsed.clone()
    }

    pub fn is_running(&self) -> bool {
        self.stop.is_some()
    }

    /// Signal the task to stop without waiting for it and return the last
    /// published value. Later calls return the same value.
    pub fn halt(&mut self) -> u64 {
        if let Some(stop) = self.stop.take() {
            let _ = stop.send(());
        }
        self.elapsed_secs()
    }

    /// Stop ticking, wait for the task and return the final elapsed seconds.
    pub async fn stop(mut self) -> u64 {
        self.halt();
        if let Some(handle) = self.handle.take() {
            if let Err(e) = handle.await {
                warn!(error = %e, "elapsed timer task failed");
            }
        }
        self.elapsed_secs()
    }
}

impl Drop for ElapsedTimer {
    fn drop(&mut self) {
        if let Some(handle) = self.handle.take() {
            handle.abort();
        }
    }
}

/// Format seconds as `m:ss`.
///
/// ```rust
/// use gitquest::challenge::format_elapsed;
///
/// assert_eq!(format_elapsed(75), "1:15");
/// ```
pub fn format_elapsed(secs: u64) -> String {
    format!("{}:{:02}", secs / 60, secs % 60)
}
