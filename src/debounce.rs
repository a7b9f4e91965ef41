//! Trailing-edge task coalescing for rapid-fire triggers.
//!
//! Each `call()` schedules its task after the quiet period and aborts any
//! still-pending predecessor, so a burst of triggers runs the task once,
//! after the burst. The caller treats it as fire-and-forget: nothing is
//! awaited, nothing propagates back, and overlapping search cycles cannot
//! stack up through this path.

use parking_lot::Mutex;
use std::future::Future;
use std::time::Duration;
use tokio::task::JoinHandle;

/// A trailing-edge debouncer.
///
/// Must be used from within a tokio runtime; tasks are spawned on it.
pub struct Debouncer {
    delay: Duration,
    pending: Mutex<Option<JoinHandle<()>>>,
}

impl Debouncer {
    pub fn new(delay: Duration) -> Self {
        Debouncer {
            delay,
            pending: Mutex::new(None),
        }
    }

    pub fn delay(&self) -> Duration {
        self.delay
    }

    /// Schedule `task` to run after the quiet period, replacing (aborting)
    /// any previously scheduled task that has not started yet.
    pub fn call<F, Fut>(&self, task: F)
    where
        F: FnOnce() -> Fut + Send + 'static,
        Fut: Future<Output = ()> + Send + 'static,
    {
        let delay = self.delay;
        let handle = tokio::spawn(async move {
            tokio::time::sleep(delay).await;
            task().await;
        });

        if let Some(previous) = self.pending.lock().replace(handle) {
            previous.abort();
        }
    }

    /// Drop any pending task without running it.
    pub fn cancel(&self) {
        if let Some(previous) = self.pending.lock().take() {
            previous.abort();
        }
    }
}

impl Drop for Debouncer {
    fn drop(&mut self) {
        self.cancel();
    }
}
