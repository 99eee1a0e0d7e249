//! Single-slot debounce timer.
//!
//! A `true` event arms a timer; any later event before it elapses replaces
//! the pending one and restarts the window. A `false` event only disarms.

use std::sync::{Mutex, MutexGuard, PoisonError};
use std::time::Duration;

use tokio::task::JoinHandle;
use tokio::time::sleep;

/// Quiet period used when none is configured.
pub const DEFAULT_WINDOW: Duration = Duration::from_millis(250);

/// Coalesces bursts of toggle events into at most one firing per quiet period.
///
/// Must be used from within a Tokio runtime.
pub struct DebounceGate {
    window: Duration,
    pending: Mutex<Option<JoinHandle<()>>>,
}

impl Default for DebounceGate {
    fn default() -> Self {
        Self::new(DEFAULT_WINDOW)
    }
}

impl DebounceGate {
    pub fn new(window: Duration) -> Self {
        Self {
            window,
            pending: Mutex::new(None),
        }
    }

    pub fn window(&self) -> Duration {
        self.window
    }

    /// Submits an event, replacing whatever is pending.
    ///
    /// For `true`, `on_fire` runs once the window elapses with no further
    /// event. For `false`, nothing is scheduled and `on_fire` is dropped.
    pub fn submit<F>(&self, event: bool, on_fire: F)
    where
        F: FnOnce() + Send + 'static,
    {
        let mut pending = self.lock();
        if let Some(handle) = pending.take() {
            handle.abort();
        }

        if !event {
            return;
        }

        let window = self.window;
        *pending = Some(tokio::spawn(async move {
            sleep(window).await;
            on_fire();
        }));
    }

    /// Disarms the pending timer. Returns whether one was still waiting.
    pub fn cancel(&self) -> bool {
        match self.lock().take() {
            Some(handle) => {
                let waiting = !handle.is_finished();
                handle.abort();
                waiting
            }
            None => false,
        }
    }

    /// True while a timer is armed and has not fired yet.
    pub fn is_pending(&self) -> bool {
        self.lock()
            .as_ref()
            .is_some_and(|handle| !handle.is_finished())
    }

    fn lock(&self) -> MutexGuard<'_, Option<JoinHandle<()>>> {
        self.pending.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

impl Drop for DebounceGate {
    fn drop(&mut self) {
        let pending = self
            .pending
            .get_mut()
            .unwrap_or_else(PoisonError::into_inner);
        if let Some(handle) = pending.take() {
            handle.abort();
        }
    }
}
