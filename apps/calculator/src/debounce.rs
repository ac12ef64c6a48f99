//! # Debouncer
//!
//! Trailing-edge, restartable delay for recomputation.
//!
//! ```text
//!  input:   a──b──c───────────────────d─────────────────
//!           │  │  │                   │
//!  timer:   ├──┼──┼───── 300ms ────►  ├──── 300ms ────►
//!           x  x  │                   │
//!  fires:         └────────────────► c└───────────────► d
//! ```
//!
//! Each [`Debouncer::schedule`] aborts the pending task and starts a new
//! one, so only the last task of a burst runs.

use std::sync::Mutex;
use std::time::Duration;

use tokio::task::JoinHandle;

/// Runs the most recently scheduled task after a quiet period.
///
/// Must be used from within a tokio runtime.
#[derive(Debug)]
pub struct Debouncer {
    window: Duration,
    pending: Mutex<Option<JoinHandle<()>>>,
}

impl Debouncer {
    pub fn new(window: Duration) -> Self {
        Debouncer {
            window,
            pending: Mutex::new(None),
        }
    }

    /// Returns the quiet period.
    pub fn window(&self) -> Duration {
        self.window
    }

    /// Schedules `task` to run once the window elapses without another call.
    pub fn schedule<F>(&self, task: F)
    where
        F: FnOnce() + Send + 'static,
    {
        let window = self.window;
        let handle = tokio::spawn(async move {
            tokio::time::sleep(window).await;
            task();
        });

        let previous = self
            .pending
            .lock()
            .expect("Debouncer mutex poisoned")
            .replace(handle);
        if let Some(previous) = previous {
            previous.abort();
        }
    }

    /// Drops the pending task, if any.
    pub fn cancel(&self) {
        if let Some(handle) = self.pending.lock().expect("Debouncer mutex poisoned").take() {
            handle.abort();
        }
    }

    /// Returns true while a scheduled task has not yet run.
    pub fn is_pending(&self) -> bool {
        self.pending
            .lock()
            .expect("Debouncer mutex poisoned")
            .as_ref()
            .is_some_and(|handle| !handle.is_finished())
    }
}

impl Drop for Debouncer {
    fn drop(&mut self) {
        self.cancel();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::Arc;

    const WINDOW: Duration = Duration::from_millis(300);

    #[tokio::test(start_paused = true)]
    async fn test_burst_runs_only_last_task() {
        let debouncer = Debouncer::new(WINDOW);
        let last = Arc::new(AtomicUsize::new(0));
        let runs = Arc::new(AtomicUsize::new(0));

        for value in 1..=5 {
            let last = last.clone();
            let runs = runs.clone();
            debouncer.schedule(move || {
                last.store(value, Ordering::SeqCst);
                runs.fetch_add(1, Ordering::SeqCst);
            });
            tokio::time::advance(Duration::from_millis(100)).await;
        }

        assert_eq!(runs.load(Ordering::SeqCst), 0);

        tokio::time::sleep(WINDOW * 2).await;

        assert_eq!(runs.load(Ordering::SeqCst), 1);
        assert_eq!(last.load(Ordering::SeqCst), 5);
        assert!(!debouncer.is_pending());
    }

    #[tokio::test(start_paused = true)]
    async fn test_call_after_window_runs_again() {
        let debouncer = Debouncer::new(WINDOW);
        let runs = Arc::new(AtomicUsize::new(0));

        for _ in 0..2 {
            let runs = runs.clone();
            debouncer.schedule(move || {
                runs.fetch_add(1, Ordering::SeqCst);
            });
            tokio::time::sleep(WINDOW * 2).await;
        }

        assert_eq!(runs.load(Ordering::SeqCst), 2);
    }

    #[tokio::test(start_paused = true)]
    async fn test_cancel_drops_pending_task() {
        let debouncer = Debouncer::new(WINDOW);
        let runs = Arc::new(AtomicUsize::new(0));

        let counter = runs.clone();
        debouncer.schedule(move || {
            counter.fetch_add(1, Ordering::SeqCst);
        });
        assert!(debouncer.is_pending());

        debouncer.cancel();
        tokio::time::sleep(WINDOW * 2).await;

        assert_eq!(runs.load(Ordering::SeqCst), 0);
        assert!(!debouncer.is_pending());
    }
}
