//! Periodic refresh thread for the dashboard and analytics screens.
//!
//! Spawns a background thread that invokes a refresh callback every 30
//! seconds until shut down. The callback does the fetching; this module
//! only owns the cadence and the thread lifecycle.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::time::Duration;

use crate::config::POLL_INTERVAL;

/// Sleep granularity for shutdown responsiveness.
const SLEEP_GRANULARITY: Duration = Duration::from_millis(500);

/// Handle for the polling thread.
///
/// Supports graceful shutdown via `shutdown()` or automatic cleanup on
/// `Drop`, matching the screen lifecycle it refreshes.
pub struct PollHandle {
    shutdown: Arc<AtomicBool>,
    handle: Option<std::thread::JoinHandle<()>>,
}

impl PollHandle {
    /// Request graceful shutdown. An in-flight refresh completes, but
    /// no further ticks fire.
    pub fn shutdown(&self) {
        self.shutdown.store(true, Ordering::Relaxed);
    }
}

impl Drop for PollHandle {
    fn drop(&mut self) {
        self.shutdown();
        if let Some(h) = self.handle.take() {
            let _ = h.join();
        }
    }
}

/// Starts the polling thread. `refresh` runs once immediately, then on
/// every interval tick until the handle is shut down or dropped.
pub fn start_polling<F>(refresh: F) -> PollHandle
where
    F: Fn() + Send + 'static,
{
    start_polling_every(POLL_INTERVAL, refresh)
}

pub fn start_polling_every<F>(interval: Duration, refresh: F) -> PollHandle
where
    F: Fn() + Send + 'static,
{
    let shutdown = Arc::new(AtomicBool::new(false));
    let flag = shutdown.clone();

    let handle = std::thread::spawn(move || {
        tracing::info!("Polling started (every {}s)", interval.as_secs());
        refresh();
        poll_loop(interval, &flag, &refresh);
        tracing::info!("Polling stopped");
    });

    PollHandle {
        shutdown,
        handle: Some(handle),
    }
}

fn poll_loop<F: Fn()>(interval: Duration, shutdown: &AtomicBool, refresh: &F) {
    loop {
        // Sleep in small increments for responsive shutdown
        let mut slept = Duration::ZERO;
        while slept < interval {
            if shutdown.load(Ordering::Relaxed) {
                return;
            }
            let step = SLEEP_GRANULARITY.min(interval - slept);
            std::thread::sleep(step);
            slept += step;
        }

        if shutdown.load(Ordering::Relaxed) {
            return;
        }
        refresh();
    }
}
