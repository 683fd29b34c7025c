use tokio::sync::watch;
use tokio::task::JoinHandle;
use tokio::time::Instant;

use crate::timer::CountdownTimer;

/// Whether the progress bar should render at all.
///
/// Only a positive duration has something to track; the flag alone is not
/// enough.
pub fn progress_visible(show_progress_bar: bool, duration_ms: i64) -> bool {
    show_progress_bar && duration_ms > 0
}

/// Fraction of the countdown left, linear in remaining time.
///
/// Reads the same remaining value the timer owns, so a pause freezes the
/// fraction under pause-resume and snaps it back to full under
/// reset-restart without any extra bookkeeping here.
pub fn fraction(timer: &CountdownTimer, now: Instant) -> f32 {
    let Some(duration) = timer.duration() else {
        return 1.0;
    };
    let remaining = timer.remaining(now);
    (remaining.as_secs_f32() / duration.as_secs_f32()).clamp(0.0, 1.0)
}

/// Publishes the countdown fraction for renderers.
///
/// The controller feeds it on every state change and runs a periodic
/// publisher task in between; `cleanup` aborts that task so a toast can be
/// mounted and unmounted repeatedly without leaking timers.
#[derive(Debug)]
pub(crate) struct ProgressIndicator {
    enabled: bool,
    tx: watch::Sender<f32>,
    ticker: Option<JoinHandle<()>>,
}

impl ProgressIndicator {
    pub(crate) fn new(show_progress_bar: bool, duration_ms: i64) -> Self {
        let (tx, _) = watch::channel(1.0);
        Self {
            enabled: progress_visible(show_progress_bar, duration_ms),
            tx,
            ticker: None,
        }
    }

    pub(crate) fn enabled(&self) -> bool {
        self.enabled
    }

    /// Re-derive visibility after a configuration change; a bar that just
    /// became hidden also loses its publisher task.
    pub(crate) fn set_enabled(&mut self, show_progress_bar: bool, duration_ms: i64) {
        self.enabled = progress_visible(show_progress_bar, duration_ms);
        if !self.enabled {
            self.cleanup();
        }
    }

    pub(crate) fn subscribe(&self) -> watch::Receiver<f32> {
        self.tx.subscribe()
    }

    pub(crate) fn publish(&self, fraction: f32) {
        self.tx.send_replace(fraction.clamp(0.0, 1.0));
    }

    pub(crate) fn has_ticker(&self) -> bool {
        self.ticker.is_some()
    }

    pub(crate) fn set_ticker(&mut self, handle: JoinHandle<()>) {
        self.cleanup();
        self.ticker = Some(handle);
    }

    /// Release the publisher task. Idempotent; safe before any ticker ran.
    pub(crate) fn cleanup(&mut self) {
        if let Some(ticker) = self.ticker.take() {
            ticker.abort();
        }
    }
}

impl Drop for ProgressIndicator {
    fn drop(&mut self) {
        self.cleanup();
    }
}
