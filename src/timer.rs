use snackbar_config::TimerControls;
use tokio::time::{Duration, Instant};

/// Observable countdown phase.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TimerState {
    Idle,
    Running,
    Paused,
    Expired,
}

#[derive(Debug, Clone, Copy)]
enum Phase {
    Idle,
    Running { deadline: Instant },
    Paused { remaining: Duration },
    Expired,
}

/// Countdown state for a single toast.
///
/// This is the only writer of the remaining time; the progress side only
/// reads it. Scheduling the deadline wake is the lifecycle controller's job,
/// so every operation takes the current instant instead of consulting a
/// clock of its own.
///
/// A duration at or below zero models a toast that never auto-dismisses:
/// `start` leaves the countdown idle and every other operation is a no-op.
#[derive(Debug)]
pub struct CountdownTimer {
    duration_ms: i64,
    controls: TimerControls,
    phase: Phase,
}

impl CountdownTimer {
    pub fn new(duration_ms: i64, controls: TimerControls) -> Self {
        Self {
            duration_ms,
            controls,
            phase: Phase::Idle,
        }
    }

    /// The configured countdown, when it enables auto-dismissal.
    pub fn duration(&self) -> Option<Duration> {
        u64::try_from(self.duration_ms)
            .ok()
            .filter(|ms| *ms > 0)
            .map(Duration::from_millis)
    }

    pub fn auto_dismiss(&self) -> bool {
        self.duration_ms > 0
    }

    pub fn state(&self) -> TimerState {
        match self.phase {
            Phase::Idle => TimerState::Idle,
            Phase::Running { .. } => TimerState::Running,
            Phase::Paused { .. } => TimerState::Paused,
            Phase::Expired => TimerState::Expired,
        }
    }

    /// Begin (or re-initialize) the countdown from the full duration.
    pub fn start(&mut self, now: Instant) {
        self.phase = match self.duration() {
            Some(duration) => Phase::Running {
                deadline: now + duration,
            },
            None => Phase::Idle,
        };
    }

    /// Freeze a running countdown.
    ///
    /// Under `ResetRestart` the remaining time is restored to the full
    /// duration at this moment, so the next resume starts over.
    pub fn pause(&mut self, now: Instant) {
        let Phase::Running { deadline } = self.phase else {
            return;
        };
        let remaining = match self.controls {
            TimerControls::PauseResume => deadline.saturating_duration_since(now),
            TimerControls::ResetRestart => self.duration().unwrap_or(Duration::ZERO),
        };
        self.phase = Phase::Paused { remaining };
    }

    /// Continue a paused countdown from its remaining time.
    pub fn resume(&mut self, now: Instant) {
        let Phase::Paused { remaining } = self.phase else {
            return;
        };
        self.phase = Phase::Running {
            deadline: now + remaining,
        };
    }

    /// Cancel the countdown. Idempotent and safe in every phase; afterwards
    /// `resume` is a no-op until the timer is started again.
    pub fn stop(&mut self) {
        self.phase = Phase::Idle;
    }

    /// Mark expiry once the deadline has passed.
    ///
    /// Returns true at most once per `start`; the caller runs its end-of-life
    /// effect exactly when it does.
    pub fn fire(&mut self, now: Instant) -> bool {
        let Phase::Running { deadline } = self.phase else {
            return false;
        };
        if now < deadline {
            return false;
        }
        self.phase = Phase::Expired;
        true
    }

    /// Swap in a new duration, resynchronizing the remaining time to it.
    pub fn set_duration(&mut self, duration_ms: i64, now: Instant) {
        self.duration_ms = duration_ms;
        let Some(duration) = self.duration() else {
            if !matches!(self.phase, Phase::Expired) {
                self.phase = Phase::Idle;
            }
            return;
        };
        match self.phase {
            Phase::Running { .. } => {
                self.phase = Phase::Running {
                    deadline: now + duration,
                }
            }
            Phase::Paused { .. } => self.phase = Phase::Paused { remaining: duration },
            Phase::Idle | Phase::Expired => {}
        }
    }

    /// Milliseconds left, clamped to `[0, duration]`.
    pub fn remaining(&self, now: Instant) -> Duration {
        match self.phase {
            Phase::Idle => self.duration().unwrap_or(Duration::ZERO),
            Phase::Running { deadline } => deadline.saturating_duration_since(now),
            Phase::Paused { remaining } => remaining,
            Phase::Expired => Duration::ZERO,
        }
    }

    /// The absolute wake time, while running.
    pub fn deadline(&self) -> Option<Instant> {
        match self.phase {
            Phase::Running { deadline } => Some(deadline),
            _ => None,
        }
    }
}
