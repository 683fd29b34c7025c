use std::sync::{Arc, Mutex};

use snackbar_config::ToastConfig;
use snackbar_util::{
    Activation, ActionDescriptor, CloseReason, Color, RenderedAction, accent_color, render_actions,
};
use tokio::sync::{broadcast, watch};
use tokio::task::JoinHandle;
use tokio::time::{Duration, Instant, MissedTickBehavior};
use tracing::debug;

use crate::constants::PROGRESS_TICK;
use crate::keyboard::Key;
use crate::progress::{self, ProgressIndicator};
use crate::timer::CountdownTimer;

type CloseHook = Box<dyn FnMut(CloseReason) + Send>;
type ClickHook = Box<dyn FnMut() + Send>;

/// A single transient notification and its lifecycle.
///
/// `Toast` is a cheap handle; clones drive the same toast. All state sits
/// behind one lock, and the spawned helpers (deadline wake, key listener,
/// progress publisher) hold only weak references plus an epoch stamp, so a
/// wake that lost a race with a newer operation falls through harmlessly
/// and nothing outlives a dropped toast.
#[derive(Clone)]
pub struct Toast {
    shared: Arc<Shared>,
}

struct Shared {
    state: Mutex<State>,
    visible: watch::Sender<bool>,
}

struct State {
    config: ToastConfig,
    timer: CountdownTimer,
    progress: ProgressIndicator,
    actions: Vec<RenderedAction>,
    epoch: u64,
    expiry: Option<JoinHandle<()>>,
    keys: Option<JoinHandle<()>>,
    on_close: Option<CloseHook>,
    on_click: Option<ClickHook>,
}

impl Toast {
    pub fn new(config: ToastConfig) -> Self {
        let timer = CountdownTimer::new(config.duration_ms, config.timer_controls);
        let progress = ProgressIndicator::new(config.show_progress_bar, config.duration_ms);
        let (visible, _) = watch::channel(false);
        Self {
            shared: Arc::new(Shared {
                state: Mutex::new(State {
                    config,
                    timer,
                    progress,
                    actions: Vec::new(),
                    epoch: 0,
                    expiry: None,
                    keys: None,
                    on_close: None,
                    on_click: None,
                }),
                visible,
            }),
        }
    }

    /// Callback invoked once when the toast begins closing.
    pub fn on_close(&self, hook: impl FnMut(CloseReason) + Send + 'static) {
        self.shared.state.lock().unwrap().on_close = Some(Box::new(hook));
    }

    /// Callback for clicks on the toast body, independent of actions.
    pub fn on_click(&self, hook: impl FnMut() + Send + 'static) {
        self.shared.state.lock().unwrap().on_click = Some(Box::new(hook));
    }

    /// Replace the action list.
    ///
    /// Runs the registry pipeline; pending/disabled state of previously
    /// rendered actions is discarded along with them.
    pub fn set_actions(&self, descriptors: &[ActionDescriptor]) {
        let mut state = self.shared.state.lock().unwrap();
        state.actions = if state.config.show_actions {
            render_actions(descriptors)
        } else {
            Vec::new()
        };
    }

    /// Current rendered actions, in first-occurrence order.
    pub fn actions(&self) -> Vec<RenderedAction> {
        self.shared.state.lock().unwrap().actions.clone()
    }

    /// Mount: initialize the countdown and progress publisher, then open.
    /// A toast that is already visible stays as it is.
    pub fn show(&self) {
        let mut state = self.shared.state.lock().unwrap();
        if *self.shared.visible.borrow() {
            return;
        }
        let now = Instant::now();
        state.timer.start(now);
        let (show, duration_ms) = (state.config.show_progress_bar, state.config.duration_ms);
        state.progress.set_enabled(show, duration_ms);
        let fraction = progress::fraction(&state.timer, now);
        state.progress.publish(fraction);
        arm_expiry(&self.shared, &mut state);
        start_ticker(&self.shared, &mut state);
        self.shared.visible.send_replace(true);
        debug!("Toast shown");
    }

    /// Dismiss the toast. A no-op when already hidden.
    pub fn close(&self) {
        close_with(&self.shared, CloseReason::Dismissed);
    }

    pub fn visible(&self) -> bool {
        *self.shared.visible.borrow()
    }

    /// Observe open/close transitions.
    pub fn watch_visible(&self) -> watch::Receiver<bool> {
        self.shared.visible.subscribe()
    }

    /// Resolve once the toast has finished closing. Returns immediately if
    /// it never opened or is already gone.
    pub async fn closed(&self) {
        let mut visible = self.shared.visible.subscribe();
        while *visible.borrow_and_update() {
            if visible.changed().await.is_err() {
                return;
            }
        }
    }

    /// Pointer entered the toast body.
    pub fn pointer_enter(&self) {
        let mut state = self.shared.state.lock().unwrap();
        if !*self.shared.visible.borrow() || !state.config.pause_on_hover {
            return;
        }
        hold(&mut state);
    }

    /// Pointer left the toast body.
    pub fn pointer_leave(&self) {
        let mut state = self.shared.state.lock().unwrap();
        if !*self.shared.visible.borrow() {
            return;
        }
        release(&self.shared, &mut state);
    }

    /// Click on the toast body (not on an action button).
    pub fn body_click(&self) {
        let (hook, close) = {
            let mut state = self.shared.state.lock().unwrap();
            if !*self.shared.visible.borrow() {
                return;
            }
            (state.on_click.take(), state.config.close_on_click)
        };
        // The hook runs without the lock so it can call back into the toast.
        if let Some(mut hook) = hook {
            hook();
            let mut state = self.shared.state.lock().unwrap();
            if state.on_click.is_none() {
                state.on_click = Some(hook);
            }
        }
        if close {
            close_with(&self.shared, CloseReason::Dismissed);
        }
    }

    /// Route one key from the host's keydown listener.
    pub fn handle_key(&self, key: Key) {
        match key {
            Key::Delete | Key::Backspace => {
                let mut state = self.shared.state.lock().unwrap();
                if *self.shared.visible.borrow() {
                    hold(&mut state);
                }
            }
            Key::Escape => close_with(&self.shared, CloseReason::Dismissed),
            Key::Other => {
                let mut state = self.shared.state.lock().unwrap();
                if *self.shared.visible.borrow() {
                    release(&self.shared, &mut state);
                }
            }
        }
    }

    /// Subscribe to a host key feed for the rest of this toast's life.
    ///
    /// The listener is torn down when the toast closes, when the sender is
    /// dropped, or when the toast itself is dropped, whichever comes first.
    pub fn attach_keys(&self, mut keys: broadcast::Receiver<Key>) {
        let mut state = self.shared.state.lock().unwrap();
        if let Some(task) = state.keys.take() {
            task.abort();
        }
        let weak = Arc::downgrade(&self.shared);
        state.keys = Some(tokio::spawn(async move {
            loop {
                let key = match keys.recv().await {
                    Ok(key) => key,
                    Err(broadcast::error::RecvError::Lagged(_)) => continue,
                    Err(broadcast::error::RecvError::Closed) => break,
                };
                let Some(shared) = weak.upgrade() else {
                    break;
                };
                Toast { shared }.handle_key(key);
            }
        }));
    }

    /// Activate an action by label.
    ///
    /// Returns true when a handler actually ran. Unknown labels and pending
    /// actions return false; a close-requesting activation dismisses the
    /// toast with `CloseReason::Action` once the protocol allows it.
    pub async fn activate(&self, label: &str) -> bool {
        let action = {
            let state = self.shared.state.lock().unwrap();
            if !*self.shared.visible.borrow() {
                return false;
            }
            state.actions.iter().find(|a| a.label() == label).cloned()
        };
        let Some(action) = action else {
            return false;
        };
        match action.activate().await {
            Activation::Ignored => false,
            Activation::Stay => true,
            Activation::Close => {
                close_with(&self.shared, CloseReason::Action);
                true
            }
        }
    }

    /// Change the countdown duration, resynchronizing the remaining time.
    pub fn set_duration(&self, duration_ms: i64) {
        let mut state = self.shared.state.lock().unwrap();
        state.config.duration_ms = duration_ms;
        let now = Instant::now();
        state.timer.set_duration(duration_ms, now);
        let show = state.config.show_progress_bar;
        state.progress.set_enabled(show, duration_ms);
        let fraction = progress::fraction(&state.timer, now);
        state.progress.publish(fraction);
        if *self.shared.visible.borrow() {
            arm_expiry(&self.shared, &mut state);
            start_ticker(&self.shared, &mut state);
        }
    }

    /// Time left before auto-dismissal; zero when none is scheduled.
    pub fn remaining(&self) -> Duration {
        let state = self.shared.state.lock().unwrap();
        state.timer.remaining(Instant::now())
    }

    /// Countdown fraction for the progress bar, when one should render.
    pub fn progress(&self) -> Option<f32> {
        let state = self.shared.state.lock().unwrap();
        state
            .progress
            .enabled()
            .then(|| progress::fraction(&state.timer, Instant::now()))
    }

    /// Subscribe to periodic fraction updates, when a bar should render.
    pub fn watch_progress(&self) -> Option<watch::Receiver<f32>> {
        let state = self.shared.state.lock().unwrap();
        state.progress.enabled().then(|| state.progress.subscribe())
    }

    /// Accent color derived from the configured kind.
    pub fn accent(&self) -> Color {
        accent_color(self.shared.state.lock().unwrap().config.kind)
    }
}

/// Freeze the countdown and cancel the pending deadline wake.
fn hold(state: &mut State) {
    let now = Instant::now();
    state.timer.pause(now);
    state.epoch += 1;
    if let Some(task) = state.expiry.take() {
        task.abort();
    }
    let fraction = progress::fraction(&state.timer, now);
    state.progress.publish(fraction);
}

/// Continue the countdown and re-arm the deadline wake.
fn release(shared: &Arc<Shared>, state: &mut State) {
    state.timer.resume(Instant::now());
    arm_expiry(shared, state);
}

/// Re-arm the deadline wake for the timer's current deadline, invalidating
/// any earlier wake via the epoch stamp.
fn arm_expiry(shared: &Arc<Shared>, state: &mut State) {
    state.epoch += 1;
    if let Some(task) = state.expiry.take() {
        task.abort();
    }
    let Some(deadline) = state.timer.deadline() else {
        return;
    };
    let epoch = state.epoch;
    let weak = Arc::downgrade(shared);
    state.expiry = Some(tokio::spawn(async move {
        tokio::time::sleep_until(deadline).await;
        let Some(shared) = weak.upgrade() else {
            return;
        };
        deadline_reached(&shared, epoch);
    }));
}

fn deadline_reached(shared: &Arc<Shared>, epoch: u64) {
    {
        let mut state = shared.state.lock().unwrap();
        // A pause, close, or duration change since this wake was scheduled
        // wins over it.
        if state.epoch != epoch || !state.timer.fire(Instant::now()) {
            return;
        }
    }
    close_with(shared, CloseReason::Expired);
}

/// Start the periodic progress publisher unless one is already running.
fn start_ticker(shared: &Arc<Shared>, state: &mut State) {
    if !state.progress.enabled() || state.progress.has_ticker() {
        return;
    }
    let weak = Arc::downgrade(shared);
    let handle = tokio::spawn(async move {
        let mut interval = tokio::time::interval(PROGRESS_TICK);
        interval.set_missed_tick_behavior(MissedTickBehavior::Skip);
        loop {
            interval.tick().await;
            let Some(shared) = weak.upgrade() else {
                break;
            };
            let state = shared.state.lock().unwrap();
            let fraction = progress::fraction(&state.timer, Instant::now());
            state.progress.publish(fraction);
        }
    });
    state.progress.set_ticker(handle);
}

/// Tear down the lifecycle and flip visibility, exactly once per mount.
fn close_with(shared: &Arc<Shared>, reason: CloseReason) {
    let hook = {
        let mut state = shared.state.lock().unwrap();
        if !*shared.visible.borrow() {
            return;
        }
        state.epoch += 1;
        if let Some(task) = state.expiry.take() {
            task.abort();
        }
        if let Some(task) = state.keys.take() {
            task.abort();
        }
        state.timer.stop();
        state.progress.cleanup();
        shared.visible.send_replace(false);
        debug!("Toast closed: {:?}", reason);
        state.on_close.take()
    };
    // The hook runs without the lock so it can call back into the toast.
    if let Some(mut hook) = hook {
        hook(reason);
        let mut state = shared.state.lock().unwrap();
        if state.on_close.is_none() {
            state.on_close = Some(hook);
        }
    }
}

impl Drop for State {
    fn drop(&mut self) {
        if let Some(task) = self.expiry.take() {
            task.abort();
        }
        if let Some(task) = self.keys.take() {
            task.abort();
        }
        self.progress.cleanup();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use snackbar_config::ToastKind;
    use snackbar_util::kind_colors;

    #[tokio::test]
    async fn test_hidden_toast_ignores_input() {
        let toast = Toast::new(ToastConfig::default());
        toast.pointer_enter();
        toast.pointer_leave();
        toast.body_click();
        toast.close();
        assert!(!toast.visible());
    }

    #[tokio::test]
    async fn test_show_actions_switch_suppresses_rendering() {
        let config = ToastConfig {
            show_actions: false,
            ..ToastConfig::default()
        };
        let toast = Toast::new(config);
        toast.set_actions(&[ActionDescriptor::new("Undo", || {})]);
        assert!(toast.actions().is_empty());
    }

    #[tokio::test]
    async fn test_accent_follows_kind() {
        let config = ToastConfig {
            kind: Some(ToastKind::Error),
            ..ToastConfig::default()
        };
        assert_eq!(Toast::new(config).accent(), kind_colors::ERROR);
        assert_eq!(
            Toast::new(ToastConfig::default()).accent(),
            kind_colors::NEUTRAL
        );
    }
}
