//! Lifecycle core for transient on-screen notifications.
//!
//! A [`Toast`] coordinates an open/close state machine, a countdown timer
//! with pause-resume or reset-restart semantics, a progress indicator kept
//! in sync with the timer, and the execution policy for action buttons.
//! Rendering is the host's business; this crate exposes the behavioral
//! contract and the derived values a renderer needs.

mod constants;
pub mod keyboard;
pub mod progress;
pub mod timer;
pub mod toast;

pub use keyboard::{Key, key_channel};
pub use progress::{fraction, progress_visible};
pub use timer::{CountdownTimer, TimerState};
pub use toast::Toast;

pub use snackbar_config::{DEFAULT_DURATION_MS, TimerControls, ToastConfig, ToastKind};
pub use snackbar_util::{
    ActionDescriptor, Activation, ButtonProps, CloseReason, Color, KeepOpen, RenderedAction,
    accent_color, kind_color, kind_colors, kind_icon, parse_kind, render_actions,
};
