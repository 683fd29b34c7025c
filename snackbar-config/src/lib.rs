use serde::{Deserialize, Serialize};

/// Default countdown before a toast dismisses itself, in milliseconds.
pub const DEFAULT_DURATION_MS: i64 = 4500;

/// How a countdown reacts to an interruption (hover, focus key).
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum TimerControls {
    /// Freeze the countdown and continue from the remaining time.
    #[default]
    PauseResume,
    /// Restore the full duration so the next resume starts over.
    ResetRestart,
}

/// The fixed set of toast kinds used for accent styling.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ToastKind {
    Info,
    Success,
    Warning,
    Error,
}

impl ToastKind {
    /// Canonical lowercase name, matching the serde representation.
    pub fn name(self) -> &'static str {
        match self {
            ToastKind::Info => "info",
            ToastKind::Success => "success",
            ToastKind::Warning => "warning",
            ToastKind::Error => "error",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ToastConfig {
    /// Countdown before auto-dismissal in milliseconds.
    ///
    /// Zero or negative disables auto-dismissal entirely; such a toast stays
    /// up until dismissed and never shows a progress bar.
    #[serde(default = "default_duration_ms")]
    pub duration_ms: i64,
    /// What an interruption does to the countdown.
    #[serde(default)]
    pub timer_controls: TimerControls,
    /// Whether to surface the remaining-time progress bar (default: true)
    #[serde(default = "default_true")]
    pub show_progress_bar: bool,
    /// Optional kind, used only for accent color lookup.
    #[serde(default)]
    pub kind: Option<ToastKind>,
    /// Whether to render action buttons at all (default: true)
    #[serde(default = "default_true")]
    pub show_actions: bool,
    /// Whether a click on the toast body dismisses it (default: true)
    #[serde(default = "default_true")]
    pub close_on_click: bool,
    /// Whether hovering the toast interrupts the countdown (default: true)
    #[serde(default = "default_true")]
    pub pause_on_hover: bool,
}

impl Default for ToastConfig {
    fn default() -> Self {
        Self {
            duration_ms: DEFAULT_DURATION_MS,
            timer_controls: TimerControls::default(),
            show_progress_bar: default_true(),
            kind: None,
            show_actions: default_true(),
            close_on_click: default_true(),
            pause_on_hover: default_true(),
        }
    }
}

impl ToastConfig {
    /// True when the configured duration enables auto-dismissal.
    pub fn auto_dismiss(&self) -> bool {
        self.duration_ms > 0
    }
}

// Default value helpers for serde
const fn default_true() -> bool {
    true
}

const fn default_duration_ms() -> i64 {
    DEFAULT_DURATION_MS
}
