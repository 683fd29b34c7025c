use tokio::sync::broadcast;

use crate::constants::KEY_CHANNEL_CAPACITY;

/// Keys the toast-wide keydown listener distinguishes.
///
/// Delete and backspace act like the pointer entering the toast, escape
/// dismisses immediately, and everything else acts like the pointer
/// leaving.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Key {
    Delete,
    Backspace,
    Escape,
    Other,
}

impl Key {
    /// Map a DOM-style key code string.
    pub fn from_code(code: &str) -> Self {
        match code {
            "Delete" => Key::Delete,
            "Backspace" => Key::Backspace,
            "Escape" => Key::Escape,
            _ => Key::Other,
        }
    }
}

/// A process-wide key feed hosts can fan out to every mounted toast.
pub fn key_channel() -> (broadcast::Sender<Key>, broadcast::Receiver<Key>) {
    broadcast::channel(KEY_CHANNEL_CAPACITY)
}
