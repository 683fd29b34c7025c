pub mod action;
pub mod kind_style;
pub mod registry;

pub use action::{ActionDescriptor, ActionFuture, ActionHandler, ButtonProps, KeepOpen};
pub use kind_style::{Color, accent_color, kind_color, kind_colors, kind_icon, parse_kind};
pub use registry::{Activation, RenderedAction, render_actions};

use serde::{Deserialize, Serialize};

/// Why a toast left the screen.
#[repr(u32)]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum CloseReason {
    /// The countdown ran out.
    Expired = 1,
    /// Dismissed by the user or the host (body click, escape, `close()`).
    Dismissed = 2,
    /// An activated action requested the close.
    Action = 3,
}
