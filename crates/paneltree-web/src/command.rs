#![forbid(unsafe_code)]

//! Commands the host executes on the engine's behalf.
//!
//! The engine never touches the DOM. Anything with a side effect outside the
//! engine (global listeners, timers, the body cursor) is returned as a
//! [`HostCommand`] and the host carries it out in order.

use core::time::Duration;

use serde::{Deserialize, Serialize};

/// Which gesture owns a set of global tracking listeners.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ListenerScope {
    /// `touchmove`/`touchend`/`touchcancel` for a pending or active touch drag.
    Touch,
    /// `mousemove`/`mouseup` for a divider drag.
    Resize,
}

/// Cursor override while a divider is being dragged.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CursorHint {
    RowResize,
    ColResize,
}

impl CursorHint {
    /// CSS `cursor` value.
    #[must_use]
    pub const fn css(self) -> &'static str {
        match self {
            Self::RowResize => "row-resize",
            Self::ColResize => "col-resize",
        }
    }
}

/// One side effect for the host to perform.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "command", rename_all = "snake_case")]
pub enum HostCommand {
    AttachListeners { scope: ListenerScope },
    DetachListeners { scope: ListenerScope },
    /// Call `touch_tick` once host time reaches `deadline`.
    ScheduleLongPress { touch_id: u32, deadline: Duration },
    ClearLongPress,
    SetCursor { cursor: CursorHint },
    ResetCursor,
}

impl HostCommand {
    #[must_use]
    pub const fn attach(scope: ListenerScope) -> Self {
        Self::AttachListeners { scope }
    }

    #[must_use]
    pub const fn detach(scope: ListenerScope) -> Self {
        Self::DetachListeners { scope }
    }
}
