#![forbid(unsafe_code)]

//! Host input samples.
//!
//! The host owns the event loop and the clock: every sample carries the
//! monotonic timestamp the host observed it at, so recognizers never read a
//! wall clock themselves and replay stays deterministic.

use core::time::Duration;

use serde::{Deserialize, Serialize};

use crate::geometry::Point;

/// Which physical input family produced an interaction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum InputModality {
    /// Mouse (or pen) driving native drag-and-drop.
    Mouse,
    /// Finger on a touch screen.
    Touch,
}

/// One pointer observation from the host.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PointerSample {
    pub position: Point,
    /// Host monotonic time.
    pub at: Duration,
}

impl PointerSample {
    #[must_use]
    pub const fn new(position: Point, at: Duration) -> Self {
        Self { position, at }
    }
}

/// One touch-point observation from the host.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct TouchSample {
    /// Host `Touch.identifier`; stable for the lifetime of one finger contact.
    pub touch_id: u32,
    pub position: Point,
    /// Host monotonic time.
    pub at: Duration,
}

impl TouchSample {
    #[must_use]
    pub const fn new(touch_id: u32, position: Point, at: Duration) -> Self {
        Self {
            touch_id,
            position,
            at,
        }
    }
}
