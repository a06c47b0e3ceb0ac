#![forbid(unsafe_code)]

//! Drop quadrants.
//!
//! A pointer inside a panel resolves to the edge it is closest to, measured
//! as deviation from the panel centre. The quadrant then decides both the
//! orientation of the split a drop creates and which side the dragged panel
//! lands on.

use std::fmt;

use paneltree_core::geometry::{Point, Rect};
use serde::{Deserialize, Serialize};

use crate::tree::Orientation;

/// Which edge region of a panel a pointer is in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Quadrant {
    Left,
    Right,
    Top,
    Bottom,
}

impl Quadrant {
    pub const ALL: [Self; 4] = [Self::Left, Self::Right, Self::Top, Self::Bottom];

    /// Classify a panel-local position.
    ///
    /// Horizontal deviation strictly greater than vertical picks Left/Right;
    /// otherwise Top/Bottom. The exact centre resolves to Top.
    #[must_use]
    pub fn infer(local: Point, width: f64, height: f64) -> Self {
        let half_w = width / 2.0;
        let half_h = height / 2.0;
        if (local.x - half_w).abs() > (local.y - half_h).abs() {
            if local.x < half_w {
                Self::Left
            } else {
                Self::Right
            }
        } else if local.y <= half_h {
            Self::Top
        } else {
            Self::Bottom
        }
    }

    /// Classify a host-coordinate pointer against a panel's bounds.
    #[must_use]
    pub fn from_pointer(pointer: Point, bounds: Rect) -> Self {
        Self::infer(bounds.relative(pointer), bounds.width, bounds.height)
    }

    /// Orientation of the split a drop in this quadrant creates.
    #[must_use]
    pub const fn orientation(self) -> Orientation {
        match self {
            Self::Left | Self::Right => Orientation::Vertical,
            Self::Top | Self::Bottom => Orientation::Horizontal,
        }
    }

    /// Whether the incoming panel becomes the first child.
    #[must_use]
    pub const fn incoming_first(self) -> bool {
        matches!(self, Self::Left | Self::Top)
    }

    /// Half of `bounds` on this quadrant's side, used for drop indicators.
    #[must_use]
    pub fn indicator_rect(self, bounds: Rect) -> Rect {
        let half_w = bounds.width / 2.0;
        let half_h = bounds.height / 2.0;
        match self {
            Self::Left => Rect::new(bounds.x, bounds.y, half_w, bounds.height),
            Self::Right => Rect::new(bounds.x + half_w, bounds.y, half_w, bounds.height),
            Self::Top => Rect::new(bounds.x, bounds.y, bounds.width, half_h),
            Self::Bottom => Rect::new(bounds.x, bounds.y + half_h, bounds.width, half_h),
        }
    }

    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::Left => "left",
            Self::Right => "right",
            Self::Top => "top",
            Self::Bottom => "bottom",
        }
    }
}

impl fmt::Display for Quadrant {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}
