#![forbid(unsafe_code)]

//! Divider drag tracking.
//!
//! Independent of the structural drag: a resize never touches the
//! [`DragSession`](crate::gesture::DragSession) and a structural drag never
//! touches this one. Container bounds are captured once at pointer-down, so a
//! ratio change that reflows the page mid-drag cannot feed back into the
//! ratio computation.

use paneltree_core::geometry::{Point, Rect};
use paneltree_layout::{MAX_SPLIT_RATIO, MIN_SPLIT_RATIO, NodeId, Orientation};
use serde::{Deserialize, Serialize};

use crate::command::{CursorHint, HostCommand, ListenerScope};

/// Transient state of the divider drag in progress.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct ResizeSession {
    pub active: bool,
    pub split_id: Option<NodeId>,
    pub container_bounds: Rect,
    pub orientation: Option<Orientation>,
}

/// Cursor shown while dragging a divider of `orientation`.
#[must_use]
pub const fn cursor_for(orientation: Orientation) -> CursorHint {
    match orientation {
        Orientation::Horizontal => CursorHint::RowResize,
        Orientation::Vertical => CursorHint::ColResize,
    }
}

/// Ratio the pointer implies for a split occupying `container`.
///
/// `None` for a degenerate container or a non-finite pointer.
#[must_use]
pub fn ratio_for_pointer(container: Rect, orientation: Orientation, pointer: Point) -> Option<f64> {
    let (offset, extent) = match orientation {
        Orientation::Vertical => (pointer.x - container.x, container.width),
        Orientation::Horizontal => (pointer.y - container.y, container.height),
    };
    if !(extent > 0.0 && extent.is_finite()) || !offset.is_finite() {
        return None;
    }
    Some((offset / extent).clamp(MIN_SPLIT_RATIO, MAX_SPLIT_RATIO))
}

/// Why a resize input was dropped.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ResizeIgnoredReason {
    AlreadyResizing,
    NotResizing,
    UnknownSplit,
}

/// Owns the [`ResizeSession`] and its listener lifecycle.
#[derive(Debug, Clone, Default)]
pub struct ResizeController {
    session: ResizeSession,
}

impl ResizeController {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub const fn session(&self) -> &ResizeSession {
        &self.session
    }

    /// Pointer-down on the divider of `split_id`.
    pub fn begin(
        &mut self,
        split_id: &NodeId,
        orientation: Orientation,
        container: Rect,
    ) -> Result<Vec<HostCommand>, ResizeIgnoredReason> {
        if self.session.active {
            return Err(ResizeIgnoredReason::AlreadyResizing);
        }
        self.session = ResizeSession {
            active: true,
            split_id: Some(split_id.clone()),
            container_bounds: container,
            orientation: Some(orientation),
        };
        tracing::debug!(
            target: "paneltree.resize",
            split_id = %split_id,
            %orientation,
            width = container.width,
            height = container.height,
            "resize started"
        );
        Ok(vec![
            HostCommand::attach(ListenerScope::Resize),
            HostCommand::SetCursor {
                cursor: cursor_for(orientation),
            },
        ])
    }

    /// Ratio for the active split at `pointer`.
    #[must_use]
    pub fn update(&self, pointer: Point) -> Option<(NodeId, f64)> {
        if !self.session.active {
            return None;
        }
        let split_id = self.session.split_id.as_ref()?;
        let orientation = self.session.orientation?;
        let ratio = ratio_for_pointer(self.session.container_bounds, orientation, pointer)?;
        Some((split_id.clone(), ratio))
    }

    /// Pointer-up, cancel, or blur. Empty when no resize is active.
    pub fn end(&mut self) -> Vec<HostCommand> {
        if !self.session.active {
            return Vec::new();
        }
        if let Some(split_id) = &self.session.split_id {
            tracing::debug!(target: "paneltree.resize", split_id = %split_id, "resize ended");
        }
        self.session = ResizeSession::default();
        vec![
            HostCommand::detach(ListenerScope::Resize),
            HostCommand::ResetCursor,
        ]
    }
}
