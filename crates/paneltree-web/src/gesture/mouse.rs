#![forbid(unsafe_code)]

//! Native HTML5 drag-and-drop adapter.
//!
//! The browser owns the drag lifecycle here, so the adapter holds no state of
//! its own: every decision is made from the current [`DragSession`].

use paneltree_core::geometry::Rect;
use paneltree_core::input::{InputModality, PointerSample};
use paneltree_layout::{NodeId, Quadrant};

use super::{CancelReason, DragSession, GestureDispatch, GestureEvent, GestureIgnoredReason};

/// Maps `dragstart`/`dragover`/`dragleave`/`drop`/`dragend` to intents.
#[derive(Debug, Clone, Copy, Default)]
pub struct MouseDragAdapter;

impl MouseDragAdapter {
    #[must_use]
    pub const fn new() -> Self {
        Self
    }

    pub fn drag_start(
        &self,
        session: &DragSession,
        source: &NodeId,
        pointer: Option<PointerSample>,
    ) -> GestureDispatch {
        if session.active {
            return GestureDispatch::ignored(GestureIgnoredReason::DragAlreadyActive);
        }
        GestureDispatch::event(GestureEvent::Start {
            source: source.clone(),
            modality: InputModality::Mouse,
            pointer: pointer.map(|p| p.position),
        })
    }

    /// `bounds` is the hovered panel's client rect.
    ///
    /// Always asks the host to prevent default while a mouse drag is active;
    /// browsers refuse the drop otherwise.
    pub fn drag_over(
        &self,
        session: &DragSession,
        target: &NodeId,
        bounds: Rect,
        pointer: PointerSample,
    ) -> GestureDispatch {
        if !session.is_owned_by(InputModality::Mouse) {
            return GestureDispatch::ignored(GestureIgnoredReason::NoActiveDrag);
        }
        let quadrant = Quadrant::from_pointer(pointer.position, bounds);
        if session.hover_target_id.as_ref() == Some(target)
            && session.hover_quadrant == Some(quadrant)
            && session.pointer == Some(pointer.position)
        {
            return GestureDispatch::default().with_prevent_default();
        }
        GestureDispatch::event(GestureEvent::Hover {
            target: target.clone(),
            quadrant,
            pointer: Some(pointer.position),
        })
        .with_prevent_default()
    }

    pub fn drag_leave(&self, session: &DragSession, target: &NodeId) -> GestureDispatch {
        if !session.is_owned_by(InputModality::Mouse) {
            return GestureDispatch::ignored(GestureIgnoredReason::NoActiveDrag);
        }
        if session.hover_target_id.as_ref() != Some(target) {
            return GestureDispatch::ignored(GestureIgnoredReason::NotHoverTarget);
        }
        GestureDispatch::event(GestureEvent::Leave {
            target: target.clone(),
        })
    }

    /// Drop onto the last hovered panel and quadrant.
    pub fn drop(&self, session: &DragSession) -> GestureDispatch {
        if !session.is_owned_by(InputModality::Mouse) {
            return GestureDispatch::ignored(GestureIgnoredReason::NoActiveDrag);
        }
        let event = match (session.dragged_id.as_ref(), session.hover()) {
            (Some(source), Some((target, quadrant))) => GestureEvent::Drop {
                source: source.clone(),
                target: target.clone(),
                quadrant,
            },
            _ => GestureEvent::Cancel {
                reason: CancelReason::NoTarget,
            },
        };
        GestureDispatch::event(event).with_prevent_default()
    }

    /// `dragend` fires after `drop` too; by then the session is already clear.
    pub fn drag_end(&self, session: &DragSession) -> GestureDispatch {
        if !session.is_owned_by(InputModality::Mouse) {
            return GestureDispatch::default();
        }
        GestureDispatch::event(GestureEvent::Cancel {
            reason: CancelReason::Released,
        })
    }
}
