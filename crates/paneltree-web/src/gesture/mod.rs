#![forbid(unsafe_code)]

//! Gesture interpretation.
//!
//! Mouse drag-and-drop and touch long-press-and-drag arrive through two
//! adapters with very different lifecycles. Both reduce their raw events to
//! the same small [`GestureEvent`] vocabulary, which a single
//! [`DragMachine`] applies to the one [`DragSession`].
//!
//! Adapters never mutate the session directly; they read it to decide what to
//! emit and leave the transition to the machine. This keeps modality
//! arbitration in one place: whichever input family opened the drag owns it
//! until the drag ends.

mod machine;
mod mouse;
mod touch;

pub use machine::{DragEffect, DragMachine, DragSession};
pub use mouse::MouseDragAdapter;
pub use touch::{TouchDragAdapter, TouchPhase};

use paneltree_core::geometry::{Point, Rect};
use paneltree_core::input::{InputModality, PointerSample, TouchSample};
use paneltree_layout::{LayoutSolution, NodeId, Quadrant};
use serde::{Deserialize, Serialize};

use crate::command::HostCommand;
use crate::config::LongPressConfig;

/// Intent produced by an input adapter.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum GestureEvent {
    Start {
        source: NodeId,
        modality: InputModality,
        pointer: Option<Point>,
    },
    Hover {
        target: NodeId,
        quadrant: Quadrant,
        pointer: Option<Point>,
    },
    Leave {
        target: NodeId,
    },
    Drop {
        source: NodeId,
        target: NodeId,
        quadrant: Quadrant,
    },
    Cancel {
        reason: CancelReason,
    },
}

/// Why a drag ended without a structural edit.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CancelReason {
    /// Mouse released outside any panel.
    Released,
    /// Drop arrived with no hovered panel.
    NoTarget,
    /// Host delivered `touchcancel`.
    TouchCancelled,
    /// Host reset the layout mid-gesture.
    Reset,
}

/// Deterministic reason an incoming event was dropped on the floor.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum GestureIgnoredReason {
    NoActiveDrag,
    DragAlreadyActive,
    /// The drag belongs to the other input family.
    ModalityMismatch,
    SourceMismatch,
    NotHoverTarget,
    /// Identifier is not a panel in the current tree.
    NotAPanel,
    NoActiveTouch,
    TouchAlreadyTracking,
    TouchMismatch,
    LongPressNotElapsed,
    NoPanels,
}

/// Output of one adapter call.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct GestureDispatch {
    pub events: Vec<GestureEvent>,
    pub commands: Vec<HostCommand>,
    /// Host should call `preventDefault()` on the native event.
    pub prevent_default: bool,
    pub ignored: Option<GestureIgnoredReason>,
}

impl GestureDispatch {
    pub(crate) fn ignored(reason: GestureIgnoredReason) -> Self {
        Self {
            ignored: Some(reason),
            ..Self::default()
        }
    }

    pub(crate) fn event(event: GestureEvent) -> Self {
        Self {
            events: vec![event],
            ..Self::default()
        }
    }

    pub(crate) fn with_prevent_default(mut self) -> Self {
        self.prevent_default = true;
        self
    }
}

/// Both adapters plus modality arbitration.
#[derive(Debug, Clone, Default)]
pub struct GestureInterpreter {
    mouse: MouseDragAdapter,
    touch: TouchDragAdapter,
    long_press: LongPressConfig,
}

impl GestureInterpreter {
    #[must_use]
    pub fn new(long_press: LongPressConfig) -> Self {
        Self {
            mouse: MouseDragAdapter::new(),
            touch: TouchDragAdapter::new(),
            long_press,
        }
    }

    #[must_use]
    pub const fn touch_phase(&self) -> &TouchPhase {
        self.touch.phase()
    }

    fn locked_out(session: &DragSession, modality: InputModality) -> bool {
        session.active && session.modality != Some(modality)
    }

    fn trace(phase: &'static str, dispatch: GestureDispatch) -> GestureDispatch {
        if let Some(reason) = dispatch.ignored {
            tracing::trace!(target: "paneltree.gesture", phase, ?reason, "gesture input ignored");
        } else if !dispatch.events.is_empty() {
            tracing::trace!(
                target: "paneltree.gesture",
                phase,
                events = dispatch.events.len(),
                commands = dispatch.commands.len(),
                "gesture input interpreted"
            );
        }
        dispatch
    }

    pub fn mouse_drag_start(
        &mut self,
        session: &DragSession,
        source: &NodeId,
        pointer: Option<PointerSample>,
    ) -> GestureDispatch {
        let dispatch = self.mouse.drag_start(session, source, pointer);
        Self::trace("mouse_drag_start", dispatch)
    }

    pub fn mouse_drag_over(
        &mut self,
        session: &DragSession,
        target: &NodeId,
        bounds: Rect,
        pointer: PointerSample,
    ) -> GestureDispatch {
        let dispatch = if Self::locked_out(session, InputModality::Mouse) {
            GestureDispatch::ignored(GestureIgnoredReason::ModalityMismatch)
        } else {
            self.mouse.drag_over(session, target, bounds, pointer)
        };
        Self::trace("mouse_drag_over", dispatch)
    }

    pub fn mouse_drag_leave(&mut self, session: &DragSession, target: &NodeId) -> GestureDispatch {
        let dispatch = if Self::locked_out(session, InputModality::Mouse) {
            GestureDispatch::ignored(GestureIgnoredReason::ModalityMismatch)
        } else {
            self.mouse.drag_leave(session, target)
        };
        Self::trace("mouse_drag_leave", dispatch)
    }

    pub fn mouse_drop(&mut self, session: &DragSession) -> GestureDispatch {
        let dispatch = if Self::locked_out(session, InputModality::Mouse) {
            GestureDispatch::ignored(GestureIgnoredReason::ModalityMismatch)
        } else {
            self.mouse.drop(session)
        };
        Self::trace("mouse_drop", dispatch)
    }

    pub fn mouse_drag_end(&mut self, session: &DragSession) -> GestureDispatch {
        let dispatch = if Self::locked_out(session, InputModality::Mouse) {
            GestureDispatch::ignored(GestureIgnoredReason::ModalityMismatch)
        } else {
            self.mouse.drag_end(session)
        };
        Self::trace("mouse_drag_end", dispatch)
    }

    pub fn touch_start(
        &mut self,
        session: &DragSession,
        panel: &NodeId,
        sample: TouchSample,
    ) -> GestureDispatch {
        let dispatch = if Self::locked_out(session, InputModality::Touch) {
            GestureDispatch::ignored(GestureIgnoredReason::ModalityMismatch)
        } else {
            self.touch
                .touch_start(session, &self.long_press, panel, sample)
        };
        Self::trace("touch_start", dispatch)
    }

    pub fn touch_move(
        &mut self,
        session: &DragSession,
        layout: &LayoutSolution,
        sample: TouchSample,
    ) -> GestureDispatch {
        let dispatch = self
            .touch
            .touch_move(session, &self.long_press, layout, sample);
        Self::trace("touch_move", dispatch)
    }

    pub fn touch_tick(&mut self, session: &DragSession, now: core::time::Duration) -> GestureDispatch {
        let dispatch = self.touch.touch_tick(session, &self.long_press, now);
        Self::trace("touch_tick", dispatch)
    }

    pub fn touch_end(&mut self, session: &DragSession, sample: TouchSample) -> GestureDispatch {
        let dispatch = self.touch.touch_end(session, sample);
        Self::trace("touch_end", dispatch)
    }

    pub fn touch_cancel(&mut self, session: &DragSession, touch_id: u32) -> GestureDispatch {
        let dispatch = self.touch.touch_cancel(session, touch_id);
        Self::trace("touch_cancel", dispatch)
    }

    /// Drop any in-flight touch tracking, returning the release commands.
    pub fn reset(&mut self) -> Vec<HostCommand> {
        self.touch.reset()
    }
}
