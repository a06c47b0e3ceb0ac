#![forbid(unsafe_code)]

//! Touch long-press-and-drag adapter.
//!
//! A finger resting on a panel arms a pending drag. It activates once held
//! for the configured delay without travelling past the jitter radius; any
//! larger movement first is a scroll and disarms it. While pending the
//! adapter never asks the host to prevent default, so page scrolling is
//! untouched. Once active, every move does.
//!
//! The host owns the clock. `touch_start` returns a
//! [`HostCommand::ScheduleLongPress`] deadline and the host calls
//! `touch_tick` when it elapses. A move stamped past the deadline activates
//! too, so a late timer cannot lose the gesture.
//!
//! Global touch listeners are attached at `touch_start` and every path back
//! to [`TouchPhase::Idle`] detaches them exactly once.

use core::time::Duration;

use paneltree_core::geometry::Point;
use paneltree_core::input::{InputModality, TouchSample};
use paneltree_layout::{LayoutSolution, NodeId, Quadrant};

use super::{CancelReason, DragSession, GestureDispatch, GestureEvent, GestureIgnoredReason};
use crate::command::{HostCommand, ListenerScope};
use crate::config::LongPressConfig;

/// Recognizer phase.
#[derive(Debug, Clone, PartialEq, Default)]
pub enum TouchPhase {
    #[default]
    Idle,
    /// Finger down, waiting for the long-press delay.
    Pending {
        touch_id: u32,
        panel: NodeId,
        origin: Point,
        started_at: Duration,
    },
    /// Long press recognized; the finger is dragging.
    Active { touch_id: u32 },
}

impl TouchPhase {
    const fn touch_id(&self) -> Option<u32> {
        match self {
            Self::Idle => None,
            Self::Pending { touch_id, .. } | Self::Active { touch_id } => Some(*touch_id),
        }
    }
}

/// Stateful touch recognizer.
#[derive(Debug, Clone, Default)]
pub struct TouchDragAdapter {
    phase: TouchPhase,
}

impl TouchDragAdapter {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub const fn phase(&self) -> &TouchPhase {
        &self.phase
    }

    fn release_pending() -> Vec<HostCommand> {
        vec![
            HostCommand::ClearLongPress,
            HostCommand::detach(ListenerScope::Touch),
        ]
    }

    pub fn touch_start(
        &mut self,
        session: &DragSession,
        config: &LongPressConfig,
        panel: &NodeId,
        sample: TouchSample,
    ) -> GestureDispatch {
        if session.active {
            return GestureDispatch::ignored(GestureIgnoredReason::DragAlreadyActive);
        }
        if self.phase != TouchPhase::Idle {
            return GestureDispatch::ignored(GestureIgnoredReason::TouchAlreadyTracking);
        }
        self.phase = TouchPhase::Pending {
            touch_id: sample.touch_id,
            panel: panel.clone(),
            origin: sample.position,
            started_at: sample.at,
        };
        GestureDispatch {
            commands: vec![
                HostCommand::attach(ListenerScope::Touch),
                HostCommand::ScheduleLongPress {
                    touch_id: sample.touch_id,
                    deadline: sample.at.saturating_add(config.delay()),
                },
            ],
            ..GestureDispatch::default()
        }
    }

    pub fn touch_move(
        &mut self,
        session: &DragSession,
        config: &LongPressConfig,
        layout: &LayoutSolution,
        sample: TouchSample,
    ) -> GestureDispatch {
        if self.phase.touch_id().is_none() {
            return GestureDispatch::ignored(GestureIgnoredReason::NoActiveTouch);
        }
        if self.phase.touch_id() != Some(sample.touch_id) {
            return GestureDispatch::ignored(GestureIgnoredReason::TouchMismatch);
        }
        if let TouchPhase::Pending {
            origin, started_at, ..
        } = self.phase
        {
            if sample.at >= started_at.saturating_add(config.delay()) {
                let mut dispatch = self.activate(session);
                if dispatch.ignored.is_none() {
                    dispatch.commands.insert(0, HostCommand::ClearLongPress);
                    let hover = Self::hover(layout, sample);
                    dispatch.events.extend(hover.events);
                    dispatch.prevent_default = true;
                }
                return dispatch;
            }
            if origin.distance(sample.position) > config.jitter_px {
                tracing::trace!(
                    target: "paneltree.gesture",
                    touch_id = sample.touch_id,
                    "touch moved before long press; treating as scroll"
                );
                self.phase = TouchPhase::Idle;
                return GestureDispatch {
                    commands: Self::release_pending(),
                    ..GestureDispatch::default()
                };
            }
            return GestureDispatch::default();
        }
        if !session.is_owned_by(InputModality::Touch) {
            return GestureDispatch::ignored(GestureIgnoredReason::NoActiveDrag);
        }
        Self::hover(layout, sample)
    }

    /// Host timer callback for the scheduled long-press deadline.
    pub fn touch_tick(
        &mut self,
        session: &DragSession,
        config: &LongPressConfig,
        now: Duration,
    ) -> GestureDispatch {
        match self.phase {
            TouchPhase::Pending { started_at, .. } => {
                if now < started_at.saturating_add(config.delay()) {
                    return GestureDispatch::ignored(GestureIgnoredReason::LongPressNotElapsed);
                }
                self.activate(session)
            }
            TouchPhase::Idle | TouchPhase::Active { .. } => {
                GestureDispatch::ignored(GestureIgnoredReason::NoActiveTouch)
            }
        }
    }

    pub fn touch_end(&mut self, session: &DragSession, sample: TouchSample) -> GestureDispatch {
        match self.phase.touch_id() {
            None => return GestureDispatch::ignored(GestureIgnoredReason::NoActiveTouch),
            Some(id) if id != sample.touch_id => {
                return GestureDispatch::ignored(GestureIgnoredReason::TouchMismatch);
            }
            Some(_) => {}
        }
        let phase = std::mem::take(&mut self.phase);
        if matches!(phase, TouchPhase::Pending { .. }) {
            // Tap: released before the long press fired.
            return GestureDispatch {
                commands: Self::release_pending(),
                ..GestureDispatch::default()
            };
        }
        let mut dispatch = GestureDispatch {
            commands: vec![HostCommand::detach(ListenerScope::Touch)],
            ..GestureDispatch::default()
        };
        if session.is_owned_by(InputModality::Touch) {
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
            dispatch.events.push(event);
            dispatch.prevent_default = true;
        }
        dispatch
    }

    pub fn touch_cancel(&mut self, session: &DragSession, touch_id: u32) -> GestureDispatch {
        match self.phase.touch_id() {
            None => return GestureDispatch::ignored(GestureIgnoredReason::NoActiveTouch),
            Some(id) if id != touch_id => {
                return GestureDispatch::ignored(GestureIgnoredReason::TouchMismatch);
            }
            Some(_) => {}
        }
        let phase = std::mem::take(&mut self.phase);
        if matches!(phase, TouchPhase::Pending { .. }) {
            return GestureDispatch {
                commands: Self::release_pending(),
                ..GestureDispatch::default()
            };
        }
        let mut dispatch = GestureDispatch {
            commands: vec![HostCommand::detach(ListenerScope::Touch)],
            ..GestureDispatch::default()
        };
        if session.is_owned_by(InputModality::Touch) {
            dispatch.events.push(GestureEvent::Cancel {
                reason: CancelReason::TouchCancelled,
            });
        }
        dispatch
    }

    /// Return to idle, releasing whatever the current phase holds.
    pub fn reset(&mut self) -> Vec<HostCommand> {
        match std::mem::take(&mut self.phase) {
            TouchPhase::Idle => Vec::new(),
            TouchPhase::Pending { .. } => Self::release_pending(),
            TouchPhase::Active { .. } => vec![HostCommand::detach(ListenerScope::Touch)],
        }
    }

    fn activate(&mut self, session: &DragSession) -> GestureDispatch {
        let TouchPhase::Pending {
            touch_id,
            panel,
            origin,
            ..
        } = std::mem::take(&mut self.phase)
        else {
            return GestureDispatch::ignored(GestureIgnoredReason::NoActiveTouch);
        };
        if session.active {
            // A mouse drag started while the finger was resting.
            return GestureDispatch {
                commands: Self::release_pending(),
                ignored: Some(GestureIgnoredReason::ModalityMismatch),
                ..GestureDispatch::default()
            };
        }
        tracing::debug!(
            target: "paneltree.gesture",
            touch_id,
            panel = %panel,
            "long press recognized"
        );
        self.phase = TouchPhase::Active { touch_id };
        GestureDispatch::event(GestureEvent::Start {
            source: panel,
            modality: InputModality::Touch,
            pointer: Some(origin),
        })
    }

    fn hover(layout: &LayoutSolution, sample: TouchSample) -> GestureDispatch {
        let Some((target, bounds)) = layout.nearest_panel(sample.position) else {
            return GestureDispatch::ignored(GestureIgnoredReason::NoPanels).with_prevent_default();
        };
        GestureDispatch::event(GestureEvent::Hover {
            target: target.clone(),
            quadrant: Quadrant::from_pointer(sample.position, bounds),
            pointer: Some(sample.position),
        })
        .with_prevent_default()
    }
}
