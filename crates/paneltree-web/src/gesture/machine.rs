#![forbid(unsafe_code)]

//! The single drag state machine both input adapters feed.

use paneltree_core::geometry::Point;
use paneltree_core::input::InputModality;
use paneltree_layout::{NodeId, Quadrant};
use serde::{Deserialize, Serialize};

use super::{CancelReason, GestureEvent, GestureIgnoredReason};

/// Transient state of the structural drag in progress.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct DragSession {
    pub active: bool,
    pub dragged_id: Option<NodeId>,
    pub hover_target_id: Option<NodeId>,
    pub hover_quadrant: Option<Quadrant>,
    /// Input family that opened the drag; the other family is locked out.
    pub modality: Option<InputModality>,
    /// Last pointer position reported by the owning adapter.
    pub pointer: Option<Point>,
}

impl DragSession {
    /// True when the active drag was opened by `modality`.
    #[must_use]
    pub fn is_owned_by(&self, modality: InputModality) -> bool {
        self.active && self.modality == Some(modality)
    }

    /// Hover target and quadrant, when both are known.
    #[must_use]
    pub fn hover(&self) -> Option<(&NodeId, Quadrant)> {
        Some((self.hover_target_id.as_ref()?, self.hover_quadrant?))
    }
}

/// What one applied [`GestureEvent`] did to the session.
#[derive(Debug, Clone, PartialEq)]
pub enum DragEffect {
    Started {
        source: NodeId,
        modality: InputModality,
    },
    Hovered {
        target: NodeId,
        quadrant: Quadrant,
    },
    HoverCleared {
        target: NodeId,
    },
    /// Session cleared; the caller performs the structural edit.
    Dropped {
        source: NodeId,
        target: NodeId,
        quadrant: Quadrant,
    },
    Cancelled {
        reason: CancelReason,
    },
    Ignored(GestureIgnoredReason),
}

/// State transition function over [`DragSession`].
#[derive(Debug, Clone, Default)]
pub struct DragMachine {
    session: DragSession,
}

impl DragMachine {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub const fn session(&self) -> &DragSession {
        &self.session
    }

    /// Clear the session unconditionally.
    pub fn reset(&mut self) {
        self.session = DragSession::default();
    }

    /// Apply one intent.
    pub fn apply(&mut self, event: &GestureEvent) -> DragEffect {
        match event {
            GestureEvent::Start {
                source,
                modality,
                pointer,
            } => {
                if self.session.active {
                    return DragEffect::Ignored(GestureIgnoredReason::DragAlreadyActive);
                }
                self.session = DragSession {
                    active: true,
                    dragged_id: Some(source.clone()),
                    hover_target_id: None,
                    hover_quadrant: None,
                    modality: Some(*modality),
                    pointer: *pointer,
                };
                DragEffect::Started {
                    source: source.clone(),
                    modality: *modality,
                }
            }
            GestureEvent::Hover {
                target,
                quadrant,
                pointer,
            } => {
                if !self.session.active {
                    return DragEffect::Ignored(GestureIgnoredReason::NoActiveDrag);
                }
                self.session.hover_target_id = Some(target.clone());
                self.session.hover_quadrant = Some(*quadrant);
                if pointer.is_some() {
                    self.session.pointer = *pointer;
                }
                DragEffect::Hovered {
                    target: target.clone(),
                    quadrant: *quadrant,
                }
            }
            GestureEvent::Leave { target } => {
                if !self.session.active {
                    return DragEffect::Ignored(GestureIgnoredReason::NoActiveDrag);
                }
                if self.session.hover_target_id.as_ref() != Some(target) {
                    return DragEffect::Ignored(GestureIgnoredReason::NotHoverTarget);
                }
                self.session.hover_target_id = None;
                self.session.hover_quadrant = None;
                DragEffect::HoverCleared {
                    target: target.clone(),
                }
            }
            GestureEvent::Drop {
                source,
                target,
                quadrant,
            } => {
                if !self.session.active {
                    return DragEffect::Ignored(GestureIgnoredReason::NoActiveDrag);
                }
                if self.session.dragged_id.as_ref() != Some(source) {
                    self.reset();
                    return DragEffect::Ignored(GestureIgnoredReason::SourceMismatch);
                }
                self.reset();
                DragEffect::Dropped {
                    source: source.clone(),
                    target: target.clone(),
                    quadrant: *quadrant,
                }
            }
            GestureEvent::Cancel { reason } => {
                if !self.session.active {
                    return DragEffect::Ignored(GestureIgnoredReason::NoActiveDrag);
                }
                self.reset();
                DragEffect::Cancelled { reason: *reason }
            }
        }
    }
}
