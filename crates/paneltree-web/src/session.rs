#![forbid(unsafe_code)]

//! Session controller: the one object a host talks to.
//!
//! Owns the current tree, the initial tree it resets to, the drag and resize
//! sessions, and both input adapters. Every entry point runs to completion
//! and reports what changed through a [`SessionUpdate`]; the host re-renders
//! when `changed` is set and executes `commands` in order.
//!
//! # Invariants
//!
//! 1. The tree is replaced wholesale on every structural edit or ratio
//!    change, and `generation` increments exactly then.
//! 2. Every `AttachListeners` handed to the host is eventually followed by a
//!    matching `DetachListeners`, on every path including `on_reset`.
//! 3. A drop always clears the drag session, whether or not it edits the tree.

use core::time::Duration;
use std::fmt;

use paneltree_core::geometry::{Point, Rect};
use paneltree_core::input::{InputModality, PointerSample, TouchSample};
use paneltree_layout::{
    LayoutSolution, Node, NodeId, NodeModelError, Quadrant, SplitIdAllocator, solve_layout,
};
use serde::{Deserialize, Serialize};

use crate::command::HostCommand;
use crate::config::{EngineConfig, EngineConfigError};
use crate::gesture::{
    CancelReason, DragEffect, DragMachine, DragSession, GestureDispatch, GestureEvent,
    GestureIgnoredReason, GestureInterpreter, TouchPhase,
};
use crate::render::{Frame, render};
use crate::resize::{ResizeController, ResizeIgnoredReason, ResizeSession};

/// Result of a structural drop.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "outcome", rename_all = "snake_case")]
pub enum DropOutcome {
    /// Tree edited; the dragged panel now shares a new split with the target.
    Applied { split_id: NodeId },
    SelfDrop,
    /// No panel carries the dragged identifier.
    MissingSource,
    /// The target lies inside the dragged subtree.
    TargetInsideSource,
    /// The dragged panel is the whole tree.
    SourceIsRoot,
    /// No panel carries the target identifier once the source is removed.
    MissingTarget,
}

impl DropOutcome {
    #[must_use]
    pub const fn is_applied(&self) -> bool {
        matches!(self, Self::Applied { .. })
    }

    #[must_use]
    pub const fn label(&self) -> &'static str {
        match self {
            Self::Applied { .. } => "applied",
            Self::SelfDrop => "self_drop",
            Self::MissingSource => "missing_source",
            Self::TargetInsideSource => "target_inside_source",
            Self::SourceIsRoot => "source_is_root",
            Self::MissingTarget => "missing_target",
        }
    }
}

/// Why an entry point did nothing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "source", content = "reason", rename_all = "snake_case")]
pub enum IgnoredInput {
    Gesture(GestureIgnoredReason),
    Resize(ResizeIgnoredReason),
}

/// What one entry point did.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct SessionUpdate {
    /// Tree or either session changed; the host should re-render.
    pub changed: bool,
    pub tree_changed: bool,
    pub drop: Option<DropOutcome>,
    pub commands: Vec<HostCommand>,
    /// Host should call `preventDefault()` on the native event.
    pub prevent_default: bool,
    pub ignored: Option<IgnoredInput>,
}

impl SessionUpdate {
    fn ignored(reason: IgnoredInput) -> Self {
        Self {
            ignored: Some(reason),
            ..Self::default()
        }
    }

    fn absorb(&mut self, other: SessionUpdate) {
        self.changed |= other.changed;
        self.tree_changed |= other.tree_changed;
        if other.drop.is_some() {
            self.drop = other.drop;
        }
        self.commands.extend(other.commands);
        self.prevent_default |= other.prevent_default;
        if self.ignored.is_none() {
            self.ignored = other.ignored;
        }
    }
}

/// Construction failure.
#[derive(Debug, Clone, PartialEq)]
pub enum SessionBuildError {
    Layout(NodeModelError),
    Config(EngineConfigError),
}

impl fmt::Display for SessionBuildError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Layout(err) => write!(f, "invalid initial layout: {err}"),
            Self::Config(err) => write!(f, "invalid engine config: {err}"),
        }
    }
}

impl std::error::Error for SessionBuildError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Layout(err) => Some(err),
            Self::Config(err) => Some(err),
        }
    }
}

impl From<NodeModelError> for SessionBuildError {
    fn from(err: NodeModelError) -> Self {
        Self::Layout(err)
    }
}

impl From<EngineConfigError> for SessionBuildError {
    fn from(err: EngineConfigError) -> Self {
        Self::Config(err)
    }
}

/// Owns the layout and every in-flight interaction.
#[derive(Debug, Clone)]
pub struct SessionController {
    config: EngineConfig,
    initial: Node,
    tree: Node,
    drag: DragMachine,
    resize: ResizeController,
    gestures: GestureInterpreter,
    ids: SplitIdAllocator,
    viewport: Rect,
    generation: u64,
}

impl SessionController {
    /// Start a session on `initial` with the default configuration.
    pub fn new(initial: Node) -> Result<Self, NodeModelError> {
        initial.validate()?;
        Ok(Self::build(initial, EngineConfig::default()))
    }

    pub fn with_config(initial: Node, config: EngineConfig) -> Result<Self, SessionBuildError> {
        initial.validate()?;
        config.validate()?;
        Ok(Self::build(initial, config))
    }

    /// Start a session from the JSON layout and optional JSON config a host page embeds.
    pub fn from_json(layout: &str, config: Option<&str>) -> Result<Self, SessionBuildError> {
        let initial = Node::from_json(layout)?;
        let config = match config {
            Some(json) => EngineConfig::from_json(json)?,
            None => EngineConfig::default(),
        };
        Ok(Self::build(initial, config))
    }

    fn build(initial: Node, config: EngineConfig) -> Self {
        Self {
            gestures: GestureInterpreter::new(config.touch),
            ids: SplitIdAllocator::from_tree(&initial),
            tree: initial.clone(),
            initial,
            config,
            drag: DragMachine::new(),
            resize: ResizeController::new(),
            viewport: Rect::default(),
            generation: 0,
        }
    }

    // ── Accessors ───────────────────────────────────────────────────────

    #[must_use]
    pub const fn tree(&self) -> &Node {
        &self.tree
    }

    #[must_use]
    pub const fn initial(&self) -> &Node {
        &self.initial
    }

    #[must_use]
    pub const fn drag_session(&self) -> &DragSession {
        self.drag.session()
    }

    #[must_use]
    pub const fn resize_session(&self) -> &ResizeSession {
        self.resize.session()
    }

    #[must_use]
    pub const fn touch_phase(&self) -> &TouchPhase {
        self.gestures.touch_phase()
    }

    /// Increments on every tree replacement.
    #[must_use]
    pub const fn generation(&self) -> u64 {
        self.generation
    }

    #[must_use]
    pub const fn config(&self) -> &EngineConfig {
        &self.config
    }

    #[must_use]
    pub const fn viewport(&self) -> Rect {
        self.viewport
    }

    /// Record the host container's client rect. Returns whether it changed.
    pub fn set_viewport(&mut self, viewport: Rect) -> bool {
        if self.viewport == viewport {
            return false;
        }
        self.viewport = viewport;
        true
    }

    /// Solve the current tree inside the viewport.
    #[must_use]
    pub fn layout(&self) -> LayoutSolution {
        solve_layout(&self.tree, self.viewport)
    }

    /// Render the current state inside the viewport.
    #[must_use]
    pub fn render(&self) -> Frame {
        render(
            &self.tree,
            self.drag.session(),
            self.resize.session(),
            self.viewport,
            &self.config.render,
        )
    }

    #[must_use]
    pub fn outline(&self) -> String {
        paneltree_layout::outline(&self.tree)
    }

    fn panel_id(&self, id: &str) -> Option<NodeId> {
        self.tree
            .find(id)
            .filter(|node| node.is_panel())
            .map(|node| node.id().clone())
    }

    fn replace_tree(&mut self, next: Node) {
        self.tree = next;
        self.generation += 1;
    }

    // ── Intents ─────────────────────────────────────────────────────────

    /// Apply one intent through the drag machine.
    pub fn apply_gesture(&mut self, event: GestureEvent) -> SessionUpdate {
        let not_a_panel = match &event {
            GestureEvent::Start { source, .. } => !self.tree.find(source.as_str()).is_some_and(Node::is_panel),
            GestureEvent::Hover { target, .. } => !self.tree.find(target.as_str()).is_some_and(Node::is_panel),
            _ => false,
        };
        if not_a_panel {
            tracing::trace!(target: "paneltree.gesture", ?event, "intent names no panel");
            return SessionUpdate::ignored(IgnoredInput::Gesture(GestureIgnoredReason::NotAPanel));
        }

        let before = self.drag.session().clone();
        let mut update = SessionUpdate::default();
        match self.drag.apply(&event) {
            DragEffect::Started { source, modality } => {
                tracing::debug!(
                    target: "paneltree.gesture",
                    source = %source,
                    ?modality,
                    "drag started"
                );
            }
            DragEffect::Dropped {
                source,
                target,
                quadrant,
            } => {
                let outcome = self.perform_drop(source.as_str(), target.as_str(), quadrant);
                update.tree_changed = outcome.is_applied();
                update.drop = Some(outcome);
            }
            DragEffect::Cancelled { reason } => {
                tracing::debug!(target: "paneltree.gesture", ?reason, "drag cancelled");
            }
            DragEffect::Ignored(reason) => {
                tracing::trace!(target: "paneltree.gesture", ?reason, ?event, "intent ignored");
                update.ignored = Some(IgnoredInput::Gesture(reason));
            }
            DragEffect::Hovered { .. } | DragEffect::HoverCleared { .. } => {}
        }
        update.changed = update.tree_changed || self.drag.session() != &before;
        update
    }

    pub fn on_drag_start(&mut self, id: &str, modality: InputModality) -> SessionUpdate {
        self.apply_gesture(GestureEvent::Start {
            source: NodeId::from(id),
            modality,
            pointer: None,
        })
    }

    pub fn on_hover(&mut self, target: &str, quadrant: Quadrant) -> SessionUpdate {
        self.apply_gesture(GestureEvent::Hover {
            target: NodeId::from(target),
            quadrant,
            pointer: None,
        })
    }

    pub fn on_leave(&mut self, target: &str) -> SessionUpdate {
        self.apply_gesture(GestureEvent::Leave {
            target: NodeId::from(target),
        })
    }

    /// Move `dragged` next to `target`.
    ///
    /// Removes the dragged subtree first, then looks the target up again in
    /// the reduced tree before inserting. Clears the drag session whatever
    /// the outcome.
    pub fn on_drop(&mut self, dragged: &str, target: &str, quadrant: Quadrant) -> SessionUpdate {
        let before = self.drag.session().clone();
        let outcome = self.perform_drop(dragged, target, quadrant);
        self.drag.reset();
        let tree_changed = outcome.is_applied();
        SessionUpdate {
            changed: tree_changed || self.drag.session() != &before,
            tree_changed,
            drop: Some(outcome),
            ..SessionUpdate::default()
        }
    }

    pub fn on_drag_end(&mut self) -> SessionUpdate {
        self.apply_gesture(GestureEvent::Cancel {
            reason: CancelReason::Released,
        })
    }

    /// Set a split's ratio (clamped). No-op for unknown ids and non-finite ratios.
    pub fn on_resize(&mut self, split_id: &str, ratio: f64) -> SessionUpdate {
        let next = self.tree.update_ratio(split_id, ratio);
        if next == self.tree {
            return SessionUpdate::default();
        }
        self.replace_tree(next);
        tracing::trace!(
            target: "paneltree.session",
            split_id,
            ratio,
            generation = self.generation,
            "split ratio updated"
        );
        SessionUpdate {
            changed: true,
            tree_changed: true,
            ..SessionUpdate::default()
        }
    }

    /// Restore the initial layout and abandon every in-flight interaction.
    pub fn on_reset(&mut self) -> SessionUpdate {
        let mut update = SessionUpdate::default();
        update.commands.extend(self.gestures.reset());
        update.commands.extend(self.resize.end());
        if self.drag.session().active {
            tracing::debug!(
                target: "paneltree.gesture",
                reason = ?CancelReason::Reset,
                "drag cancelled"
            );
            self.drag.reset();
            update.changed = true;
        }
        if self.tree != self.initial {
            self.replace_tree(self.initial.clone());
            update.tree_changed = true;
        }
        update.changed |= update.tree_changed || !update.commands.is_empty();
        tracing::debug!(
            target: "paneltree.session",
            generation = self.generation,
            released = update.commands.len(),
            "layout reset"
        );
        update
    }

    fn perform_drop(&mut self, dragged: &str, target: &str, quadrant: Quadrant) -> DropOutcome {
        let outcome = self.try_drop(dragged, target, quadrant);
        match &outcome {
            DropOutcome::Applied { split_id } => tracing::debug!(
                target: "paneltree.session",
                dragged,
                target_id = target,
                %quadrant,
                split_id = %split_id,
                generation = self.generation,
                "drop applied"
            ),
            other => tracing::debug!(
                target: "paneltree.session",
                dragged,
                target_id = target,
                %quadrant,
                reason = other.label(),
                "drop ignored"
            ),
        }
        outcome
    }

    fn try_drop(&mut self, dragged: &str, target: &str, quadrant: Quadrant) -> DropOutcome {
        if dragged == target {
            return DropOutcome::SelfDrop;
        }
        if self.tree.is_ancestor_of(dragged, target) {
            return DropOutcome::TargetInsideSource;
        }
        let Some(source) = self.tree.find(dragged).filter(|node| node.is_panel()).cloned() else {
            return DropOutcome::MissingSource;
        };
        let Some(without) = self.tree.remove(dragged) else {
            return DropOutcome::SourceIsRoot;
        };
        if !without.find(target).is_some_and(Node::is_panel) {
            return DropOutcome::MissingTarget;
        }
        let split_id = self.ids.allocate(&without);
        let next = without.insert_as_split(target, source, quadrant, split_id.clone());
        self.replace_tree(next);
        DropOutcome::Applied { split_id }
    }

    fn dispatch(&mut self, dispatch: GestureDispatch) -> SessionUpdate {
        let mut update = SessionUpdate {
            changed: false,
            tree_changed: false,
            drop: None,
            commands: dispatch.commands,
            prevent_default: dispatch.prevent_default,
            ignored: dispatch.ignored.map(IgnoredInput::Gesture),
        };
        for event in dispatch.events {
            let applied = self.apply_gesture(event);
            update.absorb(applied);
        }
        update
    }

    // ── Mouse drag-and-drop ─────────────────────────────────────────────

    pub fn mouse_drag_start(&mut self, id: &str, pointer: Option<PointerSample>) -> SessionUpdate {
        let Some(source) = self.panel_id(id) else {
            return SessionUpdate::ignored(IgnoredInput::Gesture(GestureIgnoredReason::NotAPanel));
        };
        let dispatch = self
            .gestures
            .mouse_drag_start(self.drag.session(), &source, pointer);
        self.dispatch(dispatch)
    }

    /// `bounds` is the hovered panel's client rect.
    pub fn mouse_drag_over(
        &mut self,
        target: &str,
        bounds: Rect,
        pointer: PointerSample,
    ) -> SessionUpdate {
        let Some(target) = self.panel_id(target) else {
            return SessionUpdate::ignored(IgnoredInput::Gesture(GestureIgnoredReason::NotAPanel));
        };
        let dispatch = self
            .gestures
            .mouse_drag_over(self.drag.session(), &target, bounds, pointer);
        self.dispatch(dispatch)
    }

    pub fn mouse_drag_leave(&mut self, target: &str) -> SessionUpdate {
        let target = NodeId::from(target);
        let dispatch = self.gestures.mouse_drag_leave(self.drag.session(), &target);
        self.dispatch(dispatch)
    }

    pub fn mouse_drop(&mut self) -> SessionUpdate {
        let dispatch = self.gestures.mouse_drop(self.drag.session());
        self.dispatch(dispatch)
    }

    pub fn mouse_drag_end(&mut self) -> SessionUpdate {
        let dispatch = self.gestures.mouse_drag_end(self.drag.session());
        self.dispatch(dispatch)
    }

    // ── Touch long-press drag ───────────────────────────────────────────

    pub fn touch_start(&mut self, panel: &str, sample: TouchSample) -> SessionUpdate {
        let Some(panel) = self.panel_id(panel) else {
            return SessionUpdate::ignored(IgnoredInput::Gesture(GestureIgnoredReason::NotAPanel));
        };
        let dispatch = self
            .gestures
            .touch_start(self.drag.session(), &panel, sample);
        self.dispatch(dispatch)
    }

    pub fn touch_move(&mut self, sample: TouchSample) -> SessionUpdate {
        let layout = self.layout();
        let dispatch = self
            .gestures
            .touch_move(self.drag.session(), &layout, sample);
        self.dispatch(dispatch)
    }

    /// Host timer callback for a `ScheduleLongPress` deadline.
    pub fn touch_tick(&mut self, now: Duration) -> SessionUpdate {
        let dispatch = self.gestures.touch_tick(self.drag.session(), now);
        self.dispatch(dispatch)
    }

    pub fn touch_end(&mut self, sample: TouchSample) -> SessionUpdate {
        let dispatch = self.gestures.touch_end(self.drag.session(), sample);
        self.dispatch(dispatch)
    }

    pub fn touch_cancel(&mut self, touch_id: u32) -> SessionUpdate {
        let dispatch = self.gestures.touch_cancel(self.drag.session(), touch_id);
        self.dispatch(dispatch)
    }

    // ── Divider resize ──────────────────────────────────────────────────

    /// Pointer-down on a divider; container bounds come from the solved layout.
    pub fn divider_pointer_down(&mut self, split_id: &str) -> SessionUpdate {
        let layout = self.layout();
        let Some(divider) = layout.divider(split_id) else {
            return SessionUpdate::ignored(IgnoredInput::Resize(ResizeIgnoredReason::UnknownSplit));
        };
        let (id, orientation, container) =
            (divider.split_id.clone(), divider.orientation, divider.container);
        self.begin_resize(&id, orientation, container)
    }

    /// Pointer-down on a divider whose container rect the host measured itself.
    pub fn divider_pointer_down_within(&mut self, split_id: &str, container: Rect) -> SessionUpdate {
        let Some(split) = self.tree.find(split_id).and_then(Node::as_split) else {
            return SessionUpdate::ignored(IgnoredInput::Resize(ResizeIgnoredReason::UnknownSplit));
        };
        let (id, orientation) = (split.id.clone(), split.orientation);
        self.begin_resize(&id, orientation, container)
    }

    fn begin_resize(
        &mut self,
        split_id: &NodeId,
        orientation: paneltree_layout::Orientation,
        container: Rect,
    ) -> SessionUpdate {
        match self.resize.begin(split_id, orientation, container) {
            Ok(commands) => SessionUpdate {
                changed: true,
                commands,
                prevent_default: true,
                ..SessionUpdate::default()
            },
            Err(reason) => SessionUpdate::ignored(IgnoredInput::Resize(reason)),
        }
    }

    pub fn divider_pointer_move(&mut self, pointer: Point) -> SessionUpdate {
        if !self.resize.session().active {
            return SessionUpdate::ignored(IgnoredInput::Resize(ResizeIgnoredReason::NotResizing));
        }
        match self.resize.update(pointer) {
            Some((split_id, ratio)) => self.on_resize(split_id.as_str(), ratio),
            None => SessionUpdate::default(),
        }
    }

    pub fn divider_pointer_up(&mut self) -> SessionUpdate {
        self.end_resize()
    }

    /// Pointer cancel or window blur during a divider drag.
    pub fn divider_pointer_cancel(&mut self) -> SessionUpdate {
        self.end_resize()
    }

    fn end_resize(&mut self) -> SessionUpdate {
        let commands = self.resize.end();
        if commands.is_empty() {
            return SessionUpdate::ignored(IgnoredInput::Resize(ResizeIgnoredReason::NotResizing));
        }
        SessionUpdate {
            changed: true,
            commands,
            ..SessionUpdate::default()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use paneltree_layout::Orientation;
    use std::collections::HashMap;
    use std::sync::{Arc, Mutex};
    use tracing_subscriber::layer::SubscriberExt;
    use tracing_subscriber::registry::LookupSpan;

    fn two_panels() -> Node {
        Node::split(
            "split-1",
            Orientation::Vertical,
            0.5,
            Node::panel("a"),
            Node::panel("b"),
        )
    }

    fn session() -> SessionController {
        let mut session = SessionController::new(two_panels()).expect("valid layout");
        session.set_viewport(Rect::from_size(400.0, 200.0));
        session
    }

    #[test]
    fn drop_right_swaps_into_new_split() {
        let mut session = session();
        session.on_drag_start("a", InputModality::Mouse);
        session.on_hover("b", Quadrant::Right);
        let update = session.on_drop("a", "b", Quadrant::Right);
        let Some(DropOutcome::Applied { split_id }) = update.drop else {
            panic!("expected applied drop, got {:?}", update.drop);
        };
        assert_eq!(
            session.tree(),
            &Node::split(
                split_id,
                Orientation::Vertical,
                0.5,
                Node::panel("b"),
                Node::panel("a")
            )
        );
        assert!(update.tree_changed);
        assert_eq!(session.generation(), 1);
        assert_eq!(session.drag_session(), &DragSession::default());
    }

    #[test]
    fn drop_naming_other_source_clears_session() {
        let mut session = session();
        session.on_drag_start("a", InputModality::Mouse);
        let update = session.apply_gesture(GestureEvent::Drop {
            source: NodeId::from("b"),
            target: NodeId::from("a"),
            quadrant: Quadrant::Left,
        });
        assert_eq!(
            update.ignored,
            Some(IgnoredInput::Gesture(GestureIgnoredReason::SourceMismatch))
        );
        assert!(update.changed);
        assert!(!update.tree_changed);
        assert_eq!(session.generation(), 0);
        assert_eq!(session.drag_session(), &DragSession::default());
    }

    #[test]
    fn self_drop_is_noop_and_clears_session() {
        let mut session = session();
        session.on_drag_start("a", InputModality::Mouse);
        let update = session.on_drop("a", "a", Quadrant::Left);
        assert_eq!(update.drop, Some(DropOutcome::SelfDrop));
        assert!(!update.tree_changed);
        assert!(update.changed);
        assert_eq!(session.tree(), &two_panels());
        assert_eq!(session.generation(), 0);
        assert!(!session.drag_session().active);
    }

    #[test]
    fn drop_outcomes_for_missing_nodes() {
        let mut session = session();
        assert_eq!(
            session.on_drop("zz", "b", Quadrant::Top).drop,
            Some(DropOutcome::MissingSource)
        );
        assert_eq!(
            session.on_drop("a", "zz", Quadrant::Top).drop,
            Some(DropOutcome::MissingTarget)
        );
        assert_eq!(
            session.on_drop("a", "split-1", Quadrant::Top).drop,
            Some(DropOutcome::MissingTarget)
        );
        assert_eq!(session.tree(), &two_panels());

        let mut solo = SessionController::new(Node::panel("only")).expect("valid");
        assert_eq!(
            solo.on_drop("only", "other", Quadrant::Top).drop,
            Some(DropOutcome::SourceIsRoot)
        );
    }

    #[test]
    fn drop_into_own_subtree_is_refused() {
        let mut session = SessionController::new(Node::split(
            "root",
            Orientation::Vertical,
            0.5,
            Node::panel("a"),
            Node::split(
                "inner",
                Orientation::Horizontal,
                0.5,
                Node::panel("b"),
                Node::panel("c"),
            ),
        ))
        .expect("valid layout");
        let before = session.tree().clone();
        let update = session.on_drop("inner", "c", Quadrant::Left);
        assert_eq!(update.drop, Some(DropOutcome::TargetInsideSource));
        assert!(!update.tree_changed);
        assert_eq!(session.tree(), &before);
        assert_eq!(session.generation(), 0);
    }

    #[test]
    fn drop_succeeds_when_split_counter_is_exhausted() {
        let top = format!("split-{}", u64::MAX);
        let mut session = SessionController::new(Node::split(
            top.as_str(),
            Orientation::Vertical,
            0.5,
            Node::panel("a"),
            Node::split(
                "split-1",
                Orientation::Horizontal,
                0.5,
                Node::panel("b"),
                Node::panel("c"),
            ),
        ))
        .expect("valid layout");
        let update = session.on_drop("b", "a", Quadrant::Top);
        assert_eq!(
            update.drop,
            Some(DropOutcome::Applied {
                split_id: NodeId::from("split-1")
            })
        );
        assert!(session.tree().contains(&top));
        assert!(session.tree().validate().is_ok());
    }

    #[test]
    fn split_nodes_cannot_be_dragged() {
        let mut session = session();
        let update = session.on_drag_start("split-1", InputModality::Mouse);
        assert_eq!(
            update.ignored,
            Some(IgnoredInput::Gesture(GestureIgnoredReason::NotAPanel))
        );
        assert!(!session.drag_session().active);
    }

    #[test]
    fn fresh_split_ids_never_collide() {
        let mut session = session();
        session.on_drop("a", "b", Quadrant::Bottom);
        session.on_drop("b", "a", Quadrant::Left);
        assert!(session.tree().validate().is_ok());
        assert_eq!(session.tree().panel_count(), 2);
        assert_eq!(session.generation(), 2);
    }

    #[test]
    fn resize_through_divider_updates_ratio() {
        let mut session = session();
        let down = session.divider_pointer_down("split-1");
        assert!(down.ignored.is_none());
        let moved = session.divider_pointer_move(Point::new(100.0, 10.0));
        assert!(moved.tree_changed);
        let ratio = session.tree().as_split().map(|s| s.ratio.get());
        assert_eq!(ratio, Some(0.25));
        let clamped = session.divider_pointer_move(Point::new(399.0, 10.0));
        assert!(clamped.tree_changed);
        assert_eq!(
            session.tree().as_split().map(|s| s.ratio.get()),
            Some(paneltree_layout::MAX_SPLIT_RATIO)
        );
        let up = session.divider_pointer_up();
        assert_eq!(
            up.commands,
            vec![
                HostCommand::detach(crate::command::ListenerScope::Resize),
                HostCommand::ResetCursor
            ]
        );
        assert!(!session.resize_session().active);
    }

    #[test]
    fn resize_of_unknown_split_is_ignored() {
        let mut session = session();
        assert_eq!(
            session.divider_pointer_down("nope").ignored,
            Some(IgnoredInput::Resize(ResizeIgnoredReason::UnknownSplit))
        );
        assert_eq!(
            session.divider_pointer_move(Point::new(1.0, 1.0)).ignored,
            Some(IgnoredInput::Resize(ResizeIgnoredReason::NotResizing))
        );
    }

    #[test]
    fn reset_restores_initial_and_releases_everything() {
        let mut session = session();
        session.on_drop("a", "b", Quadrant::Top);
        session.divider_pointer_down_within("split-2", Rect::from_size(10.0, 10.0));
        session.touch_start(
            "a",
            TouchSample::new(1, Point::new(5.0, 5.0), Duration::ZERO),
        );
        let update = session.on_reset();
        assert!(update.tree_changed);
        assert_eq!(session.tree(), &two_panels());
        assert_eq!(session.tree(), session.initial());
        assert!(!session.resize_session().active);
        assert_eq!(session.touch_phase(), &TouchPhase::Idle);
        let detaches = update
            .commands
            .iter()
            .filter(|c| matches!(c, HostCommand::DetachListeners { .. }))
            .count();
        assert_eq!(detaches, 2);
    }

    #[test]
    fn build_errors_chain_sources() {
        let bad = Node::split(
            "x",
            Orientation::Vertical,
            0.5,
            Node::panel("x"),
            Node::panel("y"),
        );
        let err = SessionController::with_config(bad, EngineConfig::default())
            .expect_err("duplicate id");
        assert!(matches!(err, SessionBuildError::Layout(_)));
        assert!(std::error::Error::source(&err).is_some());
        assert!(err.to_string().starts_with("invalid initial layout"));

        let err = SessionController::from_json(
            r#"{"type":"panel","id":"p"}"#,
            Some(r#"{"render":{"ghost_scale":0}}"#),
        )
        .expect_err("bad config");
        assert!(matches!(err, SessionBuildError::Config(_)));
    }

    // ── Tracing capture ─────────────────────────────────────────────────

    #[derive(Debug, Clone)]
    struct CapturedEvent {
        level: tracing::Level,
        target: String,
        fields: HashMap<String, String>,
    }

    struct EventCapture {
        events: Arc<Mutex<Vec<CapturedEvent>>>,
    }

    struct FieldVisitor(Vec<(String, String)>);

    impl tracing::field::Visit for FieldVisitor {
        fn record_debug(&mut self, field: &tracing::field::Field, value: &dyn std::fmt::Debug) {
            self.0.push((field.name().to_string(), format!("{value:?}")));
        }
        fn record_str(&mut self, field: &tracing::field::Field, value: &str) {
            self.0.push((field.name().to_string(), value.to_string()));
        }
        fn record_u64(&mut self, field: &tracing::field::Field, value: u64) {
            self.0.push((field.name().to_string(), value.to_string()));
        }
    }

    impl<S> tracing_subscriber::Layer<S> for EventCapture
    where
        S: tracing::Subscriber + for<'a> LookupSpan<'a>,
    {
        fn on_event(
            &self,
            event: &tracing::Event<'_>,
            _ctx: tracing_subscriber::layer::Context<'_, S>,
        ) {
            let mut visitor = FieldVisitor(Vec::new());
            event.record(&mut visitor);
            self.events.lock().unwrap().push(CapturedEvent {
                level: *event.metadata().level(),
                target: event.metadata().target().to_string(),
                fields: visitor.0.into_iter().collect(),
            });
        }
    }

    fn with_captured_tracing<F>(f: F) -> Vec<CapturedEvent>
    where
        F: FnOnce(),
    {
        let events = Arc::new(Mutex::new(Vec::new()));
        let layer = EventCapture {
            events: events.clone(),
        };
        let subscriber = tracing_subscriber::registry().with(layer);
        tracing::subscriber::with_default(subscriber, f);
        let captured = events.lock().unwrap().clone();
        captured
    }

    #[test]
    fn drops_are_logged_with_outcome() {
        let events = with_captured_tracing(|| {
            let mut session = session();
            session.on_drop("a", "b", Quadrant::Right);
            session.on_drop("a", "a", Quadrant::Right);
        });
        let drops: Vec<_> = events
            .iter()
            .filter(|e| e.target == "paneltree.session")
            .collect();
        assert_eq!(drops.len(), 2);
        assert_eq!(drops[0].level, tracing::Level::DEBUG);
        assert_eq!(drops[0].fields.get("message").map(String::as_str), Some("drop applied"));
        assert_eq!(drops[1].fields.get("reason").map(String::as_str), Some("self_drop"));
    }

    #[test]
    fn ignored_gestures_are_traced() {
        let events = with_captured_tracing(|| {
            let mut session = session();
            session.on_hover("b", Quadrant::Left);
        });
        assert!(events.iter().any(|e| e.target == "paneltree.gesture"
            && e.level == tracing::Level::TRACE
            && e.fields.get("reason").is_some_and(|r| r == "NoActiveDrag")));
    }
}
