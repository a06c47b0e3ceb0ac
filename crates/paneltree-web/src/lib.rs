#![forbid(unsafe_code)]

//! Web-host interaction layer for paneltree.
//!
//! # Role in paneltree
//! `paneltree-web` turns a host page's native mouse, touch, and pointer
//! events into edits of a `paneltree-layout` tree. It holds the only mutable
//! state in the engine: one [`SessionController`] per embedded layout.
//!
//! # Design
//! The crate is host-driven and deterministic. It never reads a clock, never
//! touches the DOM, and never installs a logging subscriber. Hosts pass
//! timestamps in, execute returned [`HostCommand`]s, and paint the returned
//! [`Frame`]. Replaying the same input sequence always yields the same tree.

pub mod command;
pub mod config;
pub mod gesture;
pub mod render;
pub mod resize;
pub mod session;

pub use command::{CursorHint, HostCommand, ListenerScope};
pub use config::{EngineConfig, EngineConfigError, LongPressConfig, RenderConfig};
pub use gesture::{
    CancelReason, DragEffect, DragMachine, DragSession, GestureDispatch, GestureEvent,
    GestureIgnoredReason, GestureInterpreter, MouseDragAdapter, TouchDragAdapter, TouchPhase,
};
pub use render::{DividerView, Frame, PanelView, PanelVisual, RenderItem, render};
pub use resize::{ResizeController, ResizeIgnoredReason, ResizeSession, ratio_for_pointer};
pub use session::{DropOutcome, IgnoredInput, SessionBuildError, SessionController, SessionUpdate};
