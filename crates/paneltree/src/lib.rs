#![forbid(unsafe_code)]

//! paneltree public facade crate.
//!
//! Re-exports the types a host page needs from the internal crates, a
//! lightweight prelude, and the sample layout the demo page mounts.

use std::fmt;

// --- Core re-exports -------------------------------------------------------

pub use paneltree_core::geometry::{Point, Rect};
pub use paneltree_core::input::{InputModality, PointerSample, TouchSample};

// --- Layout re-exports -----------------------------------------------------

pub use paneltree_layout::{
    LayoutSolution, Node, NodeId, NodeModelError, Orientation, Quadrant, SplitIdAllocator,
    SplitRatio, outline, solve_layout,
};

// --- Web re-exports --------------------------------------------------------

pub use paneltree_web::{
    CursorHint, DropOutcome, EngineConfig, EngineConfigError, Frame, HostCommand, ListenerScope,
    RenderItem, SessionBuildError, SessionController, SessionUpdate,
};

// --- Errors ---------------------------------------------------------------

/// Top-level error type for paneltree hosts.
#[derive(Debug, Clone, PartialEq)]
pub enum Error {
    /// The initial layout failed to parse or validate.
    Layout(NodeModelError),
    /// The engine configuration failed to parse or validate.
    Config(EngineConfigError),
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Layout(err) => write!(f, "{err}"),
            Self::Config(err) => write!(f, "{err}"),
        }
    }
}

impl std::error::Error for Error {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Layout(err) => Some(err),
            Self::Config(err) => Some(err),
        }
    }
}

impl From<NodeModelError> for Error {
    fn from(err: NodeModelError) -> Self {
        Self::Layout(err)
    }
}

impl From<EngineConfigError> for Error {
    fn from(err: EngineConfigError) -> Self {
        Self::Config(err)
    }
}

impl From<SessionBuildError> for Error {
    fn from(err: SessionBuildError) -> Self {
        match err {
            SessionBuildError::Layout(err) => Self::Layout(err),
            SessionBuildError::Config(err) => Self::Config(err),
        }
    }
}

/// Standard result type for paneltree APIs.
pub type Result<T> = std::result::Result<T, Error>;

// --- Mounting -------------------------------------------------------------

/// Four panels: one on the left, and on the right a side-by-side pair
/// stacked above a fourth panel.
///
/// ```text
/// split-1 (vertical)
/// ├── panel-1
/// └── split-2 (horizontal)
///     ├── split-3 (vertical)
///     │   ├── panel-2
///     │   └── panel-3
///     └── panel-4
/// ```
#[must_use]
pub fn sample_layout() -> Node {
    Node::split(
        "split-1",
        Orientation::Vertical,
        0.5,
        Node::panel("panel-1"),
        Node::split(
            "split-2",
            Orientation::Horizontal,
            0.5,
            Node::split(
                "split-3",
                Orientation::Vertical,
                0.5,
                Node::panel("panel-2"),
                Node::panel("panel-3"),
            ),
            Node::panel("panel-4"),
        ),
    )
}

/// Build a session from the JSON a host page embeds.
pub fn mount(layout: &str, config: Option<&str>) -> Result<SessionController> {
    Ok(SessionController::from_json(layout, config)?)
}

/// A session on [`sample_layout`] sized to `viewport`.
pub fn sample_session(viewport: Rect) -> Result<SessionController> {
    let mut session = SessionController::new(sample_layout())?;
    session.set_viewport(viewport);
    Ok(session)
}

// --- Prelude --------------------------------------------------------------

pub mod prelude {
    pub use crate::{
        Error, Frame, HostCommand, InputModality, Node, NodeId, Orientation, Point, PointerSample,
        Quadrant, Rect, RenderItem, Result, SessionController, SessionUpdate, TouchSample,
    };

    pub use crate::{core, layout, web};
}

pub use paneltree_core as core;
pub use paneltree_layout as layout;
pub use paneltree_web as web;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn sample_layout_is_valid() {
        let tree = sample_layout();
        assert!(tree.validate().is_ok());
        assert_eq!(tree.panel_count(), 4);
        assert_eq!(tree.node_count(), 7);
    }

    #[test]
    fn mount_errors_flatten() {
        let err = mount("{", None).expect_err("malformed layout");
        assert!(matches!(err, Error::Layout(NodeModelError::Parse { .. })));
        let err = mount(
            r#"{"type":"panel","id":"p"}"#,
            Some(r#"{"touch":{"delay_ms":0}}"#),
        )
        .expect_err("zero delay");
        assert_eq!(err, Error::Config(EngineConfigError::ZeroLongPressDelay));
    }
}
