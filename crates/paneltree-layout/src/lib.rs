#![forbid(unsafe_code)]

//! Layout: the split tree and its geometry.
//!
//! # Role in paneltree
//! `paneltree-layout` owns the layout model. It defines the binary tree of
//! panels and splits, the pure structural edits a drop or resize performs,
//! drop-quadrant inference, and the solver that turns a tree plus an area
//! into rectangles.
//!
//! # How it fits in the system
//! Nothing here holds state across calls. The interaction layer in
//! `paneltree-web` keeps the current tree and asks this crate for a new one
//! on every committed edit.

pub mod ids;
pub mod outline;
pub mod quadrant;
pub mod solve;
pub mod tree;

pub use ids::SplitIdAllocator;
pub use outline::{outline, write_outline};
pub use quadrant::Quadrant;
pub use solve::{DividerGeometry, LayoutSolution, solve_layout, split_area};
pub use tree::{
    DEFAULT_SPLIT_RATIO, MAX_SPLIT_RATIO, MIN_SPLIT_RATIO, Node, NodeId, NodeModelError,
    Orientation, PanelNode, SplitNode, SplitRatio,
};

pub use paneltree_core::geometry::{Point, Rect};
