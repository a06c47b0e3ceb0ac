#![forbid(unsafe_code)]

//! Binary split-tree model.
//!
//! A layout is a strict tree of [`Node`]s: panels at the leaves, splits in
//! between. This module focuses on:
//!
//! - Exclusive ownership: every split owns its two children through `Box`, so
//!   a subtree can never be aliased under two parents and a split with a
//!   missing child cannot be represented.
//! - Immutable updates: every structural operation borrows the current tree
//!   and returns a new one. Callers swap the whole value in one step.
//! - Silent no-ops: unknown identifiers leave the tree unchanged rather than
//!   erroring, because every identifier reaching these operations comes from
//!   live geometry.

use std::borrow::Borrow;
use std::fmt;

use rustc_hash::FxHashSet;
use serde::{Deserialize, Serialize};

use crate::quadrant::Quadrant;

/// Smallest ratio a split may hold.
pub const MIN_SPLIT_RATIO: f64 = 0.1;

/// Largest ratio a split may hold.
pub const MAX_SPLIT_RATIO: f64 = 0.9;

/// Ratio given to freshly created splits.
pub const DEFAULT_SPLIT_RATIO: f64 = 0.5;

/// Host-chosen node identifier.
///
/// Uniqueness within one tree is the caller's responsibility; [`Node::validate`]
/// reports collisions.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct NodeId(String);

impl NodeId {
    #[must_use]
    pub fn new(raw: impl Into<String>) -> Self {
        Self(raw.into())
    }

    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for NodeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for NodeId {
    fn from(raw: &str) -> Self {
        Self(raw.to_owned())
    }
}

impl From<String> for NodeId {
    fn from(raw: String) -> Self {
        Self(raw)
    }
}

impl AsRef<str> for NodeId {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl Borrow<str> for NodeId {
    fn borrow(&self) -> &str {
        &self.0
    }
}

impl PartialEq<str> for NodeId {
    fn eq(&self, other: &str) -> bool {
        self.0 == other
    }
}

impl PartialEq<&str> for NodeId {
    fn eq(&self, other: &&str) -> bool {
        self.0 == *other
    }
}

/// Orientation of a split node.
///
/// Named after the divider, not the children: a `Vertical` split has a
/// vertical divider with its children side by side.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Orientation {
    /// Children stack top/bottom.
    #[serde(alias = "H")]
    Horizontal,
    /// Children sit left/right.
    #[serde(alias = "W")]
    Vertical,
}

impl Orientation {
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::Horizontal => "horizontal",
            Self::Vertical => "vertical",
        }
    }
}

impl fmt::Display for Orientation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Fraction of a split's extent allocated to its first child.
///
/// Always within `[MIN_SPLIT_RATIO, MAX_SPLIT_RATIO]`; construction clamps,
/// and non-finite input falls back to [`DEFAULT_SPLIT_RATIO`].
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Serialize, Deserialize)]
#[serde(from = "f64", into = "f64")]
pub struct SplitRatio(f64);

impl SplitRatio {
    #[must_use]
    pub fn new(value: f64) -> Self {
        if !value.is_finite() {
            return Self::default();
        }
        Self(value.clamp(MIN_SPLIT_RATIO, MAX_SPLIT_RATIO))
    }

    #[must_use]
    pub const fn get(self) -> f64 {
        self.0
    }
}

impl Default for SplitRatio {
    fn default() -> Self {
        Self(DEFAULT_SPLIT_RATIO)
    }
}

impl From<f64> for SplitRatio {
    fn from(value: f64) -> Self {
        Self::new(value)
    }
}

impl From<SplitRatio> for f64 {
    fn from(ratio: SplitRatio) -> Self {
        ratio.0
    }
}

/// Leaf region.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PanelNode {
    pub id: NodeId,
}

/// Internal region dividing its extent between exactly two children.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SplitNode {
    pub id: NodeId,
    pub orientation: Orientation,
    #[serde(default)]
    pub ratio: SplitRatio,
    pub left: Box<Node>,
    pub right: Box<Node>,
}

impl SplitNode {
    #[must_use]
    pub fn new(
        id: impl Into<NodeId>,
        orientation: Orientation,
        ratio: f64,
        left: Node,
        right: Node,
    ) -> Self {
        Self {
            id: id.into(),
            orientation,
            ratio: SplitRatio::new(ratio),
            left: Box::new(left),
            right: Box::new(right),
        }
    }

    /// Build the split a drop creates around `existing`.
    ///
    /// Left/Top quadrants put `incoming` first; the quadrant also picks the
    /// orientation. The ratio starts at [`DEFAULT_SPLIT_RATIO`].
    #[must_use]
    pub fn around(id: NodeId, existing: Node, incoming: Node, quadrant: Quadrant) -> Self {
        let (left, right) = if quadrant.incoming_first() {
            (incoming, existing)
        } else {
            (existing, incoming)
        };
        Self::new(id, quadrant.orientation(), DEFAULT_SPLIT_RATIO, left, right)
    }

    fn with_children(&self, left: Node, right: Node) -> Self {
        Self {
            id: self.id.clone(),
            orientation: self.orientation,
            ratio: self.ratio,
            left: Box::new(left),
            right: Box::new(right),
        }
    }
}

/// One node of the layout tree.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum Node {
    Panel(PanelNode),
    Split(SplitNode),
}

impl Node {
    /// Construct a panel.
    #[must_use]
    pub fn panel(id: impl Into<NodeId>) -> Self {
        Self::Panel(PanelNode { id: id.into() })
    }

    /// Construct a split; `ratio` is clamped.
    #[must_use]
    pub fn split(
        id: impl Into<NodeId>,
        orientation: Orientation,
        ratio: f64,
        left: Node,
        right: Node,
    ) -> Self {
        Self::Split(SplitNode::new(id, orientation, ratio, left, right))
    }

    #[must_use]
    pub fn id(&self) -> &NodeId {
        match self {
            Self::Panel(panel) => &panel.id,
            Self::Split(split) => &split.id,
        }
    }

    #[must_use]
    pub const fn is_panel(&self) -> bool {
        matches!(self, Self::Panel(_))
    }

    #[must_use]
    pub const fn as_split(&self) -> Option<&SplitNode> {
        match self {
            Self::Split(split) => Some(split),
            Self::Panel(_) => None,
        }
    }

    /// Pre-order search; returns the first node carrying `id`.
    #[must_use]
    pub fn find(&self, id: &str) -> Option<&Node> {
        if self.id() == id {
            return Some(self);
        }
        match self {
            Self::Panel(_) => None,
            Self::Split(split) => split.left.find(id).or_else(|| split.right.find(id)),
        }
    }

    #[must_use]
    pub fn contains(&self, id: &str) -> bool {
        self.find(id).is_some()
    }

    /// Return a tree without the subtree identified by `id`.
    ///
    /// The split that held the removed node collapses into its other child.
    /// Removing the root yields `None`; an unknown `id` yields an unchanged
    /// copy.
    #[must_use]
    pub fn remove(&self, id: &str) -> Option<Node> {
        if self.id() == id {
            return None;
        }
        Some(self.without(id))
    }

    fn without(&self, id: &str) -> Node {
        match self {
            Self::Panel(_) => self.clone(),
            Self::Split(split) => {
                if split.left.id() == id {
                    return (*split.right).clone();
                }
                if split.right.id() == id {
                    return (*split.left).clone();
                }
                Self::Split(split.with_children(split.left.without(id), split.right.without(id)))
            }
        }
    }

    /// Return a tree with the first node carrying `id` swapped for
    /// `replacement`. Unknown `id` yields an unchanged copy.
    #[must_use]
    pub fn replace(&self, id: &str, replacement: Node) -> Node {
        let mut replacement = Some(replacement);
        self.replace_first(id, &mut replacement)
    }

    fn replace_first(&self, id: &str, replacement: &mut Option<Node>) -> Node {
        if self.id() == id
            && let Some(node) = replacement.take()
        {
            return node;
        }
        match self {
            Self::Panel(_) => self.clone(),
            Self::Split(split) => {
                let left = split.left.replace_first(id, replacement);
                let right = split.right.replace_first(id, replacement);
                Self::Split(split.with_children(left, right))
            }
        }
    }

    /// Replace the target with a new split holding the target and
    /// `new_sibling`, arranged by `quadrant`.
    ///
    /// Unknown `target_id` yields an unchanged copy.
    #[must_use]
    pub fn insert_as_split(
        &self,
        target_id: &str,
        new_sibling: Node,
        quadrant: Quadrant,
        split_id: NodeId,
    ) -> Node {
        let Some(target) = self.find(target_id) else {
            return self.clone();
        };
        let split = SplitNode::around(split_id, target.clone(), new_sibling, quadrant);
        self.replace(target_id, Self::Split(split))
    }

    /// Return a tree whose split `split_id` holds the clamped `ratio`.
    ///
    /// No-op when `split_id` is not a split or `ratio` is not finite.
    #[must_use]
    pub fn update_ratio(&self, split_id: &str, ratio: f64) -> Node {
        if !ratio.is_finite() {
            return self.clone();
        }
        match self.find(split_id) {
            Some(Self::Split(split)) => {
                let mut updated = split.clone();
                updated.ratio = SplitRatio::new(ratio);
                self.replace(split_id, Self::Split(updated))
            }
            _ => self.clone(),
        }
    }

    fn walk<'a>(&'a self, depth: usize, visit: &mut impl FnMut(&'a Node, usize)) {
        visit(self, depth);
        if let Self::Split(split) = self {
            split.left.walk(depth + 1, visit);
            split.right.walk(depth + 1, visit);
        }
    }

    /// All identifiers in pre-order.
    #[must_use]
    pub fn ids(&self) -> Vec<&NodeId> {
        let mut out = Vec::new();
        self.walk(0, &mut |node, _| out.push(node.id()));
        out
    }

    /// Panel identifiers in pre-order (reading order).
    #[must_use]
    pub fn panel_ids(&self) -> Vec<&NodeId> {
        let mut out = Vec::new();
        self.walk(0, &mut |node, _| {
            if node.is_panel() {
                out.push(node.id());
            }
        });
        out
    }

    #[must_use]
    pub fn panel_count(&self) -> usize {
        match self {
            Self::Panel(_) => 1,
            Self::Split(split) => split.left.panel_count() + split.right.panel_count(),
        }
    }

    #[must_use]
    pub fn node_count(&self) -> usize {
        match self {
            Self::Panel(_) => 1,
            Self::Split(split) => 1 + split.left.node_count() + split.right.node_count(),
        }
    }

    /// Depth of the first node carrying `id`; the root is at depth 0.
    #[must_use]
    pub fn depth_of(&self, id: &str) -> Option<usize> {
        let mut found = None;
        self.walk(0, &mut |node, depth| {
            if found.is_none() && node.id() == id {
                found = Some(depth);
            }
        });
        found
    }

    /// True when `descendant` lies strictly inside the subtree of `ancestor`.
    #[must_use]
    pub fn is_ancestor_of(&self, ancestor: &str, descendant: &str) -> bool {
        if ancestor == descendant {
            return false;
        }
        self.find(ancestor)
            .is_some_and(|subtree| subtree.contains(descendant))
    }

    /// Check identifier invariants: non-empty and unique.
    pub fn validate(&self) -> Result<(), NodeModelError> {
        let mut seen = FxHashSet::default();
        let mut result = Ok(());
        self.walk(0, &mut |node, _| {
            if result.is_err() {
                return;
            }
            let id = node.id();
            if id.as_str().is_empty() {
                result = Err(NodeModelError::EmptyId);
            } else if !seen.insert(id.as_str()) {
                result = Err(NodeModelError::DuplicateId { id: id.clone() });
            }
        });
        result
    }

    /// Parse a layout from JSON and validate it.
    pub fn from_json(json: &str) -> Result<Node, NodeModelError> {
        let node: Node = serde_json::from_str(json).map_err(|err| NodeModelError::Parse {
            line: err.line(),
            column: err.column(),
            message: err.to_string(),
        })?;
        node.validate()?;
        Ok(node)
    }

    /// Serialize the layout as pretty-printed JSON.
    pub fn to_json(&self) -> Result<String, NodeModelError> {
        serde_json::to_string_pretty(self).map_err(|err| NodeModelError::Serialize {
            message: err.to_string(),
        })
    }
}

/// Failures surfaced while loading or checking a layout tree.
///
/// Structural edits never produce these; they are reserved for layouts
/// entering the engine from outside.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum NodeModelError {
    EmptyId,
    DuplicateId {
        id: NodeId,
    },
    Parse {
        line: usize,
        column: usize,
        message: String,
    },
    Serialize {
        message: String,
    },
}

impl fmt::Display for NodeModelError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::EmptyId => write!(f, "layout node identifiers must be non-empty"),
            Self::DuplicateId { id } => write!(f, "layout node id {id:?} appears more than once"),
            Self::Parse {
                line,
                column,
                message,
            } => write!(f, "invalid layout JSON at {line}:{column}: {message}"),
            Self::Serialize { message } => write!(f, "failed to serialize layout: {message}"),
        }
    }
}

impl std::error::Error for NodeModelError {}
