#![forbid(unsafe_code)]

//! Identifier allocation for splits created by drops.

use crate::tree::{Node, NodeId};

/// Hands out `split-N` identifiers that do not collide with a tree.
///
/// Seeded past the highest numeric suffix already present, and still checks
/// the live tree on every allocation because hosts may reset to layouts the
/// allocator has never seen.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SplitIdAllocator {
    next: u64,
}

impl SplitIdAllocator {
    pub const PREFIX: &'static str = "split-";

    #[must_use]
    pub const fn new() -> Self {
        Self { next: 1 }
    }

    /// Seed from an existing tree.
    #[must_use]
    pub fn from_tree(tree: &Node) -> Self {
        let highest = tree
            .ids()
            .into_iter()
            .filter_map(|id| Self::suffix(id.as_str()))
            .max()
            .unwrap_or(0);
        Self {
            next: highest.checked_add(1).unwrap_or(1),
        }
    }

    fn suffix(id: &str) -> Option<u64> {
        id.strip_prefix(Self::PREFIX)?.parse().ok()
    }

    /// Next identifier absent from `tree`.
    ///
    /// The counter wraps back to 1 past `u64::MAX`; a finite tree always
    /// leaves a free suffix, so the search terminates.
    pub fn allocate(&mut self, tree: &Node) -> NodeId {
        loop {
            let candidate = format!("{}{}", Self::PREFIX, self.next);
            self.next = self.next.checked_add(1).unwrap_or(1);
            if !tree.contains(&candidate) {
                return NodeId::new(candidate);
            }
        }
    }
}

impl Default for SplitIdAllocator {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tree::Orientation;

    #[test]
    fn seeds_past_existing_suffixes() {
        let tree = Node::split(
            "split-7",
            Orientation::Vertical,
            0.5,
            Node::panel("panel-1"),
            Node::split(
                "split-2",
                Orientation::Horizontal,
                0.5,
                Node::panel("split-x"),
                Node::panel("panel-3"),
            ),
        );
        let mut ids = SplitIdAllocator::from_tree(&tree);
        assert_eq!(ids.allocate(&tree), NodeId::from("split-8"));
        assert_eq!(ids.allocate(&tree), NodeId::from("split-9"));
    }

    #[test]
    fn skips_ids_present_in_live_tree() {
        let mut ids = SplitIdAllocator::new();
        let tree = Node::split(
            "split-1",
            Orientation::Vertical,
            0.5,
            Node::panel("split-2"),
            Node::panel("a"),
        );
        assert_eq!(ids.allocate(&tree), NodeId::from("split-3"));
    }

    #[test]
    fn exhausted_counter_wraps_to_free_suffix() {
        let top = format!("split-{}", u64::MAX);
        let tree = Node::split(
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
        );
        let mut ids = SplitIdAllocator::from_tree(&tree);
        assert_eq!(ids.allocate(&tree), NodeId::from("split-2"));
        assert_eq!(ids.allocate(&tree), NodeId::from("split-3"));
    }

    #[test]
    fn counter_at_max_yields_max_then_wraps() {
        let top = format!("split-{}", u64::MAX - 1);
        let tree = Node::split(
            top.as_str(),
            Orientation::Vertical,
            0.5,
            Node::panel("a"),
            Node::panel("b"),
        );
        let mut ids = SplitIdAllocator::from_tree(&tree);
        let max = format!("split-{}", u64::MAX);
        assert_eq!(ids.allocate(&tree), NodeId::new(max));
        assert_eq!(ids.allocate(&tree), NodeId::from("split-1"));
    }
}
