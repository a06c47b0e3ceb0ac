#![forbid(unsafe_code)]

//! Text outline of a layout tree, for debugging panes and logs.

use std::fmt;

use crate::tree::Node;

fn label(node: &Node) -> String {
    match node {
        Node::Panel(panel) => format!("panel {}", panel.id),
        Node::Split(split) => format!(
            "split {} [{} {:.2}]",
            split.id,
            split.orientation,
            split.ratio.get()
        ),
    }
}

fn to_ascii(node: &Node) -> ascii_tree::Tree {
    match node {
        Node::Panel(_) => ascii_tree::Tree::Leaf(vec![label(node)]),
        Node::Split(split) => ascii_tree::Tree::Node(
            label(node),
            vec![to_ascii(&split.left), to_ascii(&split.right)],
        ),
    }
}

/// Write the outline of `tree` into `out`, one node per line.
pub fn write_outline(out: &mut String, tree: &Node) -> fmt::Result {
    ascii_tree::write_tree(out, &to_ascii(tree))
}

/// Render the outline of `tree` as a string.
#[must_use]
pub fn outline(tree: &Node) -> String {
    let mut out = String::new();
    // Writing into a String cannot fail.
    let _ = write_outline(&mut out, tree);
    out
}
