#![no_main]

use arbitrary::Arbitrary;
use libfuzzer_sys::fuzz_target;
use paneltree_core::geometry::Rect;
use paneltree_layout::{Node, Orientation, Quadrant, SplitIdAllocator, solve_layout};

#[derive(Debug, Arbitrary)]
enum Edit {
    Move { source: u8, target: u8, quadrant: u8 },
    Resize { split: u8, ratio: f64 },
    Remove { panel: u8 },
}

fn quadrant(byte: u8) -> Quadrant {
    Quadrant::ALL[usize::from(byte) % Quadrant::ALL.len()]
}

fn pick<'a, T>(items: &'a [T], byte: u8) -> Option<&'a T> {
    if items.is_empty() {
        None
    } else {
        items.get(usize::from(byte) % items.len())
    }
}

fn seed() -> Node {
    Node::split(
        "split-1",
        Orientation::Vertical,
        0.5,
        Node::panel("panel-1"),
        Node::split(
            "split-2",
            Orientation::Horizontal,
            0.5,
            Node::panel("panel-2"),
            Node::panel("panel-3"),
        ),
    )
}

fuzz_target!(|edits: Vec<Edit>| {
    let mut tree = seed();
    let mut ids = SplitIdAllocator::from_tree(&tree);
    let panels_at_start = tree.panel_count();

    for edit in edits.into_iter().take(64) {
        match edit {
            Edit::Move {
                source,
                target,
                quadrant: q,
            } => {
                let panels: Vec<String> =
                    tree.panel_ids().iter().map(|id| id.as_str().to_owned()).collect();
                let (Some(source), Some(target)) = (pick(&panels, source), pick(&panels, target))
                else {
                    continue;
                };
                if source == target {
                    continue;
                }
                let Some(moved) = tree.find(source).cloned() else {
                    continue;
                };
                let Some(without) = tree.remove(source) else {
                    continue;
                };
                let split_id = ids.allocate(&without);
                tree = without.insert_as_split(target, moved, quadrant(q), split_id);
                assert_eq!(tree.panel_count(), panels_at_start, "move changed panel count");
            }
            Edit::Resize { split, ratio } => {
                let splits: Vec<String> = tree
                    .ids()
                    .iter()
                    .filter(|id| !tree.find(id.as_str()).is_some_and(Node::is_panel))
                    .map(|id| id.as_str().to_owned())
                    .collect();
                if let Some(split) = pick(&splits, split) {
                    tree = tree.update_ratio(split, ratio);
                }
            }
            Edit::Remove { panel } => {
                // Removal alone must keep the tree valid; the result is discarded.
                let panels: Vec<String> =
                    tree.panel_ids().iter().map(|id| id.as_str().to_owned()).collect();
                if let Some(panel) = pick(&panels, panel)
                    && let Some(smaller) = tree.remove(panel)
                {
                    assert!(smaller.validate().is_ok(), "remove produced invalid tree");
                    assert!(!smaller.contains(panel), "removed panel still present");
                }
            }
        }
        assert!(tree.validate().is_ok(), "edit produced invalid tree");
    }

    let area = Rect::from_size(1280.0, 720.0);
    let layout = solve_layout(&tree, area);
    let covered: f64 = layout
        .panels()
        .map(|(_, rect)| rect.width * rect.height)
        .sum();
    assert!((covered - area.width * area.height).abs() < 1e-3, "panels do not tile the area");
});
