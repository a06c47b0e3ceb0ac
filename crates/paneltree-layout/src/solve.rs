#![forbid(unsafe_code)]

//! Layout solving: tree + area -> rectangles.
//!
//! Every node receives a rectangle; a split hands `ratio` of its extent along
//! the split axis to its first child and the rest to its second. Divider
//! geometry is recorded alongside so hosts can hit-test resize handles
//! without re-walking the tree.

use std::collections::BTreeMap;

use paneltree_core::geometry::{Point, Rect};

use crate::tree::{Node, NodeId, Orientation, SplitRatio};

/// Split `area` into first/second child rectangles.
#[must_use]
pub fn split_area(area: Rect, orientation: Orientation, ratio: SplitRatio) -> (Rect, Rect) {
    match orientation {
        Orientation::Vertical => {
            let first = area.width * ratio.get();
            (
                Rect::new(area.x, area.y, first, area.height),
                Rect::new(area.x + first, area.y, area.width - first, area.height),
            )
        }
        Orientation::Horizontal => {
            let first = area.height * ratio.get();
            (
                Rect::new(area.x, area.y, area.width, first),
                Rect::new(area.x, area.y + first, area.width, area.height - first),
            )
        }
    }
}

/// Where a split's divider sits.
#[derive(Debug, Clone, PartialEq)]
pub struct DividerGeometry {
    pub split_id: NodeId,
    pub orientation: Orientation,
    pub ratio: SplitRatio,
    /// The split's own rectangle; resize ratios are measured against it.
    pub container: Rect,
    pub depth: usize,
}

impl DividerGeometry {
    /// Coordinate of the boundary along the split axis.
    #[must_use]
    pub fn boundary(&self) -> f64 {
        match self.orientation {
            Orientation::Vertical => self.container.x + self.container.width * self.ratio.get(),
            Orientation::Horizontal => self.container.y + self.container.height * self.ratio.get(),
        }
    }

    /// A band `thickness` wide centred on the boundary, spanning the container.
    #[must_use]
    pub fn band(&self, thickness: f64) -> Rect {
        let boundary = self.boundary();
        let half = thickness / 2.0;
        match self.orientation {
            Orientation::Vertical => Rect::new(
                boundary - half,
                self.container.y,
                thickness,
                self.container.height,
            ),
            Orientation::Horizontal => Rect::new(
                self.container.x,
                boundary - half,
                self.container.width,
                thickness,
            ),
        }
    }
}

/// Solved rectangles for one tree in one area.
#[derive(Debug, Clone, PartialEq)]
pub struct LayoutSolution {
    rects: BTreeMap<NodeId, Rect>,
    panels: Vec<NodeId>,
    dividers: Vec<DividerGeometry>,
}

impl LayoutSolution {
    /// Rectangle for any node.
    #[must_use]
    pub fn rect(&self, id: &str) -> Option<Rect> {
        self.rects.get(id).copied()
    }

    /// Panels with their rectangles, in reading order.
    pub fn panels(&self) -> impl Iterator<Item = (&NodeId, Rect)> + '_ {
        self.panels
            .iter()
            .filter_map(|id| self.rects.get(id).map(|rect| (id, *rect)))
    }

    /// Dividers in pre-order.
    #[must_use]
    pub fn dividers(&self) -> &[DividerGeometry] {
        &self.dividers
    }

    #[must_use]
    pub fn divider(&self, split_id: &str) -> Option<&DividerGeometry> {
        self.dividers.iter().find(|d| d.split_id == split_id)
    }

    /// Panel whose centre is closest to `point`.
    ///
    /// Ties go to the panel earliest in reading order.
    #[must_use]
    pub fn nearest_panel(&self, point: Point) -> Option<(&NodeId, Rect)> {
        let mut best: Option<(&NodeId, Rect, f64)> = None;
        for (id, rect) in self.panels() {
            let distance = rect.center().distance_squared(point);
            match best {
                Some((_, _, current)) if distance >= current => {}
                _ => best = Some((id, rect, distance)),
            }
        }
        best.map(|(id, rect, _)| (id, rect))
    }
}

/// Solve `tree` inside `area`.
#[must_use]
pub fn solve_layout(tree: &Node, area: Rect) -> LayoutSolution {
    let mut solution = LayoutSolution {
        rects: BTreeMap::new(),
        panels: Vec::new(),
        dividers: Vec::new(),
    };
    solve_node(tree, area, 0, &mut solution);
    solution
}

fn solve_node(node: &Node, area: Rect, depth: usize, out: &mut LayoutSolution) {
    out.rects.insert(node.id().clone(), area);
    let Node::Split(split) = node else {
        out.panels.push(node.id().clone());
        return;
    };
    out.dividers.push(DividerGeometry {
        split_id: split.id.clone(),
        orientation: split.orientation,
        ratio: split.ratio,
        container: area,
        depth,
    });
    let (first, second) = split_area(area, split.orientation, split.ratio);
    solve_node(&split.left, first, depth + 1, out);
    solve_node(&split.right, second, depth + 1, out);
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> Node {
        Node::split(
            "root",
            Orientation::Vertical,
            0.25,
            Node::panel("a"),
            Node::split(
                "s2",
                Orientation::Horizontal,
                0.5,
                Node::panel("b"),
                Node::panel("c"),
            ),
        )
    }

    #[test]
    fn vertical_split_divides_width() {
        let layout = solve_layout(&sample(), Rect::from_size(400.0, 200.0));
        assert_eq!(layout.rect("a"), Some(Rect::new(0.0, 0.0, 100.0, 200.0)));
        assert_eq!(layout.rect("s2"), Some(Rect::new(100.0, 0.0, 300.0, 200.0)));
        assert_eq!(layout.rect("b"), Some(Rect::new(100.0, 0.0, 300.0, 100.0)));
        assert_eq!(layout.rect("c"), Some(Rect::new(100.0, 100.0, 300.0, 100.0)));
        assert_eq!(layout.rect("root"), Some(Rect::from_size(400.0, 200.0)));
    }

    #[test]
    fn panels_are_in_reading_order() {
        let layout = solve_layout(&sample(), Rect::from_size(400.0, 200.0));
        let ids: Vec<&str> = layout.panels().map(|(id, _)| id.as_str()).collect();
        assert_eq!(ids, ["a", "b", "c"]);
    }

    #[test]
    fn divider_boundary_and_band() {
        let layout = solve_layout(&sample(), Rect::from_size(400.0, 200.0));
        let root = layout.divider("root").expect("root divider");
        assert_eq!(root.boundary(), 100.0);
        assert_eq!(root.band(6.0), Rect::new(97.0, 0.0, 6.0, 200.0));
        let nested = layout.divider("s2").expect("nested divider");
        assert_eq!(nested.depth, 1);
        assert_eq!(nested.boundary(), 100.0);
        assert_eq!(nested.band(4.0), Rect::new(100.0, 98.0, 300.0, 4.0));
        assert_eq!(layout.dividers().len(), 2);
    }

    #[test]
    fn nearest_panel_outside_area() {
        let layout = solve_layout(&sample(), Rect::from_size(400.0, 200.0));
        let (id, _) = layout
            .nearest_panel(Point::new(500.0, 10.0))
            .expect("nearest");
        assert_eq!(id.as_str(), "b");
    }

    #[test]
    fn nearest_tie_prefers_reading_order() {
        let tree = Node::split(
            "s",
            Orientation::Vertical,
            0.5,
            Node::panel("a"),
            Node::panel("b"),
        );
        let layout = solve_layout(&tree, Rect::from_size(200.0, 100.0));
        let (id, _) = layout.nearest_panel(Point::new(100.0, 50.0)).expect("nearest");
        assert_eq!(id.as_str(), "a");
    }

    #[test]
    fn single_panel_gets_whole_area() {
        let layout = solve_layout(&Node::panel("only"), Rect::new(5.0, 5.0, 10.0, 10.0));
        assert_eq!(layout.rect("only"), Some(Rect::new(5.0, 5.0, 10.0, 10.0)));
        assert!(layout.dividers().is_empty());
    }
}
