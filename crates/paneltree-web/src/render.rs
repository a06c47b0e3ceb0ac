#![forbid(unsafe_code)]

//! Display-list rendering.
//!
//! [`render`] is a pure function of the tree, both sessions, and the host
//! area. It emits a flat [`Frame`] the host paints in order: nested panels and
//! dividers depth-first (first child, divider, second child), then the drop
//! indicator, then the drag ghost on top.

use paneltree_core::geometry::Rect;
use paneltree_core::input::InputModality;
use paneltree_layout::{DividerGeometry, Node, NodeId, Orientation, Quadrant, SplitRatio, split_area};
use serde::{Deserialize, Serialize};

use crate::config::RenderConfig;
use crate::gesture::DragSession;
use crate::resize::ResizeSession;

/// How a panel should look this frame.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "state", rename_all = "snake_case")]
pub enum PanelVisual {
    Idle,
    /// Being dragged; hosts dim and shrink it.
    Dragged,
    /// Hovered by the drag, with the quadrant the drop would land in.
    DropTarget { quadrant: Quadrant },
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PanelView {
    pub id: NodeId,
    pub rect: Rect,
    pub depth: usize,
    pub visual: PanelVisual,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DividerView {
    pub split_id: NodeId,
    pub orientation: Orientation,
    pub ratio: SplitRatio,
    /// Band that accepts resize pointer-downs.
    pub hit_rect: Rect,
    /// Drawn line, centred inside `hit_rect`.
    pub visual_rect: Rect,
    /// This divider is being dragged.
    pub active: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "item", rename_all = "snake_case")]
pub enum RenderItem {
    Panel(PanelView),
    Divider(DividerView),
    /// Half of the target on the quadrant side.
    DropIndicator {
        target: NodeId,
        quadrant: Quadrant,
        rect: Rect,
    },
    /// Scaled copy of the dragged panel following the finger.
    Ghost { source: NodeId, rect: Rect },
}

/// One rendered frame.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Frame {
    pub area: Rect,
    pub items: Vec<RenderItem>,
}

impl Frame {
    pub fn panels(&self) -> impl Iterator<Item = &PanelView> + '_ {
        self.items.iter().filter_map(|item| match item {
            RenderItem::Panel(view) => Some(view),
            _ => None,
        })
    }

    pub fn dividers(&self) -> impl Iterator<Item = &DividerView> + '_ {
        self.items.iter().filter_map(|item| match item {
            RenderItem::Divider(view) => Some(view),
            _ => None,
        })
    }

    #[must_use]
    pub fn panel(&self, id: &str) -> Option<&PanelView> {
        self.panels().find(|view| view.id == id)
    }

    #[must_use]
    pub fn divider(&self, split_id: &str) -> Option<&DividerView> {
        self.dividers().find(|view| view.split_id == split_id)
    }

    #[must_use]
    pub fn drop_indicator(&self) -> Option<(&NodeId, Quadrant, Rect)> {
        self.items.iter().find_map(|item| match item {
            RenderItem::DropIndicator {
                target,
                quadrant,
                rect,
            } => Some((target, *quadrant, *rect)),
            _ => None,
        })
    }

    #[must_use]
    pub fn ghost(&self) -> Option<Rect> {
        self.items.iter().find_map(|item| match item {
            RenderItem::Ghost { rect, .. } => Some(*rect),
            _ => None,
        })
    }
}

struct RenderContext<'a> {
    drag: &'a DragSession,
    resize: &'a ResizeSession,
    config: &'a RenderConfig,
    items: Vec<RenderItem>,
}

impl RenderContext<'_> {
    fn panel_visual(&self, id: &NodeId) -> PanelVisual {
        if !self.drag.active {
            return PanelVisual::Idle;
        }
        if self.drag.dragged_id.as_ref() == Some(id) {
            return PanelVisual::Dragged;
        }
        match self.drag.hover() {
            Some((target, quadrant)) if target == id => PanelVisual::DropTarget { quadrant },
            _ => PanelVisual::Idle,
        }
    }

    fn visit(&mut self, node: &Node, area: Rect, depth: usize) {
        match node {
            Node::Panel(panel) => {
                let visual = self.panel_visual(&panel.id);
                self.items.push(RenderItem::Panel(PanelView {
                    id: panel.id.clone(),
                    rect: area,
                    depth,
                    visual,
                }));
            }
            Node::Split(split) => {
                let (first, second) = split_area(area, split.orientation, split.ratio);
                self.visit(&split.left, first, depth + 1);
                let geometry = DividerGeometry {
                    split_id: split.id.clone(),
                    orientation: split.orientation,
                    ratio: split.ratio,
                    container: area,
                    depth,
                };
                let active =
                    self.resize.active && self.resize.split_id.as_ref() == Some(&split.id);
                self.items.push(RenderItem::Divider(DividerView {
                    hit_rect: geometry.band(self.config.divider_hit_thickness),
                    visual_rect: geometry.band(self.config.divider_visual_thickness),
                    split_id: geometry.split_id,
                    orientation: split.orientation,
                    ratio: split.ratio,
                    active,
                }));
                self.visit(&split.right, second, depth + 1);
            }
        }
    }

    fn panel_rect(&self, id: &NodeId) -> Option<Rect> {
        self.items.iter().find_map(|item| match item {
            RenderItem::Panel(view) if &view.id == id => Some(view.rect),
            _ => None,
        })
    }

    fn overlays(&mut self) {
        let drag = self.drag;
        if !drag.active {
            return;
        }
        if let Some((target, quadrant)) = drag.hover()
            && drag.dragged_id.as_ref() != Some(target)
            && let Some(bounds) = self.panel_rect(target)
        {
            self.items.push(RenderItem::DropIndicator {
                target: target.clone(),
                quadrant,
                rect: quadrant.indicator_rect(bounds),
            });
        }
        // Mouse drags get the browser's native drag image instead.
        if drag.modality == Some(InputModality::Touch)
            && let (Some(source), Some(pointer)) = (drag.dragged_id.as_ref(), drag.pointer)
            && let Some(bounds) = self.panel_rect(source)
        {
            let scale = self.config.ghost_scale;
            self.items.push(RenderItem::Ghost {
                source: source.clone(),
                rect: Rect::centered_at(pointer, bounds.width * scale, bounds.height * scale),
            });
        }
    }
}

/// Render `tree` into `area`.
#[must_use]
pub fn render(
    tree: &Node,
    drag: &DragSession,
    resize: &ResizeSession,
    area: Rect,
    config: &RenderConfig,
) -> Frame {
    debug_assert!(
        tree.validate().is_ok(),
        "rendering a tree with invalid identifiers"
    );
    let mut ctx = RenderContext {
        drag,
        resize,
        config,
        items: Vec::with_capacity(tree.node_count() + 2),
    };
    ctx.visit(tree, area, 0);
    ctx.overlays();
    Frame {
        area,
        items: ctx.items,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use paneltree_core::geometry::Point;

    fn tree() -> Node {
        Node::split(
            "root",
            Orientation::Vertical,
            0.5,
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

    fn area() -> Rect {
        Rect::from_size(400.0, 200.0)
    }

    fn frame(drag: &DragSession, resize: &ResizeSession) -> Frame {
        render(&tree(), drag, resize, area(), &RenderConfig::default())
    }

    #[test]
    fn items_are_depth_first_with_dividers_between_children() {
        let frame = frame(&DragSession::default(), &ResizeSession::default());
        let order: Vec<String> = frame
            .items
            .iter()
            .map(|item| match item {
                RenderItem::Panel(view) => format!("panel:{}", view.id),
                RenderItem::Divider(view) => format!("divider:{}", view.split_id),
                RenderItem::DropIndicator { .. } => "indicator".to_owned(),
                RenderItem::Ghost { .. } => "ghost".to_owned(),
            })
            .collect();
        assert_eq!(
            order,
            ["panel:a", "divider:root", "panel:b", "divider:s2", "panel:c"]
        );
        assert!(frame.panels().all(|p| p.visual == PanelVisual::Idle));
    }

    #[test]
    fn panel_depth_and_rects() {
        let frame = frame(&DragSession::default(), &ResizeSession::default());
        let a = frame.panel("a").expect("a");
        assert_eq!(a.depth, 1);
        assert_eq!(a.rect, Rect::new(0.0, 0.0, 200.0, 200.0));
        let c = frame.panel("c").expect("c");
        assert_eq!(c.depth, 2);
        assert_eq!(c.rect, Rect::new(200.0, 100.0, 200.0, 100.0));
    }

    #[test]
    fn divider_bands_use_config_thickness() {
        let frame = frame(&DragSession::default(), &ResizeSession::default());
        let root = frame.divider("root").expect("root divider");
        assert_eq!(root.hit_rect, Rect::new(197.0, 0.0, 6.0, 200.0));
        assert_eq!(root.visual_rect, Rect::new(199.0, 0.0, 2.0, 200.0));
        assert!(!root.active);
    }

    #[test]
    fn active_resize_marks_divider() {
        let resize = ResizeSession {
            active: true,
            split_id: Some(NodeId::from("s2")),
            container_bounds: Rect::new(200.0, 0.0, 200.0, 200.0),
            orientation: Some(Orientation::Horizontal),
        };
        let frame = frame(&DragSession::default(), &resize);
        assert!(frame.divider("s2").expect("s2").active);
        assert!(!frame.divider("root").expect("root").active);
    }

    #[test]
    fn drag_marks_source_and_target_and_adds_indicator() {
        let drag = DragSession {
            active: true,
            dragged_id: Some(NodeId::from("a")),
            hover_target_id: Some(NodeId::from("c")),
            hover_quadrant: Some(Quadrant::Left),
            modality: Some(InputModality::Mouse),
            pointer: Some(Point::new(210.0, 150.0)),
        };
        let frame = frame(&drag, &ResizeSession::default());
        assert_eq!(frame.panel("a").map(|p| p.visual), Some(PanelVisual::Dragged));
        assert_eq!(
            frame.panel("c").map(|p| p.visual),
            Some(PanelVisual::DropTarget {
                quadrant: Quadrant::Left
            })
        );
        assert_eq!(frame.panel("b").map(|p| p.visual), Some(PanelVisual::Idle));
        let (target, quadrant, rect) = frame.drop_indicator().expect("indicator");
        assert_eq!(target.as_str(), "c");
        assert_eq!(quadrant, Quadrant::Left);
        assert_eq!(rect, Rect::new(200.0, 100.0, 100.0, 100.0));
        assert_eq!(frame.ghost(), None);
    }

    #[test]
    fn hovering_self_is_not_highlighted() {
        let drag = DragSession {
            active: true,
            dragged_id: Some(NodeId::from("a")),
            hover_target_id: Some(NodeId::from("a")),
            hover_quadrant: Some(Quadrant::Top),
            modality: Some(InputModality::Mouse),
            pointer: None,
        };
        let frame = frame(&drag, &ResizeSession::default());
        assert_eq!(frame.panel("a").map(|p| p.visual), Some(PanelVisual::Dragged));
        assert_eq!(frame.drop_indicator(), None);
    }

    #[test]
    fn touch_drag_draws_scaled_ghost_at_pointer() {
        let drag = DragSession {
            active: true,
            dragged_id: Some(NodeId::from("b")),
            hover_target_id: None,
            hover_quadrant: None,
            modality: Some(InputModality::Touch),
            pointer: Some(Point::new(100.0, 100.0)),
        };
        let frame = frame(&drag, &ResizeSession::default());
        let ghost = frame.ghost().expect("ghost");
        assert_eq!(ghost.center(), Point::new(100.0, 100.0));
        assert!((ghost.width - 190.0).abs() < 1e-9);
        assert!((ghost.height - 95.0).abs() < 1e-9);
        assert!(matches!(frame.items.last(), Some(RenderItem::Ghost { .. })));
    }
}
