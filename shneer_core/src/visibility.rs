// Copyright 2026 the Shneer Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Viewport visibility classification.
//!
//! A node's local bounding box is mapped through its global transform, and
//! the axis-aligned extent of the four mapped corners is compared against the
//! root's bounding box. A side counts as *exceeded* only when the node lies
//! entirely beyond it; any overlap with the viewport is [`Visibility::Visible`].
//!
//! Sides are tested in a fixed order (left, right, top, bottom) and the
//! first match wins, so a node beyond a corner reports the horizontal side.

use kurbo::{Point, Rect};

use crate::node::{NodeId, SceneGraph};
use crate::transform::Transform2d;

/// Position of a node relative to the viewport.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Visibility {
    /// At least partly inside the viewport.
    Visible,
    /// Entirely left of the viewport.
    ExceededLeft,
    /// Entirely right of the viewport.
    ExceededRight,
    /// Entirely above the viewport.
    ExceededTop,
    /// Entirely below the viewport.
    ExceededBottom,
}

/// Result of [`classify`].
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct VisibilityReport {
    /// Where the node is relative to the viewport.
    pub visibility: Visibility,
    /// Width of the node's global axis-aligned bounding box.
    pub global_width: f64,
    /// Height of the node's global axis-aligned bounding box.
    pub global_height: f64,
}

/// Maps `bounds` through `transform` and returns the axis-aligned box
/// enclosing the four transformed corners.
#[must_use]
pub fn global_bounds(bounds: Rect, transform: &Transform2d) -> Rect {
    let corners = [
        Point::new(bounds.x0, bounds.y0),
        Point::new(bounds.x1, bounds.y0),
        Point::new(bounds.x1, bounds.y1),
        Point::new(bounds.x0, bounds.y1),
    ]
    .map(|p| transform.transform_point(p));

    let mut out = Rect::new(corners[0].x, corners[0].y, corners[0].x, corners[0].y);
    for p in &corners[1..] {
        out.x0 = out.x0.min(p.x);
        out.y0 = out.y0.min(p.y);
        out.x1 = out.x1.max(p.x);
        out.y1 = out.y1.max(p.y);
    }
    out
}

/// Classifies a node with local `bounds` and global `transform` against the
/// `viewport` (the root's bounding box).
#[must_use]
pub fn classify(bounds: Rect, transform: &Transform2d, viewport: Rect) -> VisibilityReport {
    let g = global_bounds(bounds, transform);
    let visibility = if g.x1 < viewport.x0 {
        Visibility::ExceededLeft
    } else if g.x0 > viewport.x1 {
        Visibility::ExceededRight
    } else if g.y1 < viewport.y0 {
        Visibility::ExceededTop
    } else if g.y0 > viewport.y1 {
        Visibility::ExceededBottom
    } else {
        Visibility::Visible
    };
    VisibilityReport {
        visibility,
        global_width: g.width(),
        global_height: g.height(),
    }
}

impl SceneGraph {
    /// Returns the axis-aligned bounding box of a node in global space.
    #[must_use]
    pub fn global_bounds(&self, id: NodeId) -> Rect {
        global_bounds(self.local_bounds(id), &self.world_transform(id))
    }

    /// Classifies a node against the root's bounding box.
    #[must_use]
    pub fn visibility(&self, id: NodeId) -> VisibilityReport {
        classify(
            self.local_bounds(id),
            &self.world_transform(id),
            self.local_bounds(self.root()),
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::node::SHNEER_BOUNDS;

    const VIEWPORT: Rect = Rect::new(0.0, 0.0, 1000.0, 600.0);

    /// Classifies a 60 × 20 box whose top-left corner is at `(x, y)`.
    fn box_at(x: f64, y: f64) -> VisibilityReport {
        let local = Rect::new(0.0, 0.0, 60.0, 20.0);
        classify(local, &Transform2d::from_translation(x, y), VIEWPORT)
    }

    #[test]
    fn entirely_left_is_exceeded() {
        let r = box_at(-100.0, 300.0);
        assert_eq!(r.visibility, Visibility::ExceededLeft);
        assert_eq!(r.global_width, 60.0);
        assert_eq!(r.global_height, 20.0);
    }

    #[test]
    fn straddling_right_edge_is_visible() {
        assert_eq!(box_at(980.0, 300.0).visibility, Visibility::Visible);
    }

    #[test]
    fn each_side() {
        assert_eq!(box_at(1001.0, 300.0).visibility, Visibility::ExceededRight);
        assert_eq!(box_at(500.0, -21.0).visibility, Visibility::ExceededTop);
        assert_eq!(box_at(500.0, 601.0).visibility, Visibility::ExceededBottom);
        assert_eq!(box_at(500.0, 300.0).visibility, Visibility::Visible);
    }

    #[test]
    fn touching_an_edge_is_visible() {
        assert_eq!(box_at(-60.0, 300.0).visibility, Visibility::Visible);
        assert_eq!(box_at(1000.0, 300.0).visibility, Visibility::Visible);
        assert_eq!(box_at(500.0, -20.0).visibility, Visibility::Visible);
        assert_eq!(box_at(500.0, 600.0).visibility, Visibility::Visible);
    }

    #[test]
    fn horizontal_sides_win_at_corners() {
        assert_eq!(box_at(-100.0, -100.0).visibility, Visibility::ExceededLeft);
        assert_eq!(box_at(-100.0, 700.0).visibility, Visibility::ExceededLeft);
        assert_eq!(box_at(1100.0, 700.0).visibility, Visibility::ExceededRight);
        assert_eq!(box_at(1100.0, -100.0).visibility, Visibility::ExceededRight);
    }

    #[test]
    fn rotated_bounds_enclose_all_corners() {
        let xf = Transform2d::from_rotation(core::f64::consts::FRAC_PI_2);
        let g = global_bounds(SHNEER_BOUNDS, &xf);
        let eps = 1e-9;
        assert!((g.width() - 20.0).abs() < eps, "width {}", g.width());
        assert!((g.height() - 60.0).abs() < eps, "height {}", g.height());
    }

    #[test]
    fn scaled_node_reports_global_size() {
        let mut xf = Transform2d::from_translation(200.0, 200.0);
        xf.scale(2.5, 2.5);
        let r = classify(SHNEER_BOUNDS, &xf, VIEWPORT);
        assert_eq!(r.visibility, Visibility::Visible);
        assert_eq!(r.global_width, 150.0);
        assert_eq!(r.global_height, 50.0);
    }

    #[test]
    fn graph_classifies_against_root_bounds() {
        let mut graph = SceneGraph::new("scene", VIEWPORT);
        let root = graph.root();
        let color = crate::color::Color::BLACK;
        let n = graph.create_node(
            root,
            "n",
            crate::node::NodeKind::Shneer { color },
            SHNEER_BOUNDS,
        );
        graph.translate(n, 1100.0, 300.0);
        assert_eq!(graph.visibility(n).visibility, Visibility::ExceededRight);

        graph.resize_root(1200.0, 600.0);
        assert_eq!(graph.visibility(n).visibility, Visibility::Visible);
        assert_eq!(
            graph.global_bounds(n),
            Rect::new(1070.0, 290.0, 1130.0, 310.0)
        );
    }
}
