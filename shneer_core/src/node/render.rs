// Copyright 2026 the Shneer Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Recursive immediate-mode rendering onto a [`Surface`].

use kurbo::Point;

use super::graph::SceneGraph;
use super::id::{INVALID, NodeId};
use super::kind::{NodeKind, SHNEER_TEXT};
use crate::surface::Surface;

/// Half the length of each stroke of the debug origin cross.
const CROSS_HALF: f64 = 4.0;

impl SceneGraph {
    /// Draws `id` and its subtree.
    ///
    /// For each node: save the surface state, concatenate the node's local
    /// transform, draw the node (and its debug overlay, if enabled), draw the
    /// children in insertion order, then restore. Only `id`'s own local
    /// transform is applied at the top, not those of its ancestors.
    ///
    /// # Panics
    ///
    /// Panics if `id` is stale.
    pub fn render_all<S: Surface + ?Sized>(&self, id: NodeId, surface: &mut S) {
        self.validate(id);
        self.render_subtree(id.idx, surface);
    }

    /// Draws only `id` itself, in the surface's current coordinate space.
    ///
    /// The root draws nothing; a shneer draws its label centered on its
    /// bounding box.
    pub fn render_local<S: Surface + ?Sized>(&self, id: NodeId, surface: &mut S) {
        self.validate(id);
        self.render_node(id.idx, surface);
    }

    fn render_subtree<S: Surface + ?Sized>(&self, idx: u32, surface: &mut S) {
        surface.save();
        surface.transform(self.local_transform[idx as usize]);
        self.render_node(idx, surface);
        if self.show_bounds {
            self.render_overlay(idx, surface);
        }
        let mut child = self.first_child[idx as usize];
        while child != INVALID {
            self.render_subtree(child, surface);
            child = self.next_sibling[child as usize];
        }
        surface.restore();
    }

    fn render_node<S: Surface + ?Sized>(&self, idx: u32, surface: &mut S) {
        match self.kind[idx as usize] {
            NodeKind::Root => {}
            NodeKind::Shneer { color } => {
                let at = self.local_bounds[idx as usize].center();
                surface.fill_text(SHNEER_TEXT, at, color);
            }
        }
    }

    /// Origin cross, bounding box, and node name.
    fn render_overlay<S: Surface + ?Sized>(&self, idx: u32, surface: &mut S) {
        let color = self.kind[idx as usize].debug_color();
        let bounds = self.local_bounds[idx as usize];
        surface.stroke_line(
            Point::new(-CROSS_HALF, CROSS_HALF),
            Point::new(CROSS_HALF, -CROSS_HALF),
            color,
            2.0,
        );
        surface.stroke_line(
            Point::new(CROSS_HALF, CROSS_HALF),
            Point::new(-CROSS_HALF, -CROSS_HALF),
            color,
            2.0,
        );
        surface.stroke_rect(bounds, color, 1.0);
        surface.fill_text(&self.name[idx as usize], bounds.origin(), color);
    }
}
