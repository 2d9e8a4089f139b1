// Copyright 2026 the Shneer Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Global transform propagation.
//!
//! Every mutation recomputes the global transform of the mutated node and all
//! of its descendants before any listener runs, so readers never observe a
//! partially updated subtree. A node's global transform is
//! `parent_global * local`; a node without a parent (the root, or a detached
//! subtree) uses its local transform as its global one.

use alloc::vec::Vec;

use super::graph::SceneGraph;
use super::id::{INVALID, NodeId};
use crate::transform::Transform2d;

impl SceneGraph {
    /// Returns every live node reachable from the root in depth-first
    /// pre-order (parents before children, siblings in insertion order).
    #[must_use]
    pub fn traversal_order(&self) -> Vec<NodeId> {
        self.subtree(self.root)
            .into_iter()
            .map(|idx| self.handle(idx))
            .collect()
    }

    /// Recomputes global transforms for `idx` and its descendants.
    pub(crate) fn propagate(&mut self, idx: u32) {
        let parent_idx = self.parent[idx as usize];
        let parent_world = if parent_idx != INVALID {
            self.world_transform[parent_idx as usize]
        } else {
            Transform2d::IDENTITY
        };
        self.world_transform[idx as usize] = parent_world * self.local_transform[idx as usize];

        let mut child = self.first_child[idx as usize];
        while child != INVALID {
            self.propagate(child);
            child = self.next_sibling[child as usize];
        }
    }

    /// Collects `idx` and its descendants in depth-first pre-order.
    pub(crate) fn subtree(&self, idx: u32) -> Vec<u32> {
        let mut out = Vec::new();
        self.dfs_collect(idx, &mut out);
        out
    }

    /// Returns whether `ancestor` is `idx` or one of its ancestors.
    pub(crate) fn is_ancestor(&self, ancestor: u32, mut idx: u32) -> bool {
        while idx != INVALID {
            if idx == ancestor {
                return true;
            }
            idx = self.parent[idx as usize];
        }
        false
    }

    fn dfs_collect(&self, idx: u32, out: &mut Vec<u32>) {
        out.push(idx);
        let mut child = self.first_child[idx as usize];
        while child != INVALID {
            self.dfs_collect(child, out);
            child = self.next_sibling[child as usize];
        }
    }
}

#[cfg(test)]
mod tests {
    use alloc::vec;

    use kurbo::{Point, Rect};

    use super::*;
    use crate::color::Color;
    use crate::node::{NodeKind, SHNEER_BOUNDS};

    const EPS: f64 = 1e-9;

    fn assert_point_near(actual: Point, expected: Point) {
        assert!(
            (actual.x - expected.x).abs() < EPS && (actual.y - expected.y).abs() < EPS,
            "expected {expected:?}, got {actual:?}"
        );
    }

    fn graph() -> SceneGraph {
        SceneGraph::new("scene", Rect::new(0.0, 0.0, 1000.0, 600.0))
    }

    fn label(graph: &mut SceneGraph, parent: NodeId) -> NodeId {
        let color = Color::rgb(0.0, 1.0, 0.0);
        graph.create_node(parent, "n", NodeKind::Shneer { color }, SHNEER_BOUNDS)
    }

    #[test]
    fn world_transform_is_composition_chain() {
        let mut g = graph();
        let root = g.root();
        let a = label(&mut g, root);
        let b = label(&mut g, a);

        g.translate(root, 5.0, 7.0);
        g.scale(a, 2.0, 3.0);
        g.rotate(a, 0.3, 1.0, 1.0);
        g.translate(b, -4.0, 9.0);
        g.rotate(b, -1.1, 0.0, 0.0);

        let expected = g.local_transform(root) * g.local_transform(a) * g.local_transform(b);
        for p in [
            Point::ORIGIN,
            Point::new(1.0, 0.0),
            Point::new(-3.5, 12.25),
        ] {
            assert_point_near(
                g.world_transform(b).transform_point(p),
                expected.transform_point(p),
            );
        }
    }

    #[test]
    fn ancestor_mutation_updates_descendants() {
        let mut g = graph();
        let root = g.root();
        let a = label(&mut g, root);
        let b = label(&mut g, a);
        g.translate(b, 1.0, 1.0);

        g.translate(a, 10.0, 0.0);
        assert_point_near(g.global_origin(b), Point::new(11.0, 1.0));
        g.scale(a, 2.0, 2.0);
        assert_point_near(g.global_origin(b), Point::new(12.0, 2.0));
    }

    #[test]
    fn translate_as_global_moves_global_origin_by_delta() {
        let mut g = graph();
        let root = g.root();
        let a = label(&mut g, root);
        let b = label(&mut g, a);
        g.scale(root, 1.5, 0.5);
        g.rotate(a, 0.7, 3.0, -2.0);
        g.scale(a, 2.0, 4.0);
        g.translate(b, 8.0, 1.0);
        g.rotate(b, -0.2, 0.0, 0.0);

        let before = g.global_origin(b);
        g.translate_as_global(b, 25.0, -13.0);
        let after = g.global_origin(b);
        assert_point_near(after, Point::new(before.x + 25.0, before.y - 13.0));
    }

    #[test]
    fn translate_as_global_with_singular_transform_is_non_finite() {
        let mut g = graph();
        let root = g.root();
        let a = label(&mut g, root);
        g.scale(a, 0.0, 0.0);
        g.translate_as_global(a, 1.0, 1.0);
        assert!(!g.world_transform(a).is_finite());
    }

    #[test]
    fn reparent_recomputes_under_new_ancestry() {
        let mut g = graph();
        let root = g.root();
        let a = label(&mut g, root);
        let b = label(&mut g, root);
        let c = label(&mut g, a);
        g.translate(a, 100.0, 0.0);
        g.translate(b, 0.0, 50.0);
        g.translate(c, 1.0, 2.0);

        assert_point_near(g.global_origin(c), Point::new(101.0, 2.0));
        g.add_child(b, c);
        assert_point_near(g.global_origin(c), Point::new(1.0, 52.0));
    }

    #[test]
    fn detached_subtree_uses_local_as_global() {
        let mut g = graph();
        let root = g.root();
        let a = label(&mut g, root);
        let b = label(&mut g, a);
        g.translate(root, 30.0, 30.0);
        g.translate(a, 5.0, 0.0);
        g.translate(b, 0.0, 5.0);

        g.remove_child(root, a);
        assert_eq!(g.world_transform(a), g.local_transform(a));
        assert_point_near(g.global_origin(b), Point::new(5.0, 5.0));
    }

    #[test]
    fn traversal_is_depth_first_pre_order() {
        let mut g = graph();
        let root = g.root();
        let a = label(&mut g, root);
        let b = label(&mut g, root);
        let a1 = label(&mut g, a);
        let a2 = label(&mut g, a);
        let b1 = label(&mut g, b);
        assert_eq!(g.traversal_order(), vec![root, a, a1, a2, b, b1]);
    }

    #[test]
    fn detached_nodes_are_not_traversed() {
        let mut g = graph();
        let root = g.root();
        let a = label(&mut g, root);
        let b = label(&mut g, root);
        g.remove_child(root, a);
        assert_eq!(g.traversal_order(), vec![root, b]);
    }
}
