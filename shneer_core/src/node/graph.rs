// Copyright 2026 the Shneer Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Struct-of-arrays node storage with allocation, topology, transform
//! mutation, and listener management.

use alloc::string::String;
use alloc::vec::Vec;
use core::fmt;

use kurbo::{Point, Rect, Size};
use rand::Rng;

use crate::color::Color;
use crate::listener::{SharedListener, same_listener};
use crate::transform::Transform2d;

use super::id::{INVALID, NodeId};
use super::kind::{MIN_SHNEER_SCALE, NodeKind, SHNEER_BOUNDS};
use super::traverse::Children;

/// Struct-of-arrays storage for a scene tree.
///
/// Nodes are addressed by [`NodeId`] handles. Internally, each node occupies
/// a slot in parallel arrays. Destroyed nodes are recycled via a free list,
/// and generation counters prevent stale handle access.
///
/// A graph always has exactly one root, created by [`new`](Self::new). Every
/// other node is created under an existing parent.
pub struct SceneGraph {
    // -- Topology --
    pub(crate) parent: Vec<u32>,
    pub(crate) first_child: Vec<u32>,
    pub(crate) next_sibling: Vec<u32>,
    pub(crate) prev_sibling: Vec<u32>,

    // -- Per-node properties --
    pub(crate) name: Vec<String>,
    pub(crate) kind: Vec<NodeKind>,
    pub(crate) local_bounds: Vec<Rect>,
    pub(crate) local_transform: Vec<Transform2d>,

    // -- Derived (recomputed on every mutation) --
    pub(crate) world_transform: Vec<Transform2d>,

    // -- Notification --
    pub(crate) listeners: Vec<Vec<SharedListener>>,
    pub(crate) notify_enabled: Vec<bool>,

    // -- Allocation --
    pub(crate) generation: Vec<u32>,
    pub(crate) free_list: Vec<u32>,
    pub(crate) len: u32,
    pub(crate) root: u32,

    // -- Rendering --
    pub(crate) show_bounds: bool,
}

impl fmt::Debug for SceneGraph {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SceneGraph")
            .field("len", &self.len)
            .field("free", &self.free_list.len())
            .field("root", &self.root)
            .field("show_bounds", &self.show_bounds)
            .finish_non_exhaustive()
    }
}

impl SceneGraph {
    /// Creates a graph containing only a root node with the given viewport
    /// bounds.
    #[must_use]
    pub fn new(root_name: impl Into<String>, viewport: Rect) -> Self {
        let mut graph = Self {
            parent: Vec::new(),
            first_child: Vec::new(),
            next_sibling: Vec::new(),
            prev_sibling: Vec::new(),
            name: Vec::new(),
            kind: Vec::new(),
            local_bounds: Vec::new(),
            local_transform: Vec::new(),
            world_transform: Vec::new(),
            listeners: Vec::new(),
            notify_enabled: Vec::new(),
            generation: Vec::new(),
            free_list: Vec::new(),
            len: 0,
            root: INVALID,
            show_bounds: false,
        };
        graph.root = graph.alloc_slot(root_name.into(), NodeKind::Root, viewport);
        graph
    }

    /// Returns the root node.
    #[must_use]
    pub fn root(&self) -> NodeId {
        self.handle(self.root)
    }

    /// Returns the number of live nodes, including the root.
    #[must_use]
    pub fn node_count(&self) -> usize {
        self.len as usize - self.free_list.len()
    }

    // -- Allocation API --

    /// Creates a node as the last child of `parent`.
    ///
    /// The node starts with an identity local transform, so its global
    /// transform equals the parent's.
    ///
    /// # Panics
    ///
    /// Panics if `parent` is stale.
    pub fn create_node(
        &mut self,
        parent: NodeId,
        name: impl Into<String>,
        kind: NodeKind,
        bounds: Rect,
    ) -> NodeId {
        self.validate(parent);
        let idx = self.alloc_slot(name.into(), kind, bounds);
        self.link_last(parent.idx, idx);
        self.propagate(idx);
        self.handle(idx)
    }

    /// Creates a randomly placed shneer label under `parent`.
    ///
    /// The label is scaled uniformly by a random factor in
    /// `[MIN_SHNEER_SCALE, max_scale]`, then translated (in its scaled local
    /// space) by a random fraction of the parent's bounds, and given a random
    /// hue at 100% saturation and 60% lightness.
    ///
    /// # Panics
    ///
    /// Panics if `parent` is stale.
    pub fn create_shneer<R: Rng + ?Sized>(
        &mut self,
        parent: NodeId,
        name: impl Into<String>,
        max_scale: f64,
        rng: &mut R,
    ) -> NodeId {
        self.validate(parent);
        let factor = rng.random_range(MIN_SHNEER_SCALE..=max_scale.max(MIN_SHNEER_SCALE));
        let area = self.local_bounds[parent.idx as usize];
        let dx = rng.random::<f64>() * area.x1;
        let dy = rng.random::<f64>() * area.y1;
        let hue = rng.random_range(0.0..360.0);

        let color = Color::from_hsl(hue, 1.0, 0.6);
        let id = self.create_node(parent, name, NodeKind::Shneer { color }, SHNEER_BOUNDS);
        self.scale(id, factor, factor);
        self.translate(id, dx, dy);
        id
    }

    /// Detaches a node from its parent and destroys it together with its
    /// whole subtree.
    ///
    /// # Panics
    ///
    /// Panics if the handle is stale or refers to the root.
    pub fn destroy(&mut self, id: NodeId) {
        self.validate(id);
        assert!(id.idx != self.root, "cannot destroy the root node");

        if self.parent[id.idx as usize] != INVALID {
            self.unlink_from_parent(id.idx);
        }

        for idx in self.subtree(id.idx) {
            let i = idx as usize;
            // Bump generation so old handles immediately fail validation.
            self.generation[i] = self.generation[i].wrapping_add(1);
            self.first_child[i] = INVALID;
            self.parent[i] = INVALID;
            self.next_sibling[i] = INVALID;
            self.prev_sibling[i] = INVALID;
            self.listeners[i].clear();
            self.name[i].clear();
            self.free_list.push(idx);
        }
    }

    /// Returns whether the given handle refers to a live node.
    ///
    /// [`destroy`](Self::destroy) bumps the slot's generation, so a freed or
    /// reused slot never matches an old handle.
    #[must_use]
    pub fn is_alive(&self, id: NodeId) -> bool {
        id.idx < self.len && self.generation[id.idx as usize] == id.generation
    }

    // -- Topology API --

    /// Adds `child` as the last child of `parent`.
    ///
    /// Adding a node that is already a child of `parent` is a no-op. A node
    /// attached elsewhere is moved with [`reparent`](Self::reparent).
    ///
    /// # Panics
    ///
    /// Panics if either handle is stale or if the move would create a cycle.
    pub fn add_child(&mut self, parent: NodeId, child: NodeId) {
        self.validate(parent);
        self.validate(child);
        if self.parent[child.idx as usize] == parent.idx {
            return;
        }
        self.reparent(child, parent);
    }

    /// Moves `child` to be the last child of `new_parent`.
    ///
    /// If `child` already has a parent, it is removed from that parent's
    /// children first, so a node is never a child of two parents. Global
    /// transforms of the moved subtree are recomputed under the new ancestry.
    ///
    /// # Panics
    ///
    /// Panics if either handle is stale, or if `new_parent` is `child` or one
    /// of its descendants.
    pub fn reparent(&mut self, child: NodeId, new_parent: NodeId) {
        self.validate(child);
        self.validate(new_parent);
        let c = child.idx;
        let p = new_parent.idx;
        assert!(!self.is_ancestor(c, p), "reparent would create a cycle");

        if self.parent[c as usize] != INVALID {
            self.unlink_from_parent(c);
        }
        self.link_last(p, c);
        self.propagate(c);
    }

    /// Removes `child` from `parent`'s children.
    ///
    /// Returns `false` (and changes nothing) if `child` is not a child of
    /// `parent`. The detached subtree keeps its local transforms; its global
    /// transforms are recomputed with `child` as a standalone root.
    ///
    /// # Panics
    ///
    /// Panics if either handle is stale.
    pub fn remove_child(&mut self, parent: NodeId, child: NodeId) -> bool {
        self.validate(parent);
        self.validate(child);
        if self.parent[child.idx as usize] != parent.idx {
            return false;
        }
        self.unlink_from_parent(child.idx);
        self.propagate(child.idx);
        true
    }

    /// Returns the parent of a node, if any.
    #[must_use]
    pub fn parent(&self, id: NodeId) -> Option<NodeId> {
        self.validate(id);
        let p = self.parent[id.idx as usize];
        (p != INVALID).then(|| self.handle(p))
    }

    /// Returns an iterator over the direct children of a node, in insertion
    /// order.
    #[must_use]
    pub fn children(&self, id: NodeId) -> Children<'_> {
        self.validate(id);
        Children::new(self, self.first_child[id.idx as usize])
    }

    // -- Property getters --

    /// Returns the name a node was created with.
    #[must_use]
    pub fn name(&self, id: NodeId) -> &str {
        self.validate(id);
        &self.name[id.idx as usize]
    }

    /// Returns the variant of a node.
    #[must_use]
    pub fn kind(&self, id: NodeId) -> NodeKind {
        self.validate(id);
        self.kind[id.idx as usize]
    }

    /// Returns the bounding box of a node in its local coordinate space.
    #[must_use]
    pub fn local_bounds(&self, id: NodeId) -> Rect {
        self.validate(id);
        self.local_bounds[id.idx as usize]
    }

    /// Returns the transform of a node relative to its parent.
    #[must_use]
    pub fn local_transform(&self, id: NodeId) -> Transform2d {
        self.validate(id);
        self.local_transform[id.idx as usize]
    }

    /// Returns the transform of a node relative to the root's parent space.
    ///
    /// This is the product of every ancestor's local transform (root first)
    /// with the node's own local transform, and is always up to date.
    #[must_use]
    pub fn world_transform(&self, id: NodeId) -> Transform2d {
        self.validate(id);
        self.world_transform[id.idx as usize]
    }

    /// Returns the image of the node's local origin in global space.
    #[must_use]
    pub fn global_origin(&self, id: NodeId) -> Point {
        self.world_transform(id).origin()
    }

    // -- Mutation API (recomputes the subtree, then notifies) --

    /// Translates a node by `(dx, dy)` in its local coordinate space.
    pub fn translate(&mut self, id: NodeId, dx: f64, dy: f64) {
        self.mutate_local(id, |t| t.translate(dx, dy));
    }

    /// Scales a node by `(sx, sy)` in its local coordinate space.
    ///
    /// A zero factor makes the node's transform singular, after which
    /// [`translate_as_global`](Self::translate_as_global) yields non-finite
    /// results.
    pub fn scale(&mut self, id: NodeId, sx: f64, sy: f64) {
        self.mutate_local(id, |t| t.scale(sx, sy));
    }

    /// Rotates a node clockwise by `theta` radians about the local point
    /// `(cx, cy)`.
    pub fn rotate(&mut self, id: NodeId, theta: f64, cx: f64, cy: f64) {
        self.mutate_local(id, |t| t.rotate(theta, cx, cy));
    }

    /// Replaces the local transform of a node.
    pub fn set_local_transform(&mut self, id: NodeId, transform: Transform2d) {
        self.mutate_local(id, |t| *t = transform);
    }

    /// Translates a node so that its global origin moves by `(dx, dy)` in the
    /// root's coordinate space.
    ///
    /// The global delta is converted to a local delta by mapping both the
    /// origin and `(dx, dy)` through the inverse global transform and
    /// subtracting, since an affine inverse cannot be applied to a delta
    /// vector on its own.
    pub fn translate_as_global(&mut self, id: NodeId, dx: f64, dy: f64) {
        self.validate(id);
        let inverse = self.world_transform[id.idx as usize].inverse();
        let origin = inverse.transform_point(Point::ORIGIN);
        let target = inverse.transform_point(Point::new(dx, dy));
        self.translate(id, target.x - origin.x, target.y - origin.y);
    }

    /// Resizes the root's bounding box, keeping its origin.
    ///
    /// Existing nodes are not repositioned and no notification is sent.
    pub fn resize_root(&mut self, width: f64, height: f64) {
        let bounds = &mut self.local_bounds[self.root as usize];
        *bounds = Rect::from_origin_size(bounds.origin(), Size::new(width, height));
    }

    /// Enables or disables the debug overlay drawn by
    /// [`render_all`](Self::render_all).
    pub fn set_show_bounds(&mut self, show: bool) {
        self.show_bounds = show;
    }

    /// Returns whether the debug overlay is enabled.
    #[must_use]
    pub fn show_bounds(&self) -> bool {
        self.show_bounds
    }

    // -- Listener API --

    /// Registers a listener on a node. Registering the same listener twice is
    /// a no-op.
    pub fn add_listener(&mut self, id: NodeId, listener: &SharedListener) {
        self.validate(id);
        let list = &mut self.listeners[id.idx as usize];
        if !list.iter().any(|l| same_listener(l, listener)) {
            list.push(listener.clone());
        }
    }

    /// Unregisters a listener from a node.
    ///
    /// Returns `false` if the listener was not registered.
    pub fn remove_listener(&mut self, id: NodeId, listener: &SharedListener) -> bool {
        self.validate(id);
        let list = &mut self.listeners[id.idx as usize];
        let before = list.len();
        list.retain(|l| !same_listener(l, listener));
        list.len() != before
    }

    /// Returns the number of listeners registered on a node.
    #[must_use]
    pub fn listener_count(&self, id: NodeId) -> usize {
        self.validate(id);
        self.listeners[id.idx as usize].len()
    }

    /// Calls [`update`](crate::listener::Listener::update) on every listener
    /// of a node, unless its notifications are suspended.
    ///
    /// # Panics
    ///
    /// Panics if the handle is stale, or if a listener is already mutably
    /// borrowed when it is notified.
    pub fn notify(&self, id: NodeId) {
        self.validate(id);
        if !self.notify_enabled[id.idx as usize] {
            return;
        }
        for listener in &self.listeners[id.idx as usize] {
            listener.borrow_mut().update(self);
        }
    }

    /// Enables or disables notifications from a node.
    pub fn set_notify_enabled(&mut self, id: NodeId, enabled: bool) {
        self.validate(id);
        self.notify_enabled[id.idx as usize] = enabled;
    }

    /// Returns whether a node currently notifies its listeners.
    #[must_use]
    pub fn notify_enabled(&self, id: NodeId) -> bool {
        self.validate(id);
        self.notify_enabled[id.idx as usize]
    }

    /// Runs `f` with notifications from `id` suspended, then restores the
    /// previous setting.
    ///
    /// No notification is sent when the scope ends; call
    /// [`notify`](Self::notify) on this node or an ancestor to deliver one
    /// coalesced update.
    pub fn with_notifications_suspended<T>(
        &mut self,
        id: NodeId,
        f: impl FnOnce(&mut Self) -> T,
    ) -> T {
        let previous = self.notify_enabled(id);
        self.notify_enabled[id.idx as usize] = false;
        let out = f(self);
        if self.is_alive(id) {
            self.notify_enabled[id.idx as usize] = previous;
        }
        out
    }

    // -- Internal helpers --

    /// Panics if the handle is stale.
    pub(crate) fn validate(&self, id: NodeId) {
        assert!(
            id.idx < self.len && self.generation[id.idx as usize] == id.generation,
            "stale NodeId: {id:?} (current gen: {})",
            if id.idx < self.len {
                self.generation[id.idx as usize]
            } else {
                u32::MAX
            }
        );
    }

    /// Builds a handle for a live slot.
    pub(crate) fn handle(&self, idx: u32) -> NodeId {
        NodeId {
            idx,
            generation: self.generation[idx as usize],
        }
    }

    /// Applies `f` to a node's local transform, recomputes the subtree's
    /// global transforms, then notifies.
    fn mutate_local(&mut self, id: NodeId, f: impl FnOnce(&mut Transform2d)) {
        self.validate(id);
        f(&mut self.local_transform[id.idx as usize]);
        self.propagate(id.idx);
        self.notify(id);
    }

    /// Allocates a detached slot, reusing a freed one if possible.
    fn alloc_slot(&mut self, name: String, kind: NodeKind, bounds: Rect) -> u32 {
        if let Some(idx) = self.free_list.pop() {
            let i = idx as usize;
            self.parent[i] = INVALID;
            self.first_child[i] = INVALID;
            self.next_sibling[i] = INVALID;
            self.prev_sibling[i] = INVALID;
            self.name[i] = name;
            self.kind[i] = kind;
            self.local_bounds[i] = bounds;
            self.local_transform[i] = Transform2d::IDENTITY;
            self.world_transform[i] = Transform2d::IDENTITY;
            self.listeners[i].clear();
            self.notify_enabled[i] = true;
            idx
        } else {
            let idx = self.len;
            self.len += 1;
            self.parent.push(INVALID);
            self.first_child.push(INVALID);
            self.next_sibling.push(INVALID);
            self.prev_sibling.push(INVALID);
            self.name.push(name);
            self.kind.push(kind);
            self.local_bounds.push(bounds);
            self.local_transform.push(Transform2d::IDENTITY);
            self.world_transform.push(Transform2d::IDENTITY);
            self.listeners.push(Vec::new());
            self.notify_enabled.push(true);
            self.generation.push(0);
            idx
        }
    }

    /// Appends `c` to the child list of `p` without recomputing transforms.
    fn link_last(&mut self, p: u32, c: u32) {
        self.parent[c as usize] = p;
        self.prev_sibling[c as usize] = INVALID;
        self.next_sibling[c as usize] = INVALID;

        if self.first_child[p as usize] == INVALID {
            self.first_child[p as usize] = c;
        } else {
            // Walk to last child.
            let mut last = self.first_child[p as usize];
            while self.next_sibling[last as usize] != INVALID {
                last = self.next_sibling[last as usize];
            }
            self.next_sibling[last as usize] = c;
            self.prev_sibling[c as usize] = last;
        }
    }

    /// Removes `idx` from its parent's child list without recomputing
    /// transforms.
    fn unlink_from_parent(&mut self, idx: u32) {
        let p = self.parent[idx as usize];
        let prev = self.prev_sibling[idx as usize];
        let next = self.next_sibling[idx as usize];

        if prev != INVALID {
            self.next_sibling[prev as usize] = next;
        } else {
            // Was first child.
            self.first_child[p as usize] = next;
        }

        if next != INVALID {
            self.prev_sibling[next as usize] = prev;
        }

        self.parent[idx as usize] = INVALID;
        self.prev_sibling[idx as usize] = INVALID;
        self.next_sibling[idx as usize] = INVALID;
    }
}
