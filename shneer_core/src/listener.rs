// Copyright 2026 the Shneer Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Change-notification contract between the scene graph and its views.
//!
//! A node notifies its listeners after every transform mutation, once the
//! whole subtree's global transforms are consistent again. Listeners receive
//! no diff: they re-read whatever tree state they need from the graph handed
//! to [`Listener::update`], typically by redrawing the whole scene.
//!
//! Listeners are shared between many nodes (a single view usually listens to
//! the root and every leaf), so they are registered as [`SharedListener`]
//! handles and compared by identity.
//!
//! # Frame loop pseudocode
//!
//! ```rust,ignore
//! let view: SharedListener = Rc::new(RefCell::new(SceneView::new(surface, w, h)));
//! scene.attach_listener(&view);
//!
//! // Driven by a timer or animation-frame callback:
//! fn on_frame() {
//!     // All leaf mutations run with notifications suspended, then the root
//!     // notifies once and the view redraws.
//!     scene.tick();
//! }
//! ```

use alloc::rc::Rc;
use core::cell::RefCell;

use crate::node::SceneGraph;

/// Receives change notifications from scene-graph nodes.
///
/// Calls are synchronous and complete before the notifying mutation returns.
pub trait Listener {
    /// Called after a node this listener is registered on has changed.
    fn update(&mut self, graph: &SceneGraph);
}

/// A listener handle that can be registered on any number of nodes.
pub type SharedListener = Rc<RefCell<dyn Listener>>;

/// Returns whether two handles refer to the same listener.
#[inline]
#[must_use]
pub fn same_listener(a: &SharedListener, b: &SharedListener) -> bool {
    core::ptr::addr_eq(Rc::as_ptr(a), Rc::as_ptr(b))
}
