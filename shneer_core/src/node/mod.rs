// Copyright 2026 the Shneer Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Scene graph data model.
//!
//! A *node* is an element of a 2-D scene tree. Each node has:
//!
//! - An identity ([`NodeId`]), a generational handle that becomes stale when
//!   the node is destroyed, preventing use-after-free bugs at the API level.
//! - Topology: parent, first-child, and sibling links forming an ordered tree.
//! - **Local properties** set by the caller: a [`NodeKind`], a local bounding
//!   box, and a local transform mutated through
//!   [`translate`](SceneGraph::translate), [`scale`](SceneGraph::scale),
//!   [`rotate`](SceneGraph::rotate), and
//!   [`translate_as_global`](SceneGraph::translate_as_global).
//! - **Global transform**, the product of all ancestor local transforms with
//!   the node's own, recomputed for the whole subtree on every mutation.
//! - A set of [listeners](crate::listener) notified after each mutation.
//!
//! Nodes are stored in struct-of-arrays layout with index-based handles.

mod graph;
mod id;
mod kind;
mod propagate;
mod render;
mod traverse;

pub use graph::SceneGraph;
pub use id::{INVALID, NodeId};
pub use kind::{MIN_SHNEER_SCALE, NodeKind, SHNEER_BOUNDS, SHNEER_TEXT};
pub use traverse::Children;
