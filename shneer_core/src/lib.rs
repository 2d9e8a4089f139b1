// Copyright 2026 the Shneer Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Core types for a retained 2-D scene graph of drifting text labels.
//!
//! `shneer_core` provides an affine-transformed node tree whose global
//! transforms are kept consistent on every mutation, a classifier that tells
//! where a node sits relative to the viewport, and a scene controller that
//! animates a population of "shneer" labels across it. It is `no_std`
//! compatible (with `alloc`) and uses array-based struct-of-arrays storage
//! with index handles.
//!
//! # Architecture
//!
//! ```text
//!   driver (timer / rAF / test loop)
//!       │
//!       ▼
//!   Scene::tick() ──► SceneGraph::translate / translate_as_global
//!       │                 (per leaf, notifications suspended)
//!       │                       │
//!       │                       ▼
//!       │              global transforms recomputed for the subtree
//!       ▼
//!   root.notify() ──► Listener::update(&SceneGraph)
//!                             │
//!                             ▼
//!                SceneGraph::render_all(root, &mut impl Surface)
//! ```
//!
//! **[`node`]**: Struct-of-arrays scene graph with generational handles,
//! transform mutation, listeners, and recursive rendering.
//!
//! **[`transform`]**: 2-D affine transform value type.
//!
//! **[`visibility`]**: Classification of a node's global bounding box against
//! the viewport.
//!
//! **[`scene`]**: The scene controller and its wrap-around tick.
//!
//! **[`listener`]** / **[`surface`]**: The contracts a view implements to be
//! notified of changes and to receive drawing calls.
//!
//! **[`config`]**: Scene parameters and presets.
//!
//! **[`trace`]**: [`TraceSink`](trace::TraceSink) trait and event types for
//! scene instrumentation, with zero-overhead [`Tracer`](trace::Tracer)
//! wrapper.
//!
//! # Crate features
//!
//! - `std` (disabled by default): Enables `std` support in dependencies.
//! - `trace` (disabled by default): Enables `Tracer` method bodies (one branch
//!   per call site).

#![no_std]
#![cfg_attr(docsrs, feature(doc_auto_cfg))]

extern crate alloc;

pub mod color;
pub mod config;
pub mod listener;
pub mod node;
pub mod scene;
pub mod surface;
pub mod trace;
pub mod transform;
pub mod visibility;
