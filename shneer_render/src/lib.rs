// Copyright 2026 the Shneer Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Software render target and view for shneer scenes.
//!
//! This crate sits between [`shneer_core`]'s scene graph and whatever
//! actually puts pixels on screen. It defines:
//!
//! - [`DisplayList`]: a [`Surface`](shneer_core::surface::Surface) that
//!   records [`DrawCommand`]s with the transform each was issued under
//! - [`SceneView`]: a [`Listener`](shneer_core::listener::Listener) that
//!   clears its surface and redraws the whole scene on every notification

#![no_std]
#![cfg_attr(docsrs, feature(doc_cfg))]

extern crate alloc;

mod display_list;
mod view;

pub use display_list::{DisplayList, DrawCommand};
pub use view::SceneView;
