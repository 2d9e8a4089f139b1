// Copyright 2026 the Shneer Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Node variants.

use kurbo::Rect;

use crate::color::Color;

/// Text drawn by every [`NodeKind::Shneer`] node.
pub const SHNEER_TEXT: &str = "shneer";

/// Local bounding box of a [`NodeKind::Shneer`] node: 60 × 20 centered on
/// the origin.
pub const SHNEER_BOUNDS: Rect = Rect::new(-30.0, -10.0, 30.0, 10.0);

/// Smallest random scale given to a new shneer node, keeping its transform
/// invertible.
pub const MIN_SHNEER_SCALE: f64 = 0.05;

/// What a node is and how it draws itself.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum NodeKind {
    /// The scene root. Its bounds are the viewport; it draws nothing.
    Root,
    /// A text label reading [`SHNEER_TEXT`].
    Shneer {
        /// Fill color of the label.
        color: Color,
    },
}

impl NodeKind {
    /// Returns the color used for this node's debug overlay.
    #[must_use]
    pub const fn debug_color(&self) -> Color {
        match self {
            Self::Root => Color::BLACK,
            Self::Shneer { color } => *color,
        }
    }
}
