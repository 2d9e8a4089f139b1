// Copyright 2026 the Shneer Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Immediate-mode 2-D render target.
//!
//! [`Surface`] is the only drawing interface the scene graph uses. It mirrors
//! the subset of a canvas 2-D context that the renderer needs: clearing,
//! saving and restoring the coordinate space, concatenating a transform onto
//! it, and drawing text. The stroke methods are only used by the debug
//! overlay and default to no-ops.

use kurbo::{Point, Rect};

use crate::color::Color;
use crate::transform::Transform2d;

/// A 2-D drawing surface with a save/restore coordinate-space stack.
pub trait Surface {
    /// Clears `region`, given in surface (untransformed) coordinates.
    fn clear(&mut self, region: Rect);

    /// Pushes the current coordinate-space state.
    fn save(&mut self);

    /// Pops the most recently saved coordinate-space state.
    fn restore(&mut self);

    /// Concatenates `transform` onto the current coordinate space.
    fn transform(&mut self, transform: Transform2d);

    /// Draws `text` centered (horizontally and vertically) on `at`.
    fn fill_text(&mut self, text: &str, at: Point, color: Color);

    /// Strokes the outline of `rect`.
    fn stroke_rect(&mut self, rect: Rect, color: Color, width: f64) {
        _ = (rect, color, width);
    }

    /// Strokes a straight line from `from` to `to`.
    fn stroke_line(&mut self, from: Point, to: Point, color: Color, width: f64) {
        _ = (from, to, color, width);
    }
}
