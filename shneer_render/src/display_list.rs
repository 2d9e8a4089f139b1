// Copyright 2026 the Shneer Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Display list: an ordered sequence of draw commands for one frame.

use alloc::string::{String, ToString};
use alloc::vec::Vec;

use kurbo::{Point, Rect};
use shneer_core::color::Color;
use shneer_core::surface::Surface;
use shneer_core::transform::Transform2d;

/// A single recorded draw call.
///
/// Every command carries the current transform matrix (CTM) that was in
/// effect when it was issued, so geometry can be mapped to surface space
/// without replaying the save/restore stack.
#[derive(Clone, Debug, PartialEq)]
pub enum DrawCommand {
    /// Clear a region.
    Clear {
        /// Region to clear, in the coordinate space of `transform`.
        region: Rect,
        /// CTM at the time of the call.
        transform: Transform2d,
    },
    /// Fill text centered on a point.
    Text {
        /// The string drawn.
        text: String,
        /// Anchor point in local coordinates.
        at: Point,
        /// Fill color.
        color: Color,
        /// CTM at the time of the call.
        transform: Transform2d,
    },
    /// Stroke a rectangle outline.
    StrokeRect {
        /// Rectangle in local coordinates.
        rect: Rect,
        /// Stroke color.
        color: Color,
        /// Stroke width in local units.
        width: f64,
        /// CTM at the time of the call.
        transform: Transform2d,
    },
    /// Stroke a line segment.
    StrokeLine {
        /// Start point in local coordinates.
        from: Point,
        /// End point in local coordinates.
        to: Point,
        /// Stroke color.
        color: Color,
        /// Stroke width in local units.
        width: f64,
        /// CTM at the time of the call.
        transform: Transform2d,
    },
}

impl DrawCommand {
    /// Returns the CTM the command was recorded under.
    #[must_use]
    pub fn transform(&self) -> Transform2d {
        match self {
            Self::Clear { transform, .. }
            | Self::Text { transform, .. }
            | Self::StrokeRect { transform, .. }
            | Self::StrokeLine { transform, .. } => *transform,
        }
    }
}

/// A [`Surface`] that records draw calls instead of rasterizing them.
///
/// A display list holds one frame: [`Surface::clear`] discards everything
/// recorded so far and starts the frame with a `Clear` command. The CTM and
/// save stack behave like a canvas 2-D context, including `restore` on an
/// empty stack being a no-op.
#[derive(Clone, Debug, Default)]
pub struct DisplayList {
    commands: Vec<DrawCommand>,
    ctm: Transform2d,
    stack: Vec<Transform2d>,
}

impl DisplayList {
    /// Creates an empty display list with an identity transform.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the recorded commands in issue order.
    #[must_use]
    pub fn commands(&self) -> &[DrawCommand] {
        &self.commands
    }

    /// Returns the number of recorded commands.
    #[must_use]
    pub fn len(&self) -> usize {
        self.commands.len()
    }

    /// Returns `true` if nothing has been recorded.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.commands.is_empty()
    }

    /// Returns the number of `Text` commands.
    #[must_use]
    pub fn text_count(&self) -> usize {
        self.commands
            .iter()
            .filter(|c| matches!(c, DrawCommand::Text { .. }))
            .count()
    }

    /// Returns the surface-space anchor of every `Text` command whose string
    /// equals `text`.
    pub fn text_positions<'a>(&'a self, text: &'a str) -> impl Iterator<Item = Point> + 'a {
        self.commands.iter().filter_map(move |c| match c {
            DrawCommand::Text {
                text: t,
                at,
                transform,
                ..
            } if t == text => Some(transform.transform_point(*at)),
            _ => None,
        })
    }

    /// Returns the number of saved states not yet restored.
    #[must_use]
    pub fn save_depth(&self) -> usize {
        self.stack.len()
    }

    /// Returns the current transform matrix.
    #[must_use]
    pub fn current_transform(&self) -> Transform2d {
        self.ctm
    }

    /// Discards all commands and resets the CTM and save stack.
    pub fn reset(&mut self) {
        self.commands.clear();
        self.ctm = Transform2d::IDENTITY;
        self.stack.clear();
    }
}

impl Surface for DisplayList {
    fn clear(&mut self, region: Rect) {
        self.commands.clear();
        self.commands.push(DrawCommand::Clear {
            region,
            transform: self.ctm,
        });
    }

    fn save(&mut self) {
        self.stack.push(self.ctm);
    }

    fn restore(&mut self) {
        if let Some(ctm) = self.stack.pop() {
            self.ctm = ctm;
        }
    }

    fn transform(&mut self, transform: Transform2d) {
        self.ctm *= transform;
    }

    fn fill_text(&mut self, text: &str, at: Point, color: Color) {
        self.commands.push(DrawCommand::Text {
            text: text.to_string(),
            at,
            color,
            transform: self.ctm,
        });
    }

    fn stroke_rect(&mut self, rect: Rect, color: Color, width: f64) {
        self.commands.push(DrawCommand::StrokeRect {
            rect,
            color,
            width,
            transform: self.ctm,
        });
    }

    fn stroke_line(&mut self, from: Point, to: Point, color: Color, width: f64) {
        self.commands.push(DrawCommand::StrokeLine {
            from,
            to,
            color,
            width,
            transform: self.ctm,
        });
    }
}
