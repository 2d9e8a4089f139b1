// Copyright 2026 the Shneer Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Scene configuration.

use kurbo::Rect;

/// Configuration for a [`Scene`](crate::scene::Scene).
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct SceneConfig {
    /// Initial viewport width (root bounding-box width).
    pub viewport_width: u32,
    /// Initial viewport height (root bounding-box height).
    pub viewport_height: u32,
    /// Number of leaves created by [`Scene::new`](crate::scene::Scene::new).
    pub initial_leaves: usize,
    /// Leftward translation applied to every leaf on each tick, in the
    /// leaf's local units.
    pub step: f64,
    /// Upper bound of the random uniform scale given to new leaves.
    pub max_scale: f64,
    /// Whether rendering draws the debug overlay.
    pub show_bounds: bool,
}

impl SceneConfig {
    /// 1000 × 600 viewport with 25 leaves drifting 3 units per tick.
    #[must_use]
    pub const fn classic() -> Self {
        Self {
            viewport_width: 1000,
            viewport_height: 600,
            initial_leaves: 25,
            step: 3.0,
            max_scale: 5.0,
            show_bounds: false,
        }
    }

    /// Same as [`classic`](Self::classic) but starts without leaves.
    #[must_use]
    pub const fn empty() -> Self {
        Self {
            initial_leaves: 0,
            ..Self::classic()
        }
    }

    /// Returns the initial root bounding box.
    #[must_use]
    pub fn viewport(&self) -> Rect {
        Rect::new(
            0.0,
            0.0,
            f64::from(self.viewport_width),
            f64::from(self.viewport_height),
        )
    }
}

impl Default for SceneConfig {
    fn default() -> Self {
        Self::classic()
    }
}
