// Copyright 2026 the Shneer Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Redraw-on-notify view.

use kurbo::Rect;
use shneer_core::listener::Listener;
use shneer_core::node::SceneGraph;
use shneer_core::surface::Surface;

/// A [`Listener`] that redraws the whole scene onto a [`Surface`] every time
/// it is notified.
///
/// Each redraw clears the canvas region `(0, 0, width, height)` and renders
/// the graph from its root.
#[derive(Debug)]
pub struct SceneView<S> {
    surface: S,
    width: u32,
    height: u32,
    redraws: u64,
}

impl<S: Surface> SceneView<S> {
    /// Creates a view drawing onto `surface`, whose canvas is
    /// `width` × `height`.
    #[must_use]
    pub fn new(surface: S, width: u32, height: u32) -> Self {
        Self {
            surface,
            width,
            height,
            redraws: 0,
        }
    }

    /// Changes the canvas size used for clearing.
    pub fn resize(&mut self, width: u32, height: u32) {
        self.width = width;
        self.height = height;
    }

    /// Returns the canvas size.
    #[must_use]
    pub fn canvas_size(&self) -> (u32, u32) {
        (self.width, self.height)
    }

    /// Returns the number of redraws performed.
    #[must_use]
    pub fn redraw_count(&self) -> u64 {
        self.redraws
    }

    /// Returns the surface.
    #[must_use]
    pub fn surface(&self) -> &S {
        &self.surface
    }

    /// Consumes the view and returns the surface.
    #[must_use]
    pub fn into_surface(self) -> S {
        self.surface
    }

    /// Clears the canvas and renders `graph` from its root.
    pub fn redraw(&mut self, graph: &SceneGraph) {
        self.surface.clear(Rect::new(
            0.0,
            0.0,
            f64::from(self.width),
            f64::from(self.height),
        ));
        graph.render_all(graph.root(), &mut self.surface);
        self.redraws += 1;
    }
}

impl<S: Surface> Listener for SceneView<S> {
    fn update(&mut self, graph: &SceneGraph) {
        self.redraw(graph);
    }
}

#[cfg(test)]
mod tests {
    use alloc::rc::Rc;
    use alloc::vec::Vec;
    use core::cell::RefCell;

    use rand::SeedableRng;
    use rand::rngs::SmallRng;
    use shneer_core::config::SceneConfig;
    use shneer_core::listener::SharedListener;
    use shneer_core::node::SHNEER_TEXT;
    use shneer_core::scene::Scene;

    use super::*;
    use crate::{DisplayList, DrawCommand};

    fn attached(config: SceneConfig) -> (Scene<SmallRng>, Rc<RefCell<SceneView<DisplayList>>>) {
        let mut scene = Scene::new(config, SmallRng::seed_from_u64(8));
        let view = Rc::new(RefCell::new(SceneView::new(
            DisplayList::new(),
            config.viewport_width,
            config.viewport_height,
        )));
        let shared: SharedListener = view.clone();
        scene.attach_listener(&shared);
        (scene, view)
    }

    #[test]
    fn tick_redraws_once_with_every_leaf() {
        let (mut scene, view) = attached(SceneConfig::classic());
        scene.tick();

        let view = view.borrow();
        assert_eq!(view.redraw_count(), 1);
        let list = view.surface();
        assert_eq!(
            list.commands()[0],
            DrawCommand::Clear {
                region: Rect::new(0.0, 0.0, 1000.0, 600.0),
                transform: shneer_core::transform::Transform2d::IDENTITY,
            }
        );
        assert_eq!(list.text_count(), scene.leaf_count());
        assert_eq!(list.save_depth(), 0);
    }

    #[test]
    fn labels_are_drawn_at_leaf_origins() {
        let (mut scene, view) = attached(SceneConfig::classic());
        scene.tick();

        let drawn: Vec<_> = view.borrow().surface().text_positions(SHNEER_TEXT).collect();
        let expected: Vec<_> = scene
            .leaves()
            .map(|leaf| scene.graph().global_origin(leaf))
            .collect();
        assert_eq!(drawn.len(), expected.len());
        for (d, e) in drawn.iter().zip(&expected) {
            assert!(
                (d.x - e.x).abs() < 1e-9 && (d.y - e.y).abs() < 1e-9,
                "drawn at {d:?}, leaf at {e:?}"
            );
        }
    }

    #[test]
    fn debug_overlay_adds_strokes() {
        let config = SceneConfig {
            initial_leaves: 3,
            show_bounds: true,
            ..SceneConfig::classic()
        };
        let (mut scene, view) = attached(config);
        scene.tick();

        let view = view.borrow();
        let list = view.surface();
        let rects = list
            .commands()
            .iter()
            .filter(|c| matches!(c, DrawCommand::StrokeRect { .. }))
            .count();
        // Root plus three leaves.
        assert_eq!(rects, 4);
        // Leaf labels plus one name per node.
        assert_eq!(list.text_count(), 3 + 4);
    }

    #[test]
    fn resize_changes_clear_region() {
        let (mut scene, view) = attached(SceneConfig::empty());
        scene.resize_viewport(640, 480);
        view.borrow_mut().resize(640, 480);
        scene.tick();

        let view = view.borrow();
        assert_eq!(view.canvas_size(), (640, 480));
        assert!(matches!(
            view.surface().commands()[0],
            DrawCommand::Clear { region, .. } if region == Rect::new(0.0, 0.0, 640.0, 480.0)
        ));
    }
}
