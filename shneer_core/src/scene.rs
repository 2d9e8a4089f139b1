// Copyright 2026 the Shneer Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Scene controller: a root plus a drifting population of shneer leaves.
//!
//! Each [`tick`](Scene::tick) moves every leaf left by
//! [`SceneConfig::step`] and classifies it against the viewport:
//!
//! - **Exceeded left**: the leaf is moved right by the viewport width plus
//!   its own global width, so it reappears just past the right edge, and is
//!   given a new random vertical position inside the viewport.
//! - **Exceeded bottom** / **exceeded top**: the leaf is moved up or down by
//!   one viewport height.
//! - Otherwise the leaf is left where it is.
//!
//! All of a leaf's mutations happen with its notifications suspended. After
//! the last leaf, the root notifies once, so a listener attached through
//! [`Scene::attach_listener`] redraws exactly once per tick.
//!
//! The driver (timer, animation-frame callback, test loop) lives outside the
//! crate and calls [`tick`](Scene::tick) once per step.

use alloc::collections::VecDeque;
use alloc::format;

use rand::Rng;

use crate::config::SceneConfig;
use crate::listener::SharedListener;
use crate::node::{NodeId, SceneGraph};
use crate::trace::{
    LeafEvent, ResizeEvent, TickEvent, TickSummaryBuilder, Tracer, WrapEvent,
};
use crate::visibility::{Visibility, VisibilityReport};

/// Name given to the root node.
pub const ROOT_NAME: &str = "scene";

/// Owns a [`SceneGraph`] and the ordered list of its leaves.
///
/// Generic over the random source so tests and demos can seed it.
#[derive(Debug)]
pub struct Scene<R> {
    graph: SceneGraph,
    leaves: VecDeque<NodeId>,
    config: SceneConfig,
    rng: R,
    next_serial: u64,
    tick_index: u64,
}

impl<R: Rng> Scene<R> {
    /// Creates a scene with a root sized to the configured viewport and
    /// [`SceneConfig::initial_leaves`] randomly placed leaves.
    #[must_use]
    pub fn new(config: SceneConfig, rng: R) -> Self {
        let mut graph = SceneGraph::new(ROOT_NAME, config.viewport());
        graph.set_show_bounds(config.show_bounds);
        let mut scene = Self {
            graph,
            leaves: VecDeque::with_capacity(config.initial_leaves),
            config,
            rng,
            next_serial: 0,
            tick_index: 0,
        };
        for _ in 0..config.initial_leaves {
            scene.add_leaf(None);
        }
        scene
    }

    /// Returns the scene graph.
    #[must_use]
    pub fn graph(&self) -> &SceneGraph {
        &self.graph
    }

    /// Returns the root node.
    #[must_use]
    pub fn root(&self) -> NodeId {
        self.graph.root()
    }

    /// Returns the leaves, oldest first.
    pub fn leaves(&self) -> impl ExactSizeIterator<Item = NodeId> + '_ {
        self.leaves.iter().copied()
    }

    /// Returns the number of leaves.
    #[must_use]
    pub fn leaf_count(&self) -> usize {
        self.leaves.len()
    }

    /// Returns the number of completed ticks.
    #[must_use]
    pub fn tick_count(&self) -> u64 {
        self.tick_index
    }

    /// Returns the current configuration. The viewport fields track
    /// [`resize_viewport`](Self::resize_viewport).
    #[must_use]
    pub fn config(&self) -> &SceneConfig {
        &self.config
    }

    /// Enables or disables the debug overlay.
    pub fn set_show_bounds(&mut self, show: bool) {
        self.config.show_bounds = show;
        self.graph.set_show_bounds(show);
    }

    /// Registers `listener` on the root and every current leaf.
    pub fn attach_listener(&mut self, listener: &SharedListener) {
        let root = self.graph.root();
        self.graph.add_listener(root, listener);
        for &leaf in &self.leaves {
            self.graph.add_listener(leaf, listener);
        }
    }

    /// Advances the scene by one step.
    pub fn tick(&mut self) {
        self.tick_traced(&mut Tracer::none());
    }

    /// Like [`tick`](Self::tick), emitting a [`TickEvent`], one [`WrapEvent`]
    /// per corrected leaf, and a [`TickSummary`](crate::trace::TickSummary).
    pub fn tick_traced(&mut self, tracer: &mut Tracer<'_>) {
        let Self {
            graph,
            leaves,
            config,
            rng,
            tick_index,
            ..
        } = self;

        let tick = TickEvent {
            tick_index: *tick_index,
            leaf_count: saturating_u32(leaves.len()),
        };
        tracer.tick(&tick);
        let mut summary = TickSummaryBuilder::new(&tick);

        for &leaf in leaves.iter() {
            let corrected = graph.with_notifications_suspended(leaf, |g| {
                g.translate(leaf, -config.step, 0.0);
                wrap_into_viewport(g, leaf, rng)
            });
            if let Some(report) = corrected {
                let e = WrapEvent {
                    tick_index: *tick_index,
                    node: leaf,
                    edge: report.visibility,
                    global_width: report.global_width,
                    global_height: report.global_height,
                };
                tracer.wrap(&e);
                summary.record_wrap(&e);
            }
        }

        graph.notify(graph.root());
        tracer.tick_summary(&summary.finish());
        *tick_index += 1;
    }

    /// Adds a randomly placed leaf under the root and returns it.
    ///
    /// Leaves are named `shneer{n}` from a serial that never repeats within
    /// a scene. If `listener` is given it is registered on the new leaf.
    pub fn add_leaf(&mut self, listener: Option<&SharedListener>) -> NodeId {
        self.add_leaf_traced(listener, &mut Tracer::none())
    }

    /// Like [`add_leaf`](Self::add_leaf), emitting a [`LeafEvent`].
    pub fn add_leaf_traced(
        &mut self,
        listener: Option<&SharedListener>,
        tracer: &mut Tracer<'_>,
    ) -> NodeId {
        let name = format!("shneer{}", self.next_serial);
        self.next_serial += 1;

        let root = self.graph.root();
        let leaf = self
            .graph
            .create_shneer(root, name, self.config.max_scale, &mut self.rng);
        if let Some(listener) = listener {
            self.graph.add_listener(leaf, listener);
        }
        self.leaves.push_back(leaf);

        tracer.leaf_added(&LeafEvent {
            node: leaf,
            leaf_count: saturating_u32(self.leaves.len()),
        });
        leaf
    }

    /// Detaches and destroys the oldest leaf.
    ///
    /// Returns `false` if the scene has no leaves.
    pub fn remove_leaf(&mut self) -> bool {
        self.remove_leaf_traced(&mut Tracer::none())
    }

    /// Like [`remove_leaf`](Self::remove_leaf), emitting a [`LeafEvent`] when a
    /// leaf was removed.
    pub fn remove_leaf_traced(&mut self, tracer: &mut Tracer<'_>) -> bool {
        let Some(leaf) = self.leaves.pop_front() else {
            return false;
        };
        self.graph.destroy(leaf);
        tracer.leaf_removed(&LeafEvent {
            node: leaf,
            leaf_count: saturating_u32(self.leaves.len()),
        });
        true
    }

    /// Resizes the root's bounding box. Leaves are not repositioned.
    pub fn resize_viewport(&mut self, width: u32, height: u32) {
        self.resize_viewport_traced(width, height, &mut Tracer::none());
    }

    /// Like [`resize_viewport`](Self::resize_viewport), emitting a
    /// [`ResizeEvent`].
    pub fn resize_viewport_traced(&mut self, width: u32, height: u32, tracer: &mut Tracer<'_>) {
        self.graph.resize_root(f64::from(width), f64::from(height));
        self.config.viewport_width = width;
        self.config.viewport_height = height;
        tracer.resize(&ResizeEvent { width, height });
    }
}

/// Applies the wrap-around correction to `leaf`, returning the pre-correction
/// report if the leaf was moved.
fn wrap_into_viewport<R: Rng + ?Sized>(
    graph: &mut SceneGraph,
    leaf: NodeId,
    rng: &mut R,
) -> Option<VisibilityReport> {
    let report = graph.visibility(leaf);
    let viewport = graph.local_bounds(graph.root());
    match report.visibility {
        Visibility::ExceededLeft => {
            graph.translate_as_global(leaf, viewport.width() + report.global_width, 0.0);
            let target_y = viewport.y0 + rng.random::<f64>() * viewport.height();
            let current_y = graph.global_origin(leaf).y;
            graph.translate_as_global(leaf, 0.0, target_y - current_y);
        }
        Visibility::ExceededBottom => graph.translate_as_global(leaf, 0.0, -viewport.height()),
        Visibility::ExceededTop => graph.translate_as_global(leaf, 0.0, viewport.height()),
        Visibility::Visible | Visibility::ExceededRight => return None,
    }
    Some(report)
}

fn saturating_u32(n: usize) -> u32 {
    u32::try_from(n).unwrap_or(u32::MAX)
}

#[cfg(test)]
mod tests {
    use alloc::rc::Rc;
    use alloc::vec::Vec;
    use core::cell::RefCell;

    use kurbo::{Point, Rect};
    use rand::SeedableRng;
    use rand::rngs::SmallRng;

    use super::*;
    use crate::color::Color;
    use crate::listener::Listener;
    use crate::node::{NodeKind, SHNEER_BOUNDS};
    use crate::transform::Transform2d;

    const EPS: f64 = 1e-9;

    #[derive(Default)]
    struct Counter {
        updates: usize,
    }

    impl Listener for Counter {
        fn update(&mut self, _graph: &SceneGraph) {
            self.updates += 1;
        }
    }

    fn counter() -> (Rc<RefCell<Counter>>, SharedListener) {
        let counter = Rc::new(RefCell::new(Counter::default()));
        let shared: SharedListener = counter.clone();
        (counter, shared)
    }

    fn empty_scene(seed: u64) -> Scene<SmallRng> {
        Scene::new(SceneConfig::empty(), SmallRng::seed_from_u64(seed))
    }

    /// Adds an unscaled leaf with its origin at `(x, y)`.
    fn place_leaf(scene: &mut Scene<SmallRng>, x: f64, y: f64) -> NodeId {
        let root = scene.graph.root();
        let color = Color::rgb(1.0, 1.0, 0.0);
        let leaf = scene
            .graph
            .create_node(root, "placed", NodeKind::Shneer { color }, SHNEER_BOUNDS);
        scene
            .graph
            .set_local_transform(leaf, Transform2d::from_translation(x, y));
        scene.leaves.push_back(leaf);
        leaf
    }

    fn assert_near(actual: f64, expected: f64) {
        assert!(
            (actual - expected).abs() < EPS,
            "expected {expected}, got {actual}"
        );
    }

    #[test]
    fn classic_scene_has_named_leaves_under_root() {
        let scene = Scene::new(SceneConfig::classic(), SmallRng::seed_from_u64(1));
        let root = scene.root();
        assert_eq!(scene.leaf_count(), 25);
        assert_eq!(scene.graph().children(root).count(), 25);
        for (i, leaf) in scene.leaves().enumerate() {
            assert_eq!(scene.graph().parent(leaf), Some(root));
            assert_eq!(scene.graph().name(leaf), format!("shneer{i}"));
        }
        assert_eq!(scene.graph().name(root), ROOT_NAME);
        assert_eq!(
            scene.graph().local_bounds(root),
            Rect::new(0.0, 0.0, 1000.0, 600.0)
        );
    }

    #[test]
    fn empty_config_has_no_leaves() {
        let scene = empty_scene(1);
        assert_eq!(scene.leaf_count(), 0);
        assert_eq!(scene.graph().node_count(), 1);
    }

    #[test]
    fn tick_moves_visible_leaf_left_by_step() {
        let mut scene = empty_scene(1);
        let leaf = place_leaf(&mut scene, 500.0, 300.0);
        scene.tick();
        let origin = scene.graph().global_origin(leaf);
        assert_near(origin.x, 497.0);
        assert_near(origin.y, 300.0);
        assert_eq!(scene.tick_count(), 1);
    }

    #[test]
    fn step_is_in_leaf_local_units() {
        let mut scene = empty_scene(1);
        let leaf = place_leaf(&mut scene, 500.0, 300.0);
        scene.graph.scale(leaf, 2.0, 2.0);
        scene.tick();
        assert_near(scene.graph().global_origin(leaf).x, 494.0);
    }

    #[test]
    fn exceeded_left_wraps_to_right_edge() {
        let mut scene = empty_scene(7);
        // After the step the box spans x = -65..-5.
        let leaf = place_leaf(&mut scene, -32.0, 300.0);
        scene.tick();

        let bounds = scene.graph().global_bounds(leaf);
        assert!(
            (935.0..1000.0).contains(&bounds.x0),
            "left edge {} not at the right edge",
            bounds.x0
        );
        assert_near(bounds.x0, 995.0);
        let y = scene.graph().global_origin(leaf).y;
        assert!((0.0..600.0).contains(&y), "y {y} outside the viewport");
    }

    #[test]
    fn exceeded_bottom_and_top_wrap_vertically() {
        let mut scene = empty_scene(1);
        let low = place_leaf(&mut scene, 500.0, 612.0);
        let high = place_leaf(&mut scene, 500.0, -15.0);
        scene.tick();
        assert_near(scene.graph().global_origin(low).y, 12.0);
        assert_near(scene.graph().global_origin(high).y, 585.0);
        // The horizontal step still applies.
        assert_near(scene.graph().global_origin(low).x, 497.0);
    }

    #[test]
    fn exceeded_right_is_left_alone() {
        let mut scene = empty_scene(1);
        let leaf = place_leaf(&mut scene, 1100.0, 300.0);
        scene.tick();
        assert_eq!(
            scene.graph().global_origin(leaf),
            Point::new(1097.0, 300.0)
        );
    }

    #[test]
    fn tick_notifies_root_once_and_leaves_never() {
        let mut scene = Scene::new(SceneConfig::classic(), SmallRng::seed_from_u64(5));
        let (root_count, root_listener) = counter();
        let (leaf_count, leaf_listener) = counter();
        let root = scene.root();
        scene.graph.add_listener(root, &root_listener);
        let leaves: Vec<_> = scene.leaves().collect();
        for &leaf in &leaves {
            scene.graph.add_listener(leaf, &leaf_listener);
        }

        scene.tick();
        scene.tick();
        assert_eq!(root_count.borrow().updates, 2);
        assert_eq!(leaf_count.borrow().updates, 0);
        for leaf in leaves {
            assert!(scene.graph().notify_enabled(leaf));
        }
    }

    #[test]
    fn attach_listener_covers_root_and_leaves() {
        let mut scene = Scene::new(SceneConfig::classic(), SmallRng::seed_from_u64(5));
        let (count, shared) = counter();
        scene.attach_listener(&shared);
        assert_eq!(scene.graph().listener_count(scene.root()), 1);
        for leaf in scene.leaves() {
            assert_eq!(scene.graph().listener_count(leaf), 1);
        }
        scene.tick();
        assert_eq!(count.borrow().updates, 1, "one redraw per tick");
    }

    #[test]
    fn remove_leaf_removes_oldest() {
        let mut scene = empty_scene(2);
        let first = scene.add_leaf(None);
        let second = scene.add_leaf(None);

        assert!(scene.remove_leaf());
        assert!(!scene.graph().is_alive(first));
        assert_eq!(scene.leaves().collect::<Vec<_>>(), [second]);
        assert_eq!(
            scene.graph().children(scene.root()).collect::<Vec<_>>(),
            [second]
        );

        assert!(scene.remove_leaf());
        assert!(!scene.remove_leaf(), "empty scene removal is a no-op");
        assert_eq!(scene.leaf_count(), 0);
    }

    #[test]
    fn add_leaf_names_continue_after_removal() {
        let mut scene = empty_scene(2);
        scene.add_leaf(None);
        scene.add_leaf(None);
        scene.remove_leaf();
        scene.remove_leaf();
        let (_, shared) = counter();
        let leaf = scene.add_leaf(Some(&shared));
        assert_eq!(scene.graph().name(leaf), "shneer2");
        assert_eq!(scene.graph().listener_count(leaf), 1);
        assert_eq!(scene.graph().listener_count(scene.root()), 0);
    }

    #[test]
    fn resize_changes_root_only() {
        let mut scene = empty_scene(3);
        let leaf = place_leaf(&mut scene, 500.0, 300.0);
        scene.resize_viewport(1280, 720);
        assert_eq!(
            scene.graph().local_bounds(scene.root()),
            Rect::new(0.0, 0.0, 1280.0, 720.0)
        );
        assert_eq!(scene.config().viewport_width, 1280);
        assert_eq!(scene.config().viewport_height, 720);
        assert_eq!(
            scene.graph().global_origin(leaf),
            Point::new(500.0, 300.0)
        );
    }

    #[test]
    fn same_seed_same_animation() {
        let run = |seed| {
            let mut scene = Scene::new(SceneConfig::classic(), SmallRng::seed_from_u64(seed));
            for _ in 0..300 {
                scene.tick();
            }
            scene
                .leaves()
                .map(|leaf| scene.graph().world_transform(leaf))
                .collect::<Vec<_>>()
        };
        assert_eq!(run(99), run(99));
    }

    #[test]
    fn no_leaf_stays_past_left_edge() {
        let mut scene = Scene::new(SceneConfig::classic(), SmallRng::seed_from_u64(17));
        for _ in 0..500 {
            scene.tick();
            for leaf in scene.leaves() {
                assert_ne!(
                    scene.graph().visibility(leaf).visibility,
                    Visibility::ExceededLeft,
                    "{leaf:?} left behind after tick {}",
                    scene.tick_count()
                );
            }
        }
    }

    #[test]
    fn show_bounds_follows_config() {
        let config = SceneConfig {
            show_bounds: true,
            ..SceneConfig::empty()
        };
        let mut scene = Scene::new(config, SmallRng::seed_from_u64(0));
        assert!(scene.graph().show_bounds());
        scene.set_show_bounds(false);
        assert!(!scene.graph().show_bounds());
        assert!(!scene.config().show_bounds);
    }

    #[cfg(feature = "trace")]
    #[test]
    fn traced_operations_emit_events() {
        use crate::trace::{TickSummary, TraceSink};

        #[derive(Default)]
        struct Sink {
            ticks: Vec<TickEvent>,
            wraps: Vec<WrapEvent>,
            summaries: Vec<TickSummary>,
            added: Vec<LeafEvent>,
            removed: Vec<LeafEvent>,
            resizes: Vec<ResizeEvent>,
        }

        impl TraceSink for Sink {
            fn on_tick(&mut self, e: &TickEvent) {
                self.ticks.push(*e);
            }
            fn on_wrap(&mut self, e: &WrapEvent) {
                self.wraps.push(*e);
            }
            fn on_tick_summary(&mut self, s: &TickSummary) {
                self.summaries.push(*s);
            }
            fn on_leaf_added(&mut self, e: &LeafEvent) {
                self.added.push(*e);
            }
            fn on_leaf_removed(&mut self, e: &LeafEvent) {
                self.removed.push(*e);
            }
            fn on_resize(&mut self, e: &ResizeEvent) {
                self.resizes.push(*e);
            }
        }

        let mut scene = empty_scene(4);
        let wrapped = place_leaf(&mut scene, -32.0, 300.0);
        place_leaf(&mut scene, 500.0, 300.0);

        let mut sink = Sink::default();
        {
            let mut tracer = Tracer::new(&mut sink);
            scene.tick_traced(&mut tracer);
            let added = scene.add_leaf_traced(None, &mut tracer);
            assert_eq!(scene.graph().name(added), "shneer0");
            scene.remove_leaf_traced(&mut tracer);
            scene.resize_viewport_traced(800, 400, &mut tracer);
        }

        assert_eq!(
            sink.ticks,
            [TickEvent {
                tick_index: 0,
                leaf_count: 2
            }]
        );
        assert_eq!(sink.wraps.len(), 1);
        assert_eq!(sink.wraps[0].node, wrapped);
        assert_eq!(sink.wraps[0].edge, Visibility::ExceededLeft);
        assert_eq!(sink.wraps[0].global_width, 60.0);
        assert_eq!(
            sink.summaries,
            [TickSummary {
                tick_index: 0,
                leaf_count: 2,
                wrapped: 1
            }]
        );
        assert_eq!(sink.added.len(), 1);
        assert_eq!(sink.added[0].leaf_count, 3);
        assert_eq!(sink.removed.len(), 1);
        assert_eq!(sink.removed[0].node, wrapped);
        assert_eq!(sink.removed[0].leaf_count, 2);
        assert_eq!(
            sink.resizes,
            [ResizeEvent {
                width: 800,
                height: 400
            }]
        );
    }
}
