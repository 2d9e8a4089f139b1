// Copyright 2026 the Shneer Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Tracing and diagnostics for the scene controller.
//!
//! This module provides a [`TraceSink`] trait with per-event methods that
//! the [`Scene`](crate::scene::Scene) calls as it ticks, adds and removes
//! leaves, and resizes. All method bodies default to no-ops, so implementing
//! only the events you care about is fine.
//!
//! [`Tracer`] wraps an optional `&mut dyn TraceSink`. When the `trace` feature
//! is **off**, every `Tracer` method compiles to nothing (zero overhead). When
//! **on**, each method performs a single `Option` branch before dispatching.
//!
//! [`TickSummaryBuilder`] is a convenience helper that counts wrap-around
//! corrections during a tick and produces a [`TickSummary`] at the end.
//!
//! # Crate features
//!
//! - `trace` enables the `Tracer` method bodies (one branch per call).

use crate::node::NodeId;
use crate::visibility::Visibility;

// ---------------------------------------------------------------------------
// Event structs
// ---------------------------------------------------------------------------

/// Emitted at the start of a tick, before any leaf moves.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct TickEvent {
    /// Monotonic tick counter, starting at 0.
    pub tick_index: u64,
    /// Number of leaves the tick will move.
    pub leaf_count: u32,
}

/// Emitted for every leaf that the tick moved back into the viewport.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct WrapEvent {
    /// Tick counter.
    pub tick_index: u64,
    /// The leaf that was corrected.
    pub node: NodeId,
    /// The side the leaf had exceeded before correction.
    pub edge: Visibility,
    /// Global bounding-box width before correction.
    pub global_width: f64,
    /// Global bounding-box height before correction.
    pub global_height: f64,
}

/// Per-tick summary produced by [`TickSummaryBuilder`].
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct TickSummary {
    /// Tick counter.
    pub tick_index: u64,
    /// Number of leaves moved.
    pub leaf_count: u32,
    /// Number of leaves corrected by wrap-around.
    pub wrapped: u32,
}

/// Emitted when a leaf is added to or removed from the scene.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct LeafEvent {
    /// The leaf added or removed. After removal the handle is stale.
    pub node: NodeId,
    /// Number of leaves after the change.
    pub leaf_count: u32,
}

/// Emitted when the viewport is resized.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ResizeEvent {
    /// New viewport width.
    pub width: u32,
    /// New viewport height.
    pub height: u32,
}

// ---------------------------------------------------------------------------
// TraceSink trait
// ---------------------------------------------------------------------------

/// Receives trace events from the scene controller.
///
/// All methods have default no-op implementations, so you only need to
/// override the events you care about.
pub trait TraceSink {
    /// Called at the start of a tick.
    fn on_tick(&mut self, e: &TickEvent) {
        _ = e;
    }

    /// Called when a leaf is wrapped back into the viewport.
    fn on_wrap(&mut self, e: &WrapEvent) {
        _ = e;
    }

    /// Called with the per-tick summary.
    fn on_tick_summary(&mut self, s: &TickSummary) {
        _ = s;
    }

    /// Called after a leaf is added.
    fn on_leaf_added(&mut self, e: &LeafEvent) {
        _ = e;
    }

    /// Called after a leaf is removed.
    fn on_leaf_removed(&mut self, e: &LeafEvent) {
        _ = e;
    }

    /// Called after the viewport is resized.
    fn on_resize(&mut self, e: &ResizeEvent) {
        _ = e;
    }
}

// ---------------------------------------------------------------------------
// NoopSink
// ---------------------------------------------------------------------------

/// A [`TraceSink`] that discards all events.
#[derive(Clone, Copy, Debug, Default)]
pub struct NoopSink;

impl TraceSink for NoopSink {}

// ---------------------------------------------------------------------------
// Tracer wrapper
// ---------------------------------------------------------------------------

/// Thin wrapper around an optional [`TraceSink`].
///
/// When the `trace` feature is **off**, every method compiles to nothing. When
/// **on**, each method checks the inner `Option` (one branch) before
/// dispatching to the sink.
pub struct Tracer<'a> {
    #[cfg(feature = "trace")]
    sink: Option<&'a mut dyn TraceSink>,
    #[cfg(not(feature = "trace"))]
    _marker: core::marker::PhantomData<&'a mut dyn TraceSink>,
}

impl core::fmt::Debug for Tracer<'_> {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("Tracer").finish_non_exhaustive()
    }
}

impl<'a> Tracer<'a> {
    /// Creates a tracer that dispatches to the given sink.
    #[inline]
    #[must_use]
    pub fn new(sink: &'a mut dyn TraceSink) -> Self {
        #[cfg(feature = "trace")]
        {
            Self { sink: Some(sink) }
        }
        #[cfg(not(feature = "trace"))]
        {
            _ = sink;
            Self {
                _marker: core::marker::PhantomData,
            }
        }
    }

    /// Creates a tracer that discards all events.
    #[inline]
    #[must_use]
    pub fn none() -> Self {
        #[cfg(feature = "trace")]
        {
            Self { sink: None }
        }
        #[cfg(not(feature = "trace"))]
        {
            Self {
                _marker: core::marker::PhantomData,
            }
        }
    }

    /// Emits a [`TickEvent`].
    #[inline]
    pub fn tick(&mut self, e: &TickEvent) {
        #[cfg(feature = "trace")]
        if let Some(s) = &mut self.sink {
            s.on_tick(e);
        }
        #[cfg(not(feature = "trace"))]
        {
            _ = e;
        }
    }

    /// Emits a [`WrapEvent`].
    #[inline]
    pub fn wrap(&mut self, e: &WrapEvent) {
        #[cfg(feature = "trace")]
        if let Some(s) = &mut self.sink {
            s.on_wrap(e);
        }
        #[cfg(not(feature = "trace"))]
        {
            _ = e;
        }
    }

    /// Emits a [`TickSummary`].
    #[inline]
    pub fn tick_summary(&mut self, s: &TickSummary) {
        #[cfg(feature = "trace")]
        if let Some(sink) = &mut self.sink {
            sink.on_tick_summary(s);
        }
        #[cfg(not(feature = "trace"))]
        {
            _ = s;
        }
    }

    /// Emits a leaf-added [`LeafEvent`].
    #[inline]
    pub fn leaf_added(&mut self, e: &LeafEvent) {
        #[cfg(feature = "trace")]
        if let Some(s) = &mut self.sink {
            s.on_leaf_added(e);
        }
        #[cfg(not(feature = "trace"))]
        {
            _ = e;
        }
    }

    /// Emits a leaf-removed [`LeafEvent`].
    #[inline]
    pub fn leaf_removed(&mut self, e: &LeafEvent) {
        #[cfg(feature = "trace")]
        if let Some(s) = &mut self.sink {
            s.on_leaf_removed(e);
        }
        #[cfg(not(feature = "trace"))]
        {
            _ = e;
        }
    }

    /// Emits a [`ResizeEvent`].
    #[inline]
    pub fn resize(&mut self, e: &ResizeEvent) {
        #[cfg(feature = "trace")]
        if let Some(s) = &mut self.sink {
            s.on_resize(e);
        }
        #[cfg(not(feature = "trace"))]
        {
            _ = e;
        }
    }
}

// ---------------------------------------------------------------------------
// TickSummaryBuilder
// ---------------------------------------------------------------------------

/// Counts wrap-around corrections during a tick and produces a
/// [`TickSummary`].
#[derive(Debug)]
pub struct TickSummaryBuilder {
    tick: TickEvent,
    wrapped: u32,
}

impl TickSummaryBuilder {
    /// Starts building a summary for the given tick.
    #[must_use]
    pub fn new(tick: &TickEvent) -> Self {
        Self {
            tick: *tick,
            wrapped: 0,
        }
    }

    /// Records one wrap-around correction.
    pub fn record_wrap(&mut self, e: &WrapEvent) {
        debug_assert_eq!(e.tick_index, self.tick.tick_index, "wrap from another tick");
        self.wrapped += 1;
    }

    /// Consumes the builder and produces the final [`TickSummary`].
    #[must_use]
    pub fn finish(self) -> TickSummary {
        TickSummary {
            tick_index: self.tick.tick_index,
            leaf_count: self.tick.leaf_count,
            wrapped: self.wrapped,
        }
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
