// Copyright 2026 the Shneer Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Recording, pretty-printing, and Chrome trace export for shneer
//! diagnostics.
//!
//! This crate provides [`TraceSink`](shneer_core::trace::TraceSink)
//! implementations for development and post-mortem analysis:
//!
//! - [`pretty::PrettyPrintSink`]: human-readable one-line-per-event output.
//! - [`recorder::RecorderSink`]: compact binary recording with
//!   [`recorder::decode`] for playback.
//! - [`chrome::export`]: writes Chrome Trace Event Format JSON from recorded
//!   bytes.
//! - [`FanOut`]: forwards every event to two sinks.

pub mod chrome;
pub mod pretty;
pub mod recorder;

use shneer_core::trace::{LeafEvent, ResizeEvent, TickEvent, TickSummary, TraceSink, WrapEvent};

/// A [`TraceSink`] that forwards every event to two sinks, in order.
#[derive(Debug)]
pub struct FanOut<A, B> {
    /// First destination.
    pub first: A,
    /// Second destination.
    pub second: B,
}

impl<A: TraceSink, B: TraceSink> TraceSink for FanOut<A, B> {
    fn on_tick(&mut self, e: &TickEvent) {
        self.first.on_tick(e);
        self.second.on_tick(e);
    }

    fn on_wrap(&mut self, e: &WrapEvent) {
        self.first.on_wrap(e);
        self.second.on_wrap(e);
    }

    fn on_tick_summary(&mut self, s: &TickSummary) {
        self.first.on_tick_summary(s);
        self.second.on_tick_summary(s);
    }

    fn on_leaf_added(&mut self, e: &LeafEvent) {
        self.first.on_leaf_added(e);
        self.second.on_leaf_added(e);
    }

    fn on_leaf_removed(&mut self, e: &LeafEvent) {
        self.first.on_leaf_removed(e);
        self.second.on_leaf_removed(e);
    }

    fn on_resize(&mut self, e: &ResizeEvent) {
        self.first.on_resize(e);
        self.second.on_resize(e);
    }
}
