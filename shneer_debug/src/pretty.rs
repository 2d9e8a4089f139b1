// Copyright 2026 the Shneer Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Human-readable trace output.
//!
//! [`PrettyPrintSink`] implements [`TraceSink`] and writes one line per event
//! to a [`Write`](std::io::Write) destination (default: stderr).

use std::io::Write;

use shneer_core::trace::{
    LeafEvent, ResizeEvent, TickEvent, TickSummary, TraceSink, WrapEvent,
};
use shneer_core::visibility::Visibility;

/// Writes human-readable trace lines to a [`Write`](std::io::Write) destination.
pub struct PrettyPrintSink<W: Write = Box<dyn Write>> {
    writer: W,
}

impl<W: Write> std::fmt::Debug for PrettyPrintSink<W> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PrettyPrintSink").finish_non_exhaustive()
    }
}

impl PrettyPrintSink {
    /// Creates a sink that writes to stderr.
    #[must_use]
    pub fn stderr() -> Self {
        Self {
            writer: Box::new(std::io::stderr()),
        }
    }

    /// Creates a sink that writes to a boxed writer.
    #[must_use]
    pub fn new(writer: Box<dyn Write>) -> Self {
        Self { writer }
    }
}

impl<W: Write> PrettyPrintSink<W> {
    /// Creates a sink that writes to the given destination.
    #[must_use]
    pub fn with_writer(writer: W) -> Self {
        Self { writer }
    }

    /// Consumes the sink and returns the destination.
    #[must_use]
    pub fn into_writer(self) -> W {
        self.writer
    }
}

fn edge_name(edge: Visibility) -> &'static str {
    match edge {
        Visibility::Visible => "visible",
        Visibility::ExceededLeft => "left",
        Visibility::ExceededRight => "right",
        Visibility::ExceededTop => "top",
        Visibility::ExceededBottom => "bottom",
    }
}

impl<W: Write> TraceSink for PrettyPrintSink<W> {
    fn on_tick(&mut self, e: &TickEvent) {
        let _ = writeln!(
            self.writer,
            "[tick] index={} leaves={}",
            e.tick_index, e.leaf_count,
        );
    }

    fn on_wrap(&mut self, e: &WrapEvent) {
        let _ = writeln!(
            self.writer,
            "[wrap] tick={} node={:?} edge={} size={:.1}x{:.1}",
            e.tick_index,
            e.node,
            edge_name(e.edge),
            e.global_width,
            e.global_height,
        );
    }

    fn on_tick_summary(&mut self, s: &TickSummary) {
        let _ = writeln!(
            self.writer,
            "[summary] tick={} leaves={} wrapped={}",
            s.tick_index, s.leaf_count, s.wrapped,
        );
    }

    fn on_leaf_added(&mut self, e: &LeafEvent) {
        let _ = writeln!(
            self.writer,
            "[leaf:add] node={:?} leaves={}",
            e.node, e.leaf_count,
        );
    }

    fn on_leaf_removed(&mut self, e: &LeafEvent) {
        let _ = writeln!(
            self.writer,
            "[leaf:remove] node={:?} leaves={}",
            e.node, e.leaf_count,
        );
    }

    fn on_resize(&mut self, e: &ResizeEvent) {
        let _ = writeln!(self.writer, "[resize] {}x{}", e.width, e.height);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use shneer_core::node::NodeId;

    #[test]
    fn pretty_print_tick() {
        let mut sink = PrettyPrintSink::with_writer(Vec::<u8>::new());
        sink.on_tick(&TickEvent {
            tick_index: 1,
            leaf_count: 25,
        });
        let output = String::from_utf8(sink.into_writer()).unwrap();
        assert_eq!(output, "[tick] index=1 leaves=25\n");
    }

    #[test]
    fn pretty_print_wrap_and_leaves() {
        let mut sink = PrettyPrintSink::with_writer(Vec::<u8>::new());
        let node = NodeId::from_raw(4, 2);
        sink.on_wrap(&WrapEvent {
            tick_index: 9,
            node,
            edge: Visibility::ExceededBottom,
            global_width: 60.0,
            global_height: 20.0,
        });
        sink.on_leaf_removed(&LeafEvent {
            node,
            leaf_count: 3,
        });
        sink.on_resize(&ResizeEvent {
            width: 640,
            height: 480,
        });
        let output = String::from_utf8(sink.into_writer()).unwrap();
        let lines: Vec<_> = output.lines().collect();
        assert_eq!(
            lines,
            [
                "[wrap] tick=9 node=NodeId(4@gen2) edge=bottom size=60.0x20.0",
                "[leaf:remove] node=NodeId(4@gen2) leaves=3",
                "[resize] 640x480",
            ]
        );
    }
}
