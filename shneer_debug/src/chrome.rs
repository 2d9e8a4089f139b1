// Copyright 2026 the Shneer Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Chrome Trace Event Format exporter.
//!
//! [`export`] reads recorded bytes from a [`RecorderSink`](super::recorder::RecorderSink)
//! and writes [Chrome Trace Event Format][format] JSON to the given writer.
//!
//! Recorded events carry tick indices rather than wall-clock times, so the
//! exporter lays ticks out back to back, each lasting `us_per_tick`
//! microseconds. A tick becomes a duration slice (`B`/`E`); wraps are
//! instants inside it; leaf and resize events are instants at the end of the
//! most recent tick. The leaf count is also emitted as a counter track.
//!
//! [format]: https://docs.google.com/document/d/1CvAClvFfyA5R-PhYUmn5OOQtYMH4h6I0nSsKchNAySU

use std::io::{self, Write};

use serde_json::{Value, json};
use shneer_core::trace::LeafEvent;

use crate::recorder::{RecordedEvent, decode};

/// Exports recorded events as Chrome Trace Event Format JSON.
///
/// The output is a complete JSON array of trace event objects, suitable for
/// loading into `chrome://tracing` or [Perfetto](https://ui.perfetto.dev/).
pub fn export(bytes: &[u8], us_per_tick: f64, writer: &mut dyn Write) -> io::Result<()> {
    let mut events: Vec<Value> = Vec::new();
    let tick_start = |tick_index: u64| tick_index as f64 * us_per_tick;
    // Timestamp for events that happen between ticks.
    let mut cursor = 0.0;

    for recorded in decode(bytes) {
        match recorded {
            RecordedEvent::Tick(e) => {
                let ts = tick_start(e.tick_index);
                events.push(json!({
                    "ph": "B",
                    "name": "Tick",
                    "cat": "Scene",
                    "ts": ts,
                    "pid": 0,
                    "tid": 0,
                    "args": {
                        "tick_index": e.tick_index,
                        "leaf_count": e.leaf_count,
                    }
                }));
                events.push(leaf_counter(ts, e.leaf_count));
            }
            RecordedEvent::Wrap(e) => {
                events.push(json!({
                    "ph": "i",
                    "name": "Wrap",
                    "cat": "Scene",
                    "ts": tick_start(e.tick_index),
                    "pid": 0,
                    "tid": 0,
                    "s": "t",
                    "args": {
                        "tick_index": e.tick_index,
                        "node": e.node.index(),
                        "edge": format!("{:?}", e.edge),
                        "global_width": e.global_width,
                        "global_height": e.global_height,
                    }
                }));
            }
            RecordedEvent::TickSummary(s) => {
                cursor = tick_start(s.tick_index + 1);
                events.push(json!({
                    "ph": "E",
                    "name": "Tick",
                    "cat": "Scene",
                    "ts": cursor,
                    "pid": 0,
                    "tid": 0,
                    "args": {
                        "tick_index": s.tick_index,
                        "leaf_count": s.leaf_count,
                        "wrapped": s.wrapped,
                    }
                }));
            }
            RecordedEvent::LeafAdded(e) => {
                events.push(leaf_instant("LeafAdded", cursor, &e));
                events.push(leaf_counter(cursor, e.leaf_count));
            }
            RecordedEvent::LeafRemoved(e) => {
                events.push(leaf_instant("LeafRemoved", cursor, &e));
                events.push(leaf_counter(cursor, e.leaf_count));
            }
            RecordedEvent::Resize(e) => {
                events.push(json!({
                    "ph": "i",
                    "name": "Resize",
                    "cat": "Viewport",
                    "ts": cursor,
                    "pid": 0,
                    "tid": 0,
                    "s": "g",
                    "args": {
                        "width": e.width,
                        "height": e.height,
                    }
                }));
            }
        }
    }

    serde_json::to_writer_pretty(writer, &events)?;
    Ok(())
}

fn leaf_instant(name: &str, ts: f64, e: &LeafEvent) -> Value {
    json!({
        "ph": "i",
        "name": name,
        "cat": "Scene",
        "ts": ts,
        "pid": 0,
        "tid": 0,
        "s": "p",
        "args": {
            "node": e.node.index(),
            "leaf_count": e.leaf_count,
        }
    })
}

fn leaf_counter(ts: f64, leaf_count: u32) -> Value {
    json!({
        "ph": "C",
        "name": "Leaves",
        "ts": ts,
        "pid": 0,
        "args": { "leaves": leaf_count }
    })
}
