// Copyright 2026 the Shneer Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Compact binary event recording and decoding.
//!
//! [`RecorderSink`] implements [`TraceSink`] and encodes events into a
//! `Vec<u8>` as fixed-size little-endian records, each prefixed with a
//! one-byte tag. [`decode`] reads them back as an iterator of
//! [`RecordedEvent`], stopping at the first truncated or unknown record.

use core::iter::FusedIterator;

use shneer_core::node::NodeId;
use shneer_core::trace::{
    LeafEvent, ResizeEvent, TickEvent, TickSummary, TraceSink, WrapEvent,
};
use shneer_core::visibility::Visibility;

// ---------------------------------------------------------------------------
// Event type discriminants
// ---------------------------------------------------------------------------

const TAG_TICK: u8 = 1;
const TAG_WRAP: u8 = 2;
const TAG_TICK_SUMMARY: u8 = 3;
const TAG_LEAF_ADDED: u8 = 4;
const TAG_LEAF_REMOVED: u8 = 5;
const TAG_RESIZE: u8 = 6;

// ---------------------------------------------------------------------------
// RecorderSink
// ---------------------------------------------------------------------------

/// A [`TraceSink`] that encodes events into a compact binary buffer.
#[derive(Debug, Default)]
pub struct RecorderSink {
    buf: Vec<u8>,
}

impl RecorderSink {
    /// Creates an empty recorder.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns a view of the recorded bytes.
    #[must_use]
    pub fn as_bytes(&self) -> &[u8] {
        &self.buf
    }

    /// Consumes the recorder and returns the recorded bytes.
    #[must_use]
    pub fn into_bytes(self) -> Vec<u8> {
        self.buf
    }

    // -- encoding helpers --------------------------------------------------

    fn write_u8(&mut self, v: u8) {
        self.buf.push(v);
    }

    fn write_u32(&mut self, v: u32) {
        self.buf.extend_from_slice(&v.to_le_bytes());
    }

    fn write_u64(&mut self, v: u64) {
        self.buf.extend_from_slice(&v.to_le_bytes());
    }

    fn write_f64(&mut self, v: f64) {
        self.buf.extend_from_slice(&v.to_le_bytes());
    }

    fn write_node(&mut self, node: NodeId) {
        self.write_u32(node.index());
        self.write_u32(node.generation());
    }

    fn write_edge(&mut self, edge: Visibility) {
        self.write_u8(match edge {
            Visibility::Visible => 0,
            Visibility::ExceededLeft => 1,
            Visibility::ExceededRight => 2,
            Visibility::ExceededTop => 3,
            Visibility::ExceededBottom => 4,
        });
    }

    fn write_leaf(&mut self, tag: u8, e: &LeafEvent) {
        self.write_u8(tag);
        self.write_node(e.node);
        self.write_u32(e.leaf_count);
    }
}

impl TraceSink for RecorderSink {
    fn on_tick(&mut self, e: &TickEvent) {
        self.write_u8(TAG_TICK);
        self.write_u64(e.tick_index);
        self.write_u32(e.leaf_count);
    }

    fn on_wrap(&mut self, e: &WrapEvent) {
        self.write_u8(TAG_WRAP);
        self.write_u64(e.tick_index);
        self.write_node(e.node);
        self.write_edge(e.edge);
        self.write_f64(e.global_width);
        self.write_f64(e.global_height);
    }

    fn on_tick_summary(&mut self, s: &TickSummary) {
        self.write_u8(TAG_TICK_SUMMARY);
        self.write_u64(s.tick_index);
        self.write_u32(s.leaf_count);
        self.write_u32(s.wrapped);
    }

    fn on_leaf_added(&mut self, e: &LeafEvent) {
        self.write_leaf(TAG_LEAF_ADDED, e);
    }

    fn on_leaf_removed(&mut self, e: &LeafEvent) {
        self.write_leaf(TAG_LEAF_REMOVED, e);
    }

    fn on_resize(&mut self, e: &ResizeEvent) {
        self.write_u8(TAG_RESIZE);
        self.write_u32(e.width);
        self.write_u32(e.height);
    }
}

// ---------------------------------------------------------------------------
// Decoder
// ---------------------------------------------------------------------------

/// A decoded event from a binary recording.
#[derive(Clone, Debug, PartialEq)]
pub enum RecordedEvent {
    /// A [`TickEvent`].
    Tick(TickEvent),
    /// A [`WrapEvent`].
    Wrap(WrapEvent),
    /// A [`TickSummary`].
    TickSummary(TickSummary),
    /// A leaf-added [`LeafEvent`].
    LeafAdded(LeafEvent),
    /// A leaf-removed [`LeafEvent`].
    LeafRemoved(LeafEvent),
    /// A [`ResizeEvent`].
    Resize(ResizeEvent),
}

/// Decodes a byte slice produced by [`RecorderSink`] into an iterator of
/// [`RecordedEvent`].
pub fn decode(bytes: &[u8]) -> DecodeIter<'_> {
    DecodeIter {
        data: bytes,
        pos: 0,
    }
}

/// Iterator over decoded events.
#[derive(Debug)]
pub struct DecodeIter<'a> {
    data: &'a [u8],
    pos: usize,
}

impl DecodeIter<'_> {
    fn take<const N: usize>(&mut self) -> Option<[u8; N]> {
        let bytes = self.data.get(self.pos..self.pos + N)?.try_into().ok()?;
        self.pos += N;
        Some(bytes)
    }

    fn read_u8(&mut self) -> Option<u8> {
        self.take::<1>().map(|[v]| v)
    }

    fn read_u32(&mut self) -> Option<u32> {
        self.take().map(u32::from_le_bytes)
    }

    fn read_u64(&mut self) -> Option<u64> {
        self.take().map(u64::from_le_bytes)
    }

    fn read_f64(&mut self) -> Option<f64> {
        self.take().map(f64::from_le_bytes)
    }

    fn read_node(&mut self) -> Option<NodeId> {
        let index = self.read_u32()?;
        let generation = self.read_u32()?;
        Some(NodeId::from_raw(index, generation))
    }

    fn read_edge(&mut self) -> Option<Visibility> {
        Some(match self.read_u8()? {
            0 => Visibility::Visible,
            1 => Visibility::ExceededLeft,
            2 => Visibility::ExceededRight,
            3 => Visibility::ExceededTop,
            4 => Visibility::ExceededBottom,
            _ => return None,
        })
    }

    fn read_leaf(&mut self) -> Option<LeafEvent> {
        Some(LeafEvent {
            node: self.read_node()?,
            leaf_count: self.read_u32()?,
        })
    }

    fn decode_tick(&mut self) -> Option<RecordedEvent> {
        Some(RecordedEvent::Tick(TickEvent {
            tick_index: self.read_u64()?,
            leaf_count: self.read_u32()?,
        }))
    }

    fn decode_wrap(&mut self) -> Option<RecordedEvent> {
        Some(RecordedEvent::Wrap(WrapEvent {
            tick_index: self.read_u64()?,
            node: self.read_node()?,
            edge: self.read_edge()?,
            global_width: self.read_f64()?,
            global_height: self.read_f64()?,
        }))
    }

    fn decode_tick_summary(&mut self) -> Option<RecordedEvent> {
        Some(RecordedEvent::TickSummary(TickSummary {
            tick_index: self.read_u64()?,
            leaf_count: self.read_u32()?,
            wrapped: self.read_u32()?,
        }))
    }

    fn decode_resize(&mut self) -> Option<RecordedEvent> {
        Some(RecordedEvent::Resize(ResizeEvent {
            width: self.read_u32()?,
            height: self.read_u32()?,
        }))
    }
}

impl Iterator for DecodeIter<'_> {
    type Item = RecordedEvent;

    fn next(&mut self) -> Option<Self::Item> {
        let event = self.read_u8().and_then(|tag| match tag {
            TAG_TICK => self.decode_tick(),
            TAG_WRAP => self.decode_wrap(),
            TAG_TICK_SUMMARY => self.decode_tick_summary(),
            TAG_LEAF_ADDED => self.read_leaf().map(RecordedEvent::LeafAdded),
            TAG_LEAF_REMOVED => self.read_leaf().map(RecordedEvent::LeafRemoved),
            TAG_RESIZE => self.decode_resize(),
            _ => None,
        });
        if event.is_none() {
            // Unknown tag or bad record: never resync inside the record.
            self.pos = self.data.len();
        }
        event
    }
}

impl FusedIterator for DecodeIter<'_> {}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
