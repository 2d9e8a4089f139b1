// Copyright 2026 the Shneer Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Headless frame loop that exercises the scene, the view, and the
//! diagnostics pipeline.
//!
//! Builds the classic 25-leaf scene from a fixed seed, attaches a
//! [`SceneView`] drawing into a [`DisplayList`], and runs a number of ticks
//! (default 120, or the first command-line argument) while recording events
//! to both a [`PrettyPrintSink`] and a [`RecorderSink`]. It then adds and
//! removes a leaf, resizes the viewport, ticks once more, reports what the
//! last frame drew, and exports a Chrome trace JSON file.

use std::cell::RefCell;
use std::fs::File;
use std::io::{self, BufWriter, Write};
use std::rc::Rc;

use rand::SeedableRng;
use rand::rngs::SmallRng;
use shneer_core::config::SceneConfig;
use shneer_core::listener::SharedListener;
use shneer_core::scene::Scene;
use shneer_core::trace::Tracer;
use shneer_debug::FanOut;
use shneer_debug::pretty::PrettyPrintSink;
use shneer_debug::recorder::RecorderSink;
use shneer_render::{DisplayList, SceneView};

const DEFAULT_TICKS: u64 = 120;
const SEED: u64 = 0x5348_4e45_4552;
/// One tick per 60 Hz frame.
const US_PER_TICK: f64 = 16_666.667;

fn main() -> io::Result<()> {
    let ticks = std::env::args()
        .nth(1)
        .and_then(|arg| arg.parse().ok())
        .unwrap_or(DEFAULT_TICKS);

    // -- scene + view ------------------------------------------------------
    let config = SceneConfig::classic();
    let mut scene = Scene::new(config, SmallRng::seed_from_u64(SEED));
    let view = Rc::new(RefCell::new(SceneView::new(
        DisplayList::new(),
        config.viewport_width,
        config.viewport_height,
    )));
    let listener: SharedListener = view.clone();
    scene.attach_listener(&listener);

    // -- sinks -------------------------------------------------------------
    let mut sink = FanOut {
        first: PrettyPrintSink::new(Box::new(io::stdout())),
        second: RecorderSink::new(),
    };

    // -- loop --------------------------------------------------------------
    {
        let mut tracer = Tracer::new(&mut sink);
        for _ in 0..ticks {
            scene.tick_traced(&mut tracer);
        }
        scene.add_leaf_traced(Some(&listener), &mut tracer);
        scene.remove_leaf_traced(&mut tracer);
        scene.resize_viewport_traced(1280, 720, &mut tracer);
        view.borrow_mut().resize(1280, 720);
        scene.tick_traced(&mut tracer);
    }

    {
        let view = view.borrow();
        let list = view.surface();
        println!(
            "{} redraws; last frame: {} commands, {} labels, {} leaves",
            view.redraw_count(),
            list.len(),
            list.text_count(),
            scene.leaf_count(),
        );
    }

    // -- export Chrome trace -----------------------------------------------
    let path = "trace.json";
    let mut writer = BufWriter::new(File::create(path)?);
    shneer_debug::chrome::export(sink.second.as_bytes(), US_PER_TICK, &mut writer)?;
    writer.flush()?;

    println!("Wrote {path} ({} ticks)", scene.tick_count());
    Ok(())
}
