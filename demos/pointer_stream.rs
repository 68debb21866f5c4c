//! Drives the streaming pipeline with a synthetic pointer trace: a wobbling
//! stroke goes through a PointerNode and a StreamNode while the plane is
//! edited halfway through.
#[macro_use]
extern crate log;
#[macro_use]
extern crate zplane;
extern crate clap;
extern crate num;
extern crate simple_logger;

use clap::{App, Arg};
use num::Complex;
use std::thread;
use zplane::plane::editor::PoleZeroEditor;
use zplane::plane::RootKind;
use zplane::prelude::*;
use zplane::signal::stream_node::{PointerNode, StreamNode};
use zplane::signal::PointerEvent;

fn main() {
    simple_logger::init().unwrap();

    let matches = App::new("zplane pointer stream")
        .version("0.1")
        .about("Filters a synthetic pointer stroke while the plane changes")
        .arg(
            Arg::with_name("events")
                .short("n")
                .long("events")
                .value_name("N")
                .help("Number of pointer events to generate")
                .takes_value(true),
        )
        .get_matches();
    let events: usize = matches
        .value_of("events")
        .unwrap_or("200")
        .parse()
        .unwrap_or(200);

    let mut editor = PoleZeroEditor::new();
    let mut pointer = PointerNode::new();
    let mut stream = StreamNode::new(1000, 50);
    connect_nodes!(pointer, output, stream, input);
    stream.states = Some(editor.subscribe());

    let (event_send, event_recv) = channel::unbounded();
    pointer.input = Some(event_recv);
    let (frame_send, frame_recv) = channel::unbounded();
    stream.output.push(frame_send);

    let pointer_thread = thread::spawn(move || pointer.start());
    let stream_thread = thread::spawn(move || stream.start());

    for k in 0..events {
        if k == events / 2 {
            // Low-pass the second half of the stroke.
            editor.add_point(RootKind::Pole, Complex::new(0.9, 0.0), false);
            editor.add_point(RootKind::Zero, Complex::new(-1.0, 0.0), false);
        }
        let t = k as f64 * 0.3;
        let y = 300.0 + 40.0 * t.sin() + if k % 2 == 0 { 5.0 } else { -5.0 };
        if event_send.send(PointerEvent::new(k as f64, y)).is_err() {
            break;
        }
    }
    drop(event_send);

    let _ = pointer_thread.join();
    let _ = stream_thread.join();

    let frames: Vec<_> = frame_recv.try_iter().collect();
    info!("received {} frames", frames.len());
    if let Some(last) = frames.last() {
        let input = last.window.visible(&last.input);
        let output = last.window.visible(&last.output);
        for (x, y) in input.iter().zip(output.iter()).rev().take(10) {
            println!("{:>10.3} -> {:>10.3}", x, y);
        }
    }
}
