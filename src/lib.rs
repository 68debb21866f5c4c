//! Interactive pole/zero IIR filter design.
//!
//! Zeros and poles are placed on the complex plane through a
//! [`PoleZeroEditor`](plane::editor::PoleZeroEditor) with full undo/redo
//! history. The transfer function, its frequency response, and the effect of
//! the filter on a live pointer-driven signal are derived from that state on
//! every change. A [`Session`](session::Session) bundles one editing context.
extern crate crossbeam;
extern crate self as zplane;

#[macro_use]
pub mod node;
pub mod config;
pub mod filter;
pub mod persist;
pub mod plane;
pub mod prelude;
pub mod session;
pub mod signal;

pub use crossbeam::channel::{self, Receiver, Sender};
