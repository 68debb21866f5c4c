//! Provides an infrastructure to create processing nodes and connect nodes
//! together via crossbeam channels.
//!
//! Nodes are driven synchronously: each `call()` receives one value from every
//! input, runs the node, and forwards the result to every connected output.
//! The host decides when to call a node; nothing here spawns threads.
//!
//! # Example
//!
//! ```
//! #[macro_use] extern crate zplane;
//! use zplane::prelude::*;
//! use zplane::signal::stream_node::PointerNode;
//! use zplane::signal::PointerEvent;
//!
//! # fn main() {
//! let mut pointer = PointerNode::new();
//! let (send, recv) = channel::unbounded();
//! pointer.input = Some(recv);
//! let (out_send, out_recv) = channel::unbounded();
//! pointer.output.push(out_send);
//!
//! send.send(PointerEvent::new(0.0, 10.0)).unwrap();
//! send.send(PointerEvent::new(3.0, 14.0)).unwrap();
//! pointer.call().unwrap();
//! pointer.call().unwrap();
//! assert_eq!(out_recv.try_recv().unwrap(), 0.0);
//! assert_eq!(out_recv.try_recv().unwrap(), 4.0);
//! # }
//! ```

use crate::filter::FilterError;
use thiserror::Error;

pub use crossbeam::channel;

/// Errors a node reports from `call()`.
#[derive(Clone, Copy, Debug, Error, PartialEq)]
pub enum NodeError {
    /// An input was never connected; the node can not make progress.
    #[error("node input is not connected")]
    PermanentError,
    /// An upstream node hung up.
    #[error("upstream node disconnected")]
    DataEnd,
    #[error("filter failed: {0}")]
    Filter(#[from] FilterError),
}

/// The trait that all nodes in the library implement.
///
/// `call` and `is_connected` are usually generated with `#[derive(Node)]`.
pub trait Node {
    /// Executes the node once.
    fn call(&mut self) -> Result<(), NodeError>;

    /// Whether every input of the node has been connected.
    fn is_connected(&self) -> bool;

    /// Runs the node until one of its inputs disconnects.
    fn start(&mut self) {
        loop {
            if self.call().is_err() {
                break;
            }
        }
    }
}

/// Connects the output field `$send` of node `$n1` to the input field `$recv`
/// of node `$n2`.
///
/// The channel is unbounded so that a single thread can push a value through
/// several nodes in sequence without blocking.
#[macro_export]
macro_rules! connect_nodes {
    ($n1:ident, $send:ident, $n2:ident, $recv:ident) => {{
        let (send, recv) = $crate::node::channel::unbounded();
        $n1.$send.push(send);
        $n2.$recv = Some(recv);
    }};
}
