//! Nodes for the live signal path: pointer events become samples, samples
//! become filtered frames.

use crate::prelude::*;

use crate::filter::deriver::CoefficientDeriver;
use crate::filter::Coefficients;
use crate::plane::FilterState;
use crate::signal::stream::StreamingFilter;
use crate::signal::{DisplayWindow, PointerEvent, PointerSignal};

/// Maps pointer-move events to signal samples.
#[derive(Node)]
pub struct PointerNode {
    pub input: NodeReceiver<PointerEvent>,
    pointer: PointerSignal,
    pub output: NodeSender<f64>,
}

impl PointerNode {
    pub fn new() -> Self {
        PointerNode {
            input: Default::default(),
            pointer: PointerSignal::new(),
            output: Default::default(),
        }
    }

    pub fn run(&mut self, event: PointerEvent) -> Result<f64, NodeError> {
        Ok(self.pointer.sample(event))
    }

    /// Starts a new stroke on the next event.
    pub fn reset(&mut self) {
        self.pointer.reset();
    }
}

impl Default for PointerNode {
    fn default() -> Self {
        PointerNode::new()
    }
}

/// Everything a plot needs after one sample: the raw and filtered buffers and
/// the range to frame.
#[derive(Clone, Debug, PartialEq)]
pub struct FilteredFrame {
    pub input: Vec<f64>,
    pub output: Vec<f64>,
    pub window: DisplayWindow,
}

/// Appends each incoming sample to a [`StreamingFilter`] and emits the
/// refiltered buffer.
///
/// The filter follows the plane: connect `states` to
/// [`PoleZeroEditor::subscribe`](crate::plane::editor::PoleZeroEditor::subscribe)
/// and the latest published state is picked up before each sample. States
/// published between two samples are coalesced into the newest one.
#[derive(Node)]
pub struct StreamNode {
    pub input: NodeReceiver<f64>,
    pub states: Option<Receiver<FilterState>>,
    stream: StreamingFilter,
    coefficients: Coefficients,
    pub output: NodeSender<FilteredFrame>,
}

impl StreamNode {
    pub fn new(max_length: usize, window_length: usize) -> Self {
        StreamNode {
            input: Default::default(),
            states: None,
            stream: StreamingFilter::new(max_length, window_length),
            coefficients: Coefficients::identity(),
            output: Default::default(),
        }
    }

    pub fn run(&mut self, sample: f64) -> Result<FilteredFrame, NodeError> {
        if let Some(ref states) = self.states {
            if let Some(state) = states.try_iter().last() {
                self.coefficients = CoefficientDeriver::coefficients(&state);
            }
        }
        self.stream.append(sample);
        let output = self.stream.filtered_output(&self.coefficients)?;
        Ok(FilteredFrame {
            input: self.stream.input(),
            output,
            window: self.stream.display_window(),
        })
    }

    /// Uses `coefficients` until the next published plane state.
    pub fn set_coefficients(&mut self, coefficients: Coefficients) {
        self.coefficients = coefficients;
    }

    pub fn coefficients(&self) -> &Coefficients {
        &self.coefficients
    }

    pub fn reset(&mut self) {
        self.stream.reset();
    }
}

#[cfg(test)]
mod test {
    use crate::plane::editor::PoleZeroEditor;
    use crate::plane::RootKind;
    use crate::prelude::*;
    use crate::signal::stream_node::{PointerNode, StreamNode};
    use crate::signal::{DisplayWindow, PointerEvent};
    use assert_approx_eq::assert_approx_eq;
    use num::Complex;

    #[test]
    fn test_pointer_to_frames() {
        let mut pointer = PointerNode::new();
        let mut stream = StreamNode::new(100, 10);
        connect_nodes!(pointer, output, stream, input);

        let (events, recv) = channel::unbounded();
        pointer.input = Some(recv);
        let (send, frames) = channel::unbounded();
        stream.output.push(send);

        for y in &[5.0, 6.0, 4.0] {
            events.send(PointerEvent::new(0.0, *y)).unwrap();
            pointer.call().unwrap();
            stream.call().unwrap();
        }

        let frames: Vec<_> = frames.try_iter().collect();
        assert_eq!(frames.len(), 3);
        let last = &frames[2];
        assert_eq!(last.input, vec![0.0, 1.0, -1.0]);
        // No plane state yet: pass-through.
        assert_eq!(last.output, last.input);
        assert_eq!(last.window, DisplayWindow { start: 0, end: 10 });
    }

    #[test]
    fn test_stream_follows_editor() {
        let mut editor = PoleZeroEditor::new();
        let mut stream = StreamNode::new(100, 10);
        stream.states = Some(editor.subscribe());

        let (samples, recv) = channel::unbounded();
        stream.input = Some(recv);
        let (send, frames) = channel::unbounded();
        stream.output.push(send);

        // Two edits before the next sample; only the final plane counts.
        editor.add_point(RootKind::Pole, Complex::new(0.9, 0.0), false);
        editor.clear_poles();
        editor.add_point(RootKind::Pole, Complex::new(0.5, 0.0), false);

        samples.send(1.0).unwrap();
        stream.call().unwrap();
        samples.send(0.0).unwrap();
        stream.call().unwrap();

        assert_eq!(stream.coefficients().a, vec![1.0, -0.5]);
        let last = frames.try_iter().last().unwrap();
        assert_approx_eq!(last.output[0], 1.0);
        assert_approx_eq!(last.output[1], 0.5);
    }

    #[test]
    fn test_late_subscriber_uses_current_plane() {
        let mut editor = PoleZeroEditor::new();
        editor.add_point(RootKind::Pole, Complex::new(0.5, 0.0), false);

        let mut stream = StreamNode::new(100, 10);
        stream.states = Some(editor.subscribe());
        let (samples, recv) = channel::unbounded();
        stream.input = Some(recv);
        let (send, frames) = channel::unbounded();
        stream.output.push(send);

        samples.send(1.0).unwrap();
        stream.call().unwrap();
        samples.send(0.0).unwrap();
        stream.call().unwrap();

        assert_eq!(stream.coefficients().a, vec![1.0, -0.5]);
        let last = frames.try_iter().last().unwrap();
        assert_eq!(last.output, vec![1.0, 0.5]);
    }

    #[test]
    fn test_invalid_coefficients_surface_as_error() {
        let mut stream = StreamNode::new(10, 5);
        stream.set_coefficients(crate::filter::Coefficients::new(vec![1.0], vec![0.0]));
        let (samples, recv) = channel::unbounded();
        stream.input = Some(recv);
        samples.send(1.0).unwrap();
        match stream.call() {
            Err(NodeError::Filter(_)) => (),
            other => panic!("unexpected result {:?}", other),
        }
    }
}
