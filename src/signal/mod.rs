//! The live input signal: a bounded sample buffer fed by pointer movement or
//! by an uploaded sample file.

pub mod stream;
pub mod stream_node;

use std::collections::VecDeque;
use std::io::{self, Read};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum SignalError {
    #[error("unable to read samples: {0}")]
    Io(#[from] io::Error),
    #[error("malformed sample file: {0}")]
    Csv(#[from] csv::Error),
    #[error("line {line}: '{value}' is not a number")]
    MalformedSample { line: u64, value: String },
}

/// Fixed-capacity, order-preserving sample store.
///
/// Once `max_length` samples are held, every append drops the oldest one.
#[derive(Clone, Debug)]
pub struct SignalBuffer {
    samples: VecDeque<f64>,
    max_length: usize,
}

impl SignalBuffer {
    pub fn new(max_length: usize) -> Self {
        SignalBuffer {
            samples: VecDeque::with_capacity(max_length),
            max_length,
        }
    }

    /// Pushes `sample` to the tail, evicting from the head at capacity.
    pub fn append(&mut self, sample: f64) {
        if self.max_length == 0 {
            return;
        }
        if self.samples.len() == self.max_length {
            self.samples.pop_front();
        }
        self.samples.push_back(sample);
    }

    pub fn len(&self) -> usize {
        self.samples.len()
    }

    pub fn is_empty(&self) -> bool {
        self.samples.is_empty()
    }

    pub fn max_length(&self) -> usize {
        self.max_length
    }

    pub fn iter(&self) -> impl Iterator<Item = &f64> {
        self.samples.iter()
    }

    /// Copies the samples out, oldest first.
    pub fn to_vec(&self) -> Vec<f64> {
        self.samples.iter().cloned().collect()
    }

    pub fn clear(&mut self) {
        self.samples.clear();
    }

    /// Visible range for a plot showing `window_length` samples.
    pub fn display_window(&self, window_length: usize) -> DisplayWindow {
        DisplayWindow::for_len(self.len(), window_length)
    }
}

/// Sample index range a plot should frame. Derived on demand, never stored.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct DisplayWindow {
    pub start: usize,
    pub end: usize,
}

impl DisplayWindow {
    /// The last `window_length` samples once there are more than that,
    /// otherwise the fixed range `0..window_length`.
    pub fn for_len(len: usize, window_length: usize) -> Self {
        if len > window_length {
            DisplayWindow {
                start: len - window_length,
                end: len,
            }
        } else {
            DisplayWindow {
                start: 0,
                end: window_length,
            }
        }
    }

    /// The part of `samples` that falls inside the window.
    pub fn visible<'a>(&self, samples: &'a [f64]) -> &'a [f64] {
        let end = self.end.min(samples.len());
        let start = self.start.min(end);
        &samples[start..end]
    }
}

/// One pointer-move notification, in host pixel coordinates.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct PointerEvent {
    pub x: f64,
    pub y: f64,
}

impl PointerEvent {
    pub fn new(x: f64, y: f64) -> Self {
        PointerEvent { x, y }
    }
}

/// Turns pointer movement into samples.
///
/// The first event of a stroke fixes the origin; every event then yields the
/// vertical displacement from that origin.
#[derive(Clone, Copy, Debug, Default)]
pub struct PointerSignal {
    origin: Option<PointerEvent>,
}

impl PointerSignal {
    pub fn new() -> Self {
        PointerSignal::default()
    }

    pub fn sample(&mut self, event: PointerEvent) -> f64 {
        let origin = *self.origin.get_or_insert(event);
        event.y - origin.y
    }

    /// Forgets the origin; the next event starts a new stroke.
    pub fn reset(&mut self) {
        self.origin = None;
    }
}

/// Reads samples from CSV data.
///
/// Each row holds either a single value or `time,value`; the last column is
/// taken. A first row that does not parse is treated as a header. Blank rows
/// are skipped; any other unparsable value fails the whole read.
pub fn read_samples<R: Read>(reader: R) -> Result<Vec<f64>, SignalError> {
    let mut rdr = csv::ReaderBuilder::new()
        .has_headers(false)
        .flexible(true)
        .from_reader(reader);

    let mut samples = Vec::new();
    for (idx, record) in rdr.records().enumerate() {
        let record = record?;
        let field = match record.iter().last() {
            Some(field) if !field.trim().is_empty() => field.trim(),
            _ => continue,
        };
        match field.parse::<f64>() {
            Ok(value) => samples.push(value),
            Err(_) if idx == 0 => continue,
            Err(_) => {
                let line = record.position().map(|p| p.line()).unwrap_or(idx as u64 + 1);
                return Err(SignalError::MalformedSample {
                    line,
                    value: field.to_string(),
                });
            }
        }
    }
    Ok(samples)
}
