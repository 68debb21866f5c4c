//! Filters the live signal buffer.
//!
//! Every call to [`StreamingFilter::filtered_output`] runs the difference
//! equation over the whole buffer from zero initial conditions, so the
//! output always corresponds exactly to the samples currently held and to
//! the coefficients passed in.

use crate::filter::deriver::CoefficientDeriver;
use crate::filter::iir::lfilter;
use crate::filter::library::{CoefficientProvider, FilterSelection};
use crate::filter::{Coefficients, FilterError};
use crate::plane::FilterState;
use crate::signal::{DisplayWindow, SignalBuffer};
use log::{trace, warn};

/// Coefficients that drive the live signal: the selected library filter, or
/// the plane's own transfer function when nothing is selected. A selected
/// name the provider does not know falls back to the plane as well.
pub fn source_coefficients(
    selection: &FilterSelection,
    provider: &dyn CoefficientProvider,
    state: &FilterState,
) -> Coefficients {
    match selection {
        FilterSelection::None => CoefficientDeriver::coefficients(state),
        FilterSelection::Named(name) => match provider.coefficients_for(name) {
            Some(coeffs) => coeffs,
            None => {
                warn!("unknown library filter '{}', using the plane", name);
                CoefficientDeriver::coefficients(state)
            }
        },
    }
}

#[derive(Clone, Debug)]
pub struct StreamingFilter {
    buffer: SignalBuffer,
    window_length: usize,
}

impl StreamingFilter {
    pub fn new(max_length: usize, window_length: usize) -> Self {
        StreamingFilter {
            buffer: SignalBuffer::new(max_length),
            window_length,
        }
    }

    pub fn append(&mut self, sample: f64) {
        trace!("append sample {}", sample);
        self.buffer.append(sample);
    }

    pub fn buffer(&self) -> &SignalBuffer {
        &self.buffer
    }

    pub fn window_length(&self) -> usize {
        self.window_length
    }

    /// The unfiltered samples, oldest first.
    pub fn input(&self) -> Vec<f64> {
        self.buffer.to_vec()
    }

    /// The buffer filtered with `coeffs`, same length as the buffer.
    pub fn filtered_output(&self, coeffs: &Coefficients) -> Result<Vec<f64>, FilterError> {
        lfilter(coeffs, &self.buffer.to_vec())
    }

    pub fn display_window(&self) -> DisplayWindow {
        self.buffer.display_window(self.window_length)
    }

    pub fn reset(&mut self) {
        self.buffer.clear();
    }
}

#[cfg(test)]
mod test {
    use crate::filter::library::{FilterLibrary, FilterSelection};
    use crate::filter::Coefficients;
    use crate::plane::FilterState;
    use crate::signal::stream::{source_coefficients, StreamingFilter};
    use crate::signal::DisplayWindow;
    use assert_approx_eq::assert_approx_eq;
    use num::Complex;

    #[test]
    fn test_coefficient_source() {
        let mut library = FilterLibrary::new();
        let leaky = Coefficients::new(vec![0.1], vec![1.0, -0.9]);
        library.register_coefficients("Leaky", leaky.clone());
        let state = FilterState::new(vec![Complex::new(-1.0, 0.0)], vec![]);
        let plane = Coefficients::new(vec![1.0, 1.0], vec![1.0]);

        assert_eq!(source_coefficients(&FilterSelection::None, &library, &state), plane);
        let named = FilterSelection::from_name("Leaky");
        assert_eq!(source_coefficients(&named, &library, &state), leaky);
        let unknown = FilterSelection::from_name("Elliptic LPF");
        assert_eq!(source_coefficients(&unknown, &library, &state), plane);
    }

    #[test]
    fn test_output_tracks_buffer() {
        let mut stream = StreamingFilter::new(4, 2);
        let coeffs = Coefficients::new(vec![1.0], vec![1.0, -0.5]);
        for x in &[1.0, 0.0, 0.0] {
            stream.append(*x);
        }
        assert_eq!(stream.filtered_output(&coeffs).unwrap(), vec![1.0, 0.5, 0.25]);

        // After eviction the impulse is gone and the output restarts from
        // zero initial conditions.
        stream.append(0.0);
        stream.append(0.0);
        let out = stream.filtered_output(&coeffs).unwrap();
        assert_eq!(out.len(), 4);
        for y in out {
            assert_approx_eq!(y, 0.0);
        }
    }

    #[test]
    fn test_window_and_reset() {
        let mut stream = StreamingFilter::new(10, 3);
        assert_eq!(stream.display_window(), DisplayWindow { start: 0, end: 3 });
        for x in 0..5 {
            stream.append(x as f64);
        }
        assert_eq!(stream.display_window(), DisplayWindow { start: 2, end: 5 });
        stream.reset();
        assert!(stream.buffer().is_empty());
        assert!(stream.filtered_output(&Coefficients::identity()).unwrap().is_empty());
    }
}
