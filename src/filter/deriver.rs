//! Transfer function and frequency response from a pole/zero state.
//!
//! Nothing is cached: callers derive again after every edit.

use crate::filter::poly;
use crate::filter::response::{self, FrequencyResponse};
use crate::filter::Coefficients;
use crate::plane::FilterState;

/// Stateless conversion from a [`FilterState`] to filter coefficients.
#[derive(Clone, Copy, Debug, Default)]
pub struct CoefficientDeriver;

impl CoefficientDeriver {
    /// Monic numerator from the zeros and monic denominator from the poles.
    /// An empty plane is the identity filter.
    ///
    /// # Examples
    ///
    /// ```
    /// use zplane::filter::deriver::CoefficientDeriver;
    /// use zplane::plane::FilterState;
    /// use num::Complex;
    ///
    /// let state = FilterState::new(vec![], vec![Complex::new(0.9, 0.0)]);
    /// let coeffs = CoefficientDeriver::coefficients(&state);
    /// assert_eq!(coeffs.b, vec![1.0]);
    /// assert_eq!(coeffs.a, vec![1.0, -0.9]);
    /// ```
    pub fn coefficients(state: &FilterState) -> Coefficients {
        if state.is_empty() {
            return Coefficients::identity();
        }
        Coefficients::new(poly::from_roots(&state.zeros), poly::from_roots(&state.poles))
    }

    /// Frequency response of `coeffs` at `n_points` frequencies.
    pub fn frequency_response(coeffs: &Coefficients, n_points: usize) -> FrequencyResponse {
        response::frequency_response(coeffs, n_points)
    }

    /// Frequency response of the filter described by `state`. An empty plane
    /// has no response at all rather than a flat one.
    pub fn response_of(state: &FilterState, n_points: usize) -> FrequencyResponse {
        if state.is_empty() {
            return FrequencyResponse::empty();
        }
        let coeffs = CoefficientDeriver::coefficients(state);
        CoefficientDeriver::frequency_response(&coeffs, n_points)
    }
}
