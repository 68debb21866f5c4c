//! Transfer functions derived from zeros and poles, and the filters that apply
//! them.
//!
//! There are two primary categories of digital filters in signal processing:
//!
//! * Finite Impulse Response (FIR) Filters
//! * Infinite Impulse Response (IIR) Filters
//!
//! A filter built from a pole/zero plot is an IIR filter whenever it has at
//! least one pole away from the origin. IIR filters are feedback based
//! systems, and have all the caveats associated with any feedback system: a
//! pole on or outside the unit circle makes the filter unstable, and the
//! phase response is non-linear. Nothing here rejects such filters. Huge,
//! infinite or NaN values are a legitimate result and are left to whoever
//! draws them.
//!
//! The transfer function is kept as two real polynomials in `z^-1`, numerator
//! `b` and denominator `a`, highest degree first:
//!
//! ```text
//!         b[0] + b[1] z^-1 + ... + b[M] z^-M
//! H(z) = ------------------------------------
//!         a[0] + a[1] z^-1 + ... + a[N] z^-N
//! ```

pub mod deriver;
pub mod iir;
pub mod library;
pub mod poly;
pub mod response;

use thiserror::Error;

#[derive(Clone, Copy, Debug, Error, PartialEq)]
pub enum FilterError {
    #[error("denominator is empty or its leading coefficient is zero")]
    InvalidDenominator,
}

/// Numerator and denominator of a transfer function.
#[derive(Clone, Debug, PartialEq)]
pub struct Coefficients {
    pub b: Vec<f64>,
    pub a: Vec<f64>,
}

impl Coefficients {
    pub fn new(b: Vec<f64>, a: Vec<f64>) -> Self {
        Coefficients { b, a }
    }

    /// The pass-through filter `b = [1], a = [1]`.
    pub fn identity() -> Self {
        Coefficients::new(vec![1.0], vec![1.0])
    }

    pub fn is_identity(&self) -> bool {
        self.b == [1.0] && self.a == [1.0]
    }
}

impl Default for Coefficients {
    fn default() -> Self {
        Coefficients::identity()
    }
}
