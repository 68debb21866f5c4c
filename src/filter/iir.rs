//! Implementation of a direct-form I infinite impulse response (IIR) filter.
//!
//! Each output sample is
//!
//! ```text
//! y[n] = (sum_k b[k] x[n-k] - sum_{k>=1} a[k] y[n-k]) / a[0]
//! ```
//!
//! with samples before the start of the input taken as zero. The whole input
//! is filtered from those zero initial conditions on every call; no filter
//! memory is carried between calls.

use crate::filter::{Coefficients, FilterError};

/// Filters `input` with the transfer function `coeffs`.
///
/// The output has the same length as the input. Coefficients are normalized
/// by `a[0]`, which therefore may not be zero.
///
/// # Examples
///
/// ```
/// use zplane::filter::Coefficients;
/// use zplane::filter::iir::lfilter;
///
/// // One pole at 0.5: the impulse response halves every sample.
/// let coeffs = Coefficients::new(vec![1.0], vec![1.0, -0.5]);
/// let out = lfilter(&coeffs, &[1.0, 0.0, 0.0, 0.0]).unwrap();
/// assert_eq!(out, vec![1.0, 0.5, 0.25, 0.125]);
/// ```
pub fn lfilter(coeffs: &Coefficients, input: &[f64]) -> Result<Vec<f64>, FilterError> {
    let a0 = match coeffs.a.first() {
        Some(a0) if *a0 != 0.0 => *a0,
        _ => return Err(FilterError::InvalidDenominator),
    };
    let b: Vec<f64> = coeffs.b.iter().map(|x| x / a0).collect();
    let a: Vec<f64> = coeffs.a.iter().map(|x| x / a0).collect();

    let mut output: Vec<f64> = Vec::with_capacity(input.len());
    for n in 0..input.len() {
        let feedforward: f64 = b
            .iter()
            .take(n + 1)
            .enumerate()
            .map(|(k, bk)| bk * input[n - k])
            .sum();
        let feedback: f64 = a
            .iter()
            .enumerate()
            .skip(1)
            .take(n)
            .map(|(k, ak)| ak * output[n - k])
            .sum();
        output.push(feedforward - feedback);
    }
    Ok(output)
}

#[cfg(test)]
mod test {
    use crate::filter::iir::*;
    use assert_approx_eq::assert_approx_eq;

    #[test]
    fn test_identity_passes_through() {
        let input = vec![3.0, -1.0, 2.5, 0.0];
        let out = lfilter(&Coefficients::identity(), &input).unwrap();
        assert_eq!(out, input);
    }

    #[test]
    fn test_fir_moving_average() {
        let coeffs = Coefficients::new(vec![0.5, 0.5], vec![1.0]);
        let out = lfilter(&coeffs, &[2.0, 4.0, 6.0]).unwrap();
        assert_eq!(out, vec![1.0, 3.0, 5.0]);
    }

    #[test]
    fn test_normalizes_by_a0() {
        let coeffs = Coefficients::new(vec![2.0], vec![2.0, -1.0]);
        let out = lfilter(&coeffs, &[1.0, 0.0, 0.0]).unwrap();
        assert_approx_eq!(out[0], 1.0);
        assert_approx_eq!(out[1], 0.5);
        assert_approx_eq!(out[2], 0.25);
    }

    #[test]
    fn test_second_order_step() {
        // b = [1, -1, 0.5], a = [1, -0.9]
        let coeffs = Coefficients::new(vec![1.0, -1.0, 0.5], vec![1.0, -0.9]);
        let out = lfilter(&coeffs, &[1.0, 1.0, 1.0]).unwrap();
        assert_approx_eq!(out[0], 1.0);
        assert_approx_eq!(out[1], 0.9);
        assert_approx_eq!(out[2], 1.31);
    }

    #[test]
    fn test_invalid_denominator() {
        let coeffs = Coefficients::new(vec![1.0], vec![0.0, 1.0]);
        assert_eq!(lfilter(&coeffs, &[1.0]), Err(FilterError::InvalidDenominator));
        let coeffs = Coefficients::new(vec![1.0], vec![]);
        assert_eq!(lfilter(&coeffs, &[1.0]), Err(FilterError::InvalidDenominator));
    }

    #[test]
    fn test_empty_input() {
        assert!(lfilter(&Coefficients::identity(), &[]).unwrap().is_empty());
    }
}
