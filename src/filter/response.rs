//! Frequency response of a transfer function on the upper half of the unit
//! circle.
//!
//! The response is sampled at `n_points` frequencies `w[k] = pi * k /
//! n_points`, `k = 0..n_points`, which is the grid a zero-padded FFT of
//! length `2 * n_points` lands on. Numerator and denominator are transformed
//! with [RustFFT](https://github.com/awelkie/RustFFT) and divided bin by bin.
//! Polynomials longer than the FFT are evaluated directly instead.

use crate::filter::poly;
use crate::filter::Coefficients;
use num::complex::Complex;
use num::Zero;
use rustfft::num_complex::Complex as FFTComplex;
use rustfft::FFTplanner;
use rustfft::FFT;
use std::f64::consts::PI;

/// Sampled frequency response.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct FrequencyResponse {
    /// Normalized angular frequencies in radians per sample.
    pub w: Vec<f64>,
    /// `H(e^{jw})` at each frequency.
    pub h: Vec<Complex<f64>>,
}

impl FrequencyResponse {
    /// An empty response, drawn as a cleared plot.
    pub fn empty() -> Self {
        FrequencyResponse::default()
    }

    pub fn len(&self) -> usize {
        self.w.len()
    }

    pub fn is_empty(&self) -> bool {
        self.w.is_empty()
    }

    /// `|H|` per frequency.
    pub fn magnitude(&self) -> Vec<f64> {
        self.h.iter().map(|h| h.norm()).collect()
    }

    /// `arg(H)` per frequency, in `(-pi, pi]`.
    pub fn phase(&self) -> Vec<f64> {
        self.h.iter().map(|h| h.arg()).collect()
    }
}

/// Samples `B(e^{jw}) / A(e^{jw})` at `n_points` frequencies in `[0, pi)`.
///
/// A denominator root on the unit circle shows up as an infinite or NaN
/// sample rather than an error.
///
/// # Examples
///
/// ```
/// use zplane::filter::Coefficients;
/// use zplane::filter::response::frequency_response;
///
/// // Two-tap moving average: unity gain at DC.
/// let coeffs = Coefficients::new(vec![0.5, 0.5], vec![1.0]);
/// let resp = frequency_response(&coeffs, 500);
/// assert_eq!(resp.len(), 500);
/// assert!((resp.magnitude()[0] - 1.0).abs() < 1e-12);
/// ```
pub fn frequency_response(coeffs: &Coefficients, n_points: usize) -> FrequencyResponse {
    if n_points == 0 {
        return FrequencyResponse::empty();
    }
    let w: Vec<f64> = (0..n_points)
        .map(|k| PI * k as f64 / n_points as f64)
        .collect();

    let fft_size = 2 * n_points;
    let h = if coeffs.b.len() <= fft_size && coeffs.a.len() <= fft_size {
        let mut planner = FFTplanner::new(false);
        let fft = planner.plan_fft(fft_size);
        let num = spectrum(&*fft, &coeffs.b, fft_size);
        let den = spectrum(&*fft, &coeffs.a, fft_size);
        num.iter()
            .zip(den.iter())
            .take(n_points)
            .map(|(b, a)| b / a)
            .collect()
    } else {
        direct(coeffs, &w)
    };

    FrequencyResponse { w, h }
}

fn spectrum(fft: &dyn FFT<f64>, coeffs: &[f64], fft_size: usize) -> Vec<Complex<f64>> {
    let mut input: Vec<FFTComplex<f64>> = vec![FFTComplex::zero(); fft_size];
    for (slot, c) in input.iter_mut().zip(coeffs.iter()) {
        *slot = FFTComplex::new(*c, 0.0);
    }
    let mut output: Vec<FFTComplex<f64>> = vec![FFTComplex::zero(); fft_size];
    fft.process(&mut input[..], &mut output[..]);
    output.iter().map(|x| Complex::new(x.re, x.im)).collect()
}

// Evaluates both polynomials in z^-1 on the unit circle sample by sample.
fn direct(coeffs: &Coefficients, w: &[f64]) -> Vec<Complex<f64>> {
    let to_complex = |p: &[f64]| -> Vec<Complex<f64>> {
        p.iter().rev().map(|c| Complex::new(*c, 0.0)).collect()
    };
    let b = to_complex(&coeffs.b);
    let a = to_complex(&coeffs.a);
    w.iter()
        .map(|w| {
            let z_inv = Complex::new(0.0, -w).exp();
            poly::eval(&b, z_inv) / poly::eval(&a, z_inv)
        })
        .collect()
}
