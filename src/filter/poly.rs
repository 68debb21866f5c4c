//! Polynomial helpers. Coefficients are ordered highest degree first.

use log::warn;
use nalgebra::{DMatrix, Schur};
use num::complex::Complex;
use num::Zero;
use std::cmp::Ordering;

const EIGEN_TOLERANCE: f64 = std::f64::EPSILON;
const EIGEN_ITERATIONS: usize = 100;
const ROOT_ITERATIONS: usize = 500;
const ROOT_TOLERANCE: f64 = 1e-14;
const REAL_AXIS_SNAP: f64 = 1e-9;

/// Expands `(x - r0)(x - r1)...` into a monic polynomial.
///
/// The expansion is carried out in complex arithmetic and the real part is
/// returned. For root sets closed under conjugation the discarded imaginary
/// parts are round-off only. No roots gives `[1]`.
///
/// # Examples
///
/// ```
/// use zplane::filter::poly::from_roots;
/// use num::Complex;
///
/// let b = from_roots(&[Complex::new(0.5, 0.5), Complex::new(0.5, -0.5)]);
/// assert_eq!(b, vec![1.0, -1.0, 0.5]);
/// ```
pub fn from_roots(roots: &[Complex<f64>]) -> Vec<f64> {
    let mut coeffs: Vec<Complex<f64>> = Vec::with_capacity(roots.len() + 1);
    coeffs.push(Complex::new(1.0, 0.0));
    for root in roots {
        coeffs.push(Complex::zero());
        for k in (1..coeffs.len()).rev() {
            let prev = coeffs[k - 1];
            coeffs[k] -= root * prev;
        }
    }
    coeffs.iter().map(|c| c.re).collect()
}

/// Finds every complex root of `coeffs`.
///
/// Leading zeros are ignored and trailing zero coefficients yield roots at
/// the origin. The roots are the eigenvalues of the companion matrix. Roots
/// whose imaginary part is negligible are placed exactly on the real axis and
/// the rest come out as exact conjugate pairs, so expanding them again with
/// [`from_roots`] gives back a real polynomial. A constant polynomial has no
/// roots.
///
/// # Examples
///
/// ```
/// use zplane::filter::poly::{from_roots, roots};
///
/// // (x + 1)^4
/// let p = [1.0, 4.0, 6.0, 4.0, 1.0];
/// let back = from_roots(&roots(&p));
/// for (x, y) in back.iter().zip(p.iter()) {
///     assert!((x - y).abs() < 1e-9);
/// }
/// ```
pub fn roots(coeffs: &[f64]) -> Vec<Complex<f64>> {
    let start = match coeffs.iter().position(|c| *c != 0.0) {
        Some(idx) => idx,
        None => return vec![],
    };
    let coeffs = &coeffs[start..];
    let lead = coeffs[0];

    // Roots at zero come straight from trailing zero coefficients.
    let trailing = coeffs.iter().rev().take_while(|c| **c == 0.0).count();
    let coeffs = &coeffs[..coeffs.len() - trailing];
    let monic: Vec<f64> = coeffs.iter().map(|c| c / lead).collect();

    let found = match monic.len() - 1 {
        0 => vec![],
        1 => vec![Complex::new(-monic[1], 0.0)],
        _ => match companion_eigenvalues(&monic) {
            Some(eigs) => eigs,
            None => {
                warn!("companion matrix did not converge, iterating roots instead");
                durand_kerner(&monic)
            }
        },
    };

    let mut found = pair_conjugates(found);
    found.extend(std::iter::repeat(Complex::zero()).take(trailing));
    found
}

// Eigenvalues of the companion matrix of a monic polynomial of degree >= 2.
fn companion_eigenvalues(monic: &[f64]) -> Option<Vec<Complex<f64>>> {
    let degree = monic.len() - 1;
    let mut companion = DMatrix::<f64>::zeros(degree, degree);
    for j in 0..degree {
        companion[(0, j)] = -monic[j + 1];
    }
    for i in 1..degree {
        companion[(i, i - 1)] = 1.0;
    }
    let schur = Schur::try_new(companion, EIGEN_TOLERANCE, EIGEN_ITERATIONS * degree)?;
    Some(
        schur
            .complex_eigenvalues()
            .iter()
            .map(|z| Complex::new(z.re, z.im))
            .collect(),
    )
}

fn durand_kerner(monic: &[f64]) -> Vec<Complex<f64>> {
    let degree = monic.len() - 1;
    let poly: Vec<Complex<f64>> = monic.iter().map(|c| Complex::new(*c, 0.0)).collect();

    let seed = Complex::new(0.4, 0.9);
    let mut guesses: Vec<Complex<f64>> = Vec::with_capacity(degree);
    let mut guess = Complex::new(1.0, 0.0);
    for _ in 0..degree {
        guesses.push(guess);
        guess *= seed;
    }

    for _ in 0..ROOT_ITERATIONS {
        let mut delta = 0.0_f64;
        for i in 0..degree {
            let xi = guesses[i];
            let mut denom = Complex::new(1.0, 0.0);
            for (j, xj) in guesses.iter().enumerate() {
                if i != j {
                    denom *= xi - xj;
                }
            }
            let step = eval(&poly, xi) / denom;
            guesses[i] = xi - step;
            delta = delta.max(step.norm());
        }
        if delta < ROOT_TOLERANCE {
            break;
        }
    }
    guesses
}

// Snaps near-real roots onto the real axis and matches every other root with
// its closest mirror image, replacing both by an exact conjugate pair. A root
// left without a partner is taken as real.
fn pair_conjugates(found: Vec<Complex<f64>>) -> Vec<Complex<f64>> {
    let mut paired = Vec::with_capacity(found.len());
    let mut complex = Vec::new();
    for r in found {
        if r.im.abs() <= REAL_AXIS_SNAP * r.norm().max(1.0) {
            paired.push(Complex::new(r.re, 0.0));
        } else {
            complex.push(r);
        }
    }

    while let Some(r) = complex.pop() {
        let mirror = r.conj();
        let partner = complex
            .iter()
            .enumerate()
            .map(|(idx, c)| (idx, (c - mirror).norm()))
            .min_by(|x, y| x.1.partial_cmp(&y.1).unwrap_or(Ordering::Equal))
            .map(|(idx, _)| idx);
        match partner {
            Some(idx) => {
                let other = complex.swap_remove(idx);
                let mid = (r + other.conj()) / 2.0;
                let upper = Complex::new(mid.re, mid.im.abs());
                paired.push(upper);
                paired.push(upper.conj());
            }
            None => paired.push(Complex::new(r.re, 0.0)),
        }
    }
    paired
}

/// Evaluates a polynomial at `x` using Horner's rule.
pub fn eval(coeffs: &[Complex<f64>], x: Complex<f64>) -> Complex<f64> {
    coeffs
        .iter()
        .fold(Complex::zero(), |acc, c| acc * x + c)
}

#[cfg(test)]
mod test {
    use crate::filter::poly::*;
    use assert_approx_eq::assert_approx_eq;

    // Orders roots by real part, then imaginary part, ignoring round-off in
    // the real part so that conjugate pairs sort deterministically.
    fn sorted_by_re(mut roots: Vec<Complex<f64>>) -> Vec<Complex<f64>> {
        roots.sort_by(|x, y| {
            let xr = (x.re * 1e6).round();
            let yr = (y.re * 1e6).round();
            xr.partial_cmp(&yr)
                .unwrap()
                .then(x.im.partial_cmp(&y.im).unwrap())
        });
        roots
    }

    #[test]
    fn test_from_roots_empty() {
        assert_eq!(from_roots(&[]), vec![1.0]);
    }

    #[test]
    fn test_from_roots_real() {
        let p = from_roots(&[Complex::new(1.0, 0.0), Complex::new(2.0, 0.0)]);
        assert_eq!(p, vec![1.0, -3.0, 2.0]);
    }

    #[test]
    fn test_from_roots_conjugates_are_real() {
        let p = from_roots(&[Complex::new(0.5, 0.5), Complex::new(0.5, -0.5)]);
        assert_approx_eq!(p[0], 1.0);
        assert_approx_eq!(p[1], -1.0);
        assert_approx_eq!(p[2], 0.5);
    }

    #[test]
    fn test_roots_quadratic() {
        let r = sorted_by_re(roots(&[1.0, -3.0, 2.0]));
        assert_eq!(r.len(), 2);
        assert_approx_eq!(r[0].re, 1.0);
        assert_approx_eq!(r[1].re, 2.0);
        assert_eq!(r[0].im, 0.0);
    }

    #[test]
    fn test_roots_complex_pair() {
        let r = sorted_by_re(roots(&[2.0, -2.0, 1.0]));
        assert_eq!(r.len(), 2);
        assert_approx_eq!(r[0].re, 0.5);
        assert_approx_eq!(r[0].im, -0.5);
        assert_approx_eq!(r[1].im, 0.5);
    }

    #[test]
    fn test_roots_degenerate() {
        assert!(roots(&[]).is_empty());
        assert!(roots(&[0.0, 0.0]).is_empty());
        assert!(roots(&[3.0]).is_empty());
        let r = roots(&[0.0, 1.0, 0.0, 0.0]);
        assert_eq!(r, vec![Complex::zero(), Complex::zero()]);
    }

    #[test]
    fn test_roots_round_trip() {
        let expected = vec![
            Complex::new(-0.3, 0.0),
            Complex::new(0.2, -0.7),
            Complex::new(0.2, 0.7),
            Complex::new(0.8, 0.0),
        ];
        let found = sorted_by_re(roots(&from_roots(&expected)));
        for (f, e) in found.iter().zip(expected.iter()) {
            assert_approx_eq!(f.re, e.re, 1e-9);
            assert_approx_eq!(f.im, e.im, 1e-9);
        }
    }

    fn assert_conjugate_closed(found: &[Complex<f64>]) {
        for r in found {
            assert!(
                found.iter().any(|c| *c == r.conj()),
                "{} has no conjugate in {:?}",
                r,
                found
            );
        }
    }

    #[test]
    fn test_roots_repeated() {
        let p = vec![1.0, 4.0, 6.0, 4.0, 1.0];
        let found = roots(&p);
        assert_eq!(found.len(), 4);
        assert_conjugate_closed(&found);
        for r in &found {
            assert!((r - Complex::new(-1.0, 0.0)).norm() < 1e-3);
        }
        let back = from_roots(&found);
        for (x, y) in back.iter().zip(p.iter()) {
            assert_approx_eq!(x, y, 1e-9);
        }
    }

    #[test]
    fn test_roots_lowpass_shape() {
        // Numerator and denominator of a fourth-order low-pass design:
        // four zeros at -1, two complex pole pairs.
        let b = vec![0.0048, 0.0193, 0.0289, 0.0193, 0.0048];
        let a = from_roots(&[
            Complex::new(0.6, 0.55),
            Complex::new(0.6, -0.55),
            Complex::new(0.45, 0.2),
            Complex::new(0.45, -0.2),
        ]);
        for p in &[b, a] {
            let found = roots(p);
            assert_conjugate_closed(&found);
            let back = from_roots(&found);
            for (x, y) in back.iter().zip(p.iter()) {
                assert_approx_eq!(x, y / p[0], 1e-9);
            }
        }
    }

    #[test]
    fn test_pair_conjugates() {
        let loose = vec![
            Complex::new(-1.0, 1e-5),
            Complex::new(-1.0, -3e-5),
            Complex::new(0.5, 0.0),
            Complex::new(0.2, 1e-12),
        ];
        let paired = pair_conjugates(loose);
        assert_eq!(paired.len(), 4);
        assert_conjugate_closed(&paired);
        assert!(paired.contains(&Complex::new(0.5, 0.0)));
        assert!(paired.contains(&Complex::new(0.2, 0.0)));
        let upper = paired.iter().find(|r| r.im > 0.0).unwrap();
        assert_approx_eq!(upper.re, -1.0);
        assert_approx_eq!(upper.im, 2e-5, 1e-12);
    }

    #[test]
    fn test_durand_kerner_fallback() {
        let found = pair_conjugates(durand_kerner(&[1.0, -1.0, 0.5]));
        let found = sorted_by_re(found);
        assert_approx_eq!(found[0].re, 0.5);
        assert_approx_eq!(found[0].im, -0.5);
        assert_eq!(found[1], found[0].conj());
    }

    #[test]
    fn test_eval() {
        let p = vec![Complex::new(1.0, 0.0), Complex::new(-3.0, 0.0), Complex::new(2.0, 0.0)];
        assert_eq!(eval(&p, Complex::new(2.0, 0.0)), Complex::zero());
        assert_eq!(eval(&p, Complex::new(0.0, 0.0)), Complex::new(2.0, 0.0));
    }
}
