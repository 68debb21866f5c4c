//! The geometric filter state: zeros and poles on the complex plane.
//!
//! A [`FilterState`] is a plain value. Every snapshot kept by the
//! [`HistoryStack`](history::HistoryStack) is an independent copy, so editing
//! the live state never reaches back into history.

pub mod editor;
pub mod history;

use num::complex::Complex;
use std::fmt;

/// A single zero or pole location.
pub type ComplexPoint = Complex<f64>;

/// Which root list of the transfer function a point belongs to.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum RootKind {
    Zero,
    Pole,
}

impl RootKind {
    /// The tag used for this kind in the CSV interchange format.
    pub fn tag(self) -> &'static str {
        match self {
            RootKind::Zero => "Zero",
            RootKind::Pole => "Pole",
        }
    }

    /// Parses a CSV tag; anything other than the exact literals is `None`.
    pub fn from_tag(tag: &str) -> Option<RootKind> {
        match tag {
            "Zero" => Some(RootKind::Zero),
            "Pole" => Some(RootKind::Pole),
            _ => None,
        }
    }
}

impl fmt::Display for RootKind {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.write_str(self.tag())
    }
}

/// The zeros and poles of a filter at one point in time.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct FilterState {
    pub zeros: Vec<ComplexPoint>,
    pub poles: Vec<ComplexPoint>,
}

impl FilterState {
    pub fn new(zeros: Vec<ComplexPoint>, poles: Vec<ComplexPoint>) -> Self {
        FilterState { zeros, poles }
    }

    /// True when neither zeros nor poles are placed.
    pub fn is_empty(&self) -> bool {
        self.zeros.is_empty() && self.poles.is_empty()
    }

    pub fn roots(&self, kind: RootKind) -> &[ComplexPoint] {
        match kind {
            RootKind::Zero => &self.zeros,
            RootKind::Pole => &self.poles,
        }
    }

    pub fn roots_mut(&mut self, kind: RootKind) -> &mut Vec<ComplexPoint> {
        match kind {
            RootKind::Zero => &mut self.zeros,
            RootKind::Pole => &mut self.poles,
        }
    }

    /// Finds the root closest to `target` across zeros then poles.
    ///
    /// Ties keep the first root encountered in that order.
    pub fn nearest(&self, target: ComplexPoint) -> Option<(RootKind, usize)> {
        let zeros = self.zeros.iter().enumerate().map(|(i, z)| (RootKind::Zero, i, z));
        let poles = self.poles.iter().enumerate().map(|(i, p)| (RootKind::Pole, i, p));

        let mut best: Option<(RootKind, usize, f64)> = None;
        for (kind, idx, root) in zeros.chain(poles) {
            let dist = (root - target).norm();
            match best {
                Some((_, _, d)) if d <= dist => (),
                _ => best = Some((kind, idx, dist)),
            }
        }
        best.map(|(kind, idx, _)| (kind, idx))
    }
}

/// Whether a candidate position may be handed to the editor.
///
/// Callers that map pointer positions onto the plane must reject positions
/// for which this is false before calling
/// [`PoleZeroEditor::add_point`](editor::PoleZeroEditor::add_point) or
/// [`PoleZeroEditor::remove_nearest`](editor::PoleZeroEditor::remove_nearest).
pub fn is_placeable(position: ComplexPoint, radius: f64) -> bool {
    position.re.is_finite() && position.im.is_finite() && position.norm() <= radius
}
