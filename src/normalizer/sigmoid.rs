use std::fmt::Display;

use nalgebra::DVector;
use num::Float;

use super::NeuraNormalizer;

/// The logistic function, `1 / (1 + e^-x)`.
///
/// Saturates to `1` for `+∞` and to `0` for `-∞`; `NaN` is propagated.
#[inline(always)]
pub fn sigmoid<F: Float>(x: F) -> F {
    F::one() / (F::one() + (-x).exp())
}

/// Squashes every score independently into `(0, 1)`, so that each label gets its own probability.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct NeuraSigmoidNormalizer;

impl NeuraNormalizer for NeuraSigmoidNormalizer {
    #[inline]
    fn normalize(&self, vector: &mut DVector<f64>) {
        vector.apply(|x| *x = sigmoid(*x));
    }
}

impl Display for NeuraSigmoidNormalizer {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Sigmoid")
    }
}
