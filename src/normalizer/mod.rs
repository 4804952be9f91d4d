//! Score normalizers, which map the raw outputs of a model into a calibrated space.

use std::fmt::{Debug, Display};

use nalgebra::DVector;

mod sigmoid;
pub use sigmoid::{sigmoid, NeuraSigmoidNormalizer};

mod softmax;
pub use softmax::NeuraSoftmaxNormalizer;

/// A stateless transform applied to a whole score vector.
///
/// Implementations must not hold any mutable state, so that a single instance can be shared
/// between every worker of a training run. They must not panic either: `NaN` inputs propagate,
/// and infinite inputs saturate to the edges of the output space.
pub trait NeuraNormalizer: Debug + Display + Send + Sync {
    /// Transforms `vector` in place. The dimension of `vector` is left unchanged.
    fn normalize(&self, vector: &mut DVector<f64>);

    /// Returns a normalized copy of `vector`.
    fn normalized(&self, vector: &DVector<f64>) -> DVector<f64> {
        let mut res = vector.clone();
        self.normalize(&mut res);
        res
    }
}

impl<N: NeuraNormalizer + ?Sized> NeuraNormalizer for Box<N> {
    #[inline(always)]
    fn normalize(&self, vector: &mut DVector<f64>) {
        self.as_ref().normalize(vector)
    }
}

/// Leaves the scores untouched; used by margin-based objectives.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct NeuraNoopNormalizer;

impl NeuraNormalizer for NeuraNoopNormalizer {
    #[inline(always)]
    fn normalize(&self, _vector: &mut DVector<f64>) {
        // Noop
    }
}

impl Display for NeuraNoopNormalizer {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Noop")
    }
}

/// Exponentiates every score independently.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct NeuraExpNormalizer;

impl NeuraNormalizer for NeuraExpNormalizer {
    fn normalize(&self, vector: &mut DVector<f64>) {
        vector.apply(|x| *x = x.exp());
    }
}

impl Display for NeuraExpNormalizer {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Exp")
    }
}
