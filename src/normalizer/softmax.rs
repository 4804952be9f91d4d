use std::fmt::Display;

use nalgebra::DVector;

use super::NeuraNormalizer;

/// Maps the scores onto a probability distribution over the labels: `exp(x_i) / Σ_j exp(x_j)`.
///
/// Unlike [`NeuraSigmoidNormalizer`](super::NeuraSigmoidNormalizer), the labels compete with each other.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct NeuraSoftmaxNormalizer;

impl NeuraNormalizer for NeuraSoftmaxNormalizer {
    fn normalize(&self, vector: &mut DVector<f64>) {
        let mut max = f64::NEG_INFINITY;
        for &item in vector.iter() {
            if item > max {
                max = item;
            }
        }

        if max == f64::INFINITY {
            // Saturated: the infinite scores share all of the mass
            let count = vector.iter().filter(|x| **x == f64::INFINITY).count() as f64;
            vector.apply(|x| {
                if *x == f64::INFINITY {
                    *x = 1.0 / count;
                } else if !x.is_nan() {
                    *x = 0.0;
                }
            });
            return;
        } else if max == f64::NEG_INFINITY {
            // Either empty, only -∞ or NaN: nothing to discriminate on
            let length = vector.len() as f64;
            vector.apply(|x| {
                if !x.is_nan() {
                    *x = 1.0 / length;
                }
            });
            return;
        }

        // Subtracting the maximum keeps `exp` from overflowing
        for item in vector.iter_mut() {
            *item = (*item - max).exp();
        }

        let sum: f64 = vector.iter().sum();

        for item in vector.iter_mut() {
            *item /= sum;
        }
    }
}

impl Display for NeuraSoftmaxNormalizer {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Softmax")
    }
}
