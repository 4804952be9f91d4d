use std::fmt::Display;

use log::trace;
use nalgebra::DVector;

use super::{NeuraMultiLabelObjective, MULTI_LABEL_OBJECTIVE};
use crate::err::NeuraObjectiveErr;
use crate::normalizer::{NeuraNormalizer, NeuraSigmoidNormalizer};
use crate::provenance::NeuraProvenance;

/// Probabilities are kept within `[EPSILON, 1 - EPSILON]` before taking their logarithm
const EPSILON: f64 = 1e-12;

/// A multi-label version of binary cross-entropy, which incorporates the sigmoid.
///
/// Every label is an independent binary classification problem:
/// - Loss: `-Σᵢ tᵢ·ln(pᵢ) + (1 - tᵢ)·ln(1 - pᵢ)`, where `pᵢ = σ(scoreᵢ)`
/// - Gradient: `pᵢ - tᵢ`
///
/// Generates a probabilistic model, and uses a [`NeuraSigmoidNormalizer`].
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct NeuraSigmoidObjective {
    normalizer: NeuraSigmoidNormalizer,
}

impl NeuraSigmoidObjective {
    pub fn new() -> Self {
        Self {
            normalizer: NeuraSigmoidNormalizer,
        }
    }
}

impl NeuraMultiLabelObjective for NeuraSigmoidObjective {
    fn value_and_gradient(
        &self,
        truth: &DVector<f64>,
        mut prediction: DVector<f64>,
    ) -> Result<(f64, DVector<f64>), NeuraObjectiveErr> {
        NeuraObjectiveErr::check(truth.len(), prediction.len())?;

        self.normalizer.normalize(&mut prediction);

        let mut loss = 0.0;
        for (probability, &target) in prediction.iter_mut().zip(truth.iter()) {
            let clamped = probability.clamp(EPSILON, 1.0 - EPSILON);
            loss -= target * clamped.ln() + (1.0 - target) * (1.0 - clamped).ln();

            // ∂E/∂scoreᵢ = pᵢ - tᵢ
            *probability -= target;
        }

        trace!("{}: loss {} over {} labels", self, loss, truth.len());

        Ok((loss, prediction))
    }

    fn normalizer(&self) -> Box<dyn NeuraNormalizer> {
        Box::new(NeuraSigmoidNormalizer)
    }

    /// Returns true.
    fn is_probabilistic(&self) -> bool {
        true
    }

    fn threshold(&self) -> f64 {
        0.5
    }

    fn provenance(&self) -> NeuraProvenance {
        NeuraProvenance::new("NeuraSigmoidObjective", MULTI_LABEL_OBJECTIVE)
    }
}

impl Display for NeuraSigmoidObjective {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Sigmoid")
    }
}

#[cfg(test)]
mod test {
    use nalgebra::dvector;

    use super::*;
    use crate::{assert_approx, utils::uniform_vector};

    const TOLERANCE: f64 = 1e-6;

    #[test]
    fn test_sigmoid_zero_scores() {
        let (loss, gradient) = NeuraSigmoidObjective::new()
            .value_and_gradient(&dvector![1.0, 0.0, 1.0], dvector![0.0, 0.0, 0.0])
            .unwrap();

        assert_approx!(3.0 * std::f64::consts::LN_2, loss, TOLERANCE);
        assert_approx!(2.0794415, loss, TOLERANCE);

        assert_approx!(-0.5, gradient[0], TOLERANCE);
        assert_approx!(0.5, gradient[1], TOLERANCE);
        assert_approx!(-0.5, gradient[2], TOLERANCE);
    }

    #[test]
    fn test_sigmoid_matches_reference() {
        let objective = NeuraSigmoidObjective::new();
        let truth = dvector![1.0, 0.0, 0.0, 1.0];
        let scores = dvector![2.0, -1.0, 0.5, -3.0];

        let (loss, gradient) = objective
            .value_and_gradient(&truth, scores.clone())
            .unwrap();

        let mut expected_loss = 0.0;
        for i in 0..4 {
            let p = 1.0 / (1.0 + (-scores[i]).exp());
            expected_loss -= truth[i] * p.ln() + (1.0 - truth[i]) * (1.0 - p).ln();
            assert_approx!(p - truth[i], gradient[i], TOLERANCE);
        }
        assert_approx!(expected_loss, loss, TOLERANCE);
    }

    #[test]
    fn test_sigmoid_gradient_matches_finite_difference() {
        const STEP: f64 = 1e-6;
        let objective = NeuraSigmoidObjective::new();

        for _ in 0..20 {
            let truth = uniform_vector(5, 0.0, 1.0).map(|x| x.round());
            let scores = uniform_vector(5, -4.0, 4.0);
            let (_, gradient) = objective
                .value_and_gradient(&truth, scores.clone())
                .unwrap();

            for i in 0..5 {
                let mut above = scores.clone();
                above[i] += STEP;
                let mut below = scores.clone();
                below[i] -= STEP;

                let (loss_above, _) = objective.value_and_gradient(&truth, above).unwrap();
                let (loss_below, _) = objective.value_and_gradient(&truth, below).unwrap();

                assert_approx!((loss_above - loss_below) / (2.0 * STEP), gradient[i], 1e-4);
            }
        }
    }

    #[test]
    fn test_sigmoid_gradient_sign() {
        let objective = NeuraSigmoidObjective::new();

        for _ in 0..100 {
            let scores = uniform_vector(2, -10.0, 10.0);
            let (_, gradient) = objective
                .value_and_gradient(&dvector![1.0, 0.0], scores)
                .unwrap();

            // A present label pushes its score up, an absent one pushes it down
            assert!(gradient[0] < 0.0);
            assert!(gradient[1] > 0.0);
        }
    }

    #[test]
    fn test_sigmoid_saturated_loss_is_finite() {
        let objective = NeuraSigmoidObjective::new();

        let (loss, gradient) = objective
            .value_and_gradient(
                &dvector![1.0, 0.0, 1.0, 0.0],
                dvector![-1000.0, 1000.0, f64::NEG_INFINITY, f64::INFINITY],
            )
            .unwrap();

        assert!(loss.is_finite());
        assert!(loss > 0.0);
        assert_eq!(gradient, dvector![-1.0, 1.0, -1.0, 1.0]);

        let (loss, _) = objective
            .value_and_gradient(&dvector![1.0, 0.0], dvector![1000.0, -1000.0])
            .unwrap();
        assert!(loss.is_finite());
        assert!(loss >= 0.0);
        assert!(loss < 1e-9);
    }

    #[test]
    fn test_sigmoid_dimension_mismatch() {
        let result = NeuraSigmoidObjective::new()
            .value_and_gradient(&dvector![1.0, 0.0, 1.0], dvector![0.0, 0.0]);

        assert_eq!(
            result,
            Err(NeuraObjectiveErr::DimensionMismatch {
                truth: 3,
                prediction: 2
            })
        );
    }

    #[test]
    fn test_sigmoid_empty() {
        let result = NeuraSigmoidObjective::new()
            .value_and_gradient(&DVector::zeros(0), DVector::zeros(0));

        assert_eq!(result, Err(NeuraObjectiveErr::Empty));
    }

    #[test]
    fn test_sigmoid_normalizer_matches() {
        let objective = NeuraSigmoidObjective::new();
        let normalizer = objective.normalizer();

        for _ in 0..20 {
            let truth = uniform_vector(6, 0.0, 1.0).map(|x| x.round());
            let scores = uniform_vector(6, -5.0, 5.0);

            let (_, gradient) = objective
                .value_and_gradient(&truth, scores.clone())
                .unwrap();

            // The gradient is the normalized prediction shifted by the truth
            let normalized = normalizer.normalized(&scores);
            assert_eq!(normalized.len(), gradient.len());
            for i in 0..6 {
                assert_approx!(normalized[i] - truth[i], gradient[i], 1e-12);
            }
        }
    }

    #[test]
    fn test_sigmoid_description() {
        let objective = NeuraSigmoidObjective::new();

        assert!(objective.is_probabilistic());
        assert_eq!(objective.threshold(), 0.5);
        assert_eq!(objective.to_string(), "Sigmoid");
        assert_eq!(objective.normalizer().to_string(), "Sigmoid");

        let provenance = objective.provenance();
        assert_eq!(provenance.class_name, "NeuraSigmoidObjective");
        assert_eq!(provenance.host_type, "MultiLabelObjective");
        assert!(provenance.parameters.is_empty());
    }
}
