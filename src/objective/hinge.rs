use std::fmt::Display;

use log::trace;
use nalgebra::DVector;

use super::{NeuraMultiLabelObjective, MULTI_LABEL_OBJECTIVE};
use crate::err::{NeuraConfigErr, NeuraObjectiveErr};
use crate::normalizer::{NeuraNoopNormalizer, NeuraNormalizer};
use crate::provenance::NeuraProvenance;

/// Hinge loss applied independently to every label, as in a one-vs-rest SVM.
///
/// Labels in `{0, 1}` are mapped to `yᵢ ∈ {-1, +1}`:
/// - Loss: `Σᵢ max(0, margin - yᵢ·scoreᵢ)`
/// - Gradient: `-yᵢ` if `yᵢ·scoreᵢ < margin`, else `0`
///
/// Scores are margins rather than probabilities, so the scores are left untouched.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct NeuraHingeObjective {
    margin: f64,
}

impl NeuraHingeObjective {
    pub fn new(margin: f64) -> Result<Self, NeuraConfigErr> {
        if margin.is_finite() && margin > 0.0 {
            Ok(Self { margin })
        } else {
            Err(NeuraConfigErr::InvalidMargin(margin))
        }
    }

    pub fn default_margin() -> f64 {
        1.0
    }

    pub fn margin(&self) -> f64 {
        self.margin
    }
}

impl Default for NeuraHingeObjective {
    fn default() -> Self {
        Self {
            margin: Self::default_margin(),
        }
    }
}

impl NeuraMultiLabelObjective for NeuraHingeObjective {
    fn value_and_gradient(
        &self,
        truth: &DVector<f64>,
        mut prediction: DVector<f64>,
    ) -> Result<(f64, DVector<f64>), NeuraObjectiveErr> {
        NeuraObjectiveErr::check(truth.len(), prediction.len())?;

        let mut loss = 0.0;
        for (score, &target) in prediction.iter_mut().zip(truth.iter()) {
            let sign = if target > 0.5 { 1.0 } else { -1.0 };
            let slack = self.margin - sign * *score;

            if slack > 0.0 {
                loss += slack;
                *score = -sign;
            } else {
                *score = 0.0;
            }
        }

        trace!("{}: loss {} over {} labels", self, loss, truth.len());

        Ok((loss, prediction))
    }

    fn normalizer(&self) -> Box<dyn NeuraNormalizer> {
        Box::new(NeuraNoopNormalizer)
    }

    /// Returns false.
    fn is_probabilistic(&self) -> bool {
        false
    }

    fn threshold(&self) -> f64 {
        0.0
    }

    fn provenance(&self) -> NeuraProvenance {
        NeuraProvenance::new("NeuraHingeObjective", MULTI_LABEL_OBJECTIVE)
            .with_parameter("margin", self.margin)
    }
}

impl Display for NeuraHingeObjective {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Hinge")
    }
}

#[cfg(test)]
mod test {
    use nalgebra::dvector;

    use super::*;
    use crate::assert_approx;

    #[test]
    fn test_hinge_eval() {
        let (loss, gradient) = NeuraHingeObjective::default()
            .value_and_gradient(&dvector![1.0, 0.0, 1.0, 0.0], dvector![2.0, 0.5, 0.25, -3.0])
            .unwrap();

        // Only the second (0.5 + 1) and third (1 - 0.25) labels are within the margin
        assert_approx!(2.25, loss, 1e-12);
        assert_eq!(gradient, dvector![0.0, 1.0, -1.0, 0.0]);
    }

    #[test]
    fn test_hinge_margin() {
        let objective = NeuraHingeObjective::new(3.0).unwrap();
        let (loss, gradient) = objective
            .value_and_gradient(&dvector![1.0], dvector![2.0])
            .unwrap();

        assert_approx!(1.0, loss, 1e-12);
        assert_eq!(gradient, dvector![-1.0]);
        assert_eq!(objective.provenance().parameter("margin"), Some("3"));
    }

    #[test]
    fn test_hinge_invalid_margin() {
        assert_eq!(
            NeuraHingeObjective::new(0.0),
            Err(NeuraConfigErr::InvalidMargin(0.0))
        );
        assert!(NeuraHingeObjective::new(f64::NAN).is_err());
    }

    #[test]
    fn test_hinge_dimension_mismatch() {
        assert_eq!(
            NeuraHingeObjective::default().value_and_gradient(&dvector![1.0], dvector![0.0, 1.0]),
            Err(NeuraObjectiveErr::DimensionMismatch {
                truth: 1,
                prediction: 2
            })
        );
    }

    #[test]
    fn test_hinge_description() {
        let objective = NeuraHingeObjective::default();

        assert!(!objective.is_probabilistic());
        assert_eq!(objective.threshold(), 0.0);
        assert_eq!(objective.to_string(), "Hinge");
        assert_eq!(objective.normalizer().to_string(), "Noop");
        assert_eq!(objective.margin(), 1.0);
    }
}
