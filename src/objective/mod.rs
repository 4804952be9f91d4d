//! Multi-label objectives: per-example loss and gradient for SGD training.
//!
//! An objective receives the ground truth (one `{0, 1}` entry per label) and the raw scores of
//! the model, normalizes the scores and returns the loss of the example together with the
//! gradient of that loss with respect to the raw scores. Trainers subtract
//! `learning_rate * gradient` from their weights.

use std::fmt::{Debug, Display};
use std::str::FromStr;

use nalgebra::DVector;
use serde::{Deserialize, Serialize};

use crate::err::{NeuraConfigErr, NeuraObjectiveErr};
use crate::normalizer::NeuraNormalizer;
use crate::provenance::NeuraProvenance;

mod hinge;
pub use hinge::NeuraHingeObjective;

mod sigmoid;
pub use sigmoid::NeuraSigmoidObjective;

/// Host type recorded in the provenance of every multi-label objective
pub const MULTI_LABEL_OBJECTIVE: &str = "MultiLabelObjective";

pub trait NeuraMultiLabelObjective: Debug + Display + Send + Sync {
    /// Returns the loss of one example and its gradient with respect to the raw scores.
    ///
    /// `prediction` is consumed: it is normalized in place and its storage is reused for the
    /// gradient. Fails with [`NeuraObjectiveErr::DimensionMismatch`] if `truth` and `prediction`
    /// have different lengths, and with [`NeuraObjectiveErr::Empty`] if they are empty.
    fn value_and_gradient(
        &self,
        truth: &DVector<f64>,
        prediction: DVector<f64>,
    ) -> Result<(f64, DVector<f64>), NeuraObjectiveErr>;

    /// Returns a normalizer behaving like the one applied within `value_and_gradient`,
    /// to turn raw scores into predictions outside of training.
    fn normalizer(&self) -> Box<dyn NeuraNormalizer>;

    /// Whether the normalized scores are probabilities.
    fn is_probabilistic(&self) -> bool;

    /// Normalized scores strictly above this value mark a label as present.
    fn threshold(&self) -> f64;

    fn provenance(&self) -> NeuraProvenance;
}

impl<O: NeuraMultiLabelObjective + ?Sized> NeuraMultiLabelObjective for Box<O> {
    #[inline(always)]
    fn value_and_gradient(
        &self,
        truth: &DVector<f64>,
        prediction: DVector<f64>,
    ) -> Result<(f64, DVector<f64>), NeuraObjectiveErr> {
        self.as_ref().value_and_gradient(truth, prediction)
    }

    fn normalizer(&self) -> Box<dyn NeuraNormalizer> {
        self.as_ref().normalizer()
    }

    fn is_probabilistic(&self) -> bool {
        self.as_ref().is_probabilistic()
    }

    fn threshold(&self) -> f64 {
        self.as_ref().threshold()
    }

    fn provenance(&self) -> NeuraProvenance {
        self.as_ref().provenance()
    }
}

/// Selects an objective from a configuration file or a command-line flag.
///
/// In JSON: `{"kind": "sigmoid"}` or `{"kind": "hinge", "margin": 1.0}`.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum NeuraObjectiveKind {
    Sigmoid,
    Hinge {
        #[serde(default = "NeuraHingeObjective::default_margin")]
        margin: f64,
    },
}

impl NeuraObjectiveKind {
    pub fn build(self) -> Result<Box<dyn NeuraMultiLabelObjective>, NeuraConfigErr> {
        let objective: Box<dyn NeuraMultiLabelObjective> = match self {
            Self::Sigmoid => Box::new(NeuraSigmoidObjective::new()),
            Self::Hinge { margin } => Box::new(NeuraHingeObjective::new(margin)?),
        };

        Ok(objective)
    }
}

impl Default for NeuraObjectiveKind {
    fn default() -> Self {
        Self::Sigmoid
    }
}

impl FromStr for NeuraObjectiveKind {
    type Err = NeuraConfigErr;

    fn from_str(name: &str) -> Result<Self, Self::Err> {
        match name.trim().to_ascii_lowercase().as_str() {
            "sigmoid" => Ok(Self::Sigmoid),
            "hinge" => Ok(Self::Hinge {
                margin: NeuraHingeObjective::default_margin(),
            }),
            _ => Err(NeuraConfigErr::UnknownObjective(name.to_string())),
        }
    }
}
