//! Various error types
//!

use thiserror::Error;

/// Error type returned by `NeuraMultiLabelObjective::value_and_gradient` and by the trainer
#[derive(Clone, Copy, Debug, PartialEq, Eq, Error)]
pub enum NeuraObjectiveErr {
    #[error("dimension mismatch: truth has {truth} labels, prediction has {prediction}")]
    DimensionMismatch { truth: usize, prediction: usize },

    #[error("truth and prediction vectors must not be empty")]
    Empty,
}

impl NeuraObjectiveErr {
    /// Checks the shared preconditions of every objective: equal, non-zero lengths.
    #[inline]
    pub fn check(truth: usize, prediction: usize) -> Result<(), Self> {
        if truth != prediction {
            Err(Self::DimensionMismatch { truth, prediction })
        } else if truth == 0 {
            Err(Self::Empty)
        } else {
            Ok(())
        }
    }
}

/// Error type returned when selecting an objective from a configuration value
#[derive(Clone, Debug, PartialEq, Error)]
pub enum NeuraConfigErr {
    #[error("unknown objective {0:?}")]
    UnknownObjective(String),

    #[error("hinge margin must be finite and positive, got {0}")]
    InvalidMargin(f64),
}
