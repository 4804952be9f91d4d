use log::{debug, info};
use nalgebra::{DMatrix, DVector};
use rand::{rngs::StdRng, seq::SliceRandom, SeedableRng};
use serde::{Deserialize, Serialize};

use crate::{
    algebra::NeuraVectorSpace, err::NeuraObjectiveErr, objective::NeuraMultiLabelObjective,
    utils::indices_above,
};

/// A linear multi-label model: one row of weights and one bias per label.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct NeuraLinearModel {
    /// Weights, of shape `labels × features`
    pub weights: DMatrix<f64>,
    pub bias: DVector<f64>,
}

/// The output of [`NeuraLinearModel::predict`]
#[derive(Clone, Debug, PartialEq)]
pub struct NeuraMultiLabelPrediction {
    /// Normalized score of every label
    pub scores: DVector<f64>,

    /// Indices of the labels predicted as present, in increasing order
    pub labels: Vec<usize>,

    /// Whether `scores` are probabilities, or only raw margins
    pub probabilistic: bool,
}

impl NeuraLinearModel {
    pub fn zeros(features: usize, labels: usize) -> Self {
        Self {
            weights: DMatrix::zeros(labels, features),
            bias: DVector::zeros(labels),
        }
    }

    #[inline]
    pub fn features(&self) -> usize {
        self.weights.ncols()
    }

    #[inline]
    pub fn labels(&self) -> usize {
        self.weights.nrows()
    }

    /// Returns the raw scores of the model for `input`.
    pub fn eval(&self, input: &DVector<f64>) -> Result<DVector<f64>, NeuraObjectiveErr> {
        if input.len() != self.features() {
            return Err(NeuraObjectiveErr::DimensionMismatch {
                truth: self.features(),
                prediction: input.len(),
            });
        }

        Ok(&self.weights * input + &self.bias)
    }

    /// Normalizes the scores of `input` the same way `objective` does during training,
    /// and thresholds them into a set of labels.
    pub fn predict(
        &self,
        objective: &impl NeuraMultiLabelObjective,
        input: &DVector<f64>,
    ) -> Result<NeuraMultiLabelPrediction, NeuraObjectiveErr> {
        let mut scores = self.eval(input)?;
        objective.normalizer().normalize(&mut scores);

        Ok(NeuraMultiLabelPrediction {
            labels: indices_above(&scores, objective.threshold()),
            probabilistic: objective.is_probabilistic(),
            scores,
        })
    }
}

/// Plain stochastic gradient descent, updating the model after every example.
#[non_exhaustive]
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct NeuraSgdTrainer {
    /// The learning rate of the gradient descent algorithm; the weights `W` will be updated as follows:
    /// `W += -learning_rate * gradient`.
    ///
    /// Defaults to `0.1`
    pub learning_rate: f64,

    /// How many times the whole dataset is iterated over.
    ///
    /// Defaults to `10`
    pub epochs: usize,

    /// The trainer will log progress at every multiple of `log_epochs` epochs.
    /// If `log_epochs` is zero (default), then no progress will be logged.
    pub log_epochs: usize,

    /// Seed of the generator used to shuffle the examples at the start of each epoch
    pub seed: u64,
}

impl Default for NeuraSgdTrainer {
    fn default() -> Self {
        Self {
            learning_rate: 0.1,
            epochs: 10,
            log_epochs: 0,
            seed: 0,
        }
    }
}

impl NeuraSgdTrainer {
    pub fn new(learning_rate: f64, epochs: usize) -> Self {
        Self {
            learning_rate,
            epochs,
            ..Default::default()
        }
    }

    /// Trains `model` on `examples`, given as `(input, truth)` pairs.
    ///
    /// Returns the average loss of every epoch. Fails on the first example whose dimensions
    /// don't match the model; the updates made before that example are kept.
    pub fn train<Objective: NeuraMultiLabelObjective + ?Sized>(
        &self,
        objective: &Objective,
        model: &mut NeuraLinearModel,
        examples: &[(DVector<f64>, DVector<f64>)],
    ) -> Result<Vec<f64>, NeuraObjectiveErr> {
        let mut losses = Vec::with_capacity(self.epochs);
        if examples.is_empty() {
            return Ok(losses);
        }

        let mut rng = StdRng::seed_from_u64(self.seed);
        let mut order: Vec<usize> = (0..examples.len()).collect();

        debug!(
            "Training {} labels with objective {} on {} examples",
            model.labels(),
            objective,
            examples.len()
        );

        for epoch in 0..self.epochs {
            order.shuffle(&mut rng);
            let mut train_loss = 0.0;

            for &index in &order {
                let (input, truth) = &examples[index];
                train_loss += self.step(objective, model, input, truth)?;
            }

            train_loss /= examples.len() as f64;
            losses.push(train_loss);

            if self.log_epochs > 0 && (epoch + 1) % self.log_epochs == 0 {
                info!("Epoch {}, Training loss: {:.3}", epoch + 1, train_loss);
            }
        }

        Ok(losses)
    }

    /// Applies the gradient of a single example to `model`, returning its loss.
    pub fn step<Objective: NeuraMultiLabelObjective + ?Sized>(
        &self,
        objective: &Objective,
        model: &mut NeuraLinearModel,
        input: &DVector<f64>,
        truth: &DVector<f64>,
    ) -> Result<f64, NeuraObjectiveErr> {
        let scores = model.eval(input)?;
        let (loss, gradient) = objective.value_and_gradient(truth, scores)?;

        // ∂E/∂W = ∂E/∂score · inputᵀ
        let weights_gradient = &gradient * input.transpose();

        model.weights.add_scaled(&weights_gradient, -self.learning_rate);
        model.bias.add_scaled(&gradient, -self.learning_rate);

        Ok(loss)
    }
}
