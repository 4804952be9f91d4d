pub mod algebra;
pub mod err;
pub mod normalizer;
pub mod objective;
pub mod provenance;
pub mod train;
pub mod utils;

pub mod prelude {
    pub use crate::algebra::NeuraVectorSpace;
    pub use crate::err::{NeuraConfigErr, NeuraObjectiveErr};
    pub use crate::normalizer::{
        NeuraExpNormalizer, NeuraNoopNormalizer, NeuraNormalizer, NeuraSigmoidNormalizer,
        NeuraSoftmaxNormalizer,
    };
    pub use crate::objective::{
        NeuraHingeObjective, NeuraMultiLabelObjective, NeuraObjectiveKind, NeuraSigmoidObjective,
    };
    pub use crate::provenance::NeuraProvenance;
    pub use crate::train::{NeuraLinearModel, NeuraMultiLabelPrediction, NeuraSgdTrainer};
}
