use serde::{Deserialize, Serialize};

/// Describes which component was used to train a model, so that the run can be reproduced.
///
/// Each component builds its own descriptor; nothing is discovered at runtime.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct NeuraProvenance {
    /// Name of the concrete type, eg. `NeuraSigmoidObjective`
    pub class_name: String,

    /// Name of the role this component plays, eg. `MultiLabelObjective`
    pub host_type: String,

    /// Hyperparameters, as `(name, value)` pairs
    pub parameters: Vec<(String, String)>,
}

impl NeuraProvenance {
    pub fn new(class_name: impl Into<String>, host_type: impl Into<String>) -> Self {
        Self {
            class_name: class_name.into(),
            host_type: host_type.into(),
            parameters: Vec::new(),
        }
    }

    pub fn with_parameter(mut self, name: impl Into<String>, value: impl ToString) -> Self {
        self.parameters.push((name.into(), value.to_string()));
        self
    }

    pub fn parameter(&self, name: &str) -> Option<&str> {
        self.parameters
            .iter()
            .find(|(key, _)| key == name)
            .map(|(_, value)| value.as_str())
    }
}
