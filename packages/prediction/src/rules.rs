//! Per-model rule tables.
//!
//! Each model checks its rules in order and stops at the first match.
//! When nothing matches the prediction falls back to [`DEFAULT_LABEL`]
//! with the model's default delta.

use crime_insights_dataset_models::ModelId;
use crime_insights_prediction_models::{Location, PredictionInput};

/// Label predicted when no rule matches.
pub const DEFAULT_LABEL: &str = "Battery";

/// The label and confidence adjustment chosen by a model's rules.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RuleOutcome {
    /// Predicted crime type.
    pub label: &'static str,
    /// Added to the model's base accuracy.
    pub delta: f64,
}

impl RuleOutcome {
    const fn new(label: &'static str, delta: f64) -> Self {
        Self { label, delta }
    }
}

/// Applies `model`'s rules to `inputs`.
#[must_use]
pub fn apply(model: ModelId, inputs: &PredictionInput) -> RuleOutcome {
    match model {
        ModelId::DecisionTree => {
            if inputs.arrest_made {
                RuleOutcome::new("Narcotics", 15.0)
            } else {
                RuleOutcome::new(DEFAULT_LABEL, -5.0)
            }
        }
        ModelId::NaiveBayes => match inputs.location {
            Location::Residence => RuleOutcome::new("Domestic", 8.0),
            Location::Retail => RuleOutcome::new("Theft", 12.0),
            Location::Street => RuleOutcome::new(DEFAULT_LABEL, 0.0),
        },
        ModelId::Svc => {
            if inputs.arrest_made && inputs.location == Location::Street {
                RuleOutcome::new("Weapons", 10.0)
            } else {
                RuleOutcome::new(DEFAULT_LABEL, 0.0)
            }
        }
    }
}
