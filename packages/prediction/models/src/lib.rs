#![cfg_attr(feature = "fail-on-warnings", deny(warnings))]
#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
#![allow(clippy::multiple_crate_versions, clippy::cargo_common_metadata)]

//! Input and result types for the prediction lab.

use crime_insights_dataset_models::ModelId;
use serde::{Deserialize, Serialize};
use strum_macros::{AsRefStr, Display, EnumString};

/// Where an incident took place.
#[derive(
    Debug,
    Clone,
    Copy,
    Default,
    PartialEq,
    Eq,
    Hash,
    Serialize,
    Deserialize,
    Display,
    EnumString,
    AsRefStr,
)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum Location {
    /// Street, sidewalk or alley.
    #[default]
    Street,
    /// Private residence.
    Residence,
    /// Store or other retail premises.
    Retail,
}

impl Location {
    /// Returns all variants in selector order.
    #[must_use]
    pub const fn all() -> &'static [Self] {
        &[Self::Street, Self::Residence, Self::Retail]
    }

    /// Label shown on the location selector.
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::Street => "Street",
            Self::Residence => "Residence",
            Self::Retail => "Retail",
        }
    }
}

/// Validated categorical inputs for a prediction.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PredictionInput {
    /// Whether an arrest was made.
    pub arrest_made: bool,
    /// Incident location.
    pub location: Location,
}

/// Prediction inputs exactly as the selector widgets report them.
///
/// Values are untrusted strings and must be validated before use.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RawPredictionInput {
    /// `"true"` or `"false"`.
    pub arrest_made: String,
    /// `"street"`, `"residence"` or `"retail"`.
    pub location: String,
}

/// Outcome of one simulated prediction.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PredictionResult {
    /// Model that produced the result.
    pub model: ModelId,
    /// Predicted crime type.
    pub label: String,
    /// Confidence percentage rounded to one decimal place. Not clamped to
    /// 0-100.
    pub confidence: f64,
    /// Confidence before rounding.
    pub raw_confidence: f64,
}
