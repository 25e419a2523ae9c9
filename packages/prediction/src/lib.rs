#![cfg_attr(feature = "fail-on-warnings", deny(warnings))]
#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
#![allow(clippy::multiple_crate_versions, clippy::cargo_common_metadata)]

//! Rule-based prediction simulator.
//!
//! No model is evaluated here. A prediction starts from the selected
//! model's published accuracy and applies a fixed adjustment chosen by the
//! model's rule table (see [`rules`]). The result is fully determined by
//! the model, the inputs and the metrics table.
//!
//! [`simulate`] wraps [`predict`] with the fixed latency the prediction
//! lab shows while a model "runs".

pub mod rules;

use std::str::FromStr as _;
use std::time::Duration;

use crime_insights_dataset_models::{ModelId, ModelMetrics};
use crime_insights_prediction_models::{
    Location, PredictionInput, PredictionResult, RawPredictionInput,
};
use thiserror::Error;

/// Latency of a simulated model run.
pub const DEFAULT_LATENCY: Duration = Duration::from_millis(800);

/// Errors that can occur while simulating a prediction.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum PredictionError {
    /// The model is not recognised or has no row in the metrics table.
    #[error("Unknown model: {model}")]
    UnknownModel {
        /// The requested model identifier.
        model: String,
    },

    /// An input value is outside its domain.
    #[error("Invalid {field}: '{value}'")]
    InvalidInput {
        /// Name of the offending input.
        field: &'static str,
        /// The rejected value.
        value: String,
    },
}

/// Looks up the metrics row for `model`.
///
/// # Errors
///
/// Returns [`PredictionError::UnknownModel`] if the table has no row for
/// `model`.
pub fn metrics_for(table: &[ModelMetrics], model: ModelId) -> Result<&ModelMetrics, PredictionError> {
    table
        .iter()
        .find(|m| m.id == model)
        .ok_or_else(|| PredictionError::UnknownModel {
            model: model.to_string(),
        })
}

/// Predicts a crime type for `inputs` using `model`'s rules.
///
/// The confidence is the model's base accuracy plus the matched rule's
/// delta, rounded to one decimal place. It is not clamped, so a large
/// base accuracy can produce a confidence above 100.
///
/// # Errors
///
/// Returns [`PredictionError::UnknownModel`] if `table` has no row for
/// `model`.
pub fn predict(
    model: ModelId,
    inputs: &PredictionInput,
    table: &[ModelMetrics],
) -> Result<PredictionResult, PredictionError> {
    let base = metrics_for(table, model)?.accuracy;
    let outcome = rules::apply(model, inputs);
    let raw_confidence = base + outcome.delta;

    log::debug!(
        "predict: model={model} arrest_made={} location={} -> {} ({raw_confidence:.2})",
        inputs.arrest_made,
        inputs.location,
        outcome.label,
    );

    Ok(PredictionResult {
        model,
        label: outcome.label.to_string(),
        confidence: round_to_tenth(raw_confidence),
        raw_confidence,
    })
}

/// Validates untyped selector values and predicts.
///
/// # Errors
///
/// * [`PredictionError::UnknownModel`] if `model` is not a known model id
///   or has no row in `table`.
/// * [`PredictionError::InvalidInput`] if an input value is out of domain.
pub fn predict_raw(
    model: &str,
    inputs: &RawPredictionInput,
    table: &[ModelMetrics],
) -> Result<PredictionResult, PredictionError> {
    let (model, inputs) = parse_request(model, inputs)?;
    predict(model, &inputs, table)
}

/// Validates an untyped model id and selector values together.
///
/// The model is checked first, so an unknown model is reported even when
/// the inputs are also invalid.
///
/// # Errors
///
/// Returns the errors of [`parse_model`] and [`parse_input`].
pub fn parse_request(
    model: &str,
    inputs: &RawPredictionInput,
) -> Result<(ModelId, PredictionInput), PredictionError> {
    Ok((parse_model(model)?, parse_input(inputs)?))
}

/// Parses a model identifier.
///
/// # Errors
///
/// Returns [`PredictionError::UnknownModel`] for unrecognised ids.
pub fn parse_model(model: &str) -> Result<ModelId, PredictionError> {
    ModelId::from_str(model).map_err(|_| PredictionError::UnknownModel {
        model: model.to_string(),
    })
}

/// Validates raw selector values into a [`PredictionInput`].
///
/// # Errors
///
/// Returns [`PredictionError::InvalidInput`] if `arrest_made` is not
/// `"true"`/`"false"` or `location` is not a known location.
pub fn parse_input(raw: &RawPredictionInput) -> Result<PredictionInput, PredictionError> {
    let arrest_made = match raw.arrest_made.as_str() {
        "true" => true,
        "false" => false,
        other => {
            return Err(PredictionError::InvalidInput {
                field: "arrestMade",
                value: other.to_string(),
            });
        }
    };

    let location =
        Location::from_str(&raw.location).map_err(|_| PredictionError::InvalidInput {
            field: "location",
            value: raw.location.clone(),
        })?;

    Ok(PredictionInput {
        arrest_made,
        location,
    })
}

/// Runs [`predict`] after waiting `latency`.
///
/// Nothing is computed during the wait. Dropping the future before it
/// resolves cancels the run.
///
/// # Errors
///
/// Returns the same errors as [`predict`].
pub async fn simulate(
    model: ModelId,
    inputs: PredictionInput,
    table: &[ModelMetrics],
    latency: Duration,
) -> Result<PredictionResult, PredictionError> {
    tokio::time::sleep(latency).await;
    predict(model, &inputs, table)
}

fn round_to_tenth(value: f64) -> f64 {
    (value * 10.0).round() / 10.0
}
