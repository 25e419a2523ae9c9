#![cfg_attr(feature = "fail-on-warnings", deny(warnings))]
#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
#![allow(clippy::multiple_crate_versions, clippy::cargo_common_metadata)]

//! Reference dataset types for the crime insights dashboard.
//!
//! Every table the dashboard displays is pre-aggregated and read-only. The
//! types here describe one snapshot of those tables; they are loaded once
//! at startup and never mutated afterwards.

use serde::{Deserialize, Serialize};
use strum_macros::{AsRefStr, Display, EnumString};

/// Identifier of one of the simulated classification models.
///
/// Parsing also accepts the short ids (`dt`, `nb`) used by the original
/// dashboard's model selector.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    PartialOrd,
    Ord,
    Hash,
    Serialize,
    Deserialize,
    Display,
    EnumString,
    AsRefStr,
)]
#[serde(rename_all = "camelCase")]
pub enum ModelId {
    /// Decision tree classifier.
    #[serde(alias = "dt")]
    #[strum(to_string = "decisionTree", serialize = "dt")]
    DecisionTree,
    /// Multinomial naive Bayes classifier.
    #[serde(alias = "nb")]
    #[strum(to_string = "naiveBayes", serialize = "nb")]
    NaiveBayes,
    /// Support vector classifier.
    #[strum(to_string = "svc")]
    Svc,
}

impl ModelId {
    /// Returns all variants in the order the model selector lists them.
    #[must_use]
    pub const fn all() -> &'static [Self] {
        &[Self::NaiveBayes, Self::DecisionTree, Self::Svc]
    }
}

/// One year of the temporal incident series.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TemporalRecord {
    /// Four-digit year label (e.g. `"2019"`).
    pub year: String,
    /// Reported incidents in the year.
    pub count: u64,
    /// Incidents that resulted in an arrest.
    pub arrests: u64,
}

/// Published evaluation metrics for a simulated model.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ModelMetrics {
    /// Model identifier.
    pub id: ModelId,
    /// Human-readable model name (e.g. `"Naive Bayes"`).
    pub display_name: String,
    /// Accuracy as a percentage (0-100).
    pub accuracy: f64,
    /// Precision (0-1).
    pub precision: f64,
    /// Recall (0-1).
    pub recall: f64,
    /// F1 score (0-1).
    pub f1: f64,
}

/// Incident count for a single crime type (Pareto chart row).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CrimeTypeCount {
    /// Crime type name (e.g. `"Battery"`).
    pub name: String,
    /// Number of incidents.
    pub count: u64,
}

/// Incident count for a severity bucket.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SeverityBucket {
    /// Bucket name (`"Severe"`, `"Moderate"`, `"Minor"`).
    pub name: String,
    /// Number of incidents.
    pub value: u64,
}

/// Average incidents for a time-of-day bucket.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HourlyPoint {
    /// Bucket start (`"HH:MM"`).
    pub time: String,
    /// Average incidents.
    pub incidents: u64,
}

/// Average incidents for a calendar month.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MonthlyPoint {
    /// Three-letter month name.
    pub name: String,
    /// Average incidents.
    pub count: u64,
}

/// An association rule mined from co-occurring crime types.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AssociationRule {
    /// Rule identifier.
    pub id: u32,
    /// Antecedent crime type.
    pub source: String,
    /// Consequent crime type.
    pub target: String,
    /// Rule confidence (0-1).
    pub confidence: f64,
    /// Rule lift.
    pub lift: f64,
}

/// A pre-placed spatial cluster on the schematic city map.
///
/// Coordinates are percentages of the map canvas, not geographic
/// positions.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Cluster {
    /// Cluster identifier.
    pub id: u32,
    /// Horizontal position (0-100).
    pub x: f64,
    /// Vertical position (0-100).
    pub y: f64,
    /// Label in the form `"Area (Dominant Crime)"`.
    pub label: String,
    /// Incident volume in the cluster.
    pub size: u64,
}

/// A recent-activity feed entry.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Alert {
    /// Alert identifier.
    pub id: u32,
    /// Reported crime type.
    pub crime_type: String,
    /// Where the incident was reported (cluster name).
    pub location: String,
    /// Relative report time (e.g. `"10m ago"`).
    pub reported: String,
}

/// A complete reference snapshot.
///
/// Tables default to empty so partial fixtures deserialize cleanly.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ReferenceDataset {
    /// Chronological yearly series.
    pub temporal: Vec<TemporalRecord>,
    /// Per-crime-type counts.
    pub crime_types: Vec<CrimeTypeCount>,
    /// Severity buckets.
    pub severity: Vec<SeverityBucket>,
    /// Time-of-day series.
    pub hourly: Vec<HourlyPoint>,
    /// Month-of-year series.
    pub monthly: Vec<MonthlyPoint>,
    /// Association rules.
    pub association_rules: Vec<AssociationRule>,
    /// Spatial clusters.
    pub clusters: Vec<Cluster>,
    /// Recent-activity feed.
    pub alerts: Vec<Alert>,
    /// Model metrics table.
    pub models: Vec<ModelMetrics>,
}

#[cfg(test)]
mod tests {
    use std::str::FromStr as _;

    use super::*;

    #[test]
    fn model_id_parses_long_and_short_ids() {
        assert_eq!(ModelId::from_str("decisionTree"), Ok(ModelId::DecisionTree));
        assert_eq!(ModelId::from_str("dt"), Ok(ModelId::DecisionTree));
        assert_eq!(ModelId::from_str("naiveBayes"), Ok(ModelId::NaiveBayes));
        assert_eq!(ModelId::from_str("nb"), Ok(ModelId::NaiveBayes));
        assert_eq!(ModelId::from_str("svc"), Ok(ModelId::Svc));
        assert!(ModelId::from_str("randomForest").is_err());
    }

    #[test]
    fn model_id_displays_long_id() {
        assert_eq!(ModelId::DecisionTree.to_string(), "decisionTree");
        assert_eq!(ModelId::NaiveBayes.to_string(), "naiveBayes");
        assert_eq!(ModelId::Svc.to_string(), "svc");
    }

    #[test]
    fn partial_dataset_defaults_missing_tables() {
        let dataset: ReferenceDataset = toml::from_str(
            r#"
            [[temporal]]
            year = "2020"
            count = 10
            arrests = 2
            "#,
        )
        .unwrap();

        assert_eq!(dataset.temporal.len(), 1);
        assert!(dataset.models.is_empty());
        assert!(dataset.clusters.is_empty());
    }
}
