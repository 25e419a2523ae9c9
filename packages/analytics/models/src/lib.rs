#![cfg_attr(feature = "fail-on-warnings", deny(warnings))]
#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
#![allow(clippy::multiple_crate_versions, clippy::cargo_common_metadata)]

//! Window tokens and result types for the dashboard analytics.
//!
//! These are the values the dashboard views display: the selected time
//! window, the headline overview metrics, Pareto shares, and the details
//! panel of the cluster explorer.

use std::str::FromStr as _;

use crime_insights_dataset_models::{CrimeTypeCount, HourlyPoint, ModelMetrics, MonthlyPoint};
use serde::{Deserialize, Serialize};
use strum_macros::{AsRefStr, Display, EnumString};

/// How much of the temporal history the trend view displays.
///
/// The "10 year" and "5 year" windows show 11 and 6 trailing records
/// respectively. The labels are historical; the slice lengths are what
/// the dashboard has always displayed.
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
#[serde(rename_all = "camelCase")]
pub enum WindowToken {
    /// The full series.
    #[default]
    #[strum(to_string = "all")]
    All,
    /// The trailing 11 records.
    #[serde(alias = "10yr")]
    #[strum(to_string = "last10", serialize = "10yr")]
    Last10,
    /// The trailing 6 records.
    #[serde(alias = "5yr")]
    #[strum(to_string = "last5", serialize = "5yr")]
    Last5,
}

impl WindowToken {
    /// Returns all variants in display order.
    #[must_use]
    pub const fn all() -> &'static [Self] {
        &[Self::All, Self::Last10, Self::Last5]
    }

    /// Parses a window token, falling back to [`WindowToken::All`] for
    /// anything unrecognised.
    #[must_use]
    pub fn parse_or_default(token: &str) -> Self {
        Self::from_str(token).unwrap_or_else(|_| {
            log::debug!("Unknown window token '{token}', showing the full series");
            Self::All
        })
    }

    /// Number of trailing records this window keeps, or `None` for the
    /// full series.
    #[must_use]
    pub const fn suffix_len(self) -> Option<usize> {
        match self {
            Self::All => None,
            Self::Last10 => Some(11),
            Self::Last5 => Some(6),
        }
    }

    /// Label shown on the window selector.
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::All => "All Time",
            Self::Last10 => "Last 10 Years",
            Self::Last5 => "Last 5 Years",
        }
    }
}

/// Aggregates over the records visible in a window.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WindowSummary {
    /// Window the summary was computed for.
    pub window: WindowToken,
    /// First visible year.
    pub from_year: Option<String>,
    /// Last visible year.
    pub to_year: Option<String>,
    /// Incidents across the window.
    pub incidents: u64,
    /// Arrests across the window.
    pub arrests: u64,
    /// Arrests per incident as a percentage, `None` with no incidents.
    pub arrest_rate: Option<f64>,
    /// Change in yearly incidents from the first to the last visible year,
    /// as a percentage.
    pub percent_change: Option<f64>,
}

/// Headline figures shown on the overview row of the dashboard.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OverviewMetrics {
    /// Sum of all severity buckets.
    pub total_incidents: u64,
    /// Most frequent crime type.
    pub top_crime: Option<CrimeTypeCount>,
    /// Year with the fewest incidents.
    pub safest_year: Option<String>,
    /// Model with the highest accuracy.
    pub best_model: Option<ModelMetrics>,
    /// Busiest time-of-day bucket.
    pub peak_hour: Option<HourlyPoint>,
    /// Busiest month.
    pub peak_month: Option<MonthlyPoint>,
}

/// A crime type's share of the Pareto table.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ParetoShare {
    /// Crime type name.
    pub name: String,
    /// Incidents of this type.
    pub count: u64,
    /// Share of all listed incidents, as a percentage.
    pub share: f64,
    /// Running share including every type ranked above this one.
    pub cumulative_share: f64,
}

/// One bucket of a distribution card with its share of the card total.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BucketShare {
    /// Bucket label (time of day, month or severity class).
    pub name: String,
    /// Value of the bucket.
    pub value: u64,
    /// Share of the sum of all buckets, as a percentage.
    pub share: f64,
}

/// Details panel for a selected cluster.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ClusterDetails {
    /// Cluster identifier.
    pub id: u32,
    /// Area name without the dominant-crime suffix.
    pub area: String,
    /// Dominant crime parsed from the label, if present.
    pub dominant_crime: Option<String>,
    /// Incident volume in the cluster.
    pub incident_volume: u64,
}
