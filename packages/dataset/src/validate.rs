//! Consistency checks for reference datasets.
//!
//! None of these checks are fatal. A dataset with issues still loads and
//! displays; the issues are surfaced so that bad fixtures are noticed.

use std::collections::BTreeSet;

use crime_insights_dataset_models::{ModelId, ReferenceDataset};

/// A single consistency problem found in a reference dataset.
#[derive(Debug, Clone, PartialEq)]
pub enum DataIssue {
    /// A year reports more arrests than incidents.
    ArrestsExceedCount {
        /// Year label.
        year: String,
        /// Reported incidents.
        count: u64,
        /// Reported arrests.
        arrests: u64,
    },
    /// A year label is not a four-digit year.
    InvalidYear {
        /// Offending label.
        year: String,
    },
    /// The temporal series is not strictly increasing by year.
    NotChronological {
        /// Label of the preceding record.
        previous: String,
        /// Label of the out-of-order record.
        year: String,
    },
    /// The metrics table contains the same model twice.
    DuplicateModel {
        /// Repeated model.
        id: ModelId,
    },
    /// The metrics table has no row for a model.
    MissingModel {
        /// Absent model.
        id: ModelId,
    },
    /// A metric is outside its documented range.
    MetricOutOfRange {
        /// Model the metric belongs to.
        id: ModelId,
        /// Metric name.
        metric: &'static str,
        /// Offending value.
        value: f64,
    },
    /// A cluster is placed outside the map canvas.
    ClusterOutOfBounds {
        /// Cluster identifier.
        id: u32,
    },
}

impl std::fmt::Display for DataIssue {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::ArrestsExceedCount {
                year,
                count,
                arrests,
            } => write!(f, "{year}: {arrests} arrests exceed {count} incidents"),
            Self::InvalidYear { year } => write!(f, "invalid year label '{year}'"),
            Self::NotChronological { previous, year } => {
                write!(f, "year {year} follows {previous} out of order")
            }
            Self::DuplicateModel { id } => write!(f, "model {id} listed more than once"),
            Self::MissingModel { id } => write!(f, "model {id} has no metrics row"),
            Self::MetricOutOfRange { id, metric, value } => {
                write!(f, "model {id}: {metric} {value} out of range")
            }
            Self::ClusterOutOfBounds { id } => write!(f, "cluster {id} is off the map"),
        }
    }
}

/// Checks a dataset for consistency problems.
///
/// Returns every issue found, in table order. An empty result means the
/// dataset is clean.
#[must_use]
pub fn validate(dataset: &ReferenceDataset) -> Vec<DataIssue> {
    let mut issues = Vec::new();

    let mut previous: Option<&str> = None;
    for record in &dataset.temporal {
        if record.arrests > record.count {
            issues.push(DataIssue::ArrestsExceedCount {
                year: record.year.clone(),
                count: record.count,
                arrests: record.arrests,
            });
        }

        if !is_year(&record.year) {
            issues.push(DataIssue::InvalidYear {
                year: record.year.clone(),
            });
        }

        // Four-digit labels order the same lexically and numerically.
        if let Some(prev) = previous
            && prev >= record.year.as_str()
        {
            issues.push(DataIssue::NotChronological {
                previous: prev.to_string(),
                year: record.year.clone(),
            });
        }
        previous = Some(record.year.as_str());
    }

    let mut seen = BTreeSet::new();
    for model in &dataset.models {
        if !seen.insert(model.id) {
            issues.push(DataIssue::DuplicateModel { id: model.id });
        }

        if !(0.0..=100.0).contains(&model.accuracy) {
            issues.push(DataIssue::MetricOutOfRange {
                id: model.id,
                metric: "accuracy",
                value: model.accuracy,
            });
        }

        for (metric, value) in [
            ("precision", model.precision),
            ("recall", model.recall),
            ("f1", model.f1),
        ] {
            if !(0.0..=1.0).contains(&value) {
                issues.push(DataIssue::MetricOutOfRange {
                    id: model.id,
                    metric,
                    value,
                });
            }
        }
    }

    for id in ModelId::all() {
        if !seen.contains(id) {
            issues.push(DataIssue::MissingModel { id: *id });
        }
    }

    for cluster in &dataset.clusters {
        if !(0.0..=100.0).contains(&cluster.x) || !(0.0..=100.0).contains(&cluster.y) {
            issues.push(DataIssue::ClusterOutOfBounds { id: cluster.id });
        }
    }

    issues
}

fn is_year(label: &str) -> bool {
    label.len() == 4 && label.bytes().all(|b| b.is_ascii_digit())
}
