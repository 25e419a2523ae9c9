#![cfg_attr(feature = "fail-on-warnings", deny(warnings))]
#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
#![allow(clippy::multiple_crate_versions, clippy::cargo_common_metadata)]

//! Reference snapshot loading for the crime insights dashboard.
//!
//! The default snapshot in `snapshot/reference.toml` is baked into the
//! binary at compile time via [`include_str!`]. Callers may instead supply
//! their own TOML file with the same layout, which is how tests and
//! alternative fixtures inject data into the dashboard.
//!
//! Loading never rejects a dataset for suspicious content. Instead,
//! [`validate::validate`] reports every issue it finds and the loaders log
//! them as warnings.

pub mod validate;

use std::path::Path;

use crime_insights_dataset_models::ReferenceDataset;
use thiserror::Error;

/// Reference snapshot embedded at compile time.
const SNAPSHOT_TOML: &str = include_str!("../snapshot/reference.toml");

/// Errors that can occur while loading a reference dataset.
#[derive(Debug, Error)]
pub enum DatasetError {
    /// The dataset file could not be read.
    #[error("Failed to read dataset {path}: {source}")]
    Io {
        /// Path that was being read.
        path: String,
        /// Underlying I/O error.
        source: std::io::Error,
    },

    /// The dataset TOML is malformed.
    #[error("Failed to parse dataset TOML: {0}")]
    Parse(#[from] toml::de::Error),
}

/// Parses a reference dataset from TOML text.
///
/// # Errors
///
/// Returns [`DatasetError::Parse`] if the TOML is malformed or a table
/// row has the wrong shape.
pub fn parse_dataset_toml(content: &str) -> Result<ReferenceDataset, DatasetError> {
    Ok(toml::from_str(content)?)
}

/// Returns the embedded reference snapshot.
///
/// # Errors
///
/// Returns [`DatasetError::Parse`] if the embedded snapshot is malformed.
pub fn snapshot() -> Result<ReferenceDataset, DatasetError> {
    let dataset = parse_dataset_toml(SNAPSHOT_TOML)?;
    report_issues("embedded snapshot", &dataset);
    Ok(dataset)
}

/// Loads a reference dataset from a TOML file.
///
/// # Errors
///
/// Returns [`DatasetError`] if the file cannot be read or parsed.
pub fn load_from_path(path: &Path) -> Result<ReferenceDataset, DatasetError> {
    let content = std::fs::read_to_string(path).map_err(|source| DatasetError::Io {
        path: path.display().to_string(),
        source,
    })?;
    let dataset = parse_dataset_toml(&content)?;

    log::info!(
        "Loaded dataset from {}: {} temporal records, {} models, {} clusters",
        path.display(),
        dataset.temporal.len(),
        dataset.models.len(),
        dataset.clusters.len(),
    );
    report_issues(&path.display().to_string(), &dataset);

    Ok(dataset)
}

/// Loads the dataset at `path`, or the embedded snapshot when `path` is
/// `None`.
///
/// # Errors
///
/// Returns [`DatasetError`] if the dataset cannot be read or parsed.
pub fn load(path: Option<&Path>) -> Result<ReferenceDataset, DatasetError> {
    path.map_or_else(snapshot, load_from_path)
}

fn report_issues(origin: &str, dataset: &ReferenceDataset) {
    for issue in validate::validate(dataset) {
        log::warn!("{origin}: {issue}");
    }
}
