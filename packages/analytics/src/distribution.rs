//! Distribution cards: hourly risk, monthly seasonality and severity.
//!
//! Buckets keep their reference-table order.

use crime_insights_analytics_models::BucketShare;
use crime_insights_dataset_models::{HourlyPoint, MonthlyPoint, SeverityBucket};

/// Hourly incident averages with each bucket's share.
#[must_use]
pub fn hourly_shares(points: &[HourlyPoint]) -> Vec<BucketShare> {
    shares(points.iter().map(|p| (p.time.as_str(), p.incidents)))
}

/// Monthly incident averages with each month's share.
#[must_use]
pub fn monthly_shares(points: &[MonthlyPoint]) -> Vec<BucketShare> {
    shares(points.iter().map(|p| (p.name.as_str(), p.count)))
}

/// Severity classes with each class's share of all incidents.
#[must_use]
pub fn severity_shares(buckets: &[SeverityBucket]) -> Vec<BucketShare> {
    shares(buckets.iter().map(|b| (b.name.as_str(), b.value)))
}

#[allow(clippy::cast_precision_loss)]
fn shares<'a>(buckets: impl Iterator<Item = (&'a str, u64)> + Clone) -> Vec<BucketShare> {
    let total: u64 = buckets.clone().map(|(_, value)| value).sum();

    buckets
        .map(|(name, value)| BucketShare {
            name: name.to_string(),
            value,
            share: if total == 0 {
                0.0
            } else {
                value as f64 / total as f64 * 100.0
            },
        })
        .collect()
}
