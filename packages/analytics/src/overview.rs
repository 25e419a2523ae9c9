//! Headline figures for the dashboard overview.
//!
//! Ties always resolve to the row listed first in the reference table.

use crime_insights_analytics_models::{OverviewMetrics, ParetoShare};
use crime_insights_dataset_models::{CrimeTypeCount, ModelMetrics, ReferenceDataset};

/// Computes the overview row from the reference tables.
#[must_use]
pub fn overview(dataset: &ReferenceDataset) -> OverviewMetrics {
    OverviewMetrics {
        total_incidents: dataset.severity.iter().map(|b| b.value).sum(),
        top_crime: top_crime(&dataset.crime_types).cloned(),
        safest_year: dataset
            .temporal
            .iter()
            .reduce(|best, r| if r.count < best.count { r } else { best })
            .map(|r| r.year.clone()),
        best_model: best_model(&dataset.models).cloned(),
        peak_hour: dataset
            .hourly
            .iter()
            .reduce(|best, p| if p.incidents > best.incidents { p } else { best })
            .cloned(),
        peak_month: dataset
            .monthly
            .iter()
            .reduce(|best, p| if p.count > best.count { p } else { best })
            .cloned(),
    }
}

/// Returns the most frequent crime type.
#[must_use]
pub fn top_crime(crime_types: &[CrimeTypeCount]) -> Option<&CrimeTypeCount> {
    crime_types
        .iter()
        .reduce(|best, c| if c.count > best.count { c } else { best })
}

/// Returns the model with the highest accuracy.
#[must_use]
pub fn best_model(models: &[ModelMetrics]) -> Option<&ModelMetrics> {
    models
        .iter()
        .reduce(|best, m| if m.accuracy > best.accuracy { m } else { best })
}

/// Ranks crime types by count and computes each one's share of the total.
#[must_use]
#[allow(clippy::cast_precision_loss)]
pub fn pareto_shares(crime_types: &[CrimeTypeCount]) -> Vec<ParetoShare> {
    let mut ranked: Vec<&CrimeTypeCount> = crime_types.iter().collect();
    ranked.sort_by(|a, b| b.count.cmp(&a.count));

    let total: u64 = ranked.iter().map(|c| c.count).sum();
    let mut running = 0u64;

    ranked
        .into_iter()
        .map(|c| {
            running += c.count;
            let (share, cumulative_share) = if total == 0 {
                (0.0, 0.0)
            } else {
                (
                    c.count as f64 / total as f64 * 100.0,
                    running as f64 / total as f64 * 100.0,
                )
            };
            ParetoShare {
                name: c.name.clone(),
                count: c.count,
                share,
                cumulative_share,
            }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use crime_insights_dataset_models::{ModelId, TemporalRecord};

    use super::*;

    fn crime(name: &str, count: u64) -> CrimeTypeCount {
        CrimeTypeCount {
            name: name.to_string(),
            count,
        }
    }

    #[test]
    fn snapshot_overview_matches_published_figures() {
        let dataset = crime_insights_dataset::snapshot().unwrap();
        let metrics = overview(&dataset);

        assert_eq!(metrics.total_incidents, 138_393);
        assert_eq!(metrics.top_crime.unwrap().name, "Battery");
        assert_eq!(metrics.safest_year.as_deref(), Some("2022"));

        let best = metrics.best_model.unwrap();
        assert_eq!(best.id, ModelId::NaiveBayes);
        assert!((best.accuracy - 53.54).abs() < f64::EPSILON);

        assert_eq!(metrics.peak_hour.unwrap().time, "20:00");
        assert_eq!(metrics.peak_month.unwrap().name, "Aug");
    }

    #[test]
    fn empty_dataset_has_no_headline_rows() {
        let metrics = overview(&ReferenceDataset::default());

        assert_eq!(metrics.total_incidents, 0);
        assert!(metrics.top_crime.is_none());
        assert!(metrics.safest_year.is_none());
        assert!(metrics.best_model.is_none());
        assert!(metrics.peak_hour.is_none());
        assert!(metrics.peak_month.is_none());
    }

    #[test]
    fn ties_resolve_to_first_row() {
        let types = [crime("Theft", 5), crime("Arson", 5)];
        assert_eq!(top_crime(&types).unwrap().name, "Theft");

        let dataset = ReferenceDataset {
            temporal: vec![
                TemporalRecord {
                    year: "2001".to_string(),
                    count: 3,
                    arrests: 0,
                },
                TemporalRecord {
                    year: "2002".to_string(),
                    count: 3,
                    arrests: 0,
                },
            ],
            ..ReferenceDataset::default()
        };
        assert_eq!(overview(&dataset).safest_year.as_deref(), Some("2001"));
    }

    #[test]
    fn pareto_shares_are_ranked_and_cumulative() {
        let shares = pareto_shares(&[crime("Damage", 25), crime("Battery", 50), crime("Theft", 25)]);

        let names: Vec<&str> = shares.iter().map(|s| s.name.as_str()).collect();
        assert_eq!(names, vec!["Battery", "Damage", "Theft"]);
        assert!((shares[0].share - 50.0).abs() < 1e-9);
        assert!((shares[1].cumulative_share - 75.0).abs() < 1e-9);
        assert!((shares[2].cumulative_share - 100.0).abs() < 1e-9);
    }

    #[test]
    fn pareto_shares_of_zero_counts_are_zero() {
        let shares = pareto_shares(&[crime("Theft", 0)]);
        assert!(shares[0].share.abs() < f64::EPSILON);
        assert!(shares[0].cumulative_share.abs() < f64::EPSILON);
    }
}
