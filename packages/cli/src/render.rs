//! Plain-text rendering of dashboard views.
//!
//! Every function returns a `String` so the same output backs both the
//! subcommands and the interactive menu.

use crime_insights_analytics::{clusters, distribution, overview};
use crime_insights_analytics_models::{
    BucketShare, ClusterDetails, OverviewMetrics, WindowSummary,
};
use crime_insights_dashboard::PredictionSlot;
use crime_insights_dataset::validate::DataIssue;
use crime_insights_dataset_models::{
    Alert, AssociationRule, Cluster, HourlyPoint, ModelMetrics, MonthlyPoint, ReferenceDataset,
    SeverityBucket, TemporalRecord,
};

/// Renders the visible temporal records and their window summary.
pub fn trends(records: &[TemporalRecord], summary: &WindowSummary) -> String {
    let mut lines = vec![
        format!("{} ({} years)", summary.window.label(), records.len()),
        format!("{:<6} {:>10} {:>10}", "YEAR", "INCIDENTS", "ARRESTS"),
        "-".repeat(28),
    ];
    lines.extend(
        records
            .iter()
            .map(|r| format!("{:<6} {:>10} {:>10}", r.year, r.count, r.arrests)),
    );

    lines.push(String::new());
    lines.push(format!(
        "Incidents: {}  Arrests: {}",
        summary.incidents, summary.arrests
    ));
    if let Some(rate) = summary.arrest_rate {
        lines.push(format!("Arrest rate: {rate:.1}%"));
    }
    if let (Some(change), Some(from), Some(to)) =
        (summary.percent_change, &summary.from_year, &summary.to_year)
    {
        lines.push(format!("Change {from} -> {to}: {change:+.1}%"));
    }

    finish(lines)
}

/// Renders the headline overview row and the Pareto table.
pub fn overview(metrics: &OverviewMetrics, dataset: &ReferenceDataset) -> String {
    let mut lines = vec![format!("Total incidents: {}", metrics.total_incidents)];

    if let Some(top) = &metrics.top_crime {
        lines.push(format!("Top crime:       {} (~{} cases)", top.name, top.count));
    }
    if let Some(year) = &metrics.safest_year {
        lines.push(format!("Safest year:     {year}"));
    }
    if let Some(model) = &metrics.best_model {
        lines.push(format!(
            "Best model:      {} ({}%)",
            model.display_name, model.accuracy
        ));
    }
    if let Some(hour) = &metrics.peak_hour {
        lines.push(format!("Peak hour:       {} ({} avg)", hour.time, hour.incidents));
    }
    if let Some(month) = &metrics.peak_month {
        lines.push(format!("Peak month:      {} ({} avg)", month.name, month.count));
    }

    let shares = overview::pareto_shares(&dataset.crime_types);
    if !shares.is_empty() {
        lines.push(String::new());
        lines.push(format!(
            "{:<12} {:>8} {:>7} {:>7}",
            "TYPE", "COUNT", "SHARE", "CUM"
        ));
        lines.push("-".repeat(37));
        lines.extend(shares.iter().map(|s| {
            format!(
                "{:<12} {:>8} {:>6.1}% {:>6.1}%",
                s.name, s.count, s.share, s.cumulative_share
            )
        }));
    }

    finish(lines)
}

/// Renders the hourly risk card.
pub fn hourly(points: &[HourlyPoint]) -> String {
    bucket_table(
        "Hourly risk (avg incidents)",
        "TIME",
        &distribution::hourly_shares(points),
    )
}

/// Renders the monthly seasonality card.
pub fn monthly(points: &[MonthlyPoint]) -> String {
    bucket_table(
        "Monthly seasonality (avg count)",
        "MONTH",
        &distribution::monthly_shares(points),
    )
}

/// Renders the crime severity card.
pub fn severity(buckets: &[SeverityBucket]) -> String {
    bucket_table(
        "Crime severity",
        "CLASS",
        &distribution::severity_shares(buckets),
    )
}

fn bucket_table(title: &str, heading: &str, shares: &[BucketShare]) -> String {
    let mut lines = vec![
        title.to_string(),
        format!("{heading:<10} {:>8} {:>7}", "VALUE", "SHARE"),
        "-".repeat(27),
    ];
    lines.extend(
        shares
            .iter()
            .map(|s| format!("{:<10} {:>8} {:>6.1}%", s.name, s.value, s.share)),
    );
    finish(lines)
}

/// Renders the model comparison table.
pub fn models(models: &[ModelMetrics]) -> String {
    let mut lines = vec![
        format!(
            "{:<14} {:<15} {:>8} {:>9} {:>6} {:>5}",
            "ID", "MODEL", "ACCURACY", "PRECISION", "RECALL", "F1"
        ),
        "-".repeat(62),
    ];
    lines.extend(models.iter().map(|m| {
        format!(
            "{:<14} {:<15} {:>7.2}% {:>9.2} {:>6.2} {:>5.2}",
            m.id.to_string(),
            m.display_name,
            m.accuracy,
            m.precision,
            m.recall,
            m.f1
        )
    }));
    finish(lines)
}

/// Renders the prediction lab's output slot.
pub fn prediction(slot: &PredictionSlot) -> String {
    match slot {
        PredictionSlot::Idle => "Configure inputs and run the model.".to_string(),
        PredictionSlot::Pending => "Running...".to_string(),
        PredictionSlot::Ready(result) => format!(
            "Predicted crime type: {}\nConfidence: {:.1}%",
            result.label.to_uppercase(),
            result.confidence
        ),
        PredictionSlot::Unavailable(e) => format!("Prediction unavailable: {e}"),
    }
}

/// Renders the cluster list, largest first.
pub fn clusters(all: &[Cluster]) -> String {
    let mut lines = vec![
        format!(
            "{:<4} {:<24} {:>7} {:>6} {:>6}",
            "ID", "CLUSTER", "VOLUME", "X", "Y"
        ),
        "-".repeat(51),
    ];
    lines.extend(clusters::ranked_by_volume(all).into_iter().map(|c| {
        format!(
            "{:<4} {:<24} {:>7} {:>6.1} {:>6.1}",
            c.id, c.label, c.size, c.x, c.y
        )
    }));
    finish(lines)
}

/// Renders the details panel for a cluster.
pub fn cluster_details(details: &ClusterDetails) -> String {
    format!(
        "Cluster {}: {}\nDominant crime:  {}\nIncident volume: {}",
        details.id,
        details.area,
        details.dominant_crime.as_deref().unwrap_or("-"),
        details.incident_volume
    )
}

/// Renders the recent-activity feed.
pub fn alerts(alerts: &[Alert]) -> String {
    finish(
        alerts
            .iter()
            .map(|a| format!("{} reported - {} - {}", a.crime_type, a.location, a.reported))
            .collect(),
    )
}

/// Renders the association rules.
pub fn rules(rules: &[AssociationRule]) -> String {
    finish(
        rules
            .iter()
            .map(|r| {
                format!(
                    "{} -> {}  (conf {:.2}, lift {:.2})",
                    r.source, r.target, r.confidence, r.lift
                )
            })
            .collect(),
    )
}

/// Renders dataset validation issues.
pub fn issues(issues: &[DataIssue]) -> String {
    if issues.is_empty() {
        return "Dataset OK: no issues found.\n".to_string();
    }

    let mut lines: Vec<String> = issues.iter().map(|i| format!("- {i}")).collect();
    lines.push(String::new());
    lines.push(format!("{} issue(s)", issues.len()));
    finish(lines)
}

/// Joins rendered lines, terminating each with a newline.
fn finish(lines: Vec<String>) -> String {
    lines.into_iter().map(|line| line + "\n").collect()
}

#[cfg(test)]
mod tests {
    use crime_insights_analytics::window;
    use crime_insights_analytics_models::WindowToken;
    use crime_insights_dataset_models::ModelId;
    use crime_insights_prediction::PredictionError;
    use crime_insights_prediction_models::PredictionResult;

    use super::*;

    #[test]
    fn trends_lists_visible_years() {
        let dataset = crime_insights_dataset::snapshot().unwrap();
        let visible = window::select(&dataset.temporal, WindowToken::Last5);
        let summary = window::summarize(&dataset.temporal, WindowToken::Last5);

        let text = trends(visible, &summary);

        assert!(text.starts_with("Last 5 Years (6 years)\n"));
        assert!(text.contains("2017"));
        assert!(!text.contains("2016"));
        assert!(text.contains("Change 2017 -> 2022"));
        assert!(text.ends_with('\n'));
    }

    #[test]
    fn overview_shows_headline_figures() {
        let dataset = crime_insights_dataset::snapshot().unwrap();
        let text = overview(&overview::overview(&dataset), &dataset);

        assert!(text.contains("Total incidents: 138393"));
        assert!(text.contains("Top crime:       Battery"));
        assert!(text.contains("Best model:      Naive Bayes (53.54%)"));
    }

    #[test]
    fn hourly_card_lists_every_bucket() {
        let dataset = crime_insights_dataset::snapshot().unwrap();
        let text = hourly(&dataset.hourly);

        assert!(text.starts_with("Hourly risk"));
        for point in &dataset.hourly {
            assert!(
                text.lines()
                    .any(|l| l.starts_with(&point.time) && l.contains(&point.incidents.to_string())),
                "missing row for {}",
                point.time
            );
        }
        assert!(text.contains("20:00           240"));
    }

    #[test]
    fn monthly_card_lists_every_month() {
        let dataset = crime_insights_dataset::snapshot().unwrap();
        let text = monthly(&dataset.monthly);

        for point in &dataset.monthly {
            assert!(
                text.lines()
                    .any(|l| l.starts_with(&point.name) && l.contains(&point.count.to_string())),
                "missing row for {}",
                point.name
            );
        }
        assert_eq!(text.lines().count(), 3 + 12);
    }

    #[test]
    fn severity_card_shows_share_of_total() {
        let dataset = crime_insights_dataset::snapshot().unwrap();
        let text = severity(&dataset.severity);

        assert!(text.contains("Severe        68588   49.6%"));
        assert!(text.contains("Moderate      44244   32.0%"));
        assert!(text.contains("Minor         25561   18.5%"));
    }

    #[test]
    fn empty_feeds_render_nothing() {
        assert_eq!(alerts(&[]), "");
        assert_eq!(rules(&[]), "");
    }

    #[test]
    fn prediction_slots_render() {
        let ready = PredictionSlot::Ready(PredictionResult {
            model: ModelId::NaiveBayes,
            label: "Theft".to_string(),
            confidence: 65.5,
            raw_confidence: 65.54,
        });
        assert_eq!(
            prediction(&ready),
            "Predicted crime type: THEFT\nConfidence: 65.5%"
        );

        let unavailable = PredictionSlot::Unavailable(PredictionError::UnknownModel {
            model: "svc".to_string(),
        });
        assert_eq!(
            prediction(&unavailable),
            "Prediction unavailable: Unknown model: svc"
        );
    }

    #[test]
    fn clean_dataset_reports_no_issues() {
        assert_eq!(issues(&[]), "Dataset OK: no issues found.\n");
    }
}
