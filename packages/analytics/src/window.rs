//! Time-window selection over the temporal series.

use crime_insights_analytics_models::{WindowSummary, WindowToken};
use crime_insights_dataset_models::TemporalRecord;

/// Returns the part of `series` visible under `token`.
///
/// [`WindowToken::All`] returns the series unchanged. The trailing windows
/// return the last 11 or 6 records, or the whole series when it is
/// shorter. The input is never reordered or copied.
#[must_use]
pub fn select<T>(series: &[T], token: WindowToken) -> &[T] {
    match token.suffix_len() {
        Some(len) => &series[series.len().saturating_sub(len)..],
        None => series,
    }
}

/// Summarizes the records visible under `token`.
#[must_use]
#[allow(clippy::cast_precision_loss)]
pub fn summarize(series: &[TemporalRecord], token: WindowToken) -> WindowSummary {
    let visible = select(series, token);

    let incidents: u64 = visible.iter().map(|r| r.count).sum();
    let arrests: u64 = visible.iter().map(|r| r.arrests).sum();

    let arrest_rate = (incidents > 0).then(|| arrests as f64 / incidents as f64 * 100.0);

    let percent_change = match visible {
        [first, .., last] if first.count > 0 => {
            Some((last.count as f64 - first.count as f64) / first.count as f64 * 100.0)
        }
        _ => None,
    };

    WindowSummary {
        window: token,
        from_year: visible.first().map(|r| r.year.clone()),
        to_year: visible.last().map(|r| r.year.clone()),
        incidents,
        arrests,
        arrest_rate,
        percent_change,
    }
}
