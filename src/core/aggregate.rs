//! Trend statistics over recorded entries.
//!
//! Every function here is read-only over an [`EntryStore`]. Entries for the
//! requested metric are re-sorted by date with a stable sort, so entries
//! sharing a date keep their recording order.

use crate::core::entry::{parse_date, validate_metric, Entry, DATE_FORMAT};
use crate::core::store::EntryStore;
use crate::error::{Result, TrackerError};
use chrono::{Days, Local, NaiveDate};
use serde::Serialize;
use statrs::statistics::Statistics;

/// Default number of observations in a moving average.
pub const DEFAULT_WINDOW: usize = 3;

/// Length of the weekly summary window, end date included.
pub const WEEK_DAYS: u64 = 7;

/// Moving average ending at one observation.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct MovingAveragePoint {
    /// Date of the newest observation in the window
    pub date: NaiveDate,
    /// Mean of the window
    pub average: f64,
}

/// Statistics for one metric over a 7-day window.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct WeekSummary {
    pub metric: String,
    /// First day of the window (inclusive)
    pub start: NaiveDate,
    /// Last day of the window (inclusive)
    pub end: NaiveDate,
    /// Number of matching entries
    pub count: usize,
    /// Arithmetic mean, `None` when no entries matched
    pub mean: Option<f64>,
    pub min: Option<f64>,
    pub max: Option<f64>,
    /// Population standard deviation, `None` when no entries matched
    pub std_dev: Option<f64>,
    /// Matching values in chronological order
    pub values: Vec<f64>,
}

impl WeekSummary {
    fn empty(metric: &str, start: NaiveDate, end: NaiveDate) -> Self {
        Self {
            metric: metric.to_string(),
            start,
            end,
            count: 0,
            mean: None,
            min: None,
            max: None,
            std_dev: None,
            values: Vec::new(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.count == 0
    }

    /// One-line human readable summary.
    pub fn summary(&self) -> String {
        let range = format!(
            "{}..={}",
            self.start.format(DATE_FORMAT),
            self.end.format(DATE_FORMAT)
        );

        match (self.mean, self.min, self.max) {
            (Some(mean), Some(min), Some(max)) => format!(
                "{} {}: count {}, mean {:.2}, min {}, max {}",
                self.metric, range, self.count, mean, min, max
            ),
            _ => format!("{} {}: no entries", self.metric, range),
        }
    }
}

/// Mean of the most recent `window` observations of `metric`.
///
/// When fewer than `window` observations exist the mean covers all of
/// them. Fails with [`TrackerError::InvalidWindow`] for a zero window and
/// [`TrackerError::NoData`] when the metric has no entries.
pub fn moving_average(entries: &EntryStore, metric: &str, window: usize) -> Result<f64> {
    check_window(window)?;

    let matched = chronological(entries, metric);
    if matched.is_empty() {
        return Err(TrackerError::NoData {
            metric: metric.to_string(),
        });
    }

    let start = matched.len().saturating_sub(window);
    let recent: Vec<f64> = matched[start..].iter().map(|e| e.value()).collect();
    let average = mean(&recent);

    tracing::debug!(
        metric,
        window,
        used = recent.len(),
        average,
        "computed moving average"
    );
    Ok(average)
}

/// Moving average at every observation that has a full window behind it.
///
/// Points come back in chronological order. Fewer than `window`
/// observations yields an empty series rather than an error.
pub fn moving_average_series(
    entries: &EntryStore,
    metric: &str,
    window: usize,
) -> Result<Vec<MovingAveragePoint>> {
    check_window(window)?;

    let matched = chronological(entries, metric);
    let series: Vec<MovingAveragePoint> = matched
        .windows(window)
        .filter_map(|slice| {
            let newest = slice.last()?;
            let values: Vec<f64> = slice.iter().map(|e| e.value()).collect();
            Some(MovingAveragePoint {
                date: newest.date(),
                average: mean(&values),
            })
        })
        .collect();

    tracing::debug!(metric, window, points = series.len(), "computed moving average series");
    Ok(series)
}

/// Summarize `metric` over the 7 days ending at `end_date`.
///
/// `end_date` defaults to the newest date recorded for the metric, or to
/// today when there is none. No matching entries is not an error: the
/// summary has a zero count and no statistics.
pub fn summarize_week(
    entries: &EntryStore,
    metric: &str,
    end_date: Option<&str>,
) -> Result<WeekSummary> {
    validate_metric(metric)?;
    let end_date = end_date.map(parse_date).transpose()?;

    let matched = chronological(entries, metric);
    let end = end_date
        .or_else(|| matched.last().map(|e| e.date()))
        .unwrap_or_else(|| Local::now().date_naive());
    let start = end
        .checked_sub_days(Days::new(WEEK_DAYS - 1))
        .unwrap_or(NaiveDate::MIN);

    let values: Vec<f64> = matched
        .iter()
        .filter(|e| (start..=end).contains(&e.date()))
        .map(|e| e.value())
        .collect();

    if values.is_empty() {
        tracing::debug!(metric, %start, %end, "no entries in weekly window");
        return Ok(WeekSummary::empty(metric, start, end));
    }

    let summary = WeekSummary {
        metric: metric.to_string(),
        start,
        end,
        count: values.len(),
        mean: Some(mean(&values)),
        min: Some(Statistics::min(&values)),
        max: Some(Statistics::max(&values)),
        std_dev: Some(Statistics::population_std_dev(&values)),
        values,
    };

    tracing::debug!(metric, count = summary.count, %start, %end, "summarized week");
    Ok(summary)
}

fn check_window(window: usize) -> Result<()> {
    if window == 0 {
        return Err(TrackerError::InvalidWindow { window });
    }
    Ok(())
}

/// Entries for `metric`, stably sorted by date.
fn chronological<'a>(entries: &'a EntryStore, metric: &'a str) -> Vec<&'a Entry> {
    let mut matched: Vec<&Entry> = entries.by_metric(metric).collect();
    matched.sort_by_key(|e| e.date());
    matched
}

/// Sum divided by count; callers guarantee a non-empty slice.
fn mean(values: &[f64]) -> f64 {
    values.iter().sum::<f64>() / values.len() as f64
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::store::add_entry;

    const WEIGHTS: [f64; 7] = [70.0, 71.0, 70.5, 69.0, 68.5, 69.2, 70.0];

    fn make_sample() -> EntryStore {
        let mut entries = EntryStore::new();
        for (day, weight) in (1..=7).zip(WEIGHTS) {
            add_entry(&mut entries, &format!("2025-09-{day:02}"), "weight", weight).unwrap();
        }
        entries
    }

    fn approx_eq(a: f64, b: f64) -> bool {
        (a - b).abs() < 1e-9
    }

    #[test]
    fn test_moving_average_last_three() {
        let mut entries = EntryStore::new();
        add_entry(&mut entries, "2025-09-01", "weight", 70).unwrap();
        add_entry(&mut entries, "2025-09-02", "weight", 71).unwrap();
        add_entry(&mut entries, "2025-09-03", "weight", 72).unwrap();

        let avg = moving_average(&entries, "weight", DEFAULT_WINDOW).unwrap();
        assert_eq!(avg, 71.0);
    }

    #[test]
    fn test_moving_average_uses_most_recent_dates() {
        let entries = make_sample();
        let avg = moving_average(&entries, "weight", 3).unwrap();
        assert!(approx_eq(avg, (68.5 + 69.2 + 70.0) / 3.0));
    }

    #[test]
    fn test_moving_average_sorts_out_of_order_entries() {
        let mut entries = EntryStore::new();
        add_entry(&mut entries, "2025-09-10", "weight", 80).unwrap();
        add_entry(&mut entries, "2025-09-01", "weight", 10).unwrap();
        add_entry(&mut entries, "2025-09-09", "weight", 60).unwrap();
        add_entry(&mut entries, "2025-09-02", "weight", 20).unwrap();

        let avg = moving_average(&entries, "weight", 2).unwrap();
        assert_eq!(avg, 70.0);
    }

    #[test]
    fn test_moving_average_graceful_degradation() {
        let mut entries = EntryStore::new();
        add_entry(&mut entries, "2025-09-01", "sleep_hours", 7).unwrap();
        add_entry(&mut entries, "2025-09-02", "sleep_hours", 8).unwrap();

        let avg = moving_average(&entries, "sleep_hours", 3).unwrap();
        assert_eq!(avg, 7.5);
    }

    #[test]
    fn test_moving_average_no_data() {
        let entries = make_sample();
        let err = moving_average(&entries, "steps", 3).unwrap_err();
        assert!(matches!(err, TrackerError::NoData { ref metric } if metric == "steps"));

        let err = moving_average(&EntryStore::new(), "weight", 3).unwrap_err();
        assert!(matches!(err, TrackerError::NoData { .. }));
    }

    #[test]
    fn test_zero_window_rejected() {
        let entries = make_sample();
        assert!(matches!(
            moving_average(&entries, "weight", 0),
            Err(TrackerError::InvalidWindow { window: 0 })
        ));
        assert!(matches!(
            moving_average_series(&entries, "weight", 0),
            Err(TrackerError::InvalidWindow { window: 0 })
        ));
    }

    #[test]
    fn test_moving_average_ties_keep_recording_order() {
        let mut entries = EntryStore::new();
        add_entry(&mut entries, "2025-09-02", "weight", 1).unwrap();
        add_entry(&mut entries, "2025-09-02", "weight", 2).unwrap();
        add_entry(&mut entries, "2025-09-01", "weight", 100).unwrap();

        // Sorted: 100 (09-01), 1, 2 (09-02 in recording order); the last one is 2.
        assert_eq!(moving_average(&entries, "weight", 1).unwrap(), 2.0);
    }

    #[test]
    fn test_moving_average_series() {
        let entries = make_sample();
        let series = moving_average_series(&entries, "weight", 3).unwrap();

        assert_eq!(series.len(), 5);
        assert_eq!(series[0].date, NaiveDate::from_ymd_opt(2025, 9, 3).unwrap());
        assert!(approx_eq(series[0].average, (70.0 + 71.0 + 70.5) / 3.0));
        assert_eq!(series[4].date, NaiveDate::from_ymd_opt(2025, 9, 7).unwrap());
    }

    #[test]
    fn test_moving_average_series_short_input() {
        let mut entries = EntryStore::new();
        add_entry(&mut entries, "2025-09-01", "weight", 70).unwrap();

        assert!(moving_average_series(&entries, "weight", 3).unwrap().is_empty());
        assert!(moving_average_series(&entries, "steps", 1).unwrap().is_empty());
    }

    #[test]
    fn test_summarize_week_steps() {
        let mut entries = EntryStore::new();
        for day in 1..=10u32 {
            add_entry(&mut entries, &format!("2025-03-{day:02}"), "steps", day * 1000).unwrap();
        }

        let summary = summarize_week(&entries, "steps", Some("2025-03-10")).unwrap();
        assert_eq!(summary.count, 7);
        assert_eq!(summary.start, NaiveDate::from_ymd_opt(2025, 3, 4).unwrap());
        assert_eq!(summary.mean, Some(7000.0));
        assert_eq!(summary.min, Some(4000.0));
        assert_eq!(summary.max, Some(10000.0));
        assert_eq!(summary.values.first(), Some(&4000.0));
        assert_eq!(summary.values.last(), Some(&10000.0));
        assert!(summary.std_dev.unwrap() > 0.0);
    }

    #[test]
    fn test_summarize_week_counts_and_mean() {
        let entries = make_sample();
        let summary = summarize_week(&entries, "weight", Some("2025-09-07")).unwrap();

        assert_eq!(summary.count, 7);
        let expected = WEIGHTS.iter().sum::<f64>() / 7.0;
        assert!(approx_eq(summary.mean.unwrap(), expected));
    }

    #[test]
    fn test_summarize_week_defaults_to_latest_metric_date() {
        let mut entries = make_sample();
        // A later entry for another metric does not move the weight window.
        add_entry(&mut entries, "2025-10-01", "steps", 5000).unwrap();

        let summary = summarize_week(&entries, "weight", None).unwrap();
        assert_eq!(summary.end, NaiveDate::from_ymd_opt(2025, 9, 7).unwrap());
        assert_eq!(summary.count, 7);
    }

    #[test]
    fn test_summarize_week_no_matches() {
        let entries = make_sample();

        let summary = summarize_week(&entries, "weight", Some("2024-01-01")).unwrap();
        assert!(summary.is_empty());
        assert_eq!(summary.mean, None);
        assert_eq!(summary.min, None);
        assert_eq!(summary.max, None);
        assert!(summary.summary().contains("no entries"));

        let summary = summarize_week(&entries, "steps", None).unwrap();
        assert_eq!(summary.count, 0);
        assert_eq!(summary.end, Local::now().date_naive());
    }

    #[test]
    fn test_summarize_week_validates_inputs() {
        let entries = make_sample();

        assert!(matches!(
            summarize_week(&entries, "  ", None),
            Err(TrackerError::InvalidMetric { .. })
        ));
        assert!(matches!(
            summarize_week(&entries, "weight", Some("2025-9-7")),
            Err(TrackerError::InvalidDate { .. })
        ));
    }

    #[test]
    fn test_summary_format() {
        let entries = make_sample();
        let summary = summarize_week(&entries, "weight", None).unwrap();
        let line = summary.summary();

        assert!(line.starts_with("weight 2025-09-01..=2025-09-07"));
        assert!(line.contains("count 7"));
        assert!(line.contains("max 71"));
    }

    #[test]
    fn test_week_summary_serializes_to_json() {
        let entries = make_sample();
        let summary = summarize_week(&entries, "weight", Some("2025-09-07")).unwrap();
        let json = serde_json::to_value(&summary).unwrap();

        assert_eq!(json["metric"], "weight");
        assert_eq!(json["start"], "2025-09-01");
        assert_eq!(json["end"], "2025-09-07");
        assert_eq!(json["count"], 7);
        assert_eq!(json["max"], 71.0);
        assert_eq!(json["values"].as_array().unwrap().len(), 7);

        let empty = summarize_week(&entries, "steps", Some("2025-09-07")).unwrap();
        let json = serde_json::to_value(&empty).unwrap();
        assert!(json["mean"].is_null());
        assert!(json["std_dev"].is_null());
    }

    #[test]
    fn test_moving_average_point_serializes_to_json() {
        let series = moving_average_series(&make_sample(), "weight", 7).unwrap();
        let json = serde_json::to_value(&series).unwrap();

        assert_eq!(json.as_array().unwrap().len(), 1);
        assert_eq!(json[0]["date"], "2025-09-07");
        assert!(json[0]["average"].is_f64());
    }
}
