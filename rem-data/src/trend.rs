//! Trend-series split: one flat tagged list in, aligned multi-line out.
//!
//! The trend endpoint mixes observed months and predicted months in one
//! array, discriminated by the `predict` tag. The chart needs one line per
//! tag, all sharing a single x-axis. Months a line has no value for must
//! be `None`; a literal zero would draw a crash to the floor.

use rem_api::models::{TrendPoint, TREND_REAL_TAG};

#[derive(Debug, Clone, PartialEq)]
pub struct TrendSeries {
    /// `"exist"` for the observed line, otherwise the prediction method.
    pub tag: String,
    /// One slot per x-axis label; `None` where this tag has no month.
    pub values: Vec<Option<f64>>,
}

impl TrendSeries {
    pub fn is_real(&self) -> bool {
        self.tag == TREND_REAL_TAG
    }
}

#[derive(Debug, Clone, PartialEq, Default)]
pub struct TrendSplit {
    /// Sorted unique `"YYYY-MM"` labels across every tag.
    pub labels: Vec<String>,
    /// Observed line first, prediction lines after (sorted by tag).
    pub series: Vec<TrendSeries>,
}

fn month_label(year: i32, month: u32) -> String {
    format!("{year}-{month:02}")
}

/// Split a flat tagged list into aligned series. Points with no tag are
/// treated as observed data.
pub fn split_series(points: &[TrendPoint]) -> TrendSplit {
    let mut keys: Vec<(i32, u32)> = points.iter().map(|p| (p.year, p.month)).collect();
    keys.sort_unstable();
    keys.dedup();

    let mut tags: Vec<String> = points
        .iter()
        .map(|p| p.predict.clone().unwrap_or_else(|| TREND_REAL_TAG.to_string()))
        .collect();
    tags.sort_unstable();
    tags.dedup();
    // Observed line always leads the legend.
    tags.sort_by_key(|t| (t.as_str() != TREND_REAL_TAG, t.clone()));

    let series = tags
        .into_iter()
        .map(|tag| {
            let values = keys
                .iter()
                .map(|&(year, month)| {
                    points
                        .iter()
                        .find(|p| {
                            p.year == year
                                && p.month == month
                                && p.predict.as_deref().unwrap_or(TREND_REAL_TAG) == tag
                        })
                        .map(|p| p.avg_price)
                })
                .collect();
            TrendSeries { tag, values }
        })
        .collect();

    TrendSplit {
        labels: keys
            .iter()
            .map(|&(year, month)| month_label(year, month))
            .collect(),
        series,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn point(year: i32, month: u32, price: f64, tag: Option<&str>) -> TrendPoint {
        TrendPoint {
            year,
            month,
            avg_price: price,
            predict: tag.map(str::to_string),
        }
    }

    #[test]
    fn labels_are_the_sorted_union_across_all_tags() {
        let points = vec![
            point(2024, 11, 21_000.0, Some("exist")),
            point(2025, 1, 21_400.0, Some("exist")),
            point(2026, 1, 23_000.0, Some("arima")),
            point(2024, 12, 21_200.0, Some("exist")),
        ];
        let split = split_series(&points);
        assert_eq!(split.labels, vec!["2024-11", "2024-12", "2025-01", "2026-01"]);
    }

    #[test]
    fn missing_months_are_none_not_zero() {
        let points = vec![
            point(2025, 1, 21_400.0, Some("exist")),
            point(2026, 1, 23_000.0, Some("arima")),
        ];
        let split = split_series(&points);
        let real = split.series.iter().find(|s| s.is_real()).unwrap();
        let predicted = split.series.iter().find(|s| s.tag == "arima").unwrap();
        assert_eq!(real.values, vec![Some(21_400.0), None]);
        assert_eq!(predicted.values, vec![None, Some(23_000.0)]);
    }

    #[test]
    fn untagged_points_count_as_observed() {
        let points = vec![point(2024, 6, 20_500.0, None)];
        let split = split_series(&points);
        assert_eq!(split.series.len(), 1);
        assert!(split.series[0].is_real());
    }

    #[test]
    fn observed_line_comes_first_then_predictions_sorted() {
        let points = vec![
            point(2026, 1, 23_100.0, Some("linear")),
            point(2026, 1, 23_000.0, Some("arima")),
            point(2025, 12, 22_000.0, Some("exist")),
        ];
        let split = split_series(&points);
        let tags: Vec<&str> = split.series.iter().map(|s| s.tag.as_str()).collect();
        assert_eq!(tags, vec!["exist", "arima", "linear"]);
    }

    #[test]
    fn empty_input_yields_empty_split() {
        let split = split_series(&[]);
        assert!(split.labels.is_empty());
        assert!(split.series.is_empty());
    }
}
