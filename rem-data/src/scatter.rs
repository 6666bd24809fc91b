//! Scatter-point grouping with stable per-district colors.
//!
//! Grouping keys and colors must survive re-renders unchanged: a filter
//! change that drops a district out of the data must not shift every other
//! district's color. Colors therefore come from a name lookup, never from
//! the series' position in the render.

use rem_api::models::ScatterPoint;

/// Label substituted for rows whose district is missing.
pub const UNKNOWN_DISTRICT: &str = "unknown";

/// Series palette shared with the chart options.
pub const SERIES_PALETTE: [&str; 10] = [
    "#5470c6", "#91cc75", "#fac858", "#ee6666", "#73c0de", "#3ba272", "#fc8452", "#9a60b4",
    "#ea7ccc", "#4e7cb2",
];

/// Districts of the drill-down metro pinned to palette slots.
const DISTRICT_SLOTS: [&str; 16] = [
    "东城", "西城", "朝阳", "海淀", "丰台", "石景山", "通州", "昌平", "大兴", "顺义", "房山",
    "门头沟", "平谷", "怀柔", "密云", "延庆",
];

#[derive(Debug, Clone, PartialEq)]
pub struct ScatterSeries {
    pub district: String,
    /// `(area, total_price)` pairs in input order.
    pub points: Vec<(f64, f64)>,
}

/// Partition points into one series per district. Series appear in
/// first-seen order; each keeps its points in input order; rows without a
/// district collect under [`UNKNOWN_DISTRICT`].
pub fn group_by_district(points: &[ScatterPoint]) -> Vec<ScatterSeries> {
    let mut series: Vec<ScatterSeries> = Vec::new();

    for point in points {
        let district = point
            .district
            .as_deref()
            .filter(|d| !d.is_empty())
            .unwrap_or(UNKNOWN_DISTRICT);

        let entry = match series.iter_mut().find(|s| s.district == district) {
            Some(existing) => existing,
            None => {
                series.push(ScatterSeries {
                    district: district.to_string(),
                    points: Vec::new(),
                });
                series.last_mut().unwrap()
            }
        };
        entry.points.push((point.area, point.total_price));
    }

    series
}

/// Stable color for a district name. Known districts use their pinned
/// slot; anything else (including the unknown bucket) hashes its name so
/// the assignment never depends on render order.
pub fn district_color(district: &str) -> &'static str {
    if let Some(slot) = DISTRICT_SLOTS.iter().position(|d| *d == district) {
        return SERIES_PALETTE[slot % SERIES_PALETTE.len()];
    }
    let hash = district
        .bytes()
        .fold(0usize, |acc, b| acc.wrapping_mul(31).wrapping_add(b as usize));
    SERIES_PALETTE[hash % SERIES_PALETTE.len()]
}

#[cfg(test)]
mod tests {
    use super::*;

    fn point(district: Option<&str>, area: f64, total: f64) -> ScatterPoint {
        ScatterPoint {
            area,
            total_price: total,
            district: district.map(str::to_string),
            layout: None,
        }
    }

    #[test]
    fn groups_preserve_input_order_within_each_district() {
        let points = vec![
            point(Some("朝阳"), 88.0, 600.0),
            point(Some("海淀"), 61.0, 410.0),
            point(Some("朝阳"), 95.0, 710.0),
        ];
        let series = group_by_district(&points);
        assert_eq!(series.len(), 2);
        assert_eq!(series[0].district, "朝阳");
        assert_eq!(series[0].points, vec![(88.0, 600.0), (95.0, 710.0)]);
    }

    #[test]
    fn missing_district_becomes_the_unknown_label() {
        let points = vec![point(None, 75.0, 350.0), point(Some(""), 80.0, 400.0)];
        let series = group_by_district(&points);
        assert_eq!(series.len(), 1);
        assert_eq!(series[0].district, UNKNOWN_DISTRICT);
        assert_eq!(series[0].points.len(), 2);
    }

    #[test]
    fn colors_are_stable_across_calls_and_independent_of_order() {
        let first = district_color("海淀");
        let second = district_color("海淀");
        assert_eq!(first, second);
        // A different data mix must not move 海淀's color.
        assert_eq!(district_color("海淀"), first);
        assert_ne!(district_color("朝阳"), district_color("西城"));
    }

    #[test]
    fn unknown_names_still_get_a_deterministic_color() {
        assert_eq!(district_color("亦庄"), district_color("亦庄"));
        assert_eq!(
            district_color(UNKNOWN_DISTRICT),
            district_color(UNKNOWN_DISTRICT)
        );
    }
}
