//! Coercion of the loose boxplot payload into a clean five-number summary.
//!
//! The analytics job serializes quantiles inconsistently (numbers, numeric
//! strings, occasionally junk). Everything is forced to a finite float
//! (invalid values become 0.0) before the chart binding sees it.

use rem_api::models::RawBoxplotRow;
use serde_json::Value;

#[derive(Debug, Clone, PartialEq)]
pub struct BoxplotSummary {
    pub district: String,
    pub min: f64,
    pub q1: f64,
    pub median: f64,
    pub q3: f64,
    pub max: f64,
}

impl BoxplotSummary {
    /// Five values in the order the boxplot series expects.
    pub fn values(&self) -> [f64; 5] {
        [self.min, self.q1, self.median, self.q3, self.max]
    }
}

fn coerce(value: &Value) -> f64 {
    let parsed = match value {
        Value::Number(n) => n.as_f64(),
        Value::String(s) => s.trim().parse::<f64>().ok(),
        _ => None,
    };
    match parsed {
        Some(v) if v.is_finite() => v,
        _ => 0.0,
    }
}

pub fn coerce_row(row: &RawBoxplotRow) -> BoxplotSummary {
    BoxplotSummary {
        district: row.district.clone(),
        min: coerce(&row.min),
        q1: coerce(&row.q1),
        median: coerce(&row.median),
        q3: coerce(&row.q3),
        max: coerce(&row.max),
    }
}

pub fn coerce_rows(rows: &[RawBoxplotRow]) -> Vec<BoxplotSummary> {
    rows.iter().map(coerce_row).collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn raw(district: &str, values: [Value; 5]) -> RawBoxplotRow {
        let [min, q1, median, q3, max] = values;
        RawBoxplotRow {
            district: district.to_string(),
            min,
            q1,
            median,
            q3,
            max,
        }
    }

    #[test]
    fn numeric_strings_are_parsed() {
        let row = raw(
            "朝阳",
            [
                json!("12000.5"),
                json!(18000),
                json!("21000"),
                json!(26000.0),
                json!("48000"),
            ],
        );
        let summary = coerce_row(&row);
        assert_eq!(summary.values(), [12_000.5, 18_000.0, 21_000.0, 26_000.0, 48_000.0]);
    }

    #[test]
    fn junk_becomes_zero() {
        let row = raw(
            "海淀",
            [json!("NaN"), json!(null), json!("--"), json!(22_000), json!([1, 2])],
        );
        let summary = coerce_row(&row);
        assert_eq!(summary.values(), [0.0, 0.0, 0.0, 22_000.0, 0.0]);
    }

    #[test]
    fn district_passes_through_untouched() {
        let row = raw("西城", [json!(1), json!(2), json!(3), json!(4), json!(5)]);
        assert_eq!(coerce_row(&row).district, "西城");
    }
}
