//! Threshold-to-color-bucket assignment for the choropleth.
//!
//! A price maps to the index of the first threshold at or above it; prices
//! beyond the last threshold land in the final overflow bucket. Pure
//! function of the price and the table, nothing else.

/// Unit-price thresholds (元/㎡) for the national map, ascending.
pub const MAP_PRICE_THRESHOLDS: [f64; 6] =
    [5_000.0, 10_000.0, 15_000.0, 20_000.0, 30_000.0, 50_000.0];

/// One color per bucket: `MAP_PRICE_THRESHOLDS.len() + 1` entries, light
/// to dark.
pub const MAP_COLOR_SCALE: [&str; 7] = [
    "#e0f3f8", "#abd9e9", "#74add1", "#4575b4", "#fdae61", "#f46d43", "#d73027",
];

/// Bucket index for `price` against an ascending threshold table.
pub fn bucket_index(price: f64, thresholds: &[f64]) -> usize {
    thresholds
        .iter()
        .position(|t| price <= *t)
        .unwrap_or(thresholds.len())
}

/// Map-bucket color for a unit price.
pub fn bucket_color(price: f64) -> &'static str {
    MAP_COLOR_SCALE[bucket_index(price, &MAP_PRICE_THRESHOLDS)]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn price_at_or_below_first_threshold_is_bucket_zero() {
        assert_eq!(bucket_index(0.0, &MAP_PRICE_THRESHOLDS), 0);
        assert_eq!(bucket_index(5_000.0, &MAP_PRICE_THRESHOLDS), 0);
    }

    #[test]
    fn price_above_last_threshold_is_the_overflow_bucket() {
        assert_eq!(
            bucket_index(80_000.0, &MAP_PRICE_THRESHOLDS),
            MAP_PRICE_THRESHOLDS.len()
        );
    }

    #[test]
    fn assignment_is_monotonic() {
        let prices = [
            1_000.0, 5_000.0, 5_001.0, 9_999.0, 15_000.0, 25_000.0, 49_999.0, 50_001.0,
        ];
        let mut last = 0;
        for price in prices {
            let bucket = bucket_index(price, &MAP_PRICE_THRESHOLDS);
            assert!(bucket >= last, "bucket regressed at price {price}");
            last = bucket;
        }
    }

    #[test]
    fn boundary_lands_in_the_lower_bucket() {
        assert_eq!(bucket_index(10_000.0, &MAP_PRICE_THRESHOLDS), 1);
        assert_eq!(bucket_index(10_000.01, &MAP_PRICE_THRESHOLDS), 2);
    }

    #[test]
    fn color_table_covers_every_bucket() {
        assert_eq!(MAP_COLOR_SCALE.len(), MAP_PRICE_THRESHOLDS.len() + 1);
    }
}
