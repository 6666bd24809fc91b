//! Provincial rollup of per-city price rows.
//!
//! The national endpoint returns city-level rows only; the choropleth
//! needs one value per province. The rollup is weighted by listing count,
//! not a plain mean: a province with one huge market and one tiny one
//! must land near the huge one.

use rem_api::models::CityPricePoint;

use crate::topn::top_n_by_desc;

/// Number of showcase cities kept per province for the map tooltip.
const TOP_CITIES_PER_PROVINCE: usize = 3;

#[derive(Debug, Clone, PartialEq)]
pub struct ProvinceAggregate {
    pub province_name: String,
    /// `None` when the province has no listings at all ("no data" on the
    /// map, never zero, never NaN).
    pub weighted_avg_price: Option<u64>,
    pub total_listings: u64,
    pub city_count: usize,
    /// Highest-priced cities, for the tooltip.
    pub top_cities: Vec<String>,
}

/// Group city rows by province and compute the listing-weighted average
/// `round(Σ price·listings / Σ listings)` per group. Provinces keep the
/// order they first appear in the input.
pub fn province_rollup(cities: &[CityPricePoint]) -> Vec<ProvinceAggregate> {
    let mut groups: Vec<(String, Vec<&CityPricePoint>)> = Vec::new();

    for city in cities {
        match groups.iter_mut().find(|(name, _)| *name == city.province_name) {
            Some((_, members)) => members.push(city),
            None => groups.push((city.province_name.clone(), vec![city])),
        }
    }

    groups
        .into_iter()
        .map(|(province_name, members)| {
            let total_listings: u64 = members.iter().map(|c| c.listing_count).sum();
            let weighted_sum: f64 = members
                .iter()
                .map(|c| c.city_avg_price * c.listing_count as f64)
                .sum();

            let weighted_avg_price = if total_listings == 0 {
                None
            } else {
                Some((weighted_sum / total_listings as f64).round() as u64)
            };

            let top_cities = top_n_by_desc(&members, TOP_CITIES_PER_PROVINCE, |c| {
                c.city_avg_price
            })
            .into_iter()
            .map(|c| c.city_name.clone())
            .collect();

            ProvinceAggregate {
                city_count: members.len(),
                province_name,
                weighted_avg_price,
                total_listings,
                top_cities,
            }
        })
        .collect()
}

/// Min/max of the averages that actually exist. No-data provinces are
/// excluded so they cannot drag the color scale to zero.
pub fn color_domain(aggregates: &[ProvinceAggregate]) -> Option<(u64, u64)> {
    let mut values = aggregates.iter().filter_map(|a| a.weighted_avg_price);
    let first = values.next()?;
    let (min, max) = values.fold((first, first), |(lo, hi), v| (lo.min(v), hi.max(v)));
    Some((min, max))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn city(province: &str, city: &str, price: f64, listings: u64) -> CityPricePoint {
        CityPricePoint {
            province_name: province.to_string(),
            city_name: city.to_string(),
            city_avg_price: price,
            listing_count: listings,
            price_change: None,
        }
    }

    #[test]
    fn rollup_weights_by_listing_count() {
        // 10000 with all the listings plus 20000 with none: the zero-weight
        // city must not pull the average to 15000.
        let cities = vec![city("X", "P1", 10_000.0, 100), city("X", "P2", 20_000.0, 0)];
        let aggregates = province_rollup(&cities);
        assert_eq!(aggregates.len(), 1);
        assert_eq!(aggregates[0].weighted_avg_price, Some(10_000));
        assert_eq!(aggregates[0].total_listings, 100);
        assert_eq!(aggregates[0].city_count, 2);
    }

    #[test]
    fn rollup_matches_weighted_formula() {
        let cities = vec![
            city("广东省", "深圳", 51_890.0, 9_932),
            city("广东省", "广州", 31_210.0, 8_845),
        ];
        let aggregates = province_rollup(&cities);
        let expected =
            ((51_890.0_f64 * 9_932.0 + 31_210.0 * 8_845.0) / (9_932.0 + 8_845.0)).round() as u64;
        assert_eq!(aggregates[0].weighted_avg_price, Some(expected));
    }

    #[test]
    fn zero_listing_province_reports_no_data() {
        let cities = vec![city("西藏自治区", "拉萨", 12_000.0, 0)];
        let aggregates = province_rollup(&cities);
        assert_eq!(aggregates[0].weighted_avg_price, None);
        assert_eq!(aggregates[0].total_listings, 0);
    }

    #[test]
    fn no_data_provinces_are_excluded_from_color_domain() {
        let cities = vec![
            city("A", "a1", 10_000.0, 10),
            city("B", "b1", 30_000.0, 10),
            city("C", "c1", 99_999.0, 0),
        ];
        let aggregates = province_rollup(&cities);
        assert_eq!(color_domain(&aggregates), Some((10_000, 30_000)));
    }

    #[test]
    fn color_domain_of_all_no_data_is_none() {
        let cities = vec![city("A", "a1", 10_000.0, 0)];
        assert_eq!(color_domain(&province_rollup(&cities)), None);
    }

    #[test]
    fn provinces_keep_first_seen_order_and_top_cities_sort_by_price() {
        let cities = vec![
            city("浙江省", "宁波", 21_460.0, 100),
            city("广东省", "东莞", 19_870.0, 100),
            city("浙江省", "杭州", 29_350.0, 100),
            city("浙江省", "温州", 18_000.0, 100),
            city("浙江省", "金华", 15_000.0, 100),
        ];
        let aggregates = province_rollup(&cities);
        assert_eq!(aggregates[0].province_name, "浙江省");
        assert_eq!(aggregates[1].province_name, "广东省");
        assert_eq!(aggregates[0].top_cities, vec!["杭州", "宁波", "温州"]);
    }
}
