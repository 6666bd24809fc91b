//! Pure chart-option builders.
//!
//! Each function maps an aggregation result to the declarative option
//! object the chart engine consumes. Building stays separate from binding
//! so every option is testable without a DOM or chart runtime.

use serde_json::{json, Value};

use rem_data::boxplot::BoxplotSummary;
use rem_data::buckets::{MAP_COLOR_SCALE, MAP_PRICE_THRESHOLDS};
use rem_data::rollup::ProvinceAggregate;
use rem_data::scatter::{district_color, ScatterSeries};
use rem_data::topn::top_n_by_desc;
use rem_data::trend::TrendSplit;

/// Boundary dataset name the geo option renders against.
pub const CHINA_MAP: &str = "china";

/// Provinces shown in the map's bar fallback.
const FALLBACK_BAR_LIMIT: usize = 15;

/// Choropleth of provincial weighted averages. No-data provinces are left
/// out of the series so the map greys them instead of painting a zero.
pub fn china_map_option(aggregates: &[ProvinceAggregate]) -> Value {
    let data: Vec<Value> = aggregates
        .iter()
        .filter_map(|a| {
            a.weighted_avg_price.map(|price| {
                json!({
                    "name": a.province_name,
                    "value": price,
                })
            })
        })
        .collect();

    let pieces: Vec<Value> = visual_pieces();

    json!({
        "tooltip": {
            "trigger": "item",
            "formatter": "{b}<br/>均价 {c} 元/㎡",
        },
        "visualMap": {
            "type": "piecewise",
            "pieces": pieces,
            "left": "left",
            "bottom": 10,
        },
        "series": [{
            "name": "省均价",
            "type": "map",
            "map": CHINA_MAP,
            "roam": false,
            "emphasis": { "label": { "show": true } },
            "data": data,
        }],
    })
}

fn visual_pieces() -> Vec<Value> {
    let mut pieces = Vec::with_capacity(MAP_COLOR_SCALE.len());
    pieces.push(json!({
        "max": MAP_PRICE_THRESHOLDS[0],
        "color": MAP_COLOR_SCALE[0],
    }));
    for i in 1..MAP_PRICE_THRESHOLDS.len() {
        pieces.push(json!({
            "min": MAP_PRICE_THRESHOLDS[i - 1],
            "max": MAP_PRICE_THRESHOLDS[i],
            "color": MAP_COLOR_SCALE[i],
        }));
    }
    pieces.push(json!({
        "min": MAP_PRICE_THRESHOLDS[MAP_PRICE_THRESHOLDS.len() - 1],
        "color": MAP_COLOR_SCALE[MAP_COLOR_SCALE.len() - 1],
    }));
    pieces
}

/// Bar fallback for the choropleth: top provinces by weighted average.
pub fn map_fallback_option(aggregates: &[ProvinceAggregate]) -> Value {
    let with_data: Vec<&ProvinceAggregate> = aggregates
        .iter()
        .filter(|a| a.weighted_avg_price.is_some())
        .collect();
    let top = top_n_by_desc(&with_data, FALLBACK_BAR_LIMIT, |a| {
        a.weighted_avg_price.unwrap_or(0) as f64
    });

    category_bar_option(
        "省均价",
        top.iter().map(|a| a.province_name.clone()).collect(),
        top.iter()
            .map(|a| a.weighted_avg_price.unwrap_or(0) as f64)
            .collect(),
    )
}

/// Multi-line trend chart. Values arrive aligned to the shared axis with
/// `None` gaps; serialization keeps them as JSON nulls so the chart shows
/// gaps instead of a false zero. Prediction lines render dashed.
pub fn trend_option(split: &TrendSplit) -> Value {
    let series: Vec<Value> = split
        .series
        .iter()
        .map(|s| {
            let name = if s.is_real() {
                "实际均价".to_string()
            } else {
                format!("预测({})", s.tag)
            };
            json!({
                "name": name,
                "type": "line",
                "smooth": true,
                "connectNulls": false,
                "lineStyle": if s.is_real() {
                    json!({ "width": 2 })
                } else {
                    json!({ "width": 2, "type": "dashed" })
                },
                "data": s.values,
            })
        })
        .collect();

    json!({
        "tooltip": { "trigger": "axis" },
        "legend": {},
        "grid": { "left": "3%", "right": "4%", "bottom": "3%", "containLabel": true },
        "xAxis": { "type": "category", "boundaryGap": false, "data": split.labels },
        "yAxis": { "type": "value", "name": "元/㎡" },
        "series": series,
    })
}

/// Grouped scatter: one named series per district, colored by the stable
/// district lookup.
pub fn scatter_option(series_list: &[ScatterSeries]) -> Value {
    let series: Vec<Value> = series_list
        .iter()
        .map(|s| {
            let data: Vec<Value> = s.points.iter().map(|(x, y)| json!([x, y])).collect();
            json!({
                "name": s.district,
                "type": "scatter",
                "symbolSize": 6,
                "itemStyle": { "color": district_color(&s.district) },
                "data": data,
            })
        })
        .collect();

    json!({
        "tooltip": {
            "trigger": "item",
            "formatter": "{a}<br/>面积 {c}",
        },
        "legend": { "type": "scroll" },
        "xAxis": { "type": "value", "name": "面积(㎡)" },
        "yAxis": { "type": "value", "name": "总价(万)" },
        "series": series,
    })
}

/// District boxplot over coerced five-number summaries.
pub fn boxplot_option(summaries: &[BoxplotSummary]) -> Value {
    let categories: Vec<&str> = summaries.iter().map(|s| s.district.as_str()).collect();
    let data: Vec<Value> = summaries.iter().map(|s| json!(s.values())).collect();

    json!({
        "tooltip": { "trigger": "item" },
        "grid": { "left": "10%", "right": "10%", "bottom": "15%" },
        "xAxis": { "type": "category", "data": categories },
        "yAxis": { "type": "value", "name": "元/㎡" },
        "series": [{
            "name": "单价分布",
            "type": "boxplot",
            "data": data,
        }],
    })
}

/// Plain category bar used by the analysis tabs and the map fallback.
pub fn category_bar_option(name: &str, categories: Vec<String>, values: Vec<f64>) -> Value {
    json!({
        "tooltip": { "trigger": "axis" },
        "grid": { "left": "3%", "right": "4%", "bottom": "15%", "containLabel": true },
        "xAxis": {
            "type": "category",
            "data": categories,
            "axisLabel": { "rotate": 45 },
        },
        "yAxis": { "type": "value" },
        "series": [{
            "name": name,
            "type": "bar",
            "barWidth": "60%",
            "data": values,
        }],
    })
}

/// Pie over `(label, count)` pairs (orientation analysis).
pub fn pie_option(name: &str, items: Vec<(String, f64)>) -> Value {
    let data: Vec<Value> = items
        .into_iter()
        .map(|(label, value)| json!({ "name": label, "value": value }))
        .collect();

    json!({
        "tooltip": { "trigger": "item", "formatter": "{b}: {c} ({d}%)" },
        "legend": { "type": "scroll", "orient": "vertical", "left": "left" },
        "series": [{
            "name": name,
            "type": "pie",
            "radius": ["40%", "70%"],
            "data": data,
        }],
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use rem_api::models::TrendPoint;
    use rem_data::{rollup, scatter, trend};

    fn aggregates() -> Vec<ProvinceAggregate> {
        vec![
            ProvinceAggregate {
                province_name: "广东省".to_string(),
                weighted_avg_price: Some(42_000),
                total_listings: 100,
                city_count: 2,
                top_cities: vec!["深圳".to_string()],
            },
            ProvinceAggregate {
                province_name: "西藏自治区".to_string(),
                weighted_avg_price: None,
                total_listings: 0,
                city_count: 1,
                top_cities: vec![],
            },
        ]
    }

    #[test]
    fn map_option_skips_no_data_provinces() {
        let option = china_map_option(&aggregates());
        let data = option["series"][0]["data"].as_array().unwrap();
        assert_eq!(data.len(), 1);
        assert_eq!(data[0]["name"], "广东省");
    }

    #[test]
    fn visual_pieces_cover_every_bucket() {
        let option = china_map_option(&aggregates());
        let pieces = option["visualMap"]["pieces"].as_array().unwrap();
        assert_eq!(pieces.len(), MAP_COLOR_SCALE.len());
        // First piece is open below, last open above.
        assert!(pieces[0].get("min").is_none());
        assert!(pieces[pieces.len() - 1].get("max").is_none());
    }

    #[test]
    fn fallback_bar_ranks_by_average() {
        let option = map_fallback_option(&aggregates());
        let categories = option["xAxis"]["data"].as_array().unwrap();
        assert_eq!(categories.len(), 1, "no-data province stays off the fallback");
        assert_eq!(categories[0], "广东省");
    }

    #[test]
    fn trend_gaps_serialize_as_null() {
        let points = vec![
            TrendPoint {
                year: 2025,
                month: 1,
                avg_price: 21_000.0,
                predict: Some("exist".to_string()),
            },
            TrendPoint {
                year: 2026,
                month: 1,
                avg_price: 23_000.0,
                predict: Some("arima".to_string()),
            },
        ];
        let option = trend_option(&trend::split_series(&points));
        let real = option["series"][0]["data"].as_array().unwrap();
        assert_eq!(real[0], 21_000.0);
        assert!(real[1].is_null(), "missing month must be null, not 0");
        let predicted = option["series"][1]["data"].as_array().unwrap();
        assert!(predicted[0].is_null());
        assert_eq!(option["series"][1]["lineStyle"]["type"], "dashed");
    }

    #[test]
    fn scatter_series_use_the_stable_district_color() {
        let points = vec![rem_api::models::ScatterPoint {
            area: 88.0,
            total_price: 600.0,
            district: Some("海淀".to_string()),
            layout: None,
        }];
        let option = scatter_option(&scatter::group_by_district(&points));
        assert_eq!(
            option["series"][0]["itemStyle"]["color"],
            district_color("海淀")
        );
    }

    #[test]
    fn boxplot_rows_are_five_values_in_order() {
        let summaries = vec![BoxplotSummary {
            district: "朝阳".to_string(),
            min: 1.0,
            q1: 2.0,
            median: 3.0,
            q3: 4.0,
            max: 5.0,
        }];
        let option = boxplot_option(&summaries);
        assert_eq!(option["series"][0]["data"][0], json!([1.0, 2.0, 3.0, 4.0, 5.0]));
        assert_eq!(option["xAxis"]["data"][0], "朝阳");
    }

    #[test]
    fn rollup_to_map_pipeline_holds_together() {
        let cities = rem_api::mock::fixtures::city_prices();
        let aggregates = rollup::province_rollup(&cities);
        let option = china_map_option(&aggregates);
        let data = option["series"][0]["data"].as_array().unwrap();
        assert_eq!(data.len(), aggregates.len());
    }
}
