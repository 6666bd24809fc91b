//! National-data command implementations.

use anyhow::Context;
use chrono::NaiveDateTime;
use log::info;

use rem_api::endpoints::{national, system};
use rem_api::transport::HttpTransport;
use rem_api::{ApiClient, StaticToken};
use rem_data::format::{format_large_number, format_number};
use rem_data::ranking;
use rem_data::trend;

use crate::TOKEN_ENV;

fn build_client(base_url: &str) -> anyhow::Result<ApiClient<HttpTransport>> {
    let transport = HttpTransport::new(base_url)
        .map_err(|e| anyhow::anyhow!("failed to build HTTP client: {e}"))?;
    let token = std::env::var(TOKEN_ENV).ok();
    if token.is_none() {
        info!("{TOKEN_ENV} not set, querying anonymously");
    }
    Ok(ApiClient::new(transport).with_auth(std::rc::Rc::new(StaticToken(token))))
}

pub async fn run_overview(base_url: &str) -> anyhow::Result<()> {
    let client = build_client(base_url)?;
    let overview = national::overview(&client)
        .await
        .context("overview query failed")?;

    println!(
        "全国平均单价: {} 元/㎡",
        format_number(overview.national_avg_price)
    );
    if let Some(city) = &overview.highest_city {
        println!("最高: {} ({} 元/㎡)", city.name, format_number(city.price));
    }
    if let Some(city) = &overview.lowest_city {
        println!("最低: {} ({} 元/㎡)", city.name, format_number(city.price));
    }
    println!(
        "挂牌总量: {} (覆盖 {} 个城市)",
        format_large_number(overview.total_listings),
        overview.total_cities
    );

    // Data freshness is informational; don't fail the command over it.
    if let Ok(updated) = system::data_update_time(&client).await {
        let display = NaiveDateTime::parse_from_str(&updated.updated_at, "%Y-%m-%d %H:%M:%S")
            .map(|dt| dt.format("%Y-%m-%d").to_string())
            .unwrap_or(updated.updated_at);
        println!("数据更新于: {display}");
    }
    Ok(())
}

pub async fn run_ranking(base_url: &str, rank_type: &str, limit: u32) -> anyhow::Result<()> {
    let client = build_client(base_url)?;
    let response = national::ranking(&client, rank_type, limit)
        .await
        .context("ranking query failed")?;

    for row in ranking::rows(&response) {
        let province = row.province_name.unwrap_or_default();
        println!("{:>3}. {:<12} {:<10} {}", row.rank, row.city_name, province, row.value_display);
    }
    Ok(())
}

pub async fn run_trend(base_url: &str, city: &str, year: Option<i32>) -> anyhow::Result<()> {
    let client = build_client(base_url)?;
    let city_arg = (!city.is_empty()).then_some(city);
    let response = national::trend(&client, city_arg, year)
        .await
        .context("trend query failed")?;

    let split = trend::split_series(&response.trends);
    let scope = if city.is_empty() { "全国" } else { city };
    info!("{} trend: {} months, {} series", scope, split.labels.len(), split.series.len());

    for series in &split.series {
        let name = if series.is_real() {
            "实际".to_string()
        } else {
            format!("预测({})", series.tag)
        };
        println!("── {name} ──");
        for (label, value) in split.labels.iter().zip(&series.values) {
            match value {
                Some(price) => println!("{label}  {} 元/㎡", format_number(*price)),
                None => {}
            }
        }
    }
    Ok(())
}

pub async fn run_search(base_url: &str, keyword: &str) -> anyhow::Result<()> {
    let client = build_client(base_url)?;
    let response = national::search(&client, keyword)
        .await
        .context("search failed")?;

    if response.results.is_empty() {
        println!("未找到与 \"{keyword}\" 相关的城市");
        return Ok(());
    }
    for city in &response.results {
        println!(
            "{:<12} {:<10} {} 元/㎡",
            city.city_name,
            city.province_name,
            format_number(city.city_avg_price)
        );
    }
    Ok(())
}

/// Export the city-price table as CSV:
/// `province,city,avg_price,listings,change`.
pub async fn run_export_cities(
    base_url: &str,
    output: &str,
    province: Option<&str>,
) -> anyhow::Result<()> {
    let client = build_client(base_url)?;
    let response = national::city_prices(&client, province, None, None)
        .await
        .context("city-prices query failed")?;

    let mut writer = csv::Writer::from_path(output)
        .with_context(|| format!("cannot write {output}"))?;
    writer.write_record(["province", "city", "avg_price", "listings", "change"])?;
    for city in &response.cities {
        writer.write_record([
            city.province_name.as_str(),
            city.city_name.as_str(),
            &format!("{:.0}", city.city_avg_price),
            &city.listing_count.to_string(),
            &city.price_change.map(|c| c.to_string()).unwrap_or_default(),
        ])?;
    }
    writer.flush()?;

    info!(
        "Export complete. {} cities written to {}",
        response.cities.len(),
        output
    );
    Ok(())
}
