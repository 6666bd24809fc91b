use crate::client::{ApiClient, Query};
use crate::error::ApiError;
use crate::models::{
    CityPricesResponse, NationalOverview, ProvincesResponse, RankingResponse, SearchResponse,
    TrendResponse,
};
use crate::transport::Transport;

pub async fn overview<T: Transport>(client: &ApiClient<T>) -> Result<NationalOverview, ApiError> {
    client.get("/national/overview", Query::new()).await
}

/// City rows, optionally narrowed by province and/or a price band.
pub async fn city_prices<T: Transport>(
    client: &ApiClient<T>,
    province: Option<&str>,
    min_price: Option<u64>,
    max_price: Option<u64>,
) -> Result<CityPricesResponse, ApiError> {
    let query = Query::new()
        .add_opt("province", province)
        .add_opt("min_price", min_price)
        .add_opt("max_price", max_price);
    client.get("/national/city-prices", query).await
}

pub async fn provinces<T: Transport>(client: &ApiClient<T>) -> Result<ProvincesResponse, ApiError> {
    client.get("/national/provinces", Query::new()).await
}

/// `rank_type` is one of `price` / `change` / `rent_ratio`; the response
/// is discriminated on the same tag.
pub async fn ranking<T: Transport>(
    client: &ApiClient<T>,
    rank_type: &str,
    limit: u32,
) -> Result<RankingResponse, ApiError> {
    let query = Query::new()
        .add("rank_type", rank_type)
        .add("limit", limit)
        .add("order", "desc");
    client.get("/national/ranking", query).await
}

pub async fn search<T: Transport>(
    client: &ApiClient<T>,
    keyword: &str,
) -> Result<SearchResponse, ApiError> {
    client
        .get("/national/search", Query::new().add("keyword", keyword))
        .await
}

/// Empty `city` means the national average; `year == 2026` additionally
/// returns predicted months tagged with their method.
pub async fn trend<T: Transport>(
    client: &ApiClient<T>,
    city: Option<&str>,
    year: Option<i32>,
) -> Result<TrendResponse, ApiError> {
    let query = Query::new().add_opt("city", city).add_opt("year", year);
    client.get("/national/trend", query).await
}
