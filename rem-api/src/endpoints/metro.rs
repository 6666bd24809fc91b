//! Beijing drill-down endpoints.

use crate::client::{ApiClient, Query};
use crate::error::ApiError;
use crate::models::{
    BoxplotResponse, DistrictPricesResponse, DistrictRankingResponse, ElevatorAnalysis,
    FloorAnalysis, LayoutAnalysis, MetroOverview, OrientationAnalysis, PagedHouseList,
    ScatterResponse,
};
use crate::transport::Transport;

pub async fn overview<T: Transport>(client: &ApiClient<T>) -> Result<MetroOverview, ApiError> {
    client.get("/beijing/overview", Query::new()).await
}

pub async fn district_ranking<T: Transport>(
    client: &ApiClient<T>,
) -> Result<DistrictRankingResponse, ApiError> {
    client.get("/beijing/district-ranking", Query::new()).await
}

pub async fn district_prices<T: Transport>(
    client: &ApiClient<T>,
) -> Result<DistrictPricesResponse, ApiError> {
    client.get("/beijing/district-prices", Query::new()).await
}

pub async fn floor_analysis<T: Transport>(client: &ApiClient<T>) -> Result<FloorAnalysis, ApiError> {
    client.get("/beijing/analysis/floor", Query::new()).await
}

pub async fn layout_analysis<T: Transport>(
    client: &ApiClient<T>,
) -> Result<LayoutAnalysis, ApiError> {
    client.get("/beijing/analysis/layout", Query::new()).await
}

pub async fn orientation_analysis<T: Transport>(
    client: &ApiClient<T>,
) -> Result<OrientationAnalysis, ApiError> {
    client
        .get("/beijing/analysis/orientation", Query::new())
        .await
}

pub async fn elevator_analysis<T: Transport>(
    client: &ApiClient<T>,
) -> Result<ElevatorAnalysis, ApiError> {
    client.get("/beijing/analysis/elevator", Query::new()).await
}

/// Scatter sample, optionally narrowed to one district. `limit` bounds the
/// sample size the server draws.
pub async fn scatter<T: Transport>(
    client: &ApiClient<T>,
    district: Option<&str>,
    limit: u32,
) -> Result<ScatterResponse, ApiError> {
    let query = Query::new().add_opt("district", district).add("limit", limit);
    client.get("/beijing/chart/scatter", query).await
}

pub async fn boxplot<T: Transport>(client: &ApiClient<T>) -> Result<BoxplotResponse, ApiError> {
    client.get("/beijing/chart/boxplot", Query::new()).await
}

/// Listing filters. Absent keys mean "no filter"; the query builder drops
/// them from the request entirely.
#[derive(Debug, Default, Clone, PartialEq)]
pub struct HouseFilters {
    pub district: Option<String>,
    pub layout: Option<String>,
    pub min_price: Option<u64>,
    pub max_price: Option<u64>,
}

pub async fn houses<T: Transport>(
    client: &ApiClient<T>,
    filters: &HouseFilters,
    page: u32,
    page_size: u32,
) -> Result<PagedHouseList, ApiError> {
    let query = Query::new()
        .add_opt("district", filters.district.as_deref())
        .add_opt("layout", filters.layout.as_deref())
        .add_opt("min_price", filters.min_price)
        .add_opt("max_price", filters.max_price)
        .add("page", page)
        .add("page_size", page_size);
    client.get("/beijing/houses", query).await
}
