use crate::client::{ApiClient, Query};
use crate::error::ApiError;
use crate::models::{FavoriteCity, FavoriteHouse, FavoriteList, FavoriteReport};
use crate::transport::Transport;
use serde::Serialize;

pub async fn houses<T: Transport>(
    client: &ApiClient<T>,
    page: u32,
    page_size: u32,
) -> Result<FavoriteList<FavoriteHouse>, ApiError> {
    let query = Query::new().add("page", page).add("page_size", page_size);
    client.get("/favorites/houses", query).await
}

#[derive(Debug, Clone, Serialize)]
pub struct AddHouseFavorite {
    pub house_id: i64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub note: Option<String>,
}

pub async fn add_house<T: Transport>(
    client: &ApiClient<T>,
    house_id: i64,
    note: Option<&str>,
) -> Result<(), ApiError> {
    let body = AddHouseFavorite {
        house_id,
        note: note.map(str::to_string),
    };
    client.post("/favorites/houses", &body).await
}

pub async fn remove_house<T: Transport>(
    client: &ApiClient<T>,
    favorite_id: i64,
) -> Result<(), ApiError> {
    client
        .delete(&format!("/favorites/houses/{favorite_id}"))
        .await
}

pub async fn cities<T: Transport>(
    client: &ApiClient<T>,
) -> Result<FavoriteList<FavoriteCity>, ApiError> {
    client.get("/favorites/cities", Query::new()).await
}

pub async fn add_city<T: Transport>(
    client: &ApiClient<T>,
    city_name: &str,
) -> Result<(), ApiError> {
    client
        .post(
            "/favorites/cities",
            &serde_json::json!({ "city_name": city_name }),
        )
        .await
}

pub async fn remove_city<T: Transport>(
    client: &ApiClient<T>,
    favorite_id: i64,
) -> Result<(), ApiError> {
    client
        .delete(&format!("/favorites/cities/{favorite_id}"))
        .await
}

pub async fn reports<T: Transport>(
    client: &ApiClient<T>,
) -> Result<FavoriteList<FavoriteReport>, ApiError> {
    client.get("/favorites/reports", Query::new()).await
}

pub async fn add_report<T: Transport>(
    client: &ApiClient<T>,
    report_id: i64,
) -> Result<(), ApiError> {
    client
        .post(
            "/favorites/reports",
            &serde_json::json!({ "report_id": report_id }),
        )
        .await
}

pub async fn remove_report<T: Transport>(
    client: &ApiClient<T>,
    favorite_id: i64,
) -> Result<(), ApiError> {
    client
        .delete(&format!("/favorites/reports/{favorite_id}"))
        .await
}
