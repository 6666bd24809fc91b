use crate::client::{ApiClient, Query};
use crate::error::ApiError;
use crate::models::{DataUpdateTime, FeedbackRequest, SystemConfig, VersionInfo};
use crate::transport::Transport;

pub async fn config<T: Transport>(client: &ApiClient<T>) -> Result<SystemConfig, ApiError> {
    client.get("/system/config", Query::new()).await
}

pub async fn data_update_time<T: Transport>(
    client: &ApiClient<T>,
) -> Result<DataUpdateTime, ApiError> {
    client.get("/system/data-update-time", Query::new()).await
}

pub async fn version<T: Transport>(client: &ApiClient<T>) -> Result<VersionInfo, ApiError> {
    client.get("/system/version", Query::new()).await
}

pub async fn feedback<T: Transport>(
    client: &ApiClient<T>,
    content: &str,
    contact: Option<&str>,
) -> Result<(), ApiError> {
    let body = FeedbackRequest {
        content: content.to_string(),
        contact: contact.map(str::to_string),
    };
    client.post("/system/feedback", &body).await
}
