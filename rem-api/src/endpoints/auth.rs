use crate::client::{ApiClient, Query};
use crate::error::ApiError;
use crate::models::{LoginRequest, LoginResponse, RegisterRequest, UsernameCheck, User};
use crate::transport::Transport;

pub async fn login<T: Transport>(
    client: &ApiClient<T>,
    username: &str,
    password: &str,
) -> Result<LoginResponse, ApiError> {
    let body = LoginRequest {
        username: username.to_string(),
        password: password.to_string(),
    };
    client.post("/auth/login", &body).await
}

pub async fn register<T: Transport>(
    client: &ApiClient<T>,
    request: &RegisterRequest,
) -> Result<User, ApiError> {
    client.post("/auth/register", request).await
}

/// Server-side token invalidation. Callers treat failure as non-fatal;
/// the local session is cleared regardless.
pub async fn logout<T: Transport>(client: &ApiClient<T>) -> Result<(), ApiError> {
    client.post("/auth/logout", &serde_json::json!({})).await
}

pub async fn check_username<T: Transport>(
    client: &ApiClient<T>,
    username: &str,
) -> Result<UsernameCheck, ApiError> {
    client
        .get("/auth/check-username", Query::new().add("username", username))
        .await
}
