use crate::client::{ApiClient, Query};
use crate::error::ApiError;
use crate::models::{ChangePasswordRequest, Notification, NotificationSettings, Profile};
use crate::transport::Transport;
use serde::Deserialize;

pub async fn profile<T: Transport>(client: &ApiClient<T>) -> Result<Profile, ApiError> {
    client.get("/user/profile", Query::new()).await
}

pub async fn update_profile<T: Transport>(
    client: &ApiClient<T>,
    profile: &Profile,
) -> Result<(), ApiError> {
    client.put("/user/profile", profile).await
}

pub async fn change_password<T: Transport>(
    client: &ApiClient<T>,
    old_password: &str,
    new_password: &str,
) -> Result<(), ApiError> {
    let body = ChangePasswordRequest {
        old_password: old_password.to_string(),
        new_password: new_password.to_string(),
    };
    client.post("/user/change-password", &body).await
}

pub async fn notification_settings<T: Transport>(
    client: &ApiClient<T>,
) -> Result<NotificationSettings, ApiError> {
    client
        .get("/user/notifications/settings", Query::new())
        .await
}

pub async fn update_notification_settings<T: Transport>(
    client: &ApiClient<T>,
    settings: &NotificationSettings,
) -> Result<(), ApiError> {
    client.put("/user/notifications/settings", settings).await
}

#[derive(Debug, Clone, Deserialize)]
pub struct NotificationList {
    #[serde(default)]
    pub notifications: Vec<Notification>,
}

pub async fn notifications<T: Transport>(
    client: &ApiClient<T>,
) -> Result<NotificationList, ApiError> {
    client.get("/user/notifications", Query::new()).await
}
