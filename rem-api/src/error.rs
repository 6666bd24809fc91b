//! Failure taxonomy for API calls.
//!
//! `AuthExpired` is handled centrally by the gateway (forced logout); the
//! other variants propagate to the view controller that issued the call,
//! which scopes the failure to the smallest affected panel.

use thiserror::Error;

#[derive(Debug, Clone, Error, PartialEq)]
pub enum ApiError {
    /// Envelope code 401: the session is gone. The auth hook has already
    /// cleared local state by the time this is returned.
    #[error("unauthorized")]
    AuthExpired,

    /// Envelope code other than 200/401; carries the server's message.
    #[error("request failed ({code}): {message}")]
    RequestFailed { code: i64, message: String },

    /// Transport-level failure, no response received. The gateway never
    /// retries; callers decide whether to offer a retry affordance.
    #[error("network error: {0}")]
    Network(String),

    /// Response body was not a valid envelope or payload.
    #[error("decode error: {0}")]
    Decode(String),

    /// Client-side form validation; never reaches the network.
    #[error("{0}")]
    Validation(String),
}

impl ApiError {
    /// Message suitable for an inline error panel.
    pub fn user_message(&self) -> String {
        match self {
            ApiError::AuthExpired => "登录已过期，请重新登录".to_string(),
            ApiError::RequestFailed { message, .. } if !message.is_empty() => message.clone(),
            ApiError::RequestFailed { code, .. } => format!("请求失败 ({code})"),
            ApiError::Network(_) => "网络连接失败，请稍后重试".to_string(),
            ApiError::Decode(_) => "数据格式异常".to_string(),
            ApiError::Validation(msg) => msg.clone(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn request_failed_prefers_server_message() {
        let err = ApiError::RequestFailed {
            code: 500,
            message: "数据库连接失败".to_string(),
        };
        assert_eq!(err.user_message(), "数据库连接失败");
    }

    #[test]
    fn request_failed_without_message_shows_code() {
        let err = ApiError::RequestFailed {
            code: 503,
            message: String::new(),
        };
        assert!(err.user_message().contains("503"));
    }
}
