//! AI assistant endpoints for the Beijing page.

use crate::client::{ApiClient, Query};
use crate::error::ApiError;
use crate::models::{
    ChatHistory, ChatReply, ChatRequest, RecommendRequest, RecommendResponse, ValuationRequest,
    ValuationResult,
};
use crate::transport::Transport;

pub async fn recommend<T: Transport>(
    client: &ApiClient<T>,
    request: &RecommendRequest,
) -> Result<RecommendResponse, ApiError> {
    client.post("/beijing/ai/recommend", request).await
}

pub async fn chat<T: Transport>(
    client: &ApiClient<T>,
    message: &str,
    session_id: Option<&str>,
) -> Result<ChatReply, ApiError> {
    let body = ChatRequest {
        message: message.to_string(),
        session_id: session_id.map(str::to_string),
    };
    client.post("/beijing/ai/chat", &body).await
}

pub async fn chat_history<T: Transport>(client: &ApiClient<T>) -> Result<ChatHistory, ApiError> {
    client.get("/beijing/ai/chat/history", Query::new()).await
}

pub async fn valuation<T: Transport>(
    client: &ApiClient<T>,
    request: &ValuationRequest,
) -> Result<ValuationResult, ApiError> {
    client.post("/beijing/ai/valuation", request).await
}
