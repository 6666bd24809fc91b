//! Envelope-unwrapping API client.
//!
//! One gateway for every page: attaches the bearer token when a session
//! exists, unwraps the `{code, message, data}` envelope, and routes code
//! 401 through the auth hook before the caller ever sees the failure.

use std::rc::Rc;

use serde::de::DeserializeOwned;
use serde::Deserialize;
use serde_json::Value;

use crate::error::ApiError;
use crate::transport::{HttpRequest, HttpResponse, Method, Transport};

/// Supplies the bearer token and absorbs forced-logout on 401.
///
/// The session guard implements this; tests use [`StaticToken`] or a
/// recording stub. `handle_unauthorized` must be idempotent per expired
/// session; the gateway calls it on every 401 it sees.
pub trait AuthProvider {
    fn token(&self) -> Option<String>;
    fn handle_unauthorized(&self);
}

/// Token-only provider for the CLI: no local session to clear.
pub struct StaticToken(pub Option<String>);

impl AuthProvider for StaticToken {
    fn token(&self) -> Option<String> {
        self.0.clone()
    }

    fn handle_unauthorized(&self) {
        log::warn!("server rejected token (401)");
    }
}

/// Query-pair builder. Empty and absent values are omitted entirely so
/// they are never serialized as `"undefined"` or `""` on the wire.
#[derive(Debug, Default, Clone)]
pub struct Query(Vec<(String, String)>);

impl Query {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add(mut self, key: &str, value: impl ToString) -> Self {
        let value = value.to_string();
        if !value.is_empty() {
            self.0.push((key.to_string(), value));
        }
        self
    }

    pub fn add_opt(self, key: &str, value: Option<impl ToString>) -> Self {
        match value {
            Some(v) => self.add(key, v),
            None => self,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn into_pairs(self) -> Vec<(String, String)> {
        self.0
    }
}

/// The wire envelope. `data` is kept loose here; the typed payload is
/// extracted only after the code has been checked.
#[derive(Debug, Deserialize)]
struct Envelope {
    code: i64,
    #[serde(default)]
    message: String,
    #[serde(default)]
    data: Option<Value>,
}

pub struct ApiClient<T: Transport> {
    transport: T,
    auth: Option<Rc<dyn AuthProvider>>,
}

impl<T: Transport> ApiClient<T> {
    pub fn new(transport: T) -> Self {
        Self {
            transport,
            auth: None,
        }
    }

    pub fn with_auth(mut self, auth: Rc<dyn AuthProvider>) -> Self {
        self.auth = Some(auth);
        self
    }

    pub async fn get<D: DeserializeOwned>(&self, path: &str, query: Query) -> Result<D, ApiError> {
        self.request(Method::Get, path, query, None).await
    }

    pub async fn post<D: DeserializeOwned, B: serde::Serialize>(
        &self,
        path: &str,
        body: &B,
    ) -> Result<D, ApiError> {
        let body = serde_json::to_string(body).map_err(|e| ApiError::Decode(e.to_string()))?;
        self.request(Method::Post, path, Query::new(), Some(body))
            .await
    }

    pub async fn put<D: DeserializeOwned, B: serde::Serialize>(
        &self,
        path: &str,
        body: &B,
    ) -> Result<D, ApiError> {
        let body = serde_json::to_string(body).map_err(|e| ApiError::Decode(e.to_string()))?;
        self.request(Method::Put, path, Query::new(), Some(body))
            .await
    }

    pub async fn delete<D: DeserializeOwned>(&self, path: &str) -> Result<D, ApiError> {
        self.request(Method::Delete, path, Query::new(), None).await
    }

    async fn request<D: DeserializeOwned>(
        &self,
        method: Method,
        path: &str,
        query: Query,
        body: Option<String>,
    ) -> Result<D, ApiError> {
        let req = HttpRequest {
            method,
            path: path.to_string(),
            query: query.into_pairs(),
            body,
            bearer: self.auth.as_ref().and_then(|a| a.token()),
        };

        let response = self
            .transport
            .send(req)
            .await
            .map_err(|e| ApiError::Network(e.0))?;

        self.unwrap_envelope(path, response)
    }

    fn unwrap_envelope<D: DeserializeOwned>(
        &self,
        path: &str,
        response: HttpResponse,
    ) -> Result<D, ApiError> {
        let envelope: Envelope = serde_json::from_str(&response.body)
            .map_err(|e| ApiError::Decode(format!("{path}: {e}")))?;

        match envelope.code {
            200 => {
                let data = envelope.data.unwrap_or(Value::Null);
                serde_json::from_value(data).map_err(|e| ApiError::Decode(format!("{path}: {e}")))
            }
            401 => {
                log::warn!("{path}: session expired");
                if let Some(auth) = &self.auth {
                    auth.handle_unauthorized();
                }
                Err(ApiError::AuthExpired)
            }
            code => Err(ApiError::RequestFailed {
                code,
                message: envelope.message,
            }),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::mock::MockTransport;
    use serde_json::json;
    use std::cell::Cell;

    struct CountingAuth {
        token: Option<String>,
        unauthorized: Cell<u32>,
    }

    impl AuthProvider for Rc<CountingAuth> {
        fn token(&self) -> Option<String> {
            self.token.clone()
        }

        fn handle_unauthorized(&self) {
            self.unauthorized.set(self.unauthorized.get() + 1);
        }
    }

    fn block_on<F: std::future::Future>(fut: F) -> F::Output {
        // Mock transport futures are immediately ready; no runtime needed.
        futures::executor::block_on(fut)
    }

    #[test]
    fn ok_envelope_resolves_to_data() {
        let transport = MockTransport::new();
        transport.push_envelope(200, "", json!({"value": 42}));
        let client = ApiClient::new(transport);

        let out: serde_json::Value =
            block_on(client.get("/national/overview", Query::new())).unwrap();
        assert_eq!(out, json!({"value": 42}));
    }

    #[test]
    fn unit_payload_accepts_absent_data() {
        let transport = MockTransport::new();
        transport.push_body(r#"{"code": 200, "message": "ok"}"#);
        let client = ApiClient::new(transport);

        let out: Result<(), ApiError> = block_on(client.delete("/favorites/houses/3"));
        assert!(out.is_ok());
    }

    #[test]
    fn non_200_becomes_request_failed_with_message() {
        let transport = MockTransport::new();
        transport.push_envelope(500, "数据库连接失败", json!({}));
        let client = ApiClient::new(transport);

        let out: Result<Value, ApiError> = block_on(client.get("/national/overview", Query::new()));
        assert_eq!(
            out.unwrap_err(),
            ApiError::RequestFailed {
                code: 500,
                message: "数据库连接失败".to_string()
            }
        );
    }

    #[test]
    fn unauthorized_fires_hook_on_every_401() {
        let transport = MockTransport::new();
        transport.push_envelope(401, "unauthorized", Value::Null);
        transport.push_envelope(401, "unauthorized", Value::Null);

        let auth = Rc::new(CountingAuth {
            token: Some("t0k3n".to_string()),
            unauthorized: Cell::new(0),
        });
        let client = ApiClient::new(transport).with_auth(Rc::new(auth.clone()));

        let first: Result<Value, ApiError> = block_on(client.get("/user/profile", Query::new()));
        let second: Result<Value, ApiError> = block_on(client.get("/user/profile", Query::new()));
        assert_eq!(first.unwrap_err(), ApiError::AuthExpired);
        assert_eq!(second.unwrap_err(), ApiError::AuthExpired);
        // The gateway reports every 401; collapsing repeats into a single
        // redirect is the session guard's job.
        assert_eq!(auth.unauthorized.get(), 2);
    }

    #[test]
    fn bearer_attached_only_when_token_present() {
        let transport = MockTransport::new();
        transport.push_envelope(200, "", Value::Null);
        transport.push_envelope(200, "", Value::Null);

        let auth = Rc::new(CountingAuth {
            token: Some("abc".to_string()),
            unauthorized: Cell::new(0),
        });
        let client = ApiClient::new(transport).with_auth(Rc::new(auth));
        let _: Result<(), _> = block_on(client.get("/system/version", Query::new()));

        let anon_transport = MockTransport::new();
        anon_transport.push_envelope(200, "", Value::Null);
        let anon = ApiClient::new(anon_transport);
        let _: Result<(), _> = block_on(anon.get("/system/version", Query::new()));

        let sent = anon.transport.requests();
        assert_eq!(sent[0].bearer, None);
        let authed = client.transport.requests();
        assert_eq!(authed[0].bearer.as_deref(), Some("abc"));
    }

    #[test]
    fn network_failure_is_distinct() {
        let transport = MockTransport::new();
        transport.push_error("connection refused");
        let client = ApiClient::new(transport);

        let out: Result<Value, ApiError> = block_on(client.get("/national/overview", Query::new()));
        assert!(matches!(out.unwrap_err(), ApiError::Network(_)));
    }

    #[test]
    fn garbage_body_is_a_decode_error() {
        let transport = MockTransport::new();
        transport.push_body("<html>502 Bad Gateway</html>");
        let client = ApiClient::new(transport);

        let out: Result<Value, ApiError> = block_on(client.get("/national/overview", Query::new()));
        assert!(matches!(out.unwrap_err(), ApiError::Decode(_)));
    }

    #[test]
    fn query_omits_empty_and_absent_values() {
        let query = Query::new()
            .add("province", "广东")
            .add("keyword", "")
            .add_opt("min_price", None::<i64>)
            .add_opt("max_price", Some(30000));
        let pairs = query.into_pairs();
        assert_eq!(
            pairs,
            vec![
                ("province".to_string(), "广东".to_string()),
                ("max_price".to_string(), "30000".to_string()),
            ]
        );
    }
}
