//! Wire models and REST gateway for the housing market dashboard.
//!
//! Every backend response is wrapped in a `{code, message, data}` envelope.
//! [`ApiClient`] unwraps that envelope once, centrally: `200` yields the
//! typed payload, `401` forces a logout through the registered
//! [`AuthProvider`], and everything else becomes a typed [`ApiError`].
//!
//! The HTTP layer is behind the [`Transport`] trait so the same client runs
//! against the browser fetch API (feature `web`), reqwest (feature
//! `native`), or a scripted [`mock::MockTransport`] in tests.

pub mod client;
pub mod endpoints;
pub mod error;
pub mod mock;
pub mod models;
pub mod tasks;
pub mod transport;

pub use client::{ApiClient, AuthProvider, Query, StaticToken};
pub use error::ApiError;
pub use transport::{HttpRequest, HttpResponse, Method, Transport, TransportError};
