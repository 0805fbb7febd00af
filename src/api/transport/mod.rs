//! Transport module
//!
//! This module defines the `Transport` trait that abstracts over the HTTP
//! library used to reach the Felix API. Requests and responses are plain data;
//! the client decides what a status code means.

mod http;

use std::time::Duration;

use serde_json::Value;

pub use http::HttpTransport;

/// HTTP method for a request
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Method {
    Get,
    Post,
}

impl Method {
    pub fn as_str(&self) -> &'static str {
        match self {
            Method::Get => "GET",
            Method::Post => "POST",
        }
    }
}

/// A single request to the API, described as plain data
#[derive(Debug, Clone, PartialEq)]
pub struct Request {
    pub method: Method,
    /// Absolute URL with path segments already percent-encoded
    pub url: String,
    /// JSON payload, sent with `Content-Type: application/json`
    pub body: Option<Value>,
}

/// Whatever the server answered with, whatever the status
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Response {
    pub status: u16,
    pub status_text: String,
    pub body: String,
}

impl Response {
    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }
}

/// Failures where no response was received at all, or the transport
/// could not be set up
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum TransportError {
    #[error("request timed out after {0:?}")]
    Timeout(Duration),

    #[error("network error: {0}")]
    Network(String),

    #[error("invalid transport settings: {0}")]
    Config(String),
}

/// Trait defining how a request reaches the Felix API
#[async_trait::async_trait]
pub trait Transport: Send + Sync {
    /// Send one request and wait for the full response body
    async fn send(&self, request: Request) -> Result<Response, TransportError>;
}

#[async_trait::async_trait]
impl<T: Transport + ?Sized> Transport for std::sync::Arc<T> {
    async fn send(&self, request: Request) -> Result<Response, TransportError> {
        (**self).send(request).await
    }
}
