//! reqwest-backed transport

use std::sync::Arc;
use std::time::Duration;

use hyper::ext::ReasonPhrase;
use reqwest::header::{HeaderMap, HeaderValue, ACCEPT, AUTHORIZATION};
use reqwest::{Client as ReqwestClient, StatusCode};

use super::{Method, Request, Response, Transport, TransportError};

/// Transport that talks to the Felix API over HTTP(S)
#[derive(Debug, Clone)]
pub struct HttpTransport {
    http_client: Arc<ReqwestClient>,
    timeout: Duration,
}

impl HttpTransport {
    /// Build a transport that sends `token` as a bearer token and gives up
    /// after `timeout`. A zero timeout disables the deadline.
    pub fn new(token: &str, timeout: Duration) -> Result<Self, TransportError> {
        let mut auth = HeaderValue::from_str(&format!("Bearer {}", token))
            .map_err(|e| TransportError::Config(format!("invalid token: {}", e)))?;
        auth.set_sensitive(true);

        let mut headers = HeaderMap::new();
        headers.insert(AUTHORIZATION, auth);
        headers.insert(ACCEPT, HeaderValue::from_static("application/json"));

        let mut builder = ReqwestClient::builder().default_headers(headers);
        if !timeout.is_zero() {
            builder = builder.timeout(timeout);
        }
        let http_client = builder
            .build()
            .map_err(|e| TransportError::Config(format!("failed to build HTTP client: {}", e)))?;

        Ok(Self {
            http_client: Arc::new(http_client),
            timeout,
        })
    }

    fn classify(&self, error: reqwest::Error) -> TransportError {
        if error.is_timeout() {
            TransportError::Timeout(self.timeout)
        } else {
            TransportError::Network(error.to_string())
        }
    }
}

#[async_trait::async_trait]
impl Transport for HttpTransport {
    async fn send(&self, request: Request) -> Result<Response, TransportError> {
        let builder = match request.method {
            Method::Get => self.http_client.get(&request.url),
            Method::Post => self.http_client.post(&request.url),
        };
        let builder = match &request.body {
            Some(body) => builder.json(body),
            None => builder,
        };

        let response = builder.send().await.map_err(|e| self.classify(e))?;
        let status = response.status();
        // hyper only records the phrase when it differs from the canonical one
        let reason = status_text(
            status,
            response
                .extensions()
                .get::<ReasonPhrase>()
                .map(|phrase| phrase.as_bytes()),
        );
        let body = response.text().await.map_err(|e| self.classify(e))?;

        Ok(Response {
            status: status.as_u16(),
            status_text: reason,
            body,
        })
    }
}

/// Reason phrase as sent by the server, else the canonical one, else `HTTP <code>`
fn status_text(status: StatusCode, sent: Option<&[u8]>) -> String {
    if let Some(phrase) = sent.map(String::from_utf8_lossy) {
        if !phrase.trim().is_empty() {
            return phrase.into_owned();
        }
    }
    match status.canonical_reason() {
        Some(reason) => reason.to_string(),
        None => format!("HTTP {}", status.as_u16()),
    }
}
