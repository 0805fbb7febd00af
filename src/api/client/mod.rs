//! Client module
//!
//! This module provides `FelixClient`, which turns each API operation into one
//! request over a [`Transport`] and normalizes the result.

mod config;
mod error;

use std::sync::Arc;

use reqwest::Url;
use serde::Serialize;
use serde_json::Value;

use crate::api::transport::{HttpTransport, Method, Request, Response, Transport};
use crate::convert::{convert_user, key_by};
use crate::models::Fetched;

pub use config::{ClientConfig, ClientConfigBuilder, DEFAULT_TIMEOUT};
pub use error::{ClientError, ErrorDescriptor, TIMEOUT_CODE};

/// Client for the Felix API
///
/// Holds only read-only configuration, so clones can issue requests
/// concurrently. Each request runs under its own deadline.
pub struct FelixClient<T: Transport = HttpTransport> {
    transport: Arc<T>,
    config: Arc<ClientConfig>,
    api_root: Url,
}

impl<T: Transport> Clone for FelixClient<T> {
    fn clone(&self) -> Self {
        Self {
            transport: Arc::clone(&self.transport),
            config: Arc::clone(&self.config),
            api_root: self.api_root.clone(),
        }
    }
}

impl FelixClient<HttpTransport> {
    /// Create a client that talks HTTP via reqwest
    pub fn new(config: ClientConfig) -> Result<Self, ClientError> {
        let transport = HttpTransport::new(config.token(), config.timeout())?;
        Self::with_transport(config, transport)
    }
}

impl<T: Transport> FelixClient<T> {
    /// Create a client over a custom transport
    pub fn with_transport(config: ClientConfig, transport: T) -> Result<Self, ClientError> {
        let api_root = Url::parse(&config.api_root())
            .map_err(|e| ClientError::Config(format!("invalid url {:?}: {}", config.url(), e)))?;
        if api_root.cannot_be_a_base() {
            return Err(ClientError::Config(format!(
                "url {:?} cannot be used as a base",
                config.url()
            )));
        }

        Ok(Self {
            transport: Arc::new(transport),
            config: Arc::new(config),
            api_root,
        })
    }

    pub fn config(&self) -> &ClientConfig {
        &self.config
    }

    /// Liveness probe: `true` only when the API root answers 200
    pub async fn status(&self) -> bool {
        match self.send(Method::Get, self.api_root.clone(), None).await {
            Ok(response) => response.status == 200,
            Err(e) => {
                tracing::debug!("status probe failed: {}", e);
                false
            }
        }
    }

    /// Fetch one user, or every user keyed by id when the API answers with a list
    pub async fn get_user(&self, id: &str) -> Result<Fetched, ClientError> {
        let body = self
            .request(Method::Get, self.endpoint(&["getUserData", id]), None)
            .await?;

        match body {
            Value::Array(users) => Ok(Fetched::Keyed(key_by(users, "id")?)),
            user if self.config.auto_conversion() => Ok(Fetched::Record(convert_user(user)?)),
            user => Ok(Fetched::Record(user)),
        }
    }

    /// Fetch one guild, or every guild keyed by id when the API answers with a list
    pub async fn get_guild(&self, id: &str) -> Result<Fetched, ClientError> {
        let body = self
            .request(Method::Get, self.endpoint(&["getGuildData", id]), None)
            .await?;

        match body {
            Value::Array(guilds) => Ok(Fetched::Keyed(key_by(guilds, "id")?)),
            guild => Ok(Fetched::Record(guild)),
        }
    }

    /// Fetch a named client value exactly as the API returns it
    pub async fn fetch_client_value(&self, name: &str) -> Result<Value, ClientError> {
        self.request(Method::Get, self.endpoint(&["getClientData", name]), None)
            .await
    }

    /// Upsert a user record
    pub async fn post_user<U: Serialize + ?Sized>(&self, user: &U) -> Result<Value, ClientError> {
        let body = serde_json::to_value(user)?;
        self.request(Method::Post, self.endpoint(&["postUserData"]), Some(body))
            .await
    }

    /// Upsert a guild record
    pub async fn post_guild<G: Serialize + ?Sized>(&self, guild: &G) -> Result<Value, ClientError> {
        let body = serde_json::to_value(guild)?;
        self.request(Method::Post, self.endpoint(&["postGuildData"]), Some(body))
            .await
    }

    fn endpoint(&self, segments: &[&str]) -> Url {
        let mut url = self.api_root.clone();
        // Checked in the constructor: the root can always take path segments
        if let Ok(mut path) = url.path_segments_mut() {
            path.pop_if_empty().extend(segments);
        }
        url
    }

    /// Send a request and turn a non-2xx status into `ClientError::Http`
    async fn request(
        &self,
        method: Method,
        url: Url,
        body: Option<Value>,
    ) -> Result<Value, ClientError> {
        let response = self.send(method, url.clone(), body).await?;
        let body = parse_body(&response.body);

        if !response.is_success() {
            tracing::warn!(
                "{} {} answered {} {}",
                method.as_str(),
                url,
                response.status,
                response.status_text
            );
            return Err(ClientError::Http {
                status: response.status,
                status_text: response.status_text,
                body,
            });
        }

        Ok(body)
    }

    async fn send(
        &self,
        method: Method,
        url: Url,
        body: Option<Value>,
    ) -> Result<Response, ClientError> {
        tracing::debug!("{} {}", method.as_str(), url);

        let timeout = self.config.timeout();
        let request = Request {
            method,
            url: url.to_string(),
            body,
        };
        let sent = self.transport.send(request);

        let result = if timeout.is_zero() {
            sent.await
        } else {
            match tokio::time::timeout(timeout, sent).await {
                Ok(result) => result,
                Err(_) => return Err(self.fail(method, &url, ClientError::Timeout(timeout))),
            }
        };

        result.map_err(|e| self.fail(method, &url, e.into()))
    }

    fn fail(&self, method: Method, url: &Url, error: ClientError) -> ClientError {
        tracing::warn!("{} {} failed: {}", method.as_str(), url, error);
        error
    }
}

/// Decode a response body: JSON when possible, otherwise the raw text.
/// An empty body decodes to `null`.
fn parse_body(body: &str) -> Value {
    if body.trim().is_empty() {
        return Value::Null;
    }
    serde_json::from_str(body).unwrap_or_else(|_| Value::String(body.to_string()))
}
