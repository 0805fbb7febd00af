//! Client errors and the normalized error descriptor

use std::time::Duration;

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::api::transport::TransportError;

/// Status code reported for timeouts in error descriptors
pub const TIMEOUT_CODE: u16 = 408;

/// Client errors
#[derive(Debug, thiserror::Error)]
pub enum ClientError {
    #[error("request timed out after {0:?}")]
    Timeout(Duration),

    #[error("HTTP {status} {status_text}: {body}")]
    Http {
        status: u16,
        status_text: String,
        body: Value,
    },

    #[error("network error: {0}")]
    Network(String),

    #[error("failed to serialize request body: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("cannot convert response: {0}")]
    Conversion(String),

    #[error("invalid client configuration: {0}")]
    Config(String),
}

impl ClientError {
    /// Status code of the failed response, if the server answered
    pub fn status(&self) -> Option<u16> {
        match self {
            ClientError::Http { status, .. } => Some(*status),
            _ => None,
        }
    }

    pub fn is_timeout(&self) -> bool {
        matches!(self, ClientError::Timeout(_))
    }

    pub fn descriptor(&self) -> ErrorDescriptor {
        ErrorDescriptor::from(self)
    }
}

impl From<TransportError> for ClientError {
    fn from(error: TransportError) -> Self {
        match error {
            TransportError::Timeout(after) => ClientError::Timeout(after),
            TransportError::Network(msg) => ClientError::Network(msg),
            TransportError::Config(msg) => ClientError::Config(msg),
        }
    }
}

/// Flat `{code, message, data}` view of a failure.
///
/// `code` is only present when there is a meaningful status: the server's, or
/// 408 for a timeout. Network failures carry no code.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ErrorDescriptor {
    pub code: Option<u16>,
    pub message: String,
    pub data: Value,
}

impl From<&ClientError> for ErrorDescriptor {
    fn from(error: &ClientError) -> Self {
        match error {
            ClientError::Timeout(_) => Self {
                code: Some(TIMEOUT_CODE),
                message: "timeout".to_string(),
                data: Value::String("timeout".to_string()),
            },
            ClientError::Http {
                status,
                status_text,
                body,
            } => Self {
                code: Some(*status),
                message: status_text.clone(),
                data: body.clone(),
            },
            other => Self {
                code: None,
                message: other.to_string(),
                data: Value::Null,
            },
        }
    }
}
