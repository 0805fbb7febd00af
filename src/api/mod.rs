//! API module
//!
//! This module provides the client for the Felix API and the transport it
//! sends requests over.

pub mod client;
pub mod transport;

// Re-export commonly used types
pub use client::{ClientConfig, ClientConfigBuilder, ClientError, ErrorDescriptor, FelixClient};
pub use transport::{HttpTransport, Method, Request, Response, Transport, TransportError};
