//! Felix client library crate
//!
//! Async client for Felix, the service that stores user and guild records for
//! a chat bot. Each operation issues exactly one HTTP request; list responses
//! and a user's mutual guilds can be reshaped into id-keyed collections.
//!
//! ```no_run
//! use felix_client::{ClientConfig, FelixClient};
//!
//! # async fn example() -> Result<(), felix_client::ClientError> {
//! let config = ClientConfig::builder("https://felix.example.com", "token")
//!     .timeout_ms(3000)
//!     .build();
//! let client = FelixClient::new(config)?;
//!
//! if client.status().await {
//!     let user = client.get_user("1234").await?;
//!     println!("{}", user.into_value());
//! }
//! # Ok(())
//! # }
//! ```

pub mod api;
pub mod cli;
pub mod convert;
pub mod models;

pub use api::{ClientConfig, ClientError, ErrorDescriptor, FelixClient};
pub use models::{Collection, Fetched, Guild, GuildSummary, Permission, User};
