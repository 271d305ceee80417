//! Typed async client for the Planhat REST API.
//!
//! ```no_run
//! # async fn demo() -> planhat::Result<()> {
//! use planhat::{Client, CompanyListOptions, Config};
//!
//! let client = Client::new(Config::new("api-key", "eu3"))?;
//! let opts = CompanyListOptions {
//!     limit: Some(10),
//!     offset: Some(0),
//!     ..Default::default()
//! };
//! let companies = client.companies().list(Some(&opts)).await?;
//! # let _ = companies;
//! # Ok(())
//! # }
//! ```
//!
//! Planhat has no "more results" marker; page by bumping `offset` until a
//! list call comes back empty.

pub mod client;
pub mod config;
pub mod error;
pub mod http;
pub mod resources;
pub mod types;

pub use client::Client;
pub use config::Config;
pub use error::{Error, ErrorKind, Result};
pub use http::{RateLimiter, MAX_BULK_ITEMS};
pub use resources::*;
pub use types::{DeleteResponse, Key, Owner, UpsertMetricsResponse, UpsertResponse};

pub use tokio_util::sync::CancellationToken;
