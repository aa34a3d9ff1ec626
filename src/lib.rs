//! # Unbrowser - A client for the Unbrowser browse-as-a-service API
//!
//! Unbrowser fetches web pages on your behalf and returns their content as
//! markdown, text or HTML, along with tables, discovered APIs and session
//! cookies. This crate wraps its HTTP API in a typed, retry-aware client
//! built on `reqwest`.
//!
//! ## Quick Start
//!
//! ```no_run
//! use unbrowser::{BrowseOptions, Client, ContentType, CostTier};
//! use std::time::Duration;
//!
//! #[tokio::main]
//! async fn main() -> Result<(), unbrowser::Error> {
//!     let client = Client::builder("ub_live_xxxxx")
//!         .timeout(Duration::from_secs(30))
//!         .build()?;
//!
//!     let options = BrowseOptions {
//!         content_type: Some(ContentType::Markdown),
//!         max_cost_tier: Some(CostTier::Lightweight),
//!         ..Default::default()
//!     };
//!     let page = client
//!         .browse("https://example.com", Some(&options), None)
//!         .await?;
//!     println!("{} ({} via {})", page.title, page.url, page.metadata.tier);
//!
//!     let usage = client.usage().await?;
//!     println!("{} requests left today", usage.limits.remaining);
//!
//!     Ok(())
//! }
//! ```
//!
//! ## Features
//!
//! - **Typed endpoints** - browse, fetch, batch, preview, domain intelligence,
//!   usage, health and workflow recording/replay
//! - **Envelope handling** - `{success, data, error}` responses are unwrapped
//!   and error envelopes become [`Error::Api`]
//! - **Automatic retries** - timeouts, connection failures and server errors
//!   are retried with exponential backoff; client errors are not
//! - **Structured logging** - every attempt and retry is logged with `tracing`
//! - **Raw access** - [`Client::call`] returns a [`Response`] with status,
//!   headers, latency, attempts and the raw body
//!
//! ## Error Handling
//!
//! ```no_run
//! use unbrowser::{Client, Error};
//!
//! # async fn example() -> Result<(), Error> {
//! # let client = Client::new("ub_live_xxxxx")?;
//! match client.fetch("https://example.com", None, None).await {
//!     Ok(result) => println!("{}", result.content.text),
//!     Err(Error::Authentication { message }) => eprintln!("bad key: {}", message),
//!     Err(Error::RateLimited { retry_after, .. }) => {
//!         eprintln!("slow down for {:?}s", retry_after);
//!     }
//!     Err(e) if e.is_retryable() => eprintln!("gave up after retries: {}", e),
//!     Err(e) => eprintln!("request failed: {}", e),
//! }
//! # Ok(())
//! # }
//! ```

mod client;
mod credentials;
mod error;
pub mod metadata;
pub mod rate_limit;
mod response;
pub mod retry;
pub mod types;

pub use client::{Client, ClientBuilder, DEFAULT_BASE_URL, DEFAULT_TIMEOUT, USER_AGENT};
pub use credentials::{ApiKey, API_KEY_PREFIX};
pub use error::{Error, Result, NON_RETRYABLE_CODES};
pub use metadata::RequestMetadata;
pub use response::Response;
pub use retry::RetryPolicy;
pub use types::*;
