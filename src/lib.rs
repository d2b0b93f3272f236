//! Typed Rust client for the Branch deep-linking HTTP API.
//!
//! Three layers: a domain layer of credentials, parameter bags and per-resource
//! field schemas; a transport layer for the HTTP exchange and error payloads;
//! and a client layer that dispatches requests and hands out the `App`, `Url`
//! and `Credits` services.
//!
//! ```rust,no_run
//! use branchio::{BranchClient, BranchKey, Config, Params};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), branchio::BranchError> {
//!     let client = BranchClient::new(Config::new(BranchKey::new("key_live_...")?));
//!     let params = Params::new()
//!         .with("channel", "facebook")
//!         .with("feature", "share");
//!     let link = client.url().create(params).await?;
//!     println!("{}", link["url"]);
//!     Ok(())
//! }
//! ```
#![forbid(unsafe_code)]

pub mod client;
pub mod domain;
pub mod resources;
pub mod transport;

pub use client::{
    ApiClient, ApiError, BranchClient, BranchClientBuilder, BranchError, DEFAULT_BASE_URL,
    RequestOptions,
};
pub use domain::{BranchKey, BranchSecret, Config, Params, ValidationError};
pub use resources::{App, Credits, Url};
pub use transport::{HttpRequest, HttpResponse, HttpTransport, Method, TransportError};
