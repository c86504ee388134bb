//! On-demand HTTP lookups for enriching streaming records.
//!
//! A [`PollingClient`] turns lookup arguments into a GET request against a
//! URL template, applies configured headers, checks the response status
//! against a success/error policy and decodes the body into at most one
//! record. Every failure becomes a logged `None`.
//!
//! # Example
//!
//! ```no_run
//! use http_lookup::prelude::*;
//!
//! #[derive(Debug, Deserialize)]
//! pub struct User {
//!     id: u64,
//!     name: String,
//! }
//!
//! # async fn run() -> http_lookup::Result<()> {
//! let config = LookupConfig::builder("https://api.example.com/users/{id}")
//!     .header("Authorization", "user:secret")
//!     .property("lookup.success-codes", "2XX")
//!     .build()?;
//! let client = PollingClient::from_config(&config, JsonDecoder::<User>::new())?;
//!
//! if let Some(user) = client.pull(&[LookupArg::new("id", "42")]).await {
//!     println!("{user:?}");
//! }
//! # Ok(())
//! # }
//! ```

mod client;
pub mod config;
mod connector;
pub mod middleware;
mod polling;
pub mod prelude;

pub use client::{BoxedService, HyperClient, HyperClientBuilder, ServiceFuture};
pub use config::{ClientConfig, ClientConfigBuilder, LookupConfig, LookupConfigBuilder};
pub use connector::https_connector;
pub use polling::{LookupOutcome, PollingClient};

// Re-export tower for middleware composition
pub use tower;

pub use http_lookup_core::{
    BasicAuthHeaderValuePreprocessor, ComposeHeaderPreprocessor, Decoder, Error,
    GetQueryCreator, HeaderPreprocessor, HeaderValuePreprocessor, HttpClient, JsonDecoder,
    LookupArg, LookupQueryCreator, LookupQueryInfo, Method, Request, RequestBuilder, Response,
    Result, StatusCodeChecker, StatusCodeRule, build_uri, from_json, header, prepare_headers,
};
pub use url;
