//! Core types for on-demand HTTP lookups.
//!
//! This crate holds the I/O-free building blocks of a lookup:
//! - [`LookupArg`] and [`LookupQueryInfo`] - lookup arguments and the query built from them
//! - [`LookupQueryCreator`] and [`GetQueryCreator`] - query construction
//! - [`build_uri`] - request target construction from a URL template
//! - [`StatusCodeChecker`] and [`StatusCodeRule`] - status code policy
//! - [`HeaderPreprocessor`] and [`prepare_headers`] - configured header resolution
//! - [`Decoder`] and [`JsonDecoder`] - response body decoding
//! - [`Request`], [`Response`] and [`HttpClient`] - transport types
//! - [`Error`] and [`Result`] - Error handling

mod client;
mod decode;
mod error;
mod headers;
mod lookup;
pub mod prelude;
mod query;
mod request;
mod response;
mod status;
mod uri;

pub use client::HttpClient;
pub use decode::{Decoder, JsonDecoder, from_json};
pub use error::{Error, Result};
pub use headers::{
    BasicAuthHeaderValuePreprocessor, ComposeHeaderPreprocessor, HeaderPreprocessor,
    HeaderValuePreprocessor, prepare_headers,
};
pub use lookup::{LookupArg, LookupQueryInfo};
pub use query::{GetQueryCreator, LookupQueryCreator};
pub use request::{Request, RequestBuilder};
pub use response::Response;
pub use status::{StatusCodeChecker, StatusCodeRule};
pub use uri::build_uri;

// Re-export http crate types for methods and headers
pub use http::{Method, header};
