//! HTTP request building.
//!
//! Use [`Request::builder`] or [`Request::get`] to construct requests with
//! headers and a timeout.
//!
//! # Example
//!
//! ```
//! use std::time::Duration;
//! use http_lookup_core::{Method, Request};
//!
//! let request = Request::get("https://api.example.com/items?id=42".parse().unwrap())
//!     .header("Accept", "application/json")
//!     .timeout(Duration::from_secs(5))
//!     .build();
//! assert_eq!(request.method(), Method::GET);
//! ```

use std::time::Duration;

use http::Method;

/// An HTTP request with method, URL, ordered headers and timeout.
///
/// Lookup requests carry no body.
#[derive(Debug, Clone)]
pub struct Request {
    method: Method,
    url: url::Url,
    headers: Vec<(String, String)>,
    timeout: Option<Duration>,
}

impl Request {
    /// Creates a new [`RequestBuilder`].
    #[must_use]
    pub fn builder(method: Method, url: url::Url) -> RequestBuilder {
        RequestBuilder::new(method, url)
    }

    /// Creates a [`RequestBuilder`] for a GET request.
    #[must_use]
    pub fn get(url: url::Url) -> RequestBuilder {
        RequestBuilder::new(Method::GET, url)
    }

    /// HTTP method.
    #[must_use]
    pub fn method(&self) -> Method {
        self.method.clone()
    }

    /// Request URL.
    #[must_use]
    pub fn url(&self) -> &url::Url {
        &self.url
    }

    /// Request headers, in insertion order.
    #[must_use]
    pub fn headers(&self) -> &[(String, String)] {
        &self.headers
    }

    /// First header value by name (case-insensitive).
    #[must_use]
    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers
            .iter()
            .find(|(key, _)| key.eq_ignore_ascii_case(name))
            .map(|(_, value)| value.as_str())
    }

    /// Per-request timeout, overriding the transport default.
    #[must_use]
    pub const fn timeout(&self) -> Option<Duration> {
        self.timeout
    }

    /// Consume into (method, url, headers).
    #[must_use]
    pub fn into_parts(self) -> (Method, url::Url, Vec<(String, String)>) {
        (self.method, self.url, self.headers)
    }
}

/// Builder for constructing [`Request`] instances.
#[derive(Debug, Clone)]
pub struct RequestBuilder {
    method: Method,
    url: url::Url,
    headers: Vec<(String, String)>,
    timeout: Option<Duration>,
}

impl RequestBuilder {
    /// Creates a new builder.
    #[must_use]
    pub fn new(method: Method, url: url::Url) -> Self {
        Self {
            method,
            url,
            headers: Vec::new(),
            timeout: None,
        }
    }

    /// Appends a header.
    #[must_use]
    pub fn header(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.headers.push((name.into(), value.into()));
        self
    }

    /// Appends multiple headers.
    #[must_use]
    pub fn headers(mut self, headers: impl IntoIterator<Item = (String, String)>) -> Self {
        self.headers.extend(headers);
        self
    }

    /// Sets the request timeout.
    #[must_use]
    pub const fn timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }

    /// Builds the [`Request`].
    #[must_use]
    pub fn build(self) -> Request {
        Request {
            method: self.method,
            url: self.url,
            headers: self.headers,
            timeout: self.timeout,
        }
    }
}
