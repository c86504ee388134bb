//! Retry policy for lookup requests.
//!
//! Lookups make a single attempt unless [`LookupConfig::max_retries`] is set;
//! the policy below is only installed in that case.
//!
//! [`LookupConfig::max_retries`]: crate::LookupConfig::max_retries

use std::future;

use bytes::Bytes;
use tower::retry::Policy;

use crate::{Error, Request, Response};

/// Bounded retry policy.
///
/// Retries:
/// - connection errors and timeouts
/// - 5xx server errors
/// - 429 Too Many Requests
///
/// # Example
///
/// ```
/// use http_lookup::HyperClient;
/// use http_lookup::middleware::{RetryLayer, RetryPolicy};
///
/// let client = HyperClient::builder()
///     .layer(RetryLayer::new(RetryPolicy::new(2)))
///     .build();
/// # let _ = client;
/// ```
#[derive(Debug, Clone)]
pub struct RetryPolicy {
    remaining: u32,
}

impl RetryPolicy {
    /// Create a policy allowing `max_retries` extra attempts.
    #[must_use]
    pub const fn new(max_retries: u32) -> Self {
        Self {
            remaining: max_retries,
        }
    }

    /// Remaining retries.
    #[must_use]
    pub const fn remaining(&self) -> u32 {
        self.remaining
    }

    fn should_retry_response(response: &Response<Bytes>) -> bool {
        let status = response.status();
        response.is_server_error() || status == 429
    }

    fn should_retry_error(error: &Error) -> bool {
        error.is_connection() || error.is_timeout()
    }
}

impl Policy<Request, Response<Bytes>, Error> for RetryPolicy {
    type Future = future::Ready<()>;

    fn retry(
        &mut self,
        _req: &mut Request,
        result: &mut Result<Response<Bytes>, Error>,
    ) -> Option<Self::Future> {
        if self.remaining == 0 {
            return None;
        }

        let should_retry = match result {
            Ok(response) => Self::should_retry_response(response),
            Err(error) => Self::should_retry_error(error),
        };
        if !should_retry {
            return None;
        }

        self.remaining -= 1;
        tracing::debug!(remaining = self.remaining, "retrying lookup request");
        Some(future::ready(()))
    }

    fn clone_request(&mut self, req: &Request) -> Option<Request> {
        Some(req.clone())
    }
}
