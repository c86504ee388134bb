//! HTTP transport trait.

use std::future::Future;

use bytes::Bytes;

use crate::{Request, Response, Result};

/// Core HTTP client trait.
///
/// Implementations execute one request and must be safe to share between
/// concurrent lookups: connection reuse is the implementation's business.
pub trait HttpClient: Send + Sync {
    /// Execute an HTTP request.
    ///
    /// `Ok(None)` means the exchange finished without producing a response
    /// object; callers treat it as an empty lookup, not as a failure.
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails for any reason:
    /// - Network errors
    /// - TLS errors
    /// - Timeouts
    /// - Invalid request
    fn execute(
        &self,
        request: Request,
    ) -> impl Future<Output = Result<Option<Response<Bytes>>>> + Send;
}

impl<C: HttpClient> HttpClient for std::sync::Arc<C> {
    fn execute(
        &self,
        request: Request,
    ) -> impl Future<Output = Result<Option<Response<Bytes>>>> + Send {
        (**self).execute(request)
    }
}
