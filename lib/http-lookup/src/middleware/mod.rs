//! Tower middleware layers for the lookup transport.
//!
//! Layers are added with [`HyperClientBuilder::layer`]; each added layer wraps
//! the service built so far, so the last one added sees requests first.
//!
//! - [`LoggingLayer`] - logs lookup exchanges using `tracing`
//! - [`RetryPolicy`] - bounded retry policy for [`RetryLayer`]
//!
//! [`HyperClientBuilder::layer`]: crate::HyperClientBuilder::layer

mod logging;
mod retry;

pub use logging::{LogLevel, Logging, LoggingLayer};
pub use retry::RetryPolicy;

pub use tower::retry::RetryLayer;
