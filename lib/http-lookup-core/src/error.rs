//! Error types for http-lookup.

use std::fmt;

use derive_more::{Display, Error};

/// Main error type for lookup operations.
///
/// Every fallible step of a lookup (configuration parsing, URI building,
/// transport, decoding) reports through this type. The polling client is the
/// only place where these errors are swallowed.
#[derive(Debug, Display, Error)]
pub enum Error {
    /// Invalid configuration (unparseable status rule, bad property value,
    /// path parameter without a matching placeholder).
    #[display("configuration error: {_0}")]
    Configuration(#[error(not(source))] String),

    /// The composed request target is not a valid URI.
    #[display("malformed URI '{uri}': {reason}")]
    MalformedUri {
        /// The rejected request target.
        uri: String,
        /// Why the target was rejected.
        reason: String,
    },

    /// Network/connection errors.
    #[display("connection error: {_0}")]
    Connection(#[error(not(source))] String),

    /// TLS/SSL errors.
    #[display("TLS error: {_0}")]
    Tls(#[error(not(source))] String),

    /// Request timeout.
    #[display("request timeout")]
    Timeout,

    /// The request could not be turned into an HTTP request.
    #[display("invalid request: {_0}")]
    InvalidRequest(#[error(not(source))] String),

    /// A decoder rejected the response body.
    #[display("decode error: {_0}")]
    Decode(#[error(not(source))] String),

    /// JSON deserialization error with path context.
    #[display("JSON deserialization error at '{path}': {message}")]
    JsonDeserialization {
        /// JSON path to the error (e.g., "user.address.city").
        path: String,
        /// Error message.
        message: String,
    },
}

/// Result type alias using [`crate::Error`].
pub type Result<T> = std::result::Result<T, Error>;

impl Error {
    /// Create a configuration error.
    #[must_use]
    pub fn configuration(message: impl Into<String>) -> Self {
        Self::Configuration(message.into())
    }

    /// Create a malformed URI error.
    #[must_use]
    pub fn malformed_uri(uri: impl Into<String>, reason: impl fmt::Display) -> Self {
        Self::MalformedUri {
            uri: uri.into(),
            reason: reason.to_string(),
        }
    }

    /// Create a connection error.
    #[must_use]
    pub fn connection(message: impl Into<String>) -> Self {
        Self::Connection(message.into())
    }

    /// Create a TLS error.
    #[must_use]
    pub fn tls(message: impl Into<String>) -> Self {
        Self::Tls(message.into())
    }

    /// Create an invalid request error.
    #[must_use]
    pub fn invalid_request(message: impl Into<String>) -> Self {
        Self::InvalidRequest(message.into())
    }

    /// Create a decode error.
    #[must_use]
    pub fn decode(message: impl Into<String>) -> Self {
        Self::Decode(message.into())
    }

    /// Create a JSON deserialization error with path context.
    #[must_use]
    pub fn json_deserialization(path: impl Into<String>, message: impl Into<String>) -> Self {
        Self::JsonDeserialization {
            path: path.into(),
            message: message.into(),
        }
    }

    /// Returns `true` if this is a timeout error.
    #[must_use]
    pub const fn is_timeout(&self) -> bool {
        matches!(self, Self::Timeout)
    }

    /// Returns `true` if this is a connection error.
    #[must_use]
    pub const fn is_connection(&self) -> bool {
        matches!(self, Self::Connection(_))
    }

    /// Returns `true` if this is a configuration error.
    #[must_use]
    pub const fn is_configuration(&self) -> bool {
        matches!(self, Self::Configuration(_))
    }

    /// Returns `true` if the body could not be decoded.
    #[must_use]
    pub const fn is_decode(&self) -> bool {
        matches!(self, Self::Decode(_) | Self::JsonDeserialization { .. })
    }
}
