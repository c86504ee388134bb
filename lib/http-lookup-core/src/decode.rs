//! Response body decoding.

use std::fmt;
use std::marker::PhantomData;

use serde::de::DeserializeOwned;

use crate::Result;

/// Turns a response body into at most one record.
///
/// Returning `Ok(None)` means the body holds no meaningful record; it is not
/// an error.
pub trait Decoder: Send + Sync {
    /// The decoded record type.
    type Record;

    /// Decode the raw response body.
    fn decode(&self, body: &[u8]) -> Result<Option<Self::Record>>;
}

/// JSON decoder backed by `serde`.
///
/// A JSON `null` body decodes to `None`.
///
/// # Example
///
/// ```
/// use http_lookup_core::{Decoder, JsonDecoder};
/// use serde::Deserialize;
///
/// #[derive(Debug, PartialEq, Deserialize)]
/// struct Item { id: u64 }
///
/// let decoder = JsonDecoder::<Item>::new();
/// assert_eq!(decoder.decode(br#"{"id":42}"#).unwrap(), Some(Item { id: 42 }));
/// assert_eq!(decoder.decode(b"null").unwrap(), None);
/// ```
pub struct JsonDecoder<T> {
    marker: PhantomData<fn() -> T>,
}

impl<T> JsonDecoder<T> {
    /// Create a new JSON decoder.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            marker: PhantomData,
        }
    }
}

impl<T> Default for JsonDecoder<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> Clone for JsonDecoder<T> {
    fn clone(&self) -> Self {
        Self::new()
    }
}

impl<T> fmt::Debug for JsonDecoder<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("JsonDecoder")
            .field("record", &std::any::type_name::<T>())
            .finish()
    }
}

impl<T: DeserializeOwned> Decoder for JsonDecoder<T> {
    type Record = T;

    fn decode(&self, body: &[u8]) -> Result<Option<T>> {
        from_json(body)
    }
}

/// Deserialize JSON bytes to a value with path-aware error messages.
///
/// Uses `serde_path_to_error` so the error names the field that failed
/// (e.g. `user.address.city`).
pub fn from_json<T: DeserializeOwned>(bytes: &[u8]) -> Result<T> {
    let mut deserializer = serde_json::Deserializer::from_slice(bytes);
    serde_path_to_error::deserialize(&mut deserializer).map_err(|e| {
        crate::Error::json_deserialization(e.path().to_string(), e.inner().to_string())
    })
}
