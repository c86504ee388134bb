//! Prelude module for convenient imports.
//!
//! ```ignore
//! use http_lookup::prelude::*;
//! ```

pub use crate::{
    Decoder, Error, HttpClient, HyperClient, JsonDecoder, LookupArg, LookupConfig, LookupOutcome,
    PollingClient, Result,
};
pub use serde::Deserialize;
