//! Prelude module for convenient imports.
//!
//! ```ignore
//! use http_lookup_core::prelude::*;
//! ```

pub use crate::{
    Decoder, Error, GetQueryCreator, HeaderPreprocessor, HttpClient, JsonDecoder, LookupArg,
    LookupQueryCreator, LookupQueryInfo, Request, Response, Result, StatusCodeChecker,
};
