//! Header preprocessing.
//!
//! Headers are configured as properties under a common prefix, e.g.
//! `lookup.header.Authorization = user:secret`. [`prepare_headers`] selects
//! them, strips the prefix and lets a [`HeaderPreprocessor`] resolve each raw
//! value into the value sent on the wire.

use std::collections::{BTreeMap, HashMap};
use std::fmt;

use base64::Engine;
use base64::engine::general_purpose::STANDARD;

/// Resolves configured header values.
pub trait HeaderPreprocessor: Send + Sync {
    /// Turn the configured value of header `name` into the value to send.
    fn preprocess_value(&self, name: &str, raw_value: &str) -> String;
}

/// Resolves the value of one specific header.
pub trait HeaderValuePreprocessor: Send + Sync {
    /// Turn a configured value into the value to send.
    fn preprocess(&self, raw_value: &str) -> String;
}

/// `Authorization` value preprocessor.
///
/// A raw `user:password` value becomes `Basic <base64>`. Values already
/// carrying a `Basic` or `Bearer` scheme are sent as-is, and so is every
/// value when raw mode is enabled.
#[derive(Debug, Clone, Copy, Default)]
pub struct BasicAuthHeaderValuePreprocessor {
    use_raw_value: bool,
}

impl BasicAuthHeaderValuePreprocessor {
    const SCHEMES: [&'static str; 2] = ["basic ", "bearer "];

    /// Create a preprocessor encoding raw credentials.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            use_raw_value: false,
        }
    }

    /// Create a preprocessor that never rewrites the value.
    #[must_use]
    pub const fn raw() -> Self {
        Self {
            use_raw_value: true,
        }
    }

    fn has_scheme(value: &str) -> bool {
        Self::SCHEMES.iter().any(|scheme| {
            value
                .get(..scheme.len())
                .is_some_and(|prefix| prefix.eq_ignore_ascii_case(scheme))
        })
    }
}

impl HeaderValuePreprocessor for BasicAuthHeaderValuePreprocessor {
    fn preprocess(&self, raw_value: &str) -> String {
        if self.use_raw_value || Self::has_scheme(raw_value) {
            return raw_value.to_string();
        }
        format!("Basic {}", STANDARD.encode(raw_value))
    }
}

/// Dispatches to a [`HeaderValuePreprocessor`] by header name.
///
/// Names are matched case-insensitively; headers without a registered
/// preprocessor keep their configured value.
#[derive(Default)]
pub struct ComposeHeaderPreprocessor {
    preprocessors: HashMap<String, Box<dyn HeaderValuePreprocessor>>,
}

impl fmt::Debug for ComposeHeaderPreprocessor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut names = self.preprocessors.keys().collect::<Vec<_>>();
        names.sort();
        f.debug_struct("ComposeHeaderPreprocessor")
            .field("headers", &names)
            .finish()
    }
}

impl ComposeHeaderPreprocessor {
    /// Create an empty preprocessor (every value passes through).
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Create the default preprocessor: `Authorization` values are basic-auth
    /// encoded, or passed through untouched when `use_raw_auth_header` is set.
    #[must_use]
    pub fn with_defaults(use_raw_auth_header: bool) -> Self {
        let auth = if use_raw_auth_header {
            BasicAuthHeaderValuePreprocessor::raw()
        } else {
            BasicAuthHeaderValuePreprocessor::new()
        };
        Self::new().with("Authorization", auth)
    }

    /// Register a value preprocessor for a header.
    #[must_use]
    pub fn with(
        mut self,
        name: &str,
        preprocessor: impl HeaderValuePreprocessor + 'static,
    ) -> Self {
        self.preprocessors
            .insert(name.to_ascii_lowercase(), Box::new(preprocessor));
        self
    }
}

impl HeaderPreprocessor for ComposeHeaderPreprocessor {
    fn preprocess_value(&self, name: &str, raw_value: &str) -> String {
        self.preprocessors
            .get(&name.to_ascii_lowercase())
            .map_or_else(|| raw_value.to_string(), |p| p.preprocess(raw_value))
    }
}

/// Select the headers configured under `prefix` and resolve their values.
///
/// The header name is the property key without the prefix; keys equal to the
/// prefix are ignored. Pairs are ordered by property key.
#[must_use]
pub fn prepare_headers(
    prefix: &str,
    properties: &BTreeMap<String, String>,
    preprocessor: &dyn HeaderPreprocessor,
) -> Vec<(String, String)> {
    properties
        .iter()
        .filter_map(|(key, value)| {
            let name = key.strip_prefix(prefix)?;
            (!name.is_empty()).then(|| {
                let value = preprocessor.preprocess_value(name, value);
                (name.to_string(), value)
            })
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use assert2::check;

    use super::*;

    const PREFIX: &str = "lookup.header.";

    #[test]
    fn basic_auth_encodes_credentials() {
        let preprocessor = BasicAuthHeaderValuePreprocessor::new();

        check!(preprocessor.preprocess("user:pass") == "Basic dXNlcjpwYXNz");
    }

    #[test]
    fn basic_auth_keeps_existing_scheme() {
        let preprocessor = BasicAuthHeaderValuePreprocessor::new();

        check!(preprocessor.preprocess("Basic dXNlcjpwYXNz") == "Basic dXNlcjpwYXNz");
        check!(preprocessor.preprocess("bearer abc.def") == "bearer abc.def");
    }

    #[test]
    fn basic_auth_raw_mode() {
        let preprocessor = BasicAuthHeaderValuePreprocessor::raw();

        check!(preprocessor.preprocess("user:pass") == "user:pass");
    }

    #[test]
    fn compose_dispatches_case_insensitively() {
        let preprocessor = ComposeHeaderPreprocessor::with_defaults(false);

        check!(preprocessor.preprocess_value("authorization", "user:pass") == "Basic dXNlcjpwYXNz");
        check!(preprocessor.preprocess_value("X-Trace", "user:pass") == "user:pass");
    }

    #[test]
    fn compose_custom_preprocessor() {
        struct Upper;

        impl HeaderValuePreprocessor for Upper {
            fn preprocess(&self, raw_value: &str) -> String {
                raw_value.to_uppercase()
            }
        }

        let preprocessor = ComposeHeaderPreprocessor::new().with("X-Tenant", Upper);

        check!(preprocessor.preprocess_value("x-tenant", "acme") == "ACME");
        check!(format!("{preprocessor:?}").contains("x-tenant"));
    }

    #[test]
    fn prepare_headers_selects_prefixed_properties() {
        let properties = BTreeMap::from([
            (format!("{PREFIX}Content-Type"), "application/json".to_string()),
            (format!("{PREFIX}Authorization"), "user:pass".to_string()),
            ("lookup.success-codes".to_string(), "2XX".to_string()),
            (PREFIX.to_string(), "ignored".to_string()),
        ]);

        let headers = prepare_headers(
            PREFIX,
            &properties,
            &ComposeHeaderPreprocessor::with_defaults(false),
        );

        check!(
            headers
                == vec![
                    ("Authorization".to_string(), "Basic dXNlcjpwYXNz".to_string()),
                    ("Content-Type".to_string(), "application/json".to_string()),
                ]
        );
    }

    #[test]
    fn prepare_headers_empty() {
        let properties = BTreeMap::from([("lookup.error-codes".to_string(), "5XX".to_string())]);

        let headers = prepare_headers(PREFIX, &properties, &ComposeHeaderPreprocessor::new());

        check!(headers.is_empty());
    }
}
