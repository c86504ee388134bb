//! Lookup arguments and the query descriptor built from them.

use std::collections::BTreeMap;
use std::fmt;

/// One resolved value extracted from an incoming lookup key.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct LookupArg {
    arg_name: String,
    arg_value: String,
}

impl LookupArg {
    /// Create a new lookup argument.
    #[must_use]
    pub fn new(arg_name: impl Into<String>, arg_value: impl Into<String>) -> Self {
        Self {
            arg_name: arg_name.into(),
            arg_value: arg_value.into(),
        }
    }

    /// Argument name, matched against `{name}` placeholders.
    #[must_use]
    pub fn arg_name(&self) -> &str {
        &self.arg_name
    }

    /// Raw argument value.
    #[must_use]
    pub fn arg_value(&self) -> &str {
        &self.arg_value
    }
}

impl<K, V> From<(K, V)> for LookupArg
where
    K: Into<String>,
    V: Into<String>,
{
    fn from((name, value): (K, V)) -> Self {
        Self::new(name, value)
    }
}

impl fmt::Display for LookupArg {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}={}", self.arg_name, self.arg_value)
    }
}

/// Structured result of query construction.
///
/// `path_params` holds the arguments whose names appear as `{name}` in the
/// URL template, with raw values. `query_string` is already form-encoded.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LookupQueryInfo {
    query_string: String,
    body: Option<String>,
    path_params: BTreeMap<String, String>,
}

impl LookupQueryInfo {
    /// Create a new query descriptor.
    #[must_use]
    pub fn new(
        query_string: impl Into<String>,
        body: Option<String>,
        path_params: BTreeMap<String, String>,
    ) -> Self {
        Self {
            query_string: query_string.into(),
            body,
            path_params,
        }
    }

    /// Encoded query string, without the leading `?`.
    #[must_use]
    pub fn query_string(&self) -> &str {
        &self.query_string
    }

    /// Request body (always `None` for GET lookups).
    #[must_use]
    pub fn body(&self) -> Option<&str> {
        self.body.as_deref()
    }

    /// Path placeholder name to raw value.
    #[must_use]
    pub fn path_params(&self) -> &BTreeMap<String, String> {
        &self.path_params
    }

    /// Build the request target for `url_template`.
    ///
    /// See [`crate::build_uri`].
    pub fn to_uri(&self, url_template: &str) -> crate::Result<url::Url> {
        crate::build_uri(url_template, &self.path_params, &self.query_string)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn lookup_arg_from_tuple() {
        let arg = LookupArg::from(("id", "42"));
        assert_eq!(arg.arg_name(), "id");
        assert_eq!(arg.arg_value(), "42");
        assert_eq!(arg.to_string(), "id=42");
    }

    #[test]
    fn query_info_to_uri() {
        let mut path_params = BTreeMap::new();
        path_params.insert("id".to_string(), "42".to_string());
        let info = LookupQueryInfo::new("id=42", None, path_params);

        let uri = info
            .to_uri("http://host/items/{id}")
            .expect("valid uri");
        assert_eq!(uri.as_str(), "http://host/items/42?id=42");
        assert!(info.body().is_none());
    }
}
