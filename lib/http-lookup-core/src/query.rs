//! Lookup query construction.
//!
//! A [`LookupQueryCreator`] turns the ordered lookup arguments of one call
//! into a [`LookupQueryInfo`]. [`GetQueryCreator`] is the GET flavour: every
//! argument goes to the query string, and arguments named by a `{name}`
//! placeholder of the URL template are also recorded as path parameters.

use std::collections::BTreeMap;

use url::form_urlencoded;

use crate::{LookupArg, LookupQueryInfo};

/// Builds the query descriptor for one lookup.
pub trait LookupQueryCreator: Send + Sync {
    /// Create the query for the given arguments.
    fn create_lookup_query(&self, args: &[LookupArg]) -> LookupQueryInfo;
}

/// Query creator producing `name1=value1&name2=value2` for GET lookups.
///
/// # Example
///
/// ```
/// use http_lookup_core::{GetQueryCreator, LookupArg, LookupQueryCreator};
///
/// let creator = GetQueryCreator::new("http://host/users/{id}");
/// let info = creator.create_lookup_query(&[
///     LookupArg::new("id", "42"),
///     LookupArg::new("name", "Jane Doe"),
/// ]);
///
/// assert_eq!(info.query_string(), "id=42&name=Jane+Doe");
/// assert_eq!(info.path_params().get("id").map(String::as_str), Some("42"));
/// ```
#[derive(Debug, Clone)]
pub struct GetQueryCreator {
    url_template: String,
}

impl GetQueryCreator {
    /// Create a query creator for the given URL template.
    #[must_use]
    pub fn new(url_template: impl Into<String>) -> Self {
        Self {
            url_template: url_template.into(),
        }
    }

    /// The URL template used to detect path parameters.
    #[must_use]
    pub fn url_template(&self) -> &str {
        &self.url_template
    }

    fn has_placeholder(&self, name: &str) -> bool {
        self.url_template.contains(&format!("{{{name}}}"))
    }
}

impl LookupQueryCreator for GetQueryCreator {
    fn create_lookup_query(&self, args: &[LookupArg]) -> LookupQueryInfo {
        let path_params = args
            .iter()
            .filter(|arg| self.has_placeholder(arg.arg_name()))
            .map(|arg| (arg.arg_name().to_string(), arg.arg_value().to_string()))
            .collect::<BTreeMap<_, _>>();

        // Path parameters are sent in the query string too.
        let query_string = form_urlencoded::Serializer::new(String::new())
            .extend_pairs(args.iter().map(|arg| (arg.arg_name(), arg.arg_value())))
            .finish();

        LookupQueryInfo::new(query_string, None, path_params)
    }
}
