//! Request target construction.

use std::collections::BTreeMap;

use url::Url;

use crate::{Error, Result};

/// Build the request target from a URL template, path parameters and an
/// already-encoded query string.
///
/// Each `{name}` placeholder is replaced verbatim by its value in a single
/// pass over the template: values are not encoded again, and placeholders
/// inside values are not expanded. A non-empty query string is appended with
/// `?`, or with `&` when the template already carries a query (nothing is
/// added when the template ends with `?` or `&`).
///
/// # Errors
///
/// - [`Error::Configuration`] when a path parameter has no placeholder in the template
/// - [`Error::MalformedUri`] when the composed string holds a character not
///   allowed in a URI (space, `{`, `|`, non-ASCII, ...), including a
///   placeholder left without a value, or does not parse as an absolute URI
///
/// # Example
///
/// ```
/// use std::collections::BTreeMap;
/// use http_lookup_core::build_uri;
///
/// let params = BTreeMap::from([("id".to_string(), "42".to_string())]);
/// let uri = build_uri("https://api.example.com/users/{id}", &params, "lang=en").unwrap();
/// assert_eq!(uri.as_str(), "https://api.example.com/users/42?lang=en");
/// ```
pub fn build_uri(
    url_template: &str,
    path_params: &BTreeMap<String, String>,
    query_string: &str,
) -> Result<Url> {
    if let Some(name) = path_params
        .keys()
        .find(|name| !url_template.contains(&format!("{{{name}}}")))
    {
        return Err(Error::configuration(format!(
            "path parameter '{name}' has no {{{name}}} placeholder in URL '{url_template}'"
        )));
    }

    let mut target = substitute(url_template, path_params);
    if !query_string.is_empty() {
        if !target.contains('?') {
            target.push('?');
        } else if !target.ends_with(['?', '&']) {
            target.push('&');
        }
        target.push_str(query_string);
    }

    if let Some(illegal) = target.chars().find(|c| !is_uri_char(*c)) {
        return Err(Error::malformed_uri(
            target,
            format_args!("illegal character {illegal:?}"),
        ));
    }
    Url::parse(&target).map_err(|source| Error::malformed_uri(target, source))
}

/// Replace `{name}` placeholders that have a value; others are kept as-is.
fn substitute(url_template: &str, path_params: &BTreeMap<String, String>) -> String {
    let mut target = String::with_capacity(url_template.len());
    let mut rest = url_template;

    while let Some(start) = rest.find('{') {
        let (head, tail) = rest.split_at(start);
        target.push_str(head);

        let Some(end) = tail.find('}') else {
            rest = tail;
            break;
        };
        let (placeholder, after) = tail.split_at(end + 1);
        let value = placeholder
            .strip_prefix('{')
            .and_then(|p| p.strip_suffix('}'))
            .and_then(|name| path_params.get(name));
        target.push_str(value.map_or(placeholder, String::as_str));
        rest = after;
    }

    target.push_str(rest);
    target
}

/// Characters allowed in a URI: unreserved, reserved and `%` for escapes.
fn is_uri_char(c: char) -> bool {
    c.is_ascii_alphanumeric() || "-._~:/?#[]@!$&'()*+,;=%".contains(c)
}
