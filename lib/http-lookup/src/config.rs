//! Client and lookup configuration types.

use std::collections::BTreeMap;
use std::str::FromStr;
use std::time::Duration;

use http_lookup_core::{Error, HeaderPreprocessor, Result, StatusCodeChecker, prepare_headers};

/// Property keys understood by [`LookupConfig`].
pub mod keys {
    /// Prefix of header properties: `lookup.header.<Header-Name> = <value>`.
    pub const HEADER_PREFIX: &str = "lookup.header.";
    /// Comma-separated status rules treated as success (allow list).
    pub const SUCCESS_CODES: &str = "lookup.success-codes";
    /// Comma-separated status rules treated as errors (error list).
    pub const ERROR_CODES: &str = "lookup.error-codes";
    /// Send the configured `Authorization` value untouched (`true`/`false`).
    pub const USE_RAW_AUTH_HEADER: &str = "lookup.use-raw-authorization-header";
    /// Request timeout in seconds.
    pub const REQUEST_TIMEOUT: &str = "lookup.request-timeout";
    /// Number of retries on 5xx, 429, connection errors and timeouts.
    pub const MAX_RETRIES: &str = "lookup.max-retries";
}

/// Default lookup request timeout.
pub const DEFAULT_REQUEST_TIMEOUT: Duration = Duration::from_secs(120);

/// Configuration for the HTTP transport.
#[derive(Debug, Clone)]
pub struct ClientConfig {
    /// Default request timeout, used when a request carries none.
    pub timeout: Duration,
    /// Connection timeout duration.
    pub connect_timeout: Duration,
    /// Maximum idle connections per host.
    pub pool_idle_per_host: usize,
    /// Idle connection timeout.
    pub pool_idle_timeout: Duration,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            timeout: DEFAULT_REQUEST_TIMEOUT,
            connect_timeout: Duration::from_secs(10),
            pool_idle_per_host: 32,
            pool_idle_timeout: Duration::from_secs(90),
        }
    }
}

impl ClientConfig {
    /// Create a new configuration builder.
    #[must_use]
    pub fn builder() -> ClientConfigBuilder {
        ClientConfigBuilder::default()
    }
}

/// Builder for [`ClientConfig`].
#[derive(Debug, Clone, Default)]
pub struct ClientConfigBuilder {
    timeout: Option<Duration>,
    connect_timeout: Option<Duration>,
    pool_idle_per_host: Option<usize>,
    pool_idle_timeout: Option<Duration>,
}

impl ClientConfigBuilder {
    /// Set the default request timeout.
    #[must_use]
    pub const fn timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }

    /// Set the connection timeout.
    #[must_use]
    pub const fn connect_timeout(mut self, timeout: Duration) -> Self {
        self.connect_timeout = Some(timeout);
        self
    }

    /// Set the maximum idle connections per host.
    #[must_use]
    pub const fn pool_idle_per_host(mut self, count: usize) -> Self {
        self.pool_idle_per_host = Some(count);
        self
    }

    /// Set the idle connection timeout.
    #[must_use]
    pub const fn pool_idle_timeout(mut self, timeout: Duration) -> Self {
        self.pool_idle_timeout = Some(timeout);
        self
    }

    /// Build the configuration.
    #[must_use]
    pub fn build(self) -> ClientConfig {
        let defaults = ClientConfig::default();
        ClientConfig {
            timeout: self.timeout.unwrap_or(defaults.timeout),
            connect_timeout: self.connect_timeout.unwrap_or(defaults.connect_timeout),
            pool_idle_per_host: self
                .pool_idle_per_host
                .unwrap_or(defaults.pool_idle_per_host),
            pool_idle_timeout: self.pool_idle_timeout.unwrap_or(defaults.pool_idle_timeout),
        }
    }
}

/// Configuration of a lookup source.
///
/// Holds the URL template and the raw connector properties. Typed settings
/// (timeout, retries, raw authorization header) are read from the properties
/// unless set explicitly on the builder.
///
/// # Example
///
/// ```
/// use std::time::Duration;
/// use http_lookup::{LookupConfig, config::keys};
///
/// let config = LookupConfig::builder("https://api.example.com/users/{id}")
///     .property(keys::SUCCESS_CODES, "2XX")
///     .property(keys::REQUEST_TIMEOUT, "30")
///     .build()
///     .unwrap();
///
/// assert_eq!(config.request_timeout(), Duration::from_secs(30));
/// assert_eq!(config.max_retries(), 0);
/// ```
#[derive(Debug, Clone)]
pub struct LookupConfig {
    url: String,
    properties: BTreeMap<String, String>,
    request_timeout: Duration,
    max_retries: u32,
    use_raw_auth_header: bool,
}

impl LookupConfig {
    /// Create a new configuration builder for the given URL template.
    #[must_use]
    pub fn builder(url: impl Into<String>) -> LookupConfigBuilder {
        LookupConfigBuilder::new(url)
    }

    /// Create a configuration from a URL template and a property map.
    pub fn from_properties(
        url: impl Into<String>,
        properties: impl IntoIterator<Item = (String, String)>,
    ) -> Result<Self> {
        Self::builder(url).properties(properties).build()
    }

    /// URL template, possibly containing `{name}` placeholders.
    #[must_use]
    pub fn url(&self) -> &str {
        &self.url
    }

    /// Raw connector properties.
    #[must_use]
    pub fn properties(&self) -> &BTreeMap<String, String> {
        &self.properties
    }

    /// Timeout applied to every lookup request.
    #[must_use]
    pub const fn request_timeout(&self) -> Duration {
        self.request_timeout
    }

    /// Number of retries; `0` means a single attempt.
    #[must_use]
    pub const fn max_retries(&self) -> u32 {
        self.max_retries
    }

    /// Whether the `Authorization` header is sent as configured.
    #[must_use]
    pub const fn use_raw_auth_header(&self) -> bool {
        self.use_raw_auth_header
    }

    /// Parse the status code policy from the properties.
    pub fn status_code_checker(&self) -> Result<StatusCodeChecker> {
        StatusCodeChecker::from_properties(&self.properties, keys::SUCCESS_CODES, keys::ERROR_CODES)
    }

    /// Resolve the configured headers.
    #[must_use]
    pub fn headers(&self, preprocessor: &dyn HeaderPreprocessor) -> Vec<(String, String)> {
        prepare_headers(keys::HEADER_PREFIX, &self.properties, preprocessor)
    }
}

/// Builder for [`LookupConfig`].
#[derive(Debug, Clone)]
pub struct LookupConfigBuilder {
    url: String,
    properties: BTreeMap<String, String>,
    request_timeout: Option<Duration>,
    max_retries: Option<u32>,
    use_raw_auth_header: Option<bool>,
}

impl LookupConfigBuilder {
    /// Create a builder for the given URL template.
    #[must_use]
    pub fn new(url: impl Into<String>) -> Self {
        Self {
            url: url.into(),
            properties: BTreeMap::new(),
            request_timeout: None,
            max_retries: None,
            use_raw_auth_header: None,
        }
    }

    /// Set one property.
    #[must_use]
    pub fn property(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.properties.insert(key.into(), value.into());
        self
    }

    /// Set several properties.
    #[must_use]
    pub fn properties(mut self, properties: impl IntoIterator<Item = (String, String)>) -> Self {
        self.properties.extend(properties);
        self
    }

    /// Add a header (shortcut for a `lookup.header.` property).
    #[must_use]
    pub fn header(self, name: &str, value: impl Into<String>) -> Self {
        self.property(format!("{}{name}", keys::HEADER_PREFIX), value)
    }

    /// Set the request timeout.
    #[must_use]
    pub const fn request_timeout(mut self, timeout: Duration) -> Self {
        self.request_timeout = Some(timeout);
        self
    }

    /// Set the number of retries.
    #[must_use]
    pub const fn max_retries(mut self, retries: u32) -> Self {
        self.max_retries = Some(retries);
        self
    }

    /// Send the `Authorization` header as configured.
    #[must_use]
    pub const fn use_raw_auth_header(mut self, raw: bool) -> Self {
        self.use_raw_auth_header = Some(raw);
        self
    }

    /// Build the configuration.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Configuration`] when a typed property cannot be parsed.
    pub fn build(self) -> Result<LookupConfig> {
        let request_timeout = match self.request_timeout {
            Some(timeout) => timeout,
            None => parse_property::<u64>(&self.properties, keys::REQUEST_TIMEOUT)?
                .map_or(DEFAULT_REQUEST_TIMEOUT, Duration::from_secs),
        };
        let max_retries = match self.max_retries {
            Some(retries) => retries,
            None => parse_property(&self.properties, keys::MAX_RETRIES)?.unwrap_or_default(),
        };
        let use_raw_auth_header = match self.use_raw_auth_header {
            Some(raw) => raw,
            None => parse_property(&self.properties, keys::USE_RAW_AUTH_HEADER)?
                .unwrap_or_default(),
        };

        Ok(LookupConfig {
            url: self.url,
            properties: self.properties,
            request_timeout,
            max_retries,
            use_raw_auth_header,
        })
    }
}

fn parse_property<T>(properties: &BTreeMap<String, String>, key: &str) -> Result<Option<T>>
where
    T: FromStr,
    T::Err: std::fmt::Display,
{
    properties
        .get(key)
        .map(|value| {
            value.trim().parse().map_err(|err| {
                Error::configuration(format!("property '{key}' has invalid value '{value}': {err}"))
            })
        })
        .transpose()
}

#[cfg(test)]
mod tests {
    use assert2::{check, let_assert};
    use http_lookup_core::ComposeHeaderPreprocessor;

    use super::*;

    #[test]
    fn default_client_config() {
        let config = ClientConfig::default();
        assert_eq!(config.timeout, Duration::from_secs(120));
        assert_eq!(config.connect_timeout, Duration::from_secs(10));
        assert_eq!(config.pool_idle_per_host, 32);
    }

    #[test]
    fn client_builder_overrides() {
        let config = ClientConfig::builder()
            .timeout(Duration::from_secs(60))
            .connect_timeout(Duration::from_secs(5))
            .pool_idle_per_host(16)
            .build();

        assert_eq!(config.timeout, Duration::from_secs(60));
        assert_eq!(config.connect_timeout, Duration::from_secs(5));
        assert_eq!(config.pool_idle_per_host, 16);
    }

    #[test]
    fn lookup_config_defaults() {
        let config = LookupConfig::builder("http://host/items")
            .build()
            .expect("valid config");

        check!(config.url() == "http://host/items");
        check!(config.request_timeout() == DEFAULT_REQUEST_TIMEOUT);
        check!(config.max_retries() == 0);
        check!(!config.use_raw_auth_header());
        check!(config.properties().is_empty());
    }

    #[test]
    fn lookup_config_reads_typed_properties() {
        let config = LookupConfig::from_properties(
            "http://host/items",
            [
                (keys::REQUEST_TIMEOUT.to_string(), " 5 ".to_string()),
                (keys::MAX_RETRIES.to_string(), "2".to_string()),
                (keys::USE_RAW_AUTH_HEADER.to_string(), "true".to_string()),
            ],
        )
        .expect("valid config");

        check!(config.request_timeout() == Duration::from_secs(5));
        check!(config.max_retries() == 2);
        check!(config.use_raw_auth_header());
    }

    #[test]
    fn explicit_settings_win_over_properties() {
        let config = LookupConfig::builder("http://host/items")
            .property(keys::REQUEST_TIMEOUT, "5")
            .request_timeout(Duration::from_millis(250))
            .property(keys::MAX_RETRIES, "not a number")
            .max_retries(1)
            .build()
            .expect("valid config");

        check!(config.request_timeout() == Duration::from_millis(250));
        check!(config.max_retries() == 1);
    }

    #[test]
    fn invalid_typed_property() {
        let result = LookupConfig::builder("http://host/items")
            .property(keys::REQUEST_TIMEOUT, "two minutes")
            .build();

        let_assert!(Err(Error::Configuration(message)) = result);
        insta::assert_snapshot!(
            message,
            @"property 'lookup.request-timeout' has invalid value 'two minutes': invalid digit found in string"
        );
    }

    #[test]
    fn status_code_checker_from_properties() {
        let config = LookupConfig::builder("http://host/items")
            .property(keys::SUCCESS_CODES, "2XX")
            .property(keys::ERROR_CODES, "5XX")
            .build()
            .expect("valid config");

        let checker = config.status_code_checker().expect("valid rules");
        check!(!checker.is_error_code(200));
        check!(checker.is_error_code(404));
        check!(checker.is_error_code(503));
    }

    #[test]
    fn headers_from_properties() {
        let config = LookupConfig::builder("http://host/items")
            .header("Authorization", "user:pass")
            .header("Accept", "application/json")
            .build()
            .expect("valid config");

        let headers = config.headers(&ComposeHeaderPreprocessor::with_defaults(false));
        check!(
            headers
                == vec![
                    ("Accept".to_string(), "application/json".to_string()),
                    ("Authorization".to_string(), "Basic dXNlcjpwYXNz".to_string()),
                ]
        );
    }
}
