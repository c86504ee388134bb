//! Lookup orchestration: query, request, status policy and decoding.

use std::fmt;
use std::sync::Arc;
use std::time::Duration;

use http_lookup_core::{
    ComposeHeaderPreprocessor, Decoder, Error, GetQueryCreator, HeaderPreprocessor, HttpClient,
    LookupArg, LookupQueryCreator, Request, Result, StatusCodeChecker,
};
use tracing::{debug, error, trace, warn};

use crate::{HyperClient, HyperClientBuilder, LookupConfig};

/// Result of one lookup, before projection to `Option`.
#[derive(Debug)]
pub enum LookupOutcome<T> {
    /// The body decoded to a record.
    Found(T),
    /// The body was accepted but the decoder produced no record.
    Empty,
    /// The status is an error code, or the body is blank.
    Rejected {
        /// Response status code.
        status: u16,
        /// Response body, invalid UTF-8 replaced.
        body: String,
    },
    /// The transport finished without a response.
    NoResponse,
    /// The lookup failed before a decision could be made.
    Failed(Error),
}

impl<T> LookupOutcome<T> {
    /// The record, if any.
    pub fn into_option(self) -> Option<T> {
        match self {
            Self::Found(record) => Some(record),
            Self::Empty | Self::Rejected { .. } | Self::NoResponse | Self::Failed(_) => None,
        }
    }

    /// `true` for [`LookupOutcome::Found`].
    pub const fn is_found(&self) -> bool {
        matches!(self, Self::Found(_))
    }

    /// `true` for [`LookupOutcome::Failed`].
    pub const fn is_failed(&self) -> bool {
        matches!(self, Self::Failed(_))
    }
}

/// On-demand lookup client.
///
/// Turns lookup arguments into a GET request, sends it with the configured
/// headers and timeout, and decodes accepted responses into one record.
///
/// # Example
///
/// ```no_run
/// use http_lookup::{JsonDecoder, LookupArg, LookupConfig, PollingClient};
///
/// # async fn run() -> http_lookup::Result<()> {
/// let config = LookupConfig::builder("https://api.example.com/users/{id}")
///     .property("lookup.success-codes", "2XX")
///     .build()?;
/// let client = PollingClient::from_config(&config, JsonDecoder::<serde_json::Value>::new())?;
///
/// let user = client.pull(&[LookupArg::new("id", "42")]).await;
/// # let _ = user;
/// # Ok(())
/// # }
/// ```
pub struct PollingClient<C, D> {
    client: C,
    decoder: D,
    query_creator: Arc<dyn LookupQueryCreator>,
    status_checker: StatusCodeChecker,
    url_template: String,
    headers: Vec<(String, String)>,
    request_timeout: Duration,
}

impl<C, D> fmt::Debug for PollingClient<C, D> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("PollingClient")
            .field("url_template", &self.url_template)
            .field("status_checker", &self.status_checker)
            .field("header_count", &self.headers.len())
            .field("request_timeout", &self.request_timeout)
            .finish_non_exhaustive()
    }
}

impl<D> PollingClient<HyperClient, D>
where
    D: Decoder,
{
    /// Create a lookup client with its own [`HyperClient`] transport.
    ///
    /// The transport gets the configured timeout, the logging layer, and a
    /// retry layer when [`LookupConfig::max_retries`] is above zero.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Configuration`] when the status rules cannot be parsed.
    pub fn from_config(config: &LookupConfig, decoder: D) -> Result<Self> {
        let client = transport(config).build();
        Self::new(client, decoder, config)
    }
}

fn transport(config: &LookupConfig) -> HyperClientBuilder {
    HyperClient::builder()
        .timeout(config.request_timeout())
        .with_retry(config.max_retries())
        .with_logging()
}

impl<C, D> PollingClient<C, D>
where
    C: HttpClient,
    D: Decoder,
{
    /// Create a lookup client using GET query creation and the default
    /// header preprocessing.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Configuration`] when the status rules cannot be parsed.
    pub fn new(client: C, decoder: D, config: &LookupConfig) -> Result<Self> {
        let header_preprocessor =
            ComposeHeaderPreprocessor::with_defaults(config.use_raw_auth_header());
        Self::with_parts(
            client,
            decoder,
            config,
            GetQueryCreator::new(config.url()),
            &header_preprocessor,
        )
    }

    /// Create a lookup client with a custom query creator and header
    /// preprocessor.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Configuration`] when the status rules cannot be parsed.
    pub fn with_parts(
        client: C,
        decoder: D,
        config: &LookupConfig,
        query_creator: impl LookupQueryCreator + 'static,
        header_preprocessor: &dyn HeaderPreprocessor,
    ) -> Result<Self> {
        let status_checker = config.status_code_checker()?;
        let headers = config.headers(header_preprocessor);

        Ok(Self {
            client,
            decoder,
            query_creator: Arc::new(query_creator),
            status_checker,
            url_template: config.url().to_string(),
            headers,
            request_timeout: config.request_timeout(),
        })
    }

    /// Headers sent with every lookup request.
    #[must_use]
    pub fn headers(&self) -> &[(String, String)] {
        &self.headers
    }

    /// Status code policy.
    #[must_use]
    pub const fn status_checker(&self) -> &StatusCodeChecker {
        &self.status_checker
    }

    /// Timeout applied to every lookup request.
    #[must_use]
    pub const fn request_timeout(&self) -> Duration {
        self.request_timeout
    }

    /// Look up the record matching `args`.
    ///
    /// Every failure is logged and reported as `None`.
    pub async fn pull(&self, args: &[LookupArg]) -> Option<D::Record> {
        self.pull_outcome(args).await.into_option()
    }

    /// Look up the record matching `args`, keeping the reason of a miss.
    pub async fn pull_outcome(&self, args: &[LookupArg]) -> LookupOutcome<D::Record> {
        let request = match self.prepare_request(args) {
            Ok(request) => request,
            Err(err) => {
                error!(
                    url_template = %self.url_template,
                    error = %err,
                    "failed to build lookup request"
                );
                return LookupOutcome::Failed(err);
            }
        };

        let uri = request.url().to_string();
        match self.send(request, &uri).await {
            Ok(outcome) => outcome,
            Err(err) => {
                error!(%uri, error = %err, "lookup failed");
                LookupOutcome::Failed(err)
            }
        }
    }

    fn prepare_request(&self, args: &[LookupArg]) -> Result<Request> {
        let query = self.query_creator.create_lookup_query(args);
        let url = query.to_uri(&self.url_template)?;

        let request = Request::get(url)
            .headers(self.headers.iter().cloned())
            .timeout(self.request_timeout)
            .build();
        Ok(request)
    }

    async fn send(&self, request: Request, uri: &str) -> Result<LookupOutcome<D::Record>> {
        let Some(response) = self.client.execute(request).await? else {
            warn!(%uri, "lookup returned no response");
            return Ok(LookupOutcome::NoResponse);
        };

        let status = response.status();
        debug!(%uri, status, "lookup response received");
        trace!(%uri, body = %response.text_lossy(), "lookup response body");

        if response.is_blank() || self.status_checker.is_error_code(status) {
            let body = response.text_lossy().into_owned();
            warn!(%uri, status, %body, "lookup response rejected");
            return Ok(LookupOutcome::Rejected { status, body });
        }

        let outcome = match self.decoder.decode(response.body())? {
            Some(record) => LookupOutcome::Found(record),
            None => LookupOutcome::Empty,
        };
        Ok(outcome)
    }
}
