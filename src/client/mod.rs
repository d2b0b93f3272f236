//! Client layer: owns configuration and transport, hands out resource services.

mod api;
#[cfg(test)]
pub(crate) mod fake;

use std::error::Error as StdError;
use std::sync::{Arc, OnceLock};
use std::time::Duration;

use serde_json::Value;

use crate::domain::{Config, ValidationError};
use crate::resources::{App, Credits, Url};
use crate::transport::{HttpTransport, Method, ReqwestTransport, TransportError};

pub use api::{ApiClient, RequestOptions};

/// Base URL of the public Branch API.
pub const DEFAULT_BASE_URL: &str = "https://api.branch.io";

#[derive(Debug, thiserror::Error)]
/// Failure answered by the Branch API with a JSON-typed error response.
#[error("API error {status_code}: {}", .errors.join("; "))]
pub struct ApiError {
    status_code: u16,
    errors: Vec<String>,
    raw_message: String,
    #[source]
    cause: TransportError,
}

impl ApiError {
    pub(crate) fn new(status_code: u16, errors: Vec<String>, cause: TransportError) -> Self {
        Self {
            status_code,
            errors,
            raw_message: cause.to_string(),
            cause,
        }
    }

    /// HTTP status code of the failed response.
    pub fn status_code(&self) -> u16 {
        self.status_code
    }

    /// `error.message` from the body (when present), then `"Not Found"` for 404s.
    pub fn errors(&self) -> &[String] {
        &self.errors
    }

    /// Message of the underlying transport failure.
    pub fn raw_message(&self) -> &str {
        &self.raw_message
    }

    pub fn cause(&self) -> &TransportError {
        &self.cause
    }
}

#[derive(Debug, thiserror::Error)]
/// Errors returned by [`BranchClient`] and its resource services.
///
/// Validation failures are raised before any request is sent.
pub enum BranchError {
    /// A parameter bag or credential was rejected locally.
    #[error("validation error: {0}")]
    Validation(#[from] ValidationError),

    /// The API answered with a JSON error response.
    #[error(transparent)]
    Api(#[from] ApiError),

    /// Any other transport failure (DNS, TLS, timeouts, non-JSON error bodies).
    #[error(transparent)]
    Transport(#[from] TransportError),

    /// Base URL and path did not form a valid URL.
    #[error("invalid request URL: {0}")]
    InvalidUrl(#[from] url::ParseError),

    /// Successful response body was not valid JSON.
    #[error("parse error: {0}")]
    Parse(#[source] Box<dyn StdError + Send + Sync>),
}

#[derive(Clone)]
/// Builder for [`BranchClient`].
///
/// Use this when you need to customize the base URL, timeout, user-agent or
/// the transport itself.
pub struct BranchClientBuilder {
    config: Config,
    base_url: String,
    timeout: Option<Duration>,
    user_agent: Option<String>,
    transport: Option<Arc<dyn HttpTransport>>,
}

impl BranchClientBuilder {
    pub fn new(config: Config) -> Self {
        Self {
            config,
            base_url: DEFAULT_BASE_URL.to_owned(),
            timeout: None,
            user_agent: None,
            transport: None,
        }
    }

    /// Override the API base URL (`https://api.branch.io` by default).
    pub fn base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into().trim_end_matches('/').to_owned();
        self
    }

    /// Set an HTTP client timeout applied to the entire request.
    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }

    /// Override the HTTP `User-Agent` header.
    pub fn user_agent(mut self, user_agent: impl Into<String>) -> Self {
        self.user_agent = Some(user_agent.into());
        self
    }

    /// Replace the default reqwest transport. Timeout and user-agent are then
    /// the transport's own business.
    pub fn transport(mut self, transport: Arc<dyn HttpTransport>) -> Self {
        self.transport = Some(transport);
        self
    }

    pub fn build(self) -> Result<BranchClient, BranchError> {
        let http = match self.transport {
            Some(transport) => transport,
            None => {
                let mut builder = reqwest::Client::builder();
                if let Some(timeout) = self.timeout {
                    builder = builder.timeout(timeout);
                }
                if let Some(user_agent) = self.user_agent {
                    builder = builder.user_agent(user_agent);
                }
                let client = builder.build().map_err(|err| {
                    TransportError::with_source("failed to build HTTP client", err)
                })?;
                Arc::new(ReqwestTransport { client })
            }
        };

        Ok(BranchClient::from_api(ApiClient::new(
            self.config,
            self.base_url,
            http,
        )))
    }
}

#[derive(Clone, Default)]
struct Services {
    app: OnceLock<App>,
    url: OnceLock<Url>,
    credits: OnceLock<Credits>,
}

#[derive(Clone)]
/// High-level Branch API client.
///
/// Resource services are created on first access and reused afterwards:
/// ```rust,no_run
/// # use branchio::{BranchClient, BranchKey, Config};
/// let client = BranchClient::new(Config::new(BranchKey::new("key_live_...")?));
/// assert!(std::ptr::eq(client.url(), client.url()));
/// # Ok::<(), branchio::ValidationError>(())
/// ```
pub struct BranchClient {
    api: Arc<ApiClient>,
    services: Services,
}

impl BranchClient {
    /// Create a client against the default base URL.
    ///
    /// For more customization, use [`BranchClient::builder`].
    pub fn new(config: Config) -> Self {
        Self::from_api(ApiClient::new(
            config,
            DEFAULT_BASE_URL.to_owned(),
            Arc::new(ReqwestTransport {
                client: reqwest::Client::new(),
            }),
        ))
    }

    pub fn builder(config: Config) -> BranchClientBuilder {
        BranchClientBuilder::new(config)
    }

    fn from_api(api: ApiClient) -> Self {
        Self {
            api: Arc::new(api),
            services: Services::default(),
        }
    }

    pub fn config(&self) -> &Config {
        self.api.config()
    }

    /// App configuration endpoints (`/v1/app`).
    pub fn app(&self) -> &App {
        self.services
            .app
            .get_or_init(|| App::new(Arc::clone(&self.api)))
    }

    /// Deep-linking URL endpoints (`/v1/url`).
    pub fn url(&self) -> &Url {
        self.services
            .url
            .get_or_init(|| Url::new(Arc::clone(&self.api)))
    }

    /// Credits ledger endpoints (`/v1/credits`).
    pub fn credits(&self) -> &Credits {
        self.services
            .credits
            .get_or_init(|| Credits::new(Arc::clone(&self.api)))
    }

    /// Send a custom request relative to the base URL.
    pub async fn request(
        &self,
        method: Method,
        path: &str,
        options: RequestOptions,
    ) -> Result<Value, BranchError> {
        self.api.request(method, path, options).await
    }
}
