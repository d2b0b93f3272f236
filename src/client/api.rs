use std::sync::Arc;

use serde_json::Value;

use crate::client::{ApiError, BranchError};
use crate::domain::Config;
use crate::transport::{HttpRequest, HttpTransport, Method, TransportError, decode_error_messages};

/// Query string and JSON body of a single API call.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RequestOptions {
    pub query: Vec<(String, String)>,
    pub json: Option<Value>,
}

impl RequestOptions {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn query(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.query.push((key.into(), value.into()));
        self
    }

    pub fn json(mut self, body: impl Into<Value>) -> Self {
        self.json = Some(body.into());
        self
    }
}

/// Request dispatcher shared by every resource service.
///
/// Resolves paths against the base URL, attaches JSON headers, and turns
/// JSON-typed failure responses into [`ApiError`].
#[derive(Clone)]
pub struct ApiClient {
    config: Config,
    base_url: String,
    http: Arc<dyn HttpTransport>,
}

impl ApiClient {
    pub(crate) fn new(config: Config, base_url: String, http: Arc<dyn HttpTransport>) -> Self {
        Self {
            config,
            base_url,
            http,
        }
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Execute `method path` and return the decoded JSON body.
    ///
    /// Errors:
    /// - [`BranchError::Api`] when the server fails with a JSON-typed response,
    /// - [`BranchError::Transport`] for every other transport failure, unchanged,
    /// - [`BranchError::Parse`] when a successful body is not JSON.
    pub async fn request(
        &self,
        method: Method,
        path: &str,
        options: RequestOptions,
    ) -> Result<Value, BranchError> {
        let url = self.resolve(path, &options.query)?;
        tracing::debug!(%method, path, "sending Branch API request");

        let request = HttpRequest {
            method,
            url,
            headers: vec![
                ("Content-Type".to_owned(), "application/json".to_owned()),
                ("Accept".to_owned(), "application/json".to_owned()),
            ],
            body: options.json,
        };

        match self.http.send(request).await {
            Ok(response) => {
                tracing::debug!(status = response.status, path, "Branch API responded");
                decode_body(&response.body)
            }
            Err(err) => Err(map_failure(err)),
        }
    }

    fn resolve(&self, path: &str, query: &[(String, String)]) -> Result<String, BranchError> {
        let mut url = url::Url::parse(&format!("{}{}", self.base_url, path))?;
        if !query.is_empty() {
            url.query_pairs_mut().extend_pairs(query);
        }
        Ok(url.into())
    }
}

fn decode_body(body: &str) -> Result<Value, BranchError> {
    if body.trim().is_empty() {
        return Ok(Value::Null);
    }
    serde_json::from_str(body).map_err(|err| BranchError::Parse(Box::new(err)))
}

fn map_failure(err: TransportError) -> BranchError {
    let json_failure = err
        .response()
        .filter(|response| response.is_json())
        .map(|response| {
            (
                response.status,
                decode_error_messages(response.status, &response.body),
            )
        });

    match json_failure {
        Some((status_code, errors)) => {
            tracing::warn!(status = status_code, ?errors, "Branch API returned an error");
            BranchError::Api(ApiError::new(status_code, errors, err))
        }
        None => BranchError::Transport(err),
    }
}
