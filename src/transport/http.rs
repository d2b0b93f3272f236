use std::error::Error as StdError;
use std::fmt;
use std::future::Future;
use std::pin::Pin;

use serde_json::Value;

pub type BoxFuture<'a, T> = Pin<Box<dyn Future<Output = T> + Send + 'a>>;

/// HTTP verbs used by the Branch API.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Method {
    Get,
    Post,
    Put,
}

impl Method {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Get => "GET",
            Self::Post => "POST",
            Self::Put => "PUT",
        }
    }
}

impl fmt::Display for Method {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Fully-resolved request handed to an [`HttpTransport`].
#[derive(Debug, Clone, PartialEq)]
pub struct HttpRequest {
    pub method: Method,
    /// Absolute URL, query string included.
    pub url: String,
    pub headers: Vec<(String, String)>,
    pub body: Option<Value>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HttpResponse {
    pub status: u16,
    pub headers: Vec<(String, String)>,
    pub body: String,
}

impl HttpResponse {
    /// First value of header `name`, compared case-insensitively.
    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers
            .iter()
            .find(|(key, _)| key.eq_ignore_ascii_case(name))
            .map(|(_, value)| value.as_str())
    }

    pub fn is_json(&self) -> bool {
        self.header("content-type")
            .is_some_and(|value| value.contains("application/json"))
    }
}

/// Failure reported by an [`HttpTransport`].
///
/// `response` is set when the server answered with a 4xx/5xx status; it is
/// `None` for connection, TLS, timeout and similar failures.
#[derive(Debug, thiserror::Error)]
#[error("{message}")]
pub struct TransportError {
    message: String,
    response: Option<HttpResponse>,
    #[source]
    source: Option<Box<dyn StdError + Send + Sync>>,
}

impl TransportError {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            response: None,
            source: None,
        }
    }

    pub fn with_source(
        message: impl Into<String>,
        source: impl Into<Box<dyn StdError + Send + Sync>>,
    ) -> Self {
        Self {
            message: message.into(),
            response: None,
            source: Some(source.into()),
        }
    }

    /// Failure carrying the error response the server sent back.
    pub fn with_response(message: impl Into<String>, response: HttpResponse) -> Self {
        Self {
            message: message.into(),
            response: Some(response),
            source: None,
        }
    }

    /// Build the failure for a 4xx/5xx `response` to `method url`.
    pub fn status(method: Method, url: &str, response: HttpResponse) -> Self {
        let class = if response.status >= 500 {
            "server error"
        } else {
            "client error"
        };
        let message = format!(
            "{class}: `{method} {url}` resulted in a `{}` response",
            response.status
        );
        Self::with_response(message, response)
    }

    pub fn message(&self) -> &str {
        &self.message
    }

    pub fn response(&self) -> Option<&HttpResponse> {
        self.response.as_ref()
    }
}

/// Capability the client uses to execute one HTTP exchange.
///
/// Implementations must report 4xx/5xx answers as [`TransportError`] with the
/// response attached, and everything else as `Ok`.
pub trait HttpTransport: Send + Sync {
    fn send<'a>(
        &'a self,
        request: HttpRequest,
    ) -> BoxFuture<'a, Result<HttpResponse, TransportError>>;
}

#[derive(Debug, Clone)]
pub(crate) struct ReqwestTransport {
    pub(crate) client: reqwest::Client,
}

impl HttpTransport for ReqwestTransport {
    fn send<'a>(
        &'a self,
        request: HttpRequest,
    ) -> BoxFuture<'a, Result<HttpResponse, TransportError>> {
        Box::pin(async move {
            let method = match request.method {
                Method::Get => reqwest::Method::GET,
                Method::Post => reqwest::Method::POST,
                Method::Put => reqwest::Method::PUT,
            };

            let mut builder = self.client.request(method, request.url.as_str());
            for (name, value) in &request.headers {
                builder = builder.header(name.as_str(), value.as_str());
            }
            if let Some(body) = &request.body {
                builder = builder.json(body);
            }

            let response = builder
                .send()
                .await
                .map_err(|err| TransportError::with_source(err.to_string(), err))?;

            let status = response.status();
            let headers = response
                .headers()
                .iter()
                .filter_map(|(name, value)| {
                    value
                        .to_str()
                        .ok()
                        .map(|value| (name.as_str().to_owned(), value.to_owned()))
                })
                .collect();
            let body = response
                .text()
                .await
                .map_err(|err| TransportError::with_source(err.to_string(), err))?;

            let response = HttpResponse {
                status: status.as_u16(),
                headers,
                body,
            };
            if status.is_client_error() || status.is_server_error() {
                return Err(TransportError::status(
                    request.method,
                    &request.url,
                    response,
                ));
            }
            Ok(response)
        })
    }
}

#[cfg(test)]
mod tests {
    use std::error::Error as _;

    use super::*;

    fn response(status: u16, content_type: &str) -> HttpResponse {
        HttpResponse {
            status,
            headers: vec![("Content-Type".to_owned(), content_type.to_owned())],
            body: String::new(),
        }
    }

    #[test]
    fn header_lookup_ignores_case() {
        let resp = response(200, "application/json; charset=utf-8");
        assert_eq!(
            resp.header("content-type"),
            Some("application/json; charset=utf-8")
        );
        assert!(resp.is_json());
        assert!(!response(200, "text/plain").is_json());
    }

    #[test]
    fn status_failure_message_names_the_request() {
        let err = TransportError::status(
            Method::Get,
            "https://api.example.invalid/v1/url",
            response(404, "application/json"),
        );
        assert_eq!(
            err.to_string(),
            "client error: `GET https://api.example.invalid/v1/url` resulted in a `404` response"
        );
        assert_eq!(err.response().map(|r| r.status), Some(404));

        let err = TransportError::status(Method::Put, "u", response(502, "text/plain"));
        assert!(err.message().starts_with("server error"));
    }

    #[test]
    fn source_is_exposed() {
        let io = std::io::Error::new(std::io::ErrorKind::ConnectionRefused, "refused");
        let err = TransportError::with_source("connect failed", io);
        assert!(err.source().is_some());
        assert!(err.response().is_none());
        assert!(TransportError::new("plain").source().is_none());
    }
}
