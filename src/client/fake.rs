use std::sync::{Arc, Mutex};

use crate::transport::{BoxFuture, HttpRequest, HttpResponse, HttpTransport, TransportError};

#[derive(Debug, Clone)]
enum Outcome {
    Respond(HttpResponse),
    FailWithResponse(HttpResponse),
    Unreachable,
}

/// In-memory transport recording every request it receives.
#[derive(Debug, Clone)]
pub(crate) struct FakeTransport {
    state: Arc<Mutex<FakeTransportState>>,
}

#[derive(Debug)]
struct FakeTransportState {
    requests: Vec<HttpRequest>,
    outcome: Outcome,
}

impl FakeTransport {
    pub(crate) const FAILURE_MESSAGE: &'static str = "simulated failure";

    fn with_outcome(outcome: Outcome) -> Self {
        Self {
            state: Arc::new(Mutex::new(FakeTransportState {
                requests: Vec::new(),
                outcome,
            })),
        }
    }

    pub(crate) fn json(status: u16, body: impl Into<String>) -> Self {
        Self::with_outcome(Outcome::Respond(response(status, "application/json", body)))
    }

    pub(crate) fn failing(status: u16, content_type: &str, body: impl Into<String>) -> Self {
        Self::with_outcome(Outcome::FailWithResponse(response(
            status,
            content_type,
            body,
        )))
    }

    pub(crate) fn unreachable() -> Self {
        Self::with_outcome(Outcome::Unreachable)
    }

    pub(crate) fn requests(&self) -> Vec<HttpRequest> {
        self.state.lock().unwrap().requests.clone()
    }

    pub(crate) fn last_request(&self) -> Option<HttpRequest> {
        self.state.lock().unwrap().requests.last().cloned()
    }
}

fn response(status: u16, content_type: &str, body: impl Into<String>) -> HttpResponse {
    HttpResponse {
        status,
        headers: vec![("Content-Type".to_owned(), content_type.to_owned())],
        body: body.into(),
    }
}

impl HttpTransport for FakeTransport {
    fn send<'a>(
        &'a self,
        request: HttpRequest,
    ) -> BoxFuture<'a, Result<HttpResponse, TransportError>> {
        Box::pin(async move {
            let outcome = {
                let mut state = self.state.lock().unwrap();
                state.requests.push(request);
                state.outcome.clone()
            };
            match outcome {
                Outcome::Respond(response) => Ok(response),
                Outcome::FailWithResponse(response) => Err(TransportError::with_response(
                    Self::FAILURE_MESSAGE,
                    response,
                )),
                Outcome::Unreachable => Err(TransportError::with_source(
                    "connection refused",
                    std::io::Error::new(std::io::ErrorKind::ConnectionRefused, "refused"),
                )),
            }
        })
    }
}
