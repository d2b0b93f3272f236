//! Transport layer: HTTP exchange and wire-format details.

mod error_body;
mod http;

pub use error_body::decode_error_messages;
pub(crate) use http::ReqwestTransport;
pub use http::{BoxFuture, HttpRequest, HttpResponse, HttpTransport, Method, TransportError};
