//! Resource services: one façade per API path prefix.

mod app;
mod credits;
mod url;

pub use app::App;
pub use credits::Credits;
pub use url::Url;
