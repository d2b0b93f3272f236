//! Domain layer: credentials, parameter bags and field schemas (no I/O).

mod params;
pub mod schema;
mod validation;
mod value;

pub use params::Params;
pub use schema::{FieldKind, FieldRule, Normalizer, Schema, validate};
pub use validation::ValidationError;
pub use value::{BranchKey, BranchSecret, Config};
