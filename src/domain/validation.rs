use std::fmt;

use crate::domain::schema::FieldKind;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ValidationError {
    Empty {
        field: &'static str,
    },
    MissingEnv {
        var: &'static str,
    },
    UndefinedField {
        resource: &'static str,
        field: String,
    },
    TypeMismatch {
        field: &'static str,
        expected: FieldKind,
        actual: &'static str,
    },
    InvalidValue {
        field: &'static str,
        value: String,
        allowed: &'static [i64],
    },
    MissingRequiredField {
        field: &'static str,
    },
}

impl fmt::Display for ValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Empty { field } => write!(f, "{field} must not be empty"),
            Self::MissingEnv { var } => write!(f, "environment variable {var} is not set"),
            Self::UndefinedField { resource, field } => {
                write!(f, "field \"{field}\" is not defined for {resource}")
            }
            Self::TypeMismatch {
                field,
                expected,
                actual,
            } => write!(f, "field \"{field}\" expects {expected}, got {actual}"),
            Self::InvalidValue {
                field,
                value,
                allowed,
            } => write!(
                f,
                "field \"{field}\" has invalid value {value} (allowed: {allowed:?})"
            ),
            Self::MissingRequiredField { field } => {
                write!(f, "required field \"{field}\" is missing")
            }
        }
    }
}

impl std::error::Error for ValidationError {}
