//! Static per-resource field tables and the generic routine that checks a
//! [`Params`] bag against them.

use std::fmt;

use serde_json::Value;

use crate::domain::params::Params;
use crate::domain::validation::ValidationError;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldKind {
    String,
    Integer,
    /// A list of primitives or a keyed object.
    Array,
    /// Declared without a type constraint.
    Any,
}

impl fmt::Display for FieldKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::String => "string",
            Self::Integer => "integer",
            Self::Array => "array",
            Self::Any => "any",
        })
    }
}

/// Narrowing transformation applied after the type and allowed-value checks.
///
/// Truncation cuts values longer than `limit` bytes down to `limit - 1` bytes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Normalizer {
    Truncate(usize),
    Clamp(i64),
    ResetAbove { max: i64, fallback: i64 },
    TruncateEach(usize),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FieldRule {
    pub name: &'static str,
    pub kind: FieldKind,
    pub allowed: Option<&'static [i64]>,
    pub normalizer: Option<Normalizer>,
}

impl FieldRule {
    const fn string(name: &'static str) -> Self {
        Self {
            name,
            kind: FieldKind::String,
            allowed: None,
            normalizer: None,
        }
    }

    const fn string_max(name: &'static str, limit: usize) -> Self {
        Self {
            normalizer: Some(Normalizer::Truncate(limit)),
            ..Self::string(name)
        }
    }

    const fn integer(name: &'static str) -> Self {
        Self {
            name,
            kind: FieldKind::Integer,
            allowed: None,
            normalizer: None,
        }
    }

    /// Integer enumeration; values above the largest member clamp down to it.
    const fn flag(name: &'static str, allowed: &'static [i64]) -> Self {
        Self {
            allowed: Some(allowed),
            normalizer: Some(Normalizer::Clamp(allowed[allowed.len() - 1])),
            ..Self::integer(name)
        }
    }

    const fn array(name: &'static str) -> Self {
        Self {
            name,
            kind: FieldKind::Array,
            allowed: None,
            normalizer: None,
        }
    }

    const fn any(name: &'static str) -> Self {
        Self {
            name,
            kind: FieldKind::Any,
            allowed: None,
            normalizer: None,
        }
    }
}

#[derive(Debug)]
pub struct Schema {
    pub resource: &'static str,
    pub fields: &'static [FieldRule],
}

impl Schema {
    pub fn field(&self, name: &str) -> Option<&FieldRule> {
        self.fields.iter().find(|rule| rule.name == name)
    }
}

pub static APP_SCHEMA: Schema = Schema {
    resource: "app",
    fields: &[
        FieldRule::string("branch_secret"),
        FieldRule::integer("user_id"),
        FieldRule::string_max("app_name", 255),
        FieldRule::string_max("dev_name", 255),
        FieldRule::string_max("dev_email", 255),
        // android
        FieldRule::flag("android_app", &[0, 1, 2]),
        FieldRule::string_max("android_url", 1024),
        FieldRule::string_max("android_uri_scheme", 1024),
        FieldRule::string_max("android_package_name", 255),
        FieldRule::any("sha256_cert_fingerprints"),
        FieldRule::flag("android_app_links_enabled", &[0, 1]),
        // ios
        FieldRule::flag("ios_app", &[0, 1]),
        FieldRule::string_max("ios_url", 1024),
        FieldRule::string_max("ios_uri_scheme", 1024),
        FieldRule::string_max("ios_store_country", 255),
        FieldRule::integer("ios_bundle_id"),
        FieldRule::integer("ios_team_id"),
        FieldRule::flag("universal_linking_enabled", &[0, 1]),
        // other platforms
        FieldRule::string_max("fire_url", 1024),
        FieldRule::string_max("windows_phone_url", 1024),
        FieldRule::string_max("blackberry_url", 1024),
        FieldRule::string_max("web_url", 1024),
        FieldRule::string_max("default_desktop_url", 1024),
        FieldRule::string_max("text_message", 255),
        FieldRule::string_max("og_app_id", 255),
        FieldRule::string_max("og_title", 255),
        FieldRule::string_max("og_description", 255),
        FieldRule::string_max("og_image_url", 255),
        FieldRule::string_max("deepview_desktop", 1024),
        FieldRule::string_max("deepview_ios", 1024),
        FieldRule::string_max("deepview_android", 1024),
    ],
};

pub static URL_SCHEMA: Schema = Schema {
    resource: "url",
    fields: &[
        FieldRule::string("branch_key"),
        FieldRule::string("branch_secret"),
        FieldRule::array("data"),
        FieldRule::string_max("alias", 128),
        FieldRule {
            normalizer: Some(Normalizer::ResetAbove {
                max: 2,
                fallback: 0,
            }),
            ..FieldRule::integer("type")
        },
        FieldRule::integer("duration"),
        FieldRule::string_max("identity", 128),
        FieldRule::string_max("channel", 128),
        FieldRule::string_max("campaign", 128),
        FieldRule::string_max("feature", 128),
        FieldRule::string_max("stage", 128),
        FieldRule {
            normalizer: Some(Normalizer::TruncateEach(64)),
            ..FieldRule::array("tags")
        },
    ],
};

pub static CREDITS_SCHEMA: Schema = Schema {
    resource: "credits",
    fields: &[
        FieldRule::string("branch_key"),
        FieldRule::string("branch_secret"),
        FieldRule::string_max("identity", 127),
        FieldRule::string_max("bucket", 63),
        FieldRule::integer("amount"),
    ],
};

/// Check `params` against `schema`, normalize every present field, then make
/// sure each name in `required` is present.
///
/// Nothing is reordered: the returned bag has the caller's key order.
pub fn validate(
    schema: &Schema,
    mut params: Params,
    required: &[&'static str],
) -> Result<Params, ValidationError> {
    if let Some(unknown) = params.keys().find(|key| schema.field(key).is_none()) {
        return Err(ValidationError::UndefinedField {
            resource: schema.resource,
            field: unknown.to_owned(),
        });
    }

    for (key, value) in params.iter_mut() {
        let Some(rule) = schema.field(key) else {
            continue;
        };
        check_kind(rule, value)?;
        check_allowed(rule, value)?;
        if let Some(normalizer) = rule.normalizer {
            normalize(normalizer, value);
        }
    }

    if let Some(missing) = required.iter().find(|field| !params.contains_key(field)) {
        return Err(ValidationError::MissingRequiredField { field: *missing });
    }

    Ok(params)
}

fn check_kind(rule: &FieldRule, value: &Value) -> Result<(), ValidationError> {
    let matches = match rule.kind {
        FieldKind::String => value.is_string(),
        FieldKind::Integer => value.is_i64() || value.is_u64(),
        FieldKind::Array => match value {
            Value::Array(items) => items.iter().all(is_primitive),
            Value::Object(_) => true,
            _ => false,
        },
        FieldKind::Any => true,
    };
    if matches {
        Ok(())
    } else {
        Err(ValidationError::TypeMismatch {
            field: rule.name,
            expected: rule.kind,
            actual: type_name(value),
        })
    }
}

fn check_allowed(rule: &FieldRule, value: &Value) -> Result<(), ValidationError> {
    let (Some(allowed), Some(number)) = (rule.allowed, integer_value(value)) else {
        return Ok(());
    };
    if allowed.contains(&number) {
        return Ok(());
    }
    // Values above the ceiling are admitted; the clamp brings them back into the set.
    if let Some(Normalizer::Clamp(max)) = rule.normalizer {
        if number > max {
            return Ok(());
        }
    }
    Err(ValidationError::InvalidValue {
        field: rule.name,
        value: value.to_string(),
        allowed,
    })
}

fn normalize(normalizer: Normalizer, value: &mut Value) {
    match normalizer {
        Normalizer::Truncate(limit) => {
            if let Value::String(text) = value {
                truncate(text, limit);
            }
        }
        Normalizer::Clamp(max) => {
            if integer_value(value).is_some_and(|number| number > max) {
                *value = Value::from(max);
            }
        }
        Normalizer::ResetAbove { max, fallback } => {
            if integer_value(value).is_some_and(|number| number > max) {
                *value = Value::from(fallback);
            }
        }
        Normalizer::TruncateEach(limit) => {
            let items: Vec<Value> = match value {
                Value::Array(items) => std::mem::take(items),
                Value::Object(map) => std::mem::take(map).into_iter().map(|(_, v)| v).collect(),
                _ => return,
            };
            *value = Value::Array(
                items
                    .into_iter()
                    .map(|item| {
                        let mut text = stringify(item);
                        truncate(&mut text, limit);
                        Value::String(text)
                    })
                    .collect(),
            );
        }
    }
}

/// Cut `text` to `limit - 1` bytes when it is longer than `limit` bytes,
/// backing off to the previous char boundary for multi-byte input.
fn truncate(text: &mut String, limit: usize) {
    if text.len() <= limit {
        return;
    }
    let mut end = limit.saturating_sub(1);
    while !text.is_char_boundary(end) {
        end -= 1;
    }
    text.truncate(end);
}

fn integer_value(value: &Value) -> Option<i64> {
    value
        .as_i64()
        .or_else(|| value.as_u64().map(|_| i64::MAX))
}

fn is_primitive(value: &Value) -> bool {
    !matches!(value, Value::Array(_) | Value::Object(_))
}

fn stringify(value: Value) -> String {
    match value {
        Value::String(text) => text,
        Value::Bool(true) => "1".to_owned(),
        Value::Bool(false) | Value::Null => String::new(),
        other => other.to_string(),
    }
}

fn type_name(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(number) if number.is_f64() => "float",
        Value::Number(_) => "integer",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}
