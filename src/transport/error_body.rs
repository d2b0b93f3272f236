use serde::Deserialize;

#[derive(Debug, Deserialize)]
struct ErrorEnvelope {
    #[serde(default)]
    error: Option<ErrorDetail>,
}

#[derive(Debug, Deserialize)]
struct ErrorDetail {
    #[serde(default)]
    message: Option<String>,
}

/// Human-readable messages for a JSON error response.
///
/// Picks `error.message` when the body has one; a 404 always gets a trailing
/// `"Not Found"`. Bodies that do not decode yield no message of their own.
pub fn decode_error_messages(status: u16, body: &str) -> Vec<String> {
    let mut errors: Vec<String> = serde_json::from_str::<ErrorEnvelope>(body)
        .ok()
        .and_then(|envelope| envelope.error)
        .and_then(|detail| detail.message)
        .into_iter()
        .collect();
    if status == 404 {
        errors.push("Not Found".to_owned());
    }
    errors
}
