//! Envelope and reply shaping for tool responses.

use serde_json::{Value, json};

use bunsho_types::{OpReply, ObjectSize};

/// Success envelope: `{data, error: "", successful: true}`.
pub fn ok(data: Value) -> String {
    json!({
        "data": data,
        "error": "",
        "successful": true
    })
    .to_string()
}

/// Failure envelope: `{data: {}, error, successful: false}`.
pub fn fail(error: impl std::fmt::Display) -> String {
    json!({
        "data": {},
        "error": error.to_string(),
        "successful": false
    })
    .to_string()
}

/// Dimensions are optional but must come as a pair.
pub fn object_size(width_pt: Option<f64>, height_pt: Option<f64>) -> Result<Option<ObjectSize>, String> {
    match (width_pt, height_pt) {
        (Some(w), Some(h)) => Ok(Some(ObjectSize { width_pt: w, height_pt: h })),
        (None, None) => Ok(None),
        _ => Err("width_pt and height_pt must be provided together".into()),
    }
}

/// Flatten batch replies into a JSON array, dropping empty ones.
pub fn reply_payloads(replies: &[OpReply]) -> Vec<Value> {
    replies
        .iter()
        .filter(|r| !matches!(r, OpReply::None))
        .filter_map(|r| serde_json::to_value(r).ok())
        .collect()
}
