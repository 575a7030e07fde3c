use serde_json::Value;

use crate::models::{ParticipantRecord, RenderState};

/// Coerces an untrusted payload into a [`RenderState`]. Total: never fails.
///
/// `users` is used when it is an array and treated as empty otherwise.
/// `generated_at` passes through when it is a non-empty string.
pub fn normalize(raw: &Value) -> RenderState {
    let users = match raw.get("users") {
        Some(Value::Array(items)) => items.iter().map(ParticipantRecord::from_value).collect(),
        _ => Vec::new(),
    };

    let generated_at = match raw.get("generated_at") {
        Some(Value::String(stamp)) if !stamp.is_empty() => Some(stamp.clone()),
        _ => None,
    };

    RenderState {
        users,
        generated_at,
    }
}
