use serde_json::{Map, Value};

/// One row of the payload's `users` array.
///
/// Every field keeps the JSON value it arrived with. Records are never validated or
/// coerced on the way in: a record carrying the wrong type for a field is displayed
/// as-is rather than rejected.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ParticipantRecord {
    pub user: Value,
    pub total_days: Value,
    pub current_streak: Value,
    pub longest_streak: Value,
    pub last_update: Value,
    pub active_streak: Value,
    pub highlight: Value,
}

impl ParticipantRecord {
    /// Builds a record from an arbitrary element of the `users` array.
    ///
    /// Absent fields become `null`, unknown fields are dropped, and a non-object
    /// element yields a record whose fields are all `null`.
    pub fn from_value(raw: &Value) -> Self {
        match raw {
            Value::Object(fields) => Self::from_fields(fields),
            _ => Self::default(),
        }
    }

    fn from_fields(fields: &Map<String, Value>) -> Self {
        let field = |name: &str| fields.get(name).cloned().unwrap_or(Value::Null);

        Self {
            user: field("user"),
            total_days: field("total_days"),
            current_streak: field("current_streak"),
            longest_streak: field("longest_streak"),
            last_update: field("last_update"),
            active_streak: field("active_streak"),
            highlight: field("highlight"),
        }
    }

    /// Only an explicit JSON `true` counts as an active streak.
    pub fn is_active(&self) -> bool {
        self.active_streak == Value::Bool(true)
    }

    /// Logged day count used for the headline total.
    ///
    /// Anything that is not a non-negative integer contributes zero.
    pub fn logged_days(&self) -> u64 {
        self.total_days.as_u64().unwrap_or(0)
    }

    /// `last_update` as text, or `None` when it is missing or empty.
    pub fn last_update_text(&self) -> Option<String> {
        non_empty_text(&self.last_update)
    }

    /// `highlight` as text, or `None` when it is missing or empty.
    pub fn highlight_text(&self) -> Option<String> {
        non_empty_text(&self.highlight)
    }
}

/// Display text of a raw field value.
///
/// Strings render verbatim, `null` renders empty, everything else renders as
/// compact JSON.
pub fn display_text(value: &Value) -> String {
    match value {
        Value::Null => String::new(),
        Value::String(text) => text.clone(),
        other => other.to_string(),
    }
}

fn non_empty_text(value: &Value) -> Option<String> {
    match value {
        Value::Null | Value::Bool(false) => None,
        other => Some(display_text(other)).filter(|text| !text.is_empty()),
    }
}
