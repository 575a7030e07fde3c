use std::path::{Path, PathBuf};

use chrono::NaiveDate;
use serde::{Deserialize, Deserializer, Serialize, de::Error as _};
use serde_json::{Map, Value};

use crate::{ImporterError, Result, layout::TrackerLayout};

pub const DATE_FORMAT: &str = "%Y-%m-%d";

/// A user's log file as stored on disk.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UserLog {
    pub user: String,
    #[serde(default)]
    pub entries: Vec<LogEntry>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LogEntry {
    #[serde(deserialize_with = "deserialize_day")]
    pub day: i64,
    pub date: String,
    pub summary: String,
    #[serde(default)]
    pub technologies: Vec<String>,
    #[serde(default)]
    pub links: Vec<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub highlight: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub timestamp: Option<String>,
    /// Fields written by other tools are kept as-is.
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// One validated day of work.
#[derive(Debug, Clone, PartialEq)]
pub struct Entry {
    pub day: i64,
    pub date: NaiveDate,
    pub summary: String,
}

#[derive(Debug, Clone, PartialEq)]
pub struct ValidatedLog {
    pub user: String,
    pub entries: Vec<Entry>,
}

/// Reads and validates every `*.json` log, in file name order.
pub async fn load_all(layout: &TrackerLayout) -> Result<Vec<ValidatedLog>> {
    let logs_dir = layout.logs_dir();
    if !tokio::fs::try_exists(&logs_dir).await? {
        tracing::warn!("Logs directory {} does not exist", logs_dir.display());
        return Ok(Vec::new());
    }

    let mut files: Vec<PathBuf> = Vec::new();
    let mut dir = tokio::fs::read_dir(&logs_dir).await?;
    while let Some(entry) = dir.next_entry().await? {
        let path = entry.path();
        if path.extension().is_some_and(|ext| ext == "json") {
            files.push(path);
        }
    }
    files.sort();

    let mut logs = Vec::with_capacity(files.len());
    for path in files {
        tracing::debug!("Reading log {}", path.display());
        logs.push(load_log(layout, &path).await?);
    }

    Ok(logs)
}

pub async fn load_log(layout: &TrackerLayout, path: &Path) -> Result<ValidatedLog> {
    let name = layout.relative(path);
    let content = tokio::fs::read_to_string(path).await?;
    if content.is_empty() {
        return Err(invalid(format!("Log file is empty: {}", name)));
    }

    let raw: Value = serde_json::from_str(&content)?;
    validate(&raw, &name)
}

/// Checks a raw log document, reporting the first problem found.
pub fn validate(raw: &Value, name: &str) -> Result<ValidatedLog> {
    let user = extract_user(raw, name)?;
    let entries = extract_entries(raw, name)?;
    Ok(ValidatedLog { user, entries })
}

fn extract_user(raw: &Value, name: &str) -> Result<String> {
    let user = match raw.get("user") {
        None => return Err(invalid(format!("Missing 'user' key in {}", name))),
        Some(Value::String(user)) => user.trim(),
        Some(_) => return Err(invalid(format!("User value must be a string in {}", name))),
    };

    if user.is_empty() {
        return Err(invalid(format!("User value is empty in {}", name)));
    }
    Ok(user.to_string())
}

fn extract_entries(raw: &Value, name: &str) -> Result<Vec<Entry>> {
    let items = match raw.get("entries") {
        None | Some(Value::Null) => {
            return Err(invalid(format!("Missing 'entries' array in {}", name)));
        }
        Some(Value::Array(items)) => items,
        Some(_) => return Err(invalid(format!("'entries' must be a list in {}", name))),
    };

    let mut entries = Vec::with_capacity(items.len());
    for (index, item) in items.iter().enumerate() {
        entries.push(extract_entry(item, index + 1, name)?);
    }

    if entries.is_empty() {
        return Err(invalid(format!("No entries found in {}", name)));
    }
    Ok(entries)
}

fn extract_entry(item: &Value, number: usize, name: &str) -> Result<Entry> {
    let Value::Object(fields) = item else {
        return Err(invalid(format!("Entry #{} has invalid data in {}", number, name)));
    };

    let (Some(day), Some(date)) = (fields.get("day"), fields.get("date")) else {
        return Err(invalid(format!(
            "Entry #{} missing required field in {}",
            number, name
        )));
    };

    let day = parse_day(day)
        .ok_or_else(|| invalid(format!("Entry #{} has invalid data in {}", number, name)))?;

    let summary = match fields.get("summary") {
        None | Some(Value::Null) => String::new(),
        Some(Value::String(text)) => text.trim().to_string(),
        Some(other) => other.to_string(),
    };
    if summary.is_empty() {
        return Err(invalid(format!("Entry #{} summary is empty in {}", number, name)));
    }

    let date = date
        .as_str()
        .and_then(|text| NaiveDate::parse_from_str(text, DATE_FORMAT).ok())
        .ok_or_else(|| {
            invalid(format!(
                "Entry #{} has an invalid date (expected YYYY-MM-DD) in {}",
                number, name
            ))
        })?;

    Ok(Entry { day, date, summary })
}

/// Integers, integral floats and numeric strings are all accepted as a day number.
fn parse_day(value: &Value) -> Option<i64> {
    match value {
        Value::Number(number) => number
            .as_i64()
            .or_else(|| number.as_f64().filter(|f| f.is_finite()).map(|f| f.trunc() as i64)),
        Value::String(text) => text.trim().parse().ok(),
        _ => None,
    }
}

fn deserialize_day<'de, D>(deserializer: D) -> std::result::Result<i64, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = Value::deserialize(deserializer)?;
    parse_day(&raw).ok_or_else(|| D::Error::custom(format!("invalid day number: {}", raw)))
}

fn invalid(message: String) -> ImporterError {
    ImporterError::ValidationError(message)
}
