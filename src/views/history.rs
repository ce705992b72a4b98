//! Audit log view: one fetch, client-side action filter.

use serde_json::Value;

use crate::api::BatchApi;
use crate::model::{HistoryAction, HistoryRecord};

pub const FETCH_FAILED: &str = "Failed to fetch history records";

/// What the Details column shows for a record.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Details {
    Change { previous: String, new: String },
    Info(String),
}

impl Details {
    pub fn of(record: &HistoryRecord) -> Self {
        if record.action == HistoryAction::Update {
            Details::Change {
                previous: format_value(record.previous_value.as_deref()),
                new: format_value(record.new_value.as_deref()),
            }
        } else {
            Details::Info(record.additional_info.clone().unwrap_or_default())
        }
    }
}

#[derive(Debug, Default)]
pub struct HistoryView {
    records: Vec<HistoryRecord>,
    filter: Option<HistoryAction>,
    loading: bool,
    error: Option<String>,
}

impl HistoryView {
    pub fn new() -> Self {
        Self {
            loading: true,
            ..Self::default()
        }
    }

    pub async fn load(&mut self, api: &dyn BatchApi) {
        self.loading = true;
        match api.list_history().await {
            Ok(records) => {
                tracing::debug!(count = records.len(), "history loaded");
                self.records = records;
                self.error = None;
            }
            Err(e) => {
                tracing::warn!(error = %e, "failed to fetch history");
                self.error = Some(FETCH_FAILED.to_string());
            }
        }
        self.loading = false;
    }

    pub fn is_loading(&self) -> bool {
        self.loading
    }

    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    pub fn filter(&self) -> Option<&HistoryAction> {
        self.filter.as_ref()
    }

    /// `None` shows every record.
    pub fn set_filter(&mut self, filter: Option<HistoryAction>) {
        self.filter = filter;
    }

    pub fn visible(&self) -> Vec<&HistoryRecord> {
        self.records
            .iter()
            .filter(|r| self.filter.as_ref().is_none_or(|f| r.action == *f))
            .collect()
    }
}

/// Render a stored JSON value blob as `key: value, key: value`.
///
/// Objects keep their source key order, arrays are keyed by index and
/// scalars print as themselves. Anything that is not JSON comes back as is.
pub fn format_value(raw: Option<&str>) -> String {
    let Some(raw) = raw.filter(|s| !s.is_empty()) else {
        return String::new();
    };
    let Ok(parsed) = serde_json::from_str::<Value>(raw) else {
        return raw.to_string();
    };
    match parsed {
        Value::Object(map) => map
            .iter()
            .map(|(k, v)| format!("{}: {}", k, scalar(v)))
            .collect::<Vec<_>>()
            .join(", "),
        Value::Array(items) => items
            .iter()
            .enumerate()
            .map(|(i, v)| format!("{}: {}", i, scalar(v)))
            .collect::<Vec<_>>()
            .join(", "),
        other => scalar(&other),
    }
}

fn scalar(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}

/// Render `changed_at` in local time; unparseable stamps are shown verbatim.
pub fn format_timestamp(raw: &str) -> String {
    use chrono::{DateTime, Local, NaiveDateTime};

    if let Ok(dt) = DateTime::parse_from_rfc3339(raw) {
        return dt
            .with_timezone(&Local)
            .format("%Y-%m-%d %H:%M:%S")
            .to_string();
    }
    for fmt in ["%Y-%m-%dT%H:%M:%S%.f", "%Y-%m-%d %H:%M:%S%.f"] {
        if let Ok(naive) = NaiveDateTime::parse_from_str(raw, fmt) {
            return naive.format("%Y-%m-%d %H:%M:%S").to_string();
        }
    }
    raw.to_string()
}
