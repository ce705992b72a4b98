//! The update modal: edits the five daily counts of one batch.

use std::fmt;

use crate::api::BatchApi;
use crate::model::{Batch, BatchUpdate};

pub const UPDATE_FAILED: &str = "Failed to update batch";
const NEGATIVE_VALUE: &str = "Value must be greater than or equal to 0";
const TOO_LARGE: &str = "Value is too large";

/// One editable count in the modal.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum CountField {
    Mortality,
    Culls,
    Table,
    Jumbo,
    Cr,
}

impl CountField {
    pub const ALL: [CountField; 5] = [
        CountField::Mortality,
        CountField::Culls,
        CountField::Table,
        CountField::Jumbo,
        CountField::Cr,
    ];

    pub fn label(&self) -> &'static str {
        match self {
            CountField::Mortality => "Mortality",
            CountField::Culls => "Culls",
            CountField::Table => "Table",
            CountField::Jumbo => "Jumbo",
            CountField::Cr => "CR",
        }
    }

    pub fn is_egg(&self) -> bool {
        matches!(self, CountField::Table | CountField::Jumbo | CountField::Cr)
    }
}

impl fmt::Display for CountField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Modal state, seeded from the row the user picked.
#[derive(Debug, Clone, PartialEq)]
pub struct UpdateBatchForm {
    batch_id: i64,
    batch_no: String,
    values: BatchUpdate,
    field_errors: Vec<(CountField, &'static str)>,
    error: Option<String>,
}

impl UpdateBatchForm {
    pub fn new(batch: &Batch) -> Self {
        Self {
            batch_id: batch.id,
            batch_no: batch.batch_no.clone(),
            values: batch.counts(),
            field_errors: Vec::new(),
            error: None,
        }
    }

    pub fn batch_id(&self) -> i64 {
        self.batch_id
    }

    pub fn title(&self) -> String {
        format!("Update Batch {}", self.batch_no)
    }

    pub fn get(&self, field: CountField) -> u32 {
        match field {
            CountField::Mortality => self.values.mortality,
            CountField::Culls => self.values.culls,
            CountField::Table => self.values.table,
            CountField::Jumbo => self.values.jumbo,
            CountField::Cr => self.values.cr,
        }
    }

    pub fn set(&mut self, field: CountField, value: u32) {
        self.field_errors.retain(|(f, _)| *f != field);
        let slot = match field {
            CountField::Mortality => &mut self.values.mortality,
            CountField::Culls => &mut self.values.culls,
            CountField::Table => &mut self.values.table,
            CountField::Jumbo => &mut self.values.jumbo,
            CountField::Cr => &mut self.values.cr,
        };
        *slot = value;
    }

    /// Apply raw input for `field`. Blank or non-numeric input counts as 0
    /// and trailing garbage after leading digits is ignored. A negative or
    /// oversized value keeps the previous count and records a field error.
    pub fn set_field(&mut self, field: CountField, raw: &str) {
        match parse_count(raw) {
            Ok(value) => self.set(field, value),
            Err(message) => {
                self.field_errors.retain(|(f, _)| *f != field);
                self.field_errors.push((field, message));
            }
        }
    }

    pub fn field_error(&self, field: CountField) -> Option<&'static str> {
        self.field_errors
            .iter()
            .find(|(f, _)| *f == field)
            .map(|(_, m)| *m)
    }

    pub fn is_valid(&self) -> bool {
        self.field_errors.is_empty()
    }

    /// Live total for the current values.
    pub fn total_eggs(&self) -> u64 {
        self.values.total_eggs()
    }

    /// The PATCH body: exactly the five counts.
    pub fn body(&self) -> BatchUpdate {
        self.values
    }

    /// Inline error from the last failed submit.
    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    /// PATCH the counts. Returns `true` on success; on failure the inline
    /// error is set and the modal should stay open.
    pub async fn submit(&mut self, api: &dyn BatchApi) -> bool {
        self.error = None;
        if !self.is_valid() {
            tracing::debug!(batch_id = self.batch_id, "update blocked by field errors");
            return false;
        }
        match api.update_batch(self.batch_id, &self.values).await {
            Ok(()) => {
                tracing::info!(batch_id = self.batch_id, "batch updated");
                true
            }
            Err(e) => {
                tracing::warn!(batch_id = self.batch_id, error = %e, "update failed");
                self.error = Some(UPDATE_FAILED.to_string());
                false
            }
        }
    }
}

/// `parseInt(raw) || 0`, restricted to non-negative `u32`.
fn parse_count(raw: &str) -> Result<u32, &'static str> {
    let s = raw.trim_start();
    let (negative, rest) = match s.as_bytes().first() {
        Some(b'-') => (true, &s[1..]),
        Some(b'+') => (false, &s[1..]),
        _ => (false, s),
    };
    let digits: &str = &rest[..rest.bytes().take_while(u8::is_ascii_digit).count()];
    if digits.is_empty() {
        return Ok(0);
    }
    let is_zero = digits.bytes().all(|b| b == b'0');
    if negative && !is_zero {
        return Err(NEGATIVE_VALUE);
    }
    digits.parse::<u32>().map_err(|_| TOO_LARGE)
}
