//! The "Add New Batch" form.
//!
//! Inputs are held as raw strings, the way a form holds them, so partial or
//! invalid input can be shown back with its error. Week and day are
//! re-validated on every change; the composed age only follows them while
//! both are valid.

use crate::api::BatchApi;
use crate::errors::{FieldError, ValidationError};
use crate::model::{Age, NewBatch};
use crate::router::Route;

pub const CREATE_FAILED: &str = "Failed to create batch";
pub const WEEK_ERROR: &str = "Week must be greater than 0";
pub const WEEK_TOO_LARGE: &str = "Week is too large";
pub const DAY_ERROR: &str = "Day must be between 1 and 7";
pub const SHED_ERROR: &str = "Shed No. must be at least 1";
pub const OPENING_ERROR: &str = "Opening count must be greater than or equal to 0";

/// Per-field age errors; empty strings mean "no error".
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AgeErrors {
    pub week: String,
    pub day: String,
}

#[derive(Debug, Clone, PartialEq)]
pub struct AddBatchForm {
    shed_no: String,
    opening_count: String,
    week: String,
    day: String,
    age: Age,
    age_errors: AgeErrors,
    error: Option<String>,
}

impl Default for AddBatchForm {
    fn default() -> Self {
        Self {
            shed_no: "1".to_string(),
            opening_count: "0".to_string(),
            week: "1".to_string(),
            day: "1".to_string(),
            age: Age::default(),
            age_errors: AgeErrors::default(),
            error: None,
        }
    }
}

impl AddBatchForm {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set_shed_no(&mut self, raw: &str) {
        self.shed_no = raw.trim().to_string();
    }

    pub fn set_opening_count(&mut self, raw: &str) {
        self.opening_count = raw.trim().to_string();
    }

    pub fn set_week(&mut self, raw: &str) {
        self.week = raw.trim().to_string();
        self.refresh_age();
    }

    pub fn set_day(&mut self, raw: &str) {
        self.day = raw.trim().to_string();
        self.refresh_age();
    }

    pub fn shed_no(&self) -> &str {
        &self.shed_no
    }

    pub fn opening_count(&self) -> &str {
        &self.opening_count
    }

    pub fn week(&self) -> &str {
        &self.week
    }

    pub fn day(&self) -> &str {
        &self.day
    }

    /// Last valid age; this is what gets submitted.
    pub fn age(&self) -> Age {
        self.age
    }

    pub fn age_errors(&self) -> &AgeErrors {
        &self.age_errors
    }

    /// Failure message from the last submit.
    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    fn refresh_age(&mut self) {
        if let Some(age) = self.validate_age() {
            self.age = age;
        }
    }

    /// Re-check week and day, updating the per-field messages.
    fn validate_age(&mut self) -> Option<Age> {
        let week = match self.week.parse::<i64>() {
            Ok(w) if w >= 1 => u32::try_from(w).map_err(|_| WEEK_TOO_LARGE),
            _ => Err(WEEK_ERROR),
        };
        let day = self
            .day
            .parse::<u32>()
            .ok()
            .filter(|d| (1..=7).contains(d))
            .ok_or(DAY_ERROR);

        self.age_errors = AgeErrors {
            week: week.err().unwrap_or_default().to_string(),
            day: day.err().unwrap_or_default().to_string(),
        };

        Age::new(week.ok()?, day.ok()?).ok()
    }

    /// Validate every field and build the request body.
    pub fn validate(&mut self) -> Result<NewBatch, ValidationError> {
        let mut fields = Vec::new();

        let shed_no = self.shed_no.parse::<u32>().ok().filter(|n| *n >= 1);
        if shed_no.is_none() {
            fields.push(FieldError {
                field: "shed_no",
                message: SHED_ERROR.into(),
            });
        }
        let opening_count = self.opening_count.parse::<u32>().ok();
        if opening_count.is_none() {
            fields.push(FieldError {
                field: "opening_count",
                message: OPENING_ERROR.into(),
            });
        }
        let age = self.validate_age();
        if !self.age_errors.week.is_empty() {
            fields.push(FieldError {
                field: "week",
                message: self.age_errors.week.clone(),
            });
        }
        if !self.age_errors.day.is_empty() {
            fields.push(FieldError {
                field: "day",
                message: self.age_errors.day.clone(),
            });
        }

        match (shed_no, opening_count, age) {
            (Some(shed_no), Some(opening_count), Some(age)) if fields.is_empty() => {
                self.age = age;
                Ok(NewBatch {
                    shed_no,
                    opening_count,
                    age,
                })
            }
            _ => Err(ValidationError { fields }),
        }
    }

    /// Validate and POST. `Ok(route)` is where to navigate next.
    pub async fn submit(&mut self, api: &dyn BatchApi) -> Result<Route, SubmitError> {
        self.error = None;
        let body = self.validate().map_err(SubmitError::Invalid)?;

        match api.create_batch(&body).await {
            Ok(()) => {
                tracing::info!(shed_no = body.shed_no, age = %body.age, "batch created");
                Ok(Route::Root)
            }
            Err(e) => {
                tracing::warn!(error = %e, "create failed");
                self.error = Some(CREATE_FAILED.to_string());
                Err(SubmitError::Request(CREATE_FAILED.to_string()))
            }
        }
    }
}

/// Why a create submit did not go through.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SubmitError {
    Invalid(ValidationError),
    Request(String),
}

impl std::fmt::Display for SubmitError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            SubmitError::Invalid(e) => write!(f, "{}", e),
            SubmitError::Request(msg) => f.write_str(msg),
        }
    }
}

impl std::error::Error for SubmitError {}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::views::testing::FakeApi;

    #[test]
    fn test_defaults() {
        let form = AddBatchForm::new();
        assert_eq!(form.shed_no(), "1");
        assert_eq!(form.opening_count(), "0");
        assert_eq!(form.age().to_string(), "1.1");
        assert_eq!(form.age_errors(), &AgeErrors::default());
    }

    #[test]
    fn test_week_zero_sets_only_week_error() {
        let mut form = AddBatchForm::new();
        form.set_week("0");
        form.set_day("3");
        assert_eq!(form.age_errors().week, "Week must be greater than 0");
        assert_eq!(form.age_errors().day, "");
        // The last valid age is kept while the week is invalid.
        assert_eq!(form.age().to_string(), "1.1");
    }

    #[test]
    fn test_day_out_of_range_sets_day_error() {
        for day in ["0", "8", "-1", "x", ""] {
            let mut form = AddBatchForm::new();
            form.set_day(day);
            assert_eq!(form.age_errors().day, DAY_ERROR, "day {:?}", day);
            assert_eq!(form.age_errors().week, "");
        }
    }

    #[test]
    fn test_valid_inputs_compose_dotted_age() {
        for week in [1u32, 2, 17, 90] {
            for day in 1u32..=7 {
                let mut form = AddBatchForm::new();
                form.set_week(&week.to_string());
                form.set_day(&day.to_string());
                let body = form.validate().unwrap();
                assert_eq!(body.age.to_string(), format!("{}.{}", week, day));
            }
        }
    }

    #[test]
    fn test_week_at_the_u32_limit() {
        let mut form = AddBatchForm::new();
        form.set_week(&u32::MAX.to_string());
        form.set_day("3");
        let body = form.validate().unwrap();
        assert_eq!(body.age.to_string(), format!("{}.3", u32::MAX));

        form.set_week("4294967296");
        assert_eq!(form.age_errors().week, WEEK_TOO_LARGE);
        assert_eq!(form.age_errors().day, "");
        let err = form.validate().unwrap_err();
        assert_eq!(err.message_for("week"), Some(WEEK_TOO_LARGE));
        assert_eq!(err.fields.len(), 1);
    }

    #[test]
    fn test_validate_reports_every_failing_field() {
        let mut form = AddBatchForm::new();
        form.set_shed_no("0");
        form.set_opening_count("-4");
        form.set_week("0");
        form.set_day("9");
        let err = form.validate().unwrap_err();
        assert_eq!(err.message_for("shed_no"), Some(SHED_ERROR));
        assert_eq!(err.message_for("opening_count"), Some(OPENING_ERROR));
        assert_eq!(err.message_for("week"), Some(WEEK_ERROR));
        assert_eq!(err.message_for("day"), Some(DAY_ERROR));
    }

    #[tokio::test]
    async fn test_invalid_submit_sends_nothing() {
        let api = FakeApi::default();
        let mut form = AddBatchForm::new();
        form.set_week("0");
        form.set_day("3");
        let err = form.submit(&api).await.unwrap_err();
        match err {
            SubmitError::Invalid(v) => {
                assert_eq!(v.message_for("week"), Some("Week must be greater than 0"));
                assert_eq!(v.message_for("day"), None);
            }
            other => panic!("expected validation failure, got {:?}", other),
        }
        assert!(api.created.lock().unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_successful_submit_posts_and_navigates_to_root() {
        let api = FakeApi::default();
        let mut form = AddBatchForm::new();
        form.set_shed_no("3");
        form.set_opening_count("500");
        form.set_week("4");
        form.set_day("6");

        let route = form.submit(&api).await.unwrap();
        assert_eq!(route, Route::Root);
        assert_eq!(route.resolve(), Route::Batches);

        let created = api.created.lock().unwrap();
        assert_eq!(
            serde_json::to_value(&created[0]).unwrap(),
            serde_json::json!({"shed_no": 3, "opening_count": 500, "age": "4.6"})
        );
    }

    #[tokio::test]
    async fn test_failed_submit_shows_generic_message() {
        let api = FakeApi::default();
        api.set_fail_writes(true);
        let mut form = AddBatchForm::new();
        let err = form.submit(&api).await.unwrap_err();
        assert_eq!(err, SubmitError::Request("Failed to create batch".into()));
        assert_eq!(form.error(), Some("Failed to create batch"));
    }
}
