//! Wire and view types for batches and their audit history.
//!
//! Everything here is an ephemeral view model: the REST API owns the data and
//! every view re-fetches a fresh snapshot. The only derived values computed on
//! the client are egg totals and the backend's closing-count/hen-day figures.

use anyhow::{Result, bail};
use chrono::NaiveDate;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;
use std::str::FromStr;

/// Batch age as a labeled (week, day) pair, serialized as `"<week>.<day>"`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Age {
    week: u32,
    day: u32,
}

impl Age {
    /// Build an age, enforcing `week >= 1` and `day` in `1..=7`.
    pub fn new(week: u32, day: u32) -> Result<Self> {
        if week < 1 {
            bail!("Week must be greater than 0");
        }
        if !(1..=7).contains(&day) {
            bail!("Day must be between 1 and 7");
        }
        Ok(Self { week, day })
    }

    pub fn week(&self) -> u32 {
        self.week
    }

    pub fn day(&self) -> u32 {
        self.day
    }

    /// Human label used in the batch table, e.g. `Week 3, Day 2`.
    pub fn label(&self) -> String {
        format!("Week {}, Day {}", self.week, self.day)
    }
}

impl Default for Age {
    fn default() -> Self {
        Self { week: 1, day: 1 }
    }
}

impl fmt::Display for Age {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}.{}", self.week, self.day)
    }
}

impl FromStr for Age {
    type Err = anyhow::Error;

    /// Parses the dotted wire form. Only the `digits.digits` shape is checked
    /// here; ranges are the form's job, so records the server already holds
    /// always load.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let Some((week, day)) = s.trim().split_once('.') else {
            bail!("Age '{}' must be in the format week.day (e.g. \"1.1\")", s);
        };
        let is_digits = |p: &str| !p.is_empty() && p.bytes().all(|b| b.is_ascii_digit());
        if !is_digits(week) || !is_digits(day) {
            bail!("Age '{}' must be in the format week.day (e.g. \"1.1\")", s);
        }
        Ok(Self {
            week: week.parse()?,
            day: day.parse()?,
        })
    }
}

impl Serialize for Age {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for Age {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = String::deserialize(deserializer)?;
        raw.parse().map_err(serde::de::Error::custom)
    }
}

/// A production batch as returned by `GET /batches/`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Batch {
    pub id: i64,
    #[serde(deserialize_with = "number_or_string")]
    pub shed_no: u32,
    pub batch_no: String,
    pub age: Age,
    pub opening_count: u32,
    #[serde(default)]
    pub mortality: u32,
    #[serde(default)]
    pub culls: u32,
    #[serde(default)]
    pub closing_count: u32,
    #[serde(default, alias = "table_eggs")]
    pub table: u32,
    #[serde(default)]
    pub jumbo: u32,
    #[serde(default)]
    pub cr: u32,
    pub date: NaiveDate,
}

impl Batch {
    /// Sum of the three egg categories. Display only, never sent.
    pub fn total_eggs(&self) -> u64 {
        egg_total(self.table, self.jumbo, self.cr)
    }

    /// Opening count less mortality and culls, floored at zero.
    pub fn calculated_closing_count(&self) -> u32 {
        self.opening_count
            .saturating_sub(self.mortality.saturating_add(self.culls))
    }

    /// Hen-day production: total eggs per closing bird, as a percentage.
    ///
    /// The API's `hd` field is the same ratio without the factor of 100;
    /// the detail view labels this one "HD %".
    pub fn hen_day_percent(&self) -> f64 {
        if self.closing_count == 0 {
            return 0.0;
        }
        self.total_eggs() as f64 / self.closing_count as f64 * 100.0
    }

    /// The mutable subset shown in the update modal.
    pub fn counts(&self) -> BatchUpdate {
        BatchUpdate {
            mortality: self.mortality,
            culls: self.culls,
            table: self.table,
            jumbo: self.jumbo,
            cr: self.cr,
        }
    }
}

pub fn egg_total(table: u32, jumbo: u32, cr: u32) -> u64 {
    u64::from(table) + u64::from(jumbo) + u64::from(cr)
}

/// Body of `POST /batches/`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewBatch {
    pub shed_no: u32,
    pub opening_count: u32,
    pub age: Age,
}

/// Body of `PATCH /batches/:id`. Exactly the five daily counts.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct BatchUpdate {
    pub mortality: u32,
    pub culls: u32,
    pub table: u32,
    pub jumbo: u32,
    pub cr: u32,
}

impl BatchUpdate {
    pub fn total_eggs(&self) -> u64 {
        egg_total(self.table, self.jumbo, self.cr)
    }
}

/// Kind of change an audit record describes.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum HistoryAction {
    Create,
    Update,
    Delete,
    /// Anything else the backend logs; kept verbatim.
    Other(String),
}

impl HistoryAction {
    pub fn as_str(&self) -> &str {
        match self {
            HistoryAction::Create => "CREATE",
            HistoryAction::Update => "UPDATE",
            HistoryAction::Delete => "DELETE",
            HistoryAction::Other(s) => s,
        }
    }
}

impl From<String> for HistoryAction {
    fn from(s: String) -> Self {
        match s.as_str() {
            "CREATE" => HistoryAction::Create,
            "UPDATE" => HistoryAction::Update,
            "DELETE" => HistoryAction::Delete,
            _ => HistoryAction::Other(s),
        }
    }
}

impl From<HistoryAction> for String {
    fn from(action: HistoryAction) -> Self {
        action.as_str().to_string()
    }
}

impl fmt::Display for HistoryAction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for HistoryAction {
    type Err = anyhow::Error;

    /// Parses a filter value. Only the three known actions are accepted.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_uppercase().as_str() {
            "CREATE" => Ok(HistoryAction::Create),
            "UPDATE" => Ok(HistoryAction::Update),
            "DELETE" => Ok(HistoryAction::Delete),
            _ => bail!(
                "Invalid action '{}'. Valid values: CREATE, UPDATE, DELETE",
                s
            ),
        }
    }
}

/// One audit-log entry from `GET /batch-history`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HistoryRecord {
    pub id: i64,
    pub batch_id: i64,
    #[serde(alias = "batch_no")]
    pub batch: String,
    pub action: HistoryAction,
    #[serde(alias = "timestamp")]
    pub changed_at: String,
    #[serde(default)]
    pub changed_by: Option<String>,
    #[serde(default)]
    pub previous_value: Option<String>,
    #[serde(default)]
    pub new_value: Option<String>,
    #[serde(default)]
    pub additional_info: Option<String>,
}

impl HistoryRecord {
    /// Who made the change; records without an actor came from the backend itself.
    pub fn actor(&self) -> &str {
        self.changed_by
            .as_deref()
            .filter(|s| !s.is_empty())
            .unwrap_or("System")
    }
}

/// Shed numbers arrive as JSON numbers from some deployments and as numeric
/// strings from others.
fn number_or_string<'de, D: Deserializer<'de>>(deserializer: D) -> Result<u32, D::Error> {
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Raw {
        Number(u32),
        Text(String),
    }

    match Raw::deserialize(deserializer)? {
        Raw::Number(n) => Ok(n),
        Raw::Text(s) => s.trim().parse().map_err(serde::de::Error::custom),
    }
}
