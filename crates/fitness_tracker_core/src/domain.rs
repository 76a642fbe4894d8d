//! crates/fitness_tracker_core/src/domain.rs
//!
//! Defines the core data structures for the application.
//! These structs are independent of any database or HTTP framework; the ones
//! that cross the API boundary derive `Serialize` so they can be handed back
//! as JSON unchanged.

use std::fmt;
use std::str::FromStr;

use chrono::NaiveDate;
use serde::Serialize;

use crate::error::ProgressError;

/// The wire format of every date handled by the system.
pub const DATE_FORMAT: &str = "%Y-%m-%d";

/// Parses a `YYYY-MM-DD` string, reporting the offending input on failure.
pub fn parse_date(date: &str) -> Result<NaiveDate, ProgressError> {
    NaiveDate::parse_from_str(date, DATE_FORMAT).map_err(|source| ProgressError::MalformedDate {
        date: date.to_string(),
        source,
    })
}

/// One logged exercise session. Records are immutable once created.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct WorkoutRecord {
    pub user_id: i64,
    pub exercise_id: i64,
    pub repetitions: u32,
    /// Kilograms.
    pub weight: f64,
    /// `YYYY-MM-DD`. Kept as text so that a record survives the store exactly
    /// as it was logged; it is parsed whenever dates are compared.
    pub date: String,
    pub comment: String,
}

impl WorkoutRecord {
    pub fn parsed_date(&self) -> Result<NaiveDate, ProgressError> {
        parse_date(&self.date)
    }
}

// Represents a user - used throughout app
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct User {
    pub user_id: i64,
    pub username: String,
}

// Only used internally for login and password changes - contains sensitive data
#[derive(Debug, Clone)]
pub struct UserCredentials {
    pub user_id: i64,
    pub username: String,
    pub hashed_password: String,
}

/// The numeric field of a [`WorkoutRecord`] that progress is measured by.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub enum Metric {
    #[default]
    Weight,
    Repetitions,
}

impl Metric {
    pub fn as_str(&self) -> &'static str {
        match self {
            Metric::Weight => "weight",
            Metric::Repetitions => "repetitions",
        }
    }
}

impl FromStr for Metric {
    type Err = ProgressError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "weight" => Ok(Metric::Weight),
            "repetitions" => Ok(Metric::Repetitions),
            other => Err(ProgressError::InvalidMetric(other.to_string())),
        }
    }
}

impl fmt::Display for Metric {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A summed metric. Repetitions stay integral so they serialize as `30`, not `30.0`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(untagged)]
pub enum MetricValue {
    Repetitions(u64),
    Weight(f64),
}

/// Weekly totals as parallel arrays, ready to feed a chart.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct WeeklyProgress {
    /// Sunday week-start dates, `YYYY-MM-DD`, ascending and unique.
    pub labels: Vec<String>,
    pub data: Vec<MetricValue>,
}

/// Optional filters forwarded to the exercise catalog.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ExerciseFilter {
    pub category: Option<String>,
    pub equipment: Option<String>,
}
