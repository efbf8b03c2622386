//! Calculation parameters

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Configuration for one calculation run.
///
/// Both bounds are inclusive and either may be absent. `start_date <= end_date`
/// is left to the caller; an inverted range simply matches no timestamped post.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CalculationParameters {
    /// Opaque label copied onto every node of the result tree
    pub stat_name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub start_date: Option<DateTime<Utc>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub end_date: Option<DateTime<Utc>>,
}

impl CalculationParameters {
    pub fn new(stat_name: impl Into<String>) -> Self {
        Self {
            stat_name: stat_name.into(),
            start_date: None,
            end_date: None,
        }
    }

    pub fn with_start_date(mut self, start_date: DateTime<Utc>) -> Self {
        self.start_date = Some(start_date);
        self
    }

    pub fn with_end_date(mut self, end_date: DateTime<Utc>) -> Self {
        self.end_date = Some(end_date);
        self
    }

    pub fn with_range(mut self, start_date: DateTime<Utc>, end_date: DateTime<Utc>) -> Self {
        self.start_date = Some(start_date);
        self.end_date = Some(end_date);
        self
    }

    /// Whether `ts` lies inside the configured bounds. Absent bounds are open.
    pub fn contains(&self, ts: DateTime<Utc>) -> bool {
        self.start_date.is_none_or(|start| ts >= start)
            && self.end_date.is_none_or(|end| ts <= end)
    }

    pub fn is_inverted(&self) -> bool {
        matches!((self.start_date, self.end_date), (Some(start), Some(end)) if start > end)
    }
}
