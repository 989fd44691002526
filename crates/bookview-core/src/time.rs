//! Reference dates for point-in-time and comparative statements

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::error::{CoreError, CoreResult};

/// Date a statement is computed for
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase", tag = "kind", content = "date")]
pub enum ReferenceDate {
    #[default]
    Today,
    On(NaiveDate),
}

impl ReferenceDate {
    /// Date to ask the source for; `None` means the live statement
    pub fn as_of(&self) -> Option<NaiveDate> {
        match self {
            ReferenceDate::Today => None,
            ReferenceDate::On(date) => Some(*date),
        }
    }

    /// Human-readable label
    pub fn description(&self) -> String {
        match self {
            ReferenceDate::Today => "Today".to_string(),
            ReferenceDate::On(date) => date.format("%d/%m/%Y").to_string(),
        }
    }
}

impl std::str::FromStr for ReferenceDate {
    type Err = CoreError;
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "" | "today" => Ok(ReferenceDate::Today),
            _ => parse_reference_date(s).map(ReferenceDate::On),
        }
    }
}

/// Parse a date written as `YYYY-MM-DD` or `DD-MM-YYYY`
pub fn parse_reference_date(value: &str) -> CoreResult<NaiveDate> {
    let value = value.trim();
    NaiveDate::parse_from_str(value, "%Y-%m-%d")
        .or_else(|_| NaiveDate::parse_from_str(value, "%d-%m-%Y"))
        .map_err(|_| CoreError::InvalidDate {
            value: value.to_string(),
        })
}
