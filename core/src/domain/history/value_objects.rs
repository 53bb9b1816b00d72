use std::{fmt, str::FromStr};

use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::domain::common::entities::app_errors::CoreError;

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct SaveAnalysisInput {
    pub filename: String,
    #[schema(value_type = Object)]
    pub analysis: serde_json::Value,
    #[serde(default)]
    pub consumed: bool,
}

/// How far back a history query reaches.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "lowercase")]
pub enum HistoryPeriod {
    Day,
    Week,
    Month,
    #[default]
    All,
}

impl HistoryPeriod {
    /// Oldest timestamp included, or `None` for no lower bound.
    pub fn since(self, now: DateTime<Utc>) -> Option<DateTime<Utc>> {
        match self {
            HistoryPeriod::Day => Some(now - Duration::days(1)),
            HistoryPeriod::Week => Some(now - Duration::weeks(1)),
            HistoryPeriod::Month => Some(now - Duration::days(30)),
            HistoryPeriod::All => None,
        }
    }
}

impl FromStr for HistoryPeriod {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "day" => Ok(HistoryPeriod::Day),
            "week" => Ok(HistoryPeriod::Week),
            "month" => Ok(HistoryPeriod::Month),
            "all" | "" => Ok(HistoryPeriod::All),
            other => Err(CoreError::Invalid(format!("unknown history period '{other}'"))),
        }
    }
}

impl fmt::Display for HistoryPeriod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let period = match self {
            HistoryPeriod::Day => "day",
            HistoryPeriod::Week => "week",
            HistoryPeriod::Month => "month",
            HistoryPeriod::All => "all",
        };
        f.write_str(period)
    }
}

#[derive(Debug, Clone, Copy, Default)]
pub struct GetHistoryInput {
    pub period: HistoryPeriod,
    pub consumed: Option<bool>,
}

#[derive(Debug, Clone, Default)]
pub struct GetHistoryFilter {
    pub since: Option<DateTime<Utc>>,
    pub consumed: Option<bool>,
}
