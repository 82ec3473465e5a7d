//! API request and response types

use serde::{Deserialize, Serialize};

use crate::consistency::ConsistencyReport;
use crate::correlation::{Association, SleepCorrelationPoint};
use crate::day_summary::DaySummary;
use crate::markers::RankingMetric;

/// Default trailing window for consistency and correlation queries (days).
pub const DEFAULT_WINDOW_DAYS: u32 = 7;

/// Largest trailing window the API will compute (days).
pub const MAX_WINDOW_DAYS: u32 = 90;

/// API error response
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ErrorResponse {
    pub error: ErrorDetail,
}

/// Error detail
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ErrorDetail {
    pub code: String,
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub field: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<serde_json::Value>,
}

/// Month view query parameters
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MonthViewQuery {
    /// Metric used to mark best/worst days; calories when omitted.
    #[serde(default)]
    pub metric: Option<RankingMetric>,
}

/// Trailing-window query parameters shared by the consistency and sleep
/// correlation endpoints
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WindowQuery {
    /// Window length in days, 1..=90; defaults to 7.
    pub window_days: Option<u32>,
    /// Daily calorie goal override; the configured default applies when
    /// omitted.
    pub calorie_goal: Option<f64>,
}

/// Month view response: one summary per calendar day, extremes marked
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MonthViewResponse {
    pub month: String,
    pub metric: RankingMetric,
    pub days: Vec<DaySummary>,
}

/// Consistency scores over a trailing window
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ConsistencyResponse {
    pub window_days: u32,
    pub overall: u8,
    pub macros: u8,
    pub hydration: u8,
    pub workouts: u8,
}

impl ConsistencyResponse {
    pub fn from_report(window_days: u32, report: ConsistencyReport) -> Self {
        Self {
            window_days,
            overall: report.overall,
            macros: report.macros,
            hydration: report.hydration,
            workouts: report.workouts,
        }
    }
}

/// Sleep correlation response over a trailing window
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SleepCorrelationResponse {
    pub window_days: u32,
    pub points: Vec<SleepCorrelationPoint>,
    pub calories_r: f64,
    pub cravings_r: f64,
    pub calories_association: Association,
    pub cravings_association: Association,
    /// Human-readable reading of the calories coefficient.
    pub calories_insight: String,
    /// Human-readable reading of the cravings coefficient.
    pub cravings_insight: String,
}
