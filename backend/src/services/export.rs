//! CSV export of month views for spreadsheets

use serde::Serialize;
use uuid::Uuid;

use crate::error::{ApiError, ApiResult};
use crate::services::InsightsService;
use crate::state::AppState;
use trackwell_shared::day_summary::{CalorieIntensity, ProteinQuality, WorkoutIntensity};
use trackwell_shared::RankingMetric;

/// CSV export row for one calendar day of a month view
#[derive(Debug, Clone, Serialize)]
pub struct DayCsvRow {
    pub date: String,
    pub score: u8,
    pub calories: f64,
    pub protein_g: f64,
    pub carbs_g: f64,
    pub fat_g: f64,
    pub workout_count: u32,
    pub hydration_glasses: f64,
    pub hydration_percent: f64,
    pub calorie_intensity: CalorieIntensity,
    pub protein_quality: ProteinQuality,
    pub workout_intensity: WorkoutIntensity,
    pub best_day: bool,
    pub worst_day: bool,
}

/// Data export service
pub struct ExportService;

impl ExportService {
    /// Export a month view as CSV, one row per calendar day.
    pub async fn month_csv(
        state: &AppState,
        user_id: Uuid,
        month: &str,
        metric: RankingMetric,
    ) -> ApiResult<String> {
        let view = InsightsService::month_view(state, user_id, month, metric).await?;

        let rows: Vec<DayCsvRow> = view
            .days
            .into_iter()
            .map(|d| DayCsvRow {
                date: d.date.format("%Y-%m-%d").to_string(),
                score: d.score,
                calories: d.calories,
                protein_g: d.protein_g,
                carbs_g: d.carbs_g,
                fat_g: d.fat_g,
                workout_count: d.workout_count,
                hydration_glasses: d.hydration_glasses,
                hydration_percent: d.hydration_percent,
                calorie_intensity: d.calorie_intensity,
                protein_quality: d.protein_quality,
                workout_intensity: d.workout_intensity,
                best_day: d.is_best_day,
                worst_day: d.is_worst_day,
            })
            .collect();

        Self::to_csv(&rows)
    }

    /// Convert data to CSV string
    fn to_csv<T: Serialize>(data: &[T]) -> Result<String, ApiError> {
        let mut wtr = csv::Writer::from_writer(vec![]);
        for record in data {
            wtr.serialize(record)
                .map_err(|e| ApiError::Internal(anyhow::anyhow!("CSV serialization error: {}", e)))?;
        }
        let bytes = wtr
            .into_inner()
            .map_err(|e| ApiError::Internal(anyhow::anyhow!("CSV flush error: {}", e)))?;
        String::from_utf8(bytes)
            .map_err(|e| ApiError::Internal(anyhow::anyhow!("CSV encoding error: {}", e)))
    }
}
