//! Trackwell WASM Module
//!
//! This crate provides WebAssembly bindings so the app can preview scores
//! in the browser while editing logs. All functions use the default scoring
//! policy; server-side responses remain authoritative.

use chrono::DateTime;
use serde::Serialize;
use wasm_bindgen::prelude::*;

use trackwell_shared::correlation;
use trackwell_shared::day_summary::{
    self, CalorieIntensity, ProteinQuality, WorkoutIntensity,
};
use trackwell_shared::events::HydrationEvent;
use trackwell_shared::pearson;
use trackwell_shared::ScoringPolicy;

/// Composite day score in [0, 100] from the day's aggregates
#[wasm_bindgen]
pub fn daily_score(
    calories: f64,
    protein_g: f64,
    hydration_percent: f64,
    workout_count: u32,
) -> u8 {
    day_summary::daily_score(
        calories,
        protein_g,
        hydration_percent,
        workout_count,
        &ScoringPolicy::default(),
    )
}

/// Hydration goal attainment in [0, 100], with the usual goal floor
#[wasm_bindgen]
pub fn hydration_percent(glasses_consumed: f64, goal_glasses: f64) -> f64 {
    let log = HydrationEvent {
        logged_at: DateTime::UNIX_EPOCH,
        glasses_consumed,
        goal_glasses,
    };
    day_summary::hydration_percent(Some(&log), &ScoringPolicy::default())
}

/// Estimated craving intensity on a 0-10 scale, one decimal place
#[wasm_bindgen]
pub fn craving_score(
    mood_rating: Option<u8>,
    notes: Option<String>,
    calorie_deficit_fraction: f64,
    sleep_deficit_fraction: f64,
) -> f64 {
    correlation::craving_score(
        mood_rating,
        notes.as_deref(),
        calorie_deficit_fraction,
        sleep_deficit_fraction,
        &ScoringPolicy::default(),
    )
}

/// Pearson correlation over two series, truncated to the shorter one
#[wasm_bindgen]
pub fn pearson_correlation(xs: &[f64], ys: &[f64]) -> f64 {
    let pairs: Vec<(f64, f64)> = xs.iter().copied().zip(ys.iter().copied()).collect();
    pearson(&pairs)
}

#[derive(Serialize)]
struct DayBands {
    calorie_intensity: CalorieIntensity,
    protein_quality: ProteinQuality,
    workout_intensity: WorkoutIntensity,
}

/// Classification bands for a day's aggregates, as a JSON string
#[wasm_bindgen]
pub fn classify_day(calories: f64, protein_g: f64, workout_count: u32) -> String {
    let policy = ScoringPolicy::default();
    let bands = DayBands {
        calorie_intensity: day_summary::classify_calories(calories, &policy),
        protein_quality: day_summary::classify_protein(protein_g, &policy),
        workout_intensity: day_summary::classify_workouts(workout_count),
    };
    serde_json::to_string(&bands).unwrap_or_default()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_daily_score_full_day() {
        assert_eq!(daily_score(2200.0, 140.0, 100.0, 1), 100);
    }

    #[test]
    fn test_daily_score_empty_day() {
        assert_eq!(daily_score(0.0, 0.0, 0.0, 0), 0);
    }

    #[test]
    fn test_hydration_percent_caps_at_one_hundred() {
        assert_eq!(hydration_percent(10.0, 8.0), 100.0);
        assert_eq!(hydration_percent(4.0, 8.0), 50.0);
    }

    #[test]
    fn test_hydration_percent_applies_goal_floor() {
        // a 4-glass goal is floored to 8 glasses
        assert_eq!(hydration_percent(5.0, 4.0), 62.5);
    }

    #[test]
    fn test_craving_score_combines_inputs() {
        let score = craving_score(Some(3), Some("craving chips".to_string()), 0.5, 1.0);
        assert_eq!(score, 6.3);
    }

    #[test]
    fn test_pearson_perfect_line() {
        let xs = [1.0, 2.0, 3.0, 4.0];
        let ys = [2.0, 4.0, 6.0, 8.0];
        assert!((pearson_correlation(&xs, &ys) - 1.0).abs() < 1e-12);
    }

    #[test]
    fn test_pearson_truncates_to_shorter_series() {
        let xs = [1.0, 2.0, 3.0];
        let ys = [5.0, 5.0];
        // truncated pair set has zero variance on y
        assert_eq!(pearson_correlation(&xs, &ys), 0.0);
    }

    #[test]
    fn test_classify_day_labels() {
        let json = classify_day(2200.0, 140.0, 1);
        assert!(json.contains("\"calorie_intensity\":\"ok\""));
        assert!(json.contains("\"protein_quality\":\"high\""));
        assert!(json.contains("\"workout_intensity\":\"light\""));
    }
}
