//! Scoring policy
//!
//! Every tunable number the engine consumes lives in one record so that
//! deployments can adjust bands and weights through configuration without
//! touching algorithm code. The defaults below are the product's published
//! behavior; tests elsewhere assume them.

use serde::{Deserialize, Serialize};

/// Tunable thresholds and weights for day scoring, consistency, and the
/// craving heuristic.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScoringPolicy {
    /// Calories below this classify the day's intake as low (kcal).
    pub calorie_low_kcal: f64,
    /// Calories at or above this classify the day's intake as high (kcal).
    pub calorie_high_kcal: f64,
    /// Protein below this classifies the day as low (grams).
    pub protein_low_g: f64,
    /// Protein at or above this classifies the day as high (grams).
    pub protein_high_g: f64,

    /// Calorie intake treated as "full credit" by the day score (kcal).
    pub calorie_reference_kcal: f64,
    /// Protein intake treated as "full credit" by the day score (grams).
    pub protein_reference_g: f64,
    /// Day-score points awarded for full calorie credit.
    pub calorie_weight: f64,
    /// Day-score points awarded for full protein credit.
    pub protein_weight: f64,
    /// Day-score points awarded for 100% hydration.
    pub hydration_weight: f64,
    /// Flat day-score bonus for logging at least one workout.
    pub workout_bonus: f64,

    /// Floor applied to hydration goals when computing the daily percentage.
    pub min_goal_glasses: f64,

    /// Minimum workout duration that counts toward workout consistency
    /// (minutes).
    pub workout_min_duration_minutes: f64,
    /// Workout-consistency denominator: qualifying days per week treated as
    /// 100%. Fixed at 7 regardless of window length.
    pub weekly_workout_target: f64,

    /// Weight of the mood term in the craving heuristic.
    pub craving_mood_weight: f64,
    /// Weight of the free-text notes term.
    pub craving_notes_weight: f64,
    /// Weight of the calorie-deficit term.
    pub craving_deficit_weight: f64,
    /// Weight of the sleep-deficit term.
    pub craving_sleep_weight: f64,
    /// Notes contribution when craving or junk-food language is present.
    pub notes_craving_score: f64,
    /// Notes contribution when fatigue or stress language is present.
    pub notes_fatigue_score: f64,
    /// Notes deduction when positive language is present.
    pub notes_positive_score: f64,

    /// |r| above this reads as a real association when narrating
    /// correlations.
    pub association_threshold: f64,
}

impl Default for ScoringPolicy {
    fn default() -> Self {
        Self {
            calorie_low_kcal: 1500.0,
            calorie_high_kcal: 2300.0,
            protein_low_g: 60.0,
            protein_high_g: 120.0,

            calorie_reference_kcal: 2000.0,
            protein_reference_g: 120.0,
            calorie_weight: 40.0,
            protein_weight: 30.0,
            hydration_weight: 20.0,
            workout_bonus: 10.0,

            min_goal_glasses: 8.0,

            workout_min_duration_minutes: 30.0,
            weekly_workout_target: 7.0,

            craving_mood_weight: 0.5,
            craving_notes_weight: 0.2,
            craving_deficit_weight: 0.2,
            craving_sleep_weight: 0.1,
            notes_craving_score: 0.9,
            notes_fatigue_score: 0.6,
            notes_positive_score: 0.6,

            association_threshold: 0.25,
        }
    }
}
