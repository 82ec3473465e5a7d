//! Day summary classifier
//!
//! Collapses one day's bucket into display-ready totals, classification
//! bands, and a 0-100 balance score. Pure arithmetic over the bucket plus
//! the [`ScoringPolicy`]; a day with no events produces a valid all-zero
//! summary rather than an error.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::buckets::DayBucket;
use crate::events::HydrationEvent;
use crate::policy::ScoringPolicy;

// ============================================================================
// Classification bands
// ============================================================================

/// Calorie intake band for a day.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CalorieIntensity {
    Low,
    Ok,
    High,
}

impl CalorieIntensity {
    pub fn description(&self) -> &'static str {
        match self {
            Self::Low => "below the target intake band",
            Self::Ok => "within the target intake band",
            Self::High => "above the target intake band",
        }
    }
}

/// Protein intake band for a day.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ProteinQuality {
    Low,
    Ok,
    High,
}

impl ProteinQuality {
    pub fn description(&self) -> &'static str {
        match self {
            Self::Low => "below the protein target",
            Self::Ok => "around the protein target",
            Self::High => "above the protein target",
        }
    }
}

/// Workout load band for a day, from the session count alone.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum WorkoutIntensity {
    None,
    Light,
    Hard,
}

impl WorkoutIntensity {
    pub fn description(&self) -> &'static str {
        match self {
            Self::None => "no workouts logged",
            Self::Light => "one workout logged",
            Self::Hard => "multiple workouts logged",
        }
    }
}

pub fn classify_calories(calories: f64, policy: &ScoringPolicy) -> CalorieIntensity {
    if calories < policy.calorie_low_kcal {
        CalorieIntensity::Low
    } else if calories < policy.calorie_high_kcal {
        CalorieIntensity::Ok
    } else {
        CalorieIntensity::High
    }
}

pub fn classify_protein(protein_g: f64, policy: &ScoringPolicy) -> ProteinQuality {
    if protein_g < policy.protein_low_g {
        ProteinQuality::Low
    } else if protein_g < policy.protein_high_g {
        ProteinQuality::Ok
    } else {
        ProteinQuality::High
    }
}

pub fn classify_workouts(count: u32) -> WorkoutIntensity {
    match count {
        0 => WorkoutIntensity::None,
        1 => WorkoutIntensity::Light,
        _ => WorkoutIntensity::Hard,
    }
}

// ============================================================================
// Hydration and the day score
// ============================================================================

/// Percentage of the hydration goal reached, capped at 100.
///
/// The goal is floored at `min_goal_glasses` so tiny or zero goals cannot
/// inflate the percentage; no log at all reads as 0%.
pub fn hydration_percent(log: Option<&HydrationEvent>, policy: &ScoringPolicy) -> f64 {
    let Some(log) = log else {
        return 0.0;
    };
    let goal = log.goal_glasses.max(policy.min_goal_glasses);
    if goal <= 0.0 {
        return 0.0;
    }
    (log.glasses_consumed / goal * 100.0).min(100.0)
}

/// Composite 0-100 day score.
///
/// Calorie and protein terms award up to their weight linearly, saturating
/// at the reference intake; hydration awards proportionally to the capped
/// percentage; any logged workout earns the flat bonus.
pub fn daily_score(
    calories: f64,
    protein_g: f64,
    hydration_percent: f64,
    workout_count: u32,
    policy: &ScoringPolicy,
) -> u8 {
    let calorie_part =
        saturating_fraction(calories, policy.calorie_reference_kcal) * policy.calorie_weight;
    let protein_part =
        saturating_fraction(protein_g, policy.protein_reference_g) * policy.protein_weight;
    let hydration_part = hydration_percent / 100.0 * policy.hydration_weight;
    let workout_part = if workout_count > 0 {
        policy.workout_bonus
    } else {
        0.0
    };

    let total = calorie_part + protein_part + hydration_part + workout_part;
    total.round().clamp(0.0, 100.0) as u8
}

/// `value / denominator` capped at 1.0, reading a non-positive denominator
/// as zero progress.
fn saturating_fraction(value: f64, denominator: f64) -> f64 {
    if denominator <= 0.0 {
        return 0.0;
    }
    (value / denominator).min(1.0)
}

// ============================================================================
// Day summary
// ============================================================================

/// Display-ready summary of one calendar day.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DaySummary {
    pub date: NaiveDate,
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
    pub score: u8,
    pub is_best_day: bool,
    pub is_worst_day: bool,
}

/// Classify one bucket. Best/worst flags start false; ranking over a range
/// is a separate pass (see [`crate::markers`]).
pub fn summarize_day(bucket: &DayBucket, policy: &ScoringPolicy) -> DaySummary {
    let calories = bucket.total_calories();
    let protein_g = bucket.total_protein_g();
    let workout_count = bucket.workout_count();
    let glasses = bucket
        .hydration
        .as_ref()
        .map(|log| log.glasses_consumed)
        .unwrap_or(0.0);
    let hydration = hydration_percent(bucket.hydration.as_ref(), policy);

    DaySummary {
        date: bucket.date,
        calories,
        protein_g,
        carbs_g: bucket.total_carbs_g(),
        fat_g: bucket.total_fat_g(),
        workout_count,
        hydration_glasses: glasses,
        hydration_percent: hydration,
        calorie_intensity: classify_calories(calories, policy),
        protein_quality: classify_protein(protein_g, policy),
        workout_intensity: classify_workouts(workout_count),
        score: daily_score(calories, protein_g, hydration, workout_count, policy),
        is_best_day: false,
        is_worst_day: false,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::events::{FoodEvent, WorkoutEvent};
    use chrono::{DateTime, Utc};
    use proptest::prelude::*;
    use rstest::rstest;

    fn policy() -> ScoringPolicy {
        ScoringPolicy::default()
    }

    fn day() -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 5, 10).unwrap()
    }

    fn at(hour: u32) -> DateTime<Utc> {
        day().and_hms_opt(hour, 0, 0).unwrap().and_utc()
    }

    fn hydration_log(glasses: f64, goal: f64) -> HydrationEvent {
        HydrationEvent {
            logged_at: at(21),
            glasses_consumed: glasses,
            goal_glasses: goal,
        }
    }

    #[rstest]
    #[case(0.0, CalorieIntensity::Low)]
    #[case(1499.9, CalorieIntensity::Low)]
    #[case(1500.0, CalorieIntensity::Ok)]
    #[case(2299.9, CalorieIntensity::Ok)]
    #[case(2300.0, CalorieIntensity::High)]
    #[case(4000.0, CalorieIntensity::High)]
    fn calorie_bands_use_half_open_intervals(
        #[case] calories: f64,
        #[case] expected: CalorieIntensity,
    ) {
        assert_eq!(classify_calories(calories, &policy()), expected);
    }

    #[rstest]
    #[case(0.0, ProteinQuality::Low)]
    #[case(59.9, ProteinQuality::Low)]
    #[case(60.0, ProteinQuality::Ok)]
    #[case(119.9, ProteinQuality::Ok)]
    #[case(120.0, ProteinQuality::High)]
    fn protein_bands_use_half_open_intervals(
        #[case] protein: f64,
        #[case] expected: ProteinQuality,
    ) {
        assert_eq!(classify_protein(protein, &policy()), expected);
    }

    #[rstest]
    #[case(0, WorkoutIntensity::None)]
    #[case(1, WorkoutIntensity::Light)]
    #[case(2, WorkoutIntensity::Hard)]
    #[case(5, WorkoutIntensity::Hard)]
    fn workout_bands_split_on_count(#[case] count: u32, #[case] expected: WorkoutIntensity) {
        assert_eq!(classify_workouts(count), expected);
    }

    #[test]
    fn hydration_percent_caps_at_one_hundred() {
        let log = hydration_log(12.0, 8.0);
        assert_eq!(hydration_percent(Some(&log), &policy()), 100.0);
    }

    #[test]
    fn hydration_goal_is_floored_at_eight_glasses() {
        // a 4-glass goal is measured against the 8-glass floor
        let log = hydration_log(4.0, 4.0);
        assert_eq!(hydration_percent(Some(&log), &policy()), 50.0);
    }

    #[test]
    fn zero_goal_hydration_never_divides_by_zero() {
        let log = hydration_log(4.0, 0.0);
        assert_eq!(hydration_percent(Some(&log), &policy()), 50.0);

        let mut no_floor = policy();
        no_floor.min_goal_glasses = 0.0;
        assert_eq!(hydration_percent(Some(&log), &no_floor), 0.0);
    }

    #[test]
    fn missing_hydration_log_reads_as_zero_percent() {
        assert_eq!(hydration_percent(None, &policy()), 0.0);
    }

    #[test]
    fn perfect_day_scores_one_hundred() {
        assert_eq!(daily_score(2000.0, 120.0, 100.0, 1, &policy()), 100);
    }

    #[test]
    fn empty_day_scores_zero() {
        assert_eq!(daily_score(0.0, 0.0, 0.0, 0, &policy()), 0);
    }

    #[test]
    fn calorie_and_protein_terms_saturate_at_reference() {
        // doubling intake past the reference adds nothing
        assert_eq!(
            daily_score(4000.0, 240.0, 100.0, 1, &policy()),
            daily_score(2000.0, 120.0, 100.0, 1, &policy()),
        );
    }

    #[test]
    fn workout_bonus_is_flat_regardless_of_count() {
        let one = daily_score(1000.0, 50.0, 50.0, 1, &policy());
        let three = daily_score(1000.0, 50.0, 50.0, 3, &policy());
        assert_eq!(one, three);
    }

    #[test]
    fn summary_of_empty_bucket_is_all_zero() {
        let bucket = DayBucket::empty(day());
        let summary = summarize_day(&bucket, &policy());

        assert_eq!(summary.calories, 0.0);
        assert_eq!(summary.protein_g, 0.0);
        assert_eq!(summary.carbs_g, 0.0);
        assert_eq!(summary.fat_g, 0.0);
        assert_eq!(summary.workout_count, 0);
        assert_eq!(summary.hydration_glasses, 0.0);
        assert_eq!(summary.hydration_percent, 0.0);
        assert_eq!(summary.workout_intensity, WorkoutIntensity::None);
        assert_eq!(summary.score, 0);
        assert!(!summary.is_best_day);
        assert!(!summary.is_worst_day);
    }

    #[test]
    fn summary_matches_published_example() {
        // 2000 kcal, 120 g protein, goal hydration, one workout => 100
        let mut bucket = DayBucket::empty(day());
        bucket.food.push(FoodEvent {
            eaten_at: at(12),
            calories: 2000.0,
            protein_g: 120.0,
            carbs_g: 200.0,
            fat_g: 60.0,
        });
        bucket.workouts.push(WorkoutEvent {
            started_at: at(18),
            duration_minutes: 45.0,
            calories_burned: 400.0,
        });
        bucket.hydration = Some(hydration_log(8.0, 8.0));

        let summary = summarize_day(&bucket, &policy());
        assert_eq!(summary.score, 100);
        assert_eq!(summary.calorie_intensity, CalorieIntensity::Ok);
        assert_eq!(summary.protein_quality, ProteinQuality::High);
        assert_eq!(summary.workout_intensity, WorkoutIntensity::Light);
        assert_eq!(summary.hydration_glasses, 8.0);
        assert_eq!(summary.hydration_percent, 100.0);
    }

    #[test]
    fn summary_carries_the_raw_glasses_count() {
        let mut bucket = DayBucket::empty(day());
        bucket.hydration = Some(hydration_log(6.0, 8.0));

        let summary = summarize_day(&bucket, &policy());
        assert_eq!(summary.hydration_glasses, 6.0);
        assert_eq!(summary.hydration_percent, 75.0);

        let json = serde_json::to_value(&summary).unwrap();
        assert_eq!(json["hydration_glasses"], 6.0);
    }

    proptest! {
        #[test]
        fn score_is_always_within_bounds(
            calories in 0.0f64..20000.0,
            protein in 0.0f64..2000.0,
            hydration in 0.0f64..100.0,
            workouts in 0u32..10,
        ) {
            let score = daily_score(calories, protein, hydration, workouts, &policy());
            prop_assert!(score <= 100);
        }

        #[test]
        fn score_is_monotone_in_calories(
            lower in 0.0f64..10000.0,
            bump in 0.0f64..10000.0,
        ) {
            let a = daily_score(lower, 50.0, 50.0, 0, &policy());
            let b = daily_score(lower + bump, 50.0, 50.0, 0, &policy());
            prop_assert!(b >= a);
        }

        #[test]
        fn hydration_percent_is_bounded(glasses in 0.0f64..100.0, goal in 0.0f64..100.0) {
            let log = hydration_log(glasses, goal);
            let percent = hydration_percent(Some(&log), &policy());
            prop_assert!((0.0..=100.0).contains(&percent));
        }
    }
}
