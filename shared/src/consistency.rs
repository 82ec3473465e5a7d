//! Consistency score aggregator
//!
//! Rolls a trailing window of day buckets into 0-100 habit scores: calorie
//! adherence, hydration ratio, and workout frequency, plus their mean. The
//! window is expected to be contiguous days (typically the last 7) and every
//! day counts toward macro adherence, logged or not; an unlogged day is a
//! day the goal was missed, not missing data.

use serde::{Deserialize, Serialize};

use crate::buckets::DayBucket;
use crate::policy::ScoringPolicy;

/// 0-100 habit scores over a trailing window.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ConsistencyReport {
    pub overall: u8,
    pub macros: u8,
    pub hydration: u8,
    pub workouts: u8,
}

/// Calorie adherence: 100 minus the mean relative deviation from the goal,
/// as a percentage. Days without food logs carry full deviation. A missing
/// or non-positive goal scores 0.
pub fn macro_consistency(days: &[DayBucket], calorie_goal: Option<f64>) -> u8 {
    let goal = match calorie_goal {
        Some(goal) if goal > 0.0 => goal,
        _ => return 0,
    };
    if days.is_empty() {
        return 0;
    }

    let total_deviation: f64 = days
        .iter()
        .map(|day| (day.total_calories() - goal).abs() / goal)
        .sum();
    let mean_deviation = total_deviation / days.len() as f64;

    round_clamped((1.0 - mean_deviation) * 100.0)
}

/// Mean hydration ratio over days that actually logged hydration; windows
/// with no logs score 0. Per-day ratios are uncapped (an over-goal day can
/// offset an under-goal one) and a zero-goal log contributes 0.
pub fn hydration_consistency(days: &[DayBucket]) -> u8 {
    let ratios: Vec<f64> = days
        .iter()
        .filter_map(|day| day.hydration.as_ref())
        .map(|log| {
            if log.goal_glasses > 0.0 {
                log.glasses_consumed / log.goal_glasses * 100.0
            } else {
                0.0
            }
        })
        .collect();

    if ratios.is_empty() {
        return 0;
    }
    round_clamped(ratios.iter().sum::<f64>() / ratios.len() as f64)
}

/// Share of a weekly workout target met within the window. A day qualifies
/// when any of its workouts lasted at least the policy minimum. The
/// denominator is the weekly target, not the window length, so longer
/// windows can saturate at 100.
pub fn workout_consistency(days: &[DayBucket], policy: &ScoringPolicy) -> u8 {
    if policy.weekly_workout_target <= 0.0 {
        return 0;
    }
    let qualifying = days
        .iter()
        .filter(|day| day.has_workout_of_at_least(policy.workout_min_duration_minutes))
        .count();

    round_clamped(qualifying as f64 / policy.weekly_workout_target * 100.0)
}

/// All three sub-scores plus their rounded mean.
pub fn consistency_report(
    days: &[DayBucket],
    calorie_goal: Option<f64>,
    policy: &ScoringPolicy,
) -> ConsistencyReport {
    let macros = macro_consistency(days, calorie_goal);
    let hydration = hydration_consistency(days);
    let workouts = workout_consistency(days, policy);
    let sum = f64::from(macros) + f64::from(hydration) + f64::from(workouts);
    let overall = round_clamped(sum / 3.0);

    ConsistencyReport {
        overall,
        macros,
        hydration,
        workouts,
    }
}

fn round_clamped(value: f64) -> u8 {
    value.clamp(0.0, 100.0).round() as u8
}
