//! Sleep and next-day craving correlator
//!
//! Builds chart-ready points pairing each night's sleep with the following
//! day's intake and an estimated craving intensity, then computes Pearson
//! coefficients over the pairs. The craving number is a weighted heuristic
//! over mood, free-text notes, calorie deficit, and sleep deficit; it is an
//! estimate for trend lines, not a clinical measure.

use chrono::{Datelike, NaiveDate};
use regex_lite::Regex;
use serde::{Deserialize, Serialize};

use crate::buckets::DayBucket;
use crate::calendar::weekday_label;
use crate::policy::ScoringPolicy;

/// Floor for the sleep-deficit denominator so near-zero mean sleep cannot
/// blow the fraction up (hours).
const SLEEP_DENOMINATOR_FLOOR_HOURS: f64 = 0.1;

/// Language that reads as craving or junk-food pressure.
const CRAVING_VOCABULARY: &[&str] = &[
    "crav", "hunger", "hungry", "junk", "snack", "sugar", "sweet", "binge", "candy", "chips",
    "chocolate", "fast food",
];

/// Language that reads as fatigue or stress.
const FATIGUE_VOCABULARY: &[&str] = &[
    "tired", "fatigue", "exhaust", "stress", "anxious", "anxiety", "drained", "overwhelm",
    "low energy", "burnt out", "burned out",
];

/// Language that reads as feeling on top of things.
const POSITIVE_VOCABULARY: &[&str] = &[
    "great", "good", "energized", "rested", "refreshed", "motivated", "happy", "calm", "strong",
    "focused",
];

// ============================================================================
// Report types
// ============================================================================

/// One night of sleep joined with the following day's intake and craving.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SleepCorrelationPoint {
    pub date: NaiveDate,
    /// Short weekday label for chart axes ("Mon".."Sun").
    pub date_label: String,
    pub sleep_hours: f64,
    pub next_day_calories: Option<f64>,
    pub next_day_craving_score: f64,
    /// True when the calories came from a same-weekday substitute because no
    /// literal next-day aggregate existed.
    pub weekday_fallback: bool,
}

/// Reading of a Pearson coefficient against the association threshold.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Association {
    Positive,
    Negative,
    NoStrongLink,
}

impl Association {
    pub fn description(&self) -> &'static str {
        match self {
            Self::Positive => "a positive association",
            Self::Negative => "a negative association",
            Self::NoStrongLink => "no strong link",
        }
    }
}

/// Full correlator output for one window.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SleepCorrelationReport {
    pub points: Vec<SleepCorrelationPoint>,
    pub calories_r: f64,
    pub cravings_r: f64,
    pub calories_association: Association,
    pub cravings_association: Association,
}

/// Food totals for one logged day, the correlator's join target.
#[derive(Debug, Clone, PartialEq)]
pub struct DailyIntake {
    pub date: NaiveDate,
    pub calories: f64,
}

/// Calorie totals for every day in the window that logged food, in date
/// order. Days without food logs are absent rather than zero so the
/// next-day join can distinguish "no data" from "ate nothing".
pub fn daily_intake(days: &[DayBucket]) -> Vec<DailyIntake> {
    days.iter()
        .filter(|day| !day.food.is_empty())
        .map(|day| DailyIntake {
            date: day.date,
            calories: day.total_calories(),
        })
        .collect()
}

// ============================================================================
// Craving heuristic
// ============================================================================

/// Compiled keyword matchers for the three note vocabularies.
struct NotesScanner {
    craving: Regex,
    fatigue: Regex,
    positive: Regex,
}

impl NotesScanner {
    fn new() -> Self {
        Self {
            craving: vocabulary_regex(CRAVING_VOCABULARY),
            fatigue: vocabulary_regex(FATIGUE_VOCABULARY),
            positive: vocabulary_regex(POSITIVE_VOCABULARY),
        }
    }

    /// Keyword contribution in [0, 1].
    fn score(&self, notes: &str, policy: &ScoringPolicy) -> f64 {
        let mut score: f64 = 0.0;
        if self.craving.is_match(notes) {
            score += policy.notes_craving_score;
        }
        if self.fatigue.is_match(notes) {
            score += policy.notes_fatigue_score;
        }
        if self.positive.is_match(notes) {
            score -= policy.notes_positive_score;
        }
        score.clamp(0.0, 1.0)
    }
}

fn vocabulary_regex(words: &[&str]) -> Regex {
    // vocabulary entries are plain lowercase words, safe to join unescaped
    let pattern = format!(r"(?i)\b({})", words.join("|"));
    Regex::new(&pattern).unwrap()
}

/// Keyword score for a notes string, in [0, 1]. Craving and fatigue language
/// add, positive language subtracts.
pub fn notes_score(notes: &str, policy: &ScoringPolicy) -> f64 {
    NotesScanner::new().score(notes, policy)
}

fn mood_fraction(mood_rating: Option<u8>) -> f64 {
    match mood_rating {
        Some(mood) => ((5.0 - f64::from(mood)) / 4.0).clamp(0.0, 1.0),
        None => 0.0,
    }
}

fn craving_with(
    scanner: &NotesScanner,
    mood_rating: Option<u8>,
    notes: Option<&str>,
    calorie_deficit_fraction: f64,
    sleep_deficit_fraction: f64,
    policy: &ScoringPolicy,
) -> f64 {
    let notes_term = notes.map_or(0.0, |n| scanner.score(n, policy));
    let combined = policy.craving_mood_weight * mood_fraction(mood_rating)
        + policy.craving_notes_weight * notes_term
        + policy.craving_deficit_weight * calorie_deficit_fraction
        + policy.craving_sleep_weight * sleep_deficit_fraction;

    round_tenths((combined * 10.0).clamp(0.0, 10.0))
}

/// Estimated craving intensity on a 0-10 scale, one decimal place.
///
/// Low mood dominates; notes language, calorie deficit, and sleep deficit
/// contribute the rest. Absent inputs contribute zero.
pub fn craving_score(
    mood_rating: Option<u8>,
    notes: Option<&str>,
    calorie_deficit_fraction: f64,
    sleep_deficit_fraction: f64,
    policy: &ScoringPolicy,
) -> f64 {
    craving_with(
        &NotesScanner::new(),
        mood_rating,
        notes,
        calorie_deficit_fraction,
        sleep_deficit_fraction,
        policy,
    )
}

fn round_tenths(value: f64) -> f64 {
    (value * 10.0).round() / 10.0
}

// ============================================================================
// Pearson correlation
// ============================================================================

/// Pearson correlation coefficient over paired samples.
///
/// Returns 0.0 (no signal) rather than erroring for degenerate inputs: fewer
/// than two pairs, or zero variance on either side.
pub fn pearson(pairs: &[(f64, f64)]) -> f64 {
    if pairs.len() < 2 {
        return 0.0;
    }

    let n = pairs.len() as f64;
    let mean_x = pairs.iter().map(|p| p.0).sum::<f64>() / n;
    let mean_y = pairs.iter().map(|p| p.1).sum::<f64>() / n;

    let mut covariance = 0.0;
    let mut variance_x = 0.0;
    let mut variance_y = 0.0;
    for &(x, y) in pairs {
        let dx = x - mean_x;
        let dy = y - mean_y;
        covariance += dx * dy;
        variance_x += dx * dx;
        variance_y += dy * dy;
    }

    if variance_x <= 0.0 || variance_y <= 0.0 {
        return 0.0;
    }
    (covariance / (variance_x * variance_y).sqrt()).clamp(-1.0, 1.0)
}

/// Classify a coefficient against the policy threshold. The comparison is
/// strict, so r exactly at the threshold reads as no strong link.
pub fn classify_association(r: f64, policy: &ScoringPolicy) -> Association {
    if r > policy.association_threshold {
        Association::Positive
    } else if r < -policy.association_threshold {
        Association::Negative
    } else {
        Association::NoStrongLink
    }
}

// ============================================================================
// Correlator
// ============================================================================

/// Calories for the day after `date`: the exact next-day aggregate when one
/// exists, otherwise the first aggregate sharing the next day's weekday.
/// The bool records whether the weekday fallback was used.
fn match_next_day(date: NaiveDate, intake: &[DailyIntake]) -> Option<(f64, bool)> {
    let next = date.succ_opt()?;
    if let Some(exact) = intake.iter().find(|i| i.date == next) {
        return Some((exact.calories, false));
    }
    let weekday = next.weekday();
    intake
        .iter()
        .find(|i| i.date.weekday() == weekday)
        .map(|i| (i.calories, true))
}

/// Correlate each wellness night in the window with the next day's intake.
///
/// Both series come from the same bucket window, so the final night usually
/// resolves through the weekday fallback (its literal next day lies outside
/// the window). Points are emitted in date order, one per wellness log.
pub fn correlate_sleep(
    days: &[DayBucket],
    calorie_goal: Option<f64>,
    policy: &ScoringPolicy,
) -> SleepCorrelationReport {
    let scanner = NotesScanner::new();
    let intake = daily_intake(days);
    let goal = calorie_goal.filter(|g| *g > 0.0);

    let observed: Vec<(NaiveDate, &crate::events::WellnessEvent)> = days
        .iter()
        .filter_map(|day| day.wellness.as_ref().map(|w| (day.date, w)))
        .collect();

    let mean_sleep = if observed.is_empty() {
        0.0
    } else {
        observed.iter().map(|(_, w)| w.sleep_hours).sum::<f64>() / observed.len() as f64
    };
    let sleep_denominator = mean_sleep.max(SLEEP_DENOMINATOR_FLOOR_HOURS);

    let mut points = Vec::with_capacity(observed.len());
    for (date, wellness) in observed {
        let (next_day_calories, weekday_fallback) = match match_next_day(date, &intake) {
            Some((calories, fallback)) => (Some(calories), fallback),
            None => (None, false),
        };

        let calorie_deficit = match (goal, next_day_calories) {
            (Some(goal), Some(calories)) => ((goal - calories) / goal).max(0.0),
            _ => 0.0,
        };
        let sleep_deficit = ((mean_sleep - wellness.sleep_hours) / sleep_denominator).max(0.0);

        let craving = craving_with(
            &scanner,
            wellness.mood_rating,
            wellness.notes.as_deref(),
            calorie_deficit,
            sleep_deficit,
            policy,
        );

        points.push(SleepCorrelationPoint {
            date,
            date_label: weekday_label(date).to_string(),
            sleep_hours: wellness.sleep_hours,
            next_day_calories,
            next_day_craving_score: craving,
            weekday_fallback,
        });
    }

    let calorie_pairs: Vec<(f64, f64)> = points
        .iter()
        .filter_map(|p| p.next_day_calories.map(|c| (p.sleep_hours, c)))
        .collect();
    let craving_pairs: Vec<(f64, f64)> = points
        .iter()
        .map(|p| (p.sleep_hours, p.next_day_craving_score))
        .collect();

    let calories_r = pearson(&calorie_pairs);
    let cravings_r = pearson(&craving_pairs);

    SleepCorrelationReport {
        points,
        calories_r,
        cravings_r,
        calories_association: classify_association(calories_r, policy),
        cravings_association: classify_association(cravings_r, policy),
    }
}
