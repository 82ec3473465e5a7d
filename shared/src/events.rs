//! Typed events and their raw ingestion records
//!
//! Parse, don't validate: whatever shape a record arrives in (store row,
//! JSON import, request body) it is checked and coerced exactly once here,
//! so the engine only ever sees well-formed events. Missing numeric fields
//! coerce to zero; present fields must already be in range or the whole
//! record is rejected.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use validator::Validate;

use crate::errors::EventParseError;

/// Hydration goal substituted when a log does not carry one (glasses).
pub const DEFAULT_GOAL_GLASSES: f64 = 8.0;

// ============================================================================
// Typed events
// ============================================================================

/// A logged meal or snack.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FoodEvent {
    pub eaten_at: DateTime<Utc>,
    pub calories: f64,
    pub protein_g: f64,
    pub carbs_g: f64,
    pub fat_g: f64,
}

/// A completed workout session.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WorkoutEvent {
    pub started_at: DateTime<Utc>,
    pub duration_minutes: f64,
    pub calories_burned: f64,
}

/// End-of-day hydration tally. At most one per day survives bucketing.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HydrationEvent {
    pub logged_at: DateTime<Utc>,
    pub glasses_consumed: f64,
    pub goal_glasses: f64,
}

/// Daily wellness check-in. At most one per day survives bucketing.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WellnessEvent {
    pub logged_at: DateTime<Utc>,
    pub sleep_hours: f64,
    /// Self-reported mood, 1 (worst) to 5 (best).
    pub mood_rating: Option<u8>,
    pub notes: Option<String>,
}

// ============================================================================
// Raw records
// ============================================================================

/// Food record before coercion.
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct RawFoodRecord {
    pub eaten_at: DateTime<Utc>,
    #[validate(range(min = 0.0, max = 20000.0, message = "calories must be between 0 and 20000"))]
    pub calories: Option<f64>,
    #[validate(range(min = 0.0, max = 2000.0, message = "protein must be between 0 and 2000 g"))]
    pub protein_g: Option<f64>,
    #[validate(range(min = 0.0, max = 2000.0, message = "carbs must be between 0 and 2000 g"))]
    pub carbs_g: Option<f64>,
    #[validate(range(min = 0.0, max = 2000.0, message = "fat must be between 0 and 2000 g"))]
    pub fat_g: Option<f64>,
}

impl RawFoodRecord {
    pub fn parse(self) -> Result<FoodEvent, EventParseError> {
        self.validate()
            .map_err(|e| EventParseError::new("food", validation_reason(&e)))?;
        Ok(FoodEvent {
            eaten_at: self.eaten_at,
            calories: self.calories.unwrap_or(0.0),
            protein_g: self.protein_g.unwrap_or(0.0),
            carbs_g: self.carbs_g.unwrap_or(0.0),
            fat_g: self.fat_g.unwrap_or(0.0),
        })
    }
}

/// Workout record before coercion. A present duration must be positive; a
/// missing one coerces to zero (the session still counts as a workout).
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct RawWorkoutRecord {
    pub started_at: DateTime<Utc>,
    #[validate(range(exclusive_min = 0.0, max = 1440.0, message = "duration must be between 0 and 1440 minutes"))]
    pub duration_minutes: Option<f64>,
    #[validate(range(min = 0.0, max = 20000.0, message = "calories burned must be between 0 and 20000"))]
    pub calories_burned: Option<f64>,
}

impl RawWorkoutRecord {
    pub fn parse(self) -> Result<WorkoutEvent, EventParseError> {
        self.validate()
            .map_err(|e| EventParseError::new("workout", validation_reason(&e)))?;
        Ok(WorkoutEvent {
            started_at: self.started_at,
            duration_minutes: self.duration_minutes.unwrap_or(0.0),
            calories_burned: self.calories_burned.unwrap_or(0.0),
        })
    }
}

/// Hydration record before coercion. A missing goal falls back to
/// [`DEFAULT_GOAL_GLASSES`].
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct RawHydrationRecord {
    pub logged_at: DateTime<Utc>,
    #[validate(range(min = 0.0, max = 100.0, message = "glasses consumed must be between 0 and 100"))]
    pub glasses_consumed: Option<f64>,
    #[validate(range(exclusive_min = 0.0, max = 100.0, message = "goal must be between 0 and 100 glasses"))]
    pub goal_glasses: Option<f64>,
}

impl RawHydrationRecord {
    pub fn parse(self) -> Result<HydrationEvent, EventParseError> {
        self.validate()
            .map_err(|e| EventParseError::new("hydration", validation_reason(&e)))?;
        Ok(HydrationEvent {
            logged_at: self.logged_at,
            glasses_consumed: self.glasses_consumed.unwrap_or(0.0),
            goal_glasses: self.goal_glasses.unwrap_or(DEFAULT_GOAL_GLASSES),
        })
    }
}

/// Wellness record before coercion.
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct RawWellnessRecord {
    pub logged_at: DateTime<Utc>,
    #[validate(range(min = 0.0, max = 24.0, message = "sleep must be between 0 and 24 hours"))]
    pub sleep_hours: Option<f64>,
    #[validate(range(min = 1, max = 5, message = "mood rating must be between 1 and 5"))]
    pub mood_rating: Option<u8>,
    #[validate(length(max = 2000, message = "notes must be at most 2000 characters"))]
    pub notes: Option<String>,
}

impl RawWellnessRecord {
    pub fn parse(self) -> Result<WellnessEvent, EventParseError> {
        self.validate()
            .map_err(|e| EventParseError::new("wellness", validation_reason(&e)))?;
        Ok(WellnessEvent {
            logged_at: self.logged_at,
            sleep_hours: self.sleep_hours.unwrap_or(0.0),
            mood_rating: self.mood_rating,
            notes: self.notes,
        })
    }
}

/// Flatten validator output into a single stable line for error payloads.
fn validation_reason(errors: &validator::ValidationErrors) -> String {
    let mut parts: Vec<String> = Vec::new();
    for (field, field_errors) in errors.field_errors() {
        for error in field_errors {
            match &error.message {
                Some(message) => parts.push(format!("{field}: {message}")),
                None => parts.push(format!("{field}: {}", error.code)),
            }
        }
    }
    parts.sort();
    parts.join("; ")
}
