//! Daily bucket builder
//!
//! Groups a user's raw event streams into per-day buckets over a local
//! calendar range. Each stream is walked exactly once; events outside the
//! range are dropped. Days with no events still get a bucket, so a month
//! view always carries one entry per calendar day.

use std::collections::HashMap;

use chrono::NaiveDate;

use crate::calendar::{DateRange, TzOffset};
use crate::events::{FoodEvent, HydrationEvent, WellnessEvent, WorkoutEvent};

/// One user's events for a single local calendar day.
#[derive(Debug, Clone, PartialEq)]
pub struct DayBucket {
    pub date: NaiveDate,
    pub food: Vec<FoodEvent>,
    pub workouts: Vec<WorkoutEvent>,
    /// Day-level log; when several land on one day the latest write wins.
    pub hydration: Option<HydrationEvent>,
    /// Day-level log; when several land on one day the latest write wins.
    pub wellness: Option<WellnessEvent>,
}

impl DayBucket {
    pub fn empty(date: NaiveDate) -> Self {
        Self {
            date,
            food: Vec::new(),
            workouts: Vec::new(),
            hydration: None,
            wellness: None,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.food.is_empty()
            && self.workouts.is_empty()
            && self.hydration.is_none()
            && self.wellness.is_none()
    }

    pub fn total_calories(&self) -> f64 {
        self.food.iter().map(|f| f.calories).sum()
    }

    pub fn total_protein_g(&self) -> f64 {
        self.food.iter().map(|f| f.protein_g).sum()
    }

    pub fn total_carbs_g(&self) -> f64 {
        self.food.iter().map(|f| f.carbs_g).sum()
    }

    pub fn total_fat_g(&self) -> f64 {
        self.food.iter().map(|f| f.fat_g).sum()
    }

    pub fn workout_count(&self) -> u32 {
        u32::try_from(self.workouts.len()).unwrap_or(u32::MAX)
    }

    /// True when any workout on the day lasted at least `minutes`.
    pub fn has_workout_of_at_least(&self, minutes: f64) -> bool {
        self.workouts.iter().any(|w| w.duration_minutes >= minutes)
    }
}

/// Distribute event streams into one bucket per day of `range`, resolving
/// local days through `tz`. Returns buckets in ascending date order.
pub fn bucket_events(
    range: DateRange,
    tz: TzOffset,
    food: &[FoodEvent],
    workouts: &[WorkoutEvent],
    hydration: &[HydrationEvent],
    wellness: &[WellnessEvent],
) -> Vec<DayBucket> {
    let mut buckets: Vec<DayBucket> = range.days().map(DayBucket::empty).collect();
    let index: HashMap<NaiveDate, usize> = buckets
        .iter()
        .enumerate()
        .map(|(position, bucket)| (bucket.date, position))
        .collect();

    for event in food {
        if let Some(&position) = index.get(&tz.local_day(event.eaten_at)) {
            buckets[position].food.push(event.clone());
        }
    }

    for event in workouts {
        if let Some(&position) = index.get(&tz.local_day(event.started_at)) {
            buckets[position].workouts.push(event.clone());
        }
    }

    for event in hydration {
        if let Some(&position) = index.get(&tz.local_day(event.logged_at)) {
            let slot = &mut buckets[position].hydration;
            if slot
                .as_ref()
                .map_or(true, |current| current.logged_at <= event.logged_at)
            {
                *slot = Some(event.clone());
            }
        }
    }

    for event in wellness {
        if let Some(&position) = index.get(&tz.local_day(event.logged_at)) {
            let slot = &mut buckets[position].wellness;
            if slot
                .as_ref()
                .map_or(true, |current| current.logged_at <= event.logged_at)
            {
                *slot = Some(event.clone());
            }
        }
    }

    buckets
}
