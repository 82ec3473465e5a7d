//! Event store abstraction
//!
//! The aggregation engine treats persistence as an external collaborator
//! that hands back raw, time-stamped events per user and date range. This
//! module defines that seam plus an in-memory implementation used by the
//! demo server and the test suite, seeded from a JSON fixture file.
//!
//! Store errors propagate unchanged through the services; only the engine's
//! own range validation turns into client errors.

use std::collections::HashMap;
use std::path::Path;
use std::sync::Arc;

use anyhow::Result;
use async_trait::async_trait;
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use tokio::sync::RwLock;
use tracing::info;
use uuid::Uuid;

use trackwell_shared::events::{
    FoodEvent, HydrationEvent, RawFoodRecord, RawHydrationRecord, RawWellnessRecord,
    RawWorkoutRecord, WellnessEvent, WorkoutEvent,
};

/// Read access to a user's raw event streams.
///
/// `start` and `end` bound the UTC calendar dates of the returned events,
/// both inclusive. Callers that bucket into non-UTC local days widen the
/// range by a day on each side; the bucketer drops the excess.
#[async_trait]
pub trait EventStore: Send + Sync {
    async fn list_food(&self, user_id: Uuid, start: NaiveDate, end: NaiveDate)
        -> Result<Vec<FoodEvent>>;

    async fn list_workouts(
        &self,
        user_id: Uuid,
        start: NaiveDate,
        end: NaiveDate,
    ) -> Result<Vec<WorkoutEvent>>;

    async fn list_hydration(
        &self,
        user_id: Uuid,
        start: NaiveDate,
        end: NaiveDate,
    ) -> Result<Vec<HydrationEvent>>;

    async fn list_wellness(
        &self,
        user_id: Uuid,
        start: NaiveDate,
        end: NaiveDate,
    ) -> Result<Vec<WellnessEvent>>;

    /// Readiness probe hook.
    async fn health_check(&self) -> Result<()>;
}

// ============================================================================
// In-memory implementation
// ============================================================================

#[derive(Debug, Default, Clone)]
struct UserEvents {
    food: Vec<FoodEvent>,
    workouts: Vec<WorkoutEvent>,
    hydration: Vec<HydrationEvent>,
    wellness: Vec<WellnessEvent>,
}

/// Event store held entirely in memory.
#[derive(Debug, Default)]
pub struct InMemoryEventStore {
    inner: RwLock<HashMap<Uuid, UserEvents>>,
}

impl InMemoryEventStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub async fn put_food(&self, user_id: Uuid, events: Vec<FoodEvent>) {
        let mut inner = self.inner.write().await;
        inner.entry(user_id).or_default().food.extend(events);
    }

    pub async fn put_workouts(&self, user_id: Uuid, events: Vec<WorkoutEvent>) {
        let mut inner = self.inner.write().await;
        inner.entry(user_id).or_default().workouts.extend(events);
    }

    pub async fn put_hydration(&self, user_id: Uuid, events: Vec<HydrationEvent>) {
        let mut inner = self.inner.write().await;
        inner.entry(user_id).or_default().hydration.extend(events);
    }

    pub async fn put_wellness(&self, user_id: Uuid, events: Vec<WellnessEvent>) {
        let mut inner = self.inner.write().await;
        inner.entry(user_id).or_default().wellness.extend(events);
    }

    async fn with_user<T>(&self, user_id: Uuid, extract: impl FnOnce(&UserEvents) -> T) -> T
    where
        T: Default,
    {
        let inner = self.inner.read().await;
        inner.get(&user_id).map(extract).unwrap_or_default()
    }
}

fn in_range(date: NaiveDate, start: NaiveDate, end: NaiveDate) -> bool {
    date >= start && date <= end
}

#[async_trait]
impl EventStore for InMemoryEventStore {
    async fn list_food(
        &self,
        user_id: Uuid,
        start: NaiveDate,
        end: NaiveDate,
    ) -> Result<Vec<FoodEvent>> {
        let mut events = self
            .with_user(user_id, |u| {
                u.food
                    .iter()
                    .filter(|e| in_range(e.eaten_at.date_naive(), start, end))
                    .cloned()
                    .collect::<Vec<_>>()
            })
            .await;
        events.sort_by_key(|e| e.eaten_at);
        Ok(events)
    }

    async fn list_workouts(
        &self,
        user_id: Uuid,
        start: NaiveDate,
        end: NaiveDate,
    ) -> Result<Vec<WorkoutEvent>> {
        let mut events = self
            .with_user(user_id, |u| {
                u.workouts
                    .iter()
                    .filter(|e| in_range(e.started_at.date_naive(), start, end))
                    .cloned()
                    .collect::<Vec<_>>()
            })
            .await;
        events.sort_by_key(|e| e.started_at);
        Ok(events)
    }

    async fn list_hydration(
        &self,
        user_id: Uuid,
        start: NaiveDate,
        end: NaiveDate,
    ) -> Result<Vec<HydrationEvent>> {
        let mut events = self
            .with_user(user_id, |u| {
                u.hydration
                    .iter()
                    .filter(|e| in_range(e.logged_at.date_naive(), start, end))
                    .cloned()
                    .collect::<Vec<_>>()
            })
            .await;
        events.sort_by_key(|e| e.logged_at);
        Ok(events)
    }

    async fn list_wellness(
        &self,
        user_id: Uuid,
        start: NaiveDate,
        end: NaiveDate,
    ) -> Result<Vec<WellnessEvent>> {
        let mut events = self
            .with_user(user_id, |u| {
                u.wellness
                    .iter()
                    .filter(|e| in_range(e.logged_at.date_naive(), start, end))
                    .cloned()
                    .collect::<Vec<_>>()
            })
            .await;
        events.sort_by_key(|e| e.logged_at);
        Ok(events)
    }

    async fn health_check(&self) -> Result<()> {
        // nothing to probe for the in-memory store
        let _ = self.inner.read().await;
        Ok(())
    }
}

// ============================================================================
// JSON seeding
// ============================================================================

/// On-disk seed fixture: raw records per user, validated on load.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SeedFile {
    pub users: Vec<SeedUser>,
}

/// One user's raw event streams in a seed fixture.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SeedUser {
    pub user_id: Uuid,
    #[serde(default)]
    pub food: Vec<RawFoodRecord>,
    #[serde(default)]
    pub workouts: Vec<RawWorkoutRecord>,
    #[serde(default)]
    pub hydration: Vec<RawHydrationRecord>,
    #[serde(default)]
    pub wellness: Vec<RawWellnessRecord>,
}

/// Totals reported after applying a seed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SeedSummary {
    pub users: usize,
    pub events: usize,
}

/// Parse a seed fixture from JSON.
pub fn parse_seed(json: &str) -> Result<SeedFile> {
    Ok(serde_json::from_str(json)?)
}

/// Validate every raw record in the seed and insert the resulting events.
/// Any invalid record fails the whole load; a partially-applied seed would
/// skew every downstream aggregate.
pub async fn apply_seed(store: &InMemoryEventStore, seed: SeedFile) -> Result<SeedSummary> {
    let users = seed.users.len();
    let mut events = 0usize;

    for user in seed.users {
        let food: Vec<FoodEvent> = user
            .food
            .into_iter()
            .map(RawFoodRecord::parse)
            .collect::<Result<_, _>>()?;
        let workouts: Vec<WorkoutEvent> = user
            .workouts
            .into_iter()
            .map(RawWorkoutRecord::parse)
            .collect::<Result<_, _>>()?;
        let hydration: Vec<HydrationEvent> = user
            .hydration
            .into_iter()
            .map(RawHydrationRecord::parse)
            .collect::<Result<_, _>>()?;
        let wellness: Vec<WellnessEvent> = user
            .wellness
            .into_iter()
            .map(RawWellnessRecord::parse)
            .collect::<Result<_, _>>()?;

        events += food.len() + workouts.len() + hydration.len() + wellness.len();

        store.put_food(user.user_id, food).await;
        store.put_workouts(user.user_id, workouts).await;
        store.put_hydration(user.user_id, hydration).await;
        store.put_wellness(user.user_id, wellness).await;
    }

    Ok(SeedSummary { users, events })
}

/// Load a JSON seed file into the store.
pub async fn load_seed_file(
    store: &InMemoryEventStore,
    path: impl AsRef<Path>,
) -> Result<SeedSummary> {
    let path = path.as_ref();
    let json = std::fs::read_to_string(path)
        .map_err(|e| anyhow::anyhow!("failed to read seed file {}: {}", path.display(), e))?;
    let seed = parse_seed(&json)
        .map_err(|e| anyhow::anyhow!("failed to parse seed file {}: {}", path.display(), e))?;
    let summary = apply_seed(store, seed).await?;

    info!(
        users = summary.users,
        events = summary.events,
        "Seed data loaded"
    );
    Ok(summary)
}

/// Build the store configured for the application: empty, or seeded from
/// the configured fixture.
pub async fn build_store(seed_path: Option<&str>) -> Result<Arc<InMemoryEventStore>> {
    let store = Arc::new(InMemoryEventStore::new());
    if let Some(path) = seed_path {
        load_seed_file(store.as_ref(), path).await?;
    }
    Ok(store)
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{DateTime, Utc};

    fn date(d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 5, d).unwrap()
    }

    fn at(d: u32, hour: u32) -> DateTime<Utc> {
        date(d).and_hms_opt(hour, 0, 0).unwrap().and_utc()
    }

    fn food(d: u32, hour: u32, calories: f64) -> FoodEvent {
        FoodEvent {
            eaten_at: at(d, hour),
            calories,
            protein_g: 0.0,
            carbs_g: 0.0,
            fat_g: 0.0,
        }
    }

    #[tokio::test]
    async fn listing_filters_by_inclusive_date_range() {
        let store = InMemoryEventStore::new();
        let user = Uuid::new_v4();
        store
            .put_food(user, vec![food(9, 12, 1.0), food(10, 0, 2.0), food(12, 23, 3.0), food(13, 1, 4.0)])
            .await;

        let events = store.list_food(user, date(10), date(12)).await.unwrap();
        assert_eq!(events.len(), 2);
        assert_eq!(events[0].calories, 2.0);
        assert_eq!(events[1].calories, 3.0);
    }

    #[tokio::test]
    async fn listing_returns_events_in_timestamp_order() {
        let store = InMemoryEventStore::new();
        let user = Uuid::new_v4();
        store
            .put_food(user, vec![food(10, 20, 3.0), food(10, 8, 1.0), food(10, 13, 2.0)])
            .await;

        let events = store.list_food(user, date(10), date(10)).await.unwrap();
        let calories: Vec<f64> = events.iter().map(|e| e.calories).collect();
        assert_eq!(calories, vec![1.0, 2.0, 3.0]);
    }

    #[tokio::test]
    async fn users_are_isolated() {
        let store = InMemoryEventStore::new();
        let alice = Uuid::new_v4();
        let bob = Uuid::new_v4();
        store.put_food(alice, vec![food(10, 12, 500.0)]).await;

        let events = store.list_food(bob, date(1), date(31)).await.unwrap();
        assert!(events.is_empty());
    }

    #[tokio::test]
    async fn unknown_user_yields_empty_streams() {
        let store = InMemoryEventStore::new();
        let user = Uuid::new_v4();
        assert!(store.list_food(user, date(1), date(31)).await.unwrap().is_empty());
        assert!(store.list_workouts(user, date(1), date(31)).await.unwrap().is_empty());
        assert!(store.list_hydration(user, date(1), date(31)).await.unwrap().is_empty());
        assert!(store.list_wellness(user, date(1), date(31)).await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn seed_applies_all_streams() {
        let json = r#"{
            "users": [{
                "user_id": "7f8de3a4-31cc-4f4a-9a3a-0d5f3a9b2f01",
                "food": [
                    {"eaten_at": "2024-05-10T12:00:00Z", "calories": 650, "protein_g": 40}
                ],
                "workouts": [
                    {"started_at": "2024-05-10T18:00:00Z", "duration_minutes": 45}
                ],
                "hydration": [
                    {"logged_at": "2024-05-10T21:00:00Z", "glasses_consumed": 6}
                ],
                "wellness": [
                    {"logged_at": "2024-05-10T22:00:00Z", "sleep_hours": 7.5, "mood_rating": 4}
                ]
            }]
        }"#;

        let store = InMemoryEventStore::new();
        let summary = apply_seed(&store, parse_seed(json).unwrap()).await.unwrap();
        assert_eq!(summary, SeedSummary { users: 1, events: 4 });

        let user = Uuid::parse_str("7f8de3a4-31cc-4f4a-9a3a-0d5f3a9b2f01").unwrap();
        let hydration = store.list_hydration(user, date(10), date(10)).await.unwrap();
        // missing goal defaulted at the parse boundary
        assert_eq!(hydration[0].goal_glasses, 8.0);
    }

    #[tokio::test]
    async fn seed_with_invalid_record_fails_whole_load() {
        let json = r#"{
            "users": [{
                "user_id": "7f8de3a4-31cc-4f4a-9a3a-0d5f3a9b2f01",
                "food": [
                    {"eaten_at": "2024-05-10T12:00:00Z", "calories": -650}
                ]
            }]
        }"#;

        let store = InMemoryEventStore::new();
        let result = apply_seed(&store, parse_seed(json).unwrap()).await;
        assert!(result.is_err());
    }

    #[tokio::test]
    async fn store_health_check_is_ok() {
        let store = InMemoryEventStore::new();
        assert!(store.health_check().await.is_ok());
    }
}
