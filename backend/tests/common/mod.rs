//! Common test utilities for integration tests
//!
//! This module provides a router wired to an in-memory event store with a
//! pinned clock, plus seeding helpers for the four event streams.

use std::sync::Arc;

use axum::{
    body::Body,
    http::{Request, Response, StatusCode},
    Router,
};
use chrono::{DateTime, NaiveDate, Utc};
use tower::ServiceExt;
use uuid::Uuid;

use trackwell_backend::{config::AppConfig, routes, state::AppState, store::InMemoryEventStore};
use trackwell_shared::calendar::FixedClock;
use trackwell_shared::events::{FoodEvent, HydrationEvent, WellnessEvent, WorkoutEvent};

/// "Now" for every integration test: Monday 2024-05-20 15:00 UTC, putting
/// the default 7-day window at May 14..=20.
pub fn fixed_now() -> DateTime<Utc> {
    date(2024, 5, 20).and_hms_opt(15, 0, 0).unwrap().and_utc()
}

pub fn date(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap()
}

fn at(day: NaiveDate, hour: u32) -> DateTime<Utc> {
    day.and_hms_opt(hour, 0, 0).unwrap().and_utc()
}

/// Test application wrapper
pub struct TestApp {
    pub app: Router,
    pub store: Arc<InMemoryEventStore>,
    pub user_id: Uuid,
}

impl TestApp {
    /// Create a new test application over an empty store
    pub async fn new() -> Self {
        let store = Arc::new(InMemoryEventStore::new());
        let state = AppState::new(store.clone(), AppConfig::default())
            .with_clock(Arc::new(FixedClock(fixed_now())));
        let app = routes::create_router(state);

        Self {
            app,
            store,
            user_id: Uuid::new_v4(),
        }
    }

    /// Make a GET request
    pub async fn get(&self, path: &str) -> (StatusCode, String) {
        let response = self.get_response(path).await;
        let status = response.status();
        let body = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        let body_str = String::from_utf8(body.to_vec()).unwrap();

        (status, body_str)
    }

    /// Make a GET request and return the raw response, for header checks
    pub async fn get_response(&self, path: &str) -> Response<Body> {
        let request = Request::builder()
            .method("GET")
            .uri(path)
            .body(Body::empty())
            .unwrap();

        self.app.clone().oneshot(request).await.unwrap()
    }

    pub async fn seed_food(&self, day: NaiveDate, calories: f64, protein_g: f64) {
        let event = FoodEvent {
            eaten_at: at(day, 12),
            calories,
            protein_g,
            carbs_g: 0.0,
            fat_g: 0.0,
        };
        self.store.put_food(self.user_id, vec![event]).await;
    }

    pub async fn seed_workout(&self, day: NaiveDate, duration_minutes: f64) {
        let event = WorkoutEvent {
            started_at: at(day, 18),
            duration_minutes,
            calories_burned: 250.0,
        };
        self.store.put_workouts(self.user_id, vec![event]).await;
    }

    pub async fn seed_hydration(&self, day: NaiveDate, glasses: f64, goal: f64) {
        let event = HydrationEvent {
            logged_at: at(day, 21),
            glasses_consumed: glasses,
            goal_glasses: goal,
        };
        self.store.put_hydration(self.user_id, vec![event]).await;
    }

    pub async fn seed_wellness(&self, day: NaiveDate, sleep_hours: f64, mood: u8, notes: &str) {
        let event = WellnessEvent {
            logged_at: at(day, 22),
            sleep_hours,
            mood_rating: Some(mood),
            notes: if notes.is_empty() {
                None
            } else {
                Some(notes.to_string())
            },
        };
        self.store.put_wellness(self.user_id, vec![event]).await;
    }
}
