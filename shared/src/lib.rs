//! Trackwell Shared Library
//!
//! The pure aggregation engine behind the Trackwell daily views: bucketing
//! of raw events into local calendar days, day summaries and scores,
//! best/worst markers, consistency windows, and the sleep-craving
//! correlator. Everything here is deterministic and side-effect free; the
//! backend and WASM modules layer delivery on top.

pub mod buckets;
pub mod calendar;
pub mod consistency;
pub mod correlation;
pub mod day_summary;
pub mod errors;
pub mod events;
pub mod markers;
pub mod policy;
pub mod types;

// Re-export commonly used items
pub use buckets::{bucket_events, DayBucket};
pub use calendar::{Clock, DateRange, FixedClock, MonthId, SystemClock, TzOffset};
pub use consistency::{consistency_report, ConsistencyReport};
pub use correlation::{correlate_sleep, pearson, Association, SleepCorrelationReport};
pub use day_summary::{summarize_day, DaySummary};
pub use errors::{EngineError, EventParseError};
pub use events::{FoodEvent, HydrationEvent, WellnessEvent, WorkoutEvent};
pub use markers::{mark_best_worst, RankingMetric};
pub use policy::ScoringPolicy;
pub use types::*;
