//! Business logic services
//!
//! Services coordinate between the event store and the shared aggregation
//! engine.

pub mod export;
pub mod insights;

pub use export::ExportService;
pub use insights::InsightsService;
