//! Matchmaker - meeting allocation engine for startup/investor events
//!
//! This library provides the scheduling engine behind the Matchmaker service.
//! It scores startup/investor pairs, then allocates one-on-one meetings into
//! time slots with a fairness pass followed by a utilization pass.

pub mod config;
pub mod core;
pub mod models;
pub mod routes;

// Re-export commonly used types
pub use crate::core::{calculate_compatibility, Compatibility, ScheduleError, ScheduleResult, Scheduler};
pub use models::{AllocationConfig, Investor, Match, MatchStatus, Startup, TimeSlot, GenerateScheduleRequest, GenerateScheduleResponse};
