// Model exports
pub mod domain;
pub mod requests;
pub mod responses;

pub use domain::{
    normalize, AllocationConfig, AvailabilityStatus, DefaultSlots, Investor, Match, MatchStatus,
    ScheduleStats, Startup, TimeSlot,
};
pub use requests::{GenerateScheduleRequest, ScorePairRequest};
pub use responses::{ErrorResponse, GenerateScheduleResponse, HealthResponse, ScorePairResponse};
