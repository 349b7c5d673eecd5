use thiserror::Error;

/// Reasons a scheduling run is rejected as a whole
///
/// Ineligible pairs, exhausted capacity and stale preserved matches are not
/// errors; they simply produce fewer meetings.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ScheduleError {
    #[error("Invalid score threshold: {0} (must be 0-100)")]
    InvalidThreshold(u32),

    #[error("Duplicate startup id: {0}")]
    DuplicateStartup(String),

    #[error("Duplicate investor id: {0}")]
    DuplicateInvestor(String),

    #[error("Invalid ticket range for investor {investor_id}: min {min} exceeds max {max}")]
    InvalidTicketRange { investor_id: String, min: u64, max: u64 },

    #[error("Duplicate time slot label: {0}")]
    DuplicateSlotLabel(String),

    #[error("Invalid time slot {label}: end {end} is not after start {start}")]
    InvalidTimeSlot { label: String, start: String, end: String },

    #[error("Conflicting completed matches: {0}")]
    CompletedConflict(String),

    #[error("Investor {investor_id} has {completed} completed meetings but capacity {capacity}")]
    CapacityBelowCompleted { investor_id: String, completed: u32, capacity: u32 },
}
