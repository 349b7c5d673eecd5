// Core algorithm exports
pub mod allocator;
pub mod assembler;
pub mod candidates;
pub mod dedup;
pub mod error;
pub mod filters;
pub mod scheduler;
pub mod scoring;
pub mod slots;

pub use allocator::{AllocationState, Allocator, Allocation, Phase};
pub use assembler::{assemble, build_match, match_id};
pub use candidates::{generate_candidates, Candidate, CandidateSet};
pub use dedup::{DedupGuard, DedupKeys};
pub use error::ScheduleError;
pub use filters::{check_hard_filters, HardFilterResult};
pub use scheduler::{validate_inputs, ScheduleResult, Scheduler};
pub use scoring::{calculate_compatibility, ticket_proximity_points, Compatibility};
pub use slots::{default_time_slots, SlotGrid};
