use std::collections::{HashMap, HashSet};
use tracing::{debug, info};
use crate::models::{AllocationConfig, Investor, Match, ScheduleStats, Startup, TimeSlot};
use crate::core::{
    allocator::{AllocationState, Allocator, Phase},
    assembler::assemble,
    candidates::generate_candidates,
    dedup::DedupKeys,
    error::ScheduleError,
    filters::check_hard_filters,
    slots::{default_time_slots, SlotGrid},
};

/// Result of a scheduling run
#[derive(Debug, Clone, PartialEq)]
pub struct ScheduleResult {
    pub matches: Vec<Match>,
    pub stats: ScheduleStats,
}

/// Scheduling orchestrator - runs the full allocation pipeline
///
/// # Pipeline Stages
/// 1. Configuration checks (rejects the run on invalid input)
/// 2. Seeding from completed and locked matches of the previous run
/// 3. Candidate generation (hard filters + score threshold)
/// 4. Fairness pass, optional coverage step, utilization pass
/// 5. Assembly in slot order
///
/// Each call is a pure function of its inputs; no state survives between runs.
#[derive(Debug, Clone)]
pub struct Scheduler {
    config: AllocationConfig,
}

impl Scheduler {
    pub fn new(config: AllocationConfig) -> Self {
        Self { config }
    }

    pub fn with_default_config() -> Self {
        Self {
            config: AllocationConfig::default(),
        }
    }

    pub fn config(&self) -> &AllocationConfig {
        &self.config
    }

    /// Generate a schedule
    ///
    /// # Arguments
    /// * `startups` - Full startup roster
    /// * `investors` - Full investor roster
    /// * `previous` - Matches from the previous run; completed and locked ones are preserved
    /// * `time_slots` - Ordered slots; the configured default sequence is used when empty
    ///
    /// # Returns
    /// The time-ordered schedule, or an error when the inputs are inconsistent
    pub fn generate(
        &self,
        startups: &[Startup],
        investors: &[Investor],
        previous: &[Match],
        time_slots: &[TimeSlot],
    ) -> Result<ScheduleResult, ScheduleError> {
        let slots = if time_slots.is_empty() {
            default_time_slots(&self.config.default_slots)
        } else {
            time_slots.to_vec()
        };

        validate_inputs(startups, investors, &slots, &self.config)?;

        let startup_index: HashMap<&str, &Startup> =
            startups.iter().map(|s| (s.id.as_str(), s)).collect();
        let investor_index: HashMap<&str, &Investor> =
            investors.iter().map(|i| (i.id.as_str(), i)).collect();

        let mut state = AllocationState::new(SlotGrid::new(slots));
        let mut stats = ScheduleStats::default();

        let mut preserved = seed_completed(previous, &startup_index, &investor_index, &mut state)?;
        stats.completed_kept = preserved.len();

        for investor in investors {
            let completed = state.used_capacity(&investor.id);
            if completed > investor.total_slots {
                return Err(ScheduleError::CapacityBelowCompleted {
                    investor_id: investor.id.clone(),
                    completed,
                    capacity: investor.total_slots,
                });
            }
        }

        let locked = seed_locked(
            previous,
            &startup_index,
            &investor_index,
            &mut state,
            self.config.min_score,
        );
        stats.locked_kept = locked.len();
        stats.locked_dropped = previous
            .iter()
            .filter(|m| m.locked && !m.is_completed())
            .count()
            - locked.len();
        preserved.extend(locked);

        let candidates = generate_candidates(startups, investors, &state, &self.config);
        stats.candidates = candidates.len();

        let allocations = Allocator::new(self.config.min_meetings_per_investor)
            .allocate(&candidates, investors, &mut state);

        for allocation in &allocations {
            match allocation.phase {
                Phase::Fairness => stats.fairness_matches += 1,
                Phase::Coverage => stats.coverage_matches += 1,
                Phase::Utilization => stats.utilization_matches += 1,
            }
        }
        stats.unmatched_startups = startups
            .iter()
            .filter(|s| s.is_present() && state.matched_count(&s.id) == 0)
            .count();

        let matches = assemble(preserved, &allocations, state.grid());

        info!(
            "Generated {} matches ({} preserved, {} new from {} candidates, {} startups unmatched)",
            matches.len(),
            stats.completed_kept + stats.locked_kept,
            stats.new_matches(),
            stats.candidates,
            stats.unmatched_startups
        );

        Ok(ScheduleResult { matches, stats })
    }
}

impl Default for Scheduler {
    fn default() -> Self {
        Self::with_default_config()
    }
}

/// Reject inputs that would make the schedule meaningless
pub fn validate_inputs(
    startups: &[Startup],
    investors: &[Investor],
    slots: &[TimeSlot],
    config: &AllocationConfig,
) -> Result<(), ScheduleError> {
    if config.min_score > 100 {
        return Err(ScheduleError::InvalidThreshold(config.min_score));
    }

    let mut seen = HashSet::new();
    for startup in startups {
        if !seen.insert(startup.id.as_str()) {
            return Err(ScheduleError::DuplicateStartup(startup.id.clone()));
        }
    }

    let mut seen = HashSet::new();
    for investor in investors {
        if !seen.insert(investor.id.as_str()) {
            return Err(ScheduleError::DuplicateInvestor(investor.id.clone()));
        }
        if investor.min_ticket_size > investor.max_ticket_size {
            return Err(ScheduleError::InvalidTicketRange {
                investor_id: investor.id.clone(),
                min: investor.min_ticket_size,
                max: investor.max_ticket_size,
            });
        }
    }

    let mut seen = HashSet::new();
    for slot in slots {
        if !seen.insert(slot.label.as_str()) {
            return Err(ScheduleError::DuplicateSlotLabel(slot.label.clone()));
        }
        if slot.end_time <= slot.start_time {
            return Err(ScheduleError::InvalidTimeSlot {
                label: slot.label.clone(),
                start: slot.start_time.format("%H:%M").to_string(),
                end: slot.end_time.format("%H:%M").to_string(),
            });
        }
    }

    Ok(())
}

/// Reserve every completed match exactly as recorded
///
/// Completed matches are kept even when the pair no longer passes the hard
/// filters or either participant left the roster.
fn seed_completed(
    previous: &[Match],
    startups: &HashMap<&str, &Startup>,
    investors: &HashMap<&str, &Investor>,
    state: &mut AllocationState,
) -> Result<Vec<Match>, ScheduleError> {
    let mut kept = Vec::new();
    // Occupancy for labels outside the grid
    let mut unlisted_startups: HashSet<(&str, &str)> = HashSet::new();
    let mut unlisted_investors: HashSet<(&str, &str)> = HashSet::new();

    for m in previous.iter().filter(|m| m.is_completed()) {
        let keys = DedupKeys::for_ids(
            &m.startup_id,
            &m.investor_id,
            startups.get(m.startup_id.as_str()).copied(),
            investors.get(m.investor_id.as_str()).copied(),
        );
        if state.dedup().is_blocked(&keys) {
            return Err(ScheduleError::CompletedConflict(format!(
                "{} already met {} or another member of the same firm",
                m.startup_id, m.investor_id
            )));
        }

        let slot = state.grid().index_of(&m.time_slot);
        let clash = match slot {
            Some(idx) => state.grid().is_occupied(idx, &m.startup_id, &m.investor_id),
            None => {
                let startup_new = unlisted_startups.insert((m.time_slot.as_str(), m.startup_id.as_str()));
                let investor_new = unlisted_investors.insert((m.time_slot.as_str(), m.investor_id.as_str()));
                !(startup_new && investor_new)
            }
        };
        if clash {
            return Err(ScheduleError::CompletedConflict(format!(
                "{} / {} double-booked in {}",
                m.startup_id, m.investor_id, m.time_slot
            )));
        }

        state.reserve(slot, &m.startup_id, &m.investor_id, keys);
        kept.push(m.clone());
    }

    Ok(kept)
}

/// Re-place locked matches that are still valid
///
/// A locked match keeps its pairing and recorded score. It stays in its slot
/// when that slot is still usable, otherwise it moves to the earliest usable
/// slot. Locked matches whose pair fails the hard filters, falls below the
/// threshold, or cannot be placed are dropped.
fn seed_locked(
    previous: &[Match],
    startups: &HashMap<&str, &Startup>,
    investors: &HashMap<&str, &Investor>,
    state: &mut AllocationState,
    min_score: u32,
) -> Vec<Match> {
    let mut valid: Vec<(&Match, &Startup, &Investor, Option<usize>)> = Vec::new();

    for m in previous.iter().filter(|m| m.locked && !m.is_completed()) {
        let (Some(&startup), Some(&investor)) = (
            startups.get(m.startup_id.as_str()),
            investors.get(m.investor_id.as_str()),
        ) else {
            debug!("Dropping locked match {}: participant no longer on roster", m.id);
            continue;
        };

        if !startup.is_present() || !investor.is_present() {
            debug!("Dropping locked match {}: participant not attending", m.id);
            continue;
        }
        if !check_hard_filters(startup, investor).passes() || m.compatibility_score < min_score {
            debug!("Dropping stale locked match {}", m.id);
            continue;
        }

        valid.push((m, startup, investor, state.grid().index_of(&m.time_slot)));
    }

    // Matches that can stay put go first so moved ones don't evict them
    let mut placed: Vec<Option<usize>> = vec![None; valid.len()];
    for (i, (_, startup, investor, current)) in valid.iter().enumerate() {
        if let Some(idx) = *current {
            if state.grid().is_usable(idx, startup, investor) {
                placed[i] = state.try_place(startup, investor, Some(idx));
            }
        }
    }
    for (i, (_, startup, investor, _)) in valid.iter().enumerate() {
        if placed[i].is_none() {
            placed[i] = state.try_place(startup, investor, None);
        }
    }

    valid
        .iter()
        .zip(placed)
        .filter_map(|((m, _, _, _), slot)| {
            let Some(idx) = slot else {
                debug!("Dropping locked match {}: no usable slot", m.id);
                return None;
            };
            let slot = state.grid().slot(idx);
            let mut kept = (*m).clone();
            kept.time_slot = slot.label.clone();
            kept.slot_time = slot.time_range();
            Some(kept)
        })
        .collect()
}
