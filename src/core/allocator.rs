use std::collections::HashMap;
use tracing::debug;
use crate::models::{Investor, Startup};
use crate::core::{
    candidates::{Candidate, CandidateSet},
    dedup::{DedupGuard, DedupKeys},
    slots::SlotGrid,
};

/// Mutable bookkeeping shared by every allocation step of one run
///
/// Seeded from preserved matches before any pass starts. Owned by a single
/// run and never shared between runs.
#[derive(Debug)]
pub struct AllocationState {
    used_capacity: HashMap<String, u32>,
    matched_count: HashMap<String, u32>,
    grid: SlotGrid,
    dedup: DedupGuard,
}

impl AllocationState {
    pub fn new(grid: SlotGrid) -> Self {
        Self {
            used_capacity: HashMap::new(),
            matched_count: HashMap::new(),
            grid,
            dedup: DedupGuard::new(),
        }
    }

    pub fn grid(&self) -> &SlotGrid {
        &self.grid
    }

    pub fn dedup(&self) -> &DedupGuard {
        &self.dedup
    }

    pub fn used_capacity(&self, investor_id: &str) -> u32 {
        self.used_capacity.get(investor_id).copied().unwrap_or(0)
    }

    pub fn remaining_capacity(&self, investor: &Investor) -> u32 {
        investor.total_slots.saturating_sub(self.used_capacity(&investor.id))
    }

    pub fn matched_count(&self, startup_id: &str) -> u32 {
        self.matched_count.get(startup_id).copied().unwrap_or(0)
    }

    /// Record a meeting in every tracker without re-checking constraints
    ///
    /// `slot` is `None` for preserved matches whose slot label is no longer
    /// configured; they still count against capacity and uniqueness.
    pub fn reserve(&mut self, slot: Option<usize>, startup_id: &str, investor_id: &str, keys: DedupKeys) {
        if let Some(index) = slot {
            self.grid.reserve(index, startup_id, investor_id);
        }
        self.dedup.record(keys);
        *self.used_capacity.entry(investor_id.to_string()).or_insert(0) += 1;
        *self.matched_count.entry(startup_id.to_string()).or_insert(0) += 1;
    }

    /// Check capacity, uniqueness and slot availability, then commit
    ///
    /// `preferred` is tried before the earliest-fit scan. Returns the slot
    /// index the meeting landed in.
    pub fn try_place(
        &mut self,
        startup: &Startup,
        investor: &Investor,
        preferred: Option<usize>,
    ) -> Option<usize> {
        if self.remaining_capacity(investor) == 0 {
            return None;
        }

        let keys = DedupKeys::for_pair(startup, investor);
        if self.dedup.is_blocked(&keys) {
            return None;
        }

        let slot = preferred
            .filter(|&i| self.grid.is_usable(i, startup, investor))
            .or_else(|| self.grid.first_usable(startup, investor))?;

        self.reserve(Some(slot), &startup.id, &investor.id, keys);
        Some(slot)
    }
}

/// Which allocation step produced a meeting
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    Fairness,
    Coverage,
    Utilization,
}

/// A candidate committed to a concrete slot
#[derive(Debug, Clone)]
pub struct Allocation<'a> {
    pub candidate: Candidate<'a>,
    pub slot: usize,
    pub phase: Phase,
}

/// Two-pass allocator: fairness first, then utilization by score
///
/// An optional coverage step between the passes tops investors up to a
/// minimum number of meetings.
#[derive(Debug, Clone, Copy, Default)]
pub struct Allocator {
    min_meetings_per_investor: u32,
}

impl Allocator {
    pub fn new(min_meetings_per_investor: u32) -> Self {
        Self { min_meetings_per_investor }
    }

    /// Run every pass in order against `state`
    pub fn allocate<'a>(
        &self,
        candidates: &CandidateSet<'a>,
        investors: &'a [Investor],
        state: &mut AllocationState,
    ) -> Vec<Allocation<'a>> {
        let mut allocations = fairness_pass(candidates, state);

        if self.min_meetings_per_investor > 0 {
            allocations.extend(coverage_pass(
                candidates,
                investors,
                state,
                self.min_meetings_per_investor,
            ));
        }

        allocations.extend(utilization_pass(candidates, state));
        allocations
    }
}

/// One meeting for every startup that has none yet
///
/// Startups are visited by their best candidate score, input order on ties,
/// and each takes its best placeable candidate.
pub fn fairness_pass<'a>(
    candidates: &CandidateSet<'a>,
    state: &mut AllocationState,
) -> Vec<Allocation<'a>> {
    let mut order: Vec<&(usize, Vec<Candidate<'a>>)> = candidates
        .by_startup
        .iter()
        .filter(|(_, list)| !list.is_empty())
        .collect();
    order.sort_by(|(a_idx, a), (b_idx, b)| {
        b[0].score().cmp(&a[0].score()).then_with(|| a_idx.cmp(b_idx))
    });

    let mut allocations = Vec::new();

    for (_, list) in order {
        if state.matched_count(&list[0].startup.id) > 0 {
            continue;
        }

        for candidate in list {
            if let Some(slot) = state.try_place(candidate.startup, candidate.investor, None) {
                allocations.push(Allocation {
                    candidate: candidate.clone(),
                    slot,
                    phase: Phase::Fairness,
                });
                break;
            }
        }
    }

    debug!("Fairness pass committed {} meetings", allocations.len());
    allocations
}

/// Top up investors still below `min_meetings`, in input order
pub fn coverage_pass<'a>(
    candidates: &CandidateSet<'a>,
    investors: &'a [Investor],
    state: &mut AllocationState,
    min_meetings: u32,
) -> Vec<Allocation<'a>> {
    let flat = candidates.flattened();
    let mut allocations = Vec::new();

    for investor in investors {
        if state.used_capacity(&investor.id) >= min_meetings {
            continue;
        }

        for candidate in flat.iter().filter(|c| c.investor.id == investor.id) {
            if state.used_capacity(&investor.id) >= min_meetings {
                break;
            }
            if let Some(slot) = state.try_place(candidate.startup, candidate.investor, None) {
                allocations.push(Allocation {
                    candidate: candidate.clone(),
                    slot,
                    phase: Phase::Coverage,
                });
            }
        }
    }

    debug!("Coverage step committed {} meetings", allocations.len());
    allocations
}

/// Greedy fill of remaining capacity by global descending score
pub fn utilization_pass<'a>(
    candidates: &CandidateSet<'a>,
    state: &mut AllocationState,
) -> Vec<Allocation<'a>> {
    let mut allocations = Vec::new();

    for candidate in candidates.flattened() {
        if let Some(slot) = state.try_place(candidate.startup, candidate.investor, None) {
            allocations.push(Allocation {
                candidate,
                slot,
                phase: Phase::Utilization,
            });
        }
    }

    debug!("Utilization pass committed {} meetings", allocations.len());
    allocations
}
