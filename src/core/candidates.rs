use std::cmp::Ordering;
use crate::models::{AllocationConfig, Investor, Startup};
use crate::core::{
    allocator::AllocationState,
    dedup::DedupKeys,
    scoring::{calculate_compatibility, Compatibility},
};

/// An eligible startup/investor pairing awaiting allocation
#[derive(Debug, Clone)]
pub struct Candidate<'a> {
    pub startup: &'a Startup,
    pub investor: &'a Investor,
    pub compatibility: Compatibility,
    /// Position in startup-then-investor iteration order, used for tie-breaks
    pub discovery: usize,
}

impl Candidate<'_> {
    pub fn score(&self) -> u32 {
        self.compatibility.score
    }
}

/// Descending score, earlier discovery first on ties
pub fn by_score_desc(a: &Candidate<'_>, b: &Candidate<'_>) -> Ordering {
    b.score().cmp(&a.score()).then_with(|| a.discovery.cmp(&b.discovery))
}

/// Eligible candidates for one run
#[derive(Debug, Default)]
pub struct CandidateSet<'a> {
    /// Per startup (input order), each list sorted by descending score
    pub by_startup: Vec<(usize, Vec<Candidate<'a>>)>,
}

impl<'a> CandidateSet<'a> {
    pub fn len(&self) -> usize {
        self.by_startup.iter().map(|(_, list)| list.len()).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Flat list across all startups, sorted by descending score
    pub fn flattened(&self) -> Vec<Candidate<'a>> {
        let mut all: Vec<Candidate<'a>> = self
            .by_startup
            .iter()
            .flat_map(|(_, list)| list.iter().cloned())
            .collect();
        all.sort_by(by_score_desc);
        all
    }
}

/// Whether an investor may receive new meetings in this run
pub fn investor_allowed(investor: &Investor, config: &AllocationConfig) -> bool {
    investor.is_present()
        && investor.total_slots > 0
        && config
            .investor_filter
            .as_ref()
            .map_or(true, |allowed| allowed.contains(&investor.id))
}

/// Score every open pair and keep the eligible ones
///
/// Pairs already committed (or colliding with a committed pair through the
/// firm or name keys) are skipped before scoring.
pub fn generate_candidates<'a>(
    startups: &'a [Startup],
    investors: &'a [Investor],
    state: &AllocationState,
    config: &AllocationConfig,
) -> CandidateSet<'a> {
    let mut by_startup = Vec::new();
    let mut discovery = 0usize;

    for (startup_idx, startup) in startups.iter().enumerate() {
        let mut list = Vec::new();

        for investor in investors {
            let position = discovery;
            discovery += 1;

            if !startup.is_present() || !investor_allowed(investor, config) {
                continue;
            }
            if state.dedup().is_blocked(&DedupKeys::for_pair(startup, investor)) {
                continue;
            }

            let compatibility =
                calculate_compatibility(startup, investor, state.remaining_capacity(investor));
            if !compatibility.is_eligible(config.min_score) {
                continue;
            }

            list.push(Candidate {
                startup,
                investor,
                compatibility,
                discovery: position,
            });
        }

        if !list.is_empty() {
            list.sort_by(by_score_desc);
            by_startup.push((startup_idx, list));
        }
    }

    CandidateSet { by_startup }
}
