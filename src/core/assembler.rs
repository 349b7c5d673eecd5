use uuid::Uuid;
use crate::models::{Match, MatchStatus};
use crate::core::{allocator::Allocation, slots::SlotGrid};

/// Namespace for deterministic match ids (UUIDv5 over "startup:investor")
const MATCH_NAMESPACE: Uuid = Uuid::from_bytes([
    0x3f, 0x1c, 0x8e, 0x52, 0x6a, 0x0d, 0x4b, 0x97, 0xa1, 0x2e, 0x5c, 0x73, 0xd9, 0x04, 0xb8, 0x6f,
]);

/// Stable id for a startup/investor pairing
pub fn match_id(startup_id: &str, investor_id: &str) -> String {
    let name = format!("{}:{}", startup_id, investor_id);
    Uuid::new_v5(&MATCH_NAMESPACE, name.as_bytes()).to_string()
}

/// Turn an allocation into a presentable match
pub fn build_match(allocation: &Allocation<'_>, grid: &SlotGrid) -> Match {
    let candidate = &allocation.candidate;
    let slot = grid.slot(allocation.slot);

    Match {
        id: match_id(&candidate.startup.id, &candidate.investor.id),
        startup_id: candidate.startup.id.clone(),
        investor_id: candidate.investor.id.clone(),
        startup_name: candidate.startup.company_name.clone(),
        investor_name: candidate.investor.display_name(),
        time_slot: slot.label.clone(),
        slot_time: slot.time_range(),
        compatibility_score: candidate.compatibility.score,
        score_breakdown: candidate.compatibility.breakdown.clone(),
        status: MatchStatus::Upcoming,
        locked: false,
        startup_attending: None,
        investor_attending: None,
        table_number: candidate.investor.table_number.clone(),
    }
}

/// Preserved matches first, then new ones, ordered by configured slot order
///
/// The sort is stable, so matches sharing a slot keep their commit order.
pub fn assemble(preserved: Vec<Match>, allocations: &[Allocation<'_>], grid: &SlotGrid) -> Vec<Match> {
    let mut matches = preserved;
    matches.extend(allocations.iter().map(|a| build_match(a, grid)));
    matches.sort_by_key(|m| grid.order_of(&m.time_slot));
    matches
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_match_id_is_deterministic() {
        assert_eq!(match_id("s1", "i1"), match_id("s1", "i1"));
        assert_ne!(match_id("s1", "i1"), match_id("i1", "s1"));
    }

    #[test]
    fn test_match_id_separates_components() {
        assert_ne!(match_id("s1:i", "1"), match_id("s1", "i1"));
    }
}
