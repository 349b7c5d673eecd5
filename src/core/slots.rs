use std::collections::{HashMap, HashSet};
use chrono::Duration;
use crate::models::{DefaultSlots, Investor, Startup, TimeSlot};

/// Build the fallback slot sequence: "Slot 1".."Slot N", back to back
pub fn default_time_slots(defaults: &DefaultSlots) -> Vec<TimeSlot> {
    let length = Duration::minutes(defaults.duration_minutes as i64);

    (0..defaults.count)
        .map(|i| {
            let start = defaults.start + length * i as i32;
            TimeSlot::new(
                format!("slot-{}", i + 1),
                format!("Slot {}", i + 1),
                start,
                start + length,
            )
        })
        .collect()
}

#[derive(Debug, Default)]
struct SlotOccupancy {
    startups: HashSet<String>,
    investors: HashSet<String>,
    meetings: u32,
}

/// Per-slot occupancy, indexed by position in the configured slot order
#[derive(Debug)]
pub struct SlotGrid {
    slots: Vec<TimeSlot>,
    occupancy: Vec<SlotOccupancy>,
    by_label: HashMap<String, usize>,
}

impl SlotGrid {
    pub fn new(slots: Vec<TimeSlot>) -> Self {
        let by_label = slots
            .iter()
            .enumerate()
            .map(|(i, slot)| (slot.label.clone(), i))
            .collect();
        let occupancy = slots.iter().map(|_| SlotOccupancy::default()).collect();

        Self { slots, occupancy, by_label }
    }

    pub fn slots(&self) -> &[TimeSlot] {
        &self.slots
    }

    pub fn slot(&self, index: usize) -> &TimeSlot {
        &self.slots[index]
    }

    pub fn index_of(&self, label: &str) -> Option<usize> {
        self.by_label.get(label).copied()
    }

    /// Whether either participant already sits in this slot
    pub fn is_occupied(&self, index: usize, startup_id: &str, investor_id: &str) -> bool {
        let occ = &self.occupancy[index];
        occ.startups.contains(startup_id) || occ.investors.contains(investor_id)
    }

    /// Slot accepts a new meeting for this pair
    pub fn is_usable(&self, index: usize, startup: &Startup, investor: &Investor) -> bool {
        let slot = &self.slots[index];
        let occ = &self.occupancy[index];

        !slot.is_done
            && slot.max_meetings.map_or(true, |max| occ.meetings < max)
            && !self.is_occupied(index, &startup.id, &investor.id)
            && startup.available_in(slot.key())
            && investor.available_in(slot.key())
    }

    /// Earliest usable slot in configured order
    pub fn first_usable(&self, startup: &Startup, investor: &Investor) -> Option<usize> {
        (0..self.slots.len()).find(|&i| self.is_usable(i, startup, investor))
    }

    pub fn reserve(&mut self, index: usize, startup_id: &str, investor_id: &str) {
        let occ = &mut self.occupancy[index];
        occ.startups.insert(startup_id.to_string());
        occ.investors.insert(investor_id.to_string());
        occ.meetings += 1;
    }

    /// Sort position for a slot label; unknown labels sort after all known ones
    pub fn order_of(&self, label: &str) -> usize {
        self.index_of(label).unwrap_or(self.slots.len())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveTime;
    use crate::models::AvailabilityStatus;
    use std::collections::BTreeMap;

    fn startup(id: &str) -> Startup {
        Startup {
            id: id.to_string(),
            company_name: id.to_string(),
            geo_markets: vec![],
            industry: String::new(),
            funding_target: 0,
            funding_stage: String::new(),
            availability_status: AvailabilityStatus::Present,
            slot_availability: None,
        }
    }

    fn investor(id: &str) -> Investor {
        Investor {
            id: id.to_string(),
            firm_id: None,
            firm_name: id.to_string(),
            member_name: String::new(),
            geo_focus: vec![],
            industry_preferences: vec![],
            stage_preferences: vec![],
            min_ticket_size: 0,
            max_ticket_size: 0,
            total_slots: 1,
            table_number: None,
            availability_status: AvailabilityStatus::Present,
            slot_availability: None,
        }
    }

    fn grid(count: u32) -> SlotGrid {
        SlotGrid::new(default_time_slots(&DefaultSlots { count, ..DefaultSlots::default() }))
    }

    #[test]
    fn test_default_slots_are_back_to_back() {
        let slots = default_time_slots(&DefaultSlots::default());

        assert_eq!(slots.len(), 12);
        assert_eq!(slots[0].label, "Slot 1");
        assert_eq!(slots[0].time_range(), "09:00 - 09:20");
        assert_eq!(slots[1].start_time, slots[0].end_time);
        assert_eq!(slots[11].end_time, NaiveTime::from_hms_opt(13, 0, 0).unwrap());
    }

    #[test]
    fn test_earliest_fit() {
        let mut grid = grid(3);
        let (s1, s2, i1) = (startup("s1"), startup("s2"), investor("i1"));

        assert_eq!(grid.first_usable(&s1, &i1), Some(0));
        grid.reserve(0, "s1", "i1");

        // Investor busy in slot 0, next meeting lands in slot 1
        assert_eq!(grid.first_usable(&s2, &i1), Some(1));
    }

    #[test]
    fn test_done_slot_skipped() {
        let mut slots = default_time_slots(&DefaultSlots { count: 2, ..DefaultSlots::default() });
        slots[0].is_done = true;
        let grid = SlotGrid::new(slots);

        assert_eq!(grid.first_usable(&startup("s1"), &investor("i1")), Some(1));
    }

    #[test]
    fn test_availability_map_respected() {
        let grid = grid(2);
        let mut s1 = startup("s1");
        s1.slot_availability = Some(BTreeMap::from([("slot-1".to_string(), false)]));

        assert_eq!(grid.first_usable(&s1, &investor("i1")), Some(1));
    }

    #[test]
    fn test_max_meetings_ceiling() {
        let mut slots = default_time_slots(&DefaultSlots { count: 2, ..DefaultSlots::default() });
        slots[0].max_meetings = Some(1);
        let mut grid = SlotGrid::new(slots);
        grid.reserve(0, "s1", "i1");

        assert_eq!(grid.first_usable(&startup("s2"), &investor("i2")), Some(1));
    }

    #[test]
    fn test_unknown_label_orders_last() {
        let grid = grid(2);
        assert_eq!(grid.order_of("Slot 2"), 1);
        assert_eq!(grid.order_of("Lunch"), 2);
    }
}
