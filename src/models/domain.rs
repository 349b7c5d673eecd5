use chrono::NaiveTime;
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, BTreeSet};

/// Attendance status shared by startups and investors
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum AvailabilityStatus {
    #[default]
    Present,
    NotAttending,
}

/// Startup taking part in the event (the scheduled side)
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Startup {
    pub id: String,
    #[serde(rename = "companyName")]
    pub company_name: String,
    #[serde(rename = "geoMarkets", default)]
    pub geo_markets: Vec<String>,
    pub industry: String,
    #[serde(rename = "fundingTarget")]
    pub funding_target: u64,
    #[serde(rename = "fundingStage", default)]
    pub funding_stage: String,
    #[serde(rename = "availabilityStatus", default)]
    pub availability_status: AvailabilityStatus,
    #[serde(rename = "slotAvailability", default)]
    pub slot_availability: Option<BTreeMap<String, bool>>,
}

impl Startup {
    pub fn is_present(&self) -> bool {
        self.availability_status == AvailabilityStatus::Present
    }

    /// Slots missing from the availability map count as available
    pub fn available_in(&self, slot_key: &str) -> bool {
        is_available(self.slot_availability.as_ref(), slot_key)
    }
}

/// Investor record; a firm may be represented by several members
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Investor {
    pub id: String,
    #[serde(rename = "firmId", default)]
    pub firm_id: Option<String>,
    #[serde(rename = "firmName")]
    pub firm_name: String,
    #[serde(rename = "memberName", default)]
    pub member_name: String,
    #[serde(rename = "geoFocus", default)]
    pub geo_focus: Vec<String>,
    #[serde(rename = "industryPreferences", default)]
    pub industry_preferences: Vec<String>,
    #[serde(rename = "stagePreferences", default)]
    pub stage_preferences: Vec<String>,
    #[serde(rename = "minTicketSize")]
    pub min_ticket_size: u64,
    #[serde(rename = "maxTicketSize")]
    pub max_ticket_size: u64,
    #[serde(rename = "totalSlots", default = "default_total_slots")]
    pub total_slots: u32,
    #[serde(rename = "tableNumber", default)]
    pub table_number: Option<String>,
    #[serde(rename = "availabilityStatus", default)]
    pub availability_status: AvailabilityStatus,
    #[serde(rename = "slotAvailability", default)]
    pub slot_availability: Option<BTreeMap<String, bool>>,
}

impl Investor {
    /// Group key used for firm exclusivity
    pub fn group_id(&self) -> String {
        match &self.firm_id {
            Some(id) if !id.trim().is_empty() => id.clone(),
            _ => normalize(&self.firm_name),
        }
    }

    /// Display name in the form "Firm (Member)"
    pub fn display_name(&self) -> String {
        if self.member_name.trim().is_empty() {
            self.firm_name.clone()
        } else {
            format!("{} ({})", self.firm_name, self.member_name)
        }
    }

    pub fn is_present(&self) -> bool {
        self.availability_status == AvailabilityStatus::Present
    }

    pub fn available_in(&self, slot_key: &str) -> bool {
        is_available(self.slot_availability.as_ref(), slot_key)
    }
}

fn default_total_slots() -> u32 { 3 }

fn is_available(map: Option<&BTreeMap<String, bool>>, slot_key: &str) -> bool {
    map.and_then(|m| m.get(slot_key).copied()).unwrap_or(true)
}

/// Lowercase and trim, used for every case-insensitive comparison
pub fn normalize(value: &str) -> String {
    value.trim().to_lowercase()
}

/// A bookable meeting slot
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TimeSlot {
    #[serde(default)]
    pub id: String,
    pub label: String,
    #[serde(rename = "startTime")]
    pub start_time: NaiveTime,
    #[serde(rename = "endTime")]
    pub end_time: NaiveTime,
    #[serde(rename = "isDone", default)]
    pub is_done: bool,
    #[serde(rename = "maxMeetings", default)]
    pub max_meetings: Option<u32>,
}

impl TimeSlot {
    pub fn new(id: impl Into<String>, label: impl Into<String>, start_time: NaiveTime, end_time: NaiveTime) -> Self {
        Self {
            id: id.into(),
            label: label.into(),
            start_time,
            end_time,
            is_done: false,
            max_meetings: None,
        }
    }

    /// Key used to look up per-entity availability
    pub fn key(&self) -> &str {
        if self.id.is_empty() { &self.label } else { &self.id }
    }

    /// Time range formatted as "HH:MM - HH:MM"
    pub fn time_range(&self) -> String {
        format!("{} - {}", self.start_time.format("%H:%M"), self.end_time.format("%H:%M"))
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MatchStatus {
    #[default]
    Upcoming,
    Completed,
}

/// A committed meeting between a startup and an investor
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Match {
    #[serde(default)]
    pub id: String,
    #[serde(rename = "startupId")]
    pub startup_id: String,
    #[serde(rename = "investorId")]
    pub investor_id: String,
    #[serde(rename = "startupName", default)]
    pub startup_name: String,
    #[serde(rename = "investorName", default)]
    pub investor_name: String,
    #[serde(rename = "timeSlot")]
    pub time_slot: String,
    #[serde(rename = "slotTime", default)]
    pub slot_time: String,
    #[serde(rename = "compatibilityScore")]
    pub compatibility_score: u32,
    #[serde(rename = "scoreBreakdown", default)]
    pub score_breakdown: Vec<String>,
    #[serde(default)]
    pub status: MatchStatus,
    #[serde(default)]
    pub locked: bool,
    #[serde(rename = "startupAttending", default)]
    pub startup_attending: Option<bool>,
    #[serde(rename = "investorAttending", default)]
    pub investor_attending: Option<bool>,
    #[serde(rename = "tableNumber", default)]
    pub table_number: Option<String>,
}

impl Match {
    pub fn is_completed(&self) -> bool {
        self.status == MatchStatus::Completed
    }
}

/// Tunables for one allocation run
#[derive(Debug, Clone, PartialEq)]
pub struct AllocationConfig {
    /// Minimum total score for a new pairing
    pub min_score: u32,
    /// Investors below this many meetings get a coverage step before utilization
    pub min_meetings_per_investor: u32,
    /// When set, only these investor ids receive new meetings
    pub investor_filter: Option<BTreeSet<String>>,
    pub default_slots: DefaultSlots,
}

impl Default for AllocationConfig {
    fn default() -> Self {
        Self {
            min_score: 70,
            min_meetings_per_investor: 0,
            investor_filter: None,
            default_slots: DefaultSlots::default(),
        }
    }
}

/// Slot sequence used when a run supplies no time slots
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DefaultSlots {
    pub start: NaiveTime,
    pub duration_minutes: u32,
    pub count: u32,
}

impl Default for DefaultSlots {
    fn default() -> Self {
        Self {
            start: NaiveTime::from_hms_opt(9, 0, 0).unwrap_or(NaiveTime::MIN),
            duration_minutes: 20,
            count: 12,
        }
    }
}

/// Per-phase counters for one allocation run
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScheduleStats {
    #[serde(rename = "completedKept")]
    pub completed_kept: usize,
    #[serde(rename = "lockedKept")]
    pub locked_kept: usize,
    #[serde(rename = "lockedDropped")]
    pub locked_dropped: usize,
    pub candidates: usize,
    #[serde(rename = "fairnessMatches")]
    pub fairness_matches: usize,
    #[serde(rename = "coverageMatches")]
    pub coverage_matches: usize,
    #[serde(rename = "utilizationMatches")]
    pub utilization_matches: usize,
    #[serde(rename = "unmatchedStartups")]
    pub unmatched_startups: usize,
}

impl ScheduleStats {
    pub fn new_matches(&self) -> usize {
        self.fairness_matches + self.coverage_matches + self.utilization_matches
    }
}
