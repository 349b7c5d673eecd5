use serde::{Deserialize, Serialize};
use validator::Validate;
use crate::models::domain::{Investor, Match, Startup, TimeSlot};

/// Request to generate a schedule from a full roster snapshot
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct GenerateScheduleRequest {
    #[validate(length(max = 5000))]
    #[serde(default)]
    pub startups: Vec<Startup>,
    #[validate(length(max = 5000))]
    #[serde(default)]
    pub investors: Vec<Investor>,
    #[serde(alias = "existing_matches", rename = "existingMatches", default)]
    pub existing_matches: Vec<Match>,
    #[validate(length(max = 200))]
    #[serde(alias = "time_slots", rename = "timeSlots", default)]
    pub time_slots: Vec<TimeSlot>,
    #[validate(range(max = 100))]
    #[serde(alias = "min_score", rename = "minScore", default)]
    pub min_score: Option<u32>,
    #[validate(range(max = 200))]
    #[serde(alias = "min_meetings_per_investor", rename = "minMeetingsPerInvestor", default)]
    pub min_meetings_per_investor: Option<u32>,
    #[serde(alias = "investor_filter", rename = "investorFilter", default)]
    pub investor_filter: Option<Vec<String>>,
}

/// Request to preview the compatibility of a single pair
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScorePairRequest {
    pub startup: Startup,
    pub investor: Investor,
}
