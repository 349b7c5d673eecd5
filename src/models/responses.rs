use serde::{Deserialize, Serialize};
use crate::models::domain::{Match, ScheduleStats};

/// Response for the generate schedule endpoint
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GenerateScheduleResponse {
    pub matches: Vec<Match>,
    pub stats: ScheduleStats,
}

/// Response for the pair scoring endpoint
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScorePairResponse {
    #[serde(rename = "passesHardFilters")]
    pub passes_hard_filters: bool,
    pub score: u32,
    pub eligible: bool,
    pub breakdown: Vec<String>,
}

/// Health check response
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HealthResponse {
    pub status: String,
    pub version: String,
    pub timestamp: chrono::DateTime<chrono::Utc>,
}

/// Error response
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ErrorResponse {
    pub error: String,
    pub message: String,
    pub status_code: u16,
}
