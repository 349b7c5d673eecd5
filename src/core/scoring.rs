use crate::models::{Investor, Startup};
use crate::core::filters::{check_hard_filters, matches_stage};

pub const INDUSTRY_POINTS: u32 = 30;
pub const GEO_POINTS: u32 = 20;
pub const TICKET_POINTS: u32 = 20;
pub const STAGE_POINTS: u32 = 15;
pub const CAPACITY_POINTS: u32 = 15;
pub const MAX_SCORE: u32 = 100;

/// Scorer verdict for one startup/investor pair
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Compatibility {
    pub passes_hard_filters: bool,
    pub score: u32,
    pub breakdown: Vec<String>,
}

impl Compatibility {
    /// Passes the hard filters and reaches the score threshold
    pub fn is_eligible(&self, min_score: u32) -> bool {
        self.passes_hard_filters && self.score >= min_score
    }
}

/// Calculate a compatibility score (0-100) for a pair
///
/// Scoring formula, applied only when every hard filter passes:
/// score = (
///     industry match          30   # already required by the filter
///     geo overlap             20   # already required by the filter
///     ticket proximity     0..20   # peaks at the middle of the ticket range
///     stage alignment      0|15
///     open capacity        0|15    # investor has an unused slot right now
/// )
pub fn calculate_compatibility(
    startup: &Startup,
    investor: &Investor,
    remaining_capacity: u32,
) -> Compatibility {
    let filters = check_hard_filters(startup, investor);
    if !filters.passes() {
        return Compatibility {
            passes_hard_filters: false,
            score: 0,
            breakdown: filters.failures(startup, investor),
        };
    }

    let mut breakdown = Vec::with_capacity(5);
    let mut score = INDUSTRY_POINTS + GEO_POINTS;
    breakdown.push(format!("Industry match: {} (+{})", startup.industry.trim(), INDUSTRY_POINTS));
    breakdown.push(format!("Geo overlap: {} (+{})", filters.geo_overlap.join(", "), GEO_POINTS));

    let ticket = ticket_proximity_points(
        startup.funding_target,
        investor.min_ticket_size,
        investor.max_ticket_size,
    );
    score += ticket;
    breakdown.push(format!(
        "Ticket fit: {} within {}-{} (+{})",
        startup.funding_target, investor.min_ticket_size, investor.max_ticket_size, ticket
    ));

    if matches_stage(startup, investor) {
        score += STAGE_POINTS;
        breakdown.push(format!("Stage match: {} (+{})", startup.funding_stage.trim(), STAGE_POINTS));
    } else {
        breakdown.push(format!("Stage mismatch: {} (+0)", startup.funding_stage.trim()));
    }

    if remaining_capacity > 0 {
        score += CAPACITY_POINTS;
        breakdown.push(format!(
            "Open capacity: {} of {} slots free (+{})",
            remaining_capacity, investor.total_slots, CAPACITY_POINTS
        ));
    } else {
        breakdown.push("No open capacity (+0)".to_string());
    }

    Compatibility {
        passes_hard_filters: true,
        score: score.min(MAX_SCORE),
        breakdown,
    }
}

/// Ticket proximity points (0-20)
/// Highest at the midpoint of the range, linear decay to 0 at either bound
#[inline]
pub fn ticket_proximity_points(target: u64, min: u64, max: u64) -> u32 {
    let midpoint = (min as f64 + max as f64) / 2.0;
    let half_range = ((max as f64 - min as f64) / 2.0).max(1.0);
    let deviation = (target as f64 - midpoint).abs();
    let factor = (1.0 - deviation / half_range).max(0.0);

    (TICKET_POINTS as f64 * factor).round() as u32
}
