use crate::models::{normalize, Investor, Startup};

/// Outcome of the hard eligibility filters for one pair
///
/// Every filter is evaluated so a rejection can report all failures at once.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HardFilterResult {
    pub industry_match: bool,
    pub geo_overlap: Vec<String>,
    pub ticket_fit: bool,
}

impl HardFilterResult {
    pub fn passes(&self) -> bool {
        self.industry_match && !self.geo_overlap.is_empty() && self.ticket_fit
    }

    /// Human readable reasons for each failed filter
    pub fn failures(&self, startup: &Startup, investor: &Investor) -> Vec<String> {
        let mut reasons = Vec::new();

        if !self.industry_match {
            reasons.push(format!("Industry mismatch: {} not in investor preferences", startup.industry));
        }
        if self.geo_overlap.is_empty() {
            reasons.push(format!(
                "No geographic overlap: [{}] vs [{}]",
                startup.geo_markets.join(", "),
                investor.geo_focus.join(", ")
            ));
        }
        if !self.ticket_fit {
            reasons.push(format!(
                "Funding target {} outside ticket range {}-{}",
                startup.funding_target, investor.min_ticket_size, investor.max_ticket_size
            ));
        }

        reasons
    }
}

/// Run all hard filters for a pair
#[inline]
pub fn check_hard_filters(startup: &Startup, investor: &Investor) -> HardFilterResult {
    HardFilterResult {
        industry_match: matches_industry(startup, investor),
        geo_overlap: geo_overlap(startup, investor),
        ticket_fit: within_ticket_range(startup, investor),
    }
}

/// Startup industry must appear in the investor's preferred industries
#[inline]
pub fn matches_industry(startup: &Startup, investor: &Investor) -> bool {
    let industry = normalize(&startup.industry);
    !industry.is_empty()
        && investor
            .industry_preferences
            .iter()
            .any(|pref| normalize(pref) == industry)
}

/// Startup markets that also appear in the investor's geographic focus
///
/// Regions are reported with the startup's spelling, in the startup's order.
pub fn geo_overlap(startup: &Startup, investor: &Investor) -> Vec<String> {
    let focus: Vec<String> = investor.geo_focus.iter().map(|g| normalize(g)).collect();
    let mut overlap: Vec<String> = Vec::new();

    for market in &startup.geo_markets {
        let key = normalize(market);
        if key.is_empty() || !focus.contains(&key) {
            continue;
        }
        if !overlap.iter().any(|seen| normalize(seen) == key) {
            overlap.push(market.trim().to_string());
        }
    }

    overlap
}

/// Funding target inside the ticket range, bounds inclusive
#[inline]
pub fn within_ticket_range(startup: &Startup, investor: &Investor) -> bool {
    startup.funding_target >= investor.min_ticket_size
        && startup.funding_target <= investor.max_ticket_size
}

/// Stage alignment is scored, never filtered on
#[inline]
pub fn matches_stage(startup: &Startup, investor: &Investor) -> bool {
    let stage = normalize(&startup.funding_stage);
    !stage.is_empty()
        && investor
            .stage_preferences
            .iter()
            .any(|pref| normalize(pref) == stage)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::AvailabilityStatus;

    fn create_test_startup(industry: &str, markets: &[&str], target: u64) -> Startup {
        Startup {
            id: "s1".to_string(),
            company_name: "Acme AI".to_string(),
            geo_markets: markets.iter().map(|m| m.to_string()).collect(),
            industry: industry.to_string(),
            funding_target: target,
            funding_stage: "Seed".to_string(),
            availability_status: AvailabilityStatus::Present,
            slot_availability: None,
        }
    }

    fn create_test_investor() -> Investor {
        Investor {
            id: "i1".to_string(),
            firm_id: None,
            firm_name: "North Ventures".to_string(),
            member_name: "Dana".to_string(),
            geo_focus: vec!["NA".to_string(), "Europe".to_string()],
            industry_preferences: vec!["AI/ML".to_string(), "Fintech".to_string()],
            stage_preferences: vec!["seed".to_string()],
            min_ticket_size: 500_000,
            max_ticket_size: 2_000_000,
            total_slots: 3,
            table_number: None,
            availability_status: AvailabilityStatus::Present,
            slot_availability: None,
        }
    }

    #[test]
    fn test_industry_match_is_case_insensitive() {
        let startup = create_test_startup(" ai/ml ", &["NA"], 1_000_000);
        assert!(matches_industry(&startup, &create_test_investor()));
    }

    #[test]
    fn test_industry_mismatch() {
        let startup = create_test_startup("Biotech", &["NA"], 1_000_000);
        let result = check_hard_filters(&startup, &create_test_investor());
        assert!(!result.industry_match);
        assert!(!result.passes());
    }

    #[test]
    fn test_geo_overlap_lists_shared_regions() {
        let startup = create_test_startup("AI/ML", &["europe", "APAC", "Europe"], 1_000_000);
        let overlap = geo_overlap(&startup, &create_test_investor());
        assert_eq!(overlap, vec!["europe"]);
    }

    #[test]
    fn test_no_geo_overlap_fails() {
        let startup = create_test_startup("AI/ML", &["LATAM"], 1_000_000);
        assert!(!check_hard_filters(&startup, &create_test_investor()).passes());
    }

    #[test]
    fn test_ticket_range_bounds_inclusive() {
        let investor = create_test_investor();
        assert!(within_ticket_range(&create_test_startup("AI/ML", &["NA"], 500_000), &investor));
        assert!(within_ticket_range(&create_test_startup("AI/ML", &["NA"], 2_000_000), &investor));
        assert!(!within_ticket_range(&create_test_startup("AI/ML", &["NA"], 2_000_001), &investor));
        assert!(!within_ticket_range(&create_test_startup("AI/ML", &["NA"], 499_999), &investor));
    }

    #[test]
    fn test_failures_report_every_filter() {
        let startup = create_test_startup("Biotech", &["LATAM"], 10);
        let investor = create_test_investor();
        let result = check_hard_filters(&startup, &investor);
        assert_eq!(result.failures(&startup, &investor).len(), 3);
    }

    #[test]
    fn test_stage_match() {
        let startup = create_test_startup("AI/ML", &["NA"], 1_000_000);
        assert!(matches_stage(&startup, &create_test_investor()));
    }
}
