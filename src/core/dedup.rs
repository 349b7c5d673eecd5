use std::collections::HashSet;
use crate::models::{normalize, Investor, Startup};

/// Uniqueness keys for one prospective meeting
///
/// `group` and `names` are absent when a preserved match references an
/// investor or startup that is no longer on the roster.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DedupKeys {
    pub pair: (String, String),
    pub group: Option<(String, String)>,
    pub names: Option<(String, String, String)>,
}

impl DedupKeys {
    pub fn for_pair(startup: &Startup, investor: &Investor) -> Self {
        Self {
            pair: (startup.id.clone(), investor.id.clone()),
            group: Some((startup.id.clone(), investor.group_id())),
            names: Some((
                normalize(&startup.company_name),
                normalize(&investor.firm_name),
                normalize(&investor.member_name),
            )),
        }
    }

    /// Keys for a preserved match whose participants may be off the roster
    pub fn for_ids(
        startup_id: &str,
        investor_id: &str,
        startup: Option<&Startup>,
        investor: Option<&Investor>,
    ) -> Self {
        match (startup, investor) {
            (Some(s), Some(i)) => Self::for_pair(s, i),
            (_, Some(i)) => Self {
                pair: (startup_id.to_string(), investor_id.to_string()),
                group: Some((startup_id.to_string(), i.group_id())),
                names: None,
            },
            _ => Self {
                pair: (startup_id.to_string(), investor_id.to_string()),
                group: None,
                names: None,
            },
        }
    }
}

/// Three independent uniqueness sets consulted before every commit
#[derive(Debug, Default)]
pub struct DedupGuard {
    pairs: HashSet<(String, String)>,
    groups: HashSet<(String, String)>,
    names: HashSet<(String, String, String)>,
}

impl DedupGuard {
    pub fn new() -> Self {
        Self::default()
    }

    /// True when any of the keys has already been recorded
    pub fn is_blocked(&self, keys: &DedupKeys) -> bool {
        self.pairs.contains(&keys.pair)
            || keys.group.as_ref().is_some_and(|g| self.groups.contains(g))
            || keys.names.as_ref().is_some_and(|n| self.names.contains(n))
    }

    pub fn record(&mut self, keys: DedupKeys) {
        self.pairs.insert(keys.pair);
        if let Some(group) = keys.group {
            self.groups.insert(group);
        }
        if let Some(names) = keys.names {
            self.names.insert(names);
        }
    }
}
