use serde::{Deserialize, Serialize};

use super::super::catalog::{normalize_all, tags_match, RoleSpec};
use super::super::domain::{AssignmentNeed, VolunteerId};
use super::config::MAX_AUTO_ASSIGNMENTS;
use super::{CandidateExclusion, MatchStatus, ScoredPool};

const FALLBACK_ROLE: &str = "Apoyo General";

/// One volunteer selected by auto-assignment, with the role suggested for them.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SuggestedAssignment {
    pub volunteer_id: VolunteerId,
    pub display_name: String,
    pub role: String,
    /// True when the role was chosen because the volunteer's tags match it.
    pub role_matched: bool,
    pub raw_score: i64,
    pub match_percent: u8,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AutoAssignment {
    pub category: String,
    pub status: MatchStatus,
    pub required_roles: Vec<String>,
    pub assignments: Vec<SuggestedAssignment>,
    pub assigned_count: usize,
    pub eligible_count: usize,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub excluded: Vec<CandidateExclusion>,
    pub message: String,
}

pub(crate) fn build(need: &AssignmentNeed, pool: ScoredPool<'_>) -> AutoAssignment {
    let roles = &pool.profile.roles;
    let eligible_count = pool.entries.len();
    let mut picker = RolePicker::new(roles);

    let assignments: Vec<SuggestedAssignment> = pool
        .entries
        .into_iter()
        .take(MAX_AUTO_ASSIGNMENTS)
        .map(|entry| {
            let (role, role_matched) = picker.pick(&entry.tags);
            SuggestedAssignment {
                volunteer_id: entry.ranked.volunteer_id,
                display_name: entry.ranked.display_name,
                role,
                role_matched,
                raw_score: entry.ranked.raw_score,
                match_percent: entry.ranked.match_percent,
            }
        })
        .collect();

    let assigned_count = assignments.len();
    let message = if assigned_count > 0 {
        format!("assigned {assigned_count} volunteer(s) automatically")
    } else {
        "no eligible volunteers for automatic assignment".to_string()
    };

    AutoAssignment {
        category: need.target.category.clone(),
        status: MatchStatus::from_eligible(eligible_count),
        required_roles: roles.iter().map(|role| role.label.clone()).collect(),
        assignments,
        assigned_count,
        eligible_count,
        excluded: pool.excluded,
        message,
    }
}

/// Hands out roles in rank order: a keyword-matched open role first, then the
/// next open role in catalog order, then round-robin once every role is filled.
struct RolePicker<'a> {
    roles: &'a [RoleSpec],
    role_keywords: Vec<Vec<String>>,
    filled: Vec<bool>,
    overflow: usize,
}

impl<'a> RolePicker<'a> {
    fn new(roles: &'a [RoleSpec]) -> Self {
        Self {
            roles,
            role_keywords: roles
                .iter()
                .map(|role| normalize_all(&role.keywords))
                .collect(),
            filled: vec![false; roles.len()],
            overflow: 0,
        }
    }

    fn pick(&mut self, tags: &[String]) -> (String, bool) {
        let matched = (0..self.roles.len())
            .find(|&index| !self.filled[index] && tags_match(tags, &self.role_keywords[index]));
        if let Some(index) = matched {
            self.filled[index] = true;
            return (self.roles[index].label.clone(), true);
        }

        if let Some(index) = self.filled.iter().position(|filled| !filled) {
            self.filled[index] = true;
            return (self.roles[index].label.clone(), false);
        }

        if self.roles.is_empty() {
            return (FALLBACK_ROLE.to_string(), false);
        }

        let index = self.overflow % self.roles.len();
        self.overflow += 1;
        (self.roles[index].label.clone(), false)
    }
}
