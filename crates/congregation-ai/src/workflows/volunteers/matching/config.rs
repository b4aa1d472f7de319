use serde::{Deserialize, Serialize};

/// Points for a direct gift/skill match against the target keywords.
pub const GIFT_MATCH_POINTS: i32 = 30;
/// Share of the gift points awarded when only an adjacent tag matches.
pub const ADJACENT_MATCH_RATIO: f64 = 0.5;
pub const POINTS_PER_PAST_ASSIGNMENT: i32 = 5;
pub const EXPERIENCE_CAP: i32 = 25;
/// Deducted for every assignment the volunteer currently holds.
pub const WORKLOAD_PENALTY: i32 = 10;
/// Auto-assignment never selects more volunteers than this per invocation.
pub const MAX_AUTO_ASSIGNMENTS: usize = 5;

/// Rubric weights applied by the match engine.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MatchWeights {
    pub gift_match_points: i32,
    pub adjacent_match_ratio: f64,
    pub points_per_assignment: i32,
    pub experience_cap: i32,
    pub workload_penalty: i32,
}

impl MatchWeights {
    pub fn with_points_per_assignment(mut self, points: i32) -> Self {
        self.points_per_assignment = points;
        self
    }
}

impl Default for MatchWeights {
    fn default() -> Self {
        Self {
            gift_match_points: GIFT_MATCH_POINTS,
            adjacent_match_ratio: ADJACENT_MATCH_RATIO,
            points_per_assignment: POINTS_PER_PAST_ASSIGNMENT,
            experience_cap: EXPERIENCE_CAP,
            workload_penalty: WORKLOAD_PENALTY,
        }
    }
}
