mod assignment;
mod config;
mod rules;

pub use assignment::{AutoAssignment, SuggestedAssignment};
pub use config::{
    MatchWeights, ADJACENT_MATCH_RATIO, EXPERIENCE_CAP, GIFT_MATCH_POINTS, MAX_AUTO_ASSIGNMENTS,
    POINTS_PER_PAST_ASSIGNMENT, WORKLOAD_PENALTY,
};

use std::collections::HashSet;

use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use super::catalog::{normalize_all, CategoryCatalog, CategoryProfile};
use super::domain::{AssignmentNeed, VolunteerCandidate, VolunteerId};
use crate::scoring::{clamp_score, ScoringError};
use rules::score_candidate;

/// Stateless engine ranking a candidate pool against one assignment need.
#[derive(Debug, Clone, Default)]
pub struct MatchEngine {
    weights: MatchWeights,
    catalog: CategoryCatalog,
}

impl MatchEngine {
    pub fn new(weights: MatchWeights, catalog: CategoryCatalog) -> Self {
        Self { weights, catalog }
    }

    pub fn weights(&self) -> &MatchWeights {
        &self.weights
    }

    pub fn catalog(&self) -> &CategoryCatalog {
        &self.catalog
    }

    /// Filters and ranks the pool. An empty result is reported through the status.
    pub fn rank(
        &self,
        need: &AssignmentNeed,
        candidates: &[VolunteerCandidate],
    ) -> Result<CandidateRanking, ScoringError> {
        let pool = self.score_pool(need, candidates)?;
        Ok(pool.into_ranking(need))
    }

    /// Picks the top candidates (at most five) and suggests a role for each.
    pub fn auto_assign(
        &self,
        need: &AssignmentNeed,
        candidates: &[VolunteerCandidate],
    ) -> Result<AutoAssignment, ScoringError> {
        let pool = self.score_pool(need, candidates)?;
        Ok(assignment::build(need, pool))
    }

    fn score_pool(
        &self,
        need: &AssignmentNeed,
        candidates: &[VolunteerCandidate],
    ) -> Result<ScoredPool<'_>, ScoringError> {
        let profile = self
            .catalog
            .get(&need.target.category)
            .ok_or_else(|| ScoringError::UnknownCategory(need.target.category.clone()))?;

        validate_pool(candidates)?;

        let mut keywords = normalize_all(&profile.keywords);
        for extra in normalize_all(&need.keywords) {
            if !keywords.contains(&extra) {
                keywords.push(extra);
            }
        }
        let adjacent_keywords = normalize_all(&profile.adjacent_keywords);

        let mut entries = Vec::new();
        let mut excluded = Vec::new();

        for (index, candidate) in candidates.iter().enumerate() {
            let id = &candidate.profile.id;
            if let Some(reason) = exclusion_reason(need, candidate) {
                debug!(volunteer = %id.as_str(), ?reason, "excluding volunteer from ranking");
                excluded.push(CandidateExclusion {
                    volunteer_id: id.clone(),
                    reason,
                });
                continue;
            }

            let tags = candidate.profile.normalized_tags();
            let score = score_candidate(
                candidate,
                &tags,
                &keywords,
                &adjacent_keywords,
                &self.weights,
            );

            entries.push(ScoredEntry {
                index,
                tags,
                ranked: RankedCandidate {
                    volunteer_id: id.clone(),
                    display_name: candidate.profile.display_name.clone(),
                    raw_score: score.raw_score,
                    match_percent: clamp_score(score.raw_score as f64),
                    current_assignments: candidate.current_assignments,
                    components: score.components,
                },
            });
        }

        entries.sort_by(|a, b| {
            b.ranked
                .raw_score
                .cmp(&a.ranked.raw_score)
                .then(
                    a.ranked
                        .current_assignments
                        .cmp(&b.ranked.current_assignments),
                )
                .then(a.index.cmp(&b.index))
        });

        info!(
            category = %need.target.category,
            eligible = entries.len(),
            excluded = excluded.len(),
            "ranked volunteer candidates"
        );

        Ok(ScoredPool {
            profile,
            entries,
            excluded,
        })
    }
}

fn validate_pool(candidates: &[VolunteerCandidate]) -> Result<(), ScoringError> {
    let mut seen = HashSet::new();
    for candidate in candidates {
        let id = candidate.profile.id.as_str();
        if id.trim().is_empty() {
            return Err(ScoringError::malformed("volunteer.id", "must not be blank"));
        }
        if !seen.insert(id) {
            return Err(ScoringError::malformed(
                "volunteer.id",
                format!("'{id}' appears more than once in the pool"),
            ));
        }
    }
    Ok(())
}

fn exclusion_reason(
    need: &AssignmentNeed,
    candidate: &VolunteerCandidate,
) -> Option<ExclusionReason> {
    if !candidate.profile.active {
        Some(ExclusionReason::Inactive)
    } else if need.assigned.contains(&candidate.profile.id) {
        Some(ExclusionReason::AlreadyAssigned)
    } else if candidate.has_conflict {
        Some(ExclusionReason::SchedulingConflict)
    } else {
        None
    }
}

pub(crate) struct ScoredEntry {
    index: usize,
    pub(crate) tags: Vec<String>,
    pub(crate) ranked: RankedCandidate,
}

pub(crate) struct ScoredPool<'a> {
    pub(crate) profile: &'a CategoryProfile,
    pub(crate) entries: Vec<ScoredEntry>,
    pub(crate) excluded: Vec<CandidateExclusion>,
}

impl ScoredPool<'_> {
    fn into_ranking(self, need: &AssignmentNeed) -> CandidateRanking {
        let ranked: Vec<RankedCandidate> =
            self.entries.into_iter().map(|entry| entry.ranked).collect();

        CandidateRanking {
            category: need.target.category.clone(),
            status: MatchStatus::from_eligible(ranked.len()),
            ranked,
            excluded: self.excluded,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MatchFactor {
    GiftMatch,
    Experience,
    Workload,
}

/// Discrete contribution to a candidate's raw score.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MatchComponent {
    pub factor: MatchFactor,
    pub score: i64,
    pub notes: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ExclusionReason {
    Inactive,
    AlreadyAssigned,
    SchedulingConflict,
}

impl ExclusionReason {
    pub const fn label(self) -> &'static str {
        match self {
            Self::Inactive => "Inactive",
            Self::AlreadyAssigned => "Already Assigned",
            Self::SchedulingConflict => "Scheduling Conflict",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CandidateExclusion {
    pub volunteer_id: VolunteerId,
    pub reason: ExclusionReason,
}

/// Distinguishes a ranked pool from one where every candidate was filtered out.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MatchStatus {
    Ranked,
    NoEligibleCandidates,
}

impl MatchStatus {
    fn from_eligible(count: usize) -> Self {
        if count == 0 {
            Self::NoEligibleCandidates
        } else {
            Self::Ranked
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RankedCandidate {
    pub volunteer_id: VolunteerId,
    pub display_name: String,
    /// Unclamped ranking score; negative values are valid.
    pub raw_score: i64,
    pub match_percent: u8,
    pub current_assignments: u32,
    pub components: Vec<MatchComponent>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CandidateRanking {
    pub category: String,
    pub status: MatchStatus,
    pub ranked: Vec<RankedCandidate>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub excluded: Vec<CandidateExclusion>,
}

impl CandidateRanking {
    pub fn is_empty(&self) -> bool {
        self.ranked.is_empty()
    }
}
