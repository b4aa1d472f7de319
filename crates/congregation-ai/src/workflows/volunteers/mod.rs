//! Volunteer-to-ministry matching: candidate ranking, auto-assignment and the
//! display-only recommendations score.

pub mod catalog;
pub mod domain;
pub mod matching;
pub mod recommendations;

#[cfg(test)]
mod tests;

pub use catalog::{CatalogError, CategoryCatalog, CategoryProfile, RoleSpec};
pub use domain::{
    AssignmentNeed, AvailabilityMatrix, Daypart, MinistryTarget, VolunteerCandidate, VolunteerId,
    VolunteerProfile, Weekday,
};
pub use matching::{
    AutoAssignment, CandidateExclusion, CandidateRanking, ExclusionReason, MatchComponent,
    MatchEngine, MatchFactor, MatchStatus, MatchWeights, RankedCandidate, SuggestedAssignment,
};
pub use recommendations::{recommend, RecommendationPriority, VolunteerRecommendation};
