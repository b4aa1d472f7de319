use crate::workflows::volunteers::catalog::CategoryCatalog;
use crate::workflows::volunteers::domain::{
    AssignmentNeed, VolunteerCandidate, VolunteerId, VolunteerProfile,
};
use crate::workflows::volunteers::matching::{MatchEngine, MatchWeights};

pub(super) fn engine() -> MatchEngine {
    MatchEngine::new(MatchWeights::default(), CategoryCatalog::standard())
}

pub(super) fn culto_need() -> AssignmentNeed {
    AssignmentNeed::for_category("CULTO")
}

pub(super) fn profile(id: &str) -> VolunteerProfile {
    VolunteerProfile {
        id: VolunteerId::new(id),
        display_name: format!("Volunteer {id}"),
        primary_gifts: Vec::new(),
        secondary_gifts: Vec::new(),
        ministry_passions: Vec::new(),
        skills: Vec::new(),
        past_assignments: 0,
        active: true,
        availability: None,
    }
}

pub(super) fn candidate(id: &str) -> VolunteerCandidate {
    VolunteerCandidate {
        profile: profile(id),
        current_assignments: 0,
        has_conflict: false,
    }
}

pub(super) fn musician(id: &str, past: u32, current: u32) -> VolunteerCandidate {
    let mut candidate = candidate(id);
    candidate.profile.primary_gifts.push("Música".to_string());
    candidate.profile.past_assignments = past;
    candidate.current_assignments = current;
    candidate
}

pub(super) fn with_skill(mut candidate: VolunteerCandidate, skill: &str) -> VolunteerCandidate {
    candidate.profile.skills.push(skill.to_string());
    candidate
}

pub(super) fn ids<'a>(iter: impl Iterator<Item = &'a VolunteerId>) -> Vec<&'a str> {
    iter.map(VolunteerId::as_str).collect()
}
