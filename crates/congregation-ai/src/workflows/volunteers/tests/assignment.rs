use super::common::*;
use crate::workflows::volunteers::domain::{AssignmentNeed, VolunteerCandidate};
use crate::workflows::volunteers::matching::{MatchStatus, MAX_AUTO_ASSIGNMENTS};

fn pool(size: usize) -> Vec<VolunteerCandidate> {
    (0..size)
        .map(|index| musician(&format!("v{index}"), index as u32, 0))
        .collect()
}

#[test]
fn auto_assign_caps_selection_at_five() {
    let outcome = engine()
        .auto_assign(&culto_need(), &pool(8))
        .expect("assignment succeeds");

    assert_eq!(outcome.assigned_count, MAX_AUTO_ASSIGNMENTS);
    assert_eq!(outcome.assignments.len(), 5);
    assert_eq!(outcome.eligible_count, 8);
    assert_eq!(outcome.status, MatchStatus::Ranked);
}

#[test]
fn auto_assign_returns_whole_pool_when_smaller_than_cap() {
    let outcome = engine()
        .auto_assign(&culto_need(), &pool(3))
        .expect("assignment succeeds");

    assert_eq!(outcome.assigned_count, 3);
    assert_eq!(outcome.eligible_count, 3);
}

#[test]
fn empty_pool_reports_zero_assignments() {
    let outcome = engine()
        .auto_assign(&culto_need(), &[])
        .expect("empty pool is not an error");

    assert_eq!(outcome.assigned_count, 0);
    assert_eq!(outcome.status, MatchStatus::NoEligibleCandidates);
    assert!(outcome.message.contains("no eligible volunteers"));
    assert!(!outcome.required_roles.is_empty());
}

#[test]
fn reinvocation_skips_already_assigned_volunteers() {
    let engine = engine();
    let candidates = pool(7);
    let first = engine
        .auto_assign(&culto_need(), &candidates)
        .expect("first pass");

    let mut need = culto_need();
    for assignment in &first.assignments {
        need.assigned.insert(assignment.volunteer_id.clone());
    }
    let second = engine
        .auto_assign(&need, &candidates)
        .expect("second pass");

    assert_eq!(second.assigned_count, 2);
    assert!(second
        .assignments
        .iter()
        .all(|assignment| !need.assigned.contains(&assignment.volunteer_id)));
}

#[test]
fn roles_follow_keyword_matches_before_catalog_order() {
    let audio = with_skill(candidate("audio"), "Sonido en vivo");
    let mut usher = with_skill(candidate("usher"), "Ujier");
    usher.profile.past_assignments = 1;
    let mut cook = with_skill(candidate("cook"), "cocina");
    cook.profile.past_assignments = 2;

    let outcome = engine()
        .auto_assign(&AssignmentNeed::for_category("culto"), &[audio, usher, cook])
        .expect("assignment succeeds");

    let roles: Vec<(&str, &str, bool)> = outcome
        .assignments
        .iter()
        .map(|assignment| {
            (
                assignment.volunteer_id.as_str(),
                assignment.role.as_str(),
                assignment.role_matched,
            )
        })
        .collect();

    assert_eq!(
        roles,
        vec![
            ("usher", "Ujier", true),
            ("audio", "Técnico Audio", true),
            ("cook", "Músico", false),
        ]
    );
}
