use super::common::*;
use crate::scoring::ScoringError;
use crate::workflows::volunteers::domain::AssignmentNeed;
use crate::workflows::volunteers::matching::{ExclusionReason, MatchFactor, MatchStatus};

#[test]
fn raw_score_sums_gift_experience_and_workload() {
    let ranking = engine()
        .rank(&culto_need(), &[musician("ana", 3, 1)])
        .expect("ranking succeeds");

    let entry = &ranking.ranked[0];
    assert_eq!(entry.raw_score, 35);
    assert_eq!(entry.match_percent, 35);

    let score_for = |factor: MatchFactor| {
        entry
            .components
            .iter()
            .find(|component| component.factor == factor)
            .map(|component| component.score)
            .expect("component present")
    };
    assert_eq!(score_for(MatchFactor::GiftMatch), 30);
    assert_eq!(score_for(MatchFactor::Experience), 15);
    assert_eq!(score_for(MatchFactor::Workload), -10);
}

#[test]
fn experience_is_capped() {
    let ranking = engine()
        .rank(&culto_need(), &[musician("veteran", 12, 0)])
        .expect("ranking succeeds");

    assert_eq!(ranking.ranked[0].raw_score, 30 + 25);
}

#[test]
fn heavy_workload_drives_raw_score_negative_without_clamping() {
    let mut busy = candidate("busy");
    busy.current_assignments = 4;

    let ranking = engine()
        .rank(&culto_need(), &[busy])
        .expect("ranking succeeds");

    assert_eq!(ranking.ranked[0].raw_score, -40);
    assert_eq!(ranking.ranked[0].match_percent, 0);
}

#[test]
fn adjacent_gift_earns_partial_credit() {
    let leader = with_skill(candidate("lider"), "Liderazgo");

    let ranking = engine()
        .rank(&culto_need(), &[leader])
        .expect("ranking succeeds");

    assert_eq!(ranking.ranked[0].raw_score, 15);
}

#[test]
fn explicit_keywords_extend_the_catalog() {
    let actor = with_skill(candidate("actor"), "teatro");
    let mut need = culto_need();
    need.keywords.push("Teatro".to_string());

    let ranking = engine().rank(&need, &[actor]).expect("ranking succeeds");

    assert_eq!(ranking.ranked[0].raw_score, 30);
}

#[test]
fn ineligible_pool_yields_empty_ranking_not_error() {
    let mut inactive = musician("inactive", 5, 0);
    inactive.profile.active = false;
    let assigned = musician("assigned", 5, 0);
    let mut conflicted = musician("conflicted", 5, 0);
    conflicted.has_conflict = true;

    let need = culto_need().with_assigned("assigned");
    let ranking = engine()
        .rank(&need, &[inactive, assigned, conflicted])
        .expect("empty pool is not an error");

    assert!(ranking.is_empty());
    assert_eq!(ranking.status, MatchStatus::NoEligibleCandidates);
    let reasons: Vec<ExclusionReason> = ranking
        .excluded
        .iter()
        .map(|exclusion| exclusion.reason)
        .collect();
    assert_eq!(
        reasons,
        vec![
            ExclusionReason::Inactive,
            ExclusionReason::AlreadyAssigned,
            ExclusionReason::SchedulingConflict,
        ]
    );
}

#[test]
fn exclusion_is_absolute_even_for_top_scores() {
    let mut star = musician("star", 10, 0);
    star.has_conflict = true;

    let ranking = engine()
        .rank(&culto_need(), &[star, candidate("plain")])
        .expect("ranking succeeds");

    assert_eq!(ids(ranking.ranked.iter().map(|entry| &entry.volunteer_id)), vec!["plain"]);
}

#[test]
fn ties_break_on_workload_then_input_order() {
    // Both score 20: 30 - 10 versus 20 - 0.
    let loaded = musician("loaded", 0, 1);
    let experienced = {
        let mut candidate = candidate("experienced");
        candidate.profile.past_assignments = 4;
        candidate
    };
    let first_plain = candidate("plain-1");
    let second_plain = candidate("plain-2");

    let ranking = engine()
        .rank(
            &culto_need(),
            &[second_plain.clone(), loaded, first_plain.clone(), experienced],
        )
        .expect("ranking succeeds");

    assert_eq!(
        ids(ranking.ranked.iter().map(|entry| &entry.volunteer_id)),
        vec!["experienced", "loaded", "plain-2", "plain-1"]
    );
}

#[test]
fn ranking_is_reproducible() {
    let pool = vec![
        musician("a", 2, 0),
        candidate("b"),
        musician("c", 2, 0),
        with_skill(candidate("d"), "servicio"),
    ];

    let engine = engine();
    let first = engine.rank(&culto_need(), &pool).expect("first pass");
    let second = engine.rank(&culto_need(), &pool).expect("second pass");

    assert_eq!(first, second);
}

#[test]
fn unknown_category_is_a_caller_error() {
    let need = AssignmentNeed::for_category("RETIRO");

    match engine().rank(&need, &[candidate("a")]) {
        Err(ScoringError::UnknownCategory(category)) => assert_eq!(category, "RETIRO"),
        other => panic!("expected unknown category, got {other:?}"),
    }
}

#[test]
fn malformed_pool_is_rejected() {
    let blank = candidate("  ");
    assert!(matches!(
        engine().rank(&culto_need(), &[blank]),
        Err(ScoringError::MalformedRecord { .. })
    ));

    let duplicate = [candidate("dup"), candidate("dup")];
    assert!(matches!(
        engine().rank(&culto_need(), &duplicate),
        Err(ScoringError::MalformedRecord { .. })
    ));
}
