use super::super::catalog::first_match;
use super::super::domain::VolunteerCandidate;
use super::config::MatchWeights;
use super::{MatchComponent, MatchFactor};
use crate::scoring::clamp_score;

pub(crate) struct CandidateScore {
    pub raw_score: i64,
    pub components: Vec<MatchComponent>,
}

/// Sums the gift, experience and workload components without clamping the total.
pub(crate) fn score_candidate(
    candidate: &VolunteerCandidate,
    tags: &[String],
    keywords: &[String],
    adjacent_keywords: &[String],
    weights: &MatchWeights,
) -> CandidateScore {
    let mut components = Vec::with_capacity(3);
    let mut raw_score: i64 = 0;

    let gift = gift_component(tags, keywords, adjacent_keywords, weights);
    raw_score += gift.score;
    components.push(gift);

    let past = candidate.profile.past_assignments;
    let experience = (past as i64 * weights.points_per_assignment as i64)
        .min(weights.experience_cap as i64)
        .max(0);
    components.push(MatchComponent {
        factor: MatchFactor::Experience,
        score: experience,
        notes: format!("{past} prior assignment(s), capped at {}", weights.experience_cap),
    });
    raw_score += experience;

    let current = candidate.current_assignments;
    let workload = -(current as i64 * weights.workload_penalty as i64);
    components.push(MatchComponent {
        factor: MatchFactor::Workload,
        score: workload,
        notes: if current == 0 {
            "no active assignments".to_string()
        } else {
            format!("{current} active assignment(s)")
        },
    });
    raw_score += workload;

    CandidateScore {
        raw_score,
        components,
    }
}

fn gift_component(
    tags: &[String],
    keywords: &[String],
    adjacent_keywords: &[String],
    weights: &MatchWeights,
) -> MatchComponent {
    if let Some((tag, keyword)) = first_match(tags, keywords) {
        return MatchComponent {
            factor: MatchFactor::GiftMatch,
            score: clamp_score(weights.gift_match_points as f64) as i64,
            notes: format!("tag '{tag}' matches '{keyword}'"),
        };
    }

    if let Some((tag, keyword)) = first_match(tags, adjacent_keywords) {
        let partial = weights.gift_match_points as f64 * weights.adjacent_match_ratio;
        return MatchComponent {
            factor: MatchFactor::GiftMatch,
            score: clamp_score(partial) as i64,
            notes: format!("tag '{tag}' is adjacent to this ministry via '{keyword}'"),
        };
    }

    MatchComponent {
        factor: MatchFactor::GiftMatch,
        score: 0,
        notes: "no gift or skill matches the target keywords".to_string(),
    }
}
