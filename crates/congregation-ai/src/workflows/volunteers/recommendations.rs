use serde::{Deserialize, Serialize};

use super::domain::{VolunteerId, VolunteerProfile};
use crate::scoring::{clamp_score, weighted_sum};

const BASE_MATCH: f64 = 50.0;
const PRIMARY_GIFT_WEIGHT: f64 = 10.0;
const SECONDARY_GIFT_WEIGHT: f64 = 5.0;
const PASSION_WEIGHT: f64 = 3.0;

const HIGH_PRIORITY_ABOVE: u8 = 80;
const MEDIUM_PRIORITY_ABOVE: u8 = 60;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RecommendationPriority {
    High,
    Medium,
    Low,
}

impl RecommendationPriority {
    pub fn from_match(match_percent: u8) -> Self {
        if match_percent > HIGH_PRIORITY_ABOVE {
            Self::High
        } else if match_percent > MEDIUM_PRIORITY_ABOVE {
            Self::Medium
        } else {
            Self::Low
        }
    }

    pub const fn label(self) -> &'static str {
        match self {
            Self::High => "High",
            Self::Medium => "Medium",
            Self::Low => "Low",
        }
    }
}

/// Display-only suggestion; unrelated to the raw ranking score of an assignment pass.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct VolunteerRecommendation {
    pub volunteer_id: VolunteerId,
    pub display_name: String,
    pub match_percent: u8,
    pub priority: RecommendationPriority,
    pub reasoning: Vec<String>,
}

/// `clamp(50 + primary*10 + secondary*5 + passions*3)`.
pub fn match_percent(profile: &VolunteerProfile) -> u8 {
    clamp_score(weighted_sum(&[
        (1.0, BASE_MATCH),
        (profile.primary_gifts.len() as f64, PRIMARY_GIFT_WEIGHT),
        (profile.secondary_gifts.len() as f64, SECONDARY_GIFT_WEIGHT),
        (profile.ministry_passions.len() as f64, PASSION_WEIGHT),
    ]))
}

/// Scores active volunteers for the recommendations view, best first.
pub fn recommend(
    profiles: &[VolunteerProfile],
    limit: Option<usize>,
) -> Vec<VolunteerRecommendation> {
    let mut recommendations: Vec<VolunteerRecommendation> = profiles
        .iter()
        .filter(|profile| profile.active)
        .map(|profile| {
            let match_percent = match_percent(profile);
            VolunteerRecommendation {
                volunteer_id: profile.id.clone(),
                display_name: profile.display_name.clone(),
                match_percent,
                priority: RecommendationPriority::from_match(match_percent),
                reasoning: reasoning(profile),
            }
        })
        .collect();

    recommendations.sort_by(|a, b| b.match_percent.cmp(&a.match_percent));

    if let Some(limit) = limit {
        recommendations.truncate(limit);
    }

    recommendations
}

fn reasoning(profile: &VolunteerProfile) -> Vec<String> {
    let mut notes = Vec::new();

    if !profile.primary_gifts.is_empty() {
        notes.push(format!(
            "Primary gifts identified: {}",
            profile.primary_gifts.join(", ")
        ));
    }

    if !profile.ministry_passions.is_empty() {
        notes.push(format!(
            "Expressed passion for {}",
            profile.ministry_passions.join(", ")
        ));
    }

    match &profile.availability {
        Some(matrix) if matrix.open_slots() > 0 => notes.push(format!(
            "Availability configured ({} weekly slot(s))",
            matrix.open_slots()
        )),
        Some(_) => notes.push("Availability configured with no open slots".to_string()),
        None => notes.push("General availability estimated".to_string()),
    }

    if profile.past_assignments > 0 {
        notes.push(format!(
            "{} prior assignment(s) completed",
            profile.past_assignments
        ));
    }

    notes
}
