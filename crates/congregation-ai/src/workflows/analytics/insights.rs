use serde::{Deserialize, Serialize};

use super::health::HealthScore;
use super::metrics::ReportRates;

/// Overall scores below this always trigger the revitalization recommendation.
pub const REVITALIZATION_BELOW: u8 = 60;
/// With no challenges, overall scores at or above this produce a "sustain" item.
pub const SUSTAIN_AT_OR_ABOVE: u8 = 80;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ReportMetric {
    GrowthRate,
    AttendanceRate,
    RetentionRate,
    DonorParticipation,
    VolunteerRatio,
    OverallScore,
}

impl ReportMetric {
    pub const fn label(self) -> &'static str {
        match self {
            Self::GrowthRate => "membership growth rate",
            Self::AttendanceRate => "attendance rate",
            Self::RetentionRate => "member retention",
            Self::DonorParticipation => "donor participation",
            Self::VolunteerRatio => "volunteer ratio",
            Self::OverallScore => "overall health score",
        }
    }

    fn value(self, rates: &ReportRates, score: &HealthScore) -> Option<u8> {
        match self {
            Self::GrowthRate => rates.growth_rate,
            Self::AttendanceRate => rates.attendance_rate,
            Self::RetentionRate => rates.retention_rate,
            Self::DonorParticipation => rates.donor_participation,
            Self::VolunteerRatio => rates.volunteer_ratio,
            Self::OverallScore => Some(score.overall),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Severity {
    Low,
    Medium,
    High,
}

impl Severity {
    pub const fn label(self) -> &'static str {
        match self {
            Self::Low => "Low",
            Self::Medium => "Medium",
            Self::High => "High",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Priority {
    High,
    Medium,
    Low,
}

impl Priority {
    pub const fn label(self) -> &'static str {
        match self {
            Self::High => "High",
            Self::Medium => "Medium",
            Self::Low => "Low",
        }
    }

    const fn from_severity(severity: Severity) -> Self {
        match severity {
            Severity::High => Self::High,
            Severity::Medium => Self::Medium,
            Severity::Low => Self::Low,
        }
    }
}

struct AchievementRule {
    metric: ReportMetric,
    above: u8,
    title: &'static str,
}

const ACHIEVEMENT_RULES: [AchievementRule; 5] = [
    AchievementRule {
        metric: ReportMetric::GrowthRate,
        above: 10,
        title: "Excellent growth",
    },
    AchievementRule {
        metric: ReportMetric::AttendanceRate,
        above: 80,
        title: "Strong attendance",
    },
    AchievementRule {
        metric: ReportMetric::OverallScore,
        above: 80,
        title: "Outstanding church health",
    },
    AchievementRule {
        metric: ReportMetric::DonorParticipation,
        above: 50,
        title: "Generous congregation",
    },
    AchievementRule {
        metric: ReportMetric::VolunteerRatio,
        above: 20,
        title: "Serving culture",
    },
];

struct ChallengeRule {
    metric: ReportMetric,
    below: u8,
    severity: Severity,
    title: &'static str,
    action: &'static str,
}

const CHALLENGE_RULES: [ChallengeRule; 4] = [
    ChallengeRule {
        metric: ReportMetric::RetentionRate,
        below: 70,
        severity: Severity::High,
        title: "Member retention is slipping",
        action: "Launch a pastoral follow-up program for members who stopped attending",
    },
    ChallengeRule {
        metric: ReportMetric::AttendanceRate,
        below: 60,
        severity: Severity::Medium,
        title: "Events are under-attended",
        action: "Review event scheduling and send reminders through SMS and WhatsApp",
    },
    ChallengeRule {
        metric: ReportMetric::DonorParticipation,
        below: 30,
        severity: Severity::Medium,
        title: "Few members give regularly",
        action: "Run a stewardship series and promote online giving options",
    },
    ChallengeRule {
        metric: ReportMetric::VolunteerRatio,
        below: 10,
        severity: Severity::Low,
        title: "Volunteer base is thin",
        action: "Use spiritual gift assessments to invite members into ministry teams",
    },
];

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Achievement {
    pub metric: ReportMetric,
    pub title: String,
    pub detail: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Challenge {
    pub metric: ReportMetric,
    pub severity: Severity,
    pub title: String,
    pub detail: String,
    pub recommended_action: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Recommendation {
    pub priority: Priority,
    pub title: String,
    pub action: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub addresses: Option<ReportMetric>,
}

/// Every rule is evaluated independently; any number may fire.
pub fn derive_achievements(rates: &ReportRates, score: &HealthScore) -> Vec<Achievement> {
    ACHIEVEMENT_RULES
        .iter()
        .filter_map(|rule| {
            let value = rule.metric.value(rates, score)?;
            (value > rule.above).then(|| Achievement {
                metric: rule.metric,
                title: rule.title.to_string(),
                detail: format!(
                    "{} at {value}% exceeds {}%",
                    rule.metric.label(),
                    rule.above
                ),
            })
        })
        .collect()
}

pub fn derive_challenges(rates: &ReportRates, score: &HealthScore) -> Vec<Challenge> {
    CHALLENGE_RULES
        .iter()
        .filter_map(|rule| {
            let value = rule.metric.value(rates, score)?;
            (value < rule.below).then(|| Challenge {
                metric: rule.metric,
                severity: rule.severity,
                title: rule.title.to_string(),
                detail: format!(
                    "{} at {value}% is below {}%",
                    rule.metric.label(),
                    rule.below
                ),
                recommended_action: rule.action.to_string(),
            })
        })
        .collect()
}

pub fn derive_recommendations(score: &HealthScore, challenges: &[Challenge]) -> Vec<Recommendation> {
    let mut recommendations = Vec::new();

    if score.overall < REVITALIZATION_BELOW {
        recommendations.push(Recommendation {
            priority: Priority::High,
            title: "Church revitalization plan".to_string(),
            action: format!(
                "Overall health is {}; convene leadership to set a 90-day revitalization plan",
                score.overall
            ),
            addresses: Some(ReportMetric::OverallScore),
        });
    }

    for challenge in challenges {
        recommendations.push(Recommendation {
            priority: Priority::from_severity(challenge.severity),
            title: challenge.title.clone(),
            action: challenge.recommended_action.clone(),
            addresses: Some(challenge.metric),
        });
    }

    if challenges.is_empty() && score.overall >= SUSTAIN_AT_OR_ABOVE {
        recommendations.push(Recommendation {
            priority: Priority::Low,
            title: "Sustain current momentum".to_string(),
            action: "Document what is working and train new leaders to multiply it".to_string(),
            addresses: None,
        });
    }

    recommendations
}

#[cfg(test)]
mod tests {
    use super::*;

    fn score(overall: u8) -> HealthScore {
        HealthScore {
            growth: overall,
            engagement: overall,
            financial: overall,
            ministry: overall,
            community: overall,
            overall,
        }
    }

    #[test]
    fn achievements_fire_independently() {
        let rates = ReportRates {
            growth_rate: Some(15),
            attendance_rate: Some(85),
            ..ReportRates::default()
        };

        let achievements = derive_achievements(&rates, &score(85));

        let metrics: Vec<ReportMetric> = achievements.iter().map(|a| a.metric).collect();
        assert_eq!(
            metrics,
            vec![
                ReportMetric::GrowthRate,
                ReportMetric::AttendanceRate,
                ReportMetric::OverallScore,
            ]
        );
    }

    #[test]
    fn growth_achievement_is_monotonic_past_threshold() {
        let fired = |growth: u8| {
            let rates = ReportRates {
                growth_rate: Some(growth),
                ..ReportRates::default()
            };
            derive_achievements(&rates, &score(50))
                .iter()
                .any(|achievement| achievement.metric == ReportMetric::GrowthRate)
        };

        assert!(!fired(10));
        assert!((11..=100).all(fired));
    }

    #[test]
    fn challenges_carry_severity_and_action() {
        let rates = ReportRates {
            retention_rate: Some(65),
            attendance_rate: Some(59),
            donor_participation: Some(30),
            volunteer_ratio: Some(5),
            growth_rate: None,
        };

        let challenges = derive_challenges(&rates, &score(70));

        let summary: Vec<(ReportMetric, Severity)> = challenges
            .iter()
            .map(|challenge| (challenge.metric, challenge.severity))
            .collect();
        assert_eq!(
            summary,
            vec![
                (ReportMetric::RetentionRate, Severity::High),
                (ReportMetric::AttendanceRate, Severity::Medium),
                (ReportMetric::VolunteerRatio, Severity::Low),
            ]
        );
        assert!(challenges
            .iter()
            .all(|challenge| !challenge.recommended_action.is_empty()));
    }

    #[test]
    fn absent_rates_never_fire_rules() {
        let rates = ReportRates::default();
        assert!(derive_challenges(&rates, &score(10)).is_empty());
        assert_eq!(derive_achievements(&rates, &score(10)).len(), 0);
    }

    #[test]
    fn low_overall_puts_revitalization_first() {
        let rates = ReportRates {
            volunteer_ratio: Some(2),
            ..ReportRates::default()
        };
        let score = score(45);
        let challenges = derive_challenges(&rates, &score);

        let recommendations = derive_recommendations(&score, &challenges);

        assert_eq!(recommendations.len(), 2);
        assert_eq!(recommendations[0].priority, Priority::High);
        assert!(recommendations[0].title.contains("revitalization"));
        assert_eq!(
            recommendations[1].addresses,
            Some(ReportMetric::VolunteerRatio)
        );
    }

    #[test]
    fn healthy_church_gets_sustain_recommendation() {
        let recommendations = derive_recommendations(&score(90), &[]);

        assert_eq!(recommendations.len(), 1);
        assert_eq!(recommendations[0].priority, Priority::Low);
        assert!(derive_recommendations(&score(70), &[]).is_empty());
    }
}
