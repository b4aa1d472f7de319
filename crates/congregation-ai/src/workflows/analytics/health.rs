use serde::{Deserialize, Serialize};

use super::metrics::PeriodMetrics;
use crate::scoring::clamp_score;

/// New members expected per period, as a share of the membership.
const GROWTH_TARGET_SHARE: f64 = 0.02;
/// Check-ins expected per member per period.
const CHECK_INS_PER_MEMBER: f64 = 4.0;
/// Active volunteers expected as a share of the membership.
const VOLUNTEER_TARGET_SHARE: f64 = 0.1;

// Flat placeholder rules. They stay binary until a continuous formula is approved.
const FINANCIAL_WITH_DONATIONS: u8 = 75;
const FINANCIAL_WITHOUT_DONATIONS: u8 = 25;
const COMMUNITY_WITH_AUTOMATION: u8 = 80;
const COMMUNITY_WITHOUT_AUTOMATION: u8 = 40;

/// Five-dimension church wellness score. Every field lies in `[0, 100]`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct HealthScore {
    pub growth: u8,
    pub engagement: u8,
    pub financial: u8,
    pub ministry: u8,
    pub community: u8,
    pub overall: u8,
}

impl HealthScore {
    pub fn from_metrics(metrics: &PeriodMetrics) -> Self {
        let total = metrics.total_members as f64;

        let growth = per_target(metrics.new_members, total * GROWTH_TARGET_SHARE);
        let engagement = per_target(metrics.check_ins, total * CHECK_INS_PER_MEMBER);
        let financial = if metrics.donation_count > 0 {
            FINANCIAL_WITH_DONATIONS
        } else {
            FINANCIAL_WITHOUT_DONATIONS
        };
        let ministry = per_target(metrics.active_volunteers, total * VOLUNTEER_TARGET_SHARE);
        let community = if metrics.active_automation_rules > 0 {
            COMMUNITY_WITH_AUTOMATION
        } else {
            COMMUNITY_WITHOUT_AUTOMATION
        };

        let dimensions = [growth, engagement, financial, ministry, community];
        let mean =
            dimensions.iter().map(|score| *score as f64).sum::<f64>() / dimensions.len() as f64;

        Self {
            growth,
            engagement,
            financial,
            ministry,
            community,
            overall: clamp_score(mean),
        }
    }

    pub fn band(&self) -> HealthBand {
        HealthBand::from_score(self.overall)
    }
}

/// `(observed / max(1, target)) * 100`, clamped.
fn per_target(observed: u32, target: f64) -> u8 {
    clamp_score(observed as f64 / target.max(1.0) * 100.0)
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum HealthBand {
    Thriving,
    Stable,
    NeedsAttention,
}

impl HealthBand {
    pub fn from_score(overall: u8) -> Self {
        if overall >= 80 {
            Self::Thriving
        } else if overall >= 60 {
            Self::Stable
        } else {
            Self::NeedsAttention
        }
    }

    pub const fn label(self) -> &'static str {
        match self {
            Self::Thriving => "Thriving",
            Self::Stable => "Stable",
            Self::NeedsAttention => "Needs Attention",
        }
    }
}
