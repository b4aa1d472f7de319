use serde::{Deserialize, Serialize};
use tracing::info;

use crate::scoring::{clamp_score, ScoringError};

const BASE_SCORE: i32 = 50;
const MEMBERSHIP_BONUS: i32 = 20;
const ACTIVITY_BONUS: i32 = 15;
const ACTIVE_USERS_BONUS: i32 = 10;
const GIVING_BONUS: i32 = 5;
const STALLED_PENALTY: i32 = 20;
const ABANDONED_PENALTY: i32 = 25;

const MEMBERSHIP_ABOVE: u32 = 10;
const ACTIVITY_ABOVE: u32 = 5;
const ACTIVE_USERS_ABOVE: u32 = 2;
const GIVING_ABOVE: f64 = 100.0;
const STALLED_AFTER_DAYS: u32 = 30;
const STALLED_BELOW_MEMBERS: u32 = 5;
const ABANDONED_AFTER_DAYS: u32 = 7;

/// Tenants at or above this score count as healthy in the summary.
pub const HEALTHY_AT_OR_ABOVE: u8 = 70;

/// Usage facts for one tenant church, gathered by the platform console.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TenantSnapshot {
    pub tenant_id: String,
    pub name: String,
    #[serde(default = "default_active")]
    pub active: bool,
    #[serde(default)]
    pub member_count: u32,
    #[serde(default)]
    pub recent_events: u32,
    #[serde(default)]
    pub recent_donations: u32,
    #[serde(default)]
    pub donation_total: f64,
    #[serde(default)]
    pub active_users: u32,
    #[serde(default)]
    pub days_since_created: u32,
}

fn default_active() -> bool {
    true
}

impl TenantSnapshot {
    pub fn recent_activity(&self) -> u32 {
        self.recent_events.saturating_add(self.recent_donations)
    }

    fn validate(&self) -> Result<(), ScoringError> {
        if self.tenant_id.trim().is_empty() {
            return Err(ScoringError::malformed("tenant_id", "must not be blank"));
        }
        if !self.donation_total.is_finite() || self.donation_total < 0.0 {
            return Err(ScoringError::malformed(
                format!("tenants[{}].donation_total", self.tenant_id),
                "must be a finite, non-negative amount",
            ));
        }
        Ok(())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RiskLevel {
    Low,
    Medium,
    High,
}

impl RiskLevel {
    pub fn from_score(score: u8) -> Self {
        if score < 30 {
            Self::High
        } else if score < 60 {
            Self::Medium
        } else {
            Self::Low
        }
    }

    pub const fn label(self) -> &'static str {
        match self {
            Self::Low => "Low",
            Self::Medium => "Medium",
            Self::High => "High",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TenantHealth {
    pub tenant_id: String,
    pub name: String,
    pub active: bool,
    pub health_score: u8,
    pub risk: RiskLevel,
    pub risk_label: String,
    pub factors: Vec<String>,
}

impl TenantHealth {
    pub fn assess(snapshot: &TenantSnapshot) -> Self {
        let mut score = BASE_SCORE;
        let mut factors = Vec::new();

        if snapshot.member_count > MEMBERSHIP_ABOVE {
            score += MEMBERSHIP_BONUS;
            factors.push(format!("{} members", snapshot.member_count));
        }
        if snapshot.recent_activity() > ACTIVITY_ABOVE {
            score += ACTIVITY_BONUS;
            factors.push(format!(
                "{} recent events and donations",
                snapshot.recent_activity()
            ));
        }
        if snapshot.active_users > ACTIVE_USERS_ABOVE {
            score += ACTIVE_USERS_BONUS;
            factors.push(format!("{} active users", snapshot.active_users));
        }
        if snapshot.donation_total > GIVING_ABOVE {
            score += GIVING_BONUS;
            factors.push("recorded giving above 100".to_string());
        }
        if snapshot.days_since_created > STALLED_AFTER_DAYS
            && snapshot.member_count < STALLED_BELOW_MEMBERS
        {
            score -= STALLED_PENALTY;
            factors.push("membership stalled after the first month".to_string());
        }
        if snapshot.active_users == 0 && snapshot.days_since_created > ABANDONED_AFTER_DAYS {
            score -= ABANDONED_PENALTY;
            factors.push("no active users since onboarding".to_string());
        }

        let health_score = clamp_score(score as f64);
        let risk = RiskLevel::from_score(health_score);

        Self {
            tenant_id: snapshot.tenant_id.clone(),
            name: snapshot.name.clone(),
            active: snapshot.active,
            health_score,
            risk,
            risk_label: risk.label().to_string(),
            factors,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CriticalAlert {
    pub id: String,
    pub tenant_id: String,
    pub message: String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlatformSummary {
    pub total_tenants: usize,
    pub active_tenants: usize,
    pub healthy_tenants: usize,
    pub at_risk_tenants: usize,
    pub average_health_score: u8,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PlatformHealth {
    pub summary: PlatformSummary,
    /// Worst first; ties keep input order.
    pub tenants: Vec<TenantHealth>,
    pub alerts: Vec<CriticalAlert>,
}

impl PlatformHealth {
    pub fn summarize(snapshots: &[TenantSnapshot]) -> Result<Self, ScoringError> {
        for snapshot in snapshots {
            snapshot.validate()?;
        }

        let mut tenants: Vec<TenantHealth> = snapshots.iter().map(TenantHealth::assess).collect();
        tenants.sort_by_key(|tenant| tenant.health_score);

        let average_health_score = if tenants.is_empty() {
            0
        } else {
            let sum: f64 = tenants.iter().map(|t| t.health_score as f64).sum();
            clamp_score(sum / tenants.len() as f64)
        };

        let summary = PlatformSummary {
            total_tenants: tenants.len(),
            active_tenants: tenants.iter().filter(|t| t.active).count(),
            healthy_tenants: tenants
                .iter()
                .filter(|t| t.health_score >= HEALTHY_AT_OR_ABOVE)
                .count(),
            at_risk_tenants: tenants.iter().filter(|t| t.risk == RiskLevel::High).count(),
            average_health_score,
        };

        let alerts: Vec<CriticalAlert> = tenants
            .iter()
            .filter(|tenant| tenant.risk == RiskLevel::High)
            .map(|tenant| CriticalAlert {
                id: format!("tenant_risk_{}", tenant.tenant_id),
                tenant_id: tenant.tenant_id.clone(),
                message: format!(
                    "Church at risk: {} (score {})",
                    tenant.name, tenant.health_score
                ),
            })
            .collect();

        info!(
            tenants = summary.total_tenants,
            at_risk = summary.at_risk_tenants,
            average = summary.average_health_score,
            "summarized platform tenant health"
        );

        Ok(Self {
            summary,
            tenants,
            alerts,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn snapshot(id: &str) -> TenantSnapshot {
        TenantSnapshot {
            tenant_id: id.to_string(),
            name: format!("Iglesia {id}"),
            active: true,
            member_count: 0,
            recent_events: 0,
            recent_donations: 0,
            donation_total: 0.0,
            active_users: 0,
            days_since_created: 0,
        }
    }

    #[test]
    fn thriving_tenant_caps_at_one_hundred() {
        let health = TenantHealth::assess(&TenantSnapshot {
            member_count: 120,
            recent_events: 4,
            recent_donations: 9,
            donation_total: 2500.0,
            active_users: 6,
            days_since_created: 400,
            ..snapshot("grace")
        });

        assert_eq!(health.health_score, 100);
        assert_eq!(health.risk, RiskLevel::Low);
        assert_eq!(health.factors.len(), 4);
    }

    #[test]
    fn abandoned_tenant_is_high_risk() {
        // 50 - 20 (stalled) - 25 (no users)
        let health = TenantHealth::assess(&TenantSnapshot {
            member_count: 2,
            days_since_created: 45,
            ..snapshot("quiet")
        });

        assert_eq!(health.health_score, 5);
        assert_eq!(health.risk, RiskLevel::High);
    }

    #[test]
    fn new_tenant_starts_at_base_medium_risk() {
        let health = TenantHealth::assess(&snapshot("fresh"));
        assert_eq!(health.health_score, 50);
        assert_eq!(health.risk, RiskLevel::Medium);
    }

    #[test]
    fn summary_counts_and_alerts() {
        let healthy = TenantSnapshot {
            member_count: 40,
            recent_events: 6,
            active_users: 3,
            ..snapshot("a")
        };
        let abandoned = TenantSnapshot {
            active: false,
            member_count: 1,
            days_since_created: 60,
            ..snapshot("b")
        };
        let fresh = snapshot("c");

        let platform =
            PlatformHealth::summarize(&[healthy, abandoned, fresh]).expect("summary builds");

        assert_eq!(
            platform.summary,
            PlatformSummary {
                total_tenants: 3,
                active_tenants: 2,
                healthy_tenants: 1,
                at_risk_tenants: 1,
                // (95 + 5 + 50) / 3
                average_health_score: 50,
            }
        );
        let order: Vec<&str> = platform
            .tenants
            .iter()
            .map(|tenant| tenant.tenant_id.as_str())
            .collect();
        assert_eq!(order, vec!["b", "c", "a"]);
        assert_eq!(platform.alerts.len(), 1);
        assert_eq!(platform.alerts[0].id, "tenant_risk_b");
    }

    #[test]
    fn empty_platform_averages_zero() {
        let platform = PlatformHealth::summarize(&[]).expect("summary builds");
        assert_eq!(platform.summary, PlatformSummary::default());
        assert!(platform.alerts.is_empty());
    }

    #[test]
    fn blank_tenant_id_is_malformed() {
        assert!(matches!(
            PlatformHealth::summarize(&[snapshot(" ")]),
            Err(ScoringError::MalformedRecord { .. })
        ));
    }
}
