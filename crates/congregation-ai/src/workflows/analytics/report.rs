use serde::{Deserialize, Serialize};
use tracing::info;

use super::health::{HealthBand, HealthScore};
use super::insights::{
    derive_achievements, derive_challenges, derive_recommendations, Achievement, Challenge,
    Recommendation,
};
use super::metrics::{PeriodMetrics, ReportPeriod, ReportRates};
use super::trends::{TrendInputs, TrendSeries};
use crate::scoring::ScoringError;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MetricsDigest {
    pub total_members: u32,
    pub new_members: u32,
    pub events_held: u32,
    pub donation_total: f64,
    pub average_donation: f64,
    pub active_volunteers: u32,
}

impl MetricsDigest {
    fn from_metrics(metrics: &PeriodMetrics) -> Self {
        Self {
            total_members: metrics.total_members,
            new_members: metrics.new_members,
            events_held: metrics.events_held,
            donation_total: metrics.donation_total,
            average_donation: metrics.average_donation(),
            active_volunteers: metrics.active_volunteers,
        }
    }
}

/// Executive summary for one tenant and one reporting period.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ExecutiveReport {
    pub period: ReportPeriod,
    pub health: HealthScore,
    pub band: HealthBand,
    pub band_label: String,
    pub rates: ReportRates,
    pub digest: MetricsDigest,
    pub achievements: Vec<Achievement>,
    pub challenges: Vec<Challenge>,
    pub recommendations: Vec<Recommendation>,
    pub trends: TrendSeries,
}

impl ExecutiveReport {
    pub fn generate(
        period: ReportPeriod,
        metrics: &PeriodMetrics,
        trends: &TrendInputs,
    ) -> Result<Self, ScoringError> {
        period.validate()?;
        metrics.validate()?;

        let health = HealthScore::from_metrics(metrics);
        let rates = ReportRates::from_metrics(metrics);
        let achievements = derive_achievements(&rates, &health);
        let challenges = derive_challenges(&rates, &health);
        let recommendations = derive_recommendations(&health, &challenges);
        let trends = TrendSeries::bucket(&period, trends)?;
        let band = health.band();

        info!(
            overall = health.overall,
            band = band.label(),
            achievements = achievements.len(),
            challenges = challenges.len(),
            "generated executive health report"
        );

        Ok(Self {
            period,
            health,
            band,
            band_label: band.label().to_string(),
            rates,
            digest: MetricsDigest::from_metrics(metrics),
            achievements,
            challenges,
            recommendations,
            trends,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Duration, TimeZone, Utc};

    fn period() -> ReportPeriod {
        let start = Utc
            .with_ymd_and_hms(2025, 1, 1, 0, 0, 0)
            .single()
            .expect("valid timestamp");
        ReportPeriod::new(start, start + Duration::days(30)).expect("valid period")
    }

    #[test]
    fn struggling_church_leads_with_revitalization() {
        let metrics = PeriodMetrics {
            total_members: 200,
            new_members: 0,
            retained_members: Some(120),
            members_at_period_start: Some(200),
            check_ins: 100,
            ..PeriodMetrics::default()
        };

        let report = ExecutiveReport::generate(period(), &metrics, &TrendInputs::default())
            .expect("report builds");

        assert_eq!(report.band, HealthBand::NeedsAttention);
        assert!(report.health.overall < 60);
        assert!(report.recommendations[0].title.contains("revitalization"));
        assert!(report
            .challenges
            .iter()
            .any(|challenge| challenge.recommended_action.contains("follow-up")));
        assert_eq!(report.trends.buckets.len(), 6);
    }

    #[test]
    fn non_finite_donation_total_is_rejected() {
        let metrics = PeriodMetrics {
            donation_total: f64::INFINITY,
            ..PeriodMetrics::default()
        };
        assert!(matches!(
            ExecutiveReport::generate(period(), &metrics, &TrendInputs::default()),
            Err(ScoringError::MalformedRecord { .. })
        ));
    }
}
