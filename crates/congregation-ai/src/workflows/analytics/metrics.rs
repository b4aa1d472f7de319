use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::scoring::{ratio_to_percent, ScoringError};

/// Half-open reporting window `[start, end)`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ReportPeriod {
    pub start: DateTime<Utc>,
    pub end: DateTime<Utc>,
}

impl ReportPeriod {
    pub fn new(start: DateTime<Utc>, end: DateTime<Utc>) -> Result<Self, ScoringError> {
        let period = Self { start, end };
        period.validate()?;
        Ok(period)
    }

    pub fn validate(&self) -> Result<(), ScoringError> {
        if self.end <= self.start {
            return Err(ScoringError::InvalidPeriod {
                start: self.start.to_rfc3339(),
                end: self.end.to_rfc3339(),
            });
        }
        Ok(())
    }

    pub fn contains(&self, at: DateTime<Utc>) -> bool {
        at >= self.start && at < self.end
    }
}

/// Scalar counts for one reporting window, already aggregated by the caller.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PeriodMetrics {
    pub total_members: u32,
    pub new_members: u32,
    /// Defaults to `total_members - new_members` when absent.
    pub members_at_period_start: Option<u32>,
    pub retained_members: Option<u32>,
    pub check_ins: u32,
    pub events_held: u32,
    pub expected_attendance: u32,
    pub actual_attendance: u32,
    /// Sum of completed donations in the period.
    pub donation_total: f64,
    pub donation_count: u32,
    pub donor_count: u32,
    pub active_volunteers: u32,
    pub active_automation_rules: u32,
}

impl PeriodMetrics {
    pub fn validate(&self) -> Result<(), ScoringError> {
        if !self.donation_total.is_finite() || self.donation_total < 0.0 {
            return Err(ScoringError::malformed(
                "metrics.donation_total",
                "must be a finite, non-negative amount",
            ));
        }
        Ok(())
    }

    pub fn baseline_members(&self) -> u32 {
        self.members_at_period_start
            .unwrap_or_else(|| self.total_members.saturating_sub(self.new_members))
    }

    pub fn average_donation(&self) -> f64 {
        if self.donation_count == 0 {
            0.0
        } else {
            self.donation_total / self.donation_count as f64
        }
    }
}

/// Percentages used by the achievement and challenge rules.
///
/// A rate whose denominator is zero is `None`, and rules reading it never fire.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReportRates {
    pub growth_rate: Option<u8>,
    pub attendance_rate: Option<u8>,
    pub retention_rate: Option<u8>,
    pub donor_participation: Option<u8>,
    pub volunteer_ratio: Option<u8>,
}

impl ReportRates {
    pub fn from_metrics(metrics: &PeriodMetrics) -> Self {
        let baseline = metrics.baseline_members();
        let growth_rate = match (baseline, metrics.new_members) {
            (0, 0) => None,
            (0, _) => Some(100),
            (base, new) => Some(ratio_to_percent(new as u64, base as u64)),
        };

        let retention_rate = match metrics.retained_members {
            Some(retained) if baseline > 0 => {
                Some(ratio_to_percent(retained as u64, baseline as u64))
            }
            _ => None,
        };

        let member_share = |count: u32| {
            (metrics.total_members > 0)
                .then(|| ratio_to_percent(count as u64, metrics.total_members as u64))
        };

        Self {
            growth_rate,
            attendance_rate: (metrics.expected_attendance > 0).then(|| {
                ratio_to_percent(
                    metrics.actual_attendance as u64,
                    metrics.expected_attendance as u64,
                )
            }),
            retention_rate,
            donor_participation: member_share(metrics.donor_count),
            volunteer_ratio: member_share(metrics.active_volunteers),
        }
    }
}
