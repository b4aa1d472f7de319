use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};

use super::metrics::ReportPeriod;
use crate::scoring::ScoringError;

pub const TREND_BUCKETS: usize = 6;

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct DonationRow {
    pub at: DateTime<Utc>,
    pub amount: f64,
}

/// Raw timestamped rows the trend series is tallied from.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TrendInputs {
    pub member_joined: Vec<DateTime<Utc>>,
    pub donations: Vec<DonationRow>,
    pub events: Vec<DateTime<Utc>>,
}

impl TrendInputs {
    pub fn validate(&self) -> Result<(), ScoringError> {
        for (index, donation) in self.donations.iter().enumerate() {
            if !donation.amount.is_finite() || donation.amount < 0.0 {
                return Err(ScoringError::malformed(
                    format!("donations[{index}].amount"),
                    "must be a finite, non-negative amount",
                ));
            }
        }
        Ok(())
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TrendBucket {
    pub start: DateTime<Utc>,
    pub end: DateTime<Utc>,
    pub new_members: u32,
    pub donation_total: f64,
    pub events: u32,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TrendSeries {
    pub buckets: Vec<TrendBucket>,
}

impl TrendSeries {
    /// Splits `[start, end)` into six equal sub-intervals and tallies each row
    /// stream independently. Rows outside the period are ignored.
    pub fn bucket(period: &ReportPeriod, inputs: &TrendInputs) -> Result<Self, ScoringError> {
        period.validate()?;
        inputs.validate()?;

        let span_ms = (period.end - period.start).num_milliseconds();
        let boundary = |index: usize| {
            if index == TREND_BUCKETS {
                period.end
            } else {
                let offset = span_ms * index as i64 / TREND_BUCKETS as i64;
                period.start + Duration::milliseconds(offset)
            }
        };

        let mut buckets: Vec<TrendBucket> = (0..TREND_BUCKETS)
            .map(|index| TrendBucket {
                start: boundary(index),
                end: boundary(index + 1),
                new_members: 0,
                donation_total: 0.0,
                events: 0,
            })
            .collect();

        // Rows go to the last bucket whose start is at or before them, so placement
        // always agrees with the reported boundaries.
        let starts: Vec<DateTime<Utc>> = buckets.iter().map(|bucket| bucket.start).collect();
        let slot = |at: DateTime<Utc>| -> Option<usize> {
            if !period.contains(at) {
                return None;
            }
            starts.iter().rposition(|start| *start <= at)
        };

        for joined in &inputs.member_joined {
            if let Some(index) = slot(*joined) {
                buckets[index].new_members += 1;
            }
        }
        for donation in &inputs.donations {
            if let Some(index) = slot(donation.at) {
                buckets[index].donation_total += donation.amount;
            }
        }
        for event in &inputs.events {
            if let Some(index) = slot(*event) {
                buckets[index].events += 1;
            }
        }

        Ok(Self { buckets })
    }

    pub fn total_new_members(&self) -> u32 {
        self.buckets.iter().map(|bucket| bucket.new_members).sum()
    }

    pub fn total_donations(&self) -> f64 {
        self.buckets.iter().map(|bucket| bucket.donation_total).sum()
    }
}
