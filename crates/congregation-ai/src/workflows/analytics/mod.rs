//! Executive health reporting: five-dimension health score, rule-based insights and
//! a six-bucket trend series for one reporting period.

pub mod health;
pub mod insights;
pub mod metrics;
pub mod report;
pub mod trends;

pub use health::{HealthBand, HealthScore};
pub use insights::{
    derive_achievements, derive_challenges, derive_recommendations, Achievement, Challenge,
    Priority, Recommendation, ReportMetric, Severity,
};
pub use metrics::{PeriodMetrics, ReportPeriod, ReportRates};
pub use report::{ExecutiveReport, MetricsDigest};
pub use trends::{DonationRow, TrendBucket, TrendInputs, TrendSeries, TREND_BUCKETS};
