use congregation_ai::cache::{Clock, FreshnessCache, SystemClock};
use congregation_ai::config::ScoringConfig;
use congregation_ai::error::AppError;
use congregation_ai::scoring::ScoringError;
use congregation_ai::workflows::analytics::{
    ExecutiveReport, PeriodMetrics, ReportPeriod, TrendInputs,
};
use congregation_ai::workflows::volunteers::MatchEngine;
use metrics_exporter_prometheus::PrometheusHandle;
use serde::de::DeserializeOwned;
use std::fs;
use std::path::Path;
use std::sync::atomic::AtomicBool;
use std::sync::{Arc, Mutex, PoisonError};
use std::time::Duration;
use tracing::debug;

#[derive(Clone)]
pub(crate) struct AppState {
    pub(crate) readiness: Arc<AtomicBool>,
    pub(crate) metrics: Arc<PrometheusHandle>,
}

/// Reports are cached per tenant and reporting window.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub(crate) struct ReportKey {
    pub(crate) tenant_id: String,
    pub(crate) period: ReportPeriod,
}

/// Rows a report was built from. A cached report is only reused for identical rows.
#[derive(Debug, Clone, Default, PartialEq)]
pub(crate) struct ReportInputs {
    pub(crate) metrics: PeriodMetrics,
    pub(crate) trends: TrendInputs,
}

#[derive(Debug, Clone)]
struct CachedReport {
    inputs: ReportInputs,
    report: ExecutiveReport,
}

/// Shared scoring dependencies behind the HTTP handlers.
pub(crate) struct ScoringService<C: Clock = SystemClock> {
    engine: MatchEngine,
    reports: Mutex<FreshnessCache<ReportKey, CachedReport, C>>,
}

impl ScoringService<SystemClock> {
    pub(crate) fn from_config(config: &ScoringConfig) -> Result<Self, AppError> {
        let engine = config.match_engine()?;
        Ok(Self::with_clock(engine, config.report_cache_ttl, SystemClock))
    }
}

impl<C: Clock> ScoringService<C> {
    pub(crate) fn with_clock(engine: MatchEngine, ttl: Duration, clock: C) -> Self {
        Self {
            engine,
            reports: Mutex::new(FreshnessCache::with_clock(ttl, clock)),
        }
    }

    pub(crate) fn engine(&self) -> &MatchEngine {
        &self.engine
    }

    /// Validates the rows, then returns the cached report when it is still fresh and was
    /// built from the same rows. Otherwise builds and stores a new one.
    /// The boolean is true when the report came from the cache.
    pub(crate) fn report(
        &self,
        key: ReportKey,
        inputs: ReportInputs,
        force_refresh: bool,
    ) -> Result<(ExecutiveReport, bool), ScoringError> {
        key.period.validate()?;
        inputs.metrics.validate()?;
        inputs.trends.validate()?;

        let mut reports = self.reports.lock().unwrap_or_else(PoisonError::into_inner);

        if force_refresh {
            reports.invalidate(&key);
        } else if let Some(entry) = reports.get(&key) {
            if entry.inputs == inputs {
                debug!(tenant = %key.tenant_id, "serving cached health report");
                return Ok((entry.report.clone(), true));
            }
            debug!(tenant = %key.tenant_id, "report rows changed, rebuilding");
        }

        let report = ExecutiveReport::generate(key.period, &inputs.metrics, &inputs.trends)?;
        reports.insert(
            key,
            CachedReport {
                inputs,
                report: report.clone(),
            },
        );
        Ok((report, false))
    }
}

pub(crate) fn read_json_input<T: DeserializeOwned>(path: &Path) -> Result<T, AppError> {
    let raw = fs::read_to_string(path)?;
    Ok(serde_json::from_str(&raw)?)
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Duration as ChronoDuration, TimeZone, Utc};
    use congregation_ai::cache::ManualClock;

    fn key() -> ReportKey {
        let start = Utc
            .with_ymd_and_hms(2025, 5, 1, 0, 0, 0)
            .single()
            .expect("valid timestamp");
        ReportKey {
            tenant_id: "iglesia-central".to_string(),
            period: ReportPeriod::new(start, start + ChronoDuration::days(31))
                .expect("valid period"),
        }
    }

    fn inputs(new_members: u32) -> ReportInputs {
        ReportInputs {
            metrics: PeriodMetrics {
                total_members: 100,
                new_members,
                ..PeriodMetrics::default()
            },
            trends: TrendInputs::default(),
        }
    }

    fn service(clock: Arc<ManualClock>) -> ScoringService<Arc<ManualClock>> {
        ScoringService::with_clock(MatchEngine::default(), Duration::from_secs(300), clock)
    }

    #[test]
    fn report_cache_honours_ttl_and_force_refresh() {
        let clock = Arc::new(ManualClock::new());
        let service = service(Arc::clone(&clock));

        let (_, cached) = service.report(key(), inputs(5), false).expect("first build");
        assert!(!cached);
        let (_, cached) = service.report(key(), inputs(5), false).expect("cache hit");
        assert!(cached);
        let (_, cached) = service.report(key(), inputs(5), true).expect("forced");
        assert!(!cached);

        clock.advance(Duration::from_secs(301));
        let (_, cached) = service.report(key(), inputs(5), false).expect("expired");
        assert!(!cached);
    }

    #[test]
    fn changed_rows_rebuild_the_report() {
        let service = service(Arc::new(ManualClock::new()));

        let (first, _) = service.report(key(), inputs(5), false).expect("first build");
        let (second, cached) = service.report(key(), inputs(0), false).expect("rebuild");

        assert!(!cached);
        assert_eq!(first.health.growth, 100);
        assert_eq!(second.health.growth, 0);

        let (again, cached) = service.report(key(), inputs(0), false).expect("cache hit");
        assert!(cached);
        assert_eq!(again, second);
    }

    #[test]
    fn malformed_rows_are_rejected_even_when_cached() {
        let service = service(Arc::new(ManualClock::new()));
        service.report(key(), inputs(5), false).expect("warm cache");

        let mut negative = inputs(5);
        negative.metrics.donation_total = -50.0;

        assert!(matches!(
            service.report(key(), negative, false),
            Err(ScoringError::MalformedRecord { .. })
        ));
    }
}
