use crate::infra::{AppState, ReportInputs, ReportKey, ScoringService};
use axum::extract::State;
use axum::http::{header, StatusCode};
use axum::response::IntoResponse;
use axum::routing::{get, post};
use axum::{Extension, Json, Router};
use congregation_ai::cache::Clock;
use congregation_ai::error::AppError;
use congregation_ai::scoring::ScoringError;
use congregation_ai::workflows::analytics::{
    ExecutiveReport, PeriodMetrics, ReportPeriod, TrendInputs,
};
use congregation_ai::workflows::platform::{PlatformHealth, TenantSnapshot};
use congregation_ai::workflows::volunteers::{
    recommend, AssignmentNeed, AutoAssignment, CandidateRanking, VolunteerCandidate,
    VolunteerProfile, VolunteerRecommendation,
};
use serde::{Deserialize, Serialize};
use serde_json::json;
use std::sync::Arc;

#[derive(Debug, Deserialize)]
pub(crate) struct MatchRequest {
    pub(crate) need: AssignmentNeed,
    #[serde(default)]
    pub(crate) candidates: Vec<VolunteerCandidate>,
}

#[derive(Debug, Deserialize)]
pub(crate) struct RecommendationRequest {
    pub(crate) profiles: Vec<VolunteerProfile>,
    #[serde(default)]
    pub(crate) limit: Option<usize>,
}

#[derive(Debug, Serialize)]
pub(crate) struct RecommendationResponse {
    pub(crate) total: usize,
    pub(crate) recommendations: Vec<VolunteerRecommendation>,
}

#[derive(Debug, Deserialize)]
pub(crate) struct HealthReportRequest {
    pub(crate) tenant_id: String,
    pub(crate) period: ReportPeriod,
    #[serde(default)]
    pub(crate) metrics: PeriodMetrics,
    #[serde(default)]
    pub(crate) trends: TrendInputs,
    #[serde(default)]
    pub(crate) force_refresh: bool,
}

#[derive(Debug, Serialize)]
pub(crate) struct HealthReportResponse {
    pub(crate) tenant_id: String,
    pub(crate) cached: bool,
    #[serde(flatten)]
    pub(crate) report: ExecutiveReport,
}

#[derive(Debug, Deserialize)]
pub(crate) struct TenantHealthRequest {
    pub(crate) tenants: Vec<TenantSnapshot>,
}

pub(crate) fn scoring_router<C>(service: Arc<ScoringService<C>>) -> Router
where
    C: Clock + Send + Sync + 'static,
{
    Router::new()
        .route("/api/v1/volunteers/rankings", post(rankings_endpoint::<C>))
        .route(
            "/api/v1/volunteers/auto-assign",
            post(auto_assign_endpoint::<C>),
        )
        .route(
            "/api/v1/volunteers/recommendations",
            post(recommendations_endpoint),
        )
        .route(
            "/api/v1/analytics/health-report",
            post(health_report_endpoint::<C>),
        )
        .route(
            "/api/v1/platform/tenant-health",
            post(tenant_health_endpoint),
        )
        .with_state(service)
}

pub(crate) fn with_scoring_routes<C>(service: Arc<ScoringService<C>>) -> Router
where
    C: Clock + Send + Sync + 'static,
{
    scoring_router(service)
        .route("/health", get(healthcheck))
        .route("/ready", get(readiness_endpoint))
        .route("/metrics", get(metrics_endpoint))
}

pub(crate) async fn healthcheck() -> Json<serde_json::Value> {
    Json(json!({ "status": "ok" }))
}

pub(crate) async fn readiness_endpoint(Extension(state): Extension<AppState>) -> impl IntoResponse {
    let ready = state.readiness.load(std::sync::atomic::Ordering::Relaxed);
    let status = if ready {
        StatusCode::OK
    } else {
        StatusCode::SERVICE_UNAVAILABLE
    };

    let payload = if ready {
        json!({ "status": "ready" })
    } else {
        json!({ "status": "initializing" })
    };

    (status, Json(payload))
}

pub(crate) async fn metrics_endpoint(Extension(state): Extension<AppState>) -> impl IntoResponse {
    (
        StatusCode::OK,
        [(header::CONTENT_TYPE, "text/plain; version=0.0.4")],
        state.metrics.render(),
    )
}

pub(crate) async fn rankings_endpoint<C>(
    State(service): State<Arc<ScoringService<C>>>,
    Json(payload): Json<MatchRequest>,
) -> Result<Json<CandidateRanking>, AppError>
where
    C: Clock + Send + Sync + 'static,
{
    let ranking = service
        .engine()
        .rank(&payload.need, &payload.candidates)?;
    Ok(Json(ranking))
}

pub(crate) async fn auto_assign_endpoint<C>(
    State(service): State<Arc<ScoringService<C>>>,
    Json(payload): Json<MatchRequest>,
) -> Result<Json<AutoAssignment>, AppError>
where
    C: Clock + Send + Sync + 'static,
{
    let outcome = service
        .engine()
        .auto_assign(&payload.need, &payload.candidates)?;
    Ok(Json(outcome))
}

pub(crate) async fn recommendations_endpoint(
    Json(payload): Json<RecommendationRequest>,
) -> Json<RecommendationResponse> {
    Json(recommendations_for(payload))
}

pub(crate) fn recommendations_for(request: RecommendationRequest) -> RecommendationResponse {
    let recommendations = recommend(&request.profiles, request.limit);
    RecommendationResponse {
        total: recommendations.len(),
        recommendations,
    }
}

pub(crate) async fn health_report_endpoint<C>(
    State(service): State<Arc<ScoringService<C>>>,
    Json(payload): Json<HealthReportRequest>,
) -> Result<Json<HealthReportResponse>, AppError>
where
    C: Clock + Send + Sync + 'static,
{
    let HealthReportRequest {
        tenant_id,
        period,
        metrics,
        trends,
        force_refresh,
    } = payload;

    if tenant_id.trim().is_empty() {
        return Err(AppError::Scoring(ScoringError::MalformedRecord {
            field: "tenant_id".to_string(),
            reason: "must not be blank".to_string(),
        }));
    }

    let key = ReportKey {
        tenant_id: tenant_id.clone(),
        period,
    };
    let (report, cached) =
        service.report(key, ReportInputs { metrics, trends }, force_refresh)?;

    Ok(Json(HealthReportResponse {
        tenant_id,
        cached,
        report,
    }))
}

pub(crate) async fn tenant_health_endpoint(
    Json(payload): Json<TenantHealthRequest>,
) -> Result<Json<PlatformHealth>, AppError> {
    Ok(Json(PlatformHealth::summarize(&payload.tenants)?))
}
