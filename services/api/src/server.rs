use crate::cli::ServeArgs;
use crate::infra::{AppState, ScoringService};
use crate::routes::with_scoring_routes;
use axum::Extension;
use axum_prometheus::PrometheusMetricLayer;
use congregation_ai::config::AppConfig;
use congregation_ai::error::AppError;
use congregation_ai::telemetry;
use std::sync::atomic::Ordering;
use std::sync::Arc;
use tracing::info;

pub(crate) async fn run(mut args: ServeArgs) -> Result<(), AppError> {
    let mut config = AppConfig::load()?;

    if let Some(host) = args.host.take() {
        config.server.host = host;
    }
    if let Some(port) = args.port.take() {
        config.server.port = port;
    }

    telemetry::init(&config.telemetry)?;

    let (prometheus_layer, prometheus_handle) = PrometheusMetricLayer::pair();
    let readiness_flag = Arc::new(std::sync::atomic::AtomicBool::new(false));
    let app_state = AppState {
        readiness: readiness_flag.clone(),
        metrics: Arc::new(prometheus_handle),
    };

    let scoring_service = Arc::new(ScoringService::from_config(&config.scoring)?);
    let categories: Vec<&str> = scoring_service.engine().catalog().categories().collect();
    info!(
        ?categories,
        points_per_assignment = config.scoring.points_per_assignment,
        report_cache_ttl_secs = config.scoring.report_cache_ttl.as_secs(),
        "scoring engine configured"
    );

    let app = with_scoring_routes(scoring_service)
        .layer(Extension(app_state))
        .layer(prometheus_layer);

    let addr = config.server.socket_addr()?;
    let listener = tokio::net::TcpListener::bind(addr).await?;
    readiness_flag.store(true, Ordering::Release);

    info!(?config.environment, %addr, "congregation scoring service ready");

    axum::serve(listener, app).await?;
    Ok(())
}
