use crate::cli::ServeArgs;
use crate::infra::{AppState, InMemoryConsentRepository, InMemoryScreeningRepository};
use crate::routes::with_caregiver_routes;
use axum::Extension;
use axum_prometheus::PrometheusMetricLayer;
use pre_flourish::config::AppConfig;
use pre_flourish::error::AppError;
use pre_flourish::telemetry;
use pre_flourish::workflows::caregiver::{CaregiverConsentService, SequentialSubjectIdentifier};
use std::sync::atomic::{AtomicBool, Ordering};
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
    let readiness_flag = Arc::new(AtomicBool::new(false));
    let app_state = AppState {
        readiness: readiness_flag.clone(),
        metrics: Arc::new(prometheus_handle),
    };

    let service = Arc::new(CaregiverConsentService::new(
        Arc::new(InMemoryScreeningRepository::default()),
        Arc::new(InMemoryConsentRepository::default()),
        Arc::new(SequentialSubjectIdentifier::new(&config.study)),
    ));

    let app = with_caregiver_routes(service)
        .layer(Extension(app_state))
        .layer(prometheus_layer);

    let addr = config.server.socket_addr()?;
    let listener = tokio::net::TcpListener::bind(addr).await?;
    readiness_flag.store(true, Ordering::Release);

    info!(
        ?config.environment,
        %addr,
        protocol = %config.study.protocol_number,
        site_id = config.study.site_id,
        "caregiver intake service ready"
    );

    axum::serve(listener, app).await?;
    Ok(())
}
