use crate::infra::AppState;
use axum::http::{header, StatusCode};
use axum::response::IntoResponse;
use axum::Extension;
use axum::Json;
use pre_flourish::workflows::caregiver::{
    caregiver_router, CaregiverConsentService, ConsentRepository, ScreeningRepository,
};
use serde_json::json;
use std::sync::atomic::Ordering;
use std::sync::Arc;

pub(crate) fn with_caregiver_routes<S, C>(
    service: Arc<CaregiverConsentService<S, C>>,
) -> axum::Router
where
    S: ScreeningRepository + 'static,
    C: ConsentRepository + 'static,
{
    caregiver_router(service)
        .route("/health", axum::routing::get(healthcheck))
        .route("/ready", axum::routing::get(readiness_endpoint))
        .route("/metrics", axum::routing::get(metrics_endpoint))
}

pub(crate) async fn healthcheck() -> Json<serde_json::Value> {
    Json(json!({ "status": "ok" }))
}

pub(crate) async fn readiness_endpoint(
    Extension(state): Extension<AppState>,
) -> impl IntoResponse {
    let ready = state.readiness.load(Ordering::Relaxed);
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

pub(crate) async fn metrics_endpoint(
    Extension(state): Extension<AppState>,
) -> impl IntoResponse {
    (
        StatusCode::OK,
        [(header::CONTENT_TYPE, "text/plain; version=0.0.4")],
        state.metrics.render(),
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::infra::{InMemoryConsentRepository, InMemoryScreeningRepository};
    use axum::body::Body;
    use axum::http::Request;
    use metrics_exporter_prometheus::PrometheusBuilder;
    use pre_flourish::config::StudyConfig;
    use pre_flourish::workflows::caregiver::SequentialSubjectIdentifier;
    use std::sync::atomic::AtomicBool;
    use tower::ServiceExt;

    fn router(ready: bool) -> axum::Router {
        let service = Arc::new(CaregiverConsentService::new(
            Arc::new(InMemoryScreeningRepository::default()),
            Arc::new(InMemoryConsentRepository::default()),
            Arc::new(SequentialSubjectIdentifier::new(&StudyConfig::default())),
        ));
        let state = AppState {
            readiness: Arc::new(AtomicBool::new(ready)),
            metrics: Arc::new(PrometheusBuilder::new().build_recorder().handle()),
        };
        with_caregiver_routes(service).layer(Extension(state))
    }

    async fn get(router: axum::Router, uri: &str) -> StatusCode {
        router
            .oneshot(Request::get(uri).body(Body::empty()).expect("request builds"))
            .await
            .expect("route executes")
            .status()
    }

    #[tokio::test]
    async fn health_is_always_ok() {
        assert_eq!(get(router(false), "/health").await, StatusCode::OK);
    }

    #[tokio::test]
    async fn readiness_tracks_the_flag() {
        assert_eq!(
            get(router(false), "/ready").await,
            StatusCode::SERVICE_UNAVAILABLE
        );
        assert_eq!(get(router(true), "/ready").await, StatusCode::OK);
    }

    #[tokio::test]
    async fn caregiver_routes_are_mounted() {
        assert_eq!(
            get(router(true), "/api/v1/caregiver/consents/B142-4000001").await,
            StatusCode::NOT_FOUND
        );
        assert_eq!(get(router(true), "/metrics").await, StatusCode::OK);
    }
}
