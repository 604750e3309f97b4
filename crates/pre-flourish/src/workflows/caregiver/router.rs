use std::sync::Arc;

use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::{get, post},
    Router,
};
use serde_json::json;
use tracing::warn;

use super::domain::{
    CaregiverScreening, ConsentSubmission, ScreeningIdentifier, SubjectIdentifier,
};
use super::repository::{ConsentRepository, RepositoryError, ScreeningRepository};
use super::service::{CaregiverConsentService, ConsentServiceError};

/// Router builder exposing HTTP endpoints for screening and consent intake.
pub fn caregiver_router<S, C>(service: Arc<CaregiverConsentService<S, C>>) -> Router
where
    S: ScreeningRepository + 'static,
    C: ConsentRepository + 'static,
{
    Router::new()
        .route("/api/v1/caregiver/screenings", post(screen_handler::<S, C>))
        .route(
            "/api/v1/caregiver/screenings/:screening_identifier",
            get(screening_status_handler::<S, C>),
        )
        .route("/api/v1/caregiver/consents", post(consent_handler::<S, C>))
        .route(
            "/api/v1/caregiver/consents/:subject_identifier",
            get(consent_status_handler::<S, C>),
        )
        .with_state(service)
}

pub(crate) async fn screen_handler<S, C>(
    State(service): State<Arc<CaregiverConsentService<S, C>>>,
    axum::Json(screening): axum::Json<CaregiverScreening>,
) -> Response
where
    S: ScreeningRepository + 'static,
    C: ConsentRepository + 'static,
{
    match service.screen(screening) {
        Ok(record) => (StatusCode::CREATED, axum::Json(record.view())).into_response(),
        Err(err) => error_response(err),
    }
}

pub(crate) async fn screening_status_handler<S, C>(
    State(service): State<Arc<CaregiverConsentService<S, C>>>,
    Path(screening_identifier): Path<String>,
) -> Response
where
    S: ScreeningRepository + 'static,
    C: ConsentRepository + 'static,
{
    let id = ScreeningIdentifier(screening_identifier);
    match service.get_screening(&id) {
        Ok(record) => (StatusCode::OK, axum::Json(record.view())).into_response(),
        Err(ConsentServiceError::Repository(RepositoryError::NotFound)) => {
            let payload = json!({
                "error": format!("no screening recorded for {id}"),
            });
            (StatusCode::NOT_FOUND, axum::Json(payload)).into_response()
        }
        Err(err) => error_response(err),
    }
}

pub(crate) async fn consent_handler<S, C>(
    State(service): State<Arc<CaregiverConsentService<S, C>>>,
    axum::Json(submission): axum::Json<ConsentSubmission>,
) -> Response
where
    S: ScreeningRepository + 'static,
    C: ConsentRepository + 'static,
{
    match service.consent(submission) {
        Ok(record) => (StatusCode::CREATED, axum::Json(record.view())).into_response(),
        Err(err) => error_response(err),
    }
}

pub(crate) async fn consent_status_handler<S, C>(
    State(service): State<Arc<CaregiverConsentService<S, C>>>,
    Path(subject_identifier): Path<String>,
) -> Response
where
    S: ScreeningRepository + 'static,
    C: ConsentRepository + 'static,
{
    let id = SubjectIdentifier(subject_identifier);
    match service.get(&id) {
        Ok(record) => (StatusCode::OK, axum::Json(record.view())).into_response(),
        Err(ConsentServiceError::Repository(RepositoryError::NotFound)) => {
            let payload = json!({
                "error": format!("no consent recorded for {id}"),
            });
            (StatusCode::NOT_FOUND, axum::Json(payload)).into_response()
        }
        Err(err) => error_response(err),
    }
}

fn error_response(err: ConsentServiceError) -> Response {
    let status = match &err {
        ConsentServiceError::Form(_)
        | ConsentServiceError::ScreeningNotFound(_)
        | ConsentServiceError::ScreeningIneligible { .. } => StatusCode::UNPROCESSABLE_ENTITY,
        ConsentServiceError::Repository(RepositoryError::Conflict(_)) => StatusCode::CONFLICT,
        ConsentServiceError::Repository(RepositoryError::NotFound) => StatusCode::NOT_FOUND,
        ConsentServiceError::Repository(RepositoryError::Unavailable(_)) => {
            warn!(error = %err, "caregiver repository unavailable");
            StatusCode::INTERNAL_SERVER_ERROR
        }
    };

    let payload = json!({ "error": err.to_string() });
    (status, axum::Json(payload)).into_response()
}
