use std::sync::Arc;

use axum::{
    async_trait,
    extract::{rejection::JsonRejection, FromRequest, Path, Request, State},
    http::{HeaderMap, StatusCode},
    response::{IntoResponse, Response},
    routing::{get, post},
    Json, Router,
};
use serde_json::json;

use super::domain::{AssessmentId, ImpactView, InterviewReceipt, PatientId, TriageResultView};
use super::repository::{ClinicalRecordStore, RepositoryError};
use super::service::{PatientCareError, PatientCareService};
use crate::config::IdentityConfig;
use crate::workflows::tinnitus::{
    InterviewSubmission, OutcomeSubmission, ScreenerSubmission, SoundMaskingSubmission,
    ThsSubmission,
};
use crate::workflows::triage::TriageSubmission;
use crate::workflows::MEDICAL_DISCLAIMER;

/// Shared handler state: the care service plus where to find the caller's identity.
pub struct PatientRouterState<R> {
    pub service: Arc<PatientCareService<R>>,
    pub identity: IdentityConfig,
}

impl<R> Clone for PatientRouterState<R> {
    fn clone(&self) -> Self {
        Self {
            service: Arc::clone(&self.service),
            identity: self.identity.clone(),
        }
    }
}

impl<R> PatientRouterState<R> {
    fn patient(&self, headers: &HeaderMap) -> Option<PatientId> {
        headers
            .get(self.identity.patient_header())
            .and_then(|value| value.to_str().ok())
            .map(str::trim)
            .filter(|value| !value.is_empty())
            .map(|value| PatientId(value.to_string()))
    }
}

/// Router builder exposing the triage and tinnitus care endpoints.
pub fn patient_router<R>(service: Arc<PatientCareService<R>>, identity: IdentityConfig) -> Router
where
    R: ClinicalRecordStore + 'static,
{
    Router::new()
        .route("/api/v1/triage/assessments", post(triage_handler::<R>))
        .route("/api/v1/tinnitus/screenings", post(screening_handler::<R>))
        .route("/api/v1/tinnitus/interviews", post(interview_handler::<R>))
        .route("/api/v1/tinnitus/impact", post(impact_handler::<R>))
        .route("/api/v1/tinnitus/assessments", post(assessment_handler::<R>))
        .route(
            "/api/v1/tinnitus/assessments/:assessment_id/recommendation",
            get(recommendation_handler::<R>),
        )
        .route("/api/v1/tinnitus/care-path", get(care_path_handler::<R>))
        .route(
            "/api/v1/tinnitus/treatment-plan",
            get(treatment_plan_handler::<R>),
        )
        .route("/api/v1/tinnitus/outcomes", post(outcome_handler::<R>))
        .route(
            "/api/v1/tinnitus/sound-masking/sessions",
            post(masking_session_handler::<R>),
        )
        .route("/api/v1/disclaimer", get(disclaimer_handler))
        .with_state(PatientRouterState { service, identity })
}

/// JSON request body whose rejections share the `{ "error": .. }` shape of service errors.
pub(crate) struct FormJson<T>(pub T);

#[async_trait]
impl<S, T> FromRequest<S> for FormJson<T>
where
    Json<T>: FromRequest<S, Rejection = JsonRejection>,
    S: Send + Sync,
{
    type Rejection = Response;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        match Json::<T>::from_request(req, state).await {
            Ok(Json(value)) => Ok(Self(value)),
            Err(rejection) => Err(rejection_response(rejection)),
        }
    }
}

pub(crate) fn rejection_response(rejection: JsonRejection) -> Response {
    let payload = json!({ "error": rejection.body_text() });
    (rejection.status(), Json(payload)).into_response()
}

pub(crate) fn error_response(error: PatientCareError) -> Response {
    let status = match &error {
        PatientCareError::Intake(_) => StatusCode::UNPROCESSABLE_ENTITY,
        PatientCareError::Unauthenticated(_) => StatusCode::UNAUTHORIZED,
        PatientCareError::Repository(RepositoryError::NotFound) => StatusCode::NOT_FOUND,
        PatientCareError::Repository(RepositoryError::Conflict) => StatusCode::CONFLICT,
        PatientCareError::Repository(RepositoryError::Unavailable(_)) => {
            StatusCode::INTERNAL_SERVER_ERROR
        }
    };

    let payload = match &error {
        PatientCareError::Intake(invalid) => json!({
            "error": invalid.to_string(),
            "field": invalid.field,
        }),
        other => json!({ "error": other.to_string() }),
    };
    (status, Json(payload)).into_response()
}

pub(crate) async fn triage_handler<R>(
    State(state): State<PatientRouterState<R>>,
    headers: HeaderMap,
    FormJson(submission): FormJson<TriageSubmission>,
) -> Response
where
    R: ClinicalRecordStore + 'static,
{
    let patient = state.patient(&headers);
    match state.service.assess_risk(patient.as_ref(), &submission) {
        Ok(outcome) => (StatusCode::OK, Json(TriageResultView::from(outcome))).into_response(),
        Err(error) => error_response(error),
    }
}

pub(crate) async fn screening_handler<R>(
    State(state): State<PatientRouterState<R>>,
    headers: HeaderMap,
    FormJson(submission): FormJson<ScreenerSubmission>,
) -> Response
where
    R: ClinicalRecordStore + 'static,
{
    let patient = state.patient(&headers);
    match state.service.submit_screening(patient.as_ref(), &submission) {
        Ok(receipt) if receipt.saved => (StatusCode::CREATED, Json(receipt)).into_response(),
        Ok(receipt) => (StatusCode::OK, Json(receipt)).into_response(),
        Err(error) => error_response(error),
    }
}

pub(crate) async fn interview_handler<R>(
    State(state): State<PatientRouterState<R>>,
    FormJson(submission): FormJson<InterviewSubmission>,
) -> Response
where
    R: ClinicalRecordStore + 'static,
{
    match state.service.review_interview(&submission) {
        Ok(_) => (StatusCode::OK, Json(InterviewReceipt::acknowledged())).into_response(),
        Err(error) => error_response(error),
    }
}

pub(crate) async fn impact_handler<R>(
    State(state): State<PatientRouterState<R>>,
    FormJson(submission): FormJson<ThsSubmission>,
) -> Response
where
    R: ClinicalRecordStore + 'static,
{
    match state.service.estimate_impact(&submission) {
        Ok(assessment) => (StatusCode::OK, Json(ImpactView::from(assessment))).into_response(),
        Err(error) => error_response(error),
    }
}

pub(crate) async fn assessment_handler<R>(
    State(state): State<PatientRouterState<R>>,
    headers: HeaderMap,
    FormJson(submission): FormJson<ThsSubmission>,
) -> Response
where
    R: ClinicalRecordStore + 'static,
{
    let patient = state.patient(&headers);
    match state.service.submit_assessment(patient.as_ref(), &submission) {
        Ok(record) => (StatusCode::CREATED, Json(ImpactView::from(&record))).into_response(),
        Err(error) => error_response(error),
    }
}

pub(crate) async fn recommendation_handler<R>(
    State(state): State<PatientRouterState<R>>,
    headers: HeaderMap,
    Path(assessment_id): Path<String>,
) -> Response
where
    R: ClinicalRecordStore + 'static,
{
    let patient = state.patient(&headers);
    let id = AssessmentId(assessment_id);
    match state.service.treatment_recommendation(patient.as_ref(), &id) {
        Ok(recommendation) => (StatusCode::OK, Json(recommendation)).into_response(),
        Err(PatientCareError::Repository(RepositoryError::NotFound)) => {
            let payload = json!({
                "assessment_id": id.0,
                "error": "assessment not found",
            });
            (StatusCode::NOT_FOUND, Json(payload)).into_response()
        }
        Err(error) => error_response(error),
    }
}

pub(crate) async fn care_path_handler<R>(
    State(state): State<PatientRouterState<R>>,
    headers: HeaderMap,
) -> Response
where
    R: ClinicalRecordStore + 'static,
{
    let patient = state.patient(&headers);
    match state.service.care_path(patient.as_ref()) {
        Ok(path) => (StatusCode::OK, Json(path)).into_response(),
        Err(error) => error_response(error),
    }
}

pub(crate) async fn treatment_plan_handler<R>(
    State(state): State<PatientRouterState<R>>,
    headers: HeaderMap,
) -> Response
where
    R: ClinicalRecordStore + 'static,
{
    let patient = state.patient(&headers);
    match state.service.treatment_plan(patient.as_ref()) {
        Ok(plan) => (StatusCode::OK, Json(plan)).into_response(),
        Err(error) => error_response(error),
    }
}

pub(crate) async fn outcome_handler<R>(
    State(state): State<PatientRouterState<R>>,
    headers: HeaderMap,
    FormJson(submission): FormJson<OutcomeSubmission>,
) -> Response
where
    R: ClinicalRecordStore + 'static,
{
    let patient = state.patient(&headers);
    match state.service.record_outcome(patient.as_ref(), &submission) {
        Ok(()) => (StatusCode::CREATED, Json(json!({ "saved": true }))).into_response(),
        Err(error) => error_response(error),
    }
}

pub(crate) async fn masking_session_handler<R>(
    State(state): State<PatientRouterState<R>>,
    headers: HeaderMap,
    FormJson(submission): FormJson<SoundMaskingSubmission>,
) -> Response
where
    R: ClinicalRecordStore + 'static,
{
    let patient = state.patient(&headers);
    match state
        .service
        .record_masking_session(patient.as_ref(), &submission)
    {
        Ok(()) => (StatusCode::CREATED, Json(json!({ "saved": true }))).into_response(),
        Err(error) => error_response(error),
    }
}

pub(crate) async fn disclaimer_handler() -> Json<serde_json::Value> {
    Json(json!({ "disclaimer": MEDICAL_DISCLAIMER }))
}
