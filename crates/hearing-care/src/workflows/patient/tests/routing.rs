use super::common::*;
use axum::body::Body;
use axum::extract::{Path, State};
use axum::http::{header, HeaderMap, HeaderValue, Request, StatusCode};
use serde_json::{json, Value};
use std::sync::Arc;
use tower::ServiceExt;

use crate::config::IdentityConfig;
use crate::workflows::patient::router::{
    care_path_handler, disclaimer_handler, recommendation_handler, PatientRouterState,
};
use crate::workflows::patient::{patient_router, PatientCareService};
use crate::workflows::MEDICAL_DISCLAIMER;

fn json_request(method: &str, uri: &str, patient: Option<&str>, body: &Value) -> Request<Body> {
    let mut builder = Request::builder()
        .method(method)
        .uri(uri)
        .header(header::CONTENT_TYPE, "application/json");
    if let Some(patient) = patient {
        builder = builder.header("x-patient-id", patient);
    }
    builder
        .body(Body::from(serde_json::to_vec(body).unwrap()))
        .unwrap()
}

fn get_request(uri: &str, patient: Option<&str>) -> Request<Body> {
    let mut builder = Request::builder().method("GET").uri(uri);
    if let Some(patient) = patient {
        builder = builder.header("x-patient-id", patient);
    }
    builder.body(Body::empty()).unwrap()
}

fn patient_headers() -> HeaderMap {
    let mut headers = HeaderMap::new();
    headers.insert("x-patient-id", HeaderValue::from_static("patient-42"));
    headers
}

fn state_with(service: PatientCareService<MemoryStore>) -> PatientRouterState<MemoryStore> {
    PatientRouterState {
        service: Arc::new(service),
        identity: IdentityConfig::default(),
    }
}

#[tokio::test]
async fn anonymous_triage_returns_gated_preview() {
    let (service, _) = build_service();
    let router = router_with_service(service);

    let response = router
        .oneshot(json_request(
            "POST",
            "/api/v1/triage/assessments",
            None,
            &serde_json::to_value(triage_submission()).unwrap(),
        ))
        .await
        .expect("route executes");

    assert_eq!(response.status(), StatusCode::OK);
    let payload = read_json_body(response).await;
    assert_eq!(payload["risk_level"], "moderate");
    assert_eq!(payload["title"], "Moderate Risk");
    assert_eq!(payload["saved"], false);
    assert_eq!(payload["gated"], true);
    assert!(payload.get("guidance").is_none());
}

#[tokio::test]
async fn signed_in_triage_includes_guidance() {
    let (service, store) = build_service();
    let router = router_with_service(service);

    let response = router
        .oneshot(json_request(
            "POST",
            "/api/v1/triage/assessments",
            Some("patient-42"),
            &serde_json::to_value(triage_submission()).unwrap(),
        ))
        .await
        .expect("route executes");

    assert_eq!(response.status(), StatusCode::OK);
    let payload = read_json_body(response).await;
    assert_eq!(payload["saved"], true);
    assert_eq!(payload["gated"], false);
    assert!(payload["guidance"].as_str().is_some());
    assert_eq!(store.triage.lock().unwrap().len(), 1);
}

#[tokio::test]
async fn triage_with_invalid_option_is_unprocessable() {
    let (service, _) = build_service();
    let router = router_with_service(service);
    let mut body = serde_json::to_value(triage_submission()).unwrap();
    body["noise_exposure"] = json!("all day");

    let response = router
        .oneshot(json_request(
            "POST",
            "/api/v1/triage/assessments",
            None,
            &body,
        ))
        .await
        .expect("route executes");

    assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY);
    let payload = read_json_body(response).await;
    assert_eq!(payload["field"], "noise_exposure");
}

#[tokio::test]
async fn screening_status_depends_on_sign_in() {
    let (service, _) = build_service();
    let router = router_with_service(service);
    let body = serde_json::to_value(screener_submission()).unwrap();

    let anonymous = router
        .clone()
        .oneshot(json_request("POST", "/api/v1/tinnitus/screenings", None, &body))
        .await
        .expect("route executes");
    assert_eq!(anonymous.status(), StatusCode::OK);
    assert_eq!(read_json_body(anonymous).await, json!({ "saved": false }));

    let saved = router
        .oneshot(json_request(
            "POST",
            "/api/v1/tinnitus/screenings",
            Some("patient-42"),
            &body,
        ))
        .await
        .expect("route executes");
    assert_eq!(saved.status(), StatusCode::CREATED);
    let payload = read_json_body(saved).await;
    assert!(payload["screening_id"].as_str().is_some());
}

#[tokio::test]
async fn impact_route_classifies_without_identity() {
    let (service, _) = build_service();
    let router = router_with_service(service);

    let response = router
        .oneshot(json_request(
            "POST",
            "/api/v1/tinnitus/impact",
            None,
            &serde_json::to_value(ths_submission()).unwrap(),
        ))
        .await
        .expect("route executes");

    assert_eq!(response.status(), StatusCode::OK);
    let payload = read_json_body(response).await;
    assert_eq!(payload["impact"], "moderate");
    assert_eq!(payload["recommended_step"], "step_4");
    assert!(payload.get("assessment_id").is_none());
}

#[tokio::test]
async fn assessment_route_requires_identity() {
    let (service, _) = build_service();
    let router = router_with_service(service);

    let response = router
        .oneshot(json_request(
            "POST",
            "/api/v1/tinnitus/assessments",
            None,
            &serde_json::to_value(ths_submission()).unwrap(),
        ))
        .await
        .expect("route executes");

    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
    let payload = read_json_body(response).await;
    assert_eq!(payload["error"], "please sign in to save your assessment");
}

#[tokio::test]
async fn blank_identity_header_counts_as_anonymous() {
    let (service, _) = build_service();
    let router = router_with_service(service);

    let response = router
        .oneshot(get_request("/api/v1/tinnitus/care-path", Some("   ")))
        .await
        .expect("route executes");

    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn stored_assessment_feeds_recommendation_route() {
    let (service, _) = build_service();
    let router = router_with_service(service);

    let created = router
        .clone()
        .oneshot(json_request(
            "POST",
            "/api/v1/tinnitus/assessments",
            Some("patient-42"),
            &serde_json::to_value(ths_submission()).unwrap(),
        ))
        .await
        .expect("route executes");
    assert_eq!(created.status(), StatusCode::CREATED);
    let created = read_json_body(created).await;
    let id = created["assessment_id"]
        .as_str()
        .expect("assessment id")
        .to_string();

    let response = router
        .oneshot(get_request(
            &format!("/api/v1/tinnitus/assessments/{id}/recommendation"),
            Some("patient-42"),
        ))
        .await
        .expect("route executes");

    assert_eq!(response.status(), StatusCode::OK);
    let payload = read_json_body(response).await;
    assert_eq!(payload["assessment_id"], id);
    assert_eq!(payload["step"], "step_4");
    assert_eq!(
        payload["recommendation"],
        "Sound therapy with masking and relaxation guidance."
    );
}

#[tokio::test]
async fn recommendation_handler_reports_missing_assessment() {
    let (service, _) = build_service();

    let response = recommendation_handler::<MemoryStore>(
        State(state_with(service)),
        patient_headers(),
        Path("ths-404".to_string()),
    )
    .await;

    assert_eq!(response.status(), StatusCode::NOT_FOUND);
    let payload = read_json_body(response).await;
    assert_eq!(
        payload,
        json!({ "assessment_id": "ths-404", "error": "assessment not found" })
    );
}

#[tokio::test]
async fn care_path_handler_returns_ordered_stages() {
    let (service, _) = build_service();

    let response =
        care_path_handler::<MemoryStore>(State(state_with(service)), patient_headers()).await;

    assert_eq!(response.status(), StatusCode::OK);
    let payload = read_json_body(response).await;
    assert_eq!(payload["current_level"], 1);
    let levels: Vec<u64> = payload["stages"]
        .as_array()
        .expect("stages array")
        .iter()
        .filter_map(|stage| stage["level"].as_u64())
        .collect();
    assert_eq!(levels, vec![1, 2, 3, 4, 5]);
    assert_eq!(payload["stages"][0]["status"], "current");
    assert_eq!(payload["stages"][1]["status"], "locked");
}

#[tokio::test]
async fn care_path_handler_maps_store_failures_to_internal_error() {
    let service = PatientCareService::new(Arc::new(UnavailableStore));
    let state = PatientRouterState {
        service: Arc::new(service),
        identity: IdentityConfig::default(),
    };

    let response = care_path_handler::<UnavailableStore>(State(state), patient_headers()).await;

    assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
}

#[tokio::test]
async fn treatment_plan_route_lists_all_steps() {
    let (service, _) = build_service();
    let router = router_with_service(service);

    let response = router
        .oneshot(get_request("/api/v1/tinnitus/treatment-plan", Some("patient-42")))
        .await
        .expect("route executes");

    assert_eq!(response.status(), StatusCode::OK);
    let payload = read_json_body(response).await;
    assert_eq!(payload["recommended_step"], Value::Null);
    assert_eq!(payload["steps"].as_array().map(Vec::len), Some(5));
}

#[tokio::test]
async fn outcome_and_session_routes_record_entries() {
    let (service, store) = build_service();
    let router = router_with_service(service);

    let outcome = router
        .clone()
        .oneshot(json_request(
            "POST",
            "/api/v1/tinnitus/outcomes",
            Some("patient-42"),
            &serde_json::to_value(outcome_submission()).unwrap(),
        ))
        .await
        .expect("route executes");
    assert_eq!(outcome.status(), StatusCode::CREATED);

    let mut session = serde_json::to_value(masking_submission()).unwrap();
    session["volume_level"] = json!(101);
    let rejected = router
        .clone()
        .oneshot(json_request(
            "POST",
            "/api/v1/tinnitus/sound-masking/sessions",
            Some("patient-42"),
            &session,
        ))
        .await
        .expect("route executes");
    assert_eq!(rejected.status(), StatusCode::UNPROCESSABLE_ENTITY);

    let accepted = router
        .oneshot(json_request(
            "POST",
            "/api/v1/tinnitus/sound-masking/sessions",
            Some("patient-42"),
            &serde_json::to_value(masking_submission()).unwrap(),
        ))
        .await
        .expect("route executes");
    assert_eq!(accepted.status(), StatusCode::CREATED);

    assert_eq!(store.outcomes.lock().unwrap().len(), 1);
    assert_eq!(store.sessions.lock().unwrap().len(), 1);
}

#[tokio::test]
async fn custom_identity_header_is_honoured() {
    let (service, _) = build_service();
    let identity = IdentityConfig::new("X-Clinic-Patient").expect("valid header");
    let router = patient_router(Arc::new(service), identity);

    let request = Request::builder()
        .method("GET")
        .uri("/api/v1/tinnitus/care-path")
        .header("x-clinic-patient", "patient-42")
        .body(Body::empty())
        .unwrap();
    let response = router.oneshot(request).await.expect("route executes");

    assert_eq!(response.status(), StatusCode::OK);
}

#[tokio::test]
async fn disclaimer_handler_returns_fixed_text() {
    let axum::Json(payload) = disclaimer_handler().await;
    assert_eq!(payload["disclaimer"], MEDICAL_DISCLAIMER);
}

#[tokio::test]
async fn interview_route_acknowledges_without_saving() {
    let (service, _) = build_service();
    let router = router_with_service(service);

    let response = router
        .oneshot(json_request(
            "POST",
            "/api/v1/tinnitus/interviews",
            None,
            &serde_json::to_value(interview_submission()).unwrap(),
        ))
        .await
        .expect("route executes");

    assert_eq!(response.status(), StatusCode::OK);
    let payload = read_json_body(response).await;
    assert_eq!(
        payload,
        json!({
            "saved": false,
            "message": "Interview responses captured for your care team.",
        })
    );
}

#[tokio::test]
async fn interview_route_rejects_unknown_onset() {
    let (service, _) = build_service();
    let router = router_with_service(service);
    let mut body = serde_json::to_value(interview_submission()).unwrap();
    body["onset"] = json!("yesterday");

    let response = router
        .oneshot(json_request("POST", "/api/v1/tinnitus/interviews", None, &body))
        .await
        .expect("route executes");

    assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY);
    let payload = read_json_body(response).await;
    assert_eq!(payload["field"], "onset");
}

#[tokio::test]
async fn malformed_bodies_use_the_json_error_shape() {
    let (service, _) = build_service();
    let router = router_with_service(service);
    let mut body = serde_json::to_value(triage_submission()).unwrap();
    body["age"] = json!("fifty");

    let wrong_type = router
        .clone()
        .oneshot(json_request("POST", "/api/v1/triage/assessments", None, &body))
        .await
        .expect("route executes");
    assert_eq!(wrong_type.status(), StatusCode::UNPROCESSABLE_ENTITY);
    let payload = read_json_body(wrong_type).await;
    assert!(payload["error"].as_str().is_some_and(|error| !error.is_empty()));

    let missing_content_type = router
        .oneshot(
            Request::builder()
                .method("POST")
                .uri("/api/v1/tinnitus/impact")
                .body(Body::from("{}"))
                .unwrap(),
        )
        .await
        .expect("route executes");
    assert_eq!(
        missing_content_type.status(),
        StatusCode::UNSUPPORTED_MEDIA_TYPE
    );
    let payload = read_json_body(missing_content_type).await;
    assert!(payload["error"].is_string());
}

#[tokio::test]
async fn assessment_route_rejects_unknown_screening_link() {
    let (service, store) = build_service();
    let router = router_with_service(service);
    let mut body = serde_json::to_value(ths_submission()).unwrap();
    body["screening_id"] = json!("scr-999999");

    let response = router
        .oneshot(json_request(
            "POST",
            "/api/v1/tinnitus/assessments",
            Some("patient-42"),
            &body,
        ))
        .await
        .expect("route executes");

    assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY);
    let payload = read_json_body(response).await;
    assert_eq!(payload["field"], "screening_id");
    assert!(store.assessments.lock().unwrap().is_empty());
}
