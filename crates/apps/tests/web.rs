//! HTTP checks against the web router.

use std::sync::Arc;

use axum::body::Body;
use axum::http::{Request, StatusCode};
use rp_apps::web::{router, AppState};
use rp_core::PredictorKind;
use rp_decisions::{DecisionEngine, ModelSet};
use rp_predictors::ConstantModel;
use tower::ServiceExt;

fn state_with(footfall: f64, delivery: f64, clv: f64) -> AppState {
    AppState::new(DecisionEngine::new(ModelSet {
        footfall: Arc::new(ConstantModel::for_kind(PredictorKind::Footfall, footfall)),
        delivery: Arc::new(ConstantModel::for_kind(PredictorKind::Delivery, delivery)),
        clv: Arc::new(ConstantModel::for_kind(PredictorKind::Clv, clv)),
    }))
}

fn state() -> AppState {
    state_with(612.3, 47.0, 50_000.0)
}

fn broken_state() -> AppState {
    state_with(f64::NAN, f64::NAN, f64::NAN)
}

async fn send(state: AppState, request: Request<Body>) -> (StatusCode, String) {
    let response = router(state).oneshot(request).await.unwrap();
    let status = response.status();
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX).await.unwrap();
    (status, String::from_utf8(bytes.to_vec()).unwrap())
}

fn form(uri: &str, body: &str) -> Request<Body> {
    Request::builder()
        .method("POST")
        .uri(uri)
        .header("content-type", "application/x-www-form-urlencoded")
        .body(Body::from(body.to_string()))
        .unwrap()
}

fn json(uri: &str, body: &str) -> Request<Body> {
    Request::builder()
        .method("POST")
        .uri(uri)
        .header("content-type", "application/json")
        .body(Body::from(body.to_string()))
        .unwrap()
}

fn get(uri: &str) -> Request<Body> {
    Request::builder().uri(uri).body(Body::empty()).unwrap()
}

const FOOTFALL_FORM: &str = "day_of_week=6&is_holiday=1&promo_active=0&month=8";
const DELIVERY_FORM: &str = "distance_km=12&num_items=3&order_value=800\
    &time_of_day_bucket=2&traffic_level=3&rider_experience_months=1";

#[tokio::test]
async fn index_lists_models() {
    let (status, body) = send(state(), get("/")).await;
    assert_eq!(status, StatusCode::OK);
    assert!(body.contains("href=\"/delivery\""));
}

#[tokio::test]
async fn form_pages_render() {
    for kind in PredictorKind::ALL {
        let (status, body) = send(state(), get(&format!("/{kind}"))).await;
        assert_eq!(status, StatusCode::OK, "{kind}");
        assert!(body.contains("<form method=\"post\""));
    }
}

#[tokio::test]
async fn unknown_page_is_404() {
    let (status, _) = send(state(), get("/weather")).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn delivery_submission_renders_result() {
    let (status, page) = send(state(), form("/delivery", DELIVERY_FORM)).await;
    assert_eq!(status, StatusCode::OK);
    assert!(page.contains("Prediction: <strong>47.0</strong>"));
    assert!(page.contains("Segment: <strong>High delay risk</strong>"));
    assert!(page.contains("High delay risk: inform customer early and avoid tight SLAs."));
}

#[tokio::test]
async fn footfall_submission_formats_whole_visitors() {
    let (status, page) = send(state(), form("/footfall", FOOTFALL_FORM)).await;
    assert_eq!(status, StatusCode::OK);
    assert!(page.contains("Prediction: <strong>612</strong>"));
    assert!(page.contains("High traffic day: increase staff and run in-store promotions."));
}

#[tokio::test]
async fn invalid_submission_is_rejected_with_400() {
    let st = state();
    let body = "tenure_months=10&orders_per_month=2&avg_order_value=300\
        &recency_days=4&discount_usage_rate=1.5&return_rate=0.1";
    let (status, page) = send(st.clone(), form("/clv", body)).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(page.contains("Submission rejected: invalid input for discount_usage_rate"));
    assert!(!page.contains("Recommendation:"));

    let snap = st.metrics.snapshot();
    assert_eq!(snap.rejected_inputs, 1);
    assert_eq!(snap.clv_predictions, 0);
}

#[tokio::test]
async fn overflowing_clv_value_is_rejected_as_input() {
    let body = "tenure_months=10&orders_per_month=1e200&avg_order_value=1e200\
        &recency_days=4&discount_usage_rate=0.1&return_rate=0.1";
    let (status, page) = send(state(), form("/clv", body)).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(page.contains("Submission rejected: invalid input for avg_order_value"));
}

#[tokio::test]
async fn model_failure_on_form_is_500() {
    let st = broken_state();
    let (status, page) = send(st.clone(), form("/footfall", FOOTFALL_FORM)).await;
    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert!(page.contains("Prediction failed"));
    assert!(!page.contains("Recommendation:"));

    let snap = st.metrics.snapshot();
    assert_eq!(snap.model_failures, 1);
    assert_eq!(snap.footfall_predictions, 0);
}

#[tokio::test]
async fn model_failure_on_json_api_is_500_without_field() {
    let body = r#"{"day_of_week": 2, "is_holiday": 0, "promo_active": 1, "month": 3}"#;
    let (status, body) = send(broken_state(), json("/api/v1/predict/footfall", body)).await;
    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    let json: serde_json::Value = serde_json::from_str(&body).unwrap();
    assert!(json["field"].is_null());
    assert_eq!(json["status"], 500);
    assert!(json["error"].as_str().unwrap().contains("model invocation failed"));
}

#[tokio::test]
async fn json_api_accepts_numbers_and_strings() {
    let body = r#"{"tenure_months": 24, "orders_per_month": "4", "avg_order_value": 500,
        "recency_days": 5, "discount_usage_rate": 0.2, "return_rate": 0.1}"#;
    let (status, body) = send(state(), json("/api/v1/predict/clv", body)).await;
    assert_eq!(status, StatusCode::OK);
    let json: serde_json::Value = serde_json::from_str(&body).unwrap();
    assert_eq!(json["tier"], "MEDIUM_VALUE");
    assert_eq!(json["prediction"], "50,000.00");
    assert_eq!(
        json["recommendation"],
        "Use targeted offers and personalised nudges to grow value."
    );
}

#[tokio::test]
async fn json_api_reports_offending_field() {
    let body = r#"{"day_of_week": 7, "is_holiday": 0, "promo_active": 1, "month": 3}"#;
    let (status, body) = send(state(), json("/api/v1/predict/footfall", body)).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    let json: serde_json::Value = serde_json::from_str(&body).unwrap();
    assert_eq!(json["field"], "day_of_week");
}

#[tokio::test]
async fn malformed_json_body_gets_error_shape() {
    let (status, body) = send(state(), json("/api/v1/predict/footfall", "{not json")).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    let json: serde_json::Value = serde_json::from_str(&body).unwrap();
    assert!(json["field"].is_null());
    assert_eq!(json["status"], 400);
    assert!(!json["error"].as_str().unwrap().is_empty());
}

#[tokio::test]
async fn metrics_and_health() {
    let st = state();
    send(st.clone(), form("/footfall", "day_of_week=1&is_holiday=0&promo_active=0&month=2")).await;
    let (status, body) = send(st, get("/metrics")).await;
    assert_eq!(status, StatusCode::OK);
    let json: serde_json::Value = serde_json::from_str(&body).unwrap();
    assert_eq!(json["footfall_predictions"], 1);

    let (status, body) = send(state(), get("/health")).await;
    assert_eq!(status, StatusCode::OK);
    assert!(body.contains("healthy"));
}
