use axum::body::{to_bytes, Body};
use axum::http::{Request, StatusCode};
use manor_audit::audit::domain::{AgeRange, Equipment, EquipmentType, Home};
use manor_audit::config::RatePlan;
use manor_audit::http;
use serde_json::{json, Value};
use tower::ServiceExt;

fn build_router() -> axum::Router {
    let (router, readiness) = http::router(RatePlan::default());
    readiness.store(true, std::sync::atomic::Ordering::Release);
    router
}

async fn json_body(response: axum::response::Response) -> Value {
    let body = to_bytes(response.into_body(), 1024 * 1024)
        .await
        .expect("body");
    serde_json::from_slice(&body).expect("json")
}

#[tokio::test]
async fn health_and_ready_respond_ok() {
    let router = build_router();

    let response = router
        .clone()
        .oneshot(
            Request::builder()
                .uri("/health")
                .body(Body::empty())
                .expect("request"),
        )
        .await
        .expect("router dispatch");
    assert_eq!(response.status(), StatusCode::OK);

    let response = router
        .oneshot(
            Request::builder()
                .uri("/ready")
                .body(Body::empty())
                .expect("request"),
        )
        .await
        .expect("router dispatch");
    assert_eq!(response.status(), StatusCode::OK);
}

#[tokio::test]
async fn label_scan_endpoint_returns_structured_fields() {
    let router = build_router();
    let payload = json!({ "text": "CARRIER Model 24ACC636A003 SEER 16.0 36,000 BTU" });

    let response = router
        .oneshot(
            Request::builder()
                .method("POST")
                .uri("/api/v1/scan/label")
                .header("content-type", "application/json")
                .body(Body::from(payload.to_string()))
                .expect("request"),
        )
        .await
        .expect("router dispatch");
    assert_eq!(response.status(), StatusCode::OK);

    let body = json_body(response).await;
    assert_eq!(body["manufacturer"], "Carrier");
    assert_eq!(body["efficiency_unit"], "SEER");
    assert_eq!(body["efficiency_value"], 16.0);
    assert_eq!(body["btu_capacity"], 36000);
}

#[tokio::test]
async fn bill_scan_endpoint_parses_usage_and_dates() {
    let router = build_router();
    let payload = json!({
        "text": "Duke Energy\nService period Jun 15, 2026 - Jul 14, 2026\n980 kWh\nTotal Due $164.20",
        "today": "2026-08-01",
    });

    let response = router
        .oneshot(
            Request::builder()
                .method("POST")
                .uri("/api/v1/scan/bill")
                .header("content-type", "application/json")
                .body(Body::from(payload.to_string()))
                .expect("request"),
        )
        .await
        .expect("router dispatch");
    assert_eq!(response.status(), StatusCode::OK);

    let body = json_body(response).await;
    assert_eq!(body["utility_name"], "Duke Energy");
    assert_eq!(body["total_kwh"], 980.0);
    assert_eq!(body["total_cost"], 164.2);
    assert_eq!(body["billing_period_start"], "2026-06-15");
    assert_eq!(body["billing_period_end"], "2026-07-14");
}

#[tokio::test]
async fn report_endpoint_returns_graded_report() {
    let router = build_router();
    let mut home = Home::new("API Home");
    home.total_sqft = Some(1500.0);
    let mut ac = Equipment::new(EquipmentType::CentralAc, AgeRange::Years15To20);
    ac.estimated_efficiency = 10.0;
    home.equipment.push(ac);

    let payload = json!({ "home": home });
    let response = router
        .oneshot(
            Request::builder()
                .method("POST")
                .uri("/api/v1/report")
                .header("content-type", "application/json")
                .body(Body::from(payload.to_string()))
                .expect("request"),
        )
        .await
        .expect("router dispatch");
    assert_eq!(response.status(), StatusCode::OK);

    let body = json_body(response).await;
    assert_eq!(body["grade"], "f");
    assert_eq!(body["upgrades"].as_array().expect("upgrade list").len(), 1);
    assert!(body["total_annual_savings"].as_f64().expect("savings") > 0.0);
}

#[tokio::test]
async fn report_endpoint_rejects_invalid_homes() {
    let router = build_router();
    let mut home = Home::new("Broken Home");
    home.total_sqft = Some(-5.0);

    let payload = json!({ "home": home });
    let response = router
        .oneshot(
            Request::builder()
                .method("POST")
                .uri("/api/v1/report")
                .header("content-type", "application/json")
                .body(Body::from(payload.to_string()))
                .expect("request"),
        )
        .await
        .expect("router dispatch");
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);

    let body = json_body(response).await;
    assert!(body["error"]
        .as_str()
        .expect("error message")
        .contains("square footage"));
}
