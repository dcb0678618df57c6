//! HTTP surface for the audit engine. The router is built here so tests can
//! drive it without binding a socket.

use crate::audit::domain::Home;
use crate::audit::report::HomeReport;
use crate::audit::scan::{self, classify, BillScan, BulbScan, LabelScan};
use crate::config::RatePlan;
use crate::error::AppError;
use axum::extract::State;
use axum::http::{header, StatusCode};
use axum::response::IntoResponse;
use axum::routing::{get, post};
use axum::{Json, Router};
use axum_prometheus::PrometheusMetricLayer;
use chrono::{Local, NaiveDate};
use metrics_exporter_prometheus::PrometheusHandle;
use serde::{Deserialize, Serialize};
use serde_json::json;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, OnceLock};

#[derive(Clone)]
pub struct AppState {
    readiness: Arc<AtomicBool>,
    metrics: PrometheusHandle,
    rates: RatePlan,
}

// The metrics recorder is process-global; build the layer/handle pair once.
fn metrics_pair() -> (PrometheusMetricLayer<'static>, PrometheusHandle) {
    static PAIR: OnceLock<(PrometheusMetricLayer<'static>, PrometheusHandle)> = OnceLock::new();
    PAIR.get_or_init(PrometheusMetricLayer::pair).clone()
}

/// Build the service router. The returned flag flips the `/ready` endpoint
/// once the listener is bound.
pub fn router(rates: RatePlan) -> (Router, Arc<AtomicBool>) {
    let (prometheus_layer, prometheus_handle) = metrics_pair();
    let readiness = Arc::new(AtomicBool::new(false));
    let state = AppState {
        readiness: readiness.clone(),
        metrics: prometheus_handle,
        rates,
    };

    let router = Router::new()
        .route("/health", get(healthcheck))
        .route("/ready", get(readiness_endpoint))
        .route("/metrics", get(metrics_endpoint))
        .route("/api/v1/scan/label", post(label_scan_endpoint))
        .route("/api/v1/scan/bill", post(bill_scan_endpoint))
        .route("/api/v1/scan/bulb", post(bulb_scan_endpoint))
        .route("/api/v1/classify", post(classify_endpoint))
        .route("/api/v1/report", post(report_endpoint))
        .layer(prometheus_layer)
        .with_state(state);

    (router, readiness)
}

#[derive(Debug, Deserialize)]
struct ScanRequest {
    text: String,
}

#[derive(Debug, Deserialize)]
struct BillScanRequest {
    text: String,
    /// Anchor for the billing-date plausibility window (defaults to today).
    #[serde(default, deserialize_with = "deserialize_optional_date")]
    today: Option<NaiveDate>,
}

#[derive(Debug, Deserialize)]
struct ClassifyRequest {
    observations: Vec<classify::Observation>,
    #[serde(default)]
    top_k: Option<usize>,
}

#[derive(Debug, Serialize)]
struct ClassifyResponse {
    matches: Vec<classify::ClassificationMatch>,
}

#[derive(Debug, Deserialize)]
struct ReportRequest {
    home: Home,
}

fn deserialize_optional_date<'de, D>(deserializer: D) -> Result<Option<NaiveDate>, D::Error>
where
    D: serde::Deserializer<'de>,
{
    let opt = Option::<String>::deserialize(deserializer)?;
    opt.map(|value| {
        NaiveDate::parse_from_str(value.trim(), "%Y-%m-%d")
            .map_err(|err| serde::de::Error::custom(format!("failed to parse '{value}': {err}")))
    })
    .transpose()
}

async fn healthcheck() -> Json<serde_json::Value> {
    Json(json!({ "status": "ok" }))
}

async fn readiness_endpoint(State(state): State<AppState>) -> impl IntoResponse {
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

async fn metrics_endpoint(State(state): State<AppState>) -> impl IntoResponse {
    (
        StatusCode::OK,
        [(header::CONTENT_TYPE, "text/plain; version=0.0.4")],
        state.metrics.render(),
    )
}

async fn label_scan_endpoint(Json(payload): Json<ScanRequest>) -> Json<LabelScan> {
    Json(scan::label::parse(&payload.text))
}

async fn bill_scan_endpoint(Json(payload): Json<BillScanRequest>) -> Json<BillScan> {
    let today = payload.today.unwrap_or_else(|| Local::now().date_naive());
    Json(scan::bill::parse(&payload.text, today))
}

async fn bulb_scan_endpoint(Json(payload): Json<ScanRequest>) -> Json<BulbScan> {
    Json(scan::bulb::parse(&payload.text))
}

async fn classify_endpoint(Json(payload): Json<ClassifyRequest>) -> Json<ClassifyResponse> {
    let top_k = payload.top_k.unwrap_or(classify::DEFAULT_TOP_K);
    Json(ClassifyResponse {
        matches: classify::map_observations(&payload.observations, top_k),
    })
}

async fn report_endpoint(
    State(state): State<AppState>,
    Json(payload): Json<ReportRequest>,
) -> Result<Json<HomeReport>, AppError> {
    payload.home.validate()?;
    Ok(Json(HomeReport::build(&payload.home, &state.rates)))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn label_scan_endpoint_extracts_fields() {
        let request = ScanRequest {
            text: "TRANE Model TTR6036J1000A SEER2 15.2".to_string(),
        };
        let Json(scan) = label_scan_endpoint(Json(request)).await;
        assert_eq!(scan.manufacturer.as_deref(), Some("Trane"));
        assert_eq!(scan.efficiency_unit, Some("SEER"));
        assert_eq!(scan.efficiency_value, Some(15.2));
    }

    #[tokio::test]
    async fn bill_scan_endpoint_honors_today_anchor() {
        let request = BillScanRequest {
            text: "Service period Jun 15, 2026 - Jul 14, 2026\n1,234 kWh\nAmount Due $142.37"
                .to_string(),
            today: NaiveDate::from_ymd_opt(2026, 8, 1),
        };
        let Json(scan) = bill_scan_endpoint(Json(request)).await;
        assert_eq!(scan.total_kwh, Some(1234.0));
        assert_eq!(
            scan.billing_period_start,
            NaiveDate::from_ymd_opt(2026, 6, 15)
        );
    }

    #[tokio::test]
    async fn classify_endpoint_maps_observations() {
        let request = ClassifyRequest {
            observations: vec![classify::Observation {
                identifier: "television".to_string(),
                confidence: 0.9,
            }],
            top_k: None,
        };
        let Json(body) = classify_endpoint(Json(request)).await;
        assert_eq!(body.matches.len(), 1);
    }
}
