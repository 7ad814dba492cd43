use std::sync::Arc;

use axum::Json;
use axum::extract::State;
use axum::http::StatusCode;
use serde::Serialize;

use crate::ServerState;

#[derive(Debug, Serialize)]
pub(crate) struct HealthReport {
    status: &'static str,
    checks: Vec<HealthCheck>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct HealthCheck {
    component: &'static str,
    status: &'static str,
    #[serde(skip_serializing_if = "Option::is_none")]
    sessions: Option<usize>,
    #[serde(skip_serializing_if = "Option::is_none")]
    error: Option<String>,
}

/// `GET /health`: probes the session index with a count.
pub(crate) async fn health(State(state): State<Arc<ServerState>>) -> (StatusCode, Json<HealthReport>) {
    let check = match state.index.count_all().await {
        Ok(count) => HealthCheck {
            component: "catalog",
            status: "Healthy",
            sessions: Some(count),
            error: None,
        },
        Err(e) => {
            tracing::warn!(target: "confcat::server", "Health check failed: {}", e);
            HealthCheck {
                component: "catalog",
                status: "Unhealthy",
                sessions: None,
                error: Some(e.to_string()),
            }
        }
    };

    let healthy = check.status == "Healthy";
    let report = HealthReport {
        status: check.status,
        checks: vec![check],
    };
    let code = if healthy {
        StatusCode::OK
    } else {
        StatusCode::SERVICE_UNAVAILABLE
    };
    (code, Json(report))
}
