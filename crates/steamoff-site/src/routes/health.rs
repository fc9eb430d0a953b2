//! Health check endpoint.

use axum::Json;
use axum::extract::State;
use serde::Serialize;

use crate::state::AppState;

/// Health check response.
#[derive(Debug, Clone, Serialize)]
pub struct HealthResponse {
    status: &'static str,
    service: &'static str,
    version: &'static str,
    sheets_configured: bool,
}

/// Public health check endpoint.
///
/// Returns basic service health for load balancer probes.
pub async fn health_check(State(state): State<AppState>) -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "ok",
        service: "steamoff-site",
        version: env!("CARGO_PKG_VERSION"),
        sheets_configured: state.sheets.is_some(),
    })
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use crate::routes::tests::{server_with, test_config};
    use crate::submit::tests::RecordingDispatcher;

    #[tokio::test]
    async fn test_health() {
        let server = server_with(test_config(), Arc::new(RecordingDispatcher::default()), None);
        let body: serde_json::Value = server.get("/health").await.json();
        assert_eq!(body["status"], "ok");
        assert_eq!(body["service"], "steamoff-site");
        assert_eq!(body["sheets_configured"], false);
    }
}
