//! Relay Health API

use axum::{extract::State, Json};

use codereview_core::HealthReport;

use crate::server::RelayState;

/// Handler for `GET /api/health`
pub async fn get_health(State(state): State<RelayState>) -> Json<HealthReport> {
    Json(HealthReport {
        status: "ok".into(),
        service: "codereview-relay".into(),
        version: env!("CARGO_PKG_VERSION").into(),
        provider: state.provider.name().into(),
        model: state.provider.model().into(),
    })
}
