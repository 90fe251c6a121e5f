//! Dashboard HTTP endpoints.
//!
//! - GET /api/v1/sols
//! - GET /api/v1/dashboard (+ /detail, /history, /units)
//! - PUT /api/v1/dashboard/units, POST /api/v1/dashboard/units/toggle
//! - POST /api/v1/dashboard/selection/:sol, DELETE /api/v1/dashboard/selection

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::Json;
use serde::Deserialize;
use utoipa::ToSchema;

use crate::errors::{AppError, ErrorResponse};
use crate::services::dashboard::{
    DashboardView, DetailView, HistoryEntry, SharedDashboard, UnitLabels,
};
use crate::services::insight::SolReading;
use crate::services::units::UnitSystem;

/// Request body for PUT /api/v1/dashboard/units.
#[derive(Debug, Deserialize, ToSchema)]
pub struct SetUnitsRequest {
    /// "metric" or "imperial"
    pub units: UnitSystem,
}

/// All loaded sols in feed order, in the feed's native units.
#[utoipa::path(
    get,
    path = "/api/v1/sols",
    tag = "Sols",
    responses(
        (status = 200, description = "Normalized readings", body = Vec<SolReading>),
    )
)]
pub async fn list_sols(State(dashboard): State<SharedDashboard>) -> Json<Vec<SolReading>> {
    Json(dashboard.read().await.readings().to_vec())
}

/// Full dashboard: unit labels, detail panel and history list.
#[utoipa::path(
    get,
    path = "/api/v1/dashboard",
    tag = "Dashboard",
    responses(
        (status = 200, description = "Current dashboard view", body = DashboardView),
    )
)]
pub async fn get_dashboard(State(dashboard): State<SharedDashboard>) -> Json<DashboardView> {
    Json(dashboard.read().await.render())
}

/// Detail panel for the selected sol (the latest one unless a sol was selected).
#[utoipa::path(
    get,
    path = "/api/v1/dashboard/detail",
    tag = "Dashboard",
    responses(
        (status = 200, description = "Detail panel", body = DetailView),
        (status = 404, description = "No sols loaded", body = ErrorResponse),
    )
)]
pub async fn get_detail(
    State(dashboard): State<SharedDashboard>,
) -> Result<Json<DetailView>, AppError> {
    dashboard
        .read()
        .await
        .detail_view()
        .map(Json)
        .ok_or(AppError::NoReadings)
}

/// History list, one entry per sol in feed order.
#[utoipa::path(
    get,
    path = "/api/v1/dashboard/history",
    tag = "Dashboard",
    responses(
        (status = 200, description = "Previous sols", body = Vec<HistoryEntry>),
    )
)]
pub async fn get_history(State(dashboard): State<SharedDashboard>) -> Json<Vec<HistoryEntry>> {
    Json(dashboard.read().await.history_view())
}

/// Active unit system and its labels.
#[utoipa::path(
    get,
    path = "/api/v1/dashboard/units",
    tag = "Dashboard",
    responses(
        (status = 200, description = "Unit labels", body = UnitLabels),
    )
)]
pub async fn get_units(State(dashboard): State<SharedDashboard>) -> Json<UnitLabels> {
    Json(dashboard.read().await.unit_labels())
}

/// Select a unit system. Selecting the active one is a no-op.
#[utoipa::path(
    put,
    path = "/api/v1/dashboard/units",
    tag = "Dashboard",
    request_body = SetUnitsRequest,
    responses(
        (status = 200, description = "Re-rendered dashboard", body = DashboardView),
    )
)]
pub async fn set_units(
    State(dashboard): State<SharedDashboard>,
    Json(req): Json<SetUnitsRequest>,
) -> Json<DashboardView> {
    let mut d = dashboard.write().await;
    d.set_units(req.units);
    Json(d.render())
}

/// Flip between metric and imperial.
#[utoipa::path(
    post,
    path = "/api/v1/dashboard/units/toggle",
    tag = "Dashboard",
    responses(
        (status = 200, description = "Re-rendered dashboard", body = DashboardView),
    )
)]
pub async fn toggle_units(State(dashboard): State<SharedDashboard>) -> Json<DashboardView> {
    let mut d = dashboard.write().await;
    d.toggle_units();
    Json(d.render())
}

/// Show a specific sol in the detail panel.
#[utoipa::path(
    post,
    path = "/api/v1/dashboard/selection/{sol}",
    tag = "Dashboard",
    params(
        ("sol" = String, Path, description = "Sol identifier"),
    ),
    responses(
        (status = 200, description = "Detail panel for the selected sol", body = DetailView),
        (status = 404, description = "Sol not found", body = ErrorResponse),
    )
)]
pub async fn select_sol(
    State(dashboard): State<SharedDashboard>,
    Path(sol): Path<String>,
) -> Result<Json<DetailView>, AppError> {
    let detail = dashboard.write().await.select_sol(&sol)?;
    Ok(Json(detail))
}

/// Clear the selection so the detail panel follows the latest sol again.
#[utoipa::path(
    delete,
    path = "/api/v1/dashboard/selection",
    tag = "Dashboard",
    responses(
        (status = 204, description = "Selection cleared"),
    )
)]
pub async fn clear_selection(State(dashboard): State<SharedDashboard>) -> StatusCode {
    dashboard.write().await.clear_selection();
    StatusCode::NO_CONTENT
}
