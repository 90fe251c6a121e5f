use axum::extract::State;
use axum::Json;
use serde::Serialize;
use utoipa::ToSchema;

use crate::services::dashboard::SharedDashboard;

/// Health check response.
#[derive(Debug, Serialize, ToSchema)]
pub struct HealthResponse {
    /// Service status ("ok" when sols are loaded, "degraded" when the startup fetch failed)
    pub status: String,
    /// API version
    pub version: String,
    /// Number of sols loaded from the InSight feed
    pub sols_loaded: usize,
}

/// Health check endpoint.
///
/// Returns status "degraded" (still 200) when no sols were loaded, so load
/// balancers can tell a failed startup fetch from a dead process.
#[utoipa::path(
    get,
    path = "/api/v1/health",
    tag = "Health",
    responses(
        (status = 200, description = "Service is up", body = HealthResponse),
    )
)]
pub async fn health_check(State(dashboard): State<SharedDashboard>) -> Json<HealthResponse> {
    let sols_loaded = dashboard.read().await.readings().len();

    Json(HealthResponse {
        status: if sols_loaded > 0 {
            "ok".to_string()
        } else {
            "degraded".to_string()
        },
        version: env!("CARGO_PKG_VERSION").to_string(),
        sols_loaded,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::services::dashboard::Dashboard;
    use crate::services::insight::SolReading;
    use crate::services::units::UnitSystem;

    #[tokio::test]
    async fn test_health_degraded_without_readings() {
        let dashboard = Dashboard::new(Vec::new(), UnitSystem::Metric).into_shared();
        let Json(resp) = health_check(State(dashboard)).await;
        assert_eq!(resp.status, "degraded");
        assert_eq!(resp.sols_loaded, 0);
    }

    #[tokio::test]
    async fn test_health_ok_with_readings() {
        let reading = SolReading {
            sol: "1".to_string(),
            max_temp: None,
            min_temp: None,
            wind_speed: None,
            wind_direction_degrees: None,
            wind_direction_cardinal: None,
            date: None,
        };
        let dashboard = Dashboard::new(vec![reading], UnitSystem::Metric).into_shared();
        let Json(resp) = health_check(State(dashboard)).await;
        assert_eq!(resp.status, "ok");
        assert_eq!(resp.sols_loaded, 1);
        assert_eq!(resp.version, env!("CARGO_PKG_VERSION"));
    }
}
