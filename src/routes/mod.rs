pub mod dashboard;
pub mod health;
pub mod ui;

use axum::http::Method;
use axum::routing::{delete, get, post};
use axum::Router;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

use crate::services::dashboard::SharedDashboard;

/// Mars Weather API: OpenAPI specification.
#[derive(OpenApi)]
#[openapi(
    info(
        title = "Mars Weather API",
        version = "0.1.0",
        description = "Weather at the InSight lander on Mars. The InSight feed is \
            fetched once at startup; the dashboard endpoints render the latest sol, \
            the history of sols and the active unit system from that single fetch.",
        license(name = "MIT"),
    ),
    tags(
        (name = "Health", description = "Service health check"),
        (name = "Sols", description = "Normalized InSight readings"),
        (name = "Dashboard", description = "Rendered views and unit / selection events"),
    ),
    paths(
        health::health_check,
        dashboard::list_sols,
        dashboard::get_dashboard,
        dashboard::get_detail,
        dashboard::get_history,
        dashboard::get_units,
        dashboard::set_units,
        dashboard::toggle_units,
        dashboard::select_sol,
        dashboard::clear_selection,
    ),
    components(
        schemas(
            health::HealthResponse,
            dashboard::SetUnitsRequest,
            crate::services::insight::SolReading,
            crate::services::units::UnitSystem,
            crate::services::dashboard::DetailView,
            crate::services::dashboard::HistoryEntry,
            crate::services::dashboard::UnitLabels,
            crate::services::dashboard::DashboardView,
            crate::errors::ErrorResponse,
        )
    )
)]
pub struct ApiDoc;

/// Build the full application router around one shared dashboard.
pub fn app(state: SharedDashboard) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods([Method::GET, Method::PUT, Method::POST, Method::DELETE])
        .allow_headers(Any);

    let api_routes = Router::new()
        .route("/api/v1/health", get(health::health_check))
        .route("/api/v1/sols", get(dashboard::list_sols))
        .route("/api/v1/dashboard", get(dashboard::get_dashboard))
        .route("/api/v1/dashboard/detail", get(dashboard::get_detail))
        .route("/api/v1/dashboard/history", get(dashboard::get_history))
        .route(
            "/api/v1/dashboard/units",
            get(dashboard::get_units).put(dashboard::set_units),
        )
        .route(
            "/api/v1/dashboard/units/toggle",
            post(dashboard::toggle_units),
        )
        .route(
            "/api/v1/dashboard/selection",
            delete(dashboard::clear_selection),
        )
        .route(
            "/api/v1/dashboard/selection/:sol",
            post(dashboard::select_sol),
        )
        .with_state(state.clone());

    let ui_routes = Router::new()
        .route("/", get(ui::index))
        .route("/ui/units", post(ui::set_units))
        .route("/ui/units/toggle", post(ui::toggle_units))
        .route("/ui/selection/:sol", post(ui::select_sol))
        .with_state(state);

    Router::new()
        .merge(api_routes)
        .merge(ui_routes)
        .merge(SwaggerUi::new("/swagger-ui").url("/api-docs/openapi.json", ApiDoc::openapi()))
        .layer(TraceLayer::new_for_http())
        .layer(cors)
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::body::Body;
    use axum::http::{header, Request, StatusCode};
    use tower::ServiceExt;

    use crate::services::dashboard::Dashboard;
    use crate::services::insight::SolReading;
    use crate::services::page::render_page;
    use crate::services::units::UnitSystem;

    fn reading(sol: &str, max_temp: f64) -> SolReading {
        SolReading {
            sol: sol.to_string(),
            max_temp: Some(max_temp),
            min_temp: Some(-60.0),
            wind_speed: Some(8.0),
            wind_direction_degrees: Some(90.0),
            wind_direction_cardinal: Some("E".to_string()),
            date: None,
        }
    }

    fn state() -> SharedDashboard {
        let readings = vec![
            reading("100", 20.0),
            reading("101", 10.0),
            reading("102", -5.0),
        ];
        Dashboard::new(readings, UnitSystem::Metric).into_shared()
    }

    fn post(uri: &str) -> Request<Body> {
        Request::builder()
            .method("POST")
            .uri(uri)
            .body(Body::empty())
            .unwrap()
    }

    #[tokio::test]
    async fn test_ui_routes_through_router() {
        let state = state();

        let resp = app(state.clone())
            .oneshot(post("/ui/selection/100"))
            .await
            .unwrap();
        assert_eq!(resp.status(), StatusCode::SEE_OTHER);
        assert_eq!(resp.headers()[header::LOCATION], "/");
        assert_eq!(state.read().await.current().unwrap().sol, "100");

        let resp = app(state.clone())
            .oneshot(post("/ui/units/toggle"))
            .await
            .unwrap();
        assert_eq!(resp.status(), StatusCode::SEE_OTHER);
        assert_eq!(state.read().await.unit_labels().units, UnitSystem::Imperial);

        let resp = app(state.clone())
            .oneshot(
                Request::builder()
                    .method("POST")
                    .uri("/ui/units")
                    .header(header::CONTENT_TYPE, "application/x-www-form-urlencoded")
                    .body(Body::from("units=metric"))
                    .unwrap(),
            )
            .await
            .unwrap();
        assert_eq!(resp.status(), StatusCode::SEE_OTHER);
        assert_eq!(state.read().await.unit_labels().units, UnitSystem::Metric);

        let resp = app(state.clone())
            .oneshot(post("/ui/selection/999"))
            .await
            .unwrap();
        assert_eq!(resp.status(), StatusCode::NOT_FOUND);
        assert_eq!(state.read().await.current().unwrap().sol, "100");
    }

    #[tokio::test]
    async fn test_api_routes_through_router() {
        let state = state();

        let resp = app(state.clone())
            .oneshot(post("/api/v1/dashboard/selection/101"))
            .await
            .unwrap();
        assert_eq!(resp.status(), StatusCode::OK);
        let body = axum::body::to_bytes(resp.into_body(), usize::MAX)
            .await
            .unwrap();
        let detail: serde_json::Value = serde_json::from_slice(&body).unwrap();
        assert_eq!(detail["sol"], "101");

        let resp = app(state.clone())
            .oneshot(
                Request::builder()
                    .method("PUT")
                    .uri("/api/v1/dashboard/units")
                    .header(header::CONTENT_TYPE, "application/json")
                    .body(Body::from(r#"{"units":"imperial"}"#))
                    .unwrap(),
            )
            .await
            .unwrap();
        assert_eq!(resp.status(), StatusCode::OK);
        assert_eq!(state.read().await.unit_labels().units, UnitSystem::Imperial);

        let resp = app(state.clone())
            .oneshot(
                Request::builder()
                    .method("DELETE")
                    .uri("/api/v1/dashboard/selection")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();
        assert_eq!(resp.status(), StatusCode::NO_CONTENT);
        assert_eq!(state.read().await.current().unwrap().sol, "102");

        let resp = app(state.clone())
            .oneshot(post("/api/v1/dashboard/selection/999"))
            .await
            .unwrap();
        assert_eq!(resp.status(), StatusCode::NOT_FOUND);

        let resp = app(state)
            .oneshot(post("/api/v1/dashboard/units/toggle"))
            .await
            .unwrap();
        assert_eq!(resp.status(), StatusCode::OK);
    }

    #[tokio::test]
    async fn test_page_selection_action_reaches_reserved_character_sol() {
        let state = Dashboard::new(
            vec![reading("a/b #1", 3.0), reading("7", 4.0)],
            UnitSystem::Metric,
        )
        .into_shared();

        let page = render_page(&state.read().await.render());
        let action = page
            .split(r#"action=""#)
            .map(|rest| rest.split('"').next().unwrap_or_default())
            .find(|a| a.starts_with("/ui/selection/"))
            .unwrap()
            .to_string();
        assert_eq!(action, "/ui/selection/a%2Fb%20%231");

        let resp = app(state.clone()).oneshot(post(&action)).await.unwrap();
        assert_eq!(resp.status(), StatusCode::SEE_OTHER);
        assert_eq!(state.read().await.current().unwrap().sol, "a/b #1");
    }
}
