//! HTML page and its form endpoints.
//!
//! Each form post applies one dashboard event and redirects back to `/`.

use axum::extract::{Path, State};
use axum::response::{Html, Redirect};
use axum::Form;
use serde::Deserialize;

use crate::errors::AppError;
use crate::services::dashboard::SharedDashboard;
use crate::services::page::render_page;

#[derive(Debug, Deserialize)]
pub struct UnitsForm {
    /// "metric" / "imperial" (or the radio ids "cel" / "fah")
    pub units: String,
}

pub async fn index(State(dashboard): State<SharedDashboard>) -> Html<String> {
    let view = dashboard.read().await.render();
    Html(render_page(&view))
}

pub async fn toggle_units(State(dashboard): State<SharedDashboard>) -> Redirect {
    dashboard.write().await.toggle_units();
    Redirect::to("/")
}

pub async fn set_units(
    State(dashboard): State<SharedDashboard>,
    Form(form): Form<UnitsForm>,
) -> Result<Redirect, AppError> {
    let units = form.units.parse().map_err(AppError::InvalidUnits)?;
    dashboard.write().await.set_units(units);
    Ok(Redirect::to("/"))
}

pub async fn select_sol(
    State(dashboard): State<SharedDashboard>,
    Path(sol): Path<String>,
) -> Result<Redirect, AppError> {
    dashboard.write().await.select_sol(&sol)?;
    Ok(Redirect::to("/"))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::services::dashboard::Dashboard;
    use crate::services::insight::SolReading;
    use crate::services::units::UnitSystem;

    fn state() -> SharedDashboard {
        let readings = ["100", "101", "102"]
            .iter()
            .enumerate()
            .map(|(i, sol)| SolReading {
                sol: sol.to_string(),
                max_temp: Some(20.0 - 10.0 * i as f64),
                min_temp: Some(-60.0),
                wind_speed: Some(5.0),
                wind_direction_degrees: Some(45.0),
                wind_direction_cardinal: Some("NE".to_string()),
                date: None,
            })
            .collect();
        Dashboard::new(readings, UnitSystem::Metric).into_shared()
    }

    #[tokio::test]
    async fn test_index_shows_latest_sol() {
        let Html(page) = index(State(state())).await;
        assert!(page.contains("<span data-current-sol>102</span>"));
        assert!(page.contains("<span data-current-temp-high>0</span>"));
    }

    #[tokio::test]
    async fn test_forms_update_page() {
        let s = state();

        select_sol(State(s.clone()), Path("100".to_string()))
            .await
            .unwrap();
        toggle_units(State(s.clone())).await;

        let Html(page) = index(State(s.clone())).await;
        assert!(page.contains("<span data-current-sol>100</span>"));
        assert!(page.contains("<span data-current-temp-high>-7</span>"));
        assert!(page.contains("<span data-speed-unit>mph</span>"));

        set_units(
            State(s.clone()),
            Form(UnitsForm {
                units: "cel".to_string(),
            }),
        )
        .await
        .unwrap();
        let Html(page) = index(State(s)).await;
        assert!(page.contains("<span data-current-temp-high>20</span>"));
    }

    #[tokio::test]
    async fn test_set_units_rejects_unknown_value() {
        let result = set_units(
            State(state()),
            Form(UnitsForm {
                units: "kelvin".to_string(),
            }),
        )
        .await;
        assert!(matches!(result, Err(AppError::InvalidUnits(_))));
    }

    #[tokio::test]
    async fn test_select_unknown_sol() {
        let result = select_sol(State(state()), Path("7".to_string())).await;
        assert!(matches!(result, Err(AppError::SolNotFound(_))));
    }
}
