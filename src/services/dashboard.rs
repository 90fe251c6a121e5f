//! Dashboard state and the views rendered from it.
//!
//! `Dashboard` owns the readings loaded at startup together with the active
//! unit system and the selected sol. Views are recomputed from that state on
//! every read, so rendering is idempotent and never touches the readings.

use chrono::{DateTime, Utc};
use serde::Serialize;
use std::sync::Arc;
use tokio::sync::RwLock;
use utoipa::ToSchema;

use crate::errors::AppError;
use crate::services::insight::SolReading;
use crate::services::units::{display_speed, display_temperature, UnitSystem};

/// Placeholder shown for any value the feed did not provide.
pub const MISSING_VALUE: &str = "--";

/// Dashboard shared between request handlers.
pub type SharedDashboard = Arc<RwLock<Dashboard>>;

/// Application state behind the weather page.
#[derive(Debug, Clone)]
pub struct Dashboard {
    readings: Vec<SolReading>,
    units: UnitSystem,
    /// Sol chosen from the history list; `None` follows the latest sol.
    selected: Option<String>,
}

/// Detail panel for one sol, converted to the active units.
#[derive(Debug, Clone, PartialEq, Serialize, ToSchema)]
pub struct DetailView {
    pub sol: String,
    /// "Month Day", e.g. "August 19"
    pub date: String,
    pub high: Option<i64>,
    pub low: Option<i64>,
    pub wind_speed: Option<i64>,
    /// Compass point label, or "--" when missing
    pub wind_direction_cardinal: String,
    /// Raw compass degrees, never converted
    pub wind_direction_degrees: Option<f64>,
}

/// One row of the previous-sols list.
#[derive(Debug, Clone, PartialEq, Serialize, ToSchema)]
pub struct HistoryEntry {
    pub sol: String,
    pub date: String,
    pub high: Option<i64>,
    pub low: Option<i64>,
    /// Whether this sol is the one shown in the detail panel
    pub selected: bool,
}

/// Unit labels for every unit placeholder on the page.
#[derive(Debug, Clone, PartialEq, Serialize, ToSchema)]
pub struct UnitLabels {
    pub units: UnitSystem,
    /// "C" or "F"
    pub temperature: String,
    /// "kph" or "mph"
    pub speed: String,
}

/// Everything the page needs for one render.
#[derive(Debug, Clone, PartialEq, Serialize, ToSchema)]
pub struct DashboardView {
    pub labels: UnitLabels,
    /// Null when no readings were loaded
    pub detail: Option<DetailView>,
    pub history: Vec<HistoryEntry>,
}

impl Dashboard {
    pub fn new(readings: Vec<SolReading>, units: UnitSystem) -> Self {
        Self {
            readings,
            units,
            selected: None,
        }
    }

    pub fn into_shared(self) -> SharedDashboard {
        Arc::new(RwLock::new(self))
    }

    pub fn readings(&self) -> &[SolReading] {
        &self.readings
    }

    /// The last reading in feed order. Position decides, not the sol number.
    pub fn latest(&self) -> Option<&SolReading> {
        self.readings.last()
    }

    /// The reading shown in the detail panel.
    pub fn current(&self) -> Option<&SolReading> {
        match &self.selected {
            Some(sol) => self.find(sol).or_else(|| self.latest()),
            None => self.latest(),
        }
    }

    /// Show a specific sol in the detail panel. Returns that sol's detail.
    pub fn select_sol(&mut self, sol: &str) -> Result<DetailView, AppError> {
        let detail = self
            .find(sol)
            .map(|r| detail_for(r, self.units))
            .ok_or_else(|| AppError::SolNotFound(sol.to_string()))?;
        tracing::debug!("Selected sol {}", sol);
        self.selected = Some(sol.to_string());
        Ok(detail)
    }

    /// Go back to following the latest sol.
    pub fn clear_selection(&mut self) {
        self.selected = None;
    }

    /// Select a unit system directly (radio control).
    pub fn set_units(&mut self, units: UnitSystem) {
        tracing::debug!("Units set to {}", units);
        self.units = units;
    }

    /// Flip the unit system (toggle control). Returns the new units.
    pub fn toggle_units(&mut self) -> UnitSystem {
        self.units = self.units.toggled();
        tracing::debug!("Units toggled to {}", self.units);
        self.units
    }

    pub fn detail_view(&self) -> Option<DetailView> {
        self.current().map(|r| detail_for(r, self.units))
    }

    pub fn history_view(&self) -> Vec<HistoryEntry> {
        let current_sol = self.current().map(|r| r.sol.as_str());
        self.readings
            .iter()
            .map(|r| HistoryEntry {
                sol: r.sol.clone(),
                date: format_date(r.date),
                high: display_temperature(r.max_temp, self.units),
                low: display_temperature(r.min_temp, self.units),
                selected: current_sol == Some(r.sol.as_str()),
            })
            .collect()
    }

    pub fn unit_labels(&self) -> UnitLabels {
        UnitLabels {
            units: self.units,
            temperature: self.units.temperature_label().to_string(),
            speed: self.units.speed_label().to_string(),
        }
    }

    pub fn render(&self) -> DashboardView {
        DashboardView {
            labels: self.unit_labels(),
            detail: self.detail_view(),
            history: self.history_view(),
        }
    }

    fn find(&self, sol: &str) -> Option<&SolReading> {
        self.readings.iter().find(|r| r.sol == sol)
    }
}

/// Build the detail panel for a specific reading.
pub fn detail_for(reading: &SolReading, units: UnitSystem) -> DetailView {
    DetailView {
        sol: reading.sol.clone(),
        date: format_date(reading.date),
        high: display_temperature(reading.max_temp, units),
        low: display_temperature(reading.min_temp, units),
        wind_speed: display_speed(reading.wind_speed, units),
        wind_direction_cardinal: reading
            .wind_direction_cardinal
            .clone()
            .unwrap_or_else(|| MISSING_VALUE.to_string()),
        wind_direction_degrees: reading.wind_direction_degrees,
    }
}

/// Format a date as "Month Day" (e.g. "February 3"), without year or weekday.
pub fn format_date(date: Option<DateTime<Utc>>) -> String {
    match date {
        Some(d) => d.format("%B %-d").to_string(),
        None => MISSING_VALUE.to_string(),
    }
}
