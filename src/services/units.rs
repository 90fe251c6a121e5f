//! Display-time unit conversion.
//!
//! Readings are stored in the feed's native units and never mutated; these
//! functions convert a stored value for display and round it to a whole
//! number. Rounding is half-away-from-zero (`f64::round`).

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use utoipa::ToSchema;

/// Divisor turning the feed's native speed into the imperial display value.
const KPH_PER_MPH: f64 = 1.609;

/// Active unit system for display.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "lowercase")]
pub enum UnitSystem {
    #[default]
    Metric,
    Imperial,
}

impl UnitSystem {
    pub fn is_metric(self) -> bool {
        self == UnitSystem::Metric
    }

    /// The other unit system (what the combined toggle control switches to).
    pub fn toggled(self) -> Self {
        match self {
            UnitSystem::Metric => UnitSystem::Imperial,
            UnitSystem::Imperial => UnitSystem::Metric,
        }
    }

    /// Short temperature unit label ("C" / "F").
    pub fn temperature_label(self) -> &'static str {
        match self {
            UnitSystem::Metric => "C",
            UnitSystem::Imperial => "F",
        }
    }

    /// Short speed unit label ("kph" / "mph").
    pub fn speed_label(self) -> &'static str {
        match self {
            UnitSystem::Metric => "kph",
            UnitSystem::Imperial => "mph",
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            UnitSystem::Metric => "metric",
            UnitSystem::Imperial => "imperial",
        }
    }
}

impl fmt::Display for UnitSystem {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for UnitSystem {
    type Err = String;

    /// Accepts the unit names plus the page's radio ids ("cel" / "fah").
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "metric" | "cel" => Ok(UnitSystem::Metric),
            "imperial" | "fah" => Ok(UnitSystem::Imperial),
            other => Err(format!(
                "unknown unit system '{}', expected 'metric' or 'imperial'",
                other
            )),
        }
    }
}

/// Convert a stored temperature for display.
///
/// Metric shows the stored value. Imperial applies `(v - 32) * 5/9`, which
/// is the Fahrenheit-to-Celsius formula: it is only correct if the stored
/// value is Fahrenheit, while the feed's `AT` field is Celsius. The formula
/// is kept as-is so the dashboard matches the numbers users already know.
pub fn display_temperature(value: Option<f64>, units: UnitSystem) -> Option<i64> {
    value
        .map(|v| match units {
            UnitSystem::Metric => v,
            UnitSystem::Imperial => (v - 32.0) * (5.0 / 9.0),
        })
        .and_then(round_for_display)
}

/// Convert a stored wind speed for display. Imperial divides by 1.609.
pub fn display_speed(value: Option<f64>, units: UnitSystem) -> Option<i64> {
    value
        .map(|v| match units {
            UnitSystem::Metric => v,
            UnitSystem::Imperial => v / KPH_PER_MPH,
        })
        .and_then(round_for_display)
}

fn round_for_display(v: f64) -> Option<i64> {
    if v.is_finite() {
        Some(v.round() as i64)
    } else {
        None
    }
}
