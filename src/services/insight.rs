//! NASA InSight weather feed client.
//!
//! Fetches the per-sol weather summary once and normalizes it into
//! `SolReading`s. See: https://api.nasa.gov/assets/insight/InSight%20Weather%20API%20Documentation.pdf

use chrono::{DateTime, Utc};
use serde::Serialize;
use serde_json::Value;
use utoipa::ToSchema;

use crate::errors::AppError;

/// Top-level keys of the feed that are not sols.
const NON_SOL_KEYS: [&str; 2] = ["sol_keys", "validity_checks"];

/// One sol's weather, in the feed's native units.
///
/// Every measurement is optional: a field that is absent or non-numeric in
/// the feed is `None` rather than an error.
#[derive(Debug, Clone, PartialEq, Serialize, ToSchema)]
pub struct SolReading {
    /// Sol identifier as it appears in the feed (e.g. "259")
    pub sol: String,
    /// Maximum air temperature (`AT.mx`)
    pub max_temp: Option<f64>,
    /// Minimum air temperature (`AT.mn`)
    pub min_temp: Option<f64>,
    /// Average horizontal wind speed (`HWS.av`)
    pub wind_speed: Option<f64>,
    /// Most common wind direction in compass degrees
    pub wind_direction_degrees: Option<f64>,
    /// Most common wind direction as a compass point (e.g. "WNW")
    pub wind_direction_cardinal: Option<String>,
    /// Start of the sol (`First_UTC`)
    pub date: Option<DateTime<Utc>>,
}

/// Client for the InSight weather feed.
#[derive(Debug, Clone)]
pub struct InsightClient {
    client: reqwest::Client,
    base_url: String,
    api_key: String,
}

impl InsightClient {
    pub fn new(base_url: &str, api_key: &str) -> Result<Self, AppError> {
        let client = reqwest::Client::builder()
            .build()
            .map_err(|e| AppError::Internal(format!("Failed to build HTTP client: {}", e)))?;
        Ok(Self {
            client,
            base_url: base_url.to_string(),
            api_key: api_key.to_string(),
        })
    }

    /// Fetch the feed and normalize it into readings, in feed order.
    pub async fn fetch_readings(&self) -> Result<Vec<SolReading>, AppError> {
        tracing::info!("Fetching InSight weather feed from {}", self.base_url);

        let response = self
            .client
            .get(&self.base_url)
            .query(&[
                ("api_key", self.api_key.as_str()),
                ("feedtype", "json"),
                ("ver", "1.0"),
            ])
            .send()
            .await
            .map_err(|e| AppError::Feed(format!("request failed: {}", e)))?;

        if !response.status().is_success() {
            return Err(AppError::Feed(format!("HTTP {}", response.status())));
        }

        let raw_json: Value = response
            .json()
            .await
            .map_err(|e| AppError::Feed(format!("JSON parse error: {}", e)))?;

        let readings = normalize_readings(&raw_json)?;
        tracing::info!("Loaded {} sols from InSight feed", readings.len());
        Ok(readings)
    }
}

/// Turn a raw feed payload into readings.
///
/// Every top-level key except `sol_keys` and `validity_checks` is a sol.
/// Sols keep the order they have in the payload; no sorting is applied.
pub fn normalize_readings(raw_json: &Value) -> Result<Vec<SolReading>, AppError> {
    let sols = raw_json
        .as_object()
        .ok_or_else(|| AppError::Feed("payload is not a JSON object".to_string()))?;

    Ok(sols
        .iter()
        .filter(|(key, _)| !NON_SOL_KEYS.contains(&key.as_str()))
        .map(|(sol, data)| parse_sol(sol, data))
        .collect())
}

fn parse_sol(sol: &str, data: &Value) -> SolReading {
    SolReading {
        sol: sol.to_string(),
        max_temp: number_at(data, "/AT/mx"),
        min_temp: number_at(data, "/AT/mn"),
        wind_speed: number_at(data, "/HWS/av"),
        wind_direction_degrees: number_at(data, "/WD/most_common/compass_degrees"),
        wind_direction_cardinal: data
            .pointer("/WD/most_common/compass_point")
            .and_then(Value::as_str)
            .map(str::to_string),
        date: data
            .get("First_UTC")
            .and_then(Value::as_str)
            .and_then(|s| parse_first_utc(sol, s)),
    }
}

fn number_at(data: &Value, pointer: &str) -> Option<f64> {
    data.pointer(pointer).and_then(Value::as_f64)
}

fn parse_first_utc(sol: &str, s: &str) -> Option<DateTime<Utc>> {
    match DateTime::parse_from_rfc3339(s) {
        Ok(dt) => Some(dt.with_timezone(&Utc)),
        Err(e) => {
            tracing::debug!("Sol {}: unparseable First_UTC '{}': {}", sol, s, e);
            None
        }
    }
}
