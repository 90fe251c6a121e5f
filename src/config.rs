use crate::services::units::UnitSystem;

/// Default InSight weather feed endpoint.
const DEFAULT_INSIGHT_API_URL: &str = "https://api.nasa.gov/insight_weather/";

/// NASA's shared, rate-limited demo key.
const DEFAULT_NASA_API_KEY: &str = "DEMO_KEY";

/// Application configuration, parsed from environment variables.
#[derive(Debug, Clone)]
pub struct AppConfig {
    pub insight_api_url: String,
    pub nasa_api_key: String,
    pub port: u16,
    /// Unit system the dashboard starts in.
    pub default_units: UnitSystem,
}

impl AppConfig {
    pub fn from_env() -> Self {
        let default_units = match std::env::var("DEFAULT_UNITS") {
            Ok(raw) => raw.parse().unwrap_or_else(|e| {
                tracing::warn!("Ignoring DEFAULT_UNITS: {}, falling back to metric", e);
                UnitSystem::Metric
            }),
            Err(_) => UnitSystem::Metric,
        };

        Self {
            insight_api_url: std::env::var("INSIGHT_API_URL")
                .unwrap_or_else(|_| DEFAULT_INSIGHT_API_URL.to_string()),
            nasa_api_key: std::env::var("NASA_API_KEY")
                .unwrap_or_else(|_| DEFAULT_NASA_API_KEY.to_string()),
            port: std::env::var("PORT")
                .unwrap_or_else(|_| "8080".to_string())
                .parse()
                .expect("PORT must be a valid u16"),
            default_units,
        }
    }

    /// Whether `LOG_FORMAT=json` is set. Read on its own so logging can be
    /// initialized before the rest of the config is parsed.
    pub fn json_logs_from_env() -> bool {
        std::env::var("LOG_FORMAT")
            .map(|v| v.eq_ignore_ascii_case("json"))
            .unwrap_or(false)
    }
}
