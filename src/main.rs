// Mars Weather v0.1
use std::net::SocketAddr;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

mod config;
mod errors;
mod routes;
mod services;

use config::AppConfig;
use services::dashboard::Dashboard;
use services::insight::InsightClient;

#[tokio::main]
async fn main() {
    // Initialize tracing
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| "mars_weather=debug,tower_http=debug".into());
    if AppConfig::json_logs_from_env() {
        tracing_subscriber::registry()
            .with(filter)
            .with(tracing_subscriber::fmt::layer().json())
            .init();
    } else {
        tracing_subscriber::registry()
            .with(filter)
            .with(tracing_subscriber::fmt::layer())
            .init();
    }

    let config = AppConfig::from_env();

    // Fetch the feed exactly once. A failed fetch leaves the dashboard empty
    // rather than stopping the server.
    let readings = match InsightClient::new(&config.insight_api_url, &config.nasa_api_key) {
        Ok(client) => client.fetch_readings().await,
        Err(e) => Err(e),
    }
    .unwrap_or_else(|e| {
        tracing::error!("Failed to load InSight weather feed: {}", e);
        Vec::new()
    });

    let dashboard = Dashboard::new(readings, config.default_units).into_shared();

    let app = routes::app(dashboard);

    // Start server
    let addr = SocketAddr::from(([0, 0, 0, 0], config.port));
    tracing::info!("Mars weather listening on {}", addr);
    tracing::info!(
        "Swagger UI available at http://localhost:{}/swagger-ui/",
        config.port
    );

    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .expect("Failed to bind TCP listener");
    axum::serve(listener, app)
        .await
        .expect("Server terminated unexpectedly");
}
