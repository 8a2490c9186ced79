//! # Postcraft Studio Server
//!
//! Local HTTP API behind the content-creation dashboard.

use actix_web::middleware::from_fn;
use actix_web::{App, HttpServer, web};
use tracing_actix_web::TracingLogger;

mod config;
mod handlers;
mod middleware;
mod state;
mod telemetry;

use config::AppConfig;
use state::AppState;
use telemetry::TelemetryConfig;

#[actix_web::main]
async fn main() -> anyhow::Result<()> {
    // Load .env file if present
    dotenvy::dotenv().ok();

    telemetry::init_telemetry(&TelemetryConfig::from_env());

    let config = AppConfig::from_env();

    tracing::info!(
        "Starting Postcraft Studio on {}:{} (storage: {})",
        config.host,
        config.port,
        config.storage.name()
    );

    let state = AppState::new(&config).await?;
    let json_limit = config.json_limit;

    HttpServer::new(move || {
        App::new()
            .wrap(from_fn(middleware::request_id::request_id))
            .wrap(TracingLogger::default())
            .app_data(web::Data::new(state.clone()))
            .app_data(handlers::json_config(json_limit))
            .configure(handlers::configure_routes)
    })
    .bind((config.host.as_str(), config.port))?
    .run()
    .await?;

    Ok(())
}
