mod config;
mod handler;
mod service;

use axum::{
    routing::{get, post, put},
    Router,
};
use config::ApiConfig;
use connectors::{coingecko::CoinGeckoClient, ClientConfig};
use dashboard::DashboardConfig;
use service::DashboardService;
use std::sync::Arc;
use tower_http::{
    cors::{Any, CorsLayer},
    trace::TraceLayer,
};
use tracing::info;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Initialize tracing
    tracing_subscriber::fmt::init();

    info!("Starting coin price dashboard");

    // Load configuration from environment
    let api_config = ApiConfig::from_env();
    let client_config = ClientConfig::from_env()
        .map_err(|e| format!("Failed to load client configuration: {}", e))?;
    let dashboard_config = DashboardConfig::from_env()
        .map_err(|e| format!("Failed to load dashboard configuration: {}", e))?;

    let client = CoinGeckoClient::new(&client_config)
        .map_err(|e| format!("Failed to create market data client: {}", e))?;

    let service = Arc::new(DashboardService::new(Arc::new(client), dashboard_config));
    service.start().await;

    // Create CORS middleware
    let cors = CorsLayer::new()
        .allow_methods(Any)
        .allow_origin(Any)
        .allow_headers(Any);

    let app = Router::new()
        .route("/api/v1/dashboard", get(handler::get_dashboard))
        .route("/api/v1/coins", get(handler::list_coins))
        .route("/api/v1/search", put(handler::set_search))
        .route("/api/v1/refresh", post(handler::refresh))
        .route("/api/v1/popular", get(handler::list_popular))
        .route("/api/v1/selection/coin", put(handler::select_coin))
        .route("/api/v1/selection/window", put(handler::select_window))
        .route("/api/v1/chart", get(handler::get_chart))
        .layer(TraceLayer::new_for_http())
        .layer(cors)
        .with_state(Arc::clone(&service));

    let addr = api_config
        .socket_addr()
        .map_err(|e| format!("Failed to resolve listen address: {}", e))?;
    info!("Listening on {}", addr);

    axum::Server::bind(&addr)
        .serve(app.into_make_service())
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    service.stop().await;
    info!("Shut down");

    Ok(())
}

async fn shutdown_signal() {
    if tokio::signal::ctrl_c().await.is_ok() {
        info!("Received Ctrl-C, shutting down");
    }
}
