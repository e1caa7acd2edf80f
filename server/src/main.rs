#![recursion_limit = "256"]

mod config;
mod error;
mod proxy;
mod routes;
mod state;

use error::ServerError;

#[tokio::main]
async fn main() -> Result<(), ServerError> {
    // A missing .env file is normal outside local development.
    if let Err(e) = dotenvy::dotenv() {
        if !e.not_found() {
            eprintln!("ignoring unreadable .env: {e}");
        }
    }
    tracing_subscriber::fmt::init();

    let config = config::ServerConfig::from_env();
    let port = config.port;
    tracing::info!(backend = %config.api_base_url, timeout_secs = config.proxy_timeout_secs, "proxy configured");

    let state = state::AppState::new(config)?;
    let app = routes::leptos_app(state)?;
    let listener = tokio::net::TcpListener::bind(format!("0.0.0.0:{port}"))
        .await
        .map_err(|source| ServerError::Bind { port, source })?;

    tracing::info!(%port, "forgeflow listening");
    axum::serve(listener, app).await.map_err(ServerError::Serve)
}
