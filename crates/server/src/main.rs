// Authentication gateway entry point.
// Decision: fail fast on missing SurrealDB settings — nothing here works
// without the remote database
// Decision: CORS only when a cross-origin frontend is configured; the
// default deployment serves same-origin forms

use anyhow::{Context, Result};
use axum::http::{header, HeaderValue, Method};
use tower_http::cors::{AllowOrigin, CorsLayer};
use tower_http::trace::TraceLayer;

use gatekit_core::AuthConfig;
use gatekit_server::routes;
use gatekit_server::state::AppState;

#[tokio::main]
async fn main() -> Result<()> {
    // Load environment variables from .env file if present
    dotenvy::dotenv().ok();

    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| {
                tracing_subscriber::EnvFilter::new("gatekit_server=debug,tower_http=debug")
            }),
        )
        .init();

    let config = AuthConfig::from_env().context("Failed to load configuration")?;
    tracing::info!(
        endpoint = %config.surreal.endpoint,
        namespace = %config.surreal.namespace,
        database = %config.surreal.database,
        oauth = config.oauth_enabled(),
        "Authentication gateway configured"
    );

    let state = AppState::new(config);
    let mut app = routes::router(state);

    // Load CORS allowed origins from environment (optional)
    // Only needed when the frontend is served from a different origin
    // Example: CORS_ALLOWED_ORIGINS="https://app.example.com"
    let cors_origins: Vec<HeaderValue> = std::env::var("CORS_ALLOWED_ORIGINS")
        .ok()
        .filter(|s| !s.is_empty())
        .map(|s| s.split(',').filter_map(|s| s.trim().parse().ok()).collect())
        .unwrap_or_default();

    if cors_origins.is_empty() {
        tracing::info!("CORS not configured (same-origin requests only)");
    } else {
        tracing::info!(origins = ?cors_origins, "CORS origins configured");
        app = app.layer(
            CorsLayer::new()
                .allow_origin(AllowOrigin::list(cors_origins))
                .allow_methods([Method::GET, Method::POST])
                .allow_headers([header::CONTENT_TYPE, header::ACCEPT, header::ORIGIN])
                .allow_credentials(true),
        );
    }

    // Add tracing
    let app = app.layer(TraceLayer::new_for_http());

    // Start HTTP server
    let port = std::env::var("SERVER_PORT")
        .ok()
        .and_then(|s| s.parse::<u16>().ok())
        .unwrap_or(3000);
    let addr = format!("0.0.0.0:{}", port);
    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .context("Failed to bind to address")?;
    tracing::info!("HTTP server listening on {}", addr);

    axum::serve(listener, app).await.context("Server error")?;

    Ok(())
}
