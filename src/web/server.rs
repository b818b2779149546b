//! Axum web server setup and configuration

use std::net::SocketAddr;
use std::path::Path;

use anyhow::{Context, Result};
use axum::http::HeaderValue;
use axum::Router;
use tower_http::cors::{AllowOrigin, Any, CorsLayer};
use tower_http::services::{ServeDir, ServeFile};
use tower_http::trace::TraceLayer;
use tracing::{info, warn};

use super::routes::create_routes;
use super::AppState;

/// Start the Axum web server
pub async fn start_server(state: AppState) -> Result<()> {
    let addr: SocketAddr = format!("{}:{}", state.config.api_host, state.config.api_port)
        .parse()
        .context("Invalid API_HOST or PORT")?;

    let app = create_app(state);

    info!("Server is running on http://{}", addr);

    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .context("Failed to bind to address")?;

    axum::serve(listener, app)
        .await
        .context("Server error")?;

    Ok(())
}

/// Create the Axum router without starting the server (useful for testing)
pub fn create_app(state: AppState) -> Router {
    let cors = cors_layer(state.config.cors_origin.as_deref());
    let static_dir = state.config.static_dir.clone();

    let mut app = create_routes(state);

    // Dashboard build, with client-side routes falling back to index.html
    if let Some(dir) = static_dir {
        info!("Serving dashboard from {}", dir);
        let index = Path::new(&dir).join("index.html");
        app = app.fallback_service(ServeDir::new(&dir).not_found_service(ServeFile::new(index)));
    }

    app.layer(cors).layer(TraceLayer::new_for_http())
}

fn cors_layer(origin: Option<&str>) -> CorsLayer {
    let allow_origin = match origin.map(HeaderValue::from_str) {
        Some(Ok(value)) => AllowOrigin::exact(value),
        Some(Err(e)) => {
            warn!("Ignoring invalid CORS_ORIGIN: {}", e);
            AllowOrigin::any()
        }
        None => AllowOrigin::any(),
    };

    CorsLayer::new()
        .allow_origin(allow_origin)
        .allow_methods(Any)
        .allow_headers(Any)
}
