// Web server — Axum-based dashboard backend.
//
// The dashboard page is embedded at compile time via include_dir!.
// All /api/* routes serve JSON; `/` and static asset paths serve the page.
// Handlers share nothing but the `Database` handle, which opens its own
// connection for every query.

use std::sync::Arc;

use anyhow::Result;
use axum::body::Body;
use axum::http::{header, HeaderValue, StatusCode, Uri};
use axum::response::{IntoResponse, Response};
use axum::routing::get;
use axum::Router;
use include_dir::{include_dir, Dir};
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;
use tracing::info;

use crate::config::Config;
use crate::db::Database;

pub mod error;
pub mod handlers;

pub use error::ApiError;

static ASSETS: Dir<'static> = include_dir!("$CARGO_MANIFEST_DIR/web/static");

/// Shared application state threaded through all Axum handlers.
#[derive(Clone)]
pub struct AppState {
    pub db: Arc<dyn Database>,
}

/// Start the Axum web server and block until it receives Ctrl+C or SIGTERM.
pub async fn run_server(config: &Config, db: Arc<dyn Database>) -> Result<()> {
    let app = build_router(AppState { db });

    let addr = format!("{}:{}", config.host, config.port);
    let listener = tokio::net::TcpListener::bind(&addr).await?;
    info!("Ecotrack dashboard listening on http://{addr}");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    info!("Server shutdown complete");
    Ok(())
}

pub fn build_router(state: AppState) -> Router {
    use handlers::{reports, stats};

    let api = Router::new()
        .route("/api/overview", get(stats::overview))
        .route("/api/categories", get(stats::categories))
        .route("/api/trends", get(stats::trends))
        .route("/api/locations", get(stats::locations))
        .route("/api/severity", get(stats::severity))
        .route("/api/milestones", get(stats::milestones))
        .route("/api/species", get(stats::species))
        .route(
            "/api/reports",
            get(reports::list_reports).post(reports::create_report),
        )
        .route(
            "/api/reports/{id}",
            get(reports::get_report).put(reports::update_report),
        );

    // Paths the first version of the dashboard script called
    let legacy_stats = Router::new()
        .route("/overview", get(stats::overview))
        .route("/categories", get(stats::categories))
        .route("/trends", get(stats::trends))
        .route("/locations", get(stats::locations))
        .route("/milestones", get(stats::milestones))
        .route("/recent", get(reports::list_reports));

    Router::new()
        .merge(api)
        .nest("/api/stats", legacy_stats)
        .route("/", get(serve_dashboard))
        .route("/health", get(health))
        .fallback(serve_asset)
        .layer(
            CorsLayer::new()
                .allow_origin(tower_http::cors::Any)
                .allow_methods([
                    axum::http::Method::GET,
                    axum::http::Method::POST,
                    axum::http::Method::PUT,
                    axum::http::Method::OPTIONS,
                ])
                .allow_headers([header::CONTENT_TYPE]),
        )
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

/// Liveness check — always returns 200 OK.
async fn health() -> impl IntoResponse {
    (
        StatusCode::OK,
        axum::Json(serde_json::json!({ "status": "ok" })),
    )
}

async fn serve_dashboard() -> Response {
    match ASSETS.get_file("index.html") {
        Some(index) => asset_response(index.contents(), "index.html"),
        None => (
            StatusCode::SERVICE_UNAVAILABLE,
            [(header::CONTENT_TYPE, "text/plain")],
            Body::from("Dashboard page not bundled"),
        )
            .into_response(),
    }
}

/// Serve embedded static files. Unknown API paths get a JSON 404 rather than
/// the dashboard page.
async fn serve_asset(uri: Uri) -> Response {
    let path = uri.path().trim_start_matches('/');

    if path.starts_with("api/") {
        return api_error(StatusCode::NOT_FOUND, "No such endpoint");
    }

    match ASSETS.get_file(path) {
        Some(file) => asset_response(file.contents(), path),
        None => api_error(StatusCode::NOT_FOUND, "Not found"),
    }
}

fn asset_response(contents: &'static [u8], path: &str) -> Response {
    let mime = mime_type(path);
    Response::builder()
        .status(StatusCode::OK)
        .header(header::CONTENT_TYPE, HeaderValue::from_static(mime))
        .body(Body::from(contents))
        .unwrap_or_else(|_| StatusCode::INTERNAL_SERVER_ERROR.into_response())
}

fn mime_type(path: &str) -> &'static str {
    let ext = path.rsplit('.').next().unwrap_or("");
    match ext {
        "html" => "text/html; charset=utf-8",
        "js" | "mjs" => "application/javascript",
        "css" => "text/css",
        "svg" => "image/svg+xml",
        "png" => "image/png",
        "ico" => "image/x-icon",
        "json" => "application/json",
        _ => "application/octet-stream",
    }
}

/// Typed JSON error response helper.
pub fn api_error(status: StatusCode, message: &str) -> Response {
    (
        status,
        axum::Json(serde_json::json!({ "success": false, "error": message })),
    )
        .into_response()
}

/// Wait for Ctrl+C or SIGTERM.
async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            tracing::error!(error = %e, "Failed to install Ctrl+C handler");
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut signal) => {
                signal.recv().await;
            }
            Err(e) => {
                tracing::error!(error = %e, "Failed to install SIGTERM handler");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => info!("Received Ctrl+C, starting shutdown"),
        _ = terminate => info!("Received SIGTERM, starting shutdown"),
    }
}
