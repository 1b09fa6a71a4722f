//! HTTP server module
//!
//! Serves the server-rendered artwork table page at `/` and an OpenAPI 3.1
//! compliant JSON API under `/api/v1` for driving the same table.

use crate::{ArtworkTable, Config, Result};
use axum::{
    Router,
    http::HeaderValue,
    routing::{get, post},
};
use std::sync::Arc;
use tokio::net::TcpListener;
use tokio_util::sync::CancellationToken;
use tower_http::cors::{AllowOrigin, Any, CorsLayer};
use tower_http::trace::TraceLayer;
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

pub mod error_response;
pub mod openapi;
pub mod routes;
pub mod state;

pub use openapi::ApiDoc;
pub use state::AppState;

/// Create the router with all route definitions
///
/// # Routes
///
/// ## Browser page
/// - `GET /` - Render the table (`?page=&rows=` navigates)
/// - `POST /rows/:id/toggle` - Toggle one row
/// - `POST /page/select` - Select all rows on the current page
/// - `POST /page/deselect` - Deselect all rows on the current page
/// - `POST /selection/first` - Select the first N rows across pages (form field `count`)
/// - `POST /selection/clear` - Clear the selection
///
/// ## Table (under `/api/v1`)
/// - `GET /table` - Current table view
/// - `POST /table/page` - Navigate to a page
///
/// ## Selection (under `/api/v1`)
/// - `GET /selection` - Selected records
/// - `DELETE /selection` - Clear the selection
/// - `POST /selection/:id/toggle` - Toggle one record
/// - `DELETE /selection/:id` - Deselect one record
/// - `POST /selection/page` - Select all rows on the current page
/// - `DELETE /selection/page` - Deselect all rows on the current page
/// - `POST /selection/first` - Select the first N rows across pages
///
/// ## System (under `/api/v1`)
/// - `GET /health` - Health check
/// - `GET /openapi.json` - OpenAPI specification
/// - `GET /events` - Server-sent events stream
/// - `GET /swagger-ui` - Interactive Swagger UI documentation (if enabled, at the root)
pub fn create_router(table: Arc<ArtworkTable>, config: Arc<Config>) -> Router {
    let state = AppState::new(table, config.clone());

    let api = Router::new()
        // Table
        .route("/table", get(routes::get_table))
        .route("/table/page", post(routes::load_page))
        // Selection
        .route(
            "/selection",
            get(routes::list_selection).delete(routes::clear_selection),
        )
        .route(
            "/selection/page",
            post(routes::select_page).delete(routes::deselect_page),
        )
        .route("/selection/first", post(routes::select_first))
        .route("/selection/:id", axum::routing::delete(routes::deselect_row))
        .route("/selection/:id/toggle", post(routes::toggle_row))
        // System
        .route("/health", get(routes::health_check))
        .route("/openapi.json", get(routes::openapi_spec))
        .route("/events", get(routes::event_stream));

    let router = Router::new()
        .route("/", get(routes::index))
        .route("/rows/:id/toggle", post(routes::toggle_row_form))
        .route("/page/select", post(routes::select_page_form))
        .route("/page/deselect", post(routes::deselect_page_form))
        .route("/selection/first", post(routes::select_first_form))
        .route("/selection/clear", post(routes::clear_selection_form))
        .nest("/api/v1", api);

    // Merge Swagger UI routes if enabled in config (before applying state).
    // The UI gets its own copy of the document; /api/v1/openapi.json is already routed.
    let router = if config.server.api.swagger_ui {
        router.merge(SwaggerUi::new("/swagger-ui").url("/api-docs/openapi.json", ApiDoc::openapi()))
    } else {
        router
    };

    let router = router.with_state(state).layer(TraceLayer::new_for_http());

    // Apply CORS middleware if enabled in config
    if config.server.api.cors_enabled {
        let cors = build_cors_layer(&config.server.api.cors_origins);
        router.layer(cors)
    } else {
        router
    }
}

/// Build a CORS layer based on configured origins
///
/// Allows any origin when the list is empty or contains `"*"`.
fn build_cors_layer(origins: &[String]) -> CorsLayer {
    let allow_any = origins.iter().any(|o| o == "*");

    if allow_any || origins.is_empty() {
        CorsLayer::new()
            .allow_origin(Any)
            .allow_methods(Any)
            .allow_headers(Any)
    } else {
        let allowed: Vec<HeaderValue> = origins.iter().filter_map(|o| o.parse().ok()).collect();

        CorsLayer::new()
            .allow_origin(AllowOrigin::list(allowed))
            .allow_methods(Any)
            .allow_headers(Any)
    }
}

/// Start the HTTP server on the configured bind address.
///
/// Runs until the server fails. Use [`serve_until_cancelled`] for graceful
/// shutdown.
///
/// # Example
///
/// ```no_run
/// use artwork_table::{ArtworkTable, Config};
/// use std::sync::Arc;
///
/// # async fn example() -> Result<(), Box<dyn std::error::Error>> {
/// let config = Arc::new(Config::default());
/// let table = Arc::new(ArtworkTable::new((*config).clone())?);
///
/// // Start the server (blocks until it stops)
/// artwork_table::api::start_api_server(table, config).await?;
/// # Ok(())
/// # }
/// ```
pub async fn start_api_server(table: Arc<ArtworkTable>, config: Arc<Config>) -> Result<()> {
    serve_until_cancelled(table, config, CancellationToken::new()).await
}

/// Start the HTTP server and stop accepting connections once `shutdown` is cancelled
pub async fn serve_until_cancelled(
    table: Arc<ArtworkTable>,
    config: Arc<Config>,
    shutdown: CancellationToken,
) -> Result<()> {
    let bind_address = config.server.api.bind_address;

    tracing::info!(address = %bind_address, "Starting artwork table server");

    let app = create_router(table, config);

    let listener = TcpListener::bind(bind_address)
        .await
        .map_err(crate::error::Error::Io)?;

    let local_address = listener.local_addr().map_err(crate::error::Error::Io)?;
    tracing::info!(address = %local_address, "Artwork table server listening");

    axum::serve(listener, app)
        .with_graceful_shutdown(async move { shutdown.cancelled().await })
        .await
        .map_err(|e| crate::error::Error::ApiServerError(e.to_string()))?;

    tracing::info!("Artwork table server stopped");
    Ok(())
}

// unwrap/expect are acceptable in tests for concise failure-on-error assertions
#[allow(clippy::unwrap_used, clippy::expect_used)]
#[cfg(test)]
mod tests;
