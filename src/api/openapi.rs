//! OpenAPI documentation and schema generation
//!
//! Defines the OpenAPI specification for the artwork-table JSON API using
//! utoipa for compile-time spec generation.

use utoipa::OpenApi;

/// OpenAPI documentation for the artwork-table JSON API
///
/// The document can be accessed via:
/// - `/api/v1/openapi.json` - JSON format OpenAPI specification
/// - `/swagger-ui` - Interactive Swagger UI documentation
#[derive(OpenApi)]
#[openapi(
    info(
        title = "artwork-table API",
        version = "0.1.0",
        description = "Paged, selectable table over a remote artwork collection",
        license(
            name = "MIT OR Apache-2.0"
        )
    ),
    servers(
        (url = "http://localhost:6789/api/v1", description = "Local development server")
    ),
    paths(
        // Table
        crate::api::routes::get_table,
        crate::api::routes::load_page,

        // Selection
        crate::api::routes::list_selection,
        crate::api::routes::toggle_row,
        crate::api::routes::deselect_row,
        crate::api::routes::select_page,
        crate::api::routes::deselect_page,
        crate::api::routes::clear_selection,
        crate::api::routes::select_first,

        // System
        crate::api::routes::health_check,
        crate::api::routes::openapi_spec,
        crate::api::routes::event_stream,
    ),
    components(schemas(
        // Core types from types.rs
        crate::types::ArtworkId,
        crate::types::Artwork,
        crate::types::Pagination,
        crate::types::ArtworkPage,
        crate::types::LoadState,
        crate::types::StopReason,
        crate::types::AccumulationReport,
        crate::types::TableView,
        crate::types::Event,

        // Config types from config.rs
        crate::config::Config,
        crate::config::SourceConfig,
        crate::config::TableConfig,
        crate::config::SelectionConfig,
        crate::config::ServerIntegrationConfig,
        crate::config::ApiConfig,

        // API request/response types from routes
        crate::api::routes::PageRequest,
        crate::api::routes::SelectFirstRequest,
        crate::api::routes::SelectionResponse,
        crate::api::routes::SelectionChangeResponse,
        crate::api::routes::ToggleResponse,

        // Error types from error.rs
        crate::error::ApiError,
        crate::error::ErrorDetail,
    )),
    tags(
        (name = "table", description = "Paged table - Current view and page navigation"),
        (name = "selection", description = "Selection - Toggle rows, select pages, select the first N rows across pages"),
        (name = "system", description = "System endpoints - Health checks, OpenAPI spec, events"),
    )
)]
pub struct ApiDoc;
