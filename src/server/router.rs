//! Router builder for the directory API

use crate::server::handlers::{
    AppState, api_version, export_employees, filter_props, health_check, list_employees,
};
use axum::{Router, routing::get};
use std::path::Path;
use tower_http::cors::CorsLayer;
use tower_http::services::ServeDir;
use tower_http::trace::TraceLayer;

/// Build the API routes
///
/// - GET /api/v1 - API version
/// - GET /api/v1/employees - Ordered, filtered, paginated employees
/// - GET /api/v1/employees/export - Same query as a CSV attachment
/// - GET /api/v1/employeesFilterProps - Distinct values for filter choices
/// - GET /health, /healthz - Health check
pub fn build_api_routes(state: AppState) -> Router {
    Router::new()
        .route("/api/v1", get(api_version))
        .route("/api/v1/employees", get(list_employees))
        .route("/api/v1/employees/export", get(export_employees))
        .route("/api/v1/employeesFilterProps", get(filter_props))
        .route("/health", get(health_check))
        .route("/healthz", get(health_check))
        .with_state(state)
}

/// Build the complete application router
///
/// When `static_dir` is set, unmatched paths are served from it, with
/// `index.html` answering directory requests such as `/`.
pub fn build_router(state: AppState, static_dir: Option<&Path>) -> Router {
    let mut app = build_api_routes(state);

    if let Some(dir) = static_dir {
        app = app.fallback_service(ServeDir::new(dir));
    }

    app.layer(CorsLayer::permissive())
        .layer(TraceLayer::new_for_http())
}
