//! HTTP handlers for the directory API
//!
//! Handlers only translate query strings into engine calls: invalid or
//! missing parameters fall back to defaults, and the engine never fails on
//! bad data. The only rejected input is a `filters` value that is not valid
//! JSON.

use axum::{
    Json,
    extract::{Query, State},
    http::header,
    response::{IntoResponse, Response},
};
use serde_json::{Value, json};
use std::sync::Arc;

use crate::config::QueryConfig;
use crate::core::employee::FilterProps;
use crate::core::error::DirectoryError;
use crate::core::query::{EmployeePage, QueryParams};
use crate::export::{self, ExportFormat};
use crate::storage::EmployeeDirectory;

/// Application state shared across handlers
#[derive(Clone)]
pub struct AppState {
    pub directory: Arc<EmployeeDirectory>,
    pub query: QueryConfig,
}

/// `GET /api/v1`
pub async fn api_version() -> Json<Value> {
    Json(json!({ "result": "API version 1" }))
}

/// `GET /api/v1/employees`
///
/// Returns `{count, data}` where `count` is the filtered total and `data`
/// the requested page.
pub async fn list_employees(
    State(state): State<AppState>,
    Query(params): Query<QueryParams>,
) -> Result<Json<EmployeePage>, DirectoryError> {
    let filters = params.filters()?;
    let order_by = params.order_by();
    let sort_mode = params.sort_mode();
    let page = params.page();
    let limit = params.limit(state.query.default_limit, state.query.max_limit);

    let result = state
        .directory
        .get_employees(order_by, sort_mode, page, limit, filters.as_deref());

    tracing::debug!(
        order_by = order_by.as_str(),
        sort_mode = sort_mode.as_str(),
        page,
        limit,
        count = result.count,
        pages = result.total_pages(limit),
        "Listed employees"
    );

    Ok(Json(result))
}

/// `GET /api/v1/employees/export`
///
/// Same ordering and filters as the listing, without pagination, served as
/// an XLSX attachment (`data.xlsx`). `format=csv` serves `data.csv` instead.
pub async fn export_employees(
    State(state): State<AppState>,
    Query(params): Query<QueryParams>,
) -> Result<Response, DirectoryError> {
    let filters = params.filters()?;
    let rows = export::export_employees(
        &state.directory,
        params.order_by(),
        params.sort_mode(),
        filters.as_deref(),
    );
    let format = params
        .format
        .as_deref()
        .and_then(ExportFormat::parse)
        .unwrap_or_default();
    let body = format.encode(&rows)?;

    tracing::debug!(
        rows = rows.len(),
        bytes = body.len(),
        format = format.file_name(),
        "Exported employees"
    );

    Ok((
        [
            (header::CONTENT_TYPE, format.content_type().to_string()),
            (
                header::CONTENT_DISPOSITION,
                format!("attachment; filename=\"{}\"", format.file_name()),
            ),
            (
                header::ACCESS_CONTROL_EXPOSE_HEADERS,
                header::CONTENT_DISPOSITION.as_str().to_string(),
            ),
        ],
        body,
    )
        .into_response())
}

/// `GET /api/v1/employeesFilterProps`
pub async fn filter_props(State(state): State<AppState>) -> Json<FilterProps> {
    Json(state.directory.filter_props().clone())
}

/// `GET /health`
pub async fn health_check(State(state): State<AppState>) -> Json<Value> {
    Json(json!({
        "status": "ok",
        "service": "employee-directory",
        "employees": state.directory.len()
    }))
}
