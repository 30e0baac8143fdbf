//! # Employee Directory
//!
//! An in-memory employee directory loaded from a flat file and queried with
//! ordering, filtering and pagination.
//!
//! ## Features
//!
//! - **Flat-file Loader**: `;`-delimited records parsed once at startup, with
//!   graceful degradation to an empty dataset on failure
//! - **Query Engine**: typed ordering keys, composable filters and 1-indexed
//!   pagination with a filtered total
//! - **Sort Cache**: the last ordering is reused until a different key or
//!   direction is requested
//! - **Export**: unpaginated query results as a CSV attachment
//! - **REST API**: axum router with CORS, tracing and optional static UI
//!
//! ## Quick Start
//!
//! ```rust,ignore
//! use directory::prelude::*;
//!
//! let dataset = load("data/employees.db.txt");
//! let directory = EmployeeDirectory::from_dataset(dataset);
//!
//! let filters = [FilterSpec::new(FilterKey::StartDate).with_to("2010-01-01")];
//! let page = directory.get_employees(OrderBy::StartDate, SortMode::Asc, 1, 20, Some(&filters));
//! println!("{} matching employees", page.count);
//! ```

pub mod config;
pub mod core;
pub mod export;
pub mod server;
pub mod storage;

/// Re-exports of commonly used types and functions
pub mod prelude {
    // === Core Types ===
    pub use crate::core::{
        employee::{Employee, EmployeeProps, FilterProps},
        error::{DirectoryError, ExportError, LoadError, RequestError},
        filter::{FilterKey, FilterSpec},
        query::{EmployeePage, OrderBy, QueryParams, SortMode},
    };

    // === Storage ===
    pub use crate::storage::{Dataset, EmployeeDirectory, load, load_async, parse};

    // === Export ===
    pub use crate::export::{ExportFormat, ExportRow, export_employees, to_csv, to_xlsx};

    // === Config ===
    pub use crate::config::{DataConfig, DirectoryConfig, QueryConfig, ServerConfig};

    // === Server ===
    pub use crate::server::{AppState, ServerBuilder, build_router};

    // === External dependencies ===
    pub use anyhow::Result;
}
