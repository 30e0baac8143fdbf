//! Server module exposing the directory over HTTP
//!
//! This module provides a `ServerBuilder` that loads the dataset and then
//! registers:
//! - The employee listing, export and filter-prop routes
//! - Health check routes
//! - An optional static file fallback for the UI

pub mod builder;
pub mod handlers;
pub mod router;

pub use builder::ServerBuilder;
pub use handlers::AppState;
pub use router::{build_api_routes, build_router};
