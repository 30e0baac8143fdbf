//! Dataset loading and the in-memory query engine

pub mod in_memory;
pub mod loader;

pub use in_memory::EmployeeDirectory;
pub use loader::{Dataset, load, load_async, parse};
