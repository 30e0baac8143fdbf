//! Core module containing the employee model, query types and errors

pub mod employee;
pub mod error;
pub mod filter;
pub mod query;

pub use employee::{Employee, EmployeeProps, FilterProps};
pub use error::{DirectoryError, ExportError, LoadError, RequestError};
pub use filter::{FilterKey, FilterSpec, Predicate, apply_filters};
pub use query::{EmployeePage, OrderBy, PageBounds, QueryParams, SortMode};
