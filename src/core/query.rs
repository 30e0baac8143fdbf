//! Ordering keys, query parameters and pagination utilities

use crate::core::employee::Employee;
use crate::core::error::RequestError;
use crate::core::filter::FilterSpec;
use serde::{Deserialize, Serialize};

/// Field used to order employees
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum OrderBy {
    #[default]
    FullName,
    BirthDate,
    StartDate,
    Office,
    JobTitle,
    Salary,
}

impl OrderBy {
    pub const ALL: [OrderBy; 6] = [
        OrderBy::FullName,
        OrderBy::BirthDate,
        OrderBy::StartDate,
        OrderBy::Office,
        OrderBy::JobTitle,
        OrderBy::Salary,
    ];

    /// Parse the wire name of an ordering key (`fullName`, `salary`, ...)
    pub fn parse(name: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|key| key.as_str() == name)
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            OrderBy::FullName => "fullName",
            OrderBy::BirthDate => "birthDate",
            OrderBy::StartDate => "startDate",
            OrderBy::Office => "office",
            OrderBy::JobTitle => "jobTitle",
            OrderBy::Salary => "salary",
        }
    }
}

/// Sort direction
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SortMode {
    #[default]
    Asc,
    Desc,
}

impl SortMode {
    pub fn parse(name: &str) -> Option<Self> {
        match name {
            "asc" => Some(SortMode::Asc),
            "desc" => Some(SortMode::Desc),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            SortMode::Asc => "asc",
            SortMode::Desc => "desc",
        }
    }
}

/// Raw query-string parameters of the listing and export endpoints
///
/// Every field is kept as an untyped string so that invalid values fall back
/// to defaults instead of rejecting the request.
///
/// # Example
/// ```text
/// GET /api/v1/employees?orderedBy=salary&sort=desc&page=2&limit=50
/// GET /api/v1/employees?filters=[{"key":"startDate","to":"2010-01-01"}]
/// ```
#[derive(Debug, Clone, Deserialize, Default)]
#[serde(default)]
pub struct QueryParams {
    /// Ordering key, defaults to `fullName`
    #[serde(rename = "orderedBy")]
    pub ordered_by: Option<String>,

    /// Sort direction, defaults to `asc`
    #[serde(rename = "sortMode")]
    pub sort_mode: Option<String>,

    /// Short alias of `sortMode`
    pub sort: Option<String>,

    /// Page number (starts at 1)
    pub page: Option<String>,

    /// Number of items per page
    pub limit: Option<String>,

    /// Filters as a JSON array of `{key, value, from, to}` objects
    pub filters: Option<String>,

    /// Export file format (`xlsx` or `csv`), ignored by the listing
    pub format: Option<String>,
}

impl QueryParams {
    /// Ordering key, falling back to `fullName` for absent or unknown names
    pub fn order_by(&self) -> OrderBy {
        self.ordered_by
            .as_deref()
            .and_then(OrderBy::parse)
            .unwrap_or_default()
    }

    /// Sort direction from `sortMode` or its `sort` alias, defaulting to `asc`
    pub fn sort_mode(&self) -> SortMode {
        self.sort_mode
            .as_deref()
            .or(self.sort.as_deref())
            .and_then(SortMode::parse)
            .unwrap_or_default()
    }

    /// Get page number, ensuring minimum of 1
    pub fn page(&self) -> usize {
        parse_positive(self.page.as_deref()).unwrap_or(1)
    }

    /// Get limit, falling back to `default_limit` and capped at `max_limit`
    pub fn limit(&self, default_limit: usize, max_limit: usize) -> usize {
        parse_positive(self.limit.as_deref())
            .unwrap_or(default_limit)
            .clamp(1, max_limit.max(1))
    }

    /// Parse the `filters` JSON array
    ///
    /// An absent or blank parameter means "no filters". Malformed JSON is a
    /// request error.
    pub fn filters(&self) -> Result<Option<Vec<FilterSpec>>, RequestError> {
        let Some(raw) = self.filters.as_deref().filter(|raw| !raw.trim().is_empty()) else {
            return Ok(None);
        };

        serde_json::from_str(raw)
            .map(Some)
            .map_err(|e| RequestError::InvalidFilters {
                message: e.to_string(),
            })
    }
}

/// Parse a positive integer, treating zero, negatives and garbage as absent
fn parse_positive(raw: Option<&str>) -> Option<usize> {
    let value = raw?.trim().parse::<f64>().ok()?;
    if value.is_finite() && value >= 1.0 {
        Some(value.trunc() as usize)
    } else {
        None
    }
}

/// Half-open slice bounds of a 1-indexed page
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageBounds {
    pub start: usize,
    pub end: usize,
}

impl PageBounds {
    /// `start = (page - 1) * limit`, `end = page * limit`
    ///
    /// A zero page or limit is read as 1.
    pub fn new(page: usize, limit: usize) -> Self {
        let page = page.max(1);
        let limit = limit.max(1);
        Self {
            start: (page - 1).saturating_mul(limit),
            end: page.saturating_mul(limit),
        }
    }

    /// Slice `items` to this page; a start past the end yields an empty slice
    pub fn slice<'a, T>(&self, items: &'a [T]) -> &'a [T] {
        let start = self.start.min(items.len());
        let end = self.end.min(items.len());
        &items[start..end]
    }
}

/// One page of employees plus the filtered total
#[derive(Debug, Clone, Default, Serialize)]
pub struct EmployeePage {
    /// Number of employees matching the filters, before pagination
    pub count: usize,

    /// The employees of the requested page
    pub data: Vec<Employee>,
}

impl EmployeePage {
    /// Total number of pages for the given page size
    pub fn total_pages(&self, limit: usize) -> usize {
        if self.count == 0 {
            0
        } else {
            self.count.div_ceil(limit.max(1))
        }
    }
}
