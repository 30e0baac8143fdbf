//! Employee record and the distinct-value lists derived from it

use chrono::{DateTime, NaiveDate, NaiveDateTime};
use serde::{Serialize, Serializer};

/// A single employee, as loaded from one line of the source file
///
/// Employees are immutable once loaded. `full_name` is derived at load time
/// from the last and first names and is never set independently.
///
/// Dates are Unix epoch seconds and `salary` is a plain number. Both are
/// `f64` so that a malformed source value is carried as NaN instead of
/// aborting the load or being replaced by a made-up default. They serialize
/// as integers when whole and as `null` when NaN.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Employee {
    pub id: String,
    pub gender: String,
    pub full_name: String,
    #[serde(serialize_with = "serialize_number")]
    pub birth_date: f64,
    #[serde(serialize_with = "serialize_number")]
    pub start_date: f64,
    pub country: String,
    pub office: String,
    pub department: String,
    pub job_title: String,
    #[serde(serialize_with = "serialize_number")]
    pub salary: f64,
}

/// Source fields of an employee, before derivation
#[derive(Debug, Clone, Default)]
pub struct EmployeeProps<'a> {
    pub id: &'a str,
    pub gender: &'a str,
    pub first_name: &'a str,
    pub last_name: &'a str,
    pub birth_date: &'a str,
    pub start_date: &'a str,
    pub country: &'a str,
    pub office: &'a str,
    pub department: &'a str,
    pub job_title: &'a str,
    pub salary: &'a str,
}

impl Employee {
    /// Build an employee from its raw source fields
    ///
    /// Dates and salary are parsed here; unparsable values become NaN.
    pub fn from_props(props: EmployeeProps<'_>) -> Self {
        Self {
            id: props.id.to_string(),
            gender: props.gender.to_string(),
            full_name: format!("{} {}", props.last_name, props.first_name),
            birth_date: parse_epoch(props.birth_date).unwrap_or(f64::NAN),
            start_date: parse_epoch(props.start_date).unwrap_or(f64::NAN),
            country: props.country.to_string(),
            office: props.office.to_string(),
            department: props.department.to_string(),
            job_title: props.job_title.to_string(),
            salary: parse_number(props.salary).unwrap_or(f64::NAN),
        }
    }
}

/// Distinct values used to populate client-side filter choices
///
/// Every list is sorted ascending. These lists are informational only: they
/// are never used to validate incoming filter values.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct FilterProps {
    pub job_titles: Vec<String>,
    pub offices: Vec<String>,
    pub countries: Vec<String>,
    pub departments: Vec<String>,
}

/// Parse a date string into Unix epoch seconds
///
/// Accepts `YYYY-MM-DD` (UTC midnight), RFC 3339 timestamps and naive
/// `YYYY-MM-DDTHH:MM:SS` timestamps (read as UTC). Returns `None` for
/// anything else.
pub fn parse_epoch(input: &str) -> Option<f64> {
    let input = input.trim();
    if input.is_empty() {
        return None;
    }

    let millis = if let Ok(date) = NaiveDate::parse_from_str(input, "%Y-%m-%d") {
        date.and_hms_opt(0, 0, 0)?.and_utc().timestamp_millis()
    } else if let Ok(datetime) = DateTime::parse_from_rfc3339(input) {
        datetime.timestamp_millis()
    } else if let Ok(datetime) = NaiveDateTime::parse_from_str(input, "%Y-%m-%dT%H:%M:%S") {
        datetime.and_utc().timestamp_millis()
    } else {
        return None;
    };

    Some((millis / 1_000) as f64)
}

/// Parse a numeric string, rejecting empty input and NaN
pub fn parse_number(input: &str) -> Option<f64> {
    input
        .trim()
        .parse::<f64>()
        .ok()
        .filter(|value| !value.is_nan())
}

/// Serialize a whole number as an integer, NaN as `null`, anything else as
/// a float
pub fn serialize_number<S>(value: &f64, serializer: S) -> Result<S::Ok, S::Error>
where
    S: Serializer,
{
    const MAX_EXACT: f64 = 9_007_199_254_740_992.0;

    if value.is_nan() {
        serializer.serialize_none()
    } else if value.fract() == 0.0 && value.abs() <= MAX_EXACT {
        serializer.serialize_i64(*value as i64)
    } else {
        serializer.serialize_f64(*value)
    }
}
