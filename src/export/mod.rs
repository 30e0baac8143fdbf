//! Spreadsheet export of queried employees
//!
//! Exports reuse the sort and filter stages of the query engine without
//! pagination, then project each employee onto a fixed column layout. The
//! default attachment is an XLSX workbook with a single `data` sheet; CSV is
//! available on request.

use crate::core::employee::{Employee, serialize_number};
use crate::core::error::ExportError;
use crate::core::filter::FilterSpec;
use crate::core::query::{OrderBy, SortMode};
use crate::storage::EmployeeDirectory;
use rust_xlsxwriter::Workbook;
use serde::Serialize;

/// Name of the single worksheet of an XLSX export
pub const EXPORT_SHEET_NAME: &str = "data";

/// Header row of every export, in column order
pub const EXPORT_COLUMNS: [&str; 6] = [
    "fullName",
    "jobTitle",
    "office",
    "birthDate",
    "startDate",
    "salary",
];

/// Encoding of the export attachment
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ExportFormat {
    #[default]
    Xlsx,
    Csv,
}

impl ExportFormat {
    pub fn parse(name: &str) -> Option<Self> {
        match name {
            "xlsx" => Some(ExportFormat::Xlsx),
            "csv" => Some(ExportFormat::Csv),
            _ => None,
        }
    }

    /// File name offered in `Content-Disposition`
    pub fn file_name(&self) -> &'static str {
        match self {
            ExportFormat::Xlsx => "data.xlsx",
            ExportFormat::Csv => "data.csv",
        }
    }

    pub fn content_type(&self) -> &'static str {
        match self {
            ExportFormat::Xlsx => "application/vnd.ms-excel",
            ExportFormat::Csv => "text/csv; charset=utf-8",
        }
    }

    pub fn encode(&self, rows: &[ExportRow]) -> Result<Vec<u8>, ExportError> {
        match self {
            ExportFormat::Xlsx => to_xlsx(rows),
            ExportFormat::Csv => to_csv(rows),
        }
    }
}

/// One exported row; field order is the column order
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ExportRow {
    pub full_name: String,
    pub job_title: String,
    pub office: String,
    #[serde(serialize_with = "serialize_number")]
    pub birth_date: f64,
    #[serde(serialize_with = "serialize_number")]
    pub start_date: f64,
    #[serde(serialize_with = "serialize_number")]
    pub salary: f64,
}

impl From<Employee> for ExportRow {
    fn from(employee: Employee) -> Self {
        Self {
            full_name: employee.full_name,
            job_title: employee.job_title,
            office: employee.office,
            birth_date: employee.birth_date,
            start_date: employee.start_date,
            salary: employee.salary,
        }
    }
}

/// Every employee matching `filters`, ordered and projected for export
pub fn export_employees(
    directory: &EmployeeDirectory,
    order_by: OrderBy,
    sort_mode: SortMode,
    filters: Option<&[FilterSpec]>,
) -> Vec<ExportRow> {
    directory
        .query_all(order_by, sort_mode, filters)
        .into_iter()
        .map(ExportRow::from)
        .collect()
}

/// Encode rows as an XLSX workbook with a header row
///
/// Dates and salaries are numeric cells. NaN values leave the cell empty.
pub fn to_xlsx(rows: &[ExportRow]) -> Result<Vec<u8>, ExportError> {
    let mut workbook = Workbook::new();
    let worksheet = workbook.add_worksheet();
    worksheet.set_name(EXPORT_SHEET_NAME)?;

    for (col, header) in (0u16..).zip(EXPORT_COLUMNS) {
        worksheet.write_string(0, col, header)?;
    }

    for (row_num, row) in (1u32..).zip(rows) {
        worksheet.write_string(row_num, 0, row.full_name.as_str())?;
        worksheet.write_string(row_num, 1, row.job_title.as_str())?;
        worksheet.write_string(row_num, 2, row.office.as_str())?;
        for (col, value) in (3u16..).zip([row.birth_date, row.start_date, row.salary]) {
            if !value.is_nan() {
                worksheet.write_number(row_num, col, value)?;
            }
        }
    }

    Ok(workbook.save_to_buffer()?)
}

/// Encode rows as CSV with a header line
///
/// Whole-second values are written without a fractional part; NaN values
/// are written as empty cells.
pub fn to_csv(rows: &[ExportRow]) -> Result<Vec<u8>, ExportError> {
    let mut writer = csv::Writer::from_writer(Vec::new());
    writer.write_record(EXPORT_COLUMNS)?;

    for row in rows {
        writer.write_record([
            row.full_name.as_str(),
            row.job_title.as_str(),
            row.office.as_str(),
            format_number(row.birth_date).as_str(),
            format_number(row.start_date).as_str(),
            format_number(row.salary).as_str(),
        ])?;
    }

    writer
        .into_inner()
        .map_err(|e| ExportError::Buffer(e.to_string()))
}

fn format_number(value: f64) -> String {
    if value.is_nan() {
        String::new()
    } else if value.fract() == 0.0 && value.abs() < 1e15 {
        format!("{}", value as i64)
    } else {
        value.to_string()
    }
}
