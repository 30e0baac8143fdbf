//! Record loader for the `;`-delimited employee file
//!
//! One employee per line, 11 fields in a fixed order:
//!
//! ```text
//! id;gender;firstName;lastName;birthDate;startDate;country;office;department;jobTitle;salary
//! ```

use crate::core::employee::{Employee, EmployeeProps, FilterProps};
use crate::core::error::LoadError;
use std::collections::BTreeSet;
use std::path::Path;

/// Number of fields on every line of the source file
pub const FIELD_COUNT: usize = 11;

const DELIMITER: char = ';';

/// Employees in file order, plus the filter choices derived from them
#[derive(Debug, Clone, Default)]
pub struct Dataset {
    pub employees: Vec<Employee>,
    pub filter_props: FilterProps,
}

/// Load the dataset at `path`
///
/// A file that cannot be read or parsed is logged and yields an empty
/// dataset, so the service still starts and answers with zero results.
pub fn load(path: impl AsRef<Path>) -> Dataset {
    let path = path.as_ref();
    let result = std::fs::read_to_string(path)
        .map_err(|source| LoadError::Io {
            path: path.to_path_buf(),
            source,
        })
        .and_then(|text| parse(&text));
    finish(path, result)
}

/// Async variant of [`load`] used by the startup phase
pub async fn load_async(path: impl AsRef<Path>) -> Dataset {
    let path = path.as_ref();
    let result = tokio::fs::read_to_string(path)
        .await
        .map_err(|source| LoadError::Io {
            path: path.to_path_buf(),
            source,
        })
        .and_then(|text| parse(&text));
    finish(path, result)
}

fn finish(path: &Path, result: Result<Dataset, LoadError>) -> Dataset {
    match result {
        Ok(dataset) => {
            tracing::info!(
                path = %path.display(),
                employees = dataset.employees.len(),
                "Employee dataset loaded"
            );
            dataset
        }
        Err(e) => {
            tracing::error!(path = %path.display(), error = %e, "Failed to load employee dataset");
            Dataset::default()
        }
    }
}

/// Parse the whole file content
///
/// Trailing whitespace is trimmed first; every remaining line must have
/// exactly [`FIELD_COUNT`] fields. Malformed dates and salaries do not fail
/// the parse, they become NaN on the affected record.
pub fn parse(text: &str) -> Result<Dataset, LoadError> {
    let text = text.trim_end();
    if text.is_empty() {
        return Ok(Dataset::default());
    }

    let mut employees = Vec::new();
    let mut countries = BTreeSet::new();
    let mut offices = BTreeSet::new();
    let mut departments = BTreeSet::new();
    let mut job_titles = BTreeSet::new();

    for (index, line) in text.lines().enumerate() {
        let fields: Vec<&str> = line.split(DELIMITER).collect();
        let [
            id,
            gender,
            first_name,
            last_name,
            birth_date,
            start_date,
            country,
            office,
            department,
            job_title,
            salary,
        ] = fields[..]
        else {
            return Err(LoadError::MalformedLine {
                line: index + 1,
                fields: fields.len(),
            });
        };

        countries.insert(country);
        offices.insert(office);
        departments.insert(department);
        job_titles.insert(job_title);

        employees.push(Employee::from_props(EmployeeProps {
            id,
            gender,
            first_name,
            last_name,
            birth_date,
            start_date,
            country,
            office,
            department,
            job_title,
            salary,
        }));
    }

    Ok(Dataset {
        employees,
        filter_props: FilterProps {
            job_titles: into_sorted(job_titles),
            offices: into_sorted(offices),
            countries: into_sorted(countries),
            departments: into_sorted(departments),
        },
    })
}

fn into_sorted(values: BTreeSet<&str>) -> Vec<String> {
    values.into_iter().map(str::to_string).collect()
}
