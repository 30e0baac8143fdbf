//! In-memory query engine over the loaded employee collection

use crate::core::employee::{Employee, FilterProps};
use crate::core::filter::{FilterSpec, apply_filters};
use crate::core::query::{EmployeePage, OrderBy, PageBounds, SortMode};
use crate::storage::loader::Dataset;
use chrono::Utc;
use std::cmp::{Ordering, Reverse};
use std::sync::{Arc, RwLock};

/// Last sort result, kept together with the key that produced it
#[derive(Debug, Clone)]
struct CachedSort {
    order_by: OrderBy,
    sort_mode: SortMode,
    employees: Arc<[Employee]>,
}

/// Employee directory serving ordered, filtered and paginated views
///
/// The canonical collection is read-only after construction. The last sorted
/// copy is kept in a single-slot cache: a query with the same
/// `(order_by, sort_mode)` reuses it, any other key replaces it. The key and
/// the sorted copy are swapped together under a write lock so concurrent
/// readers never observe a key paired with another key's ordering.
#[derive(Debug)]
pub struct EmployeeDirectory {
    employees: Arc<[Employee]>,
    filter_props: FilterProps,
    sort_cache: RwLock<Option<CachedSort>>,
}

impl EmployeeDirectory {
    /// Create a directory over `employees`, deriving no filter props
    pub fn new(employees: Vec<Employee>) -> Self {
        Self {
            employees: employees.into(),
            filter_props: FilterProps::default(),
            sort_cache: RwLock::new(None),
        }
    }

    /// Create a directory from a loaded dataset
    pub fn from_dataset(dataset: Dataset) -> Self {
        Self {
            employees: dataset.employees.into(),
            filter_props: dataset.filter_props,
            sort_cache: RwLock::new(None),
        }
    }

    /// Number of employees in the canonical collection
    pub fn len(&self) -> usize {
        self.employees.len()
    }

    pub fn is_empty(&self) -> bool {
        self.employees.is_empty()
    }

    /// Distinct values for client-side filter choices
    pub fn filter_props(&self) -> &FilterProps {
        &self.filter_props
    }

    /// Sorted copy of the whole collection
    ///
    /// Returns the cached copy when the key matches the last sort; the
    /// returned `Arc` is then the same allocation as the previous call.
    pub fn sort_employees(&self, order_by: OrderBy, sort_mode: SortMode) -> Arc<[Employee]> {
        {
            let cache = self.sort_cache.read().unwrap_or_else(|e| e.into_inner());
            let hit = cache
                .as_ref()
                .filter(|cached| cached.order_by == order_by && cached.sort_mode == sort_mode);
            if let Some(cached) = hit {
                tracing::debug!(
                    order_by = order_by.as_str(),
                    sort_mode = sort_mode.as_str(),
                    "Sort cache hit"
                );
                return cached.employees.clone();
            }
        }

        tracing::debug!(
            order_by = order_by.as_str(),
            sort_mode = sort_mode.as_str(),
            employees = self.employees.len(),
            "Sort cache miss"
        );

        let mut sorted = self.employees.to_vec();
        sort_in_place(&mut sorted, order_by, sort_mode);
        let sorted: Arc<[Employee]> = sorted.into();

        let mut cache = self.sort_cache.write().unwrap_or_else(|e| e.into_inner());
        *cache = Some(CachedSort {
            order_by,
            sort_mode,
            employees: sorted.clone(),
        });
        sorted
    }

    /// Ordered, filtered employees, one page at a time
    ///
    /// `count` is the number of employees passing `filters`, before
    /// pagination. `data` holds the `[(page - 1) * limit, page * limit)`
    /// slice of that set, empty when the page starts past the end.
    pub fn get_employees(
        &self,
        order_by: OrderBy,
        sort_mode: SortMode,
        page: usize,
        limit: usize,
        filters: Option<&[FilterSpec]>,
    ) -> EmployeePage {
        let sorted = self.sort_employees(order_by, sort_mode);
        let bounds = PageBounds::new(page, limit);

        let (count, data) = match filters {
            None => (sorted.len(), bounds.slice(&sorted).to_vec()),
            Some(filters) => {
                let filtered = apply_filters(&sorted, filters, now_epoch());
                let data = bounds
                    .slice(&filtered)
                    .iter()
                    .map(|employee| (*employee).clone())
                    .collect();
                (filtered.len(), data)
            }
        };

        tracing::debug!(count, page, limit, returned = data.len(), "Employees queried");

        EmployeePage { count, data }
    }

    /// Ordered, filtered employees without pagination
    pub fn query_all(
        &self,
        order_by: OrderBy,
        sort_mode: SortMode,
        filters: Option<&[FilterSpec]>,
    ) -> Vec<Employee> {
        let sorted = self.sort_employees(order_by, sort_mode);
        match filters {
            None => sorted.to_vec(),
            Some(filters) => apply_filters(&sorted, filters, now_epoch())
                .into_iter()
                .cloned()
                .collect(),
        }
    }
}

fn now_epoch() -> f64 {
    Utc::now().timestamp() as f64
}

/// Sort by the requested field, breaking ties on `id`
///
/// Text fields compare case-insensitively. Numbers compare by value in the
/// requested direction, with NaN placed after every number in both
/// directions.
fn sort_in_place(employees: &mut [Employee], order_by: OrderBy, sort_mode: SortMode) {
    match order_by {
        OrderBy::FullName | OrderBy::Office | OrderBy::JobTitle => {
            let text = |employee: &Employee| {
                let value = match order_by {
                    OrderBy::Office => &employee.office,
                    OrderBy::JobTitle => &employee.job_title,
                    _ => &employee.full_name,
                };
                (value.to_lowercase(), employee.id.clone())
            };
            match sort_mode {
                SortMode::Asc => employees.sort_by_cached_key(text),
                SortMode::Desc => employees.sort_by_cached_key(|e| Reverse(text(e))),
            }
        }
        OrderBy::BirthDate | OrderBy::StartDate | OrderBy::Salary => {
            let number = |employee: &Employee| match order_by {
                OrderBy::BirthDate => employee.birth_date,
                OrderBy::StartDate => employee.start_date,
                _ => employee.salary,
            };
            employees.sort_by(|a, b| {
                let ordering = compare_numbers(number(a), number(b), sort_mode);
                match sort_mode {
                    SortMode::Asc => ordering.then_with(|| a.id.cmp(&b.id)),
                    SortMode::Desc => ordering.then_with(|| b.id.cmp(&a.id)),
                }
            });
        }
    }
}

fn compare_numbers(a: f64, b: f64, sort_mode: SortMode) -> Ordering {
    match (a.is_nan(), b.is_nan()) {
        (true, true) => Ordering::Equal,
        (true, false) => Ordering::Greater,
        (false, true) => Ordering::Less,
        (false, false) => match sort_mode {
            SortMode::Asc => a.total_cmp(&b),
            SortMode::Desc => b.total_cmp(&a),
        },
    }
}
