//! Filter predicates applied to the sorted employee collection

use crate::core::employee::{Employee, parse_epoch, parse_number};
use serde::{Deserialize, Deserializer};
use serde_json::Value;

/// Field a filter applies to
///
/// Any key outside the supported set, including a missing or non-string
/// key, deserializes to `Unsupported` and the corresponding filter pass keeps
/// every record.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum FilterKey {
    StartDate,
    BirthDate,
    Office,
    JobTitle,
    Salary,
    #[default]
    #[serde(other)]
    Unsupported,
}

/// One filter of a query, as sent by clients
///
/// ```json
/// {"key": "startDate", "from": "2001-01-01", "to": "2010-01-01"}
/// {"key": "office", "value": "Paris"}
/// ```
///
/// `value`, `from` and `to` accept strings or numbers. Empty strings and
/// `null` are both treated as absent.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct FilterSpec {
    #[serde(default, deserialize_with = "filter_key")]
    pub key: FilterKey,
    #[serde(default, deserialize_with = "optional_text")]
    pub value: Option<String>,
    #[serde(default, deserialize_with = "optional_text")]
    pub from: Option<String>,
    #[serde(default, deserialize_with = "optional_text")]
    pub to: Option<String>,
}

impl FilterSpec {
    pub fn new(key: FilterKey) -> Self {
        Self {
            key,
            value: None,
            from: None,
            to: None,
        }
    }

    pub fn with_value(mut self, value: impl Into<String>) -> Self {
        self.value = Some(value.into());
        self
    }

    pub fn with_from(mut self, from: impl Into<String>) -> Self {
        self.from = Some(from.into());
        self
    }

    pub fn with_to(mut self, to: impl Into<String>) -> Self {
        self.to = Some(to.into());
        self
    }

    /// Resolve this filter into a predicate
    ///
    /// `now` is the epoch (seconds) used as the default upper bound of date
    /// ranges.
    ///
    /// Only missing or unparsable bounds take the defaults. An explicit zero
    /// bound (`"0"`, `"1970-01-01"`) is kept as given and can empty the range.
    pub fn predicate(&self, now: f64) -> Predicate<'_> {
        match self.key {
            FilterKey::StartDate | FilterKey::BirthDate => {
                let field = if self.key == FilterKey::StartDate {
                    NumericField::StartDate
                } else {
                    NumericField::BirthDate
                };
                Predicate::Range {
                    field,
                    from: self.from.as_deref().and_then(parse_epoch).unwrap_or(0.0),
                    to: self.to.as_deref().and_then(parse_epoch).unwrap_or(now),
                }
            }
            FilterKey::Salary => Predicate::Range {
                field: NumericField::Salary,
                from: self.from.as_deref().and_then(parse_number).unwrap_or(0.0),
                to: self
                    .to
                    .as_deref()
                    .and_then(parse_number)
                    .unwrap_or(f64::INFINITY),
            },
            FilterKey::Office | FilterKey::JobTitle => match self.value.as_deref() {
                Some(value) => Predicate::Equals {
                    field: if self.key == FilterKey::Office {
                        TextField::Office
                    } else {
                        TextField::JobTitle
                    },
                    value,
                },
                None => Predicate::PassThrough,
            },
            FilterKey::Unsupported => Predicate::PassThrough,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NumericField {
    BirthDate,
    StartDate,
    Salary,
}

impl NumericField {
    fn get(&self, employee: &Employee) -> f64 {
        match self {
            NumericField::BirthDate => employee.birth_date,
            NumericField::StartDate => employee.start_date,
            NumericField::Salary => employee.salary,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TextField {
    Office,
    JobTitle,
}

impl TextField {
    fn get<'a>(&self, employee: &'a Employee) -> &'a str {
        match self {
            TextField::Office => &employee.office,
            TextField::JobTitle => &employee.job_title,
        }
    }
}

/// A resolved filter pass
#[derive(Debug, Clone, PartialEq)]
pub enum Predicate<'a> {
    /// Keep records with `from < value < to`
    Range { field: NumericField, from: f64, to: f64 },
    /// Keep records whose field equals `value` exactly
    Equals { field: TextField, value: &'a str },
    /// Keep everything
    PassThrough,
}

impl Predicate<'_> {
    pub fn matches(&self, employee: &Employee) -> bool {
        match self {
            Predicate::Range { field, from, to } => {
                let value = field.get(employee);
                value > *from && value < *to
            }
            Predicate::Equals { field, value } => field.get(employee) == *value,
            Predicate::PassThrough => true,
        }
    }
}

/// Apply `filters` in order, each one narrowing the result of the previous
pub fn apply_filters<'a>(
    employees: &'a [Employee],
    filters: &[FilterSpec],
    now: f64,
) -> Vec<&'a Employee> {
    let mut working: Vec<&Employee> = employees.iter().collect();
    for filter in filters {
        let predicate = filter.predicate(now);
        if predicate == Predicate::PassThrough {
            continue;
        }
        working.retain(|employee| predicate.matches(employee));
    }
    working
}

fn filter_key<'de, D>(deserializer: D) -> Result<FilterKey, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<Value>::deserialize(deserializer)?;
    Ok(match value {
        Some(key @ Value::String(_)) => FilterKey::deserialize(key).unwrap_or_default(),
        _ => FilterKey::Unsupported,
    })
}

fn optional_text<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<Value>::deserialize(deserializer)?;
    Ok(match value {
        Some(Value::String(s)) if !s.is_empty() => Some(s),
        Some(Value::Number(n)) => Some(n.to_string()),
        Some(Value::Bool(b)) => Some(b.to_string()),
        _ => None,
    })
}
