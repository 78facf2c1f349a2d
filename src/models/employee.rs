//! Employee model and the request payloads that create or modify it.

use chrono::{DateTime, NaiveDate, NaiveDateTime, Utc};
use serde::{Deserialize, Serialize, Serializer};

/// Contract classification of an employee.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub enum EmploymentType {
    #[serde(rename = "Full-time")]
    FullTime,
    #[serde(rename = "Part-time")]
    PartTime,
    Contract,
}

impl EmploymentType {
    pub fn as_str(&self) -> &'static str {
        match self {
            EmploymentType::FullTime => "Full-time",
            EmploymentType::PartTime => "Part-time",
            EmploymentType::Contract => "Contract",
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "Full-time" => Some(EmploymentType::FullTime),
            "Part-time" => Some(EmploymentType::PartTime),
            "Contract" => Some(EmploymentType::Contract),
            _ => None,
        }
    }
}

/// Whether an employee is currently with the company.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
pub enum EmployeeStatus {
    #[default]
    Active,
    Inactive,
}

impl EmployeeStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            EmployeeStatus::Active => "Active",
            EmployeeStatus::Inactive => "Inactive",
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "Active" => Some(EmployeeStatus::Active),
            "Inactive" => Some(EmployeeStatus::Inactive),
            _ => None,
        }
    }
}

/// A stored employee record.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Employee {
    /// Store-assigned identifier
    #[serde(rename = "_id")]
    pub id: String,
    pub full_name: String,
    pub email: String,
    pub phone_number: String,
    pub department: String,
    pub designation: String,
    #[serde(serialize_with = "serialize_salary")]
    pub salary: f64,
    pub date_of_joining: DateTime<Utc>,
    pub employment_type: EmploymentType,
    pub status: EmployeeStatus,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Request body for both creating and updating an employee.
///
/// Every field is optional at the wire level; `validation` decides which are
/// required for the operation at hand. Enums and dates arrive as raw strings so
/// bad values surface as field errors rather than body rejections.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EmployeeInput {
    #[serde(default)]
    pub full_name: Option<String>,
    #[serde(default)]
    pub email: Option<String>,
    #[serde(default)]
    pub phone_number: Option<String>,
    #[serde(default)]
    pub department: Option<String>,
    #[serde(default)]
    pub designation: Option<String>,
    #[serde(default)]
    pub salary: Option<f64>,
    #[serde(default)]
    pub date_of_joining: Option<String>,
    #[serde(default)]
    pub employment_type: Option<String>,
    #[serde(default)]
    pub status: Option<String>,
}

/// A fully validated employee ready to be inserted.
#[derive(Debug, Clone, PartialEq)]
pub struct NewEmployee {
    pub full_name: String,
    pub email: String,
    pub phone_number: String,
    pub department: String,
    pub designation: String,
    pub salary: f64,
    pub date_of_joining: DateTime<Utc>,
    pub employment_type: EmploymentType,
    pub status: EmployeeStatus,
}

/// Validated partial update; `None` leaves the stored value untouched.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct EmployeeChanges {
    pub full_name: Option<String>,
    pub email: Option<String>,
    pub phone_number: Option<String>,
    pub department: Option<String>,
    pub designation: Option<String>,
    pub salary: Option<f64>,
    pub date_of_joining: Option<DateTime<Utc>>,
    pub employment_type: Option<EmploymentType>,
    pub status: Option<EmployeeStatus>,
}

/// Query parameters for `GET /employees/search`.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct EmployeeSearch {
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub department: Option<String>,
}

impl EmployeeSearch {
    /// Name fragment, if one was given and is non-empty.
    pub fn name(&self) -> Option<&str> {
        self.name.as_deref().filter(|s| !s.is_empty())
    }

    /// Department fragment, if one was given and is non-empty.
    pub fn department(&self) -> Option<&str> {
        self.department.as_deref().filter(|s| !s.is_empty())
    }
}

/// Whole salaries go out as JSON integers, so `1000` is echoed as `1000`.
fn serialize_salary<S: Serializer>(salary: &f64, serializer: S) -> Result<S::Ok, S::Error> {
    const EXACT_INT_LIMIT: f64 = 9_007_199_254_740_992.0;
    if salary.fract() == 0.0 && salary.abs() <= EXACT_INT_LIMIT {
        serializer.serialize_i64(*salary as i64)
    } else {
        serializer.serialize_f64(*salary)
    }
}

/// Parse a joining date given either as RFC 3339 or as a bare `YYYY-MM-DD`.
///
/// Dates without an offset are taken as UTC.
pub fn parse_date(value: &str) -> Option<DateTime<Utc>> {
    let value = value.trim();
    if let Ok(dt) = DateTime::parse_from_rfc3339(value) {
        return Some(dt.with_timezone(&Utc));
    }
    if let Ok(naive) = NaiveDateTime::parse_from_str(value, "%Y-%m-%dT%H:%M:%S%.f") {
        return Some(naive.and_utc());
    }
    NaiveDate::parse_from_str(value, "%Y-%m-%d")
        .ok()
        .and_then(|d| d.and_hms_opt(0, 0, 0))
        .map(|naive| naive.and_utc())
}
