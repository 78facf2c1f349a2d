//! Field validation for employee payloads.
//!
//! Every failing field is collected so a single response lists all problems.

use chrono::{DateTime, Utc};

use super::employee::{
    parse_date, EmployeeChanges, EmployeeInput, EmployeeStatus, EmploymentType, NewEmployee,
};
use crate::errors::AppError;

/// One rejected field.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldError {
    pub field: &'static str,
    pub message: String,
}

/// All field errors found in one payload.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ValidationErrors {
    errors: Vec<FieldError>,
}

impl ValidationErrors {
    fn push(&mut self, field: &'static str, message: impl Into<String>) {
        self.errors.push(FieldError {
            field,
            message: message.into(),
        });
    }

    pub fn is_empty(&self) -> bool {
        self.errors.is_empty()
    }

    pub fn errors(&self) -> &[FieldError] {
        &self.errors
    }

    /// Look up the message recorded for a field.
    #[cfg(test)]
    pub fn get(&self, field: &str) -> Option<&str> {
        self.errors
            .iter()
            .find(|e| e.field == field)
            .map(|e| e.message.as_str())
    }
}

impl std::fmt::Display for ValidationErrors {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Employee validation failed: ")?;
        for (i, err) in self.errors.iter().enumerate() {
            if i > 0 {
                write!(f, ", ")?;
            }
            write!(f, "{}: {}", err.field, err.message)?;
        }
        Ok(())
    }
}

impl std::error::Error for ValidationErrors {}

impl From<ValidationErrors> for AppError {
    fn from(errors: ValidationErrors) -> Self {
        tracing::debug!("Rejected {} invalid field(s)", errors.errors().len());
        AppError::Validation(errors.to_string())
    }
}

/// Validate a create payload: all fields except `status` are required.
pub fn validate_new_employee(input: &EmployeeInput) -> Result<NewEmployee, ValidationErrors> {
    let mut errors = ValidationErrors::default();

    let full_name = required(&mut errors, "fullName", input.full_name.as_deref(), check_text);
    let email = required(&mut errors, "email", input.email.as_deref(), check_text);
    let phone_number = required(&mut errors, "phoneNumber", input.phone_number.as_deref(), check_text);
    let department = required(&mut errors, "department", input.department.as_deref(), check_text);
    let designation = required(&mut errors, "designation", input.designation.as_deref(), check_text);
    let salary = required(&mut errors, "salary", input.salary.as_ref(), check_salary);
    let date_of_joining = required(
        &mut errors,
        "dateOfJoining",
        input.date_of_joining.as_deref(),
        check_date,
    );
    let employment_type = required(
        &mut errors,
        "employmentType",
        input.employment_type.as_deref(),
        check_employment_type,
    );
    let status = optional(&mut errors, "status", input.status.as_deref(), check_status);

    match (
        full_name,
        email,
        phone_number,
        department,
        designation,
        salary,
        date_of_joining,
        employment_type,
    ) {
        (
            Some(full_name),
            Some(email),
            Some(phone_number),
            Some(department),
            Some(designation),
            Some(salary),
            Some(date_of_joining),
            Some(employment_type),
        ) if errors.is_empty() => Ok(NewEmployee {
            full_name,
            email,
            phone_number,
            department,
            designation,
            salary,
            date_of_joining,
            employment_type,
            status: status.unwrap_or_default(),
        }),
        _ => Err(errors),
    }
}

/// Validate an update payload: only the supplied fields are checked.
pub fn validate_changes(input: &EmployeeInput) -> Result<EmployeeChanges, ValidationErrors> {
    let mut errors = ValidationErrors::default();

    let changes = EmployeeChanges {
        full_name: optional(&mut errors, "fullName", input.full_name.as_deref(), check_text),
        email: optional(&mut errors, "email", input.email.as_deref(), check_text),
        phone_number: optional(&mut errors, "phoneNumber", input.phone_number.as_deref(), check_text),
        department: optional(&mut errors, "department", input.department.as_deref(), check_text),
        designation: optional(&mut errors, "designation", input.designation.as_deref(), check_text),
        salary: optional(&mut errors, "salary", input.salary.as_ref(), check_salary),
        date_of_joining: optional(
            &mut errors,
            "dateOfJoining",
            input.date_of_joining.as_deref(),
            check_date,
        ),
        employment_type: optional(
            &mut errors,
            "employmentType",
            input.employment_type.as_deref(),
            check_employment_type,
        ),
        status: optional(&mut errors, "status", input.status.as_deref(), check_status),
    };

    if errors.is_empty() {
        Ok(changes)
    } else {
        Err(errors)
    }
}

fn required<T: ?Sized, U>(
    errors: &mut ValidationErrors,
    field: &'static str,
    value: Option<&T>,
    check: impl Fn(&'static str, &T) -> Result<U, String>,
) -> Option<U> {
    if value.is_none() {
        errors.push(field, format!("Path `{}` is required.", field));
        return None;
    }
    optional(errors, field, value, check)
}

fn optional<T: ?Sized, U>(
    errors: &mut ValidationErrors,
    field: &'static str,
    value: Option<&T>,
    check: impl Fn(&'static str, &T) -> Result<U, String>,
) -> Option<U> {
    let value = value?;
    match check(field, value) {
        Ok(checked) => Some(checked),
        Err(message) => {
            errors.push(field, message);
            None
        }
    }
}

fn check_text(field: &'static str, value: &str) -> Result<String, String> {
    if value.trim().is_empty() {
        Err(format!("Path `{}` is required.", field))
    } else {
        Ok(value.to_string())
    }
}

fn check_salary(_field: &'static str, value: &f64) -> Result<f64, String> {
    if !value.is_finite() {
        Err("Path `salary` must be a finite number.".to_string())
    } else if *value < 0.0 {
        Err("Salary must be positive".to_string())
    } else {
        Ok(*value)
    }
}

fn check_date(field: &'static str, value: &str) -> Result<DateTime<Utc>, String> {
    parse_date(value)
        .ok_or_else(|| format!("Cast to date failed for value \"{}\" at path \"{}\"", value, field))
}

fn check_employment_type(field: &'static str, value: &str) -> Result<EmploymentType, String> {
    EmploymentType::parse(value).ok_or_else(|| invalid_enum(field, value))
}

fn check_status(field: &'static str, value: &str) -> Result<EmployeeStatus, String> {
    EmployeeStatus::parse(value).ok_or_else(|| invalid_enum(field, value))
}

fn invalid_enum(field: &str, value: &str) -> String {
    format!("`{}` is not a valid enum value for path `{}`.", value, field)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn jane() -> EmployeeInput {
        EmployeeInput {
            full_name: Some("Jane Doe".to_string()),
            email: Some("jane@x.com".to_string()),
            phone_number: Some("123".to_string()),
            department: Some("Eng".to_string()),
            designation: Some("Dev".to_string()),
            salary: Some(1000.0),
            date_of_joining: Some("2023-01-01".to_string()),
            employment_type: Some("Full-time".to_string()),
            status: None,
        }
    }

    #[test]
    fn test_valid_input_defaults_status() {
        let employee = validate_new_employee(&jane()).unwrap();
        assert_eq!(employee.full_name, "Jane Doe");
        assert_eq!(employee.employment_type, EmploymentType::FullTime);
        assert_eq!(employee.status, EmployeeStatus::Active);
    }

    #[test]
    fn test_missing_fields_are_all_reported() {
        let input = EmployeeInput {
            email: None,
            salary: None,
            ..jane()
        };
        let errors = validate_new_employee(&input).unwrap_err();
        assert_eq!(errors.errors().len(), 2);
        assert_eq!(errors.get("email"), Some("Path `email` is required."));
        assert_eq!(errors.get("salary"), Some("Path `salary` is required."));
    }

    #[test]
    fn test_blank_name_is_rejected() {
        let input = EmployeeInput {
            full_name: Some("   ".to_string()),
            ..jane()
        };
        let errors = validate_new_employee(&input).unwrap_err();
        assert!(errors.get("fullName").is_some());
    }

    #[test]
    fn test_negative_salary_is_rejected() {
        let input = EmployeeInput {
            salary: Some(-1.0),
            ..jane()
        };
        let errors = validate_new_employee(&input).unwrap_err();
        assert_eq!(errors.get("salary"), Some("Salary must be positive"));
        assert!(errors.to_string().starts_with("Employee validation failed: salary:"));
    }

    #[test]
    fn test_null_status_falls_back_to_active() {
        let input: EmployeeInput = serde_json::from_value(serde_json::json!({
            "fullName": "Jane Doe",
            "email": "jane@x.com",
            "phoneNumber": "123",
            "department": "Eng",
            "designation": "Dev",
            "salary": 1000,
            "dateOfJoining": "2023-01-01",
            "employmentType": "Full-time",
            "status": null
        }))
        .unwrap();
        let employee = validate_new_employee(&input).unwrap();
        assert_eq!(employee.status, EmployeeStatus::Active);
    }

    #[test]
    fn test_null_in_changes_leaves_field_untouched() {
        let input: EmployeeInput =
            serde_json::from_value(serde_json::json!({ "email": null, "fullName": "X" })).unwrap();
        let changes = validate_changes(&input).unwrap();
        assert!(changes.email.is_none());
        assert_eq!(changes.full_name.as_deref(), Some("X"));
    }

    #[test]
    fn test_zero_salary_is_allowed() {
        let input = EmployeeInput {
            salary: Some(0.0),
            ..jane()
        };
        assert!(validate_new_employee(&input).is_ok());
    }

    #[test]
    fn test_invalid_enums_are_rejected() {
        let input = EmployeeInput {
            employment_type: Some("Intern".to_string()),
            status: Some("Retired".to_string()),
            ..jane()
        };
        let errors = validate_new_employee(&input).unwrap_err();
        assert_eq!(
            errors.get("employmentType"),
            Some("`Intern` is not a valid enum value for path `employmentType`.")
        );
        assert!(errors.get("status").is_some());
    }

    #[test]
    fn test_bad_date_is_rejected() {
        let input = EmployeeInput {
            date_of_joining: Some("not-a-date".to_string()),
            ..jane()
        };
        let errors = validate_new_employee(&input).unwrap_err();
        assert!(errors.get("dateOfJoining").unwrap().contains("not-a-date"));
    }

    #[test]
    fn test_changes_only_check_supplied_fields() {
        let input = EmployeeInput {
            designation: Some("Lead".to_string()),
            ..EmployeeInput::default()
        };
        let changes = validate_changes(&input).unwrap();
        assert_eq!(changes.designation.as_deref(), Some("Lead"));
        assert!(changes.full_name.is_none());
        assert!(changes.salary.is_none());
    }

    #[test]
    fn test_empty_changes_are_valid() {
        let changes = validate_changes(&EmployeeInput::default()).unwrap();
        assert_eq!(changes, EmployeeChanges::default());
    }

    #[test]
    fn test_changes_reject_invalid_values() {
        let input = EmployeeInput {
            salary: Some(-50.0),
            status: Some("Gone".to_string()),
            ..EmployeeInput::default()
        };
        let errors = validate_changes(&input).unwrap_err();
        assert_eq!(errors.errors().len(), 2);
    }

    #[test]
    fn test_validation_errors_become_bad_request() {
        let errors = validate_new_employee(&EmployeeInput::default()).unwrap_err();
        let app_error: AppError = errors.into();
        assert_eq!(app_error.status_code(), axum::http::StatusCode::BAD_REQUEST);
        assert!(app_error.message().contains("fullName"));
    }
}
