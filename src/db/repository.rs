//! Database repository for employee CRUD and search.
//!
//! Each operation is a single statement against the store.

use chrono::{DateTime, Utc};
use sqlx::sqlite::SqliteRow;
use sqlx::{Row, SqlitePool};

use crate::errors::AppError;
use crate::models::{Employee, EmployeeChanges, EmployeeStatus, EmploymentType, NewEmployee};

const EMPLOYEE_COLUMNS: &str = "id, full_name, email, phone_number, department, designation, \
     salary, date_of_joining, employment_type, status, created_at, updated_at";

/// Database repository for employee records.
#[derive(Clone)]
pub struct Repository {
    pool: SqlitePool,
}

impl Repository {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    /// List all employees in insertion order.
    pub async fn list_employees(&self) -> Result<Vec<Employee>, AppError> {
        let rows = sqlx::query(&format!(
            "SELECT {} FROM employees ORDER BY rowid",
            EMPLOYEE_COLUMNS
        ))
        .fetch_all(&self.pool)
        .await?;

        Ok(rows
            .iter()
            .map(employee_from_row)
            .collect::<Result<_, _>>()?)
    }

    /// Get an employee by ID.
    pub async fn get_employee(&self, id: &str) -> Result<Option<Employee>, AppError> {
        let row = sqlx::query(&format!(
            "SELECT {} FROM employees WHERE id = ?",
            EMPLOYEE_COLUMNS
        ))
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(row.as_ref().map(employee_from_row).transpose()?)
    }

    /// Create a new employee. The store assigns the ID and timestamps.
    pub async fn create_employee(&self, employee: &NewEmployee) -> Result<Employee, AppError> {
        let id = uuid::Uuid::new_v4().to_string();
        let now = Utc::now();

        sqlx::query(
            r#"INSERT INTO employees (
                id, full_name, email, phone_number, department, designation,
                salary, date_of_joining, employment_type, status, created_at, updated_at
            ) VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?)"#,
        )
        .bind(&id)
        .bind(&employee.full_name)
        .bind(&employee.email)
        .bind(&employee.phone_number)
        .bind(&employee.department)
        .bind(&employee.designation)
        .bind(employee.salary)
        .bind(employee.date_of_joining.to_rfc3339())
        .bind(employee.employment_type.as_str())
        .bind(employee.status.as_str())
        .bind(now.to_rfc3339())
        .bind(now.to_rfc3339())
        .execute(&self.pool)
        .await
        .map_err(|e| write_error(e, Some(&employee.email)))?;

        tracing::info!("Created employee {}", id);

        Ok(Employee {
            id,
            full_name: employee.full_name.clone(),
            email: employee.email.clone(),
            phone_number: employee.phone_number.clone(),
            department: employee.department.clone(),
            designation: employee.designation.clone(),
            salary: employee.salary,
            date_of_joining: employee.date_of_joining,
            employment_type: employee.employment_type,
            status: employee.status,
            created_at: now,
            updated_at: now,
        })
    }

    /// Apply a partial update and return the stored result.
    ///
    /// Returns `NotFound` when no employee has the given ID.
    pub async fn update_employee(
        &self,
        id: &str,
        changes: &EmployeeChanges,
    ) -> Result<Employee, AppError> {
        let now = Utc::now();

        // COALESCE keeps the stored value for every field that was not supplied
        let row = sqlx::query(&format!(
            r#"UPDATE employees SET
                full_name = COALESCE(?, full_name),
                email = COALESCE(?, email),
                phone_number = COALESCE(?, phone_number),
                department = COALESCE(?, department),
                designation = COALESCE(?, designation),
                salary = COALESCE(?, salary),
                date_of_joining = COALESCE(?, date_of_joining),
                employment_type = COALESCE(?, employment_type),
                status = COALESCE(?, status),
                updated_at = ?
            WHERE id = ?
            RETURNING {}"#,
            EMPLOYEE_COLUMNS
        ))
        .bind(&changes.full_name)
        .bind(&changes.email)
        .bind(&changes.phone_number)
        .bind(&changes.department)
        .bind(&changes.designation)
        .bind(changes.salary)
        .bind(changes.date_of_joining.map(|d| d.to_rfc3339()))
        .bind(changes.employment_type.map(|t| t.as_str()))
        .bind(changes.status.map(|s| s.as_str()))
        .bind(now.to_rfc3339())
        .bind(id)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| write_error(e, changes.email.as_deref()))?;

        let row = row.ok_or_else(AppError::employee_not_found)?;
        tracing::info!("Updated employee {}", id);
        Ok(employee_from_row(&row)?)
    }

    /// Delete an employee.
    pub async fn delete_employee(&self, id: &str) -> Result<(), AppError> {
        let result = sqlx::query("DELETE FROM employees WHERE id = ?")
            .bind(id)
            .execute(&self.pool)
            .await?;

        if result.rows_affected() == 0 {
            return Err(AppError::employee_not_found());
        }

        tracing::info!("Deleted employee {}", id);
        Ok(())
    }

    /// Case-insensitive substring search on name and department.
    ///
    /// Both filters are ANDed; with neither supplied every employee matches.
    pub async fn search_employees(
        &self,
        name: Option<&str>,
        department: Option<&str>,
    ) -> Result<Vec<Employee>, AppError> {
        let employees = self.list_employees().await?;

        // Folded in Rust: SQLite's lower() leaves non-ASCII letters alone
        Ok(employees
            .into_iter()
            .filter(|e| name.is_none_or(|n| contains_folded(&e.full_name, n)))
            .filter(|e| department.is_none_or(|d| contains_folded(&e.department, d)))
            .collect())
    }
}

/// Literal, Unicode case-insensitive substring test.
fn contains_folded(haystack: &str, needle: &str) -> bool {
    haystack.to_lowercase().contains(&needle.to_lowercase())
}

/// Map a failed insert/update, naming the email when it collided.
fn write_error(err: sqlx::Error, email: Option<&str>) -> AppError {
    if let (sqlx::Error::Database(db_err), Some(email)) = (&err, email) {
        if db_err.is_unique_violation() {
            tracing::warn!("Rejected duplicate email {}", email);
            return AppError::Duplicate(format!(
                "E11000 duplicate key error: email \"{}\" already exists",
                email
            ));
        }
    }
    err.into()
}

fn employee_from_row(row: &SqliteRow) -> Result<Employee, sqlx::Error> {
    let employment_type: String = row.try_get("employment_type")?;
    let status: String = row.try_get("status")?;

    Ok(Employee {
        id: row.try_get("id")?,
        full_name: row.try_get("full_name")?,
        email: row.try_get("email")?,
        phone_number: row.try_get("phone_number")?,
        department: row.try_get("department")?,
        designation: row.try_get("designation")?,
        salary: row.try_get("salary")?,
        date_of_joining: row.try_get::<DateTime<Utc>, _>("date_of_joining")?,
        employment_type: EmploymentType::parse(&employment_type)
            .ok_or_else(|| decode_error("employment_type", &employment_type))?,
        status: EmployeeStatus::parse(&status).ok_or_else(|| decode_error("status", &status))?,
        created_at: row.try_get("created_at")?,
        updated_at: row.try_get("updated_at")?,
    })
}

fn decode_error(column: &str, value: &str) -> sqlx::Error {
    sqlx::Error::ColumnDecode {
        index: column.to_string(),
        source: format!("unexpected value {:?}", value).into(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::init_database;
    use tempfile::TempDir;

    async fn repo() -> (Repository, TempDir) {
        let temp_dir = TempDir::new().expect("Failed to create temp dir");
        let url = format!("sqlite:{}", temp_dir.path().join("repo.sqlite").display());
        let pool = init_database(&url).await.expect("Failed to init DB");
        (Repository::new(pool), temp_dir)
    }

    fn new_employee(name: &str, email: &str, department: &str) -> NewEmployee {
        NewEmployee {
            full_name: name.to_string(),
            email: email.to_string(),
            phone_number: "555-0100".to_string(),
            department: department.to_string(),
            designation: "Engineer".to_string(),
            salary: 5000.0,
            date_of_joining: crate::models::parse_date("2022-03-01").unwrap(),
            employment_type: EmploymentType::FullTime,
            status: EmployeeStatus::Active,
        }
    }

    #[tokio::test]
    async fn test_create_then_get_round_trips() {
        let (repo, _dir) = repo().await;

        let created = repo
            .create_employee(&new_employee("Anna Smith", "anna@x.com", "Sales"))
            .await
            .unwrap();
        let fetched = repo.get_employee(&created.id).await.unwrap().unwrap();

        assert_eq!(fetched, created);
    }

    #[tokio::test]
    async fn test_duplicate_email_is_rejected() {
        let (repo, _dir) = repo().await;

        repo.create_employee(&new_employee("Anna Smith", "dup@x.com", "Sales"))
            .await
            .unwrap();
        let err = repo
            .create_employee(&new_employee("Other Person", "dup@x.com", "Ops"))
            .await
            .unwrap_err();

        assert!(matches!(err, AppError::Duplicate(_)));
        assert!(err.message().contains("dup@x.com"));
        assert_eq!(repo.list_employees().await.unwrap().len(), 1);
    }

    #[tokio::test]
    async fn test_update_keeps_unsupplied_fields() {
        let (repo, _dir) = repo().await;
        let created = repo
            .create_employee(&new_employee("Anna Smith", "anna@x.com", "Sales"))
            .await
            .unwrap();

        let changes = EmployeeChanges {
            salary: Some(7500.0),
            status: Some(EmployeeStatus::Inactive),
            ..EmployeeChanges::default()
        };
        let updated = repo.update_employee(&created.id, &changes).await.unwrap();

        assert_eq!(updated.salary, 7500.0);
        assert_eq!(updated.status, EmployeeStatus::Inactive);
        assert_eq!(updated.full_name, created.full_name);
        assert_eq!(updated.email, created.email);
        assert_eq!(updated.created_at, created.created_at);
        assert!(updated.updated_at >= created.updated_at);
    }

    #[tokio::test]
    async fn test_update_missing_is_not_found() {
        let (repo, _dir) = repo().await;

        let err = repo
            .update_employee("missing", &EmployeeChanges::default())
            .await
            .unwrap_err();
        assert!(matches!(err, AppError::NotFound(_)));
    }

    #[tokio::test]
    async fn test_delete_removes_record() {
        let (repo, _dir) = repo().await;
        let created = repo
            .create_employee(&new_employee("Anna Smith", "anna@x.com", "Sales"))
            .await
            .unwrap();

        repo.delete_employee(&created.id).await.unwrap();

        assert!(repo.get_employee(&created.id).await.unwrap().is_none());
        assert!(matches!(
            repo.delete_employee(&created.id).await,
            Err(AppError::NotFound(_))
        ));
    }

    #[tokio::test]
    async fn test_search_filters_are_anded() {
        let (repo, _dir) = repo().await;
        for (name, email, dept) in [
            ("Anna Smith", "anna@x.com", "Sales"),
            ("Hannah Lee", "hannah@x.com", "Engineering"),
            ("Bob Stone", "bob@x.com", "Engineering"),
        ] {
            repo.create_employee(&new_employee(name, email, dept))
                .await
                .unwrap();
        }

        let by_name = repo.search_employees(Some("ANN"), None).await.unwrap();
        assert_eq!(by_name.len(), 2);

        let both = repo
            .search_employees(Some("ann"), Some("engin"))
            .await
            .unwrap();
        assert_eq!(both.len(), 1);
        assert_eq!(both[0].full_name, "Hannah Lee");

        let all = repo.search_employees(None, None).await.unwrap();
        assert_eq!(all.len(), 3);
    }

    #[tokio::test]
    async fn test_search_fragment_is_literal() {
        let (repo, _dir) = repo().await;
        repo.create_employee(&new_employee("Anna Smith", "anna@x.com", "Sales"))
            .await
            .unwrap();

        let results = repo.search_employees(Some("%"), None).await.unwrap();
        assert!(results.is_empty());
    }

    #[tokio::test]
    async fn test_search_folds_accented_letters() {
        let (repo, _dir) = repo().await;
        repo.create_employee(&new_employee("Élodie Durand", "elodie@x.com", "Ventes"))
            .await
            .unwrap();
        repo.create_employee(&new_employee("Eloise Marr", "eloise@x.com", "Ventes"))
            .await
            .unwrap();

        let lower = repo.search_employees(Some("élo"), None).await.unwrap();
        assert_eq!(lower.len(), 1);
        assert_eq!(lower[0].full_name, "Élodie Durand");

        let upper = repo.search_employees(Some("ÉLODIE"), None).await.unwrap();
        assert_eq!(upper.len(), 1);
    }

    #[test]
    fn test_contains_folded() {
        assert!(contains_folded("Hannah Lee", "ANN"));
        assert!(contains_folded("Ünal Öztürk", "üNAL"));
        assert!(!contains_folded("Anna Smith", "%"));
        assert!(contains_folded("anything", ""));
    }
}
