//! Employee API endpoints.

use axum::{
    extract::{rejection::JsonRejection, Path, State},
    http::StatusCode,
    Json,
};

use super::ApiResult;
use crate::errors::{AppError, MessageResponse};
use crate::models::validation::{validate_changes, validate_new_employee};
use crate::models::{Employee, EmployeeInput};
use crate::AppState;

/// GET /employees - List all employees.
pub async fn list_employees(State(state): State<AppState>) -> ApiResult<Json<Vec<Employee>>> {
    let employees = state.repo.list_employees().await?;
    Ok(Json(employees))
}

/// GET /employees/{id} - Get a single employee.
pub async fn get_employee(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> ApiResult<Json<Employee>> {
    match state.repo.get_employee(&id).await? {
        Some(employee) => Ok(Json(employee)),
        None => Err(AppError::employee_not_found()),
    }
}

/// POST /employees - Create a new employee.
pub async fn create_employee(
    State(state): State<AppState>,
    payload: Result<Json<EmployeeInput>, JsonRejection>,
) -> ApiResult<(StatusCode, Json<Employee>)> {
    let Json(input) = payload?;
    let employee = validate_new_employee(&input)?;

    let created = state.repo.create_employee(&employee).await?;
    Ok((StatusCode::CREATED, Json(created)))
}

/// PUT /employees/{id} - Update the supplied fields of an employee.
pub async fn update_employee(
    State(state): State<AppState>,
    Path(id): Path<String>,
    payload: Result<Json<EmployeeInput>, JsonRejection>,
) -> ApiResult<Json<Employee>> {
    let Json(input) = payload?;
    let changes = validate_changes(&input)?;

    let updated = state.repo.update_employee(&id, &changes).await?;
    Ok(Json(updated))
}

/// DELETE /employees/{id} - Delete an employee.
pub async fn delete_employee(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> ApiResult<Json<MessageResponse>> {
    state.repo.delete_employee(&id).await?;
    Ok(Json(MessageResponse::new("Employee deleted successfully")))
}
