//! Search API endpoints.

use axum::{
    extract::{rejection::QueryRejection, Query, State},
    Json,
};

use super::ApiResult;
use crate::errors::AppError;
use crate::models::{Employee, EmployeeSearch};
use crate::AppState;

/// GET /employees/search - Filter employees by name and/or department fragment.
pub async fn search_employees(
    State(state): State<AppState>,
    params: Result<Query<EmployeeSearch>, QueryRejection>,
) -> ApiResult<Json<Vec<Employee>>> {
    let Query(params) = params?;

    tracing::debug!(
        name = ?params.name(),
        department = ?params.department(),
        "Searching employees"
    );

    let employees = state
        .repo
        .search_employees(params.name(), params.department())
        .await?;
    Ok(Json(employees))
}

/// PUT/DELETE /employees/search - `search` never names a stored employee.
pub async fn search_is_not_an_employee() -> AppError {
    AppError::employee_not_found()
}
