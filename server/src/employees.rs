//! Handlers for `/api/employees`.
//!
//! Each handler maps one HTTP verb onto one statement in `platform_db`.
//! Update and delete look the row up first so a missing id is reported as
//! not-found before anything is validated or written.

use anyhow::Context;
use axum::{
    Json,
    extract::{Path, State, rejection::JsonRejection, rejection::PathRejection},
    http::StatusCode,
};
use platform_api::{ApiError, ApiResult};
use products_hr::{DeleteReceipt, Employee, EmployeeDraft};
use tracing::{info, instrument};

use crate::http::AppState;

type Draft = Result<Json<EmployeeDraft>, JsonRejection>;

fn read_draft(payload: Draft) -> ApiResult<EmployeeDraft> {
    payload.map(|Json(draft)| draft).map_err(|rejection| {
        ApiError::invalid(format!("Invalid request body: {}", rejection.body_text()))
    })
}

// An id that does not parse as an integer cannot name any row.
fn read_id(id: Result<Path<i32>, PathRejection>) -> ApiResult<i32> {
    id.map(|Path(id)| id).map_err(|_| ApiError::NotFound)
}

async fn ensure_exists(state: &AppState, id: i32) -> ApiResult<()> {
    let exists = platform_db::employee_exists(state.db(), id)
        .await
        .with_context(|| format!("failed to look up employee {id}"))?;
    if exists { Ok(()) } else { Err(ApiError::NotFound) }
}

#[instrument(name = "employees.list", skip_all)]
pub async fn list_employees(State(state): State<AppState>) -> ApiResult<Json<Vec<Employee>>> {
    let employees = platform_db::list_employees(state.db())
        .await
        .context("failed to fetch employees")?;
    Ok(Json(employees))
}

#[instrument(name = "employees.create", skip_all)]
pub async fn create_employee(
    State(state): State<AppState>,
    payload: Draft,
) -> ApiResult<(StatusCode, Json<Employee>)> {
    let fields = read_draft(payload)?.validate()?;
    let employee = platform_db::insert_employee(state.db(), fields)
        .await
        .context("failed to create employee")?;
    info!(id = employee.id, "employee created");
    Ok((StatusCode::CREATED, Json(employee)))
}

#[instrument(name = "employees.update", skip_all)]
pub async fn update_employee(
    State(state): State<AppState>,
    id: Result<Path<i32>, PathRejection>,
    payload: Draft,
) -> ApiResult<Json<Employee>> {
    let id = read_id(id)?;
    ensure_exists(&state, id).await?;
    let fields = read_draft(payload)?.validate()?;
    let employee = platform_db::update_employee(state.db(), id, fields)
        .await
        .with_context(|| format!("failed to update employee {id}"))?
        .ok_or(ApiError::NotFound)?;
    info!(id, "employee updated");
    Ok(Json(employee))
}

#[instrument(name = "employees.delete", skip_all)]
pub async fn delete_employee(
    State(state): State<AppState>,
    id: Result<Path<i32>, PathRejection>,
) -> ApiResult<Json<DeleteReceipt>> {
    let id = read_id(id)?;
    ensure_exists(&state, id).await?;
    let removed = platform_db::delete_employee(state.db(), id)
        .await
        .with_context(|| format!("failed to delete employee {id}"))?;
    if !removed {
        return Err(ApiError::NotFound);
    }
    info!(id, "employee deleted");
    Ok(Json(DeleteReceipt::default()))
}
