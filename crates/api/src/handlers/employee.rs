//! Employee-only endpoints: column headers and keyed department edits.

use axum::extract::State;
use axum::Json;
use drafttrack_core::entity::EntityTable;
use drafttrack_core::error::CoreError;
use drafttrack_core::keyed::{validate_key, KeyedList};
use drafttrack_core::types::DbId;
use drafttrack_db::repositories::{EntityRepo, KeyedRepo};
use serde::Deserialize;
use serde_json::Value;

use crate::error::{AppError, AppResult};
use crate::extract::JsonBody;
use crate::response::KeyedListResponse;
use crate::state::AppState;

const DEPARTMENT: &str = "department";

/// Body of `PUT /employee/department/edit`.
#[derive(Debug, Deserialize)]
pub struct EditDepartmentRequest {
    pub id: DbId,
    pub key: String,
    pub value: Value,
}

/// Body of `DELETE /employee/department/delete`.
#[derive(Debug, Deserialize)]
pub struct DeleteDepartmentRequest {
    pub id: DbId,
    pub key: String,
}

/// GET /employee/headers
///
/// Column names in schema declaration order, for rendering dynamic forms.
pub async fn headers(State(state): State<AppState>) -> AppResult<Json<Vec<String>>> {
    let columns = EntityRepo::column_names(&state.pool, EntityTable::Employee).await?;
    Ok(Json(columns))
}

/// PUT /employee/department/edit
pub async fn edit_department(
    State(state): State<AppState>,
    JsonBody(input): JsonBody<EditDepartmentRequest>,
) -> AppResult<Json<KeyedListResponse>> {
    validate_key(&input.key)?;
    let list = KeyedRepo::edit_entry(
        &state.pool,
        EntityTable::Employee,
        DEPARTMENT,
        input.id,
        &input.key,
        input.value,
    )
    .await?;
    respond(input.id, list)
}

/// DELETE /employee/department/delete
pub async fn delete_department(
    State(state): State<AppState>,
    JsonBody(input): JsonBody<DeleteDepartmentRequest>,
) -> AppResult<Json<KeyedListResponse>> {
    validate_key(&input.key)?;
    let list = KeyedRepo::remove_entry(
        &state.pool,
        EntityTable::Employee,
        DEPARTMENT,
        input.id,
        &input.key,
    )
    .await?;
    respond(input.id, list)
}

fn respond(id: DbId, list: Option<KeyedList>) -> AppResult<Json<KeyedListResponse>> {
    let list = list.ok_or(AppError::Core(CoreError::NotFound {
        entity: EntityTable::Employee.label(),
        id,
    }))?;
    Ok(Json(KeyedListResponse {
        id,
        department: list.to_value(),
    }))
}
