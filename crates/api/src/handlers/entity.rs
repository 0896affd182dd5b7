//! Handlers for the generic entity resources.
//!
//! Every handler takes the resolved [`EntityTable`] as its last argument; the
//! router binds one set of routes per table.

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::Json;
use drafttrack_core::document::{InsertDocument, UpdateDocument};
use drafttrack_core::entity::EntityTable;
use drafttrack_core::error::CoreError;
use drafttrack_db::repositories::EntityRepo;
use serde_json::Value;

use crate::error::{AppError, AppResult};
use crate::extract::{parse_id, JsonBody};
use crate::response::{DeleteResponse, IdResponse};
use crate::state::AppState;

/// GET /{table}
pub async fn list(
    State(state): State<AppState>,
    table: EntityTable,
) -> AppResult<Json<Vec<Value>>> {
    let rows = EntityRepo::list(&state.pool, table).await?;
    Ok(Json(rows))
}

/// POST /{table}
pub async fn create(
    State(state): State<AppState>,
    JsonBody(body): JsonBody<Value>,
    table: EntityTable,
) -> AppResult<(StatusCode, Json<IdResponse>)> {
    let input = InsertDocument::parse(table, &body)?;
    let id = EntityRepo::insert(&state.pool, &input).await?;
    tracing::info!(%table, id, "Row created");
    Ok((StatusCode::CREATED, Json(IdResponse { id })))
}

/// GET /{table}/{id}
pub async fn get_by_id(
    State(state): State<AppState>,
    Path(id): Path<String>,
    table: EntityTable,
) -> AppResult<Json<Value>> {
    let id = parse_id(&id)?;
    let row = EntityRepo::find_by_id(&state.pool, table, id)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: table.label(),
            id,
        }))?;
    Ok(Json(row))
}

/// PUT /{table}/{id}
///
/// Validation runs before the store is touched, so an empty or unknown-column
/// document never reaches the database.
pub async fn update(
    State(state): State<AppState>,
    Path(id): Path<String>,
    JsonBody(body): JsonBody<Value>,
    table: EntityTable,
) -> AppResult<Json<IdResponse>> {
    let id = parse_id(&id)?;
    let input = UpdateDocument::parse(table, &body)?;

    let updated = EntityRepo::update(&state.pool, id, &input).await?;
    if !updated {
        return Err(AppError::Core(CoreError::NotFound {
            entity: table.label(),
            id,
        }));
    }
    tracing::info!(%table, id, columns = ?input.columns().collect::<Vec<_>>(), "Row updated");
    Ok(Json(IdResponse { id }))
}

/// DELETE /{table}/{id}
pub async fn delete(
    State(state): State<AppState>,
    Path(id): Path<String>,
    table: EntityTable,
) -> AppResult<Json<DeleteResponse>> {
    let id = parse_id(&id)?;
    let deleted = EntityRepo::delete(&state.pool, table, id).await?;
    tracing::info!(%table, id, deleted, "Row delete requested");
    Ok(Json(DeleteResponse { id, deleted }))
}
