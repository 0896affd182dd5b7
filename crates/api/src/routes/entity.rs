//! Route definitions for the generic entity resources.

use axum::extract::{Path, State};
use axum::routing::get;
use axum::Router;
use drafttrack_core::entity::EntityTable;
use serde_json::Value;

use crate::extract::JsonBody;
use crate::handlers::entity;
use crate::state::AppState;

/// One set of CRUD routes per registered table.
///
/// ```text
/// GET    /{table}         -> list
/// POST   /{table}         -> create
/// GET    /{table}/{id}    -> get_by_id
/// PUT    /{table}/{id}    -> update
/// DELETE /{table}/{id}    -> delete
/// ```
pub fn router() -> Router<AppState> {
    EntityTable::ALL
        .into_iter()
        .fold(Router::new(), |router, table| router.merge(table_routes(table)))
}

fn table_routes(table: EntityTable) -> Router<AppState> {
    let collection = format!("/{}", table.table_name());
    let member = format!("{collection}/{{id}}");

    Router::new()
        .route(
            &collection,
            get(move |state: State<AppState>| entity::list(state, table)).post(
                move |state: State<AppState>, body: JsonBody<Value>| {
                    entity::create(state, body, table)
                },
            ),
        )
        .route(
            &member,
            get(move |state: State<AppState>, id: Path<String>| {
                entity::get_by_id(state, id, table)
            })
            .put(
                move |state: State<AppState>, id: Path<String>, body: JsonBody<Value>| {
                    entity::update(state, id, body, table)
                },
            )
            .delete(move |state: State<AppState>, id: Path<String>| {
                entity::delete(state, id, table)
            }),
        )
}
