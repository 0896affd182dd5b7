pub mod employee;
pub mod entity;
pub mod health;

use axum::Router;

use crate::state::AppState;

/// Build the entity route tree, mounted at the root.
///
/// Route hierarchy:
///
/// ```text
/// /employee/headers                    column names (GET)
/// /employee/department/edit            keyed edit (PUT)
/// /employee/department/delete          keyed delete (DELETE)
///
/// /{table}                             list, create
/// /{table}/{id}                        get, partial update, delete
/// ```
///
/// `{table}` is one of `projects`, `customers`, `designers`, `processes`,
/// `employee`, `live_projects`. Each table gets its own static routes, so an
/// unknown table falls through to the router's JSON 404 fallback.
pub fn api_routes() -> Router<AppState> {
    Router::new()
        .merge(employee::router())
        .merge(entity::router())
}
