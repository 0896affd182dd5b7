//! Route definitions for employee-only endpoints.

use axum::routing::{delete, get, put};
use axum::Router;

use crate::handlers::employee;
use crate::state::AppState;

/// ```text
/// GET    /employee/headers              -> headers
/// PUT    /employee/department/edit      -> edit_department
/// DELETE /employee/department/delete    -> delete_department
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/employee/headers", get(employee::headers))
        .route("/employee/department/edit", put(employee::edit_department))
        .route(
            "/employee/department/delete",
            delete(employee::delete_department),
        )
}
