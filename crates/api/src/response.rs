//! Response bodies shared by the entity handlers.

use drafttrack_core::types::DbId;
use serde::Serialize;
use serde_json::Value;

/// `{ "id": n }`, returned by insert and update.
#[derive(Debug, Serialize)]
pub struct IdResponse {
    pub id: DbId,
}

/// `{ "id": n, "deleted": bool }`. `deleted` is `false` when no row matched;
/// deleting a missing row still succeeds.
#[derive(Debug, Serialize)]
pub struct DeleteResponse {
    pub id: DbId,
    pub deleted: bool,
}

/// The full keyed list after an edit or delete.
#[derive(Debug, Serialize)]
pub struct KeyedListResponse {
    pub id: DbId,
    pub department: Value,
}
