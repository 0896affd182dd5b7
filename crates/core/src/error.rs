use crate::types::DbId;

#[derive(Debug, thiserror::Error)]
pub enum CoreError {
    #[error("Entity not found: {entity} with id {id}")]
    NotFound { entity: &'static str, id: DbId },

    #[error("Key not found: {key}")]
    MissingKey { key: String },

    #[error("Validation failed: {0}")]
    Validation(String),
}
