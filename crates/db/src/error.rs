use drafttrack_core::error::CoreError;

/// Error for repository operations that validate data read from the store
/// before writing it back.
#[derive(Debug, thiserror::Error)]
pub enum DbError {
    #[error(transparent)]
    Core(#[from] CoreError),

    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),
}
