//! Repository for keyed sub-document columns (e.g. `employee.department`).
//!
//! Each operation reads the stored list, transforms it in memory and writes
//! the full list back. The read and the write run in one transaction holding
//! a row lock, so concurrent editors of the same row cannot lose each other's
//! changes.

use drafttrack_core::entity::{ColumnKind, EntityTable};
use drafttrack_core::error::CoreError;
use drafttrack_core::keyed::KeyedList;
use drafttrack_core::types::DbId;
use serde_json::Value;
use sqlx::PgPool;

use crate::error::DbError;

/// Provides keyed edit/delete on structured list columns.
pub struct KeyedRepo;

impl KeyedRepo {
    /// Replace the value under the first entry holding `key`.
    ///
    /// Returns `None` if no row with the given `id` exists.
    pub async fn edit_entry(
        pool: &PgPool,
        table: EntityTable,
        column: &str,
        id: DbId,
        key: &str,
        value: Value,
    ) -> Result<Option<KeyedList>, DbError> {
        Self::modify(pool, table, column, id, |list| list.edit(key, value)).await
    }

    /// Remove every entry holding `key`. Removing an absent key succeeds and
    /// leaves the row untouched.
    ///
    /// Returns `None` if no row with the given `id` exists.
    pub async fn remove_entry(
        pool: &PgPool,
        table: EntityTable,
        column: &str,
        id: DbId,
        key: &str,
    ) -> Result<Option<KeyedList>, DbError> {
        Self::modify(pool, table, column, id, |list| {
            list.remove(key);
            Ok(())
        })
        .await
    }

    /// Read-modify-write a keyed column under `SELECT ... FOR UPDATE`.
    async fn modify<F>(
        pool: &PgPool,
        table: EntityTable,
        column: &str,
        id: DbId,
        transform: F,
    ) -> Result<Option<KeyedList>, DbError>
    where
        F: FnOnce(&mut KeyedList) -> Result<(), CoreError>,
    {
        let column = table
            .column(column)
            .filter(|c| c.kind == ColumnKind::Structured)
            .ok_or_else(|| {
                CoreError::Validation(format!("'{column}' is not a keyed column of {table}"))
            })?
            .name;

        let mut tx = pool.begin().await?;

        let select = format!("SELECT {column} FROM {table} WHERE id = $1 FOR UPDATE");
        let stored = sqlx::query_scalar::<_, Option<String>>(&select)
            .bind(id)
            .fetch_optional(&mut *tx)
            .await?;
        let Some(stored) = stored else {
            return Ok(None);
        };

        let original = KeyedList::from_stored(stored.as_deref())?;
        let mut list = original.clone();
        transform(&mut list)?;

        if list != original {
            let update =
                format!("UPDATE {table} SET {column} = $1, updated_at = NOW() WHERE id = $2");
            sqlx::query(&update)
                .bind(list.encode())
                .bind(id)
                .execute(&mut *tx)
                .await?;
            tracing::debug!(%table, column, id, entries = list.len(), "Keyed column rewritten");
        }

        tx.commit().await?;
        Ok(Some(list))
    }
}
