//! Generic repository for every registered entity table.
//!
//! Table and column identifiers are taken from the registry in
//! `drafttrack_core::entity`, never from caller input; all values are bound
//! as parameters.

use chrono::NaiveDate;
use drafttrack_core::document::{Assignment, FieldValue, InsertDocument, UpdateDocument};
use drafttrack_core::encoding::decode_row;
use drafttrack_core::entity::{ColumnKind, EntityTable};
use drafttrack_core::types::DbId;
use serde_json::Value;
use sqlx::postgres::PgArguments;
use sqlx::PgPool;

/// Provides CRUD operations for any [`EntityTable`].
pub struct EntityRepo;

impl EntityRepo {
    /// List every row of `table` in insertion order, structured columns
    /// decoded.
    pub async fn list(pool: &PgPool, table: EntityTable) -> Result<Vec<Value>, sqlx::Error> {
        let query = format!("SELECT to_jsonb(t) FROM {table} t ORDER BY t.id");
        let rows = sqlx::query_scalar::<_, Value>(&query)
            .fetch_all(pool)
            .await?;
        Ok(rows.into_iter().map(|row| decode(table, row)).collect())
    }

    /// Find a single row by ID, structured columns decoded.
    pub async fn find_by_id(
        pool: &PgPool,
        table: EntityTable,
        id: DbId,
    ) -> Result<Option<Value>, sqlx::Error> {
        let query = format!("SELECT to_jsonb(t) FROM {table} t WHERE t.id = $1");
        let row = sqlx::query_scalar::<_, Value>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await?;
        Ok(row.map(|row| decode(table, row)))
    }

    /// Insert a validated document, returning the generated ID.
    pub async fn insert(pool: &PgPool, input: &InsertDocument) -> Result<DbId, sqlx::Error> {
        let columns: Vec<&str> = input.assignments.iter().map(|a| a.column).collect();
        let placeholders: Vec<String> = (1..=columns.len()).map(|i| format!("${i}")).collect();
        let query = format!(
            "INSERT INTO {} ({}) VALUES ({}) RETURNING id",
            input.table,
            columns.join(", "),
            placeholders.join(", ")
        );

        let id = bind_fields_scalar(sqlx::query_scalar::<_, DbId>(&query), &input.assignments)
            .fetch_one(pool)
            .await?;
        tracing::debug!(table = %input.table, id, "Row inserted");
        Ok(id)
    }

    /// Apply a partial update. Only the columns named in `input` change.
    ///
    /// Returns `false` if no row with the given `id` exists.
    pub async fn update(
        pool: &PgPool,
        id: DbId,
        input: &UpdateDocument,
    ) -> Result<bool, sqlx::Error> {
        let set_clauses: Vec<String> = input
            .assignments
            .iter()
            .enumerate()
            .map(|(i, a)| format!("{} = ${}", a.column, i + 1))
            .collect();
        let id_idx = set_clauses.len() + 1;
        let query = format!(
            "UPDATE {} SET {}, updated_at = NOW() WHERE id = ${id_idx}",
            input.table,
            set_clauses.join(", ")
        );

        let result = bind_fields(sqlx::query(&query), &input.assignments)
            .bind(id)
            .execute(pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }

    /// Delete a row by ID. Returns `true` if a row was removed.
    pub async fn delete(pool: &PgPool, table: EntityTable, id: DbId) -> Result<bool, sqlx::Error> {
        let query = format!("DELETE FROM {table} WHERE id = $1");
        let result = sqlx::query(&query).bind(id).execute(pool).await?;
        Ok(result.rows_affected() > 0)
    }

    /// Column names of `table` in declaration order, as reported by the
    /// schema catalog.
    pub async fn column_names(
        pool: &PgPool,
        table: EntityTable,
    ) -> Result<Vec<String>, sqlx::Error> {
        sqlx::query_scalar::<_, String>(
            "SELECT column_name::text
             FROM information_schema.columns
             WHERE table_schema = current_schema()
               AND table_name = $1
             ORDER BY ordinal_position",
        )
        .bind(table.table_name())
        .fetch_all(pool)
        .await
    }
}

fn decode(table: EntityTable, mut row: Value) -> Value {
    if let Some(fields) = row.as_object_mut() {
        decode_row(table, fields);
    }
    row
}

/// Bind each assignment's value to a sqlx `Query`.
fn bind_fields<'q>(
    mut q: sqlx::query::Query<'q, sqlx::Postgres, PgArguments>,
    assignments: &'q [Assignment],
) -> sqlx::query::Query<'q, sqlx::Postgres, PgArguments> {
    for a in assignments {
        q = match &a.value {
            FieldValue::Null(kind) => match kind {
                ColumnKind::Text | ColumnKind::Structured => q.bind(None::<String>),
                ColumnKind::Integer => q.bind(None::<i64>),
                ColumnKind::Float => q.bind(None::<f64>),
                ColumnKind::Boolean => q.bind(None::<bool>),
                ColumnKind::Date => q.bind(None::<NaiveDate>),
            },
            FieldValue::Text(v) => q.bind(v.as_str()),
            FieldValue::Integer(v) => q.bind(*v),
            FieldValue::Float(v) => q.bind(*v),
            FieldValue::Boolean(v) => q.bind(*v),
            FieldValue::Date(v) => q.bind(*v),
        };
    }
    q
}

/// Bind each assignment's value to a sqlx `QueryScalar`.
fn bind_fields_scalar<'q, O>(
    mut q: sqlx::query::QueryScalar<'q, sqlx::Postgres, O, PgArguments>,
    assignments: &'q [Assignment],
) -> sqlx::query::QueryScalar<'q, sqlx::Postgres, O, PgArguments> {
    for a in assignments {
        q = match &a.value {
            FieldValue::Null(kind) => match kind {
                ColumnKind::Text | ColumnKind::Structured => q.bind(None::<String>),
                ColumnKind::Integer => q.bind(None::<i64>),
                ColumnKind::Float => q.bind(None::<f64>),
                ColumnKind::Boolean => q.bind(None::<bool>),
                ColumnKind::Date => q.bind(None::<NaiveDate>),
            },
            FieldValue::Text(v) => q.bind(v.as_str()),
            FieldValue::Integer(v) => q.bind(*v),
            FieldValue::Float(v) => q.bind(*v),
            FieldValue::Boolean(v) => q.bind(*v),
            FieldValue::Date(v) => q.bind(*v),
        };
    }
    q
}
