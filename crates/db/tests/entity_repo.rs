//! Integration tests for the generic entity repository.
//!
//! Exercises `EntityRepo` against a real database:
//! - Insert/list round trip of structured columns
//! - Partial update isolation and missing-row handling
//! - Idempotent delete
//! - Schema catalog column introspection
//! - Unique constraint violations

use drafttrack_core::document::{InsertDocument, UpdateDocument};
use drafttrack_core::entity::EntityTable;
use drafttrack_db::repositories::EntityRepo;
use serde_json::{json, Value};
use sqlx::PgPool;

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

async fn insert(pool: &PgPool, table: EntityTable, body: Value) -> i64 {
    let doc = InsertDocument::parse(table, &body).unwrap();
    EntityRepo::insert(pool, &doc).await.unwrap()
}

async fn update(pool: &PgPool, table: EntityTable, id: i64, body: Value) -> bool {
    let doc = UpdateDocument::parse(table, &body).unwrap();
    EntityRepo::update(pool, id, &doc).await.unwrap()
}

async fn fetch(pool: &PgPool, table: EntityTable, id: i64) -> Value {
    EntityRepo::find_by_id(pool, table, id).await.unwrap().unwrap()
}

// ---------------------------------------------------------------------------
// Test: structured columns round-trip through insert and list
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_insert_then_list_round_trips_structured_fields(pool: PgPool) {
    let project_type = json!(["laser cutting", {"bending": {"angle": 90, "passes": 2}}]);
    let processes = json!({"cutting": true, "welding": false});

    let id = insert(
        &pool,
        EntityTable::Projects,
        json!({
            "job_no": "J-1001",
            "project_type": project_type,
            "processes": processes,
            "quantity": 12,
            "due_date": "2025-06-30",
        }),
    )
    .await;

    let rows = EntityRepo::list(&pool, EntityTable::Projects).await.unwrap();
    assert_eq!(rows.len(), 1);

    let row = &rows[0];
    assert_eq!(row["id"], id);
    assert_eq!(row["job_no"], "J-1001");
    assert_eq!(row["project_type"], project_type);
    assert_eq!(row["processes"], processes);
    assert_eq!(row["quantity"], 12);
    assert_eq!(row["due_date"], "2025-06-30");
    assert_eq!(row["remarks"], Value::Null);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_structured_column_is_stored_as_canonical_text(pool: PgPool) {
    let id = insert(
        &pool,
        EntityTable::Employee,
        json!({"employee_name": "Alice", "department": [{"dept_b": "Bob", "a": 1}]}),
    )
    .await;

    let stored: Option<String> = sqlx::query_scalar("SELECT department FROM employee WHERE id = $1")
        .bind(id)
        .fetch_one(&pool)
        .await
        .unwrap();
    assert_eq!(stored.as_deref(), Some(r#"[{"a":1,"dept_b":"Bob"}]"#));
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_scalars_in_structured_columns_keep_their_type(pool: PgPool) {
    for value in [json!("[1,2]"), json!(5), json!(true), json!("laser")] {
        let id = insert(
            &pool,
            EntityTable::Projects,
            json!({"job_no": format!("J-S-{value}"), "project_type": value}),
        )
        .await;

        let row = fetch(&pool, EntityTable::Projects, id).await;
        assert_eq!(row["project_type"], value);
    }
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_list_returns_rows_in_insertion_order(pool: PgPool) {
    for name in ["Acme", "Globex", "Initech"] {
        insert(&pool, EntityTable::Customers, json!({"all_customers": name})).await;
    }

    let rows = EntityRepo::list(&pool, EntityTable::Customers).await.unwrap();
    let names: Vec<_> = rows.iter().map(|r| r["all_customers"].clone()).collect();
    assert_eq!(names, [json!("Acme"), json!("Globex"), json!("Initech")]);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_list_of_empty_table_is_empty(pool: PgPool) {
    let rows = EntityRepo::list(&pool, EntityTable::Designers).await.unwrap();
    assert!(rows.is_empty());
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_legacy_plain_text_in_structured_column_is_returned_verbatim(pool: PgPool) {
    sqlx::query("INSERT INTO live_projects (job_no, assigned_to) VALUES ('J-7', 'Alice, Bob')")
        .execute(&pool)
        .await
        .unwrap();

    let rows = EntityRepo::list(&pool, EntityTable::LiveProjects).await.unwrap();
    assert_eq!(rows[0]["assigned_to"], "Alice, Bob");
}

// ---------------------------------------------------------------------------
// Test: partial update
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_partial_update_changes_only_named_columns(pool: PgPool) {
    let id = insert(
        &pool,
        EntityTable::Projects,
        json!({
            "job_no": "J-2001",
            "customer": "Acme",
            "overallstatus": "open",
            "project_type": ["drafting"],
        }),
    )
    .await;
    let before = fetch(&pool, EntityTable::Projects, id).await;

    assert!(update(&pool, EntityTable::Projects, id, json!({"overallstatus": "done"})).await);

    let after = fetch(&pool, EntityTable::Projects, id).await;
    assert_eq!(after["overallstatus"], "done");
    for column in ["job_no", "customer", "project_type", "created_at"] {
        assert_eq!(after[column], before[column], "{column} changed");
    }
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_update_replaces_structured_value_without_merging(pool: PgPool) {
    let id = insert(
        &pool,
        EntityTable::Projects,
        json!({"job_no": "J-2002", "processes": {"cutting": true, "welding": true}}),
    )
    .await;

    update(&pool, EntityTable::Projects, id, json!({"processes": {"painting": true}})).await;

    let row = fetch(&pool, EntityTable::Projects, id).await;
    assert_eq!(row["processes"], json!({"painting": true}));
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_update_can_clear_optional_column(pool: PgPool) {
    let id = insert(
        &pool,
        EntityTable::Processes,
        json!({"process_name": "Bending", "sequence": 3, "is_active": true}),
    )
    .await;

    update(&pool, EntityTable::Processes, id, json!({"sequence": null})).await;

    let row = fetch(&pool, EntityTable::Processes, id).await;
    assert_eq!(row["sequence"], Value::Null);
    assert_eq!(row["is_active"], true);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_update_of_missing_row_reports_false(pool: PgPool) {
    let updated = update(&pool, EntityTable::Projects, 7, json!({"overallstatus": "done"})).await;
    assert!(!updated);
}

// ---------------------------------------------------------------------------
// Test: delete
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_delete_removes_row(pool: PgPool) {
    let id = insert(&pool, EntityTable::Designers, json!({"designer_name": "Dana"})).await;

    assert!(EntityRepo::delete(&pool, EntityTable::Designers, id).await.unwrap());
    assert!(EntityRepo::find_by_id(&pool, EntityTable::Designers, id)
        .await
        .unwrap()
        .is_none());
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_delete_of_missing_row_is_not_an_error(pool: PgPool) {
    let deleted = EntityRepo::delete(&pool, EntityTable::Designers, 999_999)
        .await
        .unwrap();
    assert!(!deleted);
}

// ---------------------------------------------------------------------------
// Test: column introspection
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_column_names_follow_declaration_order(pool: PgPool) {
    let columns = EntityRepo::column_names(&pool, EntityTable::Employee)
        .await
        .unwrap();
    assert_eq!(
        columns,
        [
            "id",
            "employee_name",
            "employee_code",
            "designation",
            "email",
            "phone",
            "department",
            "joining_date",
            "created_at",
            "updated_at",
        ]
    );
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_every_registered_column_exists_in_schema(pool: PgPool) {
    for table in EntityTable::ALL {
        let columns = EntityRepo::column_names(&pool, table).await.unwrap();
        for column in table.columns() {
            assert!(
                columns.iter().any(|c| c == column.name),
                "{table}.{} missing from schema",
                column.name
            );
        }
    }
}

// ---------------------------------------------------------------------------
// Test: constraint violations
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_duplicate_job_number_is_rejected(pool: PgPool) {
    insert(&pool, EntityTable::Projects, json!({"job_no": "J-3001"})).await;

    let doc = InsertDocument::parse(EntityTable::Projects, &json!({"job_no": "J-3001"})).unwrap();
    let err = EntityRepo::insert(&pool, &doc).await.unwrap_err();
    match err {
        sqlx::Error::Database(db_err) => {
            assert_eq!(db_err.code().as_deref(), Some("23505"));
            assert_eq!(db_err.constraint(), Some("uq_projects_job_no"));
        }
        other => panic!("expected database error, got {other:?}"),
    }
}
