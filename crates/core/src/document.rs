//! Validation of caller-supplied insert and update documents.
//!
//! A document is a JSON object mapping column names to values. Each key is
//! resolved against the table's allow-list in [`crate::entity`] and each value
//! is coerced to the column's kind, producing typed [`FieldValue`]s ready to
//! be bound as statement parameters. Structured values are encoded here, so
//! everything past this point only ever sees scalars.

use chrono::{DateTime, NaiveDate};
use serde_json::{Map, Value};

use crate::encoding::{encode_structured, is_structured};
use crate::entity::{ColumnDef, ColumnKind, EntityTable};
use crate::error::CoreError;

/// A single typed value to bind into a statement.
#[derive(Debug, Clone, PartialEq)]
pub enum FieldValue {
    /// SQL `NULL`, typed by the target column.
    Null(ColumnKind),
    Text(String),
    Integer(i64),
    Float(f64),
    Boolean(bool),
    Date(NaiveDate),
}

/// A validated `column = value` pair.
#[derive(Debug, Clone, PartialEq)]
pub struct Assignment {
    pub column: &'static str,
    pub value: FieldValue,
}

/// A validated insert document.
#[derive(Debug, Clone)]
pub struct InsertDocument {
    pub table: EntityTable,
    pub assignments: Vec<Assignment>,
}

/// A validated, non-empty partial update document.
#[derive(Debug, Clone)]
pub struct UpdateDocument {
    pub table: EntityTable,
    pub assignments: Vec<Assignment>,
}

impl InsertDocument {
    /// Validate an insert body for `table`.
    ///
    /// Every required column must be present with a non-null, non-blank value.
    pub fn parse(table: EntityTable, body: &Value) -> Result<Self, CoreError> {
        let fields = as_object(body)?;
        let assignments = resolve(table, fields)?;

        for column in table.required_columns() {
            let present = assignments
                .iter()
                .any(|a| a.column == column.name && !matches!(a.value, FieldValue::Null(_)));
            if !present {
                return Err(CoreError::Validation(format!(
                    "'{}' is required for {}",
                    column.name, table
                )));
            }
        }

        Ok(Self { table, assignments })
    }
}

impl UpdateDocument {
    /// Validate a partial update body for `table`.
    ///
    /// An empty document is rejected rather than treated as a no-op.
    pub fn parse(table: EntityTable, body: &Value) -> Result<Self, CoreError> {
        let fields = as_object(body)?;
        if fields.is_empty() {
            return Err(CoreError::Validation(
                "No fields supplied for update".to_string(),
            ));
        }
        let assignments = resolve(table, fields)?;
        Ok(Self { table, assignments })
    }

    pub fn columns(&self) -> impl Iterator<Item = &'static str> + '_ {
        self.assignments.iter().map(|a| a.column)
    }
}

fn as_object(body: &Value) -> Result<&Map<String, Value>, CoreError> {
    body.as_object()
        .ok_or_else(|| CoreError::Validation("Request body must be a JSON object".to_string()))
}

fn resolve(table: EntityTable, fields: &Map<String, Value>) -> Result<Vec<Assignment>, CoreError> {
    fields
        .iter()
        .map(|(name, value)| {
            let column = table.column(name).ok_or_else(|| {
                CoreError::Validation(format!("Unknown column '{name}' for {table}"))
            })?;
            Ok(Assignment {
                column: column.name,
                value: coerce(column, value)?,
            })
        })
        .collect()
}

/// Coerce a JSON value into the kind declared for `column`.
///
/// Numbers and booleans are accepted in their string forms, since form
/// submissions send everything as text. An empty string counts as null for
/// non-text columns.
pub fn coerce(column: &ColumnDef, value: &Value) -> Result<FieldValue, CoreError> {
    let invalid = || {
        CoreError::Validation(format!(
            "'{}' must be {}",
            column.name,
            column.kind.describe()
        ))
    };

    let blank = matches!(value, Value::String(s) if s.trim().is_empty());
    let is_null = value.is_null() || (blank && column.kind != ColumnKind::Text);

    if is_null || (blank && column.required) {
        if column.required {
            return Err(CoreError::Validation(format!(
                "'{}' is required and cannot be empty",
                column.name
            )));
        }
        return Ok(FieldValue::Null(column.kind));
    }

    if is_structured(value) && column.kind != ColumnKind::Structured {
        return Err(CoreError::Validation(format!(
            "'{}' does not accept a list or object",
            column.name
        )));
    }

    match column.kind {
        ColumnKind::Structured => Ok(FieldValue::Text(encode_structured(value))),
        ColumnKind::Text => match value {
            Value::String(s) => Ok(FieldValue::Text(s.clone())),
            Value::Number(n) => Ok(FieldValue::Text(n.to_string())),
            Value::Bool(b) => Ok(FieldValue::Text(b.to_string())),
            _ => Err(invalid()),
        },
        ColumnKind::Integer => match value {
            Value::Number(n) => n
                .as_i64()
                .or_else(|| {
                    n.as_f64()
                        .filter(|f| f.fract() == 0.0 && f.abs() < i64::MAX as f64)
                        .map(|f| f as i64)
                })
                .map(FieldValue::Integer)
                .ok_or_else(invalid),
            Value::String(s) => s
                .trim()
                .parse::<i64>()
                .map(FieldValue::Integer)
                .map_err(|_| invalid()),
            _ => Err(invalid()),
        },
        ColumnKind::Float => match value {
            Value::Number(n) => n.as_f64().map(FieldValue::Float).ok_or_else(invalid),
            Value::String(s) => s
                .trim()
                .parse::<f64>()
                .ok()
                .filter(|f| f.is_finite())
                .map(FieldValue::Float)
                .ok_or_else(invalid),
            _ => Err(invalid()),
        },
        ColumnKind::Boolean => match value {
            Value::Bool(b) => Ok(FieldValue::Boolean(*b)),
            Value::Number(n) => match n.as_i64() {
                Some(0) => Ok(FieldValue::Boolean(false)),
                Some(1) => Ok(FieldValue::Boolean(true)),
                _ => Err(invalid()),
            },
            Value::String(s) => match s.trim().to_ascii_lowercase().as_str() {
                "true" | "1" => Ok(FieldValue::Boolean(true)),
                "false" | "0" => Ok(FieldValue::Boolean(false)),
                _ => Err(invalid()),
            },
            _ => Err(invalid()),
        },
        ColumnKind::Date => match value {
            Value::String(s) => parse_date(s.trim()).ok_or_else(invalid),
            _ => Err(invalid()),
        },
    }
}

/// Accepts plain `YYYY-MM-DD` dates and RFC 3339 timestamps (the date part
/// is kept), which is what browser date pickers and JSON serializers send.
fn parse_date(s: &str) -> Option<FieldValue> {
    NaiveDate::parse_from_str(s, "%Y-%m-%d")
        .ok()
        .or_else(|| DateTime::parse_from_rfc3339(s).ok().map(|dt| dt.date_naive()))
        .map(FieldValue::Date)
}
