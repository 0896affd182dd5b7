//! Text encoding of structured column values.
//!
//! Every non-null value written to a structured column is stored as canonical
//! JSON text: compact, with object keys sorted at every depth. Strings are
//! quoted like any other JSON value, so a string that happens to look like a
//! list reads back as that same string. On read, every structured column of a
//! row is decoded back into its JSON form.

use serde_json::{Map, Value};

use crate::entity::EntityTable;

/// Returns `true` for lists and objects, the only values scalar columns refuse.
pub fn is_structured(value: &Value) -> bool {
    matches!(value, Value::Array(_) | Value::Object(_))
}

/// Encode a value bound for a structured column to its canonical text form.
pub fn encode_structured(value: &Value) -> String {
    canonicalize(value).to_string()
}

/// Decode stored text back into a structured value.
///
/// Text that is not valid JSON (legacy free-form rows written before values
/// were encoded) is returned unchanged as a string.
pub fn decode_structured(text: &str) -> Value {
    serde_json::from_str(text).unwrap_or_else(|_| Value::String(text.to_string()))
}

/// Decode every structured column of `row` in place.
pub fn decode_row(table: EntityTable, row: &mut Map<String, Value>) {
    for column in table.structured_columns() {
        if let Some(Value::String(text)) = row.get(column.name) {
            let decoded = decode_structured(text);
            row.insert(column.name.to_string(), decoded);
        }
    }
}

fn canonicalize(value: &Value) -> Value {
    match value {
        Value::Array(items) => Value::Array(items.iter().map(canonicalize).collect()),
        Value::Object(map) => {
            let mut entries: Vec<_> = map.iter().collect();
            entries.sort_by(|a, b| a.0.cmp(b.0));
            Value::Object(
                entries
                    .into_iter()
                    .map(|(k, v)| (k.clone(), canonicalize(v)))
                    .collect(),
            )
        }
        other => other.clone(),
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    #[test]
    fn scalars_are_not_structured() {
        for v in [json!(null), json!(1), json!("a"), json!(true)] {
            assert!(!is_structured(&v));
        }
        assert!(is_structured(&json!([])));
        assert!(is_structured(&json!({})));
    }

    #[test]
    fn encoding_is_compact_with_sorted_keys() {
        let v = json!({"b": [1, {"z": 1, "a": 2}], "a": "x"});
        assert_eq!(encode_structured(&v), r#"{"a":"x","b":[1,{"a":2,"z":1}]}"#);
    }

    #[test]
    fn decode_restores_lists_and_objects() {
        let v = json!([{"dept_a": "Alice"}, {"dept_b": "Bob"}]);
        assert_eq!(decode_structured(&encode_structured(&v)), v);
    }

    #[test]
    fn decode_leaves_legacy_text_alone() {
        assert_eq!(decode_structured("Sheet metal"), json!("Sheet metal"));
        assert_eq!(decode_structured("{broken"), json!("{broken"));
    }

    #[test]
    fn scalars_keep_their_type_through_encoding() {
        for v in [json!("[1,2]"), json!("42"), json!(42), json!(true), json!("")] {
            assert_eq!(decode_structured(&encode_structured(&v)), v, "{v}");
        }
        assert_eq!(encode_structured(&json!("[1,2]")), r#""[1,2]""#);
    }

    #[test]
    fn decode_row_touches_only_structured_columns() {
        let mut row = json!({
            "id": 1,
            "job_no": "[1,2]",
            "project_type": "[\"laser\",\"bend\"]",
            "processes": null,
        })
        .as_object()
        .unwrap()
        .clone();

        decode_row(EntityTable::Projects, &mut row);

        assert_eq!(row["job_no"], json!("[1,2]"));
        assert_eq!(row["project_type"], json!(["laser", "bend"]));
        assert_eq!(row["processes"], Value::Null);
    }
}
