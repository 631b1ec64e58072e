use crate::rows::types::Row;
use serde_json::{Map, Value};

/// Structurally independent copy of a document subtree.
pub fn deep_copy(value: &Value) -> Value {
    match value {
        Value::Object(map) => Value::Object(deep_copy_row(map)),
        Value::Array(items) => Value::Array(items.iter().map(deep_copy).collect()),
        Value::Null => Value::Null,
        Value::Bool(b) => Value::Bool(*b),
        Value::Number(n) => Value::Number(n.clone()),
        Value::String(s) => Value::String(s.clone()),
    }
}

/// Snapshot of a partial row before it is duplicated for another list element
pub fn deep_copy_row(row: &Row) -> Row {
    let mut copy = Map::new();
    for (key, value) in row {
        copy.insert(key.clone(), deep_copy(value));
    }
    copy
}
