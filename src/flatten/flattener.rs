use crate::error::{Error, Result};
use crate::flatten::style::SeparatorStyle;
use serde_json::{Map, Value};

/// Flatten a nested map or list into a single-level map keyed by encoded paths.
///
/// List elements are keyed by their index. Empty maps and lists contribute no
/// keys. The root must be a map or a list.
pub fn flatten(
    document: &Value,
    prefix: &str,
    style: &SeparatorStyle,
) -> Result<Map<String, Value>> {
    let mut flat = Map::new();
    flatten_into(&mut flat, true, document, prefix, style)?;
    Ok(flat)
}

fn flatten_into(
    flat: &mut Map<String, Value>,
    top: bool,
    nested: &Value,
    prefix: &str,
    style: &SeparatorStyle,
) -> Result<()> {
    match nested {
        Value::Object(map) => {
            for (key, value) in map {
                let path = style.encode(top, prefix, key);
                assign(flat, path, value, style)?;
            }
        }
        Value::Array(items) => {
            for (idx, value) in items.iter().enumerate() {
                let path = style.encode(top, prefix, &idx.to_string());
                assign(flat, path, value, style)?;
            }
        }
        _ => return Err(Error::not_map_or_list()),
    }

    Ok(())
}

fn assign(
    flat: &mut Map<String, Value>,
    path: String,
    value: &Value,
    style: &SeparatorStyle,
) -> Result<()> {
    match value {
        Value::Object(_) | Value::Array(_) => flatten_into(flat, false, value, &path, style),
        scalar => {
            flat.insert(path, scalar.clone());
            Ok(())
        }
    }
}
