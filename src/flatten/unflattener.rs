use crate::error::{Error, Result};
use crate::flatten::style::{is_index_segment, SeparatorStyle};
use serde_json::{Map, Value};

/// Rebuild a nested document from a map produced by [`flatten`](super::flatten).
///
/// Keys are stripped of `prefix`, decoded with `style` and merged in sorted
/// order. Any map whose keys are exactly `0..n` is turned back into a list.
/// A key that is both a leaf and a branch, or appears twice after decoding,
/// fails the whole call with [`Error::MergeConflict`].
pub fn unflatten(
    flat: &Map<String, Value>,
    prefix: &str,
    style: &SeparatorStyle,
) -> Result<Value> {
    let mut keys: Vec<&String> = flat.keys().collect();
    keys.sort();

    let mut root = Map::new();
    for key in keys {
        let path = key.strip_prefix(prefix).ok_or_else(|| {
            Error::InvalidInput(format!("key `{}` does not start with `{}`", key, prefix))
        })?;
        let segments = style.decode(path)?;
        merge_path(&mut root, &segments, &flat[key], key)?;
    }

    Ok(rebuild_lists(Value::Object(root)))
}

fn merge_path(
    node: &mut Map<String, Value>,
    segments: &[String],
    value: &Value,
    key: &str,
) -> Result<()> {
    let Some((head, tail)) = segments.split_first() else {
        return Err(Error::InvalidInput(format!("empty path for `{}`", key)));
    };

    if tail.is_empty() {
        if node.contains_key(head) {
            return Err(Error::MergeConflict { path: key.to_string() });
        }
        node.insert(head.clone(), value.clone());
        return Ok(());
    }

    match node
        .entry(head.clone())
        .or_insert_with(|| Value::Object(Map::new()))
    {
        Value::Object(child) => merge_path(child, tail, value, key),
        _ => Err(Error::MergeConflict { path: key.to_string() }),
    }
}

fn rebuild_lists(value: Value) -> Value {
    match value {
        Value::Object(map) => {
            let map: Map<String, Value> = map
                .into_iter()
                .map(|(key, child)| (key, rebuild_lists(child)))
                .collect();

            if !is_index_sequence(&map) {
                return Value::Object(map);
            }

            let mut items: Vec<(usize, Value)> = map
                .into_iter()
                .filter_map(|(key, child)| key.parse().ok().map(|idx| (idx, child)))
                .collect();
            items.sort_by_key(|(idx, _)| *idx);
            Value::Array(items.into_iter().map(|(_, child)| child).collect())
        }
        Value::Array(items) => Value::Array(items.into_iter().map(rebuild_lists).collect()),
        scalar => scalar,
    }
}

/// Keys are exactly the canonical decimal indices `0..len`
fn is_index_sequence(map: &Map<String, Value>) -> bool {
    if map.is_empty() {
        return false;
    }

    let mut seen = vec![false; map.len()];
    for key in map.keys() {
        if !is_index_segment(key) {
            return false;
        }
        match key.parse::<usize>() {
            Ok(idx) if idx < seen.len() && !seen[idx] && idx.to_string() == *key => {
                seen[idx] = true
            }
            _ => return false,
        }
    }

    true
}
