//! Cross-product expansion: every combination of sibling list elements
//!
//! Each node yields a set of row fragments. A map combines the fragments of
//! its admitted children pairwise, a list concatenates its elements'
//! fragments, and an admitted scalar yields a single one-field fragment.

use crate::error::Result;
use crate::rows::copy::{deep_copy, deep_copy_row};
use crate::rows::expander::check_depth;
use crate::rows::filter::{bare_name, child_path, Filter};
use crate::rows::types::Row;
use serde_json::Value;
use tracing::trace;

pub(crate) fn expand_product(
    document: &Value,
    filter: &Filter,
    max_depth: Option<usize>,
) -> Result<Vec<Row>> {
    fragments(document, "", 0, filter, max_depth)
}

fn fragments(
    node: &Value,
    path: &str,
    depth: usize,
    filter: &Filter,
    max_depth: Option<usize>,
) -> Result<Vec<Row>> {
    match node {
        Value::Object(map) => {
            check_depth(depth, max_depth)?;
            let mut rows = vec![Row::new()];
            for (key, value) in map {
                let candidate = child_path(path, key);
                if !filter.admits(&candidate) {
                    trace!(path = %candidate, "pruned");
                    continue;
                }
                let child = fragments(value, &candidate, depth + 1, filter, max_depth)?;
                rows = combine(&rows, &child);
            }
            Ok(rows)
        }
        Value::Array(items) => {
            check_depth(depth, max_depth)?;
            // an empty list must not erase the rows of its parent
            if items.is_empty() {
                return Ok(vec![Row::new()]);
            }
            let mut rows = Vec::new();
            for item in items {
                rows.extend(fragments(item, path, depth + 1, filter, max_depth)?);
            }
            Ok(rows)
        }
        scalar => {
            let mut row = Row::new();
            if filter.contains(path) {
                row.insert(bare_name(path).to_string(), deep_copy(scalar));
            }
            Ok(vec![row])
        }
    }
}

fn combine(left: &[Row], right: &[Row]) -> Vec<Row> {
    let mut rows = Vec::with_capacity(left.len() * right.len());
    for base in left {
        for extra in right {
            let mut row = deep_copy_row(base);
            row.extend(deep_copy_row(extra));
            rows.push(row);
        }
    }
    rows
}
