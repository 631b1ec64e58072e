//! Filter derivation: keep every leaf field reachable in a document
//!
//! The document is flattened with dot separators, list indices are dropped
//! from every path, and the distinct remaining paths become the filter.

use crate::error::Result;
use crate::flatten::style::is_index_segment;
use crate::flatten::{flatten, SeparatorStyle};
use crate::rows::filter::Filter;
use serde_json::Value;
use tracing::debug;

/// Derive an inclusion filter naming every leaf of `document`
pub fn derive_filter(document: &Value) -> Result<Filter> {
    let flat = flatten(document, "", &SeparatorStyle::dot())?;

    let mut filter = Filter::new();
    for key in flat.keys() {
        let path = strip_indices(key);
        // leaves reachable only through list positions have no field name
        if !path.is_empty() {
            filter.insert(path);
        }
    }

    debug!(leaves = flat.len(), paths = filter.len(), "derived filter");
    Ok(filter)
}

fn strip_indices(path: &str) -> String {
    path.split('.')
        .filter(|segment| !is_index_segment(segment))
        .collect::<Vec<_>>()
        .join(".")
}
