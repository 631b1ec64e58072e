//! # rowflat - flatten nested JSON into paths and rows
//!
//! Two transforms over the JSON data model:
//!
//! - **flatten**: encode a nested document as a single-level map keyed by
//!   paths (`a.b.0`, `a/b/0`, `a[b][0]`, `a_b_0`), and rebuild it again
//! - **rows**: denormalize a document with repeating list fields into flat
//!   rows, keeping only the fields named by an inclusion filter
//!
//! ## Quick Start
//!
//! ### Row expansion
//!
//! ```rust
//! use rowflat::{expand, Filter};
//! use serde_json::json;
//!
//! # fn main() -> rowflat::Result<()> {
//! let data = json!({
//!     "F0001": "W1",
//!     "F0004": [
//!         {"C0002": "a", "C0006": "5"},
//!         {"C0002": "b", "C0006": "9"}
//!     ]
//! });
//!
//! let filter = Filter::from_paths(["F0001", "F0004.C0002", "F0004.C0006"]);
//! let rows = expand(&data, &filter)?;
//!
//! assert_eq!(rows.len(), 2);
//! assert_eq!(rows[1]["C0002"], "b");
//! assert_eq!(rows[1]["F0001"], "W1");
//! # Ok(())
//! # }
//! ```
//!
//! ### Flattening
//!
//! ```rust
//! use rowflat::{flatten, unflatten, SeparatorStyle};
//! use serde_json::json;
//!
//! # fn main() -> rowflat::Result<()> {
//! let data = json!({"name": {"first": "Janet"}, "tags": ["a", "b"]});
//!
//! let flat = flatten(&data, "", &SeparatorStyle::rails())?;
//! assert_eq!(flat["name[first]"], "Janet");
//! assert_eq!(flat["tags[1]"], "b");
//!
//! assert_eq!(unflatten(&flat, "", &SeparatorStyle::rails())?, data);
//! # Ok(())
//! # }
//! ```

use anyhow::Context;
use serde_json::Value;
use std::io::{BufRead, Write};

pub mod error;
pub mod flatten;
pub mod rows;
pub mod text;

// Re-export commonly used types for convenience
pub use error::{Error, Result};
pub use flatten::{flatten, unflatten, SeparatorStyle};
pub use rows::{
    deep_copy, deep_copy_row, derive_filter, ExpandConfig, ExpandMode, Filter, Row, RowExpander,
    RowWriter,
};
pub use text::{expand_str, flatten_str, unflatten_str};

/// Expand `document` with the default chained mode
pub fn expand(document: &Value, filter: &Filter) -> Result<Vec<Row>> {
    RowExpander::new(ExpandConfig::default()).expand(document, filter)
}

/// Expand `document` keeping every leaf field it contains
pub fn expand_derived(document: &Value) -> Result<Vec<Row>> {
    RowExpander::new(ExpandConfig::default()).expand_derived(document)
}

/// Expand a newline-delimited JSON stream, writing the rows of every document.
///
/// Returns the number of documents read. With `filter` set to `None` each
/// document derives its own filter.
pub fn expand_json<R: BufRead, W: Write>(
    reader: R,
    writer: &mut RowWriter<W>,
    filter: Option<&Filter>,
    config: ExpandConfig,
) -> anyhow::Result<usize> {
    let expander = RowExpander::new(config);
    let mut documents = 0;

    for line in reader.lines() {
        let line = line.context("Failed to read line")?;
        if line.trim().is_empty() {
            continue;
        }
        let value: Value = serde_json::from_str(&line).context("Failed to parse JSON")?;

        let rows = match filter {
            Some(filter) => expander.expand(&value, filter),
            None => expander.expand_derived(&value),
        }
        .with_context(|| format!("Failed to expand document {}", documents))?;

        writer.write_rows(documents, &rows)?;
        documents += 1;
    }

    Ok(documents)
}
