use crate::error::{Error, Result};
use crate::rows::copy::deep_copy;
use crate::rows::derive::derive_filter;
use crate::rows::filter::{bare_name, child_path, Filter};
use crate::rows::product;
use crate::rows::tracks::TrackSet;
use crate::rows::types::{ExpandConfig, ExpandMode, Row};
use serde_json::{Map, Value};
use tracing::{debug, trace};

/// Denormalizes a document with repeating list fields into flat rows
pub struct RowExpander {
    config: ExpandConfig,
}

impl RowExpander {
    pub fn new(config: ExpandConfig) -> Self {
        RowExpander { config }
    }

    /// Expand `document` into rows holding only the fields named by `filter`.
    ///
    /// Rows are keyed by bare field names (`C0002`, not `F0004.C0002`). The
    /// root must be a map or a list; paths that match nothing in the filter
    /// are pruned silently.
    pub fn expand(&self, document: &Value, filter: &Filter) -> Result<Vec<Row>> {
        if !matches!(document, Value::Object(_) | Value::Array(_)) {
            return Err(Error::not_map_or_list());
        }

        let rows = match self.config.mode {
            ExpandMode::Chained => {
                let mut tracks = TrackSet::seeded();
                self.walk(document, "", 0, filter, &mut tracks)?;
                tracks.collapse()
            }
            ExpandMode::CrossProduct => {
                product::expand_product(document, filter, self.config.max_depth)?
            }
        };

        debug!(rows = rows.len(), mode = ?self.config.mode, "expanded document");
        Ok(rows)
    }

    /// Expand with a filter derived from every leaf of `document`
    pub fn expand_derived(&self, document: &Value) -> Result<Vec<Row>> {
        let filter = derive_filter(document)?;
        self.expand(document, &filter)
    }

    fn walk(
        &self,
        node: &Value,
        path: &str,
        depth: usize,
        filter: &Filter,
        tracks: &mut TrackSet,
    ) -> Result<()> {
        match node {
            Value::Object(map) => {
                check_depth(depth, self.config.max_depth)?;
                self.walk_map(map, path, depth, filter, tracks)
            }
            Value::Array(items) => {
                check_depth(depth, self.config.max_depth)?;
                self.walk_list(items, path, depth, filter, tracks)
            }
            scalar => {
                write_leaf(path, scalar, filter, tracks);
                Ok(())
            }
        }
    }

    /// Entries holding no list (scalars and list-free maps) are walked before
    /// any list-bearing entry, so every row a nested list spawns carries them.
    fn walk_map(
        &self,
        map: &Map<String, Value>,
        path: &str,
        depth: usize,
        filter: &Filter,
        tracks: &mut TrackSet,
    ) -> Result<()> {
        let mut repeating = Vec::new();

        for (key, value) in map {
            let candidate = child_path(path, key);
            if !filter.admits(&candidate) {
                trace!(path = %candidate, "pruned");
                continue;
            }

            if contains_list(value) {
                repeating.push((candidate, value));
            } else {
                self.walk(value, &candidate, depth + 1, filter, tracks)?;
            }
        }

        for (candidate, value) in repeating {
            self.walk(value, &candidate, depth + 1, filter, tracks)?;
        }

        Ok(())
    }

    /// List positions never appear in paths; each element after the first
    /// continues in a clone of the latest track.
    fn walk_list(
        &self,
        items: &[Value],
        path: &str,
        depth: usize,
        filter: &Filter,
        tracks: &mut TrackSet,
    ) -> Result<()> {
        for (idx, item) in items.iter().enumerate() {
            if idx > 0 {
                tracks.branch();
            }
            self.walk(item, path, depth + 1, filter, tracks)?;
        }

        Ok(())
    }
}

fn write_leaf(path: &str, value: &Value, filter: &Filter, tracks: &mut TrackSet) {
    if filter.contains(path) {
        tracks.write(bare_name(path), deep_copy(value));
    }
}

fn contains_list(value: &Value) -> bool {
    match value {
        Value::Array(_) => true,
        Value::Object(map) => map.values().any(contains_list),
        _ => false,
    }
}

pub(crate) fn check_depth(depth: usize, max_depth: Option<usize>) -> Result<()> {
    match max_depth {
        Some(limit) if depth > limit => Err(Error::DepthExceeded { limit }),
        _ => Ok(()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn expander() -> RowExpander {
        RowExpander::new(ExpandConfig::default())
    }

    fn rows_value(rows: Vec<Row>) -> Value {
        Value::Array(rows.into_iter().map(Value::Object).collect())
    }

    #[test]
    fn test_warehouse_document() {
        let input = json!({
            "F0001": "W1",
            "F0004": [
                {"C0002": "a", "C0006": "5"},
                {"C0002": "b", "C0006": "9"}
            ]
        });
        let filter = Filter::from_paths(["F0001", "F0004.C0002", "F0004.C0006"]);

        let rows = expander().expand(&input, &filter).unwrap();

        assert_eq!(
            rows_value(rows),
            json!([
                {"F0001": "W1", "C0002": "a", "C0006": "5"},
                {"F0001": "W1", "C0002": "b", "C0006": "9"}
            ])
        );
    }

    #[test]
    fn test_single_list_shares_scalars_regardless_of_key_order() {
        // "trailer" sorts after "items" and still lands in every row
        let input = json!({
            "header": "head",
            "items": [{"sku": 1}, {"sku": 2}, {"sku": 3}],
            "trailer": "tail"
        });
        let filter = Filter::from_paths(["header", "items.sku", "trailer"]);

        let rows = expander().expand(&input, &filter).unwrap();

        assert_eq!(rows.len(), 3);
        for (idx, row) in rows.iter().enumerate() {
            assert_eq!(row["header"], "head");
            assert_eq!(row["trailer"], "tail");
            assert_eq!(row["sku"], json!(idx + 1));
        }
    }

    #[test]
    fn test_single_list_shares_nested_fields_after_it() {
        let input = json!({
            "items": [{"sku": 1}, {"sku": 2}],
            "meta": {"owner": "W1"}
        });
        let filter = Filter::from_paths(["items.sku", "meta.owner"]);

        let rows = expander().expand(&input, &filter).unwrap();

        assert_eq!(
            rows_value(rows),
            json!([
                {"sku": 1, "owner": "W1"},
                {"sku": 2, "owner": "W1"}
            ])
        );
    }

    #[test]
    fn test_list_element_shares_nested_fields_after_inner_list() {
        let input = json!({
            "orders": [
                {"lines": [{"sku": "a"}, {"sku": "b"}], "ship": {"city": "X"}}
            ]
        });
        let filter = Filter::from_paths(["orders.lines.sku", "orders.ship.city"]);

        let rows = expander().expand(&input, &filter).unwrap();

        assert_eq!(
            rows_value(rows),
            json!([
                {"sku": "a", "city": "X"},
                {"sku": "b", "city": "X"}
            ])
        );
    }

    #[test]
    fn test_contains_list() {
        assert!(contains_list(&json!([1])));
        assert!(contains_list(&json!({"a": {"b": []}})));
        assert!(!contains_list(&json!({"a": {"b": 1}})));
        assert!(!contains_list(&json!("x")));
    }

    #[test]
    fn test_sibling_lists_chain() {
        let input = json!({
            "a": [{"x": 1}, {"x": 2}],
            "b": [{"y": 1}, {"y": 2}, {"y": 3}]
        });
        let filter = Filter::from_paths(["a.x", "b.y"]);

        let rows = expander().expand(&input, &filter).unwrap();

        assert_eq!(rows.len(), 2 + 3 - 1);
        assert_eq!(
            rows_value(rows),
            json!([
                {"x": 1},
                {"x": 2, "y": 1},
                {"x": 2, "y": 2},
                {"x": 2, "y": 3}
            ])
        );
    }

    #[test]
    fn test_rows_hold_only_filtered_bare_names() {
        let input = json!({
            "F0001": "W1",
            "F0003": "344",
            "F0004": [
                {"C0002": "orange", "C0003": "0002", "C0006": "50"},
                {"C0002": "melon", "C0003": "0001", "C0006": "15"}
            ],
            "F0005": "3"
        });
        let filter = Filter::from_paths(["F0001", "F0004.C0002", "F0004.C0006"]);

        let rows = expander().expand(&input, &filter).unwrap();

        assert_eq!(rows.len(), 2);
        for row in &rows {
            let mut keys: Vec<&str> = row.keys().map(String::as_str).collect();
            keys.sort();
            assert_eq!(keys, vec!["C0002", "C0006", "F0001"]);
        }
    }

    #[test]
    fn test_absent_paths_are_ignored() {
        let input = json!({"F0001": "W1"});
        let filter = Filter::from_paths(["F0001", "F9999", "F0004.C0002"]);

        let rows = expander().expand(&input, &filter).unwrap();

        assert_eq!(rows_value(rows), json!([{"F0001": "W1"}]));
    }

    #[test]
    fn test_empty_filter_yields_one_empty_row() {
        let input = json!({"F0001": "W1", "F0004": [{"C0002": "a"}, {"C0002": "b"}]});

        let rows = expander().expand(&input, &Filter::new()).unwrap();

        assert_eq!(rows_value(rows), json!([{}]));
    }

    #[test]
    fn test_nested_lists_inside_elements() {
        let input = json!({
            "orders": [
                {"id": 1, "lines": [{"sku": "a"}, {"sku": "b"}]},
                {"id": 2, "lines": [{"sku": "c"}]}
            ]
        });
        let filter = Filter::from_paths(["orders.id", "orders.lines.sku"]);

        let rows = expander().expand(&input, &filter).unwrap();

        assert_eq!(
            rows_value(rows),
            json!([
                {"id": 1, "sku": "a"},
                {"id": 1, "sku": "b"},
                {"id": 2, "sku": "c"}
            ])
        );
    }

    #[test]
    fn test_deep_paths_are_admitted() {
        let input = json!({"a": {"b": {"c": 1, "d": 2}}, "e": 3});
        let filter = Filter::from_paths(["a.b.c"]);

        let rows = expander().expand(&input, &filter).unwrap();

        assert_eq!(rows_value(rows), json!([{"c": 1}]));
    }

    #[test]
    fn test_scalar_list_expands_into_rows() {
        let input = json!({"name": "n", "tags": ["x", "y"]});
        let filter = Filter::from_paths(["name", "tags"]);

        let rows = expander().expand(&input, &filter).unwrap();

        assert_eq!(
            rows_value(rows),
            json!([{"name": "n", "tags": "x"}, {"name": "n", "tags": "y"}])
        );
    }

    #[test]
    fn test_container_at_leaf_path_writes_nothing() {
        let input = json!({"name": {"first": "Janet"}, "age": 47});
        let filter = Filter::from_paths(["name", "age"]);

        let rows = expander().expand(&input, &filter).unwrap();

        assert_eq!(rows_value(rows), json!([{"age": 47}]));
    }

    #[test]
    fn test_root_list() {
        let input = json!([{"a": 1}, {"a": 2}]);
        let filter = Filter::from_paths(["a"]);

        let rows = expander().expand(&input, &filter).unwrap();

        assert_eq!(rows_value(rows), json!([{"a": 1}, {"a": 2}]));
    }

    #[test]
    fn test_scalar_root_is_rejected() {
        let result = expander().expand(&json!("W1"), &Filter::from_paths(["F0001"]));
        assert!(matches!(result, Err(Error::InvalidInput(_))));
    }

    #[test]
    fn test_expand_derived_keeps_every_leaf() {
        let input = json!({
            "F0001": "W1",
            "F0004": [
                {"C0002": "a", "C0006": "5"},
                {"C0002": "b", "C0006": "9"}
            ]
        });

        let rows = expander().expand_derived(&input).unwrap();

        assert_eq!(
            rows_value(rows),
            json!([
                {"F0001": "W1", "C0002": "a", "C0006": "5"},
                {"F0001": "W1", "C0002": "b", "C0006": "9"}
            ])
        );
    }

    #[test]
    fn test_max_depth() {
        let input = json!({"a": {"b": {"c": 1}}});
        let filter = Filter::from_paths(["a.b.c"]);

        let shallow = RowExpander::new(ExpandConfig::default().with_max_depth(1));
        assert!(matches!(
            shallow.expand(&input, &filter),
            Err(Error::DepthExceeded { limit: 1 })
        ));

        let deep = RowExpander::new(ExpandConfig::default().with_max_depth(2));
        assert_eq!(deep.expand(&input, &filter).unwrap().len(), 1);
    }

    #[test]
    fn test_expansion_leaves_document_untouched() {
        let input = json!({"F0004": [{"C0002": "a"}, {"C0002": "b"}]});
        let before = input.clone();

        let mut rows = expander()
            .expand(&input, &Filter::from_paths(["F0004.C0002"]))
            .unwrap();
        rows[0].insert("C0002".to_string(), json!("changed"));

        assert_eq!(input, before);
    }
}
