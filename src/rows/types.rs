use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// One flat output row: bare field name to scalar value
pub type Row = Map<String, Value>;

/// How sibling repeating fields are combined
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum ExpandMode {
    /// Each list element clones only the latest row, so sibling lists of
    /// lengths `n` and `m` produce `n + m - 1` rows
    #[default]
    Chained,

    /// Every combination of sibling list elements, `n * m` rows
    CrossProduct,
}

/// Configuration for row expansion
#[derive(Debug, Clone, Default)]
pub struct ExpandConfig {
    /// How sibling lists are combined
    pub mode: ExpandMode,

    /// Maximum nesting depth to walk (`None` = unlimited)
    pub max_depth: Option<usize>,
}

impl ExpandConfig {
    pub fn with_mode(mut self, mode: ExpandMode) -> Self {
        self.mode = mode;
        self
    }

    pub fn with_max_depth(mut self, max_depth: usize) -> Self {
        self.max_depth = Some(max_depth);
        self
    }
}
