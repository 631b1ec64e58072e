use thiserror::Error;

/// Errors produced by flattening, unflattening and row expansion
#[derive(Debug, Error)]
pub enum Error {
    /// The document root (or a flat key) is not of the required shape
    #[error("not a valid input: {0}")]
    InvalidInput(String),

    /// Text input failed the cheap shape check before parsing
    #[error("not a valid input, must be a JSON object")]
    InvalidStructuredText,

    /// Underlying JSON parser or printer failure
    #[error(transparent)]
    Json(#[from] serde_json::Error),

    /// Two flat keys disagree about the shape at `path`
    #[error("merge conflict at `{path}`")]
    MergeConflict { path: String },

    /// A separator style that cannot be decoded back into segments
    #[error("separator style has neither a `before` nor a `middle` part")]
    InvalidStyle,

    /// The document nests deeper than the configured limit
    #[error("document exceeds the maximum depth of {limit}")]
    DepthExceeded { limit: usize },
}

pub type Result<T> = std::result::Result<T, Error>;

impl Error {
    pub(crate) fn not_map_or_list() -> Self {
        Error::InvalidInput("map or list".to_string())
    }
}
