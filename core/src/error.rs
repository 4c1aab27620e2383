use std::path::PathBuf;

pub type Result<T> = std::result::Result<T, IndexError>;

#[derive(thiserror::Error, Debug)]
pub enum IndexError {
    /// A sizing parameter was zero.
    #[error("invalid configuration: {field} must be greater than zero (got {value})")]
    InvalidConfig { field: &'static str, value: usize },

    #[error("failed to read corpus: {0}")]
    Io(#[from] std::io::Error),

    #[error("malformed document in {path}: {source}")]
    Json {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error("query has no searchable terms: {0:?}")]
    InvalidQuery(String),
}
