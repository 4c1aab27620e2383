use serde::{Deserialize, Serialize};

use crate::error::{IndexError, Result};

pub const DEFAULT_CAPACITY: usize = 1000;
pub const DEFAULT_MAX_TERM_LEN: usize = 100;
pub const DEFAULT_MAX_LINE_LEN: usize = 1000;

/// Sizing for an index. Lengths are counted in chars.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct IndexConfig {
    /// Number of hash buckets; fixed for the lifetime of the index.
    pub capacity: usize,
    /// Longest term kept after normalization.
    pub max_term_len: usize,
    /// Longest document line fed to the tokenizer.
    pub max_line_len: usize,
}

impl Default for IndexConfig {
    fn default() -> Self {
        Self {
            capacity: DEFAULT_CAPACITY,
            max_term_len: DEFAULT_MAX_TERM_LEN,
            max_line_len: DEFAULT_MAX_LINE_LEN,
        }
    }
}

impl IndexConfig {
    pub fn with_capacity(capacity: usize) -> Self {
        Self { capacity, ..Self::default() }
    }

    pub fn validate(&self) -> Result<()> {
        let fields = [
            ("capacity", self.capacity),
            ("max_term_len", self.max_term_len),
            ("max_line_len", self.max_line_len),
        ];
        for (field, value) in fields {
            if value == 0 {
                return Err(IndexError::InvalidConfig { field, value });
            }
        }
        Ok(())
    }
}
