//! In-memory inverted index over a fixed-bucket hash table.
//!
//! Terms are hashed into a fixed number of buckets; each bucket chains the
//! term entries that land in it, and each entry owns a posting list of
//! `(doc_id, frequency)` pairs.

pub mod config;
pub mod corpus;
pub mod error;
pub mod index;
pub mod normalizer;
pub mod posting;
pub mod query;
pub mod scan;
pub mod stats;
pub mod tokenizer;

use serde::{Deserialize, Serialize};

pub use config::IndexConfig;
pub use error::{IndexError, Result};
pub use index::{IndexReport, InvertedIndex};
pub use posting::{Posting, PostingList};
pub use query::{BooleanSearch, Query};
pub use scan::LinearScanner;
pub use stats::{DumpEntry, IndexStats};

pub type DocId = u32;

/// A caller-owned document. The index keeps none of its text.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Document {
    pub id: DocId,
    pub content: String,
}

impl Document {
    pub fn new(id: DocId, content: impl Into<String>) -> Self {
        Self { id, content: content.into() }
    }
}
