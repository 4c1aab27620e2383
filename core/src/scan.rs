use crate::config::IndexConfig;
use crate::normalizer::normalize_bounded;
use crate::tokenizer::Tokenizer;
use crate::{DocId, Document};

/// Brute-force baseline: re-tokenizes every document on every query.
///
/// Holds only a borrow of the documents and the length bounds, so its
/// answers never depend on an index.
#[derive(Debug, Clone, Copy)]
pub struct LinearScanner<'a> {
    docs: &'a [Document],
    max_term_len: usize,
    max_line_len: usize,
}

impl<'a> LinearScanner<'a> {
    pub fn new(docs: &'a [Document], config: &IndexConfig) -> Self {
        Self { docs, max_term_len: config.max_term_len, max_line_len: config.max_line_len }
    }

    /// Ids of documents containing the normalized `term`, in document order.
    pub fn scan(&self, term: &str) -> Vec<DocId> {
        if term.is_empty() {
            return Vec::new();
        }
        self.docs
            .iter()
            .filter(|doc| self.contains(doc, term))
            .map(|doc| doc.id)
            .collect()
    }

    /// Normalize `query` first, then [`scan`](Self::scan).
    pub fn scan_raw(&self, query: &str) -> Vec<DocId> {
        let (term, _) = normalize_bounded(query, self.max_term_len);
        self.scan(&term)
    }

    pub fn len(&self) -> usize {
        self.docs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.docs.is_empty()
    }

    fn contains(&self, doc: &Document, term: &str) -> bool {
        Tokenizer::new(&doc.content, self.max_line_len)
            .tokens()
            .any(|token| normalize_bounded(token, self.max_term_len).0 == term)
    }
}
