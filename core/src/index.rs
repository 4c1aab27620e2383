use std::collections::BTreeSet;

use serde::Serialize;

use crate::config::IndexConfig;
use crate::error::Result;
use crate::normalizer::normalize_bounded;
use crate::posting::{Posting, PostingList};
use crate::tokenizer::Tokenizer;
use crate::{DocId, Document};

const DJB2_SEED: u64 = 5381;

/// DJB2 over the UTF-8 bytes of `term` (`h = h * 33 + byte`, wrapping).
pub fn hash_term(term: &str) -> u64 {
    term.bytes()
        .fold(DJB2_SEED, |h, b| h.wrapping_shl(5).wrapping_add(h).wrapping_add(u64::from(b)))
}

/// One unique term and the documents it occurs in.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TermEntry {
    term: String,
    postings: PostingList,
}

impl TermEntry {
    pub fn term(&self) -> &str {
        &self.term
    }

    pub fn postings(&self) -> &PostingList {
        &self.postings
    }
}

/// What happened while indexing one or more documents.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct IndexReport {
    /// Tokens that survived normalization and were inserted.
    pub terms_indexed: usize,
    /// Set when a document was longer than `max_line_len`.
    pub line_truncated: bool,
    /// Tokens cut to `max_term_len` after normalization.
    pub terms_truncated: usize,
}

impl IndexReport {
    pub fn truncated(&self) -> bool {
        self.line_truncated || self.terms_truncated > 0
    }

    fn merge(&mut self, other: IndexReport) {
        self.terms_indexed += other.terms_indexed;
        self.line_truncated |= other.line_truncated;
        self.terms_truncated += other.terms_truncated;
    }
}

/// Term -> postings map built on a fixed array of chained buckets.
///
/// A term lives in bucket `hash_term(term) % capacity`. Within a bucket,
/// entries keep insertion order and terms are unique. The capacity never
/// changes; a full table just grows longer chains.
#[derive(Debug, Clone)]
pub struct InvertedIndex {
    config: IndexConfig,
    buckets: Vec<Vec<TermEntry>>,
    num_documents: usize,
    num_terms: usize,
    num_collisions: usize,
}

impl Default for InvertedIndex {
    fn default() -> Self {
        Self::build(IndexConfig::default())
    }
}

impl InvertedIndex {
    /// An empty index with the default configuration.
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_capacity(capacity: usize) -> Result<Self> {
        Self::with_config(IndexConfig::with_capacity(capacity))
    }

    /// Fails without allocating when `config` has a zero field.
    pub fn with_config(config: IndexConfig) -> Result<Self> {
        config.validate()?;
        Ok(Self::build(config))
    }

    fn build(config: IndexConfig) -> Self {
        let mut buckets = Vec::with_capacity(config.capacity);
        buckets.resize_with(config.capacity, Vec::new);
        Self { config, buckets, num_documents: 0, num_terms: 0, num_collisions: 0 }
    }

    fn bucket_of(&self, term: &str) -> usize {
        (hash_term(term) % self.buckets.len() as u64) as usize
    }

    /// Record one occurrence of an already-normalized, non-empty `term`.
    pub fn insert_term(&mut self, term: &str, doc_id: DocId) {
        debug_assert!(!term.is_empty(), "empty terms are filtered by the caller");
        let bucket = self.bucket_of(term);
        let chain = &mut self.buckets[bucket];

        if let Some(entry) = chain.iter_mut().find(|e| e.term == term) {
            entry.postings.upsert(doc_id);
            return;
        }

        let collided = !chain.is_empty();
        let mut postings = PostingList::new();
        postings.upsert(doc_id);
        chain.push(TermEntry { term: term.to_owned(), postings });

        self.num_terms += 1;
        if collided {
            self.num_collisions += 1;
            tracing::debug!(term, bucket, chain_len = self.buckets[bucket].len(), "bucket collision");
        }
    }

    /// Postings for an already-normalized term, or `None` when absent.
    pub fn search_term(&self, term: &str) -> Option<&PostingList> {
        self.buckets[self.bucket_of(term)]
            .iter()
            .find(|e| e.term == term)
            .map(|e| &e.postings)
    }

    /// Normalize `query` the same way documents are, then look it up.
    /// Unknown or empty terms give an empty vec.
    pub fn search(&self, query: &str) -> Vec<Posting> {
        let (term, _) = normalize_bounded(query, self.config.max_term_len);
        if term.is_empty() {
            return Vec::new();
        }
        self.search_term(&term)
            .map(|list| list.as_slice().to_vec())
            .unwrap_or_default()
    }

    /// Tokenize, normalize, and insert every term of `content`.
    ///
    /// The document counter goes up exactly once per call, even when no term
    /// survives normalization.
    pub fn index_document(&mut self, doc_id: DocId, content: &str) -> IndexReport {
        let tokenizer = Tokenizer::new(content, self.config.max_line_len);
        let mut report = IndexReport { line_truncated: tokenizer.was_truncated(), ..IndexReport::default() };
        if report.line_truncated {
            tracing::warn!(doc_id, max_line_len = self.config.max_line_len, "document truncated before tokenizing");
        }

        for token in tokenizer.tokens() {
            let (term, cut) = normalize_bounded(token, self.config.max_term_len);
            if cut {
                report.terms_truncated += 1;
                tracing::warn!(doc_id, max_term_len = self.config.max_term_len, "term truncated");
            }
            if term.is_empty() {
                continue;
            }
            self.insert_term(&term, doc_id);
            report.terms_indexed += 1;
        }

        self.num_documents += 1;
        report
    }

    pub fn index_documents<'d, I>(&mut self, docs: I) -> IndexReport
    where
        I: IntoIterator<Item = &'d Document>,
    {
        let mut total = IndexReport::default();
        for doc in docs {
            total.merge(self.index_document(doc.id, &doc.content));
        }
        total
    }

    /// Number of documents containing `term` (normalized first).
    pub fn document_frequency(&self, term: &str) -> usize {
        let (term, _) = normalize_bounded(term, self.config.max_term_len);
        self.search_term(&term).map_or(0, PostingList::len)
    }

    /// Entries in bucket order, then chain order.
    pub fn entries(&self) -> impl Iterator<Item = &TermEntry> + '_ {
        self.buckets.iter().flatten()
    }

    pub fn terms(&self) -> impl Iterator<Item = &str> + '_ {
        self.entries().map(TermEntry::term)
    }

    /// Every document id that appears in at least one posting list.
    pub fn doc_ids(&self) -> BTreeSet<DocId> {
        self.entries().flat_map(|e| e.postings.doc_ids()).collect()
    }

    /// Chain length of bucket `i`; zero for out-of-range buckets.
    pub fn bucket_len(&self, i: usize) -> usize {
        self.buckets.get(i).map_or(0, Vec::len)
    }

    pub fn capacity(&self) -> usize {
        self.buckets.len()
    }

    pub fn config(&self) -> &IndexConfig {
        &self.config
    }

    /// Calls to `index_document`, duplicates included.
    pub fn num_documents(&self) -> usize {
        self.num_documents
    }

    pub fn num_terms(&self) -> usize {
        self.num_terms
    }

    /// New terms that were appended to an already occupied bucket.
    pub fn num_collisions(&self) -> usize {
        self.num_collisions
    }
}
