use std::fmt;

use serde::Serialize;

use crate::index::InvertedIndex;
use crate::posting::Posting;

/// Point-in-time counters for diagnostics.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct IndexStats {
    pub documents: usize,
    pub unique_terms: usize,
    pub collisions: usize,
    pub capacity: usize,
    /// `unique_terms / capacity`
    pub load_factor: f64,
    pub used_buckets: usize,
    pub longest_chain: usize,
}

impl fmt::Display for IndexStats {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "documents:     {}", self.documents)?;
        writeln!(f, "unique terms:  {}", self.unique_terms)?;
        writeln!(f, "collisions:    {}", self.collisions)?;
        writeln!(f, "capacity:      {}", self.capacity)?;
        writeln!(f, "load factor:   {:.2}%", self.load_factor * 100.0)?;
        writeln!(f, "used buckets:  {}", self.used_buckets)?;
        write!(f, "longest chain: {}", self.longest_chain)
    }
}

/// One term of an index dump.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DumpEntry {
    pub term: String,
    pub postings: Vec<Posting>,
}

impl fmt::Display for DumpEntry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:", self.term)?;
        for p in &self.postings {
            write!(f, " [doc {}: {}x]", p.doc_id, p.frequency)?;
        }
        Ok(())
    }
}

impl InvertedIndex {
    pub fn stats(&self) -> IndexStats {
        let chains = (0..self.capacity()).map(|i| self.bucket_len(i));
        let (used_buckets, longest_chain) =
            chains.fold((0, 0), |(used, longest), len| (used + usize::from(len > 0), longest.max(len)));
        IndexStats {
            documents: self.num_documents(),
            unique_terms: self.num_terms(),
            collisions: self.num_collisions(),
            capacity: self.capacity(),
            load_factor: self.num_terms() as f64 / self.capacity() as f64,
            used_buckets,
            longest_chain,
        }
    }

    /// The first `limit` terms in bucket order with their postings.
    pub fn dump(&self, limit: usize) -> Vec<DumpEntry> {
        self.entries()
            .take(limit)
            .map(|e| DumpEntry { term: e.term().to_owned(), postings: e.postings().as_slice().to_vec() })
            .collect()
    }
}
