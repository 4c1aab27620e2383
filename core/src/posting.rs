use serde::{Deserialize, Serialize};

use crate::DocId;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Posting {
    pub doc_id: DocId,
    /// Occurrences of the term in `doc_id`; always at least 1.
    pub frequency: u32,
}

/// Postings for one term, in first-seen document order.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct PostingList {
    postings: Vec<Posting>,
}

impl PostingList {
    pub fn new() -> Self {
        Self::default()
    }

    /// Bump the frequency for `doc_id`, or append it with frequency 1.
    ///
    /// Linear in the number of documents holding the term. New documents go
    /// to the tail, so iteration order is first-insertion order.
    pub fn upsert(&mut self, doc_id: DocId) {
        match self.postings.iter_mut().find(|p| p.doc_id == doc_id) {
            Some(p) => p.frequency = p.frequency.saturating_add(1),
            None => self.postings.push(Posting { doc_id, frequency: 1 }),
        }
    }

    pub fn iter(&self) -> impl Iterator<Item = &Posting> + '_ {
        self.postings.iter()
    }

    pub fn get(&self, doc_id: DocId) -> Option<&Posting> {
        self.postings.iter().find(|p| p.doc_id == doc_id)
    }

    pub fn doc_ids(&self) -> impl Iterator<Item = DocId> + '_ {
        self.postings.iter().map(|p| p.doc_id)
    }

    /// Number of documents containing the term.
    pub fn len(&self) -> usize {
        self.postings.len()
    }

    pub fn is_empty(&self) -> bool {
        self.postings.is_empty()
    }

    pub fn as_slice(&self) -> &[Posting] {
        &self.postings
    }
}

impl<'a> IntoIterator for &'a PostingList {
    type Item = &'a Posting;
    type IntoIter = std::slice::Iter<'a, Posting>;

    fn into_iter(self) -> Self::IntoIter {
        self.postings.iter()
    }
}
