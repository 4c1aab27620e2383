use std::collections::BTreeSet;

use crate::error::{IndexError, Result};
use crate::index::InvertedIndex;
use crate::normalizer::{normalize, normalize_bounded};
use crate::DocId;

/// A parsed boolean query. Terms are already normalized.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Query {
    /// Documents containing every term.
    And(Vec<String>),
    /// Documents containing any term.
    Or(Vec<String>),
    /// Indexed documents containing none of the terms.
    Not(Vec<String>),
}

impl Query {
    /// `a and b` is a conjunction, `a or b` a disjunction, and `not a`
    /// a negation. Operators are matched case-insensitively and only between
    /// words (or, for `not`, in front). Plain words are joined with AND.
    pub fn parse(text: &str) -> Result<Self> {
        let lowered = text.to_lowercase();
        let words: Vec<&str> = lowered.split_whitespace().collect();
        let interior = |op: &str| words.len() > 2 && words[1..words.len() - 1].contains(&op);

        let query = if interior("and") {
            Query::And(terms_without(&words, "and"))
        } else if interior("or") {
            Query::Or(terms_without(&words, "or"))
        } else if words.len() > 1 && words[0] == "not" {
            Query::Not(terms_without(&words[1..], ""))
        } else {
            Query::And(terms_without(&words, ""))
        };

        if query.terms().is_empty() {
            return Err(IndexError::InvalidQuery(text.to_owned()));
        }
        Ok(query)
    }

    pub fn terms(&self) -> &[String] {
        match self {
            Query::And(terms) | Query::Or(terms) | Query::Not(terms) => terms,
        }
    }
}

fn terms_without(words: &[&str], op: &str) -> Vec<String> {
    words
        .iter()
        .filter(|w| **w != op)
        .map(|w| normalize(w))
        .filter(|t| !t.is_empty())
        .collect()
}

/// Evaluates [`Query`] values against an index.
#[derive(Debug, Clone, Copy)]
pub struct BooleanSearch<'a> {
    index: &'a InvertedIndex,
}

impl<'a> BooleanSearch<'a> {
    pub fn new(index: &'a InvertedIndex) -> Self {
        Self { index }
    }

    /// Parse and run `text`. Matching ids come back in ascending order.
    pub fn search(&self, text: &str) -> Result<Vec<DocId>> {
        let query = Query::parse(text)?;
        Ok(self.execute(&query))
    }

    pub fn execute(&self, query: &Query) -> Vec<DocId> {
        let hits: BTreeSet<DocId> = match query {
            Query::And(terms) => {
                let mut sets = terms.iter().map(|t| self.docs_for(t));
                match sets.next() {
                    Some(first) => sets.fold(first, |acc, s| acc.intersection(&s).copied().collect()),
                    None => BTreeSet::new(),
                }
            }
            Query::Or(terms) => terms.iter().flat_map(|t| self.docs_for(t)).collect(),
            Query::Not(terms) => {
                let excluded: BTreeSet<DocId> = terms.iter().flat_map(|t| self.docs_for(t)).collect();
                self.index.doc_ids().difference(&excluded).copied().collect()
            }
        };
        hits.into_iter().collect()
    }

    fn docs_for(&self, term: &str) -> BTreeSet<DocId> {
        let (term, _) = normalize_bounded(term, self.index.config().max_term_len);
        self.index
            .search_term(&term)
            .map(|list| list.doc_ids().collect())
            .unwrap_or_default()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> InvertedIndex {
        let mut idx = InvertedIndex::new();
        idx.index_document(1, "hash table busca");
        idx.index_document(2, "busca linear");
        idx.index_document(3, "hash funcoes");
        idx
    }

    #[test]
    fn parses_operators() {
        assert_eq!(
            Query::parse("Hash AND Busca").unwrap(),
            Query::And(vec!["hash".into(), "busca".into()])
        );
        assert_eq!(
            Query::parse("hash or linear!").unwrap(),
            Query::Or(vec!["hash".into(), "linear".into()])
        );
        assert_eq!(Query::parse("NOT hash").unwrap(), Query::Not(vec!["hash".into()]));
        assert_eq!(
            Query::parse("not hash table").unwrap(),
            Query::Not(vec!["hash".into(), "table".into()])
        );
        assert_eq!(
            Query::parse("hash table").unwrap(),
            Query::And(vec!["hash".into(), "table".into()])
        );
        // a lone operator word is just a term
        assert_eq!(Query::parse("not").unwrap(), Query::And(vec!["not".into()]));
    }

    #[test]
    fn rejects_queries_without_terms() {
        assert!(matches!(Query::parse("   "), Err(IndexError::InvalidQuery(_))));
        assert!(matches!(Query::parse("?! and ..."), Err(IndexError::InvalidQuery(_))));
    }

    #[test]
    fn evaluates_against_index() {
        let idx = sample();
        let search = BooleanSearch::new(&idx);
        assert_eq!(search.search("hash and busca").unwrap(), vec![1]);
        assert_eq!(search.search("hash or linear").unwrap(), vec![1, 2, 3]);
        assert_eq!(search.search("not hash").unwrap(), vec![2]);
        // every word after `not` is excluded
        assert_eq!(search.search("not hash linear").unwrap(), Vec::<DocId>::new());
        assert_eq!(search.search("not funcoes table").unwrap(), vec![2]);
        assert_eq!(search.search("hash zzzznotaterm").unwrap(), Vec::<DocId>::new());
        assert_eq!(search.search("zzzz or funcoes").unwrap(), vec![3]);
    }
}
