use std::collections::{BTreeSet, HashMap};

use hashdex_core::{BooleanSearch, DocId, Document, IndexConfig, InvertedIndex, LinearScanner, Posting};

fn reference_corpus() -> Vec<Document> {
    vec![
        Document::new(1, "A estrutura de dados hash table permite busca rapida e eficiente"),
        Document::new(2, "Indices invertidos sao fundamentais para motores de busca"),
        Document::new(3, "A busca linear e ineficiente para grandes volumes de dados"),
        Document::new(4, "Hash tables usam funcoes hash para mapear chaves em valores"),
        Document::new(5, "Posting lists armazenam as ocorrencias de termos em documentos"),
    ]
}

fn build(docs: &[Document]) -> InvertedIndex {
    let mut idx = InvertedIndex::new();
    idx.index_documents(docs);
    idx
}

fn as_set(postings: &[Posting]) -> BTreeSet<(DocId, u32)> {
    postings.iter().map(|p| (p.doc_id, p.frequency)).collect()
}

#[test]
fn reference_corpus_counters() {
    let idx = build(&reference_corpus());
    let stats = idx.stats();
    assert_eq!(stats.documents, 5);
    assert_eq!(stats.unique_terms, 35);
    assert_eq!(stats.collisions, 0);
    assert_eq!(stats.capacity, 1000);
    assert!((stats.load_factor - 0.035).abs() < 1e-9);
}

#[test]
fn busca_is_found_once_in_each_matching_document() {
    let idx = build(&reference_corpus());
    let postings = idx.search("busca");
    assert_eq!(as_set(&postings), BTreeSet::from([(1, 1), (2, 1), (3, 1)]));
}

#[test]
fn hash_is_found_in_documents_one_and_four() {
    let idx = build(&reference_corpus());
    let postings = idx.search("Hash");
    assert_eq!(as_set(&postings), BTreeSet::from([(1, 1), (4, 2)]));
}

#[test]
fn unknown_term_is_not_found_and_changes_nothing() {
    let idx = build(&reference_corpus());
    let before = idx.stats();
    assert!(idx.search_term("zzzznotaterm").is_none());
    assert!(idx.search("zzzznotaterm").is_empty());
    assert!(idx.search("?!").is_empty());
    assert_eq!(idx.stats(), before);
}

#[test]
fn linear_scan_agrees_with_index() {
    let docs = reference_corpus();
    let idx = build(&docs);
    let scanner = LinearScanner::new(&docs, idx.config());
    for query in ["busca", "hash", "dados", "estrutura", "algoritmo", "EM", "tables"] {
        let from_index: BTreeSet<DocId> = idx.search(query).iter().map(|p| p.doc_id).collect();
        let from_scan: BTreeSet<DocId> = scanner.scan_raw(query).into_iter().collect();
        assert_eq!(from_index, from_scan, "query {query:?}");
    }
}

#[test]
fn indexing_order_does_not_change_postings() {
    let docs = reference_corpus();
    let forward = build(&docs);
    let reversed: Vec<Document> = docs.iter().rev().cloned().collect();
    let backward = build(&reversed);

    let collect = |idx: &InvertedIndex| -> HashMap<String, BTreeSet<(DocId, u32)>> {
        idx.entries()
            .map(|e| (e.term().to_owned(), as_set(e.postings().as_slice())))
            .collect()
    };
    assert_eq!(collect(&forward), collect(&backward));
}

#[test]
fn frequency_matches_occurrences() {
    let mut idx = InvertedIndex::new();
    idx.index_document(42, "dados, DADOS; (dados) dados! outro");
    assert_eq!(idx.search("dados"), vec![Posting { doc_id: 42, frequency: 4 }]);
    assert_eq!(idx.document_frequency("Dados"), 1);
}

#[test]
fn duplicate_documents_are_counted() {
    let mut idx = InvertedIndex::new();
    idx.index_document(1, "hash");
    idx.index_document(1, "hash");
    assert_eq!(idx.num_documents(), 2);
    assert_eq!(idx.search("hash"), vec![Posting { doc_id: 1, frequency: 2 }]);
}

#[test]
fn small_capacity_still_answers_correctly() {
    let docs = reference_corpus();
    let mut idx = InvertedIndex::with_config(IndexConfig::with_capacity(7)).unwrap();
    idx.index_documents(&docs);
    let stats = idx.stats();
    assert_eq!(stats.unique_terms, 35);
    assert_eq!(stats.collisions, stats.unique_terms - stats.used_buckets);
    assert_eq!(as_set(&idx.search("hash")), BTreeSet::from([(1, 1), (4, 2)]));
}

#[test]
fn boolean_queries_over_reference_corpus() {
    let idx = build(&reference_corpus());
    let search = BooleanSearch::new(&idx);
    assert_eq!(search.search("busca and dados").unwrap(), vec![1, 3]);
    assert_eq!(search.search("hash or linear").unwrap(), vec![1, 3, 4]);
    assert_eq!(search.search("not de").unwrap(), vec![4]);
}

#[test]
fn every_query_path_agrees_on_expanding_lowercase() {
    let docs = vec![Document::new(1, "İstanbul hash"), Document::new(2, "istanbul")];
    let idx = build(&docs);
    assert_eq!(idx.terms().collect::<Vec<_>>().len(), 2);
    assert!(idx.terms().all(|t| t.chars().all(char::is_alphanumeric)));

    let term = hashdex_core::normalizer::normalize("İstanbul");
    let direct: Vec<DocId> = idx.search_term(&term).map(|l| l.doc_ids().collect()).unwrap_or_default();
    let searched: Vec<DocId> = idx.search("İstanbul").iter().map(|p| p.doc_id).collect();
    let renormalized: Vec<DocId> = idx.search(&term).iter().map(|p| p.doc_id).collect();
    let scanned = LinearScanner::new(&docs, idx.config()).scan_raw("İstanbul");
    let boolean = BooleanSearch::new(&idx).search("İstanbul").unwrap();

    assert_eq!(direct, vec![1, 2]);
    assert_eq!(searched, direct);
    assert_eq!(renormalized, direct);
    assert_eq!(scanned, direct);
    assert_eq!(boolean, direct);
}
