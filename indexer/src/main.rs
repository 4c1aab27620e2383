use anyhow::Result;
use clap::{Args, Parser, Subcommand};
use hashdex_core::config::{DEFAULT_CAPACITY, DEFAULT_MAX_LINE_LEN, DEFAULT_MAX_TERM_LEN};
use hashdex_core::{corpus, BooleanSearch, DocId, Document, IndexConfig, InvertedIndex, LinearScanner};
use tracing_subscriber::{fmt, EnvFilter};

use std::collections::BTreeSet;
use std::time::Instant;

#[derive(Parser)]
#[command(name = "indexer")]
#[command(about = "Build an in-memory inverted index and query it", long_about = None)]
struct Cli {
    #[command(flatten)]
    source: Source,
    #[command(subcommand)]
    command: Commands,
}

#[derive(Args)]
struct Source {
    /// Input path (.json/.jsonl file or directory)
    #[arg(long, global = true, default_value = "./demos/corpus.jsonl")]
    input: String,
    /// Number of hash buckets
    #[arg(long, global = true, default_value_t = DEFAULT_CAPACITY)]
    capacity: usize,
    /// Longest term kept after normalization, in chars
    #[arg(long, global = true, default_value_t = DEFAULT_MAX_TERM_LEN)]
    max_term_len: usize,
    /// Longest document text fed to the tokenizer, in chars
    #[arg(long, global = true, default_value_t = DEFAULT_MAX_LINE_LEN)]
    max_line_len: usize,
}

impl Source {
    fn config(&self) -> IndexConfig {
        IndexConfig { capacity: self.capacity, max_term_len: self.max_term_len, max_line_len: self.max_line_len }
    }
}

#[derive(Subcommand)]
enum Commands {
    /// Look up a single term
    Search { term: String },
    /// Run a boolean query (`a and b`, `a or b`, `not a`)
    Query { query: String },
    /// Find a term by scanning every document
    Scan { term: String },
    /// Time index lookup against a linear scan
    Compare { term: String },
    /// Print index counters
    Stats {
        /// Emit JSON instead of text
        #[arg(long, default_value_t = false)]
        json: bool,
    },
    /// Print the first terms of the index with their postings
    Dump {
        #[arg(long, default_value_t = 20)]
        limit: usize,
    },
}

fn main() -> Result<()> {
    fmt().with_env_filter(EnvFilter::from_default_env()).init();
    let cli = Cli::parse();

    let config = cli.source.config();
    let docs = corpus::load_path(&cli.source.input)?;
    let index = build_index(&docs, config)?;

    match cli.command {
        Commands::Search { term } => print_search(&index, &term),
        Commands::Query { query } => {
            let hits = BooleanSearch::new(&index).search(&query)?;
            println!("query: {query}");
            print_doc_ids(&hits);
        }
        Commands::Scan { term } => {
            let hits = LinearScanner::new(&docs, index.config()).scan_raw(&term);
            println!("linear scan: {term}");
            print_doc_ids(&hits);
        }
        Commands::Compare { term } => compare(&index, &docs, &term),
        Commands::Stats { json } => {
            if json {
                println!("{}", serde_json::to_string_pretty(&index.stats())?);
            } else {
                println!("{}", index.stats());
            }
        }
        Commands::Dump { limit } => {
            for entry in index.dump(limit) {
                println!("{entry}");
            }
            if index.num_terms() > limit {
                println!("... ({} of {} terms shown)", limit, index.num_terms());
            }
        }
    }
    Ok(())
}

fn build_index(docs: &[Document], config: IndexConfig) -> Result<InvertedIndex> {
    let mut index = InvertedIndex::with_config(config)?;
    let report = index.index_documents(docs);
    if report.truncated() {
        tracing::warn!(
            line_truncated = report.line_truncated,
            terms_truncated = report.terms_truncated,
            "some input exceeded configured bounds"
        );
    }
    tracing::info!(
        num_docs = index.num_documents(),
        num_terms = index.num_terms(),
        collisions = index.num_collisions(),
        "index built"
    );
    Ok(index)
}

fn print_search(index: &InvertedIndex, term: &str) {
    let postings = index.search(term);
    println!("search: {term}");
    if postings.is_empty() {
        println!("  no results");
        return;
    }
    for p in &postings {
        println!("  doc {} (frequency {})", p.doc_id, p.frequency);
    }
    println!("  total: {} document(s)", postings.len());
}

fn print_doc_ids(ids: &[DocId]) {
    if ids.is_empty() {
        println!("  no results");
        return;
    }
    for id in ids {
        println!("  doc {id}");
    }
    println!("  total: {} document(s)", ids.len());
}

fn compare(index: &InvertedIndex, docs: &[Document], term: &str) {
    let start = Instant::now();
    let postings = index.search(term);
    let index_took = start.elapsed();

    let scanner = LinearScanner::new(docs, index.config());
    let start = Instant::now();
    let scanned = scanner.scan_raw(term);
    let scan_took = start.elapsed();

    print_search(index, term);
    println!("  took: {:.2} us", index_took.as_secs_f64() * 1e6);
    println!("linear scan: {term}");
    print_doc_ids(&scanned);
    println!("  took: {:.2} us", scan_took.as_secs_f64() * 1e6);

    let from_index: BTreeSet<DocId> = postings.iter().map(|p| p.doc_id).collect();
    let from_scan: BTreeSet<DocId> = scanned.into_iter().collect();
    if from_index != from_scan {
        tracing::error!(?from_index, ?from_scan, "index and linear scan disagree");
    }
    let ratio = scan_took.as_secs_f64() / index_took.as_secs_f64().max(f64::MIN_POSITIVE);
    println!("index lookup was {ratio:.1}x faster than scanning {} document(s)", scanner.len());
}
