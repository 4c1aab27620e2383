use anyhow::Result;
use clap::Parser;
use hashdex_core::config::{DEFAULT_CAPACITY, DEFAULT_MAX_LINE_LEN, DEFAULT_MAX_TERM_LEN};
use hashdex_core::{corpus, IndexConfig};
use std::net::SocketAddr;
use tokio::net::TcpListener;
use tracing_subscriber::{fmt, EnvFilter};

/// Serve search over a corpus indexed in memory at startup.
#[derive(Parser)]
struct Args {
    /// Corpus path (.json/.jsonl file or directory)
    #[arg(long, default_value = "./demos/corpus.jsonl")]
    input: String,
    #[arg(long, default_value = "0.0.0.0")]
    host: String,
    #[arg(long, default_value_t = 8080)]
    port: u16,
    /// Number of hash buckets
    #[arg(long, default_value_t = DEFAULT_CAPACITY)]
    capacity: usize,
    /// Longest term kept after normalization, in chars
    #[arg(long, default_value_t = DEFAULT_MAX_TERM_LEN)]
    max_term_len: usize,
    /// Longest document text fed to the tokenizer, in chars
    #[arg(long, default_value_t = DEFAULT_MAX_LINE_LEN)]
    max_line_len: usize,
}

impl Args {
    fn index_config(&self) -> IndexConfig {
        IndexConfig { capacity: self.capacity, max_term_len: self.max_term_len, max_line_len: self.max_line_len }
    }

    fn addr(&self) -> Result<SocketAddr> {
        Ok(format!("{}:{}", self.host, self.port).parse()?)
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    fmt().with_env_filter(EnvFilter::from_default_env()).init();
    let args = Args::parse();

    let docs = corpus::load_path(&args.input)?;
    let app = server::build_app(docs, args.index_config())?;

    let addr = args.addr()?;
    let listener = TcpListener::bind(addr).await?;
    tracing::info!(%addr, input = %args.input, "serving index");
    axum::serve(listener, app).await?;
    Ok(())
}
