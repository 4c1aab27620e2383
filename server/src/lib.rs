use anyhow::Result;
use axum::{extract::{Path, Query, State}, http::{HeaderValue, StatusCode}, routing::get, Json, Router};
use hashdex_core::normalizer::normalize_bounded;
use hashdex_core::{BooleanSearch, DocId, Document, DumpEntry, IndexConfig, IndexStats, InvertedIndex, LinearScanner, Posting};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use std::time::Instant;
use tower_http::cors::{AllowOrigin, Any, CorsLayer};
use tower_http::trace::TraceLayer;

#[derive(Deserialize)]
pub struct SearchParams {
    pub q: String,
}

#[derive(Deserialize)]
pub struct DumpParams {
    #[serde(default = "default_limit")]
    pub limit: usize,
}
fn default_limit() -> usize { 20 }

#[derive(Serialize)]
pub struct SearchResponse {
    pub query: String,
    /// The query after normalization; empty when nothing searchable remained.
    pub term: String,
    pub took_s: f64,
    pub total_hits: usize,
    pub results: Vec<Posting>,
}

#[derive(Serialize)]
pub struct DocIdsResponse {
    pub query: String,
    pub took_s: f64,
    pub total_hits: usize,
    pub doc_ids: Vec<DocId>,
}

/// Built once at startup and only read afterwards.
pub struct AppState {
    pub index: InvertedIndex,
    pub docs: Vec<Document>,
}

type SharedState = Arc<AppState>;
type ApiError = (StatusCode, String);

pub fn build_app(docs: Vec<Document>, config: IndexConfig) -> Result<Router> {
    let mut index = InvertedIndex::with_config(config)?;
    let report = index.index_documents(&docs);
    if report.truncated() {
        tracing::warn!(terms_truncated = report.terms_truncated, "input exceeded configured bounds");
    }
    tracing::info!(num_docs = index.num_documents(), num_terms = index.num_terms(), "index ready");
    let state: SharedState = Arc::new(AppState { index, docs });

    let app = Router::new()
        .route("/health", get(|| async { "ok" }))
        .route("/search", get(search_handler))
        .route("/query", get(query_handler))
        .route("/scan", get(scan_handler))
        .route("/stats", get(stats_handler))
        .route("/dump", get(dump_handler))
        .route("/doc/:doc_id", get(doc_handler))
        .with_state(state)
        .layer(cors_layer(std::env::var("CORS_ALLOW_ORIGIN").ok().as_deref()))
        .layer(TraceLayer::new_for_http());
    Ok(app)
}

/// `origins` is a comma-separated allow list; missing or unparsable means any origin.
pub fn cors_layer(origins: Option<&str>) -> CorsLayer {
    let allowed: Vec<HeaderValue> = origins
        .into_iter()
        .flat_map(|list| list.split(','))
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .filter_map(|s| s.parse().ok())
        .collect();
    let origin = if allowed.is_empty() { AllowOrigin::any() } else { AllowOrigin::list(allowed) };
    CorsLayer::new().allow_origin(origin).allow_methods(Any).allow_headers(Any)
}

pub async fn search_handler(State(state): State<SharedState>, Query(params): Query<SearchParams>) -> Json<SearchResponse> {
    let start = Instant::now();
    let (term, _) = normalize_bounded(&params.q, state.index.config().max_term_len);
    let results = state.index.search(&term);
    let elapsed = start.elapsed();
    Json(SearchResponse { query: params.q, term, took_s: elapsed.as_secs_f64(), total_hits: results.len(), results })
}

pub async fn query_handler(State(state): State<SharedState>, Query(params): Query<SearchParams>) -> Result<Json<DocIdsResponse>, ApiError> {
    let start = Instant::now();
    let doc_ids = BooleanSearch::new(&state.index)
        .search(&params.q)
        .map_err(|e| (StatusCode::BAD_REQUEST, e.to_string()))?;
    let elapsed = start.elapsed();
    Ok(Json(DocIdsResponse { query: params.q, took_s: elapsed.as_secs_f64(), total_hits: doc_ids.len(), doc_ids }))
}

pub async fn scan_handler(State(state): State<SharedState>, Query(params): Query<SearchParams>) -> Json<DocIdsResponse> {
    let start = Instant::now();
    let doc_ids = LinearScanner::new(&state.docs, state.index.config()).scan_raw(&params.q);
    let elapsed = start.elapsed();
    Json(DocIdsResponse { query: params.q, took_s: elapsed.as_secs_f64(), total_hits: doc_ids.len(), doc_ids })
}

pub async fn stats_handler(State(state): State<SharedState>) -> Json<IndexStats> {
    Json(state.index.stats())
}

pub async fn dump_handler(State(state): State<SharedState>, Query(params): Query<DumpParams>) -> Json<Vec<DumpEntry>> {
    Json(state.index.dump(params.limit))
}

pub async fn doc_handler(State(state): State<SharedState>, Path(doc_id): Path<DocId>) -> Result<Json<Document>, ApiError> {
    state
        .docs
        .iter()
        .find(|d| d.id == doc_id)
        .cloned()
        .map(Json)
        .ok_or_else(|| (StatusCode::NOT_FOUND, format!("document {doc_id} not found")))
}
