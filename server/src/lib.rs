use axum::{
    extract::{Query, State},
    response::Html,
    routing::get,
    Json, Router,
};
use docfind_core::loader::load_index;
use docfind_core::presenter::{on_query_changed, render_panel, result_href, PanelUpdate};
use docfind_core::search::SearchIndex;
use docfind_core::{BlockId, SearchResult};
use serde::{Deserialize, Serialize};
use std::path::Path;
use std::sync::Arc;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;

#[derive(Deserialize)]
pub struct SearchParams {
    #[serde(default)]
    pub q: String,
}

#[derive(Serialize)]
pub struct SearchResponse {
    pub query: String,
    pub total_hits: usize,
    pub results: Vec<SearchHit>,
}

#[derive(Serialize)]
pub struct SearchHit {
    pub document: String,
    /// 1-based, ready for display.
    pub page: u32,
    pub block_id: BlockId,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub role: Option<String>,
    /// Same-origin navigation target: documents/<document>.html#block-<block_id>.
    pub href: String,
    pub preview: String,
}

impl From<SearchResult> for SearchHit {
    fn from(r: SearchResult) -> Self {
        SearchHit {
            href: result_href(&r),
            document: r.document,
            page: r.page + 1,
            block_id: r.block_id,
            role: r.role,
            preview: r.preview,
        }
    }
}

#[derive(Clone)]
pub struct AppState {
    pub index: Arc<SearchIndex>,
}

/// Build the router, loading the index once. A failed load is logged and
/// leaves the server in degraded mode: every query answers with zero
/// results rather than an error.
pub fn build_app<P: AsRef<Path>>(index_path: P) -> Router {
    let index = match load_index(&index_path) {
        Ok(entries) => {
            tracing::info!(entries = entries.len(), "search index loaded");
            SearchIndex::new(entries)
        }
        Err(err) => {
            tracing::error!(%err, "failed to load search index; serving empty results");
            SearchIndex::empty()
        }
    };
    let state = AppState { index: Arc::new(index) };

    let cors = CorsLayer::new().allow_origin(Any).allow_methods(Any).allow_headers(Any);

    Router::new()
        .route("/health", get(|| async { "ok" }))
        .route("/search", get(search_handler))
        .route("/search/panel", get(panel_handler))
        .with_state(state)
        .layer(cors)
        .layer(TraceLayer::new_for_http())
}

pub async fn search_handler(
    State(state): State<AppState>,
    Query(params): Query<SearchParams>,
) -> Json<SearchResponse> {
    let results = match on_query_changed(&state.index, &params.q) {
        PanelUpdate::Hide => Vec::new(),
        PanelUpdate::Show(results) => results,
    };
    let total_hits = results.len();
    let results = results.into_iter().map(SearchHit::from).collect();
    Json(SearchResponse { query: params.q, total_hits, results })
}

/// HTML fragment for the results panel: empty body when the panel should
/// be hidden, the rendered panel (placeholder included) otherwise.
pub async fn panel_handler(
    State(state): State<AppState>,
    Query(params): Query<SearchParams>,
) -> Html<String> {
    match on_query_changed(&state.index, &params.q) {
        PanelUpdate::Hide => Html(String::new()),
        PanelUpdate::Show(results) => Html(render_panel(&results)),
    }
}
