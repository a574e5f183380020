//! HTTP API over the engine and the click-history store.
//!
//! **Ontology** (request body is the raw document):
//! - `POST /api/ontology/parse?format=&maxNodes=` — capped graph
//! - `POST /api/ontology/node-details/{nodeId}?format=` — neighborhood
//! - `POST /api/ontology/statistics?format=` — counts over the full graph
//!
//! **Click history:**
//! - `POST   /api/history/{session}/click` — record a click
//! - `GET    /api/history/{session}` — weighted entries
//! - `DELETE /api/history/{session}` — clear
//! - `GET    /api/history/{session}/statistics` — summary
//!
//! **Health:**
//! - `GET /health` — server status

use std::sync::Arc;

use axum::extract::{DefaultBodyLimit, Path, Query, State};
use axum::http::StatusCode;
use axum::routing::{get, post};
use axum::{Json, Router};
use serde::{Deserialize, Serialize};
use tower_http::cors::CorsLayer;

use crate::engine::Engine;
use crate::error::{LoadError, SemvizError, SemvizResult};
use crate::graph::Graph;
use crate::graph::neighborhood::NodeDetails;
use crate::graph::stats::GraphStatistics;
use crate::history::{ClickRecord, ClickStatistics, HistoryStore, unix_now};
use crate::source::OntologyFormat;

/// Largest accepted ontology document.
pub const MAX_BODY_BYTES: usize = 64 * 1024 * 1024;

type ApiError = (StatusCode, String);

// ── Server state ──────────────────────────────────────────────────────────

/// Shared state behind every handler.
pub struct AppState {
    pub engine: Engine,
    pub history: HistoryStore,
}

impl AppState {
    pub fn new(engine: Engine) -> Self {
        let history = HistoryStore::with_max_sessions(engine.config().max_history_sessions);
        Self { engine, history }
    }
}

/// Build the API router.
pub fn router(state: Arc<AppState>) -> Router {
    Router::new()
        .route("/health", get(health))
        // Ontology.
        .route("/api/ontology/parse", post(parse_handler))
        .route(
            "/api/ontology/node-details/{node_id}",
            post(node_details_handler),
        )
        .route("/api/ontology/statistics", post(statistics_handler))
        // Click history.
        .route(
            "/api/history/{session}",
            get(history_handler).delete(clear_history_handler),
        )
        .route("/api/history/{session}/click", post(click_handler))
        .route(
            "/api/history/{session}/statistics",
            get(history_statistics_handler),
        )
        .layer(DefaultBodyLimit::max(MAX_BODY_BYTES))
        .layer(CorsLayer::permissive())
        .with_state(state)
}

// ── Request / response types ──────────────────────────────────────────────

#[derive(Debug, Serialize, Deserialize)]
pub struct HealthResponse {
    pub status: String,
    pub version: String,
    pub sessions: usize,
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
struct OntologyParams {
    format: Option<String>,
    max_nodes: Option<i64>,
}

impl OntologyParams {
    fn format(&self) -> Result<OntologyFormat, LoadError> {
        self.format
            .as_deref()
            .map(str::parse)
            .transpose()
            .map(Option::unwrap_or_default)
    }
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ClickRequest {
    pub node_id: String,
    #[serde(default)]
    pub node_name: Option<String>,
    #[serde(default = "default_opacity")]
    pub degree_opacity: f64,
}

fn default_opacity() -> f64 {
    1.0
}

// ── Error mapping ─────────────────────────────────────────────────────────

fn api_error(e: SemvizError) -> ApiError {
    if e.is_client_error() {
        tracing::warn!(error = %e, "rejected request");
        (StatusCode::BAD_REQUEST, e.to_string())
    } else {
        tracing::error!(error = %e, "request failed");
        (StatusCode::INTERNAL_SERVER_ERROR, e.to_string())
    }
}

fn bad_request(message: impl Into<String>) -> ApiError {
    let message = message.into();
    tracing::warn!(%message, "rejected request");
    (StatusCode::BAD_REQUEST, message)
}

/// Run CPU-bound engine work off the async executor.
async fn run_engine<T, F>(state: &Arc<AppState>, work: F) -> Result<T, ApiError>
where
    T: Send + 'static,
    F: FnOnce(&Engine) -> SemvizResult<T> + Send + 'static,
{
    let state = Arc::clone(state);
    tokio::task::spawn_blocking(move || work(&state.engine))
        .await
        .map_err(|e| {
            tracing::error!(error = %e, "engine task panicked");
            (StatusCode::INTERNAL_SERVER_ERROR, e.to_string())
        })?
        .map_err(api_error)
}

// ── Handlers ──────────────────────────────────────────────────────────────

async fn health(State(state): State<Arc<AppState>>) -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "ok".to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
        sessions: state.history.session_count(),
    })
}

async fn parse_handler(
    State(state): State<Arc<AppState>>,
    Query(params): Query<OntologyParams>,
    body: String,
) -> Result<Json<Graph>, ApiError> {
    let format = params.format().map_err(|e| api_error(e.into()))?;
    let max_nodes = params.max_nodes;
    let graph = run_engine(&state, move |engine| {
        engine.parse_graph(&body, format, max_nodes)
    })
    .await?;
    Ok(Json(graph))
}

async fn node_details_handler(
    State(state): State<Arc<AppState>>,
    Path(node_id): Path<String>,
    Query(params): Query<OntologyParams>,
    body: String,
) -> Result<Json<NodeDetails>, ApiError> {
    let format = params.format().map_err(|e| api_error(e.into()))?;
    let details = run_engine(&state, move |engine| {
        engine.node_details(&body, format, &node_id)
    })
    .await?;
    Ok(Json(details))
}

async fn statistics_handler(
    State(state): State<Arc<AppState>>,
    Query(params): Query<OntologyParams>,
    body: String,
) -> Result<Json<GraphStatistics>, ApiError> {
    let format = params.format().map_err(|e| api_error(e.into()))?;
    let stats = run_engine(&state, move |engine| engine.statistics(&body, format)).await?;
    Ok(Json(stats))
}

async fn click_handler(
    State(state): State<Arc<AppState>>,
    Path(session): Path<String>,
    Json(req): Json<ClickRequest>,
) -> Result<Json<Vec<ClickRecord>>, ApiError> {
    if req.node_id.trim().is_empty() {
        return Err(bad_request("nodeId cannot be empty"));
    }
    if !(0.0..=1.0).contains(&req.degree_opacity) {
        return Err(bad_request("degreeOpacity must be within [0, 1]"));
    }
    let name = req
        .node_name
        .filter(|n| !n.trim().is_empty())
        .unwrap_or_else(|| crate::graph::label::extract_label(&req.node_id).to_string());

    let now = unix_now();
    state
        .history
        .record_click(&session, &req.node_id, &name, req.degree_opacity, now);
    tracing::debug!(%session, node = %req.node_id, "recorded click");
    Ok(Json(state.history.entries(&session, now)))
}

async fn history_handler(
    State(state): State<Arc<AppState>>,
    Path(session): Path<String>,
) -> Json<Vec<ClickRecord>> {
    Json(state.history.entries(&session, unix_now()))
}

async fn clear_history_handler(
    State(state): State<Arc<AppState>>,
    Path(session): Path<String>,
) -> StatusCode {
    state.history.clear(&session);
    StatusCode::NO_CONTENT
}

async fn history_statistics_handler(
    State(state): State<Arc<AppState>>,
    Path(session): Path<String>,
) -> Json<ClickStatistics> {
    Json(state.history.statistics(&session))
}
