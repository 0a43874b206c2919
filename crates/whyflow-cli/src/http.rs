//! HTTP - `CompetitorSelectionService` の上に載せる axum ルート
//!
//! どのレスポンスも JSON envelope。クエリ文字列は extractor で拒否せず、
//! `SelectionQuery::from_pairs` で寛容に読む（同じキーは最初の値）。

use std::sync::Arc;

use axum::{
    Json, Router,
    body::Bytes,
    extract::{RawQuery, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::get,
};
use tracing::info_span;
use tracing::Instrument;
use whyflow_core::api::{ApiResponse, CompetitorSelectionService, HttpStatus, SelectionQuery};

pub const COMPETITOR_SELECTION_PATH: &str = "/api/competitor-selection";

#[derive(Clone)]
pub struct AppState {
    service: Arc<CompetitorSelectionService>,
}

impl AppState {
    pub fn new(service: CompetitorSelectionService) -> Self {
        Self {
            service: Arc::new(service),
        }
    }
}

pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health))
        .route(
            COMPETITOR_SELECTION_PATH,
            get(get_competitor_selection).post(post_competitor_selection),
        )
        .with_state(state)
}

/// GET /health
async fn health() -> &'static str {
    "ok"
}

/// GET /api/competitor-selection
async fn get_competitor_selection(
    State(state): State<AppState>,
    RawQuery(raw): RawQuery,
) -> Response {
    let query = SelectionQuery::from_pairs(
        url::form_urlencoded::parse(raw.as_deref().unwrap_or_default().as_bytes()),
    );
    let span = info_span!("competitor_selection", method = "GET");
    let (status, body) = state.service.handle_get(&query).instrument(span).await;
    envelope(status, body)
}

/// POST /api/competitor-selection
async fn post_competitor_selection(State(state): State<AppState>, body: Bytes) -> Response {
    let span = info_span!("competitor_selection", method = "POST", body_len = body.len());
    let (status, body) = state.service.handle_post(&body).instrument(span).await;
    envelope(status, body)
}

fn envelope(status: HttpStatus, body: ApiResponse) -> Response {
    let code = StatusCode::from_u16(status.as_u16()).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);
    (code, Json(body)).into_response()
}
