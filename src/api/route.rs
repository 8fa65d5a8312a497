use crate::{
    api::{birdeye, error::ApiError, solana},
    cache::SessionId,
    search::{self, SearchResponse},
    state::AppState,
    validation::require_param,
};
use axum::{
    extract::{rejection::JsonRejection, Query, State},
    routing::{get, post},
    Json, Router,
};
use serde::Deserialize;
use std::sync::Arc;
use tower_http::{cors::CorsLayer, trace::TraceLayer};
use tracing::info;

// GET /api/search and /api/solana/search query parameters
#[derive(Deserialize)]
pub struct SearchQuery {
    pub q: Option<String>,
}

// POST /api/follow-up body
#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FollowUpRequest {
    session_id: Option<String>,
    query: Option<String>,
}

// Create router with all routes
pub fn create_router(app_state: Arc<AppState>) -> Router {
    Router::new()
        .route("/api/search", get(search_handler))
        .route("/api/follow-up", post(follow_up_handler))
        .route("/api/solana/search", get(solana::solana_search))
        .route("/api/solana/address", post(solana::address_lookup))
        .route("/api/solana/lookup", get(solana::lookup))
        .nest("/api/birdeye", birdeye::routes())
        .with_state(app_state)
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
}

// GET /api/search handler - creates a new chat session
async fn search_handler(
    State(state): State<Arc<AppState>>,
    Query(params): Query<SearchQuery>,
) -> Result<Json<SearchResponse>, ApiError> {
    let query = require_param("q", params.q.as_deref())?;
    info!("Processing search request: {:?}", query);

    let response = search::start_search(&state, query)
        .await
        .map_err(ApiError::upstream("An error occurred while processing your search"))?;

    Ok(Json(response))
}

// POST /api/follow-up handler - continues an existing chat session
async fn follow_up_handler(
    State(state): State<Arc<AppState>>,
    payload: Result<Json<FollowUpRequest>, JsonRejection>,
) -> Result<Json<SearchResponse>, ApiError> {
    let Json(body) = payload?;
    let (Ok(session_id), Ok(query)) = (
        require_param("sessionId", body.session_id.as_deref()),
        require_param("query", body.query.as_deref()),
    ) else {
        return Err(ApiError::BadRequest(
            "Both sessionId and query are required".to_string(),
        ));
    };

    let session_id = SessionId::from(session_id);
    info!("Processing follow-up for session {}: {:?}", session_id, query);

    let response = search::follow_up(&state, &session_id, query)
        .await
        .map_err(ApiError::upstream(
            "An error occurred while processing your follow-up question",
        ))?;

    response
        .map(Json)
        .ok_or_else(|| ApiError::NotFound("Chat session not found".to_string()))
}
